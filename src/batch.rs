use crate::decode_with_settings;
use crate::decoder::Decode;
use crate::err::Result;
use crate::settings::DecoderSettings;

use log::debug;
#[cfg(feature = "multithreading")]
use log::warn;
#[cfg(feature = "multithreading")]
use rayon::prelude::*;

/// Decodes every buffer in `documents` as `T`, results in input order.
///
/// Documents are independent of each other, so with the `multithreading` feature they are
/// decoded in parallel. `settings.get_num_threads()` of 0 uses rayon's global pool, 1 decodes
/// sequentially, anything else gets a dedicated pool of that size. Each single document is
/// still decoded on one thread.
pub fn decode_batch<T, D>(documents: &[D], settings: &DecoderSettings) -> Vec<Result<T>>
where
    T: Decode + Send,
    D: AsRef<[u8]> + Sync,
{
    debug!(
        "decoding {} documents as `{}`",
        documents.len(),
        std::any::type_name::<T>()
    );

    #[cfg(feature = "multithreading")]
    {
        let num_threads = settings.get_num_threads();

        if num_threads == 0 && documents.len() > 1 {
            return decode_parallel(documents, settings);
        }

        if num_threads > 1 && documents.len() > 1 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
            {
                Ok(pool) => return pool.install(|| decode_parallel(documents, settings)),
                Err(e) => warn!("failed to build thread pool, decoding sequentially: {}", e),
            }
        }
    }

    documents
        .iter()
        .map(|document| decode_with_settings(document.as_ref(), settings))
        .collect()
}

/// Runs on the current rayon pool, which is the global one outside of `install`.
#[cfg(feature = "multithreading")]
fn decode_parallel<T, D>(documents: &[D], settings: &DecoderSettings) -> Vec<Result<T>>
where
    T: Decode + Send,
    D: AsRef<[u8]> + Sync,
{
    documents
        .par_iter()
        .map(|document| decode_with_settings(document.as_ref(), settings))
        .collect()
}
