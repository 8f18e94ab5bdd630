#![deny(unused_must_use)]
#![forbid(unsafe_code)]
//! Typed decoding of the XML documents sent by an XML based subscription billing provider
//! (API responses and webhook notifications).
//!
//! ```
//! use billing_xml::recurly::Subscription;
//!
//! let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
//! <subscription href="https://api.example.com/v2/subscriptions/44f83d7cba354d5b84812419f923ea96">
//!   <plan href="https://api.example.com/v2/plans/monthly">
//!     <plan_code>monthly</plan_code>
//!     <name>Monthly Subscription</name>
//!   </plan>
//!   <uuid>44f83d7cba354d5b84812419f923ea96</uuid>
//!   <state>active</state>
//!   <unit_amount_in_cents type="integer">1500</unit_amount_in_cents>
//!   <quantity type="integer">1</quantity>
//!   <activated_at type="datetime">2018-08-13T12:00:00Z</activated_at>
//!   <canceled_at nil="nil"></canceled_at>
//! </subscription>"#;
//!
//! let subscription: Subscription = billing_xml::decode(xml).unwrap();
//! assert_eq!(subscription.plan.plan_code, "monthly");
//! assert!(subscription.canceled_at.is_none());
//! ```

pub use batch::decode_batch;
pub use decoder::{
    Decode, Decoder, KeyedContainer, Scalar, ScalarKind, SingleValueContainer, UnkeyedContainer,
    XmlTag,
};
pub use err::{DecodingError, PathSegment, Result};
pub use model::xml::{XmlAttribute, XmlDocument, XmlNode};
pub use settings::DecoderSettings;

#[macro_use]
mod macros;

mod batch;
pub mod decoder;
pub mod err;
pub mod model;
pub mod recurly;
mod settings;
mod tree_builder;

use log::debug;

/// Decodes `T` from the children of the root element of `bytes`.
pub fn decode<T: Decode>(bytes: &[u8]) -> Result<T> {
    decode_with_settings(bytes, &DecoderSettings::default())
}

pub fn decode_with_settings<T: Decode>(bytes: &[u8], settings: &DecoderSettings) -> Result<T> {
    let document = XmlDocument::parse(bytes, settings)?;

    debug!(
        "decoding `{}` from root element `{}`",
        std::any::type_name::<T>(),
        document.root().display_name()
    );

    document.decode(settings)
}

// For tests, we only initialize logging once.
#[cfg(test)]
use std::sync::Once;

#[cfg(test)]
static LOGGER_INIT: Once = Once::new();

// Rust runs the tests concurrently, so unless we synchronize logging access
// it will crash when attempting to run `cargo test` with some logging facilities.
#[cfg(test)]
pub fn ensure_env_logger_initialized() {
    use std::io::Write;

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .format(|buf, record| writeln!(buf, "[{}] - {}", record.level(), record.args()))
            .init();
    });
}
