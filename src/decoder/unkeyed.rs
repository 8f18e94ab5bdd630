use crate::decoder::{Decode, Decoder, KeyedContainer, Scalar, XmlTag};
use crate::err::{DecodingError, Result};
use crate::model::xml::XmlNode;
use crate::settings::DecoderSettings;

/// Cursor over a run of sibling nodes, decoded left to right.
///
/// Only structured elements can be read from a sequence, each of them tagged with the
/// `XmlTag` of the requested type.
#[derive(Debug, Clone)]
pub struct UnkeyedContainer<'doc> {
    nodes: &'doc [XmlNode],
    settings: &'doc DecoderSettings,
    current_index: usize,
}

impl<'doc> UnkeyedContainer<'doc> {
    pub fn new(nodes: &'doc [XmlNode], settings: &'doc DecoderSettings) -> Self {
        UnkeyedContainer {
            nodes,
            settings,
            current_index: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn remaining(&self) -> usize {
        self.count().saturating_sub(self.current_index)
    }

    pub fn is_at_end(&self) -> bool {
        self.current_index >= self.nodes.len()
    }

    /// Decodes the node under the cursor as `T` and moves past it.
    ///
    /// The cursor does not move when decoding fails.
    pub fn decode<T: Decode + XmlTag>(&mut self) -> Result<T> {
        let index = self.current_index;
        let node = self
            .nodes
            .get(index)
            .ok_or(DecodingError::SequenceExhausted {
                index,
                count: self.nodes.len(),
            })?;

        if node.name() != Some(T::TAG) {
            return Err(DecodingError::TagMismatch {
                expected: T::TAG.to_owned(),
                actual: node.display_name().to_owned(),
            });
        }

        let value =
            T::decode(&Decoder::new(node, self.settings)).map_err(|e| e.in_index(index))?;
        self.current_index += 1;

        Ok(value)
    }

    /// Sequences of bare scalars do not occur in provider documents.
    pub fn decode_scalar<T: Scalar>(&mut self) -> Result<T> {
        Err(DecodingError::unsupported(format!(
            "decoding {} from a sequence",
            T::NAME
        )))
    }

    pub fn decode_nil(&mut self) -> Result<bool> {
        Err(DecodingError::unsupported("decoding nil from a sequence"))
    }

    pub fn nested_keyed_container(&mut self) -> Result<KeyedContainer<'doc>> {
        Err(DecodingError::unsupported(
            "nested keyed container inside a sequence",
        ))
    }

    pub fn nested_unkeyed_container(&mut self) -> Result<UnkeyedContainer<'doc>> {
        Err(DecodingError::unsupported(
            "nested unkeyed container inside a sequence",
        ))
    }
}
