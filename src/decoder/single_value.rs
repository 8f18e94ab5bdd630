use crate::decoder::{Decode, Decoder, Scalar, ScalarKind};
use crate::err::{DecodingError, Result};
use crate::model::xml::XmlNode;
use crate::settings::DecoderSettings;

/// View over a single node, decoded as a whole.
#[derive(Debug, Clone, Copy)]
pub struct SingleValueContainer<'doc> {
    node: &'doc XmlNode,
    settings: &'doc DecoderSettings,
}

impl<'doc> SingleValueContainer<'doc> {
    pub fn new(node: &'doc XmlNode, settings: &'doc DecoderSettings) -> Self {
        SingleValueContainer { node, settings }
    }

    /// Nodes without an element name (bare text) are nil.
    pub fn is_nil(&self) -> bool {
        !self.node.is_element()
    }

    pub fn decode_string(&self) -> Result<String> {
        self.node.text_contents()
    }

    /// Only text can be read from a single value, the provider never sends bare scalars.
    pub fn decode_scalar<T: Scalar>(&self) -> Result<T> {
        if T::KIND != ScalarKind::Text {
            return Err(DecodingError::unsupported(format!(
                "decoding {} from a single value",
                T::NAME
            )));
        }

        let text = self.decode_string()?;
        T::from_text(&text).ok_or_else(|| DecodingError::TypeMismatch {
            key: self.node.display_name().to_owned(),
            expected: T::NAME,
            found: text,
        })
    }

    pub fn decode<T: Decode>(&self) -> Result<T> {
        T::decode(&Decoder::new(self.node, self.settings))
    }
}
