use jiff::Timestamp;
use url::Url;

use crate::decoder::values::{timestamp_from_node, url_from_node};
use crate::decoder::{Decode, Decoder, Scalar, UnkeyedContainer};
use crate::err::{DecodingError, Result};
use crate::model::xml::XmlNode;
use crate::settings::DecoderSettings;

/// View over the direct children of one element, addressed by element name.
///
/// When an element has several children with the same name, the first one is used for
/// every lookup. Field order is never checked.
#[derive(Debug, Clone, Copy)]
pub struct KeyedContainer<'doc> {
    node: &'doc XmlNode,
    settings: &'doc DecoderSettings,
}

impl<'doc> KeyedContainer<'doc> {
    pub fn new(node: &'doc XmlNode, settings: &'doc DecoderSettings) -> Self {
        KeyedContainer { node, settings }
    }

    /// Names of the direct child elements, in document order.
    pub fn keys(&self) -> Vec<&'doc str> {
        self.node
            .child_elements()
            .filter_map(XmlNode::name)
            .collect()
    }

    /// Is there a direct child element called `key`?
    pub fn contains(&self, key: &str) -> bool {
        self.child(key).is_some()
    }

    /// A field is nil when its element is absent or carries the nil marker attribute.
    pub fn decode_nil(&self, key: &str) -> bool {
        match self.child(key) {
            Some(child) => child
                .attribute(self.settings.get_nil_attribute())
                .is_some(),
            None => true,
        }
    }

    pub fn decode_scalar<T: Scalar>(&self, key: &str) -> Result<T> {
        let text = self.require_child(key)?.text_contents()?;

        T::from_text(&text).ok_or_else(|| DecodingError::TypeMismatch {
            key: key.to_owned(),
            expected: T::NAME,
            found: text,
        })
    }

    pub fn decode_string(&self, key: &str) -> Result<String> {
        self.decode_scalar(key)
    }

    pub fn decode_bool(&self, key: &str) -> Result<bool> {
        self.decode_scalar(key)
    }

    pub fn decode_i64(&self, key: &str) -> Result<i64> {
        self.decode_scalar(key)
    }

    /// Reads an ISO-8601 timestamp with zone from the text of `key`.
    pub fn decode_timestamp(&self, key: &str) -> Result<Timestamp> {
        timestamp_from_node(self.require_child(key)?)
    }

    /// Reads a URL from the `href` attribute of `key`.
    pub fn decode_href(&self, key: &str) -> Result<Url> {
        url_from_node(self.require_child(key)?, self.settings)
    }

    /// Decodes a nested value from the element `key`.
    pub fn decode<T: Decode>(&self, key: &str) -> Result<T> {
        let child = self.require_child(key)?;
        T::decode(&Decoder::new(child, self.settings)).map_err(|e| e.in_key(key))
    }

    /// Runs `decode` unless the field is nil.
    ///
    /// ```
    /// # use billing_xml::{Decoder, DecoderSettings, KeyedContainer, XmlDocument};
    /// let settings = DecoderSettings::new();
    /// let doc = XmlDocument::parse(
    ///     br#"<subscription><canceled_at nil="nil"></canceled_at></subscription>"#,
    ///     &settings,
    /// )
    /// .unwrap();
    /// let keyed = Decoder::new(doc.root(), &settings).keyed();
    ///
    /// let canceled_at = keyed
    ///     .decode_if_present("canceled_at", KeyedContainer::decode_timestamp)
    ///     .unwrap();
    /// assert_eq!(canceled_at, None);
    /// ```
    pub fn decode_if_present<T, F>(&self, key: &str, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(&Self, &str) -> Result<T>,
    {
        if self.decode_nil(key) {
            return Ok(None);
        }

        decode(self, key).map(Some)
    }

    pub fn nested_keyed_container(&self, key: &str) -> Result<KeyedContainer<'doc>> {
        Err(DecodingError::unsupported(format!(
            "nested keyed container for `{key}`"
        )))
    }

    pub fn nested_unkeyed_container(&self, key: &str) -> Result<UnkeyedContainer<'doc>> {
        Err(DecodingError::unsupported(format!(
            "nested unkeyed container for `{key}`"
        )))
    }

    fn child(&self, key: &str) -> Option<&'doc XmlNode> {
        self.node.first_child(key)
    }

    fn require_child(&self, key: &str) -> Result<&'doc XmlNode> {
        self.child(key).ok_or_else(|| DecodingError::MissingField {
            key: key.to_owned(),
            context: self.node.to_xml_string(),
        })
    }
}
