//! Schema-driven decoding of typed records from a document tree.
//!
//! Record types describe their own shape by implementing [`Decode`]: they open a container
//! on the [`Decoder`] they are handed and request every field by its element name.
//! There is no reflection, the element names written in a `Decode` impl are the mapping.
//!
//! - [`KeyedContainer`] addresses the direct children of an element by name.
//! - [`UnkeyedContainer`] walks a run of sibling elements with a cursor. Element types
//!   declare their tag through [`XmlTag`].
//! - [`SingleValueContainer`] reads the text of a single leaf node.

mod keyed;
mod scalar;
mod single_value;
mod unkeyed;
mod values;

pub use self::keyed::KeyedContainer;
pub use self::scalar::{Scalar, ScalarKind};
pub use self::single_value::SingleValueContainer;
pub use self::unkeyed::UnkeyedContainer;

use crate::err::Result;
use crate::model::xml::XmlNode;
use crate::settings::DecoderSettings;

/// A type which can be decoded from a node of the document tree.
pub trait Decode: Sized {
    fn decode(decoder: &Decoder<'_>) -> Result<Self>;
}

/// Element tag of a type decoded from a sequence of sibling elements.
pub trait XmlTag {
    const TAG: &'static str;
}

/// Decoding context for a single node.
///
/// Cheap to copy; borrows the tree and the settings for the duration of one recursion step.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'doc> {
    node: &'doc XmlNode,
    settings: &'doc DecoderSettings,
}

impl<'doc> Decoder<'doc> {
    pub fn new(node: &'doc XmlNode, settings: &'doc DecoderSettings) -> Self {
        Decoder { node, settings }
    }

    pub fn node(&self) -> &'doc XmlNode {
        self.node
    }

    pub fn settings(&self) -> &'doc DecoderSettings {
        self.settings
    }

    /// Element name of the current node, `None` for text nodes.
    pub fn tag(&self) -> Option<&'doc str> {
        self.node.name()
    }

    /// Attribute of the current node.
    pub fn attribute(&self, name: &str) -> Option<&'doc str> {
        self.node.attribute(name)
    }

    pub fn keyed(&self) -> KeyedContainer<'doc> {
        KeyedContainer::new(self.node, self.settings)
    }

    pub fn unkeyed(&self) -> UnkeyedContainer<'doc> {
        UnkeyedContainer::new(self.node.children(), self.settings)
    }

    pub fn single_value(&self) -> SingleValueContainer<'doc> {
        SingleValueContainer::new(self.node, self.settings)
    }
}

/// Lists are the children of an element, every one of them tagged `T::TAG`.
impl<T: Decode + XmlTag> Decode for Vec<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let mut sequence = decoder.unkeyed();
        let mut items = Vec::with_capacity(sequence.count());

        while !sequence.is_at_end() {
            items.push(sequence.decode()?);
        }

        Ok(items)
    }
}

impl Decode for String {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.single_value().decode_string()
    }
}
