use crate::decoder::{Decode, Decoder};
use crate::err::{DecodingError, Result};
use crate::settings::DecoderSettings;
use crate::tree_builder::XmlTreeBuilder;

/// Name reported for nodes without an element name (text nodes).
pub(crate) const TEXT_NODE_NAME: &str = "#text";

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct XmlAttribute {
    pub name: String,
    pub value: String,
}

/// A node of the document tree.
///
/// Elements carry a name, attributes and children. Text nodes carry only text.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct XmlNode {
    name: Option<String>,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlNode>,
    text: Option<String>,
}

impl XmlNode {
    pub fn element(name: impl Into<String>) -> Self {
        XmlNode {
            name: Some(name.into()),
            ..XmlNode::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        XmlNode {
            text: Some(text.into()),
            ..XmlNode::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attribute(XmlAttribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.push_child(child);
        self
    }

    pub(crate) fn push_attribute(&mut self, attribute: XmlAttribute) {
        self.attributes.push(attribute);
    }

    pub(crate) fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// Element name, `None` for text nodes.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Element name, or `#text` for text nodes. Used in error messages.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(TEXT_NODE_NAME)
    }

    pub fn is_element(&self) -> bool {
        self.name.is_some()
    }

    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// The first direct child element called `name`.
    ///
    /// Repeated children are not an error, later ones are simply never looked at.
    pub fn first_child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name() == Some(name))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter(|child| child.is_element())
    }

    /// Raw text of a text node.
    pub fn raw_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Concatenated text of this node.
    ///
    /// A text node yields its own text, an empty element yields an empty string.
    /// Mixed content is rejected: an element child fails with `ExpectedText`.
    pub fn text_contents(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        let mut result = String::new();
        for child in &self.children {
            match (&child.name, &child.text) {
                (None, Some(text)) => result.push_str(text),
                (None, None) => {}
                (Some(found), _) => {
                    return Err(DecodingError::ExpectedText {
                        element: self.display_name().to_owned(),
                        found: found.clone(),
                    });
                }
            }
        }

        Ok(result)
    }

    /// Compact rendering of this node, used as context in error messages.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }

    fn write_xml(&self, out: &mut String) {
        let Some(name) = &self.name else {
            out.push_str(&escape_text(self.text.as_deref().unwrap_or_default()));
            return;
        };

        out.push('<');
        out.push_str(name);
        for attr in &self.attributes {
            out.push(' ');
            out.push_str(&attr.name);
            out.push_str("=\"");
            out.push_str(&escape_text(&attr.value).replace('"', "&quot;"));
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            child.write_xml(out);
        }
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A parsed document. Always has exactly one root element.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct XmlDocument {
    root: XmlNode,
}

impl XmlDocument {
    pub(crate) fn from_root(root: XmlNode) -> Self {
        XmlDocument { root }
    }

    /// Parses `bytes` into a tree.
    ///
    /// Fails with `DocumentTooLarge` when the buffer exceeds the configured limit, and with
    /// `MalformedDocument` when it is not well-formed XML or has no root element.
    pub fn parse(bytes: &[u8], settings: &DecoderSettings) -> Result<Self> {
        if let Some(limit) = settings.get_max_document_size() {
            if bytes.len() > limit {
                return Err(DecodingError::DocumentTooLarge {
                    size: bytes.len(),
                    limit,
                });
            }
        }

        XmlTreeBuilder::new(settings).build(bytes)
    }

    pub fn root(&self) -> &XmlNode {
        &self.root
    }

    /// Decodes `T` from the children of the root element.
    pub fn decode<T: Decode>(&self, settings: &DecoderSettings) -> Result<T> {
        T::decode(&Decoder::new(&self.root, settings))
    }
}
