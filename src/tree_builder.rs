use crate::err::{DecodingError, Result};
use crate::model::xml::{XmlAttribute, XmlDocument, XmlNode};
use crate::settings::DecoderSettings;

use log::trace;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Drives a `quick-xml` event stream into an owned `XmlNode` tree.
pub(crate) struct XmlTreeBuilder<'s> {
    settings: &'s DecoderSettings,
    /// Elements which were opened but not closed yet, innermost last.
    stack: Vec<XmlNode>,
    root: Option<XmlNode>,
}

impl<'s> XmlTreeBuilder<'s> {
    pub fn new(settings: &'s DecoderSettings) -> Self {
        XmlTreeBuilder {
            settings,
            stack: Vec::new(),
            root: None,
        }
    }

    pub fn build(mut self, bytes: &[u8]) -> Result<XmlDocument> {
        let mut reader = Reader::from_reader(bytes);

        loop {
            let event = reader.read_event().map_err(|e| {
                DecodingError::malformed(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(start) => self.visit_open_start_element(&start)?,
                Event::Empty(empty) => {
                    self.visit_open_start_element(&empty)?;
                    self.visit_close_element()?;
                }
                Event::End(_) => self.visit_close_element()?,
                Event::Text(text) => {
                    let text = text.unescape().map_err(DecodingError::malformed)?;
                    self.visit_characters(&text)?;
                }
                Event::CData(cdata) => {
                    let text = std::str::from_utf8(&cdata).map_err(DecodingError::malformed)?;
                    self.visit_characters(text)?;
                }
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {
                    trace!("skipping non-content event");
                }
                Event::Eof => return self.visit_end_of_stream(),
            }
        }
    }

    fn visit_open_start_element(&mut self, start: &BytesStart<'_>) -> Result<()> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(DecodingError::malformed)?
            .to_owned();
        trace!("visit_open_start_element: `{}`", name);

        if self.stack.is_empty() && self.root.is_some() {
            return Err(DecodingError::malformed(format!(
                "found a second root element `{name}`"
            )));
        }

        let mut node = XmlNode::element(name);
        for attr in start.attributes() {
            let attr = attr.map_err(DecodingError::malformed)?;
            let name = std::str::from_utf8(attr.key.as_ref())
                .map_err(DecodingError::malformed)?
                .to_owned();
            let value = attr
                .unescape_value()
                .map_err(DecodingError::malformed)?
                .into_owned();
            node.push_attribute(XmlAttribute { name, value });
        }

        self.stack.push(node);
        Ok(())
    }

    fn visit_close_element(&mut self) -> Result<()> {
        let node = self
            .stack
            .pop()
            .ok_or_else(|| DecodingError::malformed("closing tag without an open element"))?;
        trace!("visit_close_element: `{}`", node.display_name());

        match self.stack.last_mut() {
            Some(parent) => parent.push_child(node),
            None => self.root = Some(node),
        }

        Ok(())
    }

    fn visit_characters(&mut self, text: &str) -> Result<()> {
        let whitespace_only = text.chars().all(char::is_whitespace);

        match self.stack.last_mut() {
            Some(parent) => {
                if whitespace_only && !self.settings.should_preserve_whitespace() {
                    return Ok(());
                }
                trace!("visit_characters: {} bytes", text.len());
                parent.push_child(XmlNode::text(text));
                Ok(())
            }
            None if whitespace_only => Ok(()),
            None => Err(DecodingError::malformed(
                "text content outside of the root element",
            )),
        }
    }

    fn visit_end_of_stream(self) -> Result<XmlDocument> {
        trace!("visit_end_of_stream");

        if let Some(open) = self.stack.last() {
            return Err(DecodingError::malformed(format!(
                "unexpected end of document, `{}` is not closed",
                open.display_name()
            )));
        }

        self.root
            .map(XmlDocument::from_root)
            .ok_or_else(|| DecodingError::malformed("document has no root element"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensure_env_logger_initialized;
    use pretty_assertions::assert_eq;

    fn parse(xml: &str) -> Result<XmlDocument> {
        ensure_env_logger_initialized();
        XmlDocument::parse(xml.as_bytes(), &DecoderSettings::new())
    }

    #[test]
    fn test_builds_tree_without_whitespace_nodes() {
        let doc = parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<subscriptions type="array">
  <!-- first page -->
  <subscription href="https://api.example.com/v2/subscriptions/1">
    <uuid>1</uuid>
  </subscription>
  <subscription/>
</subscriptions>"#,
        )
        .unwrap();

        let root = doc.root();
        assert_eq!(root.name(), Some("subscriptions"));
        assert_eq!(root.attribute("type"), Some("array"));
        assert_eq!(root.children().len(), 2);

        let first = &root.children()[0];
        assert_eq!(
            first.attribute("href"),
            Some("https://api.example.com/v2/subscriptions/1")
        );
        assert_eq!(first.children().len(), 1);
        assert_eq!(first.children()[0].text_contents().unwrap(), "1");
        assert!(root.children()[1].children().is_empty());
    }

    #[test]
    fn test_preserves_whitespace_when_asked() {
        let settings = DecoderSettings::new().preserve_whitespace(true);
        let doc = XmlDocument::parse(b"<a>\n  <b>x</b>\n</a>", &settings).unwrap();

        assert_eq!(doc.root().children().len(), 3);
        assert!(!doc.root().children()[0].is_element());
    }

    #[test]
    fn test_unescapes_text_attributes_and_cdata() {
        let doc = parse(r#"<a title="Q&amp;A"><b>1 &lt; 2</b><c><![CDATA[<raw>]]></c></a>"#).unwrap();

        let root = doc.root();
        assert_eq!(root.attribute("title"), Some("Q&A"));
        assert_eq!(root.first_child("b").unwrap().text_contents().unwrap(), "1 < 2");
        assert_eq!(root.first_child("c").unwrap().text_contents().unwrap(), "<raw>");
    }

    #[test]
    fn test_rejects_malformed_documents() {
        for xml in [
            "",
            "   ",
            "<!-- only a comment -->",
            "<a><b></a>",
            "<a>",
            "<a></a><b></b>",
            "hello <a></a>",
        ] {
            let err = parse(xml).unwrap_err();
            assert!(
                matches!(err, DecodingError::MalformedDocument { .. }),
                "expected `{xml}` to be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let settings = DecoderSettings::new();

        for bytes in [
            &b"<a>caf\xff</a>"[..],
            &b"<a\xff></a\xff>"[..],
            &b"<a><b\xff/></a>"[..],
            &b"<a title=\"\xff\"></a>"[..],
            &b"<a \xff=\"1\"></a>"[..],
            &b"<a><![CDATA[\xff]]></a>"[..],
        ] {
            let err = XmlDocument::parse(bytes, &settings).unwrap_err();
            assert!(
                matches!(err, DecodingError::MalformedDocument { .. }),
                "expected {bytes:?} to be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_enforces_size_limit() {
        let settings = DecoderSettings::new().max_document_size(Some(8));
        let err = XmlDocument::parse(b"<account></account>", &settings).unwrap_err();

        assert!(matches!(
            err,
            DecodingError::DocumentTooLarge { size: 19, limit: 8 }
        ));
    }
}
