use jiff::Timestamp;
use url::Url;

use crate::decoder::{Decode, Decoder};
use crate::err::{DecodingError, Result};
use crate::model::xml::XmlNode;
use crate::settings::DecoderSettings;

/// `yyyy-MM-dd'T'HH:mm:ss` followed by a `+HH:MM` / `-HH:MM` offset.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Parses the text of `node` as an ISO-8601 timestamp with a zone designator,
/// e.g. `2018-08-13T12:00:00Z` or `2018-08-13T14:00:00+02:00`.
///
/// Only this extended form is accepted. Basic forms, a space separator, missing seconds,
/// fractional seconds and bracketed zone annotations are `MalformedDate`.
pub(crate) fn timestamp_from_node(node: &XmlNode) -> Result<Timestamp> {
    let text = node.text_contents()?;

    // `%:z` does not accept the `Z` designator.
    let parsed = match text.strip_suffix('Z') {
        Some(utc) => Timestamp::strptime(TIMESTAMP_FORMAT, format!("{utc}+00:00")),
        None => Timestamp::strptime(TIMESTAMP_FORMAT, &text),
    };

    parsed.map_err(|source| DecodingError::MalformedDate {
        element: node.display_name().to_owned(),
        text,
        source,
    })
}

/// Reads the link target of `node` from its `href` attribute.
pub(crate) fn url_from_node(node: &XmlNode, settings: &DecoderSettings) -> Result<Url> {
    let name = settings.get_href_attribute();
    let href = node
        .attribute(name)
        .ok_or_else(|| DecodingError::MissingAttribute {
            name: name.to_owned(),
            element: node.display_name().to_owned(),
        })?;

    Url::parse(href).map_err(|source| DecodingError::MalformedUrl {
        href: href.to_owned(),
        element: node.display_name().to_owned(),
        source,
    })
}

impl Decode for Timestamp {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        timestamp_from_node(decoder.node())
    }
}

impl Decode for Url {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        url_from_node(decoder.node(), decoder.settings())
    }
}
