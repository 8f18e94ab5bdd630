use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DecodingError>;

/// One step of the path from the document root to the value that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A child element addressed by name.
    Key(String),
    /// An element addressed by its position inside a sequence.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodingError {
    /// Errors related to building the document tree
    #[error("Malformed XML document: {reason}")]
    MalformedDocument { reason: String },

    #[error("Document is {size} bytes long, exceeding the configured limit of {limit} bytes")]
    DocumentTooLarge { size: usize, limit: usize },

    /// Errors related to decoding records from the tree
    #[error("Expected element `{key}` but got none (context: `{context}`)")]
    MissingField { key: String, context: String },

    #[error("Expected {expected} for `{key}`, but got `{found}`")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("Expected a `{name}` attribute on `{element}`")]
    MissingAttribute { name: String, element: String },

    #[error("Malformed URL `{href}` in `{element}`, caused by: {source}")]
    MalformedUrl {
        href: String,
        element: String,
        source: url::ParseError,
    },

    #[error("Malformed date `{text}` in `{element}`, caused by: {source}")]
    MalformedDate {
        text: String,
        element: String,
        source: jiff::Error,
    },

    #[error("Expected a node named `{expected}`, but got `{actual}`")]
    TagMismatch { expected: String, actual: String },

    #[error("Expected text inside `{element}`, but got element `{found}`")]
    ExpectedText { element: String, found: String },

    #[error("Sequence has no element at index {index} (count: {count})")]
    SequenceExhausted { index: usize, count: usize },

    #[error("Unknown {what} `{value}`")]
    UnknownValue { what: &'static str, value: String },

    #[error("Unsupported decoder operation: {operation}")]
    UnsupportedOperation { operation: String },

    #[error("Failed to decode `{segment}`, caused by:\n\t {source}")]
    Nested {
        segment: PathSegment,
        source: Box<DecodingError>,
    },
}

impl DecodingError {
    pub(crate) fn malformed(reason: impl fmt::Display) -> Self {
        DecodingError::MalformedDocument {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unsupported(operation: impl Into<String>) -> Self {
        DecodingError::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    pub(crate) fn in_key(self, key: &str) -> Self {
        DecodingError::Nested {
            segment: PathSegment::Key(key.to_owned()),
            source: Box::new(self),
        }
    }

    pub(crate) fn in_index(self, index: usize) -> Self {
        DecodingError::Nested {
            segment: PathSegment::Index(index),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all coding path wrappers removed.
    pub fn root_cause(&self) -> &DecodingError {
        let mut current = self;
        while let DecodingError::Nested { source, .. } = current {
            current = source;
        }
        current
    }

    /// Path from the document root to the failing value, e.g. `invoice.line_items[2]`.
    ///
    /// Empty when the error was raised directly on the root element.
    pub fn coding_path(&self) -> String {
        let mut path = String::new();
        let mut current = self;

        while let DecodingError::Nested { segment, source } = current {
            if let PathSegment::Key(_) = segment {
                if !path.is_empty() {
                    path.push('.');
                }
            }
            path.push_str(&segment.to_string());
            current = source;
        }

        path
    }
}
