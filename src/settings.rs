/// Knobs for building the document tree and decoding records from it.
///
/// ```
/// use billing_xml::DecoderSettings;
///
/// let settings = DecoderSettings::new()
///     .num_threads(1)
///     .max_document_size(Some(1 << 20));
///
/// assert_eq!(settings.get_nil_attribute(), "nil");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderSettings {
    /// Attribute marking an element as explicitly null.
    nil_attribute: String,
    /// Attribute holding the target of link-shaped elements.
    href_attribute: String,
    /// Keep text nodes which contain only whitespace.
    preserve_whitespace: bool,
    /// Reject buffers longer than this before parsing.
    max_document_size: Option<usize>,
    /// Threads used by `decode_batch`, 0 means "let rayon decide".
    num_threads: usize,
}

impl Default for DecoderSettings {
    fn default() -> Self {
        DecoderSettings {
            nil_attribute: "nil".to_owned(),
            href_attribute: "href".to_owned(),
            preserve_whitespace: false,
            max_document_size: None,
            num_threads: 0,
        }
    }
}

impl DecoderSettings {
    pub fn new() -> Self {
        DecoderSettings::default()
    }

    /// Sets the name of the attribute which marks an element as null.
    pub fn nil_attribute(mut self, name: impl Into<String>) -> Self {
        self.nil_attribute = name.into();
        self
    }

    /// Sets the name of the attribute read by URL-valued fields.
    pub fn href_attribute(mut self, name: impl Into<String>) -> Self {
        self.href_attribute = name.into();
        self
    }

    /// When set, whitespace-only text between elements is kept in the tree.
    ///
    /// Off by default, since pretty printed provider payloads would otherwise break
    /// sequence decoding.
    pub fn preserve_whitespace(mut self, preserve_whitespace: bool) -> Self {
        self.preserve_whitespace = preserve_whitespace;
        self
    }

    /// Upper bound on the size of a single document, `None` disables the check.
    pub fn max_document_size(mut self, max_document_size: Option<usize>) -> Self {
        self.max_document_size = max_document_size;
        self
    }

    /// Sets the number of worker threads used by batch decoding.
    /// `0` will let rayon decide, `1` decodes sequentially on the calling thread.
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = if cfg!(feature = "multithreading") {
            num_threads
        } else {
            1
        };
        self
    }

    pub fn get_nil_attribute(&self) -> &str {
        &self.nil_attribute
    }

    pub fn get_href_attribute(&self) -> &str {
        &self.href_attribute
    }

    pub fn should_preserve_whitespace(&self) -> bool {
        self.preserve_whitespace
    }

    pub fn get_max_document_size(&self) -> Option<usize> {
        self.max_document_size
    }

    pub fn get_num_threads(&self) -> usize {
        self.num_threads
    }
}
