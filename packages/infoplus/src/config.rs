//! Configuration constants and codec options.

/// Local name of the message envelope shared by all push exports.
pub const ENVELOPE_ELEMENT: &str = "PutReisInformatieBoodschapIn";

/// DVS push export message namespace (v5).
pub const DVS_MESSAGE_NAMESPACE: &str = "urn:ndov:cdm:trein:reisinformatie:messages:5";

/// DAS push export message namespace (v1).
pub const DAS_MESSAGE_NAMESPACE: &str =
    "urn:ndov:cdm:trein:reisinformatie:messages:dynamischeaankomststaat:1";

/// Data namespace shared by the DVS and DAS products.
pub const NDOV_DATA_NAMESPACE: &str = "urn:ndov:cdm:trein:reisinformatie:data:4";

/// RIT push export message namespace (v5).
pub const RIT_MESSAGE_NAMESPACE: &str = "urn:ns:cdm:reisinformatie:message:ritinfo:5";

/// RIT product data namespace (v5).
pub const RIT_DATA_NAMESPACE: &str = "urn:ns:cdm:reisinformatie:data:rit:5";

/// Prefix bound to the data namespace in encoded documents.
pub const DATA_PREFIX: &str = "ns2";

/// Attribute distinguishing planned from actual entries.
pub const STATUS_ATTRIBUTE: &str = "InfoStatus";

/// Field name used for the text content of an element that also has attributes.
pub const CONTENT_FIELD: &str = "value";

/// What the decoder does with elements its schema tables do not describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownElementPolicy {
    /// Ignore the element and its subtree (logged at debug level).
    #[default]
    Skip,
    /// Fail with a schema mismatch naming the element path.
    Reject,
}

/// Options for decoding and encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    pub unknown_elements: UnknownElementPolicy,
    /// Spaces per nesting level in encoded output; 0 writes a single line.
    pub indent: usize,
    /// Whether encoded output starts with an XML declaration.
    pub xml_declaration: bool,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self {
            unknown_elements: UnknownElementPolicy::Skip,
            indent: 2,
            xml_declaration: true,
        }
    }

    pub fn with_unknown_elements(mut self, policy: UnknownElementPolicy) -> Self {
        self.unknown_elements = policy;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_declaration(mut self, xml_declaration: bool) -> Self {
        self.xml_declaration = xml_declaration;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}
