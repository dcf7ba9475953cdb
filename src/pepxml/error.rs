/// Errors that can occur during pepXML parsing
#[derive(Debug, thiserror::Error)]
pub enum PepXmlError {
    /// Error parsing XML
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Element nesting that the parser cannot attach to a spectrum or hit
    #[error("Invalid pepXML structure: {0}")]
    InvalidStructure(String),

    /// Required XML attribute is missing
    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// Element the attribute belongs to
        element: &'static str,
        /// Name of the missing attribute
        attribute: &'static str,
    },

    /// Attribute or score value that does not parse as the expected type
    #[error("Invalid value '{value}' for '{field}' on <{element}>")]
    InvalidAttributeValue {
        /// Element carrying the value
        element: &'static str,
        /// Attribute or score name
        field: String,
        /// Raw text that failed to parse
        value: String,
    },

    /// UTF-8 encoding error in element names
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),
}

impl PepXmlError {
    pub(crate) fn invalid_value(
        element: &'static str,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttributeValue {
            element,
            field: field.into(),
            value: value.into(),
        }
    }
}
