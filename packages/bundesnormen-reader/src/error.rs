//! Error types for the reader.
//!
//! Every fatal condition of a single extraction is a `ReaderError` variant.
//! Recoverable anomalies are not errors; they are counted into the record's
//! `errors` field (see [`crate::extractor::Anomaly`]).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the reader library.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Document id contains characters that cannot appear in a file name.
    #[error("Invalid document id: '{0}'. Expected letters, digits, '_' or '-' (e.g., NOR40000001)")]
    InvalidDocumentId(String),

    /// No file exists for the document id.
    #[error("Document {docid} not found at {}", .path.display())]
    NotFound { docid: String, path: PathBuf },

    /// XML parsing failed.
    #[error("Malformed document: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Document bytes are not valid UTF-8.
    #[error("Malformed document: not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// Missing required XML container.
    #[error("Malformed document: missing element <{element}> in {context}")]
    MissingElement { element: String, context: String },

    /// A `ct` attribute with no entry in the content-type table.
    #[error("Unknown content type {} on <{tag}>", .ct.as_deref().map(|c| format!("'{c}'")).unwrap_or_else(|| "(none)".to_string()))]
    UnknownContentType { tag: String, ct: Option<String> },

    /// Element matching none of the classification rules.
    #[error("Unhandled element <{tag}> typ={typ:?} ct={ct:?}: {text}")]
    UnhandledConstruct {
        tag: String,
        typ: Option<String>,
        ct: Option<String>,
        text: String,
    },

    /// A date field holding something other than `dd.mm.yyyy`.
    #[error("Invalid date in field {field}: '{value}'. Expected DD.MM.YYYY")]
    InvalidDate { field: String, value: String },

    /// A field name outside the closed field set, or a value of the wrong kind.
    #[error("Field name violation: {0}")]
    FieldNameViolation(String),

    /// The document carries a different id than the one it was located by.
    #[error("Document id mismatch: parsed '{found}', expected '{expected}'")]
    DocumentIdMismatch { expected: String, found: String },

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ReaderError {
    /// Whether the error means the input document itself is unusable.
    ///
    /// `false` for unknown content types, unhandled constructs and field
    /// violations, which point at gaps in the rule table instead.
    #[must_use]
    pub fn is_malformed_document(&self) -> bool {
        matches!(
            self,
            Self::XmlParse(_) | Self::Encoding(_) | Self::MissingElement { .. }
        )
    }
}

/// Result type alias for reader operations.
pub type Result<T> = std::result::Result<T, ReaderError>;
