//! Bundesnormen Reader - Read Austrian federal law records from RIS XML.
//!
//! This crate reads documents of the RIS Bundesnormen collection from a
//! sharded file store and converts each into a flat, typed record of
//! metadata and text fields.
//!
//! # Example
//!
//! ```
//! use bundesnormen_reader::{read_document_bytes, FieldName};
//!
//! let xml = r#"<risdok xmlns="http://www.bka.gv.at"><nutzdaten><abschnitt>
//!     <absatz typ="erltext" ct="kurztitel">Testgesetz</absatz>
//! </abschnitt></nutzdaten></risdok>"#;
//!
//! let record = read_document_bytes(xml.as_bytes(), "NOR40000001").unwrap();
//! assert_eq!(record.get(FieldName::Title).to_string(), "Testgesetz");
//! ```
//!
//! # Architecture
//!
//! The reader is organized into several modules:
//!
//! - [`config`]: Configuration constants, document-id validation and shard paths
//! - [`types`]: Field names and the document record
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML utilities and the owned element tree
//! - [`loader`]: Document loading from the file store
//! - [`extractor`]: Classification and accumulation of content elements
//! - [`normalize`]: Trimming, date parsing and list splitting
//! - [`validate`]: Field checks and record assembly
//! - [`reader`]: Main reader service
//! - [`batch`]: Index-driven batch import
//! - [`cli`]: Command-line interface

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod normalize;
pub mod reader;
pub mod types;
pub mod validate;
pub mod xml;

// Re-export main functions
pub use reader::{extract_record, read_document, read_document_bytes};

// Re-export commonly used items
pub use config::{validate_docid, ReaderConfig};
pub use error::{ReaderError, Result};
pub use types::{DocumentRecord, FieldKind, FieldName, FieldRef};
