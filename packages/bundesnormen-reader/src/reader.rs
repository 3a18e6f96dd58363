//! Reader service that ties loader, extractor, normalizer and validator together.

use crate::config::{validate_docid, ReaderConfig};
use crate::error::Result;
use crate::extractor::extract;
use crate::loader::{load_content_section, parse_content_section};
use crate::normalize::normalize;
use crate::types::DocumentRecord;
use crate::validate::finalize;
use crate::xml::RawElement;

/// Read a document from the file store and turn it into a record.
///
/// # Arguments
/// * `config` - Location of the sharded file store
/// * `docid` - The document identifier (e.g., "NOR40000001")
///
/// # Errors
/// Any fatal [`ReaderError`](crate::ReaderError); no partial record is returned.
pub fn read_document(config: &ReaderConfig, docid: &str) -> Result<DocumentRecord> {
    validate_docid(docid)?;
    let section = load_content_section(config, docid)?;
    extract_record(&section, docid)
}

/// Turn the bytes of a document into a record.
pub fn read_document_bytes(bytes: &[u8], docid: &str) -> Result<DocumentRecord> {
    let section = parse_content_section(bytes)?;
    extract_record(&section, docid)
}

/// Extract, normalize and validate an already loaded content section.
pub fn extract_record(section: &RawElement, docid: &str) -> Result<DocumentRecord> {
    let extraction = extract(section)?;
    let errors = extraction.error_count();
    tracing::debug!(
        docid,
        fields = extraction.builder.written().count(),
        errors,
        "extracted content section"
    );

    let fields = normalize(extraction.builder)?;
    let record = finalize(docid, fields, errors)?;
    tracing::info!(docid, errors, "read document");
    Ok(record)
}
