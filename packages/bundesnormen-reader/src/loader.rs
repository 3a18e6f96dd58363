//! Document loading from the sharded file store.
//!
//! A RIS document is `<risdok>` with a `<nutzdaten>` payload container whose
//! `<abschnitt>` child holds the content elements the extractor walks.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use roxmltree::{Document, ParsingOptions};

use crate::config::ReaderConfig;
use crate::error::{ReaderError, Result};
use crate::xml::{find_ris_child, get_tag_name, RawElement};

/// Payload container under the document root.
const PAYLOAD_ELEMENT: &str = "nutzdaten";

/// Content section under the payload container.
const SECTION_ELEMENT: &str = "abschnitt";

/// Resolve the storage path of a document.
pub fn locate(config: &ReaderConfig, docid: &str) -> Result<PathBuf> {
    config.document_path(docid)
}

/// Read the raw bytes of a document.
///
/// # Errors
/// `NotFound` if no file exists at the document's shard path.
pub fn read_bytes(config: &ReaderConfig, docid: &str) -> Result<Vec<u8>> {
    let path = locate(config, docid)?;
    tracing::debug!(docid, path = %path.display(), "reading document");

    fs::read(&path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ReaderError::NotFound {
                docid: docid.to_string(),
                path,
            }
        } else {
            ReaderError::Io(e)
        }
    })
}

/// Parse document bytes and copy out the content section.
///
/// # Errors
/// `Encoding` or `XmlParse` for bytes that are not well-formed UTF-8 XML,
/// `MissingElement` if the payload container or content section is absent.
pub fn parse_content_section(bytes: &[u8]) -> Result<RawElement> {
    let xml = std::str::from_utf8(bytes)?;
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;
    let root = doc.root_element();

    let payload = find_ris_child(root, PAYLOAD_ELEMENT).ok_or_else(|| {
        ReaderError::MissingElement {
            element: PAYLOAD_ELEMENT.to_string(),
            context: format!("<{}>", get_tag_name(root)),
        }
    })?;
    let section = find_ris_child(payload, SECTION_ELEMENT).ok_or_else(|| {
        ReaderError::MissingElement {
            element: SECTION_ELEMENT.to_string(),
            context: format!("<{PAYLOAD_ELEMENT}>"),
        }
    })?;

    Ok(RawElement::from_node(section))
}

/// Locate, read and parse a document's content section.
pub fn load_content_section(config: &ReaderConfig, docid: &str) -> Result<RawElement> {
    let bytes = read_bytes(config, docid)?;
    parse_content_section(&bytes)
}
