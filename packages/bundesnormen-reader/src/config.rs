//! Configuration constants, storage layout and validation functions.

use std::path::{Path, PathBuf};

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ReaderError, Result};

/// XML namespace of RIS Bundesnormen documents.
pub const RIS_NAMESPACE: &str = "http://www.bka.gv.at";

/// Base directory of the document store when none is configured.
pub const DEFAULT_BASE_DIR: &str = "bundesnormen";

/// Number of shard directories (`h/0` to `h/9`).
///
/// Fixed by the producer of the document store; changing it orphans every
/// existing file.
pub const SHARD_COUNT: u32 = 10;

/// File extension appended to a document id.
pub const DOCUMENT_SUFFIX: &str = ".xml";

/// Prefix of document entries in an index file.
pub const INDEX_ENTRY_PREFIX: &str = "NOR";

/// Default number of failed documents after which a batch stops.
pub const DEFAULT_MAX_FAILURES: usize = 100;

/// Environment variable overriding the base directory.
pub const BASE_DIR_ENV: &str = "BUNDESNORMEN_DIR";

/// Environment variable overriding the batch failure threshold.
pub const MAX_FAILURES_ENV: &str = "BUNDESNORMEN_MAX_FAILURES";

/// Document id pattern: a non-empty run of letters, digits, `_` and `-`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOCID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));

/// Validate document id format.
///
/// # Examples
/// ```
/// use bundesnormen_reader::config::validate_docid;
///
/// assert!(validate_docid("NOR40000001").is_ok());
/// assert!(validate_docid("../NOR40000001").is_err());
/// ```
pub fn validate_docid(docid: &str) -> Result<()> {
    if DOCID_PATTERN.is_match(docid) {
        Ok(())
    } else {
        Err(ReaderError::InvalidDocumentId(docid.to_string()))
    }
}

/// Compute the shard a document is stored under.
///
/// The shard is the sum of the Unicode code points of `"{docid}.xml"`
/// modulo [`SHARD_COUNT`].
///
/// # Examples
/// ```
/// use bundesnormen_reader::config::shard_for;
///
/// assert_eq!(shard_for("NOR40000001"), 1);
/// ```
#[must_use]
pub fn shard_for(docid: &str) -> u32 {
    let checksum: u64 = docid
        .chars()
        .chain(DOCUMENT_SUFFIX.chars())
        .map(|c| u64::from(u32::from(c)))
        .sum();
    u32::try_from(checksum % u64::from(SHARD_COUNT)).unwrap_or_default()
}

/// Build the storage path of a document: `<base>/h/<shard>/<docid>.xml`.
///
/// # Panics
/// Debug builds panic if docid doesn't match the expected format.
#[must_use]
pub fn document_path(base_dir: &Path, docid: &str) -> PathBuf {
    debug_assert!(
        DOCID_PATTERN.is_match(docid),
        "docid should be validated before calling document_path"
    );
    base_dir
        .join("h")
        .join(shard_for(docid).to_string())
        .join(format!("{docid}{DOCUMENT_SUFFIX}"))
}

/// Runtime configuration for reading documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Root of the sharded document store.
    pub base_dir: PathBuf,
    /// Failed documents tolerated before a batch stops.
    pub max_failures: usize,
}

impl ReaderConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            max_failures: DEFAULT_MAX_FAILURES,
        }
    }

    /// Read configuration from `BUNDESNORMEN_DIR` and `BUNDESNORMEN_MAX_FAILURES`.
    ///
    /// Unset variables fall back to the defaults; a threshold that is not a
    /// positive integer is rejected.
    pub fn from_env() -> Result<Self> {
        let base_dir = std::env::var(BASE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_BASE_DIR));

        let max_failures = match std::env::var(MAX_FAILURES_ENV) {
            Ok(value) => parse_max_failures(&value)?,
            Err(_) => DEFAULT_MAX_FAILURES,
        };

        Ok(Self {
            base_dir,
            max_failures,
        })
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_max_failures(mut self, max_failures: usize) -> Self {
        self.max_failures = max_failures;
        self
    }

    /// Storage path of a document under this configuration.
    pub fn document_path(&self, docid: &str) -> Result<PathBuf> {
        validate_docid(docid)?;
        Ok(document_path(&self.base_dir, docid))
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DIR)
    }
}

fn parse_max_failures(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ReaderError::Config(format!(
            "{MAX_FAILURES_ENV} must be a positive integer, got '{value}'"
        ))),
    }
}
