//! Batch import of every document listed in an index file.
//!
//! Successful records are written as JSON lines. A failing document is
//! logged and skipped; the batch stops once the configured failure
//! threshold is reached.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::{ReaderConfig, DOCUMENT_SUFFIX, INDEX_ENTRY_PREFIX};
use crate::error::Result;
use crate::reader::read_document;

/// Outcome of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records written to the sink.
    pub done: usize,
    /// Documents that could not be read.
    pub failed: usize,
    /// Recoverable anomalies summed over all written records.
    pub anomalies: u64,
    /// Whether the failure threshold ended the run.
    pub stopped_early: bool,
}

/// Parse document ids out of index file contents.
///
/// Only lines starting with `NOR` are entries; each is cut at its first
/// `.xml`.
///
/// # Examples
/// ```
/// use bundesnormen_reader::batch::parse_index;
///
/// let ids = parse_index("# header\nNOR40000001.xml 2021\n  \nNOR40000002\n");
/// assert_eq!(ids, vec!["NOR40000001", "NOR40000002"]);
/// ```
#[must_use]
pub fn parse_index(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter(|line| line.starts_with(INDEX_ENTRY_PREFIX))
        .map(|line| {
            let line = line.trim();
            let id = line.split(DOCUMENT_SUFFIX).next().unwrap_or(line);
            id.trim().to_string()
        })
        .collect()
}

/// Read the document ids listed in an index file.
pub fn read_index(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    let ids = parse_index(&contents);
    tracing::info!(path = %path.display(), count = ids.len(), "read index");
    Ok(ids)
}

/// Read every listed document and write its record to `sink`.
///
/// `on_progress` is called once per attempted document.
///
/// # Errors
/// Only sink failures abort the batch; per-document errors are counted.
pub fn run_batch<W, F>(
    config: &ReaderConfig,
    ids: &[String],
    sink: &mut W,
    mut on_progress: F,
) -> Result<BatchSummary>
where
    W: Write,
    F: FnMut(&str, &BatchSummary),
{
    let mut summary = BatchSummary::default();

    for docid in ids {
        match read_document(config, docid) {
            Ok(record) => {
                serde_json::to_writer(&mut *sink, &record)?;
                sink.write_all(b"\n")?;
                summary.done += 1;
                summary.anomalies += u64::from(record.errors);
            }
            Err(e) => {
                tracing::error!(docid = %docid, error = %e, "failed to read document");
                summary.failed += 1;
            }
        }
        on_progress(docid, &summary);

        if summary.failed >= config.max_failures {
            tracing::error!(
                failed = summary.failed,
                max_failures = config.max_failures,
                "too many failures, stopping batch"
            );
            summary.stopped_early = true;
            break;
        }
    }

    sink.flush()?;
    tracing::info!(
        done = summary.done,
        failed = summary.failed,
        anomalies = summary.anomalies,
        "batch finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentRecord;

    const DOCUMENT: &str = r#"<risdok xmlns="http://www.bka.gv.at"><nutzdaten><abschnitt>
        <absatz typ="erltext" ct="kurztitel">Testgesetz</absatz>
        <liste/>
    </abschnitt></nutzdaten></risdok>"#;

    fn store(ids: &[&str]) -> (tempfile::TempDir, ReaderConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = ReaderConfig::new(dir.path());
        for id in ids {
            let path = config.document_path(id).unwrap();
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, DOCUMENT).unwrap();
        }
        (dir, config)
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_parse_index_skips_other_lines() {
        let ids = parse_index("NOR1.xml\n  NOR2.xml\nJWT3.xml\nNOR3 \n");
        // Indented entries do not start with the prefix.
        assert_eq!(ids, vec!["NOR1", "NOR3"]);
    }

    #[test]
    fn test_read_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.txt");
        fs::write(&path, "NOR40000001.xml\nNOR40000002.xml\n").unwrap();
        assert_eq!(read_index(&path).unwrap(), ids(&["NOR40000001", "NOR40000002"]));
    }

    #[test]
    fn test_run_batch_writes_json_lines() {
        let (_dir, config) = store(&["NOR40000001", "NOR40000002"]);
        let mut out = Vec::new();
        let mut seen = Vec::new();

        let summary = run_batch(
            &config,
            &ids(&["NOR40000001", "NOR40000002"]),
            &mut out,
            |id, _| seen.push(id.to_string()),
        )
        .unwrap();

        assert_eq!(summary.done, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.anomalies, 2);
        assert!(!summary.stopped_early);
        assert_eq!(seen, ids(&["NOR40000001", "NOR40000002"]));

        let text = String::from_utf8(out).unwrap();
        let records: Vec<DocumentRecord> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records[0].docid, "NOR40000001");
        assert_eq!(records[1].title.as_deref(), Some("Testgesetz"));
    }

    #[test]
    fn test_run_batch_skips_failures() {
        let (_dir, config) = store(&["NOR40000002"]);
        let mut out = Vec::new();

        let summary = run_batch(
            &config,
            &ids(&["NOR40000001", "NOR40000002"]),
            &mut out,
            |_, _| {},
        )
        .unwrap();

        assert_eq!(summary.done, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_run_batch_stops_at_threshold() {
        let (_dir, config) = store(&["NOR40000003"]);
        let config = config.with_max_failures(2);
        let mut out = Vec::new();

        let summary = run_batch(
            &config,
            &ids(&["NOR40000001", "NOR40000002", "NOR40000003"]),
            &mut out,
            |_, _| {},
        )
        .unwrap();

        assert_eq!(summary.failed, 2);
        assert_eq!(summary.done, 0);
        assert!(summary.stopped_early);
        assert!(out.is_empty());
    }
}
