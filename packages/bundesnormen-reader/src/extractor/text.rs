//! Textual special cases of body-text paragraphs.

use regex::Regex;
use std::sync::LazyLock;

/// Separator between the initial publication and its last amendment.
pub const SOURCE_CHANGE_SEPARATOR: &str = " zuletzt geändert durch ";

/// Label of the entry-date annotation.
const ENTRY_DATE_LABEL: &str = "Erfassungsstichtag:";

/// Prefixes of cross-reference annotations; all are five characters long.
const SEE_ALSO_PREFIXES: [&str; 2] = ["vgl. ", "Vgl. "];

/// Notice about the English translation, which carries no document content.
const TRANSLATION_NOTICE: &str =
    "Zu dieser Rechtsvorschrift ist eine englische Übersetzung in der Applikation";

/// Leading `dd.mm.yyyy` date.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LEADING_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}").expect("valid regex"));

/// Whether the text begins with a `dd.mm.yyyy` date.
///
/// Many documents carry their validity dates as unlabelled paragraphs.
///
/// # Examples
/// ```
/// use bundesnormen_reader::extractor::starts_with_date;
///
/// assert!(starts_with_date("01.01.2000"));
/// assert!(!starts_with_date("1.1.2000"));
/// ```
#[must_use]
pub fn starts_with_date(text: &str) -> bool {
    LEADING_DATE.is_match(text)
}

/// Split a publication citation into initial source and last change.
///
/// # Examples
/// ```
/// use bundesnormen_reader::extractor::split_sources;
///
/// let (initial, change) =
///     split_sources("BGBl. II Nr. 197/2020 zuletzt geändert durch BGBl. II Nr. 287/2020");
/// assert_eq!(initial, "BGBl. II Nr. 197/2020");
/// assert_eq!(change.as_deref(), Some("BGBl. II Nr. 287/2020"));
/// ```
#[must_use]
pub fn split_sources(text: &str) -> (String, Option<String>) {
    let mut parts = text.split(SOURCE_CHANGE_SEPARATOR);
    let initial = parts.next().unwrap_or_default().to_string();
    (initial, parts.next().map(str::to_string))
}

/// Strip a leading `<int>. ` list number.
///
/// Text whose first word is not an integer followed by a period is returned
/// unchanged, as is a bare number without following text.
#[must_use]
pub fn strip_numbered_prefix(text: &str) -> &str {
    let first_word = text.split(' ').next().unwrap_or_default();
    let is_number = first_word
        .strip_suffix('.')
        .map(|n| n.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(n))
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));

    if !is_number {
        return text;
    }
    text.split_once(". ").map_or(text, |(_, rest)| rest)
}

/// Where an annotation paragraph's text belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationRoute<'a> {
    /// Entry date, label stripped.
    EntryDate(&'a str),
    /// Cross-reference, prefix stripped.
    SeeAlso(&'a str),
    /// Translation notice, dropped.
    Notice,
    /// Plain note, list number stripped.
    Note(&'a str),
}

/// Route an annotation paragraph after stripping its list number.
///
/// # Examples
/// ```
/// use bundesnormen_reader::extractor::{route_annotation, AnnotationRoute};
///
/// assert_eq!(route_annotation("3. vgl. X"), AnnotationRoute::SeeAlso("X"));
/// ```
#[must_use]
pub fn route_annotation(text: &str) -> AnnotationRoute<'_> {
    let text = strip_numbered_prefix(text);

    if text.starts_with(ENTRY_DATE_LABEL) {
        let date = text.split_once(':').map_or("", |(_, rest)| rest);
        return AnnotationRoute::EntryDate(date);
    }
    if let Some(rest) = SEE_ALSO_PREFIXES
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
    {
        return AnnotationRoute::SeeAlso(rest);
    }
    if text.starts_with(TRANSLATION_NOTICE) {
        return AnnotationRoute::Notice;
    }
    AnnotationRoute::Note(text)
}

/// Indent every line of a preformatted block by two spaces.
#[must_use]
pub fn indent_preformatted(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Underline a heading with `marker`, one per character.
#[must_use]
pub fn underline(heading: &str, marker: char) -> String {
    let rule: String = std::iter::repeat(marker)
        .take(heading.chars().count())
        .collect();
    format!("{heading}\n{rule}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_date() {
        assert!(starts_with_date("31.12.2099"));
        assert!(starts_with_date("01.01.2000 bis auf weiteres"));
        assert!(!starts_with_date("Am 01.01.2000"));
        assert!(!starts_with_date("2000-01-01"));
    }

    #[test]
    fn test_split_sources_without_change() {
        let (initial, change) = split_sources("BGBl. Nr. 1/1930");
        assert_eq!(initial, "BGBl. Nr. 1/1930");
        assert_eq!(change, None);
    }

    #[test]
    fn test_split_sources_takes_first_change_only() {
        let (initial, change) =
            split_sources("A zuletzt geändert durch B zuletzt geändert durch C");
        assert_eq!(initial, "A");
        assert_eq!(change.as_deref(), Some("B"));
    }

    #[test]
    fn test_strip_numbered_prefix() {
        assert_eq!(strip_numbered_prefix("3. vgl. X"), "vgl. X");
        assert_eq!(strip_numbered_prefix("12. Text. Mehr"), "Text. Mehr");
        assert_eq!(strip_numbered_prefix("Text ohne Nummer"), "Text ohne Nummer");
        assert_eq!(strip_numbered_prefix("a. kein Zahl"), "a. kein Zahl");
        assert_eq!(strip_numbered_prefix(". leer"), ". leer");
        assert_eq!(strip_numbered_prefix("3."), "3.");
        assert_eq!(strip_numbered_prefix(""), "");
    }

    #[test]
    fn test_strip_numbered_prefix_is_idempotent_on_result() {
        let once = strip_numbered_prefix("3. vgl. X");
        assert_eq!(strip_numbered_prefix(once), once);
    }

    #[test]
    fn test_route_entry_date() {
        assert_eq!(
            route_annotation("Erfassungsstichtag: 01.05.2021"),
            AnnotationRoute::EntryDate(" 01.05.2021")
        );
        assert_eq!(
            route_annotation("2. Erfassungsstichtag: 01.05.2021"),
            AnnotationRoute::EntryDate(" 01.05.2021")
        );
    }

    #[test]
    fn test_route_see_also() {
        assert_eq!(
            route_annotation("Vgl. BGBl. Nr. 5/1990"),
            AnnotationRoute::SeeAlso("BGBl. Nr. 5/1990")
        );
    }

    #[test]
    fn test_route_notice() {
        let text = format!("{TRANSLATION_NOTICE} RIS abrufbar.");
        assert_eq!(route_annotation(&text), AnnotationRoute::Notice);
    }

    #[test]
    fn test_route_note() {
        assert_eq!(
            route_annotation("1. Siehe auch Anlage"),
            AnnotationRoute::Note("Siehe auch Anlage")
        );
    }

    #[test]
    fn test_indent_preformatted() {
        assert_eq!(indent_preformatted("a"), "  a");
        assert_eq!(indent_preformatted("a\nb"), "  a\n  b");
    }

    #[test]
    fn test_underline_counts_characters() {
        assert_eq!(underline("§ 1", '='), "§ 1\n===");
        assert_eq!(underline("Übergang", '-'), "Übergang\n--------");
    }
}
