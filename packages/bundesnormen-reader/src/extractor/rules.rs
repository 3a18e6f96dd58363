//! Classification of content-section elements.
//!
//! Each direct child of `<abschnitt>` is classified once by its tag, `typ`
//! and `ct` into an [`ElementKind`]. The arms of [`classify`] are ordered:
//! the first matching arm wins.

use crate::xml::RawElement;

/// Paragraph `typ` values carrying metadata or plain body text.
const BODY_TEXT_TYPES: [&str; 2] = ["erltext", "novao2"];

/// Heading `typ` values rendered without an underline.
const SECONDARY_HEADING_TYPES: [&str; 5] = ["g1min", "g2", "g1", "erlz", "erll"];

/// What the extractor does with an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind<'a> {
    /// Structural filler (`fzinhalt`), no text.
    Filler,
    /// Section heading (`kzinhalt`).
    SectionHeading,
    /// Metadata or body paragraph (`absatz typ=erltext|novao2`).
    BodyText { ct: Option<&'a str> },
    /// Document title heading, redundant with the title field.
    TitleHeading,
    /// Paragraph heading or table-of-contents heading, `=`-underlined.
    ParagraphHeading,
    /// Article or annex heading, `-`-underlined.
    ArticleHeading { ct: Option<&'a str> },
    /// Table, flattened to text.
    Table,
    /// Lower-level heading without underline.
    SecondaryHeading { ct: Option<&'a str> },
    /// Introductory clause (`absatz typ=promkleinlsatz`).
    Introduction,
    /// Preformatted paragraph (`absatz typ=pre`).
    Preformatted { ct: Option<&'a str> },
    /// Vertical spacer (`abstand`).
    Spacer { ct: Option<&'a str> },
    /// Generic body paragraph (`absatz typ=abs`).
    BodyParagraph { ct: Option<&'a str> },
    /// Known paragraph type that is not extracted.
    UnsupportedParagraph { typ: &'a str },
    /// Known element that is not extracted (lists, objects, tables of contents).
    UnsupportedElement,
    /// Matches no rule.
    Unhandled,
}

/// Classify an element of the content section.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use bundesnormen_reader::extractor::{classify, ElementKind};
/// use bundesnormen_reader::xml::RawElement;
///
/// let xml = r#"<absatz xmlns="http://www.bka.gv.at" typ="abs" ct="text">Text</absatz>"#;
/// let doc = Document::parse(xml).unwrap();
/// let element = RawElement::from_node(doc.root_element());
/// assert_eq!(classify(&element), ElementKind::BodyParagraph { ct: Some("text") });
/// ```
#[must_use]
pub fn classify(element: &RawElement) -> ElementKind<'_> {
    if element.namespace.as_deref() != Some(crate::config::RIS_NAMESPACE) {
        return ElementKind::Unhandled;
    }

    let ct = element.ct();
    match (element.name.as_str(), element.typ()) {
        ("fzinhalt", _) => ElementKind::Filler,
        ("kzinhalt", _) => ElementKind::SectionHeading,
        ("absatz", Some(typ)) if BODY_TEXT_TYPES.contains(&typ) => ElementKind::BodyText { ct },
        ("ueberschrift", Some("titel")) => ElementKind::TitleHeading,
        ("ueberschrift", Some("para")) | ("inhaltsvz", Some("ueberschrift")) => {
            ElementKind::ParagraphHeading
        }
        ("ueberschrift", Some("art" | "anlage")) => ElementKind::ArticleHeading { ct },
        ("table", _) => ElementKind::Table,
        ("ueberschrift", Some(typ)) if SECONDARY_HEADING_TYPES.contains(&typ) => {
            ElementKind::SecondaryHeading { ct }
        }
        ("absatz", Some("promkleinlsatz")) => ElementKind::Introduction,
        ("absatz", Some("pre")) => ElementKind::Preformatted { ct },
        ("abstand", _) => ElementKind::Spacer { ct },
        ("absatz", Some("abs")) => ElementKind::BodyParagraph { ct },
        ("absatz", Some(typ @ "abbobj")) => ElementKind::UnsupportedParagraph { typ },
        ("liste" | "abbobj" | "inhaltsvz", _) => ElementKind::UnsupportedElement,
        _ => ElementKind::Unhandled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn element(tag: &str, typ: Option<&str>, ct: Option<&str>) -> RawElement {
        let mut attrs = String::new();
        if let Some(typ) = typ {
            attrs.push_str(&format!(r#" typ="{typ}""#));
        }
        if let Some(ct) = ct {
            attrs.push_str(&format!(r#" ct="{ct}""#));
        }
        let xml = format!(r#"<{tag} xmlns="http://www.bka.gv.at"{attrs}/>"#);
        let doc = Document::parse(&xml).unwrap();
        RawElement::from_node(doc.root_element())
    }

    #[test]
    fn test_filler_and_section() {
        assert_eq!(classify(&element("fzinhalt", None, None)), ElementKind::Filler);
        assert_eq!(
            classify(&element("kzinhalt", Some("x"), None)),
            ElementKind::SectionHeading
        );
    }

    #[test]
    fn test_body_text() {
        assert_eq!(
            classify(&element("absatz", Some("erltext"), Some("kurztitel"))),
            ElementKind::BodyText { ct: Some("kurztitel") }
        );
        assert_eq!(
            classify(&element("absatz", Some("novao2"), None)),
            ElementKind::BodyText { ct: None }
        );
    }

    #[test]
    fn test_headings() {
        assert_eq!(
            classify(&element("ueberschrift", Some("titel"), Some("text"))),
            ElementKind::TitleHeading
        );
        assert_eq!(
            classify(&element("ueberschrift", Some("para"), Some("text"))),
            ElementKind::ParagraphHeading
        );
        assert_eq!(
            classify(&element("inhaltsvz", Some("ueberschrift"), None)),
            ElementKind::ParagraphHeading
        );
        assert_eq!(
            classify(&element("ueberschrift", Some("anlage"), Some("text"))),
            ElementKind::ArticleHeading { ct: Some("text") }
        );
        assert_eq!(
            classify(&element("ueberschrift", Some("g1min"), Some("text"))),
            ElementKind::SecondaryHeading { ct: Some("text") }
        );
    }

    #[test]
    fn test_paragraph_types() {
        assert_eq!(
            classify(&element("absatz", Some("promkleinlsatz"), None)),
            ElementKind::Introduction
        );
        assert_eq!(
            classify(&element("absatz", Some("pre"), Some("text"))),
            ElementKind::Preformatted { ct: Some("text") }
        );
        assert_eq!(
            classify(&element("absatz", Some("abs"), None)),
            ElementKind::BodyParagraph { ct: None }
        );
        assert_eq!(
            classify(&element("absatz", Some("abbobj"), None)),
            ElementKind::UnsupportedParagraph { typ: "abbobj" }
        );
    }

    #[test]
    fn test_table_of_contents_without_heading_type_is_unsupported() {
        assert_eq!(
            classify(&element("inhaltsvz", Some("eintrag"), None)),
            ElementKind::UnsupportedElement
        );
        assert_eq!(
            classify(&element("liste", None, None)),
            ElementKind::UnsupportedElement
        );
    }

    #[test]
    fn test_unhandled() {
        assert_eq!(
            classify(&element("absatz", Some("satz"), None)),
            ElementKind::Unhandled
        );
        assert_eq!(
            classify(&element("ueberschrift", None, None)),
            ElementKind::Unhandled
        );
        assert_eq!(classify(&element("bild", None, None)), ElementKind::Unhandled);
    }

    #[test]
    fn test_foreign_namespace_is_unhandled() {
        let doc = Document::parse("<fzinhalt/>").unwrap();
        let el = RawElement::from_node(doc.root_element());
        assert_eq!(classify(&el), ElementKind::Unhandled);
    }
}
