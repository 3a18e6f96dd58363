//! Single-pass extraction of a content section into a record builder.
//!
//! The extractor visits the element children of `<abschnitt>` once, in
//! document order, and accumulates their text into the fields chosen by
//! [`classify`]. Known but unsupported constructs are counted as
//! [`Anomaly`]s; anything the rules cannot place aborts the extraction.

mod builder;
mod content_type;
mod rules;
mod text;

use std::fmt;

pub use builder::{FieldBuffer, RecordBuilder};
pub use content_type::{content_type_field, ANMERKUNG, KUNDMACHUNGSORGAN};
pub use rules::{classify, ElementKind};
pub use text::{
    indent_preformatted, route_annotation, split_sources, starts_with_date,
    strip_numbered_prefix, underline, AnnotationRoute, SOURCE_CHANGE_SEPARATOR,
};

use crate::error::{ReaderError, Result};
use crate::types::FieldName;
use crate::xml::RawElement;

/// Leading paragraph symbol (e.g. `§ 1.`) of a main-text paragraph.
const PART_SYMBOL_ELEMENT: &str = "gldsym";

/// A recoverable problem met during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// Body-text paragraph without content type that no rule captured.
    UnmappedParagraph { text: String },
    /// Paragraph of a known type that is not extracted.
    UnimplementedParagraph { typ: String },
    /// Element of a known tag that is not extracted.
    UnimplementedElement { tag: String },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmappedParagraph { text } => {
                write!(f, "paragraph without content type: {text}")
            }
            Self::UnimplementedParagraph { typ } => {
                write!(f, "unimplemented absatz of typ \"{typ}\"")
            }
            Self::UnimplementedElement { tag } => write!(f, "unimplemented tag \"{tag}\""),
        }
    }
}

/// Output of one extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Accumulated, not yet normalized fields.
    pub builder: RecordBuilder,
    /// Recoverable anomalies in document order.
    pub anomalies: Vec<Anomaly>,
}

impl Extraction {
    /// Number of anomalies, as stored in the record's `errors` field.
    #[must_use]
    pub fn error_count(&self) -> u32 {
        u32::try_from(self.anomalies.len()).unwrap_or(u32::MAX)
    }
}

/// Extract the children of a content section.
///
/// # Errors
/// `UnknownContentType` for a content type the rules require but the
/// content-type table lacks, `UnhandledConstruct` for an element no rule
/// matches. No partial result is returned.
pub fn extract(section: &RawElement) -> Result<Extraction> {
    let mut extractor = Extractor::new();
    for element in &section.children {
        extractor.process(element)?;
    }
    Ok(extractor.finish())
}

/// State of one pass over a content section.
struct Extractor {
    builder: RecordBuilder,
    first_main_text_paragraph: bool,
    anomalies: Vec<Anomaly>,
}

impl Extractor {
    fn new() -> Self {
        Self {
            builder: RecordBuilder::new(),
            first_main_text_paragraph: true,
            anomalies: Vec::new(),
        }
    }

    fn finish(self) -> Extraction {
        Extraction {
            builder: self.builder,
            anomalies: self.anomalies,
        }
    }

    fn process(&mut self, element: &RawElement) -> Result<()> {
        match classify(element) {
            ElementKind::Filler | ElementKind::TitleHeading => {}
            ElementKind::SectionHeading => {
                if !self.builder.contains(FieldName::Section) {
                    self.builder
                        .append(FieldName::Section, &element.joined_text(), "");
                }
            }
            ElementKind::BodyText { ct } => self.body_text(element, ct)?,
            ElementKind::ParagraphHeading => {
                let heading = underline(&element.joined_text(), '=');
                self.builder.append(FieldName::MainText, &heading, "\n\n");
            }
            ElementKind::ArticleHeading { ct } => {
                let field = required_field(element, ct)?;
                let heading = underline(&element.joined_text(), '-');
                self.builder.append(field, &heading, "\n\n");
            }
            ElementKind::Table => {
                self.builder
                    .append(FieldName::MainText, &element.joined_text(), "\n\n");
            }
            ElementKind::SecondaryHeading { ct } => {
                let field = required_field(element, ct)?;
                self.builder.append(field, &element.joined_text(), "\n\n");
            }
            ElementKind::Introduction => {
                self.builder
                    .append(FieldName::IntroductionText, &element.joined_text(), "\n\n");
            }
            ElementKind::Preformatted { ct } => {
                let field = required_field(element, ct)?;
                let block = indent_preformatted(&element.joined_text());
                self.builder.append(field, &block, "\n");
            }
            ElementKind::Spacer { ct } => {
                // Without a mapped field a spacer is dropped and not counted as an anomaly.
                if let Some(field) = ct.and_then(content_type_field) {
                    self.builder.append_separator(field, "\n");
                }
            }
            ElementKind::BodyParagraph { ct } => self.body_paragraph(element, ct)?,
            ElementKind::UnsupportedParagraph { typ } => {
                self.record(Anomaly::UnimplementedParagraph {
                    typ: typ.to_string(),
                });
            }
            ElementKind::UnsupportedElement => {
                self.record(Anomaly::UnimplementedElement {
                    tag: element.name.clone(),
                });
            }
            ElementKind::Unhandled => {
                let text = element.joined_text();
                tracing::error!(
                    tag = %element.name,
                    ct = ?element.ct(),
                    typ = ?element.typ(),
                    text = %text,
                    "unhandled tag"
                );
                return Err(ReaderError::UnhandledConstruct {
                    tag: element.name.clone(),
                    typ: element.typ.clone(),
                    ct: element.ct.clone(),
                    text,
                });
            }
        }
        Ok(())
    }

    /// Metadata and annotation paragraphs (`absatz typ=erltext|novao2`).
    fn body_text(&mut self, element: &RawElement, ct: Option<&str>) -> Result<()> {
        let joined = element.joined_text();
        let mut text = joined.as_str();
        let mut field = None;

        match ct {
            None if starts_with_date(text) => {
                // Lots of documents carry their validity dates unlabelled.
                for candidate in [FieldName::ValidFrom, FieldName::ValidTo] {
                    if !self.builder.has_content(candidate) {
                        self.builder.append(candidate, text, "");
                        return Ok(());
                    }
                }
            }
            Some(KUNDMACHUNGSORGAN) => {
                let (initial, change) = split_sources(text);
                self.builder
                    .replace(FieldName::SourceInitial, Some(initial));
                self.builder.replace(FieldName::SourceChange, change);
                return Ok(());
            }
            Some(ANMERKUNG) => match route_annotation(text) {
                AnnotationRoute::EntryDate(date) => {
                    field = Some(FieldName::EntryDate);
                    text = date;
                }
                AnnotationRoute::SeeAlso(reference) => {
                    field = Some(FieldName::SeeAlso);
                    text = reference;
                }
                AnnotationRoute::Notice => return Ok(()),
                AnnotationRoute::Note(note) => text = note,
            },
            _ => {}
        }

        let Some(field) = field.or_else(|| ct.and_then(content_type_field)) else {
            tracing::error!(ct = ?ct, text, "cannot find field for content type");
            return match ct {
                None => {
                    self.record(Anomaly::UnmappedParagraph {
                        text: text.to_string(),
                    });
                    Ok(())
                }
                Some(ct) => Err(ReaderError::UnknownContentType {
                    tag: element.name.clone(),
                    ct: Some(ct.to_string()),
                }),
            };
        };

        self.builder.append(field, text, "\n");
        Ok(())
    }

    /// Generic body paragraphs (`absatz typ=abs`).
    fn body_paragraph(&mut self, element: &RawElement, ct: Option<&str>) -> Result<()> {
        let field = required_field(element, ct)?;

        let mut text = None;
        if field == FieldName::MainText && self.first_main_text_paragraph {
            self.first_main_text_paragraph = false;
            let part = self.builder.content(FieldName::Part);
            if let Some(paragraph) = strip_part_symbol(element, part) {
                text = Some(paragraph.joined_text());
            }
        }

        let text = text.unwrap_or_else(|| element.joined_text());
        self.builder.append(field, &text, "\n\n");
        Ok(())
    }

    fn record(&mut self, anomaly: Anomaly) {
        tracing::error!(%anomaly, "recoverable anomaly in document");
        self.anomalies.push(anomaly);
    }
}

/// Resolve a content type the current rule cannot do without.
fn required_field(element: &RawElement, ct: Option<&str>) -> Result<FieldName> {
    ct.and_then(content_type_field).ok_or_else(|| {
        tracing::error!(tag = %element.name, ct = ?ct, "cannot find field for content type");
        ReaderError::UnknownContentType {
            tag: element.name.clone(),
            ct: ct.map(str::to_string),
        }
    })
}

/// Copy of a paragraph without its leading symbol, if the symbol repeats `part`.
///
/// The symbol text (non-breaking spaces read as spaces) must equal the
/// trimmed `part` value, optionally followed by a period. The trimmed text
/// after the symbol is moved in front of the paragraph's own leading text.
fn strip_part_symbol(paragraph: &RawElement, part: Option<&str>) -> Option<RawElement> {
    let part = part?.trim();
    let index = paragraph.position_of(PART_SYMBOL_ELEMENT)?;

    let symbol = paragraph.children[index]
        .text
        .as_deref()
        .unwrap_or_default()
        .replace('\u{a0}', " ");
    if symbol != part && symbol.strip_suffix('.') != Some(part) {
        return None;
    }

    let mut paragraph = paragraph.clone();
    let removed = paragraph.remove_child(index);
    if let Some(tail) = removed.tail.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        paragraph.text = Some(match paragraph.text.take() {
            Some(text) => format!("{tail}{text}"),
            None => tail.to_string(),
        });
    }
    Some(paragraph)
}
