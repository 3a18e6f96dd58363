//! Core data types for the reader.
//!
//! [`FieldName`] is the closed set of record fields. [`DocumentRecord`] is
//! the finished, typed record with one member per field.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ReaderError;

/// Kind of value a record field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Nullable string.
    Text,
    /// Nullable list of strings, split from delimited source text.
    List,
    /// Nullable calendar date.
    Date,
    /// Integer anomaly counter, set by the validator.
    Counter,
}

/// Every field a document record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    // Meta fields
    DocId,
    DocIdOld,
    LawId,
    Type,
    Part,
    Catalogue,
    Keywords,
    Section,
    SourceInitial,
    SourceChange,
    ChangedBy,
    Title,
    TitleShort,
    TitleLong,
    SeeAlso,
    Parties,
    Languages,
    Errors,
    // Text fields
    CautionaryInfoText,
    IntroductionText,
    OtherText,
    PreambleText,
    MainText,
    RatificationText,
    NoteText,
    // Date fields
    ValidFrom,
    ValidTo,
    ChangeDate,
    SigningDate,
    EntryDate,
}

impl FieldName {
    /// Meta fields, in display order.
    pub const META: [Self; 18] = [
        Self::DocId,
        Self::DocIdOld,
        Self::LawId,
        Self::Type,
        Self::Part,
        Self::Catalogue,
        Self::Keywords,
        Self::Section,
        Self::SourceInitial,
        Self::SourceChange,
        Self::ChangedBy,
        Self::Title,
        Self::TitleShort,
        Self::TitleLong,
        Self::SeeAlso,
        Self::Parties,
        Self::Languages,
        Self::Errors,
    ];

    /// Long free-text fields, in display order.
    pub const TEXT: [Self; 7] = [
        Self::CautionaryInfoText,
        Self::IntroductionText,
        Self::OtherText,
        Self::PreambleText,
        Self::MainText,
        Self::RatificationText,
        Self::NoteText,
    ];

    /// Date fields, in display order.
    pub const DATES: [Self; 5] = [
        Self::ValidFrom,
        Self::ValidTo,
        Self::ChangeDate,
        Self::SigningDate,
        Self::EntryDate,
    ];

    /// All fields: meta, text, then dates.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::META
            .into_iter()
            .chain(Self::TEXT)
            .chain(Self::DATES)
    }

    /// Wire name used in serialized records and column names.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocId => "docid",
            Self::DocIdOld => "docid_old",
            Self::LawId => "lawid",
            Self::Type => "type",
            Self::Part => "part",
            Self::Catalogue => "catalogue",
            Self::Keywords => "keywords",
            Self::Section => "section",
            Self::SourceInitial => "source_initial",
            Self::SourceChange => "source_change",
            Self::ChangedBy => "changed_by",
            Self::Title => "title",
            Self::TitleShort => "title_short",
            Self::TitleLong => "title_long",
            Self::SeeAlso => "see_also",
            Self::Parties => "parties",
            Self::Languages => "languages",
            Self::Errors => "errors",
            Self::CautionaryInfoText => "cautionary_info_text",
            Self::IntroductionText => "introduction_text",
            Self::OtherText => "other_text",
            Self::PreambleText => "preamble_text",
            Self::MainText => "main_text",
            Self::RatificationText => "ratification_text",
            Self::NoteText => "note_text",
            Self::ValidFrom => "valid_from",
            Self::ValidTo => "valid_to",
            Self::ChangeDate => "changedate",
            Self::SigningDate => "signingdate",
            Self::EntryDate => "entrydate",
        }
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Keywords | Self::Languages | Self::ChangedBy => FieldKind::List,
            Self::Errors => FieldKind::Counter,
            Self::ValidFrom
            | Self::ValidTo
            | Self::ChangeDate
            | Self::SigningDate
            | Self::EntryDate => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }

    /// Whether the extractor may accumulate source text into this field.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.kind() != FieldKind::Counter
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ReaderError::FieldNameViolation(format!("unknown field '{s}'")))
    }
}

/// A finished document record.
///
/// Serializes with every field present (null when absent), dates as
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub docid: String,
    pub docid_old: Option<String>,
    pub lawid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub part: Option<String>,
    pub catalogue: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub section: Option<String>,
    pub source_initial: Option<String>,
    pub source_change: Option<String>,
    pub changed_by: Option<Vec<String>>,
    pub title: Option<String>,
    pub title_short: Option<String>,
    pub title_long: Option<String>,
    pub see_also: Option<String>,
    pub parties: Option<String>,
    pub languages: Option<Vec<String>>,
    /// Recoverable anomalies met while extracting.
    pub errors: u32,

    #[serde(alias = "cautonary_info_text")]
    pub cautionary_info_text: Option<String>,
    pub introduction_text: Option<String>,
    pub other_text: Option<String>,
    pub preamble_text: Option<String>,
    pub main_text: Option<String>,
    pub ratification_text: Option<String>,
    pub note_text: Option<String>,

    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    #[serde(rename = "changedate")]
    pub change_date: Option<NaiveDate>,
    #[serde(rename = "signingdate")]
    pub signing_date: Option<NaiveDate>,
    #[serde(rename = "entrydate")]
    pub entry_date: Option<NaiveDate>,
}

/// Borrowed view of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    Text(Option<&'a str>),
    List(Option<&'a [String]>),
    Date(Option<NaiveDate>),
    Counter(u32),
}

impl FieldRef<'_> {
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            Self::Text(v) => v.is_none(),
            Self::List(v) => v.is_none(),
            Self::Date(v) => v.is_none(),
            Self::Counter(_) => false,
        }
    }
}

impl fmt::Display for FieldRef<'_> {
    /// Lists render one element per line; null renders as nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(Some(text)) => f.write_str(text),
            Self::List(Some(items)) => f.write_str(&items.join("\n")),
            Self::Date(Some(date)) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Counter(n) => write!(f, "{n}"),
            Self::Text(None) | Self::List(None) | Self::Date(None) => Ok(()),
        }
    }
}

impl DocumentRecord {
    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, field: FieldName) -> FieldRef<'_> {
        use FieldName as F;

        match field {
            F::DocId => FieldRef::Text(Some(&self.docid)),
            F::DocIdOld => text(&self.docid_old),
            F::LawId => text(&self.lawid),
            F::Type => text(&self.doc_type),
            F::Part => text(&self.part),
            F::Catalogue => text(&self.catalogue),
            F::Keywords => list(&self.keywords),
            F::Section => text(&self.section),
            F::SourceInitial => text(&self.source_initial),
            F::SourceChange => text(&self.source_change),
            F::ChangedBy => list(&self.changed_by),
            F::Title => text(&self.title),
            F::TitleShort => text(&self.title_short),
            F::TitleLong => text(&self.title_long),
            F::SeeAlso => text(&self.see_also),
            F::Parties => text(&self.parties),
            F::Languages => list(&self.languages),
            F::Errors => FieldRef::Counter(self.errors),
            F::CautionaryInfoText => text(&self.cautionary_info_text),
            F::IntroductionText => text(&self.introduction_text),
            F::OtherText => text(&self.other_text),
            F::PreambleText => text(&self.preamble_text),
            F::MainText => text(&self.main_text),
            F::RatificationText => text(&self.ratification_text),
            F::NoteText => text(&self.note_text),
            F::ValidFrom => FieldRef::Date(self.valid_from),
            F::ValidTo => FieldRef::Date(self.valid_to),
            F::ChangeDate => FieldRef::Date(self.change_date),
            F::SigningDate => FieldRef::Date(self.signing_date),
            F::EntryDate => FieldRef::Date(self.entry_date),
        }
    }
}

fn text(value: &Option<String>) -> FieldRef<'_> {
    FieldRef::Text(value.as_deref())
}

fn list(value: &Option<Vec<String>>) -> FieldRef<'_> {
    FieldRef::List(value.as_deref())
}
