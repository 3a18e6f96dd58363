//! Post-pass over accumulated field text: trimming, date parsing, list splitting.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{ReaderError, Result};
use crate::extractor::RecordBuilder;
use crate::types::{FieldKind, FieldName};

/// Source format of every date field.
const DATE_FORMAT: &str = "%d.%m.%Y";

/// Separator of keyword and language lists.
const LIST_SEPARATOR: &str = ", ";

/// A normalized, non-null field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Date(NaiveDate),
}

impl FieldValue {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::List(_) => FieldKind::List,
            Self::Date(_) => FieldKind::Date,
        }
    }
}

/// Normalized fields of one document; absent fields are null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFields {
    values: BTreeMap<FieldName, FieldValue>,
}

impl NormalizedFields {
    #[must_use]
    pub fn get(&self, field: FieldName) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    pub fn take(&mut self, field: FieldName) -> Option<FieldValue> {
        self.values.remove(&field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Normalize every written field of a builder.
///
/// Values that are empty after trimming become null. A counter field, which
/// the extractor never writes, is passed on as text for the validator to
/// reject.
///
/// # Errors
/// `InvalidDate` if a date field holds anything but one `dd.mm.yyyy` date.
pub fn normalize(builder: RecordBuilder) -> Result<NormalizedFields> {
    let mut values = BTreeMap::new();

    for (field, buffer) in builder.into_fields() {
        let raw = buffer.into_string();
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }

        let value = match field.kind() {
            FieldKind::Text | FieldKind::Counter => FieldValue::Text(text.to_string()),
            FieldKind::List if field == FieldName::ChangedBy => FieldValue::List(split_lines(text)),
            FieldKind::List => FieldValue::List(split_delimited(text)),
            FieldKind::Date => FieldValue::Date(parse_date(field, text)?),
        };
        values.insert(field, value);
    }

    Ok(NormalizedFields { values })
}

/// Parse a `dd.mm.yyyy` date.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use bundesnormen_reader::normalize::parse_date;
/// use bundesnormen_reader::FieldName;
///
/// let date = parse_date(FieldName::ValidFrom, "01.02.2020").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
/// ```
pub fn parse_date(field: FieldName, text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| ReaderError::InvalidDate {
        field: field.to_string(),
        value: text.to_string(),
    })
}

/// Split a `", "`-delimited list, treating line breaks as spaces.
#[must_use]
pub fn split_delimited(text: &str) -> Vec<String> {
    text.replace('\n', " ")
        .split(LIST_SEPARATOR)
        .map(|item| item.trim().to_string())
        .collect()
}

/// Split a list with one entry per line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(|line| line.trim().to_string()).collect()
}
