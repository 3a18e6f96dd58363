//! Per-field text accumulation for a record under construction.

use std::collections::BTreeMap;

use crate::types::FieldName;

/// Accumulated source text of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBuffer {
    text: String,
    has_content: bool,
}

impl FieldBuffer {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether any paragraph text (not only separators) has been appended.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.has_content
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Mutable record owned by a single extraction.
///
/// Fields are kept in a map so the validator can see exactly which fields
/// were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBuilder {
    fields: BTreeMap<FieldName, FieldBuffer>,
}

impl RecordBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append paragraph text followed by its separator.
    pub fn append(&mut self, field: FieldName, text: &str, separator: &str) {
        let buffer = self.fields.entry(field).or_default();
        buffer.text.push_str(text);
        buffer.text.push_str(separator);
        buffer.has_content = true;
    }

    /// Append a separator without marking the field as having content.
    pub fn append_separator(&mut self, field: FieldName, separator: &str) {
        self.fields
            .entry(field)
            .or_default()
            .text
            .push_str(separator);
    }

    /// Overwrite a field, or clear it with `None`.
    pub fn replace(&mut self, field: FieldName, text: Option<String>) {
        match text {
            Some(text) => {
                self.fields.insert(
                    field,
                    FieldBuffer {
                        text,
                        has_content: true,
                    },
                );
            }
            None => {
                self.fields.remove(&field);
            }
        }
    }

    /// Whether the field has been written at all.
    #[must_use]
    pub fn contains(&self, field: FieldName) -> bool {
        self.fields.contains_key(&field)
    }

    #[must_use]
    pub fn has_content(&self, field: FieldName) -> bool {
        self.fields.get(&field).is_some_and(FieldBuffer::has_content)
    }

    /// Raw accumulated text of a field.
    #[must_use]
    pub fn content(&self, field: FieldName) -> Option<&str> {
        self.fields.get(&field).map(FieldBuffer::as_str)
    }

    /// Fields written so far, in field order.
    pub fn written(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.fields.keys().copied()
    }

    #[must_use]
    pub fn into_fields(self) -> BTreeMap<FieldName, FieldBuffer> {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_accumulates_in_order() {
        let mut builder = RecordBuilder::new();
        builder.append(FieldName::MainText, "first", "\n\n");
        builder.append(FieldName::MainText, "second", "\n\n");
        assert_eq!(
            builder.content(FieldName::MainText),
            Some("first\n\nsecond\n\n")
        );
    }

    #[test]
    fn test_separator_does_not_count_as_content() {
        let mut builder = RecordBuilder::new();
        builder.append_separator(FieldName::ValidFrom, "\n");
        assert!(builder.contains(FieldName::ValidFrom));
        assert!(!builder.has_content(FieldName::ValidFrom));

        builder.append(FieldName::ValidFrom, "01.01.2000", "");
        assert!(builder.has_content(FieldName::ValidFrom));
        assert_eq!(builder.content(FieldName::ValidFrom), Some("\n01.01.2000"));
    }

    #[test]
    fn test_replace_overwrites_and_clears() {
        let mut builder = RecordBuilder::new();
        builder.append(FieldName::SourceChange, "old", "\n");
        builder.replace(FieldName::SourceChange, Some("new".to_string()));
        assert_eq!(builder.content(FieldName::SourceChange), Some("new"));

        builder.replace(FieldName::SourceChange, None);
        assert!(!builder.contains(FieldName::SourceChange));
    }

    #[test]
    fn test_written_is_in_field_order() {
        let mut builder = RecordBuilder::new();
        builder.append(FieldName::NoteText, "n", "\n");
        builder.append(FieldName::Title, "t", "\n");
        let written: Vec<_> = builder.written().collect();
        assert_eq!(written, vec![FieldName::Title, FieldName::NoteText]);
    }
}
