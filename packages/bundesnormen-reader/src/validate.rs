//! Final checks and conversion of normalized fields into a [`DocumentRecord`].

use crate::error::{ReaderError, Result};
use crate::normalize::{FieldValue, NormalizedFields};
use crate::types::{DocumentRecord, FieldName};

/// Check that every field was written by a rule allowed to write it.
///
/// # Errors
/// `FieldNameViolation` for a written counter field or a value whose kind
/// differs from the field's declared kind.
pub fn check_fields(fields: &NormalizedFields) -> Result<()> {
    for (field, value) in fields.iter() {
        if !field.is_writable() {
            return Err(ReaderError::FieldNameViolation(format!(
                "field '{field}' is reserved and must not be produced by extraction"
            )));
        }
        if value.kind() != field.kind() {
            return Err(ReaderError::FieldNameViolation(format!(
                "field '{field}' expects {:?}, got {:?}",
                field.kind(),
                value.kind()
            )));
        }
    }
    Ok(())
}

/// Validate normalized fields and build the finished record.
///
/// A `docid` produced by the document itself must equal the id the document
/// was located by; without one, the record takes that id.
///
/// # Errors
/// `FieldNameViolation` (see [`check_fields`]) or `DocumentIdMismatch`.
pub fn finalize(docid: &str, mut fields: NormalizedFields, errors: u32) -> Result<DocumentRecord> {
    check_fields(&fields)?;

    let docid = match take_text(&mut fields, FieldName::DocId) {
        Some(found) if found != docid => {
            return Err(ReaderError::DocumentIdMismatch {
                expected: docid.to_string(),
                found,
            });
        }
        _ => docid.to_string(),
    };

    let mut text = |field| take_text(&mut fields, field);
    let record = DocumentRecord {
        docid,
        docid_old: text(FieldName::DocIdOld),
        lawid: text(FieldName::LawId),
        doc_type: text(FieldName::Type),
        part: text(FieldName::Part),
        catalogue: text(FieldName::Catalogue),
        section: text(FieldName::Section),
        source_initial: text(FieldName::SourceInitial),
        source_change: text(FieldName::SourceChange),
        title: text(FieldName::Title),
        title_short: text(FieldName::TitleShort),
        title_long: text(FieldName::TitleLong),
        see_also: text(FieldName::SeeAlso),
        parties: text(FieldName::Parties),
        cautionary_info_text: text(FieldName::CautionaryInfoText),
        introduction_text: text(FieldName::IntroductionText),
        other_text: text(FieldName::OtherText),
        preamble_text: text(FieldName::PreambleText),
        main_text: text(FieldName::MainText),
        ratification_text: text(FieldName::RatificationText),
        note_text: text(FieldName::NoteText),
        keywords: take_list(&mut fields, FieldName::Keywords),
        changed_by: take_list(&mut fields, FieldName::ChangedBy),
        languages: take_list(&mut fields, FieldName::Languages),
        valid_from: take_date(&mut fields, FieldName::ValidFrom),
        valid_to: take_date(&mut fields, FieldName::ValidTo),
        change_date: take_date(&mut fields, FieldName::ChangeDate),
        signing_date: take_date(&mut fields, FieldName::SigningDate),
        entry_date: take_date(&mut fields, FieldName::EntryDate),
        errors,
    };

    debug_assert!(fields.is_empty(), "every checked field is taken");
    Ok(record)
}

fn take_text(fields: &mut NormalizedFields, field: FieldName) -> Option<String> {
    match fields.take(field) {
        Some(FieldValue::Text(text)) => Some(text),
        _ => None,
    }
}

fn take_list(fields: &mut NormalizedFields, field: FieldName) -> Option<Vec<String>> {
    match fields.take(field) {
        Some(FieldValue::List(items)) => Some(items),
        _ => None,
    }
}

fn take_date(fields: &mut NormalizedFields, field: FieldName) -> Option<chrono::NaiveDate> {
    match fields.take(field) {
        Some(FieldValue::Date(date)) => Some(date),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::RecordBuilder;
    use crate::normalize::normalize;

    fn fields(entries: &[(FieldName, &str)]) -> NormalizedFields {
        let mut builder = RecordBuilder::new();
        for (field, text) in entries {
            builder.append(*field, text, "\n");
        }
        normalize(builder).unwrap()
    }

    #[test]
    fn test_docid_defaults_to_input() {
        let record = finalize("NOR40000001", fields(&[]), 0).unwrap();
        assert_eq!(record.docid, "NOR40000001");
        assert_eq!(record.main_text, None);
        assert_eq!(record.valid_to, None);
    }

    #[test]
    fn test_docid_must_match() {
        let parsed = fields(&[(FieldName::DocId, "NOR40000002")]);
        let err = finalize("NOR40000001", parsed, 0).unwrap_err();
        assert!(matches!(
            err,
            ReaderError::DocumentIdMismatch { ref expected, ref found }
                if expected == "NOR40000001" && found == "NOR40000002"
        ));
    }

    #[test]
    fn test_matching_docid_is_accepted() {
        let parsed = fields(&[(FieldName::DocId, "NOR40000001")]);
        assert_eq!(finalize("NOR40000001", parsed, 0).unwrap().docid, "NOR40000001");
    }

    #[test]
    fn test_errors_are_attached() {
        let record = finalize("NOR1", fields(&[(FieldName::Title, "T")]), 4).unwrap();
        assert_eq!(record.errors, 4);
        assert_eq!(record.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_written_counter_is_violation() {
        let parsed = fields(&[(FieldName::Errors, "1")]);
        let err = finalize("NOR1", parsed, 0).unwrap_err();
        assert!(matches!(err, ReaderError::FieldNameViolation(_)));
    }

    #[test]
    fn test_all_kinds_are_moved_into_record() {
        let parsed = fields(&[
            (FieldName::Keywords, "a, b"),
            (FieldName::SigningDate, "05.06.1970"),
            (FieldName::MainText, "Text"),
        ]);
        let record = finalize("NOR1", parsed, 0).unwrap();
        assert_eq!(
            record.keywords,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(record.signing_date, chrono::NaiveDate::from_ymd_opt(1970, 6, 5));
        assert_eq!(record.main_text.as_deref(), Some("Text"));
    }
}
