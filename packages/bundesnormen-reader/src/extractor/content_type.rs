//! Content-type (`ct` attribute) to field mapping.

use crate::types::FieldName;

/// Publication organ: the source citation, optionally with its last amendment.
pub const KUNDMACHUNGSORGAN: &str = "kundmachungsorgan";

/// Annotation paragraphs, which carry several sub-kinds of content.
pub const ANMERKUNG: &str = "anmerkung";

/// Map a content type onto the record field it fills.
///
/// `kundmachungsorgan` has no entry; it is split into two fields by the
/// extractor instead.
#[must_use]
pub fn content_type_field(ct: &str) -> Option<FieldName> {
    let field = match ct {
        "kurztitel" => FieldName::Title,
        "langtitel" => FieldName::TitleLong,
        "gesnr" => FieldName::LawId,
        "doknr" => FieldName::DocId,
        "adoknr" => FieldName::DocIdOld,
        "typ" => FieldName::Type,
        "artikel_anlage" => FieldName::Part,
        "ikra" => FieldName::ValidFrom,
        "akra" => FieldName::ValidTo,
        "abkuerzung" => FieldName::TitleShort,
        "beachte" => FieldName::CautionaryInfoText,
        "index" => FieldName::Catalogue,
        "schlagworte" => FieldName::Keywords,
        "geaendert" => FieldName::ChangeDate,
        "promkleinlsatz" => FieldName::IntroductionText,
        "unterzeichnungsdatum" => FieldName::SigningDate,
        "aenderung" => FieldName::ChangedBy,
        "text" => FieldName::MainText,
        "prae_promul" => FieldName::PreambleText,
        "Sonstige textteile" => FieldName::OtherText,
        "ratifikation" => FieldName::RatificationText,
        "anmerkung" => FieldName::NoteText,
        "vertragsparteien" => FieldName::Parties,
        "sprachen" => FieldName::Languages,
        _ => return None,
    };
    Some(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_content_types() {
        assert_eq!(content_type_field("kurztitel"), Some(FieldName::Title));
        assert_eq!(content_type_field("text"), Some(FieldName::MainText));
        assert_eq!(content_type_field("ikra"), Some(FieldName::ValidFrom));
        assert_eq!(
            content_type_field("Sonstige textteile"),
            Some(FieldName::OtherText)
        );
        assert_eq!(content_type_field(ANMERKUNG), Some(FieldName::NoteText));
    }

    #[test]
    fn test_unknown_content_types() {
        assert_eq!(content_type_field(KUNDMACHUNGSORGAN), None);
        assert_eq!(content_type_field("Kurztitel"), None);
        assert_eq!(content_type_field(""), None);
    }

    #[test]
    fn test_never_maps_to_counter() {
        for ct in ["kurztitel", "doknr", "schlagworte", "anmerkung", "sprachen"] {
            assert!(content_type_field(ct).unwrap().is_writable());
        }
    }
}
