//! Helpers for navigating `roxmltree` DOM trees of RIS documents.

use roxmltree::Node;

use crate::config::RIS_NAMESPACE;

/// Get the tag name without namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use bundesnormen_reader::xml::get_tag_name;
///
/// let xml = r#"<risdok xmlns="http://www.bka.gv.at"><nutzdaten/></risdok>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "risdok");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with the given local name in the RIS namespace.
pub fn is_ris_element(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element()
        && get_tag_name(node) == name
        && node.tag_name().namespace() == Some(RIS_NAMESPACE)
}

/// Find the first RIS child element with the given local name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use bundesnormen_reader::xml::find_ris_child;
///
/// let xml = r#"<risdok xmlns="http://www.bka.gv.at"><nutzdaten/></risdok>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// assert!(find_ris_child(doc.root_element(), "nutzdaten").is_some());
/// assert!(find_ris_child(doc.root_element(), "metadaten").is_none());
/// ```
pub fn find_ris_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_ris_element(*child, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_get_tag_name_with_namespace() {
        let xml = r#"<ns:root xmlns:ns="http://www.bka.gv.at"><ns:child/></ns:root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "root");
    }

    #[test]
    fn test_is_ris_element() {
        let xml = r#"<root xmlns:r="http://www.bka.gv.at"><r:absatz/><absatz/></root>"#;
        let doc = Document::parse(xml).unwrap();
        let children: Vec<_> = doc.root_element().children().filter(|n| n.is_element()).collect();

        assert!(is_ris_element(children[0], "absatz"));
        assert!(!is_ris_element(children[1], "absatz"));
        assert!(!is_ris_element(children[0], "liste"));
    }

    #[test]
    fn test_find_ris_child_skips_foreign_namespace() {
        let xml = r#"<root xmlns:r="http://www.bka.gv.at"><nutzdaten/><r:nutzdaten>x</r:nutzdaten></root>"#;
        let doc = Document::parse(xml).unwrap();
        let found = find_ris_child(doc.root_element(), "nutzdaten").unwrap();
        assert_eq!(found.text(), Some("x"));
    }
}
