//! Owned element tree for the content section.
//!
//! `roxmltree` trees are read-only; the extractor needs to drop the leading
//! paragraph symbol from a main-text paragraph, so the content section is
//! copied into [`RawElement`]s using the text/tail model: an element owns
//! the text before its first child element, and each child owns the text
//! that follows it up to the next sibling element.

use roxmltree::Node;

use crate::config::RIS_NAMESPACE;

/// Maximum length of the text preview in [`RawElement::outline`].
const OUTLINE_PREVIEW_CHARS: usize = 60;

/// An element of the content section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawElement {
    /// Namespace URI, `None` for unqualified elements.
    pub namespace: Option<String>,
    /// Local tag name.
    pub name: String,
    /// The `typ` attribute (structural role).
    pub typ: Option<String>,
    /// The `ct` attribute (content type).
    pub ct: Option<String>,
    /// Text before the first child element.
    pub text: Option<String>,
    /// Text after this element's end tag, up to the next sibling element.
    pub tail: Option<String>,
    /// Child elements in document order.
    pub children: Vec<RawElement>,
}

impl RawElement {
    /// Copy a `roxmltree` element and its subtree.
    ///
    /// Comments and processing instructions are dropped; text around them is
    /// merged with the neighbouring text.
    #[must_use]
    pub fn from_node(node: Node<'_, '_>) -> Self {
        let mut element = Self {
            namespace: node.tag_name().namespace().map(str::to_string),
            name: node.tag_name().name().to_string(),
            typ: node.attribute("typ").map(str::to_string),
            ct: node.attribute("ct").map(str::to_string),
            ..Self::default()
        };

        for child in node.children() {
            if child.is_element() {
                element.children.push(Self::from_node(child));
            } else if child.is_text() {
                let fragment = child.text().unwrap_or_default();
                let slot = match element.children.last_mut() {
                    Some(last) => &mut last.tail,
                    None => &mut element.text,
                };
                slot.get_or_insert_with(String::new).push_str(fragment);
            }
        }

        element
    }

    /// Whether this is the RIS element with the given local name.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(RIS_NAMESPACE)
    }

    #[must_use]
    pub fn typ(&self) -> Option<&str> {
        self.typ.as_deref()
    }

    #[must_use]
    pub fn ct(&self) -> Option<&str> {
        self.ct.as_deref()
    }

    /// Index of the first RIS child element with the given local name.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|child| child.is(name))
    }

    /// Own text plus the inner text of every descendant.
    ///
    /// Each text fragment (an element's text or a descendant's tail) counts
    /// separately and fragments are joined with a single space. The
    /// element's own tail is not included.
    ///
    /// # Examples
    /// ```
    /// use roxmltree::Document;
    /// use bundesnormen_reader::xml::RawElement;
    ///
    /// let doc = Document::parse("<p>Art. <b>1</b> gilt</p>").unwrap();
    /// let p = RawElement::from_node(doc.root_element());
    /// assert_eq!(p.joined_text(), "Art.  1  gilt");
    /// ```
    #[must_use]
    pub fn joined_text(&self) -> String {
        let mut fragments = Vec::new();
        self.collect_fragments(&mut fragments);
        fragments.join(" ")
    }

    fn collect_fragments<'a>(&'a self, fragments: &mut Vec<&'a str>) {
        if let Some(text) = &self.text {
            fragments.push(text);
        }
        for child in &self.children {
            child.collect_fragments(fragments);
            if let Some(tail) = &child.tail {
                fragments.push(tail);
            }
        }
    }

    /// Remove the child at `index`, taking its tail text with it.
    pub fn remove_child(&mut self, index: usize) -> RawElement {
        self.children.remove(index)
    }

    /// Indented one-line-per-element rendering of the subtree.
    ///
    /// Used as a debugging view of the raw content section.
    #[must_use]
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push('<');
        out.push_str(&self.name);
        if let Some(typ) = &self.typ {
            out.push_str(&format!(" typ=\"{typ}\""));
        }
        if let Some(ct) = &self.ct {
            out.push_str(&format!(" ct=\"{ct}\""));
        }
        out.push('>');

        let preview = self
            .text
            .as_deref()
            .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        if !preview.is_empty() {
            out.push(' ');
            if preview.chars().count() > OUTLINE_PREVIEW_CHARS {
                out.extend(preview.chars().take(OUTLINE_PREVIEW_CHARS));
                out.push('…');
            } else {
                out.push_str(&preview);
            }
        }
        out.push('\n');

        for child in &self.children {
            child.write_outline(depth + 1, out);
        }
    }
}
