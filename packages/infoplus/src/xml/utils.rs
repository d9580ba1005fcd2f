//! XML utility functions for navigating namespaced InfoPlus DOM trees.

use std::borrow::Cow;

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Arguments
/// * `node` - XML node
///
/// # Returns
/// Local tag name (e.g., "Trein" not "ns2:Trein")
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use infoplus_model::xml::get_tag_name;
///
/// let xml = r#"<ns2:Trein xmlns:ns2="urn:ndov:cdm:trein:reisinformatie:data:4"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "Trein");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check whether an element lives in the given namespace.
///
/// # Arguments
/// * `node` - XML node
/// * `namespace` - Namespace URI to compare against
///
/// # Returns
/// `true` if the node's resolved namespace equals `namespace`
pub fn is_in_namespace(node: Node<'_, '_>, namespace: &str) -> bool {
    node.tag_name().namespace() == Some(namespace)
}

/// Check if a node is an element with the given local name and namespace.
///
/// # Arguments
/// * `node` - Node to check
/// * `namespace` - Expected namespace URI
/// * `tag` - Expected local name
///
/// # Returns
/// `true` if the node is an element matching both
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use infoplus_model::xml::has_tag;
///
/// let xml = r#"<Root xmlns="urn:a"><Child/></Root>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert!(has_tag(doc.root_element(), "urn:a", "Root"));
/// assert!(!has_tag(doc.root_element(), "urn:b", "Root"));
/// ```
pub fn has_tag(node: Node<'_, '_>, namespace: &str, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag && is_in_namespace(node, namespace)
}

/// Get all element children of a node, in document order.
///
/// # Arguments
/// * `node` - Parent node
///
/// # Returns
/// Iterator over the child elements, skipping text, comments and
/// processing instructions
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Get the text content of a leaf element, untrimmed.
///
/// Comments and processing instructions split the content into several
/// text nodes; those are joined in document order.
///
/// # Arguments
/// * `node` - Leaf element
///
/// # Returns
/// Concatenated text children, or an empty string for an empty element
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use infoplus_model::xml::get_text;
///
/// let doc = Document::parse("<Vervoerder>N<!-- x -->S</Vervoerder>").unwrap();
/// assert_eq!(get_text(doc.root_element()), "NS");
/// ```
pub fn get_text<'a>(node: Node<'a, '_>) -> Cow<'a, str> {
    let mut pieces = node
        .children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text());
    let Some(first) = pieces.next() else {
        return Cow::Borrowed("");
    };
    match pieces.next() {
        None => Cow::Borrowed(first),
        Some(second) => {
            let mut joined = format!("{first}{second}");
            pieces.for_each(|piece| joined.push_str(piece));
            Cow::Owned(joined)
        }
    }
}

/// First non-whitespace text node directly below an element, if any.
///
/// # Arguments
/// * `node` - Element with element content
///
/// # Returns
/// The trimmed text, or `None` when the element holds only whitespace
pub fn stray_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .map(str::trim)
        .find(|text| !text.is_empty())
}

/// Check whether a character may appear in an XML 1.0 document.
///
/// # Arguments
/// * `c` - Character to check
///
/// # Returns
/// `true` for tab, line feed, carriage return and the `Char` production
/// ranges; `false` for other control characters and U+FFFE/U+FFFF
///
/// # Examples
/// ```
/// use infoplus_model::xml::is_xml_char;
///
/// assert!(is_xml_char('\t'));
/// assert!(is_xml_char('é'));
/// assert!(!is_xml_char('\u{1}'));
/// ```
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const DATA_NS: &str = "urn:ndov:cdm:trein:reisinformatie:data:4";

    #[test]
    fn test_get_tag_name_with_prefix() {
        let xml = format!(r#"<ns2:RitStation xmlns:ns2="{DATA_NS}"><ns2:StationCode/></ns2:RitStation>"#);
        let doc = Document::parse(&xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "RitStation");
        assert!(is_in_namespace(doc.root_element(), DATA_NS));
    }

    #[test]
    fn test_element_children() {
        let xml = r#"<root>text<child1/>more<child2/></root>"#;
        let doc = Document::parse(xml).unwrap();
        let children: Vec<_> = element_children(doc.root_element()).collect();
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_get_text_is_untrimmed() {
        let xml = r#"<root><a> spaced </a><b/></root>"#;
        let doc = Document::parse(xml).unwrap();
        let mut children = element_children(doc.root_element());
        assert_eq!(get_text(children.next().unwrap()), " spaced ");
        assert_eq!(get_text(children.next().unwrap()), "");
    }

    #[test]
    fn test_get_text_joins_split_content() {
        let xml = "<root><a>N<!-- x -->S</a><b><!-- x -->NS</b><c>2<?pi?>9<!---->92</c></root>";
        let doc = Document::parse(xml).unwrap();
        let texts: Vec<_> = element_children(doc.root_element()).map(get_text).collect();
        assert_eq!(texts, ["NS", "NS", "2992"]);
    }

    #[test]
    fn test_stray_text() {
        let doc = Document::parse("<root>\n  <a/>\n</root>").unwrap();
        assert_eq!(stray_text(doc.root_element()), None);

        let doc = Document::parse("<root><a/>loose</root>").unwrap();
        assert_eq!(stray_text(doc.root_element()), Some("loose"));
    }

    #[test]
    fn test_is_xml_char() {
        for c in ['\t', '\n', '\r', ' ', 'ë', '\u{FFFD}', '\u{1F686}'] {
            assert!(is_xml_char(c), "{c:?}");
        }
        for c in ['\u{0}', '\u{1}', '\u{B}', '\u{1F}', '\u{FFFE}', '\u{FFFF}'] {
            assert!(!is_xml_char(c), "{c:?}");
        }
    }
}
