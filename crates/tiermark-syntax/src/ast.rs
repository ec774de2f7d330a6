//! Typed views over syntax nodes.
//!
//! These are thin wrappers that check the node kind once on `cast` and then
//! expose the bits a consumer (such as the HTML renderer) needs.

use crate::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};

/// `HEADING_1` … `HEADING_6`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Heading {
    syntax: SyntaxNode,
    level: u8,
}

impl Heading {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        let level = node.kind().heading_level()?;
        Some(Self {
            syntax: node,
            level,
        })
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.syntax
    }

    /// Heading level, 1 for `##` up to 6 for `#######`.
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn content(&self) -> Option<SyntaxNode> {
        child_node(&self.syntax, SyntaxKind::HEADING_CONTENT)
    }
}

/// Any of the four list kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct List(SyntaxNode);

impl List {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        node.kind().is_list().then(|| Self(node))
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    pub fn is_ordered(&self) -> bool {
        matches!(
            self.0.kind(),
            SyntaxKind::ORDERED_LIST | SyntaxKind::NESTED_ORDERED_LIST
        )
    }

    pub fn is_nested(&self) -> bool {
        matches!(
            self.0.kind(),
            SyntaxKind::NESTED_UNORDERED_LIST | SyntaxKind::NESTED_ORDERED_LIST
        )
    }

    /// Items directly in this list, not those of nested lists.
    pub fn items(&self) -> impl Iterator<Item = ListItem> {
        self.0.children().filter_map(ListItem::cast)
    }

    /// The number the first item of an outer ordered list starts with.
    ///
    /// The first item is the opening line, which sits inside the nested
    /// lists when the list opens below level 0. `None` for unordered and
    /// nested lists, which carry no start number.
    pub fn start_number(&self) -> Option<u64> {
        if self.0.kind() != SyntaxKind::ORDERED_LIST {
            return None;
        }
        let marker = self.0.descendants().find_map(ListItem::cast)?.marker()?;
        let text = marker.text();
        let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        text[..digits].parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListItem(SyntaxNode);

impl ListItem {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        (node.kind() == SyntaxKind::LIST_ITEM).then(|| Self(node))
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    pub fn marker(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == SyntaxKind::LIST_ITEM_MARKER)
    }

    pub fn content(&self) -> Option<SyntaxNode> {
        child_node(&self.0, SyntaxKind::LIST_ITEM_CONTENT)
    }
}

fn child_node(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    parent.children().find(|child| child.kind() == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn first_list(source: &str) -> List {
        parse(source)
            .descendants()
            .find_map(List::cast)
            .unwrap()
    }

    #[test]
    fn heading_level_and_content() {
        let tree = parse("#### deep title\n");
        let heading = tree.children().find_map(Heading::cast).unwrap();
        assert_eq!(heading.level(), 3);
        assert_eq!(heading.content().unwrap().text().to_string(), "deep title");
    }

    #[test]
    fn ordered_start_number() {
        let list = first_list("7.. seven\n8.. eight\n");
        assert!(list.is_ordered());
        assert!(!list.is_nested());
        assert_eq!(list.start_number(), Some(7));
        assert_eq!(list.items().count(), 2);
    }

    #[test]
    fn start_number_of_list_opened_below_level_zero() {
        let list = first_list("3... c\n-- d\n");
        assert!(list.is_ordered());
        assert!(!list.is_nested());
        assert_eq!(list.start_number(), Some(3));
    }

    #[test]
    fn unordered_has_no_start_number() {
        assert_eq!(first_list("-- a\n").start_number(), None);
    }

    #[test]
    fn nested_ordered_has_no_start_number() {
        let tree = parse("-- a\n3... b\n");
        let nested = tree
            .descendants()
            .filter_map(List::cast)
            .find(List::is_nested)
            .unwrap();
        assert!(nested.is_ordered());
        assert_eq!(nested.start_number(), None);
    }

    #[test]
    fn item_marker_and_content() {
        let list = first_list("--   spaced out  \n");
        let item = list.items().next().unwrap();
        assert_eq!(item.marker().unwrap().text(), "--");
        assert_eq!(item.content().unwrap().text().to_string(), "spaced out");
    }
}
