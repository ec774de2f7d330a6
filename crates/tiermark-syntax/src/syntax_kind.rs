//! SyntaxKind enum for all tokens and nodes in the tiermark CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the tiermark CST.
///
/// This enum represents both tokens (lexer and block-matcher output) and
/// composite nodes (assembled from productions). The `repr(u16)` ensures
/// efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs), collapsed to one run inside inline content
    WHITESPACE,
    /// Line ending between blocks
    NEWLINE,
    /// Plain text content
    TEXT,
    /// `*` character, strong marker
    STAR,
    /// `_` character, italic marker
    UNDERSCORE,
    /// `~` character, strikethrough marker
    TILDE,
    /// `+` character, underline marker
    PLUS,

    // === Tokens (parser output) ===
    /// Soft line break inside a paragraph, including surrounding whitespace
    LINE_BREAK,
    /// An inline marker character consumed by a matched delimiter pair
    DELIMITER,
    /// `##` … `#######` in front of a heading
    HEADING_MARKER,
    /// `--`, `---`, `----` or `1..`, `1...`, `1....` in front of a list item
    LIST_ITEM_MARKER,
    /// The five dashes of a horizontal rule
    RULE_MARKER,
    /// End of file marker
    EOF,

    // === Composite Nodes ===
    /// Root document node
    ROOT,
    /// Heading levels, two hashes through seven hashes
    HEADING_1,
    HEADING_2,
    HEADING_3,
    HEADING_4,
    HEADING_5,
    HEADING_6,
    /// Inline content of a heading
    HEADING_CONTENT,
    /// Horizontal rule (`-----`)
    HORIZONTAL_RULE,
    /// Paragraph block, holds inline content directly
    PARAGRAPH,
    /// Outermost unordered list
    UNORDERED_LIST,
    /// Unordered list opened by a wider dash marker
    NESTED_UNORDERED_LIST,
    /// Outermost ordered list
    ORDERED_LIST,
    /// Ordered list opened by a wider dot marker
    NESTED_ORDERED_LIST,
    /// Individual list item
    LIST_ITEM,
    /// Inline content of a list item
    LIST_ITEM_CONTENT,
    /// `*strong*` or `**strong**`
    STRONG,
    /// `_italic_` or `__italic__`
    ITALIC,
    /// `~strike~` or `~~strike~~`
    STRIKETHROUGH,
    /// `+underline+` or `++underline++`
    UNDERLINE,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (leaf).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace/newlines).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::LINE_BREAK)
    }

    /// Returns true for nodes whose text is re-parsed as inline content.
    pub fn is_inline_host(self) -> bool {
        matches!(
            self,
            Self::HEADING_CONTENT | Self::PARAGRAPH | Self::LIST_ITEM_CONTENT
        )
    }

    /// Returns true for the four list container kinds.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Self::UNORDERED_LIST
                | Self::NESTED_UNORDERED_LIST
                | Self::ORDERED_LIST
                | Self::NESTED_ORDERED_LIST
        )
    }

    /// Heading kind for a level in `1..=6`.
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::HEADING_1),
            2 => Some(Self::HEADING_2),
            3 => Some(Self::HEADING_3),
            4 => Some(Self::HEADING_4),
            5 => Some(Self::HEADING_5),
            6 => Some(Self::HEADING_6),
            _ => None,
        }
    }

    /// Level of a heading kind, `None` for everything else.
    pub fn heading_level(self) -> Option<u8> {
        let raw = self as u16;
        if (Self::HEADING_1 as u16..=Self::HEADING_6 as u16).contains(&raw) {
            Some((raw - Self::HEADING_1 as u16 + 1) as u8)
        } else {
            None
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TiermarkLang {}

impl rowan::Language for TiermarkLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::UNDERLINE as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<TiermarkLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<TiermarkLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<TiermarkLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::WHITESPACE.is_token());
        assert!(SyntaxKind::DELIMITER.is_token());
        assert!(SyntaxKind::LIST_ITEM_MARKER.is_token());
        assert!(SyntaxKind::EOF.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::PARAGRAPH.is_node());
        assert!(SyntaxKind::NESTED_ORDERED_LIST.is_node());
        assert!(SyntaxKind::UNDERLINE.is_node());
    }

    #[test]
    fn heading_levels_round_trip_through_kinds() {
        for level in 1..=6 {
            let kind = SyntaxKind::heading(level).unwrap();
            assert_eq!(kind.heading_level(), Some(level));
        }
        assert_eq!(SyntaxKind::heading(0), None);
        assert_eq!(SyntaxKind::heading(7), None);
        assert_eq!(SyntaxKind::PARAGRAPH.heading_level(), None);
    }

    #[test]
    fn inline_hosts() {
        assert!(SyntaxKind::PARAGRAPH.is_inline_host());
        assert!(SyntaxKind::HEADING_CONTENT.is_inline_host());
        assert!(SyntaxKind::LIST_ITEM_CONTENT.is_inline_host());
        assert!(!SyntaxKind::LIST_ITEM.is_inline_host());
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        let kind = SyntaxKind::NESTED_UNORDERED_LIST;
        let raw: rowan::SyntaxKind = kind.into();
        let back = TiermarkLang::kind_from_raw(raw);
        assert_eq!(kind, back);
    }
}
