//! # tiermark-syntax
//!
//! A lossless syntax tree for tiermark, a line-oriented markup dialect whose
//! list nesting is encoded by marker *width* instead of indentation. Built on
//! [Rowan] + [Logos], following the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## The Dialect
//!
//! ```text
//! ## Heading            level 1 (two hashes) … ####### level 6 (seven hashes)
//! -----                 horizontal rule, exactly five dashes
//! -- item               unordered list, level 0
//! --- nested            unordered list, level 1
//! ---- deeper           unordered list, level 2
//! 1.. first             ordered list, level 0 (starts at 1)
//! 2... nested           ordered list, level 1
//! plain text            paragraph, continues until a blank line
//! *strong* _italic_ ~strike~ +underline+   (doubled markers work too)
//! ```
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Block matchers → Productions → Assembly → Events → Sink → Rowan Tree
//!               (line by line)   (kind, range)  (+ inline          (GreenNodeBuilder)
//!                                                re-parse, Logos)
//! ```
//!
//! Every byte of the input ends up in exactly one token of the tree, whatever
//! the input looks like, so `tree.text()` always reproduces the source.
//!
//! ## Module Structure
//!
//! ```text
//! tiermark-syntax/
//! ├── lib.rs           # This file - public API and tree snapshot tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # Logos-based inline tokenizer
//! ├── cursor.rs        # Line/offset view over the source
//! ├── cancel.rs        # CancellationToken
//! ├── error.rs         # ParseError
//! ├── ast.rs           # Typed views (heading level, list start number)
//! └── parser/
//!     ├── mod.rs       # Parser, ParserConfig, ParseMode, parse()
//!     ├── event.rs     # Event enum (Start, Token, Finish)
//!     ├── sink.rs      # Converts events to a Rowan GreenNode
//!     ├── production.rs# Production records, Marker, containment fold
//!     ├── assemble.rs  # Productions → events, inline re-entry
//!     ├── block/       # Heading, list, rule and paragraph matchers
//!     └── inline/      # Delimiter scan/balance/match for the four markers
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tiermark_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("## Hello\n");
//!
//! // The tree preserves all text
//! assert_eq!(tree.text().to_string(), "## Hello\n");
//!
//! // Navigate the tree structure
//! assert_eq!(tree.kind(), SyntaxKind::ROOT);
//! let heading = tree.children().next().unwrap();
//! assert_eq!(heading.kind(), SyntaxKind::HEADING_1);
//! ```

pub mod ast;
pub mod cancel;
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use cancel::CancellationToken;
pub use error::ParseError;
pub use parser::{ParseMode, Parser, ParserConfig, parse};
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TiermarkLang};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    /// Helper to format a syntax tree for snapshot testing.
    fn format_tree(node: &SyntaxNode, indent: usize) -> String {
        let mut result = String::new();
        let prefix = "  ".repeat(indent);

        result.push_str(&format!(
            "{}{:?}@{:?}\n",
            prefix,
            node.kind(),
            node.text_range()
        ));

        for child in node.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Node(n) => {
                    result.push_str(&format_tree(&n, indent + 1));
                }
                rowan::NodeOrToken::Token(t) => {
                    result.push_str(&format!(
                        "{}  {:?}@{:?} {:?}\n",
                        prefix,
                        t.kind(),
                        t.text_range(),
                        t.text()
                    ));
                }
            }
        }

        result
    }

    fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.children().map(|n| n.kind()).collect()
    }

    #[test]
    fn snapshot_headings() {
        let tree = parse("## heading 1\n### heading 2\n");
        assert_snapshot!(format_tree(&tree, 0), @r####"
        ROOT@0..27
          HEADING_1@0..12
            HEADING_MARKER@0..2 "##"
            WHITESPACE@2..3 " "
            HEADING_CONTENT@3..12
              TEXT@3..10 "heading"
              WHITESPACE@10..11 " "
              TEXT@11..12 "1"
          NEWLINE@12..13 "\n"
          HEADING_2@13..26
            HEADING_MARKER@13..16 "###"
            WHITESPACE@16..17 " "
            HEADING_CONTENT@17..26
              TEXT@17..24 "heading"
              WHITESPACE@24..25 " "
              TEXT@25..26 "2"
          NEWLINE@26..27 "\n"
        "####);
    }

    #[test]
    fn snapshot_nested_list() {
        let tree = parse("-- A\n--- B\n-- C\n");
        assert_snapshot!(format_tree(&tree, 0), @r####"
        ROOT@0..16
          UNORDERED_LIST@0..15
            LIST_ITEM@0..4
              LIST_ITEM_MARKER@0..2 "--"
              WHITESPACE@2..3 " "
              LIST_ITEM_CONTENT@3..4
                TEXT@3..4 "A"
            NEWLINE@4..5 "\n"
            NESTED_UNORDERED_LIST@5..10
              LIST_ITEM@5..10
                LIST_ITEM_MARKER@5..8 "---"
                WHITESPACE@8..9 " "
                LIST_ITEM_CONTENT@9..10
                  TEXT@9..10 "B"
            NEWLINE@10..11 "\n"
            LIST_ITEM@11..15
              LIST_ITEM_MARKER@11..13 "--"
              WHITESPACE@13..14 " "
              LIST_ITEM_CONTENT@14..15
                TEXT@14..15 "C"
          NEWLINE@15..16 "\n"
        "####);
    }

    #[test]
    fn snapshot_paragraphs_with_line_break() {
        let tree = parse("some *text*\nmore  \n\nnext\n");
        assert_snapshot!(format_tree(&tree, 0), @r####"
        ROOT@0..25
          PARAGRAPH@0..16
            TEXT@0..4 "some"
            WHITESPACE@4..5 " "
            STRONG@5..11
              DELIMITER@5..6 "*"
              TEXT@6..10 "text"
              DELIMITER@10..11 "*"
            LINE_BREAK@11..12 "\n"
            TEXT@12..16 "more"
          WHITESPACE@16..18 "  "
          NEWLINE@18..19 "\n"
          NEWLINE@19..20 "\n"
          PARAGRAPH@20..24
            TEXT@20..24 "next"
          NEWLINE@24..25 "\n"
        "####);
    }

    #[test]
    fn horizontal_rule_needs_exactly_five_dashes() {
        assert_eq!(
            child_kinds(&parse("-----\n")),
            vec![SyntaxKind::HORIZONTAL_RULE]
        );
        assert_eq!(child_kinds(&parse("----\n")), vec![SyntaxKind::PARAGRAPH]);
        assert_eq!(child_kinds(&parse("-----x\n")), vec![SyntaxKind::PARAGRAPH]);
    }

    #[test]
    fn four_inline_markers() {
        let tree = parse("**bold** __italic__ ~~strike~~ ++underline++");
        let paragraph = tree.first_child().unwrap();
        assert_eq!(
            child_kinds(&paragraph),
            vec![
                SyntaxKind::STRONG,
                SyntaxKind::ITALIC,
                SyntaxKind::STRIKETHROUGH,
                SyntaxKind::UNDERLINE,
            ]
        );
        let whitespace = paragraph
            .children_with_tokens()
            .filter(|e| e.kind() == SyntaxKind::WHITESPACE)
            .count();
        assert_eq!(whitespace, 3);
    }

    #[test]
    fn triple_markers_stay_literal() {
        let tree = parse("***x***");
        let paragraph = tree.first_child().unwrap();
        assert_eq!(child_kinds(&paragraph), vec![]);
        assert!(
            paragraph
                .children_with_tokens()
                .all(|e| e.kind() == SyntaxKind::STAR || e.kind() == SyntaxKind::TEXT)
        );
    }

    #[test]
    fn heading_hash_counts() {
        assert_eq!(child_kinds(&parse("# one\n")), vec![SyntaxKind::PARAGRAPH]);
        assert_eq!(
            child_kinds(&parse("####### six\n")),
            vec![SyntaxKind::HEADING_6]
        );
        assert_eq!(
            child_kinds(&parse("######## eight\n")),
            vec![SyntaxKind::PARAGRAPH]
        );
    }

    #[test]
    fn children_nest_within_parents() {
        let tree = parse("## a *b*\n-- c\n--- d _e_\n---- f\n-- g\n\n1.. h\n2... i\n-----\nj\nk\n");
        for node in tree.descendants() {
            let range = node.text_range();
            let mut previous_end = range.start();
            for child in node.children_with_tokens() {
                let child_range = child.text_range();
                assert!(range.contains_range(child_range));
                assert_eq!(child_range.start(), previous_end);
                previous_end = child_range.end();
            }
        }
    }

    #[test]
    fn roundtrip_preserves_text() {
        let inputs = [
            "",
            "Hello, world!\n",
            "## Heading\n",
            "   ## indented heading ##   \n",
            "-- Item\n--- Nested\n",
            "1.. one\r\n2.. two\r\n",
            "-----   \n",
            "*strong* _italic_\n  continued\n",
            "***x***\n",
            "\n\n\n",
            "tab\tseparated\ttext",
            "lone\rreturn",
        ];

        for input in inputs {
            let tree = parse(input);
            assert_eq!(
                tree.text().to_string(),
                input,
                "Roundtrip failed for: {:?}",
                input
            );
        }
    }

    #[test]
    fn roundtrip_messy_notes() {
        // Half-finished edits: unbalanced markers, odd widths, stray hashes
        let input = r#"#Meeting Notes
##Action Items
-- call *John about the project
----- not a list
-- review ~~PR 123
---- jumped a level

_unclosed italic and +stray plus
#######  deep  heading  #######
1.. one
3..... too many dots
"#;
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
    }
}
