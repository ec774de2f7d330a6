//! # Lexer - Tokenizing Inline Text
//!
//! This module breaks inline text (heading content, paragraph bodies, list
//! item content) into tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. Nothing is skipped:
//!
//! ```
//! use tiermark_syntax::lexer::lex;
//!
//! let input = "**bold** and ~~gone~~\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Block structure is recognised line by line from the raw text, so the lexer
//! only distinguishes what the inline delimiter matcher needs:
//! - `*`, `_`, `~`, `+` → `STAR`, `UNDERSCORE`, `TILDE`, `PLUS`, one token
//!   per character so that runs can be counted
//! - spaces and tabs → `WHITESPACE`
//! - line endings → `NEWLINE`
//!
//! Everything else becomes `TEXT`, grouped into runs.

use std::ops::Range;

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// `*` strong marker
    #[token("*")]
    Star,

    /// `_` italic marker
    #[token("_")]
    Underscore,

    /// `~` strikethrough marker
    #[token("~")]
    Tilde,

    /// `+` underline marker
    #[token("+")]
    Plus,

    /// Plain text - anything not matched by other rules
    #[regex(r"[^ \t\r\n*_~+]+")]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Underscore => SyntaxKind::UNDERSCORE,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            // A lone `\r` is the only byte no rule accepts
            Err(()) => SyntaxKind::TEXT,
        };
        tokens.push((Token { kind, text }, span));
    }

    tokens
}
