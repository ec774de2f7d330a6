//! # Parser Events
//!
//! Events are the intermediate representation between assembly and tree
//! building. Instead of building the tree directly, the assembler emits a
//! **flat sequence** of events that describe the tree structure.
//!
//! ## Event Types
//!
//! ```text
//! Start(HEADING_1)               ← Begin a HEADING_1 node
//!   Token(HEADING_MARKER, 0..2)  ← Add a token covering bytes 0..2
//!   Token(WHITESPACE, 2..3)
//!   Start(HEADING_CONTENT)
//!     Token(TEXT, 3..8)
//!   Finish
//! Finish                         ← End the HEADING_1 node
//! ```
//!
//! Tokens carry the byte range of the source they cover rather than an index
//! into a token stream: block structure is recognised from raw lines, so
//! there is no single token stream for the whole document. The
//! [`Sink`](super::sink::Sink) slices the source with these ranges.

use std::ops::Range;

use crate::syntax_kind::SyntaxKind;

/// An event emitted during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    Start { kind: SyntaxKind },

    /// Add a token covering `range` of the source to the current node.
    ///
    /// Consecutive token events must cover the source without gaps.
    Token { kind: SyntaxKind, range: Range<usize> },

    /// Finish the current node.
    ///
    /// Must be paired with a preceding `Start`.
    Finish,
}

impl Event {
    /// Create a start event.
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    /// Create a token event.
    pub fn token(kind: SyntaxKind, range: Range<usize>) -> Self {
        Event::Token { kind, range }
    }
}
