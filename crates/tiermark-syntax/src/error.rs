//! Errors raised while building a tree.

use std::ops::Range;

use thiserror::Error;

use crate::syntax_kind::SyntaxKind;

/// Fatal conditions detected while parsing.
///
/// In [`ParseMode::Lenient`](crate::ParseMode::Lenient) everything except
/// [`ParseError::Cancelled`] is recovered from by a fallback tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("list level jumps from {from} to {to} at offset {offset}")]
    ListLevelSkip {
        from: usize,
        to: usize,
        offset: usize,
    },

    #[error("list marker at offset {offset} has unsupported nesting level {level}")]
    InvalidListLevel { level: isize, offset: usize },

    #[error("{inner:?} at {inner_range:?} crosses {outer:?} at {outer_range:?}")]
    MalformedProductions {
        outer: SyntaxKind,
        outer_range: Range<usize>,
        inner: SyntaxKind,
        inner_range: Range<usize>,
    },

    #[error("inconsistent delimiter state in inline content at {range:?}: {reason}")]
    Inline {
        range: Range<usize>,
        reason: &'static str,
    },

    #[error("parse cancelled")]
    Cancelled,
}
