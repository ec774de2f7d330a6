//! Headings: `##` through `#######` followed by whitespace.
//!
//! The hash count minus one is the heading level, so `## x` is a level 1
//! heading and `####### x` a level 6 one. A single `#` is plain text.

use std::ops::Range;

use super::{Block, BlockMatcher};
use crate::cursor::Position;
use crate::error::ParseError;
use crate::parser::production::{Marker, ProductionHolder};
use crate::syntax_kind::SyntaxKind;

const MIN_HASHES: usize = 2;
const MAX_HASHES: usize = 7;

/// A line recognised as a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeadingLine {
    pub kind: SyntaxKind,
    pub marker: Range<usize>,
    pub content: Range<usize>,
}

pub(crate) fn match_heading(pos: Position<'_>) -> Option<HeadingLine> {
    let line = pos.current_line().as_bytes();
    let marker_start = pos.indent();
    let mut offset = marker_start;

    // One past the maximum is enough to reject longer runs.
    while offset < line.len() && line[offset] == b'#' && offset - marker_start <= MAX_HASHES {
        offset += 1;
    }

    let hashes = offset - marker_start;
    if !(MIN_HASHES..=MAX_HASHES).contains(&hashes) {
        return None;
    }
    if !line.get(offset).is_some_and(u8::is_ascii_whitespace) {
        return None;
    }

    let base = pos.line_start();
    Some(HeadingLine {
        kind: SyntaxKind::heading((hashes - 1) as u8)?,
        marker: base + marker_start..base + offset,
        content: base + offset..pos.line_end(),
    })
}

#[derive(Debug)]
pub(crate) struct HeadingMatcher;

impl BlockMatcher for HeadingMatcher {
    fn try_open(
        &self,
        pos: Position<'_>,
        holder: &mut ProductionHolder,
    ) -> Result<Option<Block>, ParseError> {
        let Some(heading) = match_heading(pos) else {
            return Ok(None);
        };
        log::debug!("{:?} at {}", heading.kind, heading.marker.start);

        let marker = holder.mark(heading.marker.start);
        holder.add(SyntaxKind::HEADING_MARKER, heading.marker);
        holder.add(SyntaxKind::HEADING_CONTENT, heading.content);

        Ok(Some(Block::Heading(HeadingBlock {
            marker,
            kind: heading.kind,
            end: pos.line_end(),
        })))
    }

    fn interrupts_paragraph(&self, pos: Position<'_>) -> bool {
        match_heading(pos).is_some()
    }
}

/// A heading always ends with its line.
#[derive(Debug)]
pub(crate) struct HeadingBlock {
    marker: Marker,
    kind: SyntaxKind,
    end: usize,
}

impl HeadingBlock {
    pub(crate) fn close(self, holder: &mut ProductionHolder) {
        self.marker.complete(holder, self.kind, self.end);
    }
}
