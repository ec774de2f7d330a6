//! # Lists
//!
//! Nesting is encoded by marker width, not indentation:
//!
//! ```text
//! -- one          level 0   (2 dashes)
//! --- nested      level 1   (3 dashes)
//! ---- deeper     level 2   (4 dashes)
//! 1.. first       level 0   (number + 2 dots)
//! 2... nested     level 1   (number + 3 dots)
//! ```
//!
//! A list block keeps one [`ListFrame`] per open level beyond the first.
//! Going one level deeper pushes a frame; going shallower pops frames and
//! records them as nested lists. A jump of more than one level inside a list
//! is an error.

use std::cmp::Ordering;
use std::ops::Range;

use super::{Block, BlockMatcher, Step};
use crate::cursor::Position;
use crate::error::ParseError;
use crate::parser::production::{Marker, ProductionHolder};
use crate::syntax_kind::SyntaxKind;

const MIN_MARKER_WIDTH: usize = 2;
const MAX_MARKER_WIDTH: usize = 4;
const MAX_LEVEL: usize = MAX_MARKER_WIDTH - MIN_MARKER_WIDTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListType {
    Unordered,
    Ordered,
}

impl ListType {
    fn other(self) -> Self {
        match self {
            ListType::Unordered => ListType::Ordered,
            ListType::Ordered => ListType::Unordered,
        }
    }

    fn outer_kind(self) -> SyntaxKind {
        match self {
            ListType::Unordered => SyntaxKind::UNORDERED_LIST,
            ListType::Ordered => SyntaxKind::ORDERED_LIST,
        }
    }

    fn nested_kind(self) -> SyntaxKind {
        match self {
            ListType::Unordered => SyntaxKind::NESTED_UNORDERED_LIST,
            ListType::Ordered => SyntaxKind::NESTED_ORDERED_LIST,
        }
    }

    /// The repeated character whose count encodes the level.
    fn width_char(self) -> u8 {
        match self {
            ListType::Unordered => b'-',
            ListType::Ordered => b'.',
        }
    }
}

/// A line recognised as a list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemLine {
    pub list_type: ListType,
    pub marker: Range<usize>,
    pub content: Range<usize>,
}

impl ItemLine {
    /// Nesting level encoded by the marker width.
    fn level(&self, source: &str) -> Result<usize, ParseError> {
        let width = source[self.marker.clone()]
            .bytes()
            .rev()
            .take_while(|&b| b == self.list_type.width_char())
            .count();
        match width.checked_sub(MIN_MARKER_WIDTH) {
            Some(level) if level <= MAX_LEVEL => Ok(level),
            _ => Err(ParseError::InvalidListLevel {
                level: width as isize - MIN_MARKER_WIDTH as isize,
                offset: self.marker.start,
            }),
        }
    }
}

/// Count up to one past `MAX_MARKER_WIDTH` copies of `c` from `offset`.
fn marker_run(line: &[u8], offset: usize, c: u8) -> usize {
    line[offset..]
        .iter()
        .take(MAX_MARKER_WIDTH + 1)
        .take_while(|&&b| b == c)
        .count()
}

fn item_line(
    pos: Position<'_>,
    list_type: ListType,
    marker_start: usize,
    marker_end: usize,
) -> Option<ItemLine> {
    let line = pos.current_line().as_bytes();
    if !line.get(marker_end).is_some_and(u8::is_ascii_whitespace) {
        return None;
    }
    let base = pos.line_start();
    Some(ItemLine {
        list_type,
        marker: base + marker_start..base + marker_end,
        content: base + marker_end..pos.line_end(),
    })
}

fn match_unordered(pos: Position<'_>) -> Option<ItemLine> {
    let line = pos.current_line().as_bytes();
    let start = pos.indent();
    let dashes = marker_run(line, start, b'-');
    if !(MIN_MARKER_WIDTH..=MAX_MARKER_WIDTH).contains(&dashes) {
        return None;
    }
    item_line(pos, ListType::Unordered, start, start + dashes)
}

fn match_ordered(pos: Position<'_>) -> Option<ItemLine> {
    let text = pos.current_line();
    let line = text.as_bytes();
    let start = pos.indent();
    let digits = line[start..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    text[start..start + digits].parse::<u64>().ok()?;

    let dots = marker_run(line, start + digits, b'.');
    if !(MIN_MARKER_WIDTH..=MAX_MARKER_WIDTH).contains(&dots) {
        return None;
    }
    item_line(pos, ListType::Ordered, start, start + digits + dots)
}

/// Match a list item, trying `preferred` first.
pub(crate) fn match_item(pos: Position<'_>, preferred: ListType) -> Option<ItemLine> {
    let try_type = |list_type| match list_type {
        ListType::Unordered => match_unordered(pos),
        ListType::Ordered => match_ordered(pos),
    };
    try_type(preferred).or_else(|| try_type(preferred.other()))
}

#[derive(Debug)]
pub(crate) struct ListMatcher;

impl BlockMatcher for ListMatcher {
    fn try_open(
        &self,
        pos: Position<'_>,
        holder: &mut ProductionHolder,
    ) -> Result<Option<Block>, ParseError> {
        match match_item(pos, ListType::Unordered) {
            Some(item) => Ok(Some(Block::List(ListBlock::open(item, pos, holder)?))),
            None => Ok(None),
        }
    }

    fn interrupts_paragraph(&self, pos: Position<'_>) -> bool {
        match_item(pos, ListType::Unordered).is_some()
    }
}

/// One open nesting level below the outer list.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListFrame {
    level: usize,
    list_type: ListType,
    range: Range<usize>,
}

#[derive(Debug)]
pub(crate) struct ListBlock {
    marker: Marker,
    list_type: ListType,
    current_level: usize,
    /// Shallow to deep; `frames.len() == current_level`.
    frames: Vec<ListFrame>,
    end: usize,
}

impl ListBlock {
    fn open(
        item: ItemLine,
        pos: Position<'_>,
        holder: &mut ProductionHolder,
    ) -> Result<Self, ParseError> {
        let level = item.level(pos.original_text())?;
        log::debug!(
            "{:?} at {} opening at level {level}",
            item.list_type.outer_kind(),
            item.marker.start
        );

        // Opening below level 0 opens every level above it on the same item.
        let frames = (1..=level)
            .map(|level| ListFrame {
                level,
                list_type: item.list_type,
                range: item.marker.start..item.content.end,
            })
            .collect();

        let block = Self {
            marker: holder.mark(item.marker.start),
            list_type: item.list_type,
            current_level: level,
            frames,
            end: item.content.end,
        };
        record_item(&item, holder);
        Ok(block)
    }

    pub(crate) fn advance<'a>(
        &mut self,
        line_end: Position<'a>,
        holder: &mut ProductionHolder,
    ) -> Result<Step<'a>, ParseError> {
        let next_item = line_end
            .next_line()
            .and_then(|next| match_item(next, self.list_type).map(|item| (next, item)));
        let Some((next, item)) = next_item else {
            self.close_levels(0, None, holder);
            return Ok(Step::Done);
        };

        let level = item.level(next.original_text())?;
        match level.cmp(&self.current_level) {
            Ordering::Equal => {
                // Nested frames may hold the other type; a same-level item
                // is measured against the list itself.
                if item.list_type != self.list_type {
                    self.close_levels(0, None, holder);
                    return Ok(Step::Done);
                }
                if let Some(top) = self.frames.last_mut() {
                    top.range.end = item.content.end;
                }
            }
            Ordering::Greater => {
                if level != self.current_level + 1 {
                    return Err(ParseError::ListLevelSkip {
                        from: self.current_level,
                        to: level,
                        offset: item.marker.start,
                    });
                }
                self.frames.push(ListFrame {
                    level,
                    list_type: item.list_type,
                    range: item.marker.start..item.content.end,
                });
                self.current_level = level;
            }
            Ordering::Less => self.close_levels(level, Some(item.content.end), holder),
        }
        debug_assert_eq!(self.frames.len(), self.current_level);

        record_item(&item, holder);
        self.end = item.content.end;
        Ok(Step::Continue(next))
    }

    /// Pop frames deeper than `to_level`, recording each as a nested list.
    ///
    /// Every popped list ends where the deepest one does. The remaining top
    /// frame is extended to `item_end` when given.
    fn close_levels(
        &mut self,
        to_level: usize,
        item_end: Option<usize>,
        holder: &mut ProductionHolder,
    ) {
        let mut popped_end = None;
        while self.frames.last().is_some_and(|top| top.level != to_level) {
            if let Some(frame) = self.frames.pop() {
                let end = *popped_end.get_or_insert(frame.range.end);
                holder.add(frame.list_type.nested_kind(), frame.range.start..end);
            }
        }
        if let (Some(top), Some(end)) = (self.frames.last_mut(), item_end) {
            top.range.end = end;
        }
        self.current_level = to_level;
    }

    pub(crate) fn close(mut self, holder: &mut ProductionHolder) {
        self.close_levels(0, None, holder);
        let kind = self.list_type.outer_kind();
        self.marker.complete(holder, kind, self.end);
    }
}

fn record_item(item: &ItemLine, holder: &mut ProductionHolder) {
    holder.add(SyntaxKind::LIST_ITEM_MARKER, item.marker.clone());
    holder.add(SyntaxKind::LIST_ITEM_CONTENT, item.content.clone());
    holder.add(SyntaxKind::LIST_ITEM, item.marker.start..item.content.end);
}
