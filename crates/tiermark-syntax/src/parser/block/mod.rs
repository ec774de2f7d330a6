//! # Block structure
//!
//! The dispatcher walks the source line by line. At the start of each
//! non-blank line it offers the line to the matchers in [`BLOCK_MATCHERS`]
//! order; the first one that accepts opens a [`Block`]. The open block is then
//! advanced at each line end until it reports [`Step::Done`], and closing it
//! records its own production.
//!
//! ```text
//! ## Title            → heading (single line)
//! -- one              ┐
//! --- nested          ├ list (multi-line, width-nested)
//! -- two              ┘
//! some text           ┐ paragraph, continues until a blank line
//! more text           ┘ or a line another matcher would open
//! -----               → horizontal rule (single line)
//! ```

mod heading;
mod list;
mod paragraph;
mod rule;

use crate::cancel::CancellationToken;
use crate::cursor::Position;
use crate::error::ParseError;
use crate::parser::production::ProductionHolder;

use heading::{HeadingBlock, HeadingMatcher};
use list::{ListBlock, ListMatcher};
use paragraph::{ParagraphBlock, ParagraphMatcher};
use rule::{RuleBlock, RuleMatcher};

/// Something that recognises the first line of a block.
pub(crate) trait BlockMatcher {
    /// Open a block when `pos` starts one, recording its line-local
    /// productions. `Ok(None)` means the line is not this matcher's.
    fn try_open(
        &self,
        pos: Position<'_>,
        holder: &mut ProductionHolder,
    ) -> Result<Option<Block>, ParseError>;

    /// Whether a line would end an open paragraph and start this block.
    fn interrupts_paragraph(&self, pos: Position<'_>) -> bool;
}

/// Matchers in priority order. The paragraph comes last and accepts any
/// non-blank line.
const BLOCK_MATCHERS: &[&dyn BlockMatcher] =
    &[&HeadingMatcher, &ListMatcher, &RuleMatcher, &ParagraphMatcher];

/// Matchers consulted when a paragraph decides whether to continue.
const PARAGRAPH_INTERRUPTERS: &[&dyn BlockMatcher] = &[&HeadingMatcher, &ListMatcher, &RuleMatcher];

/// A block opened by a matcher and not yet closed.
#[derive(Debug)]
pub(crate) enum Block {
    Heading(HeadingBlock),
    Rule(RuleBlock),
    List(ListBlock),
    Paragraph(ParagraphBlock),
}

/// What an open block wants after the line it last consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step<'a> {
    /// The block consumed this line as well.
    Continue(Position<'a>),
    /// The block ends here; the dispatcher looks at the next line afresh.
    Done,
}

impl Block {
    fn advance<'a>(
        &mut self,
        line_end: Position<'a>,
        holder: &mut ProductionHolder,
    ) -> Result<Step<'a>, ParseError> {
        match self {
            Block::Heading(_) | Block::Rule(_) => Ok(Step::Done),
            Block::List(list) => list.advance(line_end, holder),
            Block::Paragraph(paragraph) => Ok(paragraph.advance(line_end, PARAGRAPH_INTERRUPTERS)),
        }
    }

    fn close(self, holder: &mut ProductionHolder) {
        match self {
            Block::Heading(heading) => heading.close(holder),
            Block::Rule(rule) => rule.close(holder),
            Block::List(list) => list.close(holder),
            Block::Paragraph(paragraph) => paragraph.close(holder),
        }
    }
}

fn open_block(
    pos: Position<'_>,
    holder: &mut ProductionHolder,
) -> Result<Option<Block>, ParseError> {
    for matcher in BLOCK_MATCHERS {
        if let Some(block) = matcher.try_open(pos, holder)? {
            return Ok(Some(block));
        }
    }
    Ok(None)
}

/// Record the block productions of `source` into `holder`.
pub(crate) fn process(
    source: &str,
    holder: &mut ProductionHolder,
    cancellation: &CancellationToken,
) -> Result<(), ParseError> {
    let mut next = Position::start(source);

    while let Some(line) = next {
        cancellation.check()?;

        let Some(mut block) = open_block(line, holder)? else {
            next = line.next_line();
            continue;
        };

        let mut current = line;
        while let Step::Continue(following) = block.advance(current.line_end_position(), holder)? {
            cancellation.check()?;
            current = following;
        }
        block.close(holder);
        next = current.next_line();
    }

    Ok(())
}
