use super::{Block, BlockMatcher, Step};
use crate::cursor::Position;
use crate::error::ParseError;
use crate::parser::production::{Marker, ProductionHolder};
use crate::syntax_kind::SyntaxKind;

/// Fallback matcher: any non-blank line starts a paragraph.
#[derive(Debug)]
pub(crate) struct ParagraphMatcher;

impl BlockMatcher for ParagraphMatcher {
    fn try_open(
        &self,
        pos: Position<'_>,
        holder: &mut ProductionHolder,
    ) -> Result<Option<Block>, ParseError> {
        if pos.is_blank() {
            return Ok(None);
        }
        let start = pos.line_start() + pos.indent();
        log::debug!("PARAGRAPH at {start}");

        Ok(Some(Block::Paragraph(ParagraphBlock {
            marker: holder.mark(start),
            end: pos.trimmed_line_end(),
        })))
    }

    fn interrupts_paragraph(&self, _pos: Position<'_>) -> bool {
        false
    }
}

/// An open paragraph. Its span runs from the first non-blank byte to the
/// last non-blank byte of its final line.
#[derive(Debug)]
pub(crate) struct ParagraphBlock {
    marker: Marker,
    end: usize,
}

impl ParagraphBlock {
    /// Continue onto the next line unless it is blank, missing, or claimed by
    /// one of `interrupters`.
    pub(crate) fn advance<'a>(
        &mut self,
        line_end: Position<'a>,
        interrupters: &[&dyn BlockMatcher],
    ) -> Step<'a> {
        let Some(next) = line_end.next_line() else {
            return Step::Done;
        };
        if next.is_blank() || interrupters.iter().any(|m| m.interrupts_paragraph(next)) {
            return Step::Done;
        }
        self.end = next.trimmed_line_end();
        Step::Continue(next)
    }

    pub(crate) fn close(self, holder: &mut ProductionHolder) {
        self.marker.complete(holder, SyntaxKind::PARAGRAPH, self.end);
    }
}
