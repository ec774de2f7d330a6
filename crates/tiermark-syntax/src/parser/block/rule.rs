use std::ops::Range;

use super::{Block, BlockMatcher};
use crate::cursor::Position;
use crate::error::ParseError;
use crate::parser::production::{Marker, ProductionHolder};
use crate::syntax_kind::SyntaxKind;

const RULE_DASHES: usize = 5;

/// Exactly five dashes, nothing but whitespace around them.
pub(crate) fn match_rule(pos: Position<'_>) -> Option<Range<usize>> {
    let line = pos.current_line().as_bytes();
    let start = pos.indent();
    let mut offset = start;

    while offset < line.len() && line[offset] == b'-' && offset - start < RULE_DASHES {
        offset += 1;
    }

    if offset - start != RULE_DASHES || !line[offset..].iter().all(u8::is_ascii_whitespace) {
        return None;
    }

    let base = pos.line_start();
    Some(base + start..base + offset)
}

#[derive(Debug)]
pub(crate) struct RuleMatcher;

impl BlockMatcher for RuleMatcher {
    fn try_open(
        &self,
        pos: Position<'_>,
        holder: &mut ProductionHolder,
    ) -> Result<Option<Block>, ParseError> {
        let Some(dashes) = match_rule(pos) else {
            return Ok(None);
        };
        log::debug!("HORIZONTAL_RULE at {}", dashes.start);

        let marker = holder.mark(dashes.start);
        holder.add(SyntaxKind::RULE_MARKER, dashes);

        Ok(Some(Block::Rule(RuleBlock {
            marker,
            end: pos.line_end(),
        })))
    }

    fn interrupts_paragraph(&self, pos: Position<'_>) -> bool {
        match_rule(pos).is_some()
    }
}

#[derive(Debug)]
pub(crate) struct RuleBlock {
    marker: Marker,
    end: usize,
}

impl RuleBlock {
    pub(crate) fn close(self, holder: &mut ProductionHolder) {
        self.marker
            .complete(holder, SyntaxKind::HORIZONTAL_RULE, self.end);
    }
}
