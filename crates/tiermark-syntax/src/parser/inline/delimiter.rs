//! Delimiter runs and their matching.
//!
//! The four inline markers share one algorithm, parameterised by a
//! [`DelimiterParser`]:
//!
//! 1. **Scan**: every run of identical marker tokens pushes one
//!    [`Delimiter`] per character, flagged as a potential opener and/or
//!    closer by the flanking rule.
//! 2. **Balance**: closers, left to right, pair with the nearest preceding
//!    opener of the same marker that is still open. Everything between a
//!    pair stops being a potential opener.
//! 3. **Process**: pairs are visited right to left and widened over adjacent
//!    pairs of the same marker. One or two pairs produce a node; three or
//!    more are left as text.

use std::ops::Range;

use super::InlineToken;
use crate::error::ParseError;
use crate::syntax_kind::SyntaxKind;

/// Longest run counted as a single run.
pub(crate) const MAX_RUN: usize = 32;

/// Widening to this many pairs rejects the match.
const MAX_MATCHED_PAIRS: usize = 3;

/// One marker kind: which token it scans and which node it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DelimiterParser {
    pub token_kind: SyntaxKind,
    pub node_kind: SyntaxKind,
    pub marker: char,
}

pub(crate) const DELIMITER_PARSERS: [DelimiterParser; 4] = [
    DelimiterParser {
        token_kind: SyntaxKind::STAR,
        node_kind: SyntaxKind::STRONG,
        marker: '*',
    },
    DelimiterParser {
        token_kind: SyntaxKind::UNDERSCORE,
        node_kind: SyntaxKind::ITALIC,
        marker: '_',
    },
    DelimiterParser {
        token_kind: SyntaxKind::TILDE,
        node_kind: SyntaxKind::STRIKETHROUGH,
        marker: '~',
    },
    DelimiterParser {
        token_kind: SyntaxKind::PLUS,
        node_kind: SyntaxKind::UNDERLINE,
        marker: '+',
    },
];

/// One marker character of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Delimiter {
    pub token_kind: SyntaxKind,
    /// Index of the marker token.
    pub position: usize,
    pub can_open: bool,
    pub can_close: bool,
    pub marker: char,
    /// Index of the paired closer in the delimiter list.
    pub closer_index: Option<usize>,
    run: usize,
}

/// A matched pair, as token index ranges of the opening and closing markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InlineMatch {
    pub kind: SyntaxKind,
    pub open: Range<usize>,
    pub close: Range<usize>,
}

impl InlineMatch {
    pub fn range(&self) -> Range<usize> {
        self.open.start..self.close.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Punctuation,
    Other,
}

fn classify(c: Option<char>) -> CharClass {
    match c {
        None => CharClass::Whitespace,
        Some(c) if c.is_whitespace() => CharClass::Whitespace,
        Some(c) if c.is_ascii_punctuation() => CharClass::Punctuation,
        Some(_) => CharClass::Other,
    }
}

fn class_before(source: &str, token: Option<&InlineToken>) -> CharClass {
    match token {
        Some(t) if !t.kind.is_trivia() => classify(source[t.range.clone()].chars().next_back()),
        _ => CharClass::Whitespace,
    }
}

fn class_after(source: &str, token: Option<&InlineToken>) -> CharClass {
    match token {
        Some(t) if !t.kind.is_trivia() => classify(source[t.range.clone()].chars().next()),
        _ => CharClass::Whitespace,
    }
}

/// Opener/closer eligibility of a run from its neighbours.
fn flanking(before: CharClass, after: CharClass) -> (bool, bool) {
    let left = after != CharClass::Whitespace
        && (after != CharClass::Punctuation || before != CharClass::Other);
    let right = before != CharClass::Whitespace
        && (before != CharClass::Punctuation || after != CharClass::Other);
    (left, right)
}

impl DelimiterParser {
    /// Push a delimiter for every marker in the run starting at `index`.
    ///
    /// Returns how many tokens the run covers, zero when `index` is not this
    /// parser's marker.
    pub fn scan(
        &self,
        source: &str,
        tokens: &[InlineToken],
        index: usize,
        delimiters: &mut Vec<Delimiter>,
    ) -> usize {
        if tokens.get(index).is_none_or(|t| t.kind != self.token_kind) {
            return 0;
        }
        let len = tokens[index..]
            .iter()
            .take(MAX_RUN)
            .take_while(|t| t.kind == self.token_kind)
            .count();

        let before = class_before(source, index.checked_sub(1).map(|i| &tokens[i]));
        let after = class_after(source, tokens.get(index + len));
        let (can_open, can_close) = flanking(before, after);
        let run = index;

        delimiters.extend((index..index + len).map(|position| Delimiter {
            token_kind: self.token_kind,
            position,
            can_open,
            can_close,
            marker: self.marker,
            closer_index: None,
            run,
        }));
        len
    }

    /// Turn this parser's balanced pairs into matches.
    pub fn process(
        &self,
        delimiters: &[Delimiter],
        span: &Range<usize>,
        matches: &mut Vec<InlineMatch>,
    ) -> Result<(), ParseError> {
        let mut index = delimiters.len();
        while index > 0 {
            index -= 1;
            let opener = &delimiters[index];
            if opener.token_kind != self.token_kind {
                continue;
            }
            let Some(closer) = opener.closer_index else {
                continue;
            };
            let closing = delimiters.get(closer).ok_or(ParseError::Inline {
                range: span.clone(),
                reason: "closer index out of range",
            })?;
            if closing.position <= opener.position || closing.marker != self.marker {
                return Err(ParseError::Inline {
                    range: span.clone(),
                    reason: "closer does not follow its opener",
                });
            }

            let (mut opener_index, mut closer_index) = (index, closer);
            let mut pairs = 1;
            while adjacent_pair(delimiters, opener_index, closer_index) {
                opener_index -= 1;
                closer_index += 1;
                pairs += 1;
            }

            if pairs < MAX_MATCHED_PAIRS {
                matches.push(InlineMatch {
                    kind: self.node_kind,
                    open: delimiters[opener_index].position..opener.position + 1,
                    close: closing.position..delimiters[closer_index].position + 1,
                });
            } else {
                log::trace!("{pairs} adjacent {:?} pairs left as text", self.marker);
            }
            index = opener_index;
        }
        Ok(())
    }
}

/// Whether the pair around `opener..=closer` widens by one on each side.
fn adjacent_pair(delimiters: &[Delimiter], opener: usize, closer: usize) -> bool {
    let Some(outer_opener) = opener.checked_sub(1).map(|i| &delimiters[i]) else {
        return false;
    };
    let Some(outer_closer) = delimiters.get(closer + 1) else {
        return false;
    };
    outer_opener.closer_index == Some(closer + 1)
        && outer_opener.marker == delimiters[opener].marker
        && outer_opener.position + 1 == delimiters[opener].position
        && outer_closer.position == delimiters[closer].position + 1
}

/// Pair closers with openers across all markers.
///
/// Open candidates sit on one stack per marker. Pairing a closer drops its
/// opener and every later candidate from all stacks, so each delimiter is
/// pushed and popped at most once. Entries sharing the closer's run are
/// skipped in place; there are fewer than [`MAX_RUN`] of them.
pub(crate) fn balance(delimiters: &mut [Delimiter]) {
    let mut openers: [Vec<usize>; DELIMITER_PARSERS.len()] = Default::default();

    for index in 0..delimiters.len() {
        let marker = delimiters[index].marker;
        let Some(slot) = DELIMITER_PARSERS.iter().position(|p| p.marker == marker) else {
            continue;
        };

        if delimiters[index].can_close {
            let run = delimiters[index].run;
            let opener = openers[slot]
                .iter()
                .rev()
                .copied()
                .find(|&i| delimiters[i].run != run);
            if let Some(opener) = opener {
                delimiters[opener].closer_index = Some(index);
                for stack in &mut openers {
                    while stack.last().is_some_and(|&i| i >= opener) {
                        stack.pop();
                    }
                }
                continue;
            }
        }

        if delimiters[index].can_open {
            openers[slot].push(index);
        }
    }
}
