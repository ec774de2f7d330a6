//! # Inline content
//!
//! Heading content, paragraphs and list item content are re-lexed and run
//! through the delimiter matcher. The result is a flat token list plus inline
//! productions over token indices, which the assembler nests into the host
//! node.
//!
//! Whitespace is normalised on the way: leading and trailing whitespace is
//! handed back to the enclosing node, each inner whitespace run becomes a
//! single `WHITESPACE` token, and a run containing a line ending becomes a
//! single `LINE_BREAK`.

mod delimiter;

use std::ops::Range;

use crate::error::ParseError;
use crate::lexer::lex_with_spans;
use crate::parser::production::Production;
use crate::syntax_kind::SyntaxKind;

use delimiter::{DELIMITER_PARSERS, InlineMatch, balance};

/// A token of inline content, by absolute byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InlineToken {
    pub kind: SyntaxKind,
    pub range: Range<usize>,
}

/// Parsed inline content of one host span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InlineContent {
    /// Whitespace in front of the content, left to the enclosing node.
    pub leading: Range<usize>,
    pub tokens: Vec<InlineToken>,
    /// Inline nodes as token index ranges.
    pub nodes: Vec<Production>,
    /// Whitespace after the content, left to the enclosing node.
    pub trailing: Range<usize>,
}

pub(crate) fn parse_inline(source: &str, span: Range<usize>) -> Result<InlineContent, ParseError> {
    let raw: Vec<InlineToken> = lex_with_spans(&source[span.clone()])
        .into_iter()
        .map(|(token, range)| InlineToken {
            kind: token.kind,
            range: span.start + range.start..span.start + range.end,
        })
        .collect();

    let Some(first) = raw.iter().position(|t| !t.kind.is_trivia()) else {
        return Ok(InlineContent {
            leading: span.clone(),
            tokens: Vec::new(),
            nodes: Vec::new(),
            trailing: span.end..span.end,
        });
    };
    let last = raw
        .iter()
        .rposition(|t| !t.kind.is_trivia())
        .unwrap_or(first);

    let leading = span.start..raw[first].range.start;
    let trailing = raw[last].range.end..span.end;
    let mut tokens = collapse_whitespace(&raw[first..=last]);

    let matches = drop_crossing(match_delimiters(source, &tokens, &span)?);
    for found in &matches {
        for index in found.open.clone().chain(found.close.clone()) {
            tokens[index].kind = SyntaxKind::DELIMITER;
        }
    }
    let nodes = matches
        .iter()
        .map(|found| Production::new(found.kind, found.range()))
        .collect();

    Ok(InlineContent {
        leading,
        tokens,
        nodes,
        trailing,
    })
}

fn collapse_whitespace(tokens: &[InlineToken]) -> Vec<InlineToken> {
    let mut result: Vec<InlineToken> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !token.kind.is_trivia() {
            result.push(token.clone());
            continue;
        }
        let breaks = token.kind == SyntaxKind::NEWLINE;
        match result.last_mut() {
            Some(previous) if previous.kind.is_trivia() => {
                previous.range.end = token.range.end;
                if breaks {
                    previous.kind = SyntaxKind::LINE_BREAK;
                }
            }
            _ => result.push(InlineToken {
                kind: if breaks {
                    SyntaxKind::LINE_BREAK
                } else {
                    SyntaxKind::WHITESPACE
                },
                range: token.range.clone(),
            }),
        }
    }
    result
}

fn match_delimiters(
    source: &str,
    tokens: &[InlineToken],
    span: &Range<usize>,
) -> Result<Vec<InlineMatch>, ParseError> {
    let mut delimiters = Vec::new();
    let mut index = 0;
    while index < tokens.len() {
        let consumed = DELIMITER_PARSERS
            .iter()
            .map(|parser| parser.scan(source, tokens, index, &mut delimiters))
            .find(|&n| n > 0)
            .unwrap_or(1);
        index += consumed;
    }

    balance(&mut delimiters);

    let mut matches = Vec::new();
    for parser in &DELIMITER_PARSERS {
        parser.process(&delimiters, span, &mut matches)?;
    }
    Ok(matches)
}

/// Keep matches that nest; of two crossing matches the earlier one wins.
fn drop_crossing(mut matches: Vec<InlineMatch>) -> Vec<InlineMatch> {
    matches.sort_by(|a, b| {
        a.open
            .start
            .cmp(&b.open.start)
            .then(b.close.end.cmp(&a.close.end))
    });

    // Ranges of accepted matches that enclose the current position,
    // innermost last.
    let mut open: Vec<Range<usize>> = Vec::new();
    let mut accepted: Vec<InlineMatch> = Vec::with_capacity(matches.len());
    for candidate in matches {
        let range = candidate.range();
        while open.last().is_some_and(|kept| kept.end <= range.start) {
            open.pop();
        }
        if open.last().is_some_and(|kept| kept.end < range.end) {
            log::debug!("dropping {:?}@{range:?}, crosses an earlier match", candidate.kind);
        } else {
            open.push(range);
            accepted.push(candidate);
        }
    }
    accepted
}
