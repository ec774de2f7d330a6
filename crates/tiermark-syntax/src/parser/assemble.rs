//! Productions to events.
//!
//! Block productions are folded into a tree by containment and walked in
//! document order. Bytes no production covers (blank lines, indentation,
//! line endings between blocks) are lexed into gap tokens of the enclosing
//! node, so the resulting tree always reproduces the source exactly.
//!
//! Inline-bearing nodes are not walked: their span is handed to the inline
//! parser and its tokens and nodes are emitted in their place.

use std::ops::Range;

use crate::error::ParseError;
use crate::lexer::lex_with_spans;
use crate::parser::ParseMode;
use crate::parser::event::Event;
use crate::parser::inline::{InlineContent, InlineToken, parse_inline};
use crate::parser::production::{Folded, Production, fold};
use crate::syntax_kind::SyntaxKind;

pub(crate) struct Assembler<'a> {
    source: &'a str,
    mode: ParseMode,
    events: Vec<Event>,
}

impl<'a> Assembler<'a> {
    pub(crate) fn new(source: &'a str, mode: ParseMode) -> Self {
        Self {
            source,
            mode,
            events: Vec::new(),
        }
    }

    pub(crate) fn assemble(mut self, productions: &[Production]) -> Result<Vec<Event>, ParseError> {
        let folded = fold(productions).map_err(|crossing| ParseError::MalformedProductions {
            outer: crossing.outer.kind,
            outer_range: crossing.outer.range,
            inner: crossing.inner.kind,
            inner_range: crossing.inner.range,
        })?;

        let mut cursor = 0;
        for &root in &folded.roots {
            let range = folded.nodes[root].range.clone();
            push_gap(self.source, cursor..range.start, &mut self.events);
            self.node(&folded, root)?;
            cursor = range.end;
        }
        push_gap(self.source, cursor..self.source.len(), &mut self.events);

        Ok(self.events)
    }

    fn node(&mut self, folded: &Folded, id: usize) -> Result<(), ParseError> {
        let node = &folded.nodes[id];
        if node.kind.is_token() {
            self.events.push(Event::token(node.kind, node.range.clone()));
            return Ok(());
        }
        if node.kind.is_inline_host() {
            return self.inline_host(node.kind, node.range.clone());
        }

        self.events.push(Event::start(node.kind));
        let mut cursor = node.range.start;
        for &child in &node.children {
            let range = folded.nodes[child].range.clone();
            push_gap(self.source, cursor..range.start, &mut self.events);
            self.node(folded, child)?;
            cursor = range.end;
        }
        push_gap(self.source, cursor..node.range.end, &mut self.events);
        self.events.push(Event::Finish);
        Ok(())
    }

    fn inline_host(&mut self, kind: SyntaxKind, range: Range<usize>) -> Result<(), ParseError> {
        match inline_events(self.source, kind, range.clone()) {
            Ok(events) => {
                self.events.extend(events);
                Ok(())
            }
            Err(err) if self.mode == ParseMode::Lenient => {
                log::warn!("{kind:?}@{range:?} kept as plain text: {err}");
                self.events.push(Event::start(kind));
                self.events.push(Event::token(SyntaxKind::TEXT, range));
                self.events.push(Event::Finish);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

fn inline_events(
    source: &str,
    kind: SyntaxKind,
    range: Range<usize>,
) -> Result<Vec<Event>, ParseError> {
    let InlineContent {
        leading,
        tokens,
        nodes,
        trailing,
    } = parse_inline(source, range.clone())?;
    let folded = fold(&nodes).map_err(|_| ParseError::Inline {
        range,
        reason: "inline matches cross",
    })?;

    let mut events = Vec::with_capacity(tokens.len() + 2 * nodes.len() + 4);
    push_gap(source, leading, &mut events);
    events.push(Event::start(kind));
    let mut cursor = 0;
    for &root in &folded.roots {
        let span = folded.nodes[root].range.clone();
        push_tokens(&tokens[cursor..span.start], &mut events);
        push_inline_node(&folded, root, &tokens, &mut events);
        cursor = span.end;
    }
    push_tokens(&tokens[cursor..], &mut events);
    events.push(Event::Finish);
    push_gap(source, trailing, &mut events);

    Ok(events)
}

fn push_inline_node(folded: &Folded, id: usize, tokens: &[InlineToken], events: &mut Vec<Event>) {
    let node = &folded.nodes[id];
    events.push(Event::start(node.kind));
    let mut cursor = node.range.start;
    for &child in &node.children {
        let span = folded.nodes[child].range.clone();
        push_tokens(&tokens[cursor..span.start], events);
        push_inline_node(folded, child, tokens, events);
        cursor = span.end;
    }
    push_tokens(&tokens[cursor..node.range.end], events);
    events.push(Event::Finish);
}

fn push_tokens(tokens: &[InlineToken], events: &mut Vec<Event>) {
    events.extend(
        tokens
            .iter()
            .map(|token| Event::token(token.kind, token.range.clone())),
    );
}

/// Lex bytes not covered by any production into tokens.
fn push_gap(source: &str, range: Range<usize>, events: &mut Vec<Event>) {
    if range.is_empty() {
        return;
    }
    let base = range.start;
    events.extend(
        lex_with_spans(&source[range])
            .into_iter()
            .map(|(token, span)| Event::token(token.kind, base + span.start..base + span.end)),
    );
}
