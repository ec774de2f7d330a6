//! Sink for converting parser events into a Rowan green tree.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::parser::event::Event;
use crate::syntax_kind::SyntaxKind;

/// Converts events into a Rowan green tree, slicing token text from the source.
pub struct Sink<'input> {
    builder: GreenNodeBuilder<'static>,
    source: &'input str,
    cursor: usize,
    events: Vec<Event>,
}

impl<'input> Sink<'input> {
    /// Create a new sink.
    pub fn new(source: &'input str, events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            source,
            cursor: 0,
            events,
        }
    }

    /// Consume the sink and build the green tree.
    pub fn finish(mut self) -> GreenNode {
        for event in std::mem::take(&mut self.events) {
            match event {
                Event::Start { kind } => self.builder.start_node(kind.into()),
                Event::Token { kind, range } => self.token(kind, range),
                Event::Finish => self.builder.finish_node(),
            }
        }
        debug_assert_eq!(self.cursor, self.source.len(), "source not fully covered");
        self.builder.finish()
    }

    fn token(&mut self, kind: SyntaxKind, range: std::ops::Range<usize>) {
        debug_assert_eq!(range.start, self.cursor, "gap or overlap before {kind:?}");
        self.cursor = range.end;
        self.builder.token(kind.into(), &self.source[range]);
    }
}
