//! # Parser - From Lines to a Lossless Tree
//!
//! Parsing happens in three passes:
//!
//! 1. **Blocks** (`block` module): the source is walked line by
//!    line and block matchers record flat [`Production`]s, `(kind, range)`
//!    pairs, into a [`ProductionHolder`].
//! 2. **Assembly**: productions are folded into a tree by containment and
//!    turned into a flat list of [`Event`]s. Heading content, paragraphs and
//!    list item content are re-lexed and run through the inline delimiter
//!    matcher on the way.
//! 3. **Sink** ([`sink`] module): events become a Rowan green tree.
//!
//! ## The Marker System
//!
//! Block matchers often know where a node starts long before they know where
//! it ends (a list keeps growing until a line doesn't continue it). They take
//! a [`Marker`] at the start and complete it once the end is known:
//!
//! ```ignore
//! let m = holder.mark(start);            // remember the start
//! holder.add(SyntaxKind::LIST_ITEM, ..); // children are recorded first
//! m.complete(holder, SyntaxKind::UNORDERED_LIST, end);
//! ```
//!
//! Because the enclosing node is recorded after its children, a node and a
//! child with the same range still nest the right way round.
//!
//! ## Strict and Lenient
//!
//! [`ParseMode::Strict`] reports every [`ParseError`]. [`ParseMode::Lenient`]
//! never fails except on cancellation: a block-level error turns the whole
//! document into a single paragraph of text, an inline error turns just that
//! span into text.
//!
//! ```
//! use tiermark_syntax::{ParseError, Parser, ParserConfig};
//!
//! let strict = Parser::new(ParserConfig::strict());
//! assert!(matches!(
//!     strict.parse("-- a\n---- c\n"),
//!     Err(ParseError::ListLevelSkip { from: 0, to: 2, .. })
//! ));
//!
//! let lenient = Parser::new(ParserConfig::lenient());
//! let tree = lenient.parse("-- a\n---- c\n").unwrap();
//! assert_eq!(tree.text().to_string(), "-- a\n---- c\n");
//! ```

pub mod event;
pub mod production;
pub mod sink;

mod assemble;
mod block;
mod inline;

use rowan::GreenNode;

use crate::cancel::CancellationToken;
use crate::error::ParseError;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use assemble::Assembler;
use event::Event;
use production::ProductionHolder;
use sink::Sink;

pub use production::{Marker, Production};

/// How the parser deals with internal errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Every error is returned to the caller.
    #[default]
    Strict,
    /// Errors degrade to plain text; only cancellation is returned.
    Lenient,
}

/// Options for one [`Parser`].
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    pub mode: ParseMode,
    pub cancellation: CancellationToken,
}

impl ParserConfig {
    pub fn strict() -> Self {
        Self {
            mode: ParseMode::Strict,
            ..Self::default()
        }
    }

    pub fn lenient() -> Self {
        Self {
            mode: ParseMode::Lenient,
            ..Self::default()
        }
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }
}

/// Parses tiermark source into a lossless syntax tree.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `source` into a tree whose text is exactly `source`.
    pub fn parse(&self, source: &str) -> Result<SyntaxNode, ParseError> {
        self.parse_green(source).map(SyntaxNode::new_root)
    }

    /// Like [`Parser::parse`], returning the `Send + Sync` green tree.
    pub fn parse_green(&self, source: &str) -> Result<GreenNode, ParseError> {
        match self.build(source) {
            Ok(green) => Ok(green),
            Err(ParseError::Cancelled) => Err(ParseError::Cancelled),
            Err(err) if self.config.mode == ParseMode::Lenient => {
                log::warn!("falling back to a plain paragraph: {err}");
                Ok(fallback_tree(source))
            }
            Err(err) => Err(err),
        }
    }

    fn build(&self, source: &str) -> Result<GreenNode, ParseError> {
        let mut holder = ProductionHolder::new();
        let root = holder.mark(0);
        block::process(source, &mut holder, &self.config.cancellation)?;
        root.complete(&mut holder, SyntaxKind::ROOT, source.len());
        log::debug!("{} productions for {} bytes", holder.len(), source.len());

        let events = Assembler::new(source, self.config.mode).assemble(holder.productions())?;
        Ok(Sink::new(source, events).finish())
    }
}

/// `ROOT > PARAGRAPH > TEXT` over the whole source.
fn fallback_tree(source: &str) -> GreenNode {
    let mut events = vec![
        Event::start(SyntaxKind::ROOT),
        Event::start(SyntaxKind::PARAGRAPH),
    ];
    if !source.is_empty() {
        events.push(Event::token(SyntaxKind::TEXT, 0..source.len()));
    }
    events.extend([Event::Finish, Event::Finish]);
    Sink::new(source, events).finish()
}

/// Parse source text into a lossless syntax tree.
///
/// This is lenient: malformed input degrades to text instead of failing.
pub fn parse(source: &str) -> SyntaxNode {
    match Parser::new(ParserConfig::lenient()).parse_green(source) {
        Ok(green) => SyntaxNode::new_root(green),
        Err(err) => {
            log::warn!("parse failed: {err}");
            SyntaxNode::new_root(fallback_tree(source))
        }
    }
}
