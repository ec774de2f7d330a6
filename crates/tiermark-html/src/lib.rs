//! # tiermark-html
//!
//! Renders a tiermark syntax tree to HTML.
//!
//! ```
//! use tiermark_html::{HtmlOptions, render};
//!
//! let tree = tiermark_syntax::parse("## Title\n-- one\n--- nested\n");
//! let html = render(&tree, &HtmlOptions { wrap_body: false, ..HtmlOptions::default() });
//! assert_eq!(
//!     html,
//!     "<h1>Title</h1>\
//!      <ul style=\"margin-block-start:16px;margin-block-end:16px\">\
//!      <li>one</li><ul><li>nested</li></ul></ul>"
//! );
//! ```
//!
//! Only the outermost lists carry margins (and, for ordered lists, a start
//! number); nested lists render bare. Marker tokens that the parser matched
//! as delimiters are dropped, unmatched ones are kept as text.

use tiermark_syntax::ast::{Heading, List, ListItem};
use tiermark_syntax::{ParseError, Parser, ParserConfig, SyntaxElement, SyntaxKind, SyntaxNode};

/// Knobs for [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Vertical margin in pixels around paragraphs, rules and outer lists.
    pub margin: u32,
    /// Wrap the output in `<body>…</body>`.
    pub wrap_body: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            margin: 16,
            wrap_body: true,
        }
    }
}

/// Render a tree produced by [`tiermark_syntax::parse`] or [`Parser::parse`].
pub fn render(root: &SyntaxNode, options: &HtmlOptions) -> String {
    let mut writer = HtmlWriter::new(options);
    writer.block(root);
    log::debug!(
        "rendered {} source bytes into {} bytes of html",
        usize::from(root.text_range().len()),
        writer.buffer.len()
    );
    writer.buffer
}

/// Parse `source` with `config` and render the result.
pub fn markdown_to_html(
    source: &str,
    config: &ParserConfig,
    options: &HtmlOptions,
) -> Result<String, ParseError> {
    let tree = Parser::new(config.clone()).parse(source)?;
    Ok(render(&tree, options))
}

struct HtmlWriter<'o> {
    buffer: String,
    options: &'o HtmlOptions,
}

impl<'o> HtmlWriter<'o> {
    fn new(options: &'o HtmlOptions) -> Self {
        Self {
            buffer: String::new(),
            options,
        }
    }

    fn write_opening_tag(&mut self, tag: &str, attributes: Option<&str>) {
        self.buffer.push('<');
        self.buffer.push_str(tag);
        if let Some(attributes) = attributes {
            self.buffer.push(' ');
            self.buffer.push_str(attributes);
        }
        self.buffer.push('>');
    }

    fn write_closing_tag(&mut self, tag: &str) {
        self.buffer.push_str("</");
        self.buffer.push_str(tag);
        self.buffer.push('>');
    }

    fn write_text(&mut self, text: &str) {
        html_escape::encode_text_to_string(text, &mut self.buffer);
    }

    fn list_style(&self) -> String {
        let margin = self.options.margin;
        format!("style=\"margin-block-start:{margin}px;margin-block-end:{margin}px\"")
    }

    /// Block-level nodes. Tokens directly under them are layout (markers,
    /// indentation, line endings) and produce no output.
    fn block(&mut self, node: &SyntaxNode) {
        let margin = self.options.margin;
        match node.kind() {
            SyntaxKind::ROOT => {
                if self.options.wrap_body {
                    self.write_opening_tag("body", None);
                }
                self.block_children(node);
                if self.options.wrap_body {
                    self.write_closing_tag("body");
                }
            }
            SyntaxKind::PARAGRAPH => {
                self.write_opening_tag("p", Some(&format!("style=\"margin:{margin}px 0\"")));
                self.inline_children(node);
                self.write_closing_tag("p");
            }
            SyntaxKind::HORIZONTAL_RULE => self.write_opening_tag(
                "hr",
                Some(&format!(
                    "style=\"margin:{margin}px 0;height:2px;border:none;color:#333;background-color:#333;\""
                )),
            ),
            kind if kind.is_list() => {
                if let Some(list) = List::cast(node.clone()) {
                    self.list(&list);
                }
            }
            _ => {
                if let Some(heading) = Heading::cast(node.clone()) {
                    self.heading(&heading);
                } else if let Some(item) = ListItem::cast(node.clone()) {
                    self.list_item(&item);
                } else {
                    log::trace!("no html for {:?}", node.kind());
                }
            }
        }
    }

    fn block_children(&mut self, node: &SyntaxNode) {
        for child in node.children() {
            self.block(&child);
        }
    }

    fn heading(&mut self, heading: &Heading) {
        let tag = format!("h{}", heading.level());
        self.write_opening_tag(&tag, None);
        if let Some(content) = heading.content() {
            self.inline_children(&content);
        }
        self.write_closing_tag(&tag);
    }

    fn list(&mut self, list: &List) {
        let tag = if list.is_ordered() { "ol" } else { "ul" };
        let attributes = match (list.is_nested(), list.is_ordered()) {
            (true, _) => None,
            (false, false) => Some(self.list_style()),
            (false, true) => Some(format!(
                "start=\"{}\" {}",
                list.start_number().unwrap_or(1),
                self.list_style()
            )),
        };
        self.write_opening_tag(tag, attributes.as_deref());
        self.block_children(list.syntax());
        self.write_closing_tag(tag);
    }

    fn list_item(&mut self, item: &ListItem) {
        self.write_opening_tag("li", None);
        if let Some(content) = item.content() {
            self.inline_children(&content);
        }
        self.write_closing_tag("li");
    }

    fn inline_children(&mut self, node: &SyntaxNode) {
        for child in node.children_with_tokens() {
            self.inline(child);
        }
    }

    fn inline(&mut self, element: SyntaxElement) {
        match element {
            SyntaxElement::Node(node) => {
                let tag = match node.kind() {
                    SyntaxKind::STRONG => "b",
                    SyntaxKind::ITALIC => "i",
                    SyntaxKind::STRIKETHROUGH => "del",
                    SyntaxKind::UNDERLINE => "u",
                    other => {
                        log::trace!("unexpected {other:?} in inline content");
                        return self.inline_children(&node);
                    }
                };
                self.write_opening_tag(tag, None);
                self.inline_children(&node);
                self.write_closing_tag(tag);
            }
            SyntaxElement::Token(token) => match token.kind() {
                SyntaxKind::DELIMITER => {}
                SyntaxKind::WHITESPACE => self.buffer.push(' '),
                SyntaxKind::LINE_BREAK => self.write_opening_tag("br", None),
                _ => self.write_text(token.text()),
            },
        }
    }
}
