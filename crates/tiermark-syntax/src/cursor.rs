//! Line-oriented view over source text.
//!
//! Block recognition works one line at a time. A [`Position`] is an immutable
//! snapshot of "where we are": the current line, the absolute byte offset,
//! and enough information to step to the next line.

/// A position in the source text.
///
/// Lines exclude their terminator (`\n` or `\r\n`). A position sitting on the
/// terminator, or at the end of a final unterminated line, is "at line end"
/// and reports `None` from [`Position::offset_in_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position<'a> {
    text: &'a str,
    line_start: usize,
    line_end: usize,
    offset: usize,
}

impl<'a> Position<'a> {
    /// Position at the start of the first line, `None` for empty text.
    pub fn start(text: &'a str) -> Option<Self> {
        if text.is_empty() {
            None
        } else {
            Some(Self::line_at(text, 0))
        }
    }

    fn line_at(text: &'a str, line_start: usize) -> Self {
        let newline = text[line_start..]
            .find('\n')
            .map_or(text.len(), |i| line_start + i);
        let line_end = if newline < text.len()
            && newline > line_start
            && text.as_bytes()[newline - 1] == b'\r'
        {
            newline - 1
        } else {
            newline
        };
        Self {
            text,
            line_start,
            line_end,
            offset: line_start,
        }
    }

    /// The whole source text.
    pub fn original_text(&self) -> &'a str {
        self.text
    }

    /// Absolute byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Absolute byte offset of the first byte of the current line.
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    /// Absolute byte offset just past the current line's content.
    pub fn line_end(&self) -> usize {
        self.line_end
    }

    /// The current line without its terminator.
    pub fn current_line(&self) -> &'a str {
        &self.text[self.line_start..self.line_end]
    }

    /// Offset relative to the line start, `None` at line end.
    pub fn offset_in_line(&self) -> Option<usize> {
        (self.offset < self.line_end).then(|| self.offset - self.line_start)
    }

    /// Offset of the first byte of the next line, or the text length.
    pub fn next_line_or_eof_offset(&self) -> usize {
        let rest = &self.text[self.line_end..];
        if rest.starts_with("\r\n") {
            self.line_end + 2
        } else if rest.starts_with('\n') {
            self.line_end + 1
        } else {
            self.text.len()
        }
    }

    /// Start of the next line, `None` when the current line is the last one.
    ///
    /// A trailing terminator does not open an extra empty line.
    pub fn next_line(&self) -> Option<Position<'a>> {
        let next = self.next_line_or_eof_offset();
        (next < self.text.len()).then(|| Self::line_at(self.text, next))
    }

    /// The same line, positioned at its end.
    pub fn line_end_position(&self) -> Self {
        Self {
            offset: self.line_end,
            ..*self
        }
    }

    /// Whether the current line holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.current_line().trim_ascii().is_empty()
    }

    /// Number of leading ASCII whitespace bytes on the current line.
    pub fn indent(&self) -> usize {
        let line = self.current_line();
        line.len() - line.trim_ascii_start().len()
    }

    /// Absolute offset just past the last non-whitespace byte of the line.
    pub fn trimmed_line_end(&self) -> usize {
        self.line_start + self.current_line().trim_ascii_end().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        let mut result = Vec::new();
        let mut pos = Position::start(text);
        while let Some(p) = pos {
            result.push(p.current_line());
            pos = p.next_line();
        }
        result
    }

    #[test]
    fn empty_text_has_no_position() {
        assert_eq!(Position::start(""), None);
    }

    #[test]
    fn walks_lines_without_terminators() {
        assert_eq!(lines("a\nbb\n\nc"), vec!["a", "bb", "", "c"]);
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        assert_eq!(lines("a\n"), vec!["a"]);
        assert_eq!(lines("a\n\n"), vec!["a", ""]);
    }

    #[test]
    fn crlf_terminators_are_excluded() {
        let pos = Position::start("ab\r\ncd").unwrap();
        assert_eq!(pos.current_line(), "ab");
        assert_eq!(pos.next_line_or_eof_offset(), 4);
        assert_eq!(pos.next_line().unwrap().current_line(), "cd");
    }

    #[test]
    fn offset_in_line_is_none_at_line_end() {
        let pos = Position::start("ab\ncd").unwrap();
        assert_eq!(pos.offset_in_line(), Some(0));
        let end = pos.line_end_position();
        assert_eq!(end.offset(), 2);
        assert_eq!(end.offset_in_line(), None);
    }

    #[test]
    fn next_line_or_eof_on_last_line() {
        let pos = Position::start("ab\ncd").unwrap().next_line().unwrap();
        assert_eq!(pos.line_start(), 3);
        assert_eq!(pos.next_line_or_eof_offset(), 5);
        assert_eq!(pos.next_line(), None);
    }

    #[test]
    fn blank_indent_and_trim() {
        let pos = Position::start("  \t\n   text  \n").unwrap();
        assert!(pos.is_blank());
        let next = pos.next_line().unwrap();
        assert!(!next.is_blank());
        assert_eq!(next.indent(), 3);
        assert_eq!(next.trimmed_line_end(), 4 + 7);
    }
}
