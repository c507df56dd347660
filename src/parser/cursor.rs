//! Byte cursor over the input text with line/column tracking

use crate::error::Pos;

#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Cursor<'a> {
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Current byte without consuming it
    pub fn current(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub fn peek(&self, ahead: usize) -> Option<u8> {
        self.input
            .as_bytes()
            .get(self.pos.saturating_add(ahead))
            .copied()
    }

    pub fn advance(&mut self) {
        if let Some(b) = self.current() {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Consume byte if it matches
    pub fn consume(&mut self, expected: u8) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip spaces and tabs, never line terminators
    pub fn skip_blanks(&mut self) {
        while matches!(self.current(), Some(b' ' | b'\t')) {
            self.advance();
        }
    }

    /// Consume `\n` or `\r\n`
    pub fn consume_line_end(&mut self) -> bool {
        match (self.current(), self.peek(1)) {
            (Some(b'\n'), _) => {
                self.advance();
                true
            }
            (Some(b'\r'), Some(b'\n')) => {
                self.advance_by(2);
                true
            }
            _ => false,
        }
    }

    /// Skip the rest of the current line, terminator included
    pub fn skip_line(&mut self) {
        while let Some(b) = self.current() {
            self.advance();
            if b == b'\n' {
                break;
            }
        }
    }

    pub const fn position(&self) -> Pos {
        Pos::new(self.pos, self.line, self.col)
    }

    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub const fn pos(&self) -> usize {
        self.pos
    }

    pub const fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Text between `start` and the current position.
    ///
    /// The parser only ever stops on ASCII bytes, so both ends are char
    /// boundaries.
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.input.get(start..self.pos).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_basic() {
        let mut cursor = Cursor::new("hello");
        assert_eq!(cursor.current(), Some(b'h'));
        assert_eq!(cursor.peek(1), Some(b'e'));
        cursor.advance();
        assert_eq!(cursor.current(), Some(b'e'));
    }

    #[test]
    fn test_cursor_tracks_lines() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance_by(4);
        let pos = cursor.position();
        assert_eq!((pos.offset, pos.line, pos.col), (4, 2, 2));
    }

    #[test]
    fn test_skip_blanks_stops_at_newline() {
        let mut cursor = Cursor::new(" \t\nx");
        cursor.skip_blanks();
        assert_eq!(cursor.current(), Some(b'\n'));
    }

    #[test]
    fn test_consume_line_end() {
        let mut cursor = Cursor::new("\r\n\nx\r");
        assert!(cursor.consume_line_end());
        assert!(cursor.consume_line_end());
        assert!(!cursor.consume_line_end());
        cursor.advance();
        assert!(!cursor.consume_line_end());
        assert_eq!(cursor.position().line, 3);
    }

    #[test]
    fn test_skip_line() {
        let mut cursor = Cursor::new("# comment\nnext");
        cursor.skip_line();
        assert_eq!(cursor.current(), Some(b'n'));
        let mut cursor = Cursor::new("no newline");
        cursor.skip_line();
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_slice_from() {
        let mut cursor = Cursor::new("héllo=1");
        let start = cursor.pos();
        while cursor.current() != Some(b'=') {
            cursor.advance();
        }
        assert_eq!(cursor.slice_from(start), "héllo");
    }
}
