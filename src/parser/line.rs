//! Line-oriented CML parser
//!
//! Each physical line is one of: blank, comment, closing tag, opening tag or
//! key/value pair, tried in that order. Open tags are tracked on a stack
//! whose bottom entry is the root; attributes and new children always attach
//! to the top of that stack. The first violation aborts the whole parse.

use tracing::{debug, trace};

use super::config::{is_name_byte, ParserConfig, ParsingContext};
use super::cursor::Cursor;
use crate::error::{Error, ErrorKind, Pos, Result};
use crate::tree::{NodeId, Tree};

#[derive(Debug, Clone, Copy)]
struct OpenTag {
    id: NodeId,
    pos: Pos,
}

/// CML parser
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    tree: Tree,
    stack: Vec<OpenTag>,
    config: ParserConfig,
    context: ParsingContext,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        let tree = Tree::new();
        let root = OpenTag {
            id: tree.root_id(),
            pos: Pos::new(0, 1, 1),
        };
        Self {
            cursor: Cursor::new(input),
            tree,
            stack: vec![root],
            config,
            context: ParsingContext::new(),
        }
    }

    /// Run the parser to completion and hand over the finished tree
    pub fn parse(mut self) -> Result<Tree> {
        self.config
            .validate_size(self.cursor.input_len())
            .map_err(|kind| Error::new(kind, self.cursor.position()))?;

        while !self.cursor.is_eof() {
            self.parse_line()?;
        }

        if let [_, .., open] = self.stack.as_slice() {
            let name = self.tree.data(open.id).name.clone();
            return Err(Error::new(ErrorKind::UnclosedOpeningTag { name }, open.pos));
        }

        debug!(
            nodes = self.tree.node_count(),
            tags = self.context.tags_opened(),
            attributes = self.context.attributes_set(),
            "document parsed"
        );
        Ok(self.tree)
    }

    fn top(&self) -> NodeId {
        self.stack
            .last()
            .map_or_else(|| self.tree.root_id(), |open| open.id)
    }

    fn parse_line(&mut self) -> Result<()> {
        self.cursor.skip_blanks();

        match self.cursor.current() {
            Some(b'#') => {
                self.cursor.skip_line();
                Ok(())
            }
            Some(b'[') if self.cursor.peek(1) == Some(b'/') => self.parse_closing_tag(),
            Some(b'[') => self.parse_opening_tag(),
            Some(b) if is_name_byte(b) => self.parse_key_value(),
            _ => self.end_line(ErrorKind::MalformedLine),
        }
    }

    /// Accept optional blanks then a line terminator or end of input
    fn end_line(&mut self, kind: ErrorKind) -> Result<()> {
        self.cursor.skip_blanks();
        if self.cursor.is_eof() || self.cursor.consume_line_end() {
            Ok(())
        } else {
            Err(Error::new(kind, self.cursor.position()))
        }
    }

    /// Read bracket contents up to `]`, which is consumed. A tag must close on
    /// its own line: unlike a scan to end of input, a `\n` before `]` makes
    /// the tag corrupt, so a broken tag never swallows the following lines.
    fn read_tag_name(&mut self, corrupt: ErrorKind, tag_pos: Pos) -> Result<String> {
        let start = self.cursor.pos();
        loop {
            match self.cursor.current() {
                Some(b']') => {
                    let name = self.cursor.slice_from(start).to_string();
                    self.cursor.advance();
                    return Ok(name);
                }
                Some(b'\n') | None => return Err(Error::new(corrupt, tag_pos)),
                Some(_) => self.cursor.advance(),
            }
        }
    }

    fn parse_opening_tag(&mut self) -> Result<()> {
        let tag_pos = self.cursor.position();
        self.cursor.advance(); // '['

        let name = self.read_tag_name(ErrorKind::CorruptOpeningTag, tag_pos)?;
        self.end_line(ErrorKind::TrailingGarbage)?;

        self.config
            .validate_tag_name(&name)
            .map_err(|kind| Error::new(kind, tag_pos))?;
        self.context
            .enter_nested(&self.config)
            .map_err(|kind| Error::new(kind, tag_pos))?;

        trace!(tag = %name, line = tag_pos.line, "open");
        let parent = self.top();
        let id = self.tree.push_child(parent, name);
        self.stack.push(OpenTag { id, pos: tag_pos });
        Ok(())
    }

    fn parse_closing_tag(&mut self) -> Result<()> {
        let tag_pos = self.cursor.position();
        self.cursor.advance_by(2); // "[/"

        let found = self.read_tag_name(ErrorKind::CorruptClosingTag, tag_pos)?;

        // the root sits at the bottom of the stack and can never be closed
        let open = match self.stack.as_slice() {
            [_, .., open] => *open,
            _ => {
                return Err(Error::new(
                    ErrorKind::UnexpectedClosingTag { found },
                    tag_pos,
                ))
            }
        };

        let expected = &self.tree.data(open.id).name;
        if *expected != found {
            return Err(Error::new(
                ErrorKind::MismatchedClosingTag {
                    expected: expected.clone(),
                    found,
                },
                tag_pos,
            ));
        }

        self.end_line(ErrorKind::TrailingGarbage)?;

        trace!(tag = %found, line = tag_pos.line, "close");
        self.stack.pop();
        self.context.exit_nested();
        Ok(())
    }

    fn parse_key_value(&mut self) -> Result<()> {
        let start = self.cursor.pos();
        while self.cursor.current().is_some_and(is_name_byte) {
            self.cursor.advance();
        }
        let key = self.cursor.slice_from(start).to_string();

        self.cursor.skip_blanks();
        if !self.cursor.consume(b'=') {
            return Err(Error::new(
                ErrorKind::MissingSeparator { key },
                self.cursor.position(),
            ));
        }
        self.cursor.skip_blanks();

        let value = if self.cursor.current() == Some(b'"') {
            self.read_quoted_value(&key)?
        } else {
            self.read_bare_value()
        };

        self.end_line(ErrorKind::TrailingGarbage)?;

        let node = self.top();
        self.tree.set_attribute(node, key, value);
        self.context.record_attribute();
        Ok(())
    }

    /// Everything up to the next `"`, verbatim. May run across lines.
    fn read_quoted_value(&mut self, key: &str) -> Result<String> {
        let quote_pos = self.cursor.position();
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'"' {
                let value = self.cursor.slice_from(start).to_string();
                self.cursor.advance();
                return Ok(value);
            }
            self.cursor.advance();
        }

        Err(Error::new(
            ErrorKind::UnclosedQuote {
                key: key.to_string(),
            },
            quote_pos,
        ))
    }

    /// Rest of the line with trailing blanks removed
    fn read_bare_value(&mut self) -> String {
        let start = self.cursor.pos();
        while self.cursor.current().is_some_and(|b| b != b'\n') {
            self.cursor.advance();
        }
        self.cursor
            .slice_from(start)
            .trim_end_matches([' ', '\t', '\r'])
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Tree> {
        Parser::new(input).parse()
    }

    fn kind_of(input: &str) -> Option<ErrorKind> {
        parse(input).err().map(Error::into_kind)
    }

    #[test]
    fn test_empty_input() -> Result<()> {
        let tree = parse("")?;
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root().attribute_count(), 0);
        Ok(())
    }

    #[test]
    fn test_blank_and_comment_lines() -> Result<()> {
        let tree = parse("\n   \n\t# note\n  #another\n")?;
        assert_eq!(tree.node_count(), 1);
        Ok(())
    }

    #[test]
    fn test_attribute_on_root() -> Result<()> {
        let tree = parse("key = value\n")?;
        assert_eq!(tree.root().attribute("key"), Some("value"));
        Ok(())
    }

    #[test]
    fn test_nested_tags() -> Result<()> {
        let tree = parse("[a]\n[b]\nx=1\n[/b]\n[/a]\n")?;
        let b = tree.root().lookup("a/b");
        assert_eq!(b.and_then(|n| n.attribute("x")), Some("1"));
        Ok(())
    }

    #[test]
    fn test_missing_final_newline() -> Result<()> {
        let tree = parse("[a]\nk=v\n[/a]")?;
        assert!(tree.root().has_child("a"));
        let tree = parse("k=v")?;
        assert_eq!(tree.root().attribute("k"), Some("v"));
        Ok(())
    }

    #[test]
    fn test_crlf_line_endings() -> Result<()> {
        let tree = parse("[a]\r\nk=v  \r\nq=\"x\"\r\n[/a]\r\n")?;
        let a = tree.root().find_child("a");
        assert_eq!(a.and_then(|n| n.attribute("k")), Some("v"));
        assert_eq!(a.and_then(|n| n.attribute("q")), Some("x"));
        Ok(())
    }

    #[test]
    fn test_quoted_value_spans_lines() -> Result<()> {
        let tree = parse("text=\"one\ntwo\"\nafter=1\n")?;
        assert_eq!(tree.root().attribute("text"), Some("one\ntwo"));
        assert_eq!(tree.root().attribute("after"), Some("1"));
        Ok(())
    }

    #[test]
    fn test_bare_value_keeps_quotes_inside() -> Result<()> {
        let tree = parse("k=a \"b\" c\n")?;
        assert_eq!(tree.root().attribute("k"), Some("a \"b\" c"));
        Ok(())
    }

    #[test]
    fn test_lenient_tag_names() -> Result<()> {
        let tree = parse("[odd name!]\n[/odd name!]\n")?;
        assert!(tree.root().has_child("odd name!"));
        Ok(())
    }

    #[test]
    fn test_strict_tag_names() {
        let config = ParserConfig::default().with_strict_names(true);
        let result = Parser::with_config("[odd name]\n[/odd name]\n", config).parse();
        assert_eq!(
            result.err().map(Error::into_kind),
            Some(ErrorKind::InvalidTagName {
                name: "odd name".to_string()
            })
        );
    }

    #[test]
    fn test_corrupt_opening_tag() {
        assert_eq!(kind_of("[abc"), Some(ErrorKind::CorruptOpeningTag));
        assert_eq!(kind_of("[abc\n]\n"), Some(ErrorKind::CorruptOpeningTag));
    }

    #[test]
    fn test_corrupt_closing_tag() {
        assert_eq!(kind_of("[a]\n[/a\n"), Some(ErrorKind::CorruptClosingTag));
    }

    #[test]
    fn test_closing_tag_at_top_level() {
        assert_eq!(
            kind_of("[/root]\n"),
            Some(ErrorKind::UnexpectedClosingTag {
                found: "root".to_string()
            })
        );
    }

    #[test]
    fn test_mismatch_reported_before_trailing_garbage() {
        assert_eq!(
            kind_of("[a]\n[/b] junk\n"),
            Some(ErrorKind::MismatchedClosingTag {
                expected: "a".to_string(),
                found: "b".to_string()
            })
        );
        assert_eq!(kind_of("[a]\n[/a] junk\n"), Some(ErrorKind::TrailingGarbage));
    }

    #[test]
    fn test_trailing_garbage_after_tags_and_values() {
        assert_eq!(kind_of("[a] x\n[/a]\n"), Some(ErrorKind::TrailingGarbage));
        assert_eq!(kind_of("k=\"v\" x\n"), Some(ErrorKind::TrailingGarbage));
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            kind_of("key value\n"),
            Some(ErrorKind::MissingSeparator {
                key: "key".to_string()
            })
        );
    }

    #[test]
    fn test_unclosed_quote() {
        assert_eq!(
            kind_of("k=\"never closed\n"),
            Some(ErrorKind::UnclosedQuote {
                key: "k".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_line() {
        assert_eq!(kind_of("  ; what\n"), Some(ErrorKind::MalformedLine));
        assert_eq!(kind_of("-key=1\n"), Some(ErrorKind::MalformedLine));
    }

    #[test]
    fn test_error_positions() {
        let err = parse("[a]\nok=1\n\n[/b]\n").err();
        let pos = err.map(|e| e.pos());
        assert_eq!(pos.map(|p| (p.line, p.col)), Some((4, 1)));

        let err = parse("x=1\n  [open]\n").err();
        assert_eq!(err.map(|e| (e.line(), e.pos().col)), Some((2, 3)));
    }

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig::default().with_max_depth(2);
        let input = "[a]\n[b]\n[c]\n[/c]\n[/b]\n[/a]\n";
        let result = Parser::with_config(input, config).parse();
        assert_eq!(
            result.err().map(Error::into_kind),
            Some(ErrorKind::MaxDepthExceeded { max: 2 })
        );
    }

    #[test]
    fn test_size_limit() {
        let config = ParserConfig::default().with_max_size(3);
        let result = Parser::with_config("k=value\n", config).parse();
        assert_eq!(
            result.err().map(Error::into_kind),
            Some(ErrorKind::MaxSizeExceeded { max: 3 })
        );
    }
}
