//! Tokenizer for FYAML documents.

use std::collections::VecDeque;

use tracing::trace;

use crate::scalar::{Chomping, decode_block, decode_double_quoted, decode_single_quoted};
use crate::span::bom_len;
use crate::{LexError, LexErrorKind, Position, ScalarStyle, Span, Token, TokenKind};

/// A tokenizer that produces tokens from YAML source text.
///
/// Iterating yields `Ok(token)` until the input is exhausted, or a single
/// `Err` after which iteration stops. The tokenizer is `Clone`, and
/// [`Tokenizer::restart`] rewinds it to the beginning of the input.
#[derive(Clone)]
pub struct Tokenizer<'src> {
    /// The source text being tokenized.
    source: &'src str,
    /// The remaining source text (suffix of `source`).
    remaining: &'src str,
    /// Current byte position in `source`.
    pos: u32,
    /// Current 1-based line.
    line: u32,
    /// Byte offset where the current line starts.
    line_start: u32,

    /// Open block indentation levels. The bottom entry is always 0.
    indents: Vec<IndentLevel>,
    /// Indentation of the current block-context line.
    line_indent: u32,
    /// Nesting depth of `[`/`{`.
    flow_depth: u32,
    /// Next call must measure indentation first.
    at_line_start: bool,
    /// A `- ` was just emitted; the content after it opens an implicit level.
    after_sequence_item: bool,

    /// Kind and end offset of the last non-trivia token.
    last: Option<(TokenKind, u32)>,
    /// Tokens produced ahead of time (indentation events).
    pending: VecDeque<Token<'src>>,
    /// End of input has been reported.
    done: bool,
    /// An error has been reported.
    failed: bool,
}

impl<'src> Tokenizer<'src> {
    /// Create a new tokenizer for the given source text.
    ///
    /// A leading byte order mark is skipped.
    pub fn new(source: &'src str) -> Self {
        let bom = bom_len(source);
        Self {
            source,
            remaining: &source[bom..],
            pos: bom as u32,
            line: 1,
            line_start: bom as u32,
            indents: vec![IndentLevel::new(0, false)],
            line_indent: 0,
            flow_depth: 0,
            at_line_start: true,
            after_sequence_item: false,
            last: None,
            pending: VecDeque::new(),
            done: false,
            failed: false,
        }
    }

    /// Rewind to the start of the input.
    pub fn restart(&mut self) {
        *self = Self::new(self.source);
    }

    /// Get the current byte position.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Check if we're at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Current line/column.
    #[inline]
    fn current_pos(&self) -> Position {
        Position::new(self.line, self.pos - self.line_start)
    }

    /// Peek at the next character without consuming it.
    #[inline]
    fn peek(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    /// Peek at the nth character (0-indexed) without consuming.
    #[inline]
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining.chars().nth(n)
    }

    /// Advance by one character and return it, tracking line breaks.
    #[inline]
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8() as u32;
        self.remaining = &self.remaining[c.len_utf8()..];
        if c == '\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(c)
    }

    /// Advance by n bytes that are known not to contain a line break.
    #[inline]
    fn advance_by(&mut self, n: usize) {
        self.pos += n as u32;
        self.remaining = &self.remaining[n..];
    }

    /// Consume the rest of the current line including its line break.
    fn advance_line(&mut self) {
        while let Some(c) = self.advance() {
            if c == '\n' {
                break;
            }
        }
    }

    /// Check if the remaining text starts with the given prefix.
    #[inline]
    fn starts_with(&self, prefix: &str) -> bool {
        self.remaining.starts_with(prefix)
    }

    /// Create a token from the given start position to current position.
    fn token(&self, kind: TokenKind, start: u32, pos: Position) -> Token<'src> {
        let span = Span::new(start, self.pos);
        let text = &self.source[start as usize..self.pos as usize];
        trace!("Token {:?} at {:?}: {:?}", kind, span, text);
        Token::new(kind, span, pos, text)
    }

    fn error(&self, kind: LexErrorKind, start: u32, pos: Position) -> LexError {
        LexError::new(kind, Span::new(start, self.pos.max(start)), pos)
    }

    fn top_indent(&self) -> u32 {
        self.indents.last().map_or(0, |level| level.column)
    }

    /// Get the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token<'src>>, LexError> {
        if let Some(token) = self.pending.pop_front() {
            return Ok(Some(token));
        }

        if self.at_line_start {
            self.at_line_start = false;
            if self.flow_depth == 0 {
                self.lex_indentation()?;
                if let Some(token) = self.pending.pop_front() {
                    return Ok(Some(token));
                }
            }
        }

        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }

        let Some(c) = self.peek() else {
            return Ok(self.finish());
        };
        let start = self.pos;
        let pos = self.current_pos();

        // `- key: value` puts the mapping at the column after the dash, which
        // later lines may align with without any line starting there yet.
        if std::mem::take(&mut self.after_sequence_item)
            && !matches!(c, '\n' | '\r' | '#')
            && pos.column > self.top_indent()
        {
            self.indents.push(IndentLevel::new(pos.column, true));
        }
        let at_column_zero = pos.column == 0 && self.flow_depth == 0;

        let token = match c {
            '\n' | '\r' => {
                self.advance();
                if c == '\r' && self.peek() == Some('\n') {
                    self.advance();
                }
                self.at_line_start = true;
                let span = Span::new(start, self.pos);
                Token::new(TokenKind::Newline, span, pos, span.slice(self.source))
            }
            '#' => self.lex_comment(start, pos),

            // Directives are only tolerated before any content.
            '%' if at_column_zero && self.last.is_none() => self.lex_comment(start, pos),

            '-' if at_column_zero && self.is_document_marker("---") => {
                self.advance_by(3);
                self.token(TokenKind::DocumentStart, start, pos)
            }
            '.' if at_column_zero && self.is_document_marker("...") => {
                self.advance_by(3);
                self.token(TokenKind::DocumentEnd, start, pos)
            }
            '-' if self.flow_depth == 0 && is_blank_or_end(self.peek_nth(1)) => {
                self.advance();
                self.after_sequence_item = true;
                self.token(TokenKind::SequenceItem, start, pos)
            }
            ':' if self.is_value_indicator() => {
                self.advance();
                self.token(TokenKind::MappingKey, start, pos)
            }

            '[' | '{' => {
                self.advance();
                self.flow_depth += 1;
                let kind = if c == '[' {
                    TokenKind::FlowSequenceStart
                } else {
                    TokenKind::FlowMappingStart
                };
                self.token(kind, start, pos)
            }
            ']' | '}' if self.flow_depth > 0 => {
                self.advance();
                self.flow_depth -= 1;
                let kind = if c == ']' {
                    TokenKind::FlowSequenceEnd
                } else {
                    TokenKind::FlowMappingEnd
                };
                self.token(kind, start, pos)
            }
            ',' if self.flow_depth > 0 => {
                self.advance();
                self.token(TokenKind::Comma, start, pos)
            }

            '&' => self.lex_property(TokenKind::Anchor, start, pos)?,
            '*' => self.lex_property(TokenKind::Alias, start, pos)?,
            '!' => self.lex_property(TokenKind::Tag, start, pos)?,

            '"' => self.lex_double_quoted(start, pos)?,
            '\'' => self.lex_single_quoted(start, pos)?,
            '|' | '>' if self.flow_depth == 0 => self.lex_block_scalar(start, pos)?,

            // Reserved or misplaced indicators.
            ']' | '}' | ',' | '|' | '>' | '@' | '`' | '%' => {
                self.advance();
                return Err(self.error(LexErrorKind::UnexpectedCharacter(c), start, pos));
            }
            // Complex mapping keys are not supported.
            '?' if is_blank_or_end(self.peek_nth(1)) => {
                self.advance();
                return Err(self.error(LexErrorKind::UnexpectedCharacter(c), start, pos));
            }

            _ => self.lex_plain_scalar(start, pos),
        };

        if !token.kind.is_trivia() {
            self.last = Some((token.kind, token.span.end));
        }
        Ok(Some(token))
    }

    /// Measure the indentation of a new block-context line and queue
    /// `Indent`/`Dedent` tokens for it.
    fn lex_indentation(&mut self) -> Result<(), LexError> {
        let spaces = self.remaining.bytes().take_while(|b| *b == b' ').count();
        let rest = &self.remaining[spaces..];
        let content = rest.trim_start_matches([' ', '\t']);

        // Blank and comment-only lines do not take part in indentation.
        if content.is_empty() || content.starts_with(['\n', '\r', '#']) {
            self.advance_by(spaces);
            return Ok(());
        }

        let start = self.pos;
        let pos = self.current_pos();
        self.advance_by(spaces);

        if rest.starts_with('\t') {
            let tab_pos = self.current_pos();
            self.advance();
            return Err(self.error(LexErrorKind::TabIndentation, start + spaces as u32, tab_pos));
        }

        let indent = spaces as u32;
        self.line_indent = indent;

        if indent > self.top_indent() {
            self.indents.push(IndentLevel::new(indent, false));
            let token = self.token(TokenKind::Indent(indent), start, pos);
            self.pending.push_back(token);
            return Ok(());
        }

        while self.top_indent() > indent {
            self.pop_level();
        }
        if self.top_indent() != indent {
            return Err(self.error(
                LexErrorKind::InconsistentIndentation {
                    found: indent,
                    expected: self.top_indent(),
                },
                start,
                pos,
            ));
        }
        Ok(())
    }

    /// Close any open indentation levels at end of input.
    fn finish(&mut self) -> Option<Token<'src>> {
        if self.done {
            return None;
        }
        self.done = true;
        while self.indents.len() > 1 {
            self.pop_level();
        }
        self.pending.pop_front()
    }

    /// Close the innermost level, queueing a `Dedent` unless it was implicit.
    fn pop_level(&mut self) {
        if let Some(level) = self.indents.pop()
            && !level.implicit
        {
            let token = Token::new(TokenKind::Dedent, Span::empty(self.pos), self.current_pos(), "");
            self.pending.push_back(token);
        }
    }

    fn is_document_marker(&self, marker: &str) -> bool {
        self.starts_with(marker) && is_blank_or_end(self.peek_nth(3))
    }

    /// Whether the `:` under the cursor separates a key from its value.
    fn is_value_indicator(&self) -> bool {
        let next = self.peek_nth(1);
        if is_blank_or_end(next) {
            return true;
        }
        if self.flow_depth == 0 {
            return false;
        }
        if matches!(next, Some(',' | '[' | ']' | '{' | '}')) {
            return true;
        }
        // JSON-style `"key":value` directly after a quoted scalar.
        matches!(
            self.last,
            Some((
                TokenKind::Scalar(ScalarStyle::SingleQuoted | ScalarStyle::DoubleQuoted),
                end
            )) if end == self.pos
        )
    }

    /// Tokenize a comment (or directive line): everything up to the line break.
    fn lex_comment(&mut self, start: u32, pos: Position) -> Token<'src> {
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.advance();
        }
        let token = self.token(TokenKind::Comment, start, pos);
        let text: &'src str = token.text;
        let value = text.trim_start_matches(['#', '%']).trim();
        let value = std::borrow::Cow::Borrowed(value);
        token.with_value(value)
    }

    /// Tokenize `&name`, `*name` or `!tag`.
    fn lex_property(
        &mut self,
        kind: TokenKind,
        start: u32,
        pos: Position,
    ) -> Result<Token<'src>, LexError> {
        self.advance(); // sigil
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ',' | '[' | ']' | '{' | '}') {
                break;
            }
            self.advance();
        }
        let token = self.token(kind, start, pos);
        let text: &'src str = token.text;
        let name = &text[1..];
        if name.is_empty() && kind != TokenKind::Tag {
            return Err(self.error(LexErrorKind::EmptyAnchorName, start, pos));
        }
        let name = std::borrow::Cow::Borrowed(name);
        Ok(token.with_value(name))
    }

    /// Tokenize a double-quoted scalar: `"..."`, possibly spanning lines.
    fn lex_double_quoted(&mut self, start: u32, pos: Position) -> Result<Token<'src>, LexError> {
        self.advance(); // opening quote
        loop {
            match self.peek() {
                None => {
                    return Err(self.error(
                        LexErrorKind::UnterminatedQuote { double: true },
                        start,
                        pos,
                    ));
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        let token = self.token(TokenKind::Scalar(ScalarStyle::DoubleQuoted), start, pos);
        let text: &'src str = token.text;
        let content = &text[1..text.len() - 1];
        match decode_double_quoted(content) {
            Ok(value) => Ok(token.with_value(value)),
            Err(seq) => Err(self.error(LexErrorKind::InvalidEscape(seq), start, pos)),
        }
    }

    /// Tokenize a single-quoted scalar: `'...'` with `''` as the only escape.
    fn lex_single_quoted(&mut self, start: u32, pos: Position) -> Result<Token<'src>, LexError> {
        self.advance(); // opening quote
        loop {
            match self.peek() {
                None => {
                    return Err(self.error(
                        LexErrorKind::UnterminatedQuote { double: false },
                        start,
                        pos,
                    ));
                }
                Some('\'') if self.peek_nth(1) == Some('\'') => {
                    self.advance();
                    self.advance();
                }
                Some('\'') => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        let token = self.token(TokenKind::Scalar(ScalarStyle::SingleQuoted), start, pos);
        let text: &'src str = token.text;
        let content = &text[1..text.len() - 1];
        let value = decode_single_quoted(content);
        Ok(token.with_value(value))
    }

    /// Tokenize a `|` or `>` block scalar: the header line plus every
    /// following line that belongs to it.
    fn lex_block_scalar(&mut self, start: u32, pos: Position) -> Result<Token<'src>, LexError> {
        let folded = self.advance() == Some('>');

        let mut chomping = Chomping::Clip;
        let mut seen_chomping = false;
        let mut explicit_indent = None;
        loop {
            match self.peek() {
                Some(c @ ('-' | '+')) if !seen_chomping => {
                    chomping = if c == '-' {
                        Chomping::Strip
                    } else {
                        Chomping::Keep
                    };
                    seen_chomping = true;
                    self.advance();
                }
                Some(c @ '1'..='9') if explicit_indent.is_none() => {
                    explicit_indent = c.to_digit(10);
                    self.advance();
                }
                _ => break,
            }
        }

        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }
        if self.peek() == Some('#') {
            while !matches!(self.peek(), None | Some('\n' | '\r')) {
                self.advance();
            }
        }
        match self.peek() {
            None => {}
            Some('\n' | '\r') => {
                self.advance_line();
                self.at_line_start = true;
            }
            Some(_) => {
                return Err(self.error(LexErrorKind::InvalidBlockHeader, start, pos));
            }
        }

        let body_start = self.pos;
        let parent_indent = self.line_indent;
        let content_indent = match explicit_indent {
            Some(n) => parent_indent + n,
            None => self.detect_block_indent(),
        };

        if content_indent > parent_indent {
            while !self.is_eof() {
                let spaces = self.remaining.bytes().take_while(|b| *b == b' ').count();
                let rest = &self.remaining[spaces..];
                if rest.is_empty() || rest.starts_with(['\n', '\r']) {
                    self.advance_line();
                    continue;
                }
                if (spaces as u32) < content_indent {
                    if rest.starts_with('\t') {
                        let tab_start = self.pos + spaces as u32;
                        let tab_pos = Position::new(self.line, spaces as u32);
                        return Err(LexError::new(
                            LexErrorKind::TabIndentation,
                            Span::new(tab_start, tab_start + 1),
                            tab_pos,
                        ));
                    }
                    break;
                }
                self.advance_line();
            }
        }

        let body = &self.source[body_start as usize..self.pos as usize];
        let value = decode_block(body, content_indent as usize, folded, chomping);
        let style = if folded {
            ScalarStyle::Folded
        } else {
            ScalarStyle::Literal
        };
        let token = self.token(TokenKind::Scalar(style), start, pos);
        Ok(token.with_value(std::borrow::Cow::Owned(value)))
    }

    /// Indentation of the first non-blank line ahead, or 0 if there is none.
    fn detect_block_indent(&self) -> u32 {
        for line in self.remaining.split('\n') {
            let spaces = line.bytes().take_while(|b| *b == b' ').count();
            let rest = line[spaces..].trim_end_matches('\r');
            if !rest.is_empty() {
                return spaces as u32;
            }
        }
        0
    }

    /// Tokenize a plain (unquoted) scalar. A plain `<<` is the merge key.
    fn lex_plain_scalar(&mut self, start: u32, pos: Position) -> Token<'src> {
        let mut end = self.pos;
        let mut prev_blank = false;
        while let Some(c) = self.peek() {
            match c {
                '\n' | '\r' => break,
                ':' if self.is_value_indicator() => break,
                ',' | '[' | ']' | '{' | '}' if self.flow_depth > 0 => break,
                '#' if prev_blank => break,
                _ => {}
            }
            self.advance();
            prev_blank = c == ' ' || c == '\t';
            if !prev_blank {
                end = self.pos;
            }
        }

        let span = Span::new(start, end);
        let text = span.slice(self.source);
        let kind = if text == "<<" {
            TokenKind::MergeKey
        } else {
            TokenKind::Scalar(ScalarStyle::Plain)
        };
        trace!("Token {:?} at {:?}: {:?}", kind, span, text);
        Token::new(kind, span, pos, text)
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// An open block indentation level.
#[derive(Debug, Clone, Copy)]
struct IndentLevel {
    column: u32,
    /// Opened by content after `- ` rather than by a line's indentation.
    /// Implicit levels produce no `Indent`/`Dedent` tokens.
    implicit: bool,
}

impl IndentLevel {
    fn new(column: u32, implicit: bool) -> Self {
        Self { column, implicit }
    }
}

fn is_blank_or_end(c: Option<char>) -> bool {
    matches!(c, None | Some(' ' | '\t' | '\n' | '\r'))
}
