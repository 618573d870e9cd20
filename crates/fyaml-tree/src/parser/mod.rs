//! Node builder.
//!
//! Turns the token stream into a [`Document`]. Nesting is tracked on an
//! explicit frame stack rather than the call stack, so input depth is bounded
//! by [`ParseOptions::max_depth`] instead of by the size of the thread stack.
//!
//! Block structure is decided from the column of the first token on each
//! line: frames indented deeper than that column are closed and their nodes
//! delivered to the parent key or item.

use fyaml_tokenizer::{LexError, Position, ScalarStyle, Span, Token, TokenKind, Tokenizer};
use tracing::{debug, trace};

use crate::anchors::{AnchorRegistry, MergeSet};
use crate::error::{BuildError, ParseError, ParseErrorKind};
use crate::node::{Content, Document, NodeId, Pair, Scalar};


/// Options for building a document.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum collection nesting (default: 256)
    pub max_depth: usize,

    /// Log frames at debug level (default: false)
    pub verbose: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            verbose: false,
        }
    }
}

impl ParseOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum collection nesting.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable debug-level logging for this parse.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Tokenizer with a single lookahead slot.
struct TokenSource<'src> {
    tokenizer: Tokenizer<'src>,
    peeked: Option<Token<'src>>,
}

impl<'src> TokenSource<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            tokenizer: Tokenizer::new(source),
            peeked: None,
        }
    }

    fn next(&mut self) -> Result<Option<Token<'src>>, LexError> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => self.tokenizer.next_token(),
        }
    }

    fn peek_kind(&mut self) -> Result<Option<TokenKind>, LexError> {
        if self.peeked.is_none() {
            self.peeked = self.tokenizer.next_token()?;
        }
        Ok(self.peeked.as_ref().map(|token| token.kind))
    }
}

/// A key waiting for its value.
struct Key {
    text: String,
    span: Span,
    pos: Position,
    merge: bool,
}

/// Pairs collected by an open mapping.
struct MappingBody {
    pairs: Vec<Pair>,
    merge: Option<MergeSet>,
    key: Option<Key>,
}

impl MappingBody {
    fn new() -> Self {
        Self {
            pairs: Vec::new(),
            merge: None,
            key: None,
        }
    }

    fn set_key(&mut self, key: Key) -> Result<(), ParseError> {
        let first = if key.merge {
            self.merge.as_ref().map(|merge| merge.span)
        } else {
            self.pairs
                .iter()
                .find(|pair| pair.key == key.text)
                .map(|pair| pair.key_span)
        };
        if let Some(first) = first {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateKey {
                    key: key.text,
                    first,
                },
                key.span,
                key.pos,
            ));
        }
        self.key = Some(key);
        Ok(())
    }

    fn insert(&mut self, doc: &Document, value: NodeId, pos: Position) -> Result<(), ParseError> {
        let Some(key) = self.key.take() else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken("value without a key".to_string()),
                doc.node(value).span,
                pos,
            ));
        };
        if key.merge {
            let merge = MergeSet::new(doc, value, self.pairs.len(), key.span, key.pos)?;
            self.merge = Some(merge);
        } else {
            self.pairs.push(Pair {
                key: key.text,
                key_span: key.span,
                value,
            });
        }
        Ok(())
    }

    fn finish(self, doc: &Document) -> Vec<Pair> {
        match self.merge {
            Some(merge) => merge.expand(doc, self.pairs),
            None => self.pairs,
        }
    }
}

/// Where and how a collection was opened.
struct Opened {
    anchor: Option<String>,
    span: Span,
    pos: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowState {
    Key,
    Colon,
    Value,
    Comma,
}

enum Frame {
    Mapping {
        opened: Opened,
        indent: u32,
        body: MappingBody,
    },
    Sequence {
        opened: Opened,
        indent: u32,
        items: Vec<NodeId>,
        /// The `-` whose item has not been seen yet.
        awaiting: Option<Span>,
    },
    FlowSequence {
        opened: Opened,
        items: Vec<NodeId>,
        expect_item: bool,
    },
    FlowMapping {
        opened: Opened,
        body: MappingBody,
        state: FlowState,
    },
}

impl Frame {
    fn is_flow(&self) -> bool {
        matches!(self, Frame::FlowSequence { .. } | Frame::FlowMapping { .. })
    }

    fn name(&self) -> &'static str {
        match self {
            Frame::Mapping { .. } => "mapping",
            Frame::Sequence { .. } => "sequence",
            Frame::FlowSequence { .. } => "flow sequence",
            Frame::FlowMapping { .. } => "flow mapping",
        }
    }
}

/// A plain scalar that the next line may continue.
struct Continuation {
    node: NodeId,
    min_column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentState {
    Implicit,
    Started,
    Ended,
}

/// Builds a [`Document`] from YAML source.
pub struct Parser<'src> {
    tokens: TokenSource<'src>,
    options: ParseOptions,
    doc: Document,
    anchors: AnchorRegistry,
    stack: Vec<Frame>,
    root: Option<NodeId>,
    /// `&name` waiting for its node.
    pending_anchor: Option<String>,
    at_line_start: bool,
    /// Line breaks since the last content token.
    newlines: u32,
    continuation: Option<Continuation>,
    document: DocumentState,
    seen_content: bool,
    last_end: u32,
}

impl<'src> Parser<'src> {
    /// Create a parser for `source`.
    pub fn new(source: &'src str, options: ParseOptions) -> Self {
        Self {
            tokens: TokenSource::new(source),
            options,
            doc: Document::new(),
            anchors: AnchorRegistry::new(),
            stack: Vec::new(),
            root: None,
            pending_anchor: None,
            at_line_start: true,
            newlines: 0,
            continuation: None,
            document: DocumentState::Implicit,
            seen_content: false,
            last_end: 0,
        }
    }

    /// Parse the whole input.
    ///
    /// Stops at the first error; nothing built so far is returned.
    pub fn parse(mut self) -> Result<Document, BuildError> {
        while let Some(token) = self.tokens.next()? {
            match token.kind {
                TokenKind::Newline => {
                    self.at_line_start = true;
                    self.newlines += 1;
                }
                TokenKind::Indent(_) | TokenKind::Dedent => {}
                TokenKind::Comment => self.continuation = None,
                TokenKind::DocumentStart => self.document_start(&token)?,
                TokenKind::DocumentEnd => {
                    self.close_all()?;
                    self.document = DocumentState::Ended;
                }
                _ => {
                    if self.document == DocumentState::Ended {
                        return Err(error(ParseErrorKind::MultipleDocuments, &token));
                    }
                    // Block scalars swallow the line break that ends them.
                    let ends_line = matches!(
                        token.kind,
                        TokenKind::Scalar(ScalarStyle::Literal | ScalarStyle::Folded)
                    ) && token.text.ends_with('\n');
                    self.step(token)?;
                    if ends_line {
                        self.at_line_start = true;
                        self.newlines = 1;
                    }
                }
            }
        }
        self.close_all()?;
        self.doc.set_root(self.root);
        Ok(self.doc)
    }

    fn document_start(&mut self, token: &Token<'src>) -> Result<(), BuildError> {
        if self.document != DocumentState::Implicit || self.seen_content {
            return Err(error(ParseErrorKind::MultipleDocuments, token));
        }
        self.document = DocumentState::Started;
        Ok(())
    }

    fn step(&mut self, token: Token<'src>) -> Result<(), BuildError> {
        self.seen_content = true;
        self.last_end = token.span.end;
        let first_on_line = std::mem::take(&mut self.at_line_start);
        let empty_lines = std::mem::take(&mut self.newlines).saturating_sub(1);
        let continuation = self.continuation.take();

        if first_on_line {
            if let Some(continuation) = continuation
                && self.continues_plain(&token, &continuation)?
            {
                let node = self.doc.node_mut(continuation.node);
                if let Content::Scalar(scalar) = &mut node.content {
                    scalar.fold_line(&token.value, empty_lines);
                }
                node.span = node.span.extend(token.span);
                self.continuation = Some(continuation);
                return Ok(());
            }
            if !self.in_flow() {
                self.close_for_column(&token)?;
            }
        }

        let column = token.column();
        match self.stack.last() {
            None => {
                if self.root.is_some() {
                    return Err(unexpected("content after the document root", &token));
                }
                self.begin_node(token, true)
            }
            Some(Frame::Mapping { indent, body, .. }) => {
                let indent = *indent;
                if body.key.is_some() {
                    self.begin_node(token, first_on_line)
                } else if first_on_line && column == indent {
                    self.block_key(token)
                } else if first_on_line {
                    Err(error(
                        ParseErrorKind::IndentationMismatch {
                            expected: indent,
                            found: column,
                        },
                        &token,
                    ))
                } else {
                    Err(unexpected(describe(token.kind), &token))
                }
            }
            Some(Frame::Sequence {
                indent, awaiting, ..
            }) => {
                let indent = *indent;
                if awaiting.is_some() {
                    return self.begin_node(token, true);
                }
                if first_on_line && column == indent && token.kind == TokenKind::SequenceItem {
                    if let Some(Frame::Sequence { awaiting, .. }) = self.stack.last_mut() {
                        *awaiting = Some(token.span);
                    }
                    Ok(())
                } else if first_on_line {
                    Err(error(
                        ParseErrorKind::IndentationMismatch {
                            expected: indent,
                            found: column,
                        },
                        &token,
                    ))
                } else {
                    Err(unexpected(describe(token.kind), &token))
                }
            }
            Some(Frame::FlowSequence { .. }) => self.flow_sequence(token),
            Some(Frame::FlowMapping { .. }) => self.flow_mapping(token),
        }
    }

    fn in_flow(&self) -> bool {
        self.stack.last().is_some_and(Frame::is_flow)
    }

    /// Whether `token` is the next line of a multi-line plain scalar.
    fn continues_plain(
        &mut self,
        token: &Token<'src>,
        continuation: &Continuation,
    ) -> Result<bool, BuildError> {
        Ok(token.kind == TokenKind::Scalar(ScalarStyle::Plain)
            && token.column() >= continuation.min_column
            && self.tokens.peek_kind()? != Some(TokenKind::MappingKey))
    }

    /// Close block frames that the first token of a line dedents out of.
    fn close_for_column(&mut self, token: &Token<'src>) -> Result<(), BuildError> {
        let column = token.column();
        let item = token.kind == TokenKind::SequenceItem;
        loop {
            match self.stack.last() {
                Some(Frame::Mapping { indent, body, .. }) => {
                    if column > *indent {
                        return Ok(());
                    }
                    if column == *indent {
                        // `key:` followed by `- item` at the key's own column
                        // is a sequence value.
                        if body.key.is_some() && !item {
                            self.fill_pending()?;
                        }
                        return Ok(());
                    }
                }
                Some(Frame::Sequence { indent, .. }) => {
                    if column > *indent {
                        return Ok(());
                    }
                    if column == *indent && item {
                        self.fill_pending()?;
                        return Ok(());
                    }
                }
                _ => return Ok(()),
            }
            self.close_top()?;
        }
    }

    /// Give a key or `-` that is still waiting for its value a null node.
    fn fill_pending(&mut self) -> Result<(), BuildError> {
        let pending = match self.stack.last() {
            Some(Frame::Mapping { body, .. } | Frame::FlowMapping { body, .. }) => {
                body.key.as_ref().map(|key| (key.span.end, key.pos))
            }
            Some(Frame::Sequence {
                awaiting, opened, ..
            }) => awaiting.map(|dash| (dash.end, opened.pos)),
            _ => None,
        };
        if let Some((at, pos)) = pending {
            let id = self.null_node(at);
            self.deliver(id, pos)?;
        }
        Ok(())
    }

    fn null_node(&mut self, at: u32) -> NodeId {
        let anchor = self.pending_anchor.take();
        let id = self.doc.push(
            Content::Scalar(Scalar::new("", ScalarStyle::Plain)),
            anchor.clone(),
            Span::empty(at),
        );
        if let Some(name) = anchor {
            self.anchors.register(&name, id);
        }
        id
    }

    /// Start a node at `token`. Block collections may only start where
    /// `block_allowed` says so: at the start of a line, after `- `, or at
    /// the document root.
    fn begin_node(&mut self, token: Token<'src>, block_allowed: bool) -> Result<(), BuildError> {
        match token.kind {
            TokenKind::Anchor => {
                if self.pending_anchor.is_some() {
                    return Err(error(ParseErrorKind::DuplicateAnchor, &token));
                }
                self.pending_anchor = Some(token.value.into_owned());
                Ok(())
            }
            // Tags are accepted and carry no meaning.
            TokenKind::Tag => Ok(()),
            TokenKind::Alias => {
                if self.tokens.peek_kind()? == Some(TokenKind::MappingKey) {
                    return Err(error(ParseErrorKind::InvalidKey, &token));
                }
                let target = self.anchors.resolve(&token.value, token.span, token.pos)?;
                let anchor = self.pending_anchor.take();
                let name = token.value.into_owned();
                let id = self.doc.push(
                    Content::Alias { name, target },
                    anchor.clone(),
                    token.span,
                );
                if let Some(name) = anchor {
                    self.anchors.register(&name, id);
                }
                self.deliver(id, token.pos)
            }
            TokenKind::Scalar(_) | TokenKind::MergeKey => {
                if self.tokens.peek_kind()? == Some(TokenKind::MappingKey) {
                    if !block_allowed {
                        return Err(unexpected("mapping key", &token));
                    }
                    let opened = self.opened(&token);
                    self.open(
                        Frame::Mapping {
                            opened,
                            indent: token.column(),
                            body: MappingBody::new(),
                        },
                        &token,
                    )?;
                    return self.mapping_key(token);
                }
                let style = match token.kind {
                    TokenKind::Scalar(style) => style,
                    _ => ScalarStyle::Plain,
                };
                let min_column = match self.stack.last() {
                    Some(Frame::Mapping { indent, .. } | Frame::Sequence { indent, .. }) => {
                        indent + 1
                    }
                    _ => 0,
                };
                let anchor = self.pending_anchor.take();
                let id = self.doc.push(
                    Content::Scalar(Scalar::new(token.value.as_ref(), style)),
                    anchor.clone(),
                    token.span,
                );
                if let Some(name) = anchor {
                    self.anchors.register(&name, id);
                }
                if style.is_plain() {
                    self.continuation = Some(Continuation {
                        node: id,
                        min_column,
                    });
                }
                self.deliver(id, token.pos)
            }
            TokenKind::SequenceItem => {
                if !block_allowed {
                    return Err(unexpected("'-'", &token));
                }
                let opened = self.opened(&token);
                self.open(
                    Frame::Sequence {
                        opened,
                        indent: token.column(),
                        items: Vec::new(),
                        awaiting: Some(token.span),
                    },
                    &token,
                )
            }
            TokenKind::FlowSequenceStart => {
                let opened = self.opened(&token);
                self.open(
                    Frame::FlowSequence {
                        opened,
                        items: Vec::new(),
                        expect_item: true,
                    },
                    &token,
                )
            }
            TokenKind::FlowMappingStart => {
                let opened = self.opened(&token);
                self.open(
                    Frame::FlowMapping {
                        opened,
                        body: MappingBody::new(),
                        state: FlowState::Key,
                    },
                    &token,
                )
            }
            TokenKind::MappingKey => Err(error(ParseErrorKind::InvalidKey, &token)),
            kind => Err(unexpected(describe(kind), &token)),
        }
    }

    fn opened(&mut self, token: &Token<'src>) -> Opened {
        Opened {
            anchor: self.pending_anchor.take(),
            span: token.span,
            pos: token.pos,
        }
    }

    fn open(&mut self, frame: Frame, token: &Token<'src>) -> Result<(), BuildError> {
        if self.stack.len() >= self.options.max_depth {
            return Err(error(
                ParseErrorKind::NestingTooDeep(self.options.max_depth),
                token,
            ));
        }
        let opened = match &frame {
            Frame::Mapping { opened, .. }
            | Frame::Sequence { opened, .. }
            | Frame::FlowSequence { opened, .. }
            | Frame::FlowMapping { opened, .. } => opened,
        };
        if let Some(name) = &opened.anchor {
            self.anchors.begin(name);
        }
        trace!("Open {} at {}", frame.name(), token.pos);
        if self.options.verbose {
            debug!("Open {} at {}", frame.name(), token.pos);
        }
        self.stack.push(frame);
        Ok(())
    }

    /// Pop the innermost frame, build its node and hand it to the parent.
    fn close_top(&mut self) -> Result<(), BuildError> {
        self.fill_pending()?;
        let Some(frame) = self.stack.pop() else {
            return Ok(());
        };
        let name = frame.name();
        let (content, opened) = match frame {
            Frame::Mapping { opened, body, .. } | Frame::FlowMapping { opened, body, .. } => {
                (Content::Mapping(body.finish(&self.doc)), opened)
            }
            Frame::Sequence { opened, items, .. } | Frame::FlowSequence { opened, items, .. } => {
                (Content::Sequence(items), opened)
            }
        };
        let span = Span::new(opened.span.start, self.last_end.max(opened.span.end));
        let id = self.doc.push(content, opened.anchor.clone(), span);
        if let Some(name) = &opened.anchor {
            self.anchors.finish(name, id);
        }
        trace!("Close {} {:?}", name, id);
        if self.options.verbose {
            debug!("Close {} opened at {}", name, opened.pos);
        }
        self.deliver(id, opened.pos)
    }

    /// Close everything at end of input or at `...`.
    fn close_all(&mut self) -> Result<(), BuildError> {
        if let Some(opened) = self.stack.iter().rev().find_map(|frame| match frame {
            Frame::FlowSequence { opened, .. } | Frame::FlowMapping { opened, .. } => Some(opened),
            _ => None,
        }) {
            return Err(ParseError::new(ParseErrorKind::UnterminatedFlow, opened.span, opened.pos).into());
        }
        while !self.stack.is_empty() {
            self.close_top()?;
        }
        if self.root.is_none() && self.pending_anchor.is_some() {
            let id = self.null_node(self.last_end);
            self.root = Some(id);
        }
        Ok(())
    }

    /// Route a finished node to whatever is waiting for it.
    fn deliver(&mut self, id: NodeId, pos: Position) -> Result<(), BuildError> {
        match self.stack.last_mut() {
            None => self.root = Some(id),
            Some(Frame::Mapping { body, .. }) => body.insert(&self.doc, id, pos)?,
            Some(Frame::FlowMapping { body, state, .. }) => {
                body.insert(&self.doc, id, pos)?;
                *state = FlowState::Comma;
            }
            Some(Frame::Sequence {
                items, awaiting, ..
            }) => {
                items.push(id);
                *awaiting = None;
            }
            Some(Frame::FlowSequence {
                items, expect_item, ..
            }) => {
                items.push(id);
                *expect_item = false;
            }
        }
        Ok(())
    }

    /// A token at the column of an open block mapping with no pending key.
    fn block_key(&mut self, token: Token<'src>) -> Result<(), BuildError> {
        match token.kind {
            TokenKind::Scalar(_) | TokenKind::MergeKey
                if self.tokens.peek_kind()? == Some(TokenKind::MappingKey) =>
            {
                self.mapping_key(token)
            }
            TokenKind::Alias | TokenKind::FlowSequenceStart | TokenKind::FlowMappingStart => {
                Err(error(ParseErrorKind::InvalidKey, &token))
            }
            TokenKind::Scalar(_) => Err(unexpected("scalar without ':' in a mapping", &token)),
            kind => Err(unexpected(describe(kind), &token)),
        }
    }

    /// Record `token` as the pending key of the innermost mapping and consume
    /// the `:` after it.
    fn mapping_key(&mut self, token: Token<'src>) -> Result<(), BuildError> {
        if let Some(colon) = self.tokens.next()? {
            self.last_end = colon.span.end;
        }
        let key = Key {
            merge: token.kind == TokenKind::MergeKey,
            text: token.value.into_owned(),
            span: token.span,
            pos: token.pos,
        };
        trace!("Key {:?}", key.text);
        if let Some(Frame::Mapping { body, .. } | Frame::FlowMapping { body, .. }) =
            self.stack.last_mut()
        {
            body.set_key(key)?;
        }
        Ok(())
    }

    fn flow_sequence(&mut self, token: Token<'src>) -> Result<(), BuildError> {
        let expect_item = matches!(
            self.stack.last(),
            Some(Frame::FlowSequence {
                expect_item: true,
                ..
            })
        );
        match token.kind {
            TokenKind::FlowSequenceEnd => {
                if self.pending_anchor.is_some() {
                    return Err(unexpected("']' after an anchor", &token));
                }
                self.close_top()
            }
            TokenKind::Comma if !expect_item => {
                if let Some(Frame::FlowSequence { expect_item, .. }) = self.stack.last_mut() {
                    *expect_item = true;
                }
                Ok(())
            }
            _ if expect_item => self.begin_node(token, false),
            kind => Err(unexpected(describe(kind), &token)),
        }
    }

    fn flow_mapping(&mut self, token: Token<'src>) -> Result<(), BuildError> {
        let Some(Frame::FlowMapping { state, .. }) = self.stack.last() else {
            return Ok(());
        };
        let state = *state;
        match (state, token.kind) {
            (FlowState::Key, TokenKind::FlowMappingEnd) if self.pending_anchor.is_some() => {
                Err(unexpected("'}' after an anchor", &token))
            }
            (_, TokenKind::FlowMappingEnd) => self.close_top(),
            (FlowState::Colon | FlowState::Value, TokenKind::Comma) => {
                // `{a, b}`: keys without values
                self.fill_pending()?;
                self.set_flow_state(FlowState::Key);
                Ok(())
            }
            (FlowState::Comma, TokenKind::Comma) => {
                self.set_flow_state(FlowState::Key);
                Ok(())
            }
            (FlowState::Key, TokenKind::Scalar(_) | TokenKind::MergeKey) => {
                let key = Key {
                    merge: token.kind == TokenKind::MergeKey,
                    text: token.value.into_owned(),
                    span: token.span,
                    pos: token.pos,
                };
                if let Some(Frame::FlowMapping { body, .. }) = self.stack.last_mut() {
                    body.set_key(key)?;
                }
                self.set_flow_state(FlowState::Colon);
                Ok(())
            }
            (FlowState::Key, TokenKind::Tag) => Ok(()),
            (
                FlowState::Key,
                TokenKind::Alias
                | TokenKind::FlowSequenceStart
                | TokenKind::FlowMappingStart
                | TokenKind::MappingKey,
            ) => Err(error(ParseErrorKind::InvalidKey, &token)),
            (FlowState::Colon, TokenKind::MappingKey) => {
                self.set_flow_state(FlowState::Value);
                Ok(())
            }
            (FlowState::Value, _) => self.begin_node(token, false),
            (_, kind) => Err(unexpected(describe(kind), &token)),
        }
    }

    fn set_flow_state(&mut self, new_state: FlowState) {
        if let Some(Frame::FlowMapping { state, .. }) = self.stack.last_mut() {
            *state = new_state;
        }
    }
}

fn error(kind: ParseErrorKind, token: &Token<'_>) -> BuildError {
    ParseError::new(kind, token.span, token.pos).into()
}

fn unexpected(what: &str, token: &Token<'_>) -> BuildError {
    error(ParseErrorKind::UnexpectedToken(what.to_string()), token)
}

fn describe(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Indent(_) => "indentation",
        TokenKind::Dedent => "dedent",
        TokenKind::Newline => "line break",
        TokenKind::Scalar(_) => "scalar",
        TokenKind::MappingKey => "':'",
        TokenKind::SequenceItem => "'-'",
        TokenKind::FlowSequenceStart => "'['",
        TokenKind::FlowSequenceEnd => "']'",
        TokenKind::FlowMappingStart => "'{'",
        TokenKind::FlowMappingEnd => "'}'",
        TokenKind::Comma => "','",
        TokenKind::Anchor => "anchor",
        TokenKind::Alias => "alias",
        TokenKind::MergeKey => "'<<'",
        TokenKind::Tag => "tag",
        TokenKind::Comment => "comment",
        TokenKind::DocumentStart => "'---'",
        TokenKind::DocumentEnd => "'...'",
    }
}
