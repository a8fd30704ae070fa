use std::sync::Arc;

use codemap::{CodeMap, File, Span};
use indexmap::IndexMap;

use crate::{
    ast::{Arena, Extensions, NodeId, NodeKind},
    error::SassResult,
    interner::InternedString,
    lexer::{self, alternatives, Token},
    Options,
};

mod control_flow;
mod import;
mod media;
mod mixin;
mod selector;
mod style;
mod value;
mod variable;

/// State shared by every document taking part in one parse: the arena, the
/// extension registry, the code map holding each loaded file, and the set of
/// imports currently being expanded.
pub(crate) struct Context<'a> {
    pub map: CodeMap,
    pub files: IndexMap<InternedString, Arc<File>>,
    pub arena: Arena,
    pub extensions: Extensions,
    pub options: &'a Options<'a>,
    active_imports: Vec<InternedString>,
}

impl<'a> Context<'a> {
    pub fn new(options: &'a Options<'a>) -> Self {
        Context {
            map: CodeMap::new(),
            files: IndexMap::new(),
            arena: Arena::new(),
            extensions: Extensions::default(),
            options,
            active_imports: Vec::new(),
        }
    }

    pub fn into_parts(
        self,
    ) -> (
        CodeMap,
        IndexMap<InternedString, Arc<File>>,
        Arena,
        Extensions,
    ) {
        (self.map, self.files, self.arena, self.extensions)
    }
}

/// Which construct the block currently being parsed belongs to.
///
/// Mixin and function bodies restrict the statements that may appear inside
/// them, and neither may contain `@import`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockContext {
    None,
    Mixin,
    Function,
}

/// A recursive-descent parser over one document: the entry file, an
/// `@import`ed file, or a slice of an outer document (an interpolant body or
/// a value schema).
///
/// The parser owns the cursor `position`, the current `line`, and the span of
/// the most recently consumed token, `lexed`. `lexed` is only overwritten on a
/// successful lex, so it remains valid when a caller has already consumed a
/// head token on the parser's behalf.
pub(crate) struct Parser<'a, 'ctx> {
    ctx: &'a mut Context<'ctx>,
    file: Arc<File>,
    path: InternedString,
    position: usize,
    end: usize,
    line: usize,
    lexed: Token,
}

impl<'a, 'ctx> Parser<'a, 'ctx> {
    pub fn new(ctx: &'a mut Context<'ctx>, file: Arc<File>, path: InternedString) -> Self {
        let end = file.source().len();
        Parser {
            ctx,
            file,
            path,
            position: 0,
            end,
            line: 0,
            lexed: Token::EMPTY,
        }
    }

    /// A sub-parser over `[token.begin, token.end)` of this parser's file,
    /// sharing the arena and extension registry.
    fn from_token(&mut self, token: Token) -> Parser<'_, 'ctx> {
        Parser {
            ctx: &mut *self.ctx,
            file: Arc::clone(&self.file),
            path: self.path,
            position: token.begin(),
            end: token.end(),
            line: self.line,
            lexed: Token::EMPTY,
        }
    }

    fn src(&self) -> &[u8] {
        self.file.source().as_bytes()
    }

    // Lexing

    /// Try `matcher` at `pos` after skipping whitespace and comments. Neither
    /// the cursor nor the line counter moves.
    fn peek_at<M>(&self, matcher: M, pos: usize) -> Option<usize>
    where
        M: Fn(&[u8], usize) -> Option<usize>,
    {
        let src = self.src();
        let start = lexer::spaces_and_comments(src, pos).unwrap_or(pos);
        matcher(src, start)
    }

    fn peek<M>(&self, matcher: M) -> Option<usize>
    where
        M: Fn(&[u8], usize) -> Option<usize>,
    {
        self.peek_at(matcher, self.position)
    }

    /// Like [`Self::peek`], but without the leading whitespace skip. Needed
    /// wherever whitespace itself is significant, e.g. the descendant
    /// combinator.
    fn peek_raw<M>(&self, matcher: M) -> Option<usize>
    where
        M: Fn(&[u8], usize) -> Option<usize>,
    {
        matcher(self.src(), self.position)
    }

    /// Try `matcher` after skipping whitespace and comments; on success move
    /// the cursor past the match, record the matched span in `lexed`, and
    /// advance the line counter by the newlines consumed.
    fn lex<M>(&mut self, matcher: M) -> bool
    where
        M: Fn(&[u8], usize) -> Option<usize>,
    {
        let before = self.position;
        let (start, matched) = {
            let src = self.src();
            let start = lexer::spaces_and_comments(src, before).unwrap_or(before);
            (start, matcher(src, start))
        };
        match matched {
            Some(after) => {
                self.commit(before, start, after);
                true
            }
            None => false,
        }
    }

    /// Lex a block comment. Only spaces and line comments are skipped first,
    /// lest the skip swallow the comment being lexed.
    fn lex_block_comment(&mut self) -> bool {
        let before = self.position;
        let (start, matched) = {
            let src = self.src();
            let skip = lexer::zero_plus(alternatives!(lexer::spaces, lexer::line_comment));
            let start = skip(src, before).unwrap_or(before);
            (start, lexer::block_comment(src, start))
        };
        match matched {
            Some(after) => {
                self.commit(before, start, after);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, from: usize, begin: usize, end: usize) {
        let newlines = lexer::count_newlines(self.src(), from, end);
        self.line += newlines;
        self.lexed = Token::new(begin, end);
        self.position = end;
    }

    fn skip_optional_spaces(&mut self) {
        let after = {
            let src = self.src();
            lexer::optional_spaces(src, self.position).unwrap_or(self.position)
        };
        self.advance_to(after);
    }

    fn skip_spaces_and_comments(&mut self) {
        let after = {
            let src = self.src();
            lexer::spaces_and_comments(src, self.position).unwrap_or(self.position)
        };
        self.advance_to(after);
    }

    /// Move the cursor forward without recording a token, keeping the line
    /// counter honest.
    fn advance_to(&mut self, pos: usize) {
        let newlines = lexer::count_newlines(self.src(), self.position, pos);
        self.line += newlines;
        self.position = pos;
    }

    fn token_text(&self, token: Token) -> &str {
        self.file
            .source()
            .get(token.begin()..token.end())
            .unwrap_or_default()
    }

    // Errors

    fn current_span(&self) -> Span {
        let len = self.file.source().len() as u64;
        let lo = (self.position as u64).min(len);
        let hi = (self.position as u64 + 1).min(len);
        self.file.span.subspan(lo, hi)
    }

    fn span_of(&self, token: Token) -> Span {
        let len = self.file.source().len() as u64;
        let lo = (token.begin() as u64).min(len);
        let hi = (token.end() as u64).min(len).max(lo);
        self.file.span.subspan(lo, hi)
    }

    fn syntax_error<T>(&self, message: impl Into<String>) -> SassResult<T> {
        Err((message.into(), self.current_span()).into())
    }

    // Node construction

    fn internal(&mut self, kind: NodeKind, capacity: usize) -> NodeId {
        self.ctx.arena.internal(kind, self.path, self.line, capacity)
    }

    fn internal_at(&mut self, kind: NodeKind, line: usize, capacity: usize) -> NodeId {
        self.ctx.arena.internal(kind, self.path, line, capacity)
    }

    fn leaf(&mut self, kind: NodeKind, token: Token) -> NodeId {
        self.ctx.arena.leaf(kind, self.path, self.line, token)
    }

    /// A leaf over the most recently lexed span.
    fn leaf_lexed(&mut self, kind: NodeKind) -> NodeId {
        let token = self.lexed;
        self.leaf(kind, token)
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        self.ctx.arena.push_child(parent, child);
    }

    fn kind(&self, id: NodeId) -> NodeKind {
        self.ctx.arena[id].kind()
    }

    fn set_eval(&mut self, id: NodeId) {
        self.ctx.arena.set_should_eval(id);
    }

    fn inherit_eval(&mut self, parent: NodeId, child: NodeId) {
        self.ctx.arena.inherit_should_eval(parent, child);
    }

    /// Append the children of `from` (an imported document's root) onto
    /// `onto`, preserving order.
    fn splice_children(&mut self, onto: NodeId, from: NodeId) {
        let children = self.ctx.arena[from].children().to_vec();
        for child in children {
            self.ctx.arena.push_child(onto, child);
        }
    }

    // Top level

    /// Parse an entire document, returning its root node.
    pub fn parse_scss(&mut self) -> SassResult<NodeId> {
        let root = self.internal(NodeKind::Root, 0);
        self.skip_optional_spaces();
        while self.position < self.end {
            if self.lex_block_comment() {
                let comment = self.leaf_lexed(NodeKind::Comment);
                self.append(root, comment);
            } else if self.peek(lexer::import).is_some() {
                let importee = self.parse_import()?;
                if self.kind(importee) == NodeKind::CssImport {
                    self.append(root, importee);
                } else {
                    self.splice_children(root, importee);
                }
                if !self.lex(lexer::exactly(b';')) {
                    return self
                        .syntax_error("top-level @import directive must be terminated by ';'");
                }
            } else if self.peek(lexer::mixin).is_some()
                || self.peek(lexer::exactly(b'=')).is_some()
            {
                let mixin = self.parse_mixin_definition()?;
                self.append(root, mixin);
            } else if self.peek(lexer::function).is_some() {
                let function = self.parse_function_definition()?;
                self.append(root, function);
            } else if self.peek(lexer::variable).is_some() {
                let assignment = self.parse_assignment()?;
                self.append(root, assignment);
                if !self.lex(lexer::exactly(b';')) {
                    return self
                        .syntax_error("top-level variable binding must be terminated by ';'");
                }
            } else if self.peek(lexer::propset_head).is_some() {
                let propset = self.parse_propset()?;
                self.append(root, propset);
            } else {
                let lookahead = self.lookahead_for_selector(self.position);
                if lookahead.found.is_some() {
                    let ruleset = self.parse_ruleset(lookahead, BlockContext::None)?;
                    self.append(root, ruleset);
                } else if self.peek(lexer::include).is_some()
                    || self.peek(lexer::exactly(b'+')).is_some()
                {
                    let call = self.parse_mixin_call()?;
                    self.append(root, call);
                    if !self.lex(lexer::exactly(b';')) {
                        return self
                            .syntax_error("top-level @include directive must be terminated by ';'");
                    }
                } else if self.peek(lexer::if_directive).is_some() {
                    let conditional = self.parse_if_directive(None, BlockContext::None)?;
                    self.append(root, conditional);
                } else if self.peek(lexer::for_directive).is_some() {
                    let loop_node = self.parse_for_directive(None, BlockContext::None)?;
                    self.append(root, loop_node);
                } else if self.peek(lexer::each_directive).is_some() {
                    let each = self.parse_each_directive(None, BlockContext::None)?;
                    self.append(root, each);
                } else if self.peek(lexer::while_directive).is_some() {
                    let while_node = self.parse_while_directive(None, BlockContext::None)?;
                    self.append(root, while_node);
                } else if self.peek(lexer::media).is_some() {
                    let media = self.parse_media_query(BlockContext::None)?;
                    self.append(root, media);
                } else if self.peek(lexer::warn).is_some() {
                    let warning = self.parse_warning()?;
                    self.append(root, warning);
                    if !self.lex(lexer::exactly(b';')) {
                        return self
                            .syntax_error("top-level @warn directive must be terminated by ';'");
                    }
                } else if self.peek(lexer::directive).is_some() {
                    let dir = self.parse_directive(None, BlockContext::None)?;
                    if self.kind(dir) == NodeKind::BlocklessDirective
                        && !self.lex(lexer::exactly(b';'))
                    {
                        return self
                            .syntax_error("top-level blockless directive must be terminated by ';'");
                    }
                    self.append(root, dir);
                } else {
                    self.skip_spaces_and_comments();
                    if self.position >= self.end {
                        break;
                    }
                    return self.syntax_error("invalid top-level expression");
                }
            }
            self.skip_optional_spaces();
        }
        Ok(root)
    }

    // Blocks

    /// Parse a `{ ... }` block of statements. `surrounding_ruleset` is the
    /// nearest enclosing ruleset, required by `@extend`; `inside_of` carries
    /// the mixin/function restrictions.
    pub(crate) fn parse_block(
        &mut self,
        surrounding_ruleset: Option<NodeId>,
        inside_of: BlockContext,
    ) -> SassResult<NodeId> {
        self.lex(lexer::exactly(b'{'));
        let mut semicolon = false;
        let block = self.internal(NodeKind::Block, 0);
        while !self.lex(lexer::exactly(b'}')) {
            if semicolon {
                if !self.lex(lexer::exactly(b';')) {
                    return self
                        .syntax_error("non-terminal statement or declaration must end with ';'");
                }
                semicolon = false;
                while self.lex_block_comment() {
                    let comment = self.leaf_lexed(NodeKind::Comment);
                    self.append(block, comment);
                }
                if self.lex(lexer::exactly(b'}')) {
                    break;
                }
            }
            if self.lex_block_comment() {
                let comment = self.leaf_lexed(NodeKind::Comment);
                self.append(block, comment);
            } else if self.peek(lexer::import).is_some() {
                if matches!(inside_of, BlockContext::Mixin | BlockContext::Function) {
                    // consume the directive so the error points at it
                    self.lex(lexer::import);
                    return self.syntax_error(
                        "@import directive not allowed inside definition of mixin or function",
                    );
                }
                let imported = self.parse_import()?;
                if self.kind(imported) == NodeKind::CssImport {
                    self.append(block, imported);
                } else {
                    self.splice_children(block, imported);
                    semicolon = true;
                }
            } else if self.lex(lexer::variable) {
                let assignment = self.parse_assignment()?;
                self.append(block, assignment);
                semicolon = true;
            } else if self.peek(lexer::if_directive).is_some() {
                let conditional = self.parse_if_directive(surrounding_ruleset, inside_of)?;
                self.append(block, conditional);
            } else if self.peek(lexer::for_directive).is_some() {
                let loop_node = self.parse_for_directive(surrounding_ruleset, inside_of)?;
                self.append(block, loop_node);
            } else if self.peek(lexer::each_directive).is_some() {
                let each = self.parse_each_directive(surrounding_ruleset, inside_of)?;
                self.append(block, each);
            } else if self.peek(lexer::while_directive).is_some() {
                let while_node = self.parse_while_directive(surrounding_ruleset, inside_of)?;
                self.append(block, while_node);
            } else if self.lex(lexer::return_directive) {
                let line = self.line;
                let ret = self.internal_at(NodeKind::ReturnDirective, line, 1);
                let value = self.parse_list()?;
                self.append(ret, value);
                self.append(block, ret);
                semicolon = true;
            } else if self.peek(lexer::warn).is_some() {
                let warning = self.parse_warning()?;
                self.append(block, warning);
                semicolon = true;
            } else if inside_of == BlockContext::Function {
                return self.syntax_error(
                    "only variable declarations and control directives are allowed inside functions",
                );
            } else if self.peek(lexer::include).is_some() {
                let call = self.parse_mixin_call()?;
                self.append(block, call);
                semicolon = true;
            } else if self.peek(lexer::propset_head).is_some() {
                let propset = self.parse_propset()?;
                self.append(block, propset);
            } else {
                let lookahead = self.lookahead_for_selector(self.position);
                if lookahead.found.is_some() {
                    let ruleset = self.parse_ruleset(lookahead, inside_of)?;
                    self.append(block, ruleset);
                } else if self.peek(lexer::exactly(b'+')).is_some() {
                    let call = self.parse_mixin_call()?;
                    self.append(block, call);
                    semicolon = true;
                } else if self.lex(lexer::extend) {
                    let ruleset = match surrounding_ruleset {
                        Some(ruleset) => ruleset,
                        None => {
                            return self
                                .syntax_error("@extend directive may only be used within rules")
                        }
                    };
                    let extendee = self.parse_simple_selector_sequence()?;
                    self.ctx.extensions.insert(extendee, ruleset);
                    semicolon = true;
                } else if self.peek(lexer::media).is_some() {
                    let media = self.parse_media_query(inside_of)?;
                    self.append(block, media);
                } else if self.peek(lexer::directive).is_some() {
                    let dir = self.parse_directive(surrounding_ruleset, inside_of)?;
                    if self.kind(dir) == NodeKind::BlocklessDirective {
                        semicolon = true;
                    }
                    self.append(block, dir);
                } else if self.peek(lexer::exactly(b';')).is_none() {
                    let rule = self.parse_rule()?;
                    // an lbrace after a declaration promotes it to a namespaced
                    // propset whose own property is empty
                    if self.peek(lexer::exactly(b'{')).is_some() {
                        let inner = self.parse_block(None, BlockContext::None)?;
                        let line = self.line;
                        let propset = self.internal_at(NodeKind::Propset, line, 2);
                        let property = self.ctx.arena[rule].children()[0];
                        self.append(propset, property);
                        let empty_property = self.leaf(NodeKind::Property, Token::EMPTY);
                        self.ctx.arena.replace_child(rule, 0, empty_property);
                        self.ctx.arena.push_front(inner, rule);
                        self.append(propset, inner);
                        self.append(block, propset);
                    } else {
                        self.append(block, rule);
                        semicolon = true;
                    }
                } else {
                    self.lex(lexer::exactly(b';'));
                }
            }
            while self.lex_block_comment() {
                let comment = self.leaf_lexed(NodeKind::Comment);
                self.append(block, comment);
            }
        }
        Ok(block)
    }

    // Simple directives

    /// `@warn <list>` — the argument is always marked for evaluation.
    pub(crate) fn parse_warning(&mut self) -> SassResult<NodeId> {
        self.lex(lexer::warn);
        let line = self.line;
        let warning = self.internal_at(NodeKind::Warning, line, 1);
        let value = self.parse_list()?;
        self.append(warning, value);
        self.set_eval(value);
        Ok(warning)
    }

    /// An unrecognized `@`-directive: a bare leaf when blockless, or a name
    /// plus block when braced.
    pub(crate) fn parse_directive(
        &mut self,
        surrounding_ruleset: Option<NodeId>,
        inside_of: BlockContext,
    ) -> SassResult<NodeId> {
        self.lex(lexer::directive);
        let line = self.line;
        let name = self.leaf_lexed(NodeKind::BlocklessDirective);
        if self.peek(lexer::exactly(b'{')).is_none() {
            return Ok(name);
        }
        let block = self.parse_block(surrounding_ruleset, inside_of)?;
        let dir = self.internal_at(NodeKind::BlockDirective, line, 2);
        self.append(dir, name);
        self.append(dir, block);
        Ok(dir)
    }
}
