use crate::{
    ast::{NodeId, NodeKind},
    error::SassResult,
    lexer,
};

use super::{BlockContext, Parser};

impl<'a, 'ctx> Parser<'a, 'ctx> {
    /// `@media <expr> (, <expr>)* { ... }`. A single disjunct hangs directly
    /// off the query node; multiple disjuncts are wrapped in a
    /// `media_expression_group`.
    ///
    /// The block deliberately gets no surrounding ruleset, so `@extend`
    /// directly inside `@media` is rejected.
    pub(crate) fn parse_media_query(&mut self, inside_of: BlockContext) -> SassResult<NodeId> {
        self.lex(lexer::media);
        let line = self.line;
        let media_query = self.internal_at(NodeKind::MediaQuery, line, 2);
        let media_expr = self.parse_media_expression()?;
        if self.peek(lexer::exactly(b'{')).is_some() {
            self.append(media_query, media_expr);
        } else if self.peek(lexer::exactly(b',')).is_some() {
            let group = self.internal(NodeKind::MediaExpressionGroup, 2);
            self.append(group, media_expr);
            while self.lex(lexer::exactly(b',')) {
                let media_expr = self.parse_media_expression()?;
                self.append(group, media_expr);
            }
            self.append(media_query, group);
        } else {
            return self.syntax_error("expected '{' in media query");
        }
        let block = self.parse_block(None, inside_of)?;
        self.append(media_query, block);
        Ok(media_query)
    }

    /// One media disjunct: an optional `not`/`only` plus media type, or a
    /// bare media type, followed by `and (property: value)` pairs. With no
    /// media type, at least one parenthesized property is required.
    fn parse_media_expression(&mut self) -> SassResult<NodeId> {
        let media_expr = self.internal(NodeKind::MediaExpression, 1);
        if self.lex(lexer::not_kwd) || self.lex(lexer::only_kwd) {
            let qualifier = self.leaf_lexed(NodeKind::Identifier);
            self.append(media_expr, qualifier);
            if !self.lex(lexer::identifier) {
                return self.syntax_error("media type expected in media query");
            }
            let media_type = self.leaf_lexed(NodeKind::Identifier);
            self.append(media_expr, media_type);
        } else if self.lex(lexer::identifier) {
            let media_type = self.leaf_lexed(NodeKind::Identifier);
            self.append(media_expr, media_type);
        }
        if self.ctx.arena[media_expr].is_empty() {
            if !self.lex(lexer::exactly(b'(')) {
                return self.syntax_error("invalid media query");
            }
            let property = self.parse_rule()?;
            self.append(media_expr, property);
            if !self.lex(lexer::exactly(b')')) {
                return self.syntax_error("unclosed parenthesis");
            }
        }
        while self.peek(lexer::exactly(b',')).is_none() && self.peek(lexer::exactly(b'{')).is_none()
        {
            if !self.lex(lexer::and_kwd) {
                return self.syntax_error("invalid media query");
            }
            let conjunction = self.leaf_lexed(NodeKind::Identifier);
            self.append(media_expr, conjunction);
            if !self.lex(lexer::exactly(b'(')) {
                return self.syntax_error("invalid media query");
            }
            let property = self.parse_rule()?;
            self.append(media_expr, property);
            if !self.lex(lexer::exactly(b')')) {
                return self.syntax_error("unclosed parenthesis");
            }
        }
        Ok(media_expr)
    }
}
