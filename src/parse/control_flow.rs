use crate::{
    ast::{NodeId, NodeKind},
    error::SassResult,
    lexer,
};

use super::{BlockContext, Parser};

impl<'a, 'ctx> Parser<'a, 'ctx> {
    /// `@if` with any number of `@else if` clauses and an optional `@else`.
    /// Children alternate predicate, consequent, ..., with a trailing bare
    /// alternative block when `@else` is present.
    pub(crate) fn parse_if_directive(
        &mut self,
        surrounding_ruleset: Option<NodeId>,
        inside_of: BlockContext,
    ) -> SassResult<NodeId> {
        self.lex(lexer::if_directive);
        let line = self.line;
        let conditional = self.internal_at(NodeKind::IfDirective, line, 2);
        let predicate = self.parse_list()?;
        self.append(conditional, predicate);
        if !self.lex(lexer::exactly(b'{')) {
            return self.syntax_error("expected '{' after the predicate for @if");
        }
        let consequent = self.parse_block(surrounding_ruleset, inside_of)?;
        self.append(conditional, consequent);
        while self.lex(lexer::elseif_directive) {
            let predicate = self.parse_list()?;
            self.append(conditional, predicate);
            if !self.lex(lexer::exactly(b'{')) {
                return self.syntax_error("expected '{' after the predicate for @else if");
            }
            let consequent = self.parse_block(surrounding_ruleset, inside_of)?;
            self.append(conditional, consequent);
        }
        if self.lex(lexer::else_directive) {
            if !self.lex(lexer::exactly(b'{')) {
                return self.syntax_error("expected '{' after @else");
            }
            let alternative = self.parse_block(surrounding_ruleset, inside_of)?;
            self.append(conditional, alternative);
        }
        Ok(conditional)
    }

    /// `@for $var from <expr> (through|to) <expr> { ... }`. The node kind
    /// records whether the upper bound is inclusive.
    pub(crate) fn parse_for_directive(
        &mut self,
        surrounding_ruleset: Option<NodeId>,
        inside_of: BlockContext,
    ) -> SassResult<NodeId> {
        self.lex(lexer::for_directive);
        let line = self.line;
        if !self.lex(lexer::variable) {
            return self.syntax_error("@for directive requires an iteration variable");
        }
        let variable = self.leaf_lexed(NodeKind::Variable);
        if !self.lex(lexer::from_kwd) {
            return self.syntax_error("expected 'from' keyword in @for directive");
        }
        let lower_bound = self.parse_expression()?;
        let kind = if self.lex(lexer::through_kwd) {
            NodeKind::ForThroughDirective
        } else if self.lex(lexer::to_kwd) {
            NodeKind::ForToDirective
        } else {
            return self.syntax_error("expected 'through' or 'to' keyword in @for directive");
        };
        let upper_bound = self.parse_expression()?;
        if self.peek(lexer::exactly(b'{')).is_none() {
            return self.syntax_error("expected '{' after the upper bound in @for directive");
        }
        let body = self.parse_block(surrounding_ruleset, inside_of)?;
        let loop_node = self.internal_at(kind, line, 4);
        self.append(loop_node, variable);
        self.append(loop_node, lower_bound);
        self.append(loop_node, upper_bound);
        self.append(loop_node, body);
        Ok(loop_node)
    }

    /// `@each $var in <list> { ... }`.
    pub(crate) fn parse_each_directive(
        &mut self,
        surrounding_ruleset: Option<NodeId>,
        inside_of: BlockContext,
    ) -> SassResult<NodeId> {
        self.lex(lexer::each_directive);
        let line = self.line;
        if !self.lex(lexer::variable) {
            return self.syntax_error("@each directive requires an iteration variable");
        }
        let variable = self.leaf_lexed(NodeKind::Variable);
        if !self.lex(lexer::in_kwd) {
            return self.syntax_error("expected 'in' keyword in @each directive");
        }
        let list = self.parse_list()?;
        if self.peek(lexer::exactly(b'{')).is_none() {
            return self.syntax_error("expected '{' after the list in @each directive");
        }
        let body = self.parse_block(surrounding_ruleset, inside_of)?;
        let each = self.internal_at(NodeKind::EachDirective, line, 3);
        self.append(each, variable);
        self.append(each, list);
        self.append(each, body);
        Ok(each)
    }

    /// `@while <predicate> { ... }`.
    pub(crate) fn parse_while_directive(
        &mut self,
        surrounding_ruleset: Option<NodeId>,
        inside_of: BlockContext,
    ) -> SassResult<NodeId> {
        self.lex(lexer::while_directive);
        let line = self.line;
        let predicate = self.parse_list()?;
        let body = self.parse_block(surrounding_ruleset, inside_of)?;
        let loop_node = self.internal_at(NodeKind::WhileDirective, line, 2);
        self.append(loop_node, predicate);
        self.append(loop_node, body);
        Ok(loop_node)
    }
}
