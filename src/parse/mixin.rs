use crate::{
    ast::{NodeId, NodeKind},
    error::SassResult,
    lexer::{self, sequence},
};

use super::{BlockContext, Parser};

impl<'a, 'ctx> Parser<'a, 'ctx> {
    /// `@mixin name(params) { body }`, or the concise `=name(params) { body }`.
    pub(crate) fn parse_mixin_definition(&mut self) -> SassResult<NodeId> {
        let _ = self.lex(lexer::mixin) || self.lex(lexer::exactly(b'='));
        let line = self.line;
        if !self.lex(lexer::identifier) {
            return self.syntax_error("invalid name in @mixin directive");
        }
        let name_token = self.lexed;
        let name = self.leaf_lexed(NodeKind::Identifier);
        let params = self.parse_parameters()?;
        if self.peek(lexer::exactly(b'{')).is_none() {
            return self.syntax_error(format!(
                "body for mixin {} must begin with a '{{'",
                self.token_text(name_token)
            ));
        }
        let body = self.parse_block(None, BlockContext::Mixin)?;
        let mixin = self.internal_at(NodeKind::Mixin, line, 3);
        self.append(mixin, name);
        self.append(mixin, params);
        self.append(mixin, body);
        Ok(mixin)
    }

    /// `@function name(params) { body }`. The body's statement whitelist is
    /// enforced by the block parser.
    pub(crate) fn parse_function_definition(&mut self) -> SassResult<NodeId> {
        self.lex(lexer::function);
        let line = self.line;
        if !self.lex(lexer::identifier) {
            return self.syntax_error("name required for function definition");
        }
        let name_token = self.lexed;
        let name = self.leaf_lexed(NodeKind::Identifier);
        let params = self.parse_parameters()?;
        if self.peek(lexer::exactly(b'{')).is_none() {
            return self.syntax_error(format!(
                "body for function {} must begin with a '{{'",
                self.token_text(name_token)
            ));
        }
        let body = self.parse_block(None, BlockContext::Function)?;
        let function = self.internal_at(NodeKind::Function, line, 3);
        self.append(function, name);
        self.append(function, params);
        self.append(function, body);
        Ok(function)
    }

    /// A parenthesized parameter list, or nothing at all. `lexed` still holds
    /// the definition's name for error messages.
    pub(crate) fn parse_parameters(&mut self) -> SassResult<NodeId> {
        let params = self.internal(NodeKind::Parameters, 0);
        let name = self.lexed;
        if self.lex(lexer::exactly(b'(')) {
            if self.peek(lexer::variable).is_some() {
                let param = self.parse_parameter()?;
                self.append(params, param);
                while self.lex(lexer::exactly(b',')) {
                    if self.peek(lexer::variable).is_none() {
                        return self.syntax_error(format!(
                            "expected a variable name (e.g. $x) for the parameter list for {}",
                            self.token_text(name)
                        ));
                    }
                    let param = self.parse_parameter()?;
                    self.append(params, param);
                }
                if !self.lex(lexer::exactly(b')')) {
                    return self.syntax_error(format!(
                        "parameter list for {} requires a ')'",
                        self.token_text(name)
                    ));
                }
            } else if !self.lex(lexer::exactly(b')')) {
                return self.syntax_error(format!(
                    "expected a variable name (e.g. $x) or ')' for the parameter list for {}",
                    self.token_text(name)
                ));
            }
        }
        Ok(params)
    }

    /// One parameter: a bare variable, or `$var: default` parsed as an
    /// assignment.
    fn parse_parameter(&mut self) -> SassResult<NodeId> {
        self.lex(lexer::variable);
        let line = self.line;
        let variable = self.leaf_lexed(NodeKind::Variable);
        if self.lex(lexer::exactly(b':')) {
            let default = self.parse_space_list()?;
            let param = self.internal_at(NodeKind::Assignment, line, 2);
            self.append(param, variable);
            self.append(param, default);
            Ok(param)
        } else {
            Ok(variable)
        }
    }

    /// `@include name(args)`, or the concise `+name(args)`, producing an
    /// `expansion` node.
    pub(crate) fn parse_mixin_call(&mut self) -> SassResult<NodeId> {
        let _ = self.lex(lexer::include) || self.lex(lexer::exactly(b'+'));
        let line = self.line;
        if !self.lex(lexer::identifier) {
            return self.syntax_error("invalid name in @include directive");
        }
        let name = self.leaf_lexed(NodeKind::Identifier);
        let args = self.parse_arguments()?;
        let call = self.internal_at(NodeKind::Expansion, line, 2);
        self.append(call, name);
        self.append(call, args);
        Ok(call)
    }

    /// A parenthesized argument list, or nothing at all. Every argument is
    /// marked for evaluation. `lexed` still holds the callee's name for error
    /// messages.
    pub(crate) fn parse_arguments(&mut self) -> SassResult<NodeId> {
        let name = self.lexed;
        let args = self.internal(NodeKind::Arguments, 0);
        if self.lex(lexer::exactly(b'(')) {
            if self.peek(lexer::exactly(b')')).is_none() {
                let arg = self.parse_argument()?;
                self.set_eval(arg);
                self.append(args, arg);
                while self.lex(lexer::exactly(b',')) {
                    let arg = self.parse_argument()?;
                    self.set_eval(arg);
                    self.append(args, arg);
                }
            }
            if !self.lex(lexer::exactly(b')')) {
                return self.syntax_error(format!(
                    "improperly terminated argument list for {}",
                    self.token_text(name)
                ));
            }
        }
        Ok(args)
    }

    /// One argument: a space list, or a `$keyword: value` pair parsed as an
    /// assignment.
    fn parse_argument(&mut self) -> SassResult<NodeId> {
        if self
            .peek(sequence!(
                lexer::variable,
                lexer::spaces_and_comments,
                lexer::exactly(b':')
            ))
            .is_some()
        {
            self.lex(lexer::variable);
            let line = self.line;
            let variable = self.leaf_lexed(NodeKind::Variable);
            self.lex(lexer::exactly(b':'));
            let value = self.parse_space_list()?;
            let named = self.internal_at(NodeKind::Assignment, line, 2);
            self.append(named, variable);
            self.append(named, value);
            Ok(named)
        } else {
            self.parse_space_list()
        }
    }
}
