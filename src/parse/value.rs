use crate::{
    ast::{NodeId, NodeKind},
    error::SassResult,
    lexer::{self, sequence, Token},
};

use super::Parser;

impl<'a, 'ctx> Parser<'a, 'ctx> {
    /// Parse the body of a token as a list, on a sub-parser sharing this
    /// parser's arena. Used for `#{ ... }` interpolant bodies.
    pub(crate) fn parse_token_list(&mut self, token: Token) -> SassResult<NodeId> {
        let mut sub = self.from_token(token);
        sub.parse_list()
    }

    pub(crate) fn parse_list(&mut self) -> SassResult<NodeId> {
        self.parse_comma_list()
    }

    /// `space_list (, space_list)*`, or `nil` when the list is empty.
    /// Singletons collapse to their only element.
    fn parse_comma_list(&mut self) -> SassResult<NodeId> {
        if self.peek(lexer::exactly(b';')).is_some()
            || self.peek(lexer::exactly(b'}')).is_some()
            || self.peek(lexer::exactly(b'{')).is_some()
            || self.peek(lexer::exactly(b')')).is_some()
        {
            return Ok(self.internal(NodeKind::Nil, 0));
        }
        let line = self.line;
        let first = self.parse_space_list()?;
        if self.peek(lexer::exactly(b',')).is_none() {
            return Ok(first);
        }

        let comma_list = self.internal_at(NodeKind::CommaList, line, 2);
        self.append(comma_list, first);
        self.inherit_eval(comma_list, first);

        while self.lex(lexer::exactly(b',')) {
            let list = self.parse_space_list()?;
            self.append(comma_list, list);
            self.inherit_eval(comma_list, list);
        }

        Ok(comma_list)
    }

    fn at_space_list_end(&self) -> bool {
        self.peek(lexer::exactly(b';')).is_some()
            || self.peek(lexer::exactly(b'}')).is_some()
            || self.peek(lexer::exactly(b'{')).is_some()
            || self.peek(lexer::exactly(b')')).is_some()
            || self.peek(lexer::exactly(b',')).is_some()
            || self.peek(lexer::default_flag).is_some()
            || self.position >= self.end
    }

    /// Adjacent disjunctions form a space-separated list. Singletons collapse.
    pub(crate) fn parse_space_list(&mut self) -> SassResult<NodeId> {
        let line = self.line;
        let first = self.parse_disjunction()?;
        if self.at_space_list_end() {
            return Ok(first);
        }

        let space_list = self.internal_at(NodeKind::SpaceList, line, 2);
        self.append(space_list, first);
        self.inherit_eval(space_list, first);

        while !self.at_space_list_end() {
            let disjunct = self.parse_disjunction()?;
            self.append(space_list, disjunct);
            self.inherit_eval(space_list, disjunct);
        }

        Ok(space_list)
    }

    /// `conjunction (or conjunction)*`. Singletons collapse; a real
    /// disjunction is always marked for evaluation.
    fn parse_disjunction(&mut self) -> SassResult<NodeId> {
        let line = self.line;
        let first = self.parse_conjunction()?;
        if self
            .peek(sequence!(lexer::or_kwd, lexer::negate(lexer::identifier)))
            .is_none()
        {
            return Ok(first);
        }

        let disjunction = self.internal_at(NodeKind::Disjunction, line, 2);
        self.append(disjunction, first);
        while self.lex(sequence!(lexer::or_kwd, lexer::negate(lexer::identifier))) {
            let conjunct = self.parse_conjunction()?;
            self.append(disjunction, conjunct);
        }
        self.set_eval(disjunction);

        Ok(disjunction)
    }

    /// `relation (and relation)*`. Singletons collapse; a real conjunction is
    /// always marked for evaluation.
    fn parse_conjunction(&mut self) -> SassResult<NodeId> {
        let line = self.line;
        let first = self.parse_relation()?;
        if self
            .peek(sequence!(lexer::and_kwd, lexer::negate(lexer::identifier)))
            .is_none()
        {
            return Ok(first);
        }

        let conjunction = self.internal_at(NodeKind::Conjunction, line, 2);
        self.append(conjunction, first);
        while self.lex(sequence!(lexer::and_kwd, lexer::negate(lexer::identifier))) {
            let relation = self.parse_relation()?;
            self.append(conjunction, relation);
        }
        self.set_eval(conjunction);
        Ok(conjunction)
    }

    /// A strictly binary comparison: left, operator, right. No chaining.
    fn parse_relation(&mut self) -> SassResult<NodeId> {
        let line = self.line;
        let left = self.parse_expression()?;
        if self.peek(lexer::eq_op).is_none()
            && self.peek(lexer::neq_op).is_none()
            && self.peek(lexer::gt_op).is_none()
            && self.peek(lexer::gte_op).is_none()
            && self.peek(lexer::lt_op).is_none()
            && self.peek(lexer::lte_op).is_none()
        {
            return Ok(left);
        }

        let relation = self.internal_at(NodeKind::Relation, line, 3);
        self.set_eval(left);
        self.append(relation, left);

        // >= and <= must be tried before > and <
        let operator = if self.lex(lexer::eq_op) {
            NodeKind::Eq
        } else if self.lex(lexer::neq_op) {
            NodeKind::Neq
        } else if self.lex(lexer::gte_op) {
            NodeKind::Gte
        } else if self.lex(lexer::lte_op) {
            NodeKind::Lte
        } else if self.lex(lexer::gt_op) {
            NodeKind::Gt
        } else {
            self.lex(lexer::lt_op);
            NodeKind::Lt
        };
        let operator = self.leaf_lexed(operator);
        self.append(relation, operator);

        let right = self.parse_expression()?;
        self.set_eval(right);
        self.append(relation, right);

        self.set_eval(relation);
        Ok(relation)
    }

    /// `term ((+|-) term)*`. Subtraction is not taken when the `-` is the
    /// sign of the number that follows.
    pub(crate) fn parse_expression(&mut self) -> SassResult<NodeId> {
        let line = self.line;
        let first = self.parse_term()?;
        if self.peek(lexer::exactly(b'+')).is_none()
            && self
                .peek(sequence!(lexer::negate(lexer::number), lexer::exactly(b'-')))
                .is_none()
        {
            return Ok(first);
        }

        let expression = self.internal_at(NodeKind::Expression, line, 3);
        self.set_eval(first);
        self.append(expression, first);

        while self.lex(lexer::exactly(b'+'))
            || self.lex(sequence!(lexer::negate(lexer::number), lexer::exactly(b'-')))
        {
            let is_plus = self.token_text(self.lexed).starts_with('+');
            let operator = if is_plus {
                self.leaf_lexed(NodeKind::Add)
            } else {
                self.leaf_lexed(NodeKind::Sub)
            };
            self.append(expression, operator);
            let term = self.parse_term()?;
            self.set_eval(term);
            self.append(expression, term);
        }
        self.set_eval(expression);

        Ok(expression)
    }

    /// `factor ((*|/) factor)*`. A `*` forces evaluation; a lone `/` does
    /// not, so slash-separated CSS shorthand values survive as written.
    fn parse_term(&mut self) -> SassResult<NodeId> {
        let line = self.line;
        let first = self.parse_factor()?;
        if self.peek(lexer::exactly(b'*')).is_none() && self.peek(lexer::exactly(b'/')).is_none() {
            return Ok(first);
        }

        let term = self.internal_at(NodeKind::Term, line, 3);
        self.append(term, first);
        self.inherit_eval(term, first);

        while self.lex(lexer::exactly(b'*')) || self.lex(lexer::exactly(b'/')) {
            let is_mul = self.token_text(self.lexed).starts_with('*');
            if is_mul {
                let operator = self.leaf_lexed(NodeKind::Mul);
                self.append(term, operator);
                self.set_eval(term);
            } else {
                let operator = self.leaf_lexed(NodeKind::Div);
                self.append(term, operator);
            }
            let factor = self.parse_factor()?;
            self.inherit_eval(term, factor);
            self.append(term, factor);
        }

        Ok(term)
    }

    /// A parenthesized list, a unary sign applied to a non-numeric operand,
    /// or an atomic value.
    fn parse_factor(&mut self) -> SassResult<NodeId> {
        if self.lex(lexer::exactly(b'(')) {
            let value = self.parse_comma_list()?;
            self.set_eval(value);
            if matches!(self.kind(value), NodeKind::CommaList | NodeKind::SpaceList) {
                if let Some(&first) = self.ctx.arena[value].children().first() {
                    self.set_eval(first);
                }
            }
            if !self.lex(lexer::exactly(b')')) {
                return self.syntax_error("unclosed parenthesis");
            }
            Ok(value)
        } else if self.lex(sequence!(lexer::exactly(b'+'), lexer::negate(lexer::number))) {
            let line = self.line;
            let plus = self.internal_at(NodeKind::UnaryPlus, line, 1);
            let operand = self.parse_factor()?;
            self.append(plus, operand);
            self.set_eval(plus);
            Ok(plus)
        } else if self.lex(sequence!(lexer::exactly(b'-'), lexer::negate(lexer::number))) {
            let line = self.line;
            let minus = self.internal_at(NodeKind::UnaryMinus, line, 1);
            let operand = self.parse_factor()?;
            self.append(minus, operand);
            self.set_eval(minus);
            Ok(minus)
        } else {
            self.parse_value()
        }
    }

    /// One atomic value. The alternatives are ordered: a `url(...)` whose
    /// parentheses hold no variable is an opaque URI; `url($x)` falls through
    /// to the function-call grammar.
    fn parse_value(&mut self) -> SassResult<NodeId> {
        if self.peek(lexer::uri_prefix).is_some()
            && self
                .peek(sequence!(lexer::uri_prefix, lexer::variable))
                .is_none()
        {
            self.lex(lexer::uri_prefix);
            let begin = self.position;
            let rparen = {
                let src = self.src();
                lexer::find_first(src, begin, lexer::exactly(b')'))
            };
            let rparen = match rparen {
                Some(rparen) => rparen,
                None => return self.syntax_error("URI is missing ')'"),
            };
            let uri = self.leaf(NodeKind::Uri, Token::new(begin, rparen));
            self.advance_to(rparen);
            self.lex(lexer::exactly(b')'));
            return Ok(uri);
        }

        if self.peek(lexer::functional).is_some() {
            return self.parse_function_call();
        }

        if self.lex(lexer::value_schema) {
            let schema = self.lexed;
            let mut sub = self.from_token(schema);
            return sub.parse_value_schema();
        }

        if self.lex(sequence!(lexer::true_kwd, lexer::negate(lexer::identifier))) {
            return Ok(self.leaf_lexed(NodeKind::Boolean));
        }

        if self.lex(sequence!(lexer::false_kwd, lexer::negate(lexer::identifier))) {
            return Ok(self.leaf_lexed(NodeKind::Boolean));
        }

        if self.lex(lexer::important) {
            return Ok(self.leaf_lexed(NodeKind::Important));
        }

        if self.lex(lexer::identifier) {
            return Ok(self.leaf_lexed(NodeKind::Identifier));
        }

        if self.lex(lexer::percentage) {
            return Ok(self.leaf_lexed(NodeKind::TextualPercentage));
        }

        if self.lex(lexer::dimension) {
            return Ok(self.leaf_lexed(NodeKind::TextualDimension));
        }

        if self.lex(lexer::number) {
            return Ok(self.leaf_lexed(NodeKind::TextualNumber));
        }

        if self.lex(lexer::hex) {
            return Ok(self.leaf_lexed(NodeKind::TextualHex));
        }

        if self.peek(lexer::string_constant).is_some() {
            return self.parse_string();
        }

        if self.lex(lexer::variable) {
            let variable = self.leaf_lexed(NodeKind::Variable);
            self.set_eval(variable);
            return Ok(variable);
        }

        self.syntax_error(format!(
            "error reading values after {}",
            self.token_text(self.lexed)
        ))
    }

    /// A quoted string: a plain constant when it holds no interpolant,
    /// otherwise a schema alternating literal runs with parsed interpolant
    /// bodies. The surrounding quotes stay inside the outermost fragments.
    pub(crate) fn parse_string(&mut self) -> SassResult<NodeId> {
        self.lex(lexer::string_constant);
        let string = self.lexed;
        let (begin, end) = (string.begin(), string.end());

        let interpolant_start = sequence!(
            lexer::negate(lexer::exactly(b'\\')),
            lexer::literal("#{")
        );

        let first = {
            let src = self.src();
            lexer::find_first_in_interval(src, begin, end, interpolant_start)
        };
        if first.is_none() {
            return Ok(self.leaf(NodeKind::StringConstant, string));
        }

        let schema = self.internal(NodeKind::StringSchema, 1);
        let mut i = begin;
        while i < end {
            let p = {
                let src = self.src();
                lexer::find_first_in_interval(src, i, end, interpolant_start)
            };
            match p {
                Some(p) => {
                    if i < p {
                        let fragment = self.leaf(NodeKind::Identifier, Token::new(i, p));
                        self.append(schema, fragment);
                    }
                    let j = {
                        let src = self.src();
                        lexer::find_first_in_interval(src, p, end, lexer::exactly(b'}'))
                    };
                    match j {
                        Some(j) => {
                            let interpolant = self.parse_token_list(Token::new(p + 2, j))?;
                            self.set_eval(interpolant);
                            self.append(schema, interpolant);
                            i = j + 1;
                        }
                        None => {
                            return self.syntax_error(format!(
                                "unterminated interpolant inside string constant {}",
                                self.token_text(string)
                            ));
                        }
                    }
                }
                None => {
                    if i < end {
                        let fragment = self.leaf(NodeKind::Identifier, Token::new(i, end));
                        self.append(schema, fragment);
                    }
                    break;
                }
            }
        }
        self.set_eval(schema);
        Ok(schema)
    }

    /// The second pass over a lexed value schema: retokenize the span into
    /// identifiers, numerics, strings, variables, and interpolant bodies.
    /// Runs on a sub-parser bounded to the schema's token.
    pub(crate) fn parse_value_schema(&mut self) -> SassResult<NodeId> {
        let schema = self.internal(NodeKind::ValueSchema, 1);

        while self.position < self.end {
            if self.lex(lexer::interpolant) {
                let insides = Token::new(self.lexed.begin() + 2, self.lexed.end() - 1);
                let interpolant = self.parse_token_list(insides)?;
                self.append(schema, interpolant);
            } else if self.lex(lexer::identifier) {
                let fragment = self.leaf_lexed(NodeKind::Identifier);
                self.append(schema, fragment);
            } else if self.lex(lexer::percentage) {
                let fragment = self.leaf_lexed(NodeKind::TextualPercentage);
                self.append(schema, fragment);
            } else if self.lex(lexer::dimension) {
                let fragment = self.leaf_lexed(NodeKind::TextualDimension);
                self.append(schema, fragment);
            } else if self.lex(lexer::number) {
                let fragment = self.leaf_lexed(NodeKind::TextualNumber);
                self.append(schema, fragment);
            } else if self.lex(lexer::hex) {
                let fragment = self.leaf_lexed(NodeKind::TextualHex);
                self.append(schema, fragment);
            } else if self.lex(lexer::string_constant) {
                let fragment = self.leaf_lexed(NodeKind::StringConstant);
                self.append(schema, fragment);
            } else if self.lex(lexer::variable) {
                let fragment = self.leaf_lexed(NodeKind::Variable);
                self.append(schema, fragment);
            } else {
                return self.syntax_error("error parsing interpolated value");
            }
        }
        self.set_eval(schema);
        Ok(schema)
    }

    /// An identifier containing interpolants, e.g. an interpolated property
    /// name. Plain identifiers that reach here become string constants.
    ///
    /// The schema token may already have been consumed by the caller; the
    /// re-lex below recovers it from `lexed` in that case.
    pub(crate) fn parse_identifier_schema(&mut self) -> SassResult<NodeId> {
        self.lex(sequence!(
            lexer::optional(lexer::exactly(b'*')),
            lexer::identifier_schema
        ));
        let id = self.lexed;
        let (begin, end) = (id.begin(), id.end());

        let interpolant_start = sequence!(
            lexer::negate(lexer::exactly(b'\\')),
            lexer::literal("#{")
        );

        let first = {
            let src = self.src();
            lexer::find_first_in_interval(src, begin, end, interpolant_start)
        };
        if first.is_none() {
            return Ok(self.leaf(NodeKind::StringConstant, id));
        }

        let schema = self.internal(NodeKind::IdentifierSchema, 1);
        let mut i = begin;
        while i < end {
            let p = {
                let src = self.src();
                lexer::find_first_in_interval(src, i, end, interpolant_start)
            };
            match p {
                Some(p) => {
                    if i < p {
                        let fragment = self.leaf(NodeKind::Identifier, Token::new(i, p));
                        self.append(schema, fragment);
                    }
                    let j = {
                        let src = self.src();
                        lexer::find_first_in_interval(src, p, end, lexer::exactly(b'}'))
                    };
                    match j {
                        Some(j) => {
                            let interpolant = self.parse_token_list(Token::new(p + 2, j))?;
                            self.set_eval(interpolant);
                            self.append(schema, interpolant);
                            i = j + 1;
                        }
                        None => {
                            return self.syntax_error(format!(
                                "unterminated interpolant inside interpolated identifier {}",
                                self.token_text(id)
                            ));
                        }
                    }
                }
                None => {
                    if i < end {
                        let fragment = self.leaf(NodeKind::Identifier, Token::new(i, end));
                        self.append(schema, fragment);
                    }
                    break;
                }
            }
        }
        self.set_eval(schema);
        Ok(schema)
    }

    /// `name(args)`. The name may itself be an identifier schema.
    fn parse_function_call(&mut self) -> SassResult<NodeId> {
        let line = self.line;
        let name = if self.lex(lexer::identifier_schema) {
            self.parse_identifier_schema()?
        } else {
            self.lex(lexer::identifier);
            self.leaf_lexed(NodeKind::Identifier)
        };

        let args = self.parse_arguments()?;
        let call = self.internal_at(NodeKind::FunctionCall, line, 2);
        self.append(call, name);
        self.append(call, args);
        self.set_eval(call);
        Ok(call)
    }
}
