use crate::{
    ast::{NodeId, NodeKind},
    error::SassResult,
    lexer::{self, alternatives, sequence, Token},
};

use super::{BlockContext, Parser};

/// The verdict of [`Parser::lookahead_for_selector`]: where the selector's
/// terminating `{` begins, if one was reached, and whether the scanned span
/// contained an interpolant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SelectorLookahead {
    pub found: Option<usize>,
    pub has_interpolants: bool,
}

impl<'a, 'ctx> Parser<'a, 'ctx> {
    /// Walk forward from `start` over every token that may legally appear in
    /// a selector. If the walk ends just before a `{`, the segment is a
    /// selector header; otherwise the caller falls through to the declaration
    /// grammar.
    pub(crate) fn lookahead_for_selector(&self, start: usize) -> SelectorLookahead {
        let mut p = start;
        let mut saw_interpolant = false;

        loop {
            let q = self
                .peek_at(lexer::identifier, p)
                .or_else(|| self.peek_at(lexer::id_name, p))
                .or_else(|| self.peek_at(lexer::class_name, p))
                .or_else(|| self.peek_at(sequence!(lexer::pseudo_prefix, lexer::identifier), p))
                .or_else(|| self.peek_at(lexer::string_constant, p))
                .or_else(|| self.peek_at(lexer::exactly(b'*'), p))
                .or_else(|| self.peek_at(lexer::exactly(b'('), p))
                .or_else(|| self.peek_at(lexer::exactly(b')'), p))
                .or_else(|| self.peek_at(lexer::exactly(b'['), p))
                .or_else(|| self.peek_at(lexer::exactly(b']'), p))
                .or_else(|| self.peek_at(lexer::exactly(b'+'), p))
                .or_else(|| self.peek_at(lexer::exactly(b'~'), p))
                .or_else(|| self.peek_at(lexer::exactly(b'>'), p))
                .or_else(|| self.peek_at(lexer::exactly(b','), p))
                .or_else(|| self.peek_at(lexer::binomial, p))
                .or_else(|| {
                    self.peek_at(
                        sequence!(
                            lexer::optional(lexer::sign),
                            lexer::optional(lexer::digits),
                            lexer::exactly(b'n')
                        ),
                        p,
                    )
                })
                .or_else(|| {
                    self.peek_at(sequence!(lexer::optional(lexer::sign), lexer::digits), p)
                })
                .or_else(|| self.peek_at(lexer::number, p))
                .or_else(|| self.peek_at(lexer::exactly(b'&'), p))
                .or_else(|| self.peek_at(lexer::attribute_operator, p))
                .or_else(|| self.peek_at(sequence!(lexer::exactly(b'.'), lexer::interpolant), p))
                .or_else(|| self.peek_at(sequence!(lexer::exactly(b'#'), lexer::interpolant), p))
                .or_else(|| self.peek_at(sequence!(lexer::exactly(b'-'), lexer::interpolant), p))
                .or_else(|| self.peek_at(sequence!(lexer::pseudo_prefix, lexer::interpolant), p))
                .or_else(|| self.peek_at(lexer::interpolant, p));

            match q {
                Some(q) => {
                    p = q;
                    if p > 0 && self.src().get(p - 1) == Some(&b'}') {
                        saw_interpolant = true;
                    }
                }
                None => break,
            }
        }

        SelectorLookahead {
            found: self.peek_at(lexer::exactly(b'{'), p).map(|_| p),
            has_interpolants: saw_interpolant,
        }
    }

    /// A ruleset: one selector-family header followed by one block. The
    /// block's statements see this ruleset as their surrounding rule.
    pub(crate) fn parse_ruleset(
        &mut self,
        lookahead: SelectorLookahead,
        inside_of: BlockContext,
    ) -> SassResult<NodeId> {
        let header = if lookahead.has_interpolants {
            let end_of_selector = lookahead.found.unwrap_or(self.position);
            self.parse_selector_schema(end_of_selector)?
        } else {
            self.parse_selector_group()?
        };
        let line = self.ctx.arena[header].line();
        let ruleset = self.internal_at(NodeKind::Ruleset, line, 3);
        self.append(ruleset, header);
        if self.peek(lexer::exactly(b'{')).is_none() {
            return self.syntax_error("expected a '{' after the selector");
        }
        let block = self.parse_block(Some(ruleset), inside_of)?;
        self.append(ruleset, block);
        Ok(ruleset)
    }

    /// An interpolated selector header over `[position, end_of_selector)`:
    /// literal runs become identifier leaves, `#{ ... }` bodies are parsed as
    /// lists, in textual order.
    pub(crate) fn parse_selector_schema(&mut self, end_of_selector: usize) -> SassResult<NodeId> {
        let schema = self.internal(NodeKind::SelectorSchema, 1);
        let mut i = self.position;

        while i < end_of_selector {
            let p = {
                let src = self.src();
                lexer::find_first_in_interval(src, i, end_of_selector, lexer::literal("#{"))
            };
            match p {
                Some(p) => {
                    if i < p {
                        let fragment = self.leaf(NodeKind::Identifier, Token::new(i, p));
                        self.append(schema, fragment);
                    }
                    let j = {
                        let src = self.src();
                        lexer::find_first_in_interval(src, p, end_of_selector, lexer::exactly(b'}'))
                    };
                    let j = match j {
                        Some(j) => j,
                        None => return self.syntax_error("unterminated interpolant in selector"),
                    };
                    let interpolant = self.parse_token_list(Token::new(p + 2, j))?;
                    self.set_eval(interpolant);
                    self.append(schema, interpolant);
                    i = j + 1;
                }
                None => {
                    if i < end_of_selector {
                        let fragment = self.leaf(NodeKind::Identifier, Token::new(i, end_of_selector));
                        self.append(schema, fragment);
                    }
                    break;
                }
            }
        }
        self.advance_to(end_of_selector);
        Ok(schema)
    }

    /// `selector (, selector)*`.
    pub(crate) fn parse_selector_group(&mut self) -> SassResult<NodeId> {
        let line = self.line;
        let first = self.parse_selector()?;
        if self.peek(lexer::exactly(b',')).is_none() {
            return Ok(first);
        }

        let group = self.internal_at(NodeKind::SelectorGroup, line, 2);
        self.append(group, first);
        while self.lex(lexer::exactly(b',')) {
            let selector = self.parse_selector()?;
            self.append(group, selector);
        }
        Ok(group)
    }

    /// A whitespace-separated chain of simple selector sequences; the
    /// whitespace is the descendant combinator.
    fn parse_selector(&mut self) -> SassResult<NodeId> {
        let line = self.line;
        let first = self.parse_simple_selector_sequence()?;
        if self.peek(lexer::exactly(b',')).is_some()
            || self.peek(lexer::exactly(b')')).is_some()
            || self.peek(lexer::exactly(b'{')).is_some()
        {
            return Ok(first);
        }

        let selector = self.internal_at(NodeKind::Selector, line, 2);
        self.append(selector, first);
        while self.peek(lexer::exactly(b'{')).is_none() && self.peek(lexer::exactly(b',')).is_none()
        {
            let sequence = self.parse_simple_selector_sequence()?;
            self.append(selector, sequence);
        }
        Ok(selector)
    }

    /// One compound of simple selectors, or a lone `+`/`~`/`>` combinator.
    /// A backref or type/universal selector may only appear at the front.
    pub(crate) fn parse_simple_selector_sequence(&mut self) -> SassResult<NodeId> {
        if self.lex(lexer::exactly(b'+'))
            || self.lex(lexer::exactly(b'~'))
            || self.lex(lexer::exactly(b'>'))
        {
            return Ok(self.leaf_lexed(NodeKind::SelectorCombinator));
        }

        let first = if self.lex(lexer::exactly(b'&')) {
            self.leaf_lexed(NodeKind::Backref)
        } else if self.lex(alternatives!(lexer::type_selector, lexer::universal)) {
            self.leaf_lexed(NodeKind::SimpleSelector)
        } else {
            self.parse_simple_selector()?
        };

        if self.at_sequence_boundary() {
            return Ok(first);
        }

        let line = self.line;
        let sequence = self.internal_at(NodeKind::SimpleSelectorSequence, line, 2);
        self.append(sequence, first);
        while !self.at_sequence_boundary() {
            let simple = self.parse_simple_selector()?;
            self.append(sequence, simple);
        }
        Ok(sequence)
    }

    /// Whether the current position ends a simple selector sequence: raw
    /// whitespace (the descendant combinator) or a selector delimiter.
    fn at_sequence_boundary(&self) -> bool {
        self.peek_raw(lexer::spaces).is_some()
            || self.peek(lexer::exactly(b'>')).is_some()
            || self.peek(lexer::exactly(b'+')).is_some()
            || self.peek(lexer::exactly(b'~')).is_some()
            || self.peek(lexer::exactly(b',')).is_some()
            || self.peek(lexer::exactly(b')')).is_some()
            || self.peek(lexer::exactly(b'{')).is_some()
            || self.peek(lexer::exactly(b';')).is_some()
            || self.position >= self.end
    }

    /// An id, class, pseudo, or attribute selector.
    fn parse_simple_selector(&mut self) -> SassResult<NodeId> {
        if self.lex(lexer::id_name) || self.lex(lexer::class_name) {
            Ok(self.leaf_lexed(NodeKind::SimpleSelector))
        } else if self.peek(lexer::exactly(b':')).is_some() {
            self.parse_pseudo()
        } else if self.peek(lexer::exactly(b'[')).is_some() {
            self.parse_attribute_selector()
        } else {
            self.syntax_error(format!(
                "invalid selector after {}",
                self.token_text(self.lexed)
            ))
        }
    }

    /// `:not(<selector group>)`, a functional pseudo-class with its argument,
    /// or a plain pseudo-class/element.
    fn parse_pseudo(&mut self) -> SassResult<NodeId> {
        if self.lex(lexer::pseudo_not) {
            let line = self.line;
            let negation = self.internal_at(NodeKind::PseudoNegation, line, 2);
            let name = self.leaf_lexed(NodeKind::Value);
            self.append(negation, name);
            let group = self.parse_selector_group()?;
            self.append(negation, group);
            self.lex(lexer::exactly(b')'));
            return Ok(negation);
        }
        if self.lex(sequence!(lexer::pseudo_prefix, lexer::functional)) {
            let line = self.line;
            let name = self.lexed;
            let pseudo = self.internal_at(NodeKind::FunctionalPseudo, line, 2);
            let name_node = self.leaf(NodeKind::Value, name);
            self.append(pseudo, name_node);
            if self.lex(alternatives!(lexer::even, lexer::odd)) {
                let arg = self.leaf_lexed(NodeKind::Value);
                self.append(pseudo, arg);
            } else if self.peek(lexer::binomial).is_some() {
                self.lex(lexer::coefficient);
                let coefficient = self.leaf_lexed(NodeKind::Value);
                self.append(pseudo, coefficient);
                self.lex(lexer::exactly(b'n'));
                let n = self.leaf_lexed(NodeKind::Value);
                self.append(pseudo, n);
                self.lex(lexer::sign);
                let sign = self.leaf_lexed(NodeKind::Value);
                self.append(pseudo, sign);
                self.lex(lexer::digits);
                let digits = self.leaf_lexed(NodeKind::Value);
                self.append(pseudo, digits);
            } else if self.lex(sequence!(
                lexer::optional(lexer::sign),
                lexer::optional(lexer::digits),
                lexer::exactly(b'n')
            )) {
                let arg = self.leaf_lexed(NodeKind::Value);
                self.append(pseudo, arg);
            } else if self.lex(sequence!(lexer::optional(lexer::sign), lexer::digits)) {
                let arg = self.leaf_lexed(NodeKind::Value);
                self.append(pseudo, arg);
            } else if self.lex(lexer::identifier) {
                let arg = self.leaf_lexed(NodeKind::Identifier);
                self.append(pseudo, arg);
            } else {
                return self.syntax_error(format!(
                    "invalid argument to {}...)",
                    self.token_text(name)
                ));
            }
            if !self.lex(lexer::exactly(b')')) {
                return self.syntax_error(format!(
                    "unterminated argument to {}...)",
                    self.token_text(name)
                ));
            }
            return Ok(pseudo);
        }
        if self.lex(sequence!(lexer::pseudo_prefix, lexer::identifier)) {
            return Ok(self.leaf_lexed(NodeKind::Pseudo));
        }
        self.syntax_error("unrecognized pseudo-class or pseudo-element")
    }

    /// `[name]` or `[name <op> (string|identifier)]`.
    fn parse_attribute_selector(&mut self) -> SassResult<NodeId> {
        let line = self.line;
        let attribute = self.internal_at(NodeKind::AttributeSelector, line, 3);
        self.lex(lexer::exactly(b'['));
        if !self.lex(lexer::type_selector) {
            return self.syntax_error("invalid attribute name in attribute selector");
        }
        let name = self.lexed;
        let name_node = self.leaf(NodeKind::Value, name);
        self.append(attribute, name_node);
        if self.lex(lexer::exactly(b']')) {
            return Ok(attribute);
        }
        if !self.lex(lexer::attribute_operator) {
            return self.syntax_error(format!(
                "invalid operator in attribute selector for {}",
                self.token_text(name)
            ));
        }
        let operator = self.leaf_lexed(NodeKind::Value);
        self.append(attribute, operator);
        if !self.lex(lexer::string_constant) && !self.lex(lexer::identifier) {
            return self.syntax_error(format!(
                "expected a string constant or identifier in attribute selector for {}",
                self.token_text(name)
            ));
        }
        let value = self.leaf_lexed(NodeKind::Value);
        self.append(attribute, value);
        if !self.lex(lexer::exactly(b']')) {
            return self.syntax_error(format!(
                "unterminated attribute selector for {}",
                self.token_text(name)
            ));
        }
        Ok(attribute)
    }
}
