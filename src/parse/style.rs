use crate::{
    ast::{NodeId, NodeKind},
    error::SassResult,
    lexer::{self, sequence},
};

use super::Parser;

impl<'a, 'ctx> Parser<'a, 'ctx> {
    /// A property declaration: `property: <list>`. Interpolated property
    /// names parse as identifier schemas; plain names (optionally starred for
    /// the old IE hack) become `property` leaves.
    pub(crate) fn parse_rule(&mut self) -> SassResult<NodeId> {
        let property = if self
            .peek(sequence!(
                lexer::optional(lexer::exactly(b'*')),
                lexer::identifier_schema
            ))
            .is_some()
        {
            self.parse_identifier_schema()?
        } else if self.lex(sequence!(
            lexer::optional(lexer::exactly(b'*')),
            lexer::identifier
        )) {
            self.leaf_lexed(NodeKind::Property)
        } else {
            return self.syntax_error("invalid property name");
        };
        let line = self.ctx.arena[property].line();
        let rule = self.internal_at(NodeKind::Rule, line, 2);
        self.append(rule, property);
        if !self.lex(lexer::exactly(b':')) {
            return self.syntax_error(format!(
                "property \"{}\" must be followed by a ':'",
                self.token_text(self.lexed)
            ));
        }
        let value = self.parse_list()?;
        self.append(rule, value);
        Ok(rule)
    }

    /// A namespaced property: `prefix: { sub-rules }`. Propsets may nest.
    pub(crate) fn parse_propset(&mut self) -> SassResult<NodeId> {
        self.lex(lexer::identifier);
        let line = self.line;
        let property_segment = self.leaf_lexed(NodeKind::Identifier);
        self.lex(lexer::exactly(b':'));
        self.lex(lexer::exactly(b'{'));
        let block = self.internal(NodeKind::Block, 1);
        while !self.lex(lexer::exactly(b'}')) {
            if self.peek(lexer::propset_head).is_some() {
                let inner = self.parse_propset()?;
                self.append(block, inner);
            } else {
                let rule = self.parse_rule()?;
                self.append(block, rule);
                self.lex(lexer::exactly(b';'));
            }
        }
        if self.ctx.arena[block].is_empty() {
            return self.syntax_error("namespaced property cannot be empty");
        }
        let propset = self.internal_at(NodeKind::Propset, line, 2);
        self.append(propset, property_segment);
        self.append(propset, block);
        Ok(propset)
    }
}
