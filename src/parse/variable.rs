use crate::{ast::NodeId, ast::NodeKind, error::SassResult, lexer};

use super::Parser;

impl<'a, 'ctx> Parser<'a, 'ctx> {
    /// `$name: <list>` with an optional trailing `!default`, recorded as an
    /// extra `none` child.
    ///
    /// The leading variable may already have been consumed by the caller's
    /// dispatch; the re-lex below is a no-op in that case and the variable is
    /// recovered from `lexed`.
    pub(crate) fn parse_assignment(&mut self) -> SassResult<NodeId> {
        self.lex(lexer::variable);
        let line = self.line;
        let variable = self.leaf_lexed(NodeKind::Variable);
        if !self.lex(lexer::exactly(b':')) {
            return self.syntax_error(format!(
                "expected ':' after {} in assignment statement",
                self.token_text(self.lexed)
            ));
        }
        let value = self.parse_list()?;
        let assignment = self.internal_at(NodeKind::Assignment, line, 2);
        self.append(assignment, variable);
        self.append(assignment, value);
        if self.lex(lexer::default_flag) {
            let guard = self.internal(NodeKind::None, 0);
            self.append(assignment, guard);
        }
        Ok(assignment)
    }
}
