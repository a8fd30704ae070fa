use crate::{interner::InternedString, lexer::Token};

use super::NodeId;

/// The tag carried by every AST node.
///
/// Leaf kinds hold a [`Token`] into their source file; internal kinds hold
/// children. The split mirrors the grammar: structural kinds come from the
/// selector and block parsers, statement kinds from the statement dispatch,
/// and the algebra kinds from the expression precedence ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // structural
    Root,
    Block,
    Ruleset,
    Rule,
    Propset,
    SelectorGroup,
    Selector,
    SimpleSelectorSequence,
    SimpleSelector,
    SelectorCombinator,
    SelectorSchema,
    Backref,
    AttributeSelector,
    Pseudo,
    PseudoNegation,
    FunctionalPseudo,

    // statements
    Assignment,
    Mixin,
    Function,
    Parameters,
    Expansion,
    Arguments,
    ReturnDirective,
    IfDirective,
    ForToDirective,
    ForThroughDirective,
    EachDirective,
    WhileDirective,
    Warning,
    BlocklessDirective,
    BlockDirective,
    MediaQuery,
    MediaExpression,
    MediaExpressionGroup,
    CssImport,
    Comment,

    // expression algebra
    CommaList,
    SpaceList,
    Disjunction,
    Conjunction,
    Relation,
    Expression,
    Term,
    UnaryPlus,
    UnaryMinus,
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,

    // values and schemas
    Identifier,
    Variable,
    Value,
    Property,
    StringConstant,
    StringSchema,
    IdentifierSchema,
    ValueSchema,
    TextualNumber,
    TextualPercentage,
    TextualDimension,
    TextualHex,
    Uri,
    Boolean,
    Important,
    Nil,
    FunctionCall,
    None,
}

/// A single AST element.
///
/// Nodes are owned by the [`Arena`](super::Arena) and refer to each other
/// through [`NodeId`]s, so a `Node` is never self-referential and cloning a
/// tree is just cloning the arena.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    path: InternedString,
    line: usize,
    token: Option<Token>,
    children: Vec<NodeId>,
    should_eval: bool,
}

impl Node {
    pub(crate) fn internal(
        kind: NodeKind,
        path: InternedString,
        line: usize,
        capacity: usize,
    ) -> Self {
        Node {
            kind,
            path,
            line,
            token: Option::None,
            children: Vec::with_capacity(capacity),
            should_eval: false,
        }
    }

    pub(crate) fn leaf(kind: NodeKind, path: InternedString, line: usize, token: Token) -> Self {
        Node {
            kind,
            path,
            line,
            token: Some(token),
            children: Vec::new(),
            should_eval: false,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The source file this node was parsed from.
    pub fn path(&self) -> InternedString {
        self.path
    }

    /// Zero-based line of the node's first lexeme.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The matched span for leaf kinds; internal kinds carry no token.
    pub fn token(&self) -> Option<Token> {
        self.token
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether this subtree contains unresolved computation (a variable,
    /// interpolant, operator, parenthesised expression, or function call) and
    /// must be evaluated before emission.
    pub fn should_eval(&self) -> bool {
        self.should_eval
    }

    pub(crate) fn set_should_eval(&mut self, should_eval: bool) {
        self.should_eval = should_eval;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.children
    }
}
