/*!
This crate provides a recursive-descent parser for [SCSS](https://sass-lang.com/)
— the CSS-superset syntax with nested rules, variables, mixins, functions,
control directives, and interpolation.

Parsing produces an abstract syntax tree suitable for downstream evaluation
and emission: expressions, interpolants, and control directives are parsed but
never reduced, and `should_eval` marks the subtrees that still contain
computation. `@import`ed files are parsed recursively and spliced in place;
`@extend` pairs are collected into a registry for a later extend resolver.

## Use as library
```
fn main() -> Result<(), Box<sassling::Error>> {
    let sheet = sassling::parse_string(
        "a { b { color: red; } }",
        &sassling::Options::default(),
    )?;
    let root = &sheet.arena()[sheet.root()];
    assert_eq!(root.children().len(), 1);
    Ok(())
}
```
*/

#![warn(clippy::all, clippy::cargo, clippy::dbg_macro)]
#![deny(missing_debug_implementations)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::redundant_pub_crate,
    clippy::single_match_else,
    clippy::cast_possible_truncation,
    // the statement dispatch and the lookahead are long by nature
    clippy::too_many_lines
)]

use std::{fmt, path::Path, sync::Arc};

use codemap::{CodeMap, File};
use indexmap::IndexMap;

pub use crate::error::{
    PublicSassErrorKind as ErrorKind, SassError as Error, SassResult as Result,
};
pub use crate::fs::{Fs, NullFs, StdFs};
pub use crate::options::Options;
pub use crate::{
    ast::{Arena, Extensions, Node, NodeId, NodeKind},
    interner::InternedString,
    lexer::Token,
};

use crate::{
    error::{SassError, SassResult},
    parse::{Context, Parser},
};

mod ast;
mod error;
mod fs;
mod interner;
mod lexer;
mod options;
mod parse;

/// A fully parsed stylesheet: the arena holding every node of the entry file
/// and its imports, the root node, and the collected `@extend` registry.
pub struct StyleSheet {
    map: CodeMap,
    files: IndexMap<InternedString, Arc<File>>,
    arena: Arena,
    root: NodeId,
    extensions: Extensions,
}

impl StyleSheet {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.arena[id].kind()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena[id].children()
    }

    /// The source text of a leaf node's token, or `None` for internal nodes.
    pub fn node_text(&self, id: NodeId) -> Option<&str> {
        let node = &self.arena[id];
        let token = node.token()?;
        let file = self.files.get(&node.path())?;
        file.source().get(token.begin()..token.end())
    }
}

impl fmt::Debug for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleSheet")
            .field("root", &self.root)
            .field("nodes", &self.arena.len())
            .field("extensions", &self.extensions.len())
            .finish_non_exhaustive()
    }
}

fn raw_to_parse_error(map: &CodeMap, err: SassError, unicode: bool) -> Box<SassError> {
    let (message, span, is_read_error) = err.raw();
    Box::new(SassError::from_loc(
        message,
        map.look_up_span(span),
        is_read_error,
        unicode,
    ))
}

fn parse_with_file_name(
    input: String,
    file_name: &Path,
    options: &Options,
) -> SassResult<StyleSheet> {
    let mut ctx = Context::new(options);
    let name = file_name.to_string_lossy();
    let path = InternedString::get_or_intern(&name);
    let file = ctx.map.add_file(name.into_owned(), input);
    ctx.files.insert(path, Arc::clone(&file));

    let root = {
        let mut parser = Parser::new(&mut ctx, file, path);
        parser.parse_scss()
    };
    let root = match root {
        Ok(root) => root,
        Err(e) => {
            return Err(raw_to_parse_error(
                &ctx.map,
                *e,
                options.unicode_error_messages,
            ))
        }
    };

    let (map, files, arena, extensions) = ctx.into_parts();

    Ok(StyleSheet {
        map,
        files,
        arena,
        root,
        extensions,
    })
}

/// Parse a stylesheet from a path
///
/// n.b. `sassling` does not currently support files or paths that are not
/// valid UTF-8
///
/// ```no_run
/// fn main() -> Result<(), Box<sassling::Error>> {
///     let sheet = sassling::parse_path("input.scss", &sassling::Options::default())?;
///     Ok(())
/// }
/// ```
#[inline]
pub fn parse_path<P: AsRef<Path>>(p: P, options: &Options) -> SassResult<StyleSheet> {
    let input = String::from_utf8(options.fs.read(p.as_ref())?)?;
    parse_with_file_name(input, p.as_ref(), options)
}

/// Parse a stylesheet from a string
///
/// ```
/// fn main() -> Result<(), Box<sassling::Error>> {
///     let sheet = sassling::parse_string("a { color: red; }", &sassling::Options::default())?;
///     assert!(sheet.extensions().is_empty());
///     Ok(())
/// }
/// ```
#[inline]
pub fn parse_string<S: Into<String>>(input: S, options: &Options) -> SassResult<StyleSheet> {
    parse_with_file_name(input.into(), Path::new("stdin"), options)
}
