use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use codemap::File;

use crate::{
    ast::{NodeId, NodeKind},
    error::{SassError, SassResult},
    interner::InternedString,
    lexer::{self, Token},
    Fs,
};

use super::Parser;

impl<'a, 'ctx> Parser<'a, 'ctx> {
    /// `@import url("...")`, `@import url(...)`, or `@import "path"`.
    ///
    /// The two `url` forms stay in the output as `css_import` nodes. The
    /// quoted-path form resolves the path through the loader, parses the
    /// file on a fresh document sharing this arena, and returns its root;
    /// the caller splices the root's children in place.
    pub(crate) fn parse_import(&mut self) -> SassResult<NodeId> {
        self.lex(lexer::import);
        if self.lex(lexer::uri_prefix) {
            if self.peek(lexer::string_constant).is_some() {
                let line = self.line;
                let schema = self.parse_string()?;
                let importee = self.internal_at(NodeKind::CssImport, line, 1);
                self.append(importee, schema);
                if !self.lex(lexer::exactly(b')')) {
                    return self.syntax_error("unterminated url in @import directive");
                }
                return Ok(importee);
            }

            let begin = self.position;
            let rparen = {
                let src = self.src();
                lexer::find_first(src, begin, lexer::exactly(b')'))
            };
            let rparen = match rparen {
                Some(rparen) => rparen,
                None => return self.syntax_error("unterminated url in @import directive"),
            };
            let url = self.leaf(NodeKind::Identifier, Token::new(begin, rparen));
            let importee = self.internal(NodeKind::CssImport, 1);
            self.append(importee, url);
            self.advance_to(rparen);
            self.lex(lexer::exactly(b')'));
            return Ok(importee);
        }

        if !self.lex(lexer::string_constant) {
            return self.syntax_error("@import directive requires a url or quoted path");
        }
        let logical = self.token_text(self.lexed.unquoted()).to_owned();
        let (file, path) = self.load_import(&logical)?;

        if self.ctx.active_imports.contains(&path) {
            return self.syntax_error(format!("import loop detected for \"{}\"", logical));
        }
        self.ctx.active_imports.push(path);

        let root = {
            let mut importee = Parser::new(&mut *self.ctx, file, path);
            importee.parse_scss()
        };
        self.ctx.active_imports.pop();
        root
    }

    /// Resolve a logical import path through the loader.
    ///
    /// Candidates are tried relative to the importing file's directory first,
    /// then under each configured load path: the literal name, the name with
    /// `.scss` appended, the partial form `_name.scss`, and for a directory
    /// the `index` partials inside it.
    fn load_import(&mut self, logical: &str) -> SassResult<(Arc<File>, InternedString)> {
        let current = self.path.resolve();
        let current_dir = Path::new(&current)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let fs = self.ctx.options.fs;
        let span = self.span_of(self.lexed);

        let mut bases = vec![current_dir];
        bases.extend(self.ctx.options.load_paths.iter().cloned());
        for base in bases {
            let joined = base.join(logical);
            for candidate in import_candidates(fs, &joined) {
                if !fs.is_file(&candidate) {
                    continue;
                }
                let source = String::from_utf8(fs.read(&candidate)?)?;
                let name = candidate.to_string_lossy().into_owned();
                let path = InternedString::get_or_intern(&name);
                let file = self.ctx.map.add_file(name, source);
                self.ctx.files.insert(path, Arc::clone(&file));
                return Ok((file, path));
            }
        }

        Err(SassError::raw_read(
            format!("error reading file \"{}\"", logical),
            span,
        ))
    }
}

fn import_candidates(fs: &dyn Fs, joined: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![joined.to_path_buf()];
    if let Some(name) = joined.file_name().and_then(|name| name.to_str()) {
        if !name.ends_with(".scss") {
            candidates.push(joined.with_file_name(format!("{}.scss", name)));
            candidates.push(joined.with_file_name(format!("_{}.scss", name)));
        } else {
            candidates.push(joined.with_file_name(format!("_{}", name)));
        }
    }
    if fs.is_dir(joined) {
        candidates.push(joined.join("index.scss"));
        candidates.push(joined.join("_index.scss"));
    }
    candidates
}
