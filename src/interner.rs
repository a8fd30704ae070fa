use lasso::{Rodeo, Spur};

use std::cell::RefCell;
use std::fmt::{self, Display};

thread_local!(static PATHS: RefCell<Rodeo<Spur>> = RefCell::new(Rodeo::default()));

/// An interned source path.
///
/// Every AST node names the file it was parsed from. Interning collapses
/// those names to a `Copy` key, so nodes stay cheap to build and compare even
/// across deep `@import` chains where thousands of nodes share a handful of
/// paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    pub fn get_or_intern<T: AsRef<str>>(s: T) -> Self {
        Self(PATHS.with(|interner| interner.borrow_mut().get_or_intern(s)))
    }

    /// The interned text, as an owned string. The parser resolves paths only
    /// at `@import` boundaries, so the allocation is never on a hot path.
    pub fn resolve(self) -> String {
        PATHS.with(|interner| interner.borrow().resolve(&self.0).to_owned())
    }
}

impl Display for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        PATHS.with(|interner| f.write_str(interner.borrow().resolve(&self.0)))
    }
}
