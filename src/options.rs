use std::path::{Path, PathBuf};

use crate::{Fs, StdFs};

/// Configuration for parsing
///
/// The simplest usage is `sassling::Options::default()`; however, a builder
/// pattern is also exposed to offer more control.
#[derive(Debug)]
pub struct Options<'a> {
    pub(crate) fs: &'a dyn Fs,
    pub(crate) load_paths: Vec<PathBuf>,
    pub(crate) unicode_error_messages: bool,
}

impl Default for Options<'_> {
    #[inline]
    fn default() -> Self {
        Self {
            fs: &StdFs,
            load_paths: Vec::new(),
            unicode_error_messages: true,
        }
    }
}

impl<'a> Options<'a> {
    /// This option allows you to control the file system that `@import` will
    /// see.
    ///
    /// By default, it uses [`StdFs`], which is backed by [`std::fs`],
    /// allowing direct, unfettered access to the local file system.
    #[must_use]
    #[inline]
    pub fn fs(mut self, fs: &'a dyn Fs) -> Self {
        self.fs = fs;
        self
    }

    /// Add a path on the filesystem to look in when resolving `@import`s.
    ///
    /// Imports will always be resolved relative to the importing file first;
    /// load paths are only consulted when no relative file matches.
    ///
    /// This method will append a single path to the list.
    #[must_use]
    #[inline]
    pub fn load_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.load_paths.push(path.as_ref().to_owned());
        self
    }

    /// Append multiple load paths
    ///
    /// Note that this method does *not* remove existing load paths
    ///
    /// See [`Options::load_path`](Options::load_path) for more information
    /// about load paths
    #[must_use]
    #[inline]
    pub fn load_paths<P: AsRef<Path>>(mut self, paths: &[P]) -> Self {
        for path in paths {
            self.load_paths.push(path.as_ref().to_owned());
        }

        self
    }

    /// This flag tells the parser only to emit ASCII characters as
    /// part of error messages.
    ///
    /// By default non-ASCII characters are emitted for these messages.
    #[must_use]
    #[inline]
    pub const fn unicode_error_messages(mut self, unicode_error_messages: bool) -> Self {
        self.unicode_error_messages = unicode_error_messages;
        self
    }
}
