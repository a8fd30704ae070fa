use std::{io, path::Path};

/// The parser's only I/O boundary.
///
/// `@import` resolution asks the file system two questions — does this path
/// name a file, does it name a directory — and reads whichever candidate wins.
/// Swapping the implementation on [`crate::Options`] makes it possible to
/// parse stylesheets out of archives, in-memory fixtures, or sandboxed
/// environments without touching the disk.
pub trait Fs: std::fmt::Debug {
    /// Whether `path` names a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Whether `path` names a directory. Importing a directory resolves to
    /// the `index` partial inside it.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read the entire contents of `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// The default file system, backed by [`std::fs`].
#[derive(Debug)]
pub struct StdFs;

impl Fs for StdFs {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// A file system with nothing in it.
///
/// Useful when `@import` must not be able to reach the disk: every lookup
/// misses and every read fails, so only the input handed to
/// [`parse_string`][crate::parse_string] is reachable.
#[derive(Debug)]
pub struct NullFs;

impl Fs for NullFs {
    fn is_file(&self, _path: &Path) -> bool {
        false
    }

    fn is_dir(&self, _path: &Path) -> bool {
        false
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("NullFs has no file {}", path.display()),
        ))
    }
}
