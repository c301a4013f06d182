//! Byte image abstraction for ECLIPSE files.
//!
//! This module decouples the codec from where the bytes live. A [`crate::file::File`] owns a
//! [`crate::file::Backend`] (a memory-mapped file or an in-memory buffer) together with the one
//! piece of metadata the codec needs up front: whether the content is binary or formatted.
//!
//! # Key Components
//!
//! ## Core Types
//! - [`crate::file::File`] - Byte image plus binary/formatted flag
//! - [`crate::file::Backend`] - Trait for different data sources (disk files, memory buffers)
//!
//! ## Parsing Infrastructure
//! - [`crate::file::parser::Parser`] - Bounds-checked cursor over the byte image
//! - [`crate::file::io`] - Big-endian reading/writing and byte reversal
//!
//! ## Backend Implementations
//! - [`crate::file::Physical`] - Memory-mapped file backend for disk access
//! - [`crate::file::Memory`] - In-memory buffer backend
//!
//! # Binary or formatted
//!
//! Formatted files are recognized by their extension: the first character of the extension is
//! `F` (`.FINIT`, `.FEGRID`, `.FUNRST`) or, for formatted summary files, `A` (`.A0001`).
//! Everything else is treated as binary. [`crate::file::File::from_mem`] takes the flag
//! explicitly since there is no name to inspect.
//!
//! # Examples
//!
//! ```rust
//! use eclio::File;
//!
//! let file = File::from_mem(b" 'PORV    '           0 'REAL'\n".to_vec(), true)?;
//! assert!(file.is_formatted());
//! assert_eq!(file.len(), 31);
//!
//! let mut parser = file.parser();
//! assert!(parser.read_line()?.is_some());
//! # Ok::<(), eclio::Error>(())
//! ```

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::{Path, PathBuf};

use crate::{Error::Empty, Result};

pub use memory::Memory;
pub use parser::Parser;
pub use physical::Physical;

/// Backend trait for file data sources.
///
/// This trait abstracts over the source of the byte image, allowing for both in-memory and
/// on-disk representations. All implementations must be thread-safe so that arrays can be
/// decoded from the same image in parallel.
pub trait Backend: Send + Sync {
    /// Returns the entire byte image.
    ///
    /// Readers take bounds-checked slices of it through [`crate::file::parser::Parser`].
    fn data(&self) -> &[u8];

    /// Returns the total length of the byte image.
    fn len(&self) -> usize {
        self.data().len()
    }
}

/// Returns `true` if `path` names a formatted ECLIPSE file.
///
/// The decision is made on the first character of the extension: `F` marks formatted output
/// files and `A` marks formatted summary files. Paths without an extension are binary.
///
/// # Examples
///
/// ```rust
/// use eclio::file::is_formatted_path;
///
/// assert!(is_formatted_path("CASE.FINIT"));
/// assert!(is_formatted_path("CASE.A0012"));
/// assert!(!is_formatted_path("CASE.INIT"));
/// assert!(!is_formatted_path("CASE"));
/// ```
pub fn is_formatted_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.chars().next())
        .is_some_and(|first| first == 'F' || first == 'A')
}

/// A loaded ECLIPSE byte image.
///
/// `File` owns the raw bytes and remembers whether they hold the binary or the formatted
/// variant. It does not interpret the content; see [`crate::EclFile`] for array access.
pub struct File {
    data: Box<dyn Backend>,
    formatted: bool,
    path: Option<PathBuf>,
}

impl File {
    /// Memory-maps a file from disk, deciding binary or formatted from its extension.
    ///
    /// # Arguments
    /// * `file` - Path to the file on disk
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened,
    /// [`crate::Error::Error`] if memory mapping fails, or [`crate::Error::Empty`] if the file
    /// has no content.
    pub fn from_file(file: &Path) -> Result<File> {
        let formatted = is_formatted_path(file);
        File::from_file_with_format(file, formatted)
    }

    /// Memory-maps a file from disk with an explicit binary/formatted choice.
    ///
    /// # Errors
    /// See [`File::from_file`].
    pub fn from_file_with_format(file: &Path, formatted: bool) -> Result<File> {
        let input = Physical::new(file)?;
        if input.len() == 0 {
            return Err(Empty);
        }

        Ok(File {
            data: Box::new(input),
            formatted,
            path: Some(file.to_path_buf()),
        })
    }

    /// Wraps an in-memory buffer.
    ///
    /// # Arguments
    /// * `data` - The file content
    /// * `formatted` - Whether the content is formatted text
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] if `data` is empty.
    pub fn from_mem(data: Vec<u8>, formatted: bool) -> Result<File> {
        if data.is_empty() {
            return Err(Empty);
        }

        Ok(File {
            data: Box::new(Memory::from(data)),
            formatted,
            path: None,
        })
    }

    /// Returns the total size of the byte image.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the byte image is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    /// Returns `true` if the content is formatted text.
    #[must_use]
    pub fn is_formatted(&self) -> bool {
        self.formatted
    }

    /// Returns the path this image was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the complete byte image.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }

    /// Creates a fresh [`Parser`] positioned at the start of the image.
    #[must_use]
    pub fn parser(&self) -> Parser<'_> {
        Parser::new(self.data.data())
    }
}

impl std::fmt::Debug for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("File")
            .field("len", &self.len())
            .field("formatted", &self.formatted)
            .field("path", &self.path)
            .finish()
    }
}
