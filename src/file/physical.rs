//! Physical file backend for memory-mapped I/O.
//!
//! This module provides the [`crate::file::physical::Physical`] backend that implements the
//! [`crate::file::Backend`] trait for files on disk. Restart and summary files of large models
//! run to gigabytes; mapping them lets [`crate::EclFile`] index every array header while only
//! the pages it actually touches are brought into memory.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use eclio::file::{Backend, Physical};
//!
//! let physical = Physical::new("CASE.UNRST")?;
//! println!("File size: {} bytes", physical.len());
//!
//! // The first binary header marker
//! assert_eq!(&physical.data()[..4], &[0x00, 0x00, 0x00, 0x10]);
//! # Ok::<(), eclio::Error>(())
//! ```

use super::Backend;
use crate::{
    Error::{Error, FileError},
    Result,
};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A file backend that uses memory-mapped I/O for efficient access to files on disk.
///
/// The mapping is read-only. Zero-length files cannot be mapped on every platform, so they are
/// represented by an empty buffer instead.
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data, `None` for an empty file
    data: Option<Mmap>,
}

impl Physical {
    /// Create a new physical file backend by memory-mapping the specified file.
    ///
    /// # Arguments
    /// * `path` - Path to the file on disk. Accepts `&Path`, `&str`, `String`, or `PathBuf`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or
    /// [`crate::Error::Error`] if memory mapping fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        Physical::from_std_file(&file)
    }

    /// Creates a new physical file backend from an opened [`std::fs::File`].
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file metadata cannot be queried or
    /// [`crate::Error::Error`] if memory mapping fails.
    pub fn from_std_file(file: &fs::File) -> Result<Physical> {
        if file.metadata()?.len() == 0 {
            return Ok(Physical { data: None });
        }

        // SAFETY: the map is read-only; files are not expected to be truncated while open.
        let mmap = unsafe { Mmap::map(file) }.map_err(|error| Error(error.to_string()))?;

        Ok(Physical { data: Some(mmap) })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        match &self.data {
            Some(mmap) => mmap.as_ref(),
            None => &[],
        }
    }
}
