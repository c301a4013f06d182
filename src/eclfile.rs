//! Catalog reader for complete ECLIPSE files.
//!
//! [`EclFile`] indexes every array header of a binary or formatted file up front, stepping
//! over the payloads without decoding them. Array data is decoded on demand, either all at
//! once with [`EclFile::load_data`] or selectively by index or name, and then handed out as
//! typed slices.
//!
//! # Examples
//!
//! ```rust,no_run
//! use eclio::EclFile;
//!
//! let mut file = EclFile::open("CASE.INIT")?;
//! for entry in file.list() {
//!     println!("{:8} {} {}", entry.name, entry.array_type, entry.count);
//! }
//!
//! file.load_named("PORV")?;
//! let porv: &[f32] = file.get_named("PORV")?;
//! println!("{} cells", porv.len());
//! # Ok::<(), eclio::Error>(())
//! ```

use std::{collections::HashMap, path::Path};

use rayon::prelude::*;
use tracing::debug;

use crate::{
    codec::{
        binary::{is_eof, read_binary_array, read_binary_header, step_over_array},
        element_count,
        formatted::{read_formatted_array, read_formatted_header, step_over_formatted_array},
        ArrayType, EclArray, EclElement,
    },
    config::ValidationConfig,
    file::File,
    Error, Parser, Result,
};

/// Catalog entry of one array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EclEntry {
    /// Array name, trailing blanks trimmed unless disabled in the configuration
    pub name: String,
    /// Element type
    pub array_type: ArrayType,
    /// Number of elements
    pub count: usize,
}

/// An indexed ECLIPSE file.
///
/// Arrays are identified by their position in the file. Several arrays may share a name
/// (restart files repeat the same keywords for every report step); name lookups resolve to the
/// last array with that name.
pub struct EclFile {
    file: File,
    config: ValidationConfig,
    entries: Vec<EclEntry>,
    offsets: Vec<usize>,
    names: HashMap<String, usize>,
    arrays: Vec<Option<EclArray>>,
}

impl EclFile {
    /// Opens and indexes a file with the default configuration.
    ///
    /// The file is formatted if the first character of its extension is `F` or `A`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened,
    /// [`crate::Error::Empty`] for an empty file, or any codec error met while indexing.
    pub fn open(path: impl AsRef<Path>) -> Result<EclFile> {
        EclFile::open_with_config(path, ValidationConfig::default())
    }

    /// Opens and indexes a file.
    ///
    /// # Errors
    /// See [`EclFile::open`].
    pub fn open_with_config(path: impl AsRef<Path>, config: ValidationConfig) -> Result<EclFile> {
        let file = File::from_file(path.as_ref())?;
        EclFile::index(file, config)
    }

    /// Indexes an in-memory file with the default configuration.
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for empty data or any codec error met while indexing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eclio::{EclFile, EclOutput};
    ///
    /// let mut output = EclOutput::new(Vec::new(), false);
    /// output.write("INTEHEAD", &[1, 2, 3])?;
    /// output.write("PORV", &[0.25_f32, 0.5])?;
    ///
    /// let mut file = EclFile::from_mem(output.into_inner()?, false)?;
    /// assert_eq!(file.len(), 2);
    ///
    /// file.load_data()?;
    /// let head: &[i32] = file.get(0)?;
    /// assert_eq!(head, [1, 2, 3]);
    /// # Ok::<(), eclio::Error>(())
    /// ```
    pub fn from_mem(data: Vec<u8>, formatted: bool) -> Result<EclFile> {
        EclFile::from_mem_with_config(data, formatted, ValidationConfig::default())
    }

    /// Indexes an in-memory file.
    ///
    /// # Errors
    /// See [`EclFile::from_mem`].
    pub fn from_mem_with_config(
        data: Vec<u8>,
        formatted: bool,
        config: ValidationConfig,
    ) -> Result<EclFile> {
        let file = File::from_mem(data, formatted)?;
        EclFile::index(file, config)
    }

    fn index(file: File, config: ValidationConfig) -> Result<EclFile> {
        let formatted = file.is_formatted();
        let mut entries = Vec::new();
        let mut offsets = Vec::new();
        let mut names = HashMap::new();

        let mut parser = file.parser();
        while !is_eof(&parser) {
            let header = if formatted {
                read_formatted_header(&mut parser)?
            } else {
                read_binary_header(&mut parser)?
            };

            let array_type = header.array_type()?;
            let count = element_count(&header.name, header.count)?;
            let offset = parser.pos();

            if formatted {
                step_over_formatted_array(&mut parser, header.count, &header.type_tag)?;
            } else {
                step_over_array(&mut parser, header.count, &header.type_tag)?;
            }

            let name = if config.trim_strings {
                header.name.trim_end().to_string()
            } else {
                header.name
            };
            debug!(name = %name, %array_type, count, offset, "indexed array");

            names.insert(name.clone(), entries.len());
            entries.push(EclEntry {
                name,
                array_type,
                count,
            });
            offsets.push(offset);
        }

        debug!(arrays = entries.len(), formatted, "indexed file");

        let arrays = vec![None; entries.len()];
        Ok(EclFile {
            file,
            config,
            entries,
            offsets,
            names,
            arrays,
        })
    }

    /// Number of arrays in the file.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the file holds no arrays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the file is formatted.
    #[must_use]
    pub fn is_formatted(&self) -> bool {
        self.file.is_formatted()
    }

    /// The configuration this file was indexed with.
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// The catalog, in file order.
    #[must_use]
    pub fn list(&self) -> Vec<EclEntry> {
        self.entries.clone()
    }

    /// Returns `true` if an array named `name` exists.
    #[must_use]
    pub fn has_key(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Index of the last array named `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotFound`] if no array has that name.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Returns `true` if the array at `index` has been decoded.
    #[must_use]
    pub fn is_loaded(&self, index: usize) -> bool {
        matches!(self.arrays.get(index), Some(Some(_)))
    }

    /// Decodes every array that is not loaded yet.
    ///
    /// # Errors
    /// Returns the first codec error met; arrays decoded before it stay loaded only when
    /// decoding sequentially.
    pub fn load_data(&mut self) -> Result<()> {
        let all: Vec<usize> = (0..self.entries.len()).collect();
        self.load_indices(&all)
    }

    /// Decodes the array at `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidIndex`] or the codec error met while decoding.
    pub fn load_array(&mut self, index: usize) -> Result<()> {
        self.load_indices(&[index])
    }

    /// Decodes every array named `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotFound`] if no array has that name, or the codec error met
    /// while decoding.
    pub fn load_named(&mut self, name: &str) -> Result<()> {
        let indices: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.name == name)
            .map(|(index, _)| index)
            .collect();

        if indices.is_empty() {
            return Err(Error::NotFound(name.to_string()));
        }
        self.load_indices(&indices)
    }

    /// Decodes the arrays at `indices`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidIndex`] for the first out of range index before anything
    /// is decoded, or the codec error met while decoding.
    pub fn load_indices(&mut self, indices: &[usize]) -> Result<()> {
        if let Some(&index) = indices.iter().find(|&&index| index >= self.entries.len()) {
            return Err(Error::InvalidIndex(index));
        }

        let pending: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&index| !self.is_loaded(index))
            .collect();

        if self.config.parallel_load && pending.len() > 1 {
            let decoded = pending
                .par_iter()
                .map(|&index| self.decode(index).map(|array| (index, array)))
                .collect::<Result<Vec<_>>>()?;

            for (index, array) in decoded {
                self.arrays[index] = Some(array);
            }
        } else {
            for index in pending {
                let array = self.decode(index)?;
                self.arrays[index] = Some(array);
            }
        }

        Ok(())
    }

    fn decode(&self, index: usize) -> Result<EclArray> {
        let entry = &self.entries[index];
        let mut parser = self.file.parser();
        parser.seek(self.offsets[index])?;

        let array = match entry.array_type {
            ArrayType::Inte => EclArray::Inte(self.read_values(&mut parser, entry)?),
            ArrayType::Real => EclArray::Real(self.read_values(&mut parser, entry)?),
            ArrayType::Doub => EclArray::Doub(self.read_values(&mut parser, entry)?),
            ArrayType::Logi => EclArray::Logi(self.read_values(&mut parser, entry)?),
            ArrayType::Char => {
                let mut values: Vec<String> = self.read_values(&mut parser, entry)?;
                if self.config.trim_strings {
                    for value in &mut values {
                        value.truncate(value.trim_end().len());
                    }
                }
                EclArray::Char(values)
            }
            ArrayType::Mess => EclArray::Mess,
        };

        debug!(name = %entry.name, index, "loaded array");
        Ok(array)
    }

    fn read_values<T: EclElement>(
        &self,
        parser: &mut Parser<'_>,
        entry: &EclEntry,
    ) -> Result<Vec<T>> {
        // count came from an i32 header field
        let count = i32::try_from(entry.count).map_err(|_| {
            element_count_error!("array '{}' declares {} elements", entry.name, entry.count)
        })?;

        if self.file.is_formatted() {
            read_formatted_array(parser, &entry.name, count)
        } else {
            read_binary_array(parser, &entry.name, count)
        }
    }

    /// The decoded array at `index`, of any type.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidIndex`] or [`crate::Error::NotLoaded`].
    pub fn get_array(&self, index: usize) -> Result<&EclArray> {
        let entry = self.entries.get(index).ok_or(Error::InvalidIndex(index))?;
        self.arrays[index]
            .as_ref()
            .ok_or_else(|| Error::NotLoaded(entry.name.clone()))
    }

    /// The decoded elements of the array at `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidIndex`], [`crate::Error::TypeMismatch`] if the array
    /// does not hold `T`, or [`crate::Error::NotLoaded`].
    pub fn get<T: EclElement>(&self, index: usize) -> Result<&[T]> {
        let entry = self.entries.get(index).ok_or(Error::InvalidIndex(index))?;
        let mismatch = || Error::TypeMismatch {
            name: entry.name.clone(),
            expected: T::ARRAY_TYPE,
            found: entry.array_type,
        };

        if entry.array_type != T::ARRAY_TYPE {
            return Err(mismatch());
        }
        let array = self.get_array(index)?;
        T::from_array(array).ok_or_else(mismatch)
    }

    /// The decoded elements of the last array named `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotFound`] or any error of [`EclFile::get`].
    pub fn get_named<T: EclElement>(&self, name: &str) -> Result<&[T]> {
        self.get(self.index_of(name)?)
    }
}

impl std::fmt::Debug for EclFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EclFile")
            .field("file", &self.file)
            .field("arrays", &self.entries.len())
            .field("config", &self.config)
            .finish()
    }
}
