//! Sequential writer for ECLIPSE files.
//!
//! [`EclOutput`] appends complete arrays (header and payload) to any [`std::io::Write`] sink in
//! either encoding. Names shorter than 8 characters are padded with blanks unless the
//! configuration disables it.
//!
//! # Examples
//!
//! ```rust,no_run
//! use eclio::EclOutput;
//!
//! let mut output = EclOutput::create("CASE.FINIT")?;
//! assert!(output.is_formatted());
//!
//! output.write("INTEHEAD", &[2_i32, 100])?;
//! output.write("PORV", &[0.25_f32, 0.5, 0.75])?;
//! output.write("ZWEL", &["PROD1".to_string()])?;
//! output.close()?;
//! # Ok::<(), eclio::Error>(())
//! ```

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use tracing::debug;

use crate::{
    codec::{
        binary::{write_binary_array, write_binary_header},
        formatted::{write_formatted_array, write_formatted_header},
        validate_header_fields, ArrayType, EclElement, NAME_WIDTH,
    },
    config::ValidationConfig,
    file::is_formatted_path,
    Error, Result,
};

/// Writes arrays one after another to a sink.
pub struct EclOutput<W: Write> {
    sink: Option<W>,
    formatted: bool,
    config: ValidationConfig,
}

impl EclOutput<BufWriter<fs::File>> {
    /// Creates (or truncates) a file on disk with the default configuration.
    ///
    /// The output is formatted if the first character of the extension is `F` or `A`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        EclOutput::create_with_config(path, ValidationConfig::default())
    }

    /// Creates (or truncates) a file on disk.
    ///
    /// # Errors
    /// See [`EclOutput::create`].
    pub fn create_with_config(path: impl AsRef<Path>, config: ValidationConfig) -> Result<Self> {
        let path = path.as_ref();
        let formatted = is_formatted_path(path);
        let file = fs::File::create(path)?;
        Ok(EclOutput::with_config(BufWriter::new(file), formatted, config))
    }
}

impl<W: Write> EclOutput<W> {
    /// Wraps a sink with the default configuration.
    pub fn new(sink: W, formatted: bool) -> Self {
        EclOutput::with_config(sink, formatted, ValidationConfig::default())
    }

    /// Wraps a sink.
    pub fn with_config(sink: W, formatted: bool, config: ValidationConfig) -> Self {
        EclOutput {
            sink: Some(sink),
            formatted,
            config,
        }
    }

    /// Returns `true` if arrays are written as formatted text.
    #[must_use]
    pub fn is_formatted(&self) -> bool {
        self.formatted
    }

    /// Returns `true` until the output is closed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.sink.is_some()
    }

    /// Writes a complete array.
    ///
    /// The header count is the slice length and the type follows from `T`. A failed call
    /// writes nothing, so the arrays already written stay readable.
    ///
    /// # Errors
    /// - [`crate::Error::StreamState`] if the output was closed
    /// - [`crate::Error::InvalidFieldWidth`] for a name longer than 8 characters, a name that
    ///   is not 8 characters when it must be, or an over-long CHAR value
    /// - [`crate::Error::ElementCount`] if the slice is longer than a header can declare
    /// - [`crate::Error::FileError`] if the sink fails
    pub fn write<T: EclElement>(&mut self, name: &str, values: &[T]) -> Result<()> {
        self.sink_mut()?;
        let count = i32::try_from(values.len()).map_err(|_| {
            element_count_error!(
                "array '{}' has {} elements, more than a header can declare",
                name,
                values.len()
            )
        })?;

        // nothing reaches the sink until the whole payload is encoded
        let mut payload = Vec::new();
        if self.formatted {
            write_formatted_array(&mut payload, values)?;
        } else {
            write_binary_array(&mut payload, values)?;
        }

        self.write_header(name, count, T::ARRAY_TYPE)?;
        self.sink_mut()?.write_all(&payload)?;
        Ok(())
    }

    /// Writes a `MESS` marker array.
    ///
    /// # Errors
    /// See [`EclOutput::write`].
    pub fn message(&mut self, name: &str) -> Result<()> {
        self.write_header(name, 0, ArrayType::Mess)
    }

    fn write_header(&mut self, name: &str, count: i32, array_type: ArrayType) -> Result<()> {
        self.sink_mut()?;
        let name = self.prepare_name(name)?;
        let tag = array_type.tag();
        let formatted = self.formatted;
        let validate = self.config.validate_binary_header;

        let sink = self.sink_mut()?;
        if formatted {
            write_formatted_header(sink, &name, count, tag)?;
        } else {
            if validate {
                validate_header_fields(&name, tag)?;
            }
            write_binary_header(sink, &name, count, tag)?;
        }

        debug!(name = %name, %array_type, count, formatted, "wrote array header");
        Ok(())
    }

    fn prepare_name(&self, name: &str) -> Result<String> {
        if name.len() > NAME_WIDTH {
            return Err(Error::InvalidFieldWidth {
                field: "array name",
                value: name.to_string(),
                expected: NAME_WIDTH,
            });
        }

        if self.config.pad_names {
            Ok(format!("{name:<NAME_WIDTH$}"))
        } else {
            Ok(name.to_string())
        }
    }

    fn sink_mut(&mut self) -> Result<&mut W> {
        self.sink
            .as_mut()
            .ok_or_else(|| Error::StreamState("output has been closed".to_string()))
    }

    /// Flushes the sink.
    ///
    /// # Errors
    /// Returns [`crate::Error::StreamState`] if the output was closed or
    /// [`crate::Error::FileError`] if the sink fails.
    pub fn flush(&mut self) -> Result<()> {
        self.sink_mut()?.flush()?;
        Ok(())
    }

    /// Flushes and releases the sink. Later writes fail.
    ///
    /// # Errors
    /// Returns [`crate::Error::StreamState`] if the output was already closed or
    /// [`crate::Error::FileError`] if the final flush fails.
    pub fn close(&mut self) -> Result<()> {
        let Some(mut sink) = self.sink.take() else {
            return Err(Error::StreamState("output already closed".to_string()));
        };
        sink.flush()?;
        debug!(formatted = self.formatted, "closed output");
        Ok(())
    }

    /// Flushes the sink and returns it.
    ///
    /// # Errors
    /// Returns [`crate::Error::StreamState`] if the output was closed or
    /// [`crate::Error::FileError`] if the flush fails.
    pub fn into_inner(mut self) -> Result<W> {
        let Some(mut sink) = self.sink.take() else {
            return Err(Error::StreamState("output has been closed".to_string()));
        };
        sink.flush()?;
        Ok(sink)
    }
}

impl<W: Write> std::fmt::Debug for EclOutput<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EclOutput")
            .field("open", &self.sink.is_some())
            .field("formatted", &self.formatted)
            .field("config", &self.config)
            .finish()
    }
}
