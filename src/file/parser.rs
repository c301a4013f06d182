//! Cursor over the byte image of an ECLIPSE file.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a bounds-checked cursor over a
//! byte slice. Binary files are consumed as big-endian words and fixed-width character fields;
//! formatted files are consumed line by line. Both views share the same position, so a catalog
//! built while scanning can later seek straight back to any array's offset.
//!
//! # Key Components
//!
//! ## Navigation Methods
//! - [`crate::file::parser::Parser::seek`] - Move to specific position
//! - [`crate::file::parser::Parser::advance_by`] - Move forward by specified bytes
//! - [`crate::file::parser::Parser::pos`] - Get current position
//! - [`crate::file::parser::Parser::transactional`] - Run a read, rolling back on failure
//!
//! ## Data Access Methods
//! - [`crate::file::parser::Parser::read_be`] - Read primitive types (big-endian)
//! - [`crate::file::parser::Parser::read_bytes`] - Borrow a run of raw bytes
//! - [`crate::file::parser::Parser::read_fixed_string`] - Read a fixed-width UTF-8 field
//! - [`crate::file::parser::Parser::read_line`] - Read one line of formatted text
//!
//! # Usage Examples
//!
//! ```rust
//! use eclio::Parser;
//!
//! let data = [0x00, 0x00, 0x00, 0x10, b'P', b'O', b'R', b'V'];
//! let mut parser = Parser::new(&data);
//!
//! assert_eq!(parser.read_be::<i32>()?, 16);
//! assert_eq!(parser.read_fixed_string(4)?, "PORV");
//! assert!(!parser.has_more_data());
//! # Ok::<(), eclio::Error>(())
//! ```
//!
//! ```rust
//! use eclio::Parser;
//!
//! let text = b" 'PORV    '           2 'INTE'\n 1 2\n";
//! let mut parser = Parser::new(text);
//!
//! assert_eq!(parser.read_line()?, Some(" 'PORV    '           2 'INTE'"));
//! assert_eq!(parser.read_line()?, Some(" 1 2"));
//! assert_eq!(parser.read_line()?, None);
//! # Ok::<(), eclio::Error>(())
//! ```

use crate::{
    file::io::{read_be_at, EclIO},
    Result,
};

/// A bounds-checked cursor for reading ECLIPSE data.
///
/// `Parser` keeps a position within a borrowed byte slice. Every read validates that enough
/// data is available before touching it, so truncated files surface as
/// [`crate::Error::OutOfBounds`] (binary) or as a `None` line (formatted) instead of panics.
///
/// Slices and strings handed out by the parser borrow from the underlying buffer, not from the
/// parser itself, so they outlive later reads.
pub struct Parser<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new Parser from a slice
    ///
    /// ## Arguments
    /// * 'data' - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the total length of the underlying buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the underlying buffer holds no bytes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Returns the number of bytes between the current position and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Move the current position to the specified index.
    ///
    /// Seeking to exactly the end of the buffer is allowed and leaves the parser exhausted.
    ///
    /// # Arguments
    /// * `pos` - The position to move the cursor to
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is beyond the data length.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by the specified number of bytes.
    ///
    /// # Arguments
    /// * `step` - Amount of bytes to advance
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing by step would exceed the data length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eclio::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04, 0x05];
    /// let mut parser = Parser::new(&data);
    ///
    /// parser.advance_by(3)?;
    /// assert_eq!(parser.pos(), 3);
    /// assert!(parser.advance_by(3).is_err());
    /// assert_eq!(parser.pos(), 3);
    /// # Ok::<(), eclio::Error>(())
    /// ```
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        let Some(end) = self.position.checked_add(step) else {
            return Err(out_of_bounds_error!());
        };
        if end > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = end;
        Ok(())
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the complete underlying data buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Peek at the byte at the current position without advancing.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the parser is exhausted.
    pub fn peek_byte(&self) -> Result<u8> {
        match self.data.get(self.position) {
            Some(byte) => Ok(*byte),
            None => Err(out_of_bounds_error!()),
        }
    }

    /// Runs `f` against this parser and restores the position if it fails.
    ///
    /// # Errors
    /// Returns whatever error `f` returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eclio::Parser;
    /// let data = [0x00, 0x00, 0x00, 0x10, 0x00];
    /// let mut parser = Parser::new(&data);
    ///
    /// let result = parser.transactional(|p| {
    ///     let first = p.read_be::<i32>()?;
    ///     let second = p.read_be::<i32>()?;
    ///     Ok((first, second))
    /// });
    /// assert!(result.is_err());
    /// assert_eq!(parser.pos(), 0);
    /// ```
    pub fn transactional<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let saved = self.position;
        let result = f(self);
        if result.is_err() {
            self.position = saved;
        }
        result
    }

    /// Read a type T from the current position in big-endian byte order and advance.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if there is not enough data to read the type.
    pub fn read_be<T: EclIO>(&mut self) -> Result<T> {
        read_be_at::<T>(self.data, &mut self.position)
    }

    /// Borrow the next `length` bytes and advance past them.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `length` bytes remain.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let start = self.position;
        self.advance_by(length)?;
        Ok(&self.data[start..self.position])
    }

    /// Read a fixed-width character field of `length` bytes as UTF-8.
    ///
    /// The field is returned verbatim; trailing blanks are kept.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `length` bytes remain, or
    /// [`crate::Error::Decode`] if the bytes are not valid UTF-8. On error the position is
    /// unchanged.
    pub fn read_fixed_string(&mut self, length: usize) -> Result<&'a str> {
        self.transactional(|parser| {
            let bytes = parser.read_bytes(length)?;
            std::str::from_utf8(bytes)
                .map_err(|error| decode_error!("character field is not valid UTF-8: {}", error))
        })
    }

    /// Read the next line of text, without its line terminator.
    ///
    /// Lines end at `\n`; a preceding `\r` is stripped as well. The last line of the buffer
    /// does not need a terminator. Returns `Ok(None)` once the parser is exhausted.
    ///
    /// # Errors
    /// Returns [`crate::Error::Decode`] if the line is not valid UTF-8. On error the position
    /// is unchanged.
    pub fn read_line(&mut self) -> Result<Option<&'a str>> {
        if !self.has_more_data() {
            return Ok(None);
        }

        let rest = &self.data[self.position..];
        let (line, consumed) = match rest.iter().position(|&byte| byte == b'\n') {
            Some(index) => (&rest[..index], index + 1),
            None => (rest, rest.len()),
        };
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        let text = std::str::from_utf8(line)
            .map_err(|error| decode_error!("line is not valid UTF-8: {}", error))?;

        self.position += consumed;
        Ok(Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn read_be_sequence() {
        let data = [
            0x00, 0x00, 0x00, 0x10, 0x3F, 0x80, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
        ];
        let mut parser = Parser::new(&data);

        assert_eq!(parser.read_be::<i32>().unwrap(), 16);
        assert_eq!(parser.read_be::<f32>().unwrap(), 1.0);
        assert_eq!(parser.read_be::<u32>().unwrap(), u32::MAX);
        assert!(!parser.has_more_data());
        assert_eq!(parser.remaining(), 0);
        assert!(matches!(
            parser.read_be::<i32>(),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn seek_to_end_is_allowed() {
        let data = [0x01, 0x02, 0x03];
        let mut parser = Parser::new(&data);

        parser.seek(3).unwrap();
        assert!(!parser.has_more_data());
        assert!(parser.seek(4).is_err());
        assert_eq!(parser.pos(), 3);

        parser.seek(1).unwrap();
        assert_eq!(parser.peek_byte().unwrap(), 0x02);
    }

    #[test]
    fn advance_by_overflow() {
        let data = [0u8; 4];
        let mut parser = Parser::new(&data);
        parser.advance_by(1).unwrap();
        assert!(parser.advance_by(usize::MAX).is_err());
        assert_eq!(parser.pos(), 1);
    }

    #[test]
    fn read_bytes_borrows_buffer() {
        let data = b"INTEREAL";
        let mut parser = Parser::new(data);
        let first = parser.read_bytes(4).unwrap();
        let second = parser.read_bytes(4).unwrap();
        assert_eq!(first, b"INTE");
        assert_eq!(second, b"REAL");
        assert!(parser.read_bytes(1).is_err());
    }

    #[test]
    fn read_fixed_string_keeps_blanks() {
        let data = b"PROD2   INJ1    ";
        let mut parser = Parser::new(data);
        assert_eq!(parser.read_fixed_string(8).unwrap(), "PROD2   ");
        assert_eq!(parser.read_fixed_string(8).unwrap(), "INJ1    ");
    }

    #[test]
    fn read_fixed_string_invalid_utf8() {
        let data = [b'A', 0xFF, 0xFE, b'B'];
        let mut parser = Parser::new(&data);
        assert!(matches!(
            parser.read_fixed_string(4),
            Err(Error::Decode { .. })
        ));
        assert_eq!(parser.pos(), 0);
    }

    #[test]
    fn read_fixed_string_truncated() {
        let data = b"ABC";
        let mut parser = Parser::new(data);
        assert!(matches!(
            parser.read_fixed_string(8),
            Err(Error::OutOfBounds { .. })
        ));
        assert_eq!(parser.pos(), 0);
    }

    #[test]
    fn read_line_terminators() {
        let data = b"first\r\nsecond\n\nlast";
        let mut parser = Parser::new(data);

        assert_eq!(parser.read_line().unwrap(), Some("first"));
        assert_eq!(parser.read_line().unwrap(), Some("second"));
        assert_eq!(parser.read_line().unwrap(), Some(""));
        assert_eq!(parser.read_line().unwrap(), Some("last"));
        assert_eq!(parser.read_line().unwrap(), None);
        assert_eq!(parser.pos(), data.len());
    }

    #[test]
    fn read_line_empty_buffer() {
        let mut parser = Parser::new(&[]);
        assert!(parser.is_empty());
        assert_eq!(parser.read_line().unwrap(), None);
    }

    #[test]
    fn transactional_keeps_position_on_success() {
        let data = [0x00, 0x00, 0x00, 0x07];
        let mut parser = Parser::new(&data);
        let value = parser.transactional(|p| p.read_be::<i32>()).unwrap();
        assert_eq!(value, 7);
        assert_eq!(parser.pos(), 4);
    }
}
