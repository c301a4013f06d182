//! ECLIPSE array codec.
//!
//! Every ECLIPSE file is a flat sequence of arrays. Each array is a header (an 8 character
//! name, an element count and a 4 character type tag) followed by its payload. The same
//! logical content can be stored in two encodings:
//!
//! - **binary** ([`crate::codec::binary`]): big-endian words, each header and each payload
//!   chunk bracketed by a pair of equal length markers, at most a type-specific number of
//!   elements per chunk;
//! - **formatted** ([`crate::codec::formatted`]): fixed-column text, one header line per
//!   array followed by a type-specific number of values per line.
//!
//! The per-type differences (element width, chunk ceiling, text columns, literal syntax) are
//! captured once by [`crate::codec::ArrayType`] and the [`crate::codec::EclElement`] trait, so
//! each encoding has a single generic reader and writer.
//!
//! # Key Components
//!
//! - [`crate::codec::ArrayType`] - The six type tags and their layout constants
//! - [`crate::codec::ArrayHeader`] - A decoded array header
//! - [`crate::codec::EclElement`] - Element codec implemented for `i32`, `f32`, `f64`, `bool`, `String`
//! - [`crate::codec::EclArray`] - A decoded array of any element type
//! - [`crate::codec::scientific`] - The `0.dddd` scientific notation used by formatted files
//!
//! # Usage Examples
//!
//! ```rust
//! use eclio::codec::{binary, ArrayType};
//! use eclio::Parser;
//!
//! let mut buffer = Vec::new();
//! binary::write_binary_header(&mut buffer, "SWAT    ", 3, "REAL")?;
//! binary::write_binary_array(&mut buffer, &[0.25_f32, 0.5, 0.75])?;
//!
//! let mut parser = Parser::new(&buffer);
//! let header = binary::read_binary_header(&mut parser)?;
//! assert_eq!(header.array_type()?, ArrayType::Real);
//!
//! let values: Vec<f32> = binary::read_binary_array(&mut parser, &header.name, header.count)?;
//! assert_eq!(values, [0.25, 0.5, 0.75]);
//! # Ok::<(), eclio::Error>(())
//! ```

pub mod binary;
mod element;
pub mod formatted;
pub mod scientific;

pub use element::{EclArray, EclElement};

use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// Value of the framing marker before and after every binary array header.
pub const BINARY_HEADER_MARKER: i32 = 16;

/// Width of the array name field, in bytes.
pub const NAME_WIDTH: usize = 8;

/// Width of the type tag field, in bytes.
pub const TYPE_WIDTH: usize = 4;

/// Width of a single CHAR element, in bytes.
pub const CHAR_WIDTH: usize = 8;

/// Binary LOGI word for `true`.
pub const LOGI_TRUE: u32 = 0xFFFF_FFFF;

/// Binary LOGI word for `false`.
pub const LOGI_FALSE: u32 = 0x0000_0000;

/// The element type of an ECLIPSE array, as named by the header's type tag.
///
/// The tag strings are the upper-case variant names (`INTE`, `REAL`, `DOUB`, `LOGI`, `CHAR`,
/// `MESS`). `MESS` arrays are markers that carry no elements.
///
/// # Examples
///
/// ```rust
/// use eclio::codec::ArrayType;
///
/// let array_type = ArrayType::from_tag("DOUB")?;
/// assert_eq!(array_type, ArrayType::Doub);
/// assert_eq!(array_type.tag(), "DOUB");
/// assert_eq!(array_type.element_size(), 8);
/// assert!(ArrayType::from_tag("C008").is_err());
/// # Ok::<(), eclio::Error>(())
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ArrayType {
    /// 32-bit signed integers
    Inte,
    /// 32-bit IEEE-754 floats
    Real,
    /// 64-bit IEEE-754 floats
    Doub,
    /// Booleans
    Logi,
    /// 8 character strings
    Char,
    /// Message marker without elements
    Mess,
}

impl ArrayType {
    /// Resolves a 4 character type tag.
    ///
    /// # Errors
    /// Returns [`crate::Error::Protocol`] for an unrecognized tag.
    pub fn from_tag(tag: &str) -> Result<ArrayType> {
        tag.parse::<ArrayType>()
            .map_err(|_| protocol_error!("unrecognized type tag '{}'", tag))
    }

    /// The 4 character type tag.
    #[must_use]
    pub fn tag(self) -> &'static str {
        self.into()
    }

    /// Size of one element in a binary payload, in bytes.
    #[must_use]
    pub fn element_size(self) -> usize {
        match self {
            ArrayType::Inte | ArrayType::Real | ArrayType::Logi => 4,
            ArrayType::Doub => 8,
            ArrayType::Char => CHAR_WIDTH,
            ArrayType::Mess => 0,
        }
    }

    /// Maximum number of elements in one binary chunk.
    ///
    /// CHAR chunks hold at most 105 elements (840 bytes); all other types hold 1000.
    #[must_use]
    pub fn block_elements(self) -> usize {
        match self {
            ArrayType::Inte | ArrayType::Real | ArrayType::Doub | ArrayType::Logi => 1000,
            ArrayType::Char => 105,
            ArrayType::Mess => 0,
        }
    }

    /// Maximum size of one binary chunk payload, in bytes.
    #[must_use]
    pub fn block_bytes(self) -> usize {
        self.element_size() * self.block_elements()
    }

    /// Number of values per formatted line.
    #[must_use]
    pub fn columns(self) -> usize {
        match self {
            ArrayType::Inte => 6,
            ArrayType::Real => 4,
            ArrayType::Doub => 3,
            ArrayType::Logi => 25,
            ArrayType::Char => 7,
            ArrayType::Mess => 0,
        }
    }

    /// Width of one formatted value, including its leading blanks.
    #[must_use]
    pub fn column_width(self) -> usize {
        match self {
            ArrayType::Inte => 12,
            ArrayType::Real => 17,
            ArrayType::Doub => 23,
            ArrayType::Logi => 3,
            ArrayType::Char => 11,
            ArrayType::Mess => 0,
        }
    }

    /// Number of values after which a formatted line is always broken.
    #[must_use]
    pub fn formatted_block(self) -> usize {
        match self {
            ArrayType::Inte | ArrayType::Real | ArrayType::Doub | ArrayType::Logi => 1000,
            ArrayType::Char => 105,
            ArrayType::Mess => 0,
        }
    }
}

/// A decoded array header.
///
/// `name` and `type_tag` are kept exactly as stored, so a header that was read can be written
/// back byte for byte. Use [`ArrayHeader::array_type`] to resolve the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayHeader {
    /// Array name, 8 characters including trailing blanks
    pub name: String,
    /// Declared number of elements
    pub count: i32,
    /// Type tag, 4 characters
    pub type_tag: String,
}

impl ArrayHeader {
    /// Creates a header for `count` elements of `array_type`.
    #[must_use]
    pub fn new(name: impl Into<String>, count: i32, array_type: ArrayType) -> ArrayHeader {
        ArrayHeader {
            name: name.into(),
            count,
            type_tag: array_type.tag().to_string(),
        }
    }

    /// Resolves the header's type tag.
    ///
    /// # Errors
    /// Returns [`crate::Error::Protocol`] for an unrecognized tag.
    pub fn array_type(&self) -> Result<ArrayType> {
        ArrayType::from_tag(&self.type_tag)
    }
}

/// Checks that an array name is 8 and a type tag 4 bytes wide.
///
/// # Errors
/// Returns [`crate::Error::InvalidFieldWidth`] naming the offending field.
pub fn validate_header_fields(name: &str, type_tag: &str) -> Result<()> {
    if name.len() != NAME_WIDTH {
        return Err(Error::InvalidFieldWidth {
            field: "array name",
            value: name.to_string(),
            expected: NAME_WIDTH,
        });
    }
    if type_tag.len() != TYPE_WIDTH {
        return Err(Error::InvalidFieldWidth {
            field: "type tag",
            value: type_tag.to_string(),
            expected: TYPE_WIDTH,
        });
    }
    Ok(())
}

/// Converts a declared element count to a length, rejecting negative counts.
pub(crate) fn element_count(name: &str, count: i32) -> Result<usize> {
    usize::try_from(count).map_err(|_| {
        element_count_error!(
            "array '{}' declares a negative element count {}",
            name,
            count
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn tags_roundtrip() {
        for array_type in ArrayType::iter() {
            assert_eq!(ArrayType::from_tag(array_type.tag()).unwrap(), array_type);
            assert_eq!(array_type.to_string(), array_type.tag());
            assert_eq!(array_type.tag().len(), TYPE_WIDTH);
        }
        assert_eq!(ArrayType::COUNT, 6);
    }

    #[test]
    fn unknown_tag_is_protocol_error() {
        assert!(matches!(
            ArrayType::from_tag("inte"),
            Err(Error::Protocol { .. })
        ));
        assert!(matches!(
            ArrayType::from_tag("X"),
            Err(Error::Protocol { .. })
        ));
    }

    #[test]
    fn layout_constants() {
        assert_eq!(ArrayType::Inte.block_bytes(), 4000);
        assert_eq!(ArrayType::Real.block_bytes(), 4000);
        assert_eq!(ArrayType::Doub.block_bytes(), 8000);
        assert_eq!(ArrayType::Logi.block_bytes(), 4000);
        assert_eq!(ArrayType::Char.block_bytes(), 840);
        assert_eq!(ArrayType::Mess.block_bytes(), 0);

        assert_eq!(ArrayType::Char.formatted_block(), 105);
        assert_eq!(ArrayType::Logi.columns(), 25);
        assert_eq!(ArrayType::Doub.column_width(), 23);
    }

    #[test]
    fn header_type_resolution() {
        let header = ArrayHeader::new("INTEHEAD", 95, ArrayType::Inte);
        assert_eq!(header.type_tag, "INTE");
        assert_eq!(header.array_type().unwrap(), ArrayType::Inte);

        let header = ArrayHeader {
            name: "BAD     ".to_string(),
            count: 1,
            type_tag: "ABCD".to_string(),
        };
        assert!(header.array_type().is_err());
    }

    #[test]
    fn header_field_widths() {
        assert!(validate_header_fields("PORV    ", "REAL").is_ok());
        assert!(matches!(
            validate_header_fields("PORV", "REAL"),
            Err(Error::InvalidFieldWidth {
                field: "array name",
                expected: 8,
                ..
            })
        ));
        assert!(matches!(
            validate_header_fields("PORV    ", "REA"),
            Err(Error::InvalidFieldWidth {
                field: "type tag",
                expected: 4,
                ..
            })
        ));
    }

    #[test]
    fn negative_count_rejected() {
        assert_eq!(element_count("ZCORN   ", 12).unwrap(), 12);
        assert!(matches!(
            element_count("ZCORN   ", -1),
            Err(Error::ElementCount { .. })
        ));
    }
}
