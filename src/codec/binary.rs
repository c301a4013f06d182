//! Binary (big-endian, chunk-framed) array encoding.
//!
//! # Layout
//!
//! ```text
//! i32  16                 header start marker
//! [u8; 8]  name
//! i32  count
//! [u8; 4]  type tag
//! i32  16                 header end marker
//! repeat until count elements are covered:
//!     i32  n              chunk length in bytes
//!     n bytes             at most block_elements() big-endian elements
//!     i32  n              chunk length repeated
//! ```
//!
//! Every chunk except the last holds exactly [`crate::codec::ArrayType::block_elements`]
//! elements. An empty array has no chunks at all.
//!
//! # Key Components
//!
//! - [`read_binary_header`] / [`write_binary_header`] - Array header framing
//! - [`read_binary_array`] / [`write_binary_array`] - Generic chunk loop, plus typed wrappers
//! - [`step_over_array`] / [`size_on_disk_binary`] - Skipping a payload without decoding it
//! - [`is_eof`] - End of input probe for catalog scans

use std::io::Write;

use tracing::trace;

use crate::{
    codec::{
        element_count, ArrayHeader, ArrayType, EclElement, BINARY_HEADER_MARKER, NAME_WIDTH,
        TYPE_WIDTH,
    },
    file::io::{write_be_at, write_bytes_at},
    Parser, Result,
};

/// Size of the framing words and of the smallest record start
const WORD_SIZE: usize = 4;

/// Reads a binary array header.
///
/// Both framing markers must be 16. The name and type tag are returned verbatim; the tag is
/// not resolved here (see [`ArrayHeader::array_type`]).
///
/// # Errors
/// Returns [`crate::Error::Framing`] if a marker is not 16, [`crate::Error::OutOfBounds`] on
/// truncated input, or [`crate::Error::Decode`] if a text field is not UTF-8.
///
/// # Examples
///
/// ```rust
/// use eclio::codec::binary::{read_binary_header, write_binary_header};
/// use eclio::Parser;
///
/// let mut buffer = Vec::new();
/// write_binary_header(&mut buffer, "ZCORN   ", 96, "REAL")?;
/// assert_eq!(buffer.len(), 24);
///
/// let header = read_binary_header(&mut Parser::new(&buffer))?;
/// assert_eq!((header.name.as_str(), header.count, header.type_tag.as_str()), ("ZCORN   ", 96, "REAL"));
/// # Ok::<(), eclio::Error>(())
/// ```
pub fn read_binary_header(parser: &mut Parser<'_>) -> Result<ArrayHeader> {
    let start = parser.pos();

    let head: i32 = parser.read_be()?;
    if head != BINARY_HEADER_MARKER {
        return Err(framing_error!(
            "array header at offset {} starts with {}, expected {}",
            start,
            head,
            BINARY_HEADER_MARKER
        ));
    }

    let name = parser.read_fixed_string(NAME_WIDTH)?.to_string();
    let count: i32 = parser.read_be()?;
    let type_tag = parser.read_fixed_string(TYPE_WIDTH)?.to_string();

    let tail: i32 = parser.read_be()?;
    if tail != BINARY_HEADER_MARKER {
        return Err(framing_error!(
            "array '{}' header at offset {} ends with {}, expected {}",
            name,
            start,
            tail,
            BINARY_HEADER_MARKER
        ));
    }

    Ok(ArrayHeader {
        name,
        count,
        type_tag,
    })
}

/// Writes a binary array header.
///
/// `name` and `type_tag` are written as given, without width checks; see
/// [`crate::codec::validate_header_fields`] for callers that want them.
///
/// # Errors
/// Returns [`crate::Error::FileError`] if the sink fails.
pub fn write_binary_header<W: Write>(
    out: &mut W,
    name: &str,
    count: i32,
    type_tag: &str,
) -> Result<()> {
    let mut buffer = vec![0u8; 12 + name.len() + type_tag.len()];
    let mut offset = 0;

    write_be_at(&mut buffer, &mut offset, BINARY_HEADER_MARKER)?;
    write_bytes_at(&mut buffer, &mut offset, name.as_bytes())?;
    write_be_at(&mut buffer, &mut offset, count)?;
    write_bytes_at(&mut buffer, &mut offset, type_tag.as_bytes())?;
    write_be_at(&mut buffer, &mut offset, BINARY_HEADER_MARKER)?;

    out.write_all(&buffer)?;
    Ok(())
}

/// Reads the binary payload of an array of `count` elements.
///
/// `name` only labels error messages.
///
/// # Errors
/// - [`crate::Error::ElementCount`] if `count` is negative, a chunk length is not a whole
///   number of elements or exceeds the type's ceiling, or the chunks do not add up to `count`
///   with only the last one short
/// - [`crate::Error::Framing`] if a chunk's trailing length differs from its leading length
/// - [`crate::Error::OutOfBounds`] on truncated input
/// - element errors such as [`crate::Error::Decode`] for an invalid LOGI word
pub fn read_binary_array<T: EclElement>(
    parser: &mut Parser<'_>,
    name: &str,
    count: i32,
) -> Result<Vec<T>> {
    let total = element_count(name, count)?;
    let element_size = T::ARRAY_TYPE.element_size();
    let ceiling = T::ARRAY_TYPE.block_elements();

    let mut values = Vec::with_capacity(total.min(parser.remaining() / element_size));
    let mut rest = i64::from(count);

    while rest > 0 {
        let chunk_start = parser.pos();
        let head: i32 = parser.read_be()?;

        let num = usize::try_from(head)
            .ok()
            .filter(|bytes| bytes % element_size == 0)
            .map(|bytes| bytes / element_size)
            .filter(|num| *num <= ceiling)
            .ok_or_else(|| {
                element_count_error!(
                    "array '{}': inconsistent chunk header {} at offset {}, chunks hold at most {} elements of {} bytes",
                    name,
                    head,
                    chunk_start,
                    ceiling,
                    element_size
                )
            })?;

        for _ in 0..num {
            values.push(T::decode(parser)?);
        }

        // num <= ceiling <= 1000, the cast cannot truncate
        rest -= num as i64;
        if (num < ceiling && rest != 0) || (num == ceiling && rest < 0) {
            return Err(element_count_error!(
                "array '{}': incorrect element count, chunk of {} elements at offset {} leaves {} of {} remaining",
                name,
                num,
                chunk_start,
                rest,
                count
            ));
        }

        let tail: i32 = parser.read_be()?;
        if tail != head {
            return Err(framing_error!(
                "array '{}': tail mismatch at offset {}, chunk length {} followed by {}",
                name,
                chunk_start,
                head,
                tail
            ));
        }

        trace!(name, elements = num, remaining = rest, "read binary chunk");
    }

    Ok(values)
}

/// Writes the binary payload of an array, splitting it into chunks of at most the type's
/// ceiling.
///
/// # Errors
/// Returns [`crate::Error::FileError`] if the sink fails or an element error such as
/// [`crate::Error::InvalidFieldWidth`] for an over-long CHAR value.
pub fn write_binary_array<T: EclElement, W: Write>(out: &mut W, values: &[T]) -> Result<()> {
    let element_size = T::ARRAY_TYPE.element_size();
    let ceiling = T::ARRAY_TYPE.block_elements();
    let mut buffer = Vec::with_capacity(T::ARRAY_TYPE.block_bytes() + 8);

    for chunk in values.chunks(ceiling) {
        let bytes = chunk.len() * element_size;
        // bytes <= block_bytes() <= 8000
        let marker = bytes as i32;

        buffer.clear();
        buffer.resize(bytes + 8, 0);
        let mut offset = 0;

        write_be_at(&mut buffer, &mut offset, marker)?;
        for value in chunk {
            value.encode(&mut buffer, &mut offset)?;
        }
        write_be_at(&mut buffer, &mut offset, marker)?;

        out.write_all(&buffer)?;
        trace!(elements = chunk.len(), "wrote binary chunk");
    }

    Ok(())
}

/// Reads an INTE payload.
///
/// # Errors
/// See [`read_binary_array`].
pub fn read_binary_inte_array(
    parser: &mut Parser<'_>,
    name: &str,
    count: i32,
) -> Result<Vec<i32>> {
    read_binary_array(parser, name, count)
}

/// Reads a REAL payload.
///
/// # Errors
/// See [`read_binary_array`].
pub fn read_binary_real_array(
    parser: &mut Parser<'_>,
    name: &str,
    count: i32,
) -> Result<Vec<f32>> {
    read_binary_array(parser, name, count)
}

/// Reads a DOUB payload.
///
/// # Errors
/// See [`read_binary_array`].
pub fn read_binary_doub_array(
    parser: &mut Parser<'_>,
    name: &str,
    count: i32,
) -> Result<Vec<f64>> {
    read_binary_array(parser, name, count)
}

/// Reads a LOGI payload. Words other than all ones or all zeros are rejected.
///
/// # Errors
/// See [`read_binary_array`].
pub fn read_binary_logi_array(
    parser: &mut Parser<'_>,
    name: &str,
    count: i32,
) -> Result<Vec<bool>> {
    read_binary_array(parser, name, count)
}

/// Reads a CHAR payload. Values are returned as stored, trailing blanks included.
///
/// # Errors
/// See [`read_binary_array`].
pub fn read_binary_char_array(
    parser: &mut Parser<'_>,
    name: &str,
    count: i32,
) -> Result<Vec<String>> {
    read_binary_array(parser, name, count)
}

/// Writes an INTE payload.
///
/// # Errors
/// See [`write_binary_array`].
pub fn write_binary_inte_array<W: Write>(out: &mut W, values: &[i32]) -> Result<()> {
    write_binary_array(out, values)
}

/// Writes a REAL payload.
///
/// # Errors
/// See [`write_binary_array`].
pub fn write_binary_real_array<W: Write>(out: &mut W, values: &[f32]) -> Result<()> {
    write_binary_array(out, values)
}

/// Writes a DOUB payload.
///
/// # Errors
/// See [`write_binary_array`].
pub fn write_binary_doub_array<W: Write>(out: &mut W, values: &[f64]) -> Result<()> {
    write_binary_array(out, values)
}

/// Writes a LOGI payload.
///
/// # Errors
/// See [`write_binary_array`].
pub fn write_binary_logi_array<W: Write>(out: &mut W, values: &[bool]) -> Result<()> {
    write_binary_array(out, values)
}

/// Writes a CHAR payload, padding each value to 8 bytes.
///
/// # Errors
/// See [`write_binary_array`].
pub fn write_binary_char_array<W: Write>(out: &mut W, values: &[String]) -> Result<()> {
    write_binary_array(out, values)
}

/// Number of payload bytes, framing included, of a binary array.
///
/// # Errors
/// Returns [`crate::Error::Protocol`] for a `MESS` array with elements or
/// [`crate::Error::ElementCount`] for a negative count.
///
/// # Examples
///
/// ```rust
/// use eclio::codec::{binary::size_on_disk_binary, ArrayType};
///
/// assert_eq!(size_on_disk_binary(0, ArrayType::Inte)?, 0);
/// assert_eq!(size_on_disk_binary(1000, ArrayType::Inte)?, 4008);
/// assert_eq!(size_on_disk_binary(1001, ArrayType::Inte)?, 4016);
/// assert_eq!(size_on_disk_binary(106, ArrayType::Char)?, 864);
/// # Ok::<(), eclio::Error>(())
/// ```
pub fn size_on_disk_binary(count: i32, array_type: ArrayType) -> Result<usize> {
    if array_type == ArrayType::Mess {
        if count != 0 {
            return Err(protocol_error!(
                "MESS array declares {} elements, expected none",
                count
            ));
        }
        return Ok(0);
    }

    let total = element_count(array_type.tag(), count)?;
    if total == 0 {
        return Ok(0);
    }

    let chunks = (total - 1) / array_type.block_elements() + 1;
    Ok(total * array_type.element_size() + chunks * 8)
}

/// Skips the binary payload of an array without decoding it.
///
/// # Errors
/// Returns [`crate::Error::Protocol`] for an unrecognized type tag or a `MESS` array with
/// elements, [`crate::Error::ElementCount`] for a negative count, or
/// [`crate::Error::OutOfBounds`] if the payload runs past the end of the input.
pub fn step_over_array(parser: &mut Parser<'_>, count: i32, type_tag: &str) -> Result<()> {
    let array_type = ArrayType::from_tag(type_tag)?;
    let size = size_on_disk_binary(count, array_type)?;
    parser.advance_by(size)
}

/// Returns `true` if not even one 4-byte word is left in front of the parser.
///
/// Trailing bytes shorter than a word cannot start a record and count as end of file. The
/// parser is never moved.
///
/// # Examples
///
/// ```rust
/// use eclio::codec::binary::is_eof;
/// use eclio::Parser;
///
/// let data = [0x00, 0x00, 0x00, 0x10, 0x00];
/// let mut parser = Parser::new(&data);
/// assert!(!is_eof(&parser));
///
/// parser.advance_by(4)?;
/// assert!(is_eof(&parser));
/// # Ok::<(), eclio::Error>(())
/// ```
#[must_use]
pub fn is_eof(parser: &Parser<'_>) -> bool {
    parser.remaining() < WORD_SIZE
}
