//! Formatted (fixed-column text) array encoding.
//!
//! ```text
//!  'PORV    '          10 'REAL'
//!    0.10000000E+01   0.20000000E+01   0.30000000E+01   0.40000000E+01
//!    ...
//! ```
//!
//! Each array starts with a header line: a blank, the quoted 8 character name, the count
//! right-aligned in 11 columns and the quoted 4 character type tag. Values follow, each
//! right-aligned in a fixed-width column, with a line break after every
//! [`crate::codec::ArrayType::columns`] values and after every
//! [`crate::codec::ArrayType::formatted_block`] values. The last line of an array is always
//! terminated, and an empty array has no payload lines.
//!
//! | type | width | per line | example |
//! |------|-------|----------|---------|
//! | INTE | 12 | 6  | `          42` |
//! | REAL | 17 | 4  | `   0.98594632E-02` |
//! | DOUB | 23 | 3  | `   0.72816910455003D-06` |
//! | LOGI | 3  | 25 | `  T` |
//! | CHAR | 11 | 7  | ` 'PROD1   '` |

use std::io::Write;

use crate::{
    codec::{
        element_count, validate_header_fields, ArrayHeader, ArrayType, EclElement, NAME_WIDTH,
        TYPE_WIDTH,
    },
    Parser, Result,
};

/// Reads a formatted array header line.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the input is exhausted, the line has fewer than four
/// apostrophes, or the name or type fields have the wrong width, and [`crate::Error::Decode`]
/// if the count is not an integer.
///
/// # Examples
///
/// ```rust
/// use eclio::codec::formatted::read_formatted_header;
/// use eclio::Parser;
///
/// let mut parser = Parser::new(b" 'ZCORN   '        9600 'REAL'\n");
/// let header = read_formatted_header(&mut parser)?;
/// assert_eq!(header.name, "ZCORN   ");
/// assert_eq!(header.count, 9600);
/// assert_eq!(header.type_tag, "REAL");
/// # Ok::<(), eclio::Error>(())
/// ```
pub fn read_formatted_header(parser: &mut Parser<'_>) -> Result<ArrayHeader> {
    let start = parser.pos();
    let Some(line) = parser.read_line()? else {
        return Err(malformed_error!(
            "malformed header, unexpected end of file at offset {}",
            start
        ));
    };

    let quotes: Vec<usize> = line
        .match_indices('\'')
        .map(|(index, _)| index)
        .take(4)
        .collect();
    let &[name_start, name_end, type_start, type_end] = quotes.as_slice() else {
        return Err(malformed_error!(
            "malformed header at offset {}, expected four apostrophes in '{}'",
            start,
            line
        ));
    };

    let name = &line[name_start + 1..name_end];
    let count_field = line[name_end + 1..type_start].trim();
    let type_tag = &line[type_start + 1..type_end];

    let count = count_field.parse::<i32>().map_err(|_| {
        decode_error!(
            "invalid count '{}' in header of array '{}'",
            count_field,
            name
        )
    })?;

    if name.len() != NAME_WIDTH || type_tag.len() != TYPE_WIDTH {
        return Err(malformed_error!(
            "malformed header at offset {}, name '{}' and type '{}' must be 8 and 4 characters",
            start,
            name,
            type_tag
        ));
    }

    Ok(ArrayHeader {
        name: name.to_string(),
        count,
        type_tag: type_tag.to_string(),
    })
}

/// Writes a formatted array header line.
///
/// # Errors
/// Returns [`crate::Error::InvalidFieldWidth`] unless `name` is 8 and `type_tag` 4 characters
/// wide, or [`crate::Error::FileError`] if the sink fails.
///
/// # Examples
///
/// ```rust
/// use eclio::codec::formatted::write_formatted_header;
///
/// let mut buffer = Vec::new();
/// write_formatted_header(&mut buffer, "ZCORN   ", 9600, "REAL")?;
/// assert_eq!(buffer, b" 'ZCORN   '        9600 'REAL'\n");
///
/// assert!(write_formatted_header(&mut buffer, "ZCORN", 9600, "REAL").is_err());
/// # Ok::<(), eclio::Error>(())
/// ```
pub fn write_formatted_header<W: Write>(
    out: &mut W,
    name: &str,
    count: i32,
    type_tag: &str,
) -> Result<()> {
    validate_header_fields(name, type_tag)?;
    writeln!(out, " '{name}' {count:>11} '{type_tag}'")?;
    Ok(())
}

/// Reads the formatted payload of an array of `count` elements.
///
/// Lines are consumed until `count` values have been read. `name` only labels error messages.
///
/// # Errors
/// - [`crate::Error::Malformed`] if the input ends before `count` values were read, or for
///   CHAR data on a blank line or a token that is not an apostrophe-quoted 8 character field
/// - [`crate::Error::Decode`] for a token that is not a valid literal of the type
/// - [`crate::Error::ElementCount`] if `count` is negative or the last line read holds more
///   values than declared
pub fn read_formatted_array<T: EclElement>(
    parser: &mut Parser<'_>,
    name: &str,
    count: i32,
) -> Result<Vec<T>> {
    let total = element_count(name, count)?;
    let mut values = Vec::with_capacity(total.min(parser.remaining() / 2));

    while values.len() < total {
        let Some(line) = parser.read_line()? else {
            return Err(malformed_error!(
                "array '{}': unexpected end of file after {} of {} values",
                name,
                values.len(),
                total
            ));
        };
        T::parse_line(line, &mut values)?;
    }

    if values.len() > total {
        return Err(element_count_error!(
            "array '{}': found {} values, header declares {}",
            name,
            values.len(),
            total
        ));
    }

    Ok(values)
}

/// Writes the formatted payload of an array.
///
/// # Errors
/// Returns [`crate::Error::FileError`] if the sink fails, or the first element error (a
/// non-finite REAL/DOUB value, an over-long CHAR value).
pub fn write_formatted_array<T: EclElement, W: Write>(out: &mut W, values: &[T]) -> Result<()> {
    let array_type = T::ARRAY_TYPE;
    let columns = array_type.columns();
    let width = array_type.column_width();
    let block = array_type.formatted_block();

    let mut line = String::with_capacity(columns * width + 1);
    let mut in_block = 0;

    for value in values {
        let token = value.format_token()?;
        line.extend(std::iter::repeat(' ').take(width.saturating_sub(token.len())));
        line.push_str(&token);

        in_block += 1;
        if in_block % columns == 0 || in_block == block {
            line.push('\n');
            out.write_all(line.as_bytes())?;
            line.clear();
        }
        if in_block == block {
            in_block = 0;
        }
    }

    if !line.is_empty() {
        line.push('\n');
        out.write_all(line.as_bytes())?;
    }

    Ok(())
}

/// Reads an INTE payload.
///
/// # Errors
/// See [`read_formatted_array`].
pub fn read_formatted_inte_array(
    parser: &mut Parser<'_>,
    name: &str,
    count: i32,
) -> Result<Vec<i32>> {
    read_formatted_array(parser, name, count)
}

/// Reads a REAL payload.
///
/// # Errors
/// See [`read_formatted_array`].
pub fn read_formatted_real_array(
    parser: &mut Parser<'_>,
    name: &str,
    count: i32,
) -> Result<Vec<f32>> {
    read_formatted_array(parser, name, count)
}

/// Reads a DOUB payload. Tokens must use the `D` exponent marker.
///
/// # Errors
/// See [`read_formatted_array`].
pub fn read_formatted_doub_array(
    parser: &mut Parser<'_>,
    name: &str,
    count: i32,
) -> Result<Vec<f64>> {
    read_formatted_array(parser, name, count)
}

/// Reads a LOGI payload of `T`/`F` tokens.
///
/// # Errors
/// See [`read_formatted_array`].
pub fn read_formatted_logi_array(
    parser: &mut Parser<'_>,
    name: &str,
    count: i32,
) -> Result<Vec<bool>> {
    read_formatted_array(parser, name, count)
}

/// Reads a CHAR payload of apostrophe-quoted 8 character tokens.
///
/// # Errors
/// See [`read_formatted_array`].
pub fn read_formatted_char_array(
    parser: &mut Parser<'_>,
    name: &str,
    count: i32,
) -> Result<Vec<String>> {
    read_formatted_array(parser, name, count)
}

/// Writes an INTE payload.
///
/// # Errors
/// See [`write_formatted_array`].
pub fn write_formatted_inte_array<W: Write>(out: &mut W, values: &[i32]) -> Result<()> {
    write_formatted_array(out, values)
}

/// Writes a REAL payload.
///
/// # Errors
/// See [`write_formatted_array`].
pub fn write_formatted_real_array<W: Write>(out: &mut W, values: &[f32]) -> Result<()> {
    write_formatted_array(out, values)
}

/// Writes a DOUB payload.
///
/// # Errors
/// See [`write_formatted_array`].
pub fn write_formatted_doub_array<W: Write>(out: &mut W, values: &[f64]) -> Result<()> {
    write_formatted_array(out, values)
}

/// Writes a LOGI payload.
///
/// # Errors
/// See [`write_formatted_array`].
pub fn write_formatted_logi_array<W: Write>(out: &mut W, values: &[bool]) -> Result<()> {
    write_formatted_array(out, values)
}

/// Writes a CHAR payload.
///
/// # Errors
/// See [`write_formatted_array`].
pub fn write_formatted_char_array<W: Write>(out: &mut W, values: &[String]) -> Result<()> {
    write_formatted_array(out, values)
}

/// Number of bytes of formatted payload written for an array, line terminators included.
///
/// # Errors
/// Returns [`crate::Error::Protocol`] for a `MESS` array with elements or
/// [`crate::Error::ElementCount`] for a negative count.
///
/// # Examples
///
/// ```rust
/// use eclio::codec::{formatted::size_on_disk_formatted, ArrayType};
///
/// // one full line of 6 integers
/// assert_eq!(size_on_disk_formatted(6, ArrayType::Inte)?, 6 * 12 + 1);
/// // 1000 integers end with a short line of 4
/// assert_eq!(size_on_disk_formatted(1000, ArrayType::Inte)?, 1000 * 12 + 167);
/// # Ok::<(), eclio::Error>(())
/// ```
pub fn size_on_disk_formatted(count: i32, array_type: ArrayType) -> Result<usize> {
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
    let columns = array_type.columns();
    let width = array_type.column_width();
    let block = array_type.formatted_block();

    let full_blocks = total / block;
    let rest = total % block;

    let block_size = block * width + block.div_ceil(columns);
    let rest_size = rest * width + rest.div_ceil(columns);

    Ok(full_blocks * block_size + rest_size)
}

/// Skips the formatted payload of an array without decoding it.
///
/// # Errors
/// Returns [`crate::Error::Protocol`] for an unrecognized type tag or a `MESS` array with
/// elements, [`crate::Error::ElementCount`] for a negative count, or
/// [`crate::Error::OutOfBounds`] if the payload runs past the end of the input.
pub fn step_over_formatted_array(
    parser: &mut Parser<'_>,
    count: i32,
    type_tag: &str,
) -> Result<()> {
    let array_type = ArrayType::from_tag(type_tag)?;
    let size = size_on_disk_formatted(count, array_type)?;
    parser.advance_by(size)
}
