//! Per-type element encoding.
//!
//! [`EclElement`] is the small capability the generic binary and formatted codecs are written
//! against. Each implementation knows how to move one value in and out of a binary payload and
//! how to spell it as a formatted token.

use crate::{
    codec::{
        scientific::make_scientific_string, ArrayType, CHAR_WIDTH, LOGI_FALSE, LOGI_TRUE,
    },
    file::io::{write_be_at, write_bytes_at},
    Error, Parser, Result,
};

/// An element type that can be stored in an ECLIPSE array.
///
/// Implemented for `i32` (INTE), `f32` (REAL), `f64` (DOUB), `bool` (LOGI) and `String`
/// (CHAR). The binary element width and chunk ceiling come from [`EclElement::ARRAY_TYPE`].
pub trait EclElement: Sized + Send + Sync + 'static {
    /// The array type storing elements of this type
    const ARRAY_TYPE: ArrayType;

    /// Decodes one element from a binary payload.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated input or [`crate::Error::Decode`]
    /// for an invalid value.
    fn decode(parser: &mut Parser<'_>) -> Result<Self>;

    /// Encodes one element into a binary payload buffer, advancing `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the buffer is too small or
    /// [`crate::Error::InvalidFieldWidth`] for an over-long CHAR value.
    fn encode(&self, data: &mut [u8], offset: &mut usize) -> Result<()>;

    /// Renders one element as a formatted token, without column padding.
    ///
    /// # Errors
    /// Returns an error if the value has no formatted representation.
    fn format_token(&self) -> Result<String>;

    /// Parses one whitespace-delimited formatted token.
    ///
    /// # Errors
    /// Returns [`crate::Error::Decode`] for an invalid literal.
    fn parse_token(token: &str) -> Result<Self>;

    /// Parses every value on one formatted payload line, appending them to `values`.
    ///
    /// # Errors
    /// Returns the first token error on the line.
    fn parse_line(line: &str, values: &mut Vec<Self>) -> Result<()> {
        for token in line.split_whitespace() {
            values.push(Self::parse_token(token)?);
        }
        Ok(())
    }

    /// Borrows the elements of `array` if it holds this element type.
    fn from_array(array: &EclArray) -> Option<&[Self]>;

    /// Wraps decoded elements.
    fn into_array(values: Vec<Self>) -> EclArray;
}

/// A decoded array of any element type.
#[derive(Debug, Clone, PartialEq)]
pub enum EclArray {
    /// INTE values
    Inte(Vec<i32>),
    /// REAL values
    Real(Vec<f32>),
    /// DOUB values
    Doub(Vec<f64>),
    /// LOGI values
    Logi(Vec<bool>),
    /// CHAR values
    Char(Vec<String>),
    /// MESS marker
    Mess,
}

impl EclArray {
    /// The type of the stored elements.
    #[must_use]
    pub fn array_type(&self) -> ArrayType {
        match self {
            EclArray::Inte(_) => ArrayType::Inte,
            EclArray::Real(_) => ArrayType::Real,
            EclArray::Doub(_) => ArrayType::Doub,
            EclArray::Logi(_) => ArrayType::Logi,
            EclArray::Char(_) => ArrayType::Char,
            EclArray::Mess => ArrayType::Mess,
        }
    }

    /// Number of stored elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            EclArray::Inte(values) => values.len(),
            EclArray::Real(values) => values.len(),
            EclArray::Doub(values) => values.len(),
            EclArray::Logi(values) => values.len(),
            EclArray::Char(values) => values.len(),
            EclArray::Mess => 0,
        }
    }

    /// Returns `true` if the array holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EclElement for i32 {
    const ARRAY_TYPE: ArrayType = ArrayType::Inte;

    fn decode(parser: &mut Parser<'_>) -> Result<Self> {
        parser.read_be::<i32>()
    }

    fn encode(&self, data: &mut [u8], offset: &mut usize) -> Result<()> {
        write_be_at(data, offset, *self)
    }

    fn format_token(&self) -> Result<String> {
        Ok(self.to_string())
    }

    fn parse_token(token: &str) -> Result<Self> {
        token
            .parse::<i32>()
            .map_err(|_| decode_error!("invalid integer literal '{}'", token))
    }

    fn from_array(array: &EclArray) -> Option<&[Self]> {
        match array {
            EclArray::Inte(values) => Some(values),
            _ => None,
        }
    }

    fn into_array(values: Vec<Self>) -> EclArray {
        EclArray::Inte(values)
    }
}

impl EclElement for f32 {
    const ARRAY_TYPE: ArrayType = ArrayType::Real;

    fn decode(parser: &mut Parser<'_>) -> Result<Self> {
        parser.read_be::<f32>()
    }

    fn encode(&self, data: &mut [u8], offset: &mut usize) -> Result<()> {
        write_be_at(data, offset, *self)
    }

    fn format_token(&self) -> Result<String> {
        if !self.is_finite() {
            return Err(decode_error!(
                "REAL value {} has no formatted representation",
                self
            ));
        }
        if *self == 0.0 {
            return Ok("0.00000000E+00".to_string());
        }
        Ok(make_scientific_string(*self))
    }

    fn parse_token(token: &str) -> Result<Self> {
        match token.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(decode_error!("invalid REAL literal '{}'", token)),
        }
    }

    fn from_array(array: &EclArray) -> Option<&[Self]> {
        match array {
            EclArray::Real(values) => Some(values),
            _ => None,
        }
    }

    fn into_array(values: Vec<Self>) -> EclArray {
        EclArray::Real(values)
    }
}

impl EclElement for f64 {
    const ARRAY_TYPE: ArrayType = ArrayType::Doub;

    fn decode(parser: &mut Parser<'_>) -> Result<Self> {
        parser.read_be::<f64>()
    }

    fn encode(&self, data: &mut [u8], offset: &mut usize) -> Result<()> {
        write_be_at(data, offset, *self)
    }

    fn format_token(&self) -> Result<String> {
        if !self.is_finite() {
            return Err(decode_error!(
                "DOUB value {} has no formatted representation",
                self
            ));
        }
        if *self == 0.0 {
            return Ok("0.00000000000000D+00".to_string());
        }
        Ok(make_scientific_string(*self))
    }

    fn parse_token(token: &str) -> Result<Self> {
        if !token.contains('D') {
            return Err(decode_error!(
                "invalid DOUB literal '{}', expected D exponent marker",
                token
            ));
        }
        match token.replacen('D', "E", 1).parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(decode_error!("invalid DOUB literal '{}'", token)),
        }
    }

    fn from_array(array: &EclArray) -> Option<&[Self]> {
        match array {
            EclArray::Doub(values) => Some(values),
            _ => None,
        }
    }

    fn into_array(values: Vec<Self>) -> EclArray {
        EclArray::Doub(values)
    }
}

impl EclElement for bool {
    const ARRAY_TYPE: ArrayType = ArrayType::Logi;

    fn decode(parser: &mut Parser<'_>) -> Result<Self> {
        match parser.read_be::<u32>()? {
            LOGI_TRUE => Ok(true),
            LOGI_FALSE => Ok(false),
            word => Err(decode_error!(
                "invalid LOGI word 0x{:08X} at offset {}",
                word,
                parser.pos() - 4
            )),
        }
    }

    fn encode(&self, data: &mut [u8], offset: &mut usize) -> Result<()> {
        write_be_at(data, offset, if *self { LOGI_TRUE } else { LOGI_FALSE })
    }

    fn format_token(&self) -> Result<String> {
        Ok(if *self { "T" } else { "F" }.to_string())
    }

    fn parse_token(token: &str) -> Result<Self> {
        match token {
            "T" => Ok(true),
            "F" => Ok(false),
            _ => Err(decode_error!("invalid LOGI literal '{}'", token)),
        }
    }

    fn from_array(array: &EclArray) -> Option<&[Self]> {
        match array {
            EclArray::Logi(values) => Some(values),
            _ => None,
        }
    }

    fn into_array(values: Vec<Self>) -> EclArray {
        EclArray::Logi(values)
    }
}

/// Pads a CHAR value with blanks to the full element width.
fn pad_char_value(value: &str) -> Result<String> {
    if value.len() > CHAR_WIDTH {
        return Err(Error::InvalidFieldWidth {
            field: "character value",
            value: value.to_string(),
            expected: CHAR_WIDTH,
        });
    }

    let mut padded = String::with_capacity(CHAR_WIDTH);
    padded.push_str(value);
    padded.extend(std::iter::repeat(' ').take(CHAR_WIDTH - value.len()));
    Ok(padded)
}

impl EclElement for String {
    const ARRAY_TYPE: ArrayType = ArrayType::Char;

    fn decode(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(parser.read_fixed_string(CHAR_WIDTH)?.to_string())
    }

    fn encode(&self, data: &mut [u8], offset: &mut usize) -> Result<()> {
        write_bytes_at(data, offset, pad_char_value(self)?.as_bytes())
    }

    fn format_token(&self) -> Result<String> {
        Ok(format!("'{}'", pad_char_value(self)?))
    }

    fn parse_token(token: &str) -> Result<Self> {
        let value = token
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
            .ok_or_else(|| malformed_error!("malformed char token '{}'", token))?;

        if value.len() != CHAR_WIDTH {
            return Err(malformed_error!("malformed char token '{}'", token));
        }
        Ok(value.to_string())
    }

    fn parse_line(line: &str, values: &mut Vec<Self>) -> Result<()> {
        if line.trim().is_empty() {
            return Err(malformed_error!(
                "unexpected end of data, blank line after {} CHAR values",
                values.len()
            ));
        }

        // Values may contain blanks, so tokens are delimited by apostrophes only
        let mut rest = line.trim_start();
        while !rest.is_empty() {
            let Some(body) = rest.strip_prefix('\'') else {
                return Err(malformed_error!("malformed char token in line '{}'", line));
            };
            let Some(end) = body.find('\'') else {
                return Err(malformed_error!("malformed char token in line '{}'", line));
            };

            values.push(Self::parse_token(&rest[..end + 2])?);
            rest = body[end + 1..].trim_start();
        }
        Ok(())
    }

    fn from_array(array: &EclArray) -> Option<&[Self]> {
        match array {
            EclArray::Char(values) => Some(values),
            _ => None,
        }
    }

    fn into_array(values: Vec<Self>) -> EclArray {
        EclArray::Char(values)
    }
}
