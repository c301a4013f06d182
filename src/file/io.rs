//! Byte order utilities and bounds-checked big-endian reading/writing.
//!
//! ECLIPSE files are big-endian on disk no matter which machine wrote them. Every multi-byte
//! value that crosses the file boundary (framing markers, element counts, INTE/REAL/DOUB/LOGI
//! payload words) goes through this module; character data is copied verbatim.
//!
//! # Key Components
//!
//! - [`crate::file::io::EclIO`] - Trait mapping a primitive to its fixed-size byte array
//! - [`crate::file::io::read_be`] / [`crate::file::io::read_be_at`] - Bounds-checked big-endian reads
//! - [`crate::file::io::write_be`] / [`crate::file::io::write_be_at`] - Bounds-checked big-endian writes
//! - [`crate::file::io::reverse_int`], [`crate::file::io::reverse_float`],
//!   [`crate::file::io::reverse_double`] - Raw byte reversal of a value's representation
//!
//! # Usage Examples
//!
//! ```rust
//! use eclio::file::io::{read_be_at, write_be_at};
//!
//! let mut data = [0u8; 8];
//! let mut offset = 0;
//! write_be_at(&mut data, &mut offset, 16_i32)?;
//! write_be_at(&mut data, &mut offset, 1.5_f32)?;
//! assert_eq!(&data[..4], &[0x00, 0x00, 0x00, 0x10]);
//!
//! offset = 0;
//! let marker: i32 = read_be_at(&data, &mut offset)?;
//! let value: f32 = read_be_at(&data, &mut offset)?;
//! assert_eq!((marker, value), (16, 1.5));
//! # Ok::<(), eclio::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All reading and writing functions return [`crate::Result<T>`] and will return
//! [`crate::Error::OutOfBounds`] if there are insufficient bytes in the buffer.

use crate::Result;

/// Trait for primitive types that are stored as fixed-size big-endian words.
///
/// Each implementation defines a `Bytes` associated type that represents the fixed-size
/// byte array for that type (e.g. `[u8; 4]` for `i32`). Conversions go through the standard
/// library's `from_be_bytes`/`to_be_bytes`, so floats are reinterpreted bit-for-bit and never
/// numerically converted.
pub trait EclIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in big-endian
    fn to_be_bytes(self) -> Self::Bytes;
}

// Implement EclIO support for i32 (INTE payload, element counts, framing markers)
impl EclIO for i32 {
    type Bytes = [u8; 4];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        i32::from_be_bytes(bytes)
    }

    fn to_be_bytes(self) -> Self::Bytes {
        i32::to_be_bytes(self)
    }
}

// Implement EclIO support for u32 (LOGI payload words)
impl EclIO for u32 {
    type Bytes = [u8; 4];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        u32::from_be_bytes(bytes)
    }

    fn to_be_bytes(self) -> Self::Bytes {
        u32::to_be_bytes(self)
    }
}

// Implement EclIO support for f32 (REAL payload)
impl EclIO for f32 {
    type Bytes = [u8; 4];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        f32::from_be_bytes(bytes)
    }

    fn to_be_bytes(self) -> Self::Bytes {
        f32::to_be_bytes(self)
    }
}

// Implement EclIO support for f64 (DOUB payload)
impl EclIO for f64 {
    type Bytes = [u8; 8];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        f64::from_be_bytes(bytes)
    }

    fn to_be_bytes(self) -> Self::Bytes {
        f64::to_be_bytes(self)
    }
}

/// Reverses the four bytes of an `i32`.
///
/// Self-inverse: applying it twice yields the original value.
///
/// # Examples
///
/// ```rust
/// use eclio::file::io::reverse_int;
///
/// assert_eq!(reverse_int(0x0102_0304), 0x0403_0201);
/// assert_eq!(reverse_int(reverse_int(-42)), -42);
/// ```
#[must_use]
pub fn reverse_int(value: i32) -> i32 {
    value.swap_bytes()
}

/// Reverses the four bytes of an `f32`'s IEEE-754 representation.
///
/// This is a reinterpretation of the bit pattern, not a numeric transform; NaN payloads and
/// infinities survive a double reversal unchanged.
#[must_use]
pub fn reverse_float(value: f32) -> f32 {
    f32::from_bits(value.to_bits().swap_bytes())
}

/// Reverses the eight bytes of an `f64`'s IEEE-754 representation.
#[must_use]
pub fn reverse_double(value: f64) -> f64 {
    f64::from_bits(value.to_bits().swap_bytes())
}

/// Safely reads a value of type `T` in big-endian byte order from the start of a buffer.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_be<T: EclIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_be_at(data, &mut offset)
}

/// Safely reads a value of type `T` in big-endian byte order at a specific offset.
///
/// The offset is advanced by the number of bytes read.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
///
/// # Examples
///
/// ```rust
/// use eclio::file::io::read_be_at;
///
/// let data = [0x00, 0x00, 0x00, 0x10, 0xFF, 0xFF, 0xFF, 0xFF];
/// let mut offset = 0;
///
/// let marker: i32 = read_be_at(&data, &mut offset)?;
/// let word: u32 = read_be_at(&data, &mut offset)?;
/// assert_eq!((marker, word, offset), (16, u32::MAX, 8));
/// # Ok::<(), eclio::Error>(())
/// ```
pub fn read_be_at<T: EclIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(out_of_bounds_error!());
    };
    if end > data.len() {
        return Err(out_of_bounds_error!());
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(out_of_bounds_error!());
    };

    *offset = end;

    Ok(T::from_be_bytes(read))
}

/// Safely writes a value of type `T` in big-endian byte order to the start of a buffer.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn write_be<T: EclIO>(data: &mut [u8], value: T) -> Result<()> {
    let mut offset = 0_usize;
    write_be_at(data, &mut offset, value)
}

/// Safely writes a value of type `T` in big-endian byte order at a specific offset.
///
/// The offset is advanced by the number of bytes written.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
///
/// # Examples
///
/// ```rust
/// use eclio::file::io::write_be_at;
///
/// let mut data = [0u8; 8];
/// let mut offset = 0;
/// write_be_at(&mut data, &mut offset, 4000_i32)?;
/// write_be_at(&mut data, &mut offset, u32::MAX)?;
/// assert_eq!(data, [0x00, 0x00, 0x0F, 0xA0, 0xFF, 0xFF, 0xFF, 0xFF]);
/// # Ok::<(), eclio::Error>(())
/// ```
pub fn write_be_at<T: EclIO>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let bytes = value.to_be_bytes();
    let bytes = bytes.as_ref();
    write_bytes_at(data, offset, bytes)
}

/// Copies raw bytes into a buffer at a specific offset, advancing the offset.
///
/// Used for the fixed-width character fields, which are never byte-swapped.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn write_bytes_at(data: &mut [u8], offset: &mut usize, bytes: &[u8]) -> Result<()> {
    let Some(end) = offset.checked_add(bytes.len()) else {
        return Err(out_of_bounds_error!());
    };
    if end > data.len() {
        return Err(out_of_bounds_error!());
    }

    data[*offset..end].copy_from_slice(bytes);
    *offset = end;
    Ok(())
}
