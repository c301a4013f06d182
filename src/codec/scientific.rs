//! The scientific notation of formatted ECLIPSE files.
//!
//! Formatted REAL and DOUB values are written as `[-]0.<digits><marker><sign><exponent>`: the
//! mantissa starts with `0.` followed directly by the first significant digit, so the exponent
//! is one higher than in ordinary normalized notation. REAL values carry 8 significant digits
//! and the `E` marker, DOUB values 14 significant digits and the `D` marker. The exponent
//! always has a sign and at least two digits.
//!
//! | value (type) | rendered |
//! |---|---|
//! | `9.8594632e-3` (f32) | `0.98594632E-02` |
//! | `5.8719699e+8` (f32) | `0.58719699E+09` |
//! | `7.2816910455003e-7` (f64) | `0.72816910455003D-06` |
//! | `1.0808168631047e-102` (f64) | `0.10808168631047D-101` |
//!
//! Zero is not handled here; writers emit the fixed zero literals instead.

use std::fmt::LowerExp;

/// Floating point types that have an ECLIPSE scientific representation.
pub trait ScientificFloat: Copy + LowerExp {
    /// Number of significant digits in the mantissa
    const DIGITS: usize;
    /// Exponent marker
    const MARKER: char;

    /// Returns `true` if the sign bit is set.
    fn is_sign_negative(self) -> bool;

    /// Returns the absolute value.
    fn abs(self) -> Self;
}

impl ScientificFloat for f32 {
    const DIGITS: usize = 8;
    const MARKER: char = 'E';

    fn is_sign_negative(self) -> bool {
        f32::is_sign_negative(self)
    }

    fn abs(self) -> Self {
        f32::abs(self)
    }
}

impl ScientificFloat for f64 {
    const DIGITS: usize = 14;
    const MARKER: char = 'D';

    fn is_sign_negative(self) -> bool {
        f64::is_sign_negative(self)
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }
}

/// Renders a nonzero finite value in ECLIPSE scientific notation.
///
/// # Examples
///
/// ```rust
/// use eclio::codec::scientific::make_scientific_string;
///
/// assert_eq!(make_scientific_string(9.8594632e-3_f32), "0.98594632E-02");
/// assert_eq!(make_scientific_string(-9.8594632e-3_f32), "-0.98594632E-02");
/// assert_eq!(make_scientific_string(4.8038829024881e+74_f64), "0.48038829024881D+75");
/// ```
#[must_use]
pub fn make_scientific_string<T: ScientificFloat>(value: T) -> String {
    // Rust renders d.ddde<exp>; the mantissa digits carry over unchanged
    let rendered = format!("{:.*e}", T::DIGITS - 1, value.abs());
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent = exponent.parse::<i32>().unwrap_or(0) + 1;
    let sign = if value.is_sign_negative() { "-" } else { "" };

    format!("{sign}0.{digits}{}{exponent:+03}", T::MARKER)
}
