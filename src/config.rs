//! Validation configuration for reading and writing ECLIPSE files
//!
//! The codec itself always enforces the structural rules of both encodings (framing markers,
//! chunk counts, apostrophe layout). The switches here cover the policy decisions that sit on
//! top of it: how strictly names are checked on write, and how strings are presented on read.

/// Policy switches for [`crate::EclFile`] and [`crate::EclOutput`]
///
/// # Examples
///
/// ```rust
/// use eclio::ValidationConfig;
///
/// let config = ValidationConfig {
///     parallel_load: false,
///     ..ValidationConfig::default()
/// };
/// assert!(config.validate_binary_header);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ValidationConfig {
    /// Hold binary array headers written by [`crate::EclOutput`] to the 8/4 character width
    /// rule that formatted headers always follow
    pub validate_binary_header: bool,

    /// Right-pad array names shorter than 8 characters with blanks before writing
    /// Names longer than 8 characters are rejected regardless
    pub pad_names: bool,

    /// Trim trailing blanks off array names and CHAR values when reading
    /// An all-blank CHAR value becomes the empty string
    pub trim_strings: bool,

    /// Decode independent arrays on the rayon thread pool in [`crate::EclFile::load_data`]
    pub parallel_load: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            validate_binary_header: true,
            pad_names: true,
            trim_strings: true,
            parallel_load: true,
        }
    }
}

impl ValidationConfig {
    /// Creates a configuration matching the historical writer
    ///
    /// Binary headers are written verbatim without width checks and arrays are decoded
    /// sequentially. Names are padded and strings trimmed as before.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            validate_binary_header: false,
            pad_names: true,
            trim_strings: true,
            parallel_load: false,
        }
    }

    /// Creates a configuration that accepts only exact field widths
    ///
    /// Names must already be 8 characters wide on write, and names and CHAR values are
    /// returned exactly as stored on read.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            validate_binary_header: true,
            pad_names: false,
            trim_strings: false,
            parallel_load: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_config_presets() {
        let legacy = ValidationConfig::legacy();
        assert!(!legacy.validate_binary_header);
        assert!(legacy.pad_names);
        assert!(legacy.trim_strings);
        assert!(!legacy.parallel_load);

        let strict = ValidationConfig::strict();
        assert!(strict.validate_binary_header);
        assert!(!strict.pad_names);
        assert!(!strict.trim_strings);
        assert!(strict.parallel_load);
    }

    #[test]
    fn test_default_config() {
        let default = ValidationConfig::default();
        assert!(default.validate_binary_header);
        assert!(default.pad_names);
        assert!(default.trim_strings);
        assert!(default.parallel_load);
        assert_ne!(default, ValidationConfig::legacy());
    }
}
