use thiserror::Error;

use crate::codec::ArrayType;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! framing_error {
    ($msg:expr) => {
        crate::Error::Framing {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Framing {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! element_count_error {
    ($msg:expr) => {
        crate::Error::ElementCount {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::ElementCount {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! decode_error {
    ($msg:expr) => {
        crate::Error::Decode {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Decode {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! protocol_error {
    ($msg:expr) => {
        crate::Error::Protocol {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Protocol {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds {
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every read or write call either completes or fails with exactly one of these variants; there
/// is no partial result and no internal retry. The structural variants record the source location
/// that detected the problem, which together with the message (array name, the numbers that did
/// not match, a short diagnostic) is usually enough to locate the corrupt record in a file.
///
/// # Error Categories
///
/// ## Stream state
/// - [`Error::StreamState`] - The output has already been closed
/// - [`Error::FileError`] - Filesystem or sink I/O errors
/// - [`Error::OutOfBounds`] - The byte image ended before a read could complete
/// - [`Error::Empty`] - Empty input provided
///
/// ## Binary framing and content
/// - [`Error::Framing`] - Header markers not equal to 16, or chunk prefix/suffix mismatch
/// - [`Error::ElementCount`] - Chunk element counts that break the chunking rules
/// - [`Error::Decode`] - Values that cannot be decoded (LOGI words, literals, `D` exponents)
///
/// ## Structure and protocol
/// - [`Error::Malformed`] - Formatted text that does not follow the record layout
/// - [`Error::Protocol`] - `MESS` arrays with elements, unknown type tags
/// - [`Error::InvalidFieldWidth`] - Names or type tags of the wrong width on write
///
/// ## Catalog access
/// - [`Error::NotFound`], [`Error::InvalidIndex`], [`Error::NotLoaded`], [`Error::TypeMismatch`]
///
/// # Examples
///
/// ```rust,no_run
/// use eclio::{Error, EclFile};
///
/// match EclFile::open("CASE.INIT") {
///     Ok(file) => println!("{} arrays", file.len()),
///     Err(Error::Framing { message, .. }) => eprintln!("corrupt record: {message}"),
///     Err(Error::FileError(io_err)) => eprintln!("I/O error: {io_err}"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The output stream is not open for writing.
    ///
    /// Returned by [`crate::EclOutput`] once it has been closed.
    #[error("Stream not open - {0}")]
    StreamState(String),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur during file operations
    /// such as reading from disk, permission issues, or a failing sink.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for wrapping external library errors, e.g. a failed memory mapping.
    #[error("{0}")]
    Error(String),

    /// An out of bound access was attempted while reading the byte image.
    ///
    /// A binary record claims more data than the file holds.
    #[error("Out of Bound read would have occurred! - {file}:{line}")]
    OutOfBounds {
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// A binary framing marker did not have the expected value.
    ///
    /// Either a header marker was not 16, or a chunk suffix did not repeat its prefix.
    #[error("Framing corruption - {file}:{line}: {message}")]
    Framing {
        /// The message to be printed for the Framing error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The element counts of a binary payload are inconsistent.
    ///
    /// A chunk held a negative number of elements or more than the type's ceiling, a
    /// non-final chunk was short, or the chunks did not add up to the declared count.
    #[error("Inconsistent element count - {file}:{line}: {message}")]
    ElementCount {
        /// The message to be printed for the ElementCount error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A value could not be decoded or encoded.
    #[error("Invalid literal - {file}:{line}: {message}")]
    Decode {
        /// The message to be printed for the Decode error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The formatted text is damaged and could not be parsed.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The record sequence violates the file protocol.
    #[error("Protocol violation - {file}:{line}: {message}")]
    Protocol {
        /// The message to be printed for the Protocol error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A fixed-width field handed to a writer has the wrong width.
    #[error("Invalid field width - {field} '{value}' must be {expected} characters")]
    InvalidFieldWidth {
        /// Which field was rejected (array name, type tag, character value)
        field: &'static str,
        /// The rejected value
        value: String,
        /// The required width
        expected: usize,
    },

    /// No array with this name exists in the file.
    #[error("Array '{0}' not found")]
    NotFound(String),

    /// The array index is past the end of the catalog.
    #[error("Array index {0} is out of range")]
    InvalidIndex(usize),

    /// The array exists but its data has not been loaded yet.
    #[error("Array '{0}' has not been loaded")]
    NotLoaded(String),

    /// The array exists but holds a different element type.
    #[error("Array '{name}' is of type {found}, requested {expected}")]
    TypeMismatch {
        /// Name of the array
        name: String,
        /// Element type that was requested
        expected: ArrayType,
        /// Element type stored in the file
        found: ArrayType,
    },
}
