//! # eclio Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the eclio library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all eclio operations
pub use crate::Error;

/// The result type used throughout eclio
pub use crate::Result;

/// Reader and writer policy switches
pub use crate::ValidationConfig;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Catalog reader and sequential writer
pub use crate::{EclEntry, EclFile, EclOutput};

/// Low-level file parsing utilities
pub use crate::{File, Parser};

// ================================================================================================
// Codec
// ================================================================================================

/// Array types, headers and element codecs
pub use crate::codec::{ArrayHeader, ArrayType, EclArray, EclElement};
