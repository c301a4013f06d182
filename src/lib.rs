// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # eclio
//!
//! Reading and writing of ECLIPSE reservoir simulation array files, in pure Rust.
//!
//! Restart, init, grid and summary files produced by ECLIPSE-compatible simulators are flat
//! sequences of named, typed arrays. Each file comes in two encodings: a big-endian binary
//! form framed in bounded chunks, and a fixed-column formatted text form. `eclio` handles both
//! byte for byte, on any host byte order.
//!
//! ## Features
//!
//! - **Both encodings** - Binary (`.INIT`, `.EGRID`, `.UNRST`, ...) and formatted (`.FINIT`,
//!   `.FEGRID`, `.FUNRST`, ...) files through one API
//! - **Catalog first** - [`EclFile`] indexes every array header without decoding payloads
//! - **Memory-mapped** - Files on disk are mapped, not read, and arrays decode in parallel
//! - **Strict framing checks** - Corrupt markers, chunk counts and literals are reported with
//!   the array name and offsets involved
//! - **Low-level codec** - [`codec::binary`] and [`codec::formatted`] expose the per-array
//!   header and payload routines for callers that drive their own record sequence
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eclio::prelude::*;
//!
//! let mut file = EclFile::open("CASE.INIT")?;
//! file.load_data()?;
//!
//! let porv: &[f32] = file.get_named("PORV")?;
//! println!("{} cells", porv.len());
//! # Ok::<(), eclio::Error>(())
//! ```
//!
//! ### Writing
//!
//! ```rust
//! use eclio::prelude::*;
//!
//! let mut output = EclOutput::new(Vec::new(), true);
//! output.write("INTEHEAD", &[2_i32, 100])?;
//! output.write("WELLS", &["PROD1".to_string()])?;
//!
//! let text = String::from_utf8(output.into_inner()?).unwrap();
//! assert!(text.starts_with(" 'INTEHEAD'           2 'INTE'\n"));
//! # Ok::<(), eclio::Error>(())
//! ```
//!
//! ### Driving the codec directly
//!
//! ```rust
//! use eclio::codec::binary::{is_eof, read_binary_header, step_over_array, write_binary_array, write_binary_header};
//! use eclio::Parser;
//!
//! let mut buffer = Vec::new();
//! write_binary_header(&mut buffer, "SWAT    ", 2, "REAL")?;
//! write_binary_array(&mut buffer, &[0.2_f32, 0.3])?;
//!
//! let mut parser = Parser::new(&buffer);
//! let mut names = Vec::new();
//! while !is_eof(&parser) {
//!     let header = read_binary_header(&mut parser)?;
//!     step_over_array(&mut parser, header.count, &header.type_tag)?;
//!     names.push(header.name);
//! }
//! assert_eq!(names, ["SWAT    "]);
//! # Ok::<(), eclio::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Every failure aborts the current call;
//! nothing is skipped or repaired silently:
//!
//! ```rust,no_run
//! use eclio::{EclFile, Error};
//!
//! match EclFile::open("CASE.UNRST") {
//!     Ok(file) => println!("{} arrays", file.len()),
//!     Err(Error::Framing { message, .. }) => println!("Corrupt record: {}", message),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```
//!
//! ## Logging
//!
//! `eclio` emits [`tracing`](https://docs.rs/tracing) events: `debug` when arrays are indexed,
//! loaded or written, and `trace` per binary chunk. No subscriber is installed by the library.
//!
//! ## Development and Testing
//!
//! ### Fuzzing
//!
//! ```bash
//! cargo +nightly fuzz run eclfile
//! ```

#[macro_use]
pub(crate) mod error;

pub mod codec;
mod config;
mod eclfile;
pub mod file;
mod output;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use eclio::prelude::*;
///
/// let file = EclFile::open("CASE.EGRID")?;
/// println!("{} arrays", file.len());
/// # Ok::<(), eclio::Error>(())
/// ```
pub mod prelude;

/// `eclio` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `eclio` Error type
///
/// Every fallible operation in the crate returns this type.
pub use error::Error;

pub use codec::{ArrayHeader, ArrayType, EclArray, EclElement};
pub use config::ValidationConfig;
pub use eclfile::{EclEntry, EclFile};
pub use file::{parser::Parser, File};
pub use output::EclOutput;
