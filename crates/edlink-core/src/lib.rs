//! # edlink-core - Core Domain Types
//!
//! Foundation crate for edlink. Provides URI decoding, the decoded target type,
//! error handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (thiserror, tracing, url, percent-encoding, dirs).
//!
//! ## Public API
//!
//! ### URI Decoding (`uri`)
//! - [`parse_uri()`] - Decode an `editor:` URI into a path and optional line
//! - [`PROTOCOL_NAME`] - The URI scheme edlink is registered for
//!
//! ### Domain Types (`target`)
//! - [`DecodedTarget`] - File path plus optional line number
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use edlink_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod prelude;
pub mod target;
pub mod uri;

pub use error::{Error, Result, ResultExt};
pub use target::DecodedTarget;
pub use uri::{parse_uri, split_line_suffix, PROTOCOL_NAME};
