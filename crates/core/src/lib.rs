//! Core utilities for Southern Spoon
//!
//! This crate provides shared functionality used across the workspace:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML configuration discovery and loading
//! - **Validation**: Fluent field validation for loosely-typed records
//!
//! # Example
//!
//! ```rust
//! use spoon_core::{Error, ErrorCode};
//!
//! let err = Error::invalid_coordinate(95.0, 10.0).with_context("Manual location entry");
//! assert_eq!(err.code, ErrorCode::InvalidCoordinate);
//! assert!(err.to_string().starts_with("[E4002]"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
#[allow(missing_docs)]
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{ValidationResult, Validator};
}
