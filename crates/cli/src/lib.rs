//! CLI utilities for Southern Spoon
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Event list rendering
//! - Error reports with recovery suggestions

#![warn(missing_docs)]

pub mod output;
