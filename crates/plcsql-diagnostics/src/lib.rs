//! PL/CSQL runtime diagnostics
//!
//! This crate provides the error handling infrastructure shared by the
//! runtime crates: the flat error taxonomy with stable codes, reportable
//! diagnostics, and the code range markers used to map a failure in
//! generated code back to a line and column of the procedure source.

mod error;
mod error_code;
mod marker;

pub use error::*;
pub use error_code::*;
pub use marker::*;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
