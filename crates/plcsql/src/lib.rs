//! PL/CSQL runtime semantic core for Rust
//!
//! This crate bundles the runtime that compiled PL/CSQL stored procedures
//! call into:
//! - Exact and binary numeric values with overflow-checked arithmetic
//! - DATE, TIME, DATETIME and TIMESTAMP values and their arithmetic
//! - The type lattice that resolves operators over dynamically typed operands
//! - Three-valued logic and the Oracle-style empty-string policy
//! - The error taxonomy and source position remapping through code range markers
//! - Cursors over an opaque query capability
//!
//! # Example
//!
//! ```ignore
//! use plcsql::{MarkerList, SessionConfig, SharedConfig, StackFrame, Value, report_failure};
//!
//! let session = SharedConfig::new(SessionConfig::default());
//! let rt = session.runtime()?;
//!
//! let markers = MarkerList::parse(" (3,2,5 )8")?;
//! if let Err(err) = rt.divide(&Value::Int(1), &Value::Int(0)) {
//!     let frames = [StackFrame::new("Proc.gen", 4)];
//!     let diagnostic = report_failure(&err, &markers, &frames, "Proc.gen");
//!     println!("{diagnostic}");
//! }
//! ```

// Re-export all public APIs from internal crates
pub use plcsql_diagnostics as diagnostics;
pub use plcsql_eval as eval;
pub use plcsql_types as types;

// Convenience re-exports
pub use plcsql_diagnostics::{Diagnostic, MarkerList, Result, RuntimeError, SourcePosition, StackFrame};
pub use plcsql_eval::{Connection, Cursor, EvalResult, Runtime, SessionConfig, SharedConfig, SysParam};
pub use plcsql_types::{Date, Datetime, Numeric, RuntimeType, Time, Timestamp, Value};

/// Everything generated procedure code needs in scope
pub mod prelude {
    pub use plcsql_diagnostics::{MarkerList, RuntimeError, SourcePosition, StackFrame};
    pub use plcsql_eval::checks::{
        check_double, check_float, check_for_loop_iter_step, check_not_null, check_precision, check_str_length,
    };
    pub use plcsql_eval::{
        CompareOp, Connection, Cursor, EvalResult, Runtime, SessionConfig, SharedConfig, invoke_builtin_func,
        select_into_one,
    };
    pub use plcsql_types::{Date, Datetime, Numeric, RuntimeType, Time, Timestamp, Value};

    pub use crate::report_failure;
}

/// Turn a failure raised by generated code into a located diagnostic
///
/// `frames` is the stack trace captured with the failure and `file_name`
/// the generated file whose markers are `markers`.
pub fn report_failure(err: &RuntimeError, markers: &MarkerList, frames: &[StackFrame], file_name: &str) -> Diagnostic {
    let position = markers.resolve(frames, file_name);
    err.to_diagnostic().with_position(position)
}
