//! PL/CSQL Runtime Operators
//!
//! This crate provides the operator semantics that compiled PL/CSQL
//! procedures call into at run time:
//!
//! - **Arithmetic Operators**: +, -, *, /, DIV, MOD and negation with
//!   overflow detection for every integer width
//! - **Comparison Operators**: =, <>, <=>, <, <=, >, >=, BETWEEN, IN
//! - **Logical Operators**: NOT, AND, OR, XOR, IS NULL
//! - **String Operators**: || and LIKE with an escape character
//! - **Bitwise Operators**: ~, &, |, ^, <<, >>
//! - **Date/Time Arithmetic**: day, second and millisecond offsets, and
//!   differences between DATE, TIME, DATETIME and TIMESTAMP values
//! - **Conversions**: the `conv_<src>_to_<dst>` matrix and value coercion
//! - **Checks**: declared length, precision and FOR loop step checks
//! - **Cursors**: the cursor state machine over an opaque query capability
//!
//! # Example
//!
//! ```ignore
//! use plcsql_eval::{Runtime, SessionConfig};
//! use plcsql_types::Value;
//!
//! let rt = Runtime::new(SessionConfig::default())?;
//! let sum = rt.add(&Value::Int(1), &Value::from("2.5"))?;
//! assert_eq!(sum, Value::Double(3.5));
//! ```
//!
//! # Architecture
//!
//! - `Runtime`: operator evaluation under a snapshot of the session flags
//! - `SessionConfig` / `SharedConfig`: the system parameters that change
//!   operator behavior (empty-string handling, number compatibility)
//! - `lattice`: the promotion rules that pick a common operand type when
//!   operand types are only known at run time
//! - `operators`: typed operators over `Option<T>` plus their dynamic
//!   counterparts over `Value`
//! - `cursor`: cursors, `SELECT ... INTO` and built-in function calls
//!
//! # NULL and the Empty String
//!
//! Typed operators take `None` for NULL and return NULL when any operand is
//! NULL. `AND` and `OR` follow three-valued logic: FALSE dominates `AND`
//! and TRUE dominates `OR`. When `oracle_style_empty_string` is on, the
//! empty string behaves as NULL for every operator, except that `||`
//! treats a NULL operand as the empty string.

pub mod checks;
pub mod context;
pub mod conversion;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod lattice;
pub mod operators;

// Re-export main types
pub use context::{SessionConfig, SharedConfig, SysParam};
pub use cursor::{
    Connection, Cursor, Rowset, SqlFailure, Statement, builtin_query, invoke_builtin_func, select_into_one,
};
pub use engine::Runtime;
pub use error::{ArithOp, ConfigError, EvalResult};
pub use operators::CompareOp;
