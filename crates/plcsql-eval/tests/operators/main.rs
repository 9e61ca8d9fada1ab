//! Operator integration tests for the PL/CSQL runtime
//!
//! These tests verify operator behavior including:
//! - Overflow detection at every integer width
//! - Exact decimal scale and precision rules
//! - Promotion of mixed operand types
//! - NULL propagation and three-valued logic
//! - The empty-string policy
//! - Temporal offset arithmetic and value conversions

mod comparison;
mod conversion;
mod logical;
mod string;

use plcsql_eval::{Runtime, SessionConfig};

pub fn runtime() -> Runtime {
    Runtime::default()
}

/// Runtime with the empty string standing for NULL
pub fn oracle_runtime() -> Runtime {
    Runtime::new(SessionConfig::default().with_oracle_style_empty_string(true)).unwrap()
}

/// Runtime with Oracle-compatible number behavior
pub fn compat_runtime() -> Runtime {
    Runtime::new(SessionConfig::default().with_oracle_compat_number_behavior(true)).unwrap()
}
