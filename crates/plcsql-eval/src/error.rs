//! Evaluation errors for the runtime operators

use plcsql_diagnostics::RuntimeError;
use plcsql_types::{RuntimeType, Value};
use thiserror::Error;

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Errors raised while loading session configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed configuration document
    #[error("Invalid session configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Time zone that is not a UTC offset
    #[error("Invalid time zone '{value}': expected an offset such as +09:00")]
    TimeZone { value: String },

    /// Unknown system parameter name
    #[error("Unknown system parameter: {name}")]
    UnknownParameter { name: String },
}

/// Binary arithmetic operation, used to name it in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    DivInt,
    Modulo,
}

impl ArithOp {
    /// Noun used in overflow messages
    pub const fn noun(&self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Subtract => "subtraction",
            Self::Multiply => "multiplication",
            Self::Divide | Self::DivInt => "division",
            Self::Modulo => "modulo operation",
        }
    }

    /// Verb used in incompatible-type messages
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::DivInt => "integer-divide",
            Self::Modulo => "compute modulo of",
        }
    }
}

/// Type name used in integer overflow messages
pub(crate) const fn integer_name(ty: RuntimeType) -> &'static str {
    match ty {
        RuntimeType::Short => "SHORT",
        RuntimeType::Int => "INTEGER",
        _ => "BIGINT",
    }
}

/// "data overflow in addition of INTEGER values"
pub(crate) fn integer_overflow(op: ArithOp, ty: RuntimeType) -> RuntimeError {
    RuntimeError::value_error(format!("data overflow in {} of {} values", op.noun(), integer_name(ty)))
}

/// "data overflow in negation of an INTEGER value"
pub(crate) fn negation_overflow(ty: RuntimeType) -> RuntimeError {
    let article = if ty == RuntimeType::Int { "an" } else { "a" };
    RuntimeError::value_error(format!("data overflow in negation of {article} {} value", integer_name(ty)))
}

/// "data overflow in addition of two DOUBLE values"
pub(crate) fn float_overflow(op: ArithOp, ty: RuntimeType) -> RuntimeError {
    RuntimeError::value_error(format!("data overflow in {} of two {} values", op.noun(), ty.name()))
}

/// "cannot add two arguments due to their incompatible run-time types (DATE, DATE)"
pub(crate) fn incompatible_binary(op: ArithOp, l: &Value, r: &Value) -> RuntimeError {
    RuntimeError::value_error(format!(
        "cannot {} two arguments due to their incompatible run-time types ({}, {})",
        op.verb(),
        l.type_name(),
        r.type_name()
    ))
}

pub(crate) fn incompatible_unary(verb: &str, v: &Value) -> RuntimeError {
    RuntimeError::value_error(format!(
        "cannot {verb} the argument due to its incompatible run-time type {}",
        v.type_name()
    ))
}

pub(crate) fn incomparable() -> RuntimeError {
    RuntimeError::value_error("incomparable types")
}

pub(crate) fn not_compatible(target: &str) -> RuntimeError {
    RuntimeError::value_error(format!("not compatible with {target}"))
}
