//! Runtime error types

use crate::error_code::{
    APP_ERROR, CASE_NOT_FOUND, CURSOR_ALREADY_OPEN, ErrorCode, INVALID_CURSOR, NO_DATA_FOUND,
    PROGRAM_ERROR, SQL_ERROR, STORAGE_ERROR, TOO_MANY_ROWS, VALUE_ERROR, ZERO_DIVIDE,
};
use crate::SourcePosition;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Fatal - the caller produced a state the runtime considers unreachable
    Fatal,
    /// Error - an ordinary runtime error a procedure may catch
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "fatal"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A runtime error with its resolved source position, ready to report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Exception name
    pub name: String,
    /// Human-readable message
    pub message: String,
    /// Position in the procedure source
    pub position: Option<SourcePosition>,
}

impl Diagnostic {
    /// Set the source position
    pub fn with_position(mut self, position: SourcePosition) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({}) - {}", self.severity, self.name, self.code, self.message)?;
        if let Some(pos) = self.position.filter(|p| !p.is_unknown()) {
            write!(f, " at {}", pos)?;
        }
        Ok(())
    }
}

/// Runtime error raised by operators, conversions and cursors
///
/// The taxonomy is flat: each builtin exception is one variant, and
/// application errors carry their own code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// CASE statement without a matching branch
    #[error("{message}")]
    CaseNotFound { message: String },

    /// OPEN on a cursor that is already open
    #[error("{message}")]
    CursorAlreadyOpen { message: String },

    /// Operation on a cursor that is not open
    #[error("{message}")]
    InvalidCursor { message: String },

    /// SELECT INTO returned no rows
    #[error("{message}")]
    NoDataFound { message: String },

    /// Internal error; indicates a bug in generated code
    #[error("{message}")]
    ProgramError { message: String },

    /// Storage error
    #[error("{message}")]
    StorageError { message: String },

    /// Failure reported by the SQL layer
    #[error("{message}")]
    SqlError { message: String },

    /// SELECT INTO returned more than one row
    #[error("{message}")]
    TooManyRows { message: String },

    /// Overflow, range, conversion and type errors
    #[error("{message}")]
    ValueError { message: String },

    /// Division or modulo by zero
    #[error("{message}")]
    ZeroDivide { message: String },

    /// User defined or application error
    #[error("{message}")]
    App { code: ErrorCode, message: String },
}

fn message_or_default(message: impl Into<String>, code: ErrorCode) -> String {
    let message = message.into();
    if message.is_empty() {
        code.info().default_message.to_string()
    } else {
        message
    }
}

impl RuntimeError {
    /// Create a CASE_NOT_FOUND error
    pub fn case_not_found() -> Self {
        Self::CaseNotFound { message: message_or_default("", CASE_NOT_FOUND) }
    }

    /// Create a CURSOR_ALREADY_OPEN error
    pub fn cursor_already_open() -> Self {
        Self::CursorAlreadyOpen { message: message_or_default("", CURSOR_ALREADY_OPEN) }
    }

    /// Create an INVALID_CURSOR error
    pub fn invalid_cursor(message: impl Into<String>) -> Self {
        Self::InvalidCursor { message: message_or_default(message, INVALID_CURSOR) }
    }

    /// Create a NO_DATA_FOUND error
    pub fn no_data_found() -> Self {
        Self::NoDataFound { message: message_or_default("", NO_DATA_FOUND) }
    }

    /// Create a PROGRAM_ERROR
    pub fn program_error(message: impl Into<String>) -> Self {
        let message = message_or_default(message, PROGRAM_ERROR);
        log::error!("PROGRAM_ERROR: {message}");
        Self::ProgramError { message }
    }

    /// Create a STORAGE_ERROR
    pub fn storage_error(message: impl Into<String>) -> Self {
        Self::StorageError { message: message_or_default(message, STORAGE_ERROR) }
    }

    /// Create a SQL_ERROR
    pub fn sql_error(message: impl Into<String>) -> Self {
        Self::SqlError { message: message_or_default(message, SQL_ERROR) }
    }

    /// Create a TOO_MANY_ROWS error
    pub fn too_many_rows() -> Self {
        Self::TooManyRows { message: message_or_default("", TOO_MANY_ROWS) }
    }

    /// Create a VALUE_ERROR
    pub fn value_error(message: impl Into<String>) -> Self {
        Self::ValueError { message: message_or_default(message, VALUE_ERROR) }
    }

    /// Create a ZERO_DIVIDE error
    pub fn zero_divide() -> Self {
        Self::ZeroDivide { message: message_or_default("", ZERO_DIVIDE) }
    }

    /// Create the error raised for a user defined exception
    pub fn user_defined() -> Self {
        Self::App { code: APP_ERROR, message: message_or_default("", APP_ERROR) }
    }

    /// Create an application error for `raise_application_error`
    ///
    /// Codes up to and including 1000 are reserved for the runtime.
    pub fn application(code: i32, message: impl Into<String>) -> Result<Self, RuntimeError> {
        if code <= APP_ERROR.code() {
            return Err(Self::value_error(format!(
                "exception codes below {} are reserved",
                APP_ERROR.code() + 1
            )));
        }
        Ok(Self::App { code: ErrorCode::new(code), message: message_or_default(message, APP_ERROR) })
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::CaseNotFound { .. } => CASE_NOT_FOUND,
            Self::CursorAlreadyOpen { .. } => CURSOR_ALREADY_OPEN,
            Self::InvalidCursor { .. } => INVALID_CURSOR,
            Self::NoDataFound { .. } => NO_DATA_FOUND,
            Self::ProgramError { .. } => PROGRAM_ERROR,
            Self::StorageError { .. } => STORAGE_ERROR,
            Self::SqlError { .. } => SQL_ERROR,
            Self::TooManyRows { .. } => TOO_MANY_ROWS,
            Self::ValueError { .. } => VALUE_ERROR,
            Self::ZeroDivide { .. } => ZERO_DIVIDE,
            Self::App { code, .. } => *code,
        }
    }

    /// Get the message
    pub fn message(&self) -> &str {
        match self {
            Self::CaseNotFound { message }
            | Self::CursorAlreadyOpen { message }
            | Self::InvalidCursor { message }
            | Self::NoDataFound { message }
            | Self::ProgramError { message }
            | Self::StorageError { message }
            | Self::SqlError { message }
            | Self::TooManyRows { message }
            | Self::ValueError { message }
            | Self::ZeroDivide { message }
            | Self::App { message, .. } => message,
        }
    }

    /// Get the exception name
    pub fn name(&self) -> &'static str {
        self.code().info().name
    }

    /// Severity for reporting
    pub fn severity(&self) -> Severity {
        match self {
            Self::ProgramError { .. } => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: self.severity(),
            code: self.code(),
            name: self.name().to_string(),
            message: self.message().to_string(),
            position: None,
        }
    }
}
