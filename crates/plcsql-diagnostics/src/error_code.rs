//! Runtime error codes
//!
//! Code ranges:
//! - 0-9: builtin exceptions raised by the runtime
//! - 1000: user defined exceptions declared without a code
//! - 1001 and above: application errors raised with an explicit code

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> i32 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&APP_ERROR_INFO)
    }

    /// Check if this is one of the builtin exceptions (0-9)
    pub const fn is_builtin(&self) -> bool {
        self.0 >= 0 && self.0 < 10
    }

    /// Check if this is a user defined or application error (1000 and above)
    pub const fn is_application(&self) -> bool {
        self.0 >= APP_ERROR.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Exception name as seen by procedure authors
    pub name: &'static str,
    /// Message used when none is supplied
    pub default_message: &'static str,
}

impl ErrorInfo {
    const fn new(name: &'static str, default_message: &'static str) -> Self {
        Self { name, default_message }
    }
}

static APP_ERROR_INFO: ErrorInfo = ErrorInfo::new("APP_ERROR", "user defined exception");

static ERROR_INFO: LazyLock<HashMap<i32, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert(0, ErrorInfo::new("CASE_NOT_FOUND", "case not found"));
    map.insert(1, ErrorInfo::new("CURSOR_ALREADY_OPEN", "cursor already open"));
    map.insert(2, ErrorInfo::new("INVALID_CURSOR", "invalid cursor"));
    map.insert(3, ErrorInfo::new("NO_DATA_FOUND", "no data found"));
    map.insert(4, ErrorInfo::new("PROGRAM_ERROR", "internal server error"));
    map.insert(5, ErrorInfo::new("STORAGE_ERROR", "storage error"));
    map.insert(6, ErrorInfo::new("SQL_ERROR", "SQL error"));
    map.insert(7, ErrorInfo::new("TOO_MANY_ROWS", "too many rows"));
    map.insert(8, ErrorInfo::new("VALUE_ERROR", "value error"));
    map.insert(9, ErrorInfo::new("ZERO_DIVIDE", "division by zero"));

    map
});

pub const CASE_NOT_FOUND: ErrorCode = ErrorCode::new(0);
pub const CURSOR_ALREADY_OPEN: ErrorCode = ErrorCode::new(1);
pub const INVALID_CURSOR: ErrorCode = ErrorCode::new(2);
pub const NO_DATA_FOUND: ErrorCode = ErrorCode::new(3);
pub const PROGRAM_ERROR: ErrorCode = ErrorCode::new(4);
pub const STORAGE_ERROR: ErrorCode = ErrorCode::new(5);
pub const SQL_ERROR: ErrorCode = ErrorCode::new(6);
pub const TOO_MANY_ROWS: ErrorCode = ErrorCode::new(7);
pub const VALUE_ERROR: ErrorCode = ErrorCode::new(8);
pub const ZERO_DIVIDE: ErrorCode = ErrorCode::new(9);
pub const APP_ERROR: ErrorCode = ErrorCode::new(1000);
