//! PL/CSQL runtime
//!
//! This module provides the `Runtime` struct. Operator, conversion and check
//! implementations live in `impl Runtime` blocks spread across the
//! `operators`, `conversion` and `checks` modules.

use crate::context::SessionConfig;
use crate::error::ConfigError;
use chrono::{FixedOffset, Offset, Utc};
use plcsql_diagnostics::RuntimeError;
use plcsql_types::Value;

static NULL: Value = Value::Null;

/// Operator evaluation under one fixed set of session flags
///
/// A `Runtime` is cheap to build and is meant to live for one statement.
#[derive(Debug, Clone)]
pub struct Runtime {
    config: SessionConfig,
    time_zone: FixedOffset,
}

impl Default for Runtime {
    fn default() -> Self {
        Self {
            config: SessionConfig::default(),
            time_zone: Utc.fix(),
        }
    }
}

impl Runtime {
    /// Create a runtime for the given configuration
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let time_zone = config.parsed_time_zone()?;
        Ok(Self { config, time_zone })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Session time zone
    pub fn time_zone(&self) -> &FixedOffset {
        &self.time_zone
    }

    /// Whether the empty string stands for NULL
    pub fn empty_string_is_null(&self) -> bool {
        self.config.oracle_style_empty_string
    }

    pub fn oracle_compat_numbers(&self) -> bool {
        self.config.oracle_compat_number_behavior
    }

    /// Scale of a NUMERIC quotient whose operands have scales `s1` and `s2`
    pub fn division_scale(&self, s1: i64, s2: i64) -> i64 {
        if self.config.compat_numeric_division_scale {
            s1.max(s2)
        } else {
            s1.max(s2).max(9)
        }
    }

    /// Apply the empty-string policy to an operand
    pub fn effective<'a>(&self, v: &'a Value) -> &'a Value {
        match v {
            Value::String(s) if s.is_empty() && self.empty_string_is_null() => &NULL,
            _ => v,
        }
    }

    /// Apply the empty-string policy to a text operand
    pub fn effective_str<'a>(&self, s: Option<&'a str>) -> Option<&'a str> {
        s.filter(|s| !(s.is_empty() && self.empty_string_is_null()))
    }
}

/// Unwrap an operand already known to be non-NULL
pub(crate) fn non_null<T>(v: Option<T>) -> Result<T, RuntimeError> {
    v.ok_or_else(|| RuntimeError::program_error("unexpected NULL operand"))
}
