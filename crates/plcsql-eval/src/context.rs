//! Session configuration for operator evaluation
//!
//! Flags are read once per statement: the session layer keeps a
//! `SharedConfig` it may update at any time, and every statement evaluates
//! against a `Runtime` built from a snapshot of it.

use crate::engine::Runtime;
use crate::error::ConfigError;
use chrono::{FixedOffset, Offset, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Named system parameters read by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SysParam {
    OracleStyleEmptyString,
    OracleCompatNumberBehavior,
    CompatNumericDivisionScale,
}

impl SysParam {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OracleStyleEmptyString => "ORACLE_STYLE_EMPTY_STRING",
            Self::OracleCompatNumberBehavior => "ORACLE_COMPAT_NUMBER_BEHAVIOR",
            Self::CompatNumericDivisionScale => "COMPAT_NUMERIC_DIVISION_SCALE",
        }
    }
}

impl FromStr for SysParam {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ORACLE_STYLE_EMPTY_STRING" => Ok(Self::OracleStyleEmptyString),
            "ORACLE_COMPAT_NUMBER_BEHAVIOR" => Ok(Self::OracleCompatNumberBehavior),
            "COMPAT_NUMERIC_DIVISION_SCALE" => Ok(Self::CompatNumericDivisionScale),
            _ => Err(ConfigError::UnknownParameter { name: s.to_string() }),
        }
    }
}

fn default_time_zone() -> String {
    "+00:00".to_string()
}

/// Session flags that change operator semantics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Treat the empty string as NULL
    pub oracle_style_empty_string: bool,
    /// Integer division yields NUMERIC; numbers print without trailing zeros
    pub oracle_compat_number_behavior: bool,
    /// NUMERIC division keeps the operands' scale instead of at least 9 digits
    pub compat_numeric_division_scale: bool,
    /// Session time zone as a UTC offset, e.g. "+09:00"
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            oracle_style_empty_string: false,
            oracle_compat_number_behavior: false,
            compat_numeric_division_scale: false,
            time_zone: default_time_zone(),
        }
    }
}

impl SessionConfig {
    /// Load from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.parsed_time_zone()?;
        Ok(config)
    }

    pub fn get(&self, param: SysParam) -> bool {
        match param {
            SysParam::OracleStyleEmptyString => self.oracle_style_empty_string,
            SysParam::OracleCompatNumberBehavior => self.oracle_compat_number_behavior,
            SysParam::CompatNumericDivisionScale => self.compat_numeric_division_scale,
        }
    }

    pub fn set(&mut self, param: SysParam, value: bool) {
        match param {
            SysParam::OracleStyleEmptyString => self.oracle_style_empty_string = value,
            SysParam::OracleCompatNumberBehavior => self.oracle_compat_number_behavior = value,
            SysParam::CompatNumericDivisionScale => self.compat_numeric_division_scale = value,
        }
    }

    /// Set the empty-string flag
    pub fn with_oracle_style_empty_string(mut self, value: bool) -> Self {
        self.oracle_style_empty_string = value;
        self
    }

    /// Set the number-compatibility flag
    pub fn with_oracle_compat_number_behavior(mut self, value: bool) -> Self {
        self.oracle_compat_number_behavior = value;
        self
    }

    /// Set the division-scale flag
    pub fn with_compat_numeric_division_scale(mut self, value: bool) -> Self {
        self.compat_numeric_division_scale = value;
        self
    }

    /// Set the time zone
    pub fn with_time_zone(mut self, tz: impl Into<String>) -> Self {
        self.time_zone = tz.into();
        self
    }

    /// Parse the time zone setting
    pub fn parsed_time_zone(&self) -> Result<FixedOffset, ConfigError> {
        let value = self.time_zone.trim();
        if value.eq_ignore_ascii_case("UTC") || value == "Z" {
            return Ok(Utc.fix());
        }
        value.parse().map_err(|_| ConfigError::TimeZone { value: self.time_zone.clone() })
    }
}

/// Session configuration shared with the session layer
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<SessionConfig>>,
}

impl SharedConfig {
    pub fn new(config: SessionConfig) -> Self {
        Self { inner: Arc::new(RwLock::new(config)) }
    }

    /// Copy of the current configuration
    pub fn snapshot(&self) -> SessionConfig {
        self.inner.read().clone()
    }

    /// Change the configuration
    pub fn update(&self, f: impl FnOnce(&mut SessionConfig)) {
        let mut guard = self.inner.write();
        f(&mut *guard);
        log::debug!("session configuration updated: {:?}", *guard);
    }

    pub fn set(&self, param: SysParam, value: bool) {
        self.update(|config| config.set(param, value));
    }

    /// Runtime for one statement, reading the flags in effect now
    pub fn runtime(&self) -> Result<Runtime, ConfigError> {
        Runtime::new(self.snapshot())
    }
}
