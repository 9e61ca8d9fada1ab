//! Runtime value representation

use crate::{Date, Datetime, Numeric, Time, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime type tag of a non-NULL value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuntimeType {
    Boolean,
    String,
    Short,
    Int,
    Bigint,
    Numeric,
    Float,
    Double,
    Date,
    Time,
    Datetime,
    Timestamp,
}

impl RuntimeType {
    /// Type name as shown in error messages
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Short => "SHORT",
            Self::Int => "INT",
            Self::Bigint => "BIGINT",
            Self::Numeric => "NUMERIC",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Datetime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
        }
    }

    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Short | Self::Int | Self::Bigint)
    }

    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Short | Self::Int | Self::Bigint | Self::Numeric | Self::Float | Self::Double
        )
    }

    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Datetime | Self::Timestamp)
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A runtime value
///
/// `Null` stands for the absent value of any type.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    String(String),
    Short(i16),
    Int(i32),
    Bigint(i64),
    Numeric(Numeric),
    Float(f32),
    Double(f64),
    Date(Date),
    Time(Time),
    Datetime(Datetime),
    Timestamp(Timestamp),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Runtime type; `None` for NULL
    pub fn runtime_type(&self) -> Option<RuntimeType> {
        Some(match self {
            Value::Null => return None,
            Value::Boolean(_) => RuntimeType::Boolean,
            Value::String(_) => RuntimeType::String,
            Value::Short(_) => RuntimeType::Short,
            Value::Int(_) => RuntimeType::Int,
            Value::Bigint(_) => RuntimeType::Bigint,
            Value::Numeric(_) => RuntimeType::Numeric,
            Value::Float(_) => RuntimeType::Float,
            Value::Double(_) => RuntimeType::Double,
            Value::Date(_) => RuntimeType::Date,
            Value::Time(_) => RuntimeType::Time,
            Value::Datetime(_) => RuntimeType::Datetime,
            Value::Timestamp(_) => RuntimeType::Timestamp,
        })
    }

    /// Type name for error messages; "NULL" for NULL
    pub fn type_name(&self) -> &'static str {
        self.runtime_type().map_or("NULL", |t| t.name())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Short(v) => Some(i64::from(*v)),
            Value::Int(v) => Some(i64::from(*v)),
            Value::Bigint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<&Numeric> {
        match self {
            Value::Numeric(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Value::String(s) => write!(f, "{s}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Bigint(v) => write!(f, "{v}"),
            Value::Numeric(n) => write!(f, "{n}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::Time(t) => write!(f, "{t}"),
            Value::Datetime(dt) => write!(f, "{dt}"),
            Value::Timestamp(ts) => write!(f, "{ts}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Bigint(v)
    }
}

impl From<Numeric> for Value {
    fn from(v: Numeric) -> Self {
        Value::Numeric(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<Date> for Value {
    fn from(v: Date) -> Self {
        Value::Date(v)
    }
}

impl From<Time> for Value {
    fn from(v: Time) -> Self {
        Value::Time(v)
    }
}

impl From<Datetime> for Value {
    fn from(v: Datetime) -> Self {
        Value::Datetime(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
