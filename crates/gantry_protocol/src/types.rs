//! Canonical scalar types for exported warehouse columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing a data type name fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid data type: '{0}'. Expected: string, int64, float64, or timestamp")]
pub struct ParseDataTypeError(pub String);

/// Canonical scalar type enum - the SINGLE SOURCE OF TRUTH for column types.
///
/// Every value Gantry exports is one of these four scalars. Destination
/// warehouses map them onto their own type systems on the sink side; the
/// schema layer only ever reasons about this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// UTF-8 string (default/fallback)
    #[default]
    String,

    /// 64-bit signed integer
    Int64,

    /// 64-bit floating point
    Float64,

    /// Timestamp (RFC 3339 or naive `YYYY-MM-DD HH:MM:SS`)
    Timestamp,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::Timestamp => "timestamp",
        }
    }

    /// Returns all scalar data types.
    pub fn all() -> Vec<DataType> {
        vec![
            DataType::String,
            DataType::Int64,
            DataType::Float64,
            DataType::Timestamp,
        ]
    }

    /// Returns true if this type is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }

    /// Check if a string value can be parsed as this type
    pub fn validate_string(&self, value: &str) -> bool {
        if value.is_empty() {
            return true; // Empty handled by nullable check
        }

        match self {
            DataType::String => true,
            DataType::Int64 => value.parse::<i64>().is_ok(),
            DataType::Float64 => value.parse::<f64>().is_ok(),
            DataType::Timestamp => {
                chrono::DateTime::parse_from_rfc3339(value).is_ok()
                    || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok()
            }
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ParseDataTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(DataType::String),
            "int64" => Ok(DataType::Int64),
            "float64" => Ok(DataType::Float64),
            "timestamp" => Ok(DataType::Timestamp),
            _ => Err(ParseDataTypeError(s.to_string())),
        }
    }
}
