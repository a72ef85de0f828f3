//! Field type definitions for the model registry

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Field types known to the registry
///
/// Only a handful of types change how the compiler coerces operands; any other
/// registry type is carried through as `Other` so loading never fails on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Free text
    String,
    /// Any numeric value
    Number,
    /// Calendar date
    Date,
    /// Date with time of day
    Datetime,
    /// Boolean flag
    Boolean,
    /// Reference to another model (see `Field::relation`)
    Relation,
    /// Any other registry type, kept by its lowercase name
    Other(String),
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::String
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Number => write!(f, "number"),
            FieldType::Date => write!(f, "date"),
            FieldType::Datetime => write!(f, "datetime"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Relation => write!(f, "relation"),
            FieldType::Other(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Ok(match lower.as_str() {
            "string" => FieldType::String,
            "number" => FieldType::Number,
            "date" => FieldType::Date,
            "datetime" => FieldType::Datetime,
            "boolean" => FieldType::Boolean,
            "relation" => FieldType::Relation,
            _ => FieldType::Other(lower),
        })
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FieldType::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl FieldType {
    /// Check if this is a temporal type (date or datetime)
    pub fn is_temporal(&self) -> bool {
        matches!(self, FieldType::Date | FieldType::Datetime)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Number)
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, FieldType::Relation)
    }
}
