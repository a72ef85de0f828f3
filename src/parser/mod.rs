//! Input parser (verb module)
//!
//! Loads model registries from YAML and step lists from YAML or JSON.

use std::path::Path;
use crate::error::ParseError;
use crate::schema::Schema;
use crate::step::CalculationStep;

/// Parse a schema from a YAML file
pub fn parse_schema_file<P: AsRef<Path>>(path: P) -> Result<Schema, ParseError> {
    let contents = read_file(path.as_ref())?;
    parse_schema_str(&contents)
}

/// Parse a schema from a YAML string
pub fn parse_schema_str(yaml: &str) -> Result<Schema, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

/// Parse a step list from a YAML file
pub fn parse_steps_file<P: AsRef<Path>>(path: P) -> Result<Vec<CalculationStep>, ParseError> {
    let contents = read_file(path.as_ref())?;
    parse_steps_str(&contents)
}

/// Parse a step list from a YAML string
pub fn parse_steps_str(yaml: &str) -> Result<Vec<CalculationStep>, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

/// Parse a step list in the JSON form the UI sends
pub fn parse_steps_json(json: &str) -> Result<Vec<CalculationStep>, ParseError> {
    serde_json::from_str(json).map_err(ParseError::from)
}

fn read_file(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.display().to_string(),
        source: e,
    })
}
