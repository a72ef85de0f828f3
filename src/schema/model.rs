//! Root registry definition

use serde::{Deserialize, Serialize};
use super::types::FieldType;

/// The model registry the compiler resolves field paths against
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Schema {
    pub models: Vec<Model>,
}

/// A named model with typed fields
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Model {
    pub name: String,
    /// Display name for pickers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A field on a model
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Target model name (relation fields only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    /// Relation holds many references instead of one
    #[serde(default)]
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Schema {
    pub fn new(models: Vec<Model>) -> Self {
        Self { models }
    }

    /// Get a model by name
    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Names of all registered models, in registry order
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }
}

impl Model {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            label: None,
            fields,
        }
    }

    /// Get a field by name
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Label for display, falling back to the model name
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            relation: None,
            multiple: false,
            label: None,
        }
    }

    /// Create a relation field pointing at `target`
    pub fn relation(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Relation,
            relation: Some(target.into()),
            multiple: false,
            label: None,
        }
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Target model of a relation field, if it has one
    pub fn relation_target(&self) -> Option<&str> {
        if self.field_type.is_relation() {
            self.relation.as_deref().filter(|t| !t.is_empty())
        } else {
            None
        }
    }

    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}
