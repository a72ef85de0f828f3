use std::fmt;

/// Errors that can occur during field path resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    EmptyPath,
    ModelNotFound(String),
    FieldNotFound { model: String, field: String },
    /// An intermediate segment is not a relation field
    NotARelation { model: String, field: String },
    /// A relation field without a target model
    MissingRelationTarget { model: String, field: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::EmptyPath => write!(f, "Field path is empty"),
            ResolveError::ModelNotFound(name) => write!(f, "Model '{}' not found", name),
            ResolveError::FieldNotFound { model, field } => {
                write!(f, "Field '{}' not found on model '{}'", field, model)
            }
            ResolveError::NotARelation { model, field } => {
                write!(f, "Field '{}' on model '{}' is not a relation", field, model)
            }
            ResolveError::MissingRelationTarget { model, field } => {
                write!(f, "Relation '{}' on model '{}' has no target model", field, model)
            }
        }
    }
}

impl std::error::Error for ResolveError {}
