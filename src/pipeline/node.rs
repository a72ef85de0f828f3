//! Pipeline and result types

use super::expr::Expr;

/// Instructs the executor to resolve one relation hop under an alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupDescriptor {
    /// Model that owns the relation field
    pub from_model: String,
    /// Relation field name on `from_model`
    pub local_field: String,
    /// Model the relation points at
    pub foreign_model: String,
    /// Output alias, derived from the path prefix up to this hop
    pub alias: String,
    pub is_multiple: bool,
    /// Alias of the previous hop whose output holds `local_field` (None at the root)
    pub parent_as: Option<String>,
}

impl LookupDescriptor {
    /// Path of the local field as the executor sees it after earlier lookups ran
    pub fn local_path(&self) -> String {
        match &self.parent_as {
            Some(parent) => format!("{}.{}", parent, self.local_field),
            None => self.local_field.clone(),
        }
    }
}

/// A named output expression produced by one step
#[derive(Debug, Clone, PartialEq)]
pub struct AddField {
    pub alias: String,
    pub expr: Expr,
}

/// Lookups plus output expressions, in step order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AbstractPipeline {
    /// Deduplicated by alias, in first-registration order
    pub lookups: Vec<LookupDescriptor>,
    /// One entry per step, in step order
    pub add_fields: Vec<AddField>,
}

impl AbstractPipeline {
    /// The expression currently bound to `alias` (the last step that produced it)
    pub fn get(&self, alias: &str) -> Option<&Expr> {
        self.add_fields
            .iter()
            .rev()
            .find(|f| f.alias == alias)
            .map(|f| &f.expr)
    }

    pub fn contains_alias(&self, alias: &str) -> bool {
        self.add_fields.iter().any(|f| f.alias == alias)
    }

    pub fn get_lookup(&self, alias: &str) -> Option<&LookupDescriptor> {
        self.lookups.iter().find(|l| l.alias == alias)
    }
}

/// Outcome of one compilation pass
///
/// Three states: a compiled pipeline, "no computation configured"
/// (valid with no pipeline), or invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationResult {
    pub is_valid: bool,
    /// Alias of the last step, which holds the final value
    pub final_alias: Option<String>,
    pub pipeline: Option<AbstractPipeline>,
}

impl CompilationResult {
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            final_alias: None,
            pipeline: None,
        }
    }

    /// Nothing to compute
    pub fn empty() -> Self {
        Self {
            is_valid: true,
            final_alias: None,
            pipeline: None,
        }
    }

    pub fn compiled(final_alias: String, pipeline: AbstractPipeline) -> Self {
        Self {
            is_valid: true,
            final_alias: Some(final_alias),
            pipeline: Some(pipeline),
        }
    }

    /// Valid, but no steps to run
    pub fn is_empty(&self) -> bool {
        self.is_valid && self.pipeline.is_none()
    }

    /// Encode in the aggregation-expression vocabulary
    pub fn to_json(&self) -> serde_json::Value {
        crate::emitter::emit_result(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> AbstractPipeline {
        AbstractPipeline {
            lookups: vec![LookupDescriptor {
                from_model: "customer".to_string(),
                local_field: "address".to_string(),
                foreign_model: "address".to_string(),
                alias: "__calc_lookup_customer_address".to_string(),
                is_multiple: false,
                parent_as: Some("__calc_lookup_customer".to_string()),
            }],
            add_fields: vec![
                AddField { alias: "x".to_string(), expr: Expr::field("a") },
                AddField { alias: "x".to_string(), expr: Expr::field("b") },
            ],
        }
    }

    #[test]
    fn test_get_returns_last_binding() {
        let pipeline = pipeline();
        assert_eq!(pipeline.get("x"), Some(&Expr::field("b")));
        assert!(pipeline.get("y").is_none());
        assert!(pipeline.contains_alias("x"));
    }

    #[test]
    fn test_local_path_includes_parent() {
        let pipeline = pipeline();
        let lookup = pipeline.get_lookup("__calc_lookup_customer_address").unwrap();
        assert_eq!(lookup.local_path(), "__calc_lookup_customer.address");
    }

    #[test]
    fn test_result_states() {
        assert!(CompilationResult::empty().is_empty());
        assert!(!CompilationResult::invalid().is_empty());
        assert!(!CompilationResult::invalid().is_valid);
        let compiled = CompilationResult::compiled("x".to_string(), pipeline());
        assert!(compiled.is_valid);
        assert!(!compiled.is_empty());
    }
}
