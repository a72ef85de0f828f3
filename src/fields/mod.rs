//! Field enumeration for operand pickers
//!
//! Flattens the fields reachable from a root model into dotted paths. Unlike
//! path resolution, enumeration has to bound itself: relations can be circular,
//! so recursion is capped by depth and never re-enters a model already on the
//! current path.

use crate::operator::{Operator, OperatorFamily};
use crate::schema::{FieldType, Model, Schema};

/// Relation hops followed by default
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// A selectable field path
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOption {
    /// Dotted path, usable as a FIELD operand value
    pub path: String,
    /// Display labels joined along the path
    pub label: String,
    pub field_type: FieldType,
    /// Relation hops from the root model
    pub depth: usize,
}

impl FieldOption {
    /// Whether this field makes sense as an operand of `operator`
    pub fn accepts(&self, operator: Operator) -> bool {
        match operator.family() {
            OperatorFamily::Date => {
                self.field_type.is_temporal() || self.field_type == FieldType::String
            }
            OperatorFamily::Numeric => self.field_type.is_numeric(),
            OperatorFamily::Concat => !self.field_type.is_relation(),
        }
    }
}

/// Fields reachable from `root_model`, following at most `max_depth` relations
///
/// Returns an empty list for an unknown root model.
pub fn available_fields(schema: &Schema, root_model: &str, max_depth: usize) -> Vec<FieldOption> {
    let mut options = Vec::new();
    if let Some(root) = schema.get_model(root_model) {
        let mut visited = vec![root.name.as_str()];
        collect_fields(schema, root, &[], &[], 0, max_depth, &mut visited, &mut options);
    }
    options
}

/// Fields reachable from `root_model` that `operator` accepts
pub fn fields_for_operator(
    schema: &Schema,
    root_model: &str,
    operator: Operator,
    max_depth: usize,
) -> Vec<FieldOption> {
    available_fields(schema, root_model, max_depth)
        .into_iter()
        .filter(|option| option.accepts(operator))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn collect_fields<'a>(
    schema: &'a Schema,
    model: &'a Model,
    path: &[&'a str],
    labels: &[&'a str],
    depth: usize,
    max_depth: usize,
    visited: &mut Vec<&'a str>,
    out: &mut Vec<FieldOption>,
) {
    for field in &model.fields {
        let mut field_path = path.to_vec();
        field_path.push(field.name.as_str());
        let mut field_labels = labels.to_vec();
        field_labels.push(field.display_name());

        let Some(target_name) = field.relation_target() else {
            if !field.field_type.is_relation() {
                out.push(FieldOption {
                    path: field_path.join("."),
                    label: field_labels.join(" > "),
                    field_type: field.field_type.clone(),
                    depth,
                });
            }
            continue;
        };

        if depth >= max_depth || visited.contains(&target_name) {
            continue;
        }
        let Some(target) = schema.get_model(target_name) else {
            continue;
        };

        visited.push(target_name);
        collect_fields(schema, target, &field_path, &field_labels, depth + 1, max_depth, visited, out);
        visited.pop();
    }
}
