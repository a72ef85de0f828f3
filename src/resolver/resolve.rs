use crate::schema::{Model, Schema};
use super::error::ResolveError;
use super::types::{RelationHop, ResolvedPath};

/// Resolve a dotted field path starting from `start_model`
///
/// Every segment but the last must name a relation field with a target model;
/// resolution continues on that target. The last segment must exist on the
/// model reached. No depth limit applies here: a concrete path is finite, so
/// circular relations cannot loop.
///
/// # Arguments
/// * `schema` - The model registry
/// * `start_model` - Name of the model the path is relative to
/// * `path` - Dotted path, e.g. `customer.address.city`
pub fn resolve_path<'a>(
    schema: &'a Schema,
    start_model: &str,
    path: &str,
) -> Result<ResolvedPath<'a>, ResolveError> {
    if path.trim().is_empty() {
        return Err(ResolveError::EmptyPath);
    }

    let root = schema
        .get_model(start_model)
        .ok_or_else(|| ResolveError::ModelNotFound(start_model.to_string()))?;

    let segments: Vec<&str> = path.split('.').collect();
    let Some((leaf_name, relations)) = segments.split_last() else {
        return Err(ResolveError::EmptyPath);
    };

    let mut current: &'a Model = root;
    let mut chain = Vec::with_capacity(relations.len());

    for segment in relations {
        let field = current
            .get_field(segment)
            .ok_or_else(|| field_not_found(current, segment))?;

        if !field.field_type.is_relation() {
            return Err(ResolveError::NotARelation {
                model: current.name.clone(),
                field: field.name.clone(),
            });
        }

        let target_name = field.relation_target().ok_or_else(|| {
            ResolveError::MissingRelationTarget {
                model: current.name.clone(),
                field: field.name.clone(),
            }
        })?;

        let target = schema
            .get_model(target_name)
            .ok_or_else(|| ResolveError::ModelNotFound(target_name.to_string()))?;

        chain.push(RelationHop {
            model: current,
            field,
            target,
        });
        current = target;
    }

    let leaf = current
        .get_field(leaf_name)
        .ok_or_else(|| field_not_found(current, leaf_name))?;

    Ok(ResolvedPath { root, leaf, chain })
}

fn field_not_found(model: &Model, field: &str) -> ResolveError {
    ResolveError::FieldNotFound {
        model: model.name.clone(),
        field: field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldType};

    fn test_schema() -> Schema {
        Schema::new(vec![
            Model::new("order", vec![
                Field::new("amount", FieldType::Number),
                Field::new("orderDate", FieldType::Date),
                Field::relation("customer", "customer"),
                Field::relation("ghost", "nowhere"),
                Field {
                    relation: None,
                    ..Field::relation("broken", "")
                },
            ]),
            Model::new("customer", vec![
                Field::new("discountRate", FieldType::Number),
                Field::relation("address", "address"),
                Field::relation("referrer", "customer"),
            ]),
            Model::new("address", vec![Field::new("city", FieldType::String)]),
        ])
    }

    #[test]
    fn test_resolve_root_field() {
        let schema = test_schema();
        let resolved = resolve_path(&schema, "order", "amount").unwrap();

        assert_eq!(resolved.leaf.name, "amount");
        assert!(resolved.is_root());
        assert_eq!(resolved.leaf_model().name, "order");
    }

    #[test]
    fn test_resolve_single_hop() {
        let schema = test_schema();
        let resolved = resolve_path(&schema, "order", "customer.discountRate").unwrap();

        assert_eq!(resolved.leaf.name, "discountRate");
        assert_eq!(resolved.chain.len(), 1);
        assert_eq!(resolved.chain[0].model.name, "order");
        assert_eq!(resolved.chain[0].field.name, "customer");
        assert_eq!(resolved.chain[0].target.name, "customer");
        assert_eq!(resolved.path(), "customer.discountRate");
    }

    #[test]
    fn test_resolve_two_hops() {
        let schema = test_schema();
        let resolved = resolve_path(&schema, "order", "customer.address.city").unwrap();

        assert_eq!(resolved.chain.len(), 2);
        assert_eq!(resolved.chain[1].model.name, "customer");
        assert_eq!(resolved.chain[1].target.name, "address");
        assert_eq!(resolved.leaf.field_type, FieldType::String);
        assert_eq!(resolved.leaf_model().name, "address");
    }

    #[test]
    fn test_resolve_circular_relation_path() {
        let schema = test_schema();
        let resolved =
            resolve_path(&schema, "order", "customer.referrer.referrer.discountRate").unwrap();
        assert_eq!(resolved.chain.len(), 3);
    }

    #[test]
    fn test_resolve_leaf_may_be_relation() {
        let schema = test_schema();
        let resolved = resolve_path(&schema, "order", "customer").unwrap();
        assert!(resolved.is_root());
        assert!(resolved.leaf.field_type.is_relation());
    }

    #[test]
    fn test_resolve_empty_path() {
        let schema = test_schema();
        assert_eq!(resolve_path(&schema, "order", "").unwrap_err(), ResolveError::EmptyPath);
        assert_eq!(resolve_path(&schema, "order", "   ").unwrap_err(), ResolveError::EmptyPath);
    }

    #[test]
    fn test_resolve_unknown_start_model() {
        let schema = test_schema();
        let err = resolve_path(&schema, "invoice", "amount").unwrap_err();
        assert_eq!(err, ResolveError::ModelNotFound("invoice".to_string()));
    }

    #[test]
    fn test_resolve_missing_leaf() {
        let schema = test_schema();
        let err = resolve_path(&schema, "order", "customer.nope").unwrap_err();
        assert_eq!(
            err,
            ResolveError::FieldNotFound {
                model: "customer".to_string(),
                field: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_missing_intermediate() {
        let schema = test_schema();
        let err = resolve_path(&schema, "order", "vendor.name").unwrap_err();
        assert!(matches!(err, ResolveError::FieldNotFound { .. }));
    }

    #[test]
    fn test_resolve_through_non_relation() {
        let schema = test_schema();
        let err = resolve_path(&schema, "order", "amount.value").unwrap_err();
        assert!(matches!(err, ResolveError::NotARelation { .. }));
    }

    #[test]
    fn test_resolve_relation_without_target() {
        let schema = test_schema();
        let err = resolve_path(&schema, "order", "broken.value").unwrap_err();
        assert!(matches!(err, ResolveError::MissingRelationTarget { .. }));
    }

    #[test]
    fn test_resolve_relation_to_unknown_model() {
        let schema = test_schema();
        let err = resolve_path(&schema, "order", "ghost.value").unwrap_err();
        assert_eq!(err, ResolveError::ModelNotFound("nowhere".to_string()));
    }

    #[test]
    fn test_resolve_empty_segment() {
        let schema = test_schema();
        let err = resolve_path(&schema, "order", "customer..discountRate").unwrap_err();
        assert!(matches!(err, ResolveError::FieldNotFound { field, .. } if field.is_empty()));
    }
}
