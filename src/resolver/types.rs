//! Types for resolved field paths

use crate::schema::{Field, Model};

/// One relation traversed while resolving a path
#[derive(Debug, Clone, Copy)]
pub struct RelationHop<'a> {
    /// Model owning the relation field
    pub model: &'a Model,
    /// The relation field
    pub field: &'a Field,
    /// Model the relation points at
    pub target: &'a Model,
}

impl<'a> RelationHop<'a> {
    pub fn is_multiple(&self) -> bool {
        self.field.multiple
    }
}

/// A fully resolved field path
#[derive(Debug, Clone)]
pub struct ResolvedPath<'a> {
    /// Model the path starts on
    pub root: &'a Model,
    /// The field the path ends on
    pub leaf: &'a Field,
    /// Relations traversed to reach it, in order (empty for root fields)
    pub chain: Vec<RelationHop<'a>>,
}

impl<'a> ResolvedPath<'a> {
    /// Is the leaf on the starting model (no joins needed)?
    pub fn is_root(&self) -> bool {
        self.chain.is_empty()
    }

    /// Model the leaf field lives on
    pub fn leaf_model(&self) -> &'a Model {
        self.chain.last().map(|hop| hop.target).unwrap_or(self.root)
    }

    /// Dotted path this resolution was made from
    pub fn path(&self) -> String {
        self.chain
            .iter()
            .map(|hop| hop.field.name.as_str())
            .chain(std::iter::once(self.leaf.name.as_str()))
            .collect::<Vec<_>>()
            .join(".")
    }
}
