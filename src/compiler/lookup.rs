//! Lookup registry: deduplicates relation hops within one compilation pass

use indexmap::IndexMap;
use tracing::trace;
use crate::pipeline::LookupDescriptor;
use crate::resolver::RelationHop;

/// Prefix of every generated lookup alias; user aliases may not start with it
pub const LOOKUP_ALIAS_PREFIX: &str = "__calc_lookup_";

/// Derive the lookup alias for a relation path prefix
///
/// `["customer", "address"]` becomes `__calc_lookup_customer_address`.
pub fn lookup_alias(segments: &[&str]) -> String {
    format!("{}{}", LOOKUP_ALIAS_PREFIX, segments.join("_"))
}

/// Two different path prefixes that derive the same alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCollision {
    pub alias: String,
    pub existing_path: String,
    pub path: String,
}

#[derive(Debug, Clone)]
struct Registered {
    /// Dotted relation path this lookup was registered for
    path: String,
    descriptor: LookupDescriptor,
}

/// Lookups registered during one pass, keyed by alias in registration order
///
/// A registry lives for exactly one pass and is dropped with it.
#[derive(Debug, Clone, Default)]
pub struct LookupRegistry {
    lookups: IndexMap<String, Registered>,
}

impl LookupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every hop of a relation chain
    ///
    /// Returns the alias holding the last hop's target document, or `None`
    /// when the chain is empty (the field lives on the root model). Hops
    /// already registered by an earlier path with the same prefix are reused.
    pub fn register_chain(&mut self, chain: &[RelationHop<'_>]) -> Result<Option<String>, LookupCollision> {
        let mut segments: Vec<&str> = Vec::with_capacity(chain.len());
        let mut parent: Option<String> = None;

        for hop in chain {
            segments.push(hop.field.name.as_str());
            let alias = lookup_alias(&segments);
            let path = segments.join(".");

            match self.lookups.get(&alias) {
                Some(existing) if existing.path != path => {
                    return Err(LookupCollision {
                        alias,
                        existing_path: existing.path.clone(),
                        path,
                    });
                }
                Some(_) => {
                    trace!(alias = %alias, "lookup reused");
                }
                None => {
                    trace!(alias = %alias, from = %hop.model.name, to = %hop.target.name, "lookup registered");
                    let descriptor = LookupDescriptor {
                        from_model: hop.model.name.clone(),
                        local_field: hop.field.name.clone(),
                        foreign_model: hop.target.name.clone(),
                        alias: alias.clone(),
                        is_multiple: hop.is_multiple(),
                        parent_as: parent.clone(),
                    };
                    self.lookups.insert(alias.clone(), Registered { path, descriptor });
                }
            }

            parent = Some(alias);
        }

        Ok(parent)
    }

    pub fn len(&self) -> usize {
        self.lookups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty()
    }

    /// All registered lookups, in registration order
    pub fn all(&self) -> Vec<LookupDescriptor> {
        self.lookups.values().map(|r| r.descriptor.clone()).collect()
    }

    pub fn into_lookups(self) -> Vec<LookupDescriptor> {
        self.lookups.into_values().map(|r| r.descriptor).collect()
    }
}
