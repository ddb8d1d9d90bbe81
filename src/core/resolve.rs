//! Binds every `TypeReference` in the registry to the record it names.
//!
//! Runs once, after all files were merged. The first reference that names no
//! registered record stops the pass; records keep whatever was bound so far.

use thiserror::Error;

use crate::core::registry::TypeRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unresolved reference '{name}' in {context} of '{owner}'")]
    Dangling {
        owner: String,
        context: String,
        name: String,
    },
}

/// Resolve all references. Returns how many were bound.
pub fn resolve_references(registry: &mut TypeRegistry) -> Result<usize, ResolveError> {
    let (records, index) = registry.records_and_index();
    let mut bound = 0;

    for record in records.iter_mut() {
        let owner = record.pretty_name().to_string();

        for (context, reference) in record.references_mut() {
            if reference.is_resolved() {
                continue;
            }

            let Some(&id) = index.get(reference.name()) else {
                return Err(ResolveError::Dangling {
                    owner,
                    context,
                    name: reference.name().to_string(),
                });
            };
            reference.bind(id);
            bound += 1;
        }
    }

    Ok(bound)
}
