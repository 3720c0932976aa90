//! Validation and bookkeeping shared by every diagram partition.

use log::warn;

use super::escape;
use super::types::{Collection, Id};
use crate::error::EditError;

/// Collections touched since the last drain, in first-change order.
#[derive(Debug, Default, Clone)]
pub(crate) struct ChangeLog {
    pending: Vec<Collection>,
}

impl ChangeLog {
    pub(crate) fn record(&mut self, collections: &[Collection]) {
        for collection in collections {
            if !self.pending.contains(collection) {
                self.pending.push(*collection);
            }
        }
    }

    pub(crate) fn drain_into(&mut self, out: &mut Vec<Collection>) {
        for collection in self.pending.drain(..) {
            if !out.contains(&collection) {
                out.push(collection);
            }
        }
    }
}

fn rejected(err: EditError) -> EditError {
    warn!("edit rejected: {}", err);
    err
}

/// The name as it ends up in PlantUML output. Names with equal keys would be merged.
fn display_key(name: &str, collection: Collection) -> String {
    let key = escape::text(name).replace('"', "'");
    if collection == Collection::Components {
        key.replace('[', "(").replace(']', ")")
    } else {
        key
    }
}

/// Trims `name` and checks it is non-empty and not already taken once printed.
pub(crate) fn new_name<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    name: &str,
    collection: Collection,
) -> Result<String, EditError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(rejected(EditError::EmptyName(collection)));
    }
    let key = display_key(name, collection);
    if existing.into_iter().any(|n| display_key(n, collection) == key) {
        return Err(rejected(EditError::DuplicateName {
            collection,
            name: name.to_string(),
        }));
    }
    Ok(name.to_string())
}

/// Rejects `name` when it prints the same as an entry of a sibling collection.
pub(crate) fn distinct_from<'a>(
    others: impl IntoIterator<Item = &'a str>,
    name: &str,
    collection: Collection,
    other: Collection,
) -> Result<(), EditError> {
    let key = display_key(name, collection);
    if others.into_iter().any(|n| display_key(n, other) == key) {
        return Err(rejected(EditError::NameClash {
            collection,
            other,
            name: name.to_string(),
        }));
    }
    Ok(())
}

/// Trims a member name (attribute, method) and checks it is non-empty.
pub(crate) fn member_name(name: &str, collection: Collection) -> Result<String, EditError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(rejected(EditError::EmptyName(collection)));
    }
    Ok(name.to_string())
}

pub(crate) fn require_nodes(
    found: usize,
    needed: usize,
    collection: Collection,
) -> Result<(), EditError> {
    if found < needed {
        return Err(rejected(EditError::NotEnoughNodes {
            collection,
            needed,
            found,
        }));
    }
    Ok(())
}

/// Picks an endpoint among name-keyed nodes, falling back to `nodes[default]`.
pub(crate) fn named_endpoint(
    nodes: &[String],
    requested: Option<&str>,
    default: usize,
    collection: Collection,
) -> Result<String, EditError> {
    match requested {
        None => nodes
            .get(default)
            .cloned()
            .ok_or_else(|| {
                rejected(EditError::NotEnoughNodes {
                    collection,
                    needed: default + 1,
                    found: nodes.len(),
                })
            }),
        Some(name) if nodes.iter().any(|n| n == name) => Ok(name.to_string()),
        Some(name) => Err(rejected(EditError::UnknownEndpoint {
            collection,
            name: name.to_string(),
        })),
    }
}

/// Id-keyed counterpart of [`named_endpoint`].
pub(crate) fn id_endpoint(
    nodes: &[Id],
    requested: Option<Id>,
    default: usize,
    collection: Collection,
) -> Result<Id, EditError> {
    match requested {
        None => nodes.get(default).copied().ok_or_else(|| {
            rejected(EditError::NotEnoughNodes {
                collection,
                needed: default + 1,
                found: nodes.len(),
            })
        }),
        Some(id) if nodes.contains(&id) => Ok(id),
        Some(id) => Err(rejected(EditError::UnknownEndpoint {
            collection,
            name: id.to_string(),
        })),
    }
}

pub(crate) fn duplicate_edge(collection: Collection) -> EditError {
    rejected(EditError::DuplicateEdge(collection))
}

pub(crate) fn unknown_record(collection: Collection, id: Id) -> EditError {
    rejected(EditError::UnknownRecord {
        collection,
        id: id.to_string(),
    })
}

pub(crate) fn check_index(
    index: usize,
    len: usize,
    collection: Collection,
) -> Result<(), EditError> {
    if index >= len {
        return Err(rejected(EditError::IndexOutOfRange {
            collection,
            index,
            len,
        }));
    }
    Ok(())
}
