//! Change detection between two specification snapshots

use std::collections::BTreeSet;

use crate::spec::{OperationId, Specification};

/// Operations in `current` that are new or differ from `previous`
///
/// Without a previous snapshot every operation counts as changed. Operations
/// are compared by deep value equality over the whole operation object, which
/// ignores object key order. Operations removed from `current` are not
/// reported.
pub fn changed_operations(
    previous: Option<&Specification>,
    current: &Specification,
) -> BTreeSet<OperationId> {
    current
        .operations()
        .filter(|operation| match previous {
            None => true,
            Some(previous) => previous
                .operation(operation.method(), operation.path())
                .map_or(true, |before| before != operation.body()),
        })
        .map(|operation| operation.id())
        .collect()
}
