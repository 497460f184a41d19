//! Identifier and timestamp generation.
//!
//! # Responsibility
//! - Mint globally unique ids for new tasks and toolbox items.
//! - Provide the wall-clock instant stamped on created entities.
//!
//! # Invariants
//! - Ids are drawn from the UUID v4 space; tasks and toolbox items share it.
//! - `now` reflects wall-clock UTC at the call and serializes as ISO-8601.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Stable identifier shared by every entity in the snapshot.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntryId = Uuid;

/// Returns a fresh entity id.
pub fn next_entry_id() -> EntryId {
    Uuid::new_v4()
}

/// Returns the current wall-clock instant in UTC.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::next_entry_id;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_pairwise_distinct() {
        let ids: HashSet<_> = (0..256).map(|_| next_entry_id()).collect();
        assert_eq!(ids.len(), 256);
    }

    #[test]
    fn generated_id_is_not_nil() {
        assert!(!next_entry_id().is_nil());
    }
}
