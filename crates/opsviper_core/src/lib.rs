//! State store core for the OPS Viper operations tracker.
//! This crate is the single source of truth for store invariants:
//! categorized task and toolbox collections, derived reports, and the
//! full-snapshot persistence round-trip.

pub mod ident;
pub mod logging;
pub mod model;
pub mod persist;
pub mod reports;
pub mod store;
pub mod transfer;

pub use ident::{next_entry_id, EntryId};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::snapshot::{ReportsView, Snapshot, TaskBoard, TaskDistribution, ToolboxShelf};
pub use model::task::{Priority, Task, TaskCategory, TaskDraft, TaskPatch, TaskStatus};
pub use model::toolbox::{
    EquipmentStatus, IdeaStatus, KeyEventKind, ProcessFrequency, SystemStatus, ToolboxCategory,
    ToolboxFields, ToolboxItem,
};
pub use model::UnknownCategory;
pub use persist::{
    MemorySnapshotStore, PersistError, SnapshotStore, SqliteSnapshotStore, RECORD_KEY,
};
pub use store::{reduce, Command, Store, StoreError};
pub use transfer::{export_document, parse_import, ExportDocument, ImportFormatError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
