//! Command dispatch and the pure snapshot reducer.
//!
//! # Responsibility
//! - Define the closed command set and apply each command as a pure
//!   transition from one snapshot value to the next.
//! - Own the live snapshot and persist every accepted transition.
//!
//! # Invariants
//! - `reduce` never mutates the prior snapshot; it returns a new value.
//! - A rejected command leaves state and durable record untouched.
//! - `ident::next_entry_id`/`ident::now` are called only by the two Add
//!   commands.
//! - The persistence write completes inside `dispatch`, so writes are
//!   serialized in transition order.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::ident::{self, EntryId};
use crate::model::snapshot::{ReportsView, Snapshot};
use crate::model::task::{Task, TaskCategory, TaskDraft, TaskPatch};
use crate::model::toolbox::{ToolboxCategory, ToolboxFields, ToolboxItem};
use crate::model::UnknownCategory;
use crate::persist::SnapshotStore;
use crate::reports;
use crate::transfer::{self, ImportFormatError};
use chrono::{DateTime, Utc};

/// An intent to transition the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddTask {
        category: TaskCategory,
        draft: TaskDraft,
    },
    UpdateTask {
        category: TaskCategory,
        id: EntryId,
        patch: TaskPatch,
    },
    DeleteTask {
        category: TaskCategory,
        id: EntryId,
    },
    AddToolboxItem {
        category: ToolboxCategory,
        fields: ToolboxFields,
    },
    UpdateToolboxItem {
        category: ToolboxCategory,
        id: EntryId,
        fields: ToolboxFields,
        /// Replacement edit stamp supplied by the collaborator; `None`
        /// keeps the stored value. The reducer never stamps this itself.
        updated_at: Option<DateTime<Utc>>,
    },
    DeleteToolboxItem {
        category: ToolboxCategory,
        id: EntryId,
    },
    LoadSnapshot {
        snapshot: Snapshot,
    },
    UpdateReports {
        reports: ReportsView,
    },
}

impl Command {
    /// Stable command name for log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTask { .. } => "add_task",
            Self::UpdateTask { .. } => "update_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::AddToolboxItem { .. } => "add_toolbox_item",
            Self::UpdateToolboxItem { .. } => "update_toolbox_item",
            Self::DeleteToolboxItem { .. } => "delete_toolbox_item",
            Self::LoadSnapshot { .. } => "load_snapshot",
            Self::UpdateReports { .. } => "update_reports",
        }
    }
}

/// Rejection of a command; state is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A collaborator referenced a category key outside the fixed enum.
    InvalidCategory { category: String },
    /// A toolbox payload variant does not belong to the addressed category.
    PayloadMismatch {
        category: ToolboxCategory,
        payload: ToolboxCategory,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCategory { category } => write!(f, "invalid category `{category}`"),
            Self::PayloadMismatch { category, payload } => write!(
                f,
                "toolbox payload for `{payload}` addressed to category `{category}`"
            ),
        }
    }
}

impl Error for StoreError {}

impl From<UnknownCategory> for StoreError {
    fn from(value: UnknownCategory) -> Self {
        Self::InvalidCategory {
            category: value.category,
        }
    }
}

/// Applies one command to a snapshot, producing the next snapshot value.
///
/// Pure except for id/timestamp minting inside the Add commands. The input
/// snapshot is never mutated, so callers can keep serializing the old value
/// while the new one is computed.
pub fn reduce(snapshot: &Snapshot, command: &Command) -> Result<Snapshot, StoreError> {
    let mut next = snapshot.clone();

    match command {
        Command::AddTask { category, draft } => {
            let task = Task::from_draft(ident::next_entry_id(), ident::now(), draft.clone());
            next.tasks.list_mut(*category).push(task);
        }
        Command::UpdateTask {
            category,
            id,
            patch,
        } => {
            // Absent id is a soft no-op, not an error.
            if let Some(task) = next
                .tasks
                .list_mut(*category)
                .iter_mut()
                .find(|task| task.id == *id)
            {
                task.apply_patch(patch);
            }
        }
        Command::DeleteTask { category, id } => {
            next.tasks.list_mut(*category).retain(|task| task.id != *id);
        }
        Command::AddToolboxItem { category, fields } => {
            check_payload(*category, fields)?;
            let item = ToolboxItem::new(ident::next_entry_id(), ident::now(), fields.clone());
            next.toolbox.list_mut(*category).push(item);
        }
        Command::UpdateToolboxItem {
            category,
            id,
            fields,
            updated_at,
        } => {
            check_payload(*category, fields)?;
            if let Some(item) = next
                .toolbox
                .list_mut(*category)
                .iter_mut()
                .find(|item| item.id == *id)
            {
                item.fields = fields.clone();
                if let Some(stamp) = updated_at {
                    item.updated_at = Some(*stamp);
                }
            }
        }
        Command::DeleteToolboxItem { category, id } => {
            next.toolbox
                .list_mut(*category)
                .retain(|item| item.id != *id);
        }
        Command::LoadSnapshot { snapshot } => {
            next = snapshot.clone();
        }
        Command::UpdateReports { reports } => {
            next.reports = reports.clone();
        }
    }

    Ok(next)
}

fn check_payload(category: ToolboxCategory, fields: &ToolboxFields) -> Result<(), StoreError> {
    if fields.category() != category {
        return Err(StoreError::PayloadMismatch {
            category,
            payload: fields.category(),
        });
    }
    Ok(())
}

/// The live store: current snapshot plus its persistence backend. Owned by
/// the composition root; there is no ambient instance.
pub struct Store<P: SnapshotStore> {
    snapshot: Snapshot,
    persistence: P,
}

impl<P: SnapshotStore> Store<P> {
    /// Loads the prior snapshot from the backend, falling back to the
    /// default empty snapshot when the durable record is absent or
    /// unreadable.
    pub fn open(persistence: P) -> Self {
        let (snapshot, source) = match persistence.load() {
            Some(snapshot) => (snapshot, "record"),
            None => (Snapshot::default(), "default"),
        };
        info!("event=store_open module=store status=ok source={source}");
        Self {
            snapshot,
            persistence,
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Applies a command and persists the resulting snapshot. On rejection
    /// the current snapshot and durable record are untouched.
    pub fn dispatch(&mut self, command: &Command) -> Result<(), StoreError> {
        match reduce(&self.snapshot, command) {
            Ok(next) => {
                self.persistence.save(&next);
                self.snapshot = next;
                info!(
                    "event=command_apply module=store status=ok command={}",
                    command.name()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=command_apply module=store status=rejected command={} error={err}",
                    command.name()
                );
                Err(err)
            }
        }
    }

    /// Recomputes the reports view from live state and stores it, as the
    /// reports collaborator does after every task or toolbox change.
    pub fn recalculate_reports(&mut self) -> Result<(), StoreError> {
        let reports = reports::calculate(&self.snapshot.tasks, &self.snapshot.toolbox);
        self.dispatch(&Command::UpdateReports { reports })
    }

    /// Replaces state and durable record from an import payload. Malformed
    /// input is rejected and the prior state is retained.
    pub fn import_json(&mut self, raw: &str) -> Result<(), ImportFormatError> {
        let snapshot = transfer::parse_import(raw)?;
        self.persistence.save(&snapshot);
        self.snapshot = snapshot;
        info!("event=import_apply module=store status=ok");
        Ok(())
    }

    /// Clears the durable record and resets the in-memory snapshot to the
    /// default empty value.
    pub fn reset(&mut self) {
        self.persistence.clear();
        self.snapshot = Snapshot::default();
        info!("event=store_reset module=store status=ok");
    }
}
