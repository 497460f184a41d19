//! Snapshot shape: the complete store state at a point in time.
//!
//! # Responsibility
//! - Group task and toolbox collections under their fixed category keys.
//! - Define the derived reports view and its default (empty) values.
//! - Rebuild snapshots leniently from untrusted JSON.
//!
//! # Invariants
//! - Category keys exist only as struct fields; nothing can add a key.
//! - `from_value` never fails: a missing or malformed section falls back to
//!   its default instead of poisoning the whole snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::task::{Task, TaskCategory};
use super::toolbox::{ToolboxCategory, ToolboxItem};

/// Task lists keyed by the three fixed task categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskBoard {
    pub react: Vec<Task>,
    pub maintain: Vec<Task>,
    pub improve: Vec<Task>,
}

impl TaskBoard {
    pub fn list(&self, category: TaskCategory) -> &[Task] {
        match category {
            TaskCategory::React => &self.react,
            TaskCategory::Maintain => &self.maintain,
            TaskCategory::Improve => &self.improve,
        }
    }

    pub(crate) fn list_mut(&mut self, category: TaskCategory) -> &mut Vec<Task> {
        match category {
            TaskCategory::React => &mut self.react,
            TaskCategory::Maintain => &mut self.maintain,
            TaskCategory::Improve => &mut self.improve,
        }
    }

    /// All tasks across categories, in category order.
    pub fn iter_all(&self) -> impl Iterator<Item = &Task> {
        TaskCategory::ALL
            .into_iter()
            .flat_map(|category| self.list(category).iter())
    }

    pub fn total(&self) -> usize {
        TaskCategory::ALL
            .into_iter()
            .map(|category| self.list(category).len())
            .sum()
    }
}

/// Toolbox collections keyed by the seven fixed toolbox categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolboxShelf {
    pub systems: Vec<ToolboxItem>,
    pub processes: Vec<ToolboxItem>,
    pub equipment: Vec<ToolboxItem>,
    pub software: Vec<ToolboxItem>,
    pub team: Vec<ToolboxItem>,
    pub key_events: Vec<ToolboxItem>,
    pub ideas: Vec<ToolboxItem>,
}

impl ToolboxShelf {
    pub fn list(&self, category: ToolboxCategory) -> &[ToolboxItem] {
        match category {
            ToolboxCategory::Systems => &self.systems,
            ToolboxCategory::Processes => &self.processes,
            ToolboxCategory::Equipment => &self.equipment,
            ToolboxCategory::Software => &self.software,
            ToolboxCategory::Team => &self.team,
            ToolboxCategory::KeyEvents => &self.key_events,
            ToolboxCategory::Ideas => &self.ideas,
        }
    }

    pub(crate) fn list_mut(&mut self, category: ToolboxCategory) -> &mut Vec<ToolboxItem> {
        match category {
            ToolboxCategory::Systems => &mut self.systems,
            ToolboxCategory::Processes => &mut self.processes,
            ToolboxCategory::Equipment => &mut self.equipment,
            ToolboxCategory::Software => &mut self.software,
            ToolboxCategory::Team => &mut self.team,
            ToolboxCategory::KeyEvents => &mut self.key_events,
            ToolboxCategory::Ideas => &mut self.ideas,
        }
    }

    pub fn iter_all(&self) -> impl Iterator<Item = &ToolboxItem> {
        ToolboxCategory::ALL
            .into_iter()
            .flat_map(|category| self.list(category).iter())
    }

    pub fn total(&self) -> usize {
        ToolboxCategory::ALL
            .into_iter()
            .map(|category| self.list(category).len())
            .sum()
    }
}

/// Per-category task share, each percentage rounded independently. The three
/// values are not guaranteed to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDistribution {
    pub react: u32,
    pub maintain: u32,
    pub improve: u32,
}

/// Derived analytics portion of the snapshot. Authored only by the report
/// calculator; `None` distribution means there are no tasks at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportsView {
    pub task_distribution: Option<TaskDistribution>,
    pub overdue_tasks_count: u32,
    pub unassigned_tasks: u32,
    pub tasks_without_due_date: u32,
    pub monthly_completion_average: u32,
    pub equipment_growth: u32,
    pub stale_equipment: u32,
}

/// The complete store state at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub tasks: TaskBoard,
    pub toolbox: ToolboxShelf,
    pub reports: ReportsView,
}

impl Snapshot {
    /// Rebuilds a snapshot from an untrusted JSON value. Each top-level
    /// section is decoded independently; a missing or malformed section is
    /// treated as absent and replaced by its default.
    pub fn from_value(value: &Value) -> Self {
        Self {
            tasks: section(value, "tasks"),
            toolbox: section(value, "toolbox"),
            reports: section(value, "reports"),
        }
    }
}

fn section<T>(value: &Value, key: &str) -> T
where
    T: Default + for<'de> Deserialize<'de>,
{
    value
        .get(key)
        .and_then(|section| serde_json::from_value(section.clone()).ok())
        .unwrap_or_default()
}
