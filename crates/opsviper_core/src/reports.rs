//! Report calculator: derives the analytics view from live state.
//!
//! # Responsibility
//! - Compute the seven report metrics from the task and toolbox collections.
//! - Provide the dashboard counters derived from the same inputs.
//!
//! # Invariants
//! - Pure over its inputs plus the supplied instant; `calculate` reads the
//!   wall clock once, so results must not be cached across calls.
//! - Distribution percentages are rounded independently per category and may
//!   not sum to 100.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::ident;
use crate::model::snapshot::{ReportsView, TaskBoard, TaskDistribution, ToolboxShelf};
use crate::model::task::{Task, TaskStatus};
use crate::model::toolbox::{ToolboxCategory, ToolboxItem};

/// Equipment without an update in this many days counts as stale.
const STALE_EQUIPMENT_DAYS: i64 = 90;

/// Derives the reports view at the current wall-clock instant.
pub fn calculate(tasks: &TaskBoard, toolbox: &ToolboxShelf) -> ReportsView {
    calculate_at(tasks, toolbox, ident::now())
}

/// Derives the reports view at an explicit instant.
pub fn calculate_at(tasks: &TaskBoard, toolbox: &ToolboxShelf, now: DateTime<Utc>) -> ReportsView {
    let total = tasks.total();

    let task_distribution = if total == 0 {
        None
    } else {
        Some(TaskDistribution {
            react: share(tasks.react.len(), total),
            maintain: share(tasks.maintain.len(), total),
            improve: share(tasks.improve.len(), total),
        })
    };

    let overdue_tasks_count = count(tasks, |task| is_overdue(task, now));
    let unassigned_tasks = count(tasks, |task| {
        task.due_date.is_some() && task.assignee.is_none()
    });
    let tasks_without_due_date = count(tasks, |task| {
        task.assignee.is_some() && task.due_date.is_none()
    });

    // Single-period average: completed count divided by one month of data.
    let completed = count(tasks, |task| task.status == TaskStatus::Completed);
    let monthly_completion_average = completed;

    let equipment = toolbox.list(ToolboxCategory::Equipment);
    let equipment_growth = equipment.len() as u32;
    let stale_cutoff = now - Duration::days(STALE_EQUIPMENT_DAYS);
    let stale_equipment = equipment
        .iter()
        .filter(|item| is_stale(item, stale_cutoff))
        .count() as u32;

    ReportsView {
        task_distribution,
        overdue_tasks_count,
        unassigned_tasks,
        tasks_without_due_date,
        monthly_completion_average,
        equipment_growth,
        stale_equipment,
    }
}

/// Headline counters for the dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub overdue_tasks: u32,
    pub toolbox_items: u32,
}

/// Derives the dashboard counters at the current wall-clock instant.
pub fn dashboard_stats(tasks: &TaskBoard, toolbox: &ToolboxShelf) -> DashboardStats {
    dashboard_stats_at(tasks, toolbox, ident::now())
}

/// Derives the dashboard counters at an explicit instant.
pub fn dashboard_stats_at(
    tasks: &TaskBoard,
    toolbox: &ToolboxShelf,
    now: DateTime<Utc>,
) -> DashboardStats {
    DashboardStats {
        total_tasks: tasks.total() as u32,
        completed_tasks: count(tasks, |task| task.status == TaskStatus::Completed),
        overdue_tasks: count(tasks, |task| is_overdue(task, now)),
        toolbox_items: toolbox.total() as u32,
    }
}

/// A task is overdue when its due day, taken as midnight UTC, is in the past
/// and the task is not completed.
fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    match task.due_date {
        Some(due) => {
            due.and_time(NaiveTime::MIN).and_utc() < now && task.status != TaskStatus::Completed
        }
        None => false,
    }
}

fn is_stale(item: &ToolboxItem, cutoff: DateTime<Utc>) -> bool {
    match item.updated_at {
        Some(updated_at) => updated_at < cutoff,
        None => true,
    }
}

fn share(part: usize, total: usize) -> u32 {
    (100.0 * part as f64 / total as f64).round() as u32
}

fn count<F>(tasks: &TaskBoard, predicate: F) -> u32
where
    F: Fn(&Task) -> bool,
{
    tasks.iter_all().filter(|task| predicate(task)).count() as u32
}
