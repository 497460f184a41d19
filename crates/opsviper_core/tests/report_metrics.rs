use opsviper_core::model::snapshot::{TaskBoard, TaskDistribution, ToolboxShelf};
use opsviper_core::model::task::{Task, TaskStatus};
use opsviper_core::model::toolbox::{ToolboxFields, ToolboxItem};
use opsviper_core::reports::{calculate_at, dashboard_stats_at};
use opsviper_core::{next_entry_id, TaskDraft};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
}

fn task(draft: TaskDraft) -> Task {
    Task::from_draft(next_entry_id(), fixed_now() - Duration::days(30), draft)
}

fn equipment_item(name: &str, updated_at: Option<DateTime<Utc>>) -> ToolboxItem {
    ToolboxItem {
        id: next_entry_id(),
        fields: ToolboxFields::Equipment {
            name: name.to_string(),
            description: None,
            serial_number: None,
            status: None,
        },
        created_at: fixed_now() - Duration::days(200),
        updated_at,
    }
}

#[test]
fn single_overdue_pending_task_drives_the_expected_view() {
    let mut tasks = TaskBoard::default();
    tasks.react.push(task(TaskDraft {
        title: "respond to incident".to_string(),
        due_date: NaiveDate::from_ymd_opt(2026, 8, 6),
        ..TaskDraft::default()
    }));

    let view = calculate_at(&tasks, &ToolboxShelf::default(), fixed_now());
    assert_eq!(view.overdue_tasks_count, 1);
    assert_eq!(
        view.task_distribution,
        Some(TaskDistribution {
            react: 100,
            maintain: 0,
            improve: 0,
        })
    );
}

#[test]
fn completed_tasks_are_never_overdue() {
    let mut tasks = TaskBoard::default();
    tasks.react.push(task(TaskDraft {
        title: "already done".to_string(),
        due_date: NaiveDate::from_ymd_opt(2026, 8, 1),
        status: TaskStatus::Completed,
        ..TaskDraft::default()
    }));

    let view = calculate_at(&tasks, &ToolboxShelf::default(), fixed_now());
    assert_eq!(view.overdue_tasks_count, 0);
    assert_eq!(view.monthly_completion_average, 1);
}

#[test]
fn future_due_dates_are_not_overdue() {
    let mut tasks = TaskBoard::default();
    tasks.maintain.push(task(TaskDraft {
        title: "patch window".to_string(),
        due_date: NaiveDate::from_ymd_opt(2026, 8, 8),
        ..TaskDraft::default()
    }));

    let view = calculate_at(&tasks, &ToolboxShelf::default(), fixed_now());
    assert_eq!(view.overdue_tasks_count, 0);
}

#[test]
fn distribution_is_absent_when_there_are_no_tasks() {
    let view = calculate_at(&TaskBoard::default(), &ToolboxShelf::default(), fixed_now());
    assert_eq!(view.task_distribution, None);
}

#[test]
fn distribution_shares_are_rounded_independently() {
    let mut tasks = TaskBoard::default();
    tasks.react.push(task(TaskDraft::titled("a")));
    tasks.maintain.push(task(TaskDraft::titled("b")));
    tasks.improve.push(task(TaskDraft::titled("c")));

    // Three equal shares round to 33 each; the sum (99) is accepted.
    let view = calculate_at(&tasks, &ToolboxShelf::default(), fixed_now());
    assert_eq!(
        view.task_distribution,
        Some(TaskDistribution {
            react: 33,
            maintain: 33,
            improve: 33,
        })
    );
}

#[test]
fn assignment_gap_counters_look_at_opposite_fields() {
    let mut tasks = TaskBoard::default();
    // Due date but nobody assigned.
    tasks.react.push(task(TaskDraft {
        title: "unowned".to_string(),
        due_date: NaiveDate::from_ymd_opt(2026, 9, 1),
        ..TaskDraft::default()
    }));
    // Assigned but no due date.
    tasks.maintain.push(task(TaskDraft {
        title: "unscheduled".to_string(),
        assignee: Some("li".to_string()),
        ..TaskDraft::default()
    }));
    // Both set: counted by neither.
    tasks.improve.push(task(TaskDraft {
        title: "fully planned".to_string(),
        assignee: Some("li".to_string()),
        due_date: NaiveDate::from_ymd_opt(2026, 9, 1),
        ..TaskDraft::default()
    }));

    let view = calculate_at(&tasks, &ToolboxShelf::default(), fixed_now());
    assert_eq!(view.unassigned_tasks, 1);
    assert_eq!(view.tasks_without_due_date, 1);
}

#[test]
fn monthly_completion_average_counts_completed_over_one_period() {
    let mut tasks = TaskBoard::default();
    for index in 0..3 {
        tasks.improve.push(task(TaskDraft {
            title: format!("done {index}"),
            status: TaskStatus::Completed,
            ..TaskDraft::default()
        }));
    }
    tasks.improve.push(task(TaskDraft::titled("still open")));

    let view = calculate_at(&tasks, &ToolboxShelf::default(), fixed_now());
    assert_eq!(view.monthly_completion_average, 3);
}

#[test]
fn equipment_without_update_stamp_is_stale() {
    let mut toolbox = ToolboxShelf::default();
    toolbox.equipment.push(equipment_item("press", None));

    let view = calculate_at(&TaskBoard::default(), &toolbox, fixed_now());
    assert_eq!(view.equipment_growth, 1);
    assert_eq!(view.stale_equipment, 1);
}

#[test]
fn equipment_staleness_uses_the_ninety_day_window() {
    let mut toolbox = ToolboxShelf::default();
    toolbox
        .equipment
        .push(equipment_item("fresh", Some(fixed_now() - Duration::days(89))));
    toolbox
        .equipment
        .push(equipment_item("stale", Some(fixed_now() - Duration::days(91))));

    let view = calculate_at(&TaskBoard::default(), &toolbox, fixed_now());
    assert_eq!(view.equipment_growth, 2);
    assert_eq!(view.stale_equipment, 1);
}

#[test]
fn equipment_growth_ignores_other_categories() {
    let mut toolbox = ToolboxShelf::default();
    toolbox.software.push(ToolboxItem {
        id: next_entry_id(),
        fields: ToolboxFields::Software {
            name: "crm".to_string(),
            description: None,
            version: None,
            license: None,
        },
        created_at: fixed_now(),
        updated_at: None,
    });

    let view = calculate_at(&TaskBoard::default(), &toolbox, fixed_now());
    assert_eq!(view.equipment_growth, 0);
    assert_eq!(view.stale_equipment, 0);
}

#[test]
fn dashboard_stats_agree_with_the_overdue_rule() {
    let mut tasks = TaskBoard::default();
    tasks.react.push(task(TaskDraft {
        title: "late".to_string(),
        due_date: NaiveDate::from_ymd_opt(2026, 8, 1),
        ..TaskDraft::default()
    }));
    tasks.maintain.push(task(TaskDraft {
        title: "done".to_string(),
        status: TaskStatus::Completed,
        ..TaskDraft::default()
    }));
    let mut toolbox = ToolboxShelf::default();
    toolbox.equipment.push(equipment_item("lathe", None));

    let stats = dashboard_stats_at(&tasks, &toolbox, fixed_now());
    assert_eq!(stats.total_tasks, 2);
    assert_eq!(stats.completed_tasks, 1);
    assert_eq!(stats.overdue_tasks, 1);
    assert_eq!(stats.toolbox_items, 1);

    let view = calculate_at(&tasks, &toolbox, fixed_now());
    assert_eq!(stats.overdue_tasks, view.overdue_tasks_count);
}
