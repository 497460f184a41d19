use opsviper_core::model::snapshot::{ReportsView, Snapshot};
use opsviper_core::model::task::{TaskCategory, TaskDraft};
use opsviper_core::model::toolbox::{ToolboxCategory, ToolboxFields};
use opsviper_core::persist::MemorySnapshotStore;
use opsviper_core::store::{reduce, Command, Store};
use opsviper_core::transfer::{export_document, parse_import, EXPORT_VERSION};

fn populated_snapshot() -> Snapshot {
    let snapshot = reduce(
        &Snapshot::default(),
        &Command::AddTask {
            category: TaskCategory::Maintain,
            draft: TaskDraft::titled("renew certificates"),
        },
    )
    .unwrap();
    reduce(
        &snapshot,
        &Command::AddToolboxItem {
            category: ToolboxCategory::Team,
            fields: ToolboxFields::Team {
                name: "Rae Kim".to_string(),
                role: Some("ops lead".to_string()),
                email: None,
                department: Some("operations".to_string()),
            },
        },
    )
    .unwrap()
}

#[test]
fn export_document_has_the_expected_shape() {
    let snapshot = populated_snapshot();
    let document = export_document(&snapshot);

    assert_eq!(document.version, EXPORT_VERSION);
    assert_eq!(document.tasks, snapshot.tasks);
    assert_eq!(document.toolbox, snapshot.toolbox);

    let value = serde_json::to_value(&document).unwrap();
    assert!(value["exportDate"].is_string());
    assert_eq!(value["version"], "1.0.0");
    assert!(value.get("reports").is_none());
}

#[test]
fn export_then_import_round_trips_the_data() {
    let snapshot = populated_snapshot();
    let raw = serde_json::to_string_pretty(&export_document(&snapshot)).unwrap();

    let imported = parse_import(&raw).unwrap();
    assert_eq!(imported.tasks, snapshot.tasks);
    assert_eq!(imported.toolbox, snapshot.toolbox);
    // Reports are derived; a fresh import starts from the default view.
    assert_eq!(imported.reports, ReportsView::default());
}

#[test]
fn import_accepts_the_durable_record_shape() {
    let mut snapshot = populated_snapshot();
    snapshot.reports.overdue_tasks_count = 4;
    let raw = serde_json::to_string(&snapshot).unwrap();

    let imported = parse_import(&raw).unwrap();
    assert_eq!(imported, snapshot);
}

#[test]
fn import_rejects_malformed_payloads() {
    assert!(parse_import("not json").is_err());
    // Missing `toolbox`.
    assert!(parse_import(r#"{"tasks": {}}"#).is_err());
    // Wrong section type.
    assert!(parse_import(r#"{"tasks": 5, "toolbox": {}}"#).is_err());
    // Item with an out-of-enum category tag.
    assert!(parse_import(
        r#"{"tasks": {}, "toolbox": {"systems": [{
            "id": "00000000-0000-4000-8000-000000000001",
            "category": "gadgets",
            "name": "mystery",
            "createdAt": "2026-05-02T08:00:00Z"
        }]}}"#
    )
    .is_err());
}

#[test]
fn store_import_replaces_state_and_durable_record() {
    let mut store = Store::open(MemorySnapshotStore::new());
    store
        .dispatch(&Command::AddTask {
            category: TaskCategory::React,
            draft: TaskDraft::titled("pre-import state"),
        })
        .unwrap();

    let replacement = populated_snapshot();
    let raw = serde_json::to_string(&export_document(&replacement)).unwrap();
    store.import_json(&raw).unwrap();

    assert_eq!(store.snapshot().tasks, replacement.tasks);
    assert_eq!(store.snapshot().toolbox, replacement.toolbox);
    assert!(store.snapshot().tasks.list(TaskCategory::React).is_empty());
}

#[test]
fn failed_import_retains_the_prior_state() {
    let mut store = Store::open(MemorySnapshotStore::new());
    store
        .dispatch(&Command::AddTask {
            category: TaskCategory::React,
            draft: TaskDraft::titled("survivor"),
        })
        .unwrap();
    let before = store.snapshot().clone();

    let err = store.import_json(r#"{"tasks": []}"#).unwrap_err();
    assert!(err.to_string().contains("import payload rejected"));
    assert_eq!(store.snapshot(), &before);
}
