//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `opsviper_core` wiring: open a
//!   store, apply one command, derive reports.
//! - Keep output deterministic for quick local sanity checks.

use opsviper_core::persist::MemorySnapshotStore;
use opsviper_core::reports;
use opsviper_core::store::{Command, Store};
use opsviper_core::{TaskCategory, TaskDraft};

fn main() {
    let mut store = Store::open(MemorySnapshotStore::new());

    let probe = Command::AddTask {
        category: TaskCategory::React,
        draft: TaskDraft::titled("smoke probe"),
    };
    if let Err(err) = store.dispatch(&probe).and_then(|()| store.recalculate_reports()) {
        eprintln!("smoke probe rejected: {err}");
        std::process::exit(1);
    }

    let snapshot = store.snapshot();
    let stats = reports::dashboard_stats(&snapshot.tasks, &snapshot.toolbox);
    println!("opsviper_core version={}", opsviper_core::core_version());
    println!("tasks={}", stats.total_tasks);
    println!(
        "distribution_react={}",
        snapshot
            .reports
            .task_distribution
            .map(|share| share.react)
            .unwrap_or_default()
    );
}
