//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskdeck_core` wiring: seed
//!   the mock store, load a workspace and print the default views.
//! - Keep output deterministic apart from the seeded fixture data.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use taskdeck_core::{
    due_label, LatencyProfile, MemListRepository, MemTaskRepository, MemoryStore, TaskQuery,
    Workspace,
};

#[tokio::main]
async fn main() -> ExitCode {
    println!("taskdeck_core version={}", taskdeck_core::core_version());

    let store = match MemoryStore::seeded(LatencyProfile::default()) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            eprintln!("failed to seed store: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut workspace = Workspace::new(
        MemTaskRepository::new(Arc::clone(&store)),
        MemListRepository::new(store),
    );

    if let Err(err) = workspace.load().await {
        eprintln!("failed to load workspace: {err}");
        return ExitCode::FAILURE;
    }

    let counts = workspace.counts();
    println!(
        "open tasks: all={} today={} upcoming={}",
        counts.all, counts.today, counts.upcoming
    );
    for list in workspace.lists() {
        let open = counts.by_list.get(&list.id).copied().unwrap_or(0);
        println!("  list {} `{}`: {} open", list.id, list.name, open);
    }

    let now = Utc::now();
    println!("dashboard (due date order):");
    for task in workspace.visible_tasks(&TaskQuery::new(), now) {
        let marker = if task.completed { 'x' } else { ' ' };
        let due = task
            .due_date
            .map(|date| due_label(date, now.date_naive()))
            .unwrap_or_else(|| "-".to_string());
        let list = task.list_name.as_deref().unwrap_or("-");
        println!(
            "  [{marker}] #{:<3} {:<32} due={due:<10} priority={} list={list}",
            task.id,
            task.title,
            task.priority.as_str()
        );
    }

    let archived = workspace.visible_tasks(&TaskQuery::archive(), now);
    println!("archive: {} completed tasks", archived.len());

    ExitCode::SUCCESS
}
