#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cascade_core::scheduler::{TaskOptions, TaskOutcome};

/// Shared log of callback invocations, in call order.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

fn record(journal: &Journal, line: String) {
    journal.lock().unwrap().push(line);
}

/// Task whose callbacks both succeed with the task name.
pub fn task(name: &'static str, journal: &Journal) -> TaskOptions<String, String> {
    build(name, journal, false, false)
}

/// Task whose execute callback fails with the task name.
pub fn failing_execute(name: &'static str, journal: &Journal) -> TaskOptions<String, String> {
    build(name, journal, true, false)
}

/// Task whose revert callback fails with the task name.
pub fn failing_revert(name: &'static str, journal: &Journal) -> TaskOptions<String, String> {
    build(name, journal, false, true)
}

fn build(
    name: &'static str,
    journal: &Journal,
    fail_execute: bool,
    fail_revert: bool,
) -> TaskOptions<String, String> {
    let on_execute = journal.clone();
    let on_revert = journal.clone();
    TaskOptions::from_fns(
        move || {
            let journal = on_execute.clone();
            async move {
                record(&journal, format!("execute {name}"));
                tokio::task::yield_now().await;
                if fail_execute {
                    Err(name.to_string())
                } else {
                    Ok(name.to_string())
                }
            }
        },
        move || {
            let journal = on_revert.clone();
            async move {
                record(&journal, format!("revert {name}"));
                if fail_revert {
                    Err(name.to_string())
                } else {
                    Ok(name.to_string())
                }
            }
        },
    )
}

pub fn ok(name: &str) -> TaskOutcome<String, String> {
    TaskOutcome::ok(name, name.to_string())
}

pub fn names(outcomes: &[TaskOutcome<String, String>]) -> Vec<&str> {
    outcomes.iter().map(|outcome| outcome.name.as_str()).collect()
}
