mod common;

use cascade_core::scheduler::TaskScheduler;
use common::{journal, task};

#[test]
fn empty_scheduler_has_no_tasks() {
    let scheduler: TaskScheduler<String, String> = TaskScheduler::new();
    assert_eq!(scheduler.size(), 0);
}

#[test]
fn add_counts_tasks() {
    let log = journal();
    let mut scheduler = TaskScheduler::new();

    scheduler.add("a", task("a", &log));
    assert_eq!(scheduler.size(), 1);

    scheduler.add("b", task("b", &log).depends_on(["a"]));
    assert_eq!(scheduler.size(), 2);
}

#[test]
fn re_adding_a_name_replaces_the_task() {
    let log = journal();
    let mut scheduler = TaskScheduler::new();
    scheduler.add("a", task("a", &log));
    scheduler.add("a", task("b", &log).depends_on(["x"]));

    assert_eq!(scheduler.size(), 1);
    assert_eq!(scheduler.dependencies("a"), Some(&["x".to_string()][..]));

    // The replacement's callbacks run under the old name.
    scheduler.add("x", task("x", &log));
    let outcomes = tokio_test::block_on(scheduler.execute("x"));
    assert_eq!(common::names(&outcomes), vec!["x", "a"]);
    assert_eq!(outcomes[1].value().map(String::as_str), Some("b"));
}

#[test]
fn re_adding_resets_execution_state() {
    let log = journal();
    let mut scheduler = TaskScheduler::new();
    scheduler.add("a", task("a", &log));
    tokio_test::block_on(scheduler.execute("a"));
    assert_eq!(scheduler.is_executed("a"), Some(true));

    scheduler.add("a", task("a", &log));

    assert_eq!(scheduler.is_executed("a"), Some(false));
    assert_eq!(scheduler.is_running("a"), Some(false));
}

#[test]
fn remove_unknown_task_is_a_no_op() {
    let log = journal();
    let mut scheduler: TaskScheduler<String, String> = TaskScheduler::new();
    scheduler.remove("a");
    assert_eq!(scheduler.size(), 0);

    scheduler.add("a", task("a", &log));
    scheduler.remove("b");
    assert_eq!(scheduler.size(), 1);
}

#[test]
fn remove_drops_tasks_one_by_one() {
    let log = journal();
    let mut scheduler = TaskScheduler::new();
    scheduler.add("a", task("a", &log));
    scheduler.add("b", task("b", &log).depends_on(["a"]));

    scheduler.remove("a");
    assert_eq!(scheduler.size(), 1);
    assert!(!scheduler.contains("a"));

    scheduler.remove("b");
    assert_eq!(scheduler.size(), 0);
}

#[test]
fn remove_only_task() {
    let log = journal();
    let mut scheduler = TaskScheduler::new();
    scheduler.add("a", task("a", &log));

    scheduler.remove("a");

    assert_eq!(scheduler.size(), 0);
    assert_eq!(scheduler.names().count(), 0);
}

#[test]
fn check_depend_executed_unknown_task() {
    let scheduler: TaskScheduler<String, String> = TaskScheduler::new();
    assert!(!scheduler.check_depend_executed("a"));
}

#[test]
fn check_depend_executed_is_false_without_dependencies() {
    let log = journal();
    let mut scheduler = TaskScheduler::new();
    scheduler.add("a", task("a", &log));

    assert!(!scheduler.check_depend_executed("a"));

    tokio_test::block_on(scheduler.execute("a"));
    assert!(!scheduler.check_depend_executed("a"));
}

#[test]
fn check_depend_executed_tracks_dependency_state() {
    let log = journal();
    let mut scheduler = TaskScheduler::new();
    scheduler.add("a", task("a", &log));
    scheduler.add("b", task("b", &log).depends_on(["a"]));

    assert!(!scheduler.check_depend_executed("b"));

    tokio_test::block_on(scheduler.execute("a"));
    assert!(scheduler.check_depend_executed("b"));

    tokio_test::block_on(scheduler.revert("a"));
    assert!(!scheduler.check_depend_executed("b"));
}

#[test]
fn check_depend_executed_with_dangling_dependency() {
    let log = journal();
    let mut scheduler = TaskScheduler::new();
    scheduler.add("a", task("a", &log));
    scheduler.add("b", task("b", &log).depends_on(["a", "ghost"]));
    tokio_test::block_on(scheduler.execute("a"));

    assert!(!scheduler.check_depend_executed("b"));
    assert_eq!(scheduler.is_executed("b"), Some(false));
}

#[test]
fn check_depend_executed_never_runs_callbacks() {
    let log = journal();
    let mut scheduler = TaskScheduler::new();
    scheduler.add("a", task("a", &log));
    scheduler.add("b", task("b", &log).depends_on(["a"]));

    scheduler.check_depend_executed("b");

    assert!(common::entries(&log).is_empty());
}
