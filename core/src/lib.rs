//! Cascade core library.
//!
//! A registry of named tasks with prerequisite lists. A task executes only
//! after every prerequisite executed, and a successful execution cascades to
//! the dependents it unblocks. Reverting a task cascades to everything that
//! depends on it.
//!
//! - [`scheduler`] - registry, cascade execute / revert, event sinks
//! - [`manifest`] - TOML manifests of shell-command tasks
//! - [`shell`] - [`TaskHandler`](scheduler::TaskHandler) running shell commands
//! - [`config`] - logging and shell configuration
//! - [`error`] - error types
//!
//! ```
//! use cascade_core::scheduler::{TaskOptions, TaskScheduler};
//!
//! # tokio_test::block_on(async {
//! let mut scheduler: TaskScheduler<&str, String> = TaskScheduler::new();
//! scheduler.add("a", TaskOptions::from_fns(|| async { Ok("a") }, || async { Ok("a") }));
//! scheduler.add(
//!     "b",
//!     TaskOptions::from_fns(|| async { Ok("b") }, || async { Ok("b") }).depends_on(["a"]),
//! );
//!
//! let outcomes = scheduler.execute("a").await;
//! let names: Vec<_> = outcomes.iter().map(|o| o.name.as_str()).collect();
//! assert_eq!(names, ["a", "b"]);
//! # });
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod manifest;
pub mod scheduler;
pub mod shell;
