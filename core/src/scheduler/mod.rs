//! Dependency-ordered task scheduler with cascading execute and revert.
//!
//! # Architecture
//!
//! ```text
//! add(name, TaskOptions { dependencies, handler })
//!   ↓
//! Registry { tasks: name -> TaskRecord, dependents: name -> [dependent names] }
//!   ↓
//! execute(name) → gates → handler.execute() → dependents whose deps are all executed
//!   ↓                                           (depth first, bucket order)
//! Vec<TaskOutcome>
//!
//! revert(name) → handler.revert() → every dependent, depth first
//! ```
//!
//! Callbacks are async. The scheduler awaits them one at a time and never
//! spawns work of its own; there is no up-front topological sort and no cycle
//! detection.

mod engine;
mod registry;
pub mod report;
pub mod traits;
pub mod types;

pub use engine::TaskScheduler;
pub use report::{CascadeReport, ReportEntry};
pub use traits::{EventSink, FnHandler, RecordingSink, SchedulerEvent, TaskHandler, TracingSink};
pub use types::{TaskOptions, TaskOutcome};
