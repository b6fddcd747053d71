//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `cascade_core::api` instead of reaching into internal modules.

pub use crate::config::{load_default, load_from, AppConfig, LoggingConfig, ShellConfig};
pub use crate::error::{CliError, ManifestError, ShellError, TaskError};
pub use crate::manifest::{Manifest, TaskSpec};
pub use crate::scheduler::{
    CascadeReport, EventSink, FnHandler, RecordingSink, ReportEntry, SchedulerEvent,
    TaskHandler, TaskOptions, TaskOutcome, TaskScheduler, TracingSink,
};
pub use crate::shell::{ShellOutput, ShellTask};
