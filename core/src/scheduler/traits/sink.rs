use std::sync::Mutex;

/// State transitions observed by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent {
    TaskAdded {
        task: String,
        replaced: bool,
    },
    TaskRemoved {
        task: String,
    },
    /// `execute` was called with a name that is not registered.
    UnknownTask {
        task: String,
    },
    DependenciesPending {
        task: String,
        pending: Vec<String>,
    },
    TaskStarted {
        task: String,
    },
    TaskExecuted {
        task: String,
    },
    /// The execute callback failed; the task stays marked as running.
    ExecuteFailed {
        task: String,
    },
    TaskReverted {
        task: String,
    },
    RevertFailed {
        task: String,
    },
}

/// Receiver for scheduler diagnostics.
pub trait EventSink: Send + Sync {
    fn name(&self) -> &str;
    fn emit(&self, event: &SchedulerEvent);
}

/// Default sink: forwards every event to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    fn emit(&self, event: &SchedulerEvent) {
        match event {
            SchedulerEvent::TaskAdded { task, replaced } => {
                if *replaced {
                    tracing::debug!("task '{}' replaced", task);
                } else {
                    tracing::debug!("task '{}' added", task);
                }
            }
            SchedulerEvent::TaskRemoved { task } => tracing::debug!("task '{}' removed", task),
            SchedulerEvent::UnknownTask { task } => {
                tracing::warn!("Task execution failed: '{}' does not exist.", task)
            }
            SchedulerEvent::DependenciesPending { task, pending } => tracing::info!(
                "task '{}' is waiting on: {}",
                task,
                pending.join(", ")
            ),
            SchedulerEvent::TaskStarted { task } => tracing::trace!("task '{}' started", task),
            SchedulerEvent::TaskExecuted { task } => tracing::debug!("task '{}' executed", task),
            SchedulerEvent::ExecuteFailed { task } => {
                tracing::warn!("task '{}' failed and stays marked as running", task)
            }
            SchedulerEvent::TaskReverted { task } => tracing::debug!("task '{}' reverted", task),
            SchedulerEvent::RevertFailed { task } => {
                tracing::warn!("task '{}' failed to revert, dependents left untouched", task)
            }
        }
    }
}

/// Sink that keeps events in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SchedulerEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SchedulerEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drain the buffered events.
    pub fn take(&self) -> Vec<SchedulerEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn emit(&self, event: &SchedulerEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
