use std::sync::Arc;

use crate::error::TaskError;

use super::registry::Registry;
use super::traits::{EventSink, SchedulerEvent, TracingSink};
use super::types::{TaskOptions, TaskOutcome};

/// Dependency-ordered task scheduler.
///
/// Tasks are registered by name with a list of prerequisite names. Executing a
/// task cascades to every dependent whose prerequisites are all executed;
/// reverting a task cascades to every task that depends on it. Cascades are
/// depth first and sequential: a dependent (and everything it triggers) is
/// finished before its next sibling is looked at.
///
/// All mutating operations take `&mut self`, so registry maintenance can never
/// interleave with an in-flight cascade.
pub struct TaskScheduler<T, E> {
    registry: Registry<T, E>,
    sink: Arc<dyn EventSink>,
}

/// Pending dependents of a task that finished its transition.
struct Frame {
    dependents: std::vec::IntoIter<String>,
}

impl Frame {
    fn new(dependents: Vec<String>) -> Self {
        Self {
            dependents: dependents.into_iter(),
        }
    }

    fn next_dependent(&mut self) -> Option<String> {
        self.dependents.next()
    }
}

impl<T, E> Default for TaskScheduler<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> TaskScheduler<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    pub fn with_sink(sink: Arc<dyn EventSink>) -> Self {
        Self {
            registry: Registry::default(),
            sink,
        }
    }

    /// Drop every task. Callbacks are not invoked.
    pub fn close(mut self) {
        tracing::debug!(
            "closing scheduler with {} task(s), sink '{}'",
            self.registry.len(),
            self.sink.name()
        );
        self.registry.clear();
    }

    /// Number of registered tasks.
    pub fn size(&self) -> usize {
        self.registry.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.names()
    }

    /// `None` when `name` is not registered.
    pub fn is_executed(&self, name: &str) -> Option<bool> {
        self.registry.get(name).map(|task| task.executed)
    }

    /// `None` when `name` is not registered.
    pub fn is_running(&self, name: &str) -> Option<bool> {
        self.registry.get(name).map(|task| task.running)
    }

    pub fn dependencies(&self, name: &str) -> Option<&[String]> {
        self.registry
            .get(name)
            .map(|task| task.dependencies.as_slice())
    }

    /// Register a task, replacing (and resetting) any task of the same name.
    ///
    /// Dependencies do not have to be registered yet.
    pub fn add(&mut self, name: &str, options: TaskOptions<T, E>) {
        let replaced = self.registry.insert(name, options);
        self.sink.emit(&SchedulerEvent::TaskAdded {
            task: name.to_string(),
            replaced,
        });
    }

    /// Unregister a task. Tasks depending on it are left as they are and can
    /// no longer become ready until a task of that name is added again.
    pub fn remove(&mut self, name: &str) {
        if let Some(record) = self.registry.remove(name) {
            self.sink
                .emit(&SchedulerEvent::TaskRemoved { task: record.name });
        }
    }

    /// Whether every declared dependency of `name` has executed.
    ///
    /// Always `false` for unknown tasks and for tasks without dependencies;
    /// meant for callers inserting a task into a partially executed graph.
    pub fn check_depend_executed(&self, name: &str) -> bool {
        match self.registry.get(name) {
            Some(task) if !task.dependencies.is_empty() => {
                self.registry.dependencies_satisfied(name)
            }
            _ => false,
        }
    }

    /// Execute `name`, then every dependent that becomes ready, depth first.
    ///
    /// Never fails as a whole: failures are recorded in the returned outcomes
    /// and stop the cascade below the failing task only. An empty list means
    /// either that nothing had to run or that `name` is unknown.
    pub async fn execute(&mut self, name: &str) -> Vec<TaskOutcome<T, E>> {
        let mut outcomes = Vec::new();
        let mut frames = Vec::new();

        if let Some(frame) = self.execute_one(name, &mut outcomes).await {
            frames.push(frame);
        }

        while let Some(frame) = frames.last_mut() {
            let Some(dependent) = frame.next_dependent() else {
                frames.pop();
                continue;
            };

            // Evaluated now, after earlier siblings finished their own cascades.
            if !self.registry.dependencies_satisfied(&dependent) {
                continue;
            }

            if let Some(next) = self.execute_one(&dependent, &mut outcomes).await {
                frames.push(next);
            }
        }

        outcomes
    }

    /// Revert `name`, then every task depending on it, depth first.
    ///
    /// A failed revert keeps the task (and everything below it) executed.
    pub async fn revert(&mut self, name: &str) -> Vec<TaskOutcome<T, E>> {
        let mut outcomes = Vec::new();
        let mut frames = Vec::new();

        if let Some(frame) = self.revert_one(name, &mut outcomes).await {
            frames.push(frame);
        }

        while let Some(frame) = frames.last_mut() {
            let Some(dependent) = frame.next_dependent() else {
                frames.pop();
                continue;
            };

            if let Some(next) = self.revert_one(&dependent, &mut outcomes).await {
                frames.push(next);
            }
        }

        outcomes
    }

    /// Run the gates and the execute callback of a single task.
    ///
    /// Returns the dependents to visit when the task executed successfully.
    async fn execute_one(
        &mut self,
        name: &str,
        outcomes: &mut Vec<TaskOutcome<T, E>>,
    ) -> Option<Frame> {
        let Some(task) = self.registry.get(name) else {
            self.sink.emit(&SchedulerEvent::UnknownTask {
                task: name.to_string(),
            });
            return None;
        };

        let pending = self.registry.pending_dependencies(task);
        if !pending.is_empty() {
            self.sink.emit(&SchedulerEvent::DependenciesPending {
                task: name.to_string(),
                pending: pending.clone(),
            });
            outcomes.push(TaskOutcome::failed(
                name,
                TaskError::DependenciesNotSatisfied {
                    task: name.to_string(),
                    pending,
                },
            ));
            return None;
        }

        if task.executed || task.running {
            return None;
        }

        let handler = Arc::clone(&task.handler);
        self.set_state(name, true, false);
        self.sink.emit(&SchedulerEvent::TaskStarted {
            task: name.to_string(),
        });

        match handler.execute().await {
            Ok(value) => {
                outcomes.push(TaskOutcome::ok(name, value));
                self.set_state(name, false, true);
                self.sink.emit(&SchedulerEvent::TaskExecuted {
                    task: name.to_string(),
                });
                Some(Frame::new(self.registry.dependents_of(name)))
            }
            Err(err) => {
                // `running` stays set: the task is stuck until it is re-added.
                outcomes.push(TaskOutcome::failed(name, TaskError::Callback(err)));
                self.sink.emit(&SchedulerEvent::ExecuteFailed {
                    task: name.to_string(),
                });
                None
            }
        }
    }

    async fn revert_one(
        &mut self,
        name: &str,
        outcomes: &mut Vec<TaskOutcome<T, E>>,
    ) -> Option<Frame> {
        let handler = match self.registry.get(name) {
            Some(task) if task.executed => Arc::clone(&task.handler),
            _ => return None,
        };

        match handler.revert().await {
            Ok(value) => {
                outcomes.push(TaskOutcome::ok(name, value));
                self.set_state(name, false, false);
                self.sink.emit(&SchedulerEvent::TaskReverted {
                    task: name.to_string(),
                });
                Some(Frame::new(self.registry.dependents_of(name)))
            }
            Err(err) => {
                outcomes.push(TaskOutcome::failed(name, TaskError::Callback(err)));
                self.sink.emit(&SchedulerEvent::RevertFailed {
                    task: name.to_string(),
                });
                None
            }
        }
    }

    fn set_state(&mut self, name: &str, running: bool, executed: bool) {
        if let Some(task) = self.registry.get_mut(name) {
            task.running = running;
            task.executed = executed;
        }
    }
}
