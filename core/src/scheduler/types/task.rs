use std::future::Future;
use std::sync::Arc;

use crate::scheduler::traits::{FnHandler, TaskHandler};

/// Registration options for a task: what it waits for and what it does.
pub struct TaskOptions<T, E> {
    pub dependencies: Vec<String>,
    pub handler: Arc<dyn TaskHandler<T, E>>,
}

impl<T, E> TaskOptions<T, E> {
    pub fn new(handler: Arc<dyn TaskHandler<T, E>>) -> Self {
        Self {
            dependencies: Vec::new(),
            handler,
        }
    }

    /// Build options from a pair of async closures.
    ///
    /// ```
    /// use cascade_core::scheduler::TaskOptions;
    ///
    /// let opts: TaskOptions<&str, String> = TaskOptions::from_fns(
    ///     || async { Ok("built") },
    ///     || async { Ok("cleaned") },
    /// )
    /// .depends_on(["compile"]);
    ///
    /// assert_eq!(opts.dependencies, vec!["compile".to_string()]);
    /// ```
    pub fn from_fns<X, XF, R, RF>(execute: X, revert: R) -> Self
    where
        T: Send + 'static,
        E: Send + 'static,
        X: Fn() -> XF + Send + Sync + 'static,
        XF: Future<Output = Result<T, E>> + Send + 'static,
        R: Fn() -> RF + Send + Sync + 'static,
        RF: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::new(Arc::new(FnHandler::new(execute, revert)))
    }

    pub fn depends_on<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }
}

/// Registry entry. Owned exclusively by the scheduler.
pub(crate) struct TaskRecord<T, E> {
    pub name: String,
    pub executed: bool,
    pub running: bool,
    pub dependencies: Vec<String>,
    pub handler: Arc<dyn TaskHandler<T, E>>,
}

impl<T, E> TaskRecord<T, E> {
    pub fn new(name: String, options: TaskOptions<T, E>) -> Self {
        Self {
            name,
            executed: false,
            running: false,
            dependencies: options.dependencies,
            handler: options.handler,
        }
    }
}
