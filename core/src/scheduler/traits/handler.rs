use std::future::Future;

use async_trait::async_trait;

/// User side of a task: the work to do and how to undo it.
///
/// Both methods may suspend. The scheduler never runs two callbacks at the
/// same time and awaits each one to completion before touching the next task.
#[async_trait]
pub trait TaskHandler<T, E>: Send + Sync {
    /// Perform the task. Called at most once per episode.
    async fn execute(&self) -> Result<T, E>;

    /// Undo what `execute` did. Only called on executed tasks.
    async fn revert(&self) -> Result<T, E>;
}

/// Adapter turning two async closures into a [`TaskHandler`].
pub struct FnHandler<X, R> {
    execute: X,
    revert: R,
}

impl<X, R> FnHandler<X, R> {
    pub fn new(execute: X, revert: R) -> Self {
        Self { execute, revert }
    }
}

#[async_trait]
impl<T, E, X, XF, R, RF> TaskHandler<T, E> for FnHandler<X, R>
where
    T: Send + 'static,
    E: Send + 'static,
    X: Fn() -> XF + Send + Sync + 'static,
    XF: Future<Output = Result<T, E>> + Send + 'static,
    R: Fn() -> RF + Send + Sync + 'static,
    RF: Future<Output = Result<T, E>> + Send + 'static,
{
    async fn execute(&self) -> Result<T, E> {
        (self.execute)().await
    }

    async fn revert(&self) -> Result<T, E> {
        (self.revert)().await
    }
}
