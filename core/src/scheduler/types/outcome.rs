use crate::error::TaskError;

/// One entry of the list returned by `execute` / `revert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome<T, E> {
    pub name: String,
    pub result: Result<T, TaskError<E>>,
}

impl<T, E> TaskOutcome<T, E> {
    pub fn ok(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            result: Ok(value),
        }
    }

    pub fn failed(name: impl Into<String>, error: TaskError<E>) -> Self {
        Self {
            name: name.into(),
            result: Err(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&TaskError<E>> {
        self.result.as_ref().err()
    }
}
