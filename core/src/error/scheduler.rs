use thiserror::Error;

/// Error carried by a single task outcome.
///
/// `E` is the error type of the task callbacks. Callback errors are passed
/// through untouched in [`TaskError::Callback`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError<E> {
    #[error(
        "Task execution failed: '{task}' dependencies are not completed (pending: {})",
        .pending.join(", ")
    )]
    DependenciesNotSatisfied { task: String, pending: Vec<String> },

    #[error("{0}")]
    Callback(E),
}

impl<E> TaskError<E> {
    /// The callback error, if this failure came from user code.
    pub fn callback(&self) -> Option<&E> {
        match self {
            Self::Callback(err) => Some(err),
            Self::DependenciesNotSatisfied { .. } => None,
        }
    }

    pub fn is_dependency_failure(&self) -> bool {
        matches!(self, Self::DependenciesNotSatisfied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_failure_lists_pending_names() {
        let err: TaskError<String> = TaskError::DependenciesNotSatisfied {
            task: "bundle".into(),
            pending: vec!["compile".into(), "lint".into()],
        };

        assert_eq!(
            err.to_string(),
            "Task execution failed: 'bundle' dependencies are not completed (pending: compile, lint)"
        );
        assert!(err.is_dependency_failure());
        assert_eq!(err.callback(), None);
    }

    #[test]
    fn callback_error_is_displayed_verbatim() {
        let err = TaskError::Callback("disk full".to_string());

        assert_eq!(err.to_string(), "disk full");
        assert_eq!(err.callback().map(String::as_str), Some("disk full"));
    }
}
