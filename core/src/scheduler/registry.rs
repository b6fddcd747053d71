use std::collections::HashMap;

use super::types::{TaskOptions, TaskRecord};

/// Task records plus the reverse dependency index.
pub(crate) struct Registry<T, E> {
    /// Task nodes: name -> record
    tasks: HashMap<String, TaskRecord<T, E>>,

    /// Reverse edges: name -> registered tasks that declare it as a dependency,
    /// in registration order. Empty buckets are removed.
    dependents: HashMap<String, Vec<String>>,
}

impl<T, E> Default for Registry<T, E> {
    fn default() -> Self {
        Self {
            tasks: HashMap::new(),
            dependents: HashMap::new(),
        }
    }
}

impl<T, E> Registry<T, E> {
    /// Register `name`, replacing any previous record of the same name.
    ///
    /// Returns `true` when a previous record was replaced.
    pub fn insert(&mut self, name: &str, options: TaskOptions<T, E>) -> bool {
        let replaced = self.remove(name).is_some();
        let record = TaskRecord::new(name.to_string(), options);

        for dep in &record.dependencies {
            self.dependents
                .entry(dep.clone())
                .or_default()
                .push(name.to_string());
        }

        self.tasks.insert(name.to_string(), record);
        replaced
    }

    pub fn remove(&mut self, name: &str) -> Option<TaskRecord<T, E>> {
        let record = self.tasks.remove(name)?;

        // One bucket entry was added per declared dependency, duplicates included.
        for dep in &record.dependencies {
            if let Some(bucket) = self.dependents.get_mut(dep) {
                if let Some(pos) = bucket.iter().position(|dependent| dependent == name) {
                    bucket.remove(pos);
                }
                if bucket.is_empty() {
                    self.dependents.remove(dep);
                }
            }
        }

        Some(record)
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.dependents.clear();
    }

    pub fn get(&self, name: &str) -> Option<&TaskRecord<T, E>> {
        self.tasks.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TaskRecord<T, E>> {
        self.tasks.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    /// Snapshot of the tasks that declare `name` as a dependency.
    pub fn dependents_of(&self, name: &str) -> Vec<String> {
        self.dependents.get(name).cloned().unwrap_or_default()
    }

    pub fn is_executed(&self, name: &str) -> bool {
        self.tasks.get(name).is_some_and(|task| task.executed)
    }

    /// Dependencies of `task` that are unregistered or not yet executed,
    /// in declaration order.
    pub fn pending_dependencies(&self, task: &TaskRecord<T, E>) -> Vec<String> {
        task.dependencies
            .iter()
            .filter(|dep| !self.is_executed(dep))
            .cloned()
            .collect()
    }

    /// Whether every dependency of `name` resolves to an executed task.
    ///
    /// Unregistered tasks and unregistered dependencies both answer `false`.
    pub fn dependencies_satisfied(&self, name: &str) -> bool {
        self.tasks.get(name).is_some_and(|task| {
            task.dependencies
                .iter()
                .all(|dep| self.is_executed(dep))
        })
    }

    #[cfg(test)]
    fn bucket(&self, name: &str) -> Option<&Vec<String>> {
        self.dependents.get(name)
    }
}
