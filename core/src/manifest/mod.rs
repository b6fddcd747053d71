//! TOML task manifests.
//!
//! ```toml
//! [[task]]
//! name = "compile"
//! run = "tsc"
//!
//! [[task]]
//! name = "bundle"
//! run = "esbuild ./source/index.ts --bundle --outfile=./build/index.mjs"
//! revert = "rm -f ./build/index.mjs"
//! depends = ["compile"]
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ShellConfig;
use crate::error::{ManifestError, ShellError};
use crate::scheduler::{TaskHandler, TaskOptions, TaskScheduler};
use crate::shell::{ShellOutput, ShellTask};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,

    /// Command run on execute.
    pub run: String,

    /// Command run on revert. Reverting succeeds without running anything when unset.
    #[serde(default)]
    pub revert: Option<String>,

    #[serde(default, alias = "dependencies")]
    pub depends: Vec<String>,

    #[serde(default)]
    pub workdir: Option<String>,
}

impl FromStr for Manifest {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let manifest: Manifest = toml::from_str(s)?;
        manifest.validate()?;
        Ok(manifest)
    }
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let s = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.display().to_string(),
            source,
        })?;
        s.parse()
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        for (index, task) in self.tasks.iter().enumerate() {
            if task.name.trim().is_empty() {
                return Err(ManifestError::EmptyName { index });
            }
            if !seen.insert(task.name.as_str()) {
                return Err(ManifestError::DuplicateTask(task.name.clone()));
            }
            if task.run.trim().is_empty() {
                return Err(ManifestError::EmptyCommand(task.name.clone()));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TaskSpec> {
        self.tasks.iter().find(|task| task.name == name)
    }

    /// Tasks without dependencies, in file order.
    pub fn roots(&self) -> impl Iterator<Item = &TaskSpec> {
        self.tasks.iter().filter(|task| task.depends.is_empty())
    }

    /// `(task, dependency)` pairs naming a dependency no task in the manifest provides.
    ///
    /// Such tasks are still registered; they just never become ready.
    pub fn dangling_dependencies(&self) -> Vec<(String, String)> {
        let names: HashSet<&str> = self.tasks.iter().map(|task| task.name.as_str()).collect();
        self.tasks
            .iter()
            .flat_map(|task| {
                task.depends
                    .iter()
                    .filter(|dep| !names.contains(dep.as_str()))
                    .map(|dep| (task.name.clone(), dep.clone()))
            })
            .collect()
    }

    /// Add every task to `scheduler` as a [`ShellTask`].
    pub fn register(
        &self,
        scheduler: &mut TaskScheduler<ShellOutput, ShellError>,
        shell: &ShellConfig,
    ) {
        for entry in &self.tasks {
            let mut task = ShellTask::new(entry.run.clone(), entry.revert.clone(), shell.clone());
            if let Some(dir) = &entry.workdir {
                task = task.with_workdir(dir);
            }
            let handler: Arc<dyn TaskHandler<ShellOutput, ShellError>> = Arc::new(task);
            scheduler.add(
                &entry.name,
                TaskOptions::new(handler).depends_on(entry.depends.iter().cloned()),
            );
        }
    }
}
