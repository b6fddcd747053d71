use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit code for an error that aborted the command.
    ///
    /// Task failures are not errors at this level: they are reported per
    /// outcome and turned into exit code 1 by the command itself.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 11,
            Self::Manifest(_) => 12,
            Self::Logging(_) => 13,
            Self::Io(_) => 20,
            Self::Output(_) => 20,
            Self::Anyhow(_) => 50,
        }
    }
}

/// Failures while reading or validating a task manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("cannot read manifest {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("task #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("duplicate task name: {0}")]
    DuplicateTask(String),

    #[error("task '{0}' has an empty `run` command")]
    EmptyCommand(String),
}
