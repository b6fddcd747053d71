use thiserror::Error;

/// Errors raised while running a shell-backed task.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("spawn failed for `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("reading output of `{command}` failed: {source}")]
    Io {
        command: String,
        source: std::io::Error,
    },

    /// `stdout` and `stderr` hold the captured tails of both streams.
    #[error("`{command}` exited with code {code}{}", output_suffix(.stdout, .stderr))]
    NonZeroExit {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },
}

impl ShellError {
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. } => command,
            Self::Io { command, .. } => command,
            Self::NonZeroExit { command, .. } => command,
        }
    }
}

fn output_suffix(stdout: &str, stderr: &str) -> String {
    let parts: Vec<&str> = [stdout.trim(), stderr.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!(": {}", parts.join("\n"))
    }
}
