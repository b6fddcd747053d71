//! Tasks backed by shell commands.

use std::collections::VecDeque;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::scheduler::TaskHandler;

/// What a finished command left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellOutput {
    pub command: String,
    pub exit_code: i32,
    /// Tail of stdout, at most the configured capture size.
    pub stdout: String,
    /// Tail of stderr, at most the configured capture size.
    pub stderr: String,
    pub duration_ms: u64,
}

impl ShellOutput {
    fn skipped() -> Self {
        Self {
            command: String::new(),
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
            duration_ms: 0,
        }
    }
}

impl fmt::Display for ShellOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stdout = self.stdout.trim_end();
        if stdout.is_empty() {
            write!(f, "exit {} in {}ms", self.exit_code, self.duration_ms)
        } else {
            write!(f, "{stdout}")
        }
    }
}

/// A task whose execute and revert steps are shell commands.
#[derive(Debug, Clone)]
pub struct ShellTask {
    run: String,
    revert: Option<String>,
    workdir: Option<PathBuf>,
    shell: ShellConfig,
}

impl ShellTask {
    pub fn new(run: impl Into<String>, revert: Option<String>, shell: ShellConfig) -> Self {
        Self {
            run: run.into(),
            revert,
            workdir: None,
            shell,
        }
    }

    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    async fn run_command(&self, command: &str) -> Result<ShellOutput, ShellError> {
        tracing::debug!("running `{}` via {}", command, self.shell.program);
        let started = Instant::now();

        let mut cmd = Command::new(&self.shell.program);
        cmd.args(&self.shell.args)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| ShellError::Spawn {
            command: command.to_string(),
            source,
        })?;

        let cap = self.shell.capture_bytes;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (stdout, stderr, status) =
            tokio::join!(drain(stdout, cap), drain(stderr, cap), child.wait());
        let io_err = |source| ShellError::Io {
            command: command.to_string(),
            source,
        };
        let stdout = stdout.map_err(io_err)?;
        let stderr = stderr.map_err(io_err)?;
        let status = status.map_err(io_err)?;

        // Killed by a signal when there is no code.
        let exit_code = status.code().unwrap_or(-1);
        if !status.success() {
            return Err(ShellError::NonZeroExit {
                command: command.to_string(),
                code: exit_code,
                stdout,
                stderr,
            });
        }

        if !stderr.trim().is_empty() {
            tracing::debug!("`{}` wrote to stderr: {}", command, stderr.trim_end());
        }

        Ok(ShellOutput {
            command: command.to_string(),
            exit_code,
            stdout,
            stderr,
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }
}

#[async_trait]
impl TaskHandler<ShellOutput, ShellError> for ShellTask {
    async fn execute(&self) -> Result<ShellOutput, ShellError> {
        self.run_command(&self.run).await
    }

    async fn revert(&self) -> Result<ShellOutput, ShellError> {
        match &self.revert {
            Some(command) => self.run_command(command).await,
            None => Ok(ShellOutput::skipped()),
        }
    }
}

/// Keeps the last `cap` bytes pushed into it.
struct TailBuffer {
    bytes: VecDeque<u8>,
    cap: usize,
}

impl TailBuffer {
    fn new(cap: usize) -> Self {
        Self {
            bytes: VecDeque::with_capacity(cap.min(8192)),
            cap,
        }
    }

    fn push(&mut self, data: &[u8]) {
        let data = if data.len() > self.cap {
            &data[data.len() - self.cap..]
        } else {
            data
        };
        let overflow = (self.bytes.len() + data.len()).saturating_sub(self.cap);
        if overflow > 0 {
            self.bytes.drain(..overflow);
        }
        self.bytes.extend(data);
    }

    /// Lossy UTF-8 decode, dropping a character cut in half at the front.
    fn into_string(self) -> String {
        let bytes: Vec<u8> = self.bytes.into();
        let skip = bytes
            .iter()
            .take(3)
            .take_while(|b| (**b & 0b1100_0000) == 0b1000_0000)
            .count();
        String::from_utf8_lossy(&bytes[skip..]).into_owned()
    }
}

/// Read `reader` to the end, keeping only its last `cap` bytes.
async fn drain<R>(reader: Option<R>, cap: usize) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut tail = TailBuffer::new(cap);
    if let Some(mut reader) = reader {
        let mut chunk = [0u8; 8192];
        loop {
            let n = reader.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            tail.push(&chunk[..n]);
        }
    }
    Ok(tail.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tail(cap: usize, chunks: &[&[u8]]) -> String {
        let mut buffer = TailBuffer::new(cap);
        for chunk in chunks {
            buffer.push(chunk);
        }
        buffer.into_string()
    }

    #[test]
    fn tail_buffer_keeps_last_bytes() {
        assert_eq!(tail(3, &[b"hello"]), "llo");
        assert_eq!(tail(4, &[b"ab", b"cd", b"ef"]), "cdef");
        assert_eq!(tail(10, &[b"hi"]), "hi");
        assert_eq!(tail(0, &[b"hi"]), "");
    }

    #[test]
    fn tail_buffer_drops_split_character() {
        // "é" is two bytes; keeping 4 bytes of "héllo" cuts it in half.
        assert_eq!(tail(5, &["héllo".as_bytes()]), "éllo");
        assert_eq!(tail(4, &["héllo".as_bytes()]), "llo");
    }

    #[test]
    fn display_prefers_stdout() {
        let mut output = ShellOutput {
            command: "true".into(),
            exit_code: 0,
            stdout: "built\n".into(),
            stderr: String::new(),
            duration_ms: 4,
        };
        assert_eq!(output.to_string(), "built");

        output.stdout.clear();
        assert_eq!(output.to_string(), "exit 0 in 4ms");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn execute_captures_stdout() {
        let task = ShellTask::new("echo compiled", None, ShellConfig::default());

        let output = task.execute().await.unwrap();

        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout, "compiled\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_an_error() {
        let task = ShellTask::new("echo broken >&2; exit 3", None, ShellConfig::default());

        let err = task.execute().await.unwrap_err();

        match err {
            ShellError::NonZeroExit { code, stderr, .. } => {
                assert_eq!(code, 3);
                assert_eq!(stderr.trim(), "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_command_keeps_its_stdout() {
        let task = ShellTask::new(
            "echo 'src/index.ts(3,1): error TS2304'; exit 2",
            None,
            ShellConfig::default(),
        );

        let err = task.execute().await.unwrap_err();

        match &err {
            ShellError::NonZeroExit { code, stdout, .. } => {
                assert_eq!(*code, 2);
                assert_eq!(stdout, "src/index.ts(3,1): error TS2304\n");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err
            .to_string()
            .ends_with("exited with code 2: src/index.ts(3,1): error TS2304"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_command_keeps_its_stderr() {
        let task = ShellTask::new(
            "echo 'warning: deprecated' >&2; echo built",
            None,
            ShellConfig::default(),
        );

        let output = task.execute().await.unwrap();

        assert_eq!(output.stdout, "built\n");
        assert_eq!(output.stderr, "warning: deprecated\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn capture_is_bounded_while_reading() {
        let shell = ShellConfig {
            capture_bytes: 10,
            ..ShellConfig::default()
        };
        let task = ShellTask::new("seq 1 20000", None, shell);

        let output = task.execute().await.unwrap();

        assert_eq!(output.stdout, "999\n20000\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_shell_is_a_spawn_error() {
        let shell = ShellConfig {
            program: "/nonexistent/shell".into(),
            ..ShellConfig::default()
        };
        let task = ShellTask::new("true", None, shell);

        let err = task.execute().await.unwrap_err();

        assert!(matches!(err, ShellError::Spawn { .. }));
        assert_eq!(err.command(), "true");
    }

    #[tokio::test]
    async fn revert_without_command_is_a_no_op() {
        let task = ShellTask::new("true", None, ShellConfig::default());

        let output = task.revert().await.unwrap();

        assert_eq!(output.exit_code, 0);
        assert!(output.command.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn workdir_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let task = ShellTask::new("pwd", None, ShellConfig::default()).with_workdir(dir.path());

        let output = task.execute().await.unwrap();

        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(
            PathBuf::from(output.stdout.trim()).canonicalize().unwrap(),
            expected
        );
    }
}
