#[allow(clippy::module_inception)]
pub mod error;
pub mod scheduler;
pub mod shell;

pub use error::{CliError, ManifestError};
pub use scheduler::TaskError;
pub use shell::ShellError;
