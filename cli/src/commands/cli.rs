use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cascade", version, about = "Run dependency-ordered shell tasks")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Path to the task manifest (TOML).
    pub manifest: PathBuf,

    /// Task to start the cascade from. Can be specified multiple times.
    /// Defaults to every task without dependencies, in file order.
    #[arg(long = "task", action = clap::ArgAction::Append)]
    pub tasks: Vec<String>,

    /// Revert the start tasks (and their dependents) once the run is done.
    #[arg(long, default_value_t = false)]
    pub revert: bool,

    /// Print a JSON summary instead of one line per task.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListArgs {
    pub manifest: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Run(RunArgs),
    List(ListArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_collects_repeated_tasks() {
        let args = Args::try_parse_from([
            "cascade", "run", "build.toml", "--task", "compile", "--task", "docs", "--json",
        ])
        .unwrap();

        match args.command {
            Commands::Run(run) => {
                assert_eq!(run.manifest, PathBuf::from("build.toml"));
                assert_eq!(run.tasks, vec!["compile", "docs"]);
                assert!(run.json);
                assert!(!run.revert);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn list_requires_a_manifest() {
        assert!(Args::try_parse_from(["cascade", "list"]).is_err());
    }
}
