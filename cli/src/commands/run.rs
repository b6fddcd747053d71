use cascade_core::api::{
    CascadeReport, CliError, Manifest, ShellConfig, ShellError, ShellOutput, TaskOutcome,
    TaskScheduler,
};
use serde::Serialize;

use super::cli::RunArgs;

/// Everything a single `cascade run` produced.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub executed: CascadeReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverted: Option<CascadeReport>,
    pub pending: Vec<PendingTask>,
}

/// A task still unexecuted once the execute phase finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingTask {
    pub name: String,
    /// `check_depend_executed` for the task at that point.
    pub dependencies_executed: bool,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.executed.is_success()
            && self
                .reverted
                .as_ref()
                .map_or(true, CascadeReport::is_success)
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

pub async fn run(args: RunArgs, shell: &ShellConfig, run_id: &str) -> Result<i32, CliError> {
    let manifest = Manifest::load(&args.manifest)?;
    for (task, dep) in manifest.dangling_dependencies() {
        tracing::warn!("task '{}' depends on unknown task '{}'", task, dep);
    }

    let summary = run_manifest(&manifest, &args, shell, run_id, !args.json).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for task in &summary.pending {
            println!(
                "… {} pending (dependencies executed: {})",
                task.name, task.dependencies_executed
            );
        }
    }

    tracing::info!(
        "run finished: {} executed, {} failed",
        summary.executed.succeeded().count(),
        summary.executed.failed().count()
    );
    Ok(summary.exit_code())
}

/// Execute the start tasks of `manifest`, then optionally revert them.
///
/// Start tasks are `args.tasks`, or the manifest roots when none are given.
pub async fn run_manifest(
    manifest: &Manifest,
    args: &RunArgs,
    shell: &ShellConfig,
    run_id: &str,
    echo: bool,
) -> RunSummary {
    let mut scheduler = TaskScheduler::new();
    manifest.register(&mut scheduler, shell);

    let start: Vec<String> = if args.tasks.is_empty() {
        manifest.roots().map(|task| task.name.clone()).collect()
    } else {
        args.tasks.clone()
    };
    tracing::debug!("start tasks: {:?}", start);

    let mut executed = CascadeReport::default();
    for name in &start {
        let outcomes = scheduler.execute(name).await;
        if echo {
            print_outcomes(&outcomes);
        }
        executed.extend(&outcomes);
    }

    let pending = manifest
        .tasks
        .iter()
        .filter(|task| scheduler.is_executed(&task.name) == Some(false))
        .map(|task| PendingTask {
            name: task.name.clone(),
            dependencies_executed: scheduler.check_depend_executed(&task.name),
        })
        .collect();

    let reverted = if args.revert {
        let mut report = CascadeReport::default();
        for name in &start {
            let outcomes = scheduler.revert(name).await;
            if echo {
                print_outcomes(&outcomes);
            }
            report.extend(&outcomes);
        }
        Some(report)
    } else {
        None
    };

    scheduler.close();

    RunSummary {
        run_id: run_id.to_string(),
        executed,
        reverted,
        pending,
    }
}

fn print_outcomes(outcomes: &[TaskOutcome<ShellOutput, ShellError>]) {
    for outcome in outcomes {
        println!("{}", format_outcome(outcome));
    }
}

fn format_outcome(outcome: &TaskOutcome<ShellOutput, ShellError>) -> String {
    match &outcome.result {
        Ok(output) => format!("✔ {}: {}", outcome.name, output),
        Err(err) => format!("✘ {}: {}", outcome.name, err),
    }
}
