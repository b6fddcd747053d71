use std::collections::HashSet;

use cascade_core::api::{CliError, Manifest};

use super::cli::ListArgs;

pub fn list(args: ListArgs) -> Result<i32, CliError> {
    let manifest = Manifest::load(&args.manifest)?;
    for line in render(&manifest) {
        println!("{line}");
    }
    Ok(0)
}

/// One line per task: `name`, or `name <- dep, dep` with unknown names flagged.
pub fn render(manifest: &Manifest) -> Vec<String> {
    let dangling: HashSet<(String, String)> =
        manifest.dangling_dependencies().into_iter().collect();

    manifest
        .tasks
        .iter()
        .map(|task| {
            if task.depends.is_empty() {
                return task.name.clone();
            }
            let deps: Vec<String> = task
                .depends
                .iter()
                .map(|dep| {
                    if dangling.contains(&(task.name.clone(), dep.clone())) {
                        format!("{dep} (missing)")
                    } else {
                        dep.clone()
                    }
                })
                .collect();
            format!("{} <- {}", task.name, deps.join(", "))
        })
        .collect()
}
