use std::path::{Path, PathBuf};

use serde::Serialize;
use snc_core::{DisciplinePolicy, DisciplineSignal, Session, SncConfig};

use crate::cli::args::InitArgs;
use crate::exit_codes;
use crate::output;

#[derive(Serialize, Default)]
struct InitReport {
    created: Vec<PathBuf>,
    skipped: Vec<PathBuf>,
}

pub fn run(
    args: &InitArgs,
    config_path: &Path,
    config: &SncConfig,
    json: bool,
) -> anyhow::Result<i32> {
    let mut report = InitReport::default();

    write_if_missing(config_path, &serde_yaml::to_string(config)?, &mut report)?;

    let session = Session::new(&args.subject);
    write_if_missing(
        &config.session,
        &serde_yaml::to_string(&session)?,
        &mut report,
    )?;

    let policy = starter_policy(&args.subject);
    write_if_missing(&config.policy, &serde_yaml::to_string(&policy)?, &mut report)?;

    if json {
        output::print_one(true, &report, |_| String::new())?;
    } else {
        for path in &report.created {
            println!("created {}", path.display());
        }
        for path in &report.skipped {
            println!("skipped {} (exists)", path.display());
        }
        println!(
            "session ready for '{}': grant consent and arm abort control before checking",
            args.subject
        );
    }
    Ok(exit_codes::SUCCESS)
}

// Starter policy: bounded, labeled, bound to concrete objectives.
fn starter_policy(subject: &str) -> DisciplinePolicy {
    DisciplinePolicy {
        subject: subject.to_string(),
        objectives: vec![
            "gait-stability".to_string(),
            "impulse-regulation".to_string(),
        ],
        signals: vec![DisciplineSignal {
            label: "discomfort".to_string(),
            intensity: 0.2,
            objective: "gait-stability".to_string(),
        }],
        punitive_use: false,
    }
}

fn write_if_missing(path: &Path, contents: &str, report: &mut InitReport) -> anyhow::Result<()> {
    if path.exists() {
        report.skipped.push(path.to_path_buf());
    } else {
        std::fs::write(path, contents)
            .map_err(|e| anyhow::anyhow!("failed to write {}: {}", path.display(), e))?;
        report.created.push(path.to_path_buf());
    }
    Ok(())
}
