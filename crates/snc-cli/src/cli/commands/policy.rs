use serde::Serialize;
use snc_core::{DisciplinePolicy, PolicyError, SncConfig};

use crate::cli::args::{PolicyArgs, PolicyCmd, PolicyValidateArgs};
use crate::exit_codes;
use crate::output;

pub fn run(args: &PolicyArgs, config: &SncConfig, json: bool) -> anyhow::Result<i32> {
    match &args.cmd {
        PolicyCmd::Validate(validate) => run_validate(validate, config, json),
    }
}

#[derive(Serialize)]
struct PolicyReport {
    subject: String,
    valid: bool,
    objectives: usize,
    signals: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

fn run_validate(args: &PolicyValidateArgs, config: &SncConfig, json: bool) -> anyhow::Result<i32> {
    let path = args.policy.as_ref().unwrap_or(&config.policy);
    let policy = match DisciplinePolicy::load(path) {
        Ok(policy) => policy,
        Err(err @ (PolicyError::Io { .. } | PolicyError::Parse { .. })) => {
            eprintln!("error: {err}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(exit_codes::RUNTIME_ERROR);
        }
    };

    let (valid, reason) = match policy.validate() {
        Ok(()) => (true, None),
        Err(err) => (false, Some(err.to_string())),
    };
    let report = PolicyReport {
        subject: policy.subject.clone(),
        valid,
        objectives: policy.objectives.len(),
        signals: policy.signals.len(),
        reason,
    };

    let code = if report.valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::VIOLATION
    };
    output::print_one(json, &report, |r| {
        if r.valid {
            format!(
                "policy for '{}' passes review: {} signal(s) bound to {} objective(s)",
                r.subject, r.signals, r.objectives
            )
        } else {
            format!(
                "policy for '{}' rejected: {}",
                r.subject,
                r.reason.as_deref().unwrap_or("unspecified")
            )
        }
    })?;
    Ok(code)
}
