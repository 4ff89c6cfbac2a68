use snc_core::{gate, DisciplinePolicy, PolicyError, SncConfig, VerdictStatus};
use snc_ledger::{append_deed, DeedEvent};

use crate::cli::args::CheckArgs;
use crate::cli::commands::require_session;
use crate::exit_codes;
use crate::output;

pub fn run(args: &CheckArgs, config: &SncConfig, json: bool) -> anyhow::Result<i32> {
    let mut session = match require_session(&config.session) {
        Ok(session) => session,
        Err(code) => return Ok(code),
    };

    // The discipline posture is re-reviewed from the policy file on every
    // check; a stale session flag never carries an operation.
    match DisciplinePolicy::load(&config.policy) {
        Ok(policy) => {
            let reviewed =
                policy.subject == session.subject && policy.is_personalized_and_non_coercive();
            if session.discipline_non_coercive != reviewed {
                session.set_discipline_non_coercive(reviewed);
                session.save(&config.session)?;
            }
        }
        Err(PolicyError::Io { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    }

    let verdict = gate::evaluate(&session);

    if args.record {
        let blocked = verdict.status == VerdictStatus::Blocked;
        let description = format!(
            "operation '{}' {} ({})",
            args.operation,
            if blocked { "blocked" } else { "allowed" },
            verdict.reason_code
        );
        append_deed(&config.ledger, DeedEvent::new("contract-gate", description))?;
    }

    let code = match verdict.status {
        VerdictStatus::Allowed => exit_codes::SUCCESS,
        VerdictStatus::Blocked => exit_codes::VIOLATION,
    };

    output::print_one(json, &verdict, |v| match v.status {
        VerdictStatus::Allowed => format!("allowed: {}", v.reason_code),
        VerdictStatus::Blocked => format!(
            "blocked: {} ({})",
            v.reason_code,
            v.details
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("contract query failed")
        ),
    })?;
    Ok(code)
}
