use snc_core::{Session, SncConfig, SovereignNeuromorphContract};

use crate::cli::args::{SessionArgs, SessionCmd};
use crate::cli::commands::require_session;
use crate::exit_codes;
use crate::output;

pub fn run(args: &SessionArgs, config: &SncConfig, json: bool) -> anyhow::Result<i32> {
    let mut session = match require_session(&config.session) {
        Ok(session) => session,
        Err(code) => return Ok(code),
    };

    let changed = match args.cmd {
        SessionCmd::Show => false,
        SessionCmd::GrantConsent => {
            session.grant_consent();
            true
        }
        SessionCmd::RevokeConsent => {
            session.revoke_consent();
            true
        }
        SessionCmd::ArmAbort => {
            session.arm_abort_control();
            true
        }
        SessionCmd::SurrenderAbort => {
            session.surrender_abort_control();
            true
        }
    };

    if changed {
        session.save(&config.session)?;
    }

    output::print_one(json, &session, |s| describe(s))?;
    Ok(exit_codes::SUCCESS)
}

fn describe(session: &Session) -> String {
    format!(
        "session {} subject='{}' consent={} abort_control={} discipline_reviewed={}",
        session.id,
        session.subject,
        session.has_explicit_consent(),
        session.has_sovereign_abort_control(),
        session.is_discipline_personalized_and_non_coercive()
    )
}
