use serde::Serialize;
use snc_core::{compensation_for_denial, DecisionReason, ReversalGate, ReversalPetition, SncConfig};
use snc_ledger::{append_deed, DeedEvent, EthicsFlags, LifeHarmFlag};
use uuid::Uuid;

use crate::cli::args::{ReversalArgs, ReversalCmd, ReversalEvaluateArgs};
use crate::exit_codes;
use crate::output;

pub fn run(args: &ReversalArgs, config: &SncConfig, json: bool) -> anyhow::Result<i32> {
    match &args.cmd {
        ReversalCmd::Evaluate(eval) => evaluate(eval, config, json),
    }
}

#[derive(Serialize)]
struct Adjudication {
    decision: DecisionReason,
    granted: bool,
    compensation_mp: f64,
    deed: Uuid,
}

/// A denial is a successful adjudication; this command only fails on
/// unreadable petitions or ledger I/O.
fn evaluate(args: &ReversalEvaluateArgs, config: &SncConfig, json: bool) -> anyhow::Result<i32> {
    let raw = match std::fs::read_to_string(&args.request) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("error: failed to read {}: {err}", args.request.display());
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    let petition: ReversalPetition = match serde_yaml::from_str(&raw) {
        Ok(petition) => petition,
        Err(err) => {
            eprintln!("error: failed to parse {}: {err}", args.request.display());
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let decision = ReversalGate::evaluate(&petition.roles, &petition.conditions);
    let granted = decision.is_granted();
    let compensation = if granted {
        0.0
    } else {
        compensation_for_denial(petition.mp_debt)
    };

    let life_harm = petition.conditions.life_harm_flag;
    let description = petition.statement.clone().unwrap_or_else(|| {
        format!("reversal petition by '{}' adjudicated", petition.actor)
    });
    let deed = append_deed(
        &config.ledger,
        DeedEvent::new(&petition.actor, description)
            .with_ethics(EthicsFlags {
                ethics_ok: !life_harm,
                life_harm_flag: if life_harm {
                    LifeHarmFlag::Potential
                } else {
                    LifeHarmFlag::None
                },
            })
            .with_mp_delta(compensation)
            .with_reversal(true, granted),
    )?;

    let outcome = Adjudication {
        decision,
        granted,
        compensation_mp: compensation,
        deed: deed.id,
    };
    output::print_one(json, &outcome, |o| {
        format!(
            "{:?}: compensation {:.2} MP (deed {})",
            o.decision, o.compensation_mp, o.deed
        )
    })?;
    Ok(exit_codes::SUCCESS)
}
