use serde::Serialize;
use snc_core::SncConfig;
use snc_ledger::{load_ledger, read_deeds_path, DeedEvent, LedgerError};

use crate::cli::args::{LedgerArgs, LedgerCmd};
use crate::exit_codes;
use crate::output;

pub fn run(args: &LedgerArgs, config: &SncConfig, json: bool) -> anyhow::Result<i32> {
    match args.cmd {
        LedgerCmd::List => list(config, json),
        LedgerCmd::Total => total(config, json),
        LedgerCmd::Verify => verify(config, json),
    }
}

fn describe(deed: &DeedEvent) -> String {
    let reversal = match (deed.reversal_proposed, deed.reversal_granted) {
        (true, true) => " [reversal granted]",
        (true, false) => " [reversal denied]",
        _ => "",
    };
    format!(
        "{} {} \"{}\" mp={:+.2}{}",
        deed.timestamp.to_rfc3339(),
        deed.actor,
        deed.description,
        deed.mp_delta,
        reversal
    )
}

fn list(config: &SncConfig, json: bool) -> anyhow::Result<i32> {
    let deeds = match read_deeds_path(&config.ledger) {
        Ok(deeds) => deeds,
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(exit_codes::RUNTIME_ERROR);
        }
    };
    output::print_out(json, &deeds, describe)?;
    Ok(exit_codes::SUCCESS)
}

#[derive(Serialize)]
struct LedgerTotal {
    events: usize,
    total_mp: f64,
}

fn total(config: &SncConfig, json: bool) -> anyhow::Result<i32> {
    let deeds = match read_deeds_path(&config.ledger) {
        Ok(deeds) => deeds,
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(exit_codes::RUNTIME_ERROR);
        }
    };
    let report = LedgerTotal {
        events: deeds.len(),
        total_mp: deeds.iter().map(|d| d.mp_delta).sum(),
    };
    output::print_one(json, &report, |r| {
        format!("{} event(s), net {:+.2} MP", r.events, r.total_mp)
    })?;
    Ok(exit_codes::SUCCESS)
}

#[derive(Serialize)]
struct VerifyReport {
    verified: usize,
    total_mp: f64,
}

fn verify(config: &SncConfig, json: bool) -> anyhow::Result<i32> {
    // load_ledger re-checks every content hash on the way in.
    let ledger = match load_ledger(&config.ledger) {
        Ok(ledger) => ledger,
        Err(err @ (LedgerError::Tampered { .. } | LedgerError::Malformed { .. })) => {
            eprintln!("error: {err}");
            return Ok(exit_codes::VIOLATION);
        }
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(exit_codes::RUNTIME_ERROR);
        }
    };
    let report = VerifyReport {
        verified: ledger.len(),
        total_mp: ledger.total_mp(),
    };
    output::print_one(json, &report, |r| {
        format!("verified {} event(s), net {:+.2} MP", r.verified, r.total_mp)
    })?;
    Ok(exit_codes::SUCCESS)
}
