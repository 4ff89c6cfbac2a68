use snc_core::{BciSafetyLevel, BciSample, SncConfig};

use crate::cli::args::{SafetyArgs, SafetyCmd, SafetyDecideArgs};
use crate::exit_codes;
use crate::output;

pub fn run(args: &SafetyArgs, config: &SncConfig, json: bool) -> anyhow::Result<i32> {
    match &args.cmd {
        SafetyCmd::Decide(decide) => run_decide(decide, config, json),
    }
}

fn run_decide(args: &SafetyDecideArgs, config: &SncConfig, json: bool) -> anyhow::Result<i32> {
    let raw = match std::fs::read_to_string(&args.sample) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("error: failed to read {}: {err}", args.sample.display());
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    let sample: BciSample = match serde_yaml::from_str(&raw) {
        Ok(sample) => sample,
        Err(err) => {
            eprintln!("error: failed to parse {}: {err}", args.sample.display());
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let decision = config.safety.controller().decide(&sample);
    let code = match decision.level {
        BciSafetyLevel::Shutdown => exit_codes::VIOLATION,
        BciSafetyLevel::Safe | BciSafetyLevel::Throttle => exit_codes::SUCCESS,
    };

    output::print_one(json, &decision, |d| d.reason.clone())?;
    Ok(code)
}
