use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "snc",
    version,
    about = "Sovereign Neuromorph Contract — consent, abort-control, and rollback gating for neuromorphic operations"
)]
pub struct Cli {
    /// Config file; an absent file falls back to built-in defaults
    #[arg(long, global = true, default_value = "snc.yaml", env = "SNC_CONFIG")]
    pub config: PathBuf,

    /// Emit JSON instead of human-readable lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write starter config, session, and discipline policy files
    Init(InitArgs),
    /// Inspect and mutate the subject's session state
    Session(SessionArgs),
    /// Evaluate the contract gate for an operation
    Check(CheckArgs),
    /// Adjudicate emergency reversal petitions
    Reversal(ReversalArgs),
    /// Biocompatibility safety decisions
    Safety(SafetyArgs),
    /// Discipline policy review
    Policy(PolicyArgs),
    /// Deed ledger inspection and verification
    Ledger(LedgerArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Subject the starter session and policy are written for
    #[arg(long, default_value = "neuromorph-0")]
    pub subject: String,
}

#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub cmd: SessionCmd,
}

#[derive(Subcommand, Debug)]
pub enum SessionCmd {
    /// Print the current session state
    Show,
    /// Record explicit consent for the subject
    GrantConsent,
    /// Withdraw consent
    RevokeConsent,
    /// Hand the subject a working unilateral stop channel
    ArmAbort,
    /// Mark the abort channel as lost or relinquished
    SurrenderAbort,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Operation name carried in logs and ledger records
    #[arg(long, default_value = "operation")]
    pub operation: String,

    /// Append the verdict to the deed ledger
    #[arg(long)]
    pub record: bool,
}

#[derive(Args, Debug)]
pub struct ReversalArgs {
    #[command(subcommand)]
    pub cmd: ReversalCmd,
}

#[derive(Subcommand, Debug)]
pub enum ReversalCmd {
    /// Adjudicate a petition file and record the outcome
    Evaluate(ReversalEvaluateArgs),
}

#[derive(Args, Debug)]
pub struct ReversalEvaluateArgs {
    /// Petition file (YAML): actor, roles, conditions, mp_debt
    #[arg(long)]
    pub request: PathBuf,
}

#[derive(Args, Debug)]
pub struct SafetyArgs {
    #[command(subcommand)]
    pub cmd: SafetyCmd,
}

#[derive(Subcommand, Debug)]
pub enum SafetyCmd {
    /// Run the biocompatibility controller on a sample
    Decide(SafetyDecideArgs),
}

#[derive(Args, Debug)]
pub struct SafetyDecideArgs {
    /// Biomarker sample file (YAML): inflammation, hrv_strain,
    /// neural_desync, distress
    #[arg(long)]
    pub sample: PathBuf,
}

#[derive(Args, Debug)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub cmd: PolicyCmd,
}

#[derive(Subcommand, Debug)]
pub enum PolicyCmd {
    /// Check a discipline policy against the non-coercion rules
    Validate(PolicyValidateArgs),
}

#[derive(Args, Debug)]
pub struct PolicyValidateArgs {
    /// Policy file; defaults to the config's policy path
    #[arg(long)]
    pub policy: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct LedgerArgs {
    #[command(subcommand)]
    pub cmd: LedgerCmd,
}

#[derive(Subcommand, Debug)]
pub enum LedgerCmd {
    /// Print every recorded deed
    List,
    /// Event count and net MP balance
    Total,
    /// Re-check every deed's content hash
    Verify,
}
