pub mod config;
pub mod contract;
pub mod discipline;
pub mod errors;
pub mod gate;
pub mod reversal;
pub mod safety;
pub mod session;

// Convenience re-exports
pub use config::{ConfigError, SafetyConfig, SncConfig};
pub use contract::{SovereignNeuromorphContract, StaticContract};
pub use discipline::{DisciplinePolicy, DisciplineSignal, PolicyError};
pub use errors::{ContractError, SessionError};
pub use gate::{evaluate, OperationGate, Verdict, VerdictStatus};
pub use reversal::{
    compensation_for_denial, reproject_without_reversal, DecisionReason, EnvelopeSnapshot,
    Mitigation, ReversalConditions, ReversalGate, ReversalPetition, Role, RoleSet,
};
pub use safety::{
    BciSafetyController, BciSafetyDecision, BciSafetyLevel, BciSample, BCI_HARD_CEILING,
};
pub use session::{ConsentState, Session};
