pub mod deed;
pub mod error;
pub mod ndjson;
pub mod rights;
pub mod types;

// Convenience re-exports
pub use deed::DeedLedger;
pub use error::LedgerError;
pub use ndjson::{append_deed, load_ledger, read_deeds, read_deeds_path, DeedEvents};
pub use rights::RightsLedger;
pub use types::{DeedEvent, EthicsFlags, Identity, LifeHarmFlag, NeurorightsTier, RightsEntry};
