//! Unified exit codes for the snc CLI.
//! These codes are part of the public contract; scripts and CI pipelines
//! key off them.

pub const SUCCESS: i32 = 0;
pub const RUNTIME_ERROR: i32 = 1; // Unexpected failure (I/O, corrupt state)
pub const CONFIG_ERROR: i32 = 2; // Bad config, args, or missing input files
pub const VIOLATION: i32 = 3; // Blocked verdict, shutdown, invalid policy, tampered ledger
