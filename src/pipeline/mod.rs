//! Pipeline entry points for leaderboard operations.
//!
//! - `run_batch`: Build a ranked leaderboard from a CSV of profile references
//! - `run_profile`: Fetch full detail for a single profile
//! - `run_validate`: Check configuration

pub mod batch;
pub mod profile;
pub mod validate;

pub use batch::{build_leaderboard, run_batch};
pub use profile::{ProfileLookup, lookup_identifier, lookup_profile, run_profile};
pub use validate::run_validate;
