//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod build;
pub mod models;
pub mod rank;
pub mod utils;

// Re-export main command functions
pub use build::{execute_build, resolve_config, validate_args};
pub use models::{BuildArgs, HostTable, PeriodsArgs, RankArgs};
pub use rank::{execute_periods, execute_rank, period_listing, rank_hosts};
pub use utils::{display_schema, display_version, load_pipeline_config, validate_deck_file};
