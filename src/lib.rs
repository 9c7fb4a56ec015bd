pub mod config;
pub mod constants;
pub mod dedupe;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod pacing;
pub mod pipeline;
pub mod places;
pub mod sources;
pub mod targets;
pub mod types;
