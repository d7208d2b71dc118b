pub mod config;
pub mod error;
pub mod models;
pub mod tarkov;
pub mod utils;

pub use config::Config;
pub use tarkov::{download_kappa_icons, RunOutcome};
