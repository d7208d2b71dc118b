pub mod kappa;

pub use kappa::{download_kappa_icons, RunOutcome};
