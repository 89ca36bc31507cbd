pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;

pub use ledger_classifier_common as common;
