pub mod argument;
pub mod completion;
pub mod config;
pub mod extracted;
pub mod verdict;

pub use argument::{Argument, InputError};
pub use config::{Config, LimitsConfig, ReasoningConfig};
pub use verdict::{ProofStep, Verdict, VerdictStatus};
