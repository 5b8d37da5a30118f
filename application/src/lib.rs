//! Application layer for multillm
//!
//! This crate contains the comparison use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BehaviorConfig, CompareConfig};
pub use ports::{
    model_client::{
        Endpoint, GatewayError, ModelClient, ModelSession, SessionFactory, SharedModelClient,
    },
    progress::{NoProgress, ProgressNotifier, Stage},
};
pub use use_cases::run_comparison::{CompareError, ComparisonRun, RunComparisonUseCase};
