//! Infrastructure layer for multillm
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: configuration file loading and HTTP model
//! clients.

pub mod config;
pub mod http;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileModelConfig, FileOutputConfig,
    FileReplConfig, FileWebConfig, ModelEntry, ModelRegistry,
};
pub use http::{HttpModelClient, ReqwestSession, ReqwestSessionFactory};
