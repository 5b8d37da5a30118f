//! Application-level configuration.
//!
//! This module provides configuration types that control how the comparison
//! use case behaves:
//!
//! - [`BehaviorConfig`]: trail verbosity and the optional overall timeout
//! - [`CompareConfig`]: the ordered model registry, the judge list and behavior

pub mod behavior;
pub mod compare_config;

pub use behavior::BehaviorConfig;
pub use compare_config::CompareConfig;
