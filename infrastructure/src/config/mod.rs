//! Configuration file loading for multillm
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MULTILLM_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./multillm.toml` or `./.multillm.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/multillm/config.toml`
//! 5. Fallback: `~/.config/multillm/config.toml`
//! 6. Default values

mod file_config;
mod loader;
mod registry;

pub use file_config::{
    FileBehaviorConfig, FileConfig, FileJudgesConfig, FileModelConfig, FileOutputConfig,
    FileReplConfig, FileWebConfig,
};
pub use loader::ConfigLoader;
pub use registry::{ConfigValidationError, ModelEntry, ModelRegistry};
