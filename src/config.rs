//! Engine configuration.
//!
//! Layered loading: built-in defaults, then an optional TOML file, then an
//! `INVMIRROR_*` environment overlay with `__` as the nested-key separator.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::SortOrder;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sort system-role folders before user folders.
    pub system_folders_first: bool,
    /// How many applied notifications a buffered orphan add survives after
    /// the mirror goes live before it is dropped.
    pub orphan_retry_window: usize,
    /// Capacity of the owner-context command queue.
    pub command_queue_capacity: usize,
    /// Sort order hint sent with folder content requests.
    pub fetch_sort_order: SortOrder,
    /// Display name given to locally created folders while the store echo
    /// is pending.
    pub new_folder_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            system_folders_first: true,
            orphan_retry_window: 10,
            command_queue_capacity: 256,
            fetch_sort_order: SortOrder::ByDate,
            new_folder_name: "New folder".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from an optional file and the environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&EngineConfig::default())?);
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder
            .add_source(
                Environment::with_prefix("INVMIRROR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
