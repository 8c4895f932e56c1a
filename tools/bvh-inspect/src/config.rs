//! `toml` configuration for the inspector.

use std::{fmt::Debug, path::Path};

use anyhow::Context;
use mesh_bvh::BuildConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct InspectConfig {
    pub build: BuildConfig,
}

impl InspectConfig {
    /// Reads `path`, or writes the defaults there when it does not exist yet.
    #[instrument]
    pub fn load<P: AsRef<Path> + Debug>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            info!("loading configuration file");
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let config = toml::from_str::<Self>(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            return Ok(config);
        }

        info!("configuration file not found, using defaults");
        let config = Self::default();

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                // read-only filesystems
                warn!("failed to create parent directories for {path:?}: {e}, using defaults");
                return Ok(config);
            }
        }

        let contents = toml::to_string(&config)?;
        if let Err(e) = std::fs::write(path, contents) {
            warn!("failed to write default configuration to {path:?}: {e}");
            return Ok(config);
        }

        info!("wrote default configuration to {path:?}");
        Ok(config)
    }
}
