// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: loads the persisted configuration and builds intake
// workflows wired to the platform bridge and simulated settlement.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use druckkasse_bridge::{PlatformBridge, platform_bridge};
use druckkasse_core::AppConfig;
use druckkasse_core::error::Result;
use druckkasse_print::{IntakeWorkflow, SimulatedSettlement};
use tracing::{info, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";
const SPOOL_DIR: &str = "spool";

/// Shared application services.
#[derive(Clone)]
pub struct AppServices {
    data_dir: PathBuf,
    config_path: PathBuf,
    config: AppConfig,
    bridge: Arc<dyn PlatformBridge>,
}

impl AppServices {
    /// Initialise services from the platform data directory. `config_path`
    /// overrides the default `<data dir>/config.json`.
    pub fn init(config_path: Option<PathBuf>) -> Self {
        Self::with_data_dir(data_dir::data_dir(), config_path)
    }

    pub fn with_data_dir(data_dir: PathBuf, config_path: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(|| data_dir.join(CONFIG_FILE));
        let config = load_config(&config_path).unwrap_or_default();
        let bridge = platform_bridge(Some(data_dir.join(SPOOL_DIR)));
        info!(
            path = %data_dir.display(),
            platform = bridge.platform_name(),
            "app services initialised"
        );
        Self {
            data_dir,
            config_path,
            config,
            bridge,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Where the headless bridge writes printed documents.
    pub fn spool_dir(&self) -> PathBuf {
        self.data_dir.join(SPOOL_DIR)
    }

    /// Write the current configuration back to disk.
    pub fn save_config(&self) -> Result<()> {
        persist_config(&self.config_path, &self.config)
    }

    /// Fresh intake session using the configured policy.
    pub fn workflow(&self) -> IntakeWorkflow {
        let policy = self.config.intake.clone();
        let payments = Arc::new(SimulatedSettlement::new(policy.settlement_delay()));
        IntakeWorkflow::new(policy, Arc::clone(&self.bridge), payments)
    }
}

fn load_config(path: &Path) -> Option<AppConfig> {
    let data = std::fs::read_to_string(path).ok()?;
    let config: AppConfig = match serde_json::from_str(&data) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            return None;
        }
    };
    match config.intake.validate() {
        Ok(()) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring invalid config");
            None
        }
    }
}

fn persist_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}
