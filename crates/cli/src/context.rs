//! Application context

use std::path::Path;
use std::sync::Arc;

use serf_core::EngineConfig;
use serf_facade::ReportFacade;

/// Everything a command needs
pub struct AppContext {
    facade: ReportFacade,
}

impl AppContext {
    /// Build the context from an optional TOML file; defaults otherwise
    pub fn new(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => EngineConfig::load_file(path)?,
            None => EngineConfig::default(),
        };
        Self::from_config(config)
    }

    pub fn from_config(config: EngineConfig) -> anyhow::Result<Self> {
        let facade = ReportFacade::with_demo_data(Arc::new(config))?;
        Ok(Self { facade })
    }

    pub fn facade(&self) -> &ReportFacade {
        &self.facade
    }
}
