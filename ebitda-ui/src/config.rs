//! Startup configuration.
//!
//! Settings come from an optional TOML file and are then overridden by
//! command-line flags. Every key is optional:
//!
//! ```toml
//! [session]
//! mobile = false          # desktop layout: coloured comparison table
//! explore = true          # unlock every input regardless of step
//! step = 2                # starting step, 1-6
//! scenario = "energy-spike"
//!
//! [display]
//! color = true
//! log_level = "info"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ebitda_core::{Scenario, SessionState, Step};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub mobile: bool,
    pub explore: bool,
    pub step: Step,
    pub scenario: Option<Scenario>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mobile: true,
            explore: false,
            step: Step::FIRST,
            scenario: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub color: bool,
    pub log_level: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(
        text: &str,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Builds the session the configuration describes.
    ///
    /// A configured scenario is loaded first, so its results become the
    /// baseline; otherwise the session starts from the defaults.
    pub fn build_session(&self) -> SessionState {
        let mut session = SessionState::new();
        if let Some(scenario) = self.session.scenario {
            session.load(scenario);
        }
        session.set_step(self.session.step);
        session.set_mobile(self.session.mobile);
        session.set_explore(self.session.explore);
        session
    }
}
