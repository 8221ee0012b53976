//! Configuration options for the coDECLARE toolchain
//!
//! This module ties together the configurable options of the synthesis
//! pipeline, most importantly where the LydiaSyft engine lives. Options
//! can be set through a configuration file or through `CODECLARE_`
//! prefixed environment variables and are overridden by CLI flags.

use serde::Deserialize;

/// Configuration of the coDECLARE pipeline
///
/// This type implements `serde::Deserialize` to easily parse the
/// configuration out of structured configuration sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CodeclareConfig {
    /// Options for the synthesis engine
    engine: Option<EngineConfig>,
}

impl CodeclareConfig {
    /// Engine configuration, falling back to the defaults if unset
    pub fn engine(&self) -> EngineConfig {
        self.engine.clone().unwrap_or_default()
    }

    /// Override the container name the engine runs in
    pub fn set_container(&mut self, container: String) {
        let mut engine = self.engine();
        engine.container = container;
        self.engine = Some(engine);
    }
}

/// Location of the LydiaSyft engine
///
/// LydiaSyft runs inside a Docker container. The paths refer to the
/// filesystem inside that container.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Name of the Docker container running LydiaSyft
    #[serde(default = "default_container")]
    pub container: String,
    /// Build directory inside the container, holding `bin/LydiaSyft`
    #[serde(default = "default_build_dir")]
    pub build_dir: String,
    /// Directory inside the container the TLSF file is copied to
    #[serde(default = "default_outputs_dir")]
    pub outputs_dir: String,
    /// Path inside the container LydiaSyft writes the strategy to
    #[serde(default = "default_strategy_path")]
    pub strategy_path: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            container: default_container(),
            build_dir: default_build_dir(),
            outputs_dir: default_outputs_dir(),
            strategy_path: default_strategy_path(),
        }
    }
}

fn default_container() -> String {
    "lydiasyft_dev".to_string()
}

fn default_build_dir() -> String {
    "/LydiaSyft/build".to_string()
}

fn default_outputs_dir() -> String {
    "/LydiaSyft/outputs".to_string()
}

fn default_strategy_path() -> String {
    "/LydiaSyft/build/strategy.dot".to_string()
}
