use crate::TapfareError;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tapfare_core::fare::{FareRule, FareTable};

/// configuration underneath every load: the stock three-stop fare table
/// reading `taps.csv` and writing `trips.csv` in the working directory.
pub const DEFAULT_CONFIG: &str = include_str!("tapfare-config.toml");

/// environment variables with this prefix override file values,
/// e.g. `TAPFARE__OUTPUT_FILE=out.csv`.
pub const ENV_PREFIX: &str = "TAPFARE";

const ENV_SEPARATOR: &str = "__";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TapfareConfig {
    /// taps CSV file to read
    pub input_file: String,
    /// trips CSV file to write
    pub output_file: String,
    /// replace the output file if it already exists
    #[serde(default)]
    pub overwrite: bool,
    /// symmetric stop-to-stop fares
    pub fares: Vec<FareRule>,
}

impl TapfareConfig {
    /// reads the embedded default, then the TOML configuration file if
    /// given, then environment overrides. later layers win key by key; a
    /// `fares` list replaces the default list as a whole.
    pub fn new(config_file: Option<&Path>) -> Result<TapfareConfig, TapfareError> {
        match config_file {
            Some(path) => {
                let source = File::from(path).format(FileFormat::Toml);
                build(
                    defaults().add_source(source),
                    &path.display().to_string(),
                    environment(),
                )
            }
            None => build(defaults(), "default configuration", environment()),
        }
    }

    /// reads TOML text layered over the embedded default, then applies
    /// environment overrides.
    pub fn from_toml_str(toml: &str) -> Result<TapfareConfig, TapfareError> {
        let source = File::from_str(toml, FileFormat::Toml);
        build(
            defaults().add_source(source),
            "inline configuration",
            environment(),
        )
    }

    /// applies command line arguments on top of the file configuration.
    pub fn with_overrides(
        mut self,
        input_file: Option<&str>,
        output_file: Option<&str>,
        overwrite: bool,
    ) -> TapfareConfig {
        if let Some(input) = input_file {
            self.input_file = input.to_string();
        }
        if let Some(output) = output_file {
            self.output_file = output.to_string();
        }
        self.overwrite = self.overwrite || overwrite;
        self
    }

    pub fn fare_table(&self) -> Result<FareTable, TapfareError> {
        FareTable::new(&self.fares).map_err(TapfareError::FareTableError)
    }
}

fn defaults() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

fn build(
    builder: ConfigBuilder<DefaultState>,
    source_name: &str,
    env: Environment,
) -> Result<TapfareConfig, TapfareError> {
    let config = builder
        .add_source(env)
        .build()
        .map_err(|e| TapfareError::ConfigReadError {
            msg: format!("failed reading '{source_name}'"),
            source: e,
        })?;
    let result = config
        .try_deserialize::<TapfareConfig>()
        .map_err(|e| TapfareError::ConfigReadError {
            msg: format!("failed deserializing '{source_name}'"),
            source: e,
        })?;
    log::debug!(
        "loaded configuration from {source_name} with {} fare rules",
        result.fares.len()
    );
    Ok(result)
}
