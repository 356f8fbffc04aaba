use crate::configuration::TapfareConfig;
use crate::process::TapsProcessor;
use crate::TapfareError;
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum TapfareOperation {
    /// reads a taps CSV file, pairs taps into trips, and writes a trips
    /// CSV file priced from the configured fare table.
    Process {
        /// TOML configuration file. defaults to the built-in configuration.
        #[arg(short, long = "config")]
        config_file: Option<String>,
        /// taps CSV file, overrides `input_file` in the configuration
        #[arg(short, long = "input")]
        input_file: Option<String>,
        /// trips CSV file, overrides `output_file` in the configuration
        #[arg(short, long = "output")]
        output_file: Option<String>,
        /// replace the trips file if it already exists
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
}

impl TapfareOperation {
    pub fn run(&self) -> Result<String, TapfareError> {
        match self {
            TapfareOperation::Process {
                config_file,
                input_file,
                output_file,
                overwrite,
            } => {
                let config = TapfareConfig::new(config_file.as_deref().map(Path::new))?
                    .with_overrides(input_file.as_deref(), output_file.as_deref(), *overwrite);
                let processor = TapsProcessor::new(&config)?;
                processor.process_taps()
            }
        }
    }
}
