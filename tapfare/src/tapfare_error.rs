use tapfare_core::fare::FareError;

#[derive(thiserror::Error, Debug)]
pub enum TapfareError {
    #[error("taps processing is already running")]
    ProcessAlreadyRunningError,
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: ::config::ConfigError,
    },
    #[error("failed reading '{filepath}': {error}")]
    ReadError { filepath: String, error: String },
    #[error("failed writing '{filepath}': {error}")]
    WriteError { filepath: String, error: String },
    #[error("output file '{0}' already exists, set overwrite to replace it")]
    OutputExistsError(String),
    #[error("invalid fare configuration: {0}")]
    FareTableError(FareError),
    #[error("failed creating trips from taps: {0}")]
    TripCreationError(#[from] FareError),
}
