mod tapfare_config;

pub use tapfare_config::{TapfareConfig, DEFAULT_CONFIG, ENV_PREFIX};
