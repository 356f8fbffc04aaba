use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// direction of a tap. values other than ON or OFF are kept as
/// [`TapKind::Unrecognized`] so that a single bad row does not fail a batch.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum TapKind {
    On,
    Off,
    Unrecognized(String),
}

impl From<String> for TapKind {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "ON" => TapKind::On,
            "OFF" => TapKind::Off,
            _ => TapKind::Unrecognized(value),
        }
    }
}

impl From<&str> for TapKind {
    fn from(value: &str) -> Self {
        TapKind::from(value.to_string())
    }
}

impl From<TapKind> for String {
    fn from(value: TapKind) -> Self {
        value.to_string()
    }
}

impl Display for TapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TapKind::On => write!(f, "ON"),
            TapKind::Off => write!(f, "OFF"),
            TapKind::Unrecognized(raw) => write!(f, "{raw}"),
        }
    }
}
