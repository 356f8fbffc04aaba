use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    /// tap-on and tap-off at different stops
    Completed,
    /// tap-on and tap-off at the same stop
    Cancelled,
    /// missing either the tap-on or the tap-off
    Incomplete,
}

impl Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripStatus::Completed => write!(f, "COMPLETED"),
            TripStatus::Cancelled => write!(f, "CANCELLED"),
            TripStatus::Incomplete => write!(f, "INCOMPLETE"),
        }
    }
}
