use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// the fare for travel between two stops, in either direction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FareRule {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
}

impl FareRule {
    pub fn new(from: &str, to: &str, amount: Decimal) -> FareRule {
        FareRule {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        }
    }
}
