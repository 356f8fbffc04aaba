use rust_decimal::Decimal;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FareError {
    #[error("no fare defined between stops '{0}' and '{1}'")]
    UnknownStopPairError(String, String),
    #[error("no fares defined for stop '{0}'")]
    UnknownStopError(String),
    #[error("fare rule from stop '{0}' to itself is not allowed")]
    SelfLoopRuleError(String),
    #[error("fare rule between '{from}' and '{to}' has negative amount {amount}")]
    NegativeFareError {
        from: String,
        to: String,
        amount: Decimal,
    },
    #[error("conflicting fares between '{from}' and '{to}': {existing} and {conflict}")]
    ConflictingRuleError {
        from: String,
        to: String,
        existing: Decimal,
        conflict: Decimal,
    },
}
