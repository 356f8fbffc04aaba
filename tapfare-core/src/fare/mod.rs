mod fare_calculator;
mod fare_error;
mod fare_rule;
mod fare_table;

pub use fare_calculator::FareCalculator;
pub use fare_error::FareError;
pub use fare_rule::FareRule;
pub use fare_table::FareTable;
