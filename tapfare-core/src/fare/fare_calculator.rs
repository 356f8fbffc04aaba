use super::FareError;
use rust_decimal::Decimal;
use std::sync::Arc;

/// prices trips by the stops at their endpoints.
///
/// implementations must be deterministic: the same stops always produce the
/// same amount or the same error.
pub trait FareCalculator {
    /// fare for a completed journey between two distinct stops.
    fn calculate_fare(
        &self,
        origin_stop_id: &str,
        destination_stop_id: &str,
    ) -> Result<Decimal, FareError>;

    /// the highest fare of any journey starting or ending at this stop,
    /// charged when only one end of a trip is known.
    fn calculate_max_fare(&self, stop_id: &str) -> Result<Decimal, FareError>;
}

impl<T: FareCalculator + ?Sized> FareCalculator for &T {
    fn calculate_fare(&self, origin: &str, destination: &str) -> Result<Decimal, FareError> {
        (**self).calculate_fare(origin, destination)
    }

    fn calculate_max_fare(&self, stop_id: &str) -> Result<Decimal, FareError> {
        (**self).calculate_max_fare(stop_id)
    }
}

impl<T: FareCalculator + ?Sized> FareCalculator for Box<T> {
    fn calculate_fare(&self, origin: &str, destination: &str) -> Result<Decimal, FareError> {
        (**self).calculate_fare(origin, destination)
    }

    fn calculate_max_fare(&self, stop_id: &str) -> Result<Decimal, FareError> {
        (**self).calculate_max_fare(stop_id)
    }
}

impl<T: FareCalculator + ?Sized> FareCalculator for Arc<T> {
    fn calculate_fare(&self, origin: &str, destination: &str) -> Result<Decimal, FareError> {
        (**self).calculate_fare(origin, destination)
    }

    fn calculate_max_fare(&self, stop_id: &str) -> Result<Decimal, FareError> {
        (**self).calculate_max_fare(stop_id)
    }
}
