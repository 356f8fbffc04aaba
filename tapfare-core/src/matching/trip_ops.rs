use crate::fare::{FareCalculator, FareError};
use crate::model::{Tap, Trip};

/// classifies a matched tap-on/tap-off pair. a pair at the same stop is a
/// cancelled trip and is never priced.
pub fn paired_trip<F: FareCalculator>(
    tap_on: &Tap,
    tap_off: &Tap,
    fare_calculator: &F,
) -> Result<Trip, FareError> {
    if tap_on.stop_id == tap_off.stop_id {
        log::debug!(
            "cancelled trip for card {} at stop {}",
            tap_on.card_id,
            tap_on.stop_id
        );
        return Ok(Trip::cancelled(tap_on, tap_off));
    }
    let fare = fare_calculator.calculate_fare(&tap_on.stop_id, &tap_off.stop_id)?;
    log::debug!(
        "completed trip for card {} from {} to {}",
        tap_on.card_id,
        tap_on.stop_id,
        tap_off.stop_id
    );
    Ok(Trip::completed(tap_on, tap_off, fare))
}

/// a tap-on left without a tap-off is charged the maximum fare from its stop.
pub fn orphan_tap_on_trip<F: FareCalculator>(
    tap_on: &Tap,
    fare_calculator: &F,
) -> Result<Trip, FareError> {
    let max_fare = fare_calculator.calculate_max_fare(&tap_on.stop_id)?;
    log::debug!(
        "incomplete trip for card {} from orphan ON tap {} at stop {}",
        tap_on.card_id,
        tap_on.id,
        tap_on.stop_id
    );
    Ok(Trip::incomplete_from_tap_on(tap_on, max_fare))
}

/// a tap-off left without a tap-on is charged the maximum fare to its stop.
pub fn orphan_tap_off_trip<F: FareCalculator>(
    tap_off: &Tap,
    fare_calculator: &F,
) -> Result<Trip, FareError> {
    let max_fare = fare_calculator.calculate_max_fare(&tap_off.stop_id)?;
    log::debug!(
        "incomplete trip for card {} from orphan OFF tap {} at stop {}",
        tap_off.card_id,
        tap_off.id,
        tap_off.stop_id
    );
    Ok(Trip::incomplete_from_tap_off(tap_off, max_fare))
}
