use super::{Trip, TripStatus};
use crate::util::currency_codec::format_currency;
use itertools::Itertools;
use rust_decimal::Decimal;
use std::fmt::Display;

/// totals for a batch of trips, reported at the end of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripSummary {
    pub completed: usize,
    pub cancelled: usize,
    pub incomplete: usize,
    pub taps_covered: usize,
    pub total_charged: Decimal,
}

impl TripSummary {
    pub fn new(trips: &[Trip]) -> TripSummary {
        let counts = trips.iter().counts_by(|trip| trip.status);
        let count_of = |status: TripStatus| counts.get(&status).copied().unwrap_or_default();
        TripSummary {
            completed: count_of(TripStatus::Completed),
            cancelled: count_of(TripStatus::Cancelled),
            incomplete: count_of(TripStatus::Incomplete),
            taps_covered: trips.iter().map(Trip::tap_count).sum(),
            total_charged: trips.iter().map(|trip| trip.charge_amount).sum(),
        }
    }

    pub fn trips(&self) -> usize {
        self.completed + self.cancelled + self.incomplete
    }
}

impl Display for TripSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} trips ({} completed, {} cancelled, {} incomplete) from {} taps, {} charged",
            self.trips(),
            self.completed,
            self.cancelled,
            self.incomplete,
            self.taps_covered,
            format_currency(&self.total_charged)
        )
    }
}
