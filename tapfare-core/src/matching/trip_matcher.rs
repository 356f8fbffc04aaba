use super::{tap_pools::TapPools, trip_ops};
use crate::fare::{FareCalculator, FareError};
use crate::model::{Tap, TapKind, Trip};

/// turns a batch of taps into priced trips.
///
/// a tap-on pairs with the first pending tap-off on the same card that is
/// later on the same day, and a tap-off pairs with the first pending tap-on
/// that is earlier on the same day. taps left over once the batch is consumed
/// become incomplete trips, tap-ons before tap-offs, each ordered by card id
/// then arrival.
///
/// the matcher holds no state between calls: the pending pools are created
/// inside [`TripMatcher::match_taps`] and dropped when it returns, so one
/// matcher may be shared across threads and batches.
#[derive(Clone, Debug)]
pub struct TripMatcher<F> {
    fare_calculator: F,
}

impl<F: FareCalculator> TripMatcher<F> {
    pub fn new(fare_calculator: F) -> TripMatcher<F> {
        TripMatcher { fare_calculator }
    }

    /// pairs and prices the taps, in the order given.
    ///
    /// taps with an unrecognized kind are skipped with a warning and produce
    /// no trip. any fare lookup failure aborts the batch.
    pub fn match_taps(&self, taps: &[Tap]) -> Result<Vec<Trip>, FareError> {
        let mut pools = TapPools::default();
        let mut trips: Vec<Trip> = Vec::with_capacity(taps.len());

        for tap in taps.iter() {
            log::debug!("processing {} tap {} for card {}", tap.kind, tap.id, tap.card_id);
            match &tap.kind {
                TapKind::On => match pools.take_tap_off_after(tap) {
                    Some(tap_off) => {
                        trips.push(trip_ops::paired_trip(tap, tap_off, &self.fare_calculator)?)
                    }
                    None => {
                        log::debug!("no matching OFF tap for ON tap {}, holding", tap.id);
                        pools.hold_tap_on(tap);
                    }
                },
                TapKind::Off => match pools.take_tap_on_before(tap) {
                    Some(tap_on) => {
                        trips.push(trip_ops::paired_trip(tap_on, tap, &self.fare_calculator)?)
                    }
                    None => {
                        log::debug!("no matching ON tap for OFF tap {}, holding", tap.id);
                        pools.hold_tap_off(tap);
                    }
                },
                TapKind::Unrecognized(kind) => {
                    log::warn!("skipping tap {} with unknown tap type '{kind}'", tap.id);
                }
            }
        }

        let (orphan_ons, orphan_offs) = pools.into_orphans();
        for tap_on in orphan_ons {
            trips.push(trip_ops::orphan_tap_on_trip(tap_on, &self.fare_calculator)?);
        }
        for tap_off in orphan_offs {
            trips.push(trip_ops::orphan_tap_off_trip(tap_off, &self.fare_calculator)?);
        }
        Ok(trips)
    }
}

#[cfg(test)]
mod test {
    use super::TripMatcher;
    use crate::fare::{FareCalculator, FareError, FareRule, FareTable};
    use crate::model::{Tap, TapKind, Trip, TripStatus};
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// answers from fixed tables and records every lookup made.
    #[derive(Default)]
    struct RecordingFares {
        fares: HashMap<(String, String), Decimal>,
        max_fares: HashMap<String, Decimal>,
        lookups: RefCell<Vec<String>>,
    }

    impl RecordingFares {
        fn with_fare(mut self, from: &str, to: &str, amount: Decimal) -> Self {
            self.fares.insert((from.to_string(), to.to_string()), amount);
            self
        }

        fn with_max_fare(mut self, stop: &str, amount: Decimal) -> Self {
            self.max_fares.insert(stop.to_string(), amount);
            self
        }

        fn lookups(&self) -> Vec<String> {
            self.lookups.borrow().clone()
        }
    }

    impl FareCalculator for RecordingFares {
        fn calculate_fare(&self, origin: &str, destination: &str) -> Result<Decimal, FareError> {
            self.lookups
                .borrow_mut()
                .push(format!("fare:{origin}->{destination}"));
            self.fares
                .get(&(origin.to_string(), destination.to_string()))
                .copied()
                .ok_or_else(|| {
                    FareError::UnknownStopPairError(origin.to_string(), destination.to_string())
                })
        }

        fn calculate_max_fare(&self, stop_id: &str) -> Result<Decimal, FareError> {
            self.lookups.borrow_mut().push(format!("max:{stop_id}"));
            self.max_fares
                .get(stop_id)
                .copied()
                .ok_or_else(|| FareError::UnknownStopError(stop_id.to_string()))
        }
    }

    fn datetime(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, day)
            .and_then(|d| d.and_hms_opt(hour, min, 0))
            .expect("test invariant failed: invalid datetime")
    }

    fn tap_on(id: u64, time: NaiveDateTime, stop: &str, card: &str) -> Tap {
        Tap::new(id, time, TapKind::On, stop, "Company1", "Bus37", card)
    }

    fn tap_off(id: u64, time: NaiveDateTime, stop: &str, card: &str) -> Tap {
        Tap::new(id, time, TapKind::Off, stop, "Company1", "Bus37", card)
    }

    fn default_table() -> FareTable {
        FareTable::new(&[
            FareRule::new("Stop1", "Stop2", Decimal::new(325, 2)),
            FareRule::new("Stop2", "Stop3", Decimal::new(550, 2)),
            FareRule::new("Stop1", "Stop3", Decimal::new(730, 2)),
        ])
        .expect("test invariant failed: default fare rules are valid")
    }

    const CARD: &str = "4111111111111111";

    #[test]
    fn test_empty_input_produces_no_trips() {
        let fares = RecordingFares::default();
        let matcher = TripMatcher::new(&fares);
        let trips = matcher.match_taps(&[]).expect("should not fail");
        assert!(trips.is_empty());
        assert!(fares.lookups().is_empty());
    }

    #[test]
    fn test_completed_trip_from_on_then_off() {
        let fares = RecordingFares::default().with_fare("Stop1", "Stop2", Decimal::new(325, 2));
        let matcher = TripMatcher::new(&fares);
        let taps = vec![
            tap_on(1, datetime(22, 13, 0), "Stop1", CARD),
            tap_off(2, datetime(22, 13, 5), "Stop2", CARD),
        ];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        assert_eq!(trips.len(), 1);
        let trip = &trips[0];
        assert_eq!(trip.status, TripStatus::Completed);
        assert_eq!(trip.started, Some(datetime(22, 13, 0)));
        assert_eq!(trip.finished, Some(datetime(22, 13, 5)));
        assert_eq!(trip.duration_secs, 300);
        assert_eq!(trip.from_stop_id.as_deref(), Some("Stop1"));
        assert_eq!(trip.to_stop_id.as_deref(), Some("Stop2"));
        assert_eq!(trip.charge_amount, Decimal::new(325, 2));
        assert_eq!(trip.card_id, CARD);
        assert_eq!(fares.lookups(), vec![String::from("fare:Stop1->Stop2")]);
    }

    #[test]
    fn test_completed_trip_when_off_arrives_before_on() {
        let fares = RecordingFares::default().with_fare("Stop1", "Stop2", Decimal::new(325, 2));
        let matcher = TripMatcher::new(&fares);
        let taps = vec![
            tap_off(2, datetime(22, 13, 5), "Stop2", CARD),
            tap_on(1, datetime(22, 13, 0), "Stop1", CARD),
        ];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].status, TripStatus::Completed);
        assert_eq!(trips[0].from_stop_id.as_deref(), Some("Stop1"));
        assert_eq!(trips[0].to_stop_id.as_deref(), Some("Stop2"));
        assert_eq!(trips[0].duration_secs, 300);
    }

    #[test]
    fn test_same_stop_is_cancelled_without_fare_lookup() {
        let fares = RecordingFares::default();
        let matcher = TripMatcher::new(&fares);
        let taps = vec![
            tap_on(1, datetime(22, 13, 0), "Stop1", CARD),
            tap_off(2, datetime(22, 13, 5), "Stop1", CARD),
        ];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].status, TripStatus::Cancelled);
        assert_eq!(trips[0].charge_amount, Decimal::ZERO);
        assert_eq!(trips[0].duration_secs, 0);
        assert!(fares.lookups().is_empty());
    }

    #[test]
    fn test_orphan_tap_on_is_charged_max_fare() {
        let fares = RecordingFares::default().with_max_fare("Stop1", Decimal::new(550, 2));
        let matcher = TripMatcher::new(&fares);
        let taps = vec![tap_on(1, datetime(22, 13, 0), "Stop1", CARD)];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        assert_eq!(trips.len(), 1);
        let trip = &trips[0];
        assert_eq!(trip.status, TripStatus::Incomplete);
        assert_eq!(trip.charge_amount, Decimal::new(550, 2));
        assert_eq!(trip.finished, None);
        assert_eq!(trip.to_stop_id, None);
        assert_eq!(trip.duration_secs, 0);
        assert_eq!(fares.lookups(), vec![String::from("max:Stop1")]);
    }

    #[test]
    fn test_orphan_tap_off_is_charged_max_fare() {
        let fares = RecordingFares::default().with_max_fare("Stop2", Decimal::new(700, 2));
        let matcher = TripMatcher::new(&fares);
        let taps = vec![tap_off(2, datetime(22, 13, 5), "Stop2", CARD)];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        assert_eq!(trips.len(), 1);
        let trip = &trips[0];
        assert_eq!(trip.status, TripStatus::Incomplete);
        assert_eq!(trip.charge_amount, Decimal::new(700, 2));
        assert_eq!(trip.started, None);
        assert_eq!(trip.from_stop_id, None);
        assert_eq!(trip.to_stop_id.as_deref(), Some("Stop2"));
    }

    #[test]
    fn test_taps_across_midnight_are_not_paired() {
        let matcher = TripMatcher::new(default_table());
        let taps = vec![
            tap_on(1, datetime(22, 23, 59), "Stop1", CARD),
            tap_off(2, datetime(23, 0, 1), "Stop2", CARD),
        ];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        assert_eq!(trips.len(), 2);
        assert!(trips.iter().all(|t| t.status == TripStatus::Incomplete));
        assert_eq!(trips[0].from_stop_id.as_deref(), Some("Stop1"));
        assert_eq!(trips[0].charge_amount, Decimal::new(730, 2));
        assert_eq!(trips[1].to_stop_id.as_deref(), Some("Stop2"));
        assert_eq!(trips[1].charge_amount, Decimal::new(550, 2));
    }

    #[test]
    fn test_tap_off_earlier_than_tap_on_is_not_paired() {
        let matcher = TripMatcher::new(default_table());
        let taps = vec![
            tap_on(1, datetime(22, 13, 0), "Stop1", CARD),
            tap_off(2, datetime(22, 12, 0), "Stop2", CARD),
        ];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        assert_eq!(trips.len(), 2);
        assert!(trips.iter().all(|t| t.status == TripStatus::Incomplete));
    }

    #[test]
    fn test_taps_on_different_cards_are_not_paired() {
        let matcher = TripMatcher::new(default_table());
        let taps = vec![
            tap_on(1, datetime(22, 13, 0), "Stop1", "A"),
            tap_off(2, datetime(22, 13, 5), "Stop2", "B"),
        ];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].card_id, "A");
        assert_eq!(trips[0].started, Some(datetime(22, 13, 0)));
        assert_eq!(trips[1].card_id, "B");
        assert_eq!(trips[1].finished, Some(datetime(22, 13, 5)));
    }

    #[test]
    fn test_first_pending_candidate_wins_over_nearest() {
        let matcher = TripMatcher::new(default_table());
        let taps = vec![
            tap_on(1, datetime(22, 8, 0), "Stop1", CARD),
            tap_on(2, datetime(22, 9, 0), "Stop2", CARD),
            tap_off(3, datetime(22, 10, 0), "Stop3", CARD),
        ];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].status, TripStatus::Completed);
        assert_eq!(trips[0].from_stop_id.as_deref(), Some("Stop1"));
        assert_eq!(trips[0].charge_amount, Decimal::new(730, 2));
        assert_eq!(trips[1].status, TripStatus::Incomplete);
        assert_eq!(trips[1].from_stop_id.as_deref(), Some("Stop2"));
    }

    #[test]
    fn test_orphans_follow_matched_trips_ons_then_offs_by_card() {
        let matcher = TripMatcher::new(default_table());
        let taps = vec![
            tap_off(1, datetime(22, 7, 0), "Stop3", "B"),
            tap_on(2, datetime(22, 8, 0), "Stop2", "B"),
            tap_off(3, datetime(22, 8, 30), "Stop1", "A"),
            tap_on(4, datetime(22, 9, 0), "Stop1", "A"),
            tap_on(5, datetime(22, 9, 30), "Stop1", "C"),
            tap_off(6, datetime(22, 9, 45), "Stop3", "C"),
        ];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        let order = trips
            .iter()
            .map(|t| (t.card_id.as_str(), t.status, t.started.is_some()))
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                ("C", TripStatus::Completed, true),
                ("A", TripStatus::Incomplete, true),
                ("B", TripStatus::Incomplete, true),
                ("A", TripStatus::Incomplete, false),
                ("B", TripStatus::Incomplete, false),
            ]
        );
    }

    #[test]
    fn test_every_recognized_tap_is_covered_once() {
        let matcher = TripMatcher::new(default_table());
        let taps = vec![
            tap_on(1, datetime(22, 8, 0), "Stop1", "A"),
            tap_on(2, datetime(22, 8, 1), "Stop2", "B"),
            tap_off(3, datetime(22, 8, 10), "Stop2", "A"),
            tap_on(4, datetime(22, 9, 0), "Stop3", "A"),
            tap_off(5, datetime(22, 9, 5), "Stop2", "B"),
            tap_off(6, datetime(22, 9, 20), "Stop1", "C"),
            tap_on(7, datetime(22, 23, 50), "Stop1", "B"),
            tap_off(8, datetime(23, 0, 10), "Stop3", "B"),
            tap_on(9, datetime(23, 6, 0), "Stop3", "A"),
            tap_off(10, datetime(23, 6, 30), "Stop1", "A"),
        ];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        let covered: usize = trips.iter().map(Trip::tap_count).sum();
        assert_eq!(covered, taps.len());
        let mut endpoints = trips
            .iter()
            .flat_map(|t| [t.started, t.finished].map(|ts| ts.map(|ts| (t.card_id.clone(), ts))))
            .flatten()
            .collect::<Vec<_>>();
        let mut expected = taps
            .iter()
            .map(|t| (t.card_id.clone(), t.timestamp))
            .collect::<Vec<_>>();
        endpoints.sort();
        expected.sort();
        assert_eq!(endpoints, expected);
    }

    #[test]
    fn test_one_fare_lookup_per_priced_trip() {
        let fares = RecordingFares::default()
            .with_fare("Stop1", "Stop2", Decimal::new(325, 2))
            .with_max_fare("Stop3", Decimal::new(730, 2));
        let matcher = TripMatcher::new(&fares);
        let taps = vec![
            tap_on(1, datetime(22, 8, 0), "Stop1", "A"),
            tap_off(2, datetime(22, 8, 10), "Stop2", "A"),
            tap_on(3, datetime(22, 9, 0), "Stop1", "B"),
            tap_off(4, datetime(22, 9, 1), "Stop1", "B"),
            tap_on(5, datetime(22, 10, 0), "Stop3", "C"),
        ];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        assert_eq!(trips.len(), 3);
        assert_eq!(
            fares.lookups(),
            vec![String::from("fare:Stop1->Stop2"), String::from("max:Stop3")]
        );
    }

    #[test]
    fn test_unrecognized_tap_kind_is_skipped() {
        let matcher = TripMatcher::new(default_table());
        let taps = vec![
            tap_on(1, datetime(22, 13, 0), "Stop1", CARD),
            Tap::new(
                2,
                datetime(22, 13, 2),
                TapKind::from("TRANSFER"),
                "Stop2",
                "Company1",
                "Bus37",
                CARD,
            ),
            tap_off(3, datetime(22, 13, 5), "Stop2", CARD),
        ];

        let trips = matcher.match_taps(&taps).expect("should not fail");

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].status, TripStatus::Completed);
        assert_eq!(trips[0].tap_count(), 2);
    }

    #[test]
    fn test_fare_failure_aborts_batch() {
        let matcher = TripMatcher::new(default_table());
        let taps = vec![
            tap_on(1, datetime(22, 13, 0), "Stop1", CARD),
            tap_off(2, datetime(22, 13, 5), "Stop9", CARD),
        ];

        let result = matcher.match_taps(&taps);

        assert_eq!(
            result,
            Err(FareError::UnknownStopPairError(
                String::from("Stop1"),
                String::from("Stop9")
            ))
        );
    }

    #[test]
    fn test_orphan_fare_failure_aborts_batch() {
        let matcher = TripMatcher::new(default_table());
        let taps = vec![tap_off(1, datetime(22, 13, 5), "Stop9", CARD)];

        let result = matcher.match_taps(&taps);

        assert_eq!(
            result,
            Err(FareError::UnknownStopError(String::from("Stop9")))
        );
    }

    #[test]
    fn test_repeated_runs_are_identical_and_isolated() {
        let matcher = TripMatcher::new(default_table());
        let first_batch = vec![tap_on(1, datetime(22, 13, 0), "Stop1", CARD)];
        let second_batch = vec![tap_off(2, datetime(22, 13, 5), "Stop2", CARD)];

        let first = matcher.match_taps(&first_batch).expect("should not fail");
        let second = matcher.match_taps(&second_batch).expect("should not fail");
        let first_again = matcher.match_taps(&first_batch).expect("should not fail");

        // the pending tap-on from the first batch must not pair with the second
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].status, TripStatus::Incomplete);
        assert_eq!(second[0].started, None);
        assert_eq!(first, first_again);
    }

    #[test]
    fn test_concurrent_runs_match_sequential_runs() {
        let matcher = TripMatcher::new(default_table());
        let batches = (0..4u32)
            .map(|card| {
                let card_id = format!("card-{card}");
                vec![
                    tap_on(1, datetime(22, 8, card), "Stop1", &card_id),
                    tap_off(2, datetime(22, 9, card), "Stop3", &card_id),
                    tap_on(3, datetime(22, 10, card), "Stop2", &card_id),
                ]
            })
            .collect::<Vec<_>>();
        let sequential = batches
            .iter()
            .map(|batch| matcher.match_taps(batch).expect("should not fail"))
            .collect::<Vec<_>>();

        let shared = &matcher;
        let concurrent = std::thread::scope(|scope| {
            let handles = batches
                .iter()
                .map(|batch| scope.spawn(move || shared.match_taps(batch)))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|h| {
                    h.join()
                        .expect("thread should not panic")
                        .expect("should not fail")
                })
                .collect::<Vec<_>>()
        });

        assert_eq!(sequential, concurrent);
    }
}
