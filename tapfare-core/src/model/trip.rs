use super::{Tap, TripStatus};
use crate::util::currency_codec::{deserialize_currency, serialize_currency};
use crate::util::datetime_codec::{
    deserialize_optional_naive_datetime, serialize_optional_naive_datetime,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// a priced journey built from a tap-on, a tap-off, or both.
///
/// CSV rows as currently defined:
/// Started, Finished, DurationSecs, FromStopId, ToStopId, ChargeAmount,
/// CompanyId, BusID, PAN, Status
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Trip {
    /// tap-on time, absent for a trip built from an orphan tap-off
    #[serde(
        rename = "Started",
        deserialize_with = "deserialize_optional_naive_datetime",
        serialize_with = "serialize_optional_naive_datetime"
    )]
    pub started: Option<NaiveDateTime>,
    /// tap-off time, absent for a trip built from an orphan tap-on
    #[serde(
        rename = "Finished",
        deserialize_with = "deserialize_optional_naive_datetime",
        serialize_with = "serialize_optional_naive_datetime"
    )]
    pub finished: Option<NaiveDateTime>,
    #[serde(rename = "DurationSecs")]
    pub duration_secs: i64,
    #[serde(rename = "FromStopId")]
    pub from_stop_id: Option<String>,
    #[serde(rename = "ToStopId")]
    pub to_stop_id: Option<String>,
    #[serde(
        rename = "ChargeAmount",
        deserialize_with = "deserialize_currency",
        serialize_with = "serialize_currency"
    )]
    pub charge_amount: Decimal,
    #[serde(rename = "CompanyId")]
    pub company_id: String,
    #[serde(rename = "BusID")]
    pub vehicle_id: String,
    #[serde(rename = "PAN")]
    pub card_id: String,
    #[serde(rename = "Status")]
    pub status: TripStatus,
}

impl Trip {
    /// column names of a trips file, used when there are no rows to
    /// derive a header from.
    pub const CSV_HEADER: [&'static str; 10] = [
        "Started",
        "Finished",
        "DurationSecs",
        "FromStopId",
        "ToStopId",
        "ChargeAmount",
        "CompanyId",
        "BusID",
        "PAN",
        "Status",
    ];

    /// a journey between two different stops.
    pub fn completed(tap_on: &Tap, tap_off: &Tap, fare: Decimal) -> Trip {
        let duration_secs = (tap_off.timestamp - tap_on.timestamp).num_seconds();
        Trip::paired(tap_on, tap_off, duration_secs, fare, TripStatus::Completed)
    }

    /// a tap-on and tap-off at the same stop. never charged.
    pub fn cancelled(tap_on: &Tap, tap_off: &Tap) -> Trip {
        Trip::paired(tap_on, tap_off, 0, Decimal::ZERO, TripStatus::Cancelled)
    }

    /// a tap-on that was never followed by a tap-off.
    pub fn incomplete_from_tap_on(tap_on: &Tap, max_fare: Decimal) -> Trip {
        Trip {
            started: Some(tap_on.timestamp),
            finished: None,
            duration_secs: 0,
            from_stop_id: Some(tap_on.stop_id.clone()),
            to_stop_id: None,
            charge_amount: max_fare,
            company_id: tap_on.company_id.clone(),
            vehicle_id: tap_on.vehicle_id.clone(),
            card_id: tap_on.card_id.clone(),
            status: TripStatus::Incomplete,
        }
    }

    /// a tap-off that was never preceded by a tap-on.
    pub fn incomplete_from_tap_off(tap_off: &Tap, max_fare: Decimal) -> Trip {
        Trip {
            started: None,
            finished: Some(tap_off.timestamp),
            duration_secs: 0,
            from_stop_id: None,
            to_stop_id: Some(tap_off.stop_id.clone()),
            charge_amount: max_fare,
            company_id: tap_off.company_id.clone(),
            vehicle_id: tap_off.vehicle_id.clone(),
            card_id: tap_off.card_id.clone(),
            status: TripStatus::Incomplete,
        }
    }

    /// number of taps this trip accounts for.
    pub fn tap_count(&self) -> usize {
        usize::from(self.started.is_some()) + usize::from(self.finished.is_some())
    }

    // card, company and vehicle come from the tap-on side
    fn paired(
        tap_on: &Tap,
        tap_off: &Tap,
        duration_secs: i64,
        charge_amount: Decimal,
        status: TripStatus,
    ) -> Trip {
        Trip {
            started: Some(tap_on.timestamp),
            finished: Some(tap_off.timestamp),
            duration_secs,
            from_stop_id: Some(tap_on.stop_id.clone()),
            to_stop_id: Some(tap_off.stop_id.clone()),
            charge_amount,
            company_id: tap_on.company_id.clone(),
            vehicle_id: tap_on.vehicle_id.clone(),
            card_id: tap_on.card_id.clone(),
            status,
        }
    }
}
