use super::TapKind;
use crate::util::datetime_codec::{deserialize_naive_datetime, serialize_naive_datetime};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// a single scan of a card at a stop, as read from a taps file.
///
/// CSV rows as currently defined:
/// ID, DateTimeUTC, TapType, StopId, CompanyId, BusID, PAN
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Tap {
    #[serde(rename = "ID")]
    pub id: u64,
    /// time of the scan, in dd-mm-yyyy HH:MM:SS format
    #[serde(
        rename = "DateTimeUTC",
        deserialize_with = "deserialize_naive_datetime",
        serialize_with = "serialize_naive_datetime"
    )]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "TapType")]
    pub kind: TapKind,
    #[serde(rename = "StopId")]
    pub stop_id: String,
    /// operator of the vehicle
    #[serde(rename = "CompanyId")]
    pub company_id: String,
    #[serde(rename = "BusID")]
    pub vehicle_id: String,
    /// card account surrogate (PAN), the key used to pair taps
    #[serde(rename = "PAN")]
    pub card_id: String,
}

impl Tap {
    pub fn new(
        id: u64,
        timestamp: NaiveDateTime,
        kind: TapKind,
        stop_id: &str,
        company_id: &str,
        vehicle_id: &str,
        card_id: &str,
    ) -> Tap {
        Tap {
            id,
            timestamp,
            kind,
            stop_id: stop_id.to_string(),
            company_id: company_id.to_string(),
            vehicle_id: vehicle_id.to_string(),
            card_id: card_id.to_string(),
        }
    }

    /// calendar date of this tap.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// true if both taps were made on the same calendar date.
    pub fn is_same_day(&self, other: &Tap) -> bool {
        self.date() == other.date()
    }
}
