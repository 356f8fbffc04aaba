mod tap;
mod tap_kind;
mod trip;
mod trip_status;
mod trip_summary;

pub use tap::Tap;
pub use tap_kind::TapKind;
pub use trip::Trip;
pub use trip_status::TripStatus;
pub use trip_summary::TripSummary;
