mod tap_pools;
mod trip_matcher;
mod trip_ops;

pub use trip_matcher::TripMatcher;
