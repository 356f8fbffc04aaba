mod tap_reader;
mod trip_writer;

pub use tap_reader::{read_taps, read_taps_from};
pub use trip_writer::{write_trips, write_trips_to};
