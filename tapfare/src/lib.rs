//! batch driver for [`tapfare_core`]: reads a taps file, pairs and prices
//! the taps, and writes the resulting trips file.
pub mod app;
pub mod configuration;
pub mod io;
pub mod process;
mod tapfare_error;

pub use tapfare_error::TapfareError;
