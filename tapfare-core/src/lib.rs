//! pairs transit smart-card taps into trips and prices them.
//!
//! the [`matching::TripMatcher`] consumes a batch of [`model::Tap`] records
//! and produces one [`model::Trip`] per matched tap-on/tap-off pair or per
//! orphaned tap, pricing each through a [`fare::FareCalculator`].
pub mod fare;
pub mod matching;
pub mod model;
pub mod util;
