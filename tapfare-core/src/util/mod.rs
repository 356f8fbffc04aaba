pub mod currency_codec;
pub mod datetime_codec;
