mod operation;
mod tapfare_app;

pub use operation::TapfareOperation;
pub use tapfare_app::TapfareApp;
