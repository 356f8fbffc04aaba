mod process_state;
mod process_state_handler;
mod taps_processor;

pub use process_state::ProcessState;
pub use process_state_handler::ProcessStateHandler;
pub use taps_processor::TapsProcessor;
