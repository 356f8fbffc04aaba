use super::{ProcessState, ProcessStateHandler};
use crate::configuration::TapfareConfig;
use crate::{io, TapfareError};
use std::path::PathBuf;
use tapfare_core::fare::FareTable;
use tapfare_core::matching::TripMatcher;
use tapfare_core::model::TripSummary;

/// runs the whole batch: read taps, build trips, write trips.
///
/// a run either writes the complete trips file and ends
/// [`ProcessState::Completed`], or writes nothing and ends
/// [`ProcessState::Failed`].
///
/// the already-running guard covers one processor instance shared across
/// threads, not separate processes.
pub struct TapsProcessor {
    input_file: PathBuf,
    output_file: PathBuf,
    overwrite: bool,
    matcher: TripMatcher<FareTable>,
    state_handler: ProcessStateHandler,
}

impl TapsProcessor {
    pub fn new(config: &TapfareConfig) -> Result<TapsProcessor, TapfareError> {
        let fare_table = config.fare_table()?;
        Ok(TapsProcessor {
            input_file: PathBuf::from(&config.input_file),
            output_file: PathBuf::from(&config.output_file),
            overwrite: config.overwrite,
            matcher: TripMatcher::new(fare_table),
            state_handler: ProcessStateHandler::default(),
        })
    }

    pub fn state(&self) -> ProcessState {
        self.state_handler.state()
    }

    /// processes the configured taps file, returning a message naming the
    /// trips file written.
    pub fn process_taps(&self) -> Result<String, TapfareError> {
        self.state_handler.try_start()?;
        log::info!("starting taps processing of {}", self.input_file.display());
        match self.run() {
            Ok(message) => {
                self.state_handler.set_state(ProcessState::Completed);
                log::info!("{message}");
                Ok(message)
            }
            Err(e) => {
                log::error!("taps processing failed: {e}");
                self.state_handler.set_state(ProcessState::Failed);
                Err(e)
            }
        }
    }

    fn run(&self) -> Result<String, TapfareError> {
        let taps = io::read_taps(&self.input_file)?;
        let trips = self.matcher.match_taps(&taps)?;
        let summary = TripSummary::new(&trips);
        if summary.taps_covered < taps.len() {
            log::warn!(
                "{} of {} taps were skipped",
                taps.len() - summary.taps_covered,
                taps.len()
            );
        }
        log::info!("{summary}");
        io::write_trips(&trips, &self.output_file, self.overwrite)?;
        Ok(format!(
            "processing completed, output saved to {}",
            self.output_file.display()
        ))
    }
}
