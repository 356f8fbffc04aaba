use super::TapfareOperation;
use clap::Parser;

/// command line tool turning transit card taps into priced trips
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TapfareApp {
    /// select the tapfare operation to run
    #[command(subcommand)]
    pub op: TapfareOperation,
}
