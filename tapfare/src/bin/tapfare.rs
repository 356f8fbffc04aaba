use clap::Parser;
use tapfare::app::TapfareApp;

fn main() {
    env_logger::init();
    let args = TapfareApp::parse();
    match args.op.run() {
        Ok(message) => log::info!("finished: {message}"),
        Err(e) => {
            log::error!("failed running tapfare: {e}");
            std::process::exit(1);
        }
    }
}
