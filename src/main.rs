use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

use eggicon::config::Config;
use eggicon::{generate_all, logger};

fn main() -> ExitCode {
    let config = Config::parse();
    logger::init(config.verbose);

    match generate_all(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("icon generation failed: {:?}", e);
            for line in e.user_message() {
                eprintln!("{}", line);
            }
            ExitCode::FAILURE
        }
    }
}
