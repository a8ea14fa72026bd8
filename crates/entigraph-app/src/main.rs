//! Main application entry point (native).

use clap::Parser;
use entigraph_app::{App, Cli};

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting Entigraph");

    if let Err(e) = App::run(Cli::parse()) {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    if let Err(e) = App::run(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
