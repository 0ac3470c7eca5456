use pipemeter_core::logging;

mod cli;

use crate::cli::{Cli, Outcome};

#[tokio::main]
async fn main() {
    // stderr is the status channel; only fall back to it when the log file is unavailable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    match Cli::run_from_args().await {
        Ok(Outcome::Completed) => {}
        Ok(Outcome::Interrupted) => {
            eprintln!("Interrupted");
            std::process::exit(130);
        }
        Err(err) => {
            eprintln!("pipemeter error: {:#}", err);
            std::process::exit(1);
        }
    }
}
