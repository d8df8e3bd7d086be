mod args;
mod config;
mod reader;
mod shell;
mod terminal;
mod writer;

use ft::{storage::FileStorage, Result, Tracker};

use std::io;

use terminal::TerminalRenderer;

fn main() -> Result {
    let app_config = config::configure_app()?;

    log::debug!("Application configured: {app_config:?}");

    let storage = FileStorage::open(app_config.data_dir)?;
    let mut tracker = Tracker::open(storage, TerminalRenderer::new(io::stdout()))?;

    log::debug!("Loaded {} transactions. Starting shell...", tracker.store().len());

    let stdin = io::stdin();
    shell::run(&mut tracker, stdin.lock(), &mut io::stdout())?;

    log::debug!("Application finished successfully!");

    Ok(())
}
