use crate::args;

use ft::Result;

use std::path::PathBuf;

use log::LevelFilter;
use simple_logger::SimpleLogger;

#[derive(Debug)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

/// Installs the stderr logger (`RUST_LOG` overrides the level) and resolves where data is kept
pub fn configure_app() -> Result<AppConfig> {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()?;

    let data_dir = args::parse_data_dir_arg()?;

    Ok(AppConfig { data_dir })
}
