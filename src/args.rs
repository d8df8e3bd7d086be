use ft::Result;

use std::{
    env,
    fs,
    path::PathBuf,
};

use anyhow::Context;

use thiserror::Error;

/// Environment variable consulted when no data directory argument is given
pub const DATA_DIR_ENV: &str = "FINANCE_TRACKER_DIR";

const DEFAULT_DATA_DIR: &str = ".finance-tracker";

#[derive(Error, Debug)]
pub enum InputArgsError {
    #[error("Couldn't parse input arguments: {0}")]
    Parse(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

/// Parses the input arguments, allowing at most one: the data directory
pub fn parse_data_dir_arg() -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    let arg = args.next();

    if args.next().is_some() {
        Err(InputArgsError::Parse("Expected at most one argument: the data directory.".to_string()))?
    }

    if let Some(arg) = &arg {
        if arg.starts_with('-') {
            Err(InputArgsError::Parse(format!("Unknown option: {arg}")))?
        }
    }

    Ok(resolve_data_dir(arg, env::var(DATA_DIR_ENV).ok()))
}

fn resolve_data_dir(arg: Option<String>, env_dir: Option<String>) -> PathBuf {
    arg.or(env_dir)
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Resolves the path given to `import`, requiring an existing file
pub fn resolve_import_path(filename: &str) -> Result<PathBuf> {
    let path = fs::canonicalize(filename)
        .with_context(|| InputArgsError::FileNotFound(filename.to_string()))?;

    Ok(path)
}
