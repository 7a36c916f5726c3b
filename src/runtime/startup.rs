use std::env;

use log::{LevelFilter, info};

use crate::config;
use crate::source::{Library, SourceError};

/// Install the stderr logger unless logging is switched off.
pub fn init_logging(settings: &config::Settings) {
    let level = match settings.log_level() {
        Some(LevelFilter::Off) | None => return,
        Some(level) => level,
    };
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(level)
        .with_threads(true)
        .with_local_timestamps()
        .init()
    {
        eprintln!("tunedeck: logging unavailable: {e}");
    }
}

/// Open the library at `location`, or at the current directory.
pub fn open_library(location: Option<String>) -> Result<Library, SourceError> {
    let location = match location {
        Some(l) => l,
        None => env::current_dir()?.to_string_lossy().into_owned(),
    };
    let library = Library::open(&location)?;
    info!("Library opened at {}", library.location());
    Ok(library)
}
