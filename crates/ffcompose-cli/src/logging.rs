use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Maps `-q` and the `-v` count onto the global log level. Warnings are shown
/// by default so that merges kept under `--keep-existing` stay visible.
fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(level_for(verbosity, quiet))
        .with(stderr_layer);

    match log_file {
        Some(path) => {
            let file = File::create(&path).map_err(CliError::Io)?;
            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true);
            subscriber.with(file_layer).init();
        }
        None => subscriber.init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tracing::{info, warn};

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0, false), LevelFilter::WARN);
        assert_eq!(level_for(1, false), LevelFilter::INFO);
        assert_eq!(level_for(2, false), LevelFilter::DEBUG);
        assert_eq!(level_for(7, false), LevelFilter::TRACE);
        assert_eq!(level_for(0, true), LevelFilter::ERROR);
    }

    #[test]
    #[serial]
    fn file_layer_records_events_without_ansi() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("ffcompose.log");

        let file = File::create(&log_path).unwrap();
        let subscriber = tracing_subscriber::registry()
            .with(LevelFilter::INFO)
            .with(fmt::layer().with_writer(file).with_ansi(false));

        tracing::subscriber::with_default(subscriber, || {
            info!("Merged compatible handler.");
            warn!("Keeping existing handler 'Multipole'.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("INFO"));
        assert!(content.contains("Merged compatible handler."));
        assert!(content.contains("Keeping existing handler 'Multipole'."));
        assert!(!content.contains('\u{1b}'));
    }

    #[test]
    #[serial]
    fn unwritable_log_file_is_an_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        // a directory cannot be opened as a log file
        let result = setup_logging(0, false, Some(temp_dir.path().to_path_buf()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
