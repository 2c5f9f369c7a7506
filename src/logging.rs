use std::path::PathBuf;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::Result;

const DEFAULT_LOG_FILTER: &str = "info";
const LOG_FILE_PREFIX: &str = "planner_logs";

pub struct FileLogger {
    log_directory: PathBuf,
    rotation: Rotation,
}

impl FileLogger {
    pub fn new(log_directory: PathBuf) -> Self {
        Self {
            log_directory,
            rotation: Rotation::DAILY,
        }
    }

    pub fn setup_file_logging(&self) -> Result<(NonBlocking, WorkerGuard)> {
        // Ensure log directory exists
        std::fs::create_dir_all(&self.log_directory)?;

        let file_appender =
            RollingFileAppender::new(self.rotation.clone(), &self.log_directory, LOG_FILE_PREFIX);

        Ok(tracing_appender::non_blocking(file_appender))
    }
}

/// Installs console logging, plus file logging when `file_logger` is given.
/// The returned guard must be held for as long as file logs should be flushed.
pub fn setup_logging(file_logger: Option<&FileLogger>) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (file_layer, guard) = match file_logger {
        Some(logger) => {
            let (writer, guard) = logger.setup_file_logging()?;
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false); // Disable ANSI colors for file logs
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer()) // Console output
        .with(file_layer)
        .init();

    Ok(guard)
}
