use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::Config;

/// Set up application logging based on configuration
pub fn setup_logging(config: &Config) -> WorkerGuard {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    match config.log_file_path() {
        None => {
            // No file path configured: log to stderr
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .expect("Failed to set global tracing subscriber");

            // Both branches hand back the same guard type; this one is
            // attached to a writer that is never used
            let (_writer, guard) = tracing_appender::non_blocking(
                tracing_appender::rolling::never(std::env::temp_dir(), "unused.log"),
            );
            guard
        }
        Some(path) => {
            let log_path = std::path::PathBuf::from(path);
            let log_dir = log_path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| {
                    dirs::data_local_dir()
                        .unwrap_or_else(std::env::temp_dir)
                        .join("gh-explorer")
                        .join("logs")
                });
            std::fs::create_dir_all(&log_dir).expect("Failed to create log directory");

            let file_name = log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("gh-explorer.log"));
            let appender = tracing_appender::rolling::never(&log_dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .expect("Failed to set global tracing subscriber");

            guard
        }
    }
}
