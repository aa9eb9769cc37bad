use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Keeps the non-blocking file writer flushing until dropped.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// Console output goes to stderr so stdout carries only the JSON result.
/// With `log_dir` set, a daily-rolling `bonus-cli.log` is written as well.
pub fn init_tracing(config: &Config) -> LogGuard {
    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    let file = config.log_dir.as_deref().and_then(|dir| {
        std::fs::create_dir_all(dir)
            .map_err(|err| eprintln!("failed to create log directory {dir}: {err}"))
            .ok()?;
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "bonus-cli.log");
        Some(tracing_appender::non_blocking(appender))
    });

    match file {
        Some((writer, guard)) => {
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();
            LogGuard { _file: Some(guard) }
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .init();
            LogGuard { _file: None }
        }
    }
}
