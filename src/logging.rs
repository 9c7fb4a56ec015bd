use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "empresas_scraper.log";

/// Console logging plus a daily-rotated JSON log under `logs/`.
/// Called once at startup, before configuration is even loaded, so
/// config problems themselves get logged.
pub fn init_logging() {
    let _ = std::fs::create_dir_all(LOG_DIR);

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(LOG_DIR, LOG_FILE));

    // RUST_LOG wins when set; otherwise log this crate at info
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("empresas_scraper=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();

    // the writer guard must outlive the run or buffered lines are lost
    std::mem::forget(guard);
}
