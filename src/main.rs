use std::fs::File;
use std::sync::Mutex;

use matrix_ticker::config::fetch_config;
use matrix_ticker::{TickerError, tui};

#[tokio::main]
async fn main() -> Result<(), TickerError> {
    let app_config = fetch_config()?;

    // The terminal belongs to the UI, so tracing goes to a file.
    let log_file = File::create(&app_config.logging.file).map_err(|e| {
        TickerError::Io(format!(
            "failed to create log file {}: {e}",
            app_config.logging.file.display()
        ))
    })?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(app_config.logging.level)
        .init();

    tracing::info!(url = %app_config.feed.websocket_url, "Starting ticker");
    tui::run(app_config).await
}
