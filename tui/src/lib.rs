//! Terminal front end for the questline client. One widget per screen, a
//! single unbounded event channel, and a navigation state machine deciding
//! which widget is live. Backend calls are simulated with timed delays so
//! every screen's pending state is exercised.

mod app;
mod app_event;
mod app_event_sender;
pub mod cli;
mod screens;
mod selection_menu;
mod styles;
mod text_field;
mod tui;

use std::time::Duration;

use color_eyre::eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub use crate::cli::Cli;

use crate::app::App;
use crate::app::Timing;
use crate::tui::Tui;

pub async fn run_main(cli: Cli) -> Result<()> {
    let _log_guard = init_logging()?;
    tracing::info!("questline starting");

    let timing = Timing {
        mock_delay: Duration::from_millis(cli.mock_delay_ms),
        carousel_interval: Duration::from_millis(cli.carousel_interval_ms),
        carousel_autoplay: !cli.no_carousel_autoplay,
    };

    let mut tui = Tui::new()?;
    App::run(&mut tui, timing).await
}

/// Logs go to a file; stdout and stderr belong to the alternate screen
/// while the app runs.
fn init_logging() -> Result<WorkerGuard> {
    let log_dir = dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("questline");
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::never(log_dir, "questline.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("questline_flow=info,questline_tui=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}
