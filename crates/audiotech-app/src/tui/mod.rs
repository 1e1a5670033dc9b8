//! Full-screen terminal chat.

mod app;
mod composer;
mod events;
mod markdown;
mod runner;
pub mod terminal;
mod view;

use std::time::Duration;

use audiotech_ai::SessionManager;
use audiotech_common::AudioTechError;
use audiotech_config::schema::UiConfig;
use tokio::sync::mpsc;

/// Run the chat UI until the user quits. Returns the session manager
/// unless a request still held it at exit.
pub async fn run(
    manager: SessionManager,
    ui: UiConfig,
) -> Result<Option<SessionManager>, AudioTechError> {
    let (tx, rx) = mpsc::channel(256);
    let tick = Duration::from_millis(u64::from(ui.tick_ms));
    let mut app = app::App::new(manager, ui, tx.clone());
    app.start_session();

    let mut terminal =
        terminal::init_terminal().map_err(|e| AudioTechError::Terminal(e.to_string()))?;
    let result = runner::run_app(app, &mut terminal, rx, tx, tick).await;
    terminal::restore_terminal().map_err(|e| AudioTechError::Terminal(e.to_string()))?;

    let app = result.map_err(|e| AudioTechError::Terminal(e.to_string()))?;
    Ok(app.into_manager())
}
