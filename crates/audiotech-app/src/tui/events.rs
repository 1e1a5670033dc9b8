use audiotech_ai::{SessionError, SessionManager};
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum InputEvent {
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    /// The terminal stopped delivering input.
    Closed,
}

/// Everything the UI loop reacts to. The session manager travels with the
/// events that end a background task, so only one task can hold it.
pub enum AppEvent {
    Input(InputEvent),
    Tick,
    /// Startup initialization finished, successfully or not.
    SessionReady(Box<SessionManager>),
    Reply {
        manager: Box<SessionManager>,
        result: Result<String, SessionError>,
    },
}
