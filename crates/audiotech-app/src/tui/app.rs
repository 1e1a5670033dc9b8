//! UI state and event handling.

use audiotech_ai::{SessionManager, TokenUsage};
use audiotech_common::ImageAttachment;
use audiotech_config::schema::UiConfig;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::conversation::{Conversation, PendingRequest};
use crate::quick_actions;

use super::composer::{parse_command, Composer, ComposerCommand};
use super::events::{AppEvent, InputEvent};

/// One-line feedback shown above the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub struct App {
    conversation: Conversation,
    /// `None` while a background task holds the manager.
    manager: Option<Box<SessionManager>>,
    /// Submitted while startup initialization still held the manager.
    queued: Option<PendingRequest>,
    composer: Composer,
    notice: Option<Notice>,
    /// Lines scrolled up from the bottom of the history.
    scroll_offset: u16,
    frame: u64,
    usage: TokenUsage,
    model_name: String,
    ui: UiConfig,
    should_quit: bool,
    events: mpsc::Sender<AppEvent>,
}

impl App {
    pub fn new(manager: SessionManager, ui: UiConfig, events: mpsc::Sender<AppEvent>) -> Self {
        Self {
            conversation: Conversation::new(),
            model_name: manager.model_name().to_string(),
            manager: Some(Box::new(manager)),
            queued: None,
            composer: Composer::default(),
            notice: None,
            scroll_offset: 0,
            frame: 0,
            usage: TokenUsage::default(),
            ui,
            should_quit: false,
            events,
        }
    }

    /// Create the chat session in the background. Failures are logged by
    /// the manager; the next send retries.
    pub fn start_session(&mut self) {
        let Some(mut manager) = self.manager.take() else {
            return;
        };
        let tx = self.events.clone();
        tokio::spawn(async move {
            let _ = manager.initialize().await;
            let _ = tx.send(AppEvent::SessionReady(manager)).await;
        });
    }

    /// Apply one event. Returns true when the screen needs a redraw.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Input(InputEvent::Key(key)) => self.handle_key(key),
            AppEvent::Input(InputEvent::Paste(text)) => {
                self.composer.insert_str(&text);
                true
            }
            AppEvent::Input(InputEvent::Resize(..)) => true,
            AppEvent::Input(InputEvent::Closed) => {
                warn!("Terminal input closed, quitting");
                self.should_quit = true;
                true
            }
            AppEvent::Tick => {
                if self.conversation.is_loading() {
                    self.frame = self.frame.wrapping_add(1);
                    true
                } else {
                    false
                }
            }
            AppEvent::SessionReady(manager) => {
                debug!(initialized = manager.is_initialized(), "Session manager returned");
                self.manager = Some(manager);
                if let Some(request) = self.queued.take() {
                    self.dispatch(request);
                }
                true
            }
            AppEvent::Reply { manager, result } => {
                self.usage = manager.usage();
                self.manager = Some(manager);
                self.conversation.complete(result);
                self.scroll_offset = 0;
                true
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Enter if alt || shift => self.composer.newline(),
            KeyCode::Enter => self.submit_composer(),
            KeyCode::Esc => {
                if self.composer.detach().is_some() {
                    self.notice = Some(Notice::Info("Imagem removida.".into()));
                } else {
                    self.notice = None;
                }
            }
            KeyCode::Backspace => self.composer.backspace(),
            KeyCode::Delete => self.composer.delete(),
            KeyCode::Left => self.composer.move_left(),
            KeyCode::Right => self.composer.move_right(),
            KeyCode::Home => self.composer.move_home(),
            KeyCode::End => self.composer.move_end(),
            KeyCode::PageUp => self.scroll_up(),
            KeyCode::PageDown => self.scroll_down(),
            KeyCode::F(n) => return self.run_quick_action(n),
            // AltGr arrives as Ctrl+Alt on some layouts.
            KeyCode::Char(ch) if !ctrl || alt => self.composer.insert_char(ch),
            _ => return false,
        }
        true
    }

    fn submit_composer(&mut self) {
        if let Some(command) = parse_command(self.composer.text()) {
            self.run_command(command);
            return;
        }

        let text = self.composer.text().to_string();
        let image = self.composer.image().cloned();
        if let Some(request) = self.conversation.submit(&text, image) {
            self.composer.take();
            self.notice = None;
            self.scroll_offset = 0;
            self.dispatch(request);
        }
    }

    fn run_command(&mut self, command: ComposerCommand) {
        match command {
            ComposerCommand::Attach(path) => match ImageAttachment::from_path(&path) {
                Ok(image) => {
                    let label = image.label().unwrap_or("imagem").to_string();
                    self.composer.attach(image);
                    self.composer.clear_text();
                    self.notice = Some(Notice::Info(format!("Imagem anexada: {label}")));
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Attachment rejected");
                    self.notice = Some(Notice::Error(format!(
                        "Não foi possível anexar a imagem: {e}"
                    )));
                }
            },
            ComposerCommand::Detach => {
                self.composer.clear_text();
                if self.composer.detach().is_some() {
                    self.notice = Some(Notice::Info("Imagem removida.".into()));
                }
            }
        }
    }

    fn run_quick_action(&mut self, n: u8) -> bool {
        if !self.quick_actions_visible() {
            return false;
        }
        let Some(action) = quick_actions::for_function_key(n) else {
            return false;
        };
        match self.conversation.submit(action.prompt, None) {
            Some(request) => {
                self.dispatch(request);
                true
            }
            None => false,
        }
    }

    fn dispatch(&mut self, request: PendingRequest) {
        let Some(mut manager) = self.manager.take() else {
            self.queued = Some(request);
            return;
        };
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = manager.send(&request.text, request.image.as_ref()).await;
            let _ = tx.send(AppEvent::Reply { manager, result }).await;
        });
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(self.scroll_step());
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(self.scroll_step());
    }

    fn scroll_step(&self) -> u16 {
        u16::try_from(self.ui.scroll_step).unwrap_or(u16::MAX)
    }

    /// Keep the offset within what the last frame could show.
    pub fn clamp_scroll(&mut self, max_offset: u16) {
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// Hand the manager back for shutdown, if no task holds it.
    pub fn into_manager(self) -> Option<SessionManager> {
        self.manager.map(|m| *m)
    }

    // -- Getters --

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn usage(&self) -> &TokenUsage {
        &self.usage
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn quick_actions_visible(&self) -> bool {
        self.ui.show_quick_actions && self.conversation.state().is_empty()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
