use std::io;
use std::time::Duration;

use crossterm::event::Event;
use tokio::sync::mpsc;

use super::app::App;
use super::events::{AppEvent, InputEvent};
use super::terminal::AppTerminal;
use super::view::render;

/// Drive the UI until the user quits, then hand the app back.
pub async fn run_app(
    app: App,
    terminal: &mut AppTerminal,
    rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
    tick: Duration,
) -> io::Result<App> {
    let mut runner = AppRunner::new(app, terminal, rx, event_tx, tick);
    runner.run().await?;
    Ok(runner.app)
}

struct AppRunner<'a> {
    app: App,
    terminal: &'a mut AppTerminal,
    rx: mpsc::Receiver<AppEvent>,
    tick: tokio::time::Interval,
    dirty: bool,
}

impl<'a> AppRunner<'a> {
    fn new(
        app: App,
        terminal: &'a mut AppTerminal,
        rx: mpsc::Receiver<AppEvent>,
        event_tx: mpsc::Sender<AppEvent>,
        tick: Duration,
    ) -> Self {
        spawn_event_reader(event_tx);
        Self {
            app,
            terminal,
            rx,
            tick: tokio::time::interval(tick),
            dirty: true,
        }
    }

    async fn run(&mut self) -> io::Result<()> {
        while !self.app.should_quit() {
            if self.dirty {
                self.draw()?;
                self.dirty = false;
            }
            self.wait_for_event().await;
        }
        Ok(())
    }

    async fn wait_for_event(&mut self) {
        tokio::select! {
            Some(event) = self.rx.recv() => {
                if self.app.handle_event(event) {
                    self.dirty = true;
                }
            }
            _ = self.tick.tick() => {
                if self.app.handle_event(AppEvent::Tick) {
                    self.dirty = true;
                }
            }
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let mut max_offset = 0;
        self.terminal
            .draw(|frame| max_offset = render(frame, &self.app))?;
        self.app.clamp_scroll(max_offset);
        Ok(())
    }
}

fn spawn_event_reader(sender: mpsc::Sender<AppEvent>) {
    std::thread::spawn(move || forward_input(crossterm::event::read, &sender));
}

/// Forward terminal events until the UI goes away or reading fails. A read
/// error ends the loop with `InputEvent::Closed`.
fn forward_input(mut read: impl FnMut() -> io::Result<Event>, sender: &mpsc::Sender<AppEvent>) {
    loop {
        let event = match read() {
            Ok(ev) => ev,
            Err(e) => {
                tracing::error!("Terminal read failed: {e}");
                let _ = sender.blocking_send(AppEvent::Input(InputEvent::Closed));
                return;
            }
        };
        let mapped = match event {
            Event::Key(key) => Some(InputEvent::Key(key)),
            Event::Paste(text) => Some(InputEvent::Paste(text)),
            Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
            _ => None,
        };
        if let Some(input) = mapped {
            if sender.blocking_send(AppEvent::Input(input)).is_err() {
                return;
            }
        }
    }
}
