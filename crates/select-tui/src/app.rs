//! App — event loop around one select list.
//!
//! Architecture:
//! - A blocking reader task forwards terminal events over a `tokio::mpsc`
//!   channel; the loop draws, then awaits the next event.
//! - Keys are mapped through the `KeyMap`. List signals go out through the
//!   `InputSource`, so only an active (subscribed) list ever sees them.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::collections::VecDeque;
use std::fmt::Display;
use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use select_core::SelectItem;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::action::Action;
use crate::app_state::AppState;
use crate::component::Component;
use crate::components::select_list::SelectList;
use crate::input::{InputSource, KeyCommand, KeyMap};
use crate::widgets::status_bar::{draw_keys_bar, InputMode};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

enum AppMessage {
    Event(Event),
}

pub struct App<T: SelectItem> {
    list: SelectList<T>,
    state: AppState,
    keymap: KeyMap,
    input: InputSource,
    /// Leave the loop after the first commit.
    exit_on_commit: bool,
    should_quit: bool,
}

impl<T> App<T>
where
    T: SelectItem,
    T::Key: Display,
{
    pub fn new(
        list: SelectList<T>,
        input: InputSource,
        keymap: KeyMap,
        mut state: AppState,
        exit_on_commit: bool,
    ) -> Self {
        // A default selection counts as chosen until the user commits another.
        if state.last_selected.is_none() {
            state.last_selected = list.controller().selected_key().map(|k| k.to_string());
        }
        Self {
            list,
            state,
            keymap,
            input,
            exit_on_commit,
            should_quit: false,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn list(&self) -> &SelectList<T> {
        &self.list
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    /// Run until quit; returns the last committed value, if any.
    pub async fn run(mut self) -> anyhow::Result<Option<String>> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result?;

        info!("exiting, selected={:?}", self.state.last_selected);
        Ok(self.state.last_selected)
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard events ──────────────────────────────────
        tokio::task::spawn_blocking(move || loop {
            if tx.is_closed() {
                break;
            }
            match event::poll(POLL_INTERVAL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        });

        loop {
            terminal.draw(|f| self.draw(f))?;

            if self.should_quit() {
                break;
            }

            match rx.recv().await {
                Some(AppMessage::Event(ev)) => self.handle_event(ev),
                None => break,
            }
        }
        Ok(())
    }

    /// Feed one terminal event through key mapping, the list and dispatch.
    pub fn handle_event(&mut self, ev: Event) {
        match ev {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(w, h) => self.dispatch(Action::Resize(w, h)),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = match self.keymap.lookup(&key) {
            Some(KeyCommand::Signal(signal)) => Action::Signal(signal),
            Some(KeyCommand::ToggleActive) => Action::ToggleActive,
            Some(KeyCommand::Quit) => Action::Quit,
            None => Action::Noop,
        };
        self.dispatch(action);
    }

    fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            match &action {
                Action::Signal(signal) => {
                    let delivered = self.input.publish(*signal);
                    debug!("{:?} delivered to {} list(s)", signal, delivered);
                    queue.extend(self.list.tick(&self.state));
                }
                Action::ToggleActive => {
                    queue.extend(self.list.on_action(&action, &self.state));
                }
                Action::FocusChanged { value, position } => {
                    debug!("focus: {} (#{})", value, position);
                }
                Action::Selected { value, position } | Action::Confirmed { value, position } => {
                    info!("selected: {} (#{})", value, position);
                    self.state.last_selected = Some(value.clone());
                    if self.exit_on_commit {
                        self.should_quit = true;
                    }
                }
                Action::Quit => self.should_quit = true,
                Action::Resize(w, h) => debug!("resize {}x{}", w, h),
                Action::Noop => {}
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        self.list.draw(frame, chunks[0], &self.state);
        draw_keys_bar(
            frame,
            chunks[1],
            InputMode::from_active(self.list.is_active()),
            self.state.last_selected.as_deref(),
            &self.state.hint,
        );
    }
}
