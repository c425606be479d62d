use crate::state::State;
use anyhow::Result;
use crossterm::{
    event,
    event::{
        Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
};
use log::*;
use std::{
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Two clicks on the same row within this window count as a double-click.
///
const DOUBLE_CLICK_IN_MS: u64 = 500;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<CrosstermEvent>>,
    _tx: mpsc::Sender<Event<CrosstermEvent>>,
    last_click: Option<(usize, Instant)>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(input) => {
                            if tx_clone.send(Event::Input(input)).is_err() {
                                break;
                            }
                        }
                        Err(e) => error!("Failed to read terminal event: {}", e),
                    },
                    Ok(false) => (),
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler::with_channel(tx, rx)
    }

    fn with_channel(
        tx: mpsc::Sender<Event<CrosstermEvent>>,
        rx: mpsc::Receiver<Event<CrosstermEvent>>,
    ) -> Self {
        Handler {
            rx,
            _tx: tx,
            last_click: None,
        }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&mut self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(CrosstermEvent::Key(key)) => Ok(self.handle_key(state, key)),
            Event::Input(CrosstermEvent::Mouse(mouse)) => {
                self.handle_mouse(state, mouse, Instant::now());
                Ok(true)
            }
            Event::Input(_) | Event::Tick => Ok(true),
        }
    }

    /// Apply a key press. Returns false if exit was requested.
    ///
    fn handle_key(&mut self, state: &mut State, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }
        if let KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } = key
        {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        if state.contact_list().editor().is_visible() {
            self.handle_editor_key(state, key);
            return true;
        }
        if key.code == KeyCode::Char('L') {
            state.toggle_log();
            return true;
        }
        let list = state.contact_list_mut();
        match key {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            } => {
                debug!("Processing exit terminal event '{:?}'...", key);
                return false;
            }
            KeyEvent {
                code: KeyCode::Char('j') | KeyCode::Down,
                ..
            } => list.select_next(),
            KeyEvent {
                code: KeyCode::Char('k') | KeyCode::Up,
                ..
            } => list.select_previous(),
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => list.edit_selected(),
            KeyEvent {
                code: KeyCode::Char('n'),
                ..
            } => list.begin_create(),
            _ => trace!("Ignoring key {:?}", key),
        }
        true
    }

    fn handle_editor_key(&mut self, state: &mut State, key: KeyEvent) {
        let list = state.contact_list_mut();
        match key {
            KeyEvent {
                code: KeyCode::Esc, ..
            } => list.discard(),
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => list.commit(),
            KeyEvent {
                code: KeyCode::Char('d'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => list.delete(),
            KeyEvent {
                code: KeyCode::Tab, ..
            } => list.editor_mut().focus_next(),
            KeyEvent {
                code: KeyCode::BackTab,
                ..
            } => list.editor_mut().focus_previous(),
            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => list.erase_char(),
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                ..
            } => list.type_char(c),
            _ => trace!("Ignoring editor key {:?}", key),
        }
    }

    /// Translate left clicks on the contact table into row clicks, turning a
    /// second click on the same row into a double-click.
    ///
    fn handle_mouse(&mut self, state: &mut State, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if state.contact_list().editor().is_visible() {
            return;
        }
        let index = match state.row_at(mouse.column, mouse.row) {
            Some(index) => index,
            None => {
                self.last_click = None;
                return;
            }
        };
        let window = Duration::from_millis(DOUBLE_CLICK_IN_MS);
        match self.last_click.take() {
            Some((last, at)) if last == index && now.duration_since(at) <= window => {
                state.contact_list_mut().double_click_row(index);
            }
            _ => {
                state.contact_list_mut().click_row(index);
                self.last_click = Some((index, now));
            }
        }
    }
}
