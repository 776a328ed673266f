//! Event handling for the TUI.
//!
//! A separate thread polls the terminal for input and emits ticks on
//! timeout, so the main loop can block on a single channel.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEventKind};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick for data refresh.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize; geometry is re-read from the frame on draw.
    Resize,
    /// Mouse wheel, in scrolled lines (negative = up).
    Scroll(i64),
}

/// Lines scrolled per wheel notch.
const WHEEL_LINES: i64 = 3;

/// Polls crossterm events on a dedicated thread.
pub struct EventHandler {
    rx: Receiver<Event>,
    /// Kept alive to prevent channel closure.
    _tx: Sender<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                Event::Key(key)
                            }
                            CrosstermEvent::Resize(_, _) => Event::Resize,
                            CrosstermEvent::Mouse(mouse) => match mouse.kind {
                                MouseEventKind::ScrollUp => Event::Scroll(-WHEEL_LINES),
                                MouseEventKind::ScrollDown => Event::Scroll(WHEEL_LINES),
                                _ => continue,
                            },
                            _ => continue,
                        };
                        if event_tx.send(event).is_err() {
                            break;
                        }
                    }
                } else if event_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
