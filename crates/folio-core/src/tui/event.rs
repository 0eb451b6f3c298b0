//! Event handling for TUI.
//!
//! Uses a separate thread to poll for terminal events and timer ticks.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick; advances scroll animation.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Pointer motion, clicks and wheel.
    Mouse(MouseEvent),
    /// Terminal resize (width, height).
    Resize(u16, u16),
}

/// Event handler that polls for terminal events in a separate thread.
pub struct EventHandler {
    rx: Receiver<Event>,
    /// Kept alive to prevent channel closure.
    _tx: Sender<Event>,
}

impl EventHandler {
    /// Creates a new event handler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            // Windows reports releases too
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                Event::Key(key)
                            }
                            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
                            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
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
