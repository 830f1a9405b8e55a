use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::translation_service::TranslationResponse;

/// Everything the event loop reacts to, from the keyboard or from background work.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    TranslationFinished(TranslationResponse),
}

const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Forward terminal input into the event queue until the queue is closed.
pub fn spawn_key_reader(event_tx: mpsc::UnboundedSender<AppEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        debug!("Key reader started");

        while !event_tx.is_closed() {
            let ready = match event::poll(POLL_INTERVAL) {
                Ok(ready) => ready,
                Err(e) => {
                    warn!("Failed to poll terminal events: {e}");
                    break;
                }
            };
            if !ready {
                continue;
            }

            let app_event = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    warn!("Failed to read terminal event: {e}");
                    break;
                }
            };

            if event_tx.send(app_event).is_err() {
                break;
            }
        }

        debug!("Key reader stopped");
    })
}
