use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;

use crate::form::FormState;
use crate::port::SearchPort;
use crate::view::ResultsView;

/// UI update emitted by [`ChannelPort`].
#[derive(Debug, Clone, PartialEq)]
pub enum PortEvent {
    Show(ResultsView),
    Prefill(FormState),
    ReplaceLocation(String),
}

/// `SearchPort` that forwards updates to the component tree over a channel.
///
/// The location lives here as well so the controller can read it back.
pub struct ChannelPort {
    tx: mpsc::UnboundedSender<PortEvent>,
    location: Mutex<String>,
}

impl ChannelPort {
    pub fn new(initial_location: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<PortEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let port = Self {
            tx,
            location: Mutex::new(initial_location.into()),
        };
        (port, rx)
    }

    fn emit(&self, event: PortEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("search page is gone; dropping UI update");
        }
    }
}

impl SearchPort for ChannelPort {
    fn show(&self, view: ResultsView) {
        self.emit(PortEvent::Show(view));
    }

    fn prefill(&self, form: &FormState) {
        self.emit(PortEvent::Prefill(form.clone()));
    }

    fn location_query(&self) -> String {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_location_query(&self, query: &str) {
        let query = query.trim_start_matches('?').to_string();
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) = query.clone();
        self.emit(PortEvent::ReplaceLocation(query));
    }
}
