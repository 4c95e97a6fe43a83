//! Events emitted by a host browser instance

use embedded_browser_core::ContextMenuSnapshot;
use tokio::sync::mpsc;

/// Events a browser handle reports to its owning tab
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserEvent {
    /// The main frame committed a new URL
    Navigated { url: String },
    /// The page title changed
    TitleChanged { title: String },
    /// The page started or finished loading
    LoadingChanged { is_loading: bool },
    /// A favicon became available
    FaviconChanged { favicon_url: String },
    /// Zoom changed from inside the page, e.g. a pinch gesture
    ZoomChanged { level: f64 },
    /// The user right-clicked the page
    ContextMenuRequested { snapshot: ContextMenuSnapshot },
    /// Cmd+click or `target="_blank"`
    OpenInNewTab { url: String },
    /// Page content entered fullscreen, e.g. a video player
    FullscreenEntered,
    /// Page content left fullscreen
    FullscreenExited,
}

/// Sending side handed to [`crate::BrowserHandle::attach_listeners`]
///
/// Each handle gets its own channel; dropping the receiver when the handle is
/// discarded silences any late events from it.
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: mpsc::UnboundedSender<BrowserEvent>,
}

impl EventSink {
    /// Create a sink together with the receiver the tab listens on
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BrowserEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Deliver an event; returns false once the owning tab stopped listening
    pub fn emit(&self, event: BrowserEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sink_delivers_events() {
        let (sink, mut receiver) = EventSink::channel();
        assert!(sink.emit(BrowserEvent::TitleChanged { title: "Rust".to_string() }));

        let event = receiver.recv().await;
        assert_eq!(event, Some(BrowserEvent::TitleChanged { title: "Rust".to_string() }));
    }

    #[test]
    fn test_sink_reports_dropped_receiver() {
        let (sink, receiver) = EventSink::channel();
        drop(receiver);
        assert!(sink.is_closed());
        assert!(!sink.emit(BrowserEvent::FullscreenEntered));
    }
}
