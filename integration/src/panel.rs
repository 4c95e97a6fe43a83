/// Side panel browser
///
/// A single browser instance behind a plain URL bar. Creation is attempted
/// once; a failure is shown as is with no retry.

use crate::tab::next_event;
use browser_connector::*;
use page_manager::*;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// User input delivered to the side panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    EditAddress(String),
    /// Load the address text
    Submit,
    Back,
    Forward,
    Reload,
}

/// Main area of the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    Loading,
    Error { message: String },
    Browser,
    Stub,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub content: PanelContent,
    pub address_text: String,
    pub current_url: String,
    pub title: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl PanelView {
    fn new(url: &str, content: PanelContent) -> Self {
        Self {
            content,
            address_text: url.to_string(),
            current_url: url.to_string(),
            title: DEFAULT_TAB_TITLE.to_string(),
            can_go_back: false,
            can_go_forward: false,
        }
    }
}

/// Host-facing side of the side panel; dropping it disposes the browser
pub struct BrowserPanel {
    view: watch::Receiver<PanelView>,
    runtime: Option<(mpsc::UnboundedSender<PanelCommand>, JoinHandle<()>)>,
}

impl BrowserPanel {
    /// Start the panel at `url`; must be called inside a tokio runtime
    pub fn spawn(capabilities: &HostCapabilities, url: &str) -> Self {
        let browser = match capabilities.resolve() {
            TabBackend::Full(services) => services.browser,
            TabBackend::Stub => {
                let (_, view) = watch::channel(PanelView::new(url, PanelContent::Stub));
                return Self { view, runtime: None };
            }
        };

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (view_tx, view) = watch::channel(PanelView::new(url, PanelContent::Loading));
        let actor = PanelActor {
            browser,
            handle: None,
            view: view_tx,
        };

        let task = tokio::spawn(actor.run(url.to_string(), command_rx));
        Self {
            view,
            runtime: Some((command_tx, task)),
        }
    }

    pub fn send(&self, command: PanelCommand) -> Result<()> {
        match &self.runtime {
            Some((commands, _)) => commands.send(command).map_err(|_| SystemError::TabClosed.into()),
            None => Ok(()),
        }
    }

    pub fn view(&self) -> PanelView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PanelView> {
        self.view.clone()
    }
}

impl Drop for BrowserPanel {
    fn drop(&mut self) {
        if let Some((_, task)) = &self.runtime {
            task.abort();
        }
    }
}

struct PanelActor {
    browser: Arc<dyn BrowserService>,
    handle: Option<Arc<dyn BrowserHandle>>,
    view: watch::Sender<PanelView>,
}

impl PanelActor {
    async fn run(mut self, url: String, mut commands: mpsc::UnboundedReceiver<PanelCommand>) {
        let mut events = self.create(&url).await;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
                Some(event) = next_event(&mut events) => self.handle_event(event),
            }
        }
    }

    async fn create(&mut self, url: &str) -> Option<mpsc::UnboundedReceiver<BrowserEvent>> {
        match self.browser.create_browser(BrowserConfig::new(url)).await {
            Ok(Some(handle)) => {
                info!("Side panel browser created at {}", url);
                let (sink, receiver) = EventSink::channel();
                handle.attach_listeners(sink);
                self.handle = Some(handle);
                self.view.send_modify(|view| view.content = PanelContent::Browser);
                Some(receiver)
            }
            Ok(None) => {
                self.show_error(
                    BrowserError::NoInstance {
                        url: url.to_string(),
                    }
                    .into(),
                );
                None
            }
            Err(e) => {
                self.show_error(e);
                None
            }
        }
    }

    fn show_error(&self, error: BrowserTabError) {
        warn!("Side panel browser creation failed: {}", error);
        let message = creation_failure_message(&error);
        self.view.send_modify(|view| view.content = PanelContent::Error { message });
    }

    async fn handle_command(&mut self, command: PanelCommand) {
        if let PanelCommand::EditAddress(text) = command {
            self.view.send_modify(|view| view.address_text = text);
            return;
        }
        let Some(handle) = self.handle.clone() else {
            return;
        };
        match command {
            PanelCommand::EditAddress(_) => {}
            PanelCommand::Submit => {
                let url = interpret_url_input(&self.view.borrow().address_text);
                if let Err(e) = handle.load_url(&url).await {
                    warn!("Side panel navigation to {} failed: {}", url, e);
                }
            }
            PanelCommand::Back => handle.go_back(),
            PanelCommand::Forward => handle.go_forward(),
            PanelCommand::Reload => handle.reload(),
        }
    }

    fn handle_event(&mut self, event: BrowserEvent) {
        let (can_go_back, can_go_forward) = match &self.handle {
            Some(handle) => (handle.can_go_back(), handle.can_go_forward()),
            None => (false, false),
        };

        match event {
            BrowserEvent::Navigated { url } => self.view.send_modify(|view| {
                view.address_text = url.clone();
                view.current_url = url;
                view.can_go_back = can_go_back;
                view.can_go_forward = can_go_forward;
            }),
            BrowserEvent::TitleChanged { title } => self.view.send_modify(|view| view.title = title),
            other => debug!("Side panel ignores {:?}", other),
        }
    }
}

impl Drop for PanelActor {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.dispose();
        }
    }
}

/// Text of the panel error view, the factory's own message when it gave one
fn creation_failure_message(error: &BrowserTabError) -> String {
    match error {
        BrowserTabError::Browser {
            source: BrowserError::NoInstance { .. },
        } => "Failed to create browser instance".to_string(),
        BrowserTabError::Browser {
            source: BrowserError::CreationFailed { reason },
        }
        | BrowserTabError::Provider {
            source: ProviderError::CallFailed { reason, .. },
        } if !reason.trim().is_empty() => reason.clone(),
        other => other.source_message(),
    }
}
