/// Browser tab actor
///
/// Each tab runs as one tokio task that owns all of its state. Host browser
/// events, user commands, backoff and focus-loss deadlines, health-check
/// ticks and results of spawned host calls are multiplexed with
/// `tokio::select!`. The host reads the tab through the [`TabView`] it
/// publishes on a watch channel.

use crate::error_handler::ErrorHandler;
use crate::input::{MouseAction, Shortcut};
use crate::view::*;
use crate::PluginConfig;
use browser_connector::*;
use page_manager::*;
use std::future::pending;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

/// User input delivered to a tab
#[derive(Debug, Clone, PartialEq)]
pub enum TabCommand {
    /// Address bar text or caret changed
    EditAddress { text: String, selection: TextSelection },
    /// Key pressed in the address bar
    AddressKey(ToolbarKey),
    AddressFocusLost,
    /// Click on a suggestion dropdown row
    SelectSuggestion(usize),
    /// Load typed text, e.g. from a dashboard shortcut
    Navigate(String),
    Back,
    Forward,
    /// Reload button: stops a running load, otherwise loads the address text
    RefreshOrStop,
    ToggleBookmark,
    Shortcut(Shortcut),
    MouseButton(u16),
    /// Click on a context menu row
    SelectMenuItem(usize),
    DismissMenu,
    SecretQuery(String),
    /// Pick a secret in the "Show All Secrets" dialog by id
    SelectSecret(String),
    CloseSecretDialog,
    EditCreateSecret(CreateSecretForm),
    SubmitCreateSecret,
    CloseCreateSecretDialog,
    ExitFullscreen,
    /// Retry button of the error view
    Retry,
}

/// Results of host calls spawned by the actor
enum Internal {
    Created(Result<Option<Arc<dyn BrowserHandle>>>),
    SecretsLoaded(Result<Vec<SecretEntry>>),
    MenuSecrets {
        snapshot: ContextMenuSnapshot,
        result: Result<Vec<SecretEntry>>,
    },
    SecretCreated(Result<SecretEntry>),
}

/// Host-facing side of a browser tab
///
/// Dropping it aborts the actor, which cancels every timer and disposes the
/// browser instance.
pub struct BrowserTab {
    id: TabId,
    view: watch::Receiver<TabView>,
    runtime: Option<(mpsc::UnboundedSender<TabCommand>, JoinHandle<()>)>,
}

impl BrowserTab {
    /// Start a tab for `info`; must be called inside a tokio runtime
    pub fn spawn(
        info: &dyn TabInfo,
        capabilities: &HostCapabilities,
        config: &PluginConfig,
        errors: Arc<ErrorHandler>,
    ) -> Self {
        let id = info.id().clone();

        let services = match capabilities.resolve() {
            TabBackend::Full(services) => services,
            TabBackend::Stub => {
                let (_, view) = watch::channel(TabView::stub(info.title()));
                return Self { id, view, runtime: None };
            }
        };

        let initial_url = initial_url_of(info, &config.default_url);
        info!("Opening browser tab {} at {}", id, initial_url);

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let actor = TabActor::new(id.clone(), info.type_id(), services, config, errors, initial_url, internal_tx);
        let (view_tx, view) = watch::channel(actor.render());

        let task = tokio::spawn(actor.run(command_rx, internal_rx, view_tx));
        Self {
            id,
            view,
            runtime: Some((command_tx, task)),
        }
    }

    pub fn id(&self) -> &TabId {
        &self.id
    }

    pub fn is_stub(&self) -> bool {
        self.runtime.is_none()
    }

    /// Queue a command; stub tabs ignore input
    pub fn send(&self, command: TabCommand) -> Result<()> {
        match &self.runtime {
            Some((commands, _)) => commands.send(command).map_err(|_| SystemError::TabClosed.into()),
            None => {
                debug!("Ignoring {:?} on stub tab {}", command, self.id);
                Ok(())
            }
        }
    }

    /// Latest published view
    pub fn view(&self) -> TabView {
        self.view.borrow().clone()
    }

    /// Receiver notified on every view change
    pub fn subscribe(&self) -> watch::Receiver<TabView> {
        self.view.clone()
    }
}

impl Drop for BrowserTab {
    fn drop(&mut self) {
        if let Some((_, task)) = &self.runtime {
            task.abort();
        }
    }
}

struct SecretDialog {
    query: String,
}

struct CreateSecretDialog {
    form: CreateSecretForm,
    error: Option<String>,
    is_submitting: bool,
}

struct TabActor {
    id: TabId,
    type_id: TabTypeId,
    services: TabServices,
    config: PluginConfig,
    errors: Arc<ErrorHandler>,
    internal: mpsc::UnboundedSender<Internal>,

    lifecycle: BrowserLifecycle,
    handle: Option<Arc<dyn BrowserHandle>>,
    events: Option<mpsc::UnboundedReceiver<BrowserEvent>>,
    health: Option<Interval>,
    creation_at: Option<Instant>,
    creating: bool,
    tab_updates: Option<Arc<dyn TabUpdateProvider>>,

    state: TabState,
    history: NavigationHistory,
    address: AddressBar,
    focus_loss_at: Option<Instant>,
    can_go_back: bool,
    can_go_forward: bool,

    context_menu: Option<Vec<ContextMenuItem>>,
    secrets: SecretCache,
    secret_dialog: Option<SecretDialog>,
    create_dialog: Option<CreateSecretDialog>,
}

impl TabActor {
    fn new(
        id: TabId,
        type_id: TabTypeId,
        services: TabServices,
        config: &PluginConfig,
        errors: Arc<ErrorHandler>,
        initial_url: String,
        internal: mpsc::UnboundedSender<Internal>,
    ) -> Self {
        Self {
            id,
            type_id,
            services,
            errors,
            internal,
            lifecycle: BrowserLifecycle::new(config.retry.clone(), initial_url.clone()),
            handle: None,
            events: None,
            health: None,
            creation_at: None,
            creating: false,
            tab_updates: None,
            state: TabState::new(initial_url.clone()),
            history: NavigationHistory::new(),
            address: AddressBar::new(&initial_url, config.toolbar.clone()),
            focus_loss_at: None,
            can_go_back: false,
            can_go_forward: false,
            context_menu: None,
            secrets: SecretCache::new(),
            secret_dialog: None,
            create_dialog: None,
            config: config.clone(),
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<TabCommand>,
        mut internal: mpsc::UnboundedReceiver<Internal>,
        view: watch::Sender<TabView>,
    ) {
        self.schedule_creation();
        self.load_secrets(self.config.dialog_secret_limit);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
                Some(message) = internal.recv() => self.handle_internal(message).await,
                event = next_event(&mut self.events) => match event {
                    Some(event) => self.handle_event(event),
                    None => self.events = None,
                },
                _ = sleep_until_deadline(self.creation_at) => {
                    self.creation_at = None;
                    self.start_creation();
                }
                _ = sleep_until_deadline(self.focus_loss_at) => {
                    self.focus_loss_at = None;
                    self.address.on_focus_loss_elapsed();
                }
                _ = next_tick(&mut self.health) => self.check_health().await,
            }

            view.send_replace(self.render());
        }

        debug!("Browser tab {} stopped", self.id);
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    fn schedule_creation(&mut self) {
        if let Some(delay) = self.lifecycle.take_pending_delay() {
            self.creation_at = Some(Instant::now() + delay);
        }
    }

    fn start_creation(&mut self) {
        if self.creating {
            return;
        }
        if self.tab_updates.is_none() {
            self.tab_updates = self.services.tab_updates.create_provider(&self.id, &self.type_id);
        }

        self.creating = true;
        let url = self.lifecycle.target_url().to_string();
        debug!("Creating browser instance for tab {} at {}", self.id, url);

        let browser = self.services.browser.clone();
        let internal = self.internal.clone();
        tokio::spawn(async move {
            let result = browser.create_browser(BrowserConfig::new(url)).await;
            // A tab closed mid-creation still owns the new instance
            if let Err(mpsc::error::SendError(Internal::Created(Ok(Some(handle))))) =
                internal.send(Internal::Created(result))
            {
                handle.dispose();
            }
        });
    }

    async fn on_created(&mut self, result: Result<Option<Arc<dyn BrowserHandle>>>) {
        self.creating = false;
        let error = match result {
            Ok(Some(handle)) => {
                self.activate(handle);
                return;
            }
            Ok(None) => BrowserError::NoInstance {
                url: self.lifecycle.target_url().to_string(),
            }
            .into(),
            Err(e) => e,
        };

        self.errors.handle_error(&error, "browser creation").await;
        match self.lifecycle.on_creation_failed(&error.to_string()) {
            CreationOutcome::Retry { .. } => self.schedule_creation(),
            CreationOutcome::Failed { message } => self.fail(message).await,
            CreationOutcome::Ignored => {}
        }
    }

    fn activate(&mut self, handle: Arc<dyn BrowserHandle>) {
        if let Activation::Recovered { attempts } = self.lifecycle.on_creation_succeeded() {
            info!("Tab {} recovered its browser after {} attempt(s)", self.id, attempts);
        }

        let (sink, receiver) = EventSink::channel();
        handle.attach_listeners(sink);
        self.events = Some(receiver);

        self.state.zoom_level = handle.zoom_level();
        self.state.error = None;
        self.can_go_back = handle.can_go_back();
        self.can_go_forward = handle.can_go_forward();
        self.handle = Some(handle);

        let period = self.lifecycle.policy().health_check_interval();
        let mut health = interval_at(Instant::now() + period, period);
        health.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.health = Some(health);

        if let Some(updates) = &self.tab_updates {
            updates.update_url(&self.state.current_url);
            updates.update_title(&self.state.title);
            if let Some(favicon) = &self.state.favicon_url {
                updates.update_favicon(favicon);
            }
        }
    }

    async fn check_health(&mut self) {
        let valid = self.handle.as_ref().is_some_and(|handle| handle.is_valid());
        let last_url = self.state.current_url.clone();

        match self.lifecycle.on_health_check(valid, &last_url) {
            HealthOutcome::Healthy | HealthOutcome::Idle => {}
            HealthOutcome::Recover { attempt, target_url } => {
                info!("Tab {} recovering browser at {} (attempt {})", self.id, target_url, attempt);
                self.errors.handle_error(&BrowserError::InvalidHandle.into(), "health check").await;
                self.discard_handle();
                self.schedule_creation();
            }
            HealthOutcome::Failed { message } => {
                self.errors.handle_error(&BrowserError::InvalidHandle.into(), "health check").await;
                self.discard_handle();
                self.fail(message).await;
            }
        }
    }

    /// Drop the current instance; late events from it are never read
    ///
    /// Loading and fullscreen belong to the dropped instance, a new one starts
    /// idle and windowed.
    fn discard_handle(&mut self) {
        self.health = None;
        self.events = None;
        self.state.is_loading = false;
        self.state.is_fullscreen = false;
        if let Some(handle) = self.handle.take() {
            handle.dispose();
        }
    }

    async fn fail(&mut self, message: String) {
        self.state.error = Some(message);
        let policy = self.lifecycle.policy();
        let error = if self.lifecycle.recovery_attempts() > 0 {
            BrowserError::RecoveryExhausted {
                attempts: policy.max_recovery_attempts,
            }
        } else {
            BrowserError::CreationExhausted {
                attempts: policy.max_creation_retries,
            }
        };
        self.errors.handle_error(&error.into(), "browser lifecycle").await;
    }

    fn retry(&mut self) {
        if self.lifecycle.retry() {
            self.state.error = None;
            self.schedule_creation();
        }
    }

    // ------------------------------------------------------------------
    // Browser events
    // ------------------------------------------------------------------

    fn handle_event(&mut self, event: BrowserEvent) {
        match event {
            BrowserEvent::Navigated { url } => self.on_navigated(url),
            BrowserEvent::TitleChanged { title } => {
                if let Some(updates) = &self.tab_updates {
                    updates.update_title(&title);
                }
                self.services.url_history.add_url(self.address.text(), &title);
                self.state.title = title;
            }
            BrowserEvent::LoadingChanged { is_loading } => {
                self.state.is_loading = is_loading;
                let text = self.address.text();
                if !is_loading && !text.trim().is_empty() && text != BLANK_PAGE_URL {
                    self.save_url_history();
                }
            }
            BrowserEvent::FaviconChanged { favicon_url } => {
                if let Some(updates) = &self.tab_updates {
                    updates.update_favicon(&favicon_url);
                }
                self.state.favicon_url = Some(favicon_url);
            }
            BrowserEvent::ZoomChanged { level } => self.on_zoom_changed(level),
            BrowserEvent::ContextMenuRequested { snapshot } => self.on_context_menu(snapshot),
            BrowserEvent::OpenInNewTab { url } => {
                self.services.split_view.open_url_in_active_panel(&url, DEFAULT_TAB_TITLE, true);
            }
            BrowserEvent::FullscreenEntered | BrowserEvent::FullscreenExited if self.id.is_empty() => {
                debug!("Ignoring fullscreen change on a tab without id");
            }
            BrowserEvent::FullscreenEntered => self.state.is_fullscreen = true,
            BrowserEvent::FullscreenExited => self.state.is_fullscreen = false,
        }
    }

    fn on_navigated(&mut self, url: String) {
        self.address.on_host_navigation(&url, Instant::now());

        if let Some(handle) = &self.handle {
            self.can_go_back = handle.can_go_back();
            self.can_go_forward = handle.can_go_forward();
        }

        self.history.append(&self.state.title, &url);

        if let Some(updates) = &self.tab_updates {
            updates.update_url(&url);
        }

        let zoom = &self.services.zoom_settings;
        if let Some(saved) = zoom.extract_domain(&url).and_then(|domain| zoom.zoom_for_domain(&domain)) {
            if (saved - self.state.zoom_level).abs() > 0.001 {
                self.state.zoom_level = saved;
                if let Some(handle) = &self.handle {
                    handle.set_zoom_level(saved);
                }
            }
        }

        let record = BookmarkRecord::browser_tab(&self.state.title, &url);
        self.state.is_bookmarked = self.services.bookmarks.is_bookmarked(&record);
        self.state.current_url = url;
    }

    fn on_zoom_changed(&mut self, level: f64) {
        self.state.zoom_level = level;

        let zoom = self.services.zoom_settings.clone();
        if let Some(domain) = zoom.extract_domain(self.address.text()) {
            zoom.set_zoom_for_domain(&domain, level);
            let errors = self.errors.clone();
            tokio::spawn(async move {
                if let Err(e) = zoom.save_settings().await {
                    errors.handle_error(&e, "zoom settings").await;
                }
            });
        }
    }

    fn save_url_history(&self) {
        let history = self.services.url_history.clone();
        let errors = self.errors.clone();
        tokio::spawn(async move {
            if let Err(e) = history.save_history().await {
                errors.handle_error(&e, "url history").await;
            }
        });
    }

    fn on_context_menu(&mut self, snapshot: ContextMenuSnapshot) {
        if !snapshot.is_editable {
            self.context_menu = Some(build_context_menu(&snapshot, &self.menu_context(&[])));
            return;
        }

        let secrets = self.services.secrets.clone();
        let internal = self.internal.clone();
        let limit = self.config.menu_secret_limit;
        tokio::spawn(async move {
            let result = secrets.list_secrets(limit).await;
            let _ = internal.send(Internal::MenuSecrets { snapshot, result });
        });
    }

    fn menu_context<'a>(&self, secrets: &'a [SecretEntry]) -> MenuContext<'a> {
        MenuContext {
            can_go_back: self.can_go_back,
            can_go_forward: self.can_go_forward,
            is_bookmarked: self.state.is_bookmarked,
            secrets,
        }
    }

    // ------------------------------------------------------------------
    // Spawned call results
    // ------------------------------------------------------------------

    async fn handle_internal(&mut self, message: Internal) {
        match message {
            Internal::Created(result) => self.on_created(result).await,
            Internal::SecretsLoaded(Ok(secrets)) => {
                debug!("Loaded {} secrets for tab {}", secrets.len(), self.id);
                self.secrets.replace(secrets);
            }
            Internal::SecretsLoaded(Err(e)) => {
                let error: BrowserTabError = SecretError::LoadFailed { reason: e.to_string() }.into();
                self.errors.handle_error(&error, "secret list").await;
            }
            Internal::MenuSecrets { snapshot, result } => {
                let secrets = match result {
                    Ok(secrets) => secrets,
                    Err(e) => {
                        self.errors.handle_error(&e, "context menu secrets").await;
                        Vec::new()
                    }
                };
                self.context_menu = Some(build_context_menu(&snapshot, &self.menu_context(&secrets)));
            }
            Internal::SecretCreated(Ok(secret)) => {
                info!("Created secret for {}", secret.website);
                self.create_dialog = None;
                self.load_secrets(self.config.dialog_secret_limit);
            }
            Internal::SecretCreated(Err(e)) => {
                self.errors.handle_error(&e, "secret creation").await;
                if let Some(dialog) = &mut self.create_dialog {
                    dialog.is_submitting = false;
                    dialog.error = Some(create_failure_message(&e));
                }
            }
        }
    }

    fn load_secrets(&self, limit: usize) {
        let secrets = self.services.secrets.clone();
        let internal = self.internal.clone();
        tokio::spawn(async move {
            let result = secrets.list_secrets(limit).await;
            let _ = internal.send(Internal::SecretsLoaded(result));
        });
    }

    // ------------------------------------------------------------------
    // User commands
    // ------------------------------------------------------------------

    async fn handle_command(&mut self, command: TabCommand) {
        match command {
            TabCommand::EditAddress { text, selection } => {
                let history = &self.services.url_history;
                self.address
                    .on_text_changed(&text, selection, Instant::now(), |prefix, limit| history.suggestions(prefix, limit));
            }
            TabCommand::AddressKey(key) => {
                if let KeyOutcome::Navigate(url) = self.address.handle_key(key) {
                    self.load(&url).await;
                }
            }
            TabCommand::AddressFocusLost => {
                self.focus_loss_at = Some(self.address.on_focus_lost(Instant::now()));
            }
            TabCommand::SelectSuggestion(index) => {
                if let Some(url) = self.address.select_suggestion(index) {
                    self.load(&url).await;
                }
            }
            TabCommand::Navigate(input) => {
                let url = interpret_url_input(&input);
                self.address.finish_editing();
                self.load(&url).await;
            }
            TabCommand::Back => self.go_back(),
            TabCommand::Forward => self.go_forward(),
            TabCommand::RefreshOrStop => {
                if self.state.is_loading {
                    if let Some(handle) = &self.handle {
                        handle.stop();
                    }
                } else {
                    let url = self.address.refresh_target();
                    self.address.finish_editing();
                    self.load(&url).await;
                }
            }
            TabCommand::ToggleBookmark => self.toggle_bookmark(),
            TabCommand::Shortcut(shortcut) => self.on_shortcut(shortcut),
            TabCommand::MouseButton(button) => match MouseAction::from_button(button) {
                Some(MouseAction::CloseTab) => self.services.active_tabs.close_tab(&self.id),
                Some(MouseAction::Back) => self.go_back(),
                Some(MouseAction::Forward) => self.go_forward(),
                None => {}
            },
            TabCommand::SelectMenuItem(index) => {
                let action = self
                    .context_menu
                    .take()
                    .and_then(|items| items.into_iter().nth(index))
                    .filter(|item| item.is_clickable())
                    .map(|item| item.action);
                if let Some(action) = action {
                    self.run_menu_action(action).await;
                }
            }
            TabCommand::DismissMenu => self.context_menu = None,
            TabCommand::SecretQuery(query) => {
                if let Some(dialog) = &mut self.secret_dialog {
                    dialog.query = query;
                }
            }
            TabCommand::SelectSecret(id) => {
                if let Some(secret) = self.secrets.find(&id).cloned() {
                    self.fill_credentials(&secret.username, &secret.password).await;
                    self.secret_dialog = None;
                }
            }
            TabCommand::CloseSecretDialog => self.secret_dialog = None,
            TabCommand::EditCreateSecret(form) => {
                if let Some(dialog) = &mut self.create_dialog {
                    if !dialog.is_submitting {
                        dialog.form = form;
                        dialog.error = None;
                    }
                }
            }
            TabCommand::SubmitCreateSecret => self.submit_create_secret().await,
            TabCommand::CloseCreateSecretDialog => {
                if self.create_dialog.as_ref().is_some_and(|dialog| !dialog.is_submitting) {
                    self.create_dialog = None;
                }
            }
            TabCommand::ExitFullscreen => {
                if let Some(handle) = &self.handle {
                    handle.request_exit_fullscreen();
                }
            }
            TabCommand::Retry => self.retry(),
        }
    }

    async fn load(&mut self, url: &str) {
        let Some(handle) = self.handle.clone() else {
            debug!("No browser instance yet, dropping navigation to {}", url);
            return;
        };
        if let Err(e) = handle.load_url(url).await {
            debug!("Loading {} failed: {}", url, e);
            let error: BrowserTabError = BrowserError::NavigationFailed { url: url.to_string() }.into();
            self.errors.handle_error(&error, "navigation").await;
        }
    }

    fn go_back(&self) {
        if let Some(handle) = &self.handle {
            if self.can_go_back {
                handle.go_back();
            }
        }
    }

    fn go_forward(&self) {
        if let Some(handle) = &self.handle {
            if self.can_go_forward {
                handle.go_forward();
            }
        }
    }

    fn on_shortcut(&self, shortcut: Shortcut) {
        let Some(handle) = &self.handle else {
            return;
        };
        match shortcut {
            Shortcut::Reload => handle.reload(),
            Shortcut::ResetZoom => handle.reset_zoom(),
            Shortcut::ZoomIn => handle.zoom_in(),
            Shortcut::ZoomOut => handle.zoom_out(),
        }
    }

    fn toggle_bookmark(&mut self) {
        let bookmarks = &self.services.bookmarks;
        let record = BookmarkRecord::browser_tab(&self.state.title, &self.state.current_url);

        if self.state.is_bookmarked {
            if let Some(location) = bookmarks.find_bookmark(&record) {
                bookmarks.remove_bookmark(&location.collection_id, &location.bookmark_id);
            }
            self.state.is_bookmarked = false;
        } else {
            bookmarks.add_bookmark(
                DEFAULT_BOOKMARK_COLLECTION,
                Bookmark {
                    record,
                    workspace_name: DEFAULT_BOOKMARK_WORKSPACE.to_string(),
                },
            );
            self.state.is_bookmarked = true;
        }
    }

    async fn run_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::None => {}
            MenuAction::CopySelection => {
                if let Some(handle) = &self.handle {
                    handle.copy_selection();
                }
            }
            MenuAction::Paste => {
                if let Some(handle) = &self.handle {
                    handle.paste();
                }
            }
            MenuAction::FillCredential { username, password } => {
                self.fill_credentials(&username, &password).await;
            }
            MenuAction::ShowAllSecrets => {
                self.secret_dialog = Some(SecretDialog { query: String::new() });
            }
            MenuAction::AddNewSecret { website_prefill } => {
                self.create_dialog = Some(CreateSecretDialog {
                    form: CreateSecretForm::with_website(website_prefill),
                    error: None,
                    is_submitting: false,
                });
            }
            MenuAction::Reload => {
                if let Some(handle) = &self.handle {
                    handle.reload();
                }
            }
            MenuAction::Back => self.go_back(),
            MenuAction::Forward => self.go_forward(),
            MenuAction::PictureInPicture => {
                if let Some(handle) = &self.handle {
                    handle.request_picture_in_picture();
                }
            }
            MenuAction::CopyText(text) => self.services.clipboard.set_text(&text),
            MenuAction::Navigate(url) => self.load(&url).await,
            MenuAction::OpenInNewTab(url) => {
                self.services.split_view.open_url_in_active_panel(&url, DEFAULT_TAB_TITLE, true);
            }
            MenuAction::ToggleBookmark => self.toggle_bookmark(),
            MenuAction::InspectElement => {
                debug!("Inspect element requested on tab {}, host offers no dev tools", self.id);
            }
        }
    }

    async fn fill_credentials(&mut self, username: &str, password: &str) {
        let Some(handle) = self.handle.clone() else {
            return;
        };
        if let Err(e) = handle.fill_credentials(username, password, true).await {
            self.errors.handle_error(&e, "credential fill").await;
        }
    }

    async fn submit_create_secret(&mut self) {
        let Some(dialog) = &mut self.create_dialog else {
            return;
        };
        if dialog.is_submitting {
            return;
        }

        let request = match dialog.form.validate() {
            Ok(request) => request,
            Err(e) => {
                dialog.error = Some(e.user_message());
                return;
            }
        };

        dialog.is_submitting = true;
        dialog.error = None;

        let secrets = self.services.secrets.clone();
        let internal = self.internal.clone();
        tokio::spawn(async move {
            let result = secrets.create_secret(request).await;
            let _ = internal.send(Internal::SecretCreated(result));
        });
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    fn render(&self) -> TabView {
        TabView {
            lifecycle: Some(self.lifecycle.state()),
            content: self.content_view(),
            toolbar: ToolbarView {
                address_text: self.address.text().to_string(),
                completion_suffix: self.address.completion_suffix().map(str::to_string),
                suggestions: self.address.suggestions().to_vec(),
                dropdown_visible: self.address.is_dropdown_visible(),
                selected_suggestion: self.address.selected_index(),
                can_go_back: self.can_go_back,
                can_go_forward: self.can_go_forward,
                is_loading: self.state.is_loading,
                is_secure: self.state.is_secure(),
                is_bookmarked: self.state.is_bookmarked,
                zoom_percent: self.state.is_zoomed().then(|| self.state.zoom_percent()),
            },
            title: self.state.title.clone(),
            current_url: self.state.current_url.clone(),
            favicon_url: self.state.favicon_url.clone(),
            context_menu: self.context_menu.clone(),
            secret_dialog: self.secret_dialog.as_ref().map(|dialog| self.secret_dialog_view(dialog)),
            create_secret_dialog: self.create_dialog.as_ref().map(|dialog| CreateSecretDialogView {
                form: dialog.form.clone(),
                error: dialog.error.clone(),
                is_submitting: dialog.is_submitting,
            }),
            history: self.history.shared_entries(),
            history_index: self.history.index(),
        }
    }

    fn content_view(&self) -> ContentView {
        match self.lifecycle.state() {
            LifecycleState::Initializing | LifecycleState::Recovering => ContentView::Initializing {
                status: self.lifecycle.status_text().unwrap_or_default(),
                is_retrying: self.lifecycle.is_retrying(),
            },
            LifecycleState::Failed => ContentView::Error {
                message: self.state.error.clone().unwrap_or_default(),
            },
            LifecycleState::Active if self.state.is_fullscreen => ContentView::Fullscreen,
            LifecycleState::Active => {
                let text = self.address.text();
                match &self.services.dashboard {
                    Some(dashboard) if text.is_empty() || text == BLANK_PAGE_URL => ContentView::Dashboard {
                        shortcuts: dashboard.shortcuts(),
                    },
                    _ => ContentView::Browser,
                }
            }
        }
    }

    fn secret_dialog_view(&self, dialog: &SecretDialog) -> SecretDialogView {
        let page_url = &self.state.current_url;
        SecretDialogView {
            query: dialog.query.clone(),
            current_domain: registrable_domain(page_url),
            items: self
                .secrets
                .search(&dialog.query, page_url)
                .into_iter()
                .map(|(secret, is_match)| SecretListItem { secret, is_match })
                .collect(),
            is_loaded: self.secrets.is_loaded(),
        }
    }
}

impl Drop for TabActor {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("Disposing browser instance of tab {}", self.id);
            handle.dispose();
        }
    }
}

/// Inline text for a failed secret creation
fn create_failure_message(error: &BrowserTabError) -> String {
    match error {
        BrowserTabError::Secret { source } => source.user_message(),
        BrowserTabError::Provider {
            source: ProviderError::CallFailed { reason, .. },
        } if !reason.trim().is_empty() => reason.clone(),
        _ => SecretError::CreateFailed { reason: None }.user_message(),
    }
}

pub(crate) async fn next_event(events: &mut Option<mpsc::UnboundedReceiver<BrowserEvent>>) -> Option<BrowserEvent> {
    match events {
        Some(receiver) => receiver.recv().await,
        None => pending().await,
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => pending().await,
    }
}

async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_failure_message() {
        let error: BrowserTabError = SecretError::CreateFailed { reason: None }.into();
        assert_eq!(create_failure_message(&error), "Failed to create secret");

        let error = BrowserTabError::provider("create_secret", "Duplicate website");
        assert_eq!(create_failure_message(&error), "Duplicate website");

        let error: BrowserTabError = ProviderError::Unavailable { provider: "secrets".to_string() }.into();
        assert_eq!(create_failure_message(&error), "Failed to create secret");
    }
}
