//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::application::dto::{AuthResponse, Credentials};
use crate::application::services::{
    Mutation, MutationOutcome, NotificationManager, Query, QueryClient, QueryData, ReminderClock,
};
use crate::application::use_cases::{AuthenticateUseCase, ResolveSessionUseCase};
use crate::domain::entities::Session;
use crate::domain::errors::{ApiError, AuthError};
use crate::domain::keybinding::{Action, Keymap};
use crate::domain::ports::{AuthPort, SessionStoragePort, TrackerPort};
use crate::infrastructure::config::{StateConfig, StorageManager};
use crate::presentation::events::{is_cancel_event, is_press, is_submit_event};
use crate::presentation::widgets::{AlertPopup, ConfirmDialog, FooterBar, NavBar};

use super::screen::{Screen, ScreenCommand};
use super::{
    ApplicationsScreen, AuthScreen, CompaniesScreen, DashboardScreen, HomeScreen, ProfileScreen,
    RemindersScreen, Route,
};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Builds the session-bound tracker client.
pub type TrackerFactory =
    Arc<dyn Fn(Session) -> Result<Arc<dyn TrackerPort>, ApiError> + Send + Sync>;

/// UI behaviour taken from configuration.
pub struct AppSettings {
    pub keymap: Keymap,
    pub clock: ReminderClock,
    pub confirm_deletes: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            keymap: Keymap::default(),
            clock: ReminderClock::default(),
            confirm_deletes: true,
        }
    }
}

#[derive(Debug)]
enum AppAction {
    Authenticated(Result<AuthResponse, AuthError>),
    Loaded {
        epoch: u64,
        query: Query,
        result: Result<QueryData, ApiError>,
    },
    Mutated {
        epoch: u64,
        screen_id: u64,
        mutation: Mutation,
        result: Result<MutationOutcome, ApiError>,
    },
}

enum CurrentScreen {
    Auth(AuthScreen),
    Home(HomeScreen),
    Dashboard(DashboardScreen),
    Profile(ProfileScreen),
    Applications(Box<ApplicationsScreen>),
    Companies(Box<CompaniesScreen>),
    Reminders(Box<RemindersScreen>),
}

impl CurrentScreen {
    fn for_route(route: Route, signed_in: bool, clock: ReminderClock) -> Self {
        match route {
            Route::Auth => Self::Auth(AuthScreen::new()),
            Route::Home => Self::Home(HomeScreen::new(signed_in)),
            Route::Dashboard => Self::Dashboard(DashboardScreen::new()),
            Route::Profile => Self::Profile(ProfileScreen::new()),
            Route::Applications => Self::Applications(Box::default()),
            Route::Companies => Self::Companies(Box::default()),
            Route::Reminders => Self::Reminders(Box::new(RemindersScreen::new(clock))),
        }
    }

    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Auth(s) => s,
            Self::Home(s) => s,
            Self::Dashboard(s) => s,
            Self::Profile(s) => s,
            Self::Applications(s) => s.as_ref(),
            Self::Companies(s) => s.as_ref(),
            Self::Reminders(s) => s.as_ref(),
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Auth(s) => s,
            Self::Home(s) => s,
            Self::Dashboard(s) => s,
            Self::Profile(s) => s,
            Self::Applications(s) => s.as_mut(),
            Self::Companies(s) => s.as_mut(),
            Self::Reminders(s) => s.as_mut(),
        }
    }
}

pub struct App {
    running: bool,
    route: Route,
    screen: CurrentScreen,
    keymap: Keymap,
    clock: ReminderClock,
    confirm_deletes: bool,
    session: Option<Session>,
    query_client: Option<Arc<QueryClient>>,
    tracker_factory: TrackerFactory,
    authenticate: AuthenticateUseCase,
    resolve_session: ResolveSessionUseCase,
    notifications: NotificationManager,
    confirm: Option<ConfirmDialog<Mutation>>,
    state_storage: Option<StorageManager>,
    /// Bumped whenever the session changes; results from older epochs are dropped.
    epoch: u64,
    /// Bumped whenever `screen` is replaced.
    screen_id: u64,
    action_tx: mpsc::UnboundedSender<AppAction>,
    action_rx: mpsc::UnboundedReceiver<AppAction>,
}

impl App {
    #[must_use]
    pub fn new(
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn SessionStoragePort>,
        tracker_factory: TrackerFactory,
        settings: AppSettings,
    ) -> Self {
        let authenticate = AuthenticateUseCase::new(auth_port, storage_port.clone());
        let resolve_session = ResolveSessionUseCase::new(storage_port);
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            running: true,
            route: Route::Home,
            screen: CurrentScreen::Home(HomeScreen::new(false)),
            keymap: settings.keymap,
            clock: settings.clock,
            confirm_deletes: settings.confirm_deletes,
            session: None,
            query_client: None,
            tracker_factory,
            authenticate,
            resolve_session,
            notifications: NotificationManager::new(),
            confirm: None,
            state_storage: None,
            epoch: 0,
            screen_id: 0,
            action_tx,
            action_rx,
        }
    }

    /// Remembers the last visited route in `state.toml`.
    #[must_use]
    pub fn with_state_storage(mut self, storage: StorageManager) -> Self {
        self.state_storage = Some(storage);
        self
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        cli_token: Option<String>,
    ) -> color_eyre::Result<()> {
        let resolved = self.resolve_session.execute(cli_token).await?;
        let resumed = match resolved {
            Some(resolved) => {
                info!(source = %resolved.source, "Resuming session");
                self.start_session(resolved.session)
            }
            None => false,
        };

        let start = self.start_route(resumed);
        self.navigate(start);

        self.run_event_loop(terminal).await?;

        self.save_state();
        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut tick = interval(TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                biased;

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if let Event::Key(key) = event {
                        self.handle_key(key).await;
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = tick.tick() => {
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        Ok(())
    }

    /// A resumed session reopens the last visited route; otherwise Home.
    fn start_route(&self, resumed: bool) -> Route {
        if !resumed {
            return Route::Home;
        }
        self.state_storage
            .as_ref()
            .and_then(|storage| {
                storage
                    .load_state()
                    .inspect_err(|e| warn!(error = %e, "Failed to load state"))
                    .ok()
            })
            .and_then(|state| state.last_route)
            .and_then(|slug| Route::from_slug(&slug))
            .filter(|route| *route != Route::Auth)
            .unwrap_or(Route::Home)
    }

    fn save_state(&self) {
        let Some(storage) = &self.state_storage else {
            return;
        };
        let state = StateConfig {
            last_route: Some(self.route.slug().to_string()),
        };
        if let Err(e) = storage.save_state(&state) {
            warn!(error = %e, "Failed to save state");
        }
    }

    fn start_session(&mut self, session: Session) -> bool {
        match (self.tracker_factory)(session.clone()) {
            Ok(port) => {
                info!(user = %session.label(), "Session started");
                self.query_client = Some(Arc::new(QueryClient::new(port)));
                self.session = Some(session);
                self.epoch += 1;
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to build tracker client");
                self.notifications
                    .api_error(&e, "Could not connect to the tracker");
                false
            }
        }
    }

    fn end_session(&mut self) {
        self.session = None;
        self.query_client = None;
        self.confirm = None;
        self.epoch += 1;
        info!("Session ended");
    }

    async fn logout(&mut self) {
        if self.session.is_none() {
            return;
        }
        if let Err(e) = self.authenticate.logout().await {
            self.notifications
                .error("Error", format!("Stored session not cleared: {}", e.user_message()));
        }
        self.end_session();
        self.navigate(Route::Auth);
    }

    fn navigate(&mut self, target: Route) {
        let route = target.gate(self.session.is_some());
        if route != target {
            debug!(?target, "Route requires a session, redirecting");
        }
        self.route = route;
        self.screen = CurrentScreen::for_route(route, self.session.is_some(), self.clock);
        self.screen_id += 1;
        self.confirm = None;
        self.fetch_visible();
    }

    fn fetch_visible(&self) {
        for query in self.screen.as_screen().queries() {
            self.spawn_fetch(query);
        }
    }

    fn spawn_fetch(&self, query: Query) {
        let Some(client) = self.query_client.clone() else {
            return;
        };
        let tx = self.action_tx.clone();
        let epoch = self.epoch;
        tokio::spawn(async move {
            let result = client.fetch(&query).await;
            let _ = tx.send(AppAction::Loaded {
                epoch,
                query,
                result,
            });
        });
    }

    fn spawn_mutation(&mut self, mutation: Mutation) {
        let Some(client) = self.query_client.clone() else {
            self.notifications
                .warn("Signed out", "Sign in to make changes");
            return;
        };
        let visible = self.screen.as_screen().queries();
        let tx = self.action_tx.clone();
        let epoch = self.epoch;
        let screen_id = self.screen_id;
        tokio::spawn(async move {
            let result = client.mutate_and_refetch(&mutation, &visible).await;
            let _ = tx.send(AppAction::Mutated {
                epoch,
                screen_id,
                mutation,
                result,
            });
        });
    }

    fn spawn_authenticate(&self, credentials: Credentials) {
        let use_case = self.authenticate.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = use_case.execute(credentials).await;
            let _ = tx.send(AppAction::Authenticated(result));
        });
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        if !is_press(&key) {
            return;
        }

        let action = self.keymap.resolve(&key);
        if action == Some(Action::Quit) {
            self.running = false;
            return;
        }

        if self.notifications.has_notifications() {
            if is_submit_event(&key) || is_cancel_event(&key) {
                self.notifications.acknowledge();
            }
            return;
        }

        if let Some(dialog) = self.confirm.take() {
            match dialog.resolve(&key) {
                Ok(Some(mutation)) => self.spawn_mutation(mutation),
                Ok(None) => debug!("Confirmation declined"),
                Err(dialog) => self.confirm = Some(dialog),
            }
            return;
        }

        // Plain characters belong to a focused text field even if rebound.
        let typing = self.screen.as_screen().is_editing()
            && matches!(key.code, KeyCode::Char(_))
            && (key.modifiers - KeyModifiers::SHIFT).is_empty();

        if let Some(action) = action.filter(|_| !typing) {
            self.handle_global(action).await;
            return;
        }

        let command = self.screen.as_screen_mut().handle_key(key);
        self.run_command(command);
    }

    async fn handle_global(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Logout => self.logout().await,
            Action::Refresh => self.fetch_visible(),
            Action::NextRoute => self.navigate(self.route.next()),
            Action::PreviousRoute => self.navigate(self.route.previous()),
            other => {
                if let Some(route) = Route::for_action(other) {
                    self.navigate(route);
                }
            }
        }
    }

    fn run_command(&mut self, command: ScreenCommand) {
        match command {
            ScreenCommand::None => {}
            ScreenCommand::Fetch(queries) => {
                for query in queries {
                    self.spawn_fetch(query);
                }
            }
            ScreenCommand::Mutate(mutation) => self.spawn_mutation(mutation),
            ScreenCommand::Confirm { prompt, mutation } => {
                if self.confirm_deletes {
                    self.confirm = Some(ConfirmDialog::new(prompt, mutation));
                } else {
                    self.spawn_mutation(mutation);
                }
            }
            ScreenCommand::Invalid(message) => self.notifications.warn("Invalid input", message),
            ScreenCommand::Authenticate(credentials) => self.spawn_authenticate(credentials),
            ScreenCommand::Open(url) => {
                debug!(%url, "Opening link");
                if let Err(e) = opener::open(&url) {
                    warn!(error = %e, %url, "Failed to open link");
                    self.notifications
                        .error("Error", format!("Could not open {url}"));
                }
            }
            ScreenCommand::Navigate(route) => self.navigate(route),
        }
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Authenticated(Ok(response)) => {
                if !self.start_session(response.session) {
                    self.auth_failed();
                    return;
                }
                let message = response
                    .message
                    .unwrap_or_else(|| "Signed in".to_string());
                self.notifications.info("Success", message);
                self.navigate(Route::Profile);
            }
            AppAction::Authenticated(Err(e)) => {
                self.auth_failed();
                self.notifications.error("Error", e.user_message());
            }
            AppAction::Loaded {
                epoch,
                query,
                result,
            } => {
                if epoch != self.epoch {
                    debug!(?query, "Dropping result from an ended session");
                    return;
                }
                self.apply_result(&query, result);
            }
            AppAction::Mutated {
                epoch,
                screen_id,
                mutation,
                result,
            } => {
                if epoch != self.epoch {
                    debug!(?mutation, "Dropping result from an ended session");
                    return;
                }
                match result {
                    Ok(outcome) => {
                        debug!(invalidated = ?outcome.invalidated, "Mutation applied");
                        if let Some(message) = mutation.success_message() {
                            self.notifications.info("Success", message);
                        }
                        if screen_id == self.screen_id {
                            self.screen.as_screen_mut().mutation_succeeded(&mutation);
                        } else {
                            debug!(?mutation, "Issuing screen was replaced, keeping current form");
                        }
                        for (query, result) in outcome.refetched {
                            self.apply_result(&query, result);
                        }
                    }
                    Err(e) => self.notifications.api_error(&e, mutation.error_fallback()),
                }
            }
        }
    }

    fn auth_failed(&mut self) {
        if let CurrentScreen::Auth(screen) = &mut self.screen {
            screen.submission_failed();
        }
    }

    /// Applies a read only if the current screen still shows that exact query.
    fn apply_result(&mut self, query: &Query, result: Result<QueryData, ApiError>) {
        let screen = self.screen.as_screen_mut();
        if !screen.queries().contains(query) {
            debug!(?query, ok = result.is_ok(), "Dropping result for a query no longer shown");
            return;
        }
        match result {
            Ok(data) => screen.apply(data),
            Err(e) => self.notifications.api_error(&e, query.error_fallback()),
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let [nav_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let label = self.session.as_ref().map(Session::label);
        frame.render_widget(NavBar::new(self.route, label), nav_area);

        let screen = self.screen.as_screen_mut();
        screen.render(frame, body_area);
        frame.render_widget(FooterBar::new(&self.keymap, screen.hints()), footer_area);

        if let Some(dialog) = &self.confirm {
            frame.render_widget(dialog, body_area);
        }
        if let Some(notification) = self.notifications.current_notification() {
            frame.render_widget(AlertPopup::new(notification), frame.area());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        ApplicationId, ApplicationStatus, AuthToken, CompanyId, ReminderId,
    };
    use crate::domain::ports::mocks::{InMemoryTracker, MockAuthPort, MockSessionStorage};
    use crate::domain::ports::{ApplicationDraft, CompanyDraft, MockTrackerPort};
    use crate::domain::NotificationLevel;
    use chrono::{TimeZone, Utc};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session() -> Session {
        Session::from_token(AuthToken::new_unchecked("mock.jwt.token"))
    }

    fn factory(port: Arc<dyn TrackerPort>) -> TrackerFactory {
        Arc::new(move |_session: Session| -> Result<Arc<dyn TrackerPort>, ApiError> {
            Ok(port.clone())
        })
    }

    fn app_with(tracker: Arc<dyn TrackerPort>, storage: Arc<MockSessionStorage>) -> App {
        App::new(
            Arc::new(MockAuthPort::new(true)),
            storage,
            factory(tracker),
            AppSettings::default(),
        )
    }

    fn signed_in(tracker: Arc<dyn TrackerPort>) -> App {
        let mut app = app_with(tracker, Arc::new(MockSessionStorage::new()));
        assert!(app.start_session(session()));
        app
    }

    /// Drains task results until none arrive for a short while.
    async fn settle(app: &mut App) {
        while let Ok(Some(action)) =
            tokio::time::timeout(Duration::from_millis(100), app.action_rx.recv()).await
        {
            app.handle_action(action);
        }
    }

    fn alert_message(app: &App) -> Option<&str> {
        app.notifications
            .current_notification()
            .map(|n| n.message.as_str())
    }

    #[tokio::test]
    async fn test_protected_route_redirects_to_auth() {
        let tracker = Arc::new(InMemoryTracker::new());
        let mut app = app_with(tracker.clone(), Arc::new(MockSessionStorage::new()));

        app.navigate(Route::Applications);
        settle(&mut app).await;

        assert_eq!(app.route, Route::Auth);
        assert!(matches!(app.screen, CurrentScreen::Auth(_)));
        assert!(tracker.requests().is_empty());
    }

    #[tokio::test]
    async fn test_signup_opens_profile_with_welcome_alert() {
        let tracker = Arc::new(InMemoryTracker::new());
        let storage = Arc::new(MockSessionStorage::new());
        let mut app = app_with(tracker.clone(), storage.clone());
        app.navigate(Route::Auth);

        app.run_command(ScreenCommand::Authenticate(Credentials::signup(
            "Ada",
            "ada@example.com",
            "hunter2",
        )));
        settle(&mut app).await;

        assert_eq!(app.route, Route::Profile);
        assert!(app.session.is_some());
        assert!(storage.has_session().await.unwrap());
        assert_eq!(alert_message(&app), Some("Welcome"));
        assert_eq!(tracker.requests(), vec!["GET /profile"]);
    }

    #[tokio::test]
    async fn test_rejected_login_stays_on_auth() {
        let tracker = Arc::new(InMemoryTracker::new());
        let mut app = App::new(
            Arc::new(MockAuthPort::new(false)),
            Arc::new(MockSessionStorage::new()),
            factory(tracker),
            AppSettings::default(),
        );
        app.navigate(Route::Auth);

        app.run_command(ScreenCommand::Authenticate(Credentials::login(
            "ada@example.com",
            "wrong",
        )));
        settle(&mut app).await;

        assert_eq!(app.route, Route::Auth);
        assert!(app.session.is_none());
        assert_eq!(alert_message(&app), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_create_application_refetches_list_once() {
        let tracker = Arc::new(InMemoryTracker::new());
        let company_id = tracker.seed_company("Acme");
        let mut app = signed_in(tracker.clone());
        app.navigate(Route::Applications);
        settle(&mut app).await;
        tracker.clear_requests();

        app.run_command(ScreenCommand::Mutate(Mutation::CreateApplication(
            ApplicationDraft {
                title: "Engineer".to_string(),
                company_id,
                location: "NY".to_string(),
                status: ApplicationStatus::Applied,
            },
        )));
        settle(&mut app).await;

        assert_eq!(
            tracker.requests(),
            vec!["POST /applications", "GET /applications"]
        );
        let CurrentScreen::Applications(screen) = &app.screen else {
            panic!("expected applications screen");
        };
        assert_eq!(screen.applications().len(), 1);
        assert_eq!(screen.applications()[0].company_name(), "Acme");
    }

    #[tokio::test]
    async fn test_company_delete_requires_confirmation() {
        let tracker = Arc::new(InMemoryTracker::new());
        tracker.seed_company("Acme");
        let mut app = signed_in(tracker.clone());
        app.navigate(Route::Companies);
        settle(&mut app).await;
        tracker.clear_requests();

        app.handle_key(key(KeyCode::Esc)).await;
        app.handle_key(key(KeyCode::Char('d'))).await;
        assert!(app.confirm.is_some());

        app.handle_key(key(KeyCode::Char('n'))).await;
        settle(&mut app).await;
        assert!(app.confirm.is_none());
        assert!(tracker.requests().is_empty());

        app.handle_key(key(KeyCode::Char('d'))).await;
        app.handle_key(key(KeyCode::Char('y'))).await;
        settle(&mut app).await;

        assert_eq!(
            tracker.requests(),
            vec!["DELETE /companies/1", "GET /companies"]
        );
        let CurrentScreen::Companies(screen) = &app.screen else {
            panic!("expected companies screen");
        };
        assert!(screen.companies().is_empty());
    }

    #[tokio::test]
    async fn test_unconfirmed_deletes_run_directly_when_disabled() {
        let tracker = Arc::new(InMemoryTracker::new());
        let company_id = tracker.seed_company("Acme");
        let mut app = App::new(
            Arc::new(MockAuthPort::new(true)),
            Arc::new(MockSessionStorage::new()),
            factory(tracker.clone()),
            AppSettings {
                confirm_deletes: false,
                ..AppSettings::default()
            },
        );
        assert!(app.start_session(session()));
        app.navigate(Route::Companies);
        settle(&mut app).await;
        tracker.clear_requests();

        app.run_command(ScreenCommand::confirm(
            "Delete this company?",
            Mutation::DeleteCompany(company_id),
        ));
        assert!(app.confirm.is_none());
        settle(&mut app).await;

        assert_eq!(
            tracker.requests(),
            vec!["DELETE /companies/1", "GET /companies"]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_alerts_with_fallback() {
        let mut port = MockTrackerPort::new();
        port.expect_list_reminders().returning(|| Ok(Vec::new()));
        port.expect_list_applications()
            .returning(|_| Ok(Vec::new()));
        port.expect_delete_reminder()
            .times(1)
            .returning(|_| Err(ApiError::server(500, None)));
        let mut app = signed_in(Arc::new(port));
        app.navigate(Route::Reminders);
        settle(&mut app).await;

        app.run_command(ScreenCommand::Mutate(Mutation::DeleteReminder(
            ReminderId::from("1"),
        )));
        settle(&mut app).await;

        let alert = app.notifications.current_notification().unwrap();
        assert_eq!(alert.level, NotificationLevel::Error);
        assert_eq!(alert.message, "Delete failed");
    }

    #[tokio::test]
    async fn test_failed_save_prefers_server_message() {
        let mut port = MockTrackerPort::new();
        port.expect_create_application()
            .returning(|_| Err(ApiError::server(400, Some("Title too long".to_string()))));
        let mut app = signed_in(Arc::new(port));

        app.spawn_mutation(Mutation::CreateApplication(ApplicationDraft {
            title: "x".repeat(300),
            company_id: CompanyId::from("1"),
            location: String::new(),
            status: ApplicationStatus::Applied,
        }));
        settle(&mut app).await;

        assert_eq!(alert_message(&app), Some("Title too long"));
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_returns_to_auth() {
        let tracker = Arc::new(InMemoryTracker::new());
        let storage = Arc::new(MockSessionStorage::with_session(session()));
        let mut app = app_with(tracker, storage.clone());
        assert!(app.start_session(session()));
        app.navigate(Route::Dashboard);

        app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL))
            .await;

        assert_eq!(app.route, Route::Auth);
        assert!(app.session.is_none());
        assert!(app.query_client.is_none());
        assert!(!storage.has_session().await.unwrap());
    }

    #[tokio::test]
    async fn test_results_from_ended_session_are_dropped() {
        let tracker = Arc::new(InMemoryTracker::new());
        let mut app = signed_in(tracker);
        app.navigate(Route::Applications);
        app.end_session();
        app.navigate(Route::Home);

        settle(&mut app).await;

        assert!(!app.notifications.has_notifications());
        assert!(matches!(app.screen, CurrentScreen::Home(_)));
    }

    #[tokio::test]
    async fn test_alert_blocks_keys_until_acknowledged() {
        let tracker = Arc::new(InMemoryTracker::new());
        let mut app = signed_in(tracker);
        app.navigate(Route::Home);
        app.notifications.warn("Invalid input", "Select a company");

        app.handle_key(key(KeyCode::F(2))).await;
        assert_eq!(app.route, Route::Home);

        app.handle_key(key(KeyCode::Enter)).await;
        assert!(!app.notifications.has_notifications());

        app.handle_key(key(KeyCode::F(2))).await;
        assert_eq!(app.route, Route::Dashboard);
    }

    #[tokio::test]
    async fn test_dismiss_reminder_refetches_non_pending() {
        let tracker = Arc::new(InMemoryTracker::new());
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
        tracker.seed_reminder("1", at);
        let mut app = signed_in(tracker.clone());
        app.navigate(Route::Reminders);
        settle(&mut app).await;
        tracker.clear_requests();

        app.handle_key(key(KeyCode::BackTab)).await;
        app.handle_key(key(KeyCode::Char('x'))).await;
        settle(&mut app).await;

        assert_eq!(
            tracker.requests(),
            vec!["POST /reminders/1/dismiss", "GET /reminders"]
        );
        let CurrentScreen::Reminders(screen) = &app.screen else {
            panic!("expected reminders screen");
        };
        assert!(!screen.reminders()[0].can_dismiss());
    }

    #[tokio::test]
    async fn test_stale_filter_results_are_ignored() {
        let tracker = Arc::new(InMemoryTracker::new());
        let mut app = signed_in(tracker);
        app.navigate(Route::Applications);
        settle(&mut app).await;

        let stale = Query::Applications(
            crate::domain::ports::ApplicationFilter::default().with_query("old"),
        );
        app.apply_result(
            &stale,
            Ok(QueryData::Applications(vec![
                crate::domain::entities::Application::new(
                    ApplicationId::from("9"),
                    "Old",
                    ApplicationStatus::Applied,
                ),
            ])),
        );

        let CurrentScreen::Applications(screen) = &app.screen else {
            panic!("expected applications screen");
        };
        assert!(screen.applications().is_empty());
    }

    #[tokio::test]
    async fn test_errors_for_queries_no_longer_shown_stay_silent() {
        let tracker = Arc::new(InMemoryTracker::new());
        let mut app = signed_in(tracker);
        app.navigate(Route::Applications);
        settle(&mut app).await;

        let stale = Query::Applications(
            crate::domain::ports::ApplicationFilter::default().with_query("old"),
        );
        app.apply_result(&stale, Err(ApiError::server(500, None)));
        app.apply_result(&Query::Reminders, Err(ApiError::Timeout));
        assert!(!app.notifications.has_notifications());

        app.apply_result(&Query::Companies, Err(ApiError::server(500, None)));
        assert_eq!(alert_message(&app), Some(Query::Companies.error_fallback()));
    }

    #[tokio::test]
    async fn test_write_from_replaced_screen_keeps_new_form() {
        let tracker = Arc::new(InMemoryTracker::new());
        let mut app = signed_in(tracker);
        app.navigate(Route::Companies);
        settle(&mut app).await;

        app.run_command(ScreenCommand::Mutate(Mutation::CreateCompany(CompanyDraft {
            name: "Acme".to_string(),
            ..CompanyDraft::default()
        })));
        app.navigate(Route::Home);
        app.navigate(Route::Companies);
        for c in "Beta".chars() {
            app.handle_key(key(KeyCode::Char(c))).await;
        }
        settle(&mut app).await;

        let CurrentScreen::Companies(screen) = &mut app.screen else {
            panic!("expected companies screen");
        };
        assert_eq!(screen.companies().len(), 1);
        let ScreenCommand::Mutate(Mutation::CreateCompany(draft)) =
            screen.handle_key(key(KeyCode::Enter))
        else {
            panic!("expected the new form to keep its draft");
        };
        assert_eq!(draft.name, "Beta");
    }
}
