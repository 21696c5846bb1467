//! Main application orchestrator.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use tracing::{debug, info, warn};

use crate::application::{
    GateDecision, LoginUseCase, ManageUsersUseCase, RegisterUseCase, ResolveSessionUseCase,
    RouteGate, SessionStore,
};
use crate::domain::{Access, AuthPort, Route, TokenStoragePort, UserPort};
use crate::presentation::events::EventHandler;
use crate::presentation::theme::Theme;
use crate::presentation::ui::{
    HomeScreen, LoginScreen, RegisterScreen, ScreenAction, UserFormMode, UserFormScreen,
    UserListScreen,
};
use crate::presentation::widgets::{StatusBar, StatusLevel};

enum CurrentScreen {
    Home(HomeScreen),
    Login(LoginScreen),
    Register(RegisterScreen),
    Users(UserListScreen),
    UserForm(UserFormScreen),
}

pub struct App {
    route: Route,
    screen: CurrentScreen,
    session: SessionStore,
    login_use_case: LoginUseCase,
    register_use_case: RegisterUseCase,
    resolve_session_use_case: ResolveSessionUseCase,
    manage_users: ManageUsersUseCase,
    theme: Theme,
    notice: Option<(StatusLevel, String)>,
    pending_load: bool,
    running: bool,
}

impl App {
    #[must_use]
    pub fn new(
        auth_port: Arc<dyn AuthPort>,
        user_port: Arc<dyn UserPort>,
        storage_port: Arc<dyn TokenStoragePort>,
        theme: Theme,
    ) -> Self {
        let session = SessionStore::new(storage_port);

        Self {
            route: Route::Home,
            screen: CurrentScreen::Home(HomeScreen::new(false, theme)),
            login_use_case: LoginUseCase::new(auth_port.clone(), session.clone()),
            register_use_case: RegisterUseCase::new(auth_port),
            resolve_session_use_case: ResolveSessionUseCase::new(session.clone()),
            manage_users: ManageUsersUseCase::new(user_port, session.clone()),
            session,
            theme,
            notice: None,
            pending_load: false,
            running: true,
        }
    }

    /// Route currently on screen, after gating.
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// # Errors
    /// Returns error if drawing to the terminal or reading its events fails.
    pub async fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        cli_token: Option<String>,
        start_route: Route,
    ) -> color_eyre::Result<()> {
        if let Some(source) = self.resolve_session_use_case.execute(cli_token).await {
            info!(source = %source, "Session restored");
        }

        self.open(start_route);
        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;
        self.settle(terminal).await?;

        while self.running {
            let Some(event) = terminal_events.next().await else {
                break;
            };
            match event? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = self.handle_key(key);
                    terminal.draw(|frame| self.render(frame))?;
                    self.perform(action).await;
                    terminal.draw(|frame| self.render(frame))?;
                    self.settle(terminal).await?;
                }
                Event::Resize(_, _) => {
                    terminal.draw(|frame| self.render(frame))?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Runs the fetch the current screen needs on entry, then redraws.
    async fn settle(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        if self.pending_load {
            self.load().await;
            terminal.draw(|frame| self.render(frame))?;
        }
        Ok(())
    }

    /// Navigates and performs the entry fetch of the target screen.
    pub async fn navigate(&mut self, route: Route) {
        self.open(route);
        self.load().await;
    }

    /// Handles a key, performs the resulting action and any entry fetch.
    pub async fn dispatch(&mut self, key: KeyEvent) {
        let action = self.handle_key(key);
        self.perform(action).await;
        if self.pending_load {
            self.load().await;
        }
    }

    /// Consults the gate once and mounts the resulting screen.
    fn open(&mut self, requested: Route) {
        let decision = RouteGate::resolve(requested, self.session.is_authenticated());
        if let GateDecision::Redirect(target) = decision {
            info!(from = %requested, to = %target, "Route gate redirect");
        }
        let route = decision.target();
        debug!(route = %route, "Opening screen");

        self.route = route;
        self.screen = match route {
            Route::Home => {
                CurrentScreen::Home(HomeScreen::new(self.session.is_authenticated(), self.theme))
            }
            Route::Login => CurrentScreen::Login(LoginScreen::new(&self.theme)),
            Route::Register => CurrentScreen::Register(RegisterScreen::new(&self.theme)),
            Route::Users => CurrentScreen::Users(UserListScreen::new(self.theme)),
            Route::UserCreate => {
                CurrentScreen::UserForm(UserFormScreen::new(UserFormMode::Create, &self.theme))
            }
            Route::UserEdit(id) => {
                CurrentScreen::UserForm(UserFormScreen::new(UserFormMode::Edit(id), &self.theme))
            }
        };
        self.pending_load = matches!(route, Route::Users | Route::UserEdit(_));
    }

    async fn load(&mut self) {
        self.pending_load = false;
        match &mut self.screen {
            CurrentScreen::Users(screen) => {
                screen.set_loading();
                match self.manage_users.list().await {
                    Ok(users) => screen.set_users(users),
                    Err(e) => {
                        warn!(error = %e, "Failed to load users");
                        screen.set_error(&e);
                    }
                }
            }
            CurrentScreen::UserForm(screen) => {
                if let UserFormMode::Edit(id) = screen.mode() {
                    match self.manage_users.fetch(id).await {
                        Ok(user) => screen.prefill(&user),
                        Err(e) => {
                            warn!(user_id = %id, error = %e, "Failed to load user for editing");
                            screen.prefill_failed(&e);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        self.notice = None;

        if EventHandler::is_force_quit_event(&key) {
            return ScreenAction::Quit;
        }
        if self.route.access() == Access::RequiresAuth && EventHandler::is_logout_event(&key) {
            return ScreenAction::Logout;
        }

        match &mut self.screen {
            CurrentScreen::Home(screen) => screen.handle_key(key),
            CurrentScreen::Login(screen) => screen.handle_key(key),
            CurrentScreen::Register(screen) => screen.handle_key(key),
            CurrentScreen::Users(screen) => screen.handle_key(key),
            CurrentScreen::UserForm(screen) => screen.handle_key(key),
        }
    }

    async fn perform(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Quit => self.running = false,
            ScreenAction::Navigate(route) => self.open(route),
            ScreenAction::Refresh => self.pending_load = true,
            ScreenAction::Submit => self.submit().await,
            ScreenAction::Delete(id) => {
                if let CurrentScreen::Users(screen) = &mut self.screen {
                    screen.set_loading();
                    match self.manage_users.delete_and_refetch(id).await {
                        Ok(users) => {
                            screen.set_users(users);
                            self.notice = Some((StatusLevel::Success, "User deleted".to_string()));
                        }
                        Err(e) => {
                            warn!(user_id = %id, error = %e, "Delete failed");
                            screen.set_error(&e);
                            self.notice = Some((StatusLevel::Error, e.banner()));
                        }
                    }
                }
            }
            ScreenAction::Logout => {
                let notice = match self.session.end().await {
                    Ok(()) => (StatusLevel::Info, "Logged out".to_string()),
                    Err(e) => {
                        warn!(error = %e, "Failed to delete stored token");
                        (StatusLevel::Error, format!("Logged out, but the saved token remains: {e}"))
                    }
                };
                info!("Logged out");
                self.open(Route::Login);
                self.notice = Some(notice);
            }
        }
    }

    /// Sends the current form and moves on when the server accepts it.
    async fn submit(&mut self) {
        let next = match &mut self.screen {
            CurrentScreen::Login(screen) => {
                let credentials = screen.credentials();
                match self.login_use_case.execute(&credentials).await {
                    Ok(response) => {
                        screen.form_mut().finish();
                        info!(
                            user_id = %response.user.id(),
                            persisted = response.token_persisted,
                            "Login successful"
                        );
                        Some((Route::Users, format!("Welcome, {}", response.user.name())))
                    }
                    Err(e) => {
                        warn!(error = %e, "Login failed");
                        screen.fail(&e);
                        None
                    }
                }
            }
            CurrentScreen::Register(screen) => {
                let registration = screen.registration();
                match self.register_use_case.execute(&registration).await {
                    Ok(user) => {
                        screen.form_mut().finish();
                        info!(user_id = %user.id(), "Registration successful");
                        Some((Route::Login, "Registration successful, please log in".to_string()))
                    }
                    Err(e) => {
                        warn!(error = %e, "Registration failed");
                        screen.fail(&e);
                        None
                    }
                }
            }
            CurrentScreen::UserForm(screen) => {
                let draft = screen.draft();
                let result = match screen.mode() {
                    UserFormMode::Create => self.manage_users.create(&draft).await,
                    UserFormMode::Edit(id) => self.manage_users.update(id, &draft).await,
                };
                match result {
                    Ok(user) => {
                        screen.form_mut().finish();
                        info!(user_id = %user.id(), "User saved");
                        Some((Route::Users, format!("Saved {}", user.name())))
                    }
                    Err(e) => {
                        warn!(error = %e, "Saving user failed");
                        screen.fail(&e);
                        None
                    }
                }
            }
            CurrentScreen::Home(_) | CurrentScreen::Users(_) => None,
        };

        if let Some((route, notice)) = next {
            self.open(route);
            self.notice = Some((StatusLevel::Success, notice));
        }
    }

    fn status_bar(&self) -> StatusBar {
        let (level, center) = self.notice.clone().unwrap_or_else(|| {
            (
                StatusLevel::Info,
                format!("{} | Ctrl+C: quit", self.route.title()),
            )
        });
        let session = if self.session.is_authenticated() {
            "● signed in"
        } else {
            "○ guest"
        };
        StatusBar::new()
            .left(format!(" {}", self.route))
            .center(center)
            .right(format!("{session} "))
            .level(level)
    }

    fn render(&mut self, frame: &mut Frame) {
        let [body, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        match &mut self.screen {
            CurrentScreen::Home(screen) => screen.render(body, frame.buffer_mut()),
            CurrentScreen::Login(screen) => frame.render_widget(&*screen, body),
            CurrentScreen::Register(screen) => frame.render_widget(&*screen, body),
            CurrentScreen::Users(screen) => screen.render(body, frame.buffer_mut()),
            CurrentScreen::UserForm(screen) => frame.render_widget(&*screen, body),
        }

        frame.render_widget(&self.status_bar(), status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AuthToken, User, UserId};
    use crate::domain::ports::mocks::{MOCK_TOKEN, MockAuthPort, MockTokenStorage, MockUserPort};
    use crate::domain::{ApiError, ValidationErrors};
    use crossterm::event::{KeyCode, KeyModifiers};
    use test_case::test_case;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch(key(KeyCode::Char(c))).await;
        }
    }

    fn app_with(user_port: MockUserPort, storage: Arc<MockTokenStorage>) -> App {
        App::new(
            Arc::new(MockAuthPort::new(true)),
            Arc::new(user_port),
            storage,
            Theme::default(),
        )
    }

    async fn signed_in_app(user_port: MockUserPort) -> App {
        let storage = Arc::new(MockTokenStorage::with_token(AuthToken::new_unchecked(
            MOCK_TOKEN,
        )));
        let app = app_with(user_port, storage);
        app.resolve_session_use_case.execute(None).await;
        app
    }

    fn users() -> Vec<User> {
        vec![
            User::new(1, "Admin", "admin@example.com"),
            User::new(2, "Rina", "rina@example.com"),
        ]
    }

    fn form_error(app: &App, field: &str) -> Option<String> {
        let form = match &app.screen {
            CurrentScreen::Login(s) => s.form(),
            CurrentScreen::Register(s) => s.form(),
            CurrentScreen::UserForm(s) => s.form(),
            _ => return None,
        };
        form.error_for(field).map(str::to_string)
    }

    #[test_case(Route::Users ; "user list")]
    #[test_case(Route::UserCreate ; "create form")]
    #[test_case(Route::UserEdit(UserId(3)) ; "edit form")]
    #[tokio::test]
    async fn test_anonymous_user_is_sent_to_login(route: Route) {
        let mut port = MockUserPort::new();
        port.expect_list_users().never();
        port.expect_get_user().never();
        let mut app = app_with(port, Arc::new(MockTokenStorage::new()));

        app.navigate(route).await;

        assert_eq!(app.route(), Route::Login);
    }

    #[test_case(Route::Login ; "login")]
    #[test_case(Route::Register ; "register")]
    #[tokio::test]
    async fn test_signed_in_user_is_sent_to_users(route: Route) {
        let mut port = MockUserPort::new();
        port.expect_list_users().times(1).returning(|_| Ok(users()));
        let mut app = signed_in_app(port).await;

        app.navigate(route).await;

        assert_eq!(app.route(), Route::Users);
    }

    #[tokio::test]
    async fn test_login_stores_token_and_opens_users() {
        let mut port = MockUserPort::new();
        port.expect_list_users()
            .withf(|token| token.as_str() == MOCK_TOKEN)
            .times(1)
            .returning(|_| Ok(users()));
        let storage = Arc::new(MockTokenStorage::new());
        let mut app = app_with(port, storage.clone());

        app.navigate(Route::Login).await;
        type_text(&mut app, "admin@example.com").await;
        app.dispatch(key(KeyCode::Tab)).await;
        type_text(&mut app, "password").await;
        app.dispatch(key(KeyCode::Enter)).await;

        assert_eq!(app.route(), Route::Users);
        assert!(app.is_authenticated());
        let stored = storage.get_token().await.unwrap();
        assert_eq!(stored.map(|t| t.as_str().to_string()).as_deref(), Some(MOCK_TOKEN));
        match &app.screen {
            CurrentScreen::Users(screen) => assert_eq!(screen.users().len(), 2),
            _ => panic!("expected user list"),
        }
    }

    #[tokio::test]
    async fn test_failed_login_stays_on_form() {
        let port = MockUserPort::new();
        let mut app = App::new(
            Arc::new(MockAuthPort::new(false)),
            Arc::new(port),
            Arc::new(MockTokenStorage::new()),
            Theme::default(),
        );

        app.navigate(Route::Login).await;
        app.dispatch(key(KeyCode::Enter)).await;

        assert_eq!(app.route(), Route::Login);
        assert!(!app.is_authenticated());
        match &app.screen {
            CurrentScreen::Login(screen) => {
                assert_eq!(screen.form().banner(), Some("Email atau Password Anda Salah"));
            }
            _ => panic!("expected login screen"),
        }
    }

    #[tokio::test]
    async fn test_failed_create_shows_field_messages() {
        let mut port = MockUserPort::new();
        port.expect_create_user().times(1).returning(|_, _| {
            let fields: ValidationErrors = [
                ("name", vec!["Nama minimal 3 karakter"]),
                ("password", vec!["Password minimal 6 karakter"]),
            ]
            .into_iter()
            .collect();
            Err(ApiError::rejected(422, "Validasi Gagal", fields))
        });
        let mut app = signed_in_app(port).await;

        app.navigate(Route::UserCreate).await;
        type_text(&mut app, "Al").await;
        app.dispatch(key(KeyCode::Enter)).await;

        assert_eq!(app.route(), Route::UserCreate);
        assert_eq!(form_error(&app, "name").as_deref(), Some("Nama minimal 3 karakter"));
        assert_eq!(
            form_error(&app, "password").as_deref(),
            Some("Password minimal 6 karakter")
        );
        assert!(form_error(&app, "email").is_none());
    }

    #[tokio::test]
    async fn test_failed_update_shows_field_messages() {
        let mut port = MockUserPort::new();
        port.expect_get_user()
            .withf(|_, id| *id == UserId(2))
            .times(1)
            .returning(|_, _| Ok(User::new(2, "Rina", "rina@example.com")));
        port.expect_update_user()
            .withf(|_, id, draft| *id == UserId(2) && draft.password.is_none())
            .times(1)
            .returning(|_, _, _| {
                let fields: ValidationErrors =
                    [("email", vec!["Email sudah terdaftar"])].into_iter().collect();
                Err(ApiError::rejected(422, "Validasi Gagal", fields))
            });
        let mut app = signed_in_app(port).await;

        app.navigate(Route::UserEdit(UserId(2))).await;
        app.dispatch(key(KeyCode::Enter)).await;

        assert_eq!(app.route(), Route::UserEdit(UserId(2)));
        assert_eq!(form_error(&app, "email").as_deref(), Some("Email sudah terdaftar"));
    }

    #[tokio::test]
    async fn test_successful_create_returns_to_list() {
        let mut port = MockUserPort::new();
        port.expect_create_user()
            .withf(|_, draft| draft.name == "Budi" && draft.password.as_deref() == Some("secret1"))
            .times(1)
            .returning(|_, _| Ok(User::new(3, "Budi", "budi@example.com")));
        port.expect_list_users().times(1).returning(|_| Ok(users()));
        let mut app = signed_in_app(port).await;

        app.navigate(Route::UserCreate).await;
        type_text(&mut app, "Budi").await;
        app.dispatch(key(KeyCode::Tab)).await;
        type_text(&mut app, "budi@example.com").await;
        app.dispatch(key(KeyCode::Tab)).await;
        type_text(&mut app, "secret1").await;
        app.dispatch(key(KeyCode::Enter)).await;

        assert_eq!(app.route(), Route::Users);
    }

    #[tokio::test]
    async fn test_delete_refetches_list_once() {
        let mut port = MockUserPort::new();
        let mut seq = mockall::Sequence::new();
        port.expect_list_users()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(users()));
        port.expect_delete_user()
            .withf(|_, id| *id == UserId(1))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        port.expect_list_users()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![User::new(2, "Rina", "rina@example.com")]));
        let mut app = signed_in_app(port).await;

        app.navigate(Route::Users).await;
        app.dispatch(key(KeyCode::Char('d'))).await;
        app.dispatch(key(KeyCode::Char('y'))).await;

        match &app.screen {
            CurrentScreen::Users(screen) => {
                assert_eq!(screen.users().len(), 1);
                assert!(screen.error().is_none());
            }
            _ => panic!("expected user list"),
        }
    }

    #[tokio::test]
    async fn test_edit_prefill_failure_keeps_form_open() {
        let mut port = MockUserPort::new();
        port.expect_get_user().times(1).returning(|_, _| {
            Err(ApiError::rejected(
                404,
                "User tidak ditemukan",
                ValidationErrors::new(),
            ))
        });
        let mut app = signed_in_app(port).await;

        app.navigate(Route::UserEdit(UserId(42))).await;

        assert_eq!(app.route(), Route::UserEdit(UserId(42)));
        match &app.screen {
            CurrentScreen::UserForm(screen) => {
                assert!(!screen.is_loading());
                assert!(screen.form().banner().is_some());
            }
            _ => panic!("expected user form"),
        }
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let mut port = MockUserPort::new();
        port.expect_list_users().times(1).returning(|_| Ok(users()));
        let storage = Arc::new(MockTokenStorage::with_token(AuthToken::new_unchecked(
            MOCK_TOKEN,
        )));
        let mut app = app_with(port, storage.clone());
        app.resolve_session_use_case.execute(None).await;

        app.navigate(Route::Users).await;
        app.dispatch(ctrl('x')).await;

        assert_eq!(app.route(), Route::Login);
        assert!(!app.is_authenticated());
        assert!(storage.get_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_delete_shows_error_notice() {
        let mut port = MockUserPort::new();
        port.expect_list_users().times(1).returning(|_| Ok(users()));
        port.expect_delete_user().times(1).returning(|_, _| {
            Err(ApiError::rejected(404, "User tidak ditemukan", ValidationErrors::new()))
        });
        let mut app = signed_in_app(port).await;

        app.navigate(Route::Users).await;
        app.dispatch(key(KeyCode::Char('d'))).await;
        app.dispatch(key(KeyCode::Char('y'))).await;

        assert_eq!(
            app.notice,
            Some((StatusLevel::Error, "User tidak ditemukan".to_string()))
        );
    }

    #[tokio::test]
    async fn test_logout_storage_failure_shows_error_notice() {
        let mut port = MockUserPort::new();
        port.expect_list_users().times(1).returning(|_| Ok(users()));
        let mut app = app_with(port, Arc::new(MockTokenStorage::failing_writes()));
        app.resolve_session_use_case
            .execute(Some(MOCK_TOKEN.to_string()))
            .await;

        app.navigate(Route::Users).await;
        app.dispatch(ctrl('x')).await;

        assert_eq!(app.route(), Route::Login);
        assert!(!app.is_authenticated());
        assert!(matches!(app.notice, Some((StatusLevel::Error, _))));
    }

    #[tokio::test]
    async fn test_unauthorized_list_keeps_session() {
        let mut port = MockUserPort::new();
        port.expect_list_users().times(1).returning(|_| {
            Err(ApiError::rejected(401, "Unauthorized", ValidationErrors::new()))
        });
        let mut app = signed_in_app(port).await;

        app.navigate(Route::Users).await;

        assert_eq!(app.route(), Route::Users);
        assert!(app.is_authenticated());
        match &app.screen {
            CurrentScreen::Users(screen) => assert_eq!(screen.error(), Some("Unauthorized")),
            _ => panic!("expected user list"),
        }
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_form() {
        let mut app = app_with(MockUserPort::new(), Arc::new(MockTokenStorage::new()));
        app.navigate(Route::Login).await;

        app.dispatch(ctrl('c')).await;

        assert!(!app.running);
    }
}
