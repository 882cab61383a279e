//! Main application orchestrator.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};
use tokio::sync::{mpsc, watch};
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::application::Route;
use crate::application::services::NotificationManager;
use crate::application::state::{BookingList, SessionState, SessionStore};
use crate::application::use_cases::{
    CancelBookingUseCase, CreateBookingUseCase, ListMyBookingsUseCase, ListWorkshopsUseCase,
    LoginUseCase, RegisterUseCase,
};
use crate::domain::entities::{BookingConfirmation, BookingId, Workshop, WorkshopId};
use crate::domain::errors::{ApiError, LoginError};
use crate::domain::ports::BookingApiPort;
use crate::infrastructure::config::UiConfig;
use crate::presentation::events::{EventHandler, EventResult, GlobalCommand};
use crate::presentation::ui::{
    BookingsAction, BookingsScreen, ConfirmationAction, ConfirmationScreen, LoginAction,
    LoginScreen, NotificationPopup, RegisterAction, RegisterScreen, WorkshopsAction,
    WorkshopsScreen,
};
use crate::presentation::widgets::NavBar;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Background results. Each carries the id of the view that started it.
#[derive(Debug)]
enum Action {
    LoginFinished {
        view: u64,
        result: Result<(), LoginError>,
    },
    RegisterFinished {
        view: u64,
        result: Result<(), ApiError>,
    },
    WorkshopsLoaded {
        view: u64,
        workshops: Vec<Workshop>,
    },
    BookingFinished {
        view: u64,
        workshop_id: WorkshopId,
        result: Result<BookingConfirmation, ApiError>,
    },
    BookingsLoaded {
        view: u64,
        result: Result<BookingList, ApiError>,
    },
    CancelFinished {
        view: u64,
        booking_id: BookingId,
        result: Result<(), ApiError>,
    },
}

enum CurrentScreen {
    Workshops,
    Login(LoginScreen),
    Register(RegisterScreen),
    MyBookings,
    Confirmation(ConfirmationScreen),
}

pub struct App {
    screen: CurrentScreen,
    view: u64,
    exiting: bool,
    workshops: WorkshopsScreen,
    bookings: BookingsScreen,
    session: Arc<SessionStore>,
    session_rx: watch::Receiver<SessionState>,
    login_use_case: LoginUseCase,
    register_use_case: RegisterUseCase,
    list_workshops_use_case: ListWorkshopsUseCase,
    create_booking_use_case: CreateBookingUseCase,
    my_bookings_use_case: ListMyBookingsUseCase,
    cancel_booking_use_case: CancelBookingUseCase,
    notifications: NotificationManager,
    ui: UiConfig,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    #[must_use]
    pub fn new(api: Arc<dyn BookingApiPort>, session: Arc<SessionStore>, ui: UiConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let session_rx = session.subscribe();

        Self {
            screen: CurrentScreen::Workshops,
            view: 0,
            exiting: false,
            workshops: WorkshopsScreen::new().with_error_display(ui.booking_error_display()),
            bookings: BookingsScreen::new(),
            login_use_case: LoginUseCase::new(api.clone(), session.clone()),
            register_use_case: RegisterUseCase::new(api.clone()),
            list_workshops_use_case: ListWorkshopsUseCase::new(api.clone()),
            create_booking_use_case: CreateBookingUseCase::new(api.clone()),
            my_bookings_use_case: ListMyBookingsUseCase::new(api.clone()),
            cancel_booking_use_case: CancelBookingUseCase::new(api),
            session,
            session_rx,
            notifications: NotificationManager::new(ui.notification_display()),
            ui,
            action_tx,
            action_rx,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.navigate(Route::Workshops);
        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut tick_interval = interval(TICK_RATE);

        terminal.draw(|frame| self.draw(frame))?;
        self.restore_session();

        while !self.exiting {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.draw(frame))?;
                }

                Ok(()) = self.session_rx.changed() => {
                    self.handle_session_change();
                    terminal.draw(|frame| self.draw(frame))?;
                }

                _ = tick_interval.tick() => {
                    if self.tick() {
                        terminal.draw(|frame| self.draw(frame))?;
                    }
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(event).await == EventResult::Exit {
                        self.exiting = true;
                    }
                    terminal.draw(|frame| self.draw(frame))?;
                }
            }
        }

        Ok(())
    }

    fn current_route(&self) -> Route {
        match &self.screen {
            CurrentScreen::Workshops => Route::Workshops,
            CurrentScreen::Login(_) => Route::Login,
            CurrentScreen::Register(_) => Route::Register,
            CurrentScreen::MyBookings => Route::MyBookings,
            CurrentScreen::Confirmation(screen) => {
                Route::BookingConfirmation(screen.booking_id().clone())
            }
        }
    }

    /// Switches screens. Results still in flight for the previous view are
    /// dropped when they arrive.
    fn navigate(&mut self, route: Route) {
        self.view += 1;
        debug!(route = %route, view = self.view, "Navigating");

        self.screen = match route {
            Route::Workshops => {
                self.load_workshops();
                CurrentScreen::Workshops
            }
            Route::Login => CurrentScreen::Login(LoginScreen::new()),
            Route::Register => CurrentScreen::Register(
                RegisterScreen::new().with_redirect_delay(self.ui.register_redirect_delay()),
            ),
            Route::MyBookings => {
                self.load_bookings();
                CurrentScreen::MyBookings
            }
            Route::BookingConfirmation(booking_id) => {
                CurrentScreen::Confirmation(ConfirmationScreen::new(booking_id))
            }
        };
    }

    fn spawn_action<F>(&self, task: F)
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(task.await);
        });
    }

    /// Reads the stored credential in the background. The session watch
    /// redraws once it settles.
    fn restore_session(&self) {
        let session = self.session.clone();
        tokio::spawn(async move {
            session.initialize().await;
        });
    }

    fn load_workshops(&mut self) {
        self.workshops.set_loading();

        let use_case = self.list_workshops_use_case.clone();
        let view = self.view;
        self.spawn_action(async move {
            Action::WorkshopsLoaded {
                view,
                workshops: use_case.execute().await,
            }
        });
    }

    fn load_bookings(&mut self) {
        let token = match self.session.state() {
            SessionState::Authenticated(token) => token,
            // Reloaded from `handle_session_change` once the read finishes.
            SessionState::Initializing => {
                self.bookings.set_loading();
                return;
            }
            SessionState::Anonymous => {
                self.bookings.set_login_required();
                return;
            }
        };
        self.bookings.set_loading();

        let use_case = self.my_bookings_use_case.clone();
        let view = self.view;
        self.spawn_action(async move {
            Action::BookingsLoaded {
                view,
                result: use_case.execute(Some(&token)).await,
            }
        });
    }

    fn handle_session_change(&mut self) {
        let state = self.session_rx.borrow_and_update().clone();
        debug!(
            authenticated = state.is_authenticated(),
            initializing = state.is_initializing(),
            "Session changed"
        );

        if matches!(self.screen, CurrentScreen::MyBookings) {
            self.view += 1;
            self.load_bookings();
        }
    }

    fn tick(&mut self) -> bool {
        let mut changed = self.notifications.tick();
        changed |= self.workshops.tick();

        let redirect = match &mut self.screen {
            CurrentScreen::Register(screen) => screen.tick(),
            _ => None,
        };
        if let Some(route) = redirect {
            self.navigate(route);
            changed = true;
        }

        changed
    }

    async fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) => self.handle_key(key).await,
            Event::Resize(_, _) => EventResult::Consumed,
            _ => EventResult::Continue,
        }
    }

    fn is_capturing_esc(&self) -> bool {
        match &self.screen {
            CurrentScreen::Login(_) | CurrentScreen::Register(_) => true,
            CurrentScreen::MyBookings => self.bookings.is_modal(),
            CurrentScreen::Workshops | CurrentScreen::Confirmation(_) => false,
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_release_event(&key) {
            return EventResult::Continue;
        }

        if let Some(command) = EventHandler::global_command(&key) {
            match command {
                GlobalCommand::Quit => return EventResult::Exit,
                GlobalCommand::Logout => self.logout().await,
                GlobalCommand::Navigate(route) => self.handle_navigate_command(route),
            }
            return EventResult::Consumed;
        }

        if key.code == KeyCode::Esc && !self.is_capturing_esc() {
            return EventResult::Exit;
        }

        match &mut self.screen {
            CurrentScreen::Workshops => {
                if self.workshops.handle_key(key) == WorkshopsAction::Book {
                    self.handle_book();
                }
            }
            CurrentScreen::Login(screen) => {
                if let LoginAction::Submit(request) = screen.handle_key(key) {
                    screen.set_submitting();
                    let use_case = self.login_use_case.clone();
                    let view = self.view;
                    self.spawn_action(async move {
                        Action::LoginFinished {
                            view,
                            result: use_case.execute(request).await,
                        }
                    });
                }
            }
            CurrentScreen::Register(screen) => {
                if let RegisterAction::Submit(request) = screen.handle_key(key) {
                    screen.set_submitting();
                    let use_case = self.register_use_case.clone();
                    let view = self.view;
                    self.spawn_action(async move {
                        Action::RegisterFinished {
                            view,
                            result: use_case.execute(request).await,
                        }
                    });
                }
            }
            CurrentScreen::MyBookings => match self.bookings.handle_key(key) {
                BookingsAction::Cancel(booking_id) => self.handle_cancel(booking_id),
                BookingsAction::BrowseWorkshops => self.navigate(Route::Workshops),
                BookingsAction::None => {}
            },
            CurrentScreen::Confirmation(screen) => {
                if screen.handle_key(key) == ConfirmationAction::BrowseWorkshops {
                    self.navigate(Route::Workshops);
                }
            }
        }

        EventResult::Consumed
    }

    fn handle_navigate_command(&mut self, route: Route) {
        if matches!(route, Route::Login | Route::Register) && self.session.is_authenticated() {
            debug!(route = %route, "Already logged in");
            return;
        }
        self.navigate(route);
    }

    async fn logout(&mut self) {
        if !self.session.is_authenticated() {
            return;
        }

        match self.session.logout().await {
            Ok(()) => self.notifications.info("Logged out", "See you next time."),
            Err(e) => {
                warn!(error = %e, "Logout could not clear stored credential");
                self.notifications.error(
                    "Logged out",
                    "The saved session could not be removed from storage.",
                );
            }
        }
    }

    fn handle_book(&mut self) {
        let token = self.session.current_token();
        let Some(command) = self.workshops.begin_booking(token.as_ref()) else {
            return;
        };

        let use_case = self.create_booking_use_case.clone();
        let view = self.view;
        self.spawn_action(async move {
            let result = use_case.execute(&command).await;
            Action::BookingFinished {
                view,
                workshop_id: command.request.workshop_id,
                result,
            }
        });
    }

    fn handle_cancel(&mut self, booking_id: BookingId) {
        let Some(list) = self.bookings.bookings() else {
            return;
        };

        let token = self.session.current_token();
        let token = match CancelBookingUseCase::validate(list, &booking_id, token.as_ref()) {
            Ok(token) => token,
            Err(e) => {
                self.bookings.close_dialog();
                self.notifications.error(
                    "Failed to cancel booking",
                    e.user_message(CancelBookingUseCase::FALLBACK_MESSAGE),
                );
                return;
            }
        };
        self.bookings.set_canceling();

        let use_case = self.cancel_booking_use_case.clone();
        let view = self.view;
        self.spawn_action(async move {
            let result = use_case.request(&booking_id, &token).await;
            Action::CancelFinished {
                view,
                booking_id,
                result,
            }
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::LoginFinished { view, result } if view == self.view => {
                match result {
                    Ok(()) => self.navigate(Route::Workshops),
                    Err(e) => {
                        if let CurrentScreen::Login(screen) = &mut self.screen {
                            screen.set_error(e.user_message());
                        }
                    }
                }
            }
            Action::RegisterFinished { view, result } if view == self.view => {
                if let CurrentScreen::Register(screen) = &mut self.screen {
                    match result {
                        Ok(()) => screen.set_success(),
                        Err(e) => {
                            screen.set_error(e.user_message(RegisterUseCase::FALLBACK_MESSAGE));
                        }
                    }
                }
            }
            Action::WorkshopsLoaded { view, workshops } if view == self.view => {
                self.workshops.set_workshops(workshops);
            }
            Action::BookingFinished {
                view,
                workshop_id,
                result,
            } if view == self.view => {
                if let Some(route) = self.workshops.complete_booking(&workshop_id, result) {
                    self.navigate(route);
                }
            }
            Action::BookingsLoaded { view, result } if view == self.view => match result {
                Ok(list) => self.bookings.set_bookings(list),
                Err(ApiError::AuthenticationRequired) => self.bookings.set_login_required(),
                Err(_) => self
                    .bookings
                    .set_failed(ListMyBookingsUseCase::FALLBACK_MESSAGE),
            },
            Action::CancelFinished {
                view,
                booking_id,
                result,
            } if view == self.view => {
                self.bookings.finish_cancel(&booking_id, &result);
                match result {
                    Ok(()) => self
                        .notifications
                        .success("Booking canceled", "Your booking has been canceled."),
                    Err(e) => self.notifications.error(
                        "Failed to cancel booking",
                        e.user_message(CancelBookingUseCase::FALLBACK_MESSAGE),
                    ),
                }
            }
            stale => debug!(action = ?stale, view = self.view, "Ignoring result for a closed view"),
        }
    }

    fn help_text(&self) -> &'static str {
        match &self.screen {
            CurrentScreen::Workshops => "↑↓: Workshop  ←→: Time slot  Enter: Book Now  Esc: Quit",
            CurrentScreen::Login(_) | CurrentScreen::Register(_) => {
                "Tab: Next field  Enter: Submit  C-w: Workshops  C-c: Quit"
            }
            CurrentScreen::MyBookings if self.bookings.is_modal() => "y: Confirm  n: Keep booking",
            CurrentScreen::MyBookings => "↑↓: Booking  c: Cancel booking  Esc: Quit",
            CurrentScreen::Confirmation(_) => "Enter: Browse More Workshops  Esc: Quit",
        }
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [nav_area, body_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let route = self.current_route();
        let session = self.session.state();
        NavBar::new(&route, &session).render(nav_area, buf);

        match &self.screen {
            CurrentScreen::Workshops => (&self.workshops).render(body_area, buf),
            CurrentScreen::Login(screen) => screen.render(body_area, buf),
            CurrentScreen::Register(screen) => screen.render(body_area, buf),
            CurrentScreen::MyBookings => (&self.bookings).render(body_area, buf),
            CurrentScreen::Confirmation(screen) => screen.render(body_area, buf),
        }

        Paragraph::new(self.help_text())
            .style(Style::default().fg(Color::DarkGray))
            .render(help_area, buf);

        if let Some(notification) = self.notifications.current_notification() {
            NotificationPopup::new(notification).render(area, buf);
        }
    }
}
