use std::sync::Arc;

use iced::{Subscription, Task};
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;

use fractalis::{storage::FileStorage, SessionService, BRAND_FULL};
use fractalis_ui::widget::Element;

use crate::{
    config::Config as GuiConfig,
    dir::FractalisDirectory,
    logger::setup_logger,
    screen::{
        car, claims, complaints, contact, dashboard, education, forgot_password, login, register,
        Context, Route,
    },
    VERSION,
};

pub struct Config {
    pub datadir: FractalisDirectory,
    pub gui_config: GuiConfig,
    pub log_level: LevelFilter,
}

pub enum Screen {
    Login(Box<login::Login>),
    Register(Box<register::Register>),
    ForgotPassword(Box<forgot_password::ForgotPassword>),
    Dashboard(Box<dashboard::Dashboard>),
    Car(Box<car::Car>),
    Education(Box<education::Education>),
    Contact(Box<contact::Contact>),
    Claims(Box<claims::Claims>),
    Complaints(Box<complaints::Complaints>),
}

impl Screen {
    fn new(route: Route) -> Self {
        match route {
            Route::Login | Route::Logout => Self::Login(Box::new(login::Login::new())),
            Route::Register => Self::Register(Box::new(register::Register::new())),
            Route::ForgotPassword => {
                Self::ForgotPassword(Box::new(forgot_password::ForgotPassword::new()))
            }
            Route::Dashboard => Self::Dashboard(Box::new(dashboard::Dashboard::new())),
            Route::Car => Self::Car(Box::new(car::Car::new())),
            Route::Education => Self::Education(Box::new(education::Education::new())),
            Route::Contact(line) => Self::Contact(Box::new(contact::Contact::new(line))),
            Route::Claims => Self::Claims(Box::new(claims::Claims::new())),
            Route::Complaints => Self::Complaints(Box::new(complaints::Complaints::new())),
        }
    }

    /// Whether `message` was emitted by this screen.
    fn emitted(&self, message: &Message) -> bool {
        matches!(
            (self, message),
            (Self::Login(_), Message::Login(_))
                | (Self::Register(_), Message::Register(_))
                | (Self::ForgotPassword(_), Message::ForgotPassword(_))
                | (Self::Dashboard(_), Message::Dashboard(_))
                | (Self::Car(_), Message::Car(_))
                | (Self::Education(_), Message::Education(_))
                | (Self::Contact(_), Message::Contact(_))
                | (Self::Claims(_), Message::Claims(_))
                | (Self::Complaints(_), Message::Complaints(_))
        )
    }

    /// Releases what the screen keeps running before it is dropped.
    fn interrupt(&mut self) {
        match self {
            Self::Register(s) => s.interrupt(),
            Self::ForgotPassword(s) => s.interrupt(),
            _ => {}
        }
    }
}

/// Routes reachable without a session.
fn is_public(route: Route) -> bool {
    matches!(
        route,
        Route::Login | Route::Register | Route::ForgotPassword | Route::Logout
    )
}

#[derive(Debug, Clone)]
pub enum Message {
    CtrlC,
    Login(login::Message),
    Register(register::Message),
    ForgotPassword(forgot_password::Message),
    Dashboard(dashboard::Message),
    Car(car::Message),
    Education(education::Message),
    Contact(contact::Message),
    Claims(claims::Message),
    Complaints(complaints::Message),
}

impl Message {
    /// Navigation request carried by a screen message, if any.
    fn route(&self) -> Option<Route> {
        match self {
            Self::Login(login::Message::Navigate(r))
            | Self::Register(register::Message::Navigate(r))
            | Self::ForgotPassword(forgot_password::Message::Navigate(r))
            | Self::Dashboard(dashboard::Message::Navigate(r))
            | Self::Car(car::Message::Navigate(r))
            | Self::Education(education::Message::Navigate(r))
            | Self::Contact(contact::Message::Navigate(r))
            | Self::Claims(claims::Message::Navigate(r))
            | Self::Complaints(complaints::Message::Navigate(r)) => Some(*r),
            _ => None,
        }
    }
}

pub struct GUI {
    context: Context,
    screen: Screen,
}

async fn ctrl_c() -> Result<(), ()> {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("{}", e);
    };
    info!("Signal received, exiting");
    Ok(())
}

impl GUI {
    pub fn title(&self) -> String {
        format!("{} v{}", BRAND_FULL, VERSION)
    }

    pub fn new(config: Config) -> (GUI, Task<Message>) {
        if let Err(e) = setup_logger(config.log_level, config.datadir.clone()) {
            tracing::warn!("Error while setting up the logger: {}", e);
        }
        let storage = FileStorage::in_directory(config.datadir.path());
        info!("Using storage at {}", storage.path().display());
        let session = SessionService::init(Arc::new(storage), config.gui_config.latency());
        let context = Context {
            session,
            contact_phone: config.gui_config.contact_phone().to_string(),
        };
        (
            Self::with_context(context),
            Task::perform(ctrl_c(), |_| Message::CtrlC),
        )
    }

    /// Starts on the dashboard when a session was restored.
    pub fn with_context(context: Context) -> Self {
        let screen = Screen::new(if context.session.is_authenticated() {
            Route::Dashboard
        } else {
            Route::Login
        });
        Self { context, screen }
    }

    fn navigate(&mut self, route: Route) {
        let route = if route == Route::Logout {
            self.context.session.logout();
            Route::Login
        } else if !is_public(route) && !self.context.session.is_authenticated() {
            tracing::warn!("{:?} requires a session, showing login", route);
            Route::Login
        } else {
            route
        };
        tracing::debug!("Navigating to {:?}", route);
        self.screen.interrupt();
        self.screen = Screen::new(route);
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        if let Some(route) = message.route() {
            // A delayed redirection may outlive the screen that scheduled it.
            if self.screen.emitted(&message) {
                self.navigate(route);
            } else {
                tracing::debug!("Ignoring navigation to {:?} from an unmounted screen", route);
            }
            return Task::none();
        }
        if let Message::CtrlC = message {
            self.screen.interrupt();
            return iced::exit();
        }
        let ctx = &self.context;
        match (&mut self.screen, message) {
            (Screen::Login(s), Message::Login(msg)) => s.update(ctx, msg).map(Message::Login),
            (Screen::Register(s), Message::Register(msg)) => {
                s.update(ctx, msg).map(Message::Register)
            }
            (Screen::ForgotPassword(s), Message::ForgotPassword(msg)) => {
                s.update(ctx, msg).map(Message::ForgotPassword)
            }
            (Screen::Car(s), Message::Car(msg)) => s.update(ctx, msg).map(Message::Car),
            (Screen::Education(s), Message::Education(msg)) => {
                s.update(ctx, msg).map(Message::Education)
            }
            (Screen::Contact(s), Message::Contact(msg)) => {
                s.update(ctx, msg).map(Message::Contact)
            }
            (Screen::Claims(s), Message::Claims(msg)) => s.update(ctx, msg).map(Message::Claims),
            (Screen::Complaints(s), Message::Complaints(msg)) => {
                s.update(ctx, msg).map(Message::Complaints)
            }
            (_, msg) => {
                tracing::debug!("Dropping message for an unmounted screen: {:?}", msg);
                Task::none()
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        match &self.screen {
            Screen::Register(s) => s.subscription().map(Message::Register),
            Screen::ForgotPassword(s) => s.subscription().map(Message::ForgotPassword),
            _ => Subscription::none(),
        }
    }

    pub fn view(&self) -> Element<Message> {
        let ctx = &self.context;
        match &self.screen {
            Screen::Login(s) => s.view().map(Message::Login),
            Screen::Register(s) => s.view().map(Message::Register),
            Screen::ForgotPassword(s) => s.view().map(Message::ForgotPassword),
            Screen::Dashboard(s) => s.view(ctx).map(Message::Dashboard),
            Screen::Car(s) => s.view(ctx).map(Message::Car),
            Screen::Education(s) => s.view(ctx).map(Message::Education),
            Screen::Contact(s) => s.view(ctx).map(Message::Contact),
            Screen::Claims(s) => s.view(ctx).map(Message::Claims),
            Screen::Complaints(s) => s.view(ctx).map(Message::Complaints),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::test_context;
    use fractalis::contact::ProductLine;

    fn go(gui: &mut GUI, message: Message) {
        let _ = gui.update(message);
    }

    #[tokio::test]
    async fn session_decides_the_first_screen() {
        let ctx = test_context();
        let gui = GUI::with_context(ctx.clone());
        assert!(matches!(gui.screen, Screen::Login(_)));

        ctx.session.login("0700000000", "secret").await.unwrap();
        let gui = GUI::with_context(ctx);
        assert!(matches!(gui.screen, Screen::Dashboard(_)));
    }

    #[tokio::test]
    async fn navigation_and_logout() {
        let ctx = test_context();
        let mut gui = GUI::with_context(ctx.clone());

        go(&mut gui, Message::Login(login::Message::Navigate(Route::Car)));
        assert!(matches!(gui.screen, Screen::Login(_)));
        go(
            &mut gui,
            Message::Login(login::Message::Navigate(Route::Register)),
        );
        assert!(matches!(gui.screen, Screen::Register(_)));

        ctx.session.login("0700000000", "secret").await.unwrap();
        go(
            &mut gui,
            Message::Register(register::Message::Navigate(Route::Dashboard)),
        );
        assert!(matches!(gui.screen, Screen::Dashboard(_)));
        go(
            &mut gui,
            Message::Dashboard(dashboard::Message::Navigate(Route::Contact(
                ProductLine::Voyage,
            ))),
        );
        assert!(matches!(gui.screen, Screen::Contact(_)));

        go(
            &mut gui,
            Message::Contact(contact::Message::Navigate(Route::Dashboard)),
        );
        go(
            &mut gui,
            Message::Dashboard(dashboard::Message::Navigate(Route::Logout)),
        );
        assert!(matches!(gui.screen, Screen::Login(_)));
        assert!(!ctx.session.is_authenticated());
    }

    #[tokio::test]
    async fn stale_messages_are_dropped() {
        let ctx = test_context();
        ctx.session.login("0700000000", "secret").await.unwrap();
        let mut gui = GUI::with_context(ctx);
        go(
            &mut gui,
            Message::Dashboard(dashboard::Message::Navigate(Route::Claims)),
        );
        go(
            &mut gui,
            Message::Car(car::Message::View(car::ViewMessage::Next)),
        );
        go(
            &mut gui,
            Message::Car(car::Message::Navigate(Route::Dashboard)),
        );
        assert!(matches!(gui.screen, Screen::Claims(_)));
    }
}
