//! Screen state and reducers.
//!
//! [`App::update`] is the single entry point: it routes an [`AppEvent`] to
//! the active screen's reducer, resolves navigation, and hands the remaining
//! effects back to the caller to execute.

pub mod effects;
pub mod events;
pub mod form;
pub mod home;
pub mod login;
pub mod register;

use crate::app::effects::Effect;
use crate::app::events::{AppEvent, HomeEvent};
use crate::app::home::HomeState;
use crate::app::login::LoginState;
use crate::app::register::RegisterState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    Login,
    Register,
    #[default]
    Home,
}

#[derive(Debug, Clone, Default)]
pub struct App {
    pub route: Route,
    pub login: LoginState,
    pub register: RegisterState,
    pub home: HomeState,
    /// Prefills the login form's username.
    pub remembered_username: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(remembered_username: &str) -> Self {
        Self {
            route: Route::Login,
            login: LoginState::with_username(remembered_username),
            remembered_username: remembered_username.to_string(),
            ..Self::default()
        }
    }

    /// Starts on the main screen, which sends the user to Login if there is
    /// no session.
    pub fn start(&mut self) -> Vec<Effect> {
        self.navigate(Route::Home)
    }

    pub fn update(&mut self, event: AppEvent) -> Vec<Effect> {
        let effects = match event {
            AppEvent::Login(e) if self.route == Route::Login => login::update(&mut self.login, e),
            AppEvent::Register(e) if self.route == Route::Register => {
                register::update(&mut self.register, e)
            }
            AppEvent::Home(e) if self.route == Route::Home => home::update(&mut self.home, e),
            AppEvent::Navigate(route) => vec![Effect::Navigate(route)],
            AppEvent::Quit => {
                self.should_quit = true;
                vec![]
            }
            // Leftovers for a screen that is no longer shown.
            _ => vec![],
        };
        self.resolve(effects)
    }

    /// Switches screens. Forms are cleared; entering Home remounts it.
    pub fn navigate(&mut self, route: Route) -> Vec<Effect> {
        self.route = route;
        match route {
            Route::Login => {
                self.login = LoginState::with_username(&self.remembered_username);
                vec![]
            }
            Route::Register => {
                self.register = RegisterState::default();
                vec![]
            }
            Route::Home => {
                self.home = self.home.remount();
                let effects = home::update(&mut self.home, HomeEvent::Mount);
                self.resolve(effects)
            }
        }
    }

    fn resolve(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut out = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::Navigate(route) => out.extend(self.navigate(route)),
                Effect::RememberUsername(name) => {
                    self.remembered_username = name.clone();
                    out.push(Effect::RememberUsername(name));
                }
                other => out.push(other),
            }
        }
        out
    }

    /// Status line of whatever screen is shown.
    pub fn status(&self) -> Option<&str> {
        match self.route {
            Route::Login => self.login.status.as_deref(),
            Route::Register => self.register.status.as_deref(),
            Route::Home => self.home.status.as_deref(),
        }
    }
}
