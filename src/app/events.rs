//! Event types.
//!
//! Key presses, CLI steps and finished network calls are all converted to an
//! [`AppEvent`] before the reducers see them.

use crate::app::Route;
use crate::app::home::EventField;
use crate::app::login::LoginField;
use crate::app::register::RegisterField;
use crate::app::form::FormInput;
use crate::error::ApiError;
use crate::model::{Event, EventId, Participation, SessionUser};

#[derive(Debug, Clone, PartialEq)]
pub enum LoginEvent {
    Input(FormInput<LoginField>),
    Submit,
    Finished(Result<Option<SessionUser>, ApiError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterEvent {
    Input(FormInput<RegisterField>),
    Submit,
    DismissAlert,
    Finished(Result<Option<SessionUser>, ApiError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeEvent {
    /// Start (or restart) the user + events fetch.
    Mount,
    SessionLoaded {
        generation: u64,
        result: Result<SessionUser, ApiError>,
    },
    EventsLoaded {
        generation: u64,
        result: Result<Vec<Event>, ApiError>,
    },

    SelectNext,
    SelectPrev,
    ToggleSelected,
    Toggle(EventId),
    ParticipationChanged {
        event_id: EventId,
        direction: Participation,
        result: Result<(), ApiError>,
    },

    /// Show or hide the new-event form.
    ToggleModal,
    CloseModal,
    ModalInput(FormInput<EventField>),
    SubmitEvent,
    EventCreated(Result<Event, ApiError>),

    Logout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Login(LoginEvent),
    Register(RegisterEvent),
    Home(HomeEvent),
    Navigate(Route),
    Quit,
}

impl From<LoginEvent> for AppEvent {
    fn from(e: LoginEvent) -> Self {
        Self::Login(e)
    }
}

impl From<RegisterEvent> for AppEvent {
    fn from(e: RegisterEvent) -> Self {
        Self::Register(e)
    }
}

impl From<HomeEvent> for AppEvent {
    fn from(e: HomeEvent) -> Self {
        Self::Home(e)
    }
}
