// File: src/app/home.rs
// The main screen: session user, event list, participation and event creation.
use crate::app::Route;
use crate::app::effects::Effect;
use crate::app::events::HomeEvent;
use crate::app::form::{Field, Form};
use crate::error::ApiError;
use crate::model::{Event, EventId, NewEvent, Participation, SessionUser};
use log::{info, warn};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Name,
    Description,
    Location,
    Date,
}

impl Field for EventField {
    const ALL: &'static [Self] = &[
        EventField::Name,
        EventField::Description,
        EventField::Location,
        EventField::Date,
    ];

    fn label(self) -> &'static str {
        match self {
            EventField::Name => "Name",
            EventField::Description => "Description",
            EventField::Location => "Location",
            EventField::Date => "Date",
        }
    }
}

#[derive(Default, PartialEq, Clone, Copy, Debug)]
pub enum Phase {
    #[default]
    Loading,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
    pub phase: Phase,
    pub user: Option<SessionUser>,
    pub events: Vec<Event>,
    pub selected: usize,

    /// Mount counter; replies stamped with an older value are stale.
    pub generation: u64,
    /// Events with a participation request in flight.
    pub pending: HashSet<EventId>,

    pub modal_open: bool,
    pub new_event: Form<EventField>,
    pub creating: bool,

    pub status: Option<String>,
}

impl HomeState {
    /// Fresh state for a new mount, keeping the generation counter monotonic.
    pub fn remount(&self) -> Self {
        Self {
            generation: self.generation,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading || self.creating
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.events.get(self.selected)
    }

    pub fn is_interested(&self, id: &EventId) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_interested(id))
    }

    pub fn new_event(&self) -> NewEvent {
        NewEvent {
            name: self.new_event.get(EventField::Name).trim().to_string(),
            description: self.new_event.get(EventField::Description).trim().to_string(),
            location: self.new_event.get(EventField::Location).trim().to_string(),
            date: self.new_event.get(EventField::Date).trim().to_string(),
        }
    }

    fn mount(&mut self) -> Vec<Effect> {
        self.generation += 1;
        self.phase = Phase::Loading;
        vec![Effect::LoadSession {
            generation: self.generation,
        }]
    }

    fn toggle(&mut self, event_id: EventId) -> Vec<Effect> {
        let Some(user) = &self.user else {
            return vec![];
        };
        if user.name.is_empty() || self.pending.contains(&event_id) {
            return vec![];
        }
        let direction = Participation::for_membership(user.is_interested(&event_id));
        let user_name = user.name.clone();
        self.pending.insert(event_id.clone());
        vec![Effect::SetParticipation {
            event_id,
            user_name,
            direction,
        }]
    }
}

pub fn update(state: &mut HomeState, event: HomeEvent) -> Vec<Effect> {
    match event {
        HomeEvent::Mount => state.mount(),

        HomeEvent::SessionLoaded { generation, result } => {
            if generation != state.generation {
                return vec![];
            }
            match result {
                Ok(user) => {
                    state.user = Some(user);
                    vec![Effect::LoadEvents { generation }]
                }
                Err(e) => {
                    warn!("Error fetching user data: {}", e);
                    state.phase = Phase::Unauthenticated;
                    state.user = None;
                    vec![Effect::Navigate(Route::Login)]
                }
            }
        }

        HomeEvent::EventsLoaded { generation, result } => {
            if generation != state.generation {
                return vec![];
            }
            match result {
                Ok(events) => {
                    state.phase = Phase::Authenticated;
                    state.events = events;
                    state.selected = state.selected.min(state.events.len().saturating_sub(1));
                    vec![]
                }
                // The server answered; the session is fine, only the list is missing.
                Err(e @ ApiError::Status { .. }) => {
                    warn!("Error fetching events: {}", e);
                    state.phase = Phase::Authenticated;
                    state.status = Some(format!("Could not load events: {}", e));
                    vec![]
                }
                Err(e) => {
                    warn!("Error fetching events: {}", e);
                    state.phase = Phase::Unauthenticated;
                    state.user = None;
                    vec![Effect::Navigate(Route::Login)]
                }
            }
        }

        HomeEvent::SelectNext => {
            if state.selected + 1 < state.events.len() {
                state.selected += 1;
            }
            vec![]
        }
        HomeEvent::SelectPrev => {
            state.selected = state.selected.saturating_sub(1);
            vec![]
        }

        HomeEvent::ToggleSelected => match state.selected_event() {
            Some(event) => {
                let id = event.id.clone();
                state.toggle(id)
            }
            None => vec![],
        },
        HomeEvent::Toggle(event_id) => state.toggle(event_id),

        HomeEvent::ParticipationChanged {
            event_id,
            direction,
            result,
        } => {
            // Not in flight any more: the screen was remounted since.
            if !state.pending.remove(&event_id) {
                return vec![];
            }
            match result {
                Ok(()) => {
                    if let Some(user) = state.user.as_mut() {
                        match direction {
                            Participation::Add => user.add_interest(event_id),
                            Participation::Remove => user.remove_interest(&event_id),
                        };
                    }
                }
                Err(e) => {
                    warn!("Error toggling participation for {}: {}", event_id, e);
                    state.status = Some(format!("Could not update participation: {}", e));
                }
            }
            vec![]
        }

        HomeEvent::ToggleModal => {
            state.modal_open = !state.modal_open;
            vec![]
        }
        HomeEvent::CloseModal => {
            state.modal_open = false;
            vec![]
        }
        HomeEvent::ModalInput(input) => {
            if state.modal_open {
                state.new_event.apply(input);
            }
            vec![]
        }
        HomeEvent::SubmitEvent => {
            if state.creating {
                return vec![];
            }
            let new_event = state.new_event();
            if let Err(e) = new_event.validate() {
                state.status = Some(e.to_string());
                return vec![];
            }
            state.modal_open = false;
            state.creating = true;
            state.status = None;
            vec![Effect::CreateEvent(new_event)]
        }
        HomeEvent::EventCreated(result) => {
            if !state.creating {
                return vec![];
            }
            state.creating = false;
            match result {
                Ok(event) => {
                    info!("Created event {} ({})", event.name, event.id);
                    state.events.push(event);
                    state.new_event = Form::default();
                    state.mount()
                }
                Err(e) => {
                    warn!("Error creating event: {}", e);
                    state.status = Some(format!("Could not create event: {}", e));
                    vec![]
                }
            }
        }

        HomeEvent::Logout => vec![Effect::ClearSession, Effect::Navigate(Route::Login)],
    }
}
