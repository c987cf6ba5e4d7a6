//! Effects returned by the reducers.
//!
//! Reducers only mutate view state; anything that touches the network or the
//! disk is described here and carried out by [`crate::runtime::Runtime`].

use crate::app::Route;
use crate::model::{Credentials, EventId, NewEvent, Participation};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Switch screens. Resolved by [`crate::app::App`], never reaches the runtime.
    Navigate(Route),

    /// POST `/api/login`.
    Login(Credentials),

    /// POST `/api/register`.
    Register(Credentials),

    /// GET `/api/user` for the mount tagged `generation`.
    LoadSession { generation: u64 },

    /// GET `/api/allEvents` for the mount tagged `generation`.
    LoadEvents { generation: u64 },

    /// POST `/api/event`.
    CreateEvent(NewEvent),

    /// POST `/api/addEvent` or `/api/removeEvent`.
    SetParticipation {
        event_id: EventId,
        user_name: String,
        direction: Participation,
    },

    /// Drop the session cookie locally.
    ClearSession,

    /// Save the name that just logged in so the next start prefills it.
    RememberUsername(String),
}
