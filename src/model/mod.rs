// File: src/model/mod.rs
pub mod adapter;
pub mod item;

pub use item::{
    Credentials, Event, EventId, NewEvent, Participation, ParticipationRequest, SessionUser,
    ValidationError,
};
