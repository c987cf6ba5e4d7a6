// File: src/model/item.rs
use crate::model::adapter::null_as_default;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Server-assigned event identifier.
///
/// The backend may hand out numeric or string ids. Whatever shape arrives is
/// kept and echoed back unchanged in participation requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Number(n) => f.pad(&n.to_string()),
            EventId::Text(s) => f.pad(s),
        }
    }
}

impl From<i64> for EventId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photo_url: String,
}

/// The authenticated identity behind the current cookie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interested_in_events: Vec<EventId>,
}

impl SessionUser {
    pub fn is_interested(&self, id: &EventId) -> bool {
        self.interested_in_events.contains(id)
    }

    /// Records interest in `id`. Returns false if it was already recorded.
    pub fn add_interest(&mut self, id: EventId) -> bool {
        if self.is_interested(&id) {
            return false;
        }
        self.interested_in_events.push(id);
        true
    }

    /// Drops every occurrence of `id`. Returns false if none was present.
    pub fn remove_interest(&mut self, id: &EventId) -> bool {
        let before = self.interested_in_events.len();
        self.interested_in_events.retain(|i| i != id);
        before != self.interested_in_events.len()
    }
}

/// Body for `/api/login` and `/api/register`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

/// Body for `/api/event`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub location: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("date must look like YYYY-MM-DD, got '{0}'")]
    InvalidDate(String),
}

impl NewEvent {
    pub const DATE_FORMAT: &'static str = "%Y-%m-%d";

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (label, value) in [
            ("Name", &self.name),
            ("Description", &self.description),
            ("Location", &self.location),
            ("Date", &self.date),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Missing(label));
            }
        }
        NaiveDate::parse_from_str(self.date.trim(), Self::DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(self.date.clone()))?;
        Ok(())
    }
}

/// Direction of a participation toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participation {
    Add,
    Remove,
}

impl Participation {
    pub fn endpoint(self) -> &'static str {
        match self {
            Participation::Add => "/api/addEvent",
            Participation::Remove => "/api/removeEvent",
        }
    }

    /// Direction a toggle takes given current membership.
    pub fn for_membership(is_interested: bool) -> Self {
        if is_interested {
            Participation::Remove
        } else {
            Participation::Add
        }
    }
}

/// Body for `/api/addEvent` and `/api/removeEvent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationRequest {
    pub event_id: EventId,
    pub name: String,
}
