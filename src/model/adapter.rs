// File: ./src/model/adapter.rs
// Handles the JSON quirks of the events API
use crate::model::item::{Event, SessionUser};
use log::warn;
use serde::{Deserialize, Deserializer};

/// Treats an explicit `null` the same as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outcome of decoding a login/register reply.
///
/// Any JSON body counts as success; it only carries a user when the body
/// happens to look like one.
pub fn decode_account_reply(body: &[u8]) -> Result<Option<SessionUser>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Decodes the event list record by record. Records that do not look like an
/// event are logged and skipped; only a body that is not a JSON array fails.
pub fn decode_events(body: &[u8]) -> Result<Vec<Event>, serde_json::Error> {
    let records: Vec<serde_json::Value> = serde_json::from_slice(body)?;
    Ok(records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Event>(record) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("Skipping malformed event record: {}", e);
                None
            }
        })
        .collect())
}

/// Looks an event up by the id the user typed, whatever its wire shape.
pub fn find_event<'a>(events: &'a [Event], raw_id: &str) -> Option<&'a Event> {
    let wanted = raw_id.trim();
    events.iter().find(|e| e.id.to_string() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::EventId;

    #[test]
    fn events_accept_numeric_and_string_ids() {
        let body = r#"[
            {"id": 7, "name": "Jam", "description": "Music", "location": "Park",
             "date": "2024-06-01", "photoUrl": "http://img/7.png"},
            {"id": "64a1f", "name": "Talk", "description": null}
        ]"#;
        let events: Vec<Event> = serde_json::from_str(body).unwrap();
        assert_eq!(events[0].id, EventId::Number(7));
        assert_eq!(events[0].photo_url, "http://img/7.png");
        assert_eq!(events[1].id, EventId::Text("64a1f".into()));
        assert_eq!(events[1].description, "");
        assert_eq!(events[1].location, "");
    }

    #[test]
    fn bad_event_records_are_skipped() {
        let body = br#"[
            {"id": 1, "name": "Jam"},
            {"name": "No id"},
            {"id": 2.5, "name": "Float id"},
            {"id": "t2", "name": "Talk"}
        ]"#;
        let events = decode_events(body).unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Jam", "Talk"]);

        assert!(decode_events(b"{\"id\": 1}").is_err());
        assert!(decode_events(b"not json").is_err());
    }

    #[test]
    fn null_interest_list_is_empty() {
        let user: SessionUser =
            serde_json::from_str(r#"{"name": "ana", "interestedInEvents": null}"#).unwrap();
        assert!(user.interested_in_events.is_empty());
        let user: SessionUser = serde_json::from_str(r#"{"name": "bo"}"#).unwrap();
        assert!(user.interested_in_events.is_empty());
    }

    #[test]
    fn ids_echo_back_in_the_shape_received() {
        let req = crate::model::ParticipationRequest {
            event_id: EventId::Text("abc".into()),
            name: "ana".into(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"eventId": "abc", "name": "ana"})
        );
        let req = crate::model::ParticipationRequest {
            event_id: EventId::Number(12),
            name: "ana".into(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"eventId": 12, "name": "ana"})
        );
    }

    #[test]
    fn account_reply_needs_json_but_not_a_user() {
        let user = decode_account_reply(br#"{"name":"ana","interestedInEvents":[1]}"#).unwrap();
        assert_eq!(user.map(|u| u.interested_in_events), Some(vec![EventId::Number(1)]));
        assert_eq!(decode_account_reply(b"\"ok\"").unwrap(), None);
        assert!(decode_account_reply(b"Login OK").is_err());
    }

    #[test]
    fn find_event_matches_display_form() {
        let events: Vec<Event> =
            serde_json::from_str(r#"[{"id": 5, "name": "A"}, {"id": "x9", "name": "B"}]"#).unwrap();
        assert_eq!(find_event(&events, "5").map(|e| e.name.as_str()), Some("A"));
        assert_eq!(find_event(&events, " x9 ").map(|e| e.name.as_str()), Some("B"));
        assert!(find_event(&events, "6").is_none());
    }
}
