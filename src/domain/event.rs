//! Event domain entity and related types.
//!
//! Events are the veterinary and lifecycle history of an animal. They are
//! append-only apart from an explicit correction delete; there is no
//! soft-delete flag on events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::{EVENT_BIRTH, EVENT_DEWORMING, EVENT_OTHER, EVENT_TREATMENT, EVENT_VACCINATION};

/// Event type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Vaccination,
    Treatment,
    Deworming,
    Birth,
    Other,
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        match s {
            EVENT_VACCINATION => EventType::Vaccination,
            EVENT_TREATMENT => EventType::Treatment,
            EVENT_DEWORMING => EventType::Deworming,
            EVENT_BIRTH => EventType::Birth,
            _ => EventType::Other,
        }
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        event_type.to_string()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventType::Vaccination => EVENT_VACCINATION,
            EventType::Treatment => EVENT_TREATMENT,
            EventType::Deworming => EVENT_DEWORMING,
            EventType::Birth => EVENT_BIRTH,
            EventType::Other => EVENT_OTHER,
        };
        write!(f, "{}", s)
    }
}

/// Event domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i32,
    /// The animal this event is about (mandatory)
    pub animal_id: i32,
    /// Mother reference, set only for birth events
    pub mother_id: Option<i32>,
    pub event_type: EventType,
    pub event_date: NaiveDate,
    pub notes: String,
}

impl Event {
    pub fn is_birth(&self) -> bool {
        self.event_type == EventType::Birth
    }
}

/// Data for recording a new event
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct NewEvent {
    pub animal_id: i32,
    pub mother_id: Option<i32>,
    pub event_type: EventType,
    pub event_date: NaiveDate,
    #[validate(length(max = 200, message = "notes are limited to 200 characters"))]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_round_trip() {
        for (s, t) in [
            ("vaccination", EventType::Vaccination),
            ("treatment", EventType::Treatment),
            ("deworming", EventType::Deworming),
            ("birth", EventType::Birth),
            ("other", EventType::Other),
        ] {
            assert_eq!(EventType::from(s), t);
            assert_eq!(t.to_string(), s);
        }
    }

    #[test]
    fn test_unknown_type_falls_back_to_other() {
        assert_eq!(EventType::from("shearing"), EventType::Other);
    }
}
