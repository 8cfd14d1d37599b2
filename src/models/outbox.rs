//! Wire payloads replicated through the sync outbox.
//!
//! The payload column stores one of these variants as a tagged JSON document,
//! so deserialization is exhaustive: an outbox row either decodes into a
//! known `(entity, action)` shape or is classified as permanently failed by
//! the sync driver.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Vital,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Vital => "vital",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "vital" => Ok(Self::Vital),
            other => Err(format!("unknown entity kind: {other}")),
        }
    }
}

/// The only replicated action today. Kept as an enum so additional actions
/// extend the dispatch match instead of a stringly-typed branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboxAction {
    Create,
}

impl OutboxAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
        }
    }
}

impl fmt::Display for OutboxAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields needed to recreate a user on the remote server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub birthdate: String,
    pub email: Option<String>,
}

/// Fields needed to recreate a vital reading on the remote server.
///
/// References the owning user by username (`user_external`), never by local
/// numeric id: the remote id space is independent of ours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalPayload {
    pub user_external: String,
    pub date: String,
    pub pressure_systolic: Option<i32>,
    pub pressure_diastolic: Option<i32>,
    pub glucose: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "lowercase")]
pub enum OutboxPayload {
    User(UserPayload),
    Vital(VitalPayload),
}

impl OutboxPayload {
    #[must_use]
    pub const fn entity(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Vital(_) => EntityKind::Vital,
        }
    }

    #[must_use]
    pub const fn action(&self) -> OutboxAction {
        OutboxAction::Create
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_round_trip_keeps_tag() {
        let payload = OutboxPayload::User(UserPayload {
            username: "ana".to_string(),
            password: "secret".to_string(),
            full_name: None,
            birthdate: "1990-04-02".to_string(),
            email: Some("ana@example.com".to_string()),
        });

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""entity":"user""#));

        let back: OutboxPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
        assert_eq!(back.entity(), EntityKind::User);
    }

    #[test]
    fn test_unknown_entity_tag_is_rejected() {
        let json = r#"{"entity":"appointment","date":"2026-01-01"}"#;
        assert!(serde_json::from_str::<OutboxPayload>(json).is_err());
    }

    #[test]
    fn test_entity_kind_round_trip() {
        assert_eq!("user".parse::<EntityKind>().unwrap(), EntityKind::User);
        assert_eq!("vital".parse::<EntityKind>().unwrap(), EntityKind::Vital);
        assert!("unknown".parse::<EntityKind>().is_err());
        assert_eq!(EntityKind::Vital.to_string(), "vital");
    }
}
