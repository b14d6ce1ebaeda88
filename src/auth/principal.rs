//! Principals produced by successful credential verification.
//!
//! A principal is the verified identity and role a login yields; its
//! claims feed straight into the session token so later requests can make
//! authorization decisions without another store lookup.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Role carried in session claims and console-user records.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Console administrator.
    Admin,
    /// Console staff user.
    User,
    /// Mailbox owner.
    Mailbox,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Mailbox => "mailbox",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "mailbox" => Ok(Self::Mailbox),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A verified mailbox owner.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub address: String,
    pub local_part: String,
    pub domain: String,
    pub role: Role,
}

impl Principal {
    /// Claims this principal contributes to a session token.
    #[must_use]
    pub fn session_claims(&self) -> Map<String, Value> {
        let mut claims = Map::new();
        claims.insert("sub".to_string(), json!(self.id));
        claims.insert("role".to_string(), json!(self.role));
        claims.insert("address".to_string(), json!(self.address));
        claims
    }
}

/// A verified console (admin/staff) user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsolePrincipal {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

impl ConsolePrincipal {
    /// Claims this principal contributes to a session token.
    #[must_use]
    pub fn session_claims(&self) -> Map<String, Value> {
        let mut claims = Map::new();
        claims.insert("sub".to_string(), json!(self.id));
        claims.insert("role".to_string(), json!(self.role));
        claims.insert("username".to_string(), json!(self.username));
        claims
    }
}
