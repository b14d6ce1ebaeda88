//! Credential store records and the collaborator seam the verifiers
//! consume.
//!
//! The store is the only shared external resource: a read per login plus
//! an occasional best-effort timestamp write. No transaction spans the
//! two, so concurrent logins against the same record race harmlessly on
//! the timestamp (last write wins).

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::principal::Role;

pub mod postgres;

pub use postgres::PgAuthStore;

/// A mailbox credential row.
///
/// `password_hash` is nullable: hash-less records predate custom mailbox
/// passwords and fall back to the address-as-password rule in the
/// verifier.
#[derive(Clone, Debug)]
pub struct MailboxRecord {
    pub id: Uuid,
    pub address: String,
    pub local_part: String,
    pub domain: String,
    pub password_hash: Option<String>,
    pub can_login: bool,
}

/// A console user credential row. Console records always carry a hash.
#[derive(Clone, Debug)]
pub struct ConsoleUserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub can_login: bool,
}

/// Mailbox credential lookups and the post-login timestamp touch.
#[async_trait]
pub trait MailboxStore: Send + Sync {
    /// Look up a mailbox by normalized address.
    async fn lookup(&self, address: &str) -> Result<Option<MailboxRecord>>;

    /// Record a successful login. Callers treat failures as non-fatal.
    async fn touch_last_accessed(&self, id: Uuid) -> Result<()>;
}

/// Console user credential lookups and the post-login timestamp touch.
#[async_trait]
pub trait ConsoleUserStore: Send + Sync {
    /// Look up a console user by normalized username.
    async fn lookup(&self, username: &str) -> Result<Option<ConsoleUserRecord>>;

    /// Record a successful login. Callers treat failures as non-fatal.
    async fn touch_last_login(&self, id: Uuid) -> Result<()>;
}
