//! Postgres implementation of the credential store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::{ConsoleUserRecord, ConsoleUserStore, MailboxRecord, MailboxStore};

/// Credential store backed by the service's Postgres database.
#[derive(Clone)]
pub struct PgAuthStore {
    pool: PgPool,
}

impl PgAuthStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MailboxStore for PgAuthStore {
    async fn lookup(&self, address: &str) -> Result<Option<MailboxRecord>> {
        let query = "SELECT id, address, local_part, domain, password_hash, can_login \
                     FROM mailboxes WHERE address = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(address)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup mailbox")?;

        Ok(row.map(|row| MailboxRecord {
            id: row.get("id"),
            address: row.get("address"),
            local_part: row.get("local_part"),
            domain: row.get("domain"),
            password_hash: row.get("password_hash"),
            can_login: row.get("can_login"),
        }))
    }

    async fn touch_last_accessed(&self, id: Uuid) -> Result<()> {
        let query = "UPDATE mailboxes SET last_accessed_at = NOW() WHERE id = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        sqlx::query(query)
            .bind(id)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to update last accessed time")?;
        Ok(())
    }
}

#[async_trait]
impl ConsoleUserStore for PgAuthStore {
    async fn lookup(&self, username: &str) -> Result<Option<ConsoleUserRecord>> {
        let query = "SELECT id, username, password_hash, role::text AS role, can_login \
                     FROM users WHERE username = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup console user")?;

        let Some(row) = row else {
            return Ok(None);
        };
        let role: String = row.get("role");
        let role = role
            .parse()
            .with_context(|| format!("invalid role in users table: {role}"))?;
        Ok(Some(ConsoleUserRecord {
            id: row.get("id"),
            username: row.get("username"),
            password_hash: row.get("password_hash"),
            role,
            can_login: row.get("can_login"),
        }))
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<()> {
        let query = "UPDATE users SET last_login_at = NOW() WHERE id = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        sqlx::query(query)
            .bind(id)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to update last login time")?;
        Ok(())
    }
}
