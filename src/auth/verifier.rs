//! Credential verification for mailbox owners and console users.
//!
//! Both flows return `Ok(None)` for every credential failure — unknown
//! account, disabled account, wrong password — so callers cannot tell
//! them apart. Only store faults surface as `Err`.

use anyhow::Result;
use regex::Regex;
use tracing::warn;

use super::password::{constant_time_eq, verify_password};
use super::principal::{ConsolePrincipal, Principal, Role};
use crate::store::{ConsoleUserStore, MailboxStore};

/// Normalize an address or username for lookup.
fn normalize(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// Basic shape check on an already-normalized address.
fn valid_address(address: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(address))
}

/// Authenticate a mailbox owner.
///
/// Records without a stored hash accept the normalized address itself as
/// the password — a compatibility rule for pre-existing mailboxes that
/// never set one. The rule applies here and nowhere else; no creation
/// path writes hash-less records.
///
/// # Errors
///
/// Returns `Err` only for store faults. Credential failures are
/// `Ok(None)`.
pub async fn verify_mailbox_login<S>(
    store: &S,
    address: &str,
    password: &str,
) -> Result<Option<Principal>>
where
    S: MailboxStore + ?Sized,
{
    if address.trim().is_empty() || password.is_empty() {
        return Ok(None);
    }
    let address = normalize(address);
    if !valid_address(&address) {
        return Ok(None);
    }

    let Some(mailbox) = store.lookup(&address).await? else {
        return Ok(None);
    };

    // Disabled mailboxes fail exactly like a wrong password, and before
    // any password work.
    if !mailbox.can_login {
        return Ok(None);
    }

    let password_ok = match &mailbox.password_hash {
        Some(stored) => verify_password(password, stored),
        None => constant_time_eq(password.as_bytes(), address.as_bytes()),
    };
    if !password_ok {
        return Ok(None);
    }

    // Best effort: a failed timestamp update must not fail the login.
    if let Err(err) = store.touch_last_accessed(mailbox.id).await {
        warn!(
            "failed to update last accessed time for {}: {err}",
            mailbox.address
        );
    }

    Ok(Some(Principal {
        id: mailbox.id,
        address: mailbox.address,
        local_part: mailbox.local_part,
        domain: mailbox.domain,
        role: Role::Mailbox,
    }))
}

/// Authenticate a console user.
///
/// Structurally the mailbox flow without the default-password affordance:
/// console records always carry a hash.
///
/// # Errors
///
/// Returns `Err` only for store faults. Credential failures are
/// `Ok(None)`.
pub async fn verify_console_login<S>(
    store: &S,
    username: &str,
    password: &str,
) -> Result<Option<ConsolePrincipal>>
where
    S: ConsoleUserStore + ?Sized,
{
    if username.trim().is_empty() || password.is_empty() {
        return Ok(None);
    }
    let username = normalize(username);

    let Some(user) = store.lookup(&username).await? else {
        return Ok(None);
    };
    if !user.can_login {
        return Ok(None);
    }
    if !verify_password(password, &user.password_hash) {
        return Ok(None);
    }

    if let Err(err) = store.touch_last_login(user.id).await {
        warn!("failed to update last login time for {}: {err}", user.username);
    }

    Ok(Some(ConsolePrincipal {
        id: user.id,
        username: user.username,
        role: user.role,
    }))
}
