use crate::auth::verifier::{verify_console_login, verify_mailbox_login};
use crate::cli::actions::Action;
use crate::store::PgAuthStore;
use anyhow::{anyhow, Result};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

/// Handle the login check action
pub async fn handle(action: Action) -> Result<()> {
    let Action::CheckLogin {
        dsn,
        address,
        password,
        console,
    } = action
    else {
        return Err(anyhow!("unsupported action"));
    };

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&dsn)
        .await?;
    let store = PgAuthStore::new(pool);

    if console {
        match verify_console_login(&store, &address, password.expose_secret()).await? {
            Some(principal) => println!("{}", serde_json::to_string_pretty(&principal)?),
            None => return Err(anyhow!("login rejected")),
        }
    } else {
        match verify_mailbox_login(&store, &address, password.expose_secret()).await? {
            Some(principal) => println!("{}", serde_json::to_string_pretty(&principal)?),
            None => return Err(anyhow!("login rejected")),
        }
    }

    Ok(())
}
