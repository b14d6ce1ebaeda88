use crate::auth::{session, token};
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Context, Result};
use secrecy::ExposeSecret;
use serde_json::{json, Map};

/// Handle the token actions
pub fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let now = unix_now()?;
    let secret = globals.session_secret.expose_secret();

    match action {
        Action::IssueToken {
            subject,
            role,
            address,
        } => {
            let mut claims = Map::new();
            claims.insert("sub".to_string(), json!(subject));
            claims.insert("role".to_string(), json!(role));
            if let Some(address) = address {
                claims.insert("address".to_string(), json!(address));
            }
            let token = session::issue_session(secret.as_bytes(), claims, now)?;
            println!("{token}");
            Ok(())
        }
        Action::VerifyToken { token } => match token::verify(secret.as_bytes(), &token, now) {
            Some(claims) => {
                println!("{}", serde_json::to_string_pretty(&claims)?);
                Ok(())
            }
            None => Err(anyhow!("token rejected")),
        },
        _ => Err(anyhow!("unsupported action")),
    }
}

fn unix_now() -> Result<i64> {
    let elapsed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("system clock is before the unix epoch")?;
    i64::try_from(elapsed.as_secs()).context("system clock out of range")
}
