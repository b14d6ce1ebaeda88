use crate::auth::password::{hash_password, verify_password};
use crate::cli::actions::Action;
use anyhow::{anyhow, Result};
use secrecy::ExposeSecret;

/// Handle the password actions
pub fn handle(action: Action) -> Result<()> {
    match action {
        Action::HashPassword { password } => {
            let record = hash_password(password.expose_secret())?;
            println!("{record}");
            Ok(())
        }
        Action::VerifyPassword { password, record } => {
            if verify_password(password.expose_secret(), &record) {
                println!("ok");
                Ok(())
            } else {
                Err(anyhow!("password rejected"))
            }
        }
        _ => Err(anyhow!("unsupported action")),
    }
}
