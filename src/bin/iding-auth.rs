use anyhow::Result;
use iding_auth::cli::{actions, actions::Action, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (action, globals) = start()?;

    // Handle the action
    match action {
        Action::HashPassword { .. } | Action::VerifyPassword { .. } => {
            actions::password::handle(action)?;
        }
        Action::IssueToken { .. } | Action::VerifyToken { .. } => {
            actions::token::handle(action, &globals)?;
        }
        Action::CheckLogin { .. } => actions::login::handle(action).await?,
    }

    Ok(())
}
