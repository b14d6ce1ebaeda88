use crate::cli::actions::Action;
use anyhow::{Context, Result};
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    // Closure to return subcommand matches
    let sub_m = |subcommand| -> Result<&clap::ArgMatches> {
        matches
            .subcommand_matches(subcommand)
            .context("arguments not found")
    };

    match matches.subcommand_name() {
        Some("hash-password") => {
            let matches = sub_m("hash-password")?;
            Ok(Action::HashPassword {
                password: secret_string(matches, "password")?,
            })
        }
        Some("verify-password") => {
            let matches = sub_m("verify-password")?;
            Ok(Action::VerifyPassword {
                password: secret_string(matches, "password")?,
                record: string(matches, "record")?,
            })
        }
        Some("issue-token") => {
            let matches = sub_m("issue-token")?;
            Ok(Action::IssueToken {
                subject: string(matches, "subject")?,
                role: string(matches, "role")?,
                address: matches.get_one::<String>("address").cloned(),
            })
        }
        Some("verify-token") => {
            let matches = sub_m("verify-token")?;
            Ok(Action::VerifyToken {
                token: string(matches, "token")?,
            })
        }
        Some("check-login") => {
            let matches = sub_m("check-login")?;
            Ok(Action::CheckLogin {
                dsn: string(matches, "dsn")?,
                address: string(matches, "address")?,
                password: secret_string(matches, "password")?,
                console: matches.get_flag("console"),
            })
        }
        _ => Err(anyhow::anyhow!("no subcommand provided")),
    }
}

fn string(matches: &clap::ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .map(String::to_string)
        .with_context(|| format!("missing required argument: {id}"))
}

fn secret_string(matches: &clap::ArgMatches, id: &str) -> Result<SecretString> {
    string(matches, id).map(SecretString::from)
}
