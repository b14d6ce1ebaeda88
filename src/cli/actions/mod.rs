pub mod login;
pub mod password;
pub mod token;

use secrecy::SecretString;

/// Actions the CLI can dispatch.
#[derive(Debug)]
pub enum Action {
    HashPassword {
        password: SecretString,
    },
    VerifyPassword {
        password: SecretString,
        record: String,
    },
    IssueToken {
        subject: String,
        role: String,
        address: Option<String>,
    },
    VerifyToken {
        token: String,
    },
    CheckLogin {
        dsn: String,
        address: String,
        password: SecretString,
        console: bool,
    },
}
