use secrecy::SecretString;

/// Process-wide arguments shared by the token actions.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub session_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_session_secret(&mut self, secret: SecretString) {
        self.session_secret = secret;
    }
}
