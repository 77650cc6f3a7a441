use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::config::Config;

/// Login body. Missing fields are empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// Decides whether a login attempt is accepted.
pub trait CredentialVerifier: Send + Sync {
    /// Returns the token to hand out, or `None` to reject.
    fn verify(&self, request: &AuthRequest) -> Option<String>;
}

/// A single configured username/password pair.
pub struct StaticCredentials {
    username: String,
    password: String,
    token: String,
}

impl StaticCredentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            token: token.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.login_username.clone(),
            cfg.login_password.clone(),
            cfg.login_token.clone(),
        )
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, request: &AuthRequest) -> Option<String> {
        let user_ok = request.username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = request.password.as_bytes().ct_eq(self.password.as_bytes());
        bool::from(user_ok & pass_ok).then(|| self.token.clone())
    }
}
