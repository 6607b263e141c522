use super::error::AppError;
use serde::Deserialize;

/// Account credentials entered in the login form.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    account: String,
    password: String,
}

impl Credentials {
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Result<Self, AppError> {
        let account = account.into().trim().to_string();
        let password = password.into();

        if account.is_empty() {
            return Err(AppError::ConfigError("Account is required".to_string()));
        }
        if password.is_empty() {
            return Err(AppError::ConfigError("Password is required".to_string()));
        }

        Ok(Self { account, password })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated session returned by the login endpoint.
#[derive(Clone, PartialEq, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Session {
    /// Name to greet the user with, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.user_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown user")
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .finish()
    }
}
