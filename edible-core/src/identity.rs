use serde::Deserialize;

/// The static admin credential pair. This is a gate for the dashboard, not
/// an identity provider: there is no backend-verified user behind it.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        let ok = self.username == username && self.password == password;
        if !ok {
            tracing::info!("Rejected admin login for user {}", username);
        }
        ok
    }
}
