//! Signup flow: client-side validation, registration against the backend,
//! and the welcome email.

use regex::Regex;

use crate::clients::backend::{AuthResponse, BackendClient, RegisterRequest};
use crate::email;
use crate::error::FrontendError;

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Client-side validation, mirroring the backend's rules so most mistakes
/// are caught before a round trip.
pub fn validate(form: &SignupForm) -> Result<(), FrontendError> {
    if form.username.len() < 3 {
        return Err(FrontendError::Validation(
            "Username must be at least 3 characters".into(),
        ));
    }
    if form.username.len() > 20 {
        return Err(FrontendError::Validation(
            "Username must be at most 20 characters".into(),
        ));
    }
    let username_re = Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();
    if !username_re.is_match(&form.username) {
        return Err(FrontendError::Validation(
            "Username can only contain letters, numbers, and underscores".into(),
        ));
    }
    if !form.email.contains('@') {
        return Err(FrontendError::Validation("Invalid email address".into()));
    }
    if form.password.len() < 8 {
        return Err(FrontendError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }
    Ok(())
}

pub struct SignupPage {
    backend: BackendClient,
}

impl SignupPage {
    pub fn new(backend: BackendClient) -> Self {
        SignupPage { backend }
    }

    /// Validate, register, store the session token and fire off the welcome
    /// email. A failed email submission is logged, not surfaced; the
    /// account exists either way.
    pub async fn register(&mut self, form: SignupForm) -> Result<AuthResponse, FrontendError> {
        validate(&form)?;

        let response = self
            .backend
            .register(&RegisterRequest {
                username: form.username.clone(),
                email: form.email.clone(),
                password: form.password,
            })
            .await?;

        self.backend.set_token(response.token.clone());
        tracing::info!(username = %response.user.username, "Account created");

        let mail = email::welcome(&response.user.username);
        if let Err(e) = self.backend.send_email(&response.user.email, &mail).await {
            tracing::warn!(error = %e, "Welcome email submission failed");
        }

        Ok(response)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, FrontendError> {
        let response = self.backend.login(email, password).await?;
        self.backend.set_token(response.token.clone());
        Ok(response)
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, email: &str, password: &str) -> SignupForm {
        SignupForm {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_reasonable_input() {
        assert!(validate(&form("anna_k", "anna@example.com", "longenough")).is_ok());
    }

    #[test]
    fn test_validate_username_length() {
        assert!(validate(&form("ab", "a@b.c", "longenough")).is_err());
        assert!(validate(&form(&"x".repeat(21), "a@b.c", "longenough")).is_err());
        assert!(validate(&form(&"x".repeat(20), "a@b.c", "longenough")).is_ok());
    }

    #[test]
    fn test_validate_username_charset() {
        assert!(validate(&form("bad name", "a@b.c", "longenough")).is_err());
        assert!(validate(&form("bad-name", "a@b.c", "longenough")).is_err());
        assert!(validate(&form("good_name1", "a@b.c", "longenough")).is_ok());
    }

    #[test]
    fn test_validate_password_and_email() {
        assert!(validate(&form("anna", "a@b.c", "short")).is_err());
        assert!(validate(&form("anna", "not-an-email", "longenough")).is_err());
    }
}
