//! HTTP client for the platform backend: accounts and transactional mail.
//!
//! Identity itself lives behind the backend; this client only carries the
//! opaque bearer token it hands back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::email::EmailMessage;
use crate::error::FrontendError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("RidgelineChess/1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, FrontendError> {
        let resp = self
            .client
            .post(self.url("/api/auth/register"))
            .json(req)
            .send()
            .await
            .map_err(|e| FrontendError::Auth(format!("Request error: {e}")))?;
        Self::read_json(resp).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, FrontendError> {
        let resp = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(|e| FrontendError::Auth(format!("Request error: {e}")))?;
        Self::read_json(resp).await
    }

    pub async fn me(&self) -> Result<UserProfile, FrontendError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| FrontendError::Auth("Not authenticated".to_string()))?;
        let resp = self
            .client
            .get(self.url("/api/auth/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| FrontendError::Auth(format!("Request error: {e}")))?;
        Self::read_json(resp).await
    }

    /// Hand a rendered message to the backend's mail endpoint. Delivery is
    /// the backend's problem.
    pub async fn send_email(&self, to: &str, mail: &EmailMessage) -> Result<(), FrontendError> {
        let body = serde_json::json!({
            "to": to,
            "subject": mail.subject,
            "html": mail.html,
            "text": mail.text,
        });
        let mut req = self.client.post(self.url("/api/mail/send")).json(&body);
        if let Some(token) = self.token.as_deref() {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| FrontendError::Mail(format!("Request error: {e}")))?;
        if !resp.status().is_success() {
            return Err(FrontendError::Mail(format!("HTTP {}", resp.status())));
        }
        Ok(())
    }

    /// Decode a response, mapping the backend's `{"detail": ...}` error
    /// format onto a typed error.
    async fn read_json<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, FrontendError> {
        let status = resp.status();
        if !status.is_success() {
            let detail = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| {
                    v.get("detail")
                        .and_then(|d| d.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(FrontendError::Auth(detail));
        }
        resp.json::<T>()
            .await
            .map_err(|e| FrontendError::Auth(format!("Body parse error: {e}")))
    }
}
