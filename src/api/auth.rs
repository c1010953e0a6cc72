//! Login and registration endpoints.
//!
//! The bearer token is an opaque string minted by the server; nothing here
//! decodes it. Verification is entirely the server's concern.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::ApiClient;
use crate::error::Result;

/// An account as returned by the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: String,
}

/// A successful login: the opaque bearer token plus the account it belongs to
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    role: &'a str,
}

impl ApiClient {
    /// Log in and adopt the returned bearer token for subsequent requests
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session> {
        let url = format!("{}/login", self.base_url());
        let body = LoginRequest { username, password };
        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&body)
            .send()
            .await?;
        let response = self.check_response(response).await?;
        let session: Session = response.json().await?;
        debug!(username = %session.user.username, "logged in");
        self.set_token(&session.token);
        Ok(session)
    }

    /// Register a new account. New accounts get the `user` role.
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        let url = format!("{}/users", self.base_url());
        let body = RegisterRequest {
            username,
            password,
            role: "user",
        };
        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&body)
            .send()
            .await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Forget the session token
    pub fn logout(&mut self) {
        self.clear_token();
    }
}
