use contracts::system::auth::{
    RefreshRequest, RefreshResponse, SessionResponse, SignInRequest, SignUpRequest, UserInfo,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use std::fmt;

use crate::shared::api_utils::api_url;

/// Failed auth call. `status` is `None` when no response arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl AuthApiError {
    fn transport(message: String) -> Self {
        Self {
            status: None,
            message,
        }
    }
}

impl fmt::Display for AuthApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

async fn read<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, AuthApiError> {
    if !response.ok() {
        return Err(AuthApiError {
            status: Some(response.status()),
            message: format!("{} failed", what),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| AuthApiError::transport(format!("Failed to parse response: {}", e)))
}

async fn post<B: serde::Serialize>(path: &str, body: &B) -> Result<Response, AuthApiError> {
    Request::post(&api_url(path))
        .json(body)
        .map_err(|e| AuthApiError::transport(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| AuthApiError::transport(format!("Failed to send request: {}", e)))
}

/// Sign in with username and password
pub async fn sign_in(username: String, password: String) -> Result<SessionResponse, AuthApiError> {
    let response = post("/api/system/auth/signin", &SignInRequest { username, password }).await?;
    read(response, "Sign-in").await
}

/// Create an account and open a session for it
pub async fn sign_up(request: SignUpRequest) -> Result<SessionResponse, AuthApiError> {
    let response = post("/api/system/auth/signup", &request).await?;
    read(response, "Sign-up").await
}

/// Exchange a refresh token for a new access token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, AuthApiError> {
    let response = post("/api/system/auth/refresh", &RefreshRequest { refresh_token }).await?;
    read(response, "Refresh").await
}

/// Revoke the refresh token
pub async fn sign_out(refresh_token: String) -> Result<(), AuthApiError> {
    let response = post("/api/system/auth/signout", &RefreshRequest { refresh_token }).await?;
    if !response.ok() {
        return Err(AuthApiError {
            status: Some(response.status()),
            message: "Sign-out failed".to_string(),
        });
    }
    Ok(())
}

/// User behind an access token
pub async fn get_session_user(access_token: &str) -> Result<UserInfo, AuthApiError> {
    let response = Request::get(&api_url("/api/system/auth/session"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| AuthApiError::transport(format!("Failed to send request: {}", e)))?;
    read(response, "Session lookup").await
}
