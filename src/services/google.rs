// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth code exchange and user resolution.
//!
//! Handles:
//! - Authorization-code exchange for an access token
//! - Userinfo profile fetch
//! - Resolve-or-create of the stored user record on login
//!
//! One provider, one explicit exchange path; there is no pluggable
//! strategy registry.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::User;
use crate::time_utils::format_utc_rfc3339;
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Profile claims returned by the Google userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    /// Google subject ID
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Google OAuth client.
#[derive(Clone)]
pub struct GoogleAuthService {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    db: FirestoreDb,
}

impl GoogleAuthService {
    /// Create a new Google OAuth client.
    ///
    /// The client timeout bounds every outbound call; a timeout is a
    /// regular failure of the exchange, not a hang.
    pub fn new(
        client_id: String,
        client_secret: String,
        db: FirestoreDb,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .context("failed building Google OAuth HTTP client")?;

        Ok(Self {
            http,
            client_id,
            client_secret,
            db,
        })
    }

    /// Exchange an authorization code for the user's profile claims.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<GoogleProfile, AppError> {
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Token exchange request failed: {}", e)))?;

        let tokens: TokenResponse = Self::check_response_json(response).await?;

        let response = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(&tokens.access_token)
            .send()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Userinfo request failed: {}", e)))?;

        Self::check_response_json(response).await
    }

    /// Handle the OAuth callback: exchange the code, then resolve or
    /// create the stored user record.
    ///
    /// The provider is the source of truth for profile fields on every
    /// login; progress fields survive untouched.
    pub async fn handle_oauth_callback(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<User, AppError> {
        let profile = self.exchange_code(code, redirect_uri).await?;
        let now = format_utc_rfc3339(chrono::Utc::now());

        let user = match self.db.get_user(&profile.id).await? {
            Some(mut user) => {
                user.refresh_profile(&profile, &now);
                user
            }
            None => {
                tracing::info!(google_id = %profile.id, "First login, creating user");
                User::from_profile(&profile, &now)
            }
        };

        self.db.upsert_user(&user).await?;
        Ok(user)
    }

    /// Check response status and deserialize the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Google API error response");
            return Err(AppError::GoogleApi(format!(
                "Google returned status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Invalid Google response: {}", e)))
    }
}
