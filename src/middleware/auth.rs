// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT session tokens and the authentication gate.
//!
//! Tokens are signed HS256 bearer credentials that expire 24 hours
//! after issuance. There is no server-side token store and no
//! revocation list; validity is fully determined by signature and
//! expiry, and logout is a client-side credential discard.

use crate::error::AppError;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Session token lifetime.
pub const TOKEN_TTL_SECS: usize = 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (Google subject ID)
    pub sub: String,
    /// Email at issuance time
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user attached to the request by the gate.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

/// Middleware that requires a valid bearer token and a matching user record.
///
/// - no Authorization header → 401
/// - token present but unverifiable (signature, expiry, shape) → 403
/// - token valid but no user record for its subject → 403; this can
///   happen if the record was removed out-of-band while a token is live
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) if h.starts_with("Bearer ") => &h[7..],
        _ => return Err(AppError::Unauthenticated),
    };

    let claims = verify_jwt(token, &state.config.jwt_signing_key)
        .map_err(|_| AppError::Forbidden("invalid or expired token".to_string()))?;

    let user = state
        .db
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| AppError::Forbidden("user not found".to_string()))?;

    request.extensions_mut().insert(AuthUser { user });

    Ok(next.run(request).await)
}

/// Create a JWT for a user session.
pub fn create_jwt(google_id: &str, email: &str, signing_key: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: google_id.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Verify a session token and return its claims.
///
/// Pure over (token, secret, clock): no I/O, never panics. Expired,
/// wrongly-signed, and malformed tokens all map to an error.
pub fn verify_jwt(
    token: &str,
    signing_key: &[u8],
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &key, &validation).map(|data| data.claims)
}
