// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user", get(get_user))
        .route("/api/score", post(report_score))
        .route("/api/streak", post(report_streak))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub photo: Option<String>,
    pub best_score: u32,
    pub streak: u32,
    pub last_played: Option<String>,
}

/// Get the current user's record.
async fn get_user(Extension(auth): Extension<AuthUser>) -> Json<UserResponse> {
    let user = auth.user;
    Json(UserResponse {
        id: user.google_id,
        email: user.email,
        name: user.name,
        photo: user.photo,
        best_score: user.best_score,
        streak: user.streak,
        last_played: user.last_played,
    })
}

// ─── Score Ledger ────────────────────────────────────────────

#[derive(Deserialize)]
struct ScoreRequest {
    score: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct ScoreResponse {
    pub best_score: u32,
}

/// Report a finished game's score; the stored best never decreases.
async fn report_score(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>> {
    let candidate = validate_score(body.score)?;

    let best_score = state
        .progress
        .report_score(&auth.user.google_id, candidate)
        .await?;

    Ok(Json(ScoreResponse { best_score }))
}

fn validate_score(raw: i64) -> Result<u32> {
    u32::try_from(raw)
        .map_err(|_| AppError::BadRequest("score must be a non-negative integer".to_string()))
}

// ─── Streak Engine ───────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct StreakResponse {
    pub streak: u32,
}

/// Report a play event for today (server clock).
async fn report_streak(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<StreakResponse>> {
    let streak = state
        .progress
        .report_play(&auth.user.google_id, today_utc())
        .await?;

    Ok(Json(StreakResponse { streak }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_score_accepts_non_negative() {
        assert_eq!(validate_score(0).unwrap(), 0);
        assert_eq!(validate_score(17).unwrap(), 17);
    }

    #[test]
    fn validate_score_rejects_negative() {
        let err = validate_score(-1).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
