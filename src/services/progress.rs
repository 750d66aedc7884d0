// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Best-score ledger and daily streak engine.
//!
//! Both operations are idempotent read-modify-writes on a single user
//! record. Mutations for the same user are serialized through a shared
//! per-user lock map and re-read the record under the lock, so
//! concurrent submissions converge instead of losing an update. Blind
//! client retries are always safe.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::time_utils::{format_date, parse_date};
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Monotonic best-score update: the stored value never decreases.
pub fn monotonic_best(current: u32, candidate: u32) -> u32 {
    current.max(candidate)
}

/// Result of a streak transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak: u32,
    pub last_played: NaiveDate,
}

/// Advance the consecutive-day counter for a play event on `today`.
///
/// Total over every prior value of `last_played`:
/// - never played → streak 1
/// - already played today → unchanged
/// - played yesterday → streak + 1
/// - anything else (gap, future date from clock skew) → reset to 1
pub fn advance_streak(
    last_played: Option<NaiveDate>,
    streak: u32,
    today: NaiveDate,
) -> StreakUpdate {
    let streak = match last_played {
        Some(date) if date == today => streak,
        Some(date) if today.pred_opt() == Some(date) => streak + 1,
        _ => 1,
    };

    StreakUpdate {
        streak,
        last_played: today,
    }
}

/// Serialized score/streak mutations against the credential store.
pub struct ProgressService {
    db: FirestoreDb,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl ProgressService {
    /// The lock map is shared across clones within this instance.
    pub fn new(db: FirestoreDb, locks: Arc<DashMap<String, Arc<Mutex<()>>>>) -> Self {
        Self { db, locks }
    }

    fn user_lock(&self, google_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(google_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Record a candidate score; returns the resulting best score.
    ///
    /// Re-reads the record under the user's lock rather than trusting
    /// the value resolved before the request started.
    pub async fn report_score(&self, google_id: &str, candidate: u32) -> Result<u32, AppError> {
        let lock = self.user_lock(google_id);
        let _guard = lock.lock().await;

        let mut user = self
            .db
            .get_user(google_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("user not found".to_string()))?;

        let best = monotonic_best(user.best_score, candidate);
        if best != user.best_score {
            user.best_score = best;
            self.db.upsert_user(&user).await?;
            tracing::info!(google_id, best_score = best, "New best score");
        }

        Ok(user.best_score)
    }

    /// Record a play event for `today`; returns the resulting streak.
    pub async fn report_play(&self, google_id: &str, today: NaiveDate) -> Result<u32, AppError> {
        let lock = self.user_lock(google_id);
        let _guard = lock.lock().await;

        let mut user = self
            .db
            .get_user(google_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("user not found".to_string()))?;

        let last = user.last_played.as_deref().and_then(parse_date);
        let update = advance_streak(last, user.streak, today);

        if user.streak != update.streak || last != Some(update.last_played) {
            user.streak = update.streak;
            user.last_played = Some(format_date(update.last_played));
            self.db.upsert_user(&user).await?;
            tracing::info!(google_id, streak = user.streak, "Streak updated");
        }

        Ok(user.streak)
    }
}
