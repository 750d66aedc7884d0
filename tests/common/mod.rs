// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use quizz_api::config::Config;
use quizz_api::db::FirestoreDb;
use quizz_api::models::{Quote, User};
use quizz_api::routes::create_router;
use quizz_api::services::{CelebrityImageService, GoogleAuthService, ProgressService};
use quizz_api::AppState;
use std::sync::Arc;

/// Create a map-backed test database.
#[allow(dead_code)]
pub fn test_db_in_memory() -> FirestoreDb {
    FirestoreDb::new_in_memory()
}

/// Create a mock database connection (offline, every operation fails).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app over the given database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_db(db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();

    let google_auth = GoogleAuthService::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        db.clone(),
    )
    .expect("Failed to build Google OAuth client");

    let celebrity =
        CelebrityImageService::new().expect("Failed to build celebrity image service");

    let user_locks = Arc::new(dashmap::DashMap::new());
    let progress = ProgressService::new(db.clone(), user_locks);

    let state = Arc::new(AppState {
        config,
        db,
        google_auth,
        celebrity,
        progress,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with an in-memory store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_db(test_db_in_memory())
}

/// Insert a user record directly into the store.
#[allow(dead_code)]
pub async fn seed_user(db: &FirestoreDb, google_id: &str) -> User {
    let user = User {
        google_id: google_id.to_string(),
        email: format!("{}@example.com", google_id),
        name: "Test User".to_string(),
        photo: None,
        best_score: 0,
        streak: 0,
        last_played: None,
        created_at: "2025-06-01T00:00:00Z".to_string(),
        last_login: "2025-06-01T00:00:00Z".to_string(),
    };
    db.upsert_user(&user).await.expect("seed user");
    user
}

/// Insert one quote into the store.
#[allow(dead_code)]
pub async fn seed_quote(db: &FirestoreDb) -> Quote {
    let quote = Quote {
        id: 1,
        text: "Un pigeon, c'est plus con qu'un dauphin, d'accord... mais ça vole.".to_string(),
        author: "Michel Audiard".to_string(),
        missing_word: "vole".to_string(),
        options: vec![
            "vole".to_string(),
            "plane".to_string(),
            "s'envole".to_string(),
            "décolle".to_string(),
        ],
    };
    db.upsert_quote(&quote).await.expect("seed quote");
    quote
}
