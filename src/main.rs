// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quizz API Server
//!
//! Serves the missing-word quote quiz: quotes with shuffled answer
//! choices, Google login, and persisted best scores and daily streaks.

use quizz_api::{
    config::Config,
    db::FirestoreDb,
    services::{CelebrityImageService, GoogleAuthService, ProgressService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Quizz API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Google OAuth client
    let google_auth = GoogleAuthService::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        db.clone(),
    )
    .expect("Failed to initialize Google OAuth client");

    // Celebrity portrait lookup with in-process TTL cache
    let celebrity = CelebrityImageService::new()
        .expect("Failed to initialize celebrity image service");

    // Per-user locks serializing score/streak read-modify-writes
    // within this instance
    let user_locks = Arc::new(dashmap::DashMap::new());
    let progress = ProgressService::new(db.clone(), user_locks);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        google_auth,
        celebrity,
        progress,
    });

    // Build router
    let app = quizz_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizz_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
