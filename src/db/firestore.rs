// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (identity and progress records)
//! - Quotes (the quiz content collection)
//!
//! Besides the real client there are two offline modes: `new_mock`
//! (every operation fails, for exercising degraded paths) and
//! `new_in_memory` (map-backed, for integration tests without the
//! emulator).

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Quote, User};
use std::sync::Arc;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
    mem: Option<MemBackend>,
}

/// Map-backed store used by tests.
#[derive(Clone, Default)]
struct MemBackend {
    users: Arc<dashmap::DashMap<String, User>>,
    quotes: Arc<dashmap::DashMap<u32, Quote>>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
            mem: None,
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
            mem: None,
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            client: None,
            mem: None,
        }
    }

    /// Create a map-backed store for integration tests.
    pub fn new_in_memory() -> Self {
        Self {
            client: None,
            mem: Some(MemBackend::default()),
        }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Cheap liveness probe for the health endpoint.
    pub async fn ping(&self) -> Result<(), AppError> {
        if self.mem.is_some() {
            return Ok(());
        }

        let _: Option<User> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one("__ping__")
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by their Google subject ID.
    pub async fn get_user(&self, google_id: &str) -> Result<Option<User>, AppError> {
        if let Some(mem) = &self.mem {
            return Ok(mem.users.get(google_id).map(|u| u.value().clone()));
        }

        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(google_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        if let Some(mem) = &self.mem {
            mem.users.insert(user.google_id.clone(), user.clone());
            return Ok(());
        }

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.google_id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Quote Operations ────────────────────────────────────────

    /// List the full quote collection, ordered by quote ID.
    ///
    /// The collection is a fixed seed set (~20 documents), so callers
    /// pick at random from the full list rather than sampling server-side.
    pub async fn list_quotes(&self) -> Result<Vec<Quote>, AppError> {
        if let Some(mem) = &self.mem {
            let mut quotes: Vec<Quote> = mem.quotes.iter().map(|q| q.value().clone()).collect();
            quotes.sort_by_key(|q| q.id);
            return Ok(quotes);
        }

        self.get_client()?
            .fluent()
            .select()
            .from(collections::QUOTES)
            .order_by([("id", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a quote (used by the seed tool).
    pub async fn upsert_quote(&self, quote: &Quote) -> Result<(), AppError> {
        if let Some(mem) = &self.mem {
            mem.quotes.insert(quote.id, quote.clone());
            return Ok(());
        }

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::QUOTES)
            .document_id(quote.id.to_string())
            .object(quote)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
