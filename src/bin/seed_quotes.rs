// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seed the Firestore quote collection from `data/quotes.json`.
//!
//! Upserts are keyed by quote ID, so re-running is safe.

use quizz_api::{db::FirestoreDb, models::Quote};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let project_id =
        std::env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string());

    let db = FirestoreDb::new(&project_id).await?;

    let path = "data/quotes.json";
    let raw = std::fs::read_to_string(path)?;
    let quotes: Vec<Quote> = serde_json::from_str(&raw)?;

    tracing::info!(path, count = quotes.len(), "Seeding quotes");

    for quote in &quotes {
        db.upsert_quote(quote).await?;
        tracing::debug!(id = quote.id, author = %quote.author, "Quote stored");
    }

    tracing::info!(count = quotes.len(), "Quote collection seeded");
    Ok(())
}
