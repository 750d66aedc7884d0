// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public quiz content routes: random quote and celebrity portrait.

use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const PLACEHOLDER: &str = "_____";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/quote", get(get_quote))
        .route("/api/celebrity-image", get(get_celebrity_image))
}

// ─── Quote ───────────────────────────────────────────────────

/// One quiz round: masked quote plus shuffled answer choices.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct QuoteResponse {
    pub id: u32,
    /// Quote text with the missing word blanked out
    pub text: String,
    pub author: String,
    pub correct_answer: String,
    pub options: Vec<String>,
}

/// Serve one quote picked uniformly at random.
async fn get_quote(State(state): State<Arc<AppState>>) -> Result<Json<QuoteResponse>> {
    let quotes = state.db.list_quotes().await?;

    let mut rng = rand::rng();
    let Some(quote) = quotes.choose(&mut rng) else {
        return Err(AppError::NotFound("no quotes available".to_string()));
    };

    let mut options = quote.options.clone();
    options.shuffle(&mut rng);

    tracing::debug!(quote_id = quote.id, author = %quote.author, "Serving quote");

    Ok(Json(QuoteResponse {
        id: quote.id,
        text: mask_word(&quote.text, &quote.missing_word),
        author: quote.author.clone(),
        correct_answer: quote.missing_word.clone(),
        options,
    }))
}

/// Replace every whole-word, case-insensitive occurrence of `word`
/// with the placeholder. Word boundaries are non-alphanumeric
/// characters, which keeps accented letters inside words.
fn mask_word(text: &str, word: &str) -> String {
    let word_chars: Vec<char> = word.chars().collect();
    if word_chars.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if word_matches_at(&chars, i, &word_chars) {
            result.push_str(PLACEHOLDER);
            i += word_chars.len();
        } else {
            result.push(chars[i]);
            i += 1;
        }
    }

    result
}

fn word_matches_at(chars: &[char], at: usize, word: &[char]) -> bool {
    let end = at + word.len();
    if end > chars.len() {
        return false;
    }
    if at > 0 && chars[at - 1].is_alphanumeric() {
        return false;
    }
    if end < chars.len() && chars[end].is_alphanumeric() {
        return false;
    }

    chars[at..end]
        .iter()
        .zip(word)
        .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
}

// ─── Celebrity Image ─────────────────────────────────────────

#[derive(Deserialize)]
struct CelebrityImageParams {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct CelebrityImageResponse {
    pub name: String,
    /// None when no portrait was found or the lookup failed
    pub image_url: Option<String>,
}

/// Decorative portrait lookup for a quote's author.
///
/// Lookup failures degrade to a null URL; this endpoint never surfaces
/// the upstream error.
async fn get_celebrity_image(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CelebrityImageParams>,
) -> Result<Json<CelebrityImageResponse>> {
    let name = params.name.as_deref().map(str::trim).unwrap_or("");
    if name.is_empty() {
        return Err(AppError::BadRequest(
            "'name' query parameter is required".to_string(),
        ));
    }

    let image_url = state.celebrity.lookup(name).await;

    Ok(Json(CelebrityImageResponse {
        name: name.to_string(),
        image_url,
    }))
}
