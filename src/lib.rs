// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Quizz API: guess the missing word in a quote.
//!
//! This crate provides the backend API for the quote quiz: Google
//! login with signed session tokens, per-user best scores and daily
//! play streaks, and the quote/portrait content endpoints.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{CelebrityImageService, GoogleAuthService, ProgressService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub google_auth: GoogleAuthService,
    pub celebrity: CelebrityImageService,
    pub progress: ProgressService,
}
