// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod celebrity;
pub mod google;
pub mod progress;

pub use celebrity::CelebrityImageService;
pub use google::{GoogleAuthService, GoogleProfile};
pub use progress::ProgressService;
