//! Quote model for storage.

use serde::{Deserialize, Serialize};

/// A quiz quote stored in Firestore.
///
/// The quote collection is a small fixed set seeded by `seed_quotes`;
/// `id` doubles as the document ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: u32,
    /// Full quote text (the missing word still present)
    pub text: String,
    pub author: String,
    /// The word to blank out and guess
    pub missing_word: String,
    /// Four answer choices, including the missing word
    pub options: Vec<String>,
}
