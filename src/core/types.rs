//! Common types used across the application

use serde::{Deserialize, Serialize};

/// Event broadcast after the translation state changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationEvent {
    /// A language became current
    LanguageChanged {
        /// The new current language code
        language: String,
        /// Number of entries in the loaded mapping
        entries: usize,
    },
}

/// Outcome of resolving the language for a navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    /// Language that should be loaded for this page
    pub language: String,
    /// Path the router should redirect to when the URL lacks a language segment
    pub redirect: Option<String>,
}

/// Languages offered in the language switcher, as (code, native name)
pub fn available_languages() -> Vec<(&'static str, &'static str)> {
    vec![
        ("en", "English"),
        ("zh", "\u{4E2D}\u{6587}"),
        ("es", "Espa\u{00F1}ol"),
        ("pt", "Portugu\u{00EA}s"),
    ]
}
