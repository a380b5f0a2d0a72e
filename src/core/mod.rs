//! Core module - Configuration, errors, and common types

mod config;
mod error;
mod types;

pub use config::{ApiConfig, Config, I18nConfig, API_URL_ENV};
pub use error::{Error, Result};
pub use types::{available_languages, Navigation, TranslationEvent};
