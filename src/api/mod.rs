//! REST backend access
//!
//! Provides the [`Backend`] abstraction over the site's JSON API and the
//! `reqwest` implementation used in production. Responses are handed back
//! as raw JSON; the shape helpers below tolerate the two envelope styles
//! the backend uses (`{"results": [...]}` vs. bare arrays, `{"content": {...}}`
//! vs. bare objects).

mod fixture;
mod media;

pub use fixture::{Reply, StaticBackend};
pub use media::resolve_media_url;

use crate::core::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Filters for product listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Restrict to a category id
    pub category: Option<i64>,
    /// Only featured products
    pub featured: bool,
    /// Maximum number of results
    pub limit: Option<u32>,
}

impl ProductQuery {
    /// Products from one category, capped at `limit`
    pub fn related(category: i64, limit: u32) -> Self {
        Self {
            category: Some(category),
            featured: false,
            limit: Some(limit),
        }
    }

    /// Featured products only
    pub fn featured() -> Self {
        Self {
            featured: true,
            ..Default::default()
        }
    }

    fn to_pairs(&self, language: &str) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("lang", language.to_string())];
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if self.featured {
            pairs.push(("is_featured", "true".to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Trait for sources of site content
#[async_trait]
pub trait Backend: Send + Sync {
    /// Raw translation document for a language
    async fn fetch_translations(&self, language: &str) -> Result<Value>;

    /// Translate a single key on the server
    async fn translate_text(&self, key: &str, language: &str) -> Result<String>;

    /// Raw product listing
    async fn fetch_products(&self, language: &str, query: &ProductQuery) -> Result<Value>;

    /// Raw single product
    async fn fetch_product(&self, id: i64, language: &str) -> Result<Value>;

    /// Raw category listing, subcategories included
    async fn fetch_categories(&self, language: &str) -> Result<Value>;
}

/// HTTP client for the site's REST API
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute endpoint URL from an `/api/...` path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint(path);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::error!("GET {} returned {}", url, status);
            return Err(Error::Status(status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn fetch_translations(&self, language: &str) -> Result<Value> {
        self.get_json(
            "/api/translations/frontend_content/",
            &[("lang", language.to_string())],
        )
        .await
    }

    async fn translate_text(&self, key: &str, language: &str) -> Result<String> {
        let body = self
            .get_json(
                "/api/translations/translate_frontend/",
                &[("key", key.to_string()), ("lang", language.to_string())],
            )
            .await?;

        body.get("translated_text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::Serialization("missing translated_text".to_string()))
    }

    async fn fetch_products(&self, language: &str, query: &ProductQuery) -> Result<Value> {
        self.get_json("/api/products/", &query.to_pairs(language)).await
    }

    async fn fetch_product(&self, id: i64, language: &str) -> Result<Value> {
        self.get_json(
            &format!("/api/products/{}/", id),
            &[("lang", language.to_string())],
        )
        .await
    }

    async fn fetch_categories(&self, language: &str) -> Result<Value> {
        self.get_json(
            "/api/categories/",
            &[
                ("lang", language.to_string()),
                ("include_subcategories", "true".to_string()),
            ],
        )
        .await
    }
}

/// Extract the translation mapping from a translation document.
///
/// Uses `content` when the key exists, the whole body otherwise. A null or
/// non-object `content` yields an empty mapping. Only string values are kept.
pub fn extract_content(body: Value) -> HashMap<String, String> {
    let content = match body {
        Value::Object(mut map) => match map.remove("content") {
            Some(content) => content,
            None => Value::Object(map),
        },
        _ => Value::Null,
    };

    let Value::Object(map) = content else {
        return HashMap::new();
    };

    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, text)),
            other => {
                log::debug!("Skipping non-string translation '{}': {}", key, other);
                None
            }
        })
        .collect()
}

/// Extract a list from either `{"results": [...]}` or a bare array
pub fn extract_results(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
