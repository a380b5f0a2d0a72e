//! In-memory backend for offline runs and tests

use super::{Backend, ProductQuery};
use crate::core::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Canned reply for one endpoint
#[derive(Debug, Clone)]
pub enum Reply {
    /// 2xx with this JSON body
    Json(Value),
    /// Non-2xx status
    Status(u16),
}

impl Reply {
    fn into_result(self) -> Result<Value> {
        match self {
            Reply::Json(value) => Ok(value),
            Reply::Status(code) => Err(Error::Status(code)),
        }
    }
}

/// Backend that answers from canned replies and records every request
#[derive(Default)]
pub struct StaticBackend {
    translations: Mutex<HashMap<String, Reply>>,
    translation_delays: HashMap<String, Duration>,
    text: HashMap<(String, String), String>,
    products: Option<Reply>,
    product: HashMap<i64, Reply>,
    categories: Option<Reply>,
    requests: Mutex<Vec<String>>,
}

impl StaticBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translations(self, language: &str, reply: Reply) -> Self {
        self.set_translations(language, reply);
        self
    }

    /// Replace the translation reply for a language after construction
    pub fn set_translations(&self, language: &str, reply: Reply) {
        if let Ok(mut map) = self.translations.lock() {
            map.insert(language.to_string(), reply);
        }
    }

    /// Hold back the translation reply for a language
    pub fn with_translation_delay(mut self, language: &str, delay: Duration) -> Self {
        self.translation_delays.insert(language.to_string(), delay);
        self
    }

    pub fn with_text(mut self, key: &str, language: &str, text: &str) -> Self {
        self.text
            .insert((key.to_string(), language.to_string()), text.to_string());
        self
    }

    pub fn with_products(mut self, reply: Reply) -> Self {
        self.products = Some(reply);
        self
    }

    pub fn with_product(mut self, id: i64, reply: Reply) -> Self {
        self.product.insert(id, reply);
        self
    }

    pub fn with_categories(mut self, reply: Reply) -> Self {
        self.categories = Some(reply);
        self
    }

    /// Requests seen so far, formatted as `endpoint:args`
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    fn record(&self, request: String) {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request);
        }
    }
}

#[async_trait]
impl Backend for StaticBackend {
    async fn fetch_translations(&self, language: &str) -> Result<Value> {
        self.record(format!("translations:{}", language));
        if let Some(delay) = self.translation_delays.get(language) {
            tokio::time::sleep(*delay).await;
        }
        let reply = self
            .translations
            .lock()
            .map_err(|_| Error::Storage("translation fixture poisoned".to_string()))?
            .get(language)
            .cloned()
            .unwrap_or(Reply::Status(404));
        reply.into_result()
    }

    async fn translate_text(&self, key: &str, language: &str) -> Result<String> {
        self.record(format!("translate:{}:{}", key, language));
        self.text
            .get(&(key.to_string(), language.to_string()))
            .cloned()
            .ok_or(Error::Status(404))
    }

    async fn fetch_products(&self, language: &str, query: &ProductQuery) -> Result<Value> {
        self.record(format!(
            "products:{}:{:?}:{}:{:?}",
            language, query.category, query.featured, query.limit
        ));
        self.products
            .clone()
            .unwrap_or(Reply::Json(Value::Array(Vec::new())))
            .into_result()
    }

    async fn fetch_product(&self, id: i64, language: &str) -> Result<Value> {
        self.record(format!("product:{}:{}", id, language));
        self.product
            .get(&id)
            .cloned()
            .unwrap_or(Reply::Status(404))
            .into_result()
    }

    async fn fetch_categories(&self, language: &str) -> Result<Value> {
        self.record(format!("categories:{}", language));
        self.categories
            .clone()
            .unwrap_or(Reply::Json(Value::Array(Vec::new())))
            .into_result()
    }
}
