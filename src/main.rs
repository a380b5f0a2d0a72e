//! LingYe site - Main entry point
//!
//! Resolves the language for a page path, loads its translations, and
//! prints the merged product listing the page would render, as JSON.
//!
//! Usage: `lingye-site [PATH]` (default `/`)

use anyhow::Context;
use lingye_site_lib::api::{ApiClient, Backend, ProductQuery};
use lingye_site_lib::catalog::{CatalogService, TemplateRegistry};
use lingye_site_lib::core::Config;
use lingye_site_lib::i18n::titles::page_title;
use lingye_site_lib::i18n::{FileLanguageStore, LanguageStore, MemoryLanguageStore, TranslationService};
use serde_json::json;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting LingYe site v{}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());

    // Load or create configuration
    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    config.apply_env();
    log::info!("API base: {}", config.api.base_url);

    let store: Box<dyn LanguageStore> = match FileLanguageStore::in_config_dir(&config.i18n.storage_key) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Language preference will not persist: {}", e);
            Box::new(MemoryLanguageStore::new(&config.i18n.storage_key))
        }
    };

    let backend: Arc<dyn Backend> = Arc::new(ApiClient::new(&config.api.base_url));
    let i18n = TranslationService::new(config.i18n.clone(), backend.clone(), store);
    let catalog = CatalogService::new(backend, TemplateRegistry::builtin(), &config.api.base_url);

    let navigation = i18n.initialize(&path).await;
    if let Some(redirect) = &navigation.redirect {
        log::info!("Redirecting {} -> {}", path, redirect);
    }

    let language = navigation.language.clone();
    let products = catalog.products(&language, &ProductQuery::default()).await;

    let output = json!({
        "language": language,
        "redirect": navigation.redirect,
        "title": page_title("products", &language, None),
        "heading": i18n.get_text("products.title", Some("Products")),
        "products": products,
        "untranslated": i18n.untranslated_keys(),
    });

    let text = serde_json::to_string_pretty(&output).context("Failed to encode output")?;
    println!("{}", text);

    Ok(())
}
