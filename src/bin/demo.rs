//! LingYe site - Demo CLI
//!
//! Offline walkthrough of template selection, template merging, and
//! translation fallbacks against canned backend replies.

use lingye_site_lib::api::{Reply, StaticBackend};
use lingye_site_lib::catalog::{CatalogService, Product, TemplateRegistry};
use lingye_site_lib::core::{available_languages, I18nConfig};
use lingye_site_lib::i18n::{MemoryLanguageStore, TranslationService};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("==============================================");
    println!("   LingYe Site - Demo CLI");
    println!("==============================================\n");

    let backend = Arc::new(
        StaticBackend::new()
            .with_translations(
                "en",
                Reply::Json(json!({"content": {"nav.products": "Products", "product.oem": "OEM"}})),
            )
            .with_translations(
                "es",
                Reply::Json(json!({"content": {"nav.products": "Productos", "product.oem": "OEM"}})),
            )
            .with_translations("zh", Reply::Status(503))
            .with_products(Reply::Json(json!({
                "results": [
                    {"id": 1, "name": "40x40 T-slot", "category": {"id": 3, "slug": "t-slot-aluminum-profiles"},
                     "range_param": "", "feature_items": []},
                    {"id": 2, "name": "Casement frame", "category": {"id": 2, "slug": "building-profiles"},
                     "subcategory": {"id": 4, "slug": "window-door-profiles"}, "oem_available": false},
                    {"id": 3, "name": "Heat sink", "category": {"id": 8, "slug": "heat-sinks"}}
                ]
            }))),
    );

    // 1. Template selection
    println!("[1/3] Template selection...");
    let registry = TemplateRegistry::builtin();
    for (category, subcategory) in [
        ("t-slot-aluminum-profiles", None),
        ("building-profiles", Some("window-door-profiles")),
        ("heat-sinks", None),
    ] {
        let product: Product = match serde_json::from_value(json!({
            "category": {"slug": category},
            "subcategory": subcategory.map(|slug| json!({"slug": slug})),
        })) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Bad demo product: {}", e);
                continue;
            }
        };
        let template = registry.select(&product);
        println!(
            "      {:<28} -> {}",
            subcategory.unwrap_or(category),
            template.type_param.as_deref().unwrap_or("(empty)")
        );
    }
    println!();

    // 2. Merged products
    println!("[2/3] Merging products with templates...");
    let catalog = CatalogService::new(backend.clone(), registry, "http://lingyealu.cn");
    println!("----------------------------------------------");
    println!("  Id | Specs | Apps | OEM   | Range");
    println!("----------------------------------------------");
    for product in catalog.products("en", &Default::default()).await {
        println!(
            "  {:>2} | {:>5} | {:>4} | {:<5} | {}",
            product.id.unwrap_or_default(),
            product.specification_items.len(),
            product.application_items.len(),
            product.oem_available,
            product.range_param
        );
    }
    println!();

    // 3. Translations
    println!("[3/3] Translation fallbacks...");
    let i18n = TranslationService::new(
        I18nConfig::default(),
        backend,
        Box::new(MemoryLanguageStore::new("language")),
    );
    let changes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&changes);
    i18n.add_listener(move || {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    let switcher: Vec<&str> = available_languages().iter().map(|(_, name)| *name).collect();
    println!("      Switcher: {}", switcher.join(" / "));

    for language in ["en", "es", "zh"] {
        i18n.change_language(language).await;
        println!(
            "      {} | current={} | nav.products={} | footer.contact={}",
            language,
            i18n.current_language(),
            i18n.t("nav.products"),
            i18n.get_text("footer.contact", Some("Contact"))
        );
    }

    println!("\n      Listener calls: {}", changes.load(Ordering::Relaxed));
    println!("      Untranslated keys: {:?}", i18n.untranslated_keys());
    println!("\n==============================================");
}
