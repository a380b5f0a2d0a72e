//! Product catalogue
//!
//! Fetches products and categories from the backend and fills sparse
//! product records from the built-in templates before they are shown.
//! Every fetch degrades to an empty result on failure so pages keep
//! rendering.

mod merge;
mod templates;
mod types;

pub use merge::merge;
pub use templates::{ProductTemplate, TemplateRegistry, DEFAULT_TEMPLATE};
pub use types::{
    ApplicationItem, Category, CategoryRef, FactoryImage, FeatureItem, MergedProduct, Product,
    ProductImage, SpecificationItem, SubCategory,
};

use crate::api::{extract_results, resolve_media_url, Backend, ProductQuery};
use crate::core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use types::RawCategory;

/// Number of related products shown on a detail page
pub const RELATED_LIMIT: usize = 4;

/// A product page: the product and a few siblings from its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: MergedProduct,
    pub related: Vec<MergedProduct>,
}

/// Catalogue access with template backfill
pub struct CatalogService {
    backend: Arc<dyn Backend>,
    templates: TemplateRegistry,
    media_base: String,
}

impl CatalogService {
    /// Create a catalogue over a backend; media paths resolve against `media_base`
    pub fn new(backend: Arc<dyn Backend>, templates: TemplateRegistry, media_base: &str) -> Self {
        Self {
            backend,
            templates,
            media_base: media_base.trim_end_matches('/').to_string(),
        }
    }

    /// Templates in use
    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Merge one raw product with its template and resolve its media URLs
    pub fn prepare(&self, product: Product) -> MergedProduct {
        let template = self.templates.select(&product);
        let mut merged = merge(product, template);
        self.resolve_media(&mut merged);
        merged
    }

    /// Product listing, merged; empty on failure
    pub async fn products(&self, language: &str, query: &ProductQuery) -> Vec<MergedProduct> {
        match self.backend.fetch_products(language, query).await {
            Ok(body) => self.prepare_all(body),
            Err(e) => {
                log::error!("Failed to fetch products: {}", e);
                Vec::new()
            }
        }
    }

    /// Featured products for the home page
    pub async fn featured_products(&self, language: &str) -> Vec<MergedProduct> {
        self.products(language, &ProductQuery::featured()).await
    }

    /// Category tree; empty on failure
    pub async fn categories(&self, language: &str) -> Vec<Category> {
        match self.backend.fetch_categories(language).await {
            Ok(body) => extract_results(body)
                .into_iter()
                .filter_map(|item| match serde_json::from_value::<RawCategory>(item) {
                    Ok(raw) => Some(Category::from(raw)),
                    Err(e) => {
                        log::warn!("Skipping malformed category: {}", e);
                        None
                    }
                })
                .collect(),
            Err(e) => {
                log::error!("Failed to fetch categories: {}", e);
                Vec::new()
            }
        }
    }

    /// Product page data; `None` when the product cannot be loaded.
    ///
    /// Related products failing to load leaves the list empty.
    pub async fn product_detail(&self, id: i64, language: &str) -> Option<ProductDetail> {
        let product = match self.fetch_product(id, language).await {
            Ok(product) => product,
            Err(e) => {
                log::error!("Failed to fetch product {}: {}", id, e);
                return None;
            }
        };

        let related = match product.category.as_ref().and_then(|c| c.id) {
            Some(category) => {
                let query = ProductQuery::related(category, RELATED_LIMIT as u32);
                self.products(language, &query)
                    .await
                    .into_iter()
                    .filter(|p| p.id != product.id)
                    .take(RELATED_LIMIT)
                    .collect()
            }
            None => Vec::new(),
        };

        Some(ProductDetail {
            product: self.prepare(product),
            related,
        })
    }

    async fn fetch_product(&self, id: i64, language: &str) -> Result<Product> {
        let body = self.backend.fetch_product(id, language).await?;
        Ok(serde_json::from_value(body)?)
    }

    fn prepare_all(&self, body: Value) -> Vec<MergedProduct> {
        extract_results(body)
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Product>(item) {
                Ok(product) => Some(self.prepare(product)),
                Err(e) => {
                    log::warn!("Skipping malformed product: {}", e);
                    None
                }
            })
            .collect()
    }

    fn resolve_media(&self, product: &mut MergedProduct) {
        let base = self.media_base.as_str();
        for image in &mut product.images {
            image.image = resolve_media_url(base, &image.image);
        }
        for image in &mut product.factory_images {
            image.image = resolve_media_url(base, &image.image);
        }
        for item in &mut product.application_items {
            if let Some(image) = item.image.as_mut() {
                *image = resolve_media_url(base, image);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Reply, StaticBackend};
    use serde_json::json;

    const BASE: &str = "http://lingyealu.cn";

    fn catalog(backend: StaticBackend) -> CatalogService {
        CatalogService::new(Arc::new(backend), TemplateRegistry::builtin(), BASE)
    }

    #[tokio::test]
    async fn test_products_merged_from_results_envelope() {
        let backend = StaticBackend::new().with_products(Reply::Json(json!({
            "count": 2,
            "results": [
                {"id": 1, "category": {"id": 3, "slug": "t-slot-aluminum-profiles"}, "range_param": ""},
                {"id": 2, "category": {"id": 5, "slug": "heat-sinks"}, "grade": "6061"}
            ]
        })));
        let products = catalog(backend).products("en", &ProductQuery::default()).await;

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].specification_items.len(), 19);
        assert_eq!(products[0].factory_images[0].image, "http://lingyealu.cn/images/factory/factory-scene.jpg");
        assert_eq!(products[1].grade, "6061");
        assert_eq!(products[1].type_param, "Custom aluminum extrusion");
    }

    #[tokio::test]
    async fn test_products_bare_array_and_malformed_entry() {
        let backend = StaticBackend::new().with_products(Reply::Json(json!([
            {"id": 1, "images": [{"id": 1, "image": "/media/products/a.jpg"}]},
            {"id": "not-a-number"}
        ])));
        let products = catalog(backend).products("es", &ProductQuery::default()).await;

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].images[0].image, "http://lingyealu.cn/media/products/a.jpg");
    }

    #[tokio::test]
    async fn test_null_item_fields_keep_product() {
        let backend = StaticBackend::new()
            .with_products(Reply::Json(json!([
                {"id": 6, "specification_items": [{"name": "Length", "value": null, "order": 1}]},
                {"id": 7}
            ])))
            .with_product(
                5,
                Reply::Json(json!({
                    "id": 5,
                    "factory_images": [{"title": "Line", "image": null, "category": "factory"}]
                })),
            );
        let service = catalog(backend);

        let products = service.products("en", &ProductQuery::default()).await;
        let ids: Vec<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![Some(6), Some(7)]);
        assert_eq!(products[0].specification_items[0].value, "");

        let detail = service.product_detail(5, "en").await.unwrap();
        assert_eq!(detail.product.factory_images.len(), 1);
        assert_eq!(detail.product.factory_images[0].image, "");
    }

    #[tokio::test]
    async fn test_translated_fields_used_for_english_listing() {
        let backend = StaticBackend::new().with_products(Reply::Json(json!({
            "results": [
                {
                    "id": 1,
                    "category": {"id": 3, "slug": "t-slot-aluminum-profiles"},
                    "translated_name": "40x40 T-slot profile",
                    "translated_description": "Anodized 6063-T5 profile for machine frames.",
                    "translated_features": "",
                    "translated_applications": "Workbenches"
                },
                {"id": 2, "name": "Heat sink", "translated_name": "", "description": "Fin profile"}
            ]
        })));
        let products = catalog(backend).products("en", &ProductQuery::default()).await;

        assert_eq!(products[0].name.as_deref(), Some("40x40 T-slot profile"));
        assert_eq!(products[0].description, json!("Anodized 6063-T5 profile for machine frames."));
        assert_eq!(products[0].applications, json!("Workbenches"));
        // Empty translation and no plain value: template text, here none
        assert_eq!(products[0].features, json!(""));
        assert!(products[0].extra.get("translated_name").is_none());

        assert_eq!(products[1].name.as_deref(), Some("Heat sink"));
        assert_eq!(products[1].description, json!("Fin profile"));
    }

    #[tokio::test]
    async fn test_products_failure_is_empty() {
        let backend = StaticBackend::new().with_products(Reply::Status(502));
        assert!(catalog(backend).products("en", &ProductQuery::default()).await.is_empty());
    }

    #[tokio::test]
    async fn test_featured_query() {
        let backend = Arc::new(StaticBackend::new());
        let service = CatalogService::new(backend.clone(), TemplateRegistry::builtin(), BASE);
        service.featured_products("pt").await;

        assert_eq!(backend.requests(), vec!["products:pt:None:true:None".to_string()]);
    }

    #[tokio::test]
    async fn test_categories() {
        let backend = StaticBackend::new().with_categories(Reply::Json(json!({
            "results": [
                {"id": 1, "name": "Building Profiles", "slug": "building-profiles",
                 "subcategories": [{"id": 4, "name": "Window & Door", "parent_category": 1}]},
                {"id": 2, "translated_name": "Perfiles Industriales"}
            ]
        })));
        let categories = catalog(backend).categories("es").await;

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].subcategories[0].name, "Window & Door");
        assert_eq!(categories[1].name, "Perfiles Industriales");
    }

    #[tokio::test]
    async fn test_categories_failure_is_empty() {
        let backend = StaticBackend::new().with_categories(Reply::Status(500));
        assert!(catalog(backend).categories("en").await.is_empty());
    }

    #[tokio::test]
    async fn test_product_detail_with_related() {
        let backend = Arc::new(
            StaticBackend::new()
                .with_product(
                    7,
                    Reply::Json(json!({
                        "id": 7,
                        "name": "Casement frame",
                        "category": {"id": 2, "slug": "building-profiles"},
                        "subcategory": {"id": 4, "slug": "window-door-profiles"}
                    })),
                )
                .with_products(Reply::Json(json!({
                    "results": [
                        {"id": 7}, {"id": 8}, {"id": 9}, {"id": 10}, {"id": 11}, {"id": 12}
                    ]
                }))),
        );
        let service = CatalogService::new(backend.clone(), TemplateRegistry::builtin(), BASE);

        let detail = service.product_detail(7, "zh").await.unwrap();
        assert_eq!(detail.product.type_param, "For door and window profiles");
        assert_eq!(detail.product.application_items.len(), 3);
        let related: Vec<_> = detail.related.iter().map(|p| p.id).collect();
        assert_eq!(related, vec![Some(8), Some(9), Some(10), Some(11)]);
        assert_eq!(
            backend.requests(),
            vec!["product:7:zh".to_string(), "products:zh:Some(2):false:Some(4)".to_string()]
        );
    }

    #[tokio::test]
    async fn test_product_detail_missing() {
        let service = catalog(StaticBackend::new());
        assert!(service.product_detail(404, "en").await.is_none());
    }

    #[test]
    fn test_prepare_resolves_application_images() {
        let service = catalog(StaticBackend::new());
        let product: Product = serde_json::from_value(json!({
            "application_items": [
                {"name": "Curtain wall", "description": "", "image": "media/apps/wall.jpg", "order": 1}
            ]
        }))
        .unwrap();

        let merged = service.prepare(product);
        assert_eq!(
            merged.application_items[0].image.as_deref(),
            Some("http://lingyealu.cn/media/apps/wall.jpg")
        );
    }
}
