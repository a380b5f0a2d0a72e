//! Overlay of a product record onto its template
//!
//! Product values always win when present. Text fields treat an empty
//! string as missing, `oem_available` treats only null/absent as missing,
//! and item collections are taken whole from one side or the other.
//! Localized product text counts as product text.

use super::templates::ProductTemplate;
use super::types::{MergedProduct, Product};
use serde_json::Value;

/// Fill the gaps in `product` from `template`
pub fn merge(product: Product, template: &ProductTemplate) -> MergedProduct {
    MergedProduct {
        id: product.id,
        name: non_empty(product.translated_name).or(product.name),
        category: product.category,
        subcategory: product.subcategory,

        range_param: text(product.range_param, &template.range_param),
        type_param: text(product.type_param, &template.type_param),
        surface_treatment: text(product.surface_treatment, &template.surface_treatment),
        colors: text(product.colors, &template.colors),
        grade: text(product.grade, &template.grade),
        temper: text(product.temper, &template.temper),

        description: content(
            localized(product.translated_description, product.description),
            &template.default_description,
        ),
        features: content(
            localized(product.translated_features, product.features),
            &template.default_features,
        ),
        applications: content(
            localized(product.translated_applications, product.applications),
            &template.default_applications,
        ),
        specifications: content(product.specifications, &template.default_specifications),

        specification_items: items(product.specification_items, &template.specification_items),
        feature_items: items(product.feature_items, &template.feature_items),
        application_items: items(product.application_items, &template.application_items),
        images: product.images.unwrap_or_default(),

        packaging_details: text(product.packaging_details, &template.packaging_details),
        oem_available: product.oem_available.or(template.oem_available).unwrap_or(true),
        free_samples: text(product.free_samples, &template.free_samples),
        supply_ability: text(product.supply_ability, &template.supply_ability),
        payment_terms: text(product.payment_terms, &template.payment_terms),
        product_origin: text(product.product_origin, &template.product_origin),
        shipping_port: text(product.shipping_port, &template.shipping_port),
        lead_time: text(product.lead_time, &template.lead_time),

        // Presence, not emptiness: an explicit empty gallery is kept
        factory_images: product
            .factory_images
            .or_else(|| template.factory_images.clone())
            .unwrap_or_default(),

        extra: product.extra,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn text(product: Option<String>, template: &Option<String>) -> String {
    non_empty(product)
        .or_else(|| non_empty(template.clone()))
        .unwrap_or_default()
}

fn localized(translated: Option<Value>, original: Option<Value>) -> Option<Value> {
    translated.filter(is_truthy).or(original)
}

fn content(product: Option<Value>, template: &Option<String>) -> Value {
    match product {
        Some(value) if is_truthy(&value) => value,
        _ => Value::String(text(None, template)),
    }
}

fn items<T: Clone>(product: Option<Vec<T>>, template: &Option<Vec<T>>) -> Vec<T> {
    match product {
        Some(items) if !items.is_empty() => items,
        _ => template.clone().unwrap_or_default(),
    }
}

/// JavaScript truthiness of a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
