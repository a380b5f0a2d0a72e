//! Catalogue records as served by the API and as shown on product pages

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Category or subcategory reference embedded in a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRef {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// One row of the specification table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecificationItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub order: i32,
}

/// One product feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub order: i32,
}

/// One application scenario, optionally illustrated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub order: i32,
}

/// Factory photo shown under the product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    /// Scene kind: factory, production, quality, packaging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Product gallery image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductImage {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

/// Product record as returned by the API; any field may be missing.
///
/// Fields this crate does not know about are kept in `extra` and carried
/// through to the merged product untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub category: Option<CategoryRef>,
    pub subcategory: Option<CategoryRef>,

    // Sent instead of the plain fields for languages other than Chinese
    pub translated_name: Option<String>,
    pub translated_description: Option<Value>,
    pub translated_features: Option<Value>,
    pub translated_applications: Option<Value>,

    pub range_param: Option<String>,
    pub type_param: Option<String>,
    pub surface_treatment: Option<String>,
    pub colors: Option<String>,
    pub grade: Option<String>,
    pub temper: Option<String>,

    // Free text or structured JSON depending on the product
    pub description: Option<Value>,
    pub features: Option<Value>,
    pub applications: Option<Value>,
    pub specifications: Option<Value>,

    pub specification_items: Option<Vec<SpecificationItem>>,
    pub feature_items: Option<Vec<FeatureItem>>,
    pub application_items: Option<Vec<ApplicationItem>>,
    pub images: Option<Vec<ProductImage>>,

    pub packaging_details: Option<String>,
    pub oem_available: Option<bool>,
    pub free_samples: Option<String>,
    pub supply_ability: Option<String>,
    pub payment_terms: Option<String>,
    pub product_origin: Option<String>,
    pub shipping_port: Option<String>,
    pub lead_time: Option<String>,
    pub factory_images: Option<Vec<FactoryImage>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Product with every gap filled from its template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedProduct {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub category: Option<CategoryRef>,
    pub subcategory: Option<CategoryRef>,

    pub range_param: String,
    pub type_param: String,
    pub surface_treatment: String,
    pub colors: String,
    pub grade: String,
    pub temper: String,

    pub description: Value,
    pub features: Value,
    pub applications: Value,
    pub specifications: Value,

    pub specification_items: Vec<SpecificationItem>,
    pub feature_items: Vec<FeatureItem>,
    pub application_items: Vec<ApplicationItem>,
    pub images: Vec<ProductImage>,

    pub packaging_details: String,
    pub oem_available: bool,
    pub free_samples: String,
    pub supply_ability: String,
    pub payment_terms: String,
    pub product_origin: String,
    pub shipping_port: String,
    pub lead_time: String,
    pub factory_images: Vec<FactoryImage>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deserialize a field whose `null` means "use the default"
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Subcategory as listed under its parent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub slug: Option<String>,
    pub parent_category: Option<i64>,
}

/// Category with its subcategories, names already localized
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub slug: Option<String>,
    pub image: Option<String>,
    pub subcategories: Vec<SubCategory>,
}

/// Category entry as the API sends it; localized fields take priority
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCategory {
    id: Option<i64>,
    name: Option<String>,
    translated_name: Option<String>,
    description: Option<String>,
    translated_description: Option<String>,
    slug: Option<String>,
    image: Option<String>,
    parent_category: Option<i64>,
    subcategories: Option<Vec<RawCategory>>,
}

fn localized(translated: Option<String>, original: Option<String>) -> String {
    translated
        .filter(|s| !s.is_empty())
        .or(original)
        .unwrap_or_default()
}

impl From<RawCategory> for SubCategory {
    fn from(raw: RawCategory) -> Self {
        Self {
            id: raw.id,
            name: localized(raw.translated_name, raw.name),
            description: localized(raw.translated_description, raw.description),
            slug: raw.slug,
            parent_category: raw.parent_category,
        }
    }
}

impl From<RawCategory> for Category {
    fn from(raw: RawCategory) -> Self {
        Self {
            id: raw.id,
            name: localized(raw.translated_name, raw.name),
            description: localized(raw.translated_description, raw.description),
            slug: raw.slug,
            image: raw.image,
            subcategories: raw
                .subcategories
                .unwrap_or_default()
                .into_iter()
                .map(SubCategory::from)
                .collect(),
        }
    }
}
