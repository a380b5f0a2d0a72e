//! Built-in product templates
//!
//! Boilerplate copy and specification tables for each product family,
//! keyed by category or subcategory slug. `default` covers everything else.

use super::types::{
    ApplicationItem, CategoryRef, FactoryImage, FeatureItem, Product, SpecificationItem,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key of the template used when no slug matches
pub const DEFAULT_TEMPLATE: &str = "default";

/// Default values for one product family
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductTemplate {
    pub category_id: Option<i64>,
    pub category_slug: Option<String>,
    pub subcategory_id: Option<i64>,
    pub subcategory_slug: Option<String>,

    pub range_param: Option<String>,
    pub type_param: Option<String>,
    pub surface_treatment: Option<String>,
    pub colors: Option<String>,
    pub grade: Option<String>,
    pub temper: Option<String>,

    pub default_description: Option<String>,
    pub default_features: Option<String>,
    pub default_applications: Option<String>,
    pub default_specifications: Option<String>,
    pub packaging_details: Option<String>,

    pub specification_items: Option<Vec<SpecificationItem>>,
    pub feature_items: Option<Vec<FeatureItem>>,
    pub application_items: Option<Vec<ApplicationItem>>,

    pub oem_available: Option<bool>,
    pub free_samples: Option<String>,
    pub supply_ability: Option<String>,
    pub payment_terms: Option<String>,
    pub product_origin: Option<String>,
    pub shipping_port: Option<String>,
    pub lead_time: Option<String>,

    pub factory_images: Option<Vec<FactoryImage>>,
}

/// Lookup table of templates by slug
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, ProductTemplate>,
    empty: ProductTemplate,
}

impl TemplateRegistry {
    /// Registry with no templates at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the compiled-in templates
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.insert("t-slot-aluminum-profiles", t_slot_template());
        registry.insert("window-door-profiles", window_door_template());
        registry.insert(DEFAULT_TEMPLATE, default_template());
        registry
    }

    /// Register or replace a template
    pub fn insert(&mut self, slug: &str, template: ProductTemplate) {
        self.templates.insert(slug.to_string(), template);
    }

    /// Template registered under a slug
    pub fn get(&self, slug: &str) -> Option<&ProductTemplate> {
        self.templates.get(slug)
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Pick the template for a product.
    ///
    /// Subcategory slug first, then category slug, then `default`, then an
    /// empty template. Never fails.
    pub fn select(&self, product: &Product) -> &ProductTemplate {
        let slug_of = |reference: &Option<CategoryRef>| {
            reference
                .as_ref()
                .and_then(|r| r.slug.as_deref())
                .filter(|slug| !slug.is_empty())
                .map(str::to_string)
        };

        if let Some(template) = slug_of(&product.subcategory).and_then(|slug| self.get(&slug)) {
            return template;
        }
        if let Some(template) = slug_of(&product.category).and_then(|slug| self.get(&slug)) {
            return template;
        }
        self.get(DEFAULT_TEMPLATE).unwrap_or(&self.empty)
    }
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn spec(name: &str, value: &str, order: i32) -> SpecificationItem {
    SpecificationItem {
        id: None,
        name: name.to_string(),
        value: value.to_string(),
        order,
    }
}

fn application(name: &str, description: &str, order: i32) -> ApplicationItem {
    ApplicationItem {
        id: None,
        name: name.to_string(),
        description: description.to_string(),
        image: None,
        order,
    }
}

fn factory_image(title: &str, description: &str, category: &str, image: &str) -> FactoryImage {
    FactoryImage {
        id: None,
        title: title.to_string(),
        description: Some(description.to_string()),
        image: image.to_string(),
        category: Some(category.to_string()),
    }
}

/// Industrial T-slot / V-slot framing profiles
fn t_slot_template() -> ProductTemplate {
    ProductTemplate {
        category_slug: text("industrial-aluminum-profiles"),
        range_param: text("OEM factory supply aluminium profiles"),
        type_param: text("T-Slot V-Slot Aluminium Profile"),
        surface_treatment: text("Mill Finished, Anodized, Powder Coated, Electrophoresis, Wood Grain"),
        colors: text("Silver, Champagne, Bronze, Golden, Black, Sand coating, Anodized Acid and alkali or Customized"),
        grade: text("Alloy 6063-T5, 6061-T6"),
        temper: text("T5, T6"),
        default_description: text(
            "Our t slot profile v-slot adopts corrosion-resistant 6063-T5, 6061-T6 Aluminum Alloy \
             with a clear anodize finish. Not only do our Slotted Aluminum Profiles come in a variety \
             of standard lengths and sizes, we also offer cut to length services to better meet your \
             projects specific needs.",
        ),
        specification_items: Some(vec![
            spec("Material & Temper", "Alloy 6063-T5, 6061-T6, We will never use aluminum scrap.", 1),
            spec("Surface Treatment", "Mill-Finished, Anodizing, Powder Coating, Electrophoresis, Wood Grain, Polishing, Brushing, etc.", 2),
            spec("Colour", "Silver, Champage, Bronze, Golden, Black, Sand coating, Anodized Acid and alkali or Customized.", 3),
            spec("Film Standard", "Anodized:7-23 \u{03BC}, Powder coating: 60-120 \u{03BC}, Electrophoresis film: 12-25 \u{03BC}.", 4),
            spec("Lifetime", "Anodized for 12-15 years outdoor, Powder coating for 18-20 years outdoor.", 5),
            spec("MOQ", "500 kgs. Usually 10-12 tons for a 20'FT; 20-23 tons for a 40HQ.", 6),
            spec("Length", "5.8M or Customized.", 7),
            spec("Thickness", "0.4mm-20mm or Customized.", 8),
            spec("Application", "Building and Construction and Decoration.", 9),
            spec("Extrusion Machine", "600-3600 tons all together 6 extrusion lines.", 10),
            spec("Capability", "Output 1200 tons per month.", 11),
            spec("New Moulds", "Opening new mould about 7-10 days, absolutely moulds cost can be refund.", 12),
            spec("Free Samples", "Can be available all the time, about 1 days can be sent.", 13),
            spec(
                "Fabrication",
                "Die designing\u{2192} Die making\u{2192} Smelting & alloying\u{2192} QC\u{2192} Extruding\u{2192} \
                 Cutting\u{2192} Heat Treatment\u{2192} QC\u{2192} Surface treatment\u{2192} QC\u{2192} Packing\u{2192} \
                 QC\u{2192} Shipping\u{2192} After Sale Service",
                14,
            ),
            spec("Deep Processing", "CNC / Cutting / Punching / Checking / Tapping / Drilling / Milling", 15),
            spec(
                "Certification",
                "ISO9001-2008/ISO 9001:2008; GB/T28001-2001(including all the standard of OHSAS18001:1999); \
                 GB/T24001-2004/ISO 14001:2004; GMC.",
                16,
            ),
            spec(
                "Payment",
                "T/T: 30% deposite, the balance will be paid before delivery; L/C: the balance irrevocable L/C at sight.",
                17,
            ),
            spec("Delivery time", "15 days production; If opening mould, plus 7-10 days.", 18),
            spec("OEM", "Available.", 19),
        ]),
        application_items: Some(vec![
            application("Factory assembly line", "Ideal for building assembly line structures", 1),
            application("Workstations and test stations", "Perfect for workstations, test stations, and tables", 2),
            application("Materials handling systems", "Used in various materials handling systems", 3),
            application("Machine bases and frames", "Suitable for machine bases and frames", 4),
            application("Equipment safety enclosures", "Used in equipment safety enclosures and guard systems", 5),
            application("Office and workshop furniture", "Perfect for desks, cabinets, and storage units", 6),
        ]),
        packaging_details: text(
            "PE film for each profile/ Shrink PE film for each bundle, Slot packing, Craft paper/ Foam Paper/Carton box",
        ),
        oem_available: Some(true),
        free_samples: text("Available, about 1 days can be sent"),
        supply_ability: text("1200-1600 tons per month"),
        payment_terms: text("T/T, L/C"),
        product_origin: text("Foshan China"),
        shipping_port: text("Shenzhen/Guangzhou/Foshan"),
        lead_time: text("7-15 Days"),
        factory_images: Some(vec![
            factory_image("Factory Scene", "Modern production facility", "factory", "/images/factory/factory-scene.jpg"),
            factory_image("Production Process", "Advanced extrusion process", "production", "/images/factory/production-process.jpg"),
            factory_image("Quality Check", "Strict quality inspection", "quality", "/images/factory/quality-check.jpg"),
            factory_image("Packing", "Professional packaging", "packaging", "/images/factory/packing.jpg"),
        ]),
        ..Default::default()
    }
}

/// Building profiles for windows and doors
fn window_door_template() -> ProductTemplate {
    ProductTemplate {
        category_slug: text("building-profiles"),
        subcategory_slug: text("window-door-profiles"),
        range_param: text("OEM factory supply aluminium profiles"),
        type_param: text("For door and window profiles"),
        surface_treatment: text("Mill Finished, Anodized, Powder Coated, Electrohoresis, Wood Grain"),
        colors: text("Silver, White, Black, Bronze, Champagne, Golden or customized"),
        grade: text("6063 Series"),
        temper: text("T5, T6"),
        specification_items: Some(vec![
            spec("Material & Temper", "6063-T5, 6063-T6 Aluminum Alloy", 1),
            spec("Surface Treatment", "Anodizing, Powder Coating, Wood Grain, Brushed", 2),
            spec("Application", "Residential and commercial windows and doors", 3),
        ]),
        application_items: Some(vec![
            application("Sliding Windows", "For sliding window systems", 1),
            application("Casement Windows", "For casement window frames", 2),
            application("Doors", "For door frame systems", 3),
        ]),
        oem_available: Some(true),
        free_samples: text("Available, about 1 days can be sent"),
        product_origin: text("Foshan China"),
        shipping_port: text("Shenzhen/Guangzhou/Foshan"),
        ..Default::default()
    }
}

fn default_template() -> ProductTemplate {
    ProductTemplate {
        range_param: text("OEM factory supply aluminium profiles"),
        type_param: text("Custom aluminum extrusion"),
        surface_treatment: text("Mill Finished, Anodized, Powder Coated"),
        colors: text("Silver, White, Black or customized"),
        grade: text("6063 Series"),
        temper: text("T5, T6"),
        oem_available: Some(true),
        free_samples: text("Available"),
        product_origin: text("Foshan China"),
        ..Default::default()
    }
}
