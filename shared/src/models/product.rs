//! Product catalog model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Food,
    Beverages,
    Dairy,
    Meat,
    Vegetables,
    Fruits,
    Frozen,
    Dry,
    Other,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 9] = [
        ProductCategory::Food,
        ProductCategory::Beverages,
        ProductCategory::Dairy,
        ProductCategory::Meat,
        ProductCategory::Vegetables,
        ProductCategory::Fruits,
        ProductCategory::Frozen,
        ProductCategory::Dry,
        ProductCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Food => "food",
            ProductCategory::Beverages => "beverages",
            ProductCategory::Dairy => "dairy",
            ProductCategory::Meat => "meat",
            ProductCategory::Vegetables => "vegetables",
            ProductCategory::Fruits => "fruits",
            ProductCategory::Frozen => "frozen",
            ProductCategory::Dry => "dry",
            ProductCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "l")]
    Liters,
    #[serde(rename = "ml")]
    Milliliters,
    #[serde(rename = "units")]
    Units,
    #[serde(rename = "boxes")]
    Boxes,
    #[serde(rename = "packages")]
    Packages,
}

impl UnitOfMeasure {
    pub const ALL: [UnitOfMeasure; 7] = [
        UnitOfMeasure::Kilograms,
        UnitOfMeasure::Grams,
        UnitOfMeasure::Liters,
        UnitOfMeasure::Milliliters,
        UnitOfMeasure::Units,
        UnitOfMeasure::Boxes,
        UnitOfMeasure::Packages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitOfMeasure::Kilograms => "kg",
            UnitOfMeasure::Grams => "g",
            UnitOfMeasure::Liters => "l",
            UnitOfMeasure::Milliliters => "ml",
            UnitOfMeasure::Units => "units",
            UnitOfMeasure::Boxes => "boxes",
            UnitOfMeasure::Packages => "packages",
        }
    }
}

/// A catalog product.
///
/// Products are never physically removed: deletion flips `active` and the
/// record stays retrievable by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: ProductCategory,
    pub unit: UnitOfMeasure,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_weight: Option<f64>,
    pub requires_refrigeration: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf_life_days: Option<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional listing criteria; absent fields impose no constraint.
///
/// `active` is special-cased by the service: when the caller supplies
/// nothing, listings default to active products only.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub category: Option<ProductCategory>,
    pub unit: Option<UnitOfMeasure>,
    pub requires_refrigeration: Option<bool>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub active: Option<bool>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(name) = &self.name {
            if !product.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }
        if let Some(unit) = self.unit {
            if product.unit != unit {
                return false;
            }
        }
        if let Some(refrigeration) = self.requires_refrigeration {
            if product.requires_refrigeration != refrigeration {
                return false;
            }
        }
        if let Some(min) = self.price_min {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if product.price > max {
                return false;
            }
        }
        if let Some(active) = self.active {
            if product.active != active {
                return false;
            }
        }
        true
    }
}

/// Stock report for a product, backed by the external stock collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct ProductStock {
    pub product_id: Uuid,
    pub product_name: String,
    pub stock_on_hand: i64,
    pub inventory_value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample(name: &str, active: bool) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            category: ProductCategory::Dairy,
            unit: UnitOfMeasure::Liters,
            price: dec!(1250.50),
            barcode: Some("7801234567890".to_string()),
            unit_weight: None,
            requires_refrigeration: true,
            shelf_life_days: Some(14),
            active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        let product = sample("Leche Entera", true);
        let filter = ProductFilter {
            name: Some("leche".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&product));
    }

    #[test]
    fn inactive_products_excluded_when_filtering_active() {
        let product = sample("Leche Entera", false);
        let filter = ProductFilter {
            active: Some(true),
            ..Default::default()
        };
        assert!(!filter.matches(&product));
    }

    #[test]
    fn unit_wire_format() {
        assert_eq!(
            serde_json::to_string(&UnitOfMeasure::Kilograms).unwrap(),
            "\"kg\""
        );
    }
}
