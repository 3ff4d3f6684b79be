//! Product catalog service

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::StockLookup;
use crate::models::{Product, ProductCategory, ProductFilter, ProductStock, UnitOfMeasure};
use crate::store::Store;

const RESOURCE: &str = "Product";

/// Product service owning the product store
#[derive(Clone)]
pub struct ProductService {
    store: Store<Product>,
}

/// Input for creating a product
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub unit: UnitOfMeasure,
    pub price: Decimal,
    pub barcode: Option<String>,
    pub unit_weight: Option<f64>,
    #[serde(default)]
    pub requires_refrigeration: bool,
    pub shelf_life_days: Option<i64>,
}

/// Input for updating a product; only supplied fields change.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ProductCategory>,
    pub unit: Option<UnitOfMeasure>,
    pub price: Option<Decimal>,
    pub barcode: Option<String>,
    pub unit_weight: Option<f64>,
    pub requires_refrigeration: Option<bool>,
    pub shelf_life_days: Option<i64>,
    pub active: Option<bool>,
}

/// Result of a soft deletion
#[derive(Debug, Serialize)]
pub struct DeactivateOutcome {
    pub message: String,
    pub active: bool,
}

/// Count/price rollup across active products
#[derive(Debug, Serialize)]
pub struct ProductStatsReport {
    pub total_products: usize,
    pub refrigerated_products: usize,
    pub average_price: Decimal,
    pub products_by_category: BTreeMap<String, usize>,
    pub generated_at: DateTime<Utc>,
}

impl ProductService {
    pub fn new(store: Store<Product>) -> Self {
        Self { store }
    }

    pub fn create(&self, input: CreateProductInput) -> AppResult<Product> {
        input.validate()?;
        shared::validation::validate_non_negative_amount(input.price)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;
        let now = Utc::now();

        let product = Product {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            category: input.category,
            unit: input.unit,
            price: input.price,
            barcode: input.barcode,
            unit_weight: input.unit_weight,
            requires_refrigeration: input.requires_refrigeration,
            shelf_life_days: input.shelf_life_days,
            active: true,
            created_at: now,
            updated_at: now,
        };

        self.store.insert(product.id, product.clone());
        Ok(product)
    }

    /// List products. When the caller supplies no `active` criterion the
    /// listing defaults to active products only.
    pub fn list(&self, filter: &ProductFilter) -> Vec<Product> {
        let mut filter = filter.clone();
        filter.active.get_or_insert(true);
        self.store
            .snapshot()
            .into_iter()
            .filter(|product| filter.matches(product))
            .collect()
    }

    /// Direct lookup; returns the record regardless of the active flag.
    pub fn get(&self, id: Uuid) -> AppResult<Product> {
        self.store
            .get(&id)
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    pub fn update(&self, id: Uuid, input: UpdateProductInput) -> AppResult<Product> {
        self.store
            .update_with(&id, |product| {
                if let Some(name) = input.name {
                    product.name = name;
                }
                if let Some(description) = input.description {
                    product.description = Some(description);
                }
                if let Some(category) = input.category {
                    product.category = category;
                }
                if let Some(unit) = input.unit {
                    product.unit = unit;
                }
                if let Some(price) = input.price {
                    product.price = price;
                }
                if let Some(barcode) = input.barcode {
                    product.barcode = Some(barcode);
                }
                if let Some(unit_weight) = input.unit_weight {
                    product.unit_weight = Some(unit_weight);
                }
                if let Some(requires_refrigeration) = input.requires_refrigeration {
                    product.requires_refrigeration = requires_refrigeration;
                }
                if let Some(shelf_life_days) = input.shelf_life_days {
                    product.shelf_life_days = Some(shelf_life_days);
                }
                if let Some(active) = input.active {
                    product.active = active;
                }
                product.updated_at = Utc::now();
                product.clone()
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    /// Soft delete: the record stays, `active` flips to false.
    pub fn deactivate(&self, id: Uuid) -> AppResult<DeactivateOutcome> {
        self.store
            .update_with(&id, |product| {
                product.active = false;
                product.updated_at = Utc::now();
                DeactivateOutcome {
                    message: format!("Product {} deactivated", product.id),
                    active: product.active,
                }
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    pub fn by_barcode(&self, barcode: &str) -> AppResult<Product> {
        self.store
            .snapshot()
            .into_iter()
            .find(|product| product.barcode.as_deref() == Some(barcode))
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    /// Active products of one category.
    pub fn by_category(&self, category: ProductCategory) -> Vec<Product> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|product| product.category == category && product.active)
            .collect()
    }

    /// Active products that require refrigeration.
    pub fn refrigerated(&self) -> Vec<Product> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|product| product.requires_refrigeration && product.active)
            .collect()
    }

    /// Stock report for one product, backed by the stock collaborator.
    pub fn stock(&self, id: Uuid, lookup: &dyn StockLookup) -> AppResult<ProductStock> {
        let product = self.get(id)?;
        let stock_on_hand = lookup.stock_on_hand(&product.id.to_string());
        Ok(ProductStock {
            product_id: product.id,
            product_name: product.name,
            stock_on_hand,
            inventory_value: product.price * Decimal::from(stock_on_hand),
        })
    }

    pub fn stats(&self) -> ProductStatsReport {
        let products: Vec<Product> = self
            .store
            .snapshot()
            .into_iter()
            .filter(|product| product.active)
            .collect();

        let mut products_by_category: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_price = Decimal::ZERO;
        for product in &products {
            *products_by_category
                .entry(product.category.as_str().to_string())
                .or_default() += 1;
            total_price += product.price;
        }

        let average_price = if products.is_empty() {
            Decimal::ZERO
        } else {
            (total_price / Decimal::from(products.len() as u64)).round_dp(2)
        };

        ProductStatsReport {
            total_products: products.len(),
            refrigerated_products: products
                .iter()
                .filter(|product| product.requires_refrigeration)
                .count(),
            average_price,
            products_by_category,
            generated_at: Utc::now(),
        }
    }
}
