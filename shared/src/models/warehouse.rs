//! Warehouse model: capacity, geographic location and quantity counters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{round2, GeoLocation};

/// A warehouse holding stock of a single product.
///
/// Counters observe `available + reserved + sold == capacity`; quantities
/// only move between the three buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: Uuid,
    pub name: String,
    pub capacity: i64,
    pub location: GeoLocation,
    pub available: i64,
    pub reserved: i64,
    pub sold: i64,
    pub product_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Warehouse {
    /// Occupied share of total capacity, rounded to two decimals.
    ///
    /// A zero capacity never divides; creation rejects it, this guards it.
    pub fn occupancy_percent(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        round2((self.capacity - self.available) as f64 / self.capacity as f64 * 100.0)
    }

    /// Whether the three counters still partition the capacity.
    pub fn counters_consistent(&self) -> bool {
        self.available >= 0
            && self.reserved >= 0
            && self.sold >= 0
            && self.available + self.reserved + self.sold == self.capacity
    }
}

/// Optional listing criteria; absent fields impose no constraint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct WarehouseFilter {
    pub name: Option<String>,
    pub product_id: Option<String>,
    pub city: Option<String>,
    pub capacity_min: Option<i64>,
    pub capacity_max: Option<i64>,
}

impl WarehouseFilter {
    pub fn matches(&self, warehouse: &Warehouse) -> bool {
        if let Some(name) = &self.name {
            if !warehouse.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(product_id) = &self.product_id {
            if &warehouse.product_id != product_id {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !warehouse
                .location
                .city
                .to_lowercase()
                .contains(&city.to_lowercase())
            {
                return false;
            }
        }
        if let Some(min) = self.capacity_min {
            if warehouse.capacity < min {
                return false;
            }
        }
        if let Some(max) = self.capacity_max {
            if warehouse.capacity > max {
                return false;
            }
        }
        true
    }
}

/// Availability report for a single warehouse
#[derive(Debug, Clone, Serialize)]
pub struct WarehouseAvailability {
    pub warehouse_id: Uuid,
    pub name: String,
    pub total_capacity: i64,
    pub available: i64,
    pub reserved: i64,
    pub sold: i64,
    pub occupancy_percent: f64,
}

impl From<&Warehouse> for WarehouseAvailability {
    fn from(warehouse: &Warehouse) -> Self {
        Self {
            warehouse_id: warehouse.id,
            name: warehouse.name.clone(),
            total_capacity: warehouse.capacity,
            available: warehouse.available,
            reserved: warehouse.reserved,
            sold: warehouse.sold,
            occupancy_percent: warehouse.occupancy_percent(),
        }
    }
}
