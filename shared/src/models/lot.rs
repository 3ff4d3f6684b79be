//! Lot model: expiry tracking, storage conditions and quantity counters

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{round2, Priority};

/// Storage condition required by a lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    Refrigerated,
    Frozen,
    Ambient,
    Dry,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Refrigerated => "refrigerated",
            StorageType::Frozen => "frozen",
            StorageType::Ambient => "ambient",
            StorageType::Dry => "dry",
        }
    }
}

/// A lot of product units stored in a warehouse.
///
/// Expiry is never stored as a flag; it is always derived from
/// `expiry_date` against a caller-supplied date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lot {
    pub id: Uuid,
    pub expiry_date: NaiveDate,
    pub storage_type: StorageType,
    pub initial_quantity: i64,
    pub available: i64,
    pub reserved: i64,
    pub sold: i64,
    pub product_id: String,
    pub warehouse_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_humidity: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lot {
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }

    /// Signed day count until expiry; negative means already expired.
    pub fn days_to_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }

    pub fn available_percent(&self) -> f64 {
        if self.initial_quantity == 0 {
            return 0.0;
        }
        round2(self.available as f64 / self.initial_quantity as f64 * 100.0)
    }
}

/// A lot together with its derived expiry flag
#[derive(Debug, Clone, Serialize)]
pub struct LotWithExpiry {
    #[serde(flatten)]
    pub lot: Lot,
    pub is_expired: bool,
}

impl LotWithExpiry {
    pub fn new(lot: Lot, today: NaiveDate) -> Self {
        let is_expired = lot.is_expired(today);
        Self { lot, is_expired }
    }
}

/// Availability report for a single lot
#[derive(Debug, Clone, Serialize)]
pub struct LotAvailability {
    pub lot_id: Uuid,
    pub initial_quantity: i64,
    pub available: i64,
    pub reserved: i64,
    pub sold: i64,
    pub available_percent: f64,
    pub days_to_expiry: i64,
    pub is_expired: bool,
}

/// Optional listing criteria; absent fields impose no constraint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LotFilter {
    pub product_id: Option<String>,
    pub warehouse_id: Option<String>,
    pub storage_type: Option<StorageType>,
    pub expiry_from: Option<NaiveDate>,
    pub expiry_to: Option<NaiveDate>,
    pub available_only: Option<bool>,
    pub expired_only: Option<bool>,
}

impl LotFilter {
    pub fn matches(&self, lot: &Lot, today: NaiveDate) -> bool {
        if let Some(product_id) = &self.product_id {
            if &lot.product_id != product_id {
                return false;
            }
        }
        if let Some(warehouse_id) = &self.warehouse_id {
            if &lot.warehouse_id != warehouse_id {
                return false;
            }
        }
        if let Some(storage_type) = self.storage_type {
            if lot.storage_type != storage_type {
                return false;
            }
        }
        if let Some(from) = self.expiry_from {
            if lot.expiry_date < from {
                return false;
            }
        }
        if let Some(to) = self.expiry_to {
            if lot.expiry_date > to {
                return false;
            }
        }
        if self.available_only.unwrap_or(false) && lot.available <= 0 {
            return false;
        }
        if self.expired_only.unwrap_or(false) && !lot.is_expired(today) {
            return false;
        }
        true
    }
}

/// Advisory raised for a lot approaching its expiry date
#[derive(Debug, Clone, Serialize)]
pub struct ExpiryAlert {
    pub lot_id: Uuid,
    pub days_to_expiry: i64,
    pub available: i64,
    pub priority: Priority,
}

/// Priority table for expiry alerts: ALTA within a week, MEDIA within two.
pub fn expiry_priority(days_to_expiry: i64) -> Priority {
    if days_to_expiry <= 7 {
        Priority::Alta
    } else if days_to_expiry <= 15 {
        Priority::Media
    } else {
        Priority::Baja
    }
}
