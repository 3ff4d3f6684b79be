//! Lot management service: storage conditions, expiry and reservations

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    expiry_priority, ExpiryAlert, Lot, LotAvailability, LotFilter, LotWithExpiry, StorageType,
};
use crate::store::Store;

const RESOURCE: &str = "Lot";

/// Lot service owning the lot store
#[derive(Clone)]
pub struct LotService {
    store: Store<Lot>,
}

/// Input for creating a lot
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLotInput {
    pub expiry_date: NaiveDate,
    pub storage_type: StorageType,
    #[validate(range(min = 1))]
    pub initial_quantity: i64,
    pub product_id: String,
    pub warehouse_id: String,
    pub target_temperature: Option<f64>,
    pub target_humidity: Option<f64>,
}

/// Input for updating a lot; only supplied fields change.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLotInput {
    pub expiry_date: Option<NaiveDate>,
    pub storage_type: Option<StorageType>,
    pub available: Option<i64>,
    pub target_temperature: Option<f64>,
    pub target_humidity: Option<f64>,
}

/// Counters returned by a successful lot reservation
#[derive(Debug, Serialize)]
pub struct LotReserveOutcome {
    pub message: String,
    pub available: i64,
    pub reserved: i64,
}

impl LotService {
    pub fn new(store: Store<Lot>) -> Self {
        Self { store }
    }

    /// Create a lot; the full initial quantity starts available.
    pub fn create(&self, input: CreateLotInput, today: NaiveDate) -> AppResult<LotWithExpiry> {
        input.validate()?;
        let now = Utc::now();

        let lot = Lot {
            id: Uuid::new_v4(),
            expiry_date: input.expiry_date,
            storage_type: input.storage_type,
            initial_quantity: input.initial_quantity,
            available: input.initial_quantity,
            reserved: 0,
            sold: 0,
            product_id: input.product_id,
            warehouse_id: input.warehouse_id,
            target_temperature: input.target_temperature,
            target_humidity: input.target_humidity,
            created_at: now,
            updated_at: now,
        };

        self.store.insert(lot.id, lot.clone());
        Ok(LotWithExpiry::new(lot, today))
    }

    pub fn list(&self, filter: &LotFilter, today: NaiveDate) -> Vec<LotWithExpiry> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|lot| filter.matches(lot, today))
            .map(|lot| LotWithExpiry::new(lot, today))
            .collect()
    }

    pub fn get(&self, id: Uuid, today: NaiveDate) -> AppResult<LotWithExpiry> {
        self.store
            .get(&id)
            .map(|lot| LotWithExpiry::new(lot, today))
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    pub fn update(
        &self,
        id: Uuid,
        input: UpdateLotInput,
        today: NaiveDate,
    ) -> AppResult<LotWithExpiry> {
        let updated = self
            .store
            .update_with(&id, |lot| {
                if let Some(expiry_date) = input.expiry_date {
                    lot.expiry_date = expiry_date;
                }
                if let Some(storage_type) = input.storage_type {
                    lot.storage_type = storage_type;
                }
                if let Some(available) = input.available {
                    lot.available = available;
                }
                if let Some(target_temperature) = input.target_temperature {
                    lot.target_temperature = Some(target_temperature);
                }
                if let Some(target_humidity) = input.target_humidity {
                    lot.target_humidity = Some(target_humidity);
                }
                lot.updated_at = Utc::now();
                lot.clone()
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?;
        Ok(LotWithExpiry::new(updated, today))
    }

    pub fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    pub fn availability(&self, id: Uuid, today: NaiveDate) -> AppResult<LotAvailability> {
        let lot = self
            .store
            .get(&id)
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?;
        Ok(LotAvailability {
            lot_id: lot.id,
            initial_quantity: lot.initial_quantity,
            available: lot.available,
            reserved: lot.reserved,
            sold: lot.sold,
            available_percent: lot.available_percent(),
            days_to_expiry: lot.days_to_expiry(today),
            is_expired: lot.is_expired(today),
        })
    }

    /// Move `quantity` units from available to reserved.
    ///
    /// An expired lot can never be reserved, regardless of quantity.
    pub fn reserve(
        &self,
        id: Uuid,
        quantity: i64,
        today: NaiveDate,
    ) -> AppResult<LotReserveOutcome> {
        shared::validation::validate_positive_quantity(quantity)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;
        self.store
            .update_with(&id, |lot| {
                if lot.is_expired(today) {
                    return Err(AppError::InvalidTransition(
                        "Cannot reserve from an expired lot".to_string(),
                    ));
                }
                if lot.available < quantity {
                    return Err(AppError::InsufficientQuantity {
                        message: format!("Quantity not available. Available: {}", lot.available),
                        message_es: format!(
                            "Cantidad no disponible. Disponible: {}",
                            lot.available
                        ),
                    });
                }
                lot.available -= quantity;
                lot.reserved += quantity;
                lot.updated_at = Utc::now();
                Ok(LotReserveOutcome {
                    message: format!("Reserved {} units from the lot", quantity),
                    available: lot.available,
                    reserved: lot.reserved,
                })
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?
    }

    /// All lots already past their expiry date.
    pub fn expired(&self, today: NaiveDate) -> Vec<LotWithExpiry> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|lot| lot.is_expired(today))
            .map(|lot| LotWithExpiry::new(lot, today))
            .collect()
    }

    /// Sweep for lots approaching expiry, most urgent first.
    pub fn expiry_alerts(&self, days_ahead: i64, today: NaiveDate) -> Vec<ExpiryAlert> {
        let limit = today + Duration::days(days_ahead);
        let mut alerts: Vec<ExpiryAlert> = self
            .store
            .snapshot()
            .into_iter()
            .filter(|lot| {
                !lot.is_expired(today) && lot.available > 0 && lot.expiry_date <= limit
            })
            .map(|lot| {
                let days_to_expiry = lot.days_to_expiry(today);
                ExpiryAlert {
                    lot_id: lot.id,
                    days_to_expiry,
                    available: lot.available,
                    priority: expiry_priority(days_to_expiry),
                }
            })
            .collect();

        alerts.sort_by_key(|alert| (alert.priority.rank(), alert.days_to_expiry));
        alerts
    }
}
