//! Warehouse management service: locations, capacity and stock counters

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{GeoLocation, Warehouse, WarehouseAvailability, WarehouseFilter};
use crate::store::Store;

const RESOURCE: &str = "Warehouse";

/// Warehouse service owning the warehouse store
#[derive(Clone)]
pub struct WarehouseService {
    store: Store<Warehouse>,
}

/// Input for creating a warehouse
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWarehouseInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub capacity: i64,
    pub location: GeoLocation,
    pub product_id: String,
}

/// Input for updating a warehouse; only supplied fields change.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWarehouseInput {
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub location: Option<GeoLocation>,
    pub available: Option<i64>,
    pub reserved: Option<i64>,
    pub sold: Option<i64>,
    pub product_id: Option<String>,
}

/// Counters returned by a successful reservation
#[derive(Debug, Serialize)]
pub struct ReserveOutcome {
    pub message: String,
    pub available: i64,
    pub reserved: i64,
}

/// Counters returned by a successful sale
#[derive(Debug, Serialize)]
pub struct SellOutcome {
    pub message: String,
    pub reserved: i64,
    pub sold: i64,
}

impl WarehouseService {
    pub fn new(store: Store<Warehouse>) -> Self {
        Self { store }
    }

    /// Create a warehouse; the full capacity starts available.
    pub fn create(&self, input: CreateWarehouseInput) -> AppResult<Warehouse> {
        input.validate()?;
        let now = Utc::now();

        let warehouse = Warehouse {
            id: Uuid::new_v4(),
            name: input.name,
            capacity: input.capacity,
            location: input.location,
            available: input.capacity,
            reserved: 0,
            sold: 0,
            product_id: input.product_id,
            created_at: now,
            updated_at: now,
        };

        self.store.insert(warehouse.id, warehouse.clone());
        Ok(warehouse)
    }

    pub fn list(&self, filter: &WarehouseFilter) -> Vec<Warehouse> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|warehouse| filter.matches(warehouse))
            .collect()
    }

    pub fn get(&self, id: Uuid) -> AppResult<Warehouse> {
        self.store
            .get(&id)
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    /// Partial update. Rejected when the supplied fields would leave the
    /// counters no longer partitioning the capacity.
    pub fn update(&self, id: Uuid, input: UpdateWarehouseInput) -> AppResult<Warehouse> {
        self.store
            .update_with(&id, |warehouse| {
                let mut candidate = warehouse.clone();
                if let Some(name) = input.name {
                    candidate.name = name;
                }
                if let Some(capacity) = input.capacity {
                    candidate.capacity = capacity;
                }
                if let Some(location) = input.location {
                    candidate.location = location;
                }
                if let Some(available) = input.available {
                    candidate.available = available;
                }
                if let Some(reserved) = input.reserved {
                    candidate.reserved = reserved;
                }
                if let Some(sold) = input.sold {
                    candidate.sold = sold;
                }
                if let Some(product_id) = input.product_id {
                    candidate.product_id = product_id;
                }

                if candidate.capacity < 1 {
                    return Err(AppError::Validation {
                        field: "capacity".to_string(),
                        message: "Capacity must be at least 1".to_string(),
                        message_es: "La capacidad debe ser al menos 1".to_string(),
                    });
                }
                if !candidate.counters_consistent() {
                    return Err(AppError::Validation {
                        field: "capacity".to_string(),
                        message: "available + reserved + sold must equal capacity".to_string(),
                        message_es: "disponible + reservada + vendida debe igualar la capacidad"
                            .to_string(),
                    });
                }

                candidate.updated_at = Utc::now();
                *warehouse = candidate.clone();
                Ok(candidate)
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?
    }

    pub fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    pub fn availability(&self, id: Uuid) -> AppResult<WarehouseAvailability> {
        let warehouse = self.get(id)?;
        Ok(WarehouseAvailability::from(&warehouse))
    }

    /// Move `quantity` units from available to reserved.
    pub fn reserve(&self, id: Uuid, quantity: i64) -> AppResult<ReserveOutcome> {
        validate_quantity(quantity)?;
        self.store
            .update_with(&id, |warehouse| {
                if warehouse.available < quantity {
                    return Err(AppError::InsufficientQuantity {
                        message: format!(
                            "Quantity not available. Available: {}",
                            warehouse.available
                        ),
                        message_es: format!(
                            "Cantidad no disponible. Disponible: {}",
                            warehouse.available
                        ),
                    });
                }
                warehouse.available -= quantity;
                warehouse.reserved += quantity;
                warehouse.updated_at = Utc::now();
                Ok(ReserveOutcome {
                    message: format!("Reserved {} units", quantity),
                    available: warehouse.available,
                    reserved: warehouse.reserved,
                })
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?
    }

    /// Move `quantity` units from reserved to sold.
    pub fn sell(&self, id: Uuid, quantity: i64) -> AppResult<SellOutcome> {
        validate_quantity(quantity)?;
        self.store
            .update_with(&id, |warehouse| {
                if warehouse.reserved < quantity {
                    return Err(AppError::InsufficientQuantity {
                        message: format!(
                            "Reserved quantity insufficient. Reserved: {}",
                            warehouse.reserved
                        ),
                        message_es: format!(
                            "Cantidad reservada insuficiente. Reservada: {}",
                            warehouse.reserved
                        ),
                    });
                }
                warehouse.reserved -= quantity;
                warehouse.sold += quantity;
                warehouse.updated_at = Utc::now();
                Ok(SellOutcome {
                    message: format!("Sold {} units", quantity),
                    reserved: warehouse.reserved,
                    sold: warehouse.sold,
                })
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?
    }
}

fn validate_quantity(quantity: i64) -> AppResult<()> {
    shared::validation::validate_positive_quantity(quantity)
        .map_err(|msg| AppError::ValidationError(msg.to_string()))
}
