//! Warehouse management tests
//!
//! Covers counter conservation under reserve/sell sequences, guard
//! failures leaving state untouched, and filter narrowing.

use proptest::prelude::*;

use inventory_platform_backend::error::AppError;
use inventory_platform_backend::services::warehouse::{
    CreateWarehouseInput, UpdateWarehouseInput, WarehouseService,
};
use inventory_platform_backend::store::Store;
use shared::models::WarehouseFilter;
use shared::types::GeoLocation;

fn location() -> GeoLocation {
    GeoLocation {
        latitude: -33.45,
        longitude: -70.66,
        address: "Av. Principal 123".to_string(),
        city: "Santiago".to_string(),
        country: "Chile".to_string(),
    }
}

fn create_input(name: &str, capacity: i64) -> CreateWarehouseInput {
    CreateWarehouseInput {
        name: name.to_string(),
        capacity,
        location: location(),
        product_id: "prod-1".to_string(),
    }
}

fn service() -> WarehouseService {
    WarehouseService::new(Store::new())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn create_starts_fully_available() {
        let service = service();
        let warehouse = service.create(create_input("Bodega Central", 500)).unwrap();

        assert_eq!(warehouse.capacity, 500);
        assert_eq!(warehouse.available, 500);
        assert_eq!(warehouse.reserved, 0);
        assert_eq!(warehouse.sold, 0);
    }

    #[test]
    fn create_rejects_non_positive_capacity() {
        let service = service();
        assert!(service.create(create_input("Bodega Vacía", 0)).is_err());
    }

    #[test]
    fn reserve_moves_available_to_reserved() {
        let service = service();
        let warehouse = service.create(create_input("Bodega Central", 100)).unwrap();

        let outcome = service.reserve(warehouse.id, 30).unwrap();
        assert_eq!(outcome.available, 70);
        assert_eq!(outcome.reserved, 30);

        let stored = service.get(warehouse.id).unwrap();
        assert_eq!(stored.available + stored.reserved + stored.sold, 100);
    }

    #[test]
    fn sell_moves_reserved_to_sold() {
        let service = service();
        let warehouse = service.create(create_input("Bodega Central", 100)).unwrap();
        service.reserve(warehouse.id, 40).unwrap();

        let outcome = service.sell(warehouse.id, 25).unwrap();
        assert_eq!(outcome.reserved, 15);
        assert_eq!(outcome.sold, 25);

        let stored = service.get(warehouse.id).unwrap();
        assert_eq!(stored.available + stored.reserved + stored.sold, 100);
    }

    #[test]
    fn reserve_beyond_available_fails_and_leaves_counters() {
        let service = service();
        let warehouse = service.create(create_input("Bodega Central", 50)).unwrap();
        service.reserve(warehouse.id, 50).unwrap();

        let err = service.reserve(warehouse.id, 1).unwrap_err();
        assert!(matches!(err, AppError::InsufficientQuantity { .. }));

        let stored = service.get(warehouse.id).unwrap();
        assert_eq!(stored.available, 0);
        assert_eq!(stored.reserved, 50);
        assert_eq!(stored.sold, 0);
    }

    #[test]
    fn sell_beyond_reserved_fails_and_leaves_counters() {
        let service = service();
        let warehouse = service.create(create_input("Bodega Central", 50)).unwrap();
        service.reserve(warehouse.id, 10).unwrap();

        let err = service.sell(warehouse.id, 11).unwrap_err();
        assert!(matches!(err, AppError::InsufficientQuantity { .. }));

        let stored = service.get(warehouse.id).unwrap();
        assert_eq!(stored.available, 40);
        assert_eq!(stored.reserved, 10);
        assert_eq!(stored.sold, 0);
    }

    #[test]
    fn zero_quantity_operations_are_rejected() {
        let service = service();
        let warehouse = service.create(create_input("Bodega Central", 50)).unwrap();
        assert!(service.reserve(warehouse.id, 0).is_err());
        assert!(service.sell(warehouse.id, -5).is_err());
    }

    #[test]
    fn availability_reports_occupancy() {
        let service = service();
        let warehouse = service.create(create_input("Bodega Central", 300)).unwrap();
        service.reserve(warehouse.id, 200).unwrap();

        let report = service.availability(warehouse.id).unwrap();
        assert_eq!(report.total_capacity, 300);
        assert_eq!(report.available, 100);
        assert_eq!(report.occupancy_percent, 66.67);
    }

    #[test]
    fn update_rejects_inconsistent_counters() {
        let service = service();
        let warehouse = service.create(create_input("Bodega Central", 100)).unwrap();

        let err = service
            .update(
                warehouse.id,
                UpdateWarehouseInput {
                    available: Some(90),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        // capacity and counters changed together is accepted
        let updated = service
            .update(
                warehouse.id,
                UpdateWarehouseInput {
                    capacity: Some(120),
                    available: Some(120),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.capacity, 120);
        assert_eq!(updated.available, 120);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let service = service();
        let err = service.get(uuid::Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn delete_removes_the_record() {
        let service = service();
        let warehouse = service.create(create_input("Bodega Central", 100)).unwrap();
        service.delete(warehouse.id).unwrap();
        assert!(service.get(warehouse.id).is_err());
    }

    #[test]
    fn filters_narrow_monotonically() {
        let service = service();
        service.create(create_input("Bodega Central", 500)).unwrap();
        service.create(create_input("Bodega Norte", 200)).unwrap();
        service.create(create_input("Frigorífico Sur", 800)).unwrap();

        let all = service.list(&WarehouseFilter::default());
        assert_eq!(all.len(), 3);

        let by_name = service.list(&WarehouseFilter {
            name: Some("bodega".to_string()),
            ..Default::default()
        });
        assert_eq!(by_name.len(), 2);
        assert!(by_name.len() <= all.len());

        let narrowed = service.list(&WarehouseFilter {
            name: Some("bodega".to_string()),
            capacity_min: Some(400),
            ..Default::default()
        });
        assert_eq!(narrowed.len(), 1);
        assert!(narrowed.len() <= by_name.len());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Reserve(i64),
    Sell(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1i64..200).prop_map(Op::Reserve),
        (1i64..200).prop_map(Op::Sell),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Counters always partition the capacity, whatever sequence of
    /// reserve/sell operations runs and whichever of them fail.
    #[test]
    fn prop_counters_partition_capacity(
        capacity in 1i64..1000,
        ops in prop::collection::vec(op_strategy(), 1..30)
    ) {
        let service = service();
        let warehouse = service.create(create_input("Bodega", capacity)).unwrap();

        for op in ops {
            match op {
                Op::Reserve(quantity) => { let _ = service.reserve(warehouse.id, quantity); }
                Op::Sell(quantity) => { let _ = service.sell(warehouse.id, quantity); }
            }
            let stored = service.get(warehouse.id).unwrap();
            prop_assert_eq!(stored.available + stored.reserved + stored.sold, capacity);
            prop_assert!(stored.available >= 0);
            prop_assert!(stored.reserved >= 0);
            prop_assert!(stored.sold >= 0);
        }
    }

    /// A reservation within the available balance always succeeds; one
    /// beyond it always fails without effect.
    #[test]
    fn prop_reserve_guard_is_exact(
        capacity in 1i64..1000,
        quantity in 1i64..2000
    ) {
        let service = service();
        let warehouse = service.create(create_input("Bodega", capacity)).unwrap();

        let result = service.reserve(warehouse.id, quantity);
        let stored = service.get(warehouse.id).unwrap();
        if quantity <= capacity {
            prop_assert!(result.is_ok());
            prop_assert_eq!(stored.reserved, quantity);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(stored.available, capacity);
            prop_assert_eq!(stored.reserved, 0);
        }
    }
}
