//! Product catalog tests
//!
//! Covers soft deletion visibility, catalog lookups and the listing
//! default of active products only.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use inventory_platform_backend::error::AppError;
use inventory_platform_backend::external::StockLookup;
use inventory_platform_backend::services::product::{
    CreateProductInput, ProductService, UpdateProductInput,
};
use inventory_platform_backend::store::Store;
use shared::models::{ProductCategory, ProductFilter, UnitOfMeasure};

fn create_input(name: &str, category: ProductCategory, price: Decimal) -> CreateProductInput {
    CreateProductInput {
        name: name.to_string(),
        description: None,
        category,
        unit: UnitOfMeasure::Kilograms,
        price,
        barcode: None,
        unit_weight: None,
        requires_refrigeration: false,
        shelf_life_days: None,
    }
}

fn service() -> ProductService {
    ProductService::new(Store::new())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn create_starts_active() {
        let service = service();
        let product = service
            .create(create_input("Leche Entera", ProductCategory::Dairy, dec!(1250)))
            .unwrap();
        assert!(product.active);
    }

    #[test]
    fn soft_delete_keeps_the_record_retrievable() {
        let service = service();
        let product = service
            .create(create_input("Leche Entera", ProductCategory::Dairy, dec!(1250)))
            .unwrap();

        let outcome = service.deactivate(product.id).unwrap();
        assert!(!outcome.active);

        // still there by direct lookup
        let stored = service.get(product.id).unwrap();
        assert!(!stored.active);

        // excluded from the default active-only listing
        let listed = service.list(&ProductFilter::default());
        assert!(listed.is_empty());

        // visible again when the caller asks for inactive records
        let inactive = service.list(&ProductFilter {
            active: Some(false),
            ..Default::default()
        });
        assert_eq!(inactive.len(), 1);
    }

    #[test]
    fn barcode_lookup_finds_exact_match() {
        let service = service();
        let mut input = create_input("Yogur Natural", ProductCategory::Dairy, dec!(850));
        input.barcode = Some("7801234567890".to_string());
        let product = service.create(input).unwrap();

        let found = service.by_barcode("7801234567890").unwrap();
        assert_eq!(found.id, product.id);

        assert!(matches!(
            service.by_barcode("0000000000000").unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn category_listing_excludes_inactive() {
        let service = service();
        service
            .create(create_input("Queso Fresco", ProductCategory::Dairy, dec!(3200)))
            .unwrap();
        let retired = service
            .create(create_input("Queso Añejo", ProductCategory::Dairy, dec!(5400)))
            .unwrap();
        service.deactivate(retired.id).unwrap();
        service
            .create(create_input("Manzana Fuji", ProductCategory::Fruits, dec!(990)))
            .unwrap();

        let dairy = service.by_category(ProductCategory::Dairy);
        assert_eq!(dairy.len(), 1);
        assert_eq!(dairy[0].name, "Queso Fresco");
    }

    #[test]
    fn refrigerated_listing_covers_active_flagged_products() {
        let service = service();
        let mut input = create_input("Merluza Fresca", ProductCategory::Meat, dec!(6500));
        input.requires_refrigeration = true;
        service.create(input).unwrap();
        service
            .create(create_input("Arroz Grado 1", ProductCategory::Dry, dec!(1500)))
            .unwrap();

        let refrigerated = service.refrigerated();
        assert_eq!(refrigerated.len(), 1);
        assert_eq!(refrigerated[0].name, "Merluza Fresca");
    }

    #[test]
    fn update_overwrites_only_supplied_fields() {
        let service = service();
        let product = service
            .create(create_input("Leche Entera", ProductCategory::Dairy, dec!(1250)))
            .unwrap();

        let updated = service
            .update(
                product.id,
                UpdateProductInput {
                    price: Some(dec!(1390)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.price, dec!(1390));
        assert_eq!(updated.name, "Leche Entera");
        assert_eq!(updated.category, ProductCategory::Dairy);
    }

    #[test]
    fn negative_price_is_rejected() {
        let service = service();
        assert!(service
            .create(create_input("Gratis", ProductCategory::Other, dec!(-1)))
            .is_err());
    }

    #[test]
    fn price_filter_bounds_are_inclusive() {
        let service = service();
        service
            .create(create_input("Barato", ProductCategory::Other, dec!(100)))
            .unwrap();
        service
            .create(create_input("Caro", ProductCategory::Other, dec!(900)))
            .unwrap();

        let filter = ProductFilter {
            price_min: Some(dec!(100)),
            price_max: Some(dec!(100)),
            ..Default::default()
        };
        let listed = service.list(&filter);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Barato");
    }

    struct TenUnits;

    impl StockLookup for TenUnits {
        fn stock_on_hand(&self, _product_id: &str) -> i64 {
            10
        }
    }

    #[test]
    fn stock_report_values_inventory_at_list_price() {
        let service = service();
        let product = service
            .create(create_input("Leche Entera", ProductCategory::Dairy, dec!(1250)))
            .unwrap();

        let stock = service.stock(product.id, &TenUnits).unwrap();
        assert_eq!(stock.stock_on_hand, 10);
        assert_eq!(stock.inventory_value, dec!(12500));
    }

    #[test]
    fn stats_cover_active_products_only() {
        let service = service();
        let mut cold = create_input("Merluza Fresca", ProductCategory::Meat, dec!(6000));
        cold.requires_refrigeration = true;
        service.create(cold).unwrap();
        service
            .create(create_input("Arroz Grado 1", ProductCategory::Dry, dec!(2000)))
            .unwrap();
        let retired = service
            .create(create_input("Descontinuado", ProductCategory::Other, dec!(99999)))
            .unwrap();
        service.deactivate(retired.id).unwrap();

        let stats = service.stats();
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.refrigerated_products, 1);
        assert_eq!(stats.average_price, dec!(4000.00));
        assert_eq!(stats.products_by_category.get("meat"), Some(&1));
        assert_eq!(stats.products_by_category.get("dry"), Some(&1));
        assert!(stats.products_by_category.get("other").is_none());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Each added filter criterion narrows or preserves the result set.
    #[test]
    fn prop_filters_narrow_monotonically(
        prices in prop::collection::vec(1i64..10_000, 1..20),
        cutoff in 1i64..10_000
    ) {
        let service = service();
        for (index, price) in prices.iter().enumerate() {
            service
                .create(create_input(
                    &format!("Producto {}", index),
                    ProductCategory::Food,
                    Decimal::from(*price),
                ))
                .unwrap();
        }

        let all = service.list(&ProductFilter::default());
        let capped = service.list(&ProductFilter {
            price_max: Some(Decimal::from(cutoff)),
            ..Default::default()
        });
        let capped_and_named = service.list(&ProductFilter {
            price_max: Some(Decimal::from(cutoff)),
            name: Some("Producto 1".to_string()),
            ..Default::default()
        });

        prop_assert!(capped.len() <= all.len());
        prop_assert!(capped_and_named.len() <= capped.len());
        prop_assert_eq!(all.len(), prices.len());
    }

    /// Soft deletion never loses a record; direct lookup always works.
    #[test]
    fn prop_soft_delete_preserves_lookup(count in 1usize..10) {
        let service = service();
        let mut ids = Vec::new();
        for index in 0..count {
            let product = service
                .create(create_input(
                    &format!("Producto {}", index),
                    ProductCategory::Food,
                    dec!(100),
                ))
                .unwrap();
            ids.push(product.id);
        }

        for id in &ids {
            service.deactivate(*id).unwrap();
        }

        prop_assert!(service.list(&ProductFilter::default()).is_empty());
        for id in &ids {
            prop_assert!(service.get(*id).is_ok());
        }
    }
}
