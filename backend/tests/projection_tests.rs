//! Demand projection tests
//!
//! Covers the derived demand rates, the lifecycle, window queries and
//! the demand alert sweep.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use inventory_platform_backend::error::AppError;
use inventory_platform_backend::external::FixedStockLookup;
use inventory_platform_backend::services::projection::{
    CreateProjectionInput, ProjectionService, UpdateProjectionInput,
};
use inventory_platform_backend::store::Store;
use shared::models::{DemandAlertKind, ProjectionFilter, ProjectionStatus, ProjectionType};
use shared::types::Priority;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn create_input(
    product_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    estimated: i64,
) -> CreateProjectionInput {
    CreateProjectionInput {
        product_id: product_id.to_string(),
        start_date: start,
        end_date: end,
        projection_type: ProjectionType::Weekly,
        estimated_demand: estimated,
        unit: "kg".to_string(),
        methodology: None,
        factors: vec![],
        confidence_percent: Some(85.0),
    }
}

fn service() -> ProjectionService {
    ProjectionService::new(Store::new())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn seven_day_projection_rates() {
        let service = service();
        let projection = service
            .create(create_input(
                "prod-1",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
                700,
            ))
            .unwrap();

        assert_eq!(projection.duration_days, 7);
        assert_eq!(projection.daily_demand, 100.0);
        assert_eq!(projection.weekly_demand, 700.0);
        assert_eq!(projection.monthly_demand, 3000.0);
        assert_eq!(projection.projection.status, ProjectionStatus::Draft);
        assert_eq!(projection.projection.methodology, "historical");
    }

    #[test]
    fn inverted_date_window_is_rejected() {
        let service = service();
        let err = service
            .create(create_input(
                "prod-1",
                today(),
                today() - Duration::days(1),
                100,
            ))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn confidence_outside_percent_band_is_rejected() {
        let service = service();
        let mut input = create_input("prod-1", today(), today() + Duration::days(6), 100);
        input.confidence_percent = Some(101.0);
        assert!(service.create(input).is_err());
    }

    #[test]
    fn update_cannot_invert_the_window() {
        let service = service();
        let projection = service
            .create(create_input("prod-1", today(), today() + Duration::days(6), 100))
            .unwrap();

        let err = service
            .update(
                projection.projection.id,
                UpdateProjectionInput {
                    end_date: Some(today() - Duration::days(3)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        // the failed update left the record untouched
        let stored = service.get(projection.projection.id).unwrap();
        assert_eq!(stored.projection.end_date, today() + Duration::days(6));
    }

    #[test]
    fn lifecycle_is_directly_settable() {
        let service = service();
        let projection = service
            .create(create_input("prod-1", today(), today() + Duration::days(6), 100))
            .unwrap();

        let activated = service.activate(projection.projection.id).unwrap();
        assert_eq!(activated.status, ProjectionStatus::Active);

        let archived = service.archive(projection.projection.id).unwrap();
        assert_eq!(archived.status, ProjectionStatus::Archived);
    }

    #[test]
    fn current_requires_active_status_and_window_overlap() {
        let service = service();

        let current = service
            .create(create_input(
                "in-window",
                today() - Duration::days(1),
                today() + Duration::days(1),
                100,
            ))
            .unwrap();
        service.activate(current.projection.id).unwrap();

        let past = service
            .create(create_input(
                "past",
                today() - Duration::days(10),
                today() - Duration::days(5),
                100,
            ))
            .unwrap();
        service.activate(past.projection.id).unwrap();

        // in window but still draft
        service
            .create(create_input(
                "draft",
                today() - Duration::days(1),
                today() + Duration::days(1),
                100,
            ))
            .unwrap();

        let listed = service.current(today());
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].projection.product_id, "in-window");
    }

    #[test]
    fn demand_alert_decision_table() {
        let service = service();
        let stock = FixedStockLookup::new(1000);

        let activate_with_demand = |product: &str, estimated: i64| {
            let projection = service
                .create(create_input(
                    product,
                    today() - Duration::days(1),
                    today() + Duration::days(5),
                    estimated,
                ))
                .unwrap();
            service.activate(projection.projection.id).unwrap();
        };

        activate_with_demand("severe-shortfall", 2500); // gap 1500 > 1250
        activate_with_demand("mild-shortfall", 1600); // gap 600 <= 800
        activate_with_demand("low-demand", 100); // 100 < 200
        activate_with_demand("balanced", 500); // no alert

        let alerts = service.demand_alerts(&stock, today());
        assert_eq!(alerts.len(), 3);

        assert_eq!(alerts[0].product_id, "severe-shortfall");
        assert_eq!(alerts[0].kind, DemandAlertKind::StockShortfall);
        assert_eq!(alerts[0].criticality, Priority::Alta);
        assert_eq!(alerts[0].difference, -1500);

        assert_eq!(alerts[1].product_id, "mild-shortfall");
        assert_eq!(alerts[1].criticality, Priority::Media);

        assert_eq!(alerts[2].product_id, "low-demand");
        assert_eq!(alerts[2].kind, DemandAlertKind::LowDemand);
        assert_eq!(alerts[2].criticality, Priority::Baja);
    }

    #[test]
    fn demand_alerts_ignore_out_of_window_projections() {
        let service = service();
        let stock = FixedStockLookup::new(1000);

        let projection = service
            .create(create_input(
                "future",
                today() + Duration::days(10),
                today() + Duration::days(20),
                5000,
            ))
            .unwrap();
        service.activate(projection.projection.id).unwrap();

        assert!(service.demand_alerts(&stock, today()).is_empty());
    }

    #[test]
    fn product_summary_aggregates_projections() {
        let service = service();
        service
            .create(create_input(
                "prod-1",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
                700,
            ))
            .unwrap();
        service
            .create(create_input(
                "prod-1",
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(),
                1400,
            ))
            .unwrap();
        service
            .create(create_input(
                "prod-2",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
                100,
            ))
            .unwrap();

        let summary = service.product_summary("prod-1").unwrap();
        assert_eq!(summary.projections.len(), 2);
        assert_eq!(summary.total_estimated_demand, 2100);
        assert_eq!(summary.total_period_days, 21);
        assert_eq!(summary.average_confidence, 85.0);

        assert!(matches!(
            service.product_summary("ghost").unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn filters_narrow_by_status_and_product() {
        let service = service();
        let active = service
            .create(create_input("prod-1", today(), today() + Duration::days(6), 100))
            .unwrap();
        service.activate(active.projection.id).unwrap();
        service
            .create(create_input("prod-1", today(), today() + Duration::days(6), 200))
            .unwrap();

        let all = service.list(&ProjectionFilter::default());
        assert_eq!(all.len(), 2);

        let active_only = service.list(&ProjectionFilter {
            active_only: Some(true),
            ..Default::default()
        });
        assert_eq!(active_only.len(), 1);

        let none = service.list(&ProjectionFilter {
            product_id: Some("prod-2".to_string()),
            ..Default::default()
        });
        assert!(none.is_empty());
    }

    #[test]
    fn stats_cover_active_projections_only() {
        let service = service();
        let active = service
            .create(create_input("prod-1", today(), today() + Duration::days(6), 700))
            .unwrap();
        service.activate(active.projection.id).unwrap();
        service
            .create(create_input("prod-2", today(), today() + Duration::days(6), 9000))
            .unwrap();

        let stats = service.stats();
        assert_eq!(stats.active_projections, 1);
        assert_eq!(stats.total_estimated_demand, 700);
        assert_eq!(stats.average_demand, 700.0);
        assert_eq!(stats.average_confidence, 85.0);
        assert_eq!(stats.projections_by_type.get("weekly"), Some(&1));
        assert_eq!(stats.demand_by_type.get("weekly"), Some(&700));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Weekly and monthly rates are exact multiples of the daily rate
    /// before rounding, and the daily rate scales with the window.
    #[test]
    fn prop_demand_rates_scale_with_window(
        estimated in 1i64..100_000,
        span in 0i64..365
    ) {
        let service = service();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let projection = service
            .create(create_input("prod-1", start, start + Duration::days(span), estimated))
            .unwrap();

        prop_assert_eq!(projection.duration_days, span + 1);
        let daily = estimated as f64 / (span + 1) as f64;
        prop_assert!((projection.daily_demand - daily).abs() <= 0.005);
        prop_assert!((projection.weekly_demand - daily * 7.0).abs() <= 0.005 * 7.0);
        prop_assert!((projection.monthly_demand - daily * 30.0).abs() <= 0.005 * 30.0);
    }

    /// Demand alerts always come out grouped by descending criticality.
    #[test]
    fn prop_demand_alerts_sorted_by_criticality(
        demands in prop::collection::vec(1i64..5_000, 1..12)
    ) {
        let service = service();
        let stock = FixedStockLookup::new(1000);
        for (index, estimated) in demands.iter().enumerate() {
            let projection = service
                .create(create_input(
                    &format!("prod-{}", index),
                    today() - Duration::days(1),
                    today() + Duration::days(5),
                    *estimated,
                ))
                .unwrap();
            service.activate(projection.projection.id).unwrap();
        }

        let alerts = service.demand_alerts(&stock, today());
        for pair in alerts.windows(2) {
            prop_assert!(pair[0].criticality.rank() <= pair[1].criticality.rank());
        }
    }
}
