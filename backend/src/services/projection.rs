//! Demand projection service: projections, lifecycle and demand alerts

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::StockLookup;
use crate::models::{
    classify_demand, DemandAlert, ProductProjectionSummary, Projection, ProjectionFilter,
    ProjectionStatus, ProjectionType, ProjectionWithMetrics,
};
use crate::store::Store;

const RESOURCE: &str = "Projection";

/// Projection service owning the projection store
#[derive(Clone)]
pub struct ProjectionService {
    store: Store<Projection>,
}

/// Input for creating a projection
#[derive(Debug, Deserialize)]
pub struct CreateProjectionInput {
    pub product_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub projection_type: ProjectionType,
    pub estimated_demand: i64,
    pub unit: String,
    pub methodology: Option<String>,
    #[serde(default)]
    pub factors: Vec<String>,
    pub confidence_percent: Option<f64>,
}

/// Input for updating a projection; only supplied fields change.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProjectionInput {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub projection_type: Option<ProjectionType>,
    pub estimated_demand: Option<i64>,
    pub methodology: Option<String>,
    pub factors: Option<Vec<String>>,
    pub confidence_percent: Option<f64>,
    pub status: Option<ProjectionStatus>,
}

/// Result of a projection state change
#[derive(Debug, Serialize)]
pub struct ProjectionStateOutcome {
    pub message: String,
    pub status: ProjectionStatus,
}

/// Demand rollup across active projections
#[derive(Debug, Serialize)]
pub struct ProjectionStatsReport {
    pub active_projections: usize,
    pub total_estimated_demand: i64,
    pub average_demand: f64,
    pub average_confidence: f64,
    pub projections_by_type: BTreeMap<String, usize>,
    pub demand_by_type: BTreeMap<String, i64>,
    pub generated_at: DateTime<Utc>,
}

impl ProjectionService {
    pub fn new(store: Store<Projection>) -> Self {
        Self { store }
    }

    /// Create a projection in draft. The date window must be ordered so
    /// the derived daily rate is always well defined.
    pub fn create(&self, input: CreateProjectionInput) -> AppResult<ProjectionWithMetrics> {
        shared::validation::validate_date_range(input.start_date, input.end_date).map_err(
            |msg| AppError::Validation {
                field: "end_date".to_string(),
                message: msg.to_string(),
                message_es: "La fecha de fin no puede ser anterior a la de inicio".to_string(),
            },
        )?;
        if let Some(confidence) = input.confidence_percent {
            shared::validation::validate_percent(confidence).map_err(|msg| {
                AppError::Validation {
                    field: "confidence_percent".to_string(),
                    message: msg.to_string(),
                    message_es: "La confianza debe estar entre 0 y 100".to_string(),
                }
            })?;
        }
        let now = Utc::now();

        let projection = Projection {
            id: Uuid::new_v4(),
            product_id: input.product_id,
            start_date: input.start_date,
            end_date: input.end_date,
            projection_type: input.projection_type,
            estimated_demand: input.estimated_demand,
            unit: input.unit,
            methodology: input.methodology.unwrap_or_else(|| "historical".to_string()),
            factors: input.factors,
            confidence_percent: input.confidence_percent,
            status: ProjectionStatus::Draft,
            created_at: now,
            updated_at: now,
        };

        self.store.insert(projection.id, projection.clone());
        Ok(ProjectionWithMetrics::new(projection))
    }

    pub fn list(&self, filter: &ProjectionFilter) -> Vec<ProjectionWithMetrics> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|projection| filter.matches(projection))
            .map(ProjectionWithMetrics::new)
            .collect()
    }

    pub fn get(&self, id: Uuid) -> AppResult<ProjectionWithMetrics> {
        self.store
            .get(&id)
            .map(ProjectionWithMetrics::new)
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    pub fn update(
        &self,
        id: Uuid,
        input: UpdateProjectionInput,
    ) -> AppResult<ProjectionWithMetrics> {
        let updated = self
            .store
            .update_with(&id, |projection| {
                let mut candidate = projection.clone();
                if let Some(start_date) = input.start_date {
                    candidate.start_date = start_date;
                }
                if let Some(end_date) = input.end_date {
                    candidate.end_date = end_date;
                }
                if let Some(projection_type) = input.projection_type {
                    candidate.projection_type = projection_type;
                }
                if let Some(estimated_demand) = input.estimated_demand {
                    candidate.estimated_demand = estimated_demand;
                }
                if let Some(methodology) = input.methodology.clone() {
                    candidate.methodology = methodology;
                }
                if let Some(factors) = input.factors.clone() {
                    candidate.factors = factors;
                }
                if let Some(confidence_percent) = input.confidence_percent {
                    candidate.confidence_percent = Some(confidence_percent);
                }
                if let Some(status) = input.status {
                    candidate.status = status;
                }

                shared::validation::validate_date_range(candidate.start_date, candidate.end_date)
                    .map_err(|msg| AppError::Validation {
                        field: "end_date".to_string(),
                        message: msg.to_string(),
                        message_es: "La fecha de fin no puede ser anterior a la de inicio"
                            .to_string(),
                    })?;

                candidate.updated_at = Utc::now();
                *projection = candidate.clone();
                Ok::<_, AppError>(candidate)
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))??;
        Ok(ProjectionWithMetrics::new(updated))
    }

    pub fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    pub fn activate(&self, id: Uuid) -> AppResult<ProjectionStateOutcome> {
        self.set_status(id, ProjectionStatus::Active, "activated")
    }

    pub fn archive(&self, id: Uuid) -> AppResult<ProjectionStateOutcome> {
        self.set_status(id, ProjectionStatus::Archived, "archived")
    }

    fn set_status(
        &self,
        id: Uuid,
        status: ProjectionStatus,
        verb: &str,
    ) -> AppResult<ProjectionStateOutcome> {
        self.store
            .update_with(&id, |projection| {
                projection.status = status;
                projection.updated_at = Utc::now();
                ProjectionStateOutcome {
                    message: format!("Projection {} {}", projection.id, verb),
                    status,
                }
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    /// Active projections whose window covers today.
    pub fn current(&self, today: NaiveDate) -> Vec<ProjectionWithMetrics> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|projection| {
                projection.status == ProjectionStatus::Active && projection.is_in_window(today)
            })
            .map(ProjectionWithMetrics::new)
            .collect()
    }

    /// All projections of one product with an aggregated rollup. Not
    /// found when the product has no projections at all.
    pub fn product_summary(&self, product_id: &str) -> AppResult<ProductProjectionSummary> {
        let projections: Vec<ProjectionWithMetrics> = self
            .store
            .snapshot()
            .into_iter()
            .filter(|projection| projection.product_id == product_id)
            .map(ProjectionWithMetrics::new)
            .collect();

        if projections.is_empty() {
            return Err(AppError::NotFound(format!(
                "Projections for product {}",
                product_id
            )));
        }

        let total_estimated_demand = projections
            .iter()
            .map(|p| p.projection.estimated_demand)
            .sum();
        let total_period_days = projections.iter().map(|p| p.duration_days).sum();
        let confidences: Vec<f64> = projections
            .iter()
            .filter_map(|p| p.projection.confidence_percent)
            .collect();
        let average_confidence = if confidences.is_empty() {
            0.0
        } else {
            shared::types::round2(confidences.iter().sum::<f64>() / confidences.len() as f64)
        };

        Ok(ProductProjectionSummary {
            product_id: product_id.to_string(),
            projections,
            total_estimated_demand,
            total_period_days,
            average_confidence,
        })
    }

    /// Sweep comparing in-window active projections against the stock
    /// collaborator, most critical first.
    pub fn demand_alerts(&self, stock: &dyn StockLookup, today: NaiveDate) -> Vec<DemandAlert> {
        let now = Utc::now();
        let mut alerts = Vec::new();

        for projection in self.store.snapshot() {
            if projection.status != ProjectionStatus::Active || !projection.is_in_window(today) {
                continue;
            }
            let stock_on_hand = stock.stock_on_hand(&projection.product_id);
            if let Some((kind, criticality)) =
                classify_demand(projection.estimated_demand, stock_on_hand)
            {
                alerts.push(DemandAlert {
                    product_id: projection.product_id.clone(),
                    kind,
                    projected_demand: projection.estimated_demand,
                    stock_on_hand,
                    difference: stock_on_hand - projection.estimated_demand,
                    criticality,
                    raised_at: now,
                });
            }
        }

        alerts.sort_by_key(|alert| alert.criticality.rank());
        alerts
    }

    pub fn stats(&self) -> ProjectionStatsReport {
        let active: Vec<Projection> = self
            .store
            .snapshot()
            .into_iter()
            .filter(|projection| projection.status == ProjectionStatus::Active)
            .collect();

        let mut projections_by_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut demand_by_type: BTreeMap<String, i64> = BTreeMap::new();
        for projection in &active {
            let key = projection.projection_type.as_str().to_string();
            *projections_by_type.entry(key.clone()).or_default() += 1;
            *demand_by_type.entry(key).or_default() += projection.estimated_demand;
        }

        let total_estimated_demand: i64 = active.iter().map(|p| p.estimated_demand).sum();
        let average_demand = if active.is_empty() {
            0.0
        } else {
            shared::types::round2(total_estimated_demand as f64 / active.len() as f64)
        };
        let confidences: Vec<f64> = active
            .iter()
            .filter_map(|p| p.confidence_percent)
            .collect();
        let average_confidence = if confidences.is_empty() {
            0.0
        } else {
            shared::types::round2(confidences.iter().sum::<f64>() / confidences.len() as f64)
        };

        ProjectionStatsReport {
            active_projections: active.len(),
            total_estimated_demand,
            average_demand,
            average_confidence,
            projections_by_type,
            demand_by_type,
            generated_at: Utc::now(),
        }
    }
}
