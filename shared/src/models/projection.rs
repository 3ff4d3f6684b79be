//! Demand projection model: date window, derived demand rates and the
//! projection lifecycle

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{round2, Priority};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionType {
    Weekly,
    Monthly,
    Quarterly,
    Annual,
}

impl ProjectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionType::Weekly => "weekly",
            ProjectionType::Monthly => "monthly",
            ProjectionType::Quarterly => "quarterly",
            ProjectionType::Annual => "annual",
        }
    }
}

/// Projection lifecycle: draft -> active -> archived, each a direct
/// settable transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionStatus {
    Draft,
    Active,
    Archived,
}

impl ProjectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionStatus::Draft => "draft",
            ProjectionStatus::Active => "active",
            ProjectionStatus::Archived => "archived",
        }
    }
}

/// An estimated-demand projection for a product over a date window.
///
/// Creation rejects `end_date < start_date`, so `duration_days() >= 1`
/// for every stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub id: Uuid,
    pub product_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub projection_type: ProjectionType,
    pub estimated_demand: i64,
    pub unit: String,
    pub methodology: String,
    pub factors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_percent: Option<f64>,
    pub status: ProjectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Projection {
    /// Inclusive day count of the projection window.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn daily_demand(&self) -> f64 {
        let days = self.duration_days();
        if days <= 0 {
            return 0.0;
        }
        self.estimated_demand as f64 / days as f64
    }

    pub fn weekly_demand(&self) -> f64 {
        self.daily_demand() * 7.0
    }

    pub fn monthly_demand(&self) -> f64 {
        self.daily_demand() * 30.0
    }

    /// Whether the window covers the given date (inclusive bounds).
    pub fn is_in_window(&self, today: NaiveDate) -> bool {
        self.start_date <= today && today <= self.end_date
    }
}

/// Projection enriched with its derived demand rates
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionWithMetrics {
    #[serde(flatten)]
    pub projection: Projection,
    pub duration_days: i64,
    pub daily_demand: f64,
    pub weekly_demand: f64,
    pub monthly_demand: f64,
}

impl ProjectionWithMetrics {
    pub fn new(projection: Projection) -> Self {
        let duration_days = projection.duration_days();
        let daily_demand = round2(projection.daily_demand());
        let weekly_demand = round2(projection.weekly_demand());
        let monthly_demand = round2(projection.monthly_demand());
        Self {
            projection,
            duration_days,
            daily_demand,
            weekly_demand,
            monthly_demand,
        }
    }
}

/// Optional listing criteria; absent fields impose no constraint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProjectionFilter {
    pub product_id: Option<String>,
    pub projection_type: Option<ProjectionType>,
    pub status: Option<ProjectionStatus>,
    pub start_from: Option<NaiveDate>,
    pub start_to: Option<NaiveDate>,
    pub active_only: Option<bool>,
}

impl ProjectionFilter {
    pub fn matches(&self, projection: &Projection) -> bool {
        if let Some(product_id) = &self.product_id {
            if &projection.product_id != product_id {
                return false;
            }
        }
        if let Some(projection_type) = self.projection_type {
            if projection.projection_type != projection_type {
                return false;
            }
        }
        if let Some(status) = self.status {
            if projection.status != status {
                return false;
            }
        }
        if let Some(from) = self.start_from {
            if projection.start_date < from {
                return false;
            }
        }
        if let Some(to) = self.start_to {
            if projection.start_date > to {
                return false;
            }
        }
        if self.active_only.unwrap_or(false) && projection.status != ProjectionStatus::Active {
            return false;
        }
        true
    }
}

/// Kinds of demand advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DemandAlertKind {
    #[serde(rename = "STOCK_INSUFICIENTE")]
    StockShortfall,
    #[serde(rename = "DEMANDA_ALTA")]
    HighDemand,
    #[serde(rename = "DEMANDA_BAJA")]
    LowDemand,
}

/// Advisory raised by the demand sweep
#[derive(Debug, Clone, Serialize)]
pub struct DemandAlert {
    pub product_id: String,
    pub kind: DemandAlertKind,
    pub projected_demand: i64,
    pub stock_on_hand: i64,
    pub difference: i64,
    pub criticality: Priority,
    pub raised_at: DateTime<Utc>,
}

/// Decision table comparing projected demand against stock on hand.
///
/// A shortfall (stock below demand) is ALTA when it exceeds half the
/// projected demand. Otherwise demand above 1.5x stock is high, below
/// 0.2x stock is low, and anything in between raises nothing.
pub fn classify_demand(estimated_demand: i64, stock_on_hand: i64) -> Option<(DemandAlertKind, Priority)> {
    let difference = stock_on_hand - estimated_demand;
    if difference < 0 {
        let criticality = if (-difference) as f64 > estimated_demand as f64 * 0.5 {
            Priority::Alta
        } else {
            Priority::Media
        };
        Some((DemandAlertKind::StockShortfall, criticality))
    } else if estimated_demand as f64 > stock_on_hand as f64 * 1.5 {
        Some((DemandAlertKind::HighDemand, Priority::Media))
    } else if (estimated_demand as f64) < stock_on_hand as f64 * 0.2 {
        Some((DemandAlertKind::LowDemand, Priority::Baja))
    } else {
        None
    }
}

/// Aggregated projection report for one product
#[derive(Debug, Clone, Serialize)]
pub struct ProductProjectionSummary {
    pub product_id: String,
    pub projections: Vec<ProjectionWithMetrics>,
    pub total_estimated_demand: i64,
    pub total_period_days: i64,
    pub average_confidence: f64,
}
