//! Supplier management service: registry, certifications, evaluations
//! and lifecycle states

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::PurchaseHistoryLookup;
use crate::models::{
    certification_priority, Certification, CertificationAlert, CertificationKind,
    CertificationWithStatus, DeliveryTerms, Evaluation, Supplier, SupplierFilter, SupplierStats,
    SupplierStatus, SupplierView,
};
use crate::store::Store;

const RESOURCE: &str = "Supplier";

/// Supplier service owning the supplier store
#[derive(Clone)]
pub struct SupplierService {
    store: Store<Supplier>,
}

/// Input for creating a supplier
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSupplierInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub tax_id: String,
    pub contact_person: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub delivery_terms: DeliveryTerms,
}

/// Input for updating a supplier; only supplied fields change.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSupplierInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub contact_person: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub delivery_terms: Option<DeliveryTerms>,
}

/// Input for registering a certification
#[derive(Debug, Deserialize)]
pub struct AddCertificationInput {
    pub kind: CertificationKind,
    pub issuer: String,
    pub certificate_number: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

/// Input for registering an evaluation
#[derive(Debug, Deserialize)]
pub struct AddEvaluationInput {
    pub quality: i32,
    pub punctuality: i32,
    pub service: i32,
    pub price: i32,
    pub comment: Option<String>,
}

/// Result of registering an evaluation
#[derive(Debug, Serialize)]
pub struct EvaluationOutcome {
    pub message: String,
    pub new_rating: f64,
}

/// Result of a supplier state change
#[derive(Debug, Serialize)]
pub struct SupplierStateOutcome {
    pub message: String,
    pub status: SupplierStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Count/rating rollup across all suppliers
#[derive(Debug, Serialize)]
pub struct SupplierStatsReport {
    pub total_suppliers: usize,
    pub active_suppliers: usize,
    pub overall_average_rating: f64,
    pub current_certifications: usize,
    pub suppliers_by_status: BTreeMap<String, usize>,
    pub suppliers_by_country: BTreeMap<String, usize>,
    pub generated_at: DateTime<Utc>,
}

impl SupplierService {
    pub fn new(store: Store<Supplier>) -> Self {
        Self { store }
    }

    /// Create a supplier; new suppliers start pending review.
    pub fn create(&self, input: CreateSupplierInput, today: NaiveDate) -> AppResult<SupplierView> {
        input.validate()?;
        let now = Utc::now();

        let supplier = Supplier {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            city: input.city,
            country: input.country,
            tax_id: input.tax_id,
            contact_person: input.contact_person,
            specialties: input.specialties,
            delivery_terms: input.delivery_terms,
            certifications: Vec::new(),
            evaluations: Vec::new(),
            status: SupplierStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        self.store.insert(supplier.id, supplier.clone());
        Ok(supplier.to_view(today))
    }

    pub fn list(&self, filter: &SupplierFilter, today: NaiveDate) -> Vec<SupplierView> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|supplier| filter.matches(supplier, today))
            .map(|supplier| supplier.to_view(today))
            .collect()
    }

    pub fn get(&self, id: Uuid, today: NaiveDate) -> AppResult<SupplierView> {
        self.store
            .get(&id)
            .map(|supplier| supplier.to_view(today))
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    pub fn update(
        &self,
        id: Uuid,
        input: UpdateSupplierInput,
        today: NaiveDate,
    ) -> AppResult<SupplierView> {
        let updated = self
            .store
            .update_with(&id, |supplier| {
                if let Some(name) = input.name {
                    supplier.name = name;
                }
                if let Some(email) = input.email {
                    supplier.email = email;
                }
                if let Some(phone) = input.phone {
                    supplier.phone = phone;
                }
                if let Some(address) = input.address {
                    supplier.address = address;
                }
                if let Some(city) = input.city {
                    supplier.city = city;
                }
                if let Some(country) = input.country {
                    supplier.country = country;
                }
                if let Some(contact_person) = input.contact_person {
                    supplier.contact_person = contact_person;
                }
                if let Some(specialties) = input.specialties {
                    supplier.specialties = specialties;
                }
                if let Some(delivery_terms) = input.delivery_terms {
                    supplier.delivery_terms = delivery_terms;
                }
                supplier.updated_at = Utc::now();
                supplier.clone()
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?;
        Ok(updated.to_view(today))
    }

    /// Soft delete: the supplier stays, its status becomes inactive.
    pub fn deactivate(&self, id: Uuid) -> AppResult<SupplierStateOutcome> {
        self.set_status(id, SupplierStatus::Inactive, None, "deactivated")
    }

    pub fn activate(&self, id: Uuid) -> AppResult<SupplierStateOutcome> {
        self.set_status(id, SupplierStatus::Active, None, "activated")
    }

    pub fn suspend(&self, id: Uuid, reason: Option<String>) -> AppResult<SupplierStateOutcome> {
        self.set_status(id, SupplierStatus::Suspended, reason, "suspended")
    }

    fn set_status(
        &self,
        id: Uuid,
        status: SupplierStatus,
        reason: Option<String>,
        verb: &str,
    ) -> AppResult<SupplierStateOutcome> {
        self.store
            .update_with(&id, |supplier| {
                supplier.status = status;
                supplier.updated_at = Utc::now();
                SupplierStateOutcome {
                    message: format!("Supplier {} {}", supplier.name, verb),
                    status,
                    reason: reason.clone(),
                }
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    pub fn add_certification(
        &self,
        id: Uuid,
        input: AddCertificationInput,
        today: NaiveDate,
    ) -> AppResult<CertificationWithStatus> {
        shared::validation::validate_date_range(input.issue_date, input.expiry_date)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;
        let certification = Certification {
            kind: input.kind,
            issuer: input.issuer,
            certificate_number: input.certificate_number,
            issue_date: input.issue_date,
            expiry_date: input.expiry_date,
        };
        self.store
            .update_with(&id, |supplier| {
                supplier.certifications.push(certification.clone());
                supplier.updated_at = Utc::now();
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?;
        Ok(CertificationWithStatus::new(certification, today))
    }

    /// Certifications of one supplier; defaults to current ones only.
    pub fn certifications(
        &self,
        id: Uuid,
        current_only: bool,
        today: NaiveDate,
    ) -> AppResult<Vec<CertificationWithStatus>> {
        let supplier = self
            .store
            .get(&id)
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?;
        Ok(supplier
            .certifications
            .into_iter()
            .map(|certification| CertificationWithStatus::new(certification, today))
            .filter(|certification| !current_only || certification.is_current)
            .collect())
    }

    /// Register an evaluation; the rating reflects it immediately.
    pub fn add_evaluation(
        &self,
        id: Uuid,
        input: AddEvaluationInput,
    ) -> AppResult<EvaluationOutcome> {
        for (field, value) in [
            ("quality", input.quality),
            ("punctuality", input.punctuality),
            ("service", input.service),
            ("price", input.price),
        ] {
            shared::validation::validate_score_axis(value).map_err(|msg| AppError::Validation {
                field: field.to_string(),
                message: msg.to_string(),
                message_es: "La puntuación debe estar entre 1 y 5".to_string(),
            })?;
        }

        self.store
            .update_with(&id, |supplier| {
                supplier.evaluations.push(Evaluation {
                    quality: input.quality,
                    punctuality: input.punctuality,
                    service: input.service,
                    price: input.price,
                    comment: input.comment.clone(),
                    evaluated_at: Utc::now(),
                });
                supplier.updated_at = Utc::now();
                EvaluationOutcome {
                    message: "Evaluation registered".to_string(),
                    new_rating: supplier.rating(),
                }
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    /// Statistics report for one supplier; order figures come from the
    /// purchase-history collaborator.
    pub fn stats(
        &self,
        id: Uuid,
        history: &dyn PurchaseHistoryLookup,
        today: NaiveDate,
    ) -> AppResult<SupplierStats> {
        let supplier = self
            .store
            .get(&id)
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?;
        let orders = history.order_history(&supplier.id.to_string());

        Ok(SupplierStats {
            supplier_id: supplier.id,
            supplier_name: supplier.name.clone(),
            total_orders: orders.total_orders,
            completed_orders: orders.completed_orders,
            pending_orders: orders.pending_orders,
            total_purchase_amount: orders.total_amount,
            average_rating: supplier.rating(),
            average_delivery_days: supplier.delivery_terms.delivery_days,
            current_certifications: supplier.current_certifications(today),
            last_activity: supplier.updated_at,
        })
    }

    /// Active suppliers covering a specialty (substring match).
    pub fn by_specialty(&self, specialty: &str, today: NaiveDate) -> Vec<SupplierView> {
        let wanted = specialty.to_lowercase();
        self.store
            .snapshot()
            .into_iter()
            .filter(|supplier| {
                supplier.status == SupplierStatus::Active
                    && supplier
                        .specialties
                        .iter()
                        .any(|s| s.to_lowercase().contains(&wanted))
            })
            .map(|supplier| supplier.to_view(today))
            .collect()
    }

    /// Sweep for current certifications of active suppliers approaching
    /// expiry, soonest first.
    pub fn certification_alerts(
        &self,
        days_ahead: i64,
        today: NaiveDate,
    ) -> Vec<CertificationAlert> {
        let limit = today + Duration::days(days_ahead);
        let mut alerts = Vec::new();

        for supplier in self.store.snapshot() {
            if supplier.status != SupplierStatus::Active {
                continue;
            }
            for certification in &supplier.certifications {
                if certification.is_current(today) && certification.expiry_date <= limit {
                    let days_to_expiry = certification.days_to_expiry(today);
                    alerts.push(CertificationAlert {
                        supplier_id: supplier.id,
                        supplier_name: supplier.name.clone(),
                        kind: certification.kind,
                        certificate_number: certification.certificate_number.clone(),
                        expiry_date: certification.expiry_date,
                        days_to_expiry,
                        criticality: certification_priority(days_to_expiry),
                    });
                }
            }
        }

        alerts.sort_by_key(|alert| alert.days_to_expiry);
        alerts
    }

    pub fn overall_stats(&self, today: NaiveDate) -> SupplierStatsReport {
        let suppliers = self.store.snapshot();

        let mut suppliers_by_status: BTreeMap<String, usize> = BTreeMap::new();
        let mut suppliers_by_country: BTreeMap<String, usize> = BTreeMap::new();
        let mut current_certifications = 0;
        let mut ratings = Vec::new();

        for supplier in &suppliers {
            *suppliers_by_status
                .entry(supplier.status.as_str().to_string())
                .or_default() += 1;
            *suppliers_by_country
                .entry(supplier.country.clone())
                .or_default() += 1;
            current_certifications += supplier.current_certifications(today);
            let rating = supplier.rating();
            if rating > 0.0 {
                ratings.push(rating);
            }
        }

        let overall_average_rating = if ratings.is_empty() {
            0.0
        } else {
            shared::types::round1(ratings.iter().sum::<f64>() / ratings.len() as f64)
        };

        SupplierStatsReport {
            total_suppliers: suppliers.len(),
            active_suppliers: suppliers
                .iter()
                .filter(|supplier| supplier.status == SupplierStatus::Active)
                .count(),
            overall_average_rating,
            current_certifications,
            suppliers_by_status,
            suppliers_by_country,
            generated_at: Utc::now(),
        }
    }
}
