//! Supplier model: contact data, delivery terms, sanitary certifications
//! and evaluations

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{round1, Priority};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierStatus {
    Pending,
    Active,
    Suspended,
    Inactive,
}

impl SupplierStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierStatus::Pending => "pending",
            SupplierStatus::Active => "active",
            SupplierStatus::Suspended => "suspended",
            SupplierStatus::Inactive => "inactive",
        }
    }
}

/// Sanitary certification kinds recognized by procurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationKind {
    Iso22000,
    Haccp,
    Brc,
    Sqf,
    Organic,
    Kosher,
    Halal,
    Other,
}

/// Delivery terms agreed with a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryTerms {
    pub delivery_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_area: Option<String>,
    #[serde(default)]
    pub restrictions: Vec<String>,
}

/// A sanitary certification held by a supplier.
///
/// Validity is always derived from `expiry_date`, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    pub kind: CertificationKind,
    pub issuer: String,
    pub certificate_number: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

impl Certification {
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.expiry_date >= today
    }

    pub fn days_to_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }
}

/// Certification together with its derived validity flag
#[derive(Debug, Clone, Serialize)]
pub struct CertificationWithStatus {
    #[serde(flatten)]
    pub certification: Certification,
    pub is_current: bool,
}

impl CertificationWithStatus {
    pub fn new(certification: Certification, today: NaiveDate) -> Self {
        let is_current = certification.is_current(today);
        Self {
            certification,
            is_current,
        }
    }
}

/// A four-axis supplier evaluation, each axis scored 1-5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub quality: i32,
    pub punctuality: i32,
    pub service: i32,
    pub price: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub evaluated_at: DateTime<Utc>,
}

impl Evaluation {
    pub fn average(&self) -> f64 {
        f64::from(self.quality + self.punctuality + self.service + self.price) / 4.0
    }
}

/// A supplier with embedded certifications and evaluations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub tax_id: String,
    pub contact_person: String,
    pub specialties: Vec<String>,
    pub delivery_terms: DeliveryTerms,
    pub certifications: Vec<Certification>,
    pub evaluations: Vec<Evaluation>,
    pub status: SupplierStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Supplier {
    /// Mean of the per-evaluation four-axis averages, one decimal.
    /// 0.0 when the supplier has never been evaluated.
    pub fn rating(&self) -> f64 {
        if self.evaluations.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.evaluations.iter().map(Evaluation::average).sum();
        round1(sum / self.evaluations.len() as f64)
    }

    pub fn current_certifications(&self, today: NaiveDate) -> usize {
        self.certifications
            .iter()
            .filter(|c| c.is_current(today))
            .count()
    }

    pub fn to_view(&self, today: NaiveDate) -> SupplierView {
        SupplierView {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            tax_id: self.tax_id.clone(),
            contact_person: self.contact_person.clone(),
            specialties: self.specialties.clone(),
            delivery_terms: self.delivery_terms.clone(),
            certifications: self
                .certifications
                .iter()
                .map(|c| CertificationWithStatus::new(c.clone(), today))
                .collect(),
            status: self.status,
            rating: self.rating(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Supplier as returned by the API: certifications carry validity flags
/// and the rating is materialized. Evaluations stay internal.
#[derive(Debug, Clone, Serialize)]
pub struct SupplierView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub tax_id: String,
    pub contact_person: String,
    pub specialties: Vec<String>,
    pub delivery_terms: DeliveryTerms,
    pub certifications: Vec<CertificationWithStatus>,
    pub status: SupplierStatus,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional listing criteria; absent fields impose no constraint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SupplierFilter {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub status: Option<SupplierStatus>,
    pub specialty: Option<String>,
    pub certification: Option<CertificationKind>,
    pub max_delivery_days: Option<i64>,
}

impl SupplierFilter {
    pub fn matches(&self, supplier: &Supplier, today: NaiveDate) -> bool {
        if let Some(name) = &self.name {
            if !supplier.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !supplier.city.to_lowercase().contains(&city.to_lowercase()) {
                return false;
            }
        }
        if let Some(country) = &self.country {
            if !supplier
                .country
                .to_lowercase()
                .contains(&country.to_lowercase())
            {
                return false;
            }
        }
        if let Some(status) = self.status {
            if supplier.status != status {
                return false;
            }
        }
        if let Some(specialty) = &self.specialty {
            let wanted = specialty.to_lowercase();
            if !supplier
                .specialties
                .iter()
                .any(|s| s.to_lowercase().contains(&wanted))
            {
                return false;
            }
        }
        if let Some(kind) = self.certification {
            let holds_current = supplier
                .certifications
                .iter()
                .any(|c| c.kind == kind && c.is_current(today));
            if !holds_current {
                return false;
            }
        }
        if let Some(max_days) = self.max_delivery_days {
            if supplier.delivery_terms.delivery_days > max_days {
                return false;
            }
        }
        true
    }
}

/// Advisory raised for a certification approaching its expiry date
#[derive(Debug, Clone, Serialize)]
pub struct CertificationAlert {
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub kind: CertificationKind,
    pub certificate_number: String,
    pub expiry_date: NaiveDate,
    pub days_to_expiry: i64,
    pub criticality: Priority,
}

/// Priority table for certification alerts: ALTA within a week.
pub fn certification_priority(days_to_expiry: i64) -> Priority {
    if days_to_expiry <= 7 {
        Priority::Alta
    } else {
        Priority::Media
    }
}

/// Statistics report for one supplier. Order figures come from the
/// purchase-history collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct SupplierStats {
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub total_orders: u64,
    pub completed_orders: u64,
    pub pending_orders: u64,
    pub total_purchase_amount: Decimal,
    pub average_rating: f64,
    pub average_delivery_days: i64,
    pub current_certifications: usize,
    pub last_activity: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(quality: i32, punctuality: i32, service: i32, price: i32) -> Evaluation {
        Evaluation {
            quality,
            punctuality,
            service,
            price,
            comment: None,
            evaluated_at: Utc::now(),
        }
    }

    fn sample() -> Supplier {
        Supplier {
            id: Uuid::new_v4(),
            name: "Distribuidora Andina".to_string(),
            email: "ventas@andina.cl".to_string(),
            phone: "+56 2 2345 6789".to_string(),
            address: "Camino La Vara 456".to_string(),
            city: "Puerto Montt".to_string(),
            country: "Chile".to_string(),
            tax_id: "76.543.210-8".to_string(),
            contact_person: "María Pérez".to_string(),
            specialties: vec!["lácteos".to_string(), "congelados".to_string()],
            delivery_terms: DeliveryTerms {
                delivery_days: 5,
                minimum_quantity: Some(50),
                shipping_cost: None,
                coverage_area: Some("Región de Los Lagos".to_string()),
                restrictions: vec![],
            },
            certifications: vec![],
            evaluations: vec![],
            status: SupplierStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn rating_is_zero_without_evaluations() {
        assert_eq!(sample().rating(), 0.0);
    }

    #[test]
    fn rating_averages_evaluation_means() {
        let mut supplier = sample();
        supplier.evaluations.push(evaluation(5, 5, 5, 5));
        supplier.evaluations.push(evaluation(1, 1, 1, 1));
        assert_eq!(supplier.rating(), 3.0);
    }

    #[test]
    fn certification_validity_is_inclusive_of_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let cert = Certification {
            kind: CertificationKind::Haccp,
            issuer: "SAG".to_string(),
            certificate_number: "HACCP-001".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
            expiry_date: today,
        };
        assert!(cert.is_current(today));
        assert!(!cert.is_current(today.succ_opt().unwrap()));
    }

    #[test]
    fn specialty_filter_is_substring_on_any_entry() {
        let supplier = sample();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let filter = SupplierFilter {
            specialty: Some("LÁCT".to_lowercase()),
            ..Default::default()
        };
        assert!(filter.matches(&supplier, today));
    }
}
