//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Alert priority / criticality.
///
/// Ranked ALTA > MEDIA > BAJA. The derived `Ord` follows declaration order,
/// so sorting ascending puts the most critical alerts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "ALTA")]
    Alta,
    #[serde(rename = "MEDIA")]
    Media,
    #[serde(rename = "BAJA")]
    Baja,
}

impl Priority {
    /// Explicit rank table: 1 is most critical.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Alta => 1,
            Priority::Media => 2,
            Priority::Baja => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Alta => "ALTA",
            Priority::Media => "MEDIA",
            Priority::Baja => "BAJA",
        }
    }
}

/// Geographic location of a warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub city: String,
    pub country: String,
}

/// Round to two decimal places, used by percentage and demand metrics.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place, used by supplier ratings.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_order() {
        assert!(Priority::Alta < Priority::Media);
        assert!(Priority::Media < Priority::Baja);
        assert_eq!(Priority::Alta.rank(), 1);
        assert_eq!(Priority::Baja.rank(), 3);
    }

    #[test]
    fn priority_wire_format() {
        let json = serde_json::to_string(&Priority::Alta).unwrap();
        assert_eq!(json, "\"ALTA\"");
    }

    #[test]
    fn rounding() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round1(3.25), 3.3);
    }
}
