//! Purchase order model: line items, monetary totals and the order
//! state machine

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Priority;

/// Fixed VAT rate applied to the order subtotal.
pub const VAT_RATE: Decimal = dec!(0.19);

/// Purchase order lifecycle.
///
/// Transitions move strictly forward (draft/pending -> approved -> sent ->
/// received); cancellation is reachable from every state except received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Draft,
    Pending,
    Approved,
    Sent,
    Received,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Sent => "sent",
            OrderStatus::Received => "received",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Line items may only change while the order is still being drafted
    /// or waiting for approval.
    pub fn can_modify_items(&self) -> bool {
        matches!(self, OrderStatus::Draft | OrderStatus::Pending)
    }

    /// Submission moves a draft into the approval queue.
    pub fn can_submit(&self) -> bool {
        matches!(self, OrderStatus::Draft)
    }

    pub fn can_approve(&self) -> bool {
        matches!(self, OrderStatus::Draft | OrderStatus::Pending)
    }

    pub fn can_send(&self) -> bool {
        matches!(self, OrderStatus::Approved)
    }

    pub fn can_receive(&self) -> bool {
        matches!(self, OrderStatus::Sent)
    }

    pub fn can_cancel(&self) -> bool {
        !matches!(self, OrderStatus::Received)
    }

    /// Hard deletion is only allowed before the order enters the workflow.
    pub fn can_delete(&self) -> bool {
        matches!(self, OrderStatus::Draft)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Regular,
    Urgent,
    Recurring,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Regular => "regular",
            OrderType::Urgent => "urgent",
            OrderType::Recurring => "recurring",
        }
    }
}

/// One line of a purchase order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub id: Uuid,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount_percent: Decimal,
}

impl OrderLineItem {
    /// Quantity times unit price, before discount.
    pub fn gross(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    pub fn discount_amount(&self) -> Decimal {
        self.gross() * self.discount_percent / dec!(100)
    }

    pub fn line_total(&self) -> Decimal {
        self.gross() - self.discount_amount()
    }
}

/// Monetary rollup of an order, derived from its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// A purchase order with embedded line items.
///
/// Totals are never stored; `totals()` recomputes them from the items so
/// every read agrees with the current item set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub order_number: String,
    pub supplier_id: String,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub ordered_date: NaiveDate,
    pub required_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    pub items: Vec<OrderLineItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PurchaseOrder {
    pub fn totals(&self) -> OrderTotals {
        let subtotal: Decimal = self.items.iter().map(OrderLineItem::line_total).sum();
        let discount_total: Decimal = self.items.iter().map(OrderLineItem::discount_amount).sum();
        let tax = subtotal * VAT_RATE;
        OrderTotals {
            subtotal,
            discount_total,
            tax,
            total: subtotal + tax,
        }
    }

    pub fn with_totals(&self) -> OrderWithTotals {
        let totals = self.totals();
        OrderWithTotals {
            id: self.id,
            order_number: self.order_number.clone(),
            supplier_id: self.supplier_id.clone(),
            order_type: self.order_type,
            status: self.status,
            ordered_date: self.ordered_date,
            required_date: self.required_date,
            approved_at: self.approved_at,
            sent_at: self.sent_at,
            received_at: self.received_at,
            notes: self.notes.clone(),
            delivery_address: self.delivery_address.clone(),
            items: self.items.iter().map(LineItemWithTotals::new).collect(),
            subtotal: totals.subtotal,
            discount_total: totals.discount_total,
            tax: totals.tax,
            total: totals.total,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Line item enriched with its derived amounts
#[derive(Debug, Clone, Serialize)]
pub struct LineItemWithTotals {
    pub id: Uuid,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount_percent: Decimal,
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub line_total: Decimal,
}

impl LineItemWithTotals {
    pub fn new(item: &OrderLineItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            discount_percent: item.discount_percent,
            subtotal: item.gross(),
            discount_amount: item.discount_amount(),
            line_total: item.line_total(),
        }
    }
}

/// Order enriched with its derived monetary rollup
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithTotals {
    pub id: Uuid,
    pub order_number: String,
    pub supplier_id: String,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub ordered_date: NaiveDate,
    pub required_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    pub items: Vec<LineItemWithTotals>,
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional listing criteria; absent fields impose no constraint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OrderFilter {
    pub supplier_id: Option<String>,
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub total_min: Option<Decimal>,
    pub total_max: Option<Decimal>,
}

impl OrderFilter {
    pub fn matches(&self, order: &PurchaseOrder) -> bool {
        if let Some(supplier_id) = &self.supplier_id {
            if &order.supplier_id != supplier_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }
        if let Some(order_type) = self.order_type {
            if order.order_type != order_type {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if order.ordered_date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if order.ordered_date > to {
                return false;
            }
        }
        if self.total_min.is_some() || self.total_max.is_some() {
            let total = order.totals().total;
            if let Some(min) = self.total_min {
                if total < min {
                    return false;
                }
            }
            if let Some(max) = self.total_max {
                if total > max {
                    return false;
                }
            }
        }
        true
    }
}

/// Kinds of order advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderAlertKind {
    #[serde(rename = "RETRASO_ENTREGA")]
    DeliveryDelay,
    #[serde(rename = "APROBACION_PENDIENTE")]
    PendingApproval,
}

/// Advisory raised by the order sweep
#[derive(Debug, Clone, Serialize)]
pub struct OrderAlert {
    pub order_id: Uuid,
    pub order_number: String,
    pub kind: OrderAlertKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<i64>,
    pub criticality: Priority,
    pub description: String,
    pub raised_at: DateTime<Utc>,
}

/// Rollup of the orders placed with one supplier
#[derive(Debug, Clone, Serialize)]
pub struct SupplierOrderSummary {
    pub supplier_id: String,
    pub total_orders: usize,
    pub pending_orders: usize,
    pub completed_orders: usize,
    pub total_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, unit_price: Decimal, discount_percent: Decimal) -> OrderLineItem {
        OrderLineItem {
            id: Uuid::new_v4(),
            product_id: "prod-1".to_string(),
            quantity,
            unit_price,
            discount_percent,
        }
    }

    fn order_with(items: Vec<OrderLineItem>) -> PurchaseOrder {
        PurchaseOrder {
            id: Uuid::new_v4(),
            order_number: "OC000001".to_string(),
            supplier_id: "sup-1".to_string(),
            order_type: OrderType::Regular,
            status: OrderStatus::Draft,
            ordered_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            required_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            approved_at: None,
            sent_at: None,
            received_at: None,
            notes: None,
            delivery_address: None,
            items,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_order_totals_are_zero() {
        let totals = order_with(vec![]).totals();
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn worked_totals_example() {
        // qty 10 x 100 at 10% discount: line total 900, tax 171, total 1071
        let order = order_with(vec![item(10, dec!(100), dec!(10))]);
        let totals = order.totals();
        assert_eq!(totals.subtotal, dec!(900));
        assert_eq!(totals.discount_total, dec!(100));
        assert_eq!(totals.tax, dec!(171.00));
        assert_eq!(totals.total, dec!(1071.00));
    }

    #[test]
    fn transition_table() {
        use OrderStatus::*;
        assert!(Draft.can_approve());
        assert!(Pending.can_approve());
        assert!(!Approved.can_approve());
        assert!(Approved.can_send());
        assert!(!Sent.can_send());
        assert!(Sent.can_receive());
        assert!(!Approved.can_receive());
        assert!(!Received.can_cancel());
        assert!(Sent.can_cancel());
        assert!(Draft.can_delete());
        assert!(!Pending.can_delete());
        assert!(Draft.can_modify_items());
        assert!(Pending.can_modify_items());
        assert!(!Approved.can_modify_items());
    }

    #[test]
    fn filter_total_range_uses_derived_total() {
        let order = order_with(vec![item(10, dec!(100), dec!(10))]);
        let filter = OrderFilter {
            total_min: Some(dec!(1071)),
            ..Default::default()
        };
        assert!(filter.matches(&order));
        let filter = OrderFilter {
            total_min: Some(dec!(1072)),
            ..Default::default()
        };
        assert!(!filter.matches(&order));
    }
}
