//! Purchase history collaborator
//!
//! The supplier statistics report includes order figures that belong to
//! the purchasing domain.

use rust_decimal::Decimal;

/// Order history figures for one supplier.
#[derive(Debug, Clone)]
pub struct OrderHistory {
    pub total_orders: u64,
    pub completed_orders: u64,
    pub pending_orders: u64,
    pub total_amount: Decimal,
}

/// Capability to read a supplier's order history.
pub trait PurchaseHistoryLookup: Send + Sync {
    fn order_history(&self, supplier_id: &str) -> OrderHistory;
}

/// Fixed-figure implementation used until a real purchasing integration
/// is wired in.
#[derive(Debug, Clone)]
pub struct FixedPurchaseHistory {
    total_orders: u64,
    pending_orders: u64,
    total_amount: Decimal,
}

impl FixedPurchaseHistory {
    pub fn new(total_orders: u64, pending_orders: u64, total_amount: Decimal) -> Self {
        Self {
            total_orders,
            pending_orders,
            total_amount,
        }
    }
}

impl PurchaseHistoryLookup for FixedPurchaseHistory {
    fn order_history(&self, _supplier_id: &str) -> OrderHistory {
        OrderHistory {
            total_orders: self.total_orders,
            completed_orders: self.total_orders.saturating_sub(self.pending_orders),
            pending_orders: self.pending_orders,
            total_amount: self.total_amount,
        }
    }
}
