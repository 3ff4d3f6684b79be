//! Purchase order service: line items, totals and the order lifecycle

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    LineItemWithTotals, OrderAlert, OrderAlertKind, OrderFilter, OrderLineItem, OrderStatus,
    OrderType, OrderWithTotals, Priority, PurchaseOrder, SupplierOrderSummary,
};
use crate::store::{OrderSequence, Store};

const RESOURCE: &str = "Purchase order";

/// Purchase order service owning the order store and number sequence
#[derive(Clone)]
pub struct OrderService {
    store: Store<PurchaseOrder>,
    sequence: OrderSequence,
}

/// Input for creating an order
#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    pub supplier_id: String,
    pub order_type: OrderType,
    pub required_date: NaiveDate,
    pub notes: Option<String>,
    pub delivery_address: Option<String>,
}

/// Input for adding a line item to an order
#[derive(Debug, Deserialize, Validate)]
pub struct AddItemInput {
    pub product_id: String,
    #[validate(range(min = 1))]
    pub quantity: i64,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_percent: Decimal,
}

/// Input for updating an order; only supplied fields change.
///
/// The status is deliberately absent: it only moves through the dedicated
/// transition endpoints so the lifecycle guards always run.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderInput {
    pub supplier_id: Option<String>,
    pub order_type: Option<OrderType>,
    pub required_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub delivery_address: Option<String>,
}

/// Result of a lifecycle transition
#[derive(Debug, Serialize)]
pub struct TransitionOutcome {
    pub message: String,
    pub order_number: String,
    pub status: OrderStatus,
}

/// Thresholds for the order alert sweep
#[derive(Debug, Clone, Copy)]
pub struct OrderAlertThresholds {
    /// Age in days after which a pending order needs attention
    pub pending_approval_days: i64,
    /// Overdue days after which a delivery delay is ALTA
    pub delivery_delay_high_days: i64,
}

/// Count/amount rollup across all orders
#[derive(Debug, Serialize)]
pub struct OrderStatsReport {
    pub total_orders: usize,
    pub total_amount: Decimal,
    pub average_amount: Decimal,
    pub orders_by_status: BTreeMap<String, usize>,
    pub orders_by_type: BTreeMap<String, usize>,
    pub generated_at: DateTime<Utc>,
}

impl OrderService {
    pub fn new(store: Store<PurchaseOrder>, sequence: OrderSequence) -> Self {
        Self { store, sequence }
    }

    /// Create an order in draft with no items.
    pub fn create(&self, input: CreateOrderInput, today: NaiveDate) -> AppResult<OrderWithTotals> {
        let now = Utc::now();

        let order = PurchaseOrder {
            id: Uuid::new_v4(),
            order_number: self.sequence.next_number(),
            supplier_id: input.supplier_id,
            order_type: input.order_type,
            status: OrderStatus::Draft,
            ordered_date: today,
            required_date: input.required_date,
            approved_at: None,
            sent_at: None,
            received_at: None,
            notes: input.notes,
            delivery_address: input.delivery_address,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.store.insert(order.id, order.clone());
        Ok(order.with_totals())
    }

    /// Add a line item; only allowed while the order is draft or pending.
    pub fn add_item(&self, order_id: Uuid, input: AddItemInput) -> AppResult<LineItemWithTotals> {
        input.validate()?;
        shared::validation::validate_discount_percent(input.discount_percent)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;
        shared::validation::validate_non_negative_amount(input.unit_price)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

        self.store
            .update_with(&order_id, |order| {
                if !order.status.can_modify_items() {
                    return Err(AppError::InvalidTransition(format!(
                        "Items cannot be modified while the order is {}",
                        order.status.as_str()
                    )));
                }
                let item = OrderLineItem {
                    id: Uuid::new_v4(),
                    product_id: input.product_id.clone(),
                    quantity: input.quantity,
                    unit_price: input.unit_price,
                    discount_percent: input.discount_percent,
                };
                order.items.push(item.clone());
                order.updated_at = Utc::now();
                Ok(LineItemWithTotals::new(&item))
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?
    }

    pub fn list(&self, filter: &OrderFilter) -> Vec<OrderWithTotals> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|order| filter.matches(order))
            .map(|order| order.with_totals())
            .collect()
    }

    pub fn get(&self, id: Uuid) -> AppResult<OrderWithTotals> {
        self.store
            .get(&id)
            .map(|order| order.with_totals())
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))
    }

    pub fn update(&self, id: Uuid, input: UpdateOrderInput) -> AppResult<OrderWithTotals> {
        let updated = self
            .store
            .update_with(&id, |order| {
                if let Some(supplier_id) = input.supplier_id {
                    order.supplier_id = supplier_id;
                }
                if let Some(order_type) = input.order_type {
                    order.order_type = order_type;
                }
                if let Some(required_date) = input.required_date {
                    order.required_date = required_date;
                }
                if let Some(notes) = input.notes {
                    order.notes = Some(notes);
                }
                if let Some(delivery_address) = input.delivery_address {
                    order.delivery_address = Some(delivery_address);
                }
                order.updated_at = Utc::now();
                order.clone()
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?;
        Ok(updated.with_totals())
    }

    /// Hard delete; only draft orders may be removed.
    pub fn delete(&self, id: Uuid) -> AppResult<()> {
        let deletable = self
            .store
            .update_with(&id, |order| order.status.can_delete())
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?;
        if !deletable {
            return Err(AppError::InvalidTransition(
                "Only draft orders can be deleted".to_string(),
            ));
        }
        self.store.remove(&id);
        Ok(())
    }

    pub fn submit(&self, id: Uuid) -> AppResult<TransitionOutcome> {
        self.store
            .update_with(&id, |order| {
                if !order.status.can_submit() {
                    return Err(AppError::InvalidTransition(format!(
                        "Order cannot be submitted while {}",
                        order.status.as_str()
                    )));
                }
                order.status = OrderStatus::Pending;
                order.updated_at = Utc::now();
                Ok(TransitionOutcome {
                    message: format!("Order {} submitted for approval", order.order_number),
                    order_number: order.order_number.clone(),
                    status: order.status,
                })
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?
    }

    pub fn approve(&self, id: Uuid) -> AppResult<TransitionOutcome> {
        self.store
            .update_with(&id, |order| {
                if !order.status.can_approve() {
                    return Err(AppError::InvalidTransition(format!(
                        "Order cannot be approved while {}",
                        order.status.as_str()
                    )));
                }
                order.status = OrderStatus::Approved;
                order.approved_at = Some(Utc::now());
                order.updated_at = Utc::now();
                Ok(TransitionOutcome {
                    message: format!("Order {} approved", order.order_number),
                    order_number: order.order_number.clone(),
                    status: order.status,
                })
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?
    }

    pub fn send(&self, id: Uuid) -> AppResult<TransitionOutcome> {
        self.store
            .update_with(&id, |order| {
                if !order.status.can_send() {
                    return Err(AppError::InvalidTransition(
                        "Order must be approved before it can be sent".to_string(),
                    ));
                }
                order.status = OrderStatus::Sent;
                order.sent_at = Some(Utc::now());
                order.updated_at = Utc::now();
                Ok(TransitionOutcome {
                    message: format!("Order {} sent", order.order_number),
                    order_number: order.order_number.clone(),
                    status: order.status,
                })
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?
    }

    pub fn receive(&self, id: Uuid) -> AppResult<TransitionOutcome> {
        self.store
            .update_with(&id, |order| {
                if !order.status.can_receive() {
                    return Err(AppError::InvalidTransition(
                        "Order must be sent before it can be received".to_string(),
                    ));
                }
                order.status = OrderStatus::Received;
                order.received_at = Some(Utc::now());
                order.updated_at = Utc::now();
                Ok(TransitionOutcome {
                    message: format!("Order {} received", order.order_number),
                    order_number: order.order_number.clone(),
                    status: order.status,
                })
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?
    }

    pub fn cancel(&self, id: Uuid, reason: Option<String>) -> AppResult<TransitionOutcome> {
        self.store
            .update_with(&id, |order| {
                if !order.status.can_cancel() {
                    return Err(AppError::InvalidTransition(
                        "A received order cannot be cancelled".to_string(),
                    ));
                }
                order.status = OrderStatus::Cancelled;
                if let Some(reason) = &reason {
                    order.notes = Some(match order.notes.take() {
                        Some(notes) => format!("{} - CANCELLED: {}", notes, reason),
                        None => format!("CANCELLED: {}", reason),
                    });
                }
                order.updated_at = Utc::now();
                Ok(TransitionOutcome {
                    message: format!("Order {} cancelled", order.order_number),
                    order_number: order.order_number.clone(),
                    status: order.status,
                })
            })
            .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?
    }

    /// Rollup of the orders placed with one supplier. Not found when the
    /// supplier has no orders at all.
    pub fn supplier_summary(&self, supplier_id: &str) -> AppResult<SupplierOrderSummary> {
        let orders: Vec<PurchaseOrder> = self
            .store
            .snapshot()
            .into_iter()
            .filter(|order| order.supplier_id == supplier_id)
            .collect();

        if orders.is_empty() {
            return Err(AppError::NotFound(format!(
                "Orders for supplier {}",
                supplier_id
            )));
        }

        let pending = orders
            .iter()
            .filter(|order| {
                matches!(
                    order.status,
                    OrderStatus::Pending | OrderStatus::Approved | OrderStatus::Sent
                )
            })
            .count();
        let completed = orders
            .iter()
            .filter(|order| order.status == OrderStatus::Received)
            .count();
        let total_amount = orders.iter().map(|order| order.totals().total).sum();

        Ok(SupplierOrderSummary {
            supplier_id: supplier_id.to_string(),
            total_orders: orders.len(),
            pending_orders: pending,
            completed_orders: completed,
            total_amount,
        })
    }

    /// Sweep for delivery delays and stale pending approvals, most
    /// critical first, longest delay first within a criticality.
    pub fn alerts(&self, thresholds: OrderAlertThresholds, today: NaiveDate) -> Vec<OrderAlert> {
        let now = Utc::now();
        let mut alerts = Vec::new();

        for order in self.store.snapshot() {
            if order.status == OrderStatus::Sent && order.required_date < today {
                let days_overdue = (today - order.required_date).num_days();
                let criticality = if days_overdue > thresholds.delivery_delay_high_days {
                    Priority::Alta
                } else {
                    Priority::Media
                };
                alerts.push(OrderAlert {
                    order_id: order.id,
                    order_number: order.order_number.clone(),
                    kind: OrderAlertKind::DeliveryDelay,
                    days_overdue: Some(days_overdue),
                    criticality,
                    description: format!("Order overdue by {} days", days_overdue),
                    raised_at: now,
                });
            } else if order.status == OrderStatus::Pending
                && (today - order.ordered_date).num_days() > thresholds.pending_approval_days
            {
                alerts.push(OrderAlert {
                    order_id: order.id,
                    order_number: order.order_number.clone(),
                    kind: OrderAlertKind::PendingApproval,
                    days_overdue: None,
                    criticality: Priority::Media,
                    description: format!(
                        "Order awaiting approval for more than {} days",
                        thresholds.pending_approval_days
                    ),
                    raised_at: now,
                });
            }
        }

        alerts.sort_by_key(|alert| {
            (
                alert.criticality.rank(),
                std::cmp::Reverse(alert.days_overdue.unwrap_or(0)),
            )
        });
        alerts
    }

    pub fn stats(&self) -> OrderStatsReport {
        let orders = self.store.snapshot();

        let mut orders_by_status: BTreeMap<String, usize> = BTreeMap::new();
        let mut orders_by_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_amount = Decimal::ZERO;

        for order in &orders {
            *orders_by_status
                .entry(order.status.as_str().to_string())
                .or_default() += 1;
            *orders_by_type
                .entry(order.order_type.as_str().to_string())
                .or_default() += 1;
            total_amount += order.totals().total;
        }

        let average_amount = if orders.is_empty() {
            Decimal::ZERO
        } else {
            (total_amount / Decimal::from(orders.len() as u64)).round_dp(2)
        };

        OrderStatsReport {
            total_orders: orders.len(),
            total_amount,
            average_amount,
            orders_by_status,
            orders_by_type,
            generated_at: Utc::now(),
        }
    }
}
