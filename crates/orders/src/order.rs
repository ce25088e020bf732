use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Single requested line of an order: item id + quantity.
///
/// Input only; it is never persisted standalone, only embedded in a placed
/// [`Order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "id")]
    pub item_id: u64,
    pub quantity: u64,
}

/// Placed order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    pub applied_offers: Vec<String>,
    pub placed_at: DateTime<Utc>,
}

/// Append-only log of placed orders. There is no deletion API; the log
/// grows for the lifetime of the process and resets on restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderLog {
    orders: Vec<Order>,
}

impl OrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Next sequential order id (count-based, like the registries).
    pub fn next_id(&self) -> u64 {
        self.orders.len() as u64 + 1
    }

    pub fn append(&mut self, order: Order) {
        self.orders.push(order);
    }
}
