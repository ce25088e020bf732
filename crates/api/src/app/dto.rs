use rust_decimal::Decimal;
use serde::Deserialize;

use orderdesk_core::{DomainError, DomainResult};
use orderdesk_offers::OfferCondition;
use orderdesk_orders::OrderLine;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertItemRequest {
    pub id: Option<u64>,
    pub name: String,
    pub price: Decimal,
    pub stock: u64,
}

#[derive(Debug, Deserialize)]
pub struct UpsertOfferRequest {
    pub id: Option<u64>,
    pub name: String,
    pub condition: OfferCondition,
    pub discount: Decimal,
}

// -------------------------
// Field validation (the registries trust their callers; this is the
// boundary doing its share)
// -------------------------

impl UpsertItemRequest {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.price.is_sign_negative() {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(())
    }
}

impl UpsertOfferRequest {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.discount < Decimal::ZERO || self.discount > Decimal::ONE {
            return Err(DomainError::validation(
                "discount must be between 0 and 1",
            ));
        }
        Ok(())
    }
}
