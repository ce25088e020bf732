use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderdesk_core::{DomainError, DomainResult, Upserted};

/// Condition under which an offer applies to an order.
///
/// Closed tagged variant; unrecognized shapes fail deserialization at the
/// boundary instead of being carried around as loose objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OfferCondition {
    /// Matches when the total requested quantity across all lines is at
    /// least `count`.
    MinItems { count: u64 },
    /// Matches when any line references the item.
    SpecificItem { item_id: u64 },
}

impl OfferCondition {
    /// Whether this condition holds for an order described by its total
    /// requested quantity and the item ids its lines reference.
    pub fn matches(&self, total_quantity: u64, item_ids: &[u64]) -> bool {
        match self {
            Self::MinItems { count } => total_quantity >= *count,
            Self::SpecificItem { item_id } => item_ids.contains(item_id),
        }
    }
}

/// Discount offer.
///
/// `discount` is a fraction in `[0, 1]`; range enforcement is the
/// boundary's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: u64,
    pub name: String,
    pub condition: OfferCondition,
    pub discount: Decimal,
}

/// Registry of discount offers.
///
/// Stored order is significant: matching offers stack multiplicatively in
/// book order during order placement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferBook {
    offers: Vec<Offer>,
}

impl OfferBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[Offer] {
        &self.offers
    }

    pub fn get(&self, id: u64) -> Option<&Offer> {
        self.offers.iter().find(|offer| offer.id == id)
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Overwrite the record with `id` in place, or append a new one.
    ///
    /// Same count-based id scheme as the catalog: new ids are `len() + 1`,
    /// so removal followed by insertion can reuse an id.
    pub fn upsert(
        &mut self,
        id: Option<u64>,
        name: String,
        condition: OfferCondition,
        discount: Decimal,
    ) -> Upserted<Offer> {
        if let Some(id) = id {
            if let Some(existing) = self.offers.iter_mut().find(|offer| offer.id == id) {
                existing.name = name;
                existing.condition = condition;
                existing.discount = discount;
                return Upserted::Updated(existing.clone());
            }
        }

        let offer = Offer {
            id: self.offers.len() as u64 + 1,
            name,
            condition,
            discount,
        };
        self.offers.push(offer.clone());
        Upserted::Created(offer)
    }

    /// Remove the record with `id`. The registry is untouched on failure.
    pub fn remove(&mut self, id: u64) -> DomainResult<()> {
        let pos = self
            .offers
            .iter()
            .position(|offer| offer.id == id)
            .ok_or(DomainError::NotFound)?;
        self.offers.remove(pos);
        Ok(())
    }
}
