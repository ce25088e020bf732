use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderdesk_core::{DomainError, DomainResult, Upserted};

/// Purchasable catalog item.
///
/// Mutated in place by [`Catalog::upsert`]; removed only by
/// [`Catalog::remove`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub price: Decimal,
    pub stock: u64,
}

/// Registry of purchasable items.
///
/// Field validation (non-empty name, non-negative price) is the boundary's
/// job; the registry trusts its callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Overwrite the record with `id` in place, or append a new one.
    ///
    /// New ids are assigned as `len() + 1` (count-based, not max+1).
    /// Removing a record and inserting another can therefore hand out an id
    /// the registry has used before; this scheme is carried over from the
    /// source system unchanged.
    pub fn upsert(
        &mut self,
        id: Option<u64>,
        name: String,
        price: Decimal,
        stock: u64,
    ) -> Upserted<Item> {
        if let Some(id) = id {
            if let Some(existing) = self.get_mut(id) {
                existing.name = name;
                existing.price = price;
                existing.stock = stock;
                return Upserted::Updated(existing.clone());
            }
        }

        let item = Item {
            id: self.items.len() as u64 + 1,
            name,
            price,
            stock,
        };
        self.items.push(item.clone());
        Upserted::Created(item)
    }

    /// Remove the record with `id`. The registry is untouched on failure.
    pub fn remove(&mut self, id: u64) -> DomainResult<()> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(DomainError::NotFound)?;
        self.items.remove(pos);
        Ok(())
    }
}
