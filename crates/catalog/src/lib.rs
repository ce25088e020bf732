//! Catalog domain module.
//!
//! This crate contains the registry of purchasable items, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod item;

pub use item::{Catalog, Item};
