//! Offers domain module.
//!
//! This crate contains discount-offer records and the registry that owns
//! them, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod offer;

pub use offer::{Offer, OfferBook, OfferCondition};
