//! Orders domain module.
//!
//! This crate contains the order records, the append-only order log, and
//! the order engine that drives placement (stock validation, pricing,
//! offer stacking, stock deduction). Deterministic domain logic apart from
//! the placement timestamp; no IO, no HTTP, no storage.

pub mod engine;
pub mod order;

pub use engine::OrderEngine;
pub use order::{Order, OrderLine, OrderLog};
