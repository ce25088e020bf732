//! `orderdesk-core`: domain foundation building blocks.
//!
//! This crate contains the **pure domain** primitives shared by the
//! registries and the order engine (no infrastructure concerns).

pub mod error;
pub mod registry;

pub use error::{DomainError, DomainResult};
pub use registry::Upserted;
