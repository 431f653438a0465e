//! `fimenu-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::Aggregate;
pub use entity::{find_by_id, find_by_id_mut, Entity};
pub use error::{DomainError, DomainResult};
pub use id::{PackageId, ProductId};
pub use value_object::{Money, Percent, ValueObject};
