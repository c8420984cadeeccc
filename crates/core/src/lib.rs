//! `o2c-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the stage state
//! machines (no IO, no async, no logging setup).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::RunId;
pub use value_object::ValueObject;
