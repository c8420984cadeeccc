//! Collections module: cash application against the posted invoice.

pub mod collection;
pub mod remittance;

pub use collection::{
    Collection, CollectionsAction, CollectionsCommand, CollectionsEvent, CollectionsSubstate,
};
pub use remittance::{RemittanceAdvice, WIRE_REFERENCE};
