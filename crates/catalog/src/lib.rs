//! Scenario catalog: the immutable starting conditions of a run.
//!
//! Maps each scenario to its opening inventory and the fixed commercial
//! dataset (parties, product, price, quantity, credit figures). Nothing in
//! here changes during a run.

pub mod catalog;
pub mod order;
pub mod party;
pub mod product;
pub mod scenario;

pub use catalog::{CatalogEntry, ScenarioCatalog};
pub use order::OrderTerms;
pub use party::{Party, PartyKind};
pub use product::Product;
pub use scenario::Scenario;
