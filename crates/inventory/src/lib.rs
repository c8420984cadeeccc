//! Inventory ledger of a simulation run.
//!
//! Two counters, finished goods and raw materials, owned by the active run.
//! Pure value logic: stage machines describe changes, the orchestrator applies
//! them.

pub mod stock;

pub use stock::{Inventory, StockChange, StockItem};
