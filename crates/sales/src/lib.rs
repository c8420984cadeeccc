//! Sales Order stage (1.0 Sales Order Entry).
//!
//! Credit check, acknowledgement and inventory sourcing for the customer's
//! purchase order, implemented as a deterministic state machine (no IO, no
//! timers; suspensions are settled by the orchestrator).

pub mod credit;
pub mod documents;
pub mod order;
pub mod sourcing;

pub use credit::CreditAssessment;
pub use documents::{OrderAcknowledgement, PurchaseOrder, StandardOrder};
pub use order::{SalesAction, SalesOrder, SalesOrderCommand, SalesOrderEvent, SalesSubstate};
pub use sourcing::{Fulfilment, StockAssessment};
