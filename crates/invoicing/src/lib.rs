//! Billing stage (3.0 Billing).
//!
//! Verify the customer accepted the shipment, match documents, generate the
//! invoice and post it to Accounts Receivable.

pub mod billing;
pub mod invoice;

pub use billing::{Billing, BillingAction, BillingCommand, BillingEvent, BillingSubstate};
pub use invoice::{Invoice, PAYMENT_TERMS_DAYS};
