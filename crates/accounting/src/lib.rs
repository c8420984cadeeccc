//! Accounting module (simplified double-entry ledger).
//!
//! Pure domain logic only: stages produce journal entries, the recorder
//! validates and accumulates them for the run summary.

pub mod balance;
pub mod ledger;

pub use balance::{AccountBalance, TrialBalance};
pub use ledger::{
    Account, AccountKind, JournalEntry, LedgerCommand, LedgerEvent, LedgerPosting,
    LedgerRecorder, PostingSide,
};
