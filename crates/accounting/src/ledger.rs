use serde::{Deserialize, Serialize};

use o2c_core::{Aggregate, AggregateRoot, DomainError, RunId};
use o2c_events::Event;

/// High-level account kind (determines normal balance side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Asset,
    Revenue,
}

/// Account identifier + metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Account {
    pub code: String, // e.g. "1200"
    pub name: String, // e.g. "Accounts Receivable"
    pub kind: AccountKind,
}

impl Account {
    fn new(code: &str, name: &str, kind: AccountKind) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            kind,
        }
    }

    pub fn bank_cash() -> Self {
        Self::new("1000", "Bank Account (Cash)", AccountKind::Asset)
    }

    pub fn accounts_receivable() -> Self {
        Self::new("1200", "Accounts Receivable", AccountKind::Asset)
    }

    pub fn sales_revenue() -> Self {
        Self::new("4000", "Sales Revenue", AccountKind::Revenue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingSide {
    Debit,
    Credit,
}

/// One side of a journal entry (immutable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerPosting {
    pub account: Account,
    pub side: PostingSide,
    /// Positive amount in whole currency units.
    pub amount: u64,
    /// T-account caption, e.g. "Inv #505".
    pub label: String,
}

/// A group of postings recording one economic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub description: String,
    pub postings: Vec<LedgerPosting>,
}

impl JournalEntry {
    /// The usual shape: one debit and one credit of the same amount.
    pub fn pair(
        description: impl Into<String>,
        debit: Account,
        credit: Account,
        amount: u64,
        label: impl Into<String>,
    ) -> Self {
        let label = label.into();
        Self {
            description: description.into(),
            postings: vec![
                LedgerPosting {
                    account: debit,
                    side: PostingSide::Debit,
                    amount,
                    label: label.clone(),
                },
                LedgerPosting {
                    account: credit,
                    side: PostingSide::Credit,
                    amount,
                    label,
                },
            ],
        }
    }

    pub fn debit_total(&self) -> u128 {
        self.side_total(PostingSide::Debit)
    }

    pub fn credit_total(&self) -> u128 {
        self.side_total(PostingSide::Credit)
    }

    fn side_total(&self, side: PostingSide) -> u128 {
        self.postings
            .iter()
            .filter(|p| p.side == side)
            .map(|p| u128::from(p.amount))
            .sum()
    }

    /// Reject empty, zero-amount or unbalanced entries.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.postings.is_empty() {
            return Err(DomainError::invariant("journal entry must have postings"));
        }
        if self.postings.iter().any(|p| p.amount == 0) {
            return Err(DomainError::invariant("amount must be positive"));
        }
        if self.debit_total() != self.credit_total() {
            return Err(DomainError::invariant("debits must equal credits"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCommand {
    PostJournalEntry(JournalEntry),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    JournalEntryPosted(JournalEntry),
}

impl Event for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::JournalEntryPosted(_) => "accounting.ledger.journal_entry_posted",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

/// Aggregate root: the run's ledger recorder.
///
/// Holds every accepted journal entry in posting order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecorder {
    id: RunId,
    entries: Vec<JournalEntry>,
    version: u64,
}

impl LedgerRecorder {
    pub fn new(id: RunId) -> Self {
        Self {
            id,
            entries: Vec::new(),
            version: 0,
        }
    }

    /// Validate and record an entry.
    pub fn post(&mut self, entry: JournalEntry) -> Result<(), DomainError> {
        self.execute(&LedgerCommand::PostJournalEntry(entry))?;
        Ok(())
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Flat posting sequence across all entries.
    pub fn postings(&self) -> impl Iterator<Item = &LedgerPosting> {
        self.entries.iter().flat_map(|e| e.postings.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AggregateRoot for LedgerRecorder {
    type Id = RunId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for LedgerRecorder {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::JournalEntryPosted(entry) => {
                tracing::info!(
                    run_id = %self.id,
                    description = %entry.description,
                    amount = entry.debit_total() as u64,
                    "journal entry posted"
                );
                self.entries.push(entry.clone());
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            LedgerCommand::PostJournalEntry(entry) => {
                entry.validate()?;
                Ok(vec![LedgerEvent::JournalEntryPosted(entry.clone())])
            }
        }
    }
}
