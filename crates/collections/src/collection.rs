use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use o2c_accounting::JournalEntry;
use o2c_catalog::OrderTerms;
use o2c_core::{Aggregate, AggregateRoot, DomainError, RunId};
use o2c_events::{Event, ProcessStage, SimulatedAction, StageMachine, ensure_idle};

use crate::RemittanceAdvice;

/// `AwaitingAcceptance → (Disputed | AwaitingFunds) → Cleared`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionsSubstate {
    AwaitingAcceptance,
    Disputed,
    AwaitingFunds,
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionsAction {
    ConfirmTransfer,
}

impl SimulatedAction for CollectionsAction {
    fn name(&self) -> &'static str {
        "confirm_transfer"
    }

    fn latency(&self) -> Duration {
        Duration::from_millis(2000)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionsCommand {
    /// Has the customer accepted the invoice?
    DecideAcceptance { accepted: bool, at: DateTime<Utc> },
    ConfirmTransfer,
    Retry,
    Settle { at: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionsEvent {
    ActionStarted(CollectionsAction),
    InvoiceAccepted(RemittanceAdvice),
    InvoiceDisputed,
    /// Effect: the entry is recorded in the ledger.
    TransferCleared(JournalEntry),
    StageRestarted,
}

impl Event for CollectionsEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CollectionsEvent::ActionStarted(_) => "collections.action_started",
            CollectionsEvent::InvoiceAccepted(_) => "collections.invoice_accepted",
            CollectionsEvent::InvoiceDisputed => "collections.invoice_disputed",
            CollectionsEvent::TransferCleared(_) => "collections.transfer_cleared",
            CollectionsEvent::StageRestarted => "collections.restarted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn narrate(&self) -> Option<String> {
        let line = match self {
            CollectionsEvent::ActionStarted(_) => {
                "Confirming wire transfer and clearing open items...".to_string()
            }
            CollectionsEvent::InvoiceAccepted(advice) => format!(
                "Invoice accepted. Bank notification received. Ref: {}.",
                advice.reference
            ),
            CollectionsEvent::InvoiceDisputed => {
                "Dispute raised: customer rejected the invoice. Collection halted.".to_string()
            }
            CollectionsEvent::TransferCleared(entry) => format!(
                "Cleared: Dr Bank Account (Cash) {amount} / Cr Accounts Receivable {amount}.",
                amount = entry.debit_total()
            ),
            CollectionsEvent::StageRestarted => {
                "Collections restarted: awaiting invoice acceptance.".to_string()
            }
        };
        Some(line)
    }
}

/// Aggregate root: the Collections stage of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    id: RunId,
    terms: OrderTerms,
    substate: CollectionsSubstate,
    in_flight: Option<CollectionsAction>,
    remittance: Option<RemittanceAdvice>,
    version: u64,
}

impl Collection {
    pub fn new(id: RunId, terms: OrderTerms) -> Self {
        Self {
            id,
            terms,
            substate: CollectionsSubstate::AwaitingAcceptance,
            in_flight: None,
            remittance: None,
            version: 0,
        }
    }

    pub fn remittance(&self) -> Option<&RemittanceAdvice> {
        self.remittance.as_ref()
    }

    pub fn is_disputed(&self) -> bool {
        self.substate == CollectionsSubstate::Disputed
    }

    fn ensure_substate(&self, expected: CollectionsSubstate, what: &str) -> Result<(), DomainError> {
        if self.substate != expected {
            return Err(DomainError::invalid_transition(format!(
                "cannot {what} in collections sub-state {:?}",
                self.substate
            )));
        }
        Ok(())
    }
}

impl AggregateRoot for Collection {
    type Id = RunId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Collection {
    type Command = CollectionsCommand;
    type Event = CollectionsEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CollectionsEvent::ActionStarted(action) => {
                self.in_flight = Some(*action);
            }
            CollectionsEvent::InvoiceAccepted(advice) => {
                self.remittance = Some(advice.clone());
                self.substate = CollectionsSubstate::AwaitingFunds;
            }
            CollectionsEvent::InvoiceDisputed => {
                self.substate = CollectionsSubstate::Disputed;
            }
            CollectionsEvent::TransferCleared(_) => {
                self.in_flight = None;
                self.substate = CollectionsSubstate::Cleared;
            }
            CollectionsEvent::StageRestarted => {
                self.in_flight = None;
                self.remittance = None;
                self.substate = CollectionsSubstate::AwaitingAcceptance;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        if let CollectionsCommand::Settle { .. } = command {
            let Some(CollectionsAction::ConfirmTransfer) = self.in_flight else {
                return Err(DomainError::conflict("no collections action in flight"));
            };
            let Some(advice) = &self.remittance else {
                return Err(DomainError::invariant("clearing requires a remittance advice"));
            };
            return Ok(vec![CollectionsEvent::TransferCleared(advice.clearing_entry())]);
        }
        ensure_idle(self.in_flight)?;

        match command {
            CollectionsCommand::DecideAcceptance { accepted, at } => {
                self.ensure_substate(CollectionsSubstate::AwaitingAcceptance, "record acceptance")?;
                if *accepted {
                    Ok(vec![CollectionsEvent::InvoiceAccepted(RemittanceAdvice::issue(
                        &self.terms,
                        *at,
                    ))])
                } else {
                    Ok(vec![CollectionsEvent::InvoiceDisputed])
                }
            }
            CollectionsCommand::ConfirmTransfer => {
                self.ensure_substate(CollectionsSubstate::AwaitingFunds, "confirm transfer")?;
                Ok(vec![CollectionsEvent::ActionStarted(
                    CollectionsAction::ConfirmTransfer,
                )])
            }
            CollectionsCommand::Retry => {
                self.ensure_substate(CollectionsSubstate::Disputed, "retry")?;
                Ok(vec![CollectionsEvent::StageRestarted])
            }
            CollectionsCommand::Settle { .. } => Err(DomainError::conflict(
                "settle is only valid while an action is in flight",
            )),
        }
    }
}

impl StageMachine for Collection {
    type Action = CollectionsAction;
    type Substate = CollectionsSubstate;

    const STAGE: ProcessStage = ProcessStage::Collections;

    fn substate(&self) -> CollectionsSubstate {
        self.substate
    }

    fn in_flight(&self) -> Option<CollectionsAction> {
        self.in_flight
    }

    fn is_complete(&self) -> bool {
        self.substate == CollectionsSubstate::Cleared
    }

    fn available_actions(&self) -> Vec<&'static str> {
        if self.in_flight.is_some() {
            return Vec::new();
        }
        match self.substate {
            CollectionsSubstate::AwaitingAcceptance => vec!["decide_acceptance"],
            CollectionsSubstate::Disputed => vec!["retry"],
            CollectionsSubstate::AwaitingFunds => vec!["confirm_transfer"],
            CollectionsSubstate::Cleared => Vec::new(),
        }
    }
}
