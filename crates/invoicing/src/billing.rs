use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use o2c_accounting::JournalEntry;
use o2c_catalog::OrderTerms;
use o2c_core::{Aggregate, AggregateRoot, DomainError, RunId};
use o2c_events::{Event, ProcessStage, SimulatedAction, StageMachine, ensure_idle};

use crate::Invoice;

/// Billing sub-state lifecycle.
///
/// `AwaitingAcceptance → (Halted | DocMatch) → InvoiceGenerated → Posted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingSubstate {
    AwaitingAcceptance,
    /// Customer refused the shipment; only a stage-local retry leaves here.
    Halted,
    DocMatch,
    InvoiceGenerated,
    Posted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingAction {
    GenerateInvoice,
    Post,
}

impl SimulatedAction for BillingAction {
    fn name(&self) -> &'static str {
        match self {
            BillingAction::GenerateInvoice => "generate_invoice",
            BillingAction::Post => "post_invoice",
        }
    }

    fn latency(&self) -> Duration {
        Duration::from_millis(1500)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingCommand {
    /// Did the customer acknowledge receipt and accept the shipment?
    DecideAcceptance { accepted: bool },
    GenerateInvoice,
    Post,
    Retry,
    Settle { at: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingEvent {
    ActionStarted(BillingAction),
    ShipmentAccepted,
    ShipmentRefused,
    InvoiceGenerated(Invoice),
    /// Effect: the entry is recorded in the ledger.
    InvoicePosted(JournalEntry),
    StageRestarted,
}

impl Event for BillingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            BillingEvent::ActionStarted(_) => "invoicing.billing.action_started",
            BillingEvent::ShipmentAccepted => "invoicing.billing.shipment_accepted",
            BillingEvent::ShipmentRefused => "invoicing.billing.shipment_refused",
            BillingEvent::InvoiceGenerated(_) => "invoicing.billing.invoice_generated",
            BillingEvent::InvoicePosted(_) => "invoicing.billing.invoice_posted",
            BillingEvent::StageRestarted => "invoicing.billing.restarted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn narrate(&self) -> Option<String> {
        let line = match self {
            BillingEvent::ActionStarted(BillingAction::GenerateInvoice) => {
                "Documents matched (SO vs Packing Slip). Generating invoice...".to_string()
            }
            BillingEvent::ActionStarted(BillingAction::Post) => {
                "Posting invoice to Accounts Receivable...".to_string()
            }
            BillingEvent::ShipmentAccepted => {
                "Customer accepted the shipment. Matching documents...".to_string()
            }
            BillingEvent::ShipmentRefused => {
                "Customer refused shipment. Billing cannot proceed.".to_string()
            }
            BillingEvent::InvoiceGenerated(invoice) => format!(
                "Invoice #{} generated for {} {}, due {}.",
                invoice.number, invoice.currency, invoice.amount, invoice.due_date
            ),
            BillingEvent::InvoicePosted(entry) => format!(
                "Posted: Dr Accounts Receivable {amount} / Cr Sales Revenue {amount}.",
                amount = entry.debit_total()
            ),
            BillingEvent::StageRestarted => "Billing restarted: awaiting shipment acceptance.".to_string(),
        };
        Some(line)
    }
}

/// Aggregate root: the Billing stage of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Billing {
    id: RunId,
    terms: OrderTerms,
    substate: BillingSubstate,
    in_flight: Option<BillingAction>,
    invoice: Option<Invoice>,
    version: u64,
}

impl Billing {
    pub fn new(id: RunId, terms: OrderTerms) -> Self {
        Self {
            id,
            terms,
            substate: BillingSubstate::AwaitingAcceptance,
            in_flight: None,
            invoice: None,
            version: 0,
        }
    }

    pub fn invoice(&self) -> Option<&Invoice> {
        self.invoice.as_ref()
    }

    pub fn is_halted(&self) -> bool {
        self.substate == BillingSubstate::Halted
    }

    fn ensure_substate(&self, expected: BillingSubstate, what: &str) -> Result<(), DomainError> {
        if self.substate != expected {
            return Err(DomainError::invalid_transition(format!(
                "cannot {what} in billing sub-state {:?}",
                self.substate
            )));
        }
        Ok(())
    }

    fn handle_settle(&self, at: DateTime<Utc>) -> Result<Vec<BillingEvent>, DomainError> {
        match self.in_flight {
            Some(BillingAction::GenerateInvoice) => Ok(vec![BillingEvent::InvoiceGenerated(
                Invoice::issue(&self.terms, at),
            )]),
            Some(BillingAction::Post) => {
                let Some(invoice) = &self.invoice else {
                    return Err(DomainError::invariant("posting requires a generated invoice"));
                };
                Ok(vec![BillingEvent::InvoicePosted(invoice.receivable_entry())])
            }
            None => Err(DomainError::conflict("no billing action in flight")),
        }
    }
}

impl AggregateRoot for Billing {
    type Id = RunId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Billing {
    type Command = BillingCommand;
    type Event = BillingEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            BillingEvent::ActionStarted(action) => {
                self.in_flight = Some(*action);
            }
            BillingEvent::ShipmentAccepted => {
                self.substate = BillingSubstate::DocMatch;
            }
            BillingEvent::ShipmentRefused => {
                self.substate = BillingSubstate::Halted;
            }
            BillingEvent::InvoiceGenerated(invoice) => {
                self.in_flight = None;
                self.invoice = Some(invoice.clone());
                self.substate = BillingSubstate::InvoiceGenerated;
            }
            BillingEvent::InvoicePosted(_) => {
                self.in_flight = None;
                self.substate = BillingSubstate::Posted;
            }
            BillingEvent::StageRestarted => {
                self.in_flight = None;
                self.invoice = None;
                self.substate = BillingSubstate::AwaitingAcceptance;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        if let BillingCommand::Settle { at } = command {
            return self.handle_settle(*at);
        }
        ensure_idle(self.in_flight)?;

        match command {
            BillingCommand::DecideAcceptance { accepted } => {
                self.ensure_substate(BillingSubstate::AwaitingAcceptance, "record acceptance")?;
                if *accepted {
                    Ok(vec![BillingEvent::ShipmentAccepted])
                } else {
                    Ok(vec![BillingEvent::ShipmentRefused])
                }
            }
            BillingCommand::GenerateInvoice => {
                self.ensure_substate(BillingSubstate::DocMatch, "generate invoice")?;
                Ok(vec![BillingEvent::ActionStarted(BillingAction::GenerateInvoice)])
            }
            BillingCommand::Post => {
                self.ensure_substate(BillingSubstate::InvoiceGenerated, "post invoice")?;
                Ok(vec![BillingEvent::ActionStarted(BillingAction::Post)])
            }
            BillingCommand::Retry => {
                self.ensure_substate(BillingSubstate::Halted, "retry")?;
                Ok(vec![BillingEvent::StageRestarted])
            }
            BillingCommand::Settle { .. } => Err(DomainError::conflict(
                "settle is only valid while an action is in flight",
            )),
        }
    }
}

impl StageMachine for Billing {
    type Action = BillingAction;
    type Substate = BillingSubstate;

    const STAGE: ProcessStage = ProcessStage::Billing;

    fn substate(&self) -> BillingSubstate {
        self.substate
    }

    fn in_flight(&self) -> Option<BillingAction> {
        self.in_flight
    }

    fn is_complete(&self) -> bool {
        self.substate == BillingSubstate::Posted
    }

    fn available_actions(&self) -> Vec<&'static str> {
        if self.in_flight.is_some() {
            return Vec::new();
        }
        match self.substate {
            BillingSubstate::AwaitingAcceptance => vec!["decide_acceptance"],
            BillingSubstate::Halted => vec!["retry"],
            BillingSubstate::DocMatch => vec!["generate_invoice"],
            BillingSubstate::InvoiceGenerated => vec!["post_invoice"],
            BillingSubstate::Posted => Vec::new(),
        }
    }
}
