//! One simulation run: the active stage machine plus everything its effects
//! touch (inventory, ledger, trace, documents).
//!
//! All methods are synchronous; suspension lives in [`crate::Simulator`].

use std::time::Duration;

use chrono::{DateTime, Utc};

use o2c_accounting::LedgerRecorder;
use o2c_catalog::{OrderTerms, Scenario, ScenarioCatalog};
use o2c_collections::{Collection, CollectionsCommand};
use o2c_core::{DomainError, RunId};
use o2c_events::{Event, ProcessStage, SimulatedAction, StageMachine, TraceLog};
use o2c_inventory::Inventory;
use o2c_invoicing::{Billing, BillingCommand};
use o2c_sales::{PurchaseOrder, SalesOrder, SalesOrderCommand};
use o2c_shipping::{Shipment, ShipmentCommand};

use crate::effects::{Effect, StageEffects};
use crate::{Action, Document};

/// The stage machine currently accepting actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveStage {
    SalesOrder(SalesOrder),
    Shipping(Shipment),
    Billing(Billing),
    Collections(Collection),
    Complete,
}

impl ActiveStage {
    fn open(stage: ProcessStage, id: RunId, terms: &OrderTerms) -> Self {
        match stage {
            ProcessStage::SalesOrder => ActiveStage::SalesOrder(SalesOrder::new(id, terms.clone())),
            ProcessStage::Shipping => ActiveStage::Shipping(Shipment::new(id, terms.clone())),
            ProcessStage::Billing => ActiveStage::Billing(Billing::new(id, terms.clone())),
            ProcessStage::Collections => ActiveStage::Collections(Collection::new(id, terms.clone())),
            ProcessStage::Complete => ActiveStage::Complete,
        }
    }

    pub fn stage(&self) -> ProcessStage {
        match self {
            ActiveStage::SalesOrder(_) => ProcessStage::SalesOrder,
            ActiveStage::Shipping(_) => ProcessStage::Shipping,
            ActiveStage::Billing(_) => ProcessStage::Billing,
            ActiveStage::Collections(_) => ProcessStage::Collections,
            ActiveStage::Complete => ProcessStage::Complete,
        }
    }

    pub fn in_flight(&self) -> Option<&'static str> {
        match self {
            ActiveStage::SalesOrder(m) => m.in_flight().map(|a| a.name()),
            ActiveStage::Shipping(m) => m.in_flight().map(|a| a.name()),
            ActiveStage::Billing(m) => m.in_flight().map(|a| a.name()),
            ActiveStage::Collections(m) => m.in_flight().map(|a| a.name()),
            ActiveStage::Complete => None,
        }
    }

    pub fn available_actions(&self) -> Vec<&'static str> {
        match self {
            ActiveStage::SalesOrder(m) => m.available_actions(),
            ActiveStage::Shipping(m) => m.available_actions(),
            ActiveStage::Billing(m) => m.available_actions(),
            ActiveStage::Collections(m) => m.available_actions(),
            ActiveStage::Complete => Vec::new(),
        }
    }
}

/// What one command did to a stage machine, detached from the machine's borrow.
struct Step {
    narration: Vec<String>,
    effects: Vec<Effect>,
    started: Option<(&'static str, Duration)>,
    complete: bool,
}

fn step<M>(machine: &mut M, command: &M::Command) -> Result<Step, DomainError>
where
    M: StageMachine,
    M::Event: StageEffects,
{
    let events = machine.execute(command)?;
    for event in &events {
        tracing::debug!(
            event_type = event.event_type(),
            event_version = event.version(),
            stage = ?M::STAGE,
            "stage event"
        );
    }
    Ok(Step {
        narration: events.iter().filter_map(|e| e.narrate()).collect(),
        effects: events.iter().filter_map(|e| e.effect()).collect(),
        started: machine.in_flight().map(|a| (a.name(), a.latency())),
        complete: machine.is_complete(),
    })
}

/// A suspending action that has started and awaits settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    pub run_id: RunId,
    pub action: &'static str,
    pub latency: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRun {
    id: RunId,
    scenario: Scenario,
    terms: OrderTerms,
    inventory: Inventory,
    stage: ActiveStage,
    ledger: LedgerRecorder,
    trace: TraceLog,
    documents: Vec<Document>,
}

impl SimulationRun {
    /// Fresh run for `scenario`, seeded from the catalog.
    pub fn start(scenario: Scenario) -> Self {
        let entry = ScenarioCatalog.entry(scenario);
        let id = RunId::new();
        let purchase_order = PurchaseOrder::from_terms(&entry.order);

        tracing::info!(
            run_id = %id,
            scenario = %scenario,
            finished_goods = entry.inventory.finished_goods,
            raw_materials = entry.inventory.raw_materials,
            po_number = %entry.order.po_number,
            "run started"
        );
        Self {
            id,
            scenario,
            stage: ActiveStage::open(ProcessStage::SalesOrder, id, &entry.order),
            terms: entry.order,
            inventory: entry.inventory,
            ledger: LedgerRecorder::new(id),
            trace: TraceLog::new(),
            documents: vec![Document::PurchaseOrder(purchase_order)],
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn terms(&self) -> &OrderTerms {
        &self.terms
    }

    pub fn inventory(&self) -> Inventory {
        self.inventory
    }

    pub fn stage(&self) -> &ActiveStage {
        &self.stage
    }

    pub fn ledger(&self) -> &LedgerRecorder {
        &self.ledger
    }

    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.stage, ActiveStage::Complete)
    }

    /// Run `action` against the active stage.
    ///
    /// Returns the pending suspension when the action started one; the
    /// caller must pause for its latency and then call [`Self::settle`].
    pub fn begin(&mut self, action: &Action, at: DateTime<Utc>) -> Result<Option<Pending>, DomainError> {
        let current = self.stage.stage();
        if let Some(target) = action.stage() {
            if target != current {
                tracing::warn!(action = action.name(), active = %current, "action addressed to inactive stage");
                return Err(DomainError::invalid_transition(format!(
                    "{} belongs to {target} but the active stage is {current}",
                    action.name()
                )));
            }
        }

        let step = match (&mut self.stage, action) {
            (ActiveStage::SalesOrder(m), Action::Initiate) => step(m, &SalesOrderCommand::Initiate),
            (ActiveStage::SalesOrder(m), Action::DecideCredit { approved }) => {
                step(m, &SalesOrderCommand::DecideCredit { approved: *approved })
            }
            (ActiveStage::SalesOrder(m), Action::SendAcknowledgement) => {
                step(m, &SalesOrderCommand::SendAcknowledgement)
            }
            (ActiveStage::SalesOrder(m), Action::Procure) => step(m, &SalesOrderCommand::Procure),
            (ActiveStage::SalesOrder(m), Action::Produce) => step(m, &SalesOrderCommand::Produce),
            (ActiveStage::SalesOrder(m), Action::ApproveOrder) => step(m, &SalesOrderCommand::Approve),
            (ActiveStage::SalesOrder(m), Action::RetryStage) => step(m, &SalesOrderCommand::Retry),

            (ActiveStage::Shipping(m), Action::SubmitPickedQuantity { quantity }) => step(
                m,
                &ShipmentCommand::ConfirmPick {
                    quantity: quantity.clone(),
                },
            ),
            (ActiveStage::Shipping(m), Action::StartPacking) => step(m, &ShipmentCommand::StartPacking),
            (ActiveStage::Shipping(m), Action::ConfirmPacked) => step(m, &ShipmentCommand::ConfirmPacked),

            (ActiveStage::Billing(m), Action::DecideShipmentAcceptance { accepted }) => {
                step(m, &BillingCommand::DecideAcceptance { accepted: *accepted })
            }
            (ActiveStage::Billing(m), Action::GenerateInvoice) => step(m, &BillingCommand::GenerateInvoice),
            (ActiveStage::Billing(m), Action::PostInvoice) => step(m, &BillingCommand::Post),
            (ActiveStage::Billing(m), Action::RetryStage) => step(m, &BillingCommand::Retry),

            (ActiveStage::Collections(m), Action::DecideInvoiceAcceptance { accepted }) => step(
                m,
                &CollectionsCommand::DecideAcceptance {
                    accepted: *accepted,
                    at,
                },
            ),
            (ActiveStage::Collections(m), Action::ConfirmTransfer) => {
                step(m, &CollectionsCommand::ConfirmTransfer)
            }
            (ActiveStage::Collections(m), Action::RetryStage) => step(m, &CollectionsCommand::Retry),

            (stage, action) => Err(DomainError::invalid_transition(format!(
                "{} is not available in {}",
                action.name(),
                stage.stage()
            ))),
        };

        let step = step.inspect_err(|err| {
            tracing::info!(action = action.name(), stage = %current, error = %err, "action rejected");
        })?;
        let started = step.started;
        self.absorb(current, step, at)?;

        Ok(started.map(|(action, latency)| Pending {
            run_id: self.id,
            action,
            latency,
        }))
    }

    /// Resolve the in-flight action of the active stage.
    pub fn settle(&mut self, at: DateTime<Utc>) -> Result<(), DomainError> {
        let current = self.stage.stage();
        let inventory = self.inventory;
        let step = match &mut self.stage {
            ActiveStage::SalesOrder(m) => step(m, &SalesOrderCommand::Settle { at, inventory }),
            ActiveStage::Shipping(m) => step(m, &ShipmentCommand::Settle { at }),
            ActiveStage::Billing(m) => step(m, &BillingCommand::Settle { at }),
            ActiveStage::Collections(m) => step(m, &CollectionsCommand::Settle { at }),
            ActiveStage::Complete => Err(DomainError::conflict("process is complete; nothing to settle")),
        }?;
        self.absorb(current, step, at)
    }

    fn absorb(&mut self, stage: ProcessStage, step: Step, at: DateTime<Utc>) -> Result<(), DomainError> {
        for line in step.narration {
            self.trace.record(stage, line, at);
        }

        for effect in step.effects {
            match effect {
                Effect::Stock(change) => {
                    self.inventory = self.inventory.apply(change);
                    tracing::info!(
                        item = %change.item,
                        level = change.level,
                        finished_goods = self.inventory.finished_goods,
                        raw_materials = self.inventory.raw_materials,
                        "inventory updated"
                    );
                }
                Effect::Post(entry) => {
                    tracing::info!(description = %entry.description, amount = %entry.debit_total(), "journal entry posted");
                    self.ledger.post(entry)?;
                }
                Effect::Issue(document) => {
                    tracing::debug!(document = document.title(), "document issued");
                    self.documents.push(document);
                }
            }
        }

        if step.complete {
            self.advance(stage, at);
        }
        Ok(())
    }

    fn advance(&mut self, from: ProcessStage, at: DateTime<Utc>) {
        let next = from.next();
        self.stage = ActiveStage::open(next, self.id, &self.terms);
        let message = if next.is_terminal() {
            "Order-to-cash cycle complete. Open items cleared.".to_string()
        } else {
            format!("{from} complete. Advancing to {next}.")
        };
        self.trace.record(next, message, at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(scenario: Scenario) -> SimulationRun {
        SimulationRun::start(scenario)
    }

    fn drive(run: &mut SimulationRun, action: Action) {
        if run.begin(&action, Utc::now()).unwrap().is_some() {
            run.settle(Utc::now()).unwrap();
        }
    }

    #[test]
    fn fresh_run_holds_the_purchase_order() {
        let run = run(Scenario::Stockout);
        assert_eq!(run.stage().stage(), ProcessStage::SalesOrder);
        assert_eq!(run.inventory(), Inventory::new(0, 100));
        assert!(matches!(run.documents(), [Document::PurchaseOrder(_)]));
        assert!(run.trace().is_empty());
        assert!(run.ledger().is_empty());
    }

    #[test]
    fn initiate_reports_its_latency() {
        let mut run = run(Scenario::Standard);
        let pending = run.begin(&Action::Initiate, Utc::now()).unwrap().unwrap();
        assert_eq!(pending.run_id, run.id());
        assert_eq!(pending.action, "initiate");
        assert_eq!(pending.latency, Duration::from_millis(1000));
        assert_eq!(run.stage().in_flight(), Some("initiate"));
    }

    #[test]
    fn actions_for_other_stages_are_rejected_without_change() {
        let mut run = run(Scenario::Standard);
        let before = run.clone();
        let err = run.begin(&Action::GenerateInvoice, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
        assert_eq!(run, before);
    }

    #[test]
    fn shipping_has_no_retry() {
        let mut run = run(Scenario::Standard);
        for action in [
            Action::Initiate,
            Action::DecideCredit { approved: true },
            Action::SendAcknowledgement,
            Action::ApproveOrder,
        ] {
            drive(&mut run, action);
        }
        assert_eq!(run.stage().stage(), ProcessStage::Shipping);
        let err = run.begin(&Action::RetryStage, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
    }

    #[test]
    fn stockout_production_fills_finished_goods() {
        let mut run = run(Scenario::Stockout);
        for action in [
            Action::Initiate,
            Action::DecideCredit { approved: true },
            Action::SendAcknowledgement,
            Action::Produce,
        ] {
            drive(&mut run, action);
        }
        assert_eq!(run.inventory(), Inventory::new(50, 100));

        drive(&mut run, Action::ApproveOrder);
        assert_eq!(run.stage().stage(), ProcessStage::Shipping);
        assert!(
            run.trace()
                .messages()
                .any(|m| m == "Production Complete. Inventory updated to 50.")
        );
    }

    #[test]
    fn settle_on_complete_run_is_a_conflict() {
        let mut run = run(Scenario::Standard);
        run.stage = ActiveStage::Complete;
        let err = run.settle(Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
