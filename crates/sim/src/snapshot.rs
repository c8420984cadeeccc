use serde::Serialize;

use o2c_accounting::LedgerPosting;
use o2c_catalog::{OrderTerms, Scenario};
use o2c_collections::CollectionsSubstate;
use o2c_core::RunId;
use o2c_events::{ProcessStage, StageMachine, TraceEntry};
use o2c_inventory::Inventory;
use o2c_invoicing::BillingSubstate;
use o2c_sales::{CreditAssessment, SalesSubstate};
use o2c_shipping::ShippingSubstate;

use crate::{ActiveStage, Document, SimulationRun};

/// Sub-state of whichever stage is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "substate", rename_all = "snake_case")]
pub enum StageSubstate {
    SalesOrder(SalesSubstate),
    Shipping(ShippingSubstate),
    Billing(BillingSubstate),
    Collections(CollectionsSubstate),
}

impl StageSubstate {
    fn of(stage: &ActiveStage) -> Option<Self> {
        match stage {
            ActiveStage::SalesOrder(m) => Some(StageSubstate::SalesOrder(m.substate())),
            ActiveStage::Shipping(m) => Some(StageSubstate::Shipping(m.substate())),
            ActiveStage::Billing(m) => Some(StageSubstate::Billing(m.substate())),
            ActiveStage::Collections(m) => Some(StageSubstate::Collections(m.substate())),
            ActiveStage::Complete => None,
        }
    }
}

/// Read-only view of a run handed to presentation collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSnapshot {
    pub run_id: RunId,
    pub scenario: Scenario,
    pub scenario_title: &'static str,
    pub stage: ProcessStage,
    pub stage_label: &'static str,
    pub stage_description: &'static str,
    pub substate: Option<StageSubstate>,
    pub in_flight: Option<&'static str>,
    pub available_actions: Vec<&'static str>,
    pub inventory: Inventory,
    pub order: OrderTerms,
    pub credit: CreditAssessment,
    pub trace: Vec<TraceEntry>,
    pub documents: Vec<Document>,
    pub postings: Vec<LedgerPosting>,
}

impl RunSnapshot {
    pub fn capture(run: &SimulationRun) -> Self {
        let stage = run.stage().stage();
        Self {
            run_id: run.id(),
            scenario: run.scenario(),
            scenario_title: run.scenario().title(),
            stage,
            stage_label: stage.label(),
            stage_description: stage.description(),
            substate: StageSubstate::of(run.stage()),
            in_flight: run.stage().in_flight(),
            available_actions: run.stage().available_actions(),
            inventory: run.inventory(),
            order: run.terms().clone(),
            credit: CreditAssessment::for_order(run.terms()),
            trace: run.trace().entries().to_vec(),
            documents: run.documents().to_vec(),
            postings: run.ledger().postings().cloned().collect(),
        }
    }
}
