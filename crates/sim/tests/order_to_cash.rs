use std::sync::Arc;

use o2c_accounting::PostingSide;
use o2c_catalog::Scenario;
use o2c_collections::CollectionsSubstate;
use o2c_core::DomainError;
use o2c_events::ProcessStage;
use o2c_invoicing::BillingSubstate;
use o2c_sales::SalesSubstate;
use o2c_shipping::ShippingSubstate;
use o2c_sim::{Document, InstantPause, RunSnapshot, SimConfig, Simulator, StageSubstate};

fn simulator(scenario: Scenario) -> Simulator {
    Simulator::with_pause(
        SimConfig::default().with_scenario(scenario),
        Arc::new(InstantPause),
    )
}

async fn through_sales(sim: &Simulator) -> RunSnapshot {
    sim.initiate().await.unwrap();
    sim.submit_credit_decision(true).await.unwrap();
    let snapshot = sim.send_acknowledgement().await.unwrap();

    let mut snapshot = snapshot;
    if snapshot.available_actions.contains(&"procure") {
        snapshot = sim.procure().await.unwrap();
    }
    if snapshot.available_actions.contains(&"produce") {
        sim.produce().await.unwrap();
    }
    sim.approve_order().await.unwrap()
}

async fn through_shipping(sim: &Simulator) -> RunSnapshot {
    sim.submit_picked_quantity("50").await.unwrap();
    sim.start_packing().await.unwrap();
    sim.confirm_packed().await.unwrap()
}

async fn through_billing(sim: &Simulator) -> RunSnapshot {
    sim.submit_shipment_acceptance(true).await.unwrap();
    sim.generate_invoice().await.unwrap();
    sim.post_invoice().await.unwrap()
}

async fn complete_run(sim: &Simulator) -> RunSnapshot {
    through_sales(sim).await;
    through_shipping(sim).await;
    through_billing(sim).await;
    sim.submit_invoice_acceptance(true).await.unwrap();
    sim.confirm_transfer().await.unwrap()
}

#[tokio::test]
async fn standard_run_completes_with_balanced_books() {
    let sim = simulator(Scenario::Standard);
    let snapshot = complete_run(&sim).await;

    assert_eq!(snapshot.stage, ProcessStage::Complete);
    assert_eq!(snapshot.substate, None);
    assert_eq!(snapshot.inventory.finished_goods, 100);
    assert_eq!(snapshot.inventory.raw_materials, 100);
    assert_eq!(snapshot.postings.len(), 4);

    let summary = sim.summary().expect("summary once complete");
    assert_eq!(summary.revenue, 150_000);
    assert_eq!(summary.cost_of_goods_sold, 75_000);
    assert_eq!(summary.net_profit, 75_000);
    assert_eq!(summary.entries.len(), 2);
    for entry in &summary.entries {
        assert_eq!(entry.debit_total(), 150_000);
        assert_eq!(entry.credit_total(), 150_000);
    }

    let balances = &summary.balances;
    assert!(balances.is_balanced());
    assert_eq!(balances.account("1000").unwrap().balance(), 150_000);
    assert_eq!(balances.account("1200").unwrap().balance(), 0);
    assert_eq!(balances.account("4000").unwrap().balance(), -150_000);
}

#[tokio::test]
async fn standard_run_skips_production_and_procurement() {
    let sim = simulator(Scenario::Standard);
    sim.initiate().await.unwrap();
    sim.submit_credit_decision(true).await.unwrap();
    let snapshot = sim.send_acknowledgement().await.unwrap();

    assert_eq!(
        snapshot.substate,
        Some(StageSubstate::SalesOrder(SalesSubstate::StockCheck))
    );
    assert_eq!(snapshot.available_actions, vec!["approve"]);

    let err = sim.produce().await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition(_)));
    let err = sim.procure().await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition(_)));
}

#[tokio::test]
async fn stockout_runs_production_only() {
    let sim = simulator(Scenario::Stockout);
    sim.initiate().await.unwrap();
    sim.submit_credit_decision(true).await.unwrap();
    let snapshot = sim.send_acknowledgement().await.unwrap();
    assert_eq!(snapshot.available_actions, vec!["produce"]);

    let snapshot = sim.produce().await.unwrap();
    assert_eq!(snapshot.inventory.finished_goods, 50);
    assert_eq!(snapshot.inventory.raw_materials, 100);
    assert_eq!(
        snapshot.substate,
        Some(StageSubstate::SalesOrder(SalesSubstate::ReadyToApprove))
    );
}

#[tokio::test]
async fn supply_chain_crisis_procures_then_produces() {
    let sim = simulator(Scenario::SupplyChainCrisis);
    sim.initiate().await.unwrap();
    sim.submit_credit_decision(true).await.unwrap();
    let snapshot = sim.send_acknowledgement().await.unwrap();
    assert_eq!(snapshot.available_actions, vec!["procure"]);

    let snapshot = sim.procure().await.unwrap();
    assert_eq!(snapshot.inventory.raw_materials, 50);
    assert_eq!(snapshot.inventory.finished_goods, 0);
    assert_eq!(
        snapshot.substate,
        Some(StageSubstate::SalesOrder(SalesSubstate::Production))
    );

    let snapshot = sim.produce().await.unwrap();
    assert_eq!(snapshot.inventory.finished_goods, 50);
    assert_eq!(snapshot.inventory.raw_materials, 50);

    let snapshot = complete_rest(&sim).await;
    assert_eq!(snapshot.stage, ProcessStage::Complete);
    assert_eq!(sim.summary().unwrap().final_inventory.finished_goods, 50);
}

async fn complete_rest(sim: &Simulator) -> RunSnapshot {
    sim.approve_order().await.unwrap();
    through_shipping(sim).await;
    through_billing(sim).await;
    sim.submit_invoice_acceptance(true).await.unwrap();
    sim.confirm_transfer().await.unwrap()
}

#[tokio::test]
async fn wrong_picked_quantities_are_rejected_without_change() {
    let sim = simulator(Scenario::Standard);
    through_sales(&sim).await;
    let before = sim.snapshot();

    for input in ["49", "51", "abc", ""] {
        let err = sim.submit_picked_quantity(input).await.unwrap_err();
        let DomainError::Validation(message) = &err else {
            panic!("Expected validation error for {input:?}, got {err:?}");
        };
        assert!(message.contains("50"), "message should name the required quantity: {message}");
        assert_eq!(sim.snapshot(), before);
    }

    let snapshot = sim.submit_picked_quantity("50").await.unwrap();
    assert_eq!(
        snapshot.substate,
        Some(StageSubstate::Shipping(ShippingSubstate::PickingComplete))
    );
}

#[tokio::test]
async fn shipment_refusal_halts_billing_until_retry() {
    let sim = simulator(Scenario::Standard);
    through_sales(&sim).await;
    through_shipping(&sim).await;

    let snapshot = sim.submit_shipment_acceptance(false).await.unwrap();
    assert_eq!(
        snapshot.substate,
        Some(StageSubstate::Billing(BillingSubstate::Halted))
    );
    assert!(snapshot.postings.is_empty());
    assert!(sim.generate_invoice().await.is_err());
    assert!(sim.post_invoice().await.is_err());

    let snapshot = sim.retry_stage().await.unwrap();
    assert_eq!(
        snapshot.substate,
        Some(StageSubstate::Billing(BillingSubstate::AwaitingAcceptance))
    );
    let snapshot = through_billing(&sim).await;
    assert_eq!(snapshot.stage, ProcessStage::Collections);
    assert_eq!(snapshot.postings.len(), 2);
}

#[tokio::test]
async fn invoice_dispute_halts_collections_until_retry() {
    let sim = simulator(Scenario::Standard);
    through_sales(&sim).await;
    through_shipping(&sim).await;
    through_billing(&sim).await;

    let snapshot = sim.submit_invoice_acceptance(false).await.unwrap();
    assert_eq!(
        snapshot.substate,
        Some(StageSubstate::Collections(CollectionsSubstate::Disputed))
    );
    // Only the billing entry is on the books.
    assert_eq!(snapshot.postings.len(), 2);
    assert!(sim.confirm_transfer().await.is_err());
    assert!(sim.summary().is_none());

    sim.retry_stage().await.unwrap();
    sim.submit_invoice_acceptance(true).await.unwrap();
    let snapshot = sim.confirm_transfer().await.unwrap();
    assert_eq!(snapshot.stage, ProcessStage::Complete);
    assert_eq!(snapshot.postings.len(), 4);
}

#[tokio::test]
async fn credit_rejection_can_be_retried() {
    let sim = simulator(Scenario::Standard);
    sim.initiate().await.unwrap();
    let snapshot = sim.submit_credit_decision(false).await.unwrap();
    assert_eq!(
        snapshot.substate,
        Some(StageSubstate::SalesOrder(SalesSubstate::CreditRejected))
    );
    assert_eq!(snapshot.available_actions, vec!["retry"]);
    assert!(sim.send_acknowledgement().await.is_err());

    let snapshot = sim.retry_stage().await.unwrap();
    assert_eq!(
        snapshot.substate,
        Some(StageSubstate::SalesOrder(SalesSubstate::ReviewPo))
    );
    let snapshot = complete_run(&sim).await;
    assert_eq!(snapshot.stage, ProcessStage::Complete);
}

#[tokio::test]
async fn credit_figures_are_advisory() {
    let sim = simulator(Scenario::Standard);
    let snapshot = sim.initiate().await.unwrap();
    assert_eq!(snapshot.credit.credit_limit, 250_000);
    assert_eq!(snapshot.credit.current_exposure, 45_000);
    assert_eq!(snapshot.credit.order_value, 150_000);
    assert_eq!(snapshot.credit.new_exposure, 195_000);
    assert!(!snapshot.credit.exceeds_limit);
    assert_eq!(snapshot.order.order_value(), 150_000);
}

#[tokio::test]
async fn actions_for_inactive_stages_are_rejected() {
    let sim = simulator(Scenario::Standard);
    let before = sim.snapshot();

    for result in [
        sim.submit_picked_quantity("50").await,
        sim.generate_invoice().await,
        sim.confirm_transfer().await,
        sim.retry_stage().await,
    ] {
        assert!(matches!(result, Err(DomainError::InvalidTransition(_))));
    }
    assert_eq!(sim.snapshot(), before);
}

#[tokio::test]
async fn completed_run_rejects_further_actions() {
    let sim = simulator(Scenario::Standard);
    complete_run(&sim).await;
    let err = sim.initiate().await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition(_)));
    assert_eq!(sim.snapshot().postings.len(), 4);
}

#[tokio::test]
async fn documents_accumulate_in_issue_order() {
    let sim = simulator(Scenario::Standard);
    let snapshot = complete_run(&sim).await;
    let titles: Vec<&str> = snapshot.documents.iter().map(Document::title).collect();
    assert_eq!(
        titles,
        vec![
            "Customer Purchase Order",
            "Order Acknowledgement",
            "Standard Order",
            "Picking Ticket",
            "Packing Slip",
            "Bill of Lading",
            "Commercial Invoice",
            "Remittance Advice",
        ]
    );
}

#[tokio::test]
async fn trace_narrates_each_stage() {
    let sim = simulator(Scenario::Stockout);
    sim.initiate().await.unwrap();
    sim.submit_credit_decision(true).await.unwrap();
    sim.send_acknowledgement().await.unwrap();
    let snapshot = sim.produce().await.unwrap();

    let messages: Vec<&str> = snapshot.trace.iter().map(|e| e.message.as_str()).collect();
    assert!(messages.contains(&"Received PO. Initiating Sales Order process..."));
    assert!(messages.contains(&"Fetching Credit Data..."));
    assert!(messages.contains(&"Production Complete. Inventory updated to 50."));

    let sequences: Vec<u64> = snapshot.trace.iter().map(|e| e.sequence).collect();
    let expected: Vec<u64> = (1..=sequences.len() as u64).collect();
    assert_eq!(sequences, expected);

    let snapshot = complete_rest(&sim).await;
    for stage in [
        ProcessStage::Shipping,
        ProcessStage::Billing,
        ProcessStage::Collections,
        ProcessStage::Complete,
    ] {
        assert!(snapshot.trace.iter().any(|e| e.stage == stage));
    }
}

#[tokio::test]
async fn reset_restores_catalog_state() {
    let sim = simulator(Scenario::SupplyChainCrisis);
    let initial = sim.snapshot();
    through_sales(&sim).await;
    through_shipping(&sim).await;
    through_billing(&sim).await;
    assert_eq!(sim.snapshot().postings.len(), 2);

    let snapshot = sim.reset_run();
    assert_ne!(snapshot.run_id, initial.run_id);
    assert_eq!(snapshot.scenario, Scenario::SupplyChainCrisis);
    assert_eq!(snapshot.stage, ProcessStage::SalesOrder);
    assert_eq!(snapshot.inventory, initial.inventory);
    assert!(snapshot.postings.is_empty());
    assert!(snapshot.trace.is_empty());
    assert!(matches!(snapshot.documents.as_slice(), [Document::PurchaseOrder(_)]));
    assert!(sim.summary().is_none());
}

#[tokio::test]
async fn reset_clears_the_trace() {
    let sim = simulator(Scenario::Standard);
    assert!(sim.snapshot().trace.is_empty());

    let snapshot = sim.initiate().await.unwrap();
    assert!(!snapshot.trace.is_empty());

    let snapshot = sim.reset_run();
    assert!(snapshot.trace.is_empty());
    assert_eq!(snapshot.available_actions, vec!["initiate"]);
}

#[tokio::test]
async fn snapshot_and_summary_serialize() {
    let sim = simulator(Scenario::Standard);
    complete_run(&sim).await;

    let snapshot = serde_json::to_value(sim.snapshot()).unwrap();
    assert_eq!(snapshot["stage"], "complete");
    assert_eq!(snapshot["postings"][0]["side"], "debit");
    assert_eq!(snapshot["documents"][0]["kind"], "purchase_order");

    let summary = serde_json::to_value(sim.summary().unwrap()).unwrap();
    assert_eq!(summary["revenue"], 150_000);
    assert_eq!(summary["net_profit"], 75_000);
}

#[tokio::test]
async fn billing_posts_receivable_then_collections_clears_it() {
    let sim = simulator(Scenario::Standard);
    let snapshot = complete_run(&sim).await;
    let lines: Vec<(&str, PostingSide, &str)> = snapshot
        .postings
        .iter()
        .map(|p| (p.account.code.as_str(), p.side, p.label.as_str()))
        .collect();
    assert_eq!(
        lines,
        vec![
            ("1200", PostingSide::Debit, "Inv #505"),
            ("4000", PostingSide::Credit, "Inv #505"),
            ("1000", PostingSide::Debit, "Transfer"),
            ("1200", PostingSide::Credit, "Transfer"),
        ]
    );
}
