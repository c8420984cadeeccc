//! Process orchestrator.
//!
//! `Simulator` owns the single active run and drives every action through the
//! same pipeline:
//!
//! ```text
//! Action
//!   ↓
//! 1. Lock run, route to the active stage machine (invalid stage → error)
//!   ↓
//! 2. Handle + apply, interpret effects (inventory, ledger, documents, trace)
//!   ↓
//! 3. If the action suspends: unlock, pause for its latency
//!   ↓
//! 4. Re-lock; if the run id is unchanged, settle and interpret again
//!   ↓
//! 5. Advance the stage on completion, return a snapshot
//! ```
//!
//! The run lock is never held across the pause. A caller sharing the
//! simulator sees the action in flight and gets a conflict error; a reset
//! during the pause replaces the run id so the late settlement is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use o2c_catalog::Scenario;
use o2c_core::DomainError;

use crate::{Action, Pause, RunSnapshot, RunSummary, SimConfig, SimulationRun, TokioPause};

pub struct Simulator {
    run: Mutex<SimulationRun>,
    pause: Arc<dyn Pause>,
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("run", &self.lock().id())
            .finish_non_exhaustive()
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Simulator {
    /// Real-time simulator with latencies scaled by `config`.
    pub fn new(config: SimConfig) -> Self {
        Self::with_pause(config, Arc::new(TokioPause::new(config.latency_scale)))
    }

    pub fn with_pause(config: SimConfig, pause: Arc<dyn Pause>) -> Self {
        Self {
            run: Mutex::new(SimulationRun::start(config.scenario)),
            pause,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimulationRun> {
        // Runs are replaced wholesale, never left half-mutated across a panic.
        self.run.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn scenario(&self) -> Scenario {
        self.lock().scenario()
    }

    /// Switch scenario; always starts a fresh run.
    pub fn select_scenario(&self, scenario: Scenario) -> RunSnapshot {
        let mut run = self.lock();
        tracing::info!(from = %run.scenario(), to = %scenario, "scenario selected");
        *run = SimulationRun::start(scenario);
        RunSnapshot::capture(&run)
    }

    /// Restart the current scenario from its catalog inventory.
    pub fn reset_run(&self) -> RunSnapshot {
        let mut run = self.lock();
        tracing::info!(run_id = %run.id(), "run reset");
        let scenario = run.scenario();
        *run = SimulationRun::start(scenario);
        RunSnapshot::capture(&run)
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot::capture(&self.lock())
    }

    /// Financials; `None` until the run is complete.
    pub fn summary(&self) -> Option<RunSummary> {
        RunSummary::of(&self.lock())
    }

    /// Run one action to completion, suspending for its latency if it has one.
    pub async fn dispatch(&self, action: Action) -> Result<RunSnapshot, DomainError> {
        let pending = {
            let mut run = self.lock();
            match run.begin(&action, Utc::now())? {
                Some(pending) => pending,
                None => return Ok(RunSnapshot::capture(&run)),
            }
        };

        tracing::debug!(action = pending.action, latency_ms = pending.latency.as_millis() as u64, "suspending");
        self.pause.pause(pending.latency).await;

        let mut run = self.lock();
        if run.id() != pending.run_id {
            tracing::warn!(
                action = pending.action,
                stale_run = %pending.run_id,
                current_run = %run.id(),
                "run was reset during suspension; dropping settlement"
            );
            return Ok(RunSnapshot::capture(&run));
        }
        run.settle(Utc::now())?;
        Ok(RunSnapshot::capture(&run))
    }

    pub async fn initiate(&self) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::Initiate).await
    }

    pub async fn submit_credit_decision(&self, approved: bool) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::DecideCredit { approved }).await
    }

    pub async fn send_acknowledgement(&self) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::SendAcknowledgement).await
    }

    pub async fn procure(&self) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::Procure).await
    }

    pub async fn produce(&self) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::Produce).await
    }

    pub async fn approve_order(&self) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::ApproveOrder).await
    }

    pub async fn submit_picked_quantity(&self, quantity: &str) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::SubmitPickedQuantity {
            quantity: quantity.to_string(),
        })
        .await
    }

    pub async fn start_packing(&self) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::StartPacking).await
    }

    pub async fn confirm_packed(&self) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::ConfirmPacked).await
    }

    pub async fn submit_shipment_acceptance(&self, accepted: bool) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::DecideShipmentAcceptance { accepted }).await
    }

    pub async fn generate_invoice(&self) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::GenerateInvoice).await
    }

    pub async fn post_invoice(&self) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::PostInvoice).await
    }

    pub async fn submit_invoice_acceptance(&self, accepted: bool) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::DecideInvoiceAcceptance { accepted }).await
    }

    pub async fn confirm_transfer(&self) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::ConfirmTransfer).await
    }

    pub async fn retry_stage(&self) -> Result<RunSnapshot, DomainError> {
        self.dispatch(Action::RetryStage).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InstantPause;
    use o2c_events::ProcessStage;

    fn simulator(scenario: Scenario) -> Simulator {
        Simulator::with_pause(
            SimConfig::default().with_scenario(scenario),
            Arc::new(InstantPause),
        )
    }

    #[tokio::test]
    async fn suspending_action_settles_before_returning() {
        let sim = simulator(Scenario::Standard);
        let snapshot = sim.initiate().await.unwrap();
        assert_eq!(snapshot.in_flight, None);
        assert_eq!(snapshot.available_actions, vec!["decide_credit"]);
    }

    #[tokio::test]
    async fn select_scenario_starts_over() {
        let sim = simulator(Scenario::Standard);
        let first = sim.snapshot().run_id;
        sim.initiate().await.unwrap();

        let snapshot = sim.select_scenario(Scenario::SupplyChainCrisis);
        assert_ne!(snapshot.run_id, first);
        assert_eq!(snapshot.stage, ProcessStage::SalesOrder);
        assert_eq!(snapshot.inventory.finished_goods, 0);
        assert_eq!(snapshot.inventory.raw_materials, 0);
        assert!(snapshot.trace.is_empty());
        assert_eq!(sim.scenario(), Scenario::SupplyChainCrisis);
    }

    #[tokio::test]
    async fn summary_is_absent_before_completion() {
        let sim = simulator(Scenario::Standard);
        assert!(sim.summary().is_none());
    }
}
