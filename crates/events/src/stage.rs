//! Process stage mechanics (framework only, no business rules).
//!
//! - One explicit state machine per stage
//! - Suspending actions are two-phase: the triggering command emits an
//!   "action started" event, a later settle command (issued once the pause
//!   resolves) emits the outcome. Each stage defines its own settle command
//!   since some need extra context (the sales stage reads inventory).
//! - While an action is in flight, every other command is rejected
//!
//! The orchestrator is responsible for pausing, settling, interpreting effects
//! and advancing to the next stage.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use o2c_core::{Aggregate, DomainError};

/// Ordered phases of the order-to-cash process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStage {
    SalesOrder,
    Shipping,
    Billing,
    Collections,
    Complete,
}

impl ProcessStage {
    pub const ALL: [ProcessStage; 5] = [
        ProcessStage::SalesOrder,
        ProcessStage::Shipping,
        ProcessStage::Billing,
        ProcessStage::Collections,
        ProcessStage::Complete,
    ];

    /// The stage that follows this one; `Complete` is terminal.
    pub fn next(self) -> ProcessStage {
        match self {
            ProcessStage::SalesOrder => ProcessStage::Shipping,
            ProcessStage::Shipping => ProcessStage::Billing,
            ProcessStage::Billing => ProcessStage::Collections,
            ProcessStage::Collections | ProcessStage::Complete => ProcessStage::Complete,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ProcessStage::Complete
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcessStage::SalesOrder => "1.0 Sales Order Entry",
            ProcessStage::Shipping => "2.0 Shipping",
            ProcessStage::Billing => "3.0 Billing",
            ProcessStage::Collections => "4.0 Collections",
            ProcessStage::Complete => "Complete",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ProcessStage::SalesOrder => "Receive PO, Check Inventory, Create SO",
            ProcessStage::Shipping => "Pick, Pack, & Ship Goods",
            ProcessStage::Billing => "Generate Invoice & Post to A/R",
            ProcessStage::Collections => "Receive Payment & Clear Account",
            ProcessStage::Complete => "Review the financial summary",
        }
    }
}

impl core::fmt::Display for ProcessStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// An action that suspends before resolving.
pub trait SimulatedAction: Copy + core::fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Stable action name (e.g. "produce").
    fn name(&self) -> &'static str;

    /// Unscaled simulated latency.
    fn latency(&self) -> Duration;
}

/// Stage state machine contract.
///
/// Implementors define:
/// - a typed sub-state (explicit state machine)
/// - the suspending actions and their latencies
pub trait StageMachine: Aggregate<Error = DomainError> {
    type Action: SimulatedAction;
    type Substate: Copy + core::fmt::Debug + PartialEq + Serialize;

    /// Which process stage this machine drives.
    const STAGE: ProcessStage;

    /// Current sub-state.
    fn substate(&self) -> Self::Substate;

    /// The suspended action, if any.
    fn in_flight(&self) -> Option<Self::Action>;

    /// Whether the stage has signalled completion to the orchestrator.
    fn is_complete(&self) -> bool;

    /// Names of the commands `handle` would currently accept (empty while an
    /// action is in flight).
    fn available_actions(&self) -> Vec<&'static str>;
}

/// Shared guard: reject anything while an action is suspended.
pub fn ensure_idle<A: SimulatedAction>(in_flight: Option<A>) -> Result<(), DomainError> {
    match in_flight {
        Some(action) => Err(DomainError::conflict(format!(
            "action '{}' is still in flight",
            action.name()
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Wait;

    impl SimulatedAction for Wait {
        fn name(&self) -> &'static str {
            "wait"
        }

        fn latency(&self) -> Duration {
            Duration::from_millis(10)
        }
    }

    #[test]
    fn stages_advance_in_fixed_order() {
        let mut stage = ProcessStage::SalesOrder;
        let mut seen = vec![stage];
        while !stage.is_terminal() {
            stage = stage.next();
            seen.push(stage);
        }
        assert_eq!(seen, ProcessStage::ALL.to_vec());
        assert_eq!(ProcessStage::Complete.next(), ProcessStage::Complete);
    }

    #[test]
    fn stage_order_matches_progression() {
        assert!(ProcessStage::SalesOrder < ProcessStage::Shipping);
        assert!(ProcessStage::Collections < ProcessStage::Complete);
    }

    #[test]
    fn ensure_idle_rejects_in_flight_action() {
        assert!(ensure_idle::<Wait>(None).is_ok());
        match ensure_idle(Some(Wait)) {
            Err(DomainError::Conflict(msg)) => assert!(msg.contains("wait")),
            other => panic!("expected conflict, got {other:?}"),
        }
    }
}
