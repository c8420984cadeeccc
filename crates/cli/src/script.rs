//! Scripted operator: picks the next action from a snapshot.

use o2c_events::ProcessStage;
use o2c_sim::{Action, RunSnapshot};

/// Decisions the operator makes along the way.
///
/// Each "reject" flag applies to the first decision of its kind only, so a
/// scripted run always finishes after one halt and retry.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub reject_credit: bool,
    pub refuse_shipment: bool,
    pub dispute_invoice: bool,
    /// Entered before the correct quantity, to show the validation error.
    pub mistyped_pick: Option<String>,
}

impl Script {
    pub fn next_action(&mut self, snapshot: &RunSnapshot) -> Option<Action> {
        let available = &snapshot.available_actions;
        let first = *available.first()?;

        let action = match first {
            "initiate" => Action::Initiate,
            "decide_credit" => Action::DecideCredit {
                approved: !std::mem::take(&mut self.reject_credit),
            },
            "retry" => Action::RetryStage,
            "send_acknowledgement" => Action::SendAcknowledgement,
            "procure" => Action::Procure,
            "produce" => Action::Produce,
            "approve" => Action::ApproveOrder,
            "confirm_pick" => Action::SubmitPickedQuantity {
                quantity: self
                    .mistyped_pick
                    .take()
                    .unwrap_or_else(|| snapshot.order.quantity.to_string()),
            },
            "start_packing" => Action::StartPacking,
            "confirm_packed" => Action::ConfirmPacked,
            "decide_acceptance" if snapshot.stage == ProcessStage::Billing => {
                Action::DecideShipmentAcceptance {
                    accepted: !std::mem::take(&mut self.refuse_shipment),
                }
            }
            "decide_acceptance" => Action::DecideInvoiceAcceptance {
                accepted: !std::mem::take(&mut self.dispute_invoice),
            },
            "generate_invoice" => Action::GenerateInvoice,
            "post_invoice" => Action::PostInvoice,
            "confirm_transfer" => Action::ConfirmTransfer,
            other => {
                tracing::warn!(action = other, "no scripted response");
                return None;
            }
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use o2c_catalog::Scenario;
    use o2c_sim::{InstantPause, SimConfig, Simulator};

    async fn play(scenario: Scenario, mut script: Script) -> (Simulator, Vec<Action>) {
        let sim = Simulator::with_pause(
            SimConfig::default().with_scenario(scenario),
            Arc::new(InstantPause),
        );
        let mut played = Vec::new();
        let mut snapshot = sim.snapshot();
        while let Some(action) = script.next_action(&snapshot) {
            played.push(action.clone());
            snapshot = match sim.dispatch(action).await {
                Ok(snapshot) => snapshot,
                Err(_) => sim.snapshot(),
            };
        }
        (sim, played)
    }

    #[tokio::test]
    async fn default_script_completes_every_scenario() {
        for scenario in Scenario::ALL {
            let (sim, _) = play(scenario, Script::default()).await;
            assert_eq!(sim.snapshot().stage, ProcessStage::Complete, "{scenario}");
            assert!(sim.summary().is_some());
        }
    }

    #[tokio::test]
    async fn halts_are_retried_once() {
        let script = Script {
            reject_credit: true,
            refuse_shipment: true,
            dispute_invoice: true,
            mistyped_pick: Some("49".into()),
        };
        let (sim, played) = play(Scenario::Standard, script).await;
        assert_eq!(sim.snapshot().stage, ProcessStage::Complete);

        let retries = played.iter().filter(|a| **a == Action::RetryStage).count();
        assert_eq!(retries, 3);
        assert!(played.contains(&Action::SubmitPickedQuantity {
            quantity: "49".into()
        }));
    }
}
