use serde::{Deserialize, Serialize};

use o2c_events::ProcessStage;

/// Every operation a collaborator can request, addressed to one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    // 1.0 Sales Order
    Initiate,
    DecideCredit { approved: bool },
    SendAcknowledgement,
    Procure,
    Produce,
    ApproveOrder,
    // 2.0 Shipping
    SubmitPickedQuantity { quantity: String },
    StartPacking,
    ConfirmPacked,
    // 3.0 Billing
    DecideShipmentAcceptance { accepted: bool },
    GenerateInvoice,
    PostInvoice,
    // 4.0 Collections
    DecideInvoiceAcceptance { accepted: bool },
    ConfirmTransfer,
    /// Leave the active stage's halt sub-state.
    RetryStage,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Initiate => "initiate",
            Action::DecideCredit { .. } => "decide_credit",
            Action::SendAcknowledgement => "send_acknowledgement",
            Action::Procure => "procure",
            Action::Produce => "produce",
            Action::ApproveOrder => "approve_order",
            Action::SubmitPickedQuantity { .. } => "submit_picked_quantity",
            Action::StartPacking => "start_packing",
            Action::ConfirmPacked => "confirm_packed",
            Action::DecideShipmentAcceptance { .. } => "decide_shipment_acceptance",
            Action::GenerateInvoice => "generate_invoice",
            Action::PostInvoice => "post_invoice",
            Action::DecideInvoiceAcceptance { .. } => "decide_invoice_acceptance",
            Action::ConfirmTransfer => "confirm_transfer",
            Action::RetryStage => "retry_stage",
        }
    }

    /// The stage this action belongs to; `None` for stage-local retries.
    pub fn stage(&self) -> Option<ProcessStage> {
        match self {
            Action::Initiate
            | Action::DecideCredit { .. }
            | Action::SendAcknowledgement
            | Action::Procure
            | Action::Produce
            | Action::ApproveOrder => Some(ProcessStage::SalesOrder),
            Action::SubmitPickedQuantity { .. } | Action::StartPacking | Action::ConfirmPacked => {
                Some(ProcessStage::Shipping)
            }
            Action::DecideShipmentAcceptance { .. } | Action::GenerateInvoice | Action::PostInvoice => {
                Some(ProcessStage::Billing)
            }
            Action::DecideInvoiceAcceptance { .. } | Action::ConfirmTransfer => {
                Some(ProcessStage::Collections)
            }
            Action::RetryStage => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_are_tagged_by_name() {
        let json = serde_json::to_value(Action::SubmitPickedQuantity {
            quantity: "50".into(),
        })
        .unwrap();
        assert_eq!(json["action"], "submit_picked_quantity");
        assert_eq!(json["quantity"], "50");

        let parsed: Action =
            serde_json::from_str(r#"{"action":"decide_credit","approved":false}"#).unwrap();
        assert_eq!(parsed, Action::DecideCredit { approved: false });
    }

    #[test]
    fn every_stage_action_names_its_stage() {
        assert_eq!(Action::Produce.stage(), Some(ProcessStage::SalesOrder));
        assert_eq!(Action::StartPacking.stage(), Some(ProcessStage::Shipping));
        assert_eq!(Action::PostInvoice.stage(), Some(ProcessStage::Billing));
        assert_eq!(Action::ConfirmTransfer.stage(), Some(ProcessStage::Collections));
        assert_eq!(Action::RetryStage.stage(), None);
    }
}
