use serde::{Deserialize, Serialize};

use o2c_collections::RemittanceAdvice;
use o2c_invoicing::Invoice;
use o2c_sales::{OrderAcknowledgement, PurchaseOrder, StandardOrder};
use o2c_shipping::{BillOfLading, PackingSlip, PickingTicket};

/// A business document issued during a run, in issue order.
///
/// Documents are for display only; no transition reads them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "document", rename_all = "snake_case")]
pub enum Document {
    PurchaseOrder(PurchaseOrder),
    OrderAcknowledgement(OrderAcknowledgement),
    StandardOrder(StandardOrder),
    PickingTicket(PickingTicket),
    PackingSlip(PackingSlip),
    BillOfLading(BillOfLading),
    Invoice(Invoice),
    RemittanceAdvice(RemittanceAdvice),
}

impl Document {
    pub fn title(&self) -> &'static str {
        match self {
            Document::PurchaseOrder(_) => "Customer Purchase Order",
            Document::OrderAcknowledgement(_) => "Order Acknowledgement",
            Document::StandardOrder(_) => "Standard Order",
            Document::PickingTicket(_) => "Picking Ticket",
            Document::PackingSlip(_) => "Packing Slip",
            Document::BillOfLading(_) => "Bill of Lading",
            Document::Invoice(_) => "Commercial Invoice",
            Document::RemittanceAdvice(_) => "Remittance Advice",
        }
    }
}
