//! Side effects carried by stage events.
//!
//! Stage machines stay pure; the run interprets what their events mean for
//! the inventory ledger, the ledger recorder and the document trail.

use o2c_accounting::JournalEntry;
use o2c_collections::CollectionsEvent;
use o2c_events::Event;
use o2c_inventory::StockChange;
use o2c_invoicing::BillingEvent;
use o2c_sales::SalesOrderEvent;
use o2c_shipping::ShipmentEvent;

use crate::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Stock(StockChange),
    Post(JournalEntry),
    Issue(Document),
}

/// Maps a stage event to the effect the orchestrator must carry out.
pub trait StageEffects: Event {
    fn effect(&self) -> Option<Effect>;
}

impl StageEffects for SalesOrderEvent {
    fn effect(&self) -> Option<Effect> {
        match self {
            SalesOrderEvent::AcknowledgementIssued(ack) => {
                Some(Effect::Issue(Document::OrderAcknowledgement(ack.clone())))
            }
            SalesOrderEvent::StandardOrderIssued(so) => {
                Some(Effect::Issue(Document::StandardOrder(so.clone())))
            }
            SalesOrderEvent::GoodsReceived(change) | SalesOrderEvent::ProductionCompleted(change) => {
                Some(Effect::Stock(*change))
            }
            _ => None,
        }
    }
}

impl StageEffects for ShipmentEvent {
    fn effect(&self) -> Option<Effect> {
        match self {
            ShipmentEvent::PickingCompleted(ticket) => {
                Some(Effect::Issue(Document::PickingTicket(ticket.clone())))
            }
            ShipmentEvent::PackingStarted(slip) => Some(Effect::Issue(Document::PackingSlip(slip.clone()))),
            ShipmentEvent::Shipped(bol) => Some(Effect::Issue(Document::BillOfLading(bol.clone()))),
            ShipmentEvent::ActionStarted { .. } => None,
        }
    }
}

impl StageEffects for BillingEvent {
    fn effect(&self) -> Option<Effect> {
        match self {
            BillingEvent::InvoiceGenerated(invoice) => Some(Effect::Issue(Document::Invoice(invoice.clone()))),
            BillingEvent::InvoicePosted(entry) => Some(Effect::Post(entry.clone())),
            _ => None,
        }
    }
}

impl StageEffects for CollectionsEvent {
    fn effect(&self) -> Option<Effect> {
        match self {
            CollectionsEvent::InvoiceAccepted(advice) => {
                Some(Effect::Issue(Document::RemittanceAdvice(advice.clone())))
            }
            CollectionsEvent::TransferCleared(entry) => Some(Effect::Post(entry.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use o2c_inventory::StockItem;

    #[test]
    fn production_sets_finished_goods() {
        let effect = SalesOrderEvent::ProductionCompleted(StockChange::finished_goods(50)).effect();
        let Some(Effect::Stock(change)) = effect else {
            panic!("Expected a stock effect");
        };
        assert_eq!(change.item, StockItem::FinishedGoods);
        assert_eq!(change.level, 50);
    }

    #[test]
    fn halts_carry_no_effect() {
        assert_eq!(BillingEvent::ShipmentRefused.effect(), None);
        assert_eq!(CollectionsEvent::InvoiceDisputed.effect(), None);
        assert_eq!(SalesOrderEvent::StageRestarted.effect(), None);
    }
}
