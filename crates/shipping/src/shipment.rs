use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use o2c_catalog::OrderTerms;
use o2c_core::{Aggregate, AggregateRoot, DomainError, RunId};
use o2c_events::{Event, ProcessStage, SimulatedAction, StageMachine, ensure_idle};

use crate::{BillOfLading, PackingSlip, PickingTicket, parse_picked_quantity};

/// Shipping sub-state lifecycle: `InputPick → PickingComplete → PackingStart → Shipped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingSubstate {
    InputPick,
    PickingComplete,
    PackingStart,
    Shipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingAction {
    ConfirmPick,
    ConfirmPacked,
}

impl SimulatedAction for ShippingAction {
    fn name(&self) -> &'static str {
        match self {
            ShippingAction::ConfirmPick => "confirm_pick",
            ShippingAction::ConfirmPacked => "confirm_packed",
        }
    }

    fn latency(&self) -> Duration {
        match self {
            ShippingAction::ConfirmPick => Duration::from_millis(1000),
            ShippingAction::ConfirmPacked => Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentCommand {
    /// Operator-entered picked quantity, as typed.
    ConfirmPick { quantity: String },
    StartPacking,
    ConfirmPacked,
    Settle { at: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentEvent {
    ActionStarted { action: ShippingAction, quantity: u32 },
    PickingCompleted(PickingTicket),
    PackingStarted(PackingSlip),
    Shipped(BillOfLading),
}

impl Event for ShipmentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ShipmentEvent::ActionStarted { .. } => "shipping.shipment.action_started",
            ShipmentEvent::PickingCompleted(_) => "shipping.shipment.picking_completed",
            ShipmentEvent::PackingStarted(_) => "shipping.shipment.packing_started",
            ShipmentEvent::Shipped(_) => "shipping.shipment.shipped",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn narrate(&self) -> Option<String> {
        let line = match self {
            ShipmentEvent::ActionStarted { action, quantity } => match action {
                ShippingAction::ConfirmPick => {
                    format!("Picked quantity {quantity} confirmed. Updating picking ticket...")
                }
                ShippingAction::ConfirmPacked => {
                    "Order fully packed. Handing over to carrier...".to_string()
                }
            },
            ShipmentEvent::PickingCompleted(ticket) => format!(
                "Picking complete: {}x {} from bin {}.",
                ticket.quantity_picked, ticket.sku, ticket.bin
            ),
            ShipmentEvent::PackingStarted(_) => {
                "Packing started. Goods are staged; verify contents and seal.".to_string()
            }
            ShipmentEvent::Shipped(bol) => format!(
                "Shipped {} units via {}. Tracking: {}.",
                bol.quantity_shipped, bol.carrier, bol.tracking_number
            ),
        };
        Some(line)
    }
}

/// Aggregate root: the Shipping stage of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipment {
    id: RunId,
    terms: OrderTerms,
    substate: ShippingSubstate,
    in_flight: Option<ShippingAction>,
    picking_ticket: Option<PickingTicket>,
    packing_slip: Option<PackingSlip>,
    bill_of_lading: Option<BillOfLading>,
    version: u64,
}

impl Shipment {
    pub fn new(id: RunId, terms: OrderTerms) -> Self {
        Self {
            id,
            terms,
            substate: ShippingSubstate::InputPick,
            in_flight: None,
            picking_ticket: None,
            packing_slip: None,
            bill_of_lading: None,
            version: 0,
        }
    }

    pub fn required_quantity(&self) -> u32 {
        self.terms.quantity
    }

    pub fn picking_ticket(&self) -> Option<&PickingTicket> {
        self.picking_ticket.as_ref()
    }

    pub fn packing_slip(&self) -> Option<&PackingSlip> {
        self.packing_slip.as_ref()
    }

    pub fn bill_of_lading(&self) -> Option<&BillOfLading> {
        self.bill_of_lading.as_ref()
    }

    fn ensure_substate(&self, expected: ShippingSubstate, what: &str) -> Result<(), DomainError> {
        if self.substate != expected {
            return Err(DomainError::invalid_transition(format!(
                "cannot {what} in shipping sub-state {:?}",
                self.substate
            )));
        }
        Ok(())
    }

    fn handle_settle(&self, at: DateTime<Utc>) -> Result<Vec<ShipmentEvent>, DomainError> {
        match self.in_flight {
            Some(ShippingAction::ConfirmPick) => Ok(vec![ShipmentEvent::PickingCompleted(
                PickingTicket::picked(&self.terms, self.terms.quantity),
            )]),
            Some(ShippingAction::ConfirmPacked) => Ok(vec![ShipmentEvent::Shipped(
                BillOfLading::issue(&self.terms, at),
            )]),
            None => Err(DomainError::conflict("no shipping action in flight")),
        }
    }
}

impl AggregateRoot for Shipment {
    type Id = RunId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Shipment {
    type Command = ShipmentCommand;
    type Event = ShipmentEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ShipmentEvent::ActionStarted { action, .. } => {
                self.in_flight = Some(*action);
            }
            ShipmentEvent::PickingCompleted(ticket) => {
                self.in_flight = None;
                self.picking_ticket = Some(ticket.clone());
                self.substate = ShippingSubstate::PickingComplete;
            }
            ShipmentEvent::PackingStarted(slip) => {
                self.packing_slip = Some(slip.clone());
                self.substate = ShippingSubstate::PackingStart;
            }
            ShipmentEvent::Shipped(bol) => {
                self.in_flight = None;
                self.bill_of_lading = Some(bol.clone());
                self.substate = ShippingSubstate::Shipped;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        if let ShipmentCommand::Settle { at } = command {
            return self.handle_settle(*at);
        }
        ensure_idle(self.in_flight)?;

        match command {
            ShipmentCommand::ConfirmPick { quantity } => {
                self.ensure_substate(ShippingSubstate::InputPick, "confirm picking")?;
                let quantity = parse_picked_quantity(quantity, self.terms.quantity)?;
                Ok(vec![ShipmentEvent::ActionStarted {
                    action: ShippingAction::ConfirmPick,
                    quantity,
                }])
            }
            ShipmentCommand::StartPacking => {
                self.ensure_substate(ShippingSubstate::PickingComplete, "start packing")?;
                Ok(vec![ShipmentEvent::PackingStarted(PackingSlip::for_order(
                    &self.terms,
                ))])
            }
            ShipmentCommand::ConfirmPacked => {
                self.ensure_substate(ShippingSubstate::PackingStart, "confirm packing")?;
                Ok(vec![ShipmentEvent::ActionStarted {
                    action: ShippingAction::ConfirmPacked,
                    quantity: self.terms.quantity,
                }])
            }
            ShipmentCommand::Settle { .. } => Err(DomainError::conflict(
                "settle is only valid while an action is in flight",
            )),
        }
    }
}

impl StageMachine for Shipment {
    type Action = ShippingAction;
    type Substate = ShippingSubstate;

    const STAGE: ProcessStage = ProcessStage::Shipping;

    fn substate(&self) -> ShippingSubstate {
        self.substate
    }

    fn in_flight(&self) -> Option<ShippingAction> {
        self.in_flight
    }

    fn is_complete(&self) -> bool {
        self.substate == ShippingSubstate::Shipped
    }

    fn available_actions(&self) -> Vec<&'static str> {
        if self.in_flight.is_some() {
            return Vec::new();
        }
        match self.substate {
            ShippingSubstate::InputPick => vec!["confirm_pick"],
            ShippingSubstate::PickingComplete => vec!["start_packing"],
            ShippingSubstate::PackingStart => vec!["confirm_packed"],
            ShippingSubstate::Shipped => Vec::new(),
        }
    }
}
