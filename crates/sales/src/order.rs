use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use o2c_catalog::OrderTerms;
use o2c_core::{Aggregate, AggregateRoot, DomainError, RunId};
use o2c_events::{Event, ProcessStage, SimulatedAction, StageMachine, ensure_idle};
use o2c_inventory::{Inventory, StockChange};

use crate::{CreditAssessment, Fulfilment, OrderAcknowledgement, StandardOrder, StockAssessment};

/// Sales order sub-state lifecycle.
///
/// `ReviewPo → CreditCheck → GenerateAck → StockCheck → {Procurement →}
/// {Production →} ReadyToApprove → Approved`, with `CreditRejected` as the
/// halt reachable from the credit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesSubstate {
    ReviewPo,
    CreditCheck,
    CreditRejected,
    GenerateAck,
    StockCheck,
    Procurement,
    Production,
    ReadyToApprove,
    Approved,
}

/// Suspending actions of the Sales Order stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesAction {
    Initiate,
    ApproveCredit,
    SendAcknowledgement,
    Procure,
    Produce,
}

impl SimulatedAction for SalesAction {
    fn name(&self) -> &'static str {
        match self {
            SalesAction::Initiate => "initiate",
            SalesAction::ApproveCredit => "approve_credit",
            SalesAction::SendAcknowledgement => "send_acknowledgement",
            SalesAction::Procure => "procure",
            SalesAction::Produce => "produce",
        }
    }

    fn latency(&self) -> Duration {
        match self {
            SalesAction::Initiate | SalesAction::ApproveCredit | SalesAction::SendAcknowledgement => {
                Duration::from_millis(1000)
            }
            SalesAction::Procure | SalesAction::Produce => Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesOrderCommand {
    /// Start processing the received PO.
    Initiate,
    /// Operator's credit decision; the assessment figures do not gate it.
    DecideCredit { approved: bool },
    /// Send the acknowledgement and generate the internal standard order.
    SendAcknowledgement,
    /// Raise a purchase requisition for raw materials.
    Procure,
    /// Run production from raw materials.
    Produce,
    /// Release the order to shipping.
    Approve,
    /// Leave the credit-rejected halt and start over from PO review.
    Retry,
    /// Resolve the in-flight action against the current inventory.
    Settle {
        at: DateTime<Utc>,
        inventory: Inventory,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesOrderEvent {
    ActionStarted { action: SalesAction, quantity: u32 },
    CreditCheckOpened(CreditAssessment),
    CreditRejected(CreditAssessment),
    AcknowledgementIssued(OrderAcknowledgement),
    StandardOrderIssued(StandardOrder),
    StockChecked(StockAssessment),
    /// Effect: raw materials set to the received level.
    GoodsReceived(StockChange),
    /// Effect: finished goods set to the produced level.
    ProductionCompleted(StockChange),
    OrderApproved { sales_order_number: String },
    StageRestarted,
}

impl Event for SalesOrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SalesOrderEvent::ActionStarted { .. } => "sales.order.action_started",
            SalesOrderEvent::CreditCheckOpened(_) => "sales.order.credit_check_opened",
            SalesOrderEvent::CreditRejected(_) => "sales.order.credit_rejected",
            SalesOrderEvent::AcknowledgementIssued(_) => "sales.order.acknowledgement_issued",
            SalesOrderEvent::StandardOrderIssued(_) => "sales.order.standard_order_issued",
            SalesOrderEvent::StockChecked(_) => "sales.order.stock_checked",
            SalesOrderEvent::GoodsReceived(_) => "sales.order.goods_received",
            SalesOrderEvent::ProductionCompleted(_) => "sales.order.production_completed",
            SalesOrderEvent::OrderApproved { .. } => "sales.order.approved",
            SalesOrderEvent::StageRestarted => "sales.order.restarted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn narrate(&self) -> Option<String> {
        let line = match self {
            SalesOrderEvent::ActionStarted { action, quantity } => match action {
                SalesAction::Initiate => "Received PO. Initiating Sales Order process...".to_string(),
                SalesAction::ApproveCredit => {
                    "Credit Approved. Generating Order Acknowledgement...".to_string()
                }
                SalesAction::SendAcknowledgement => {
                    "Order Acknowledged. Generating Internal Sales Order...".to_string()
                }
                SalesAction::Procure => {
                    format!("Generating Purchase Requisition for {quantity} Frames...")
                }
                SalesAction::Produce => format!("Generating Production Order for {quantity} Bikes..."),
            },
            SalesOrderEvent::CreditCheckOpened(_) => "Fetching Credit Data...".to_string(),
            SalesOrderEvent::CreditRejected(_) => "Order Rejected based on Credit Limit.".to_string(),
            SalesOrderEvent::AcknowledgementIssued(ack) => {
                format!("Order Acknowledgement sent for PO #{}.", ack.po_number)
            }
            SalesOrderEvent::StandardOrderIssued(so) => format!(
                "Internal SO Generated. Checking Inventory for {}x {}...",
                so.quantity, so.sku
            ),
            SalesOrderEvent::StockChecked(stock) => match stock.fulfilment() {
                Fulfilment::FromStock => format!(
                    "Stock available: {} on hand, {} required.",
                    stock.finished_goods, stock.required
                ),
                Fulfilment::Production => format!(
                    "Shortage: {} on hand, {} required. Frames available, production required.",
                    stock.finished_goods, stock.required
                ),
                Fulfilment::Procurement => format!(
                    "Shortage: {} on hand, {} required. Frames also unavailable, procurement required.",
                    stock.finished_goods, stock.required
                ),
            },
            SalesOrderEvent::GoodsReceived(change) => {
                format!("Goods Receipt: {} Frames received from Supplier.", change.level)
            }
            SalesOrderEvent::ProductionCompleted(change) => {
                format!("Production Complete. Inventory updated to {}.", change.level)
            }
            SalesOrderEvent::OrderApproved { sales_order_number } => {
                format!("Sales Order {sales_order_number} approved and sent to Shipping.")
            }
            SalesOrderEvent::StageRestarted => "Sales Order restarted from PO review.".to_string(),
        };
        Some(line)
    }
}

/// Aggregate root: the Sales Order stage of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesOrder {
    id: RunId,
    terms: OrderTerms,
    substate: SalesSubstate,
    in_flight: Option<SalesAction>,
    credit: Option<CreditAssessment>,
    stock: Option<StockAssessment>,
    acknowledgement: Option<OrderAcknowledgement>,
    standard_order: Option<StandardOrder>,
    version: u64,
}

impl SalesOrder {
    pub fn new(id: RunId, terms: OrderTerms) -> Self {
        Self {
            id,
            terms,
            substate: SalesSubstate::ReviewPo,
            in_flight: None,
            credit: None,
            stock: None,
            acknowledgement: None,
            standard_order: None,
            version: 0,
        }
    }

    pub fn terms(&self) -> &OrderTerms {
        &self.terms
    }

    /// Credit figures, once the credit check has been opened.
    pub fn credit(&self) -> Option<&CreditAssessment> {
        self.credit.as_ref()
    }

    /// Availability result, once the stock check has run.
    pub fn stock(&self) -> Option<&StockAssessment> {
        self.stock.as_ref()
    }

    pub fn acknowledgement(&self) -> Option<&OrderAcknowledgement> {
        self.acknowledgement.as_ref()
    }

    pub fn standard_order(&self) -> Option<&StandardOrder> {
        self.standard_order.as_ref()
    }

    fn fulfilment(&self) -> Option<Fulfilment> {
        self.stock.map(|s| s.fulfilment())
    }

    fn can_produce(&self) -> bool {
        match self.substate {
            SalesSubstate::Production => true,
            SalesSubstate::StockCheck => self.fulfilment() == Some(Fulfilment::Production),
            _ => false,
        }
    }

    fn can_procure(&self) -> bool {
        self.substate == SalesSubstate::StockCheck
            && self.fulfilment() == Some(Fulfilment::Procurement)
    }

    fn can_approve(&self) -> bool {
        match self.substate {
            SalesSubstate::ReadyToApprove => true,
            SalesSubstate::StockCheck => self.fulfilment() == Some(Fulfilment::FromStock),
            _ => false,
        }
    }

    fn ensure(&self, allowed: bool, what: &str) -> Result<(), DomainError> {
        if allowed {
            Ok(())
        } else {
            Err(DomainError::invalid_transition(format!(
                "cannot {what} in sales order sub-state {:?}",
                self.substate
            )))
        }
    }

    fn start(&self, action: SalesAction) -> Vec<SalesOrderEvent> {
        vec![SalesOrderEvent::ActionStarted {
            action,
            quantity: self.terms.quantity,
        }]
    }

    fn handle_settle(
        &self,
        at: DateTime<Utc>,
        inventory: &Inventory,
    ) -> Result<Vec<SalesOrderEvent>, DomainError> {
        let Some(action) = self.in_flight else {
            return Err(DomainError::conflict("no sales order action in flight"));
        };

        let events = match action {
            SalesAction::Initiate => vec![SalesOrderEvent::CreditCheckOpened(
                CreditAssessment::for_order(&self.terms),
            )],
            SalesAction::ApproveCredit => vec![SalesOrderEvent::AcknowledgementIssued(
                OrderAcknowledgement::issue(&self.terms, at),
            )],
            SalesAction::SendAcknowledgement => vec![
                SalesOrderEvent::StandardOrderIssued(StandardOrder::issue(&self.terms, at)),
                SalesOrderEvent::StockChecked(StockAssessment::evaluate(
                    inventory,
                    self.terms.quantity,
                )),
            ],
            SalesAction::Procure => vec![SalesOrderEvent::GoodsReceived(
                StockChange::raw_materials(self.terms.quantity),
            )],
            SalesAction::Produce => vec![SalesOrderEvent::ProductionCompleted(
                StockChange::finished_goods(self.terms.quantity),
            )],
        };
        Ok(events)
    }
}

impl AggregateRoot for SalesOrder {
    type Id = RunId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for SalesOrder {
    type Command = SalesOrderCommand;
    type Event = SalesOrderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SalesOrderEvent::ActionStarted { action, .. } => {
                self.in_flight = Some(*action);
                match action {
                    SalesAction::Procure => self.substate = SalesSubstate::Procurement,
                    SalesAction::Produce => self.substate = SalesSubstate::Production,
                    _ => {}
                }
            }
            SalesOrderEvent::CreditCheckOpened(credit) => {
                self.in_flight = None;
                self.credit = Some(*credit);
                self.substate = SalesSubstate::CreditCheck;
            }
            SalesOrderEvent::CreditRejected(_) => {
                self.substate = SalesSubstate::CreditRejected;
            }
            SalesOrderEvent::AcknowledgementIssued(ack) => {
                self.in_flight = None;
                self.acknowledgement = Some(ack.clone());
                self.substate = SalesSubstate::GenerateAck;
            }
            SalesOrderEvent::StandardOrderIssued(so) => {
                self.standard_order = Some(so.clone());
            }
            SalesOrderEvent::StockChecked(stock) => {
                self.in_flight = None;
                self.stock = Some(*stock);
                self.substate = SalesSubstate::StockCheck;
            }
            SalesOrderEvent::GoodsReceived(_) => {
                self.in_flight = None;
                self.substate = SalesSubstate::Production;
            }
            SalesOrderEvent::ProductionCompleted(_) => {
                self.in_flight = None;
                self.substate = SalesSubstate::ReadyToApprove;
            }
            SalesOrderEvent::OrderApproved { .. } => {
                self.substate = SalesSubstate::Approved;
            }
            SalesOrderEvent::StageRestarted => {
                self.substate = SalesSubstate::ReviewPo;
                self.in_flight = None;
                self.credit = None;
                self.stock = None;
                self.acknowledgement = None;
                self.standard_order = None;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        if let SalesOrderCommand::Settle { at, inventory } = command {
            return self.handle_settle(*at, inventory);
        }
        ensure_idle(self.in_flight)?;

        match command {
            SalesOrderCommand::Initiate => {
                self.ensure(self.substate == SalesSubstate::ReviewPo, "initiate")?;
                Ok(self.start(SalesAction::Initiate))
            }
            SalesOrderCommand::DecideCredit { approved } => {
                self.ensure(self.substate == SalesSubstate::CreditCheck, "decide credit")?;
                if *approved {
                    Ok(self.start(SalesAction::ApproveCredit))
                } else {
                    let credit = self
                        .credit
                        .unwrap_or_else(|| CreditAssessment::for_order(&self.terms));
                    Ok(vec![SalesOrderEvent::CreditRejected(credit)])
                }
            }
            SalesOrderCommand::SendAcknowledgement => {
                self.ensure(
                    self.substate == SalesSubstate::GenerateAck,
                    "send acknowledgement",
                )?;
                Ok(self.start(SalesAction::SendAcknowledgement))
            }
            SalesOrderCommand::Procure => {
                self.ensure(self.can_procure(), "procure")?;
                Ok(self.start(SalesAction::Procure))
            }
            SalesOrderCommand::Produce => {
                self.ensure(self.can_produce(), "produce")?;
                Ok(self.start(SalesAction::Produce))
            }
            SalesOrderCommand::Approve => {
                self.ensure(self.can_approve(), "approve")?;
                Ok(vec![SalesOrderEvent::OrderApproved {
                    sales_order_number: self.terms.sales_order_number.to_string(),
                }])
            }
            SalesOrderCommand::Retry => {
                self.ensure(self.substate == SalesSubstate::CreditRejected, "retry")?;
                Ok(vec![SalesOrderEvent::StageRestarted])
            }
            SalesOrderCommand::Settle { .. } => Err(DomainError::conflict(
                "settle is only valid while an action is in flight",
            )),
        }
    }
}

impl StageMachine for SalesOrder {
    type Action = SalesAction;
    type Substate = SalesSubstate;

    const STAGE: ProcessStage = ProcessStage::SalesOrder;

    fn substate(&self) -> SalesSubstate {
        self.substate
    }

    fn in_flight(&self) -> Option<SalesAction> {
        self.in_flight
    }

    fn is_complete(&self) -> bool {
        self.substate == SalesSubstate::Approved
    }

    fn available_actions(&self) -> Vec<&'static str> {
        if self.in_flight.is_some() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        match self.substate {
            SalesSubstate::ReviewPo => actions.push("initiate"),
            SalesSubstate::CreditCheck => actions.push("decide_credit"),
            SalesSubstate::CreditRejected => actions.push("retry"),
            SalesSubstate::GenerateAck => actions.push("send_acknowledgement"),
            _ => {}
        }
        if self.can_procure() {
            actions.push("procure");
        }
        if self.can_produce() {
            actions.push("produce");
        }
        if self.can_approve() {
            actions.push("approve");
        }
        actions
    }
}
