//! Shipping stage (2.0 Shipping): pick, pack and ship.
//!
//! Shipping never touches inventory; the simulation tracks production, not
//! depletion.

pub mod documents;
pub mod pick;
pub mod shipment;

pub use documents::{BillOfLading, PackingSlip, PickingTicket};
pub use pick::parse_picked_quantity;
pub use shipment::{Shipment, ShipmentCommand, ShipmentEvent, ShippingAction, ShippingSubstate};
