//! Order-to-cash process orchestrator.
//!
//! Sequences the four stage machines (Sales Order, Shipping, Billing,
//! Collections), interprets their events against the run's inventory and
//! ledger, and hands presentation collaborators serializable snapshots.

pub mod action;
pub mod config;
pub mod document;
pub mod effects;
pub mod pause;
pub mod run;
pub mod simulator;
pub mod snapshot;
pub mod summary;

pub use action::Action;
pub use config::SimConfig;
pub use document::Document;
pub use pause::{InstantPause, Pause, TokioPause};
pub use run::{ActiveStage, SimulationRun};
pub use simulator::Simulator;
pub use snapshot::{RunSnapshot, StageSubstate};
pub use summary::RunSummary;
