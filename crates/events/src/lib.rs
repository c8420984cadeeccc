//! Stage events, process stages and the run trace log.

pub mod event;
pub mod stage;
pub mod trace;

pub use event::Event;
pub use stage::{ProcessStage, SimulatedAction, StageMachine, ensure_idle};
pub use trace::{TraceEntry, TraceLog};
