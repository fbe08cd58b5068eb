mod controller;
mod core;
mod messages;
mod state;
mod worker;

pub use controller::{AnalysisTicket, Completion, Confirmation, ModeController};
pub use core::{AnalysisEngine, LookupState};
pub use state::{ControllerState, ModeState};
pub use worker::run_analysis;
