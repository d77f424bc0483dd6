pub mod commands;
pub mod controller;
pub mod state;

pub use controller::SpinController;
pub use state::{SpinEvent, SpinSnapshot, SpinStatus, SpinTracker};
