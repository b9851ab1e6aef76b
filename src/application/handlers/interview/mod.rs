//! Interview handlers.

mod session_controller;

pub use session_controller::{SessionController, TurnDelivery};
