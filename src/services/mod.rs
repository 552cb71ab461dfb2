//! Backing services for the panel
//!
//! - Panel file loading and validation
//! - A simulated device store used when no driver is attached

pub mod panel;
pub mod simulator;

pub use panel::{demo_panel, load_panel};
pub use simulator::SimulatedStore;
