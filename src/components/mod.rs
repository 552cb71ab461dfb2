//! UI Components
//!
//! Widgets keep presentation state only. Device state lives behind the store
//! and reaches them as snapshots, with changes flowing back through sinks.

pub mod button;
pub mod card;
pub mod connection_control;
pub mod connection_indicator;
pub mod fiducial_list;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod modal;
pub mod parameter_control;
pub mod parameter_input;
pub mod service_card;
pub mod status_dot;
pub mod tab_group;
pub mod text;

pub use button::ButtonToggle;
pub use connection_control::{ConnectionControl, ConnectionRequest};
pub use fiducial_list::FiducialList;
pub use help_dialog::HelpDialog;
pub use home::{draw_panel_screen, HomeComponent, PanelRenderContext};
pub use layout::centered_popup;
pub use modal::ConfirmDialog;
pub use parameter_control::ParameterControl;
pub use tab_group::TabGroup;
