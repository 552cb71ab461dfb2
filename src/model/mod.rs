//! Model layer - panel definition, device state and validation
//!
//! - `calibration` - raw ⇄ display unit transforms
//! - `device` - axis configuration, state and range validation
//! - `fiducial` - fiducial reference points
//! - `flash` - self-expiring feedback messages
//! - `panel` - the YAML panel definition
//! - `modal` - modal overlay stack
//! - `status` - service and connection status

pub mod calibration;
pub mod device;
pub mod fiducial;
pub mod flash;
pub mod modal;
pub mod panel;
pub mod status;
pub mod ui;

pub use device::{AxisState, DeviceConfig, RangeViolation};
pub use fiducial::{Fiducial, FiducialKey};
pub use flash::FlashMessage;
pub use panel::{AxisSpec, PanelDefinition, TabSpec, TabView};
pub use status::{ServiceKind, ServiceState, Status};
pub use ui::EditField;
