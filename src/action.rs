//! Action enum - everything the panel can be asked to do
//!
//! Components translate key presses into Actions; the App applies them to
//! the focused axis, service or fiducial and the device store.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick: advances the store and expires messages
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextTab,
    PrevTab,
    /// Focus the next row on the active tab
    NextItem,
    /// Focus the previous row on the active tab
    PrevItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Axis Control
    // ─────────────────────────────────────────────────────────────────────────
    /// Step the target up by the increment
    Increment,
    /// Step the target down by the increment
    Decrement,
    /// Start typing a new target
    EditTarget,
    /// Start typing a new increment
    EditIncrement,
    EditInput(char),
    EditBackspace,
    CommitEdit,
    CancelEdit,
    /// Cycle the display unit
    NextUnit,
    /// Recall the next stored position
    NextStore,
    Stop,
    /// Ask before homing the focused axis
    OpenHomeConfirm,

    // ─────────────────────────────────────────────────────────────────────────
    // Services & Fiducials
    // ─────────────────────────────────────────────────────────────────────────
    /// Connect or disconnect the focused axis or service
    ToggleConnection,
    /// Re-check the focused HTTP service
    CheckService,
    DeleteFiducial,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::Increment => write!(f, "Increment"),
            Action::Decrement => write!(f, "Decrement"),
            Action::EditTarget => write!(f, "EditTarget"),
            Action::EditIncrement => write!(f, "EditIncrement"),
            Action::EditInput(c) => write!(f, "EditInput('{}')", c),
            Action::EditBackspace => write!(f, "EditBackspace"),
            Action::CommitEdit => write!(f, "CommitEdit"),
            Action::CancelEdit => write!(f, "CancelEdit"),
            Action::NextUnit => write!(f, "NextUnit"),
            Action::NextStore => write!(f, "NextStore"),
            Action::Stop => write!(f, "Stop"),
            Action::OpenHomeConfirm => write!(f, "OpenHomeConfirm"),
            Action::ToggleConnection => write!(f, "ToggleConnection"),
            Action::CheckService => write!(f, "CheckService"),
            Action::DeleteFiducial => write!(f, "DeleteFiducial"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(Action::Resize(80, 24).to_string(), "Resize(80, 24)");
        assert_eq!(Action::EditInput('7').to_string(), "EditInput('7')");
        assert_eq!(Action::OpenHomeConfirm.to_string(), "OpenHomeConfirm");
    }
}
