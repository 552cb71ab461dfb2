//! UI state shared between the app and its components

/// Which field of an axis row is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Target,
    Increment,
}
