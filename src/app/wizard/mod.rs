//! Selection state machine
//!
//! The wizard narrows the catalog screen by screen (architecture, operating
//! system, release, edition) down to one configuration, then hands it to the
//! download manager. It consumes abstract key actions and data events and
//! never touches the terminal; rendering lives in [`crate::tui`].

pub mod machine;
pub mod picker;
pub mod screens;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export main public API
pub use machine::Wizard;
pub use picker::{Picker, PickerEntry, PickerReply};
pub use screens::{ConfirmChoice, Screen};
pub use types::{Effect, KeyAction, SelectionPath, WizardEvent};
