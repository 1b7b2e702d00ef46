//! Wizard events, effects and the selection path

use crate::app::catalog::Arch;

/// Abstract key input, decoded from the terminal by the render boundary
///
/// Plain characters stay undecoded here: whether `q` quits or lands in a
/// filter query depends on the active screen's search mode, which only the
/// wizard knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Select the highlighted entry and move forward
    Confirm,
    /// Return to the previous screen
    Back,
    /// Move the highlight up
    Up,
    /// Move the highlight down
    Down,
    /// Leave the current mode (cancels an in-progress search)
    Cancel,
    /// Delete the last typed character
    Backspace,
    /// A printable character
    Char(char),
    /// Ctrl-C; quits from any state
    Interrupt,
}

/// Everything the owning loop can feed into the wizard
#[derive(Debug)]
pub enum WizardEvent {
    /// A decoded key press
    Key(KeyAction),
    /// The one-shot catalog fetch delivered its result
    CatalogLoaded(crate::app::catalog::CatalogOutcome),
    /// Periodic heartbeat; drives download progress aggregation
    Tick,
}

/// What the owning loop must do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Keep the loop running
    Continue,
    /// Tear the terminal down and exit
    Quit,
}

/// The ordered record of commitments made so far
///
/// Each forward transition fills the next field; each backward transition
/// clears the field belonging to the screen being left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPath {
    pub arch: Option<Arch>,
    pub os: Option<String>,
    pub release: Option<String>,
    pub edition: Option<String>,
}

impl SelectionPath {
    /// Committed segments in order, for the breadcrumb title
    pub fn segments(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(arch) = self.arch {
            parts.push(arch.to_string());
        }
        if let Some(os) = &self.os {
            parts.push(os.clone());
        }
        if let Some(release) = &self.release {
            parts.push(release.clone());
        }
        if let Some(edition) = &self.edition {
            parts.push(edition.clone());
        }
        parts
    }
}
