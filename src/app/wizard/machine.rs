//! The selection state machine
//!
//! A stack of screens narrows the catalog down to one configuration. Commit
//! pushes the next screen, Back pops, and the popped screen's predecessor
//! keeps its filtered data and cursor untouched on the stack. The current
//! screen lives outside the stack so there is always exactly one, by
//! construction.

use std::mem;

use tracing::{debug, error, info};

use crate::app::catalog::{
    filter::{narrow_release, ReleaseOutcome},
    CatalogOutcome, CatalogStore,
};
use crate::app::download::DownloadManager;

use super::picker::{Picker, PickerEntry, PickerReply};
use super::screens::{
    ArchScreen, ConfirmChoice, ConfirmScreen, DestinationScreen, DownloadingScreen, EditionScreen,
    FailureScreen, OsScreen, ReleaseScreen, Screen, UrlsScreen,
};
use super::types::{Effect, KeyAction, SelectionPath, WizardEvent};

/// Where a key press sends the wizard
enum Transition {
    Stay,
    Push(Screen),
    Pop,
    Quit,
}

/// What a list screen's common key handling decided
enum ListReply {
    Quit,
    Back,
    Commit(usize),
    None,
}

/// The interactive wizard: screen stack, selection path and catalog cache
pub struct Wizard {
    store: CatalogStore,
    current: Screen,
    stack: Vec<Screen>,
    path: SelectionPath,
}

impl Wizard {
    /// Start at the architecture screen with the native architecture
    /// highlighted
    pub fn new() -> Self {
        Self {
            store: CatalogStore::new(),
            current: Screen::Architecture(ArchScreen::new()),
            stack: Vec::new(),
            path: SelectionPath::default(),
        }
    }

    /// The screen being shown
    pub fn current(&self) -> &Screen {
        &self.current
    }

    /// The commitments made so far
    pub fn path(&self) -> &SelectionPath {
        &self.path
    }

    /// Frame title: application name plus the committed breadcrumb
    pub fn title(&self) -> String {
        let mut parts = self.path.segments();
        parts.push(self.current.name().to_string());
        format!(" distro_fetcher: {} ", parts.join(" -> "))
    }

    /// Feed one event through the machine
    pub fn update(&mut self, event: WizardEvent) -> Effect {
        match event {
            WizardEvent::CatalogLoaded(outcome) => {
                self.receive_catalog(outcome);
                Effect::Continue
            }
            WizardEvent::Tick => {
                if let Screen::Downloading(screen) = &mut self.current {
                    screen.tick();
                }
                Effect::Continue
            }
            WizardEvent::Key(KeyAction::Interrupt) => Effect::Quit,
            WizardEvent::Key(action) => self.handle_key(action),
        }
    }

    /// Install the one-shot fetch result and unblock the OS screen, or
    /// replace everything with the failure screen
    fn receive_catalog(&mut self, outcome: CatalogOutcome) {
        match outcome {
            Ok(list) => {
                info!(count = list.len(), "catalog delivered to wizard");
                self.store.install(list);
                if let Screen::Os(screen) = &mut self.current {
                    if screen.picker.is_none() {
                        if let Some(catalog) = self.store.get() {
                            screen.populate(catalog);
                        }
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "catalog fetch failed");
                self.stack.clear();
                self.path = SelectionPath::default();
                self.current = Screen::Failure(FailureScreen::new(e.to_string()));
            }
        }
    }

    fn handle_key(&mut self, action: KeyAction) -> Effect {
        let transition = match &mut self.current {
            Screen::Architecture(screen) => {
                match Self::list_key(&mut screen.picker, &action) {
                    ListReply::Quit => Transition::Quit,
                    // There is nothing before the first screen.
                    ListReply::Back | ListReply::None => Transition::Stay,
                    ListReply::Commit(index) => match screen.picker.item(index).copied() {
                        Some(arch) => {
                            debug!(%arch, "architecture committed");
                            self.path.arch = Some(arch);
                            Transition::Push(Screen::Os(OsScreen::new(arch, self.store.get())))
                        }
                        None => Transition::Stay,
                    },
                }
            }
            Screen::Os(screen) => match &mut screen.picker {
                Some(picker) => match Self::list_key(picker, &action) {
                    ListReply::Quit => Transition::Quit,
                    ListReply::Back => Transition::Pop,
                    ListReply::None => Transition::Stay,
                    ListReply::Commit(index) => match picker.item(index) {
                        Some(os) => {
                            debug!(os = %os.name, "operating system committed");
                            self.path.os = Some(os.pretty_name.clone());
                            Transition::Push(Screen::Release(ReleaseScreen::new(
                                os.releases.clone(),
                            )))
                        }
                        None => Transition::Stay,
                    },
                },
                // Still waiting for the catalog; only quit and back work.
                None => match action {
                    KeyAction::Char('q') => Transition::Quit,
                    KeyAction::Char('h') | KeyAction::Back => Transition::Pop,
                    _ => Transition::Stay,
                },
            },
            Screen::Release(screen) => match Self::list_key(&mut screen.picker, &action) {
                ListReply::Quit => Transition::Quit,
                ListReply::Back => Transition::Pop,
                ListReply::None => Transition::Stay,
                ListReply::Commit(index) => match screen.picker.item(index).cloned() {
                    Some(release) => match narrow_release(&screen.configs, &release) {
                        Some(ReleaseOutcome::Finalized(config)) => {
                            debug!(%release, "release committed, edition screen skipped");
                            self.path.release = Some(release);
                            Transition::Push(Screen::Confirm(ConfirmScreen::new(config)))
                        }
                        Some(ReleaseOutcome::NeedsEdition(matched)) => {
                            debug!(%release, candidates = matched.len(), "release committed");
                            self.path.release = Some(release);
                            Transition::Push(Screen::Edition(EditionScreen::new(matched)))
                        }
                        None => {
                            // The release list was built from these configs,
                            // so a miss here is a filtering defect.
                            error!(%release, "no configuration matches the offered release");
                            Transition::Stay
                        }
                    },
                    None => Transition::Stay,
                },
            },
            Screen::Edition(screen) => match Self::list_key(&mut screen.picker, &action) {
                ListReply::Quit => Transition::Quit,
                ListReply::Back => Transition::Pop,
                ListReply::None => Transition::Stay,
                ListReply::Commit(index) => match screen.picker.item(index).cloned() {
                    Some(config) => {
                        debug!(edition = config.edition_label(), "edition committed");
                        self.path.edition = Some(config.edition_label().to_string());
                        Transition::Push(Screen::Confirm(ConfirmScreen::new(config)))
                    }
                    None => Transition::Stay,
                },
            },
            Screen::Confirm(screen) => match Self::list_key(&mut screen.picker, &action) {
                ListReply::Quit => Transition::Quit,
                ListReply::Back => Transition::Pop,
                ListReply::None => Transition::Stay,
                ListReply::Commit(index) => match screen.picker.item(index) {
                    Some(ConfirmChoice::ShowUrls) => {
                        Transition::Push(Screen::Urls(UrlsScreen::new(&screen.config)))
                    }
                    Some(ConfirmChoice::DownloadNow) => Transition::Push(Screen::Destination(
                        DestinationScreen::new(screen.config.clone()),
                    )),
                    None => Transition::Stay,
                },
            },
            Screen::Urls(screen) => match Self::list_key(&mut screen.picker, &action) {
                ListReply::Quit => Transition::Quit,
                ListReply::Back => Transition::Pop,
                // Read-only listing: committing a row does nothing.
                ListReply::Commit(_) | ListReply::None => Transition::Stay,
            },
            Screen::Destination(screen) => match action {
                KeyAction::Cancel => Transition::Pop,
                KeyAction::Char(c) => {
                    screen.input.push(c);
                    screen.error = None;
                    Transition::Stay
                }
                KeyAction::Backspace => {
                    screen.input.pop();
                    screen.error = None;
                    Transition::Stay
                }
                KeyAction::Confirm => match screen.validate() {
                    Ok(destination) => {
                        info!(destination = %destination.display(), "destination confirmed");
                        let manager = DownloadManager::start(&screen.config, &destination);
                        Transition::Push(Screen::Downloading(DownloadingScreen::new(manager)))
                    }
                    Err(reason) => {
                        screen.error = Some(reason);
                        Transition::Stay
                    }
                },
                _ => Transition::Stay,
            },
            Screen::Downloading(screen) => {
                if screen.finished() {
                    Transition::Quit
                } else {
                    // Jobs keep running; only an interrupt ends the session
                    // early, and that is handled before screen dispatch.
                    Transition::Stay
                }
            }
            Screen::Failure(_) => Transition::Quit,
        };

        match transition {
            Transition::Stay => Effect::Continue,
            Transition::Push(next) => {
                self.push(next);
                Effect::Continue
            }
            Transition::Pop => {
                self.pop();
                Effect::Continue
            }
            Transition::Quit => Effect::Quit,
        }
    }

    /// Quit/back/picker handling shared by every list screen
    fn list_key<T: PickerEntry>(picker: &mut Picker<T>, action: &KeyAction) -> ListReply {
        if !picker.is_searching() {
            match action {
                KeyAction::Char('q') => return ListReply::Quit,
                KeyAction::Char('h') | KeyAction::Back => return ListReply::Back,
                _ => {}
            }
        }
        match picker.handle(action) {
            PickerReply::Committed(index) => ListReply::Commit(index),
            PickerReply::Handled | PickerReply::Ignored => ListReply::None,
        }
    }

    fn push(&mut self, next: Screen) {
        let previous = mem::replace(&mut self.current, next);
        self.stack.push(previous);
    }

    /// Return to the previous screen, clearing the commitment that led away
    /// from it
    fn pop(&mut self) {
        let Some(previous) = self.stack.pop() else {
            return;
        };
        let departed = mem::replace(&mut self.current, previous);
        match departed {
            Screen::Os(_) => self.path.arch = None,
            Screen::Release(_) => self.path.os = None,
            Screen::Edition(_) => self.path.release = None,
            Screen::Confirm(_) => {
                // Reached either from the edition screen or directly from the
                // release screen when the edition step was skipped.
                if self.path.edition.is_some() {
                    self.path.edition = None;
                } else {
                    self.path.release = None;
                }
            }
            _ => {}
        }
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}
