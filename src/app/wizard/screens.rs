//! The wizard's screen variants
//!
//! Each screen owns the filtered catalog view it was built from plus its own
//! picker state. Transition logic lives in [`super::machine`]; rendering
//! lives in [`crate::tui`], which only reads these fields.

use std::borrow::Cow;
use std::path::PathBuf;

use crate::app::catalog::{
    filter, Arch, Configuration, OperatingSystem,
};
use crate::app::download::{DownloadManager, DownloadSnapshot};

use super::picker::{Picker, PickerEntry};

impl PickerEntry for Arch {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl PickerEntry for OperatingSystem {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.pretty_name)
    }

    /// Search matches the catalog identity, like the pretty name but without
    /// capitalization quirks
    fn search_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

impl PickerEntry for Configuration {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.edition_label())
    }
}

/// Pick an architecture; the native one starts highlighted
#[derive(Debug)]
pub struct ArchScreen {
    pub picker: Picker<Arch>,
}

impl ArchScreen {
    pub fn new() -> Self {
        let native = Arch::native();
        Self {
            picker: Picker::with_cursor_on(Arch::ALL.to_vec(), |arch| *arch == native),
        }
    }
}

impl Default for ArchScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick an operating system from the architecture-filtered catalog
///
/// The picker stays empty until the catalog fetch delivers; the render layer
/// shows a loading indicator for that window.
#[derive(Debug)]
pub struct OsScreen {
    pub arch: Arch,
    pub picker: Option<Picker<OperatingSystem>>,
}

impl OsScreen {
    pub fn new(arch: Arch, catalog: Option<&[OperatingSystem]>) -> Self {
        let mut screen = Self { arch, picker: None };
        if let Some(catalog) = catalog {
            screen.populate(catalog);
        }
        screen
    }

    /// Build the list from the cached catalog; called at most once
    pub fn populate(&mut self, catalog: &[OperatingSystem]) {
        self.picker = Some(Picker::new(filter::filter_by_architecture(
            catalog, self.arch,
        )));
    }
}

/// Pick a release label for the chosen operating system
#[derive(Debug)]
pub struct ReleaseScreen {
    /// The OS's architecture-filtered configurations, kept so committing a
    /// release can narrow them without another catalog pass
    pub configs: Vec<Configuration>,
    pub picker: Picker<String>,
}

impl ReleaseScreen {
    pub fn new(configs: Vec<Configuration>) -> Self {
        let releases = filter::unique_releases(&configs);
        Self {
            configs,
            picker: Picker::new(releases),
        }
    }
}

/// Pick an edition among the configurations sharing the chosen release
#[derive(Debug)]
pub struct EditionScreen {
    pub picker: Picker<Configuration>,
}

impl EditionScreen {
    pub fn new(matched: Vec<Configuration>) -> Self {
        Self {
            picker: Picker::new(filter::unique_editions(&matched)),
        }
    }
}

/// What to do with the finalized configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    DownloadNow,
    ShowUrls,
}

impl ConfirmChoice {
    pub const ALL: [ConfirmChoice; 2] = [ConfirmChoice::DownloadNow, ConfirmChoice::ShowUrls];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmChoice::DownloadNow => "Download now",
            ConfirmChoice::ShowUrls => "Show URLs",
        }
    }
}

impl PickerEntry for ConfirmChoice {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

/// The finalized configuration, waiting for a download-or-list decision
#[derive(Debug)]
pub struct ConfirmScreen {
    pub config: Configuration,
    pub picker: Picker<ConfirmChoice>,
}

impl ConfirmScreen {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            picker: Picker::new(ConfirmChoice::ALL.to_vec()),
        }
    }
}

/// Read-only listing of the configuration's source URLs
#[derive(Debug)]
pub struct UrlsScreen {
    pub picker: Picker<String>,
}

impl UrlsScreen {
    pub fn new(config: &Configuration) -> Self {
        let urls = config
            .web_sources()
            .map(|source| source.url.clone())
            .collect();
        Self {
            picker: Picker::new(urls),
        }
    }
}

/// Editable destination directory, pre-filled with the working directory
#[derive(Debug)]
pub struct DestinationScreen {
    pub config: Configuration,
    pub input: String,
    pub error: Option<String>,
}

impl DestinationScreen {
    pub fn new(config: Configuration) -> Self {
        let input = std::env::current_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        Self {
            config,
            input,
            error: None,
        }
    }

    /// Check the entered path names an existing directory
    ///
    /// Writability is not probed here; an unwritable directory surfaces as
    /// every job failing with the I/O reason.
    pub fn validate(&self) -> Result<PathBuf, String> {
        if self.input.trim().is_empty() {
            return Err("enter a destination directory".to_string());
        }
        let path = PathBuf::from(self.input.trim());
        if !path.exists() {
            return Err(format!("{} does not exist", path.display()));
        }
        if !path.is_dir() {
            return Err(format!("{} is not a directory", path.display()));
        }
        Ok(path)
    }
}

/// Live progress over all jobs of the finalized configuration
#[derive(Debug)]
pub struct DownloadingScreen {
    pub manager: DownloadManager,
    pub snapshot: DownloadSnapshot,
}

impl DownloadingScreen {
    pub fn new(manager: DownloadManager) -> Self {
        let snapshot = manager.snapshot();
        Self { manager, snapshot }
    }

    /// Drain pending job events and refresh the render view
    pub fn tick(&mut self) {
        self.manager.pump();
        self.snapshot = self.manager.snapshot();
    }

    /// Whether every job has reached a terminal state
    pub fn finished(&self) -> bool {
        self.snapshot.all_terminal()
    }
}

/// Fatal catalog failure; any key exits
#[derive(Debug)]
pub struct FailureScreen {
    pub message: String,
}

impl FailureScreen {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

/// Tagged union over every screen the wizard can show
#[derive(Debug)]
pub enum Screen {
    Architecture(ArchScreen),
    Os(OsScreen),
    Release(ReleaseScreen),
    Edition(EditionScreen),
    Confirm(ConfirmScreen),
    Urls(UrlsScreen),
    Destination(DestinationScreen),
    Downloading(DownloadingScreen),
    Failure(FailureScreen),
}

impl Screen {
    /// Breadcrumb segment for the frame title
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Architecture(_) => "Architecture",
            Screen::Os(_) => "OS",
            Screen::Release(_) => "Release",
            Screen::Edition(_) => "Edition",
            Screen::Confirm(_) => "Confirm",
            Screen::Urls(_) => "URLs",
            Screen::Destination(_) => "Destination",
            Screen::Downloading(_) => "Downloading",
            Screen::Failure(_) => "Error",
        }
    }
}
