//! Render/input boundary
//!
//! One cooperative loop owns the terminal and every wizard state transition.
//! It never blocks on I/O: the catalog fetch and the retrieval tasks run on
//! the runtime's worker threads and reach the loop as data events, while key
//! presses arrive through a bounded poll that doubles as the progress tick.

pub mod keys;
pub mod view;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::app::catalog::CatalogOutcome;
use crate::app::wizard::{Effect, Wizard, WizardEvent};
use crate::constants::ui;
use crate::errors::{CatalogError, Result};

/// Run the wizard until it asks to quit
///
/// Owns the terminal for the whole session: raw mode plus alternate screen
/// on entry, restored before returning on every path.
pub fn run(wizard: Wizard, catalog_rx: oneshot::Receiver<CatalogOutcome>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, wizard, catalog_rx);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    info!("wizard session ended");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut wizard: Wizard,
    catalog_rx: oneshot::Receiver<CatalogOutcome>,
) -> Result<()> {
    let mut catalog_rx = Some(catalog_rx);

    loop {
        // Deliver the one-shot fetch result the moment it is available. A
        // dropped sender means the fetch task died without an outcome, which
        // is just another fatal catalog error.
        if let Some(rx) = &mut catalog_rx {
            match rx.try_recv() {
                Ok(outcome) => {
                    debug!("catalog outcome received");
                    wizard.update(WizardEvent::CatalogLoaded(outcome));
                    catalog_rx = None;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    wizard.update(WizardEvent::CatalogLoaded(Err(CatalogError::Interrupted)));
                    catalog_rx = None;
                }
            }
        }

        wizard.update(WizardEvent::Tick);
        terminal.draw(|frame| view::draw(frame, &wizard))?;

        if event::poll(ui::TICK_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = keys::decode(&key) {
                    if wizard.update(WizardEvent::Key(action)) == Effect::Quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}
