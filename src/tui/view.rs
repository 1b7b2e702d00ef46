//! Screen rendering
//!
//! Pure view code: reads the wizard's current screen and draws it. Nothing
//! here mutates wizard state; the cursor and filter query come straight out
//! of the picker.

use indicatif::HumanBytes;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::catalog::OperatingSystem;
use crate::app::download::{DownloadSnapshot, JobProgress, JobState};
use crate::app::wizard::{
    screens::{ConfirmScreen, DestinationScreen, FailureScreen},
    Picker, PickerEntry, Screen, Wizard,
};

const HIGHLIGHT_SYMBOL: &str = ">> ";

/// Draw the whole frame: breadcrumb border, screen content, key hints
pub fn draw(frame: &mut Frame, wizard: &Wizard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(wizard.title());
    let inner = block.inner(frame.size());
    frame.render_widget(block, frame.size());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    match wizard.current() {
        Screen::Architecture(screen) => draw_picker(frame, chunks[0], &screen.picker, plain_row),
        Screen::Os(screen) => match &screen.picker {
            Some(picker) => draw_picker(frame, chunks[0], picker, os_row),
            None => draw_loading(frame, chunks[0]),
        },
        Screen::Release(screen) => draw_picker(frame, chunks[0], &screen.picker, plain_row),
        Screen::Edition(screen) => draw_picker(frame, chunks[0], &screen.picker, plain_row),
        Screen::Confirm(screen) => draw_confirm(frame, chunks[0], screen),
        Screen::Urls(screen) => draw_picker(frame, chunks[0], &screen.picker, plain_row),
        Screen::Destination(screen) => draw_destination(frame, chunks[0], screen),
        Screen::Downloading(screen) => draw_downloads(frame, chunks[0], &screen.snapshot),
        Screen::Failure(screen) => draw_failure(frame, chunks[0], screen),
    }

    draw_hints(frame, chunks[1], wizard.current());
}

fn plain_row<T: PickerEntry>(entry: &T) -> ListItem<'_> {
    ListItem::new(entry.label().into_owned())
}

/// OS rows carry the catalog description underneath the name
fn os_row(os: &OperatingSystem) -> ListItem<'_> {
    let mut lines = vec![Line::from(os.pretty_name.as_str())];
    if let Some(description) = &os.description {
        lines.push(Line::from(Span::styled(
            format!("   {description}"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    ListItem::new(lines)
}

/// Search bar over a highlighted list; the layout every selection screen
/// shares
fn draw_picker<'a, T: PickerEntry>(
    frame: &mut Frame,
    area: Rect,
    picker: &'a Picker<T>,
    row: impl Fn(&'a T) -> ListItem<'a>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let search_text = if picker.is_searching() {
        Span::raw(format!("{}\u{2588}", picker.query()))
    } else if picker.query().is_empty() {
        Span::styled("Press / to search", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            picker.query().to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(
        Paragraph::new(search_text).block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    let mut rows: Vec<ListItem> = picker.visible_rows().map(row).collect();
    if rows.is_empty() {
        rows.push(ListItem::new(Span::styled(
            "No matches",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let list = List::new(rows)
        .highlight_style(
            Style::default()
                .bg(Color::LightBlue)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    let mut state = ListState::default();
    state.select(picker.cursor());
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn draw_loading(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new("Loading catalog...").style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Short configuration summary above the download-or-list choice
fn draw_confirm(frame: &mut Frame, area: Rect, screen: &ConfirmScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let count = screen.config.web_sources().count();
    let files = if count == 1 { "file" } else { "files" };
    frame.render_widget(
        Paragraph::new(format!("{count} {files} to download"))
            .block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    draw_picker(frame, chunks[1], &screen.picker, plain_row);
}

fn draw_destination(frame: &mut Frame, area: Rect, screen: &DestinationScreen) {
    let mut lines = vec![
        Line::from("Destination directory:"),
        Line::from(format!("{}\u{2588}", screen.input)),
    ];
    if let Some(error) = &screen.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// One gauge per job, plus a summary row once everything is terminal
fn draw_downloads(frame: &mut Frame, area: Rect, snapshot: &DownloadSnapshot) {
    let mut constraints: Vec<Constraint> = snapshot
        .jobs
        .iter()
        .map(|_| Constraint::Length(3))
        .collect();
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (job, chunk) in snapshot.jobs.iter().zip(chunks.iter()) {
        frame.render_widget(job_gauge(job), *chunk);
    }

    if snapshot.all_terminal() {
        let failed = snapshot.failed_count();
        let succeeded = snapshot.jobs.len() - failed;
        let summary = format!(
            "Finished: {succeeded} succeeded, {failed} failed. Press any key to exit."
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                summary,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            chunks[snapshot.jobs.len()],
        );
    }
}

fn job_gauge(job: &JobProgress) -> Gauge<'_> {
    let (color, label) = match &job.state {
        JobState::Pending => (Color::DarkGray, "waiting".to_string()),
        JobState::Active => {
            let total = match job.total {
                Some(total) => HumanBytes(total).to_string(),
                None => "?".to_string(),
            };
            (
                Color::Blue,
                format!(
                    "{:.1}% ({} / {})",
                    job.fraction() * 100.0,
                    HumanBytes(job.received),
                    total
                ),
            )
        }
        JobState::Succeeded => (
            Color::Green,
            format!("done ({})", HumanBytes(job.received)),
        ),
        JobState::Failed(reason) => (Color::Red, format!("failed: {reason}")),
    };

    Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(job.file_name.as_str()),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(job.fraction().clamp(0.0, 1.0))
        .label(label)
}

fn draw_failure(frame: &mut Frame, area: Rect, screen: &FailureScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            "Error:",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(screen.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to exit.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[1],
    );
}

/// One line of key hints for the active screen
fn draw_hints(frame: &mut Frame, area: Rect, screen: &Screen) {
    let hints = match screen {
        Screen::Architecture(s) if s.picker.is_searching() => "[Enter] Accept  [Esc] Cancel",
        Screen::Architecture(_) => "[Enter] Select  [j/k] Move  [/] Search  [q] Quit",
        Screen::Os(s) => match &s.picker {
            Some(picker) if picker.is_searching() => "[Enter] Accept  [Esc] Cancel",
            Some(_) => "[Enter] Select  [j/k] Move  [/] Search  [h] Back  [q] Quit",
            None => "[h] Back  [q] Quit",
        },
        Screen::Release(s) if s.picker.is_searching() => "[Enter] Accept  [Esc] Cancel",
        Screen::Edition(s) if s.picker.is_searching() => "[Enter] Accept  [Esc] Cancel",
        Screen::Confirm(s) if s.picker.is_searching() => "[Enter] Accept  [Esc] Cancel",
        Screen::Urls(s) if s.picker.is_searching() => "[Enter] Accept  [Esc] Cancel",
        Screen::Release(_) | Screen::Edition(_) | Screen::Confirm(_) => {
            "[Enter] Select  [j/k] Move  [/] Search  [h] Back  [q] Quit"
        }
        Screen::Urls(_) => "[j/k] Move  [/] Search  [h] Back  [q] Quit",
        Screen::Destination(_) => "[Enter] Start download  [Esc] Back",
        Screen::Downloading(s) if s.finished() => "[Any key] Exit",
        Screen::Downloading(_) => "[Ctrl-C] Abort",
        Screen::Failure(_) => "[Any key] Exit",
    };

    frame.render_widget(
        Paragraph::new(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        )),
        area,
    );
}
