use chrono::NaiveDate;
use color_eyre::eyre;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{DefaultTerminal, prelude::*};
use tokio::sync::mpsc;

use crate::criteria::SearchCriteria;
use crate::form::SearchForm;
use crate::history::SearchHistory;

const HELP: &str = indoc! {"
    Tab/Shift+Tab or ↓/↑ to move, ←/→ or Enter to pick options, +/- to step numbers, Del to clear.
    Enter to search, Ctrl+R to reset, Esc to quit.
"};

const DROPDOWN_HELP: &str = "↑/↓ to highlight, Enter or Space to select, Esc to close the list.";

#[derive(Debug)]
pub struct App {
    pub should_exit: bool,
    pub form: SearchForm,
    pub status: Option<String>,
    pub history: SearchHistory,
    /// Every search submitted during this run, oldest first
    pub submitted: Vec<SearchCriteria>,
    searches: mpsc::UnboundedReceiver<SearchCriteria>,
}

impl App {
    pub fn new(today: NaiveDate, history: SearchHistory) -> Self {
        let (tx, searches) = mpsc::unbounded_channel();
        let form = SearchForm::new(today, move |criteria| {
            if tx.send(criteria).is_err() {
                tracing::warn!("search dropped, receiver is gone");
            }
        });

        Self {
            should_exit: false,
            form,
            status: None,
            history,
            submitted: vec![],
            searches,
        }
    }

    /// Runs until the user quits and hands the app back for the exit work.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> eyre::Result<Self> {
        while !self.should_exit {
            terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;

            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            };
            self.drain_searches();
        }
        Ok(self)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return;
        }

        if self.form.handle_key(key) {
            return;
        }

        if key.code == KeyCode::Esc {
            self.should_exit = true;
        }
    }

    fn drain_searches(&mut self) {
        while let Ok(criteria) = self.searches.try_recv() {
            tracing::info!(criteria = ?criteria, "search requested");
            self.status = Some(format!("Searching: {}", criteria.summary()));
            self.history.add_search(criteria.clone());
            self.submitted.push(criteria);
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header_area, main_area, status_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .areas(area);

        App::render_header(header_area, buf);

        let block = Block::new().borders(Borders::ALL).title(" Search ");
        let form_area = block.inner(main_area);
        block.render(main_area, buf);
        self.form.render(form_area, buf);

        self.render_status(status_area, buf);
        self.render_footer(footer_area, buf);
    }
}

impl App {
    fn render_header(area: Rect, buf: &mut Buffer) {
        Paragraph::new("Property Search")
            .bold()
            .centered()
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let status = match (&self.status, self.history.latest()) {
            (Some(status), _) => status.clone(),
            (None, Some(last)) => format!("Last search: {}", last.summary()),
            (None, None) => String::new(),
        };

        Paragraph::new(status).yellow().render(area, buf);
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let help = if self.form.is_dropdown_open() {
            DROPDOWN_HELP
        } else {
            HELP.trim_end()
        };

        Paragraph::new(help)
            .centered()
            .dark_gray()
            .render(area, buf);
    }
}
