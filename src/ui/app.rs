use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::controller::{AppContext, Confirmation};
use crate::error::{ActionError, Severity};
use crate::models::{COLUMN_COUNT, COLUMN_HEADERS};

use super::forms::{FormField, RecordForm, LABEL_WIDTH};
use super::helpers::{centered_rect, key_hints, severity_style};
use super::screens::{MessageDialog, StatisticsScreen};

const APP_TITLE: &str = "Employee Workload Statistics System";
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Five input lines plus the panel border.
const FORM_HEIGHT: u16 = FormField::ALL.len() as u16 + 2;
const PAGE_ROWS: isize = 10;

/// Which panel receives plain key presses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Focus {
    Form,
    Table,
}

/// Overlays drawn on top of the main window.
enum Mode {
    Normal,
    Message(MessageDialog),
    Statistics(StatisticsScreen),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    severity: Severity,
}

/// Central application state shared across the TUI.
pub struct App {
    context: AppContext,
    form: RecordForm,
    focus: Focus,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            form: RecordForm::default(),
            focus: Focus::Form,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Handle a key pressed without modifiers. Returns `true` when the user
    /// asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::Message(dialog) => self.handle_message_key(code, dialog),
            Mode::Statistics(screen) => self.handle_statistics_key(code, screen),
        };

        exit
    }

    /// Ctrl shortcuts act as the window's buttons and work from any panel.
    pub fn handle_ctrl(&mut self, code: KeyCode) -> bool {
        if let KeyCode::Char('q') | KeyCode::Char('c') = code {
            return true;
        }
        if !matches!(self.mode, Mode::Normal) {
            return false;
        }
        match code {
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('u') => self.update(),
            KeyCode::Char('d') => self.delete(),
            KeyCode::Char('t') => self.view_statistics(),
            KeyCode::Char('l') => {
                self.form.values.clear();
                self.set_status("Inputs cleared.", Severity::Info);
            }
            _ => {}
        }
        false
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_previous(),
            _ => match self.focus {
                Focus::Form => self.handle_form_key(code),
                Focus::Table => self.handle_table_key(code, exit),
            },
        }
        Mode::Normal
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => {
                if let Some(field) = self.form.active.previous() {
                    self.form.focus(field);
                }
            }
            KeyCode::Down | KeyCode::Enter => self.focus_next(),
            KeyCode::Left => {
                self.form.cycle_option(false);
            }
            KeyCode::Right => {
                self.form.cycle_option(true);
            }
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(ch) => {
                self.form.push_char(ch);
            }
            KeyCode::Esc => self.clear_status(),
            _ => {}
        }
    }

    fn handle_table_key(&mut self, code: KeyCode, exit: &mut bool) {
        let table = self.context.table_mut();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => table.move_selection(-1),
            KeyCode::Down => table.move_selection(1),
            KeyCode::PageUp => table.move_selection(-PAGE_ROWS),
            KeyCode::PageDown => table.move_selection(PAGE_ROWS),
            KeyCode::Home => table.select_first(),
            KeyCode::End => table.select_last(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(index) = table.selected() {
                    self.click_row(index);
                } else {
                    self.set_status("No record highlighted.", Severity::Warning);
                }
            }
            _ => {}
        }
    }

    fn handle_message_key(&mut self, code: KeyCode, dialog: MessageDialog) -> Mode {
        match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Mode::Normal,
            _ => Mode::Message(dialog),
        }
    }

    fn handle_statistics_key(&mut self, code: KeyCode, mut screen: StatisticsScreen) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => return Mode::Normal,
            KeyCode::Up => screen.scroll_by(-1),
            KeyCode::Down => screen.scroll_by(1),
            KeyCode::PageUp => screen.scroll_by(-(PAGE_ROWS as i32)),
            KeyCode::PageDown => screen.scroll_by(PAGE_ROWS as i32),
            KeyCode::Home => screen.scroll_to_top(),
            KeyCode::End => screen.scroll_to_bottom(),
            _ => {}
        }
        Mode::Statistics(screen)
    }

    fn focus_next(&mut self) {
        match self.focus {
            Focus::Form => match self.form.active.next() {
                Some(field) => self.form.focus(field),
                None => self.focus = Focus::Table,
            },
            Focus::Table => {
                self.focus = Focus::Form;
                self.form.focus(FormField::EmployeeId);
            }
        }
    }

    fn focus_previous(&mut self) {
        match self.focus {
            Focus::Form => match self.form.active.previous() {
                Some(field) => self.form.focus(field),
                None => self.focus = Focus::Table,
            },
            Focus::Table => {
                self.focus = Focus::Form;
                self.form.focus(FormField::Quality);
            }
        }
    }

    /// Row click: make `index` the selection and copy it into the inputs.
    fn click_row(&mut self, index: usize) {
        if self.context.select_row(index, &mut self.form.values) {
            self.set_status(format!("Row {} loaded into the form.", index + 1), Severity::Info);
        }
    }

    fn save(&mut self) {
        let result = self.context.save(&mut self.form.values);
        self.finish_action(result);
    }

    fn update(&mut self) {
        let result = self.context.update(&mut self.form.values);
        self.finish_action(result);
    }

    fn delete(&mut self) {
        let result = self.context.delete();
        self.finish_action(result);
    }

    fn finish_action(&mut self, result: Result<Confirmation, ActionError>) {
        match result {
            Ok(confirmation) => {
                self.form.focus(FormField::EmployeeId);
                self.show_message("Success", confirmation.message(), Severity::Info);
            }
            Err(err) => {
                let severity = err.severity();
                let title = match severity {
                    Severity::Warning => "Warning",
                    _ => "Error",
                };
                self.show_message(title, err.to_string(), severity);
            }
        }
    }

    fn view_statistics(&mut self) {
        match self.context.statistics() {
            Ok(report) => {
                self.mode = Mode::Statistics(StatisticsScreen::new(&report));
            }
            Err(err) => self.show_message("Error", err.to_string(), Severity::Error),
        }
    }

    fn show_message(&mut self, title: &'static str, text: impl Into<String>, severity: Severity) {
        let text = text.into();
        self.set_status(text.clone(), severity);
        self.mode = Mode::Message(MessageDialog::new(title, text, severity));
    }

    fn set_status<S: Into<String>>(&mut self, text: S, severity: Severity) {
        self.status = Some(StatusMessage {
            text: text.into(),
            severity,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        let title = Paragraph::new(Span::styled(
            APP_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        self.draw_form(frame, chunks[1]);
        self.draw_table(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);

        match &self.mode {
            Mode::Normal => {}
            Mode::Message(dialog) => self.draw_message(frame, area, dialog),
            Mode::Statistics(screen) => self.draw_statistics(frame, area, screen),
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Form && matches!(self.mode, Mode::Normal);
        let mut block = Block::default().title("Record").borders(Borders::ALL);
        if focused {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = FormField::ALL
            .iter()
            .map(|field| self.form.build_line(*field, focused))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        let active = self.form.active;
        if focused && !active.is_selector() && (active.index() as u16) < inner.height {
            let cursor_x = inner.x + (LABEL_WIDTH + self.form.value_len(active)) as u16;
            let cursor_y = inner.y + active.index() as u16;
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), cursor_y));
        }
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let table_model = self.context.table();
        let mut block = Block::default()
            .title(format!("Records ({})", table_model.row_count()))
            .borders(Borders::ALL);
        if self.focus == Focus::Table {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }

        if table_model.is_empty() {
            let message = Paragraph::new("No records yet. Fill in the form and press Ctrl-S.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(COLUMN_HEADERS.map(Cell::from)).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let rows = table_model
            .rows()
            .iter()
            .map(|record| Row::new(record.columns().map(Cell::from)));
        let widths = [Constraint::Ratio(1, COLUMN_COUNT as u32); COLUMN_COUNT];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(table_model.selected());
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(
                status.text.clone(),
                severity_style(status.severity),
            )])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match (&self.mode, self.focus) {
            (Mode::Message(_), _) => key_hints(&[("Enter", "Dismiss")]),
            (Mode::Statistics(_), _) => key_hints(&[
                ("↑↓", "Scroll"),
                ("PgUp/PgDn", "Page"),
                ("Esc", "Close"),
            ]),
            (Mode::Normal, Focus::Table) => key_hints(&[
                ("↑↓", "Select"),
                ("Enter", "Load Row"),
                ("^U", "Update"),
                ("^D", "Delete"),
                ("^T", "Statistics"),
                ("Tab", "Form"),
                ("q", "Quit"),
            ]),
            (Mode::Normal, Focus::Form) => key_hints(&[
                ("Tab", "Next"),
                ("←→", "Change Option"),
                ("^S", "Save"),
                ("^U", "Update"),
                ("^D", "Delete"),
                ("^T", "Statistics"),
                ("^L", "Clear"),
                ("^Q", "Quit"),
            ]),
        }
    }

    fn draw_message(&self, frame: &mut Frame, area: Rect, dialog: &MessageDialog) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(dialog.title)
            .borders(Borders::ALL)
            .border_style(severity_style(dialog.severity));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let lines = vec![
            Line::from(dialog.text.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter or Esc to continue.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_statistics(&self, frame: &mut Frame, area: Rect, screen: &StatisticsScreen) {
        let popup_area = centered_rect(70, 80, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Statistics").borders(Borders::ALL);
        let paragraph = Paragraph::new(screen.lines.join("\n"))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((screen.scroll, 0));
        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use crate::store::RecordStore;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::{tempdir, TempDir};

    fn app_with(rows: &[Record]) -> (TempDir, App) {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("employee_data.csv"));
        store.rewrite(rows).unwrap();
        let app = App::new(AppContext::open(store).unwrap());
        (dir, app)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    fn dialog(app: &App) -> Option<(&str, &str)> {
        match &app.mode {
            Mode::Message(dialog) => Some((dialog.title, dialog.text.as_str())),
            _ => None,
        }
    }

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn typing_and_saving_appends_a_row() {
        let (_dir, mut app) = app_with(&[]);
        type_text(&mut app, "E1");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "Lamp");
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "12");

        assert!(!app.handle_ctrl(KeyCode::Char('s')));
        assert_eq!(dialog(&app), Some(("Success", "Data saved successfully!")));

        let stored = app.context().store().load().unwrap();
        assert_eq!(stored, vec![Record::new("E1", "Lamp", "Furniture", "12", "High")]);
        assert!(app.form.values.employee_id.is_empty());
    }

    #[test]
    fn invalid_input_shows_an_error_dialog() {
        let (_dir, mut app) = app_with(&[]);
        type_text(&mut app, "E1");
        app.handle_ctrl(KeyCode::Char('s'));
        assert_eq!(dialog(&app), Some(("Error", "Please fill all fields correctly.")));
        assert!(app.context().store().load().unwrap().is_empty());

        app.handle_key(KeyCode::Enter);
        assert!(dialog(&app).is_none());
        assert_eq!(app.form.values.employee_id, "E1");
    }

    #[test]
    fn update_without_selection_warns() {
        let (_dir, mut app) = app_with(&[Record::new("E1", "Desk", "Furniture", "1", "Low")]);
        app.handle_ctrl(KeyCode::Char('u'));
        assert_eq!(
            dialog(&app),
            Some(("Warning", "Please select a record to update."))
        );
    }

    #[test]
    fn selecting_a_row_and_deleting_it() {
        let (_dir, mut app) = app_with(&[
            Record::new("E1", "Desk", "Furniture", "1", "Low"),
            Record::new("E2", "Shirt", "Clothing", "4", "Medium"),
        ]);
        app.handle_key(KeyCode::BackTab);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.form.values.employee_id, "E2");

        app.handle_ctrl(KeyCode::Char('d'));
        assert_eq!(dialog(&app), Some(("Success", "Record deleted successfully!")));
        let ids: Vec<String> = app
            .context()
            .store()
            .load()
            .unwrap()
            .into_iter()
            .map(|r| r.employee_id)
            .collect();
        assert_eq!(ids, ["E1"]);
    }

    #[test]
    fn statistics_overlay_scrolls_and_closes() {
        let (_dir, mut app) = app_with(&[Record::new("E1", "Desk", "Furniture", "3", "Low")]);
        app.handle_ctrl(KeyCode::Char('t'));
        assert!(matches!(app.mode, Mode::Statistics(_)));
        app.handle_key(KeyCode::Down);
        if let Mode::Statistics(screen) = &app.mode {
            assert_eq!(screen.scroll, 1);
        }
        app.handle_key(KeyCode::Esc);
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn quit_keys() {
        let (_dir, mut app) = app_with(&[]);
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert_eq!(app.form.values.employee_id, "q");
        assert!(app.handle_ctrl(KeyCode::Char('q')));

        app.focus = Focus::Table;
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn renders_headers_and_rows() {
        let (_dir, app) = app_with(&[Record::new("E42", "Desk", "Furniture", "3", "Low")]);
        let screen = rendered(&app);
        assert!(screen.contains(APP_TITLE));
        for header in COLUMN_HEADERS {
            assert!(screen.contains(header), "missing {header}");
        }
        assert!(screen.contains("E42"));
        assert!(screen.contains("< Electronics >"));
    }
}
