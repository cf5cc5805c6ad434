use crate::budget::{parse_budget, BudgetStatus};
use crate::error::TrackerResult;
use crate::expense::{Expense, NewExpense, CATEGORIES};
use crate::session::{RecordedAlerts, Session};
use crate::store::KeyValueStore;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Expenses,
    Categories,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Expenses => Page::Categories,
            Page::Categories => Page::Expenses,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Expenses => "Expenses",
            Page::Categories => "Categories",
        }
    }
}

// ============================================================================
// ENTRY FORMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Add,
    Edit,
    Budget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Amount,
    Category,
    Date,
    Recurring,
    Budget,
}

const EXPENSE_FIELDS: [FormField; 5] = [
    FormField::Name,
    FormField::Amount,
    FormField::Category,
    FormField::Date,
    FormField::Recurring,
];
const BUDGET_FIELDS: [FormField; 1] = [FormField::Budget];

impl FormField {
    fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Amount => "Amount",
            FormField::Category => "Category",
            FormField::Date => "Date",
            FormField::Recurring => "Monthly",
            FormField::Budget => "Budget",
        }
    }
}

/// Raw text typed into the add/edit/budget popup
#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    pub name: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub monthly: bool,
    /// Empty means "no limit"
    pub budget: String,
    pub focus: usize,
    pub error: Option<String>,
    /// Fields taken out of the ledger for an edit; re-added on cancel
    original: Option<NewExpense>,
}

impl Form {
    fn blank(kind: FormKind) -> Self {
        Form {
            kind,
            name: String::new(),
            amount: String::new(),
            category: crate::expense::DEFAULT_CATEGORY.to_string(),
            date: chrono::Local::now().date_naive().to_string(),
            monthly: false,
            budget: String::new(),
            focus: 0,
            error: None,
            original: None,
        }
    }

    pub fn add() -> Self {
        Form::blank(FormKind::Add)
    }

    pub fn edit(fields: NewExpense) -> Self {
        Form {
            name: fields.name.clone(),
            amount: fields.amount.to_string(),
            category: fields.category.clone(),
            date: fields.date.clone(),
            monthly: fields.recurring.is_some(),
            original: Some(fields),
            ..Form::blank(FormKind::Edit)
        }
    }

    pub fn budget(current: Option<f64>) -> Self {
        Form {
            budget: current.map(|b| b.to_string()).unwrap_or_default(),
            ..Form::blank(FormKind::Budget)
        }
    }

    pub fn fields(&self) -> &'static [FormField] {
        match self.kind {
            FormKind::Budget => &BUDGET_FIELDS,
            FormKind::Add | FormKind::Edit => &EXPENSE_FIELDS,
        }
    }

    pub fn focused(&self) -> FormField {
        self.fields()[self.focus]
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn prev_field(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focused() {
            FormField::Name => Some(&mut self.name),
            FormField::Amount => Some(&mut self.amount),
            FormField::Category => Some(&mut self.category),
            FormField::Date => Some(&mut self.date),
            FormField::Budget => Some(&mut self.budget),
            FormField::Recurring => None,
        }
    }

    pub fn input(&mut self, c: char) {
        if self.focused() == FormField::Recurring {
            if c == ' ' {
                self.monthly = !self.monthly;
            }
            return;
        }
        if let Some(text) = self.text_mut() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    /// Left/Right: step through the suggested categories or flip the
    /// monthly marker
    pub fn cycle(&mut self, delta: i32) {
        match self.focused() {
            FormField::Category => {
                let len = CATEGORIES.len() as i32;
                let pos = match CATEGORIES.iter().position(|c| *c == self.category) {
                    Some(pos) => (pos as i32 + delta).rem_euclid(len),
                    None if delta > 0 => 0,
                    None => len - 1,
                };
                self.category = CATEGORIES[pos as usize].to_string();
            }
            FormField::Recurring => self.monthly = !self.monthly,
            _ => {}
        }
    }

    fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Add => " New Expense ",
            FormKind::Edit => " Edit Expense ",
            FormKind::Budget => " Budget ",
        }
    }

    fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Amount => self.amount.clone(),
            FormField::Category => self.category.clone(),
            FormField::Date => self.date.clone(),
            FormField::Recurring => String::from(if self.monthly { "[x]" } else { "[ ]" }),
            FormField::Budget if self.budget.is_empty() && field != self.focused() => {
                "no limit".to_string()
            }
            FormField::Budget => self.budget.clone(),
        }
    }
}

// ============================================================================
// APP
// ============================================================================

pub struct App<S: KeyValueStore> {
    pub session: Session<S, RecordedAlerts>,
    pub state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
    /// Alerts from the latest mutation, shown until the next one
    pub last_alert: Option<String>,
    /// Open entry popup; while set it receives every key
    pub form: Option<Form>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(session: Session<S, RecordedAlerts>) -> Self {
        let mut state = TableState::default();
        if !session.ledger().is_empty() {
            state.select(Some(0));
        }

        Self {
            session,
            state,
            current_page: Page::Expenses,
            show_detail: false,
            last_alert: None,
            form: None,
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        self.session.ledger().expenses()
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.state.selected().and_then(|i| self.expenses().get(i))
    }

    /// Delete the highlighted record and keep the cursor in range
    pub fn delete_selected(&mut self) -> Result<()> {
        let id = match self.selected_expense() {
            Some(expense) => expense.id,
            None => return Ok(()),
        };

        self.session.delete_expense(id)?;
        self.take_alerts();
        self.clamp_selection();
        Ok(())
    }

    // ========================================================================
    // FORMS
    // ========================================================================

    pub fn start_add(&mut self) {
        self.form = Some(Form::add());
    }

    pub fn start_budget(&mut self) {
        self.form = Some(Form::budget(self.session.budget()));
    }

    /// Take the highlighted record out of the ledger and pre-fill a form
    /// with it. Submitting re-adds it under a new id.
    pub fn start_edit(&mut self) -> Result<()> {
        let id = match self.selected_expense() {
            Some(expense) => expense.id,
            None => return Ok(()),
        };

        if let Some(fields) = self.session.take_for_edit(id)? {
            self.form = Some(Form::edit(fields));
            self.clamp_selection();
        }
        Ok(())
    }

    /// Apply the open form; on rejection it stays open with the error
    pub fn submit_form(&mut self) {
        let mut form = match self.form.take() {
            Some(form) => form,
            None => return,
        };

        match self.apply_form(&form) {
            Ok(()) => self.take_alerts(),
            Err(e) => {
                form.error = Some(e.to_string());
                self.form = Some(form);
            }
        }
    }

    /// Close the form; an edit puts the taken record back
    pub fn cancel_form(&mut self) {
        let mut form = match self.form.take() {
            Some(form) => form,
            None => return,
        };

        if let Some(original) = form.original.take() {
            if let Err(e) = self.session.add_expense(original.clone()) {
                form.error = Some(format!("could not restore record: {}", e));
                form.original = Some(original);
                self.form = Some(form);
                return;
            }
            self.last();
            self.take_alerts();
        }
    }

    fn apply_form(&mut self, form: &Form) -> TrackerResult<()> {
        match form.kind {
            FormKind::Add | FormKind::Edit => {
                let new = NewExpense::parse(
                    &form.name,
                    &form.amount,
                    Some(form.category.as_str()),
                    &form.date,
                    form.monthly,
                )?;
                self.session.add_expense(new)?;
                self.last();
            }
            FormKind::Budget => match form.budget.trim() {
                "" => self.session.clear_budget()?,
                raw => {
                    self.session.set_budget(parse_budget(raw)?)?;
                }
            },
        }
        Ok(())
    }

    fn take_alerts(&mut self) {
        let alerts = self.session.alerts_mut().drain();
        self.last_alert = if alerts.is_empty() {
            None
        } else {
            Some(alerts.join("  "))
        };
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    fn clamp_selection(&mut self) {
        let len = self.expenses().len();
        let selected = match self.state.selected() {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            other => other,
        };
        self.state.select(selected);
    }

    pub fn first(&mut self) {
        if !self.expenses().is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        let len = self.expenses().len();
        if len > 0 {
            self.state.select(Some(len - 1));
        }
    }

    pub fn next(&mut self) {
        let len = self.expenses().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.expenses().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.expenses().len();
        if len == 0 {
            return;
        }
        let i = self.state.selected().map(|i| (i + 20).min(len - 1)).unwrap_or(0);
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.expenses().is_empty() {
            return;
        }
        let i = self.state.selected().map(|i| i.saturating_sub(20)).unwrap_or(0);
        self.state.select(Some(i));
    }
}

pub fn run_ui<S: KeyValueStore>(app: &mut App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl_c =
                key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);

            if app.form.is_some() {
                if ctrl_c {
                    app.cancel_form();
                    return Ok(());
                }
                handle_form_key(app, key.code);
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                _ if ctrl_c => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => app.next_page(),
                KeyCode::Char('a') => app.start_add(),
                KeyCode::Char('b') => app.start_budget(),
                KeyCode::Char('e') if app.current_page == Page::Expenses => app.start_edit()?,
                KeyCode::Char('d') | KeyCode::Delete if app.current_page == Page::Expenses => {
                    app.delete_selected()?
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.first(),
                KeyCode::End => app.last(),
                _ => {}
            }
        }
    }
}

fn handle_form_key<S: KeyValueStore>(app: &mut App<S>, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter => app.submit_form(),
        _ => {
            if let Some(form) = app.form.as_mut() {
                match code {
                    KeyCode::Tab | KeyCode::Down => form.next_field(),
                    KeyCode::BackTab | KeyCode::Up => form.prev_field(),
                    KeyCode::Left => form.cycle(-1),
                    KeyCode::Right => form.cycle(1),
                    KeyCode::Backspace => form.backspace(),
                    KeyCode::Char(c) => form.input(c),
                    _ => {}
                }
            }
        }
    }
}

fn ui<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with budget summary
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Expenses => {
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[1]);

            render_table(f, content_chunks[0], app);
            if app.show_detail {
                render_detail_panel(f, content_chunks[1], app);
            } else {
                render_chart(f, content_chunks[1], app);
            }
        }
        Page::Categories => render_categories(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);

    if let Some(form) = &app.form {
        let area = centered_rect(50, 14, f.size());
        render_form(f, area, form);
    }
}

fn status_color(status: Option<BudgetStatus>) -> Color {
    match status {
        Some(BudgetStatus::WithinLimit) => Color::Green,
        Some(BudgetStatus::Approaching) => Color::Yellow,
        Some(BudgetStatus::Exceeded) => Color::Red,
        None => Color::DarkGray,
    }
}

fn render_header<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let session = &app.session;
    let status = session.budget_status();

    let mut spans = vec![];
    for (i, page) in [Page::Expenses, Page::Categories].iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }
        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(page.title().to_string(), style));
    }

    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("Total: ${:.2}", session.ledger().grand_total()),
        Style::default().fg(Color::White),
    ));
    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        match session.budget() {
            Some(budget) => format!("Budget: ${:.2}", budget),
            None => "Budget: no limit".to_string(),
        },
        Style::default().fg(status_color(status)),
    ));
    if let Some(status) = status {
        spans.push(Span::styled(
            format!(" ({})", status.as_str()),
            Style::default().fg(status_color(Some(status))),
        ));
    }
    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("Total Rewards: 💰 ${}", session.total_rewards()),
        Style::default().fg(Color::Magenta),
    ));

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_table<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &mut App<S>) {
    let header_cells = ["Date", "Name", "Amount", "Category", ""]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows: Vec<Row> = app
        .expenses()
        .iter()
        .map(|expense| {
            let cells = vec![
                Cell::from(expense.date.clone()),
                Cell::from(truncate(&expense.name, 28)),
                Cell::from(format!("{:.2}", expense.amount))
                    .style(Style::default().fg(Color::Red)),
                Cell::from(truncate(&expense.category, 16)),
                Cell::from(if expense.is_recurring() { "↻" } else { "" }),
            ];
            Row::new(cells).height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(30),
            Constraint::Length(12),
            Constraint::Length(18),
            Constraint::Length(2),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Expenses "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_chart<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let totals = app.session.ledger().totals_by_category();
    let bars: Vec<(&str, u64)> = totals
        .iter()
        .map(|(category, total)| (category.as_str(), total.round().max(0.0) as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" By Category "),
        )
        .data(bars.as_slice())
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    f.render_widget(chart, area);
}

fn render_categories<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let ledger = app.session.ledger();
    let grand_total = ledger.grand_total();

    let header = Row::new(["Category", "Total", "Share"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().bg(Color::DarkGray));

    let rows: Vec<Row> = ledger
        .totals_by_category()
        .into_iter()
        .map(|(category, total)| {
            let share = if grand_total > 0.0 {
                total / grand_total * 100.0
            } else {
                0.0
            };
            Row::new(vec![
                Cell::from(category),
                Cell::from(format!("{:.2}", total)),
                Cell::from(format!("{:.1}%", share)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(25),
            Constraint::Length(15),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Totals by Category "),
    );

    f.render_widget(table, area);
}

fn render_detail_panel<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));

    let content = match app.selected_expense() {
        Some(expense) => vec![
            Line::from(vec![label("ID:        "), Span::raw(expense.id.to_string())]),
            Line::from(vec![label("Name:      "), Span::raw(expense.name.clone())]),
            Line::from(vec![label("Amount:    "), Span::raw(format!("${}", expense.amount))]),
            Line::from(vec![label("Category:  "), Span::raw(expense.category.clone())]),
            Line::from(vec![label("Date:      "), Span::raw(expense.date.clone())]),
            Line::from(vec![
                label("Recurring: "),
                Span::raw(expense.recurring.map(|r| r.as_str()).unwrap_or("no")),
            ]),
        ],
        None => vec![Line::from("No expense selected")],
    };

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Detail "),
    );

    f.render_widget(panel, area);
}

fn render_form(f: &mut Frame, area: Rect, form: &Form) {
    let mut lines = vec![Line::from("")];
    for (i, field) in form.fields().iter().enumerate() {
        let focused = i == form.focus;
        let marker = if focused { "▶ " } else { "  " };
        let cursor = if focused && *field != FormField::Recurring { "_" } else { "" };
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<10}", marker, field.label()), style),
            Span::raw(format!("{}{}", form.value(*field), cursor)),
        ]));
    }

    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("✗ {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    let hint = match form.focused() {
        FormField::Category => "←/→ suggested labels | ",
        FormField::Recurring => "Space or ←/→ toggle | ",
        _ => "",
    };
    lines.push(Line::from(Span::styled(
        format!("{}Tab next | Enter save | Esc cancel", hint),
        Style::default().fg(Color::DarkGray),
    )));

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(form.title()),
    );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

/// Fixed-height box, `percent_x` wide, centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn render_status_bar<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.expenses().len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(alert) = &app.last_alert {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("🔔 {}", alert),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Details | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    let actions = [
        ("a", " Add | "),
        ("e", " Edit | "),
        ("d", " Delete | "),
        ("b", " Budget | "),
    ];
    for (key, action) in actions {
        status_spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(action));
    }
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
