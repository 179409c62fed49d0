//! Companies list and form.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::application::services::{Mutation, Query, QueryData};
use crate::domain::entities::{Company, CompanyId};
use crate::domain::ports::CompanyDraft;
use crate::presentation::events::{cycle_focus, focus_move, is_cancel_event, is_submit_event};
use crate::presentation::widgets::TextInput;

use super::Route;
use super::screen::{KeyHints, Screen, ScreenCommand, clamp_selection, step_selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompanyFocus {
    Name,
    Website,
    Industry,
    Location,
    CareersPage,
    ContactEmail,
    List,
}

const FOCUS_ORDER: [CompanyFocus; 7] = [
    CompanyFocus::Name,
    CompanyFocus::Website,
    CompanyFocus::Industry,
    CompanyFocus::Location,
    CompanyFocus::CareersPage,
    CompanyFocus::ContactEmail,
    CompanyFocus::List,
];

/// Adds a scheme to bare host names so the system opener treats them as URLs.
#[must_use]
pub fn browser_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else if raw.contains("://") {
        Some(raw.to_string())
    } else {
        Some(format!("https://{raw}"))
    }
}

pub struct CompaniesScreen {
    companies: Vec<Company>,
    table: TableState,
    name: TextInput,
    website: TextInput,
    industry: TextInput,
    location: TextInput,
    careers_page: TextInput,
    contact_email: TextInput,
    editing: Option<CompanyId>,
    focus: CompanyFocus,
}

impl Default for CompaniesScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CompaniesScreen {
    #[must_use]
    pub fn new() -> Self {
        let mut screen = Self {
            companies: Vec::new(),
            table: TableState::default(),
            name: TextInput::new("Name").placeholder("Company name"),
            website: TextInput::new("Website").placeholder("Website"),
            industry: TextInput::new("Industry").placeholder("Industry"),
            location: TextInput::new("Location").placeholder("Location"),
            careers_page: TextInput::new("Careers Page").placeholder("Careers Page"),
            contact_email: TextInput::new("Contact Email").placeholder("Contact Email"),
            editing: None,
            focus: CompanyFocus::Name,
        };
        screen.sync_focus();
        screen
    }

    #[must_use]
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    fn draft(&self) -> CompanyDraft {
        CompanyDraft {
            name: self.name.value().trim().to_string(),
            website: self.website.value().trim().to_string(),
            industry: self.industry.value().trim().to_string(),
            location: self.location.value().trim().to_string(),
            careers_page: self.careers_page.value().trim().to_string(),
            contact_email: self.contact_email.value().trim().to_string(),
        }
    }

    fn reset_form(&mut self) {
        for input in self.inputs_mut() {
            input.clear();
        }
        self.editing = None;
    }

    fn edit_selected(&mut self) {
        let Some(company) = self.selected().cloned() else {
            return;
        };
        self.name.set_value(company.name);
        self.website.set_value(company.website.unwrap_or_default());
        self.industry.set_value(company.industry.unwrap_or_default());
        self.location.set_value(company.location.unwrap_or_default());
        self.careers_page
            .set_value(company.careers_page.unwrap_or_default());
        self.contact_email
            .set_value(company.contact_email.unwrap_or_default());
        self.editing = Some(company.id);
        self.focus = CompanyFocus::Name;
        self.sync_focus();
    }

    fn selected(&self) -> Option<&Company> {
        self.table.selected().and_then(|i| self.companies.get(i))
    }

    fn submit(&self) -> ScreenCommand {
        let draft = self.draft();
        if draft.name.is_empty() {
            return ScreenCommand::Invalid("Company name is required".to_string());
        }
        match &self.editing {
            Some(id) => ScreenCommand::Mutate(Mutation::UpdateCompany {
                id: id.clone(),
                draft,
            }),
            None => ScreenCommand::Mutate(Mutation::CreateCompany(draft)),
        }
    }

    fn open(url: Option<String>, missing: &str) -> ScreenCommand {
        url.map_or_else(
            || ScreenCommand::Invalid(missing.to_string()),
            ScreenCommand::Open,
        )
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> ScreenCommand {
        if step_selection(&mut self.table, self.companies.len(), &key) {
            return ScreenCommand::None;
        }
        if matches!(key.code, KeyCode::Char('e') | KeyCode::Enter) {
            self.edit_selected();
            return ScreenCommand::None;
        }
        let Some(company) = self.selected() else {
            return ScreenCommand::None;
        };
        match key.code {
            KeyCode::Char('d') => ScreenCommand::confirm(
                "Delete this company?",
                Mutation::DeleteCompany(company.id.clone()),
            ),
            KeyCode::Char('o') => Self::open(
                company.website.as_deref().and_then(browser_url),
                "This company has no website",
            ),
            KeyCode::Char('c') => Self::open(
                company.careers_page.as_deref().and_then(browser_url),
                "This company has no careers page",
            ),
            KeyCode::Char('m') => Self::open(company.mailto(), "This company has no contact email"),
            _ => ScreenCommand::None,
        }
    }

    fn inputs_mut(&mut self) -> [&mut TextInput; 6] {
        [
            &mut self.name,
            &mut self.website,
            &mut self.industry,
            &mut self.location,
            &mut self.careers_page,
            &mut self.contact_email,
        ]
    }

    fn sync_focus(&mut self) {
        let focus = self.focus;
        for (input, field) in self.inputs_mut().into_iter().zip(FOCUS_ORDER) {
            input.set_focused(field == focus);
        }
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        let index = FOCUS_ORDER.iter().position(|f| *f == self.focus)?;
        self.inputs_mut().into_iter().nth(index)
    }
}

impl Screen for CompaniesScreen {
    fn route(&self) -> Route {
        Route::Companies
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenCommand {
        if let Some(direction) = focus_move(&key) {
            self.focus = cycle_focus(&FOCUS_ORDER, self.focus, direction);
            self.sync_focus();
            return ScreenCommand::None;
        }

        if is_cancel_event(&key) {
            self.reset_form();
            self.focus = CompanyFocus::List;
            self.sync_focus();
            return ScreenCommand::None;
        }

        if self.focus == CompanyFocus::List {
            return self.handle_list_key(key);
        }

        if is_submit_event(&key) {
            return self.submit();
        }

        if let Some(input) = self.focused_input() {
            input.handle_key(key);
        }
        ScreenCommand::None
    }

    fn queries(&self) -> Vec<Query> {
        vec![Query::Companies]
    }

    fn apply(&mut self, data: QueryData) {
        if let QueryData::Companies(companies) = data {
            self.companies = companies;
            clamp_selection(&mut self.table, self.companies.len());
        }
    }

    fn mutation_succeeded(&mut self, mutation: &Mutation) {
        if matches!(
            mutation,
            Mutation::CreateCompany(_) | Mutation::UpdateCompany { .. }
        ) {
            self.reset_form();
        }
    }

    fn is_editing(&self) -> bool {
        self.focus != CompanyFocus::List
    }

    fn hints(&self) -> KeyHints {
        if self.focus == CompanyFocus::List {
            &[
                ("e", "edit"),
                ("d", "delete"),
                ("o", "website"),
                ("c", "careers"),
                ("m", "email"),
                ("Tab", "form"),
            ]
        } else {
            &[("Tab", "next field"), ("Enter", "save"), ("Esc", "reset")]
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [form_area, list_area] =
            Layout::vertical([Constraint::Length(11), Constraint::Min(3)]).areas(area);

        let title = if self.editing.is_some() {
            " Companies: Update "
        } else {
            " Companies: Add "
        };
        let form_block = Block::default().borders(Borders::ALL).title(title);
        let form_inner = form_block.inner(form_area);
        frame.render_widget(form_block, form_area);

        let rows = Layout::vertical([Constraint::Length(3); 3]).split(form_inner);
        let inputs = [
            &self.name,
            &self.website,
            &self.industry,
            &self.location,
            &self.careers_page,
            &self.contact_email,
        ];
        for (row, pair) in rows.iter().zip(inputs.chunks(2)) {
            let [left, right] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(*row);
            frame.render_widget(pair[0], left);
            frame.render_widget(pair[1], right);
        }

        let list_block = Block::default()
            .borders(Borders::ALL)
            .title(" Your companies ")
            .border_style(if self.focus == CompanyFocus::List {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            });

        if self.companies.is_empty() {
            frame.render_widget(Paragraph::new("No companies yet").block(list_block), list_area);
            return;
        }

        let rows: Vec<Row> = self
            .companies
            .iter()
            .map(|c| {
                Row::new(vec![
                    Cell::from(c.name.as_str()),
                    Cell::from(c.industry_label()),
                    Cell::from(c.location_label()),
                    Cell::from(c.website.as_deref().unwrap_or("")),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(30),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(30),
            ],
        )
        .header(
            Row::new(vec!["Name", "Industry", "Location", "Website"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(list_block)
        .row_highlight_style(Style::default().bg(Color::DarkGray));

        frame.render_stateful_widget(table, list_area, &mut self.table);
    }
}
