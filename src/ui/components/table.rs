use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, TableState};

use crate::Theme;
use crate::config::{KeyResolver, NavAction, SearchAction};
use crate::ui::{Component, EventResult, Result};

const PAGE_STEP: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent<T> {
    /// Select key pressed on a row.
    Activated(T),
}

pub struct ColumnDef {
    pub header: &'static str,
    pub constraint: Constraint,
}

impl ColumnDef {
    pub const fn new(header: &'static str, constraint: Constraint) -> Self {
        Self { header, constraint }
    }
}

pub trait TableRow {
    fn columns() -> &'static [ColumnDef];

    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>>;

    /// Return true if this row matches the search query.
    fn matches(&self, query: &str) -> bool;
}

/// Selectable table with `/` filtering.
pub struct Table<T: TableRow + Clone> {
    items: Vec<T>,
    filtered: Vec<usize>,
    state: TableState,
    title: Option<String>,
    empty_message: String,
    searching: bool,
    query: String,
    focused: bool,
    resolver: Arc<KeyResolver>,
}

impl<T: TableRow + Clone> Table<T> {
    pub fn new(items: Vec<T>, resolver: Arc<KeyResolver>) -> Self {
        let mut table = Self {
            items: Vec::new(),
            filtered: Vec::new(),
            state: TableState::default(),
            title: None,
            empty_message: String::new(),
            searching: false,
            query: String::new(),
            focused: true,
            resolver,
        };
        table.set_items(items);
        table
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_empty_message(&mut self, message: impl Into<String>) {
        self.empty_message = message.into();
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Replace all rows, keeping the active filter and the selected position
    /// where possible.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.update_filter();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected_item(&self) -> Option<&T> {
        let selected = self.state.selected()?;
        let &idx = self.filtered.get(selected)?;
        self.items.get(idx)
    }

    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    fn update_filter(&mut self) {
        self.filtered = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.query.is_empty() || item.matches(&self.query))
            .map(|(i, _)| i)
            .collect();

        if self.filtered.is_empty() {
            self.state.select(None);
        } else {
            let last = self.filtered.len() - 1;
            let selected = self.state.selected().map_or(0, |i| i.min(last));
            self.state.select(Some(selected));
        }
    }

    fn select(&mut self, index: impl FnOnce(usize, usize) -> usize) {
        if self.filtered.is_empty() {
            return;
        }
        let last = self.filtered.len() - 1;
        let current = self.state.selected().unwrap_or(0);
        self.state.select(Some(index(current, last).min(last)));
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> EventResult<TableEvent<T>> {
        if self.resolver.matches_search(&key, SearchAction::Exit) {
            self.searching = false;
            self.query.clear();
            self.update_filter();
            return EventResult::Consumed;
        }

        // Select leaves search mode but keeps the filter
        if self.resolver.matches_nav(&key, NavAction::Select) {
            self.searching = false;
            return EventResult::Consumed;
        }

        match key.code {
            KeyCode::Backspace => {
                self.query.pop();
                self.update_filter();
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.update_filter();
            }
            _ => {}
        }
        EventResult::Consumed
    }

    fn handle_navigation_key(&mut self, key: KeyEvent) -> EventResult<TableEvent<T>> {
        let resolver = Arc::clone(&self.resolver);
        let nav = |action| resolver.matches_nav(&key, action);

        if nav(NavAction::Down) {
            self.select(|i, _| i + 1);
        } else if nav(NavAction::Up) {
            self.select(|i, _| i.saturating_sub(1));
        } else if nav(NavAction::Home) {
            self.select(|_, _| 0);
        } else if nav(NavAction::End) {
            self.select(|_, last| last);
        } else if nav(NavAction::PageDown) {
            self.select(|i, _| i + PAGE_STEP);
        } else if nav(NavAction::PageUp) {
            self.select(|i, _| i.saturating_sub(PAGE_STEP));
        } else if nav(NavAction::Select) {
            return self
                .selected_item()
                .map_or(EventResult::Ignored, |item| {
                    TableEvent::Activated(item.clone()).into()
                });
        } else if self.resolver.matches_search(&key, SearchAction::Toggle) {
            self.searching = true;
        } else if self.resolver.matches_search(&key, SearchAction::Exit) && !self.query.is_empty()
        {
            self.query.clear();
            self.update_filter();
        } else {
            return EventResult::Ignored;
        }
        EventResult::Consumed
    }
}

impl<T: TableRow + Clone> Component for Table<T> {
    type Output = TableEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        Ok(if self.searching {
            self.handle_search_key(key)
        } else {
            self.handle_navigation_key(key)
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let has_search_bar = self.searching || !self.query.is_empty();
        let (table_area, search_area) = if has_search_bar {
            let [table, search] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
            (table, Some(search))
        } else {
            (area, None)
        };

        let columns = T::columns();
        let header = Row::new(columns.iter().map(|c| {
            Cell::from(c.header).style(
                Style::default()
                    .fg(theme.header())
                    .add_modifier(Modifier::BOLD),
            )
        }))
        .style(Style::default().bg(theme.surface0()));

        let rows: Vec<Row> = self
            .filtered
            .iter()
            .map(|&idx| {
                Row::new(self.items[idx].render_cells(theme))
                    .style(Style::default().fg(theme.text()))
            })
            .collect();

        let widths: Vec<Constraint> = columns.iter().map(|c| c.constraint).collect();
        let mut table = ratatui::widgets::Table::new(rows, widths)
            .header(header)
            .row_highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        if let Some(title) = &self.title {
            let border = if self.focused {
                theme.border_focused()
            } else {
                theme.border()
            };
            table = table.block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border))
                    .title(title.as_str())
                    .title_style(
                        Style::default()
                            .fg(theme.mauve())
                            .add_modifier(Modifier::BOLD),
                    ),
            );
        }

        frame.render_stateful_widget(table, table_area, &mut self.state);

        if self.filtered.is_empty() {
            let inner = if self.title.is_some() {
                table_area.inner(Margin::new(1, 1))
            } else {
                table_area
            };
            let [_, body] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
            let message = if self.items.is_empty() {
                self.empty_message.as_str()
            } else {
                "No matches"
            };
            frame.render_widget(
                Paragraph::new(message).style(Style::default().fg(theme.overlay1())),
                body,
            );
        }

        if let Some(search_area) = search_area {
            let (text, color) = if self.searching {
                (format!("/{}_", self.query), theme.yellow())
            } else {
                (
                    format!("/{} ({} matches)", self.query, self.filtered.len()),
                    theme.subtext0(),
                )
            };
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(color)),
                search_area,
            );
        }
    }
}
