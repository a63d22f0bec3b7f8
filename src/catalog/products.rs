use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Cell, Paragraph};

use crate::Theme;
use crate::catalog::model::{Product, format_price};
use crate::config::{KeyResolver, NavAction, ProductsAction, SearchAction};
use crate::search::Matcher;
use crate::ui::{ColumnDef, Component, EventResult, Keybinding, Result, Table, TableEvent, TableRow};

impl TableRow for Product {
    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::new("ID", Constraint::Length(8)),
            ColumnDef::new("Name", Constraint::Min(20)),
            ColumnDef::new("Price", Constraint::Length(14)),
            ColumnDef::new("Stock", Constraint::Length(8)),
        ];
        COLUMNS
    }

    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>> {
        let stock_style = if self.stock == 0 {
            Style::default().fg(theme.red())
        } else {
            Style::default()
        };
        vec![
            Cell::from(self.id.to_string()),
            Cell::from(self.name.clone()),
            Cell::from(format_price(self.price)),
            Cell::from(self.stock.to_string()).style(stock_style),
        ]
    }

    fn matches(&self, query: &str) -> bool {
        Matcher::new().matches_any([self.id.to_string().as_str(), self.name.as_str()], query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductsEvent {
    Edit(Product),
    Delete(i64),
    New,
    Reload,
}

/// The product list pane.
pub struct ProductTable {
    table: Table<Product>,
    resolver: Arc<KeyResolver>,
}

impl ProductTable {
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            table: Table::new(Vec::new(), Arc::clone(&resolver)).with_title(" Products "),
            resolver,
        }
    }

    pub fn set_products(&mut self, products: Vec<Product>) {
        self.table.set_items(products);
    }

    pub fn products(&self) -> &[Product] {
        self.table.items()
    }

    pub fn set_loading(&mut self, loading: bool) {
        let message = if loading {
            "Loading products...".to_string()
        } else {
            format!(
                "No products yet. Press {} to add one.",
                self.resolver.display_products(ProductsAction::New)
            )
        };
        self.table.set_empty_message(message);
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.table.set_focused(focused);
    }

    pub const fn is_searching(&self) -> bool {
        self.table.is_searching()
    }

    pub fn keybindings(&self) -> Vec<Keybinding> {
        let r = &self.resolver;
        vec![
            Keybinding::new(r.display_products(ProductsAction::Edit), "Edit"),
            Keybinding::new(r.display_products(ProductsAction::New), "New"),
            Keybinding::new(r.display_products(ProductsAction::Delete), "Delete"),
            Keybinding::new(r.display_products(ProductsAction::Reload), "Refresh"),
            Keybinding::new(r.display_search(SearchAction::Toggle), "Search"),
            Keybinding::new(
                format!(
                    "{}/{}",
                    r.display_nav(NavAction::Up),
                    r.display_nav(NavAction::Down)
                ),
                "Move",
            ),
        ]
    }

    fn selected(&self) -> Option<&Product> {
        self.table.selected_item()
    }
}

impl Component for ProductTable {
    type Output = ProductsEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if !self.table.is_searching() {
            let resolver = Arc::clone(&self.resolver);
            let action = |action| resolver.matches_products(&key, action);

            if action(ProductsAction::New) {
                return Ok(ProductsEvent::New.into());
            }
            if action(ProductsAction::Reload) {
                return Ok(ProductsEvent::Reload.into());
            }
            if action(ProductsAction::Delete) {
                return Ok(self
                    .selected()
                    .map_or(EventResult::Consumed, |p| ProductsEvent::Delete(p.id).into()));
            }
            if action(ProductsAction::Edit) {
                return Ok(self
                    .selected()
                    .map_or(EventResult::Consumed, |p| ProductsEvent::Edit(p.clone()).into()));
            }
        }

        Ok(match self.table.handle_key(key)? {
            EventResult::Event(TableEvent::Activated(product)) => ProductsEvent::Edit(product).into(),
            EventResult::Consumed => EventResult::Consumed,
            EventResult::Ignored => EventResult::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [table, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        self.table.render(frame, table, theme);

        let count = self.table.items().len();
        let text = if count == 1 {
            "1 product ".to_string()
        } else {
            format!("{count} products ")
        };
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Right)
                .style(Style::default().fg(theme.subtext0())),
            footer,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn product(id: i64, name: &str, price: i64, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price,
            stock,
        }
    }

    fn table() -> ProductTable {
        let mut table = ProductTable::new(Arc::new(KeyResolver::default()));
        table.set_products(vec![
            product(1, "Hoodie", 10000, 5),
            product(2, "Cap", 5000, 3),
        ]);
        table
    }

    fn press(table: &mut ProductTable, code: KeyCode) -> EventResult<ProductsEvent> {
        table.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn screen_text(table: &mut ProductTable) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                table.render(frame, area, &Theme::default());
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_renders_product_row() {
        let mut table = ProductTable::new(Arc::new(KeyResolver::default()));
        table.set_products(vec![product(1, "Hoodie", 10000, 5)]);

        let lines = screen_text(&mut table);
        let row = lines
            .iter()
            .find(|line| line.contains("Hoodie"))
            .expect("row rendered");
        let cells: Vec<&str> = row
            .split(|c: char| c == '│' || c == '▶' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        assert_eq!(cells, vec!["1", "Hoodie", "10,000", "5"]);
        assert!(lines.iter().any(|line| line.contains("1 product")));
    }

    #[test]
    fn test_empty_message_depends_on_loading() {
        let mut table = ProductTable::new(Arc::new(KeyResolver::default()));
        table.set_loading(true);
        assert!(screen_text(&mut table).iter().any(|l| l.contains("Loading products...")));
        table.set_loading(false);
        assert!(screen_text(&mut table).iter().any(|l| l.contains("No products yet")));
    }

    #[test]
    fn test_row_actions() {
        let mut table = table();
        assert_eq!(
            press(&mut table, KeyCode::Char('e')),
            EventResult::Event(ProductsEvent::Edit(product(1, "Hoodie", 10000, 5)))
        );
        press(&mut table, KeyCode::Down);
        assert_eq!(
            press(&mut table, KeyCode::Enter),
            EventResult::Event(ProductsEvent::Edit(product(2, "Cap", 5000, 3)))
        );
        assert_eq!(
            press(&mut table, KeyCode::Char('d')),
            EventResult::Event(ProductsEvent::Delete(2))
        );
        assert_eq!(
            press(&mut table, KeyCode::Delete),
            EventResult::Event(ProductsEvent::Delete(2))
        );
        assert_eq!(press(&mut table, KeyCode::Char('n')), EventResult::Event(ProductsEvent::New));
        assert_eq!(press(&mut table, KeyCode::Char('r')), EventResult::Event(ProductsEvent::Reload));
    }

    #[test]
    fn test_row_actions_need_a_selection() {
        let mut table = ProductTable::new(Arc::new(KeyResolver::default()));
        assert_eq!(press(&mut table, KeyCode::Char('d')), EventResult::Consumed);
        assert_eq!(press(&mut table, KeyCode::Char('e')), EventResult::Consumed);
    }

    #[test]
    fn test_search_swallows_action_keys() {
        let mut table = table();
        press(&mut table, KeyCode::Char('/'));
        assert!(table.is_searching());
        for c in "cap".chars() {
            assert_eq!(press(&mut table, KeyCode::Char(c)), EventResult::Consumed);
        }
        press(&mut table, KeyCode::Enter);
        assert_eq!(
            press(&mut table, KeyCode::Char('d')),
            EventResult::Event(ProductsEvent::Delete(2))
        );
    }
}
