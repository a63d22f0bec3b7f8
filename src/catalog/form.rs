use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::Theme;
use crate::catalog::model::{Product, ProductPayload};
use crate::config::{FormAction, KeyResolver};
use crate::ui::{Component, EventResult, Keybinding, Result, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

/// Raw form content. Numeric fields keep the text as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub mode: FormMode,
    pub name: String,
    pub price: String,
    pub stock: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            price: "0".to_string(),
            stock: "0".to_string(),
        }
    }
}

impl FormState {
    pub fn editing(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit { id: product.id },
            name: product.name.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
        }
    }

    pub const fn editing_id(&self) -> Option<i64> {
        match self.mode {
            FormMode::Create => None,
            FormMode::Edit { id } => Some(id),
        }
    }

    /// The request body, or `None` while the form is not submittable.
    pub fn payload(&self) -> Option<ProductPayload> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(ProductPayload {
            name: name.to_string(),
            price: parse_amount(&self.price)?,
            stock: parse_amount(&self.stock)?,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.payload().is_some()
    }
}

/// Empty counts as zero; negatives and non-integers are rejected.
fn parse_amount(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0);
    }
    text.parse::<i64>().ok().filter(|n| *n >= 0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Enter pressed on a valid form.
    Submit,
    Reset,
    /// Hand focus back to the product table.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Price,
    Stock,
}

impl Field {
    const fn next(self) -> Self {
        match self {
            Self::Name => Self::Price,
            Self::Price => Self::Stock,
            Self::Stock => Self::Name,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Name => Self::Stock,
            Self::Price => Self::Name,
            Self::Stock => Self::Price,
        }
    }
}

/// Create/edit form with name, price and stock fields.
pub struct ProductForm {
    mode: FormMode,
    name: TextField,
    price: TextField,
    stock: TextField,
    field: Field,
    focused: bool,
    resolver: Arc<KeyResolver>,
}

impl ProductForm {
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        let mut form = Self {
            mode: FormMode::Create,
            name: TextField::new("Name").with_placeholder("e.g. Hoodie"),
            price: TextField::new("Price"),
            stock: TextField::new("Stock"),
            field: Field::Name,
            focused: false,
            resolver,
        };
        form.set_state(&FormState::default());
        form
    }

    pub fn state(&self) -> FormState {
        FormState {
            mode: self.mode,
            name: self.name.value().to_string(),
            price: self.price.value().to_string(),
            stock: self.stock.value().to_string(),
        }
    }

    /// Load `state` into the fields and put the cursor on the name.
    pub fn set_state(&mut self, state: &FormState) {
        self.mode = state.mode;
        self.name.set_value(state.name.clone());
        self.price.set_value(state.price.clone());
        self.stock.set_value(state.stock.clone());
        self.field = Field::Name;
        self.refresh_fields();
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.refresh_fields();
    }

    pub fn keybindings(&self) -> Vec<Keybinding> {
        let submit = match self.mode {
            FormMode::Create => "Create",
            FormMode::Edit { .. } => "Save",
        };
        vec![
            Keybinding::new(self.resolver.display_form(FormAction::Submit), submit),
            Keybinding::new(self.resolver.display_form(FormAction::NextField), "Next field"),
            Keybinding::new(self.resolver.display_form(FormAction::Reset), "Reset"),
            Keybinding::new(self.resolver.display_form(FormAction::Leave), "Back to list"),
        ]
    }

    fn field_mut(&mut self, field: Field) -> &mut TextField {
        match field {
            Field::Name => &mut self.name,
            Field::Price => &mut self.price,
            Field::Stock => &mut self.stock,
        }
    }

    fn refresh_fields(&mut self) {
        let active = self.focused.then_some(self.field);
        for field in [Field::Name, Field::Price, Field::Stock] {
            self.field_mut(field).set_focused(active == Some(field));
        }
        let price_invalid = parse_amount(self.price.value()).is_none();
        let stock_invalid = parse_amount(self.stock.value()).is_none();
        self.price.set_invalid(price_invalid);
        self.stock.set_invalid(stock_invalid);
    }

    fn render_hint(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let valid = self.state().is_valid();
        let submit = match self.mode {
            FormMode::Create => "Create",
            FormMode::Edit { .. } => "Save",
        };
        let (key_style, submit_style) = if valid {
            (
                Style::default().fg(theme.peach()).add_modifier(Modifier::BOLD),
                Style::default().fg(theme.green()).add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(theme.overlay0()),
                Style::default().fg(theme.overlay0()),
            )
        };
        let dim = Style::default().fg(theme.overlay1());

        let line = Line::from(vec![
            Span::styled(
                format!("[{}]", self.resolver.display_form(FormAction::Submit)),
                key_style,
            ),
            Span::raw(" "),
            Span::styled(submit, submit_style),
            Span::raw("   "),
            Span::styled(
                format!("[{}]", self.resolver.display_form(FormAction::Reset)),
                Style::default().fg(theme.peach()),
            ),
            Span::styled(" Reset", dim),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for ProductForm {
    type Output = FormEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        let resolver = Arc::clone(&self.resolver);
        let action = |action| resolver.matches_form(&key, action);

        if action(FormAction::Submit) {
            // Submitting an invalid form does nothing.
            return Ok(if self.state().is_valid() {
                FormEvent::Submit.into()
            } else {
                EventResult::Consumed
            });
        }
        if action(FormAction::Reset) {
            return Ok(FormEvent::Reset.into());
        }
        if action(FormAction::Leave) {
            return Ok(FormEvent::Leave.into());
        }
        if action(FormAction::NextField) {
            self.field = self.field.next();
            self.refresh_fields();
            return Ok(EventResult::Consumed);
        }
        if action(FormAction::PrevField) {
            self.field = self.field.prev();
            self.refresh_fields();
            return Ok(EventResult::Consumed);
        }

        let result = self.field_mut(self.field).handle_key(key)?;
        self.refresh_fields();
        Ok(if result.is_consumed() {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.focused {
            theme.border_focused()
        } else {
            theme.border()
        };

        let mut title = vec![Span::styled(
            match self.mode {
                FormMode::Create => " New product ",
                FormMode::Edit { .. } => " Edit product ",
            },
            Style::default().fg(theme.mauve()).add_modifier(Modifier::BOLD),
        )];
        if let FormMode::Edit { id } = self.mode {
            title.push(Span::styled(
                format!(" ID: {id} "),
                Style::default().fg(theme.base()).bg(theme.blue()),
            ));
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [name, price, stock, _, hint] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.name.render(frame, name, theme);
        self.price.render(frame, price, theme);
        self.stock.render(frame, stock, theme);
        self.render_hint(frame, hint, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn hoodie() -> Product {
        Product {
            id: 1,
            name: "Hoodie".to_string(),
            price: 10000,
            stock: 5,
        }
    }

    fn form() -> ProductForm {
        let mut form = ProductForm::new(Arc::new(KeyResolver::default()));
        form.set_focused(true);
        form
    }

    fn press(form: &mut ProductForm, code: KeyCode, modifiers: KeyModifiers) -> EventResult<FormEvent> {
        form.handle_key(KeyEvent::new(code, modifiers)).unwrap()
    }

    fn type_str(form: &mut ProductForm, s: &str) {
        for c in s.chars() {
            press(form, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    fn clear_field(form: &mut ProductForm) {
        press(form, KeyCode::Char('u'), KeyModifiers::CONTROL);
    }

    #[test]
    fn test_default_state() {
        let state = FormState::default();
        assert_eq!(state.mode, FormMode::Create);
        assert_eq!(state.editing_id(), None);
        assert_eq!((state.name.as_str(), state.price.as_str(), state.stock.as_str()), ("", "0", "0"));
        assert!(!state.is_valid());
    }

    #[test]
    fn test_payload_validation() {
        let state = |name: &str, price: &str, stock: &str| FormState {
            mode: FormMode::Create,
            name: name.to_string(),
            price: price.to_string(),
            stock: stock.to_string(),
        };

        assert_eq!(
            state("  Cap ", "5000", "3").payload(),
            Some(ProductPayload {
                name: "Cap".to_string(),
                price: 5000,
                stock: 3,
            })
        );
        assert_eq!(state("Cap", "", "").payload().map(|p| (p.price, p.stock)), Some((0, 0)));
        assert_eq!(state("   ", "1", "1").payload(), None);
        assert_eq!(state("Cap", "-1", "1").payload(), None);
        assert_eq!(state("Cap", "1", "-1").payload(), None);
        assert_eq!(state("Cap", "1.5", "1").payload(), None);
        assert_eq!(state("Cap", "abc", "1").payload(), None);
    }

    #[test]
    fn test_editing_state() {
        let state = FormState::editing(&hoodie());
        assert_eq!(
            state,
            FormState {
                mode: FormMode::Edit { id: 1 },
                name: "Hoodie".to_string(),
                price: "10000".to_string(),
                stock: "5".to_string(),
            }
        );
        assert_eq!(state.editing_id(), Some(1));
    }

    #[test]
    fn test_fill_and_submit() {
        let mut form = form();
        type_str(&mut form, "Cap");
        press(&mut form, KeyCode::Tab, KeyModifiers::NONE);
        clear_field(&mut form);
        type_str(&mut form, "5000");
        press(&mut form, KeyCode::Down, KeyModifiers::NONE);
        clear_field(&mut form);
        type_str(&mut form, "3");

        assert_eq!(
            press(&mut form, KeyCode::Enter, KeyModifiers::NONE),
            EventResult::Event(FormEvent::Submit)
        );
        assert_eq!(
            form.state().payload(),
            Some(ProductPayload {
                name: "Cap".to_string(),
                price: 5000,
                stock: 3,
            })
        );
    }

    #[test]
    fn test_invalid_form_does_not_submit() {
        let mut form = form();
        assert_eq!(
            press(&mut form, KeyCode::Enter, KeyModifiers::NONE),
            EventResult::Consumed
        );

        type_str(&mut form, "Cap");
        press(&mut form, KeyCode::BackTab, KeyModifiers::SHIFT);
        type_str(&mut form, "-");
        assert_eq!(form.state().stock, "0-");
        assert_eq!(
            press(&mut form, KeyCode::Enter, KeyModifiers::NONE),
            EventResult::Consumed
        );
    }

    #[test]
    fn test_reset_and_leave_are_reported() {
        let mut form = form();
        assert_eq!(
            press(&mut form, KeyCode::Char('r'), KeyModifiers::CONTROL),
            EventResult::Event(FormEvent::Reset)
        );
        assert_eq!(
            press(&mut form, KeyCode::Esc, KeyModifiers::NONE),
            EventResult::Event(FormEvent::Leave)
        );
    }

    #[test]
    fn test_set_state_round_trip() {
        let mut form = form();
        let editing = FormState::editing(&hoodie());
        form.set_state(&editing);
        assert_eq!(form.state(), editing);

        form.set_state(&FormState::default());
        assert_eq!(form.state(), FormState::default());
    }
}
