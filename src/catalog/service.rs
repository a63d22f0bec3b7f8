use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::Theme;
use crate::catalog::client::ProductApi;
use crate::catalog::commands::{DeleteProductCmd, FetchProductsCmd, SaveProductCmd};
use crate::catalog::form::{FormEvent, FormMode, FormState, ProductForm};
use crate::catalog::message::CatalogMsg;
use crate::catalog::model::{Product, StatusMessage, Tone};
use crate::catalog::products::{ProductTable, ProductsEvent};
use crate::config::{DialogAction, GlobalAction, KeyResolver, ProductsAction};
use crate::service::{Service, ServiceMsg};
use crate::ui::{Component, ConfirmDialog, ConfirmEvent, EventResult, Keybinding, Spinner};

const FORM_HEIGHT: u16 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Table,
    Form,
}

struct DeleteDialog {
    id: i64,
    dialog: ConfirmDialog,
}

/// The product catalog: form on the left, product table on the right.
pub struct Catalog {
    api: Arc<dyn ProductApi>,
    base_url: String,
    resolver: Arc<KeyResolver>,
    table: ProductTable,
    form: ProductForm,
    status: Option<StatusMessage>,
    loading: bool,
    spinner: Spinner,
    delete_dialog: Option<DeleteDialog>,
    focus: Focus,
    msg_tx: UnboundedSender<CatalogMsg>,
    msg_rx: UnboundedReceiver<CatalogMsg>,
}

impl Catalog {
    pub fn new(api: Arc<dyn ProductApi>, base_url: impl Into<String>, resolver: Arc<KeyResolver>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let mut catalog = Self {
            api,
            base_url: base_url.into(),
            table: ProductTable::new(Arc::clone(&resolver)),
            form: ProductForm::new(Arc::clone(&resolver)),
            resolver,
            status: None,
            loading: false,
            spinner: Spinner::with_label("Loading..."),
            delete_dialog: None,
            focus: Focus::Table,
            msg_tx,
            msg_rx,
        };
        catalog.table.set_loading(false);
        catalog.set_focus(Focus::Table);
        catalog
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn products(&self) -> &[Product] {
        self.table.products()
    }

    #[cfg(test)]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[cfg(test)]
    pub fn form_state(&self) -> FormState {
        self.form.state()
    }

    #[cfg(test)]
    pub const fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Queue a message to be processed by update().
    fn queue(&self, msg: CatalogMsg) {
        let _ = self.msg_tx.send(msg);
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.table.set_focused(focus == Focus::Table);
        self.form.set_focused(focus == Focus::Form);
    }

    fn reset_form(&mut self) {
        self.form.set_state(&FormState::default());
    }

    /// Start a list fetch without touching the status message.
    fn fetch_products(&mut self) -> ServiceMsg {
        self.loading = true;
        self.table.set_loading(true);
        FetchProductsCmd {
            api: Arc::clone(&self.api),
            tx: self.msg_tx.clone(),
        }
        .into()
    }

    fn process_message(&mut self, msg: CatalogMsg) -> ServiceMsg {
        match msg {
            CatalogMsg::Load => {
                self.status = None;
                self.fetch_products()
            }

            CatalogMsg::Loaded(products) => {
                self.loading = false;
                self.table.set_loading(false);
                self.table.set_products(products);
                ServiceMsg::Idle
            }

            CatalogMsg::LoadFailed(err) => {
                self.loading = false;
                self.table.set_loading(false);
                self.status = Some(StatusMessage::load_failed(err));
                ServiceMsg::Idle
            }

            CatalogMsg::Submit => {
                let state = self.form.state();
                let Some(payload) = state.payload() else {
                    return ServiceMsg::Idle;
                };
                self.status = None;
                SaveProductCmd {
                    api: Arc::clone(&self.api),
                    mode: state.mode,
                    payload,
                    tx: self.msg_tx.clone(),
                }
                .into()
            }

            CatalogMsg::Saved(mode) => {
                self.status = Some(match mode {
                    FormMode::Create => StatusMessage::created(),
                    FormMode::Edit { .. } => StatusMessage::updated(),
                });
                self.reset_form();
                self.fetch_products()
            }

            CatalogMsg::SaveFailed(err) | CatalogMsg::DeleteFailed(err) => {
                self.status = Some(StatusMessage::failed(err));
                ServiceMsg::Idle
            }

            CatalogMsg::StartEdit(product) => {
                self.form.set_state(&FormState::editing(&product));
                self.status = None;
                self.set_focus(Focus::Form);
                ServiceMsg::Idle
            }

            CatalogMsg::ConfirmDelete(id) => {
                let dialog = ConfirmDialog::new(
                    format!("Delete product {id}?"),
                    Arc::clone(&self.resolver),
                )
                .with_title("Delete product")
                .with_confirm_text("Delete")
                .danger();
                self.delete_dialog = Some(DeleteDialog { id, dialog });
                ServiceMsg::Idle
            }

            CatalogMsg::Delete(id) => {
                self.status = None;
                DeleteProductCmd {
                    api: Arc::clone(&self.api),
                    id,
                    tx: self.msg_tx.clone(),
                }
                .into()
            }

            CatalogMsg::DialogCancelled => ServiceMsg::Idle,

            CatalogMsg::Deleted(id) => {
                self.status = Some(StatusMessage::deleted(id));
                if self.form.state().editing_id() == Some(id) {
                    self.reset_form();
                }
                self.fetch_products()
            }

            CatalogMsg::ResetForm => {
                self.reset_form();
                ServiceMsg::Idle
            }

            CatalogMsg::NewProduct => {
                self.reset_form();
                self.set_focus(Focus::Form);
                ServiceMsg::Idle
            }

            CatalogMsg::FocusTable => {
                self.set_focus(Focus::Table);
                ServiceMsg::Idle
            }
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        let Some(DeleteDialog { id, dialog }) = &mut self.delete_dialog else {
            return Ok(EventResult::Ignored);
        };
        let id = *id;
        match dialog.handle_key(key)? {
            EventResult::Event(ConfirmEvent::Confirmed) => {
                self.delete_dialog = None;
                self.queue(CatalogMsg::Delete(id));
            }
            EventResult::Event(ConfirmEvent::Cancelled) => {
                self.delete_dialog = None;
                self.queue(CatalogMsg::DialogCancelled);
            }
            EventResult::Consumed | EventResult::Ignored => {}
        }
        Ok(EventResult::Consumed)
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        let msg = match self.form.handle_key(key)? {
            EventResult::Event(FormEvent::Submit) => CatalogMsg::Submit,
            EventResult::Event(FormEvent::Reset) => CatalogMsg::ResetForm,
            EventResult::Event(FormEvent::Leave) => CatalogMsg::FocusTable,
            EventResult::Consumed => return Ok(EventResult::Consumed),
            EventResult::Ignored => return Ok(EventResult::Ignored),
        };
        self.queue(msg);
        Ok(EventResult::Consumed)
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        let msg = match self.table.handle_key(key)? {
            EventResult::Event(ProductsEvent::Edit(product)) => CatalogMsg::StartEdit(product),
            EventResult::Event(ProductsEvent::Delete(id)) => CatalogMsg::ConfirmDelete(id),
            EventResult::Event(ProductsEvent::New) => CatalogMsg::NewProduct,
            // Refresh is unavailable while a fetch is running
            EventResult::Event(ProductsEvent::Reload) if self.loading => {
                return Ok(EventResult::Consumed);
            }
            EventResult::Event(ProductsEvent::Reload) => CatalogMsg::Load,
            EventResult::Consumed => return Ok(EventResult::Consumed),
            EventResult::Ignored => {
                if self.resolver.matches_global(&key, GlobalAction::FocusNext) {
                    self.set_focus(Focus::Form);
                    return Ok(EventResult::Consumed);
                }
                return Ok(EventResult::Ignored);
            }
        };
        self.queue(msg);
        Ok(EventResult::Consumed)
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [title, spinner] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(14)]).areas(area);

        let line = Line::from(vec![
            Span::styled(
                " lazyshop ",
                Style::default()
                    .fg(theme.base())
                    .bg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(self.base_url.clone(), Style::default().fg(theme.subtext0())),
        ]);
        frame.render_widget(Paragraph::new(line), title);

        if self.loading {
            self.spinner.render(frame, spinner, theme);
        } else {
            frame.render_widget(
                Paragraph::new(format!(
                    "[{}] Refresh",
                    self.resolver.display_products(ProductsAction::Reload)
                ))
                .alignment(Alignment::Right)
                .style(Style::default().fg(theme.overlay1())),
                spinner,
            );
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(" Status ")
            .title_style(Style::default().fg(theme.subtext1()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()));

        let lines = match &self.status {
            Some(status) => {
                let color = match status.tone() {
                    Tone::Success => theme.green(),
                    Tone::Deleted => theme.peach(),
                    Tone::Error => theme.red(),
                };
                vec![Line::from(vec![
                    Span::styled(
                        format!("{} ", status.timestamp()),
                        Style::default().fg(theme.overlay0()),
                    ),
                    Span::styled(status.text().to_string(), Style::default().fg(color)),
                ])]
            }
            None => vec![Line::from(Span::styled(
                format!(
                    "Tip: select a row and press {} to edit it or {} to delete it.",
                    self.resolver
                        .display_products(ProductsAction::Edit),
                    self.resolver
                        .display_products(ProductsAction::Delete),
                ),
                Style::default().fg(theme.overlay1()),
            ))],
        };

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}

impl Service for Catalog {
    fn init(&mut self) {
        self.queue(CatalogMsg::Load);
    }

    fn handle_tick(&mut self) {
        if self.loading {
            self.spinner.handle_tick();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        if self.delete_dialog.is_some() {
            return self.handle_dialog_key(key);
        }
        match self.focus {
            Focus::Form => self.handle_form_key(key),
            Focus::Table => self.handle_table_key(key),
        }
    }

    fn update(&mut self) -> Result<ServiceMsg> {
        let mut result = ServiceMsg::Idle;
        while let Ok(msg) = self.msg_rx.try_recv() {
            debug!("Catalog message: {msg:?}");
            result = result.and(self.process_message(msg));
        }
        Ok(result)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [header, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
        self.render_header(frame, header, theme);

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(body);
        let [form, status] =
            Layout::vertical([Constraint::Length(FORM_HEIGHT), Constraint::Min(3)]).areas(left);

        self.form.render(frame, form, theme);
        self.render_status(frame, status, theme);
        self.table.render(frame, right, theme);

        if let Some(DeleteDialog { dialog, .. }) = &mut self.delete_dialog {
            dialog.render(frame, area, theme);
        }
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        if self.delete_dialog.is_some() {
            return vec![
                Keybinding::new(self.resolver.display_dialog(DialogAction::Confirm), "Delete"),
                Keybinding::new(self.resolver.display_dialog(DialogAction::Cancel), "Cancel"),
            ];
        }
        match self.focus {
            Focus::Form => self.form.keybindings(),
            Focus::Table if self.table.is_searching() => Vec::new(),
            Focus::Table => {
                let mut hints = self.table.keybindings();
                hints.push(Keybinding::new(
                    self.resolver.display_global(GlobalAction::FocusNext),
                    "Form",
                ));
                hints.push(Keybinding::new(
                    self.resolver.display_global(GlobalAction::Theme),
                    "Theme",
                ));
                hints.push(Keybinding::new(
                    self.resolver.display_global(GlobalAction::Quit),
                    "Quit",
                ));
                hints
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::catalog::client::ApiError;
    use crate::catalog::model::ProductPayload;

    /// In-memory backend that records every mutating call.
    #[derive(Default)]
    struct FakeApi {
        products: Mutex<Vec<Product>>,
        list_calls: AtomicUsize,
        calls: Mutex<Vec<String>>,
        failure: Mutex<Option<(u16, &'static str, &'static str)>>,
    }

    impl FakeApi {
        fn with(products: Vec<Product>) -> Arc<Self> {
            Arc::new(Self {
                products: Mutex::new(products),
                ..Self::default()
            })
        }

        fn fail_with(&self, status: u16, status_text: &'static str, body: &'static str) {
            *self.failure.lock().unwrap() = Some((status, status_text, body));
        }

        fn check(&self) -> Result<(), ApiError> {
            match *self.failure.lock().unwrap() {
                Some((status, status_text, body)) => Err(ApiError::RequestFailed {
                    status,
                    status_text: status_text.to_string(),
                    body: (!body.is_empty()).then(|| body.to_string()),
                }),
                None => Ok(()),
            }
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProductApi for FakeApi {
        async fn list(&self) -> Result<Vec<Product>, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            Ok(self.products.lock().unwrap().clone())
        }

        async fn create(&self, payload: &ProductPayload) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(format!("create {}", payload.name));
            self.check()?;
            let mut products = self.products.lock().unwrap();
            let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            products.push(Product {
                id,
                name: payload.name.clone(),
                price: payload.price,
                stock: payload.stock,
            });
            Ok(())
        }

        async fn update(&self, id: i64, payload: &ProductPayload) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(format!("update {id}"));
            self.check()?;
            let mut products = self.products.lock().unwrap();
            if let Some(product) = products.iter_mut().find(|p| p.id == id) {
                product.name = payload.name.clone();
                product.price = payload.price;
                product.stock = payload.stock;
            }
            Ok(())
        }

        async fn delete(&self, id: i64) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(format!("delete {id}"));
            self.check()?;
            self.products.lock().unwrap().retain(|p| p.id != id);
            Ok(())
        }
    }

    fn product(id: i64, name: &str, price: i64, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price,
            stock,
        }
    }

    fn hoodie() -> Product {
        product(1, "Hoodie", 10000, 5)
    }

    fn cap() -> Product {
        product(2, "Cap", 5000, 3)
    }

    /// Run `update()` and every returned command until nothing is left.
    async fn settle(catalog: &mut Catalog) {
        loop {
            match catalog.update().unwrap() {
                ServiceMsg::Idle => break,
                ServiceMsg::Run(commands) => {
                    for command in commands {
                        command.execute().await.unwrap();
                    }
                }
            }
        }
    }

    fn catalog(api: &Arc<FakeApi>) -> Catalog {
        let api: Arc<dyn ProductApi> = Arc::clone(api) as Arc<dyn ProductApi>;
        Catalog::new(api, "http://localhost:8080", Arc::new(KeyResolver::default()))
    }

    async fn mounted(api: &Arc<FakeApi>) -> Catalog {
        let mut catalog = catalog(api);
        catalog.init();
        settle(&mut catalog).await;
        catalog
    }

    /// Press a key and process what it queued, like the App does.
    async fn press_with(catalog: &mut Catalog, code: KeyCode, modifiers: KeyModifiers) {
        catalog.handle_key(KeyEvent::new(code, modifiers)).unwrap();
        settle(catalog).await;
    }

    async fn press(catalog: &mut Catalog, code: KeyCode) {
        press_with(catalog, code, KeyModifiers::NONE).await;
    }

    async fn type_str(catalog: &mut Catalog, s: &str) {
        for c in s.chars() {
            press(catalog, KeyCode::Char(c)).await;
        }
    }

    /// Replace the focused form field's content.
    async fn fill(catalog: &mut Catalog, s: &str) {
        press_with(catalog, KeyCode::Char('u'), KeyModifiers::CONTROL).await;
        type_str(catalog, s).await;
    }

    #[tokio::test]
    async fn test_mount_loads_products() {
        let api = FakeApi::with(vec![hoodie(), cap()]);
        let catalog = mounted(&api).await;

        assert_eq!(catalog.products(), &[hoodie(), cap()]);
        assert_eq!(api.list_calls(), 1);
        assert!(!catalog.is_loading());
        assert!(catalog.status().is_none());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_list() {
        let api = FakeApi::with(vec![hoodie()]);
        let mut catalog = mounted(&api).await;

        api.fail_with(503, "Service Unavailable", "");
        press(&mut catalog, KeyCode::Char('r')).await;

        assert_eq!(api.list_calls(), 2);
        assert_eq!(catalog.products(), &[hoodie()]);
        assert_eq!(catalog.status().map(StatusMessage::text), Some("503 Service Unavailable"));
        assert!(!catalog.is_loading());
    }

    #[tokio::test]
    async fn test_refresh_is_ignored_while_loading() {
        let api = FakeApi::with(vec![hoodie()]);
        let mut catalog = catalog(&api);
        catalog.init();
        let ServiceMsg::Run(commands) = catalog.update().unwrap() else {
            panic!("expected the initial fetch");
        };
        assert!(catalog.is_loading());

        let consumed = catalog
            .handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(consumed, EventResult::Consumed);
        assert!(matches!(catalog.update().unwrap(), ServiceMsg::Idle));

        for command in commands {
            command.execute().await.unwrap();
        }
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_form_issues_no_request() {
        let api = FakeApi::with(vec![hoodie()]);
        let mut catalog = mounted(&api).await;

        // Empty name
        press(&mut catalog, KeyCode::Char('n')).await;
        press(&mut catalog, KeyCode::Enter).await;

        // Whitespace name, negative price
        type_str(&mut catalog, "   ").await;
        press(&mut catalog, KeyCode::Enter).await;
        fill(&mut catalog, "Cap").await;
        press(&mut catalog, KeyCode::Tab).await;
        fill(&mut catalog, "-1").await;
        press(&mut catalog, KeyCode::Enter).await;

        // Negative stock
        fill(&mut catalog, "1").await;
        press(&mut catalog, KeyCode::Tab).await;
        fill(&mut catalog, "-3").await;
        press(&mut catalog, KeyCode::Enter).await;

        assert!(api.calls().is_empty());
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_resets_form_and_refetches() {
        let api = FakeApi::with(vec![hoodie()]);
        let mut catalog = mounted(&api).await;

        press(&mut catalog, KeyCode::Char('n')).await;
        type_str(&mut catalog, "Cap").await;
        press(&mut catalog, KeyCode::Tab).await;
        fill(&mut catalog, "5000").await;
        press(&mut catalog, KeyCode::Tab).await;
        fill(&mut catalog, "3").await;
        press(&mut catalog, KeyCode::Enter).await;

        assert_eq!(api.calls(), vec!["create Cap"]);
        assert_eq!(api.list_calls(), 2);
        assert_eq!(catalog.form_state(), FormState::default());
        assert_eq!(catalog.status().map(StatusMessage::text), Some("✅ Product created"));
        assert_eq!(catalog.products(), &[hoodie(), cap()]);
    }

    #[tokio::test]
    async fn test_create_failure_keeps_form_and_list() {
        let api = FakeApi::with(vec![hoodie()]);
        let mut catalog = mounted(&api).await;

        press(&mut catalog, KeyCode::Char('n')).await;
        type_str(&mut catalog, "Cap").await;
        press(&mut catalog, KeyCode::Tab).await;
        fill(&mut catalog, "5000").await;
        let before = catalog.form_state();

        api.fail_with(400, "Bad Request", r#"{"message":"name taken"}"#);
        press(&mut catalog, KeyCode::Enter).await;

        assert_eq!(api.calls(), vec!["create Cap"]);
        assert_eq!(
            catalog.status().map(StatusMessage::text),
            Some(r#"❌ 400 Bad Request - {"message":"name taken"}"#)
        );
        assert_eq!(catalog.form_state(), before);
        assert_eq!(catalog.products(), &[hoodie()]);
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_start_edit_fills_form() {
        let api = FakeApi::with(vec![hoodie(), cap()]);
        let mut catalog = mounted(&api).await;

        press(&mut catalog, KeyCode::Down).await;
        press(&mut catalog, KeyCode::Char('e')).await;

        assert_eq!(catalog.form_state(), FormState::editing(&cap()));
        assert!(catalog.status().is_none());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_success() {
        let api = FakeApi::with(vec![hoodie()]);
        let mut catalog = mounted(&api).await;

        press(&mut catalog, KeyCode::Enter).await;
        fill(&mut catalog, "Zip Hoodie").await;
        press(&mut catalog, KeyCode::Enter).await;

        assert_eq!(api.calls(), vec!["update 1"]);
        assert_eq!(api.list_calls(), 2);
        assert_eq!(catalog.form_state(), FormState::default());
        assert_eq!(catalog.status().map(StatusMessage::text), Some("✅ Product updated"));
        assert_eq!(catalog.products()[0].name, "Zip Hoodie");
    }

    #[tokio::test]
    async fn test_update_failure_keeps_form() {
        let api = FakeApi::with(vec![hoodie()]);
        let mut catalog = mounted(&api).await;

        press(&mut catalog, KeyCode::Char('e')).await;
        fill(&mut catalog, "Zip Hoodie").await;
        let before = catalog.form_state();

        api.fail_with(500, "Internal Server Error", "DB error");
        press(&mut catalog, KeyCode::Enter).await;

        let status = catalog.status().expect("status set");
        assert!(status.text().starts_with("❌ "));
        assert!(status.text().contains("500"));
        assert!(status.text().contains("DB error"));
        assert_eq!(status.tone(), Tone::Error);
        assert_eq!(catalog.form_state(), before);
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_delete_of_edited_product_resets_form() {
        let api = FakeApi::with(vec![hoodie(), cap()]);
        let mut catalog = mounted(&api).await;

        press(&mut catalog, KeyCode::Char('e')).await;
        press(&mut catalog, KeyCode::Esc).await;
        press(&mut catalog, KeyCode::Char('d')).await;
        press(&mut catalog, KeyCode::Char('y')).await;

        assert_eq!(api.calls(), vec!["delete 1"]);
        assert_eq!(api.list_calls(), 2);
        assert_eq!(catalog.form_state(), FormState::default());
        assert_eq!(catalog.status().map(StatusMessage::text), Some("🗑️ Product 1 deleted"));
        assert_eq!(catalog.products(), &[cap()]);
    }

    #[tokio::test]
    async fn test_delete_of_other_product_keeps_form() {
        let api = FakeApi::with(vec![hoodie(), cap()]);
        let mut catalog = mounted(&api).await;

        press(&mut catalog, KeyCode::Char('e')).await;
        press(&mut catalog, KeyCode::Esc).await;
        press(&mut catalog, KeyCode::Down).await;
        press(&mut catalog, KeyCode::Char('d')).await;
        press(&mut catalog, KeyCode::Enter).await;

        assert_eq!(api.calls(), vec!["delete 2"]);
        assert_eq!(catalog.form_state(), FormState::editing(&hoodie()));
    }

    #[tokio::test]
    async fn test_declined_delete_changes_nothing() {
        let api = FakeApi::with(vec![hoodie(), cap()]);
        let mut catalog = mounted(&api).await;

        press(&mut catalog, KeyCode::Char('d')).await;
        press(&mut catalog, KeyCode::Char('n')).await;

        assert!(api.calls().is_empty());
        assert_eq!(api.list_calls(), 1);
        assert_eq!(catalog.products(), &[hoodie(), cap()]);
        assert_eq!(catalog.form_state(), FormState::default());
    }

    #[tokio::test]
    async fn test_delete_failure_reports_error() {
        let api = FakeApi::with(vec![hoodie()]);
        let mut catalog = mounted(&api).await;

        api.fail_with(404, "Not Found", "");
        press(&mut catalog, KeyCode::Char('d')).await;
        press(&mut catalog, KeyCode::Char('y')).await;

        assert_eq!(catalog.status().map(StatusMessage::text), Some("❌ 404 Not Found"));
        assert_eq!(catalog.products(), &[hoodie()]);
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_reset_keeps_status() {
        let api = FakeApi::with(vec![hoodie()]);
        let mut catalog = mounted(&api).await;

        api.fail_with(500, "Internal Server Error", "");
        press(&mut catalog, KeyCode::Char('e')).await;
        press(&mut catalog, KeyCode::Enter).await;
        press_with(&mut catalog, KeyCode::Char('r'), KeyModifiers::CONTROL).await;

        assert_eq!(catalog.form_state(), FormState::default());
        assert_eq!(
            catalog.status().map(StatusMessage::text),
            Some("❌ 500 Internal Server Error")
        );
    }

    #[tokio::test]
    async fn test_render_shows_header_form_and_rows() {
        let api = FakeApi::with(vec![hoodie()]);
        let mut catalog = mounted(&api).await;
        press(&mut catalog, KeyCode::Char('e')).await;

        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                catalog.render(frame, area, &Theme::default());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(text.contains("lazyshop"));
        assert!(text.contains("http://localhost:8080"));
        assert!(text.contains("Edit product"));
        assert!(text.contains("ID: 1"));
        assert!(text.contains("10,000"));
    }
}
