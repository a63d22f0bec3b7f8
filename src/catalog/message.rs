//! Messages for the catalog.
//!
//! User actions and async results both flow through this one type and are
//! applied by `Catalog::update()`.

use crate::catalog::form::FormMode;
use crate::catalog::model::Product;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogMsg {
    // === User actions ===
    /// Fetch the product list
    Load,
    /// Send the form to the backend
    Submit,
    /// Populate the form from a product
    StartEdit(Product),
    /// Ask before deleting a product
    ConfirmDelete(i64),
    /// Confirmed deletion of a product
    Delete(i64),
    /// User declined the delete dialog
    DialogCancelled,
    /// Clear the form back to create mode
    ResetForm,
    /// Reset the form and move focus to it
    NewProduct,
    /// Move focus back to the product table
    FocusTable,

    // === Async results ===
    Loaded(Vec<Product>),
    LoadFailed(String),
    Saved(FormMode),
    SaveFailed(String),
    Deleted(i64),
    DeleteFailed(String),
}
