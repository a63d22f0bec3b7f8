//! Commands for product operations.
//!
//! Backend failures are reported as `*Failed` messages; only a closed
//! message channel makes a command fail.

use std::sync::Arc;

use async_trait::async_trait;
use color_eyre::Result;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::catalog::client::ProductApi;
use crate::catalog::form::FormMode;
use crate::catalog::message::CatalogMsg;
use crate::catalog::model::ProductPayload;
use crate::commands::Command;

pub struct FetchProductsCmd {
    pub api: Arc<dyn ProductApi>,
    pub tx: UnboundedSender<CatalogMsg>,
}

#[async_trait]
impl Command for FetchProductsCmd {
    fn name(&self) -> String {
        "Loading products".to_string()
    }

    async fn execute(self: Box<Self>) -> Result<()> {
        let msg = match self.api.list().await {
            Ok(products) => CatalogMsg::Loaded(products),
            Err(e) => {
                warn!("Failed to load products: {e}");
                CatalogMsg::LoadFailed(e.to_string())
            }
        };
        self.tx.send(msg)?;
        Ok(())
    }
}

/// Create or update depending on the form mode.
pub struct SaveProductCmd {
    pub api: Arc<dyn ProductApi>,
    pub mode: FormMode,
    pub payload: ProductPayload,
    pub tx: UnboundedSender<CatalogMsg>,
}

#[async_trait]
impl Command for SaveProductCmd {
    fn name(&self) -> String {
        match self.mode {
            FormMode::Create => format!("Creating '{}'", self.payload.name),
            FormMode::Edit { id } => format!("Updating product {id}"),
        }
    }

    async fn execute(self: Box<Self>) -> Result<()> {
        let result = match self.mode {
            FormMode::Create => self.api.create(&self.payload).await,
            FormMode::Edit { id } => self.api.update(id, &self.payload).await,
        };
        let msg = match result {
            Ok(()) => {
                info!("Saved product '{}' ({:?})", self.payload.name, self.mode);
                CatalogMsg::Saved(self.mode)
            }
            Err(e) => {
                warn!("Failed to save product '{}': {e}", self.payload.name);
                CatalogMsg::SaveFailed(e.to_string())
            }
        };
        self.tx.send(msg)?;
        Ok(())
    }
}

pub struct DeleteProductCmd {
    pub api: Arc<dyn ProductApi>,
    pub id: i64,
    pub tx: UnboundedSender<CatalogMsg>,
}

#[async_trait]
impl Command for DeleteProductCmd {
    fn name(&self) -> String {
        format!("Deleting product {}", self.id)
    }

    async fn execute(self: Box<Self>) -> Result<()> {
        let msg = match self.api.delete(self.id).await {
            Ok(()) => {
                info!("Deleted product {}", self.id);
                CatalogMsg::Deleted(self.id)
            }
            Err(e) => {
                warn!("Failed to delete product {}: {e}", self.id);
                CatalogMsg::DeleteFailed(e.to_string())
            }
        };
        self.tx.send(msg)?;
        Ok(())
    }
}
