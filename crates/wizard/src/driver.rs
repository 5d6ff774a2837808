//! Tokio glue between the wizard and a catalog provider.
//!
//! The wizard core never performs I/O; it hands out [`LoadRequest`]s and
//! consumes completions. This driver dispatches each request on a spawned
//! task and funnels the outcomes through a channel back onto the caller's
//! thread of control, so loads still in flight when the user navigates away
//! simply resolve into the wizard's stale-guard path.
//!
//! [`LoadRequest`]: crate::loads::LoadRequest

use std::sync::Arc;

use tokio::sync::mpsc;

use stockpick_catalog::{CatalogProvider, Product};
use stockpick_core::{InventoryId, LoadRequestId, SelectionResult};

use crate::loads::LoadOutcome;
use crate::wizard::SelectionWizard;

/// A finished catalog load, queued until the driver applies it.
#[derive(Debug)]
struct LoadCompletion {
    request_id: LoadRequestId,
    result: Result<Vec<Product>, String>,
}

/// Owns a wizard and a provider; dispatches loads and applies completions.
pub struct WizardDriver<P> {
    wizard: SelectionWizard,
    provider: Arc<P>,
    tx: mpsc::UnboundedSender<LoadCompletion>,
    rx: mpsc::UnboundedReceiver<LoadCompletion>,
}

impl<P: CatalogProvider + 'static> WizardDriver<P> {
    pub fn new(wizard: SelectionWizard, provider: Arc<P>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            wizard,
            provider,
            tx,
            rx,
        }
    }

    pub fn wizard(&self) -> &SelectionWizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut SelectionWizard {
        &mut self.wizard
    }

    pub fn into_wizard(self) -> SelectionWizard {
        self.wizard
    }

    /// [`SelectionWizard::select_inventory`], with any required load
    /// dispatched in the background. Must be called within a tokio runtime.
    pub fn select_inventory(&mut self, inventory_id: InventoryId) -> SelectionResult<()> {
        let request = self.wizard.select_inventory(inventory_id)?;
        self.dispatch(request);
        Ok(())
    }

    /// [`SelectionWizard::begin_add_item`], with any required load
    /// dispatched in the background.
    pub fn begin_add_item(&mut self, line_index: usize) -> SelectionResult<()> {
        let request = self.wizard.begin_add_item(line_index)?;
        self.dispatch(request);
        Ok(())
    }

    /// Await the next finished load and apply it to the wizard.
    ///
    /// Only call while a load is outstanding; with nothing in flight this
    /// pends indefinitely.
    pub async fn next_completion(&mut self) -> Option<LoadOutcome> {
        let completion = self.rx.recv().await?;
        Some(
            self.wizard
                .complete_load(completion.request_id, completion.result),
        )
    }

    /// Apply every already-finished load without waiting.
    pub fn apply_ready_completions(&mut self) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            outcomes.push(
                self.wizard
                    .complete_load(completion.request_id, completion.result),
            );
        }
        outcomes
    }

    fn dispatch(&self, request: Option<crate::loads::LoadRequest>) {
        let Some(request) = request else {
            return;
        };
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider
                .load_products(request.inventory_id)
                .await
                .map_err(|e| e.to_string());
            // The receiver dropping just means the session ended.
            let _ = tx.send(LoadCompletion {
                request_id: request.request_id,
                result,
            });
        });
    }
}
