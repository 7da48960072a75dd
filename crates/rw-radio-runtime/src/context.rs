//! Ownership of a document and its selection controller.

use rw_radio_common::{RadioButton, SelectionEvent};

use crate::controller::{DocumentEvent, SelectByIdOptions, SelectionController, SubscriptionId};
use crate::tree::DocumentTree;

/// A document together with at most one [`SelectionController`].
///
/// The controller is created by the first [`install`](Self::install) and
/// reused afterwards. Events dispatched before installation are dropped,
/// like events on a page whose runtime script has not loaded yet.
#[derive(Debug)]
pub struct RuntimeContext<D> {
    document: D,
    controller: Option<SelectionController>,
}

impl<D: DocumentTree> RuntimeContext<D> {
    pub fn new(document: D) -> Self {
        Self {
            document,
            controller: None,
        }
    }

    /// Install the controller unless already installed.
    pub fn install(&mut self) -> &mut SelectionController {
        self.controller.get_or_insert_with(|| {
            tracing::debug!("Installed radio selection controller");
            SelectionController::new()
        })
    }

    pub fn is_installed(&self) -> bool {
        self.controller.is_some()
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    /// Forward a user event to the controller, if installed.
    pub fn dispatch(&mut self, event: &DocumentEvent<D::Node>) -> usize {
        match self.controller.as_mut() {
            Some(controller) => controller.handle_event(&mut self.document, event),
            None => 0,
        }
    }

    /// See [`SelectionController::select`].
    pub fn select(&mut self, option: &RadioButton) -> usize {
        let Self {
            document,
            controller,
        } = self;
        controller
            .get_or_insert_with(SelectionController::new)
            .select(document, option)
    }

    /// See [`SelectionController::select_by_stable_id`].
    pub fn select_by_stable_id(&mut self, id: &str, options: SelectByIdOptions) -> usize {
        let Self {
            document,
            controller,
        } = self;
        controller
            .get_or_insert_with(SelectionController::new)
            .select_by_stable_id(document, id, options)
    }

    pub fn subscribe(
        &mut self,
        handler: impl FnMut(&SelectionEvent) + 'static,
    ) -> SubscriptionId {
        self.install().subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.controller
            .as_mut()
            .is_some_and(|controller| controller.unsubscribe(id))
    }
}
