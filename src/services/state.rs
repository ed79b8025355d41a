use crate::errors::{LedgerError, LedgerResult};
use crate::models::{Notice, Order, Severity};
use crate::services::draft::{new_order_id, OrderDraft};
use crate::services::orders::{find_order, remove_order, upsert_order};
use crate::services::storage::{KeyValueStore, OrderStore};

/// The order collection as the user sees it. Every mutation writes the full
/// collection back to the store before returning.
pub struct AppState<S> {
    store: OrderStore<S>,
    orders: Vec<Order>,
    pending_deletion: Option<String>,
    notice: Option<Notice>,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn load(store: OrderStore<S>) -> Self {
        let orders = store.read_all();
        tracing::info!(count = orders.len(), "order collection loaded");
        AppState {
            store,
            orders,
            pending_deletion: None,
            notice: None,
        }
    }

    pub fn store(&self) -> &OrderStore<S> {
        &self.store
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        find_order(&self.orders, id)
    }

    pub fn pending_deletion(&self) -> Option<&str> {
        self.pending_deletion.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Validates the draft and stores the resulting order. On rejection the
    /// collection is left untouched and a notice describes the problem.
    pub fn submit_draft(&mut self, draft: &OrderDraft) -> LedgerResult<Order> {
        match draft.save(new_order_id) {
            Ok(order) => {
                self.save_order(order.clone());
                Ok(order)
            }
            Err(err) => {
                self.notice = Some(Notice::rejected(err.to_string(), Severity::Warning));
                Err(err.into())
            }
        }
    }

    pub fn save_order(&mut self, order: Order) {
        let is_new = self.order(&order.id).is_none();
        tracing::info!(order_id = %order.id, is_new, "saving order");
        self.commit(upsert_order(&self.orders, order));
    }

    pub fn request_delete(&mut self, id: &str) -> LedgerResult<&Notice> {
        if self.order(id).is_none() {
            return Err(LedgerError::OrderNotFound(id.to_string()));
        }
        self.pending_deletion = Some(id.to_string());
        Ok(&*self.notice.insert(Notice::confirm_delete()))
    }

    pub fn confirm_delete(&mut self) -> LedgerResult<Order> {
        let id = self
            .pending_deletion
            .take()
            .ok_or(LedgerError::NoPendingDeletion)?;
        let removed = self
            .order(&id)
            .cloned()
            .ok_or_else(|| LedgerError::OrderNotFound(id.clone()))?;

        tracing::info!(order_id = %id, "deleting order");
        self.commit(remove_order(&self.orders, &id));
        self.notice = Some(Notice::deleted());
        Ok(removed)
    }

    pub fn cancel_delete(&mut self) {
        if let Some(id) = self.pending_deletion.take() {
            tracing::debug!(order_id = %id, "deletion declined");
        }
        self.notice = None;
    }

    pub fn replace_all(&mut self, orders: Vec<Order>) {
        tracing::info!(count = orders.len(), "replacing order collection");
        self.pending_deletion = None;
        self.commit(orders);
    }

    pub fn clear(&mut self) {
        tracing::info!(count = self.orders.len(), "clearing order collection");
        self.store.clear_all();
        self.orders.clear();
        self.pending_deletion = None;
    }

    fn commit(&mut self, orders: Vec<Order>) {
        self.store.write_all(&orders);
        self.orders = orders;
    }
}
