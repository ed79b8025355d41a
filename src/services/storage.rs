use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::db::Database;
use crate::errors::{LedgerError, LedgerResult};
use crate::models::Order;

pub const ORDER_STORAGE_KEY: &str = "orders";

/// Whole-value string storage keyed by name.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> LedgerResult<()>;
    fn remove(&self, key: &str) -> LedgerResult<()>;
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        Ok(self.get_value(key)?)
    }

    fn set(&self, key: &str, value: &str) -> LedgerResult<()> {
        Ok(self.set_value(key, value)?)
    }

    fn remove(&self, key: &str) -> LedgerResult<()> {
        Ok(self.remove_value(key)?)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    unavailable: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While unavailable every call fails, like a storage quota error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    fn check(&self) -> LedgerResult<()> {
        if self.unavailable.get() {
            return Err(LedgerError::Unavailable("memory store switched off".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        self.check()?;
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> LedgerResult<()> {
        self.check()?;
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> LedgerResult<()> {
        self.check()?;
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Persists the full order collection as one JSON array. Faults are logged
/// and never reach the caller.
pub struct OrderStore<S> {
    backend: S,
}

impl<S: KeyValueStore> OrderStore<S> {
    pub fn new(backend: S) -> Self {
        OrderStore { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn read_all(&self) -> Vec<Order> {
        match self.try_read_all() {
            Ok(orders) => orders,
            Err(err) => {
                tracing::error!(error = %err, "Error retrieving orders");
                Vec::new()
            }
        }
    }

    pub fn write_all(&self, orders: &[Order]) {
        if let Err(err) = self.try_write_all(orders) {
            tracing::error!(error = %err, count = orders.len(), "Error saving orders");
        }
    }

    pub fn clear_all(&self) {
        if let Err(err) = self.backend.remove(ORDER_STORAGE_KEY) {
            tracing::error!(error = %err, "Error clearing orders");
        }
    }

    fn try_read_all(&self) -> LedgerResult<Vec<Order>> {
        let raw = match self.backend.get(ORDER_STORAGE_KEY)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(Vec::new()),
        };
        let orders: Vec<Order> = serde_json::from_str(&raw)?;
        tracing::debug!(count = orders.len(), "loaded orders");
        Ok(orders)
    }

    fn try_write_all(&self, orders: &[Order]) -> LedgerResult<()> {
        let raw = serde_json::to_string(orders)?;
        self.backend.set(ORDER_STORAGE_KEY, &raw)?;
        tracing::debug!(count = orders.len(), "saved orders");
        Ok(())
    }
}
