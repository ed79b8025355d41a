use std::collections::HashSet;

use crate::errors::{LedgerError, ValidationError};
use crate::models::{Notice, Order, OrderCard};
use crate::services::draft::{validate_order, OrderDraft};
use crate::services::orders::order_cards;
use crate::services::state::AppState;
use crate::services::storage::KeyValueStore;

pub fn get_orders<S: KeyValueStore>(state: &AppState<S>) -> Vec<OrderCard> {
    order_cards(state.orders())
}

pub fn get_order<S: KeyValueStore>(order_id: &str, state: &AppState<S>) -> Result<Order, String> {
    state
        .order(order_id)
        .cloned()
        .ok_or_else(|| LedgerError::OrderNotFound(order_id.to_string()).to_string())
}

pub fn save_order<S: KeyValueStore>(draft: OrderDraft, state: &mut AppState<S>) -> Result<Order, String> {
    state.submit_draft(&draft).map_err(|e| e.to_string())
}

pub fn request_delete<S: KeyValueStore>(order_id: &str, state: &mut AppState<S>) -> Result<Notice, String> {
    state
        .request_delete(order_id)
        .cloned()
        .map_err(|e| e.to_string())
}

pub fn confirm_delete<S: KeyValueStore>(state: &mut AppState<S>) -> Result<Notice, String> {
    state.confirm_delete().map_err(|e| e.to_string())?;
    state
        .take_notice()
        .ok_or_else(|| "Deletion finished without a notice".to_string())
}

pub fn cancel_delete<S: KeyValueStore>(state: &mut AppState<S>) {
    state.cancel_delete();
}

/// Replaces the whole collection with the orders in `json`.
pub fn import_orders<S: KeyValueStore>(json: &str, state: &mut AppState<S>) -> Result<usize, String> {
    let orders: Vec<Order> = serde_json::from_str(json)
        .map_err(|e| LedgerError::Serialization(e).to_string())?;

    let mut seen = HashSet::new();
    for order in &orders {
        validate_order(order).map_err(|e| format!("Order {}: {}", order.id, e))?;
        if !seen.insert(order.id.as_str()) {
            return Err(ValidationError::DuplicateId(order.id.clone()).to_string());
        }
    }

    let count = orders.len();
    state.replace_all(orders);
    Ok(count)
}

pub fn export_orders<S: KeyValueStore>(state: &AppState<S>) -> Result<String, String> {
    serde_json::to_string_pretty(state.orders()).map_err(|e| e.to_string())
}

pub fn clear_orders<S: KeyValueStore>(state: &mut AppState<S>) {
    state.clear();
}
