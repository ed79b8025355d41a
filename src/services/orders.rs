use crate::models::{Order, OrderCard};

/// Returns a copy with `order` replacing the entry that shares its id, or
/// appended when the id is new.
pub fn upsert_order(orders: &[Order], order: Order) -> Vec<Order> {
    let mut updated = orders.to_vec();
    match updated.iter_mut().find(|existing| existing.id == order.id) {
        Some(existing) => *existing = order,
        None => updated.push(order),
    }
    updated
}

pub fn remove_order(orders: &[Order], id: &str) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| order.id != id)
        .cloned()
        .collect()
}

pub fn find_order<'a>(orders: &'a [Order], id: &str) -> Option<&'a Order> {
    orders.iter().find(|order| order.id == id)
}

pub fn sorted_newest_first(orders: &[Order]) -> Vec<Order> {
    let mut sorted = orders.to_vec();
    sorted.sort_by(|a, b| b.order_date.cmp(&a.order_date));
    sorted
}

pub fn order_cards(orders: &[Order]) -> Vec<OrderCard> {
    let sorted = sorted_newest_first(orders);
    let count = sorted.len();
    sorted
        .into_iter()
        .enumerate()
        .map(|(index, order)| OrderCard {
            number: count - index,
            order,
        })
        .collect()
}
