use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::models::{Amount, Item, Order};

/// Form state for creating or editing one order. Nothing here touches the
/// store; `save` hands back the finished order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub order_date: NaiveDate,
    pub discount_percent: Amount,
    pub items: Vec<Item>,
}

impl OrderDraft {
    pub fn new(today: NaiveDate) -> Self {
        OrderDraft {
            id: None,
            order_date: today,
            discount_percent: Amount::from("0"),
            items: vec![Item::blank()],
        }
    }

    pub fn from_order(order: &Order) -> Self {
        let items = if order.items.is_empty() {
            vec![Item::blank()]
        } else {
            order.items.clone()
        };
        OrderDraft {
            id: Some(order.id.clone()),
            order_date: order.order_date,
            discount_percent: order.discount_percent.clone(),
            items,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn add_item(&mut self) -> Result<(), ValidationError> {
        if let Some(index) = self.items.iter().position(|item| !item.is_complete()) {
            return Err(ValidationError::IncompleteItem { index });
        }
        self.items.push(Item::blank());
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Result<Item, ValidationError> {
        if index >= self.items.len() {
            return Err(ValidationError::ItemOutOfRange { index });
        }
        if self.items.len() == 1 {
            return Err(ValidationError::LastItem);
        }
        Ok(self.items.remove(index))
    }

    pub fn item_mut(&mut self, index: usize) -> Result<&mut Item, ValidationError> {
        self.items
            .get_mut(index)
            .ok_or(ValidationError::ItemOutOfRange { index })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }
        for (index, item) in self.items.iter().enumerate() {
            if item.item.is_empty() {
                return Err(ValidationError::MissingItemName { index });
            }
            if item.price.is_blank() {
                return Err(ValidationError::MissingItemPrice { index });
            }
        }
        Ok(())
    }

    /// Builds the complete order. Editing keeps the original id; a new
    /// draft takes one from `new_id`.
    pub fn save(&self, new_id: impl FnOnce() -> String) -> Result<Order, ValidationError> {
        self.validate()?;
        let id = match &self.id {
            Some(id) => id.clone(),
            None => new_id(),
        };
        Ok(Order {
            id,
            order_date: self.order_date,
            discount_percent: self.discount_percent.clone(),
            items: self.items.clone(),
        })
    }
}

/// Applies the form rules to an order that did not come through a draft.
pub fn validate_order(order: &Order) -> Result<(), ValidationError> {
    OrderDraft {
        id: Some(order.id.clone()),
        order_date: order.order_date,
        discount_percent: order.discount_percent.clone(),
        items: order.items.clone(),
    }
    .validate()
}

pub fn new_order_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
    }

    fn fill(item: &mut Item, name: &str, price: &str) {
        item.item = name.to_string();
        item.price = Amount::from(price);
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = OrderDraft::new(today());
        assert_eq!(draft.order_date, today());
        assert_eq!(draft.discount_percent, Amount::from("0"));
        assert_eq!(draft.items, vec![Item::blank()]);
        assert!(!draft.is_editing());
    }

    #[test]
    fn test_add_item_requires_complete_items() {
        let mut draft = OrderDraft::new(today());
        assert_eq!(draft.add_item(), Err(ValidationError::IncompleteItem { index: 0 }));

        fill(draft.item_mut(0).unwrap(), "Lotion", "30");
        draft.add_item().unwrap();
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.add_item(), Err(ValidationError::IncompleteItem { index: 1 }));
    }

    #[test]
    fn test_remove_keeps_last_item() {
        let mut draft = OrderDraft::new(today());
        assert_eq!(draft.remove_item(0), Err(ValidationError::LastItem));
        assert_eq!(draft.remove_item(3), Err(ValidationError::ItemOutOfRange { index: 3 }));

        fill(draft.item_mut(0).unwrap(), "Lotion", "30");
        draft.add_item().unwrap();
        let removed = draft.remove_item(0).unwrap();
        assert_eq!(removed.item, "Lotion");
        assert_eq!(draft.items.len(), 1);
    }

    #[test]
    fn test_save_rejects_incomplete_items() {
        let mut draft = OrderDraft::new(today());
        assert_eq!(
            draft.save(new_order_id),
            Err(ValidationError::MissingItemName { index: 0 })
        );

        draft.items[0].item = "Balm".to_string();
        assert_eq!(
            draft.save(new_order_id),
            Err(ValidationError::MissingItemPrice { index: 0 })
        );

        draft.items.clear();
        assert_eq!(draft.save(new_order_id), Err(ValidationError::NoItems));
    }

    #[test]
    fn test_save_mints_id_for_new_order() {
        let mut draft = OrderDraft::new(today());
        fill(draft.item_mut(0).unwrap(), "Balm", "12");
        draft.items[0].is_gift = true;
        draft.discount_percent = Amount::from("5");

        let order = draft.save(|| "fresh".to_string()).unwrap();
        assert_eq!(order.id, "fresh");
        assert_eq!(order.order_date, today());
        assert_eq!(order.discount_percent, Amount::from("5"));
        assert!(order.items[0].is_gift);
    }

    #[test]
    fn test_editing_keeps_existing_id() {
        let mut draft = OrderDraft::new(today());
        fill(draft.item_mut(0).unwrap(), "Balm", "12");
        let original = draft.save(|| "kept".to_string()).unwrap();

        let mut edit = OrderDraft::from_order(&original);
        assert!(edit.is_editing());
        edit.order_date = NaiveDate::from_ymd_opt(2024, 10, 5).unwrap();

        let edited = edit.save(|| panic!("edit must not mint an id")).unwrap();
        assert_eq!(edited.id, "kept");
        assert_eq!(edited.order_date, NaiveDate::from_ymd_opt(2024, 10, 5).unwrap());
    }

    #[test]
    fn test_whitespace_values_count_as_filled() {
        let mut draft = OrderDraft::new(today());
        fill(draft.item_mut(0).unwrap(), " ", " ");
        assert_eq!(draft.validate(), Ok(()));
        draft.add_item().unwrap();
        assert_eq!(draft.items.len(), 2);
    }

    #[test]
    fn test_validate_order_without_items() {
        let order = Order {
            id: "empty".to_string(),
            order_date: today(),
            discount_percent: Amount::from("0"),
            items: Vec::new(),
        };
        assert_eq!(validate_order(&order), Err(ValidationError::NoItems));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(new_order_id(), new_order_id());
    }
}
