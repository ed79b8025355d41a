use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::utils::parse_amount;

/// A price or discount exactly as it was entered: form fields persist as
/// strings, older records may carry plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    pub fn value(&self) -> f64 {
        match self {
            Amount::Number(n) if n.is_finite() => *n,
            Amount::Number(_) => 0.0,
            Amount::Text(text) => parse_amount(text),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Amount::Number(_) => false,
            Amount::Text(text) => text.is_empty(),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Text(String::new())
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

fn zero_percent() -> Amount {
    Amount::Text("0".to_string())
}

/// Anything that is neither a JSON number nor a string reads as blank, so a
/// damaged field never rejects the whole record.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64().map(Amount::Number).unwrap_or_default(),
        serde_json::Value::String(text) => Amount::Text(text),
        _ => Amount::default(),
    })
}

fn lenient_percent<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64().map(Amount::Number).unwrap_or_else(zero_percent),
        serde_json::Value::String(text) => Amount::Text(text),
        _ => zero_percent(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, deserialize_with = "null_as_default")]
    pub item: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub price: Amount,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_gift: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer: String,
}

impl Item {
    pub fn blank() -> Self {
        Item {
            item: String::new(),
            price: Amount::default(),
            is_gift: false,
            customer: String::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.item.is_empty() && !self.price.is_blank()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_date: NaiveDate,
    #[serde(default = "zero_percent", deserialize_with = "lenient_percent")]
    pub discount_percent: Amount,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
}

impl Order {
    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .fold(0.0, |acc, item| acc + item.price.value())
    }
}

/// One entry of the order list, numbered oldest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCard {
    pub number: usize,
    pub order: Order,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    /// 1-based; `None` covers the whole year.
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub period: Period,
    pub total: f64,
    pub discount: f64,
    pub gift_profit: f64,
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub month: u32,
    pub total: f64,
    pub discount: f64,
    pub gift_profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub currency_symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Transient message for the user; the presentation layer dismisses it
/// after `auto_hide`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    pub auto_hide: Duration,
}

impl Notice {
    pub const PROMPT_TIMEOUT: Duration = Duration::from_secs(3);
    pub const FORM_TIMEOUT: Duration = Duration::from_secs(6);

    pub fn confirm_delete() -> Self {
        Notice {
            severity: Severity::Warning,
            message: "Do you want to delete this order?".to_string(),
            auto_hide: Self::PROMPT_TIMEOUT,
        }
    }

    pub fn deleted() -> Self {
        Notice {
            severity: Severity::Success,
            message: "Order deleted successfully.".to_string(),
            auto_hide: Self::PROMPT_TIMEOUT,
        }
    }

    pub fn rejected(message: impl Into<String>, severity: Severity) -> Self {
        Notice {
            severity,
            message: message.into(),
            auto_hide: Self::FORM_TIMEOUT,
        }
    }
}
