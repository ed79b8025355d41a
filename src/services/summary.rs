use chrono::{Datelike, NaiveDate};

use crate::models::{MonthlyTotals, Order, Period, Summary};
use crate::services::orders::sorted_newest_first;

/// Month value that selects the whole year.
pub const YEARLY: u32 = 0;

impl Period {
    pub fn month(year: i32, month: u32) -> Self {
        Period {
            year,
            month: Some(month),
        }
    }

    pub fn year(year: i32) -> Self {
        Period { year, month: None }
    }

    /// Maps a year/month selector where `YEARLY` means no month filter.
    pub fn from_selection(year: i32, month: u32) -> Self {
        if month == YEARLY {
            Self::year(year)
        } else {
            Self::month(year, month)
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::month(date.year(), date.month())
    }

    pub fn is_yearly(&self) -> bool {
        self.month.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && self.month.map_or(true, |m| date.month() == m)
    }
}

pub fn filter_orders(orders: &[Order], period: Period) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| period.contains(order.order_date))
        .cloned()
        .collect()
}

/// Gross value of every item, gifts included.
pub fn calculate_totals(orders: &[Order]) -> f64 {
    orders.iter().map(Order::subtotal).fold(0.0, |acc, v| acc + v)
}

/// Each order's discount applies to its full subtotal.
pub fn calculate_discount(orders: &[Order]) -> f64 {
    orders
        .iter()
        .map(|order| order.subtotal() * (order.discount_percent.value() / 100.0))
        .fold(0.0, |acc, v| acc + v)
}

pub fn calculate_profit_from_gifts(orders: &[Order]) -> f64 {
    orders
        .iter()
        .flat_map(|order| order.items.iter())
        .filter(|item| item.is_gift)
        .map(|item| item.price.value())
        .fold(0.0, |acc, v| acc + v)
}

pub fn summarize(orders: &[Order], period: Period) -> Summary {
    let filtered = filter_orders(orders, period);
    Summary {
        period,
        total: calculate_totals(&filtered),
        discount: calculate_discount(&filtered),
        gift_profit: calculate_profit_from_gifts(&filtered),
        orders: sorted_newest_first(&filtered),
    }
}

pub fn monthly_breakdown(orders: &[Order], year: i32) -> Vec<MonthlyTotals> {
    (1..=12)
        .map(|month| {
            let filtered = filter_orders(orders, Period::month(year, month));
            MonthlyTotals {
                month,
                total: calculate_totals(&filtered),
                discount: calculate_discount(&filtered),
                gift_profit: calculate_profit_from_gifts(&filtered),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, Item};

    fn item(price: &str, is_gift: bool) -> Item {
        Item {
            item: "Product".to_string(),
            price: Amount::from(price),
            is_gift,
            customer: String::new(),
        }
    }

    fn order(id: &str, date: (i32, u32, u32), discount: &str, items: Vec<Item>) -> Order {
        Order {
            id: id.to_string(),
            order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            discount_percent: Amount::from(discount),
            items,
        }
    }

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn test_gift_and_discount_scenario() {
        let orders = vec![order(
            "a",
            (2024, 3, 10),
            "10",
            vec![item("100", false), item("50", true)],
        )];

        assert_eq!(calculate_totals(&orders), 150.0);
        assert_eq!(calculate_discount(&orders), 15.0);
        assert_eq!(calculate_profit_from_gifts(&orders), 50.0);
    }

    #[test]
    fn test_filter_by_month_and_year() {
        let orders = vec![
            order("jan", (2024, 1, 15), "0", vec![item("10", false)]),
            order("feb", (2024, 2, 1), "0", vec![item("20", false)]),
            order("jan-next", (2025, 1, 15), "0", vec![item("40", false)]),
        ];

        assert_eq!(ids(&filter_orders(&orders, Period::month(2024, 1))), vec!["jan"]);
        assert_eq!(ids(&filter_orders(&orders, Period::year(2024))), vec!["jan", "feb"]);
        assert_eq!(ids(&filter_orders(&orders, Period::year(2025))), vec!["jan-next"]);
        assert!(filter_orders(&orders, Period::month(2024, 3)).is_empty());
    }

    #[test]
    fn test_from_selection_treats_zero_as_yearly() {
        assert_eq!(Period::from_selection(2024, YEARLY), Period::year(2024));
        assert!(Period::from_selection(2024, YEARLY).is_yearly());
        assert_eq!(Period::from_selection(2024, 7), Period::month(2024, 7));
    }

    #[test]
    fn test_summary_only_counts_selected_month() {
        let orders = vec![
            order("one", (2024, 5, 3), "10", vec![item("200", false), item("20", true)]),
            order("two", (2024, 8, 9), "50", vec![item("1000", true)]),
        ];

        let summary = summarize(&orders, Period::month(2024, 5));
        assert_eq!(ids(&summary.orders), vec!["one"]);
        assert_eq!(summary.total, 220.0);
        assert_eq!(summary.discount, 22.0);
        assert_eq!(summary.gift_profit, 20.0);

        let yearly = summarize(&orders, Period::year(2024));
        assert_eq!(yearly.total, 1220.0);
        assert_eq!(yearly.discount, 522.0);
        assert_eq!(yearly.gift_profit, 1020.0);
        assert_eq!(ids(&yearly.orders), vec!["two", "one"]);
    }

    #[test]
    fn test_empty_collection_sums_to_zero() {
        let summary = summarize(&[], Period::year(2024));
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.discount, 0.0);
        assert_eq!(summary.gift_profit, 0.0);
        assert!(summary.orders.is_empty());
        assert!(summary.total.is_sign_positive());
        assert!(summary.discount.is_sign_positive());
        assert!(summary.gift_profit.is_sign_positive());
        assert_eq!(serde_json::to_value(summary.total).unwrap(), serde_json::json!(0.0));
    }

    #[test]
    fn test_invalid_numbers_count_as_zero() {
        let orders = vec![order(
            "bad",
            (2024, 1, 1),
            "ten",
            vec![item("", false), item("abc", true), item("30", false)],
        )];

        assert_eq!(calculate_totals(&orders), 30.0);
        assert_eq!(calculate_discount(&orders), 0.0);
        assert_eq!(calculate_profit_from_gifts(&orders), 0.0);
    }

    #[test]
    fn test_zero_discount_and_no_gifts_contribute_nothing() {
        let orders = vec![order("plain", (2024, 1, 1), "0", vec![item("80", false)])];
        assert_eq!(calculate_discount(&orders), 0.0);
        assert_eq!(calculate_profit_from_gifts(&orders), 0.0);
        assert_eq!(calculate_totals(&orders), 80.0);
    }

    #[test]
    fn test_monthly_breakdown_covers_every_month() {
        let orders = vec![
            order("mar", (2024, 3, 1), "10", vec![item("100", false)]),
            order("mar-2", (2024, 3, 28), "0", vec![item("25", true)]),
            order("dec", (2024, 12, 31), "0", vec![item("5", false)]),
            order("other-year", (2023, 3, 1), "0", vec![item("999", false)]),
        ];

        let breakdown = monthly_breakdown(&orders, 2024);
        assert_eq!(breakdown.len(), 12);
        assert_eq!(breakdown[0].total, 0.0);
        assert_eq!(
            breakdown[2],
            MonthlyTotals {
                month: 3,
                total: 125.0,
                discount: 10.0,
                gift_profit: 25.0,
            }
        );
        assert_eq!(breakdown[11].total, 5.0);
        assert_eq!(breakdown.iter().map(|m| m.total).sum::<f64>(), 130.0);
    }
}
