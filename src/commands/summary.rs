use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::models::{MonthlyTotals, Period, Summary};
use crate::services::state::AppState;
use crate::services::storage::KeyValueStore;
use crate::services::summary::{monthly_breakdown, summarize};
use crate::utils::format_money;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryDisplay {
    pub total: String,
    pub discount: String,
    pub gift_profit: String,
}

/// Without a year the current month is summarized; a month of `0` selects
/// the whole year.
pub fn get_summary<S: KeyValueStore>(
    year: Option<i32>,
    month: Option<u32>,
    state: &AppState<S>,
) -> Result<Summary, String> {
    let period = resolve_period(year, month)?;
    Ok(summarize(state.orders(), period))
}

pub fn get_monthly_breakdown<S: KeyValueStore>(
    year: Option<i32>,
    state: &AppState<S>,
) -> Vec<MonthlyTotals> {
    let year = year.unwrap_or_else(|| Local::now().year());
    monthly_breakdown(state.orders(), year)
}

pub fn format_summary(summary: &Summary, currency_symbol: &str) -> SummaryDisplay {
    SummaryDisplay {
        total: format_money(summary.total, currency_symbol),
        discount: format_money(summary.discount, currency_symbol),
        gift_profit: format_money(summary.gift_profit, currency_symbol),
    }
}

fn resolve_period(year: Option<i32>, month: Option<u32>) -> Result<Period, String> {
    let today = Local::now().date_naive();
    let period = match (year, month) {
        (None, None) => Period::containing(today),
        (None, Some(month)) => Period::from_selection(today.year(), month),
        (Some(year), None) => Period::month(year, today.month()),
        (Some(year), Some(month)) => Period::from_selection(year, month),
    };

    if let Some(month) = period.month {
        if !(1..=12).contains(&month) {
            return Err(format!("Invalid month: {}", month));
        }
    }
    Ok(period)
}
