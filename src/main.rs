use anyhow::{anyhow, bail, Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_ledger::commands;
use order_ledger::config::Config;
use order_ledger::db::Database;
use order_ledger::services::state::AppState;
use order_ledger::services::storage::OrderStore;
use order_ledger::utils::{format_amount, format_money, format_order_date};

const USAGE: &str = "usage: ledger <command>

commands:
  orders                     list orders, newest first
  summary [YEAR [MONTH]]     totals for a month (MONTH 0 = whole year)
  breakdown [YEAR]           totals for each month of a year
  import <FILE>              replace all orders with the JSON array in FILE
  export                     print all orders as JSON
  delete <ID> [--yes]        delete one order
  clear [--yes]              delete every order";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_ledger=debug")),
        )
        .init();

    let config = Config::load()?;
    config.ensure_data_dir()?;

    let db = Database::new(&config.db_path)
        .with_context(|| format!("Failed to open {}", config.db_path.display()))?;
    let mut state = AppState::load(OrderStore::new(db));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let confirmed = args.iter().any(|arg| arg == "--yes");
    let args: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|arg| *arg != "--yes")
        .collect();

    let settings = commands::settings::get_settings(&config, &state).map_err(|e| anyhow!(e))?;
    let symbol = settings.currency_symbol.as_str();

    match args.as_slice() {
        [] | ["help"] | ["--help"] => println!("{}", USAGE),
        ["orders"] => print_orders(&state, symbol),
        ["summary", rest @ ..] => {
            let year = rest.first().map(|v| parse_arg::<i32>(v, "year")).transpose()?;
            let month = rest.get(1).map(|v| parse_arg::<u32>(v, "month")).transpose()?;
            let summary = commands::summary::get_summary(year, month, &state).map_err(|e| anyhow!(e))?;
            let display = commands::summary::format_summary(&summary, symbol);

            match summary.period.month {
                Some(month) => println!("{}-{:02}", summary.period.year, month),
                None => println!("{} (whole year)", summary.period.year),
            }
            println!("  total:          {}", display.total);
            println!("  gift profit:    {}", display.gift_profit);
            println!("  discount:       {}", display.discount);
            println!("  orders:         {}", summary.orders.len());
        }
        ["breakdown", rest @ ..] => {
            let year = rest.first().map(|v| parse_arg::<i32>(v, "year")).transpose()?;
            for row in commands::summary::get_monthly_breakdown(year, &state) {
                println!(
                    "{:02}  total {:>14}  discount {:>12}  gifts {:>12}",
                    row.month,
                    format_money(row.total, symbol),
                    format_money(row.discount, symbol),
                    format_money(row.gift_profit, symbol),
                );
            }
        }
        ["import", path] => {
            let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
            let count = commands::orders::import_orders(&json, &mut state).map_err(|e| anyhow!(e))?;
            println!("imported {} orders", count);
        }
        ["export"] => {
            println!("{}", commands::orders::export_orders(&state).map_err(|e| anyhow!(e))?);
        }
        ["delete", id] => {
            let prompt = commands::orders::request_delete(id, &mut state).map_err(|e| anyhow!(e))?;
            if confirmed {
                let notice = commands::orders::confirm_delete(&mut state).map_err(|e| anyhow!(e))?;
                println!("{}", notice.message);
            } else {
                commands::orders::cancel_delete(&mut state);
                println!("{} Re-run with --yes to confirm.", prompt.message);
            }
        }
        ["clear"] => {
            if confirmed {
                commands::orders::clear_orders(&mut state);
                println!("all orders removed");
            } else {
                println!("This removes every order. Re-run with --yes to confirm.");
            }
        }
        _ => bail!("unrecognized arguments\n\n{}", USAGE),
    }

    Ok(())
}

fn print_orders(state: &AppState<Database>, symbol: &str) {
    for card in commands::orders::get_orders(state) {
        let order = &card.order;
        println!(
            "#{}  {}  discount {}%  [{}]",
            card.number,
            format_order_date(order.order_date),
            format_amount(order.discount_percent.value()),
            order.id
        );
        for (index, item) in order.items.iter().enumerate() {
            let customer = if item.customer.is_empty() {
                String::new()
            } else {
                format!(" ---> ({})", item.customer)
            };
            let gift = if item.is_gift { " (gift)" } else { "" };
            println!(
                "    {}. {}{}  {}{}",
                index + 1,
                item.item,
                customer,
                format_money(item.price.value(), symbol),
                gift
            );
        }
    }
}

fn parse_arg<T: std::str::FromStr>(value: &str, name: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow!("Invalid {}: {}", name, value))
}
