use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "ledger.sqlite";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub currency_symbol: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let db_path = env::var("LEDGER_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        if db_path.trim().is_empty() {
            anyhow::bail!("LEDGER_DB_PATH is set but empty");
        }

        let currency_symbol = env::var("LEDGER_CURRENCY_SYMBOL")
            .unwrap_or_else(|_| DEFAULT_CURRENCY_SYMBOL.to_string());

        Ok(Config {
            db_path: PathBuf::from(db_path),
            currency_symbol,
        })
    }

    pub fn ensure_data_dir(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}
