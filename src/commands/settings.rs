use serde::Deserialize;

use crate::config::Config;
use crate::db::Database;
use crate::models::Settings;
use crate::services::state::AppState;

#[derive(Deserialize)]
pub struct SettingsPayload {
    pub currency_symbol: Option<String>,
}

pub fn get_settings(config: &Config, state: &AppState<Database>) -> Result<Settings, String> {
    let db = state.store().backend();
    let currency_symbol = db
        .get_setting("currency_symbol")
        .map_err(|e| e.to_string())?
        .unwrap_or_else(|| config.currency_symbol.clone());
    Ok(Settings { currency_symbol })
}

pub fn save_settings(
    payload: SettingsPayload,
    config: &Config,
    state: &AppState<Database>,
) -> Result<Settings, String> {
    {
        let db = state.store().backend();
        if let Some(symbol) = payload.currency_symbol {
            if !symbol.trim().is_empty() {
                db.set_setting("currency_symbol", symbol.trim())
                    .map_err(|e| e.to_string())?;
            }
        }
    }

    get_settings(config, state)
}
