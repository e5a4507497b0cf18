//! WASM bindings for running an encounter in the browser

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{GameConfig, StrategyRegistry};

/// Build and play an encounter from a JSON `GameConfig`
///
/// Strategies are looked up in the default registry.
///
/// # Returns
/// JSON serialized RoundReport
#[wasm_bindgen]
pub fn play_encounter(config_json: &str) -> Result<JsValue, JsError> {
    let config = GameConfig::from_json(config_json)
        .map_err(|e| JsError::new(&e.to_string()))?;
    let mut game = config
        .build_game(&StrategyRegistry::with_defaults(), 0)
        .map_err(|e| JsError::new(&e.to_string()))?;
    let report = game
        .play(&mut ())
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&report)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get all strategies of the default registry
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&StrategyRegistry::with_defaults().infos())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
struct ValidationResult {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Validate a game configuration without playing it
///
/// Returns `{valid: true}` or `{valid: false, error: "..."}`.
#[wasm_bindgen]
pub fn validate_config(config_json: &str) -> JsValue {
    let checked = GameConfig::from_json(config_json)
        .and_then(|config| config.build_game(&StrategyRegistry::with_defaults(), 0));
    let result = match checked {
        Ok(_) => ValidationResult { valid: true, error: None },
        Err(e) => ValidationResult { valid: false, error: Some(e.to_string()) },
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}
