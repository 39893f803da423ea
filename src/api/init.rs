use log::{info, Level};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::interfaces::override_config;
use crate::models::{FeatureFlags, SubscriptionConfig};
use crate::parser::{parse_query_string, RawArgs};
use crate::settings::CompiledProfile;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Host arguments arrive as an object, a query string, or nothing at all
fn read_args(args: JsValue) -> Result<RawArgs, JsValue> {
    if args.is_undefined() || args.is_null() {
        return Ok(RawArgs::new());
    }
    if let Some(query) = args.as_string() {
        return Ok(parse_query_string(&query));
    }
    serde_wasm_bindgen::from_value(args).map_err(to_js_error)
}

/// Override a subscription object in place of the host's `main(config)`
#[wasm_bindgen]
pub fn override_config_js(config: JsValue, args: JsValue) -> Result<JsValue, JsValue> {
    let input: SubscriptionConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| to_js_error(format!("Invalid subscription: {}", e)))?;
    let flags = FeatureFlags::from_args(&read_args(args)?);

    let output = override_config(&input, &flags, CompiledProfile::builtin());
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    output
        .serialize(&serializer)
        .map_err(to_js_error)
}

#[wasm_bindgen]
pub fn init_wasm_logging(level: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let log_level = match level.as_deref() {
        Some("error") => Level::Error,
        Some("warn") => Level::Warn,
        Some("debug") => Level::Debug,
        Some("trace") => Level::Trace,
        _ => Level::Info,
    };

    console_log::init_with_level(log_level)
        .map_err(|e| JsValue::from_str(&format!("Failed to initialize logger: {}", e)))?;

    info!("WASM logging initialized at level: {}", log_level);
    Ok(())
}
