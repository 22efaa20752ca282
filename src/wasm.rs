use wasm_bindgen::prelude::*;

use crate::config::DecoderConfig;
use crate::decoder::TransactionDecoder;
use crate::decoder::family::decoder_for;
use crate::protocols::ProgramFamily;
use crate::types::pubkey_to_string;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = JSON)]
    fn parse(s: &str) -> JsValue;
}

fn to_js(value: &serde_json::Value) -> JsValue {
    match serde_json::to_string(value) {
        Ok(json_str) => parse(&json_str),
        Err(_) => JsValue::NULL,
    }
}

fn error_result(msg: &str) -> JsValue {
    let obj = serde_json::json!({"error": msg});
    to_js(&obj)
}

/// Returns every program family with its program ids and known instructions.
#[wasm_bindgen]
pub fn get_all_programs() -> JsValue {
    let result: Vec<serde_json::Value> = ProgramFamily::ALL
        .iter()
        .map(|family| {
            let decoder = decoder_for(*family);
            let simple: serde_json::Map<String, serde_json::Value> = decoder
                .simple_table()
                .iter()
                .map(|(byte, spec)| (byte.to_string(), spec.kind.as_ref().into()))
                .collect();
            let complex: serde_json::Map<String, serde_json::Value> = decoder
                .complex_table()
                .iter()
                .map(|(value, spec)| (format!("{value:#018x}"), spec.kind.as_ref().into()))
                .collect();
            let program_ids: Vec<String> =
                family.program_ids().iter().map(pubkey_to_string).collect();
            serde_json::json!({
                "id": family.as_ref(),
                "programIds": program_ids,
                "simpleInstructions": simple,
                "complexInstructions": complex,
            })
        })
        .collect();
    to_js(&serde_json::Value::Array(result))
}

/// Decode a transaction JSON string with the default decoder.
#[wasm_bindgen]
pub fn decode_transaction(json: &str) -> JsValue {
    decode_with(&TransactionDecoder::new(), json)
}

/// Decode a transaction JSON string with a `DecoderConfig` object.
#[wasm_bindgen]
pub fn decode_transaction_with_config(json: &str, config: JsValue) -> JsValue {
    let config: DecoderConfig = match serde_wasm_bindgen::from_value(config) {
        Ok(c) => c,
        Err(e) => return error_result(&format!("Invalid config: {e}")),
    };
    if let Err(e) = config.validate() {
        return error_result(&e.to_string());
    }
    decode_with(&TransactionDecoder::from_config(&config), json)
}

fn decode_with(decoder: &TransactionDecoder, json: &str) -> JsValue {
    let result = match decoder.decode_json(json) {
        Ok(r) => r,
        Err(e) => return error_result(&e.to_string()),
    };
    match serde_json::to_value(&result) {
        Ok(value) => to_js(&value),
        Err(_) => JsValue::NULL,
    }
}

/// Render base units with the given number of decimals.
#[wasm_bindgen]
pub fn format_amount(amount: &str, decimals: u8) -> Option<String> {
    let amount: u64 = amount.parse().ok()?;
    Some(crate::tokens::format_token_amount(amount, decimals))
}
