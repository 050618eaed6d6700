//! Decoding of the backend's `{status, mensagem, ...payload}` envelope.
//!
//! Kept free of any HTTP client so every failure path can be exercised in
//! plain unit tests; the gloo client only feeds it a status code and a body.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::RequestFailure;

/// Envelope status that marks a successful response
pub const SUCCESS_STATUS: &str = "sucesso";

const UNKNOWN_SERVER_ERROR: &str = "Erro desconhecido no servidor";
const GENERIC_HTTP_ERROR: &str = "Rota não encontrada ou erro no servidor.";

/// Decode a response given its HTTP status and raw body.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, RequestFailure> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| server_message(&value))
            .unwrap_or_else(|| GENERIC_HTTP_ERROR.to_string());
        return Err(RequestFailure::HttpStatus { status, message });
    }
    decode_envelope(body)
}

/// Decode a 2xx body: check the envelope status, then map the payload.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, RequestFailure> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| RequestFailure::MalformedResponse(e.to_string()))?;

    let status = value.get("status").and_then(Value::as_str);
    if status != Some(SUCCESS_STATUS) {
        let message = server_message(&value).unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string());
        return Err(RequestFailure::Application(message));
    }

    serde_json::from_value(value).map_err(|e| RequestFailure::MalformedResponse(e.to_string()))
}

fn server_message(value: &Value) -> Option<String> {
    value
        .get("mensagem")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
