// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

//! JSON-RPC 2.0 envelopes, see https://www.jsonrpc.org/specification

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::jsonrpc::ClientError;

pub const JSON_RPC_VERSION: &str = "2.0";

/// A JSON-RPC request. `params` is left out of the serialized form when not set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>) -> Self {
        Self {
            jsonrpc: String::from(JSON_RPC_VERSION),
            method: method.into(),
            params: None,
            id,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }
}

impl From<JsonRpcRequest> for Value {
    fn from(request: JsonRpcRequest) -> Self {
        let mut value = json!({
            "jsonrpc": request.jsonrpc,
            "method": request.method,
            "id": request.id,
        });
        if let Some(params) = request.params {
            value["params"] = params;
        }
        value
    }
}

/// The error object, see https://www.jsonrpc.org/specification#error_object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Typed view over a raw response mapping. A response carries either a `result` or an `error`.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonRpcResponse {
    Result { id: Value, result: Value },
    Error { id: Value, error: JsonRpcError },
}

impl JsonRpcResponse {
    pub fn from_value(value: Value) -> Result<Self, ClientError> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(ClientError::InvalidResponse(format!(
                    "expected a json object, got {other}"
                )))
            }
        };

        let id = object.remove("id").unwrap_or(Value::Null);

        if let Some(error) = object.remove("error").filter(|e| !e.is_null()) {
            let error = serde_json::from_value::<JsonRpcError>(error)
                .map_err(|e| ClientError::InvalidResponse(format!("malformed error object: {e}")))?;
            return Ok(JsonRpcResponse::Error { id, error });
        }

        match object.remove("result") {
            Some(result) => Ok(JsonRpcResponse::Result { id, result }),
            None => Err(ClientError::InvalidResponse(String::from(
                "response has neither result nor error",
            ))),
        }
    }

    pub fn id(&self) -> &Value {
        match self {
            JsonRpcResponse::Result { id, .. } | JsonRpcResponse::Error { id, .. } => id,
        }
    }

    pub fn into_result(self) -> Result<Value, ClientError> {
        match self {
            JsonRpcResponse::Result { result, .. } => Ok(result),
            JsonRpcResponse::Error { error, .. } => Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            }),
        }
    }
}

/// Whether `value` is a JSON-RPC envelope that reports an error.
pub(crate) fn is_error_envelope(value: &Value) -> bool {
    value.get("error").map_or(false, |e| !e.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_without_params() {
        let value = Value::from(JsonRpcRequest::new(111, "icx_getTotalSupply"));
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "method": "icx_getTotalSupply", "id": 111})
        );
        assert!(value.get("params").is_none());
    }

    #[test]
    fn request_with_params() {
        let request =
            JsonRpcRequest::new(1, "icx_getBalance").with_params(json!({"address": "hx00"}));
        let value = Value::from(request.clone());
        assert_eq!(value["params"]["address"], "hx00");

        let parsed = serde_json::from_value::<JsonRpcRequest>(value).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn parse_result_response() {
        let response =
            JsonRpcResponse::from_value(json!({"jsonrpc": "2.0", "result": "0x1", "id": 7}))
                .unwrap();
        assert_eq!(response.id(), &json!(7));
        assert_eq!(response.into_result().unwrap(), json!("0x1"));
    }

    #[test]
    fn parse_error_response() {
        let raw = json!({
            "jsonrpc": "2.0",
            "error": {"code": -32601, "message": "Method not found"},
            "id": 7
        });
        assert!(is_error_envelope(&raw));

        let response = JsonRpcResponse::from_value(raw).unwrap();
        match response.into_result() {
            Err(ClientError::Rpc { code, message }) => {
                assert_eq!(code, -32601);
                assert_eq!(message, "Method not found");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_non_envelopes() {
        assert!(JsonRpcResponse::from_value(json!([1, 2])).is_err());
        assert!(JsonRpcResponse::from_value(json!({"jsonrpc": "2.0", "id": 1})).is_err());
        assert!(!is_error_envelope(&json!({"error": null, "result": 1})));
    }
}
