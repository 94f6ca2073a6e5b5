use std::net::SocketAddr;

use bytes::Bytes;
use icx_identity::{decode_signature, recover, Address};
use icx_provider::jsonrpc::JsonRpcClientImpl;
use icx_provider::transaction::tx_hash;
use icx_provider::IcxJsonRpcClient;
use serde_json::{json, Value};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::Filter;

pub const API_PATH: &str = "api/v3";

/// A node that checks transaction signatures the way a real node does: the sender is recovered
/// from the signature and has to match `from`.
pub struct VerifyingNode {
    pub addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl VerifyingNode {
    pub fn start() -> Self {
        let filter = warp::post()
            .and(warp::path!("api" / "v3"))
            .and(warp::body::bytes())
            .map(|bytes: Bytes| warp::reply::json(&handle(bytes)));

        let (shutdown, signal) = oneshot::channel::<()>();
        let (addr, server) =
            warp::serve(filter).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async move {
                signal.await.ok();
            });

        Self {
            addr,
            shutdown,
            handle: tokio::spawn(server),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/{API_PATH}", self.addr)
    }

    pub fn client(&self) -> IcxJsonRpcClient<JsonRpcClientImpl> {
        IcxJsonRpcClient::from_url(&self.url(), None).unwrap()
    }

    pub async fn stop(self) {
        self.shutdown.send(()).unwrap_or_default();
        self.handle.await.unwrap();
    }
}

fn handle(bytes: Bytes) -> Value {
    let request: Value = match serde_json::from_slice(bytes.as_ref()) {
        Ok(v) => v,
        Err(_) => return error(Value::Null, -32700, "Parse error"),
    };
    let id = request["id"].clone();
    let params = &request["params"];

    match request["method"].as_str() {
        Some("icx_getBalance") => result(id, json!("0x0")),
        Some("icx_sendTransaction") => match verify(params) {
            Ok(hash) => result(id, json!(hash)),
            Err(message) => error(id, -32602, &message),
        },
        Some(_) => error(id, -32601, "Method not found"),
        None => error(id, -32600, "Invalid Request"),
    }
}

fn verify(params: &Value) -> Result<String, String> {
    let signature = params["signature"]
        .as_str()
        .ok_or_else(|| String::from("missing signature"))?;
    let from = params["from"]
        .as_str()
        .ok_or_else(|| String::from("missing from"))?;

    let hash = tx_hash(params).map_err(|e| e.to_string())?;
    let (signature, recovery_id) = decode_signature(signature).map_err(|e| e.to_string())?;
    let public_key = recover(&hash, &signature, recovery_id).map_err(|e| e.to_string())?;

    if Address::from_public_key(&public_key).to_string() != from {
        return Err(String::from("signature does not match from"));
    }
    Ok(format!("0x{}", hex::encode(hash)))
}

fn result(id: Value, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "result": result, "id": id})
}

fn error(id: Value, code: i64, message: &str) -> Value {
    json!({"jsonrpc": "2.0", "error": {"code": code, "message": message}, "id": id})
}
