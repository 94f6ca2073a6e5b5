// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

use icx_identity::{Address, IcxSigner};
use serde_json::{json, Value};

use crate::config::Config;
use crate::jsonrpc::{ClientError, Endpoint, JsonRpcClient, JsonRpcClientImpl};
use crate::transaction::{sign_transaction, TransactionError};

// RPC methods
mod methods {
    pub const GET_TOTAL_SUPPLY: &str = "icx_getTotalSupply";
    pub const GET_BALANCE: &str = "icx_getBalance";
    pub const GET_LAST_BLOCK: &str = "icx_getLastBlock";
    pub const GET_TRANSACTION_RESULT: &str = "icx_getTransactionResult";
    pub const SEND_TRANSACTION: &str = "icx_sendTransaction";
    pub const CALL: &str = "icx_call";
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error("unexpected result for {method}: {result}")]
    UnexpectedResult { method: &'static str, result: Value },
}

/// Typed wrappers over the node's `icx_*` JSON-RPC methods.
///
/// # Examples
/// ```no_run
/// use icx_provider::IcxJsonRpcClient;
///
/// #[tokio::main]
/// async fn main() {
///     let client = IcxJsonRpcClient::from_url("http://127.0.0.1:9000/api/v3", None).unwrap();
///     println!("total supply: {}", client.get_total_supply().await.unwrap());
/// }
/// ```
pub struct IcxJsonRpcClient<T: JsonRpcClient> {
    client: T,
}

impl<T: JsonRpcClient> IcxJsonRpcClient<T> {
    pub fn new(client: T) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &T {
        &self.client
    }
}

impl<T: JsonRpcClient + Send + Sync> IcxJsonRpcClient<T> {
    pub async fn get_total_supply(&self) -> Result<String, ApiError> {
        let r = self.client.request(methods::GET_TOTAL_SUPPLY, None).await?;
        log::debug!("received get_total_supply response: {r:?}");
        expect_string(methods::GET_TOTAL_SUPPLY, r)
    }

    pub async fn get_balance(&self, address: &Address) -> Result<String, ApiError> {
        let params = json!({ "address": address.to_string() });
        let r = self.client.request(methods::GET_BALANCE, Some(params)).await?;
        log::debug!("received get_balance response: {r:?}");
        expect_string(methods::GET_BALANCE, r)
    }

    pub async fn get_last_block(&self) -> Result<Value, ApiError> {
        let r = self.client.request(methods::GET_LAST_BLOCK, None).await?;
        log::debug!("received get_last_block response: {r:?}");
        Ok(r)
    }

    pub async fn get_transaction_result(&self, tx_hash: &str) -> Result<Value, ApiError> {
        let params = json!({ "txHash": tx_hash });
        let r = self
            .client
            .request(methods::GET_TRANSACTION_RESULT, Some(params))
            .await?;
        log::debug!("received get_transaction_result response: {r:?}");
        Ok(r)
    }

    /// Read only call of a score method.
    pub async fn call(&self, params: Value) -> Result<Value, ApiError> {
        let r = self.client.request(methods::CALL, Some(params)).await?;
        Ok(r)
    }

    /// Sends already signed transaction params and returns the transaction hash.
    pub async fn send_transaction(&self, signed_params: Value) -> Result<String, ApiError> {
        let r = self
            .client
            .request(methods::SEND_TRANSACTION, Some(signed_params))
            .await?;
        log::info!("sent transaction: {r}");
        expect_string(methods::SEND_TRANSACTION, r)
    }

    /// Signs the params with `signer` and sends them.
    pub async fn sign_and_send(
        &self,
        signer: &IcxSigner,
        params: Value,
    ) -> Result<String, ApiError> {
        let signed = sign_transaction(signer, params)?;
        self.send_transaction(signed).await
    }
}

impl IcxJsonRpcClient<JsonRpcClientImpl> {
    pub fn from_url(url: &str, auth_token: Option<&str>) -> Result<Self, ClientError> {
        let endpoint = url.parse::<Endpoint>()?;
        Ok(Self::new(JsonRpcClientImpl::new(endpoint, auth_token)?))
    }

    /// A client that sends requests to the endpoint defined in the config's `[client]` table.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let jsonrpc_client = JsonRpcClientImpl::new(
            config.client.uri.clone(),
            config.client.auth_token.as_deref(),
        )?;
        Ok(Self::new(jsonrpc_client))
    }
}

fn expect_string(method: &'static str, result: Value) -> Result<String, ApiError> {
    match result {
        Value::String(s) => Ok(s),
        result => Err(ApiError::UnexpectedResult { method, result }),
    }
}
