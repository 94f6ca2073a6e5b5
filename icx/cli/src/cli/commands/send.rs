// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT
//! Raw JSON-RPC request cli handler

use async_trait::async_trait;
use clap::Args;
use icx_provider::jsonrpc::JsonRpcClient;
use serde_json::Value;
use std::fmt::Debug;

use crate::cli::commands::get_client;
use crate::cli::{CommandLineHandler, GlobalArguments};

pub(crate) struct SendRequest;

#[async_trait]
impl CommandLineHandler for SendRequest {
    type Arguments = SendArgs;

    async fn handle(global: &GlobalArguments, arguments: &Self::Arguments) -> anyhow::Result<()> {
        log::debug!("send json rpc payload with args: {:?}", arguments);

        let payload = std::fs::read_to_string(&arguments.payload)?;
        let payload: Value = serde_json::from_str(&payload)?;

        let client = get_client(&arguments.uri, global)?;
        let response = client.inner().send(payload).await?;

        println!("{}", serde_json::to_string_pretty(&response)?);
        Ok(())
    }
}

#[derive(Debug, Args)]
#[command(about = "Send a raw JSON-RPC payload and print the response as is")]
pub(crate) struct SendArgs {
    #[arg(long, short, help = "The JSON-RPC endpoint of the node")]
    pub uri: Option<String>,
    #[arg(long, short, help = "Path of the JSON file holding the request payload")]
    pub payload: String,
}
