// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT
//! Signed transaction cli handler

use async_trait::async_trait;
use clap::Args;
use icx_provider::transaction::fill_defaults;
use serde_json::Value;
use std::fmt::Debug;
use std::path::PathBuf;

use crate::cli::commands::{get_client, get_signer, load_config};
use crate::cli::{CommandLineHandler, GlobalArguments};

pub(crate) struct SendTx;

#[async_trait]
impl CommandLineHandler for SendTx {
    type Arguments = SendTxArgs;

    async fn handle(global: &GlobalArguments, arguments: &Self::Arguments) -> anyhow::Result<()> {
        log::debug!("send transaction from file: {:?}", arguments.tx);

        let contents = std::fs::read_to_string(&arguments.tx)?;
        let mut params: Value = serde_json::from_str(&contents)?;

        let wallet = load_config(global)?
            .map(|config| config.wallet())
            .unwrap_or_default();
        fill_defaults(&mut params, &wallet.nid, &wallet.step_limit)?;

        let signer = get_signer(&arguments.keystore, &arguments.password, global)?;
        let client = get_client(&arguments.uri, global)?;
        let tx_hash = client.sign_and_send(&signer, params).await?;

        println!("transaction hash: {tx_hash}");
        Ok(())
    }
}

#[derive(Debug, Args)]
#[command(about = "Sign the transaction params in a file and send them")]
pub(crate) struct SendTxArgs {
    #[arg(long, short, help = "The JSON-RPC endpoint of the node")]
    pub uri: Option<String>,
    #[arg(long, short, help = "Path of the keystore file")]
    pub keystore: Option<PathBuf>,
    #[arg(long, short, env = "ICX_KEYSTORE_PASSWORD", help = "The keystore password")]
    pub password: String,
    #[arg(long, short, help = "Path of the JSON file holding the transaction params")]
    pub tx: PathBuf,
}
