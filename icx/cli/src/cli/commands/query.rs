// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT
//! Read only query cli handlers

use async_trait::async_trait;
use clap::Args;
use icx_identity::Address;
use std::fmt::Debug;
use std::str::FromStr;

use crate::cli::commands::get_client;
use crate::cli::{CommandLineHandler, GlobalArguments};

pub(crate) struct Balance;

#[async_trait]
impl CommandLineHandler for Balance {
    type Arguments = BalanceArgs;

    async fn handle(global: &GlobalArguments, arguments: &Self::Arguments) -> anyhow::Result<()> {
        let address = Address::from_str(&arguments.address)?;
        let client = get_client(&arguments.uri, global)?;

        println!("balance: {}", client.get_balance(&address).await?);
        Ok(())
    }
}

#[derive(Debug, Args)]
#[command(about = "Print the balance of an address")]
pub(crate) struct BalanceArgs {
    #[arg(long, short, help = "The JSON-RPC endpoint of the node")]
    pub uri: Option<String>,
    #[arg(help = "The hx address to query")]
    pub address: String,
}

pub(crate) struct TotalSupply;

#[async_trait]
impl CommandLineHandler for TotalSupply {
    type Arguments = TotalSupplyArgs;

    async fn handle(global: &GlobalArguments, arguments: &Self::Arguments) -> anyhow::Result<()> {
        let client = get_client(&arguments.uri, global)?;
        println!("total supply: {}", client.get_total_supply().await?);
        Ok(())
    }
}

#[derive(Debug, Args)]
#[command(about = "Print the total supply")]
pub(crate) struct TotalSupplyArgs {
    #[arg(long, short, help = "The JSON-RPC endpoint of the node")]
    pub uri: Option<String>,
}

pub(crate) struct TxResult;

#[async_trait]
impl CommandLineHandler for TxResult {
    type Arguments = TxResultArgs;

    async fn handle(global: &GlobalArguments, arguments: &Self::Arguments) -> anyhow::Result<()> {
        let client = get_client(&arguments.uri, global)?;
        let result = client.get_transaction_result(&arguments.hash).await?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        Ok(())
    }
}

#[derive(Debug, Args)]
#[command(about = "Print the result of a transaction")]
pub(crate) struct TxResultArgs {
    #[arg(long, short, help = "The JSON-RPC endpoint of the node")]
    pub uri: Option<String>,
    #[arg(help = "The transaction hash")]
    pub hash: String,
}

pub(crate) struct LastBlock;

#[async_trait]
impl CommandLineHandler for LastBlock {
    type Arguments = LastBlockArgs;

    async fn handle(global: &GlobalArguments, arguments: &Self::Arguments) -> anyhow::Result<()> {
        let client = get_client(&arguments.uri, global)?;
        let block = client.get_last_block().await?;
        println!("{}", serde_json::to_string_pretty(&block)?);
        Ok(())
    }
}

#[derive(Debug, Args)]
#[command(about = "Print the last block")]
pub(crate) struct LastBlockArgs {
    #[arg(long, short, help = "The JSON-RPC endpoint of the node")]
    pub uri: Option<String>,
}
