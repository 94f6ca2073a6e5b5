// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

//! The module that contains all the CLI commands.

mod address;
mod keystore;
mod query;
mod send;
mod sendtx;
mod sign;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use icx_identity::IcxSigner;
use icx_provider::jsonrpc::JsonRpcClientImpl;
use icx_provider::{Config, IcxJsonRpcClient};

use crate::cli::{CommandLineHandler, GlobalArguments};

use self::address::{AddressArgs, ShowAddress};
use self::keystore::{CreateKeyStore, KeyStoreArgs};
use self::query::{
    Balance, BalanceArgs, LastBlock, LastBlockArgs, TotalSupply, TotalSupplyArgs, TxResult,
    TxResultArgs,
};
use self::send::{SendArgs, SendRequest};
use self::sendtx::{SendTx, SendTxArgs};
use self::sign::{Sign, SignArgs};

/// The node the commands talk to when neither `--uri` nor a config file says otherwise.
pub(crate) const DEFAULT_NODE_URI: &str = "http://127.0.0.1:9000/api/v3";

/// The collection of all subcommands to be called, see clap's documentation for usage. Register a
/// new command accordingly.
#[derive(Debug, Subcommand)]
enum Commands {
    Send(SendArgs),
    #[command(name = "sendtx")]
    SendTx(SendTxArgs),
    Sign(SignArgs),
    Address(AddressArgs),
    #[command(name = "keystore")]
    KeyStore(KeyStoreArgs),
    Balance(BalanceArgs),
    #[command(name = "totalsupply")]
    TotalSupply(TotalSupplyArgs),
    #[command(name = "txresult")]
    TxResult(TxResultArgs),
    #[command(name = "lastblock")]
    LastBlock(LastBlockArgs),
}

/// The overall command line struct to be used by `clap`.
#[derive(Debug, Parser)]
#[command(
    name = "icx",
    about = "Sign and send JSON-RPC requests to ICX nodes",
    version = "v0.1.0"
)]
#[command(propagate_version = true)]
struct IcxCliCommands {
    #[command(flatten)]
    global_params: GlobalArguments,
    #[command(subcommand)]
    command: Commands,
}

/// The `cli` method exposed to handle all the cli commands, ideally from main.
pub async fn cli() {
    // parse the arguments
    let args = IcxCliCommands::parse();

    let global = &args.global_params;
    let r = match &args.command {
        Commands::Send(args) => SendRequest::handle(global, args).await,
        Commands::SendTx(args) => SendTx::handle(global, args).await,
        Commands::Sign(args) => Sign::handle(global, args).await,
        Commands::Address(args) => ShowAddress::handle(global, args).await,
        Commands::KeyStore(args) => CreateKeyStore::handle(global, args).await,
        Commands::Balance(args) => Balance::handle(global, args).await,
        Commands::TotalSupply(args) => TotalSupply::handle(global, args).await,
        Commands::TxResult(args) => TxResult::handle(global, args).await,
        Commands::LastBlock(args) => LastBlock::handle(global, args).await,
    };

    if let Err(e) = r {
        log::error!(
            "process command: {:?} failed due to error: {:?}",
            args.command,
            e
        );
        std::process::exit(1);
    }
}

pub(crate) fn load_config(global: &GlobalArguments) -> Result<Option<Config>> {
    global.config_path().map(Config::from_file).transpose()
}

/// Builds the JSON-RPC client from `--uri`, falling back to the config file and then to
/// [`DEFAULT_NODE_URI`]. The config's auth token is used even when `--uri` overrides its endpoint.
pub(crate) fn get_client(
    uri: &Option<String>,
    global: &GlobalArguments,
) -> Result<IcxJsonRpcClient<JsonRpcClientImpl>> {
    let config = load_config(global)?;
    let auth_token = config
        .as_ref()
        .and_then(|config| config.client.auth_token.as_deref());

    let client = match (uri, &config) {
        (Some(uri), _) => IcxJsonRpcClient::from_url(uri, auth_token)?,
        (None, Some(config)) => IcxJsonRpcClient::from_config(config)?,
        (None, None) => IcxJsonRpcClient::from_url(DEFAULT_NODE_URI, None)?,
    };
    Ok(client)
}

/// Loads the signer from `--keystore`, falling back to the keystore in the config file.
pub(crate) fn get_signer(
    keystore: &Option<PathBuf>,
    password: &str,
    global: &GlobalArguments,
) -> Result<IcxSigner> {
    let path = match keystore {
        Some(path) => path.clone(),
        None => load_config(global)?
            .and_then(|config| config.wallet().keystore)
            .ok_or_else(|| anyhow!("no keystore given, pass --keystore or set it in the config"))?,
    };

    log::debug!("loading signer from keystore {path:?}");
    Ok(IcxSigner::from_key_store(&path, password)?)
}
