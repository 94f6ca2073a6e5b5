// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT
//! Wallet address cli handler

use async_trait::async_trait;
use clap::Args;
use std::fmt::Debug;
use std::path::PathBuf;

use crate::cli::commands::get_signer;
use crate::cli::{CommandLineHandler, GlobalArguments};

pub(crate) struct ShowAddress;

#[async_trait]
impl CommandLineHandler for ShowAddress {
    type Arguments = AddressArgs;

    async fn handle(global: &GlobalArguments, arguments: &Self::Arguments) -> anyhow::Result<()> {
        let signer = get_signer(&arguments.keystore, &arguments.password, global)?;
        println!("{}", signer.address());
        Ok(())
    }
}

#[derive(Debug, Args)]
#[command(about = "Print the address of the key in a keystore")]
pub(crate) struct AddressArgs {
    #[arg(long, short, help = "Path of the keystore file")]
    pub keystore: Option<PathBuf>,
    #[arg(long, short, env = "ICX_KEYSTORE_PASSWORD", help = "The keystore password")]
    pub password: String,
}
