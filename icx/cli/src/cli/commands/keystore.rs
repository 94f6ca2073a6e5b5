// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT
//! Keystore creation cli handler

use async_trait::async_trait;
use clap::Args;
use icx_identity::{write_key_store, IcxSigner};
use std::fmt::Debug;

use crate::cli::{CommandLineHandler, GlobalArguments};

pub(crate) struct CreateKeyStore;

#[async_trait]
impl CommandLineHandler for CreateKeyStore {
    type Arguments = KeyStoreArgs;

    async fn handle(_global: &GlobalArguments, arguments: &Self::Arguments) -> anyhow::Result<()> {
        let signer = IcxSigner::random();
        let path = write_key_store(
            &arguments.dir,
            &signer,
            &arguments.password,
            arguments.name.as_deref(),
        )?;

        println!("created keystore {} for {}", path.display(), signer.address());
        Ok(())
    }
}

#[derive(Debug, Args)]
#[command(about = "Generate a new key and store it in a password protected keystore")]
pub(crate) struct KeyStoreArgs {
    #[arg(long, short, default_value = ".", help = "Directory to write the keystore into")]
    pub dir: String,
    #[arg(long, short, help = "File name of the keystore, defaults to its id")]
    pub name: Option<String>,
    #[arg(long, short, env = "ICX_KEYSTORE_PASSWORD", help = "The keystore password")]
    pub password: String,
}
