// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT
//! Digest signing cli handler

use anyhow::anyhow;
use async_trait::async_trait;
use clap::Args;
use std::fmt::Debug;
use std::path::PathBuf;

use crate::cli::commands::get_signer;
use crate::cli::{CommandLineHandler, GlobalArguments};

pub(crate) struct Sign;

#[async_trait]
impl CommandLineHandler for Sign {
    type Arguments = SignArgs;

    async fn handle(global: &GlobalArguments, arguments: &Self::Arguments) -> anyhow::Result<()> {
        log::debug!("sign digest {}", arguments.digest);

        let digest = hex::decode(arguments.digest.trim_start_matches("0x"))?;
        if digest.len() != 32 {
            return Err(anyhow!(
                "digest must be 32 bytes, got {} bytes",
                digest.len()
            ));
        }

        let signer = get_signer(&arguments.keystore, &arguments.password, global)?;
        println!("{}", signer.sign(&digest)?);
        Ok(())
    }
}

#[derive(Debug, Args)]
#[command(about = "Sign a 32 byte hex digest and print the base64 recoverable signature")]
pub(crate) struct SignArgs {
    #[arg(long, short, help = "Path of the keystore file")]
    pub keystore: Option<PathBuf>,
    #[arg(long, short, env = "ICX_KEYSTORE_PASSWORD", help = "The keystore password")]
    pub password: String,
    #[arg(long, short, help = "The hex encoded digest to sign")]
    pub digest: String,
}
