// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

mod commands;

use async_trait::async_trait;
use clap::Args;
use std::fmt::Debug;

pub use commands::cli;

/// The trait that represents the abstraction of a command line handler. To implement a new command
/// line operation, implement this trait and register it in `commands::Commands`.
///
/// Note that this trait does not support a stateful implementation as we assume CLI commands are all
/// constructed from scratch. Initialize the states in the `handle` method.
#[async_trait]
pub trait CommandLineHandler {
    /// Abstraction for command line operations arguments.
    ///
    /// NOTE that this parameter is used to generate the command line arguments.
    /// Currently we are directly integrating with `clap` crate. In the future we can use our own
    /// implementation to abstract away external crates. But this should be good for now.
    type Arguments: Debug + Args;

    /// Handles the request with the provided arguments. Dev should handle the content to print and how
    /// to print the content.
    async fn handle(global: &GlobalArguments, arguments: &Self::Arguments) -> anyhow::Result<()>;
}

/// The global arguments that will be shared by all cli commands.
#[derive(Debug, Args, Clone, Default)]
pub struct GlobalArguments {
    #[arg(
        long,
        help = "The toml config file path, defaults to none",
        env = "ICX_CONFIG_PATH",
        global = true
    )]
    config_path: Option<String>,
}

impl GlobalArguments {
    pub fn config_path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }
}
