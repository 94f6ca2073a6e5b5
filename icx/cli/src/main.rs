// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

mod cli;

#[tokio::main]
async fn main() {
    env_logger::init();
    cli::cli().await;
}
