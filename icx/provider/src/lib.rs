// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

//! Talks to ICX nodes over JSON-RPC: a plain request/response client, typed wrappers over the
//! `icx_*` methods, transaction hashing and signing, and the TOML configuration.

pub mod api;
pub mod config;
pub mod jsonrpc;
pub mod transaction;

pub use api::{ApiError, IcxJsonRpcClient};
pub use config::Config;
