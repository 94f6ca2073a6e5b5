// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

//! Provides a simple way of reading configuration files.
//!
//! Reads a TOML config file for the ICX tools and deserializes it in a type-safe way into a
//! [`Config`] struct.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

use crate::jsonrpc::Endpoint;

pub const DEFAULT_NID: &str = "0x3";
pub const DEFAULT_STEP_LIMIT: &str = "0x3000000";

/// The top-level struct representing the config. Calls to [`Config::from_file`] deserialize into
/// this struct.
#[derive(Deserialize, Debug)]
pub struct Config {
    pub client: Client,
    pub wallet: Option<Wallet>,
}

/// The node the tools talk to.
#[derive(Deserialize, Debug, Clone)]
pub struct Client {
    #[serde(deserialize_with = "deserialize_endpoint")]
    pub uri: Endpoint,
    pub auth_token: Option<String>,
}

/// Signing defaults. The keystore password is never read from the config.
#[derive(Deserialize, Debug, Clone)]
pub struct Wallet {
    pub keystore: Option<PathBuf>,
    #[serde(default = "default_nid")]
    pub nid: String,
    #[serde(default = "default_step_limit")]
    pub step_limit: String,
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            keystore: None,
            nid: default_nid(),
            step_limit: default_step_limit(),
        }
    }
}

fn deserialize_endpoint<'de, D>(deserializer: D) -> Result<Endpoint, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<Endpoint>().map_err(serde::de::Error::custom)
}

fn default_nid() -> String {
    String::from(DEFAULT_NID)
}

fn default_step_limit() -> String {
    String::from(DEFAULT_STEP_LIMIT)
}

impl Config {
    /// Reads a TOML configuration in the `s` string and returns a [`Config`] struct.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config = toml::from_str(s)?;
        Ok(config)
    }

    /// Reads a TOML configuration file specified in the `path` and returns a [`Config`] struct.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {path:?}"))?;
        let config = Config::from_toml_str(contents.as_str())
            .with_context(|| format!("cannot parse config file {path:?}"))?;
        Ok(config)
    }

    /// The wallet section, or its defaults when the config has none.
    pub fn wallet(&self) -> Wallet {
        self.wallet.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use indoc::formatdoc;
    use tempfile::NamedTempFile;

    use super::*;

    const URI: &str = "http://127.0.0.1:9000/api/v3";
    const AUTH_TOKEN: &str = "AUTH_TOKEN";
    const KEYSTORE: &str = "./tests/test_keystore";

    fn config_str() -> String {
        formatdoc!(
            r#"
            [client]
            uri = "{URI}"
            auth_token = "{AUTH_TOKEN}"

            [wallet]
            keystore = "{KEYSTORE}"
            nid = "0x1"
        "#
        )
    }

    #[test]
    fn read_config() {
        let config = Config::from_toml_str(&config_str()).unwrap();

        assert_eq!(config.client.uri.to_string(), URI);
        assert_eq!(config.client.auth_token.as_deref(), Some(AUTH_TOKEN));

        let wallet = config.wallet();
        assert_eq!(wallet.keystore, Some(PathBuf::from(KEYSTORE)));
        assert_eq!(wallet.nid, "0x1");
        assert_eq!(wallet.step_limit, DEFAULT_STEP_LIMIT);
    }

    #[test]
    fn wallet_is_optional() {
        let config = Config::from_toml_str(&formatdoc!(
            r#"
            [client]
            uri = "{URI}"
        "#
        ))
        .unwrap();

        assert!(config.client.auth_token.is_none());
        assert!(config.wallet.is_none());

        let wallet = config.wallet();
        assert!(wallet.keystore.is_none());
        assert_eq!(wallet.nid, DEFAULT_NID);
    }

    #[test]
    fn read_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(config_str().as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.client.uri.to_string(), URI);
    }

    #[test]
    fn missing_client_section_fails() {
        assert!(Config::from_toml_str("[wallet]\nnid = \"0x1\"").is_err());
        assert!(Config::from_file("./does/not/exist.toml").is_err());
    }

    #[test]
    fn empty_port_in_uri_fails() {
        let err = Config::from_toml_str(&formatdoc!(
            r#"
            [client]
            uri = "http://127.0.0.1:/api/v3"
        "#
        ))
        .unwrap_err();
        assert!(err.to_string().contains("missing port"));
    }

    #[test]
    fn non_http_uri_fails() {
        assert!(Config::from_toml_str("[client]\nuri = \"ws://127.0.0.1:9000/api/v3\"").is_err());
    }
}
