// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::jsonrpc::ClientError;

/// The http(s) URL of a JSON-RPC node, e.g. `http://127.0.0.1:9000/api/v3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(Url);

impl Endpoint {
    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<Url> for Endpoint {
    type Error = ClientError;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| ClientError::InvalidEndpoint {
            endpoint: url.to_string(),
            reason: reason.to_string(),
        };

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.host().is_none() {
            return Err(invalid("missing host"));
        }
        Ok(Self(url))
    }
}

impl FromStr for Endpoint {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `Url` silently drops an empty port, which would redirect the request to the scheme's
        // default port
        if has_empty_port(s) {
            return Err(ClientError::InvalidEndpoint {
                endpoint: s.to_string(),
                reason: String::from("missing port after ':'"),
            });
        }

        let url = Url::parse(s).map_err(|e| ClientError::InvalidEndpoint {
            endpoint: s.to_string(),
            reason: e.to_string(),
        })?;
        Endpoint::try_from(url)
    }
}

fn has_empty_port(s: &str) -> bool {
    let rest = s.split_once("://").map(|(_, rest)| rest).unwrap_or(s);
    let authority = rest
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    host_port.ends_with(':')
}
