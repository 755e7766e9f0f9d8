//! Library-address lookup.
//!
//! The front-end asks its API which SoundLibrary belongs to the connected
//! account: `POST /api/getLibraryAddress` with `{"userAddress": ...}`,
//! answered by `{"libraryAddress": ...}`. The HTTP client needs the
//! `network` feature; the wire types are always available.

use serde::{Deserialize, Serialize};

pub const LIBRARY_ADDRESS_PATH: &str = "/api/getLibraryAddress";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryAddressRequest {
    pub user_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryAddressResponse {
    /// Absent or null when the account has no library.
    #[serde(default)]
    pub library_address: Option<String>,
}

#[cfg(feature = "network")]
pub use client::LibraryResolver;

#[cfg(feature = "network")]
mod client {
    use super::*;
    use crate::error::{MogSynthError, Result};

    /// HTTP client for the lookup endpoint.
    #[derive(Debug, Clone)]
    pub struct LibraryResolver {
        http: reqwest::Client,
        base_url: String,
    }

    impl LibraryResolver {
        pub fn new(base_url: impl Into<String>) -> Self {
            LibraryResolver {
                http: reqwest::Client::new(),
                base_url: base_url.into().trim_end_matches('/').to_string(),
            }
        }

        fn endpoint(&self) -> String {
            format!("{}{LIBRARY_ADDRESS_PATH}", self.base_url)
        }

        /// Resolve the library for `user_address`; `Ok(None)` when the
        /// account has none. Non-2xx responses are network failures.
        pub async fn resolve(&self, user_address: &str) -> Result<Option<String>> {
            log::debug!("resolving library for {user_address}");
            let response = self
                .http
                .post(self.endpoint())
                .json(&LibraryAddressRequest {
                    user_address: user_address.to_string(),
                })
                .send()
                .await?;

            if !response.status().is_success() {
                log::warn!("library lookup failed: HTTP {}", response.status());
                return Err(MogSynthError::network("Network response was not ok"));
            }

            let body: LibraryAddressResponse = response.json().await?;
            Ok(body.library_address.filter(|a| !a.is_empty()))
        }
    }

}
