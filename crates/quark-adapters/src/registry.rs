//! Atom package registry adapter.
//!
//! A package exists when `GET <base>/<name>` answers with a success status.
//! Lookups are blocking with a fixed timeout; the question flow asks one
//! question at a time, so there is nothing to overlap them with.

use std::time::Duration;

use reqwest::{Url, blocking::Client};
use tracing::{debug, instrument};

use quark_core::{
    application::{ApplicationError, ports::PackageRegistry},
    error::{QuarkError, QuarkResult},
};

pub const DEFAULT_REGISTRY_URL: &str = "https://atom.io/api/packages";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the Atom package API.
#[derive(Debug, Clone)]
pub struct AtomRegistry {
    client: Client,
    base: Url,
}

impl AtomRegistry {
    pub fn new(base_url: &str, timeout: Duration) -> QuarkResult<Self> {
        let base = Url::parse(base_url).map_err(|e| QuarkError::Configuration {
            message: format!("invalid registry url '{base_url}': {e}"),
        })?;
        if base.cannot_be_a_base() {
            return Err(QuarkError::Configuration {
                message: format!("registry url '{base_url}' cannot be a base url"),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quark/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApplicationError::Registry {
                reason: e.to_string(),
            })?;

        Ok(Self { client, base })
    }

    /// Lookup URL for one package; the name is percent-encoded as a single
    /// path segment.
    pub fn package_url(&self, name: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }
}

impl PackageRegistry for AtomRegistry {
    #[instrument(skip(self))]
    fn package_exists(&self, name: &str) -> QuarkResult<bool> {
        let url = self.package_url(name);
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| ApplicationError::Registry {
                reason: e.to_string(),
            })?;

        let status = response.status();
        debug!(%url, %status, "Registry responded");
        Ok(status.is_success())
    }
}
