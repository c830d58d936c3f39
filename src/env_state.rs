//! # skyresolve environment state
//!
//! This module defines [`crate::env_state::ResolverEnv`], the **shared environment object** handed to
//! the network-backed providers of the crate. It provides access to:
//!
//! - A persistent **HTTP client** ([`ureq::Agent`]) with a global timeout.
//! - The **service configuration** ([`ResolverConfig`]): endpoints of JPL Horizons and SIMBAD,
//!   the default observer location and the catalog row limit.
//!
//! ## Structure
//!
//! ```text
//! ResolverEnv
//! ├── http_client (ureq::Agent)
//! └── config      (ResolverConfig)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use skyresolve::env_state::{ResolverConfig, ResolverEnv};
//!
//! // Public services, 10 s timeout
//! let env = ResolverEnv::new();
//!
//! // Point Horizons to a mirror
//! let config = ResolverConfig {
//!     horizons_url: "http://localhost:8080/api/horizons.api".into(),
//!     ..ResolverConfig::default()
//! };
//! let env = ResolverEnv::with_config(config);
//! ```
//!
//! ## Notes
//!
//! - The agent is cheaply cloneable (shared connection pool), so providers each keep their own
//!   clone of the environment.
//! - No retry is performed: a failed call surfaces as [`SkyResolveError::UreqHttpError`].
use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::constants::{
    CATALOG_ROW_LIMIT, GEOCENTER, HORIZONS_API_URL, HTTP_TIMEOUT_SECS, SIMBAD_TAP_URL,
};
use crate::skyresolve_errors::SkyResolveError;

/// Endpoints and defaults used by the network providers.
///
/// # Fields
///
/// * `horizons_url` - URL of the Horizons API (`format=text` output is requested)
/// * `simbad_url` - URL of the SIMBAD TAP synchronous endpoint
/// * `timeout` - global timeout of a single HTTP call
/// * `default_center` - Horizons observer location used when a request has no override
/// * `catalog_row_limit` - maximum number of rows returned by one catalog region query
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    pub horizons_url: String,
    pub simbad_url: String,
    pub timeout: Duration,
    pub default_center: String,
    pub catalog_row_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            horizons_url: HORIZONS_API_URL.into(),
            simbad_url: SIMBAD_TAP_URL.into(),
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            default_center: GEOCENTER.into(),
            catalog_row_limit: CATALOG_ROW_LIMIT,
        }
    }
}

/// This object is passed to the network providers of the library
///
/// # Fields
///
/// * `http_client` - A ureq agent used to make HTTP requests
/// * `config` - The endpoints and defaults of the providers
#[derive(Debug, Clone)]
pub struct ResolverEnv {
    pub http_client: Agent,
    pub config: ResolverConfig,
}

impl Default for ResolverEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverEnv {
    /// Create a new environment targeting the public services
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    /// Create a new environment from an explicit configuration
    ///
    /// Arguments
    /// ---------
    /// * `config`: endpoints, timeout and defaults
    ///
    /// Return
    /// ------
    /// * A new environment whose HTTP agent applies `config.timeout` to every call
    pub fn with_config(config: ResolverConfig) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build();
        let agent: Agent = agent_config.into();

        ResolverEnv {
            http_client: agent,
            config,
        }
    }

    /// Perform a GET request with query parameters and return the body as text
    ///
    /// Arguments
    /// ---------
    /// * `url`: the endpoint
    /// * `params`: the query parameters, percent-encoded by the agent
    ///
    /// Return
    /// ------
    /// * The response body, or the transport error
    pub(crate) fn get_with_query(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<String, SkyResolveError> {
        debug!(url, n_params = params.len(), "GET request");
        let body = self
            .http_client
            .get(url)
            .query_pairs(params.iter().map(|(key, value)| (*key, value.as_str())))
            .call()?
            .body_mut()
            .read_to_string()?;
        Ok(body)
    }
}
