// Copyright 2026 The raxdns Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Loading sessions from the environment and configuration files.

#[cfg(any(feature = "native-tls", feature = "rustls"))]
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[cfg(any(feature = "native-tls", feature = "rustls"))]
use reqwest::Certificate;
use reqwest::Client;

use crate::client::AuthenticatedClient;
use crate::identity::{ApiKey, Password, DEFAULT_AUTH_URL};
use crate::{AuthType, Error, ErrorKind, InterfaceType, PollSettings, Session};

mod config;
mod env;

pub use config::from_config;
pub use env::from_env;

/// Region used when none is configured.
pub const FALLBACK_REGION: &str = "DFW";

/// Default location of the configuration file: `<config dir>/raxdns/config.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push("raxdns");
        path.push("config.yaml");
        path
    })
}

#[inline]
#[allow(unused_mut)] // mut builder unused with --no-default-features
pub(crate) fn get_client(cacert: Option<String>) -> Result<Client, Error> {
    let mut builder = Client::builder().user_agent(crate::USER_AGENT);
    #[cfg(any(feature = "native-tls", feature = "rustls"))]
    if let Some(cert_path) = cacert {
        let cert_content = fs::read(&cert_path).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot open cacert file {}: {}", cert_path, e),
            )
        })?;

        let cert = Certificate::from_pem(&cert_content).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot parse {} as PEM: {}", cert_path, e),
            )
        })?;

        builder = builder.add_root_certificate(cert);
    }

    #[cfg(not(any(feature = "native-tls", feature = "rustls")))]
    if cacert.is_some() {
        return Err(Error::new(
            ErrorKind::InvalidConfig,
            "TLS support is disabled",
        ));
    }

    builder.build().map_err(|e| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("Cannot initialize HTTP backend: {}", e),
        )
    })
}

/// Parse a duration given in (possibly fractional) seconds.
pub(crate) fn parse_seconds(name: &str, value: &str) -> Result<Duration, Error> {
    let secs = value.trim().parse::<f64>().map_err(|e| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("{} must be a number of seconds, got {:?}: {}", name, value, e),
        )
    })?;
    seconds(name, secs)
}

pub(crate) fn seconds(name: &str, secs: f64) -> Result<Duration, Error> {
    Duration::try_from_secs_f64(secs).map_err(|e| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("{} must be a non-negative number of seconds, got {}: {}", name, secs, e),
        )
    })
}

/// Rackspace credentials.
#[derive(Debug, Clone)]
pub(crate) enum Secret {
    ApiKey(String),
    Password(String),
}

/// Create a Rackspace identity for the given credentials.
pub(crate) fn identity(
    auth_url: Option<String>,
    username: String,
    secret: Secret,
    region: Option<String>,
) -> Result<Arc<dyn AuthType>, Error> {
    let auth_url = auth_url.unwrap_or_else(|| DEFAULT_AUTH_URL.to_string());
    let region = region.unwrap_or_else(|| FALLBACK_REGION.to_string());
    Ok(match secret {
        Secret::ApiKey(key) => Arc::new(ApiKey::new(auth_url, username, key)?.with_region(region)),
        Secret::Password(password) => {
            Arc::new(Password::new(auth_url, username, password)?.with_region(region))
        }
    })
}

/// Assemble a session.
pub(crate) fn create_session(
    client: Client,
    auth: Arc<dyn AuthType>,
    interface: Option<InterfaceType>,
    poll: PollSettings,
) -> Session {
    let mut session =
        Session::new_with_authenticated_client(AuthenticatedClient::new_internal(client, auth))
            .with_poll_settings(poll);
    if let Some(interface) = interface {
        session.set_endpoint_interface(interface);
    }
    session
}
