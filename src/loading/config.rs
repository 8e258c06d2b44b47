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

//! Session from a configuration file.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, warn};
use serde::Deserialize;

use super::Secret;
use crate::loading;
use crate::{Error, ErrorKind, InterfaceType, NoAuth, PollSettings, Session};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Settings {
    #[serde(default)]
    identity_type: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    auth_url: Option<String>,
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    interface: Option<String>,
    #[serde(default)]
    timeout: Option<f64>,
    #[serde(default)]
    delay: Option<f64>,
    #[serde(default)]
    cacert: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Credentials {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Root {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    credentials: Option<Credentials>,
}

impl Settings {
    fn poll_settings(&self) -> Result<PollSettings, Error> {
        let mut poll = PollSettings::default();
        if let Some(timeout) = self.timeout {
            poll.timeout = loading::seconds("timeout", timeout)?;
        }
        if let Some(delay) = self.delay {
            poll.delay = loading::seconds("delay", delay)?;
        }
        Ok(poll)
    }

    fn interface(&self) -> Result<Option<InterfaceType>, Error> {
        self.interface
            .as_deref()
            .map(|value| {
                InterfaceType::from_str(value)
                    .map_err(|e| Error::new(ErrorKind::InvalidConfig, e.to_string()))
            })
            .transpose()
    }
}

fn secret(credentials: Credentials) -> Result<(String, Secret), Error> {
    let username = credentials.username.ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidConfig,
            "Rackspace authentication requires a user name",
        )
    })?;
    let secret = match (credentials.api_key, credentials.password) {
        (Some(api_key), password) => {
            if password.is_some() {
                warn!("Both api_key and password are provided, using api_key");
            }
            Secret::ApiKey(api_key)
        }
        (None, Some(password)) => Secret::Password(password),
        (None, None) => {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                "Rackspace authentication requires either an API key or a password",
            ))
        }
    };
    Ok((username, secret))
}

fn from_yaml(contents: &str) -> Result<Session, Error> {
    let root: Root = serde_yaml::from_str(contents).map_err(|e| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("Cannot parse the configuration: {}", e),
        )
    })?;
    let settings = root.settings;

    let poll = settings.poll_settings()?;
    let interface = settings.interface()?;
    let client = loading::get_client(settings.cacert.clone())?;

    let identity_type = settings.identity_type.as_deref().unwrap_or("rackspace");
    match identity_type {
        "none" => {
            let auth = match settings.endpoint {
                Some(ref endpoint) => NoAuth::new(endpoint)?,
                None => NoAuth::new_without_endpoint(),
            };
            Ok(loading::create_session(
                client,
                Arc::new(auth),
                interface,
                poll,
            ))
        }
        "rackspace" => {
            let credentials = root.credentials.ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidConfig,
                    "Rackspace authentication requires a credentials section",
                )
            })?;
            let (username, secret) = secret(credentials)?;
            let auth = loading::identity(settings.auth_url, username, secret, settings.region)?;
            Ok(loading::create_session(client, auth, interface, poll))
        }
        other => Err(Error::new(
            ErrorKind::InvalidConfig,
            format!("Unsupported identity type: {}", other),
        )),
    }
}

/// Create a `Session` from a YAML configuration file.
///
/// The file consists of two sections:
///
/// ```yaml
/// settings:
///   identity_type: rackspace  # or none
///   region: ORD
///   auth_url: https://identity.api.rackspacecloud.com/v2.0
///   endpoint: https://dns.example.com/v1.0/123456  # only with identity_type none
///   interface: public
///   timeout: 5
///   delay: 0.5
///   cacert: /etc/ssl/my-ca.pem
/// credentials:
///   username: me
///   api_key: 0123456789abcdef  # or password
/// ```
///
/// See [default_config_path](fn.default_config_path.html) for the usual location.
pub fn from_config<P: AsRef<Path>>(path: P) -> Result<Session, Error> {
    let path = path.as_ref();
    debug!("Reading configuration from {}", path.display());
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("Cannot read configuration file {}: {}", path.display(), e),
        )
    })?;
    from_yaml(&contents)
}
