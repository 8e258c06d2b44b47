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

//! Session from environment variables.

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use log::debug;

use super::Secret;
use crate::loading;
use crate::{Error, ErrorKind, InterfaceType, NoAuth, PollSettings, Session};

trait Environment {
    fn get(&self, name: &'static str) -> Result<String, Error>;
}

#[derive(Debug, Clone, Copy)]
struct RealEnvironment;

impl Environment for RealEnvironment {
    fn get(&self, name: &'static str) -> Result<String, Error> {
        env::var(name).map_err(|_| {
            Error::new(
                ErrorKind::InvalidInput,
                format!("Required environment variable {} is not provided", name),
            )
        })
    }
}

fn poll_settings<E: Environment>(env: &E) -> Result<PollSettings, Error> {
    let mut poll = PollSettings::default();
    if let Ok(timeout) = env.get("RAX_DNS_TIMEOUT") {
        poll.timeout = loading::parse_seconds("RAX_DNS_TIMEOUT", &timeout)?;
    }
    if let Ok(delay) = env.get("RAX_DNS_DELAY") {
        poll.delay = loading::parse_seconds("RAX_DNS_DELAY", &delay)?;
    }
    Ok(poll)
}

#[inline]
fn _from_env<E: Environment>(env: E) -> Result<Session, Error> {
    if let Ok(path) = env.get("RAX_CONFIG") {
        debug!("Loading session from configuration file {}", path);
        return loading::from_config(path);
    }

    let client = loading::get_client(env.get("RAX_CACERT").ok())?;
    let poll = poll_settings(&env)?;
    let interface = env
        .get("RAX_INTERFACE")
        .ok()
        .map(|value| InterfaceType::from_str(&value))
        .transpose()?;

    let auth_type = env
        .get("RAX_AUTH_TYPE")
        .unwrap_or_else(|_| "rackspace".to_string());
    match auth_type.as_str() {
        "none" => {
            let endpoint = env.get("RAX_ENDPOINT")?;
            let auth = NoAuth::new(endpoint)?;
            Ok(loading::create_session(
                client,
                Arc::new(auth),
                interface,
                poll,
            ))
        }
        "rackspace" => {
            let username = env.get("RAX_USERNAME")?;
            let secret = env
                .get("RAX_API_KEY")
                .map(Secret::ApiKey)
                .or_else(|_| env.get("RAX_PASSWORD").map(Secret::Password))
                .map_err(|_| {
                    Error::new(
                        ErrorKind::InvalidInput,
                        "Either RAX_API_KEY or RAX_PASSWORD must be provided",
                    )
                })?;
            let auth = loading::identity(
                env.get("RAX_AUTH_URL").ok(),
                username,
                secret,
                env.get("RAX_REGION").ok(),
            )?;
            Ok(loading::create_session(client, auth, interface, poll))
        }
        _ => Err(Error::new(
            ErrorKind::InvalidInput,
            format!("Unsupported authentication type: {}", auth_type),
        )),
    }
}

/// Create a `Session` from environment variables.
///
/// Recognized variables:
///
/// * `RAX_CONFIG`: path to a configuration file (see [from_config](fn.from_config.html)),
///   all other variables are ignored when it is set;
/// * `RAX_AUTH_TYPE`: `rackspace` (the default) or `none`;
/// * `RAX_AUTH_URL`: identity URL, defaults to the Rackspace identity service;
/// * `RAX_USERNAME` and either `RAX_API_KEY` or `RAX_PASSWORD`: credentials;
/// * `RAX_REGION`: region, defaults to `DFW`;
/// * `RAX_ENDPOINT`: fixed endpoint for `RAX_AUTH_TYPE=none`;
/// * `RAX_INTERFACE`: `public` (the default) or `internal`;
/// * `RAX_CACERT`: path to an additional CA certificate;
/// * `RAX_DNS_TIMEOUT` and `RAX_DNS_DELAY`: polling timeout and delay in seconds.
///
/// No requests are made, authentication happens on the first request.
pub fn from_env() -> Result<Session, Error> {
    _from_env(RealEnvironment)
}

#[cfg(test)]
pub mod test {
    use std::collections::HashMap;
    use std::time::Duration;

    use maplit::hashmap;

    use super::{Environment, _from_env};
    use crate::{Error, ErrorKind, InterfaceType};

    impl Environment for HashMap<&'static str, &'static str> {
        fn get(&self, name: &'static str) -> Result<String, Error> {
            self.get(name)
                .cloned()
                .map(From::from)
                .ok_or_else(|| Error::new(ErrorKind::InvalidInput, name))
        }
    }

    #[test]
    fn test_api_key() {
        let env = hashmap! {
            "RAX_USERNAME" => "admin",
            "RAX_API_KEY" => "0123456789abcdef",
        };

        let session = _from_env(env).unwrap();
        assert_eq!(session.endpoint_filters().interface, InterfaceType::Public);
        assert_eq!(session.poll_settings().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_password_with_auth_url() {
        let env = hashmap! {
            "RAX_AUTH_URL" => "http://127.0.0.1:5000/v2.0",
            "RAX_USERNAME" => "admin",
            "RAX_PASSWORD" => "password",
            "RAX_REGION" => "ORD",
        };

        let _session = _from_env(env).unwrap();
    }

    #[test]
    fn test_missing_secret() {
        let env = hashmap! {
            "RAX_USERNAME" => "admin",
        };

        let err = _from_env(env).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_missing_username() {
        let env = hashmap! {
            "RAX_API_KEY" => "0123456789abcdef",
        };

        let err = _from_env(env).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_interface_and_polling() {
        let env = hashmap! {
            "RAX_USERNAME" => "admin",
            "RAX_API_KEY" => "0123456789abcdef",
            "RAX_INTERFACE" => "internal",
            "RAX_DNS_TIMEOUT" => "30",
            "RAX_DNS_DELAY" => "0.5",
        };

        let session = _from_env(env).unwrap();
        assert_eq!(session.endpoint_filters().interface, InterfaceType::Internal);
        assert_eq!(session.poll_settings().timeout, Duration::from_secs(30));
        assert_eq!(session.poll_settings().delay, Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_timeout() {
        let env = hashmap! {
            "RAX_USERNAME" => "admin",
            "RAX_API_KEY" => "0123456789abcdef",
            "RAX_DNS_TIMEOUT" => "forever",
        };

        let err = _from_env(env).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn test_none() {
        let env = hashmap! {
            "RAX_AUTH_TYPE" => "none",
            "RAX_ENDPOINT" => "http://127.0.0.1/v1.0/1234",
        };

        let _session = _from_env(env).unwrap();
    }

    #[test]
    fn test_none_without_endpoint() {
        let env = hashmap! {
            "RAX_AUTH_TYPE" => "none",
        };

        let err = _from_env(env).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_unsupported_auth_type() {
        let env = hashmap! {
            "RAX_AUTH_TYPE" => "v3token",
        };

        let err = _from_env(env).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_config_file_missing() {
        let env = hashmap! {
            "RAX_CONFIG" => "/I/do/not/exist.yaml",
            "RAX_USERNAME" => "admin",
            "RAX_API_KEY" => "0123456789abcdef",
        };

        let err = _from_env(env).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }
}
