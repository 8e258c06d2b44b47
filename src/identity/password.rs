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

//! Password authentication.

use async_trait::async_trait;
use reqwest::{Client, IntoUrl, RequestBuilder, Url};

use super::internal::Internal;
use super::protocol;
use super::Identity;
use crate::{AuthType, EndpointFilters, Error};

/// Password authentication using Identity API v2.0.
///
/// Works the same way as [ApiKey](struct.ApiKey.html), but uses the account password:
///
/// ```rust,no_run
/// # async fn example() -> Result<(), raxdns::Error> {
/// let auth = raxdns::identity::Password::new(
///     raxdns::identity::DEFAULT_AUTH_URL,
///     "demoauthor",
///     "pa$$w0rd",
/// )?;
///
/// let session = raxdns::Session::new(auth).await?;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct Password {
    inner: Internal,
}

impl Identity for Password {
    fn auth_url(&self) -> &Url {
        self.inner.auth_url()
    }
}

impl Password {
    /// Create a password authentication.
    pub fn new<U, S1, S2>(auth_url: U, user_name: S1, password: S2) -> Result<Password, Error>
    where
        U: IntoUrl,
        S1: Into<String>,
        S2: Into<String>,
    {
        let body = protocol::AuthRoot {
            auth: protocol::Auth::Password(protocol::PasswordCredentials {
                username: user_name.into(),
                password: password.into(),
            }),
        };
        Ok(Password {
            inner: Internal::new(auth_url.into_url()?, body)?,
        })
    }

    /// Set the default region.
    #[inline]
    pub fn set_region<S: Into<String>>(&mut self, region: S) {
        self.inner.filters.set_region(region);
    }

    /// Set the default region.
    #[inline]
    pub fn with_region<S: Into<String>>(mut self, region: S) -> Self {
        self.set_region(region);
        self
    }

    /// User name.
    #[inline]
    pub fn user_name(&self) -> &str {
        self.inner.user_name()
    }
}

#[async_trait]
impl AuthType for Password {
    /// Authenticate a request.
    async fn authenticate(
        &self,
        client: &Client,
        request: RequestBuilder,
    ) -> Result<RequestBuilder, Error> {
        self.inner.authenticate(client, request).await
    }

    /// Get a URL for the requested service.
    async fn get_endpoint(
        &self,
        client: &Client,
        service_type: &str,
        filters: &EndpointFilters,
    ) -> Result<Url, Error> {
        self.inner.get_endpoint(client, service_type, filters).await
    }

    /// Refresh the cached token and service catalog.
    async fn refresh(&self, client: &Client) -> Result<(), Error> {
        self.inner.refresh(client, true).await
    }
}

#[cfg(test)]
pub mod test {
    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::Password;
    use crate::identity::internal::test::token_response;
    use crate::identity::Identity;
    use crate::AuthType;

    #[test]
    fn test_identity_new() {
        let id = Password::new("http://127.0.0.1:8080/identity/v2.0/", "user", "pa$$w0rd").unwrap();
        assert_eq!(id.user_name(), "user");
        assert_eq!(id.auth_url().host_str(), Some("127.0.0.1"));
        assert_eq!(
            id.inner.token_endpoint(),
            "http://127.0.0.1:8080/identity/v2.0/tokens"
        );
    }

    #[tokio::test]
    async fn test_authenticate_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2.0/tokens"))
            .and(body_json(json!({"auth": {"passwordCredentials": {
                "username": "user",
                "password": "pa$$w0rd"
            }}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_response(
                "2099-01-01T00:00:00Z",
                "https://dns.local/v1.0/123456",
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("x-auth-token", "token-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new();
        let id = Password::new(server.uri(), "user", "pa$$w0rd").unwrap();
        id.refresh(&client).await.unwrap();
        let request = id
            .authenticate(&client, client.get(format!("{}/ping", server.uri())))
            .await
            .unwrap();
        let resp = request.send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 204);
    }
}
