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

//! API key authentication.

use async_trait::async_trait;
use reqwest::{Client, IntoUrl, RequestBuilder, Url};

use super::internal::Internal;
use super::protocol;
use super::Identity;
use crate::{AuthType, EndpointFilters, Error};

/// API key authentication using Identity API v2.0.
///
/// This is the usual way to authenticate against the Rackspace cloud. You need to know the
/// `auth_url` (see [DEFAULT_AUTH_URL](constant.DEFAULT_AUTH_URL.html)), the user name and
/// the API key from the control panel.
///
/// ```rust,no_run
/// # async fn example() -> Result<(), raxdns::Error> {
/// let auth = raxdns::identity::ApiKey::new(
///     raxdns::identity::DEFAULT_AUTH_URL,
///     "demoauthor",
///     "0123456789abcdef",
/// )?
/// .with_region("ORD");
///
/// let session = raxdns::Session::new(auth).await?;
/// # Ok(()) }
/// ```
///
/// The authentication token is cached while it's still valid or until
/// [refresh](../trait.AuthType.html#tymethod.refresh) is called.
/// Clones of an `ApiKey` also start with an empty cache.
#[derive(Debug, Clone)]
pub struct ApiKey {
    inner: Internal,
}

impl Identity for ApiKey {
    fn auth_url(&self) -> &Url {
        self.inner.auth_url()
    }
}

impl ApiKey {
    /// Create an API key authentication.
    pub fn new<U, S1, S2>(auth_url: U, user_name: S1, api_key: S2) -> Result<ApiKey, Error>
    where
        U: IntoUrl,
        S1: Into<String>,
        S2: Into<String>,
    {
        let body = protocol::AuthRoot {
            auth: protocol::Auth::ApiKey(protocol::ApiKeyCredentials {
                username: user_name.into(),
                api_key: api_key.into(),
            }),
        };
        Ok(ApiKey {
            inner: Internal::new(auth_url.into_url()?, body)?,
        })
    }

    /// Default endpoint filters.
    ///
    /// Only the region is used as a default, the interface always comes from the session.
    #[inline]
    pub fn endpoint_filters(&self) -> &EndpointFilters {
        &self.inner.filters
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

    /// Tenant ID of the current token.
    ///
    /// Authenticates if needed.
    pub async fn tenant_id(&self, client: &Client) -> Result<Option<String>, Error> {
        self.inner.get_tenant_id(client).await
    }
}

#[async_trait]
impl AuthType for ApiKey {
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
