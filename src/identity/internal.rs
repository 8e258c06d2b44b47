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

//! Internal implementation of the identity authentication.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use chrono::{Duration, Local};
use log::{debug, trace};
use reqwest::header::USER_AGENT;
use reqwest::{Client, RequestBuilder, Url};
use tokio::sync::{RwLock, RwLockReadGuard};

use super::protocol::{self, AuthRoot};
use super::TOKEN_MIN_VALIDITY;
use crate::client::check;
use crate::{catalog, EndpointFilters, Error, ErrorKind};

/// Authentication token with its service catalog.
#[derive(Clone)]
pub(crate) struct Token {
    value: String,
    body: protocol::Access,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut hasher = DefaultHasher::new();
        self.value.hash(&mut hasher);
        write!(
            f,
            "Token {{ value: hash({}), expires: {}, catalog: {:?} }}",
            hasher.finish(),
            self.body.token.expires,
            self.body.catalog
        )
    }
}

/// Internal identity authentication object.
#[derive(Debug)]
pub(crate) struct Internal {
    auth_url: Url,
    body: AuthRoot,
    token_endpoint: String,
    cached_token: RwLock<Option<Token>>,
    pub filters: EndpointFilters,
}

impl Internal {
    /// Create a new implementation.
    pub fn new(mut auth_url: Url, body: AuthRoot) -> Result<Internal, Error> {
        let _ = auth_url
            .path_segments_mut()
            .map_err(|_| Error::new(ErrorKind::InvalidConfig, "Invalid auth_url: wrong schema?"))?
            .pop_if_empty();

        let base = auth_url.as_str().trim_end_matches('/');
        let token_endpoint = if base.ends_with("/v2.0") {
            format!("{}/tokens", base)
        } else {
            format!("{}/v2.0/tokens", base)
        };

        Ok(Internal {
            auth_url,
            body,
            token_endpoint,
            cached_token: RwLock::new(None),
            filters: EndpointFilters::default(),
        })
    }

    /// Access to the auth URL.
    #[inline]
    pub fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    /// Access to the cached token.
    async fn cached_token(&self, client: &Client) -> Result<RwLockReadGuard<'_, Token>, Error> {
        self.refresh(client, false).await?;
        let guard = self.cached_token.read().await;
        RwLockReadGuard::try_map(guard, |opt| opt.as_ref()).map_err(|_| {
            Error::new(
                ErrorKind::AuthenticationFailed,
                "Token was not populated after refreshing",
            )
        })
    }

    /// Get a URL for the requested service.
    pub async fn get_endpoint(
        &self,
        client: &Client,
        service_type: &str,
        filters: &EndpointFilters,
    ) -> Result<Url, Error> {
        let real_filters = filters.clone().with_defaults(&self.filters);
        debug!(
            "Requesting a catalog endpoint for service '{}', filters {:?}",
            service_type, real_filters
        );
        let token = self.cached_token(client).await?;
        catalog::extract_url(&token.body.catalog, service_type, &real_filters)
    }

    /// Get the authentication token string.
    #[inline]
    pub async fn get_token(&self, client: &Client) -> Result<String, Error> {
        let token = self.cached_token(client).await?;
        Ok(token.value.clone())
    }

    /// Get the tenant ID the token is scoped to (if any).
    pub async fn get_tenant_id(&self, client: &Client) -> Result<Option<String>, Error> {
        let token = self.cached_token(client).await?;
        Ok(token.body.token.tenant.as_ref().map(|t| t.id.clone()))
    }

    /// User name.
    #[inline]
    pub fn user_name(&self) -> &str {
        match self.body.auth {
            protocol::Auth::ApiKey(ref creds) => &creds.username,
            protocol::Auth::Password(ref creds) => &creds.username,
        }
    }

    /// Refresh the token (if needed or forced).
    pub async fn refresh(&self, client: &Client, force: bool) -> Result<(), Error> {
        // This is executed every request at least once, so it's important to start with a read
        // lock. We expect to hit this branch most of the time.
        if !force && token_alive(&self.cached_token.read().await) {
            return Ok(());
        }

        let mut lock = self.cached_token.write().await;
        // Additonal check in case another thread has updated the token while we were waiting for
        // the write lock.
        if !force && token_alive(&lock) {
            return Ok(());
        }

        trace!("Requesting a new token from {}", self.token_endpoint);
        let resp = client
            .post(&self.token_endpoint)
            .header(USER_AGENT, crate::USER_AGENT)
            .json(&self.body)
            .send()
            .await?;
        let root = check(resp).await?.json::<protocol::AccessRoot>().await?;
        debug!("Received a token expiring at {}", root.access.token.expires);
        trace!("Received catalog: {:?}", root.access.catalog);
        *lock = Some(Token {
            value: root.access.token.id.clone(),
            body: root.access,
        });
        Ok(())
    }

    /// Authenticate a request.
    pub async fn authenticate(
        &self,
        client: &Client,
        request: RequestBuilder,
    ) -> Result<RequestBuilder, Error> {
        let token = self.get_token(client).await?;
        Ok(request.header("x-auth-token", token))
    }

    #[cfg(test)]
    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint
    }
}

impl Clone for Internal {
    fn clone(&self) -> Internal {
        Internal {
            auth_url: self.auth_url.clone(),
            body: self.body.clone(),
            token_endpoint: self.token_endpoint.clone(),
            cached_token: RwLock::new(None),
            filters: self.filters.clone(),
        }
    }
}

#[inline]
fn token_alive(token: &impl Deref<Target = Option<Token>>) -> bool {
    if let Some(value) = token.deref() {
        let validity_time_left = value
            .body
            .token
            .expires
            .signed_duration_since(Local::now());
        trace!("Token is valid for {:?}", validity_time_left);
        validity_time_left > Duration::minutes(TOKEN_MIN_VALIDITY)
    } else {
        false
    }
}
