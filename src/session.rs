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

//! Session structure definition.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::trace;
use reqwest::{Client, Method, Url};
use static_assertions::assert_impl_all;

use super::cache::EndpointCache;
use super::client::{AuthenticatedClient, RequestBuilder};
use super::loading;
use super::services::ServiceType;
use super::url;
use super::{AuthType, EndpointFilters, Error, InterfaceType};

/// Default time to wait for an asynchronous job.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for polling asynchronous jobs.
///
/// With a zero `delay` the status is requested again as soon as the previous response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PollSettings {
    /// Wall-clock time after which polling stops.
    ///
    /// The deadline is checked before every status request, so a zero timeout returns the job
    /// from the initial response without polling.
    pub timeout: Duration,
    /// Pause between two status requests.
    pub delay: Duration,
}

impl Default for PollSettings {
    fn default() -> PollSettings {
        PollSettings {
            timeout: DEFAULT_POLL_TIMEOUT,
            delay: Duration::ZERO,
        }
    }
}

impl PollSettings {
    /// Create poll settings.
    #[inline]
    pub fn new(timeout: Duration, delay: Duration) -> PollSettings {
        PollSettings { timeout, delay }
    }

    /// Change the timeout.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> PollSettings {
        self.timeout = timeout;
        self
    }

    /// Change the delay between polls.
    #[inline]
    pub fn with_delay(mut self, delay: Duration) -> PollSettings {
        self.delay = delay;
        self
    }
}

/// A Rackspace API session.
///
/// The session object serves as a wrapper around an [authentication type](trait.AuthType.html),
/// providing convenient methods to make HTTP requests to services from the catalog. It is
/// passed explicitly to everything that talks to the cloud.
///
/// ```rust,no_run
/// # async fn example() -> Result<(), raxdns::Error> {
/// let auth = raxdns::identity::ApiKey::new(
///     raxdns::identity::DEFAULT_AUTH_URL,
///     "demoauthor",
///     "0123456789abcdef",
/// )?;
/// let session = raxdns::Session::new(auth).await?;
/// let limits: serde_json::Value = session
///     .get(raxdns::services::CLOUD_DNS, &["limits"])
///     .await?
///     .fetch_json()
///     .await?;
/// # Ok(()) }
/// ```
///
/// # Note
///
/// All clones of one session share the same authentication and endpoint cache. Changing
/// endpoint filters or overrides detaches the endpoint cache of this session.
#[derive(Debug, Clone)]
pub struct Session {
    client: AuthenticatedClient,
    endpoint_cache: Arc<EndpointCache>,
    poll: PollSettings,
}

assert_impl_all!(Session: Send, Sync);

impl Session {
    /// Create a new session with a given authentication plugin.
    ///
    /// The resulting session will use the public interface and the default region of the
    /// authentication plugin.
    pub async fn new<Auth: AuthType + 'static>(auth_type: Auth) -> Result<Session, Error> {
        let client = loading::get_client(None)?;
        Session::new_with_client(client, auth_type).await
    }

    /// Create a new session with a given authenticated client.
    pub fn new_with_authenticated_client(client: AuthenticatedClient) -> Session {
        Session {
            client,
            endpoint_cache: Arc::new(EndpointCache::new()),
            poll: PollSettings::default(),
        }
    }

    /// Create a new session with a given authentication plugin and an HTTP client.
    pub async fn new_with_client<Auth: AuthType + 'static>(
        client: Client,
        auth_type: Auth,
    ) -> Result<Session, Error> {
        Ok(Session::new_with_authenticated_client(
            AuthenticatedClient::new(client, auth_type).await?,
        ))
    }

    /// Create a `Session` from the `RAX_*` environment variables.
    ///
    /// See [loading::from_env](loading/fn.from_env.html) for the supported variables.
    pub async fn from_env() -> Result<Session, Error> {
        let session = loading::from_env()?;
        session.refresh().await?;
        Ok(session)
    }

    /// Create a `Session` from a YAML configuration file.
    ///
    /// See [loading::from_config](loading/fn.from_config.html) for the file format.
    pub async fn from_config<P: AsRef<Path>>(path: P) -> Result<Session, Error> {
        let session = loading::from_config(path)?;
        session.refresh().await?;
        Ok(session)
    }

    /// Get a reference to the authentication type in use.
    #[inline]
    pub fn auth_type(&self) -> &dyn AuthType {
        self.client.auth_type()
    }

    /// Get a reference to the authenticated client in use.
    #[inline]
    pub fn client(&self) -> &AuthenticatedClient {
        &self.client
    }

    /// Endpoint filters in use.
    #[inline]
    pub fn endpoint_filters(&self) -> &EndpointFilters {
        &self.endpoint_cache.filters
    }

    /// Modify endpoint filters.
    ///
    /// This call clears the cached endpoints for this `Session`. It does not, however, affect
    /// clones of this `Session`.
    #[inline]
    pub fn endpoint_filters_mut(&mut self) -> &mut EndpointFilters {
        &mut self.reset_cache().filters
    }

    /// Endpoint overrides in use.
    #[inline]
    pub fn endpoint_overrides(&self) -> &HashMap<String, Url> {
        &self.endpoint_cache.overrides
    }

    /// Modify endpoint overrides.
    ///
    /// This call clears the cached endpoints for this `Session`. It does not, however, affect
    /// clones of this `Session`.
    #[inline]
    pub fn endpoint_overrides_mut(&mut self) -> &mut HashMap<String, Url> {
        &mut self.reset_cache().overrides
    }

    /// Poll settings for asynchronous jobs.
    #[inline]
    pub fn poll_settings(&self) -> PollSettings {
        self.poll
    }

    /// Update the authentication and purges cached endpoint information.
    ///
    /// # Warning
    ///
    /// Authentication will also be updated for clones of this `Session`, since they share the same
    /// authentication object.
    pub async fn refresh(&self) -> Result<(), Error> {
        self.client.refresh().await
    }

    /// Set a new authentication for this `Session`.
    ///
    /// This call clears the cached endpoints for this `Session`. It does not, however, affect
    /// clones of this `Session`.
    #[inline]
    pub fn set_auth_type<Auth: AuthType + 'static>(&mut self, auth_type: Auth) {
        let _ = self.reset_cache();
        self.client.set_auth_type(auth_type);
    }

    /// Set endpoint filters.
    ///
    /// This call clears the cached endpoints for this `Session`. It does not, however, affect
    /// clones of this `Session`.
    #[inline]
    pub fn set_endpoint_filters(&mut self, filters: EndpointFilters) {
        self.reset_cache().filters = filters;
    }

    /// Set the endpoint interface (public or internal).
    #[inline]
    pub fn set_endpoint_interface(&mut self, interface: InterfaceType) {
        self.endpoint_filters_mut().set_interface(interface);
    }

    /// Set an override for the endpoint of the given service.
    #[inline]
    pub fn set_endpoint_override<Svc: ServiceType>(&mut self, service: Svc, url: Url) {
        let _ = self
            .endpoint_overrides_mut()
            .insert(service.catalog_type().to_string(), url);
    }

    /// Set the region to use.
    #[inline]
    pub fn set_region<S: Into<String>>(&mut self, region: S) {
        self.endpoint_filters_mut().set_region(region);
    }

    /// Set the poll settings for asynchronous jobs.
    #[inline]
    pub fn set_poll_settings(&mut self, poll: PollSettings) {
        self.poll = poll;
    }

    /// Convert this session into one using the given authentication.
    #[inline]
    pub fn with_auth_type<Auth: AuthType + 'static>(mut self, auth_method: Auth) -> Session {
        self.set_auth_type(auth_method);
        self
    }

    /// Convert this session into one using the given endpoint filters.
    #[inline]
    pub fn with_endpoint_filters(mut self, filters: EndpointFilters) -> Session {
        self.set_endpoint_filters(filters);
        self
    }

    /// Convert this session into one using the given endpoint interface.
    #[inline]
    pub fn with_endpoint_interface(mut self, interface: InterfaceType) -> Session {
        self.set_endpoint_interface(interface);
        self
    }

    /// Convert this session into one using the given endpoint override.
    #[inline]
    pub fn with_endpoint_override<Svc: ServiceType>(mut self, service: Svc, url: Url) -> Session {
        self.set_endpoint_override(service, url);
        self
    }

    /// Convert this session into one using the given region.
    #[inline]
    pub fn with_region<S: Into<String>>(mut self, region: S) -> Session {
        self.set_region(region);
        self
    }

    /// Convert this session into one using the given poll settings.
    #[inline]
    pub fn with_poll_settings(mut self, poll: PollSettings) -> Session {
        self.set_poll_settings(poll);
        self
    }

    /// Construct an endpoint for the given service from the path.
    ///
    /// You won't need to use this call most of the time, since all request calls can fetch the
    /// endpoint automatically.
    pub async fn get_endpoint<Srv, I>(&self, service: Srv, path: I) -> Result<Url, Error>
    where
        Srv: ServiceType + Send,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let endpoint = self
            .endpoint_cache
            .get_endpoint(&self.client, service)
            .await?;
        url::extend(endpoint, path)
    }

    /// Make an HTTP request to the given service.
    ///
    /// The `service` argument is an object implementing the
    /// [ServiceType](services/trait.ServiceType.html) trait. Some known service types are available
    /// in the [services](services/index.html) module.
    ///
    /// The `path` argument is a URL path without the service endpoint (e.g. `&["domains", "42"]`).
    ///
    /// This is the most generic call to make a request. You may prefer to use more specific `get`,
    /// `post`, `put` or `delete` calls instead.
    pub async fn request<Srv, I>(
        &self,
        service: Srv,
        method: Method,
        path: I,
    ) -> Result<RequestBuilder, Error>
    where
        Srv: ServiceType + Send,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let url = self.get_endpoint(service, path).await?;
        trace!("Sending HTTP {} request to {}", method, url);
        Ok(self.client.request(method, url))
    }

    /// Start an authenticated request to an absolute URL.
    ///
    /// Useful for following links returned by services.
    #[inline]
    pub fn request_url(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Start a GET request.
    #[inline]
    pub async fn get<Srv, I>(&self, service: Srv, path: I) -> Result<RequestBuilder, Error>
    where
        Srv: ServiceType + Send,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.request(service, Method::GET, path).await
    }

    /// Start a POST request.
    #[inline]
    pub async fn post<Srv, I>(&self, service: Srv, path: I) -> Result<RequestBuilder, Error>
    where
        Srv: ServiceType + Send,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.request(service, Method::POST, path).await
    }

    /// Start a PUT request.
    #[inline]
    pub async fn put<Srv, I>(&self, service: Srv, path: I) -> Result<RequestBuilder, Error>
    where
        Srv: ServiceType + Send,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.request(service, Method::PUT, path).await
    }

    /// Start a DELETE request.
    #[inline]
    pub async fn delete<Srv, I>(&self, service: Srv, path: I) -> Result<RequestBuilder, Error>
    where
        Srv: ServiceType + Send,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.request(service, Method::DELETE, path).await
    }

    #[inline]
    fn reset_cache(&mut self) -> &mut EndpointCache {
        let cache = Arc::make_mut(&mut self.endpoint_cache);
        let _ = cache.clear();
        cache
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::time::Duration;

    use reqwest::{Client, Url};
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{PollSettings, Session};
    use crate::services::{CLOUD_DNS, COMPUTE};
    use crate::{InterfaceType, NoAuth};

    pub async fn new_session(url: &str) -> Session {
        Session::new_with_client(Client::new(), NoAuth::new(url).unwrap())
            .await
            .unwrap()
    }

    #[test]
    fn test_poll_settings_default() {
        let poll = PollSettings::default();
        assert_eq!(poll.timeout, Duration::from_secs(5));
        assert_eq!(poll.delay, Duration::ZERO);
        let poll = poll.with_delay(Duration::from_millis(500));
        assert_eq!(poll.delay, Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_get_endpoint() {
        let s = new_session("http://127.0.0.1/v1.0/1234/").await;
        let ep = s
            .get_endpoint(CLOUD_DNS, &["domains", "42"])
            .await
            .unwrap();
        assert_eq!(ep.as_str(), "http://127.0.0.1/v1.0/1234/domains/42");
        let ep = s.get_endpoint(CLOUD_DNS, Vec::<String>::new()).await.unwrap();
        assert_eq!(ep.as_str(), "http://127.0.0.1/v1.0/1234");
    }

    #[tokio::test]
    async fn test_endpoint_override() {
        let s = new_session("http://127.0.0.1/v1.0/1234")
            .await
            .with_endpoint_override(CLOUD_DNS, Url::parse("http://dns.local/v1.0/1").unwrap());
        let ep = s.get_endpoint(CLOUD_DNS, &["limits"]).await.unwrap();
        assert_eq!(ep.as_str(), "http://dns.local/v1.0/1/limits");
        let ep = s.get_endpoint(COMPUTE, &["servers"]).await.unwrap();
        assert_eq!(ep.as_str(), "http://127.0.0.1/v1.0/1234/servers");
    }

    #[tokio::test]
    async fn test_filters() {
        let s = new_session("http://127.0.0.1")
            .await
            .with_region("LON")
            .with_endpoint_interface(InterfaceType::Internal);
        assert_eq!(s.endpoint_filters().region.as_deref(), Some("LON"));
        assert_eq!(s.endpoint_filters().interface, InterfaceType::Internal);
        let copy = s.clone().with_region("SYD");
        assert_eq!(s.endpoint_filters().region.as_deref(), Some("LON"));
        assert_eq!(copy.endpoint_filters().region.as_deref(), Some("SYD"));
    }

    #[tokio::test]
    async fn test_get_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/limits"))
            .and(header("user-agent", crate::USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"limits": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let s = new_session(&format!("{}/v1.0/1234", server.uri())).await;
        let value: Value = s
            .get(CLOUD_DNS, &["limits"])
            .await
            .unwrap()
            .fetch_json()
            .await
            .unwrap();
        assert_eq!(value, json!({"limits": {}}));
    }
}
