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

//! Low-level authenticated client.

use std::collections::HashMap;
use std::convert::TryFrom;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "stream")]
use async_trait::async_trait;
#[cfg(feature = "stream")]
use futures::Stream;
use http::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use http::Error as HttpError;
use log::trace;
use reqwest::{Body, Client, Method, Request, RequestBuilder as HttpRequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use static_assertions::assert_eq_size;

#[cfg(feature = "stream")]
use super::stream::{paginated, FetchNext};
#[cfg(feature = "stream")]
pub use super::stream::{Page, PaginatedResource};
use super::{AuthType, EndpointFilters, Error, ErrorKind};

/// Authenticated HTTP client.
///
/// Uses `Arc` internally and should be reused when possible by cloning it.
#[derive(Debug, Clone)]
pub struct AuthenticatedClient {
    client: Client,
    auth: Arc<dyn AuthType>,
}

assert_eq_size!(AuthenticatedClient, Option<AuthenticatedClient>);

impl AuthenticatedClient {
    /// Create a new authenticated client.
    ///
    /// Authenticates immediately so that credential problems surface early.
    pub async fn new<Auth: AuthType + 'static>(
        client: Client,
        auth_type: Auth,
    ) -> Result<AuthenticatedClient, Error> {
        auth_type.refresh(&client).await?;
        Ok(AuthenticatedClient::new_internal(
            client,
            Arc::new(auth_type),
        ))
    }

    #[inline]
    pub(crate) fn new_internal(client: Client, auth: Arc<dyn AuthType>) -> AuthenticatedClient {
        AuthenticatedClient { client, auth }
    }

    /// Get a reference to the authentication type in use.
    #[inline]
    pub fn auth_type(&self) -> &dyn AuthType {
        self.auth.as_ref()
    }

    /// Authenticate a request.
    #[inline]
    async fn authenticate(&self, request: HttpRequestBuilder) -> Result<Request, Error> {
        self.auth
            .authenticate(&self.client, request)
            .await?
            .build()
            .map_err(Error::from)
    }

    /// Get a URL for the requested service.
    #[inline]
    pub async fn get_endpoint(
        &self,
        service_type: &str,
        filters: &EndpointFilters,
    ) -> Result<Url, Error> {
        self.auth
            .get_endpoint(&self.client, service_type, filters)
            .await
    }

    /// Get a reference to the inner (non-authenticated) client.
    #[inline]
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Update the authentication.
    ///
    /// # Warning
    ///
    /// Authentication will also be updated for clones of this client, since they share the same
    /// authentication object.
    #[inline]
    pub async fn refresh(&self) -> Result<(), Error> {
        self.auth.refresh(&self.client).await
    }

    /// Set a new authentication for this client.
    #[inline]
    pub fn set_auth_type<Auth: AuthType + 'static>(&mut self, auth_type: Auth) {
        self.auth = Arc::new(auth_type);
    }

    /// Start an authenticated request.
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        RequestBuilder {
            inner: self
                .client
                .request(method, url)
                .header(USER_AGENT, crate::USER_AGENT),
            client: self.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) async fn new_noauth(endpoint: &str) -> AuthenticatedClient {
        use crate::NoAuth;
        AuthenticatedClient::new(Client::new(), NoAuth::new(endpoint).unwrap())
            .await
            .unwrap()
    }
}

impl From<AuthenticatedClient> for Client {
    fn from(value: AuthenticatedClient) -> Client {
        value.client
    }
}

/// A request builder with error handling.
#[derive(Debug)]
#[must_use = "preparing a request is not enough to run it"]
pub struct RequestBuilder {
    inner: HttpRequestBuilder,
    client: AuthenticatedClient,
}

#[derive(Debug, Deserialize)]
struct Message {
    message: Option<String>,
    faultstring: Option<String>,
    title: Option<String>,
    details: Option<String>,
}

impl From<Message> for Option<String> {
    fn from(value: Message) -> Option<String> {
        let details = value.details.filter(|d| !d.is_empty());
        match (value.message.or(value.faultstring).or(value.title), details) {
            (Some(msg), Some(details)) if msg != details => Some(format!("{}: {}", msg, details)),
            (Some(msg), _) => Some(msg),
            (None, details) => details,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorResponse {
    Map(HashMap<String, Message>),
    Message(Message),
}

fn extract_message(text: String) -> String {
    serde_json::from_str::<ErrorResponse>(&text)
        .ok()
        .and_then(|body| match body {
            ErrorResponse::Map(map) => map.into_iter().next().and_then(|(_k, v)| v.into()),
            ErrorResponse::Message(msg) => msg.into(),
        })
        .unwrap_or(text)
}

/// Check for API errors in the response.
///
/// Client and server errors are converted into an [Error](../struct.Error.html) with the kind
/// derived from the status code and the message taken from the response body.
pub async fn check(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let message = extract_message(response.text().await?);
        trace!("HTTP request returned {}; error: {}", status, message);
        Err(Error::new(ErrorKind::from(status), message).with_status(status))
    } else {
        trace!(
            "HTTP request to {} returned {}",
            response.url(),
            response.status()
        );
        Ok(response)
    }
}

impl RequestBuilder {
    /// Add a body to the request.
    pub fn body<T: Into<Body>>(self, body: T) -> RequestBuilder {
        RequestBuilder {
            inner: self.inner.body(body),
            ..self
        }
    }

    /// Add a header to the request.
    pub fn header<K, V>(self, key: K, value: V) -> RequestBuilder
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<HttpError>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<HttpError>,
    {
        RequestBuilder {
            inner: self.inner.header(key, value),
            ..self
        }
    }

    /// Add headers to a request.
    pub fn headers(self, headers: HeaderMap) -> RequestBuilder {
        RequestBuilder {
            inner: self.inner.headers(headers),
            ..self
        }
    }

    /// Add a JSON body to the request.
    pub fn json<T: Serialize + ?Sized>(self, json: &T) -> RequestBuilder {
        RequestBuilder {
            inner: self.inner.json(json),
            ..self
        }
    }

    /// Send a query with the request.
    pub fn query<T: Serialize + ?Sized>(self, query: &T) -> RequestBuilder {
        RequestBuilder {
            inner: self.inner.query(query),
            ..self
        }
    }

    /// Override the timeout for the request.
    pub fn timeout(self, timeout: Duration) -> RequestBuilder {
        RequestBuilder {
            inner: self.inner.timeout(timeout),
            ..self
        }
    }

    /// Send the request and receive JSON in response.
    pub async fn fetch_json<T>(self) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
    {
        self.send().await?.json::<T>().await.map_err(Error::from)
    }

    /// Send the request and check for errors.
    pub async fn send(self) -> Result<Response, Error> {
        check(self.send_unchecked().await?).await
    }

    /// Send the request without checking for HTTP errors.
    pub async fn send_unchecked(self) -> Result<Response, Error> {
        let req = self.client.authenticate(self.inner).await?;
        trace!("Sending HTTP {} request to {}", req.method(), req.url());
        self.client.client.execute(req).await.map_err(Error::from)
    }

    /// Send the request and receive JSON in response with pagination.
    ///
    /// The first page is fetched with this request, the following pages are fetched by following
    /// the `next` links. Note that the actual requests will happen only on iteration over the
    /// results.
    ///
    /// Iteration fails with `InvalidInput` if the request builder has a streaming body.
    #[cfg(feature = "stream")]
    pub fn fetch_json_paginated<T>(self) -> impl Stream<Item = Result<T, Error>>
    where
        T: PaginatedResource + Unpin,
    {
        paginated(self)
    }

    /// Attempt to clone this request builder.
    pub fn try_clone(&self) -> Option<RequestBuilder> {
        self.inner.try_clone().map(|inner| RequestBuilder {
            inner,
            client: self.client.clone(),
        })
    }
}

#[cfg(feature = "stream")]
#[async_trait]
impl FetchNext for RequestBuilder {
    async fn fetch_next<T: DeserializeOwned + Send>(&self, next: Option<Url>) -> Result<T, Error> {
        let builder = match next {
            Some(url) => self.client.request(Method::GET, url),
            None => self.try_clone().ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidInput,
                    "Requests with a streaming body cannot be paginated",
                )
            })?,
        };
        builder.fetch_json().await
    }
}

#[cfg(test)]
mod test_request_builder {
    use http::Method;
    use reqwest::Url;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::AuthenticatedClient;
    use crate::ErrorKind;

    #[tokio::test]
    async fn test_fetch_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/limits"))
            .and(query_param("type", "RATE_LIMIT"))
            .and(header("x-custom", "yes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"limits": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthenticatedClient::new_noauth(&server.uri()).await;
        let url = Url::parse(&format!("{}/limits", server.uri())).unwrap();
        let value: Value = client
            .request(Method::GET, url)
            .query(&[("type", "RATE_LIMIT")])
            .header("x-custom", "yes")
            .fetch_json()
            .await
            .unwrap();
        assert_eq!(value, json!({"limits": {}}));
    }

    #[tokio::test]
    async fn test_send_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domains/42"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "itemNotFound": {"code": 404, "message": "Object not Found."}
            })))
            .mount(&server)
            .await;

        let client = AuthenticatedClient::new_noauth(&server.uri()).await;
        let url = Url::parse(&format!("{}/domains/42", server.uri())).unwrap();
        let err = client.request(Method::GET, url).send().await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
        assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
        assert_eq!(err.message(), Some("Object not Found."));
    }

    #[tokio::test]
    async fn test_send_unchecked() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/domains/42"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = AuthenticatedClient::new_noauth(&server.uri()).await;
        let url = Url::parse(&format!("{}/domains/42", server.uri())).unwrap();
        let resp = client
            .request(Method::DELETE, url)
            .send_unchecked()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 500);
    }

    #[tokio::test]
    async fn test_try_clone() {
        let client = AuthenticatedClient::new_noauth("http://127.0.0.1").await;
        let rb = client
            .request(Method::POST, Url::parse("http://127.0.0.1/domains").unwrap())
            .json(&json!({"domains": []}));
        assert!(rb.try_clone().is_some());
    }
}
