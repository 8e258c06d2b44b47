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

//! Domains management.

use async_trait::async_trait;
#[cfg(feature = "stream")]
use futures::Stream;
use log::debug;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::asyncjob::AsyncRequest;
use super::protocol::{
    Domain, DomainCreate, DomainExport, DomainId, DomainImport, DomainQuery, DomainUpdate,
    DomainsCreateRoot, DomainsImportRoot, DomainsRoot, ZoneFormat,
};
use crate::resource::{Create, Delete, Get, List};
use crate::services::CLOUD_DNS;
use crate::{Error, ErrorKind, Session};

/// Manager of DNS domains.
#[derive(Debug, Clone)]
pub struct DomainManager {
    session: Session,
}

pub(crate) fn from_response<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| {
        Error::new(
            ErrorKind::InvalidResponse,
            format!("Unexpected job response: {}", e),
        )
    })
}

fn first_domain(root: DomainsRoot) -> Result<Domain, Error> {
    root.domains.into_iter().next().ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidResponse,
            "Job response does not contain a domain",
        )
    })
}

impl DomainManager {
    pub(crate) fn new(session: Session) -> DomainManager {
        DomainManager { session }
    }

    /// List domains.
    ///
    /// Returns one page of domains, use `limit` and `offset` in the query to get more.
    pub async fn list(&self, query: DomainQuery) -> Result<Vec<Domain>, Error> {
        debug!("Listing domains with {:?}", query);
        let root: DomainsRoot = self
            .session
            .get(CLOUD_DNS, &["domains"])
            .await?
            .query(&query)
            .fetch_json()
            .await?;
        Ok(root.domains)
    }

    /// List all domains, following the pagination links.
    ///
    /// Note that the pages after the first one are requested only on iteration.
    #[cfg(feature = "stream")]
    pub async fn list_all(
        &self,
        query: DomainQuery,
    ) -> Result<impl Stream<Item = Result<Domain, Error>>, Error> {
        Ok(self
            .session
            .get(CLOUD_DNS, &["domains"])
            .await?
            .query(&query)
            .fetch_json_paginated::<Domain>())
    }

    /// Find a domain by its exact name.
    ///
    /// Fails with `ResourceNotFound` if there is no such domain and with `TooManyItems` if the
    /// name is ambiguous.
    pub async fn find_by_name<S: AsRef<str>>(&self, name: S) -> Result<Domain, Error> {
        let name = name.as_ref();
        let mut found = self
            .list(DomainQuery::default().with_name(name))
            .await?
            .into_iter()
            .filter(|d| d.name.eq_ignore_ascii_case(name))
            .collect::<Vec<_>>();
        match found.len() {
            0 => Err(Error::new(
                ErrorKind::ResourceNotFound,
                format!("No domain with name {}", name),
            )),
            1 => Ok(found.remove(0)),
            _ => Err(Error::new(
                ErrorKind::TooManyItems,
                format!("More than one domain with name {}", name),
            )),
        }
    }

    /// Get a domain with its records.
    pub async fn get<I: Into<DomainId>>(&self, id: I) -> Result<Domain, Error> {
        let id = id.into();
        self.session
            .get(CLOUD_DNS, &["domains", id.as_str()])
            .await?
            .query(&[("showRecords", "true"), ("showSubdomains", "false")])
            .fetch_json()
            .await
    }

    /// List subdomains of a domain.
    pub async fn subdomains<I: Into<DomainId>>(&self, id: I) -> Result<Vec<Domain>, Error> {
        let id = id.into();
        let root: DomainsRoot = self
            .session
            .get(CLOUD_DNS, &["domains", id.as_str(), "subdomains"])
            .await?
            .fetch_json()
            .await?;
        Ok(root.domains)
    }

    /// Create a domain and wait for the result.
    pub async fn create(&self, spec: DomainCreate) -> Result<Domain, Error> {
        debug!("Creating domain {}", spec.name);
        let response = AsyncRequest::new(&self.session, Method::POST, &["domains"])
            .json(&DomainsCreateRoot::from(&spec))?
            .error_kind(ErrorKind::DomainCreationFailed)
            .submit()
            .await?
            .into_response(ErrorKind::DomainCreationFailed)?;
        first_domain(from_response(response)?)
    }

    /// Update a domain and wait for the result.
    pub async fn update<I: Into<DomainId>>(&self, id: I, update: DomainUpdate) -> Result<(), Error> {
        let id = id.into();
        debug!("Updating domain {} with {:?}", id, update);
        let _ = AsyncRequest::new(&self.session, Method::PUT, &["domains", id.as_str()])
            .json(&update)?
            .error_kind(ErrorKind::DomainUpdateFailed)
            .submit()
            .await?
            .into_response(ErrorKind::DomainUpdateFailed)?;
        Ok(())
    }

    /// Delete a domain, optionally with its subdomains, and wait for the result.
    pub async fn delete<I: Into<DomainId>>(
        &self,
        id: I,
        delete_subdomains: bool,
    ) -> Result<(), Error> {
        let id = id.into();
        debug!("Deleting domain {}", id);
        let mut request = AsyncRequest::new(&self.session, Method::DELETE, &["domains", id.as_str()])
            .error_kind(ErrorKind::DomainDeletionFailed);
        if delete_subdomains {
            request = request.query("deleteSubdomains", true);
        }
        let _ = request
            .submit()
            .await?
            .into_response(ErrorKind::DomainDeletionFailed)?;
        Ok(())
    }

    /// Import a domain from a zone file.
    pub async fn import<S: AsRef<str>>(
        &self,
        contents: S,
        format: ZoneFormat,
    ) -> Result<Domain, Error> {
        let body = DomainsImportRoot {
            domains: [DomainImport {
                content_type: format,
                contents: contents.as_ref(),
            }],
        };
        let response = AsyncRequest::new(&self.session, Method::POST, &["domains", "import"])
            .json(&body)?
            .error_kind(ErrorKind::DomainCreationFailed)
            .submit()
            .await?
            .into_response(ErrorKind::DomainCreationFailed)?;
        first_domain(from_response(response)?)
    }

    /// Export a domain as a zone file.
    pub async fn export<I: Into<DomainId>>(&self, id: I) -> Result<DomainExport, Error> {
        let id = id.into();
        let response =
            AsyncRequest::new(&self.session, Method::GET, &["domains", id.as_str(), "export"])
                .error_kind(ErrorKind::OperationFailed)
                .submit()
                .await?
                .into_response(ErrorKind::OperationFailed)?;
        from_response(response)
    }
}

#[async_trait]
impl Create for DomainManager {
    type Spec = DomainCreate;
    type Item = Domain;

    async fn create(&self, spec: DomainCreate) -> Result<Domain, Error> {
        DomainManager::create(self, spec).await
    }
}

#[async_trait]
impl Get for DomainManager {
    type Id = DomainId;
    type Item = Domain;

    async fn get(&self, id: DomainId) -> Result<Domain, Error> {
        DomainManager::get(self, id).await
    }
}

#[async_trait]
impl List for DomainManager {
    type Item = Domain;
    type Query = DomainQuery;

    async fn list(&self, query: DomainQuery) -> Result<Vec<Domain>, Error> {
        DomainManager::list(self, query).await
    }
}

#[async_trait]
impl Delete for DomainManager {
    type Id = DomainId;

    /// Delete a domain without its subdomains.
    async fn delete(&self, id: DomainId) -> Result<(), Error> {
        DomainManager::delete(self, id, false).await
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::DomainManager;
    use crate::dns::{DomainCreate, DomainQuery, DomainUpdate, ZoneFormat};
    use crate::resource::{Delete, Get};
    use crate::session::test::new_session;
    use crate::ErrorKind;

    fn domain(id: u64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "accountId": 1234,
            "emailAddress": "me@example.com",
            "created": "2012-09-21T21:32:27.000+0000",
            "updated": "2012-09-21T21:35:45.000+0000"
        })
    }

    async fn manager(server: &MockServer) -> DomainManager {
        DomainManager::new(new_session(&format!("{}/v1.0/1234", server.uri())).await)
    }

    async fn job_done(server: &MockServer, response: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/status/job-1"))
            .and(query_param("showDetails", "true"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "COMPLETED", "response": response})),
            )
            .mount(server)
            .await;
    }

    fn job_started(server: &MockServer) -> ResponseTemplate {
        ResponseTemplate::new(202).set_body_json(json!({
            "jobId": "job-1",
            "status": "RUNNING",
            "callbackUrl": format!("{}/v1.0/1234/status/job-1", server.uri())
        }))
    }

    #[tokio::test]
    async fn test_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/domains"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "domains": [domain(1, "a.com"), domain(2, "b.com")],
                "totalEntries": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        let domains = manager(&server)
            .await
            .list(DomainQuery::default().with_limit(2))
            .await
            .unwrap();
        assert_eq!(domains.len(), 2);
        assert_eq!(domains[1].name, "b.com");
        assert_eq!(domains[1].id, "2");
    }

    #[cfg(feature = "stream")]
    #[tokio::test]
    async fn test_list_all() {
        use futures::pin_mut;
        use futures::stream::TryStreamExt;

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/domains"))
            .and(query_param("offset", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "domains": [domain(3, "c.com")],
                "totalEntries": 3,
                "links": [{
                    "href": format!("{}/v1.0/1234/domains?limit=2&offset=0", server.uri()),
                    "rel": "previous"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/domains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "domains": [domain(1, "a.com"), domain(2, "b.com")],
                "totalEntries": 3,
                "links": [{
                    "href": format!("{}/v1.0/1234/domains?limit=2&offset=2", server.uri()),
                    "rel": "next"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mgr = manager(&server).await;
        let stream = mgr
            .list_all(DomainQuery::default().with_limit(2))
            .await
            .unwrap();
        pin_mut!(stream);
        let names = stream
            .map_ok(|d| d.name)
            .try_collect::<Vec<_>>()
            .await
            .unwrap();
        assert_eq!(names, vec!["a.com", "b.com", "c.com"]);
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/domains"))
            .and(query_param("name", "fake.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "domains": [domain(1, "fake.com"), domain(2, "sub.fake.com")]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/domains"))
            .and(query_param("name", "missing.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"domains": []})))
            .mount(&server)
            .await;

        let mgr = manager(&server).await;
        let found = mgr.find_by_name("fake.com").await.unwrap();
        assert_eq!(found.id, "1");
        let err = mgr.find_by_name("missing.com").await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
    }

    #[tokio::test]
    async fn test_get() {
        let server = MockServer::start().await;
        let mut body = domain(42, "example.com");
        body["recordsList"] = json!({"records": [{
            "id": "A-1", "name": "example.com", "type": "A", "data": "192.0.2.1", "ttl": 300
        }]});
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/domains/42"))
            .and(query_param("showRecords", "true"))
            .and(query_param("showSubdomains", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let mgr = manager(&server).await;
        let found = Get::get(&mgr, "42".into()).await.unwrap();
        assert_eq!(found.name, "example.com");
        assert_eq!(found.records().len(), 1);
        assert_eq!(found.records()[0].data, "192.0.2.1");
    }

    #[tokio::test]
    async fn test_create() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1.0/1234/domains"))
            .and(body_json(json!({"domains": [{
                "name": "example.com",
                "emailAddress": "me@example.com",
                "ttl": 3600
            }]})))
            .respond_with(job_started(&server))
            .expect(1)
            .mount(&server)
            .await;
        job_done(&server, json!({"domains": [domain(3448214, "example.com")]})).await;

        let created = manager(&server)
            .await
            .create(DomainCreate::new("example.com", "me@example.com"))
            .await
            .unwrap();
        assert_eq!(created.id, "3448214");
        assert_eq!(created.email_address.as_deref(), Some("me@example.com"));
    }

    #[tokio::test]
    async fn test_create_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1.0/1234/domains"))
            .respond_with(job_started(&server))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/status/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ERROR",
                "error": {"details": "fail", "code": 666}
            })))
            .mount(&server)
            .await;

        let err = manager(&server)
            .await
            .create(DomainCreate::new("fake", "me@example.com"))
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::DomainCreationFailed);
        assert_eq!(err.message(), Some("fail (666)"));
    }

    #[tokio::test]
    async fn test_update() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1.0/1234/domains/42"))
            .and(body_json(json!({"comment": "updated", "ttl": 600})))
            .respond_with(job_started(&server))
            .expect(1)
            .mount(&server)
            .await;
        job_done(&server, serde_json::Value::Null).await;

        let update = DomainUpdate {
            ttl: Some(600),
            comment: Some("updated".into()),
            ..DomainUpdate::default()
        };
        manager(&server).await.update("42", update).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1.0/1234/domains/42"))
            .and(query_param("deleteSubdomains", "true"))
            .respond_with(job_started(&server))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v1.0/1234/domains/43"))
            .respond_with(job_started(&server))
            .expect(1)
            .mount(&server)
            .await;
        job_done(&server, serde_json::Value::Null).await;

        let mgr = manager(&server).await;
        mgr.delete("42", true).await.unwrap();
        Delete::delete(&mgr, "43".into()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let plain = requests
            .iter()
            .find(|r| r.url.path() == "/v1.0/1234/domains/43")
            .unwrap();
        assert!(plain.url.query().is_none());
    }

    #[tokio::test]
    async fn test_import() {
        let server = MockServer::start().await;
        let zone = "example.com. 3600 IN SOA ns.rackspace.com. me.example.com. 1 21600 3600 1814400 500";
        Mock::given(method("POST"))
            .and(path("/v1.0/1234/domains/import"))
            .and(body_json(json!({"domains": [{
                "contentType": "BIND_9",
                "contents": zone
            }]})))
            .respond_with(job_started(&server))
            .expect(1)
            .mount(&server)
            .await;
        job_done(&server, json!({"domains": [domain(7, "example.com")]})).await;

        let imported = manager(&server)
            .await
            .import(zone, ZoneFormat::Bind9)
            .await
            .unwrap();
        assert_eq!(imported.id, "7");
    }

    #[tokio::test]
    async fn test_export() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/domains/42/export"))
            .respond_with(job_started(&server))
            .expect(1)
            .mount(&server)
            .await;
        job_done(
            &server,
            json!({"id": 42, "accountId": 1234, "contentType": "BIND_9", "contents": "zone"}),
        )
        .await;

        let exported = manager(&server).await.export("42").await.unwrap();
        assert_eq!(exported.content_type, ZoneFormat::Bind9);
        assert_eq!(exported.contents, "zone");
    }
}
