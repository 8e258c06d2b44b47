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

//! Records management.

use async_trait::async_trait;
#[cfg(feature = "stream")]
use futures::Stream;
use log::debug;
use reqwest::Method;

use super::asyncjob::AsyncRequest;
use super::domains::from_response;
use super::protocol::{
    DomainId, Record, RecordCreate, RecordId, RecordQuery, RecordType, RecordUpdate, RecordsRef,
    RecordsRoot,
};
use crate::resource::{Create, Delete, Get, List};
use crate::services::CLOUD_DNS;
use crate::{Error, ErrorKind, Session};

/// Manager of records of one domain.
#[derive(Debug, Clone)]
pub struct RecordManager {
    session: Session,
    domain: DomainId,
}

impl RecordManager {
    pub(crate) fn new(session: Session, domain: DomainId) -> RecordManager {
        RecordManager { session, domain }
    }

    /// ID of the domain the records belong to.
    #[inline]
    pub fn domain_id(&self) -> &DomainId {
        &self.domain
    }

    /// List records of the domain.
    pub async fn list(&self, query: RecordQuery) -> Result<Vec<Record>, Error> {
        debug!("Listing records of domain {} with {:?}", self.domain, query);
        let root: RecordsRoot = self
            .session
            .get(CLOUD_DNS, &["domains", self.domain.as_str(), "records"])
            .await?
            .query(&query)
            .fetch_json()
            .await?;
        Ok(root.records)
    }

    /// List all records of the domain, following the pagination links.
    #[cfg(feature = "stream")]
    pub async fn list_all(
        &self,
        query: RecordQuery,
    ) -> Result<impl Stream<Item = Result<Record, Error>>, Error> {
        Ok(self
            .session
            .get(CLOUD_DNS, &["domains", self.domain.as_str(), "records"])
            .await?
            .query(&query)
            .fetch_json_paginated::<Record>())
    }

    /// Find records by type, name and (optionally) data.
    pub async fn find<S: Into<String>>(
        &self,
        record_type: RecordType,
        name: S,
        data: Option<&str>,
    ) -> Result<Vec<Record>, Error> {
        let mut query = RecordQuery::default()
            .with_type(record_type)
            .with_name(name);
        if let Some(data) = data {
            query = query.with_data(data);
        }
        self.list(query).await
    }

    /// Get a record.
    pub async fn get<I: Into<RecordId>>(&self, id: I) -> Result<Record, Error> {
        let id = id.into();
        self.session
            .get(
                CLOUD_DNS,
                &["domains", self.domain.as_str(), "records", id.as_str()],
            )
            .await?
            .fetch_json()
            .await
    }

    /// Add records to the domain and wait for the result.
    pub async fn add(&self, records: Vec<RecordCreate>) -> Result<Vec<Record>, Error> {
        debug!("Adding {} record(s) to domain {}", records.len(), self.domain);
        let body = RecordsRef { records: &records };
        let response = AsyncRequest::new(
            &self.session,
            Method::POST,
            &["domains", self.domain.as_str(), "records"],
        )
        .json(&body)?
        .error_kind(ErrorKind::DomainRecordAdditionFailed)
        .submit()
        .await?
        .into_response(ErrorKind::DomainRecordAdditionFailed)?;
        let root: RecordsRoot = from_response(response)?;
        Ok(root.records)
    }

    /// Update a record and wait for the result.
    pub async fn update<I: Into<RecordId>>(&self, id: I, update: RecordUpdate) -> Result<(), Error> {
        let id = id.into();
        debug!("Updating record {} of domain {}", id, self.domain);
        let _ = AsyncRequest::new(
            &self.session,
            Method::PUT,
            &["domains", self.domain.as_str(), "records", id.as_str()],
        )
        .json(&update)?
        .error_kind(ErrorKind::DomainRecordUpdateFailed)
        .submit()
        .await?
        .into_response(ErrorKind::DomainRecordUpdateFailed)?;
        Ok(())
    }

    /// Delete a record and wait for the result.
    pub async fn delete<I: Into<RecordId>>(&self, id: I) -> Result<(), Error> {
        let id = id.into();
        debug!("Deleting record {} of domain {}", id, self.domain);
        let _ = AsyncRequest::new(
            &self.session,
            Method::DELETE,
            &["domains", self.domain.as_str(), "records", id.as_str()],
        )
        .error_kind(ErrorKind::DomainRecordDeletionFailed)
        .submit()
        .await?
        .into_response(ErrorKind::DomainRecordDeletionFailed)?;
        Ok(())
    }
}

#[async_trait]
impl Create for RecordManager {
    type Spec = RecordCreate;
    type Item = Record;

    async fn create(&self, spec: RecordCreate) -> Result<Record, Error> {
        self.add(vec![spec]).await?.into_iter().next().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidResponse,
                "Job response does not contain a record",
            )
        })
    }
}

#[async_trait]
impl Get for RecordManager {
    type Id = RecordId;
    type Item = Record;

    async fn get(&self, id: RecordId) -> Result<Record, Error> {
        RecordManager::get(self, id).await
    }
}

#[async_trait]
impl List for RecordManager {
    type Item = Record;
    type Query = RecordQuery;

    async fn list(&self, query: RecordQuery) -> Result<Vec<Record>, Error> {
        RecordManager::list(self, query).await
    }
}

#[async_trait]
impl Delete for RecordManager {
    type Id = RecordId;

    async fn delete(&self, id: RecordId) -> Result<(), Error> {
        RecordManager::delete(self, id).await
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::RecordManager;
    use crate::dns::{RecordCreate, RecordType, RecordUpdate};
    use crate::resource::Create;
    use crate::session::test::new_session;
    use crate::ErrorKind;

    fn record(id: &str, name: &str, data: &str) -> serde_json::Value {
        json!({"id": id, "name": name, "type": "A", "data": data, "ttl": 300})
    }

    async fn manager(server: &MockServer) -> RecordManager {
        RecordManager::new(
            new_session(&format!("{}/v1.0/1234", server.uri())).await,
            "42".into(),
        )
    }

    fn job_started(server: &MockServer) -> ResponseTemplate {
        ResponseTemplate::new(202).set_body_json(json!({
            "jobId": "job-2",
            "status": "RUNNING",
            "callbackUrl": format!("{}/v1.0/1234/status/job-2", server.uri())
        }))
    }

    async fn job_finished(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/status/job-2"))
            .and(query_param("showDetails", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_find() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/domains/42/records"))
            .and(query_param("type", "A"))
            .and(query_param("name", "www.example.com"))
            .and(query_param("data", "192.0.2.1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [record("A-1", "www.example.com", "192.0.2.1")],
                "totalEntries": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let found = manager(&server)
            .await
            .find(RecordType::A, "www.example.com", Some("192.0.2.1"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "A-1");
    }

    #[tokio::test]
    async fn test_get() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/domains/42/records/A-1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(record("A-1", "www.example.com", "192.0.2.1")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let found = manager(&server).await.get("A-1").await.unwrap();
        assert_eq!(found.record_type, RecordType::A);
        assert_eq!(found.ttl, Some(300));
    }

    #[tokio::test]
    async fn test_add() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1.0/1234/domains/42/records"))
            .and(body_json(json!({"records": [
                {"name": "www.example.com", "type": "A", "data": "192.0.2.1", "ttl": 300}
            ]})))
            .respond_with(job_started(&server))
            .expect(1)
            .mount(&server)
            .await;
        job_finished(
            &server,
            json!({"status": "COMPLETED", "response": {"records": [
                record("A-1", "www.example.com", "192.0.2.1")
            ]}}),
        )
        .await;

        let mgr = manager(&server).await;
        let created = mgr
            .create(RecordCreate::new(RecordType::A, "www.example.com", "192.0.2.1").with_ttl(300))
            .await
            .unwrap();
        assert_eq!(created.id, "A-1");
    }

    #[tokio::test]
    async fn test_add_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1.0/1234/domains/42/records"))
            .respond_with(job_started(&server))
            .mount(&server)
            .await;
        job_finished(
            &server,
            json!({"status": "ERROR", "error": {"failedItems": {"faults": [
                {"message": "Conflict", "details": "Duplicate record", "code": 409},
                {"message": "Bad request", "details": "Invalid data", "code": 400}
            ]}}}),
        )
        .await;

        let err = manager(&server)
            .await
            .add(vec![
                RecordCreate::new(RecordType::A, "www.example.com", "192.0.2.1"),
                RecordCreate::new(RecordType::A, "www.example.com", "banana"),
            ])
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::DomainRecordAdditionFailed);
        assert_eq!(
            err.message(),
            Some("Duplicate record (409)\nInvalid data (400)")
        );
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1.0/1234/domains/42/records/A-1"))
            .and(body_json(json!({"data": "192.0.2.2"})))
            .respond_with(job_started(&server))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v1.0/1234/domains/42/records/A-1"))
            .respond_with(job_started(&server))
            .expect(1)
            .mount(&server)
            .await;
        job_finished(&server, json!({"status": "COMPLETED"})).await;

        let mgr = manager(&server).await;
        let update = RecordUpdate {
            data: Some("192.0.2.2".into()),
            ..RecordUpdate::default()
        };
        mgr.update("A-1", update).await.unwrap();
        mgr.delete("A-1").await.unwrap();
    }
}
