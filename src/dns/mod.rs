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

//! Cloud DNS client.
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), raxdns::Error> {
//! use raxdns::dns::{CloudDns, DomainCreate, RecordCreate, RecordType};
//!
//! let dns = CloudDns::new(raxdns::Session::from_env().await?);
//! let domain = dns
//!     .domains()
//!     .create(DomainCreate::new("example.com", "hostmaster@example.com"))
//!     .await?;
//! let records = dns
//!     .records(&domain)
//!     .add(vec![RecordCreate::new(RecordType::A, "www.example.com", "192.0.2.17")])
//!     .await?;
//! # Ok(()) }
//! ```

use serde_json::Value;

use crate::services::CLOUD_DNS;
use crate::{Error, Session};

mod asyncjob;
mod domains;
mod protocol;
mod records;

pub use asyncjob::{
    AsyncJob, AsyncRequest, ErrorPayload, FailedItems, Fault, JobOutcome, JobStatus,
};
pub use domains::DomainManager;
pub use protocol::{
    Domain, DomainCreate, DomainExport, DomainId, DomainQuery, DomainUpdate, DomainsRoot,
    Nameserver, Record, RecordCreate, RecordId, RecordQuery, RecordType, RecordUpdate,
    RecordsList, RecordsRoot, ZoneFormat, DEFAULT_TTL,
};
pub use records::RecordManager;

/// Cloud DNS client.
#[derive(Debug, Clone)]
pub struct CloudDns {
    session: Session,
}

impl CloudDns {
    /// Create a DNS client on top of a session.
    #[inline]
    pub fn new(session: Session) -> CloudDns {
        CloudDns { session }
    }

    /// Session in use.
    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Manage domains.
    pub fn domains(&self) -> DomainManager {
        DomainManager::new(self.session.clone())
    }

    /// Manage records of the domain.
    pub fn records<D: Into<DomainId>>(&self, domain: D) -> RecordManager {
        RecordManager::new(self.session.clone(), domain.into())
    }

    /// Account limits of the DNS service.
    pub async fn limits(&self) -> Result<Value, Error> {
        self.session
            .get(CLOUD_DNS, &["limits"])
            .await?
            .fetch_json()
            .await
    }
}

impl From<Session> for CloudDns {
    fn from(value: Session) -> CloudDns {
        CloudDns::new(value)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::CloudDns;
    use crate::session::test::new_session;

    #[tokio::test]
    async fn test_limits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/1234/limits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "limits": {"absolute": {"domains": 500, "records per domain": 500}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dns = CloudDns::new(new_session(&format!("{}/v1.0/1234", server.uri())).await);
        let limits = dns.limits().await.unwrap();
        assert_eq!(limits["limits"]["absolute"]["domains"], 500);
    }

    #[tokio::test]
    async fn test_records_manager_domain() {
        let dns = CloudDns::new(new_session("http://127.0.0.1/v1.0/1234").await);
        assert_eq!(dns.records("42").domain_id().as_str(), "42");
    }
}
