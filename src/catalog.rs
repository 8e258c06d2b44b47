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

//! Low-level code to work with the service catalog.

use log::{debug, error};
use reqwest::Url;

use super::identity::protocol::{CatalogRecord, Endpoint};
use super::{EndpointFilters, Error, ErrorKind, InterfaceType};

#[inline]
fn interface_url<'e>(endpoint: &'e Endpoint, interface: InterfaceType) -> Option<&'e str> {
    match interface {
        InterfaceType::Public => endpoint.public_url.as_deref(),
        InterfaceType::Internal => endpoint.internal_url.as_deref(),
    }
}

/// Find an endpoint URL in the service catalog.
///
/// An endpoint in exactly the requested region wins over a global one.
pub fn find_endpoint<'c>(
    catalog: &'c [CatalogRecord],
    service_type: &str,
    filters: &EndpointFilters,
) -> Result<&'c str, Error> {
    let mut candidates = catalog
        .iter()
        .filter(|svc| svc.service_type == service_type)
        .flat_map(|svc| svc.endpoints.iter())
        .filter(|endp| filters.region_matches(endp.region.as_deref()))
        .filter_map(|endp| interface_url(endp, filters.interface).map(|url| (endp, url)))
        .collect::<Vec<_>>();

    let exact = match filters.region {
        Some(ref rgn) => candidates.iter().position(|(endp, _)| {
            endp.region
                .as_deref()
                .map(|x| x.eq_ignore_ascii_case(rgn))
                .unwrap_or(false)
        }),
        None => None,
    };

    match exact {
        Some(idx) => Ok(candidates.swap_remove(idx).1),
        None => candidates
            .into_iter()
            .next()
            .map(|(_, url)| url)
            .ok_or_else(|| Error::new_endpoint_not_found(service_type)),
    }
}

/// Extract a URL from the service catalog.
pub fn extract_url(
    catalog: &[CatalogRecord],
    service_type: &str,
    filters: &EndpointFilters,
) -> Result<Url, Error> {
    let url = find_endpoint(catalog, service_type, filters)?;
    debug!("Received {} for {}", url, service_type);
    Url::parse(url).map_err(|e| {
        error!(
            "Invalid URL {} received from service catalog for service \
             '{}', filters {:?}: {}",
            url, service_type, filters, e
        );
        Error::new(
            ErrorKind::InvalidResponse,
            format!("Invalid URL {} for {} - {}", url, service_type, e),
        )
    })
}

#[cfg(test)]
pub mod test {
    use super::super::identity::protocol::{CatalogRecord, Endpoint};
    use super::super::{EndpointFilters, ErrorKind, InterfaceType};
    use super::{extract_url, find_endpoint};

    fn endpoint(region: Option<&str>, public: &str, internal: Option<&str>) -> Endpoint {
        Endpoint {
            region: region.map(From::from),
            public_url: Some(public.to_string()),
            internal_url: internal.map(From::from),
        }
    }

    pub fn demo_catalog() -> Vec<CatalogRecord> {
        vec![
            CatalogRecord {
                service_type: String::from("rax:dns"),
                endpoints: vec![endpoint(
                    None,
                    "https://dns.api.rackspacecloud.com/v1.0/123456",
                    None,
                )],
            },
            CatalogRecord {
                service_type: String::from("compute"),
                endpoints: vec![
                    endpoint(
                        Some("DFW"),
                        "https://dfw.servers.api.rackspacecloud.com/v2/123456",
                        None,
                    ),
                    endpoint(
                        Some("ORD"),
                        "https://ord.servers.api.rackspacecloud.com/v2/123456",
                        None,
                    ),
                ],
            },
            CatalogRecord {
                service_type: String::from("object-store"),
                endpoints: vec![
                    endpoint(
                        Some("ALL"),
                        "https://storage.clouddrive.com/v1/MossoCloudFS_a",
                        None,
                    ),
                    endpoint(
                        Some("ORD"),
                        "https://storage101.ord1.clouddrive.com/v1/MossoCloudFS_a",
                        Some("https://snet-storage101.ord1.clouddrive.com/v1/MossoCloudFS_a"),
                    ),
                ],
            },
        ]
    }

    #[test]
    fn test_find_global_endpoint() {
        let cat = demo_catalog();
        let filters = EndpointFilters::default().with_region("LON");
        let url = find_endpoint(&cat, "rax:dns", &filters).unwrap();
        assert_eq!(url, "https://dns.api.rackspacecloud.com/v1.0/123456");
    }

    #[test]
    fn test_find_regional_endpoint() {
        let cat = demo_catalog();
        let filters = EndpointFilters::default().with_region("ORD");
        let url = find_endpoint(&cat, "compute", &filters).unwrap();
        assert_eq!(url, "https://ord.servers.api.rackspacecloud.com/v2/123456");
    }

    #[test]
    fn test_find_endpoint_no_region() {
        let cat = demo_catalog();
        let url = find_endpoint(&cat, "compute", &EndpointFilters::default()).unwrap();
        assert_eq!(url, "https://dfw.servers.api.rackspacecloud.com/v2/123456");
    }

    #[test]
    fn test_find_endpoint_exact_region_wins() {
        let cat = demo_catalog();
        let filters = EndpointFilters::default().with_region("ORD");
        let url = find_endpoint(&cat, "object-store", &filters).unwrap();
        assert_eq!(
            url,
            "https://storage101.ord1.clouddrive.com/v1/MossoCloudFS_a"
        );

        let filters = EndpointFilters::default().with_region("DFW");
        let url = find_endpoint(&cat, "object-store", &filters).unwrap();
        assert_eq!(url, "https://storage.clouddrive.com/v1/MossoCloudFS_a");
    }

    #[test]
    fn test_find_internal_endpoint() {
        let cat = demo_catalog();
        let filters = EndpointFilters::new(InterfaceType::Internal, "ORD");
        let url = find_endpoint(&cat, "object-store", &filters).unwrap();
        assert_eq!(
            url,
            "https://snet-storage101.ord1.clouddrive.com/v1/MossoCloudFS_a"
        );

        let e = find_endpoint(&cat, "rax:dns", &filters).err().unwrap();
        assert_eq!(e.kind(), ErrorKind::EndpointNotFound);
    }

    #[test]
    fn test_find_endpoint_wrong_region() {
        let cat = demo_catalog();
        let filters = EndpointFilters::default().with_region("SYD");
        let e = find_endpoint(&cat, "compute", &filters).err().unwrap();
        assert_eq!(e.kind(), ErrorKind::EndpointNotFound);
    }

    #[test]
    fn test_find_endpoint_unknown_service() {
        let cat = demo_catalog();
        let e = find_endpoint(&cat, "rax:autoscale", &EndpointFilters::default())
            .err()
            .unwrap();
        assert_eq!(e.kind(), ErrorKind::EndpointNotFound);
    }

    #[test]
    fn test_extract_url() {
        let cat = demo_catalog();
        let url = extract_url(&cat, "rax:dns", &EndpointFilters::default()).unwrap();
        assert_eq!(url.host_str(), Some("dns.api.rackspacecloud.com"));
        assert_eq!(url.path(), "/v1.0/123456");
    }

    #[test]
    fn test_extract_url_invalid() {
        let cat = vec![CatalogRecord {
            service_type: String::from("rax:dns"),
            endpoints: vec![endpoint(None, "not a url", None)],
        }];
        let e = extract_url(&cat, "rax:dns", &EndpointFilters::default())
            .err()
            .unwrap();
        assert_eq!(e.kind(), ErrorKind::InvalidResponse);
    }
}
