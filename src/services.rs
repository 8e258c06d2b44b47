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

//! Rackspace service types.
//!
//! Only the DNS service has a client in this crate, the rest are known so that a
//! [Session](../struct.Session.html) can resolve their endpoints.

/// Trait representing a service type.
pub trait ServiceType {
    /// Service type to pass to the catalog.
    fn catalog_type(&self) -> &'static str;
}

/// A generic service.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenericService {
    catalog_type: &'static str,
}

impl GenericService {
    /// Create a new generic service.
    pub const fn new(catalog_type: &'static str) -> GenericService {
        GenericService { catalog_type }
    }
}

impl ServiceType for GenericService {
    fn catalog_type(&self) -> &'static str {
        self.catalog_type
    }
}

/// Cloud Servers.
pub const COMPUTE: GenericService = GenericService::new("compute");

/// Cloud Files.
pub const OBJECT_STORAGE: GenericService = GenericService::new("object-store");

/// Cloud Files CDN.
pub const OBJECT_CDN: GenericService = GenericService::new("rax:object-cdn");

/// Cloud Databases.
pub const DATABASE: GenericService = GenericService::new("rax:database");

/// Cloud Load Balancers.
pub const LOAD_BALANCER: GenericService = GenericService::new("rax:load-balancer");

/// Cloud Block Storage.
pub const BLOCK_STORAGE: GenericService = GenericService::new("volume");

/// Cloud DNS.
pub const CLOUD_DNS: GenericService = GenericService::new("rax:dns");

/// Cloud Monitoring.
pub const MONITORING: GenericService = GenericService::new("rax:monitor");

/// Auto Scale.
pub const AUTOSCALE: GenericService = GenericService::new("rax:autoscale");

/// Cloud Networks.
pub const NETWORK: GenericService = GenericService::new("network");
