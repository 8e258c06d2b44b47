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

//! Internal endpoint cache.

use std::collections::HashMap;

use log::debug;
use reqwest::Url;
use tokio::sync::RwLock;

use crate::client::AuthenticatedClient;
use crate::services::ServiceType;
use crate::url as url_utils;
use crate::{EndpointFilters, Error, ErrorKind};

/// Endpoint cache.
#[derive(Debug)]
pub struct EndpointCache {
    endpoints: RwLock<HashMap<&'static str, Url>>,
    pub filters: EndpointFilters,
    pub overrides: HashMap<String, Url>,
}

impl Clone for EndpointCache {
    /// Clone the cache removing the cached endpoints but keeping filters and overrides.
    fn clone(&self) -> EndpointCache {
        EndpointCache {
            endpoints: RwLock::new(HashMap::new()),
            filters: self.filters.clone(),
            overrides: self.overrides.clone(),
        }
    }
}

impl Default for EndpointCache {
    fn default() -> EndpointCache {
        EndpointCache::new()
    }
}

impl EndpointCache {
    /// Create a new empty cache.
    #[inline]
    pub fn new() -> Self {
        EndpointCache {
            endpoints: RwLock::new(HashMap::new()),
            filters: EndpointFilters::default(),
            overrides: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn new_with(service_type: &'static str, endpoint: Url) -> Self {
        let mut hm = HashMap::new();
        let _ = hm.insert(service_type, endpoint);
        EndpointCache {
            endpoints: RwLock::new(hm),
            filters: EndpointFilters::default(),
            overrides: HashMap::new(),
        }
    }

    /// Clear the cache.
    #[inline]
    pub fn clear(&mut self) -> &mut Self {
        self.endpoints = RwLock::new(HashMap::new());
        self
    }

    /// Ensure the endpoint is cached and return it.
    pub async fn get_endpoint<Srv>(
        &self,
        client: &AuthenticatedClient,
        service: Srv,
    ) -> Result<Url, Error>
    where
        Srv: ServiceType + Send,
    {
        let catalog_type = service.catalog_type();
        if let Some(found) = self.endpoints.read().await.get(catalog_type) {
            return Ok(found.clone());
        }

        debug!("No cached endpoint for service {}, fetching", catalog_type);

        let mut lock = self.endpoints.write().await;
        // Additonal check in case another task has updated the cache while we were waiting for
        // the write lock.
        if let Some(found) = lock.get(catalog_type) {
            return Ok(found.clone());
        }

        let ep = match self.overrides.get(catalog_type) {
            Some(found) => found.clone(),
            None => client.get_endpoint(catalog_type, &self.filters).await?,
        };
        if !url_utils::is_valid_base(&ep) {
            return Err(Error::new(
                ErrorKind::InvalidResponse,
                format!("Invalid URL {} received for service {}", ep, catalog_type),
            ));
        }
        let _ = lock.insert(catalog_type, ep.clone());
        Ok(ep)
    }
}
