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

//! Endpoint filters for looking up endpoints.

use std::fmt;
use std::str::FromStr;

use super::{Error, ErrorKind};

/// Interface type: public or internal (ServiceNet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterfaceType {
    /// Public interface (used by default).
    #[default]
    Public,
    /// Internal interface.
    Internal,
}

/// Endpoint filters for looking up endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct EndpointFilters {
    /// Endpoint interface.
    pub interface: InterfaceType,
    /// Cloud region.
    ///
    /// Endpoints of global services (without a region) match any region.
    pub region: Option<String>,
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(match self {
            InterfaceType::Public => "public",
            InterfaceType::Internal => "internal",
        })
    }
}

impl FromStr for InterfaceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" | "publicURL" => Ok(InterfaceType::Public),
            "internal" | "internalURL" | "servicenet" => Ok(InterfaceType::Internal),
            other => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Unknown interface type: {}", other),
            )),
        }
    }
}

impl EndpointFilters {
    /// Create filters with an interface and a region.
    ///
    /// Hint: use `default` to create empty filters (and `with_*` methods to populate it).
    pub fn new<S>(interface: InterfaceType, region: S) -> EndpointFilters
    where
        S: Into<String>,
    {
        EndpointFilters {
            interface,
            region: Some(region.into()),
        }
    }

    /// Whether the endpoint region is acceptable.
    ///
    /// Endpoints without a region or with the `ALL` pseudo-region match any filter.
    pub fn region_matches(&self, endpoint_region: Option<&str>) -> bool {
        match (self.region.as_deref(), endpoint_region) {
            (_, None) => true,
            (_, Some(rgn)) if rgn.eq_ignore_ascii_case("ALL") => true,
            (None, Some(_)) => true,
            (Some(expected), Some(rgn)) => expected.eq_ignore_ascii_case(rgn),
        }
    }

    /// Take the region from `other` if it is not set on this object.
    pub fn with_defaults(mut self, other: &EndpointFilters) -> EndpointFilters {
        if self.region.is_none() {
            self.region = other.region.clone();
        }
        self
    }

    /// Set the interface.
    #[inline]
    pub fn set_interface(&mut self, value: InterfaceType) {
        self.interface = value;
    }

    /// Set region.
    #[inline]
    pub fn set_region<T: Into<String>>(&mut self, value: T) {
        self.region = Some(value.into());
    }

    /// Use the given interface.
    #[inline]
    pub fn with_interface(mut self, value: InterfaceType) -> Self {
        self.set_interface(value);
        self
    }

    /// Add a region.
    #[inline]
    pub fn with_region<T: Into<String>>(mut self, value: T) -> Self {
        self.set_region(value);
        self
    }
}
