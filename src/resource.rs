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

//! Capabilities of resource managers.
//!
//! Each manager implements the subset of these traits that its API supports, which allows
//! writing code that is generic over the resource kind:
//!
//! ```rust,no_run
//! use raxdns::resource::List;
//!
//! async fn count<M: List>(manager: &M, query: M::Query) -> Result<usize, raxdns::Error> {
//!     Ok(manager.list(query).await?.len())
//! }
//! ```

use async_trait::async_trait;

use super::Error;

/// Creating resources.
#[async_trait]
pub trait Create {
    /// Specification of a new resource.
    type Spec: Send;

    /// Resulting resource.
    type Item;

    /// Create a resource.
    async fn create(&self, spec: Self::Spec) -> Result<Self::Item, Error>;
}

/// Fetching a single resource.
#[async_trait]
pub trait Get {
    /// Identifier of the resource.
    type Id: Send;

    /// Resource type.
    type Item;

    /// Get a resource by its identifier.
    async fn get(&self, id: Self::Id) -> Result<Self::Item, Error>;
}

/// Listing resources.
#[async_trait]
pub trait List {
    /// Resource type.
    type Item;

    /// Query (filters and pagination).
    type Query: Send;

    /// List resources matching the query.
    async fn list(&self, query: Self::Query) -> Result<Vec<Self::Item>, Error>;
}

/// Deleting resources.
#[async_trait]
pub trait Delete {
    /// Identifier of the resource.
    type Id: Send;

    /// Delete a resource.
    async fn delete(&self, id: Self::Id) -> Result<(), Error>;
}
