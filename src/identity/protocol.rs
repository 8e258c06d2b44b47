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

//! JSON structures of the Rackspace Identity API v2.0.

#![allow(missing_docs)]

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// API key credentials.
#[derive(Clone, Serialize)]
pub struct ApiKeyCredentials {
    pub username: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

/// User name and password credentials.
#[derive(Clone, Serialize)]
pub struct PasswordCredentials {
    pub username: String,
    pub password: String,
}

/// Authentication method.
#[derive(Clone, Debug, Serialize)]
pub enum Auth {
    #[serde(rename = "RAX-KSKEY:apiKeyCredentials")]
    ApiKey(ApiKeyCredentials),
    #[serde(rename = "passwordCredentials")]
    Password(PasswordCredentials),
}

/// An authentication request.
#[derive(Clone, Debug, Serialize)]
pub struct AuthRoot {
    pub auth: Auth,
}

/// A tenant the token is issued for.
#[derive(Clone, Debug, Deserialize)]
pub struct Tenant {
    pub id: String,
}

/// Token information (without the catalog).
#[derive(Clone, Debug, Deserialize)]
pub struct Token {
    pub id: String,
    pub expires: DateTime<FixedOffset>,
    #[serde(default)]
    pub tenant: Option<Tenant>,
}

/// An endpoint in the service catalog.
#[derive(Clone, Debug, Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(rename = "publicURL", default)]
    pub public_url: Option<String>,
    #[serde(rename = "internalURL", default)]
    pub internal_url: Option<String>,
}

/// A service in the service catalog.
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// Access information received from the Identity service.
#[derive(Clone, Debug, Deserialize)]
pub struct Access {
    pub token: Token,
    #[serde(rename = "serviceCatalog", default)]
    pub catalog: Vec<CatalogRecord>,
}

/// Root of the token response.
#[derive(Clone, Debug, Deserialize)]
pub struct AccessRoot {
    pub access: Access,
}

impl fmt::Debug for ApiKeyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ApiKeyCredentials")
            .field("username", &self.username)
            .field("api_key", &"***")
            .finish()
    }
}

impl fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
