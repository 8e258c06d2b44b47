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

//! JSON structures of the Cloud DNS API.

#![allow(missing_docs)]

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::common::{self, Link};
use crate::protocol_enum;

/// Default TTL of new domains.
pub const DEFAULT_TTL: u32 = 3600;

protocol_enum! {
    #[doc = "Type of a DNS record."]
    #[non_exhaustive]
    enum RecordType = Unknown {
        A = "A",
        Aaaa = "AAAA",
        Cname = "CNAME",
        Mx = "MX",
        Ns = "NS",
        Ptr = "PTR",
        Srv = "SRV",
        Txt = "TXT",
        Unknown = "UNKNOWN"
    }
}

protocol_enum! {
    #[doc = "Format of an imported or exported zone."]
    enum ZoneFormat {
        Bind9 = "BIND_9"
    }
}

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident for $resource:ident) => (
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// The ID as a string.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> $name {
                $name(value)
            }
        }

        impl<'a> From<&'a str> for $name {
            fn from(value: &'a str) -> $name {
                $name(value.to_string())
            }
        }

        impl<'a> From<&'a $resource> for $name {
            fn from(value: &'a $resource) -> $name {
                $name(value.id.clone())
            }
        }

        impl From<$resource> for $name {
            fn from(value: $resource) -> $name {
                $name(value.id)
            }
        }
    );
}

typed_id! {
    #[doc = "ID of a domain, obtained from a `Domain` or a string."]
    DomainId for Domain
}

typed_id! {
    #[doc = "ID of a record, obtained from a `Record` or a string."]
    RecordId for Record
}

/// A name server of a domain.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Nameserver {
    pub name: String,
}

/// A DNS record.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(deserialize_with = "common::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub data: String,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "common::timestamp")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "common::timestamp")]
    pub updated: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RecordsList {
    #[serde(default)]
    pub records: Vec<Record>,
}

/// A DNS domain (zone).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    #[serde(deserialize_with = "common::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "common::number_or_string")]
    pub account_id: Option<i64>,
    #[serde(default, deserialize_with = "common::timestamp")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "common::timestamp")]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub nameservers: Vec<Nameserver>,
    #[serde(default)]
    pub records_list: Option<RecordsList>,
}

impl Domain {
    /// Records of the domain.
    ///
    /// Only populated when the domain was fetched with its records.
    pub fn records(&self) -> &[Record] {
        self.records_list
            .as_ref()
            .map(|list| &list.records[..])
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainsRoot {
    pub domains: Vec<Domain>,
    #[serde(default)]
    pub total_entries: Option<u64>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsRoot {
    pub records: Vec<Record>,
    #[serde(default)]
    pub total_entries: Option<u64>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[cfg(feature = "stream")]
impl crate::stream::PaginatedResource for Domain {
    type Root = DomainsRoot;
}

#[cfg(feature = "stream")]
impl From<DomainsRoot> for crate::stream::Page<Domain> {
    fn from(value: DomainsRoot) -> crate::stream::Page<Domain> {
        crate::stream::Page {
            next: common::next_link(&value.links).cloned(),
            items: value.domains,
        }
    }
}

#[cfg(feature = "stream")]
impl crate::stream::PaginatedResource for Record {
    type Root = RecordsRoot;
}

#[cfg(feature = "stream")]
impl From<RecordsRoot> for crate::stream::Page<Record> {
    fn from(value: RecordsRoot) -> crate::stream::Page<Record> {
        crate::stream::Page {
            next: common::next_link(&value.links).cloned(),
            items: value.records,
        }
    }
}

/// An exported zone.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DomainExport {
    #[serde(default, deserialize_with = "common::number_or_string")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "common::number_or_string")]
    pub account_id: Option<i64>,
    pub content_type: ZoneFormat,
    pub contents: String,
}

/// Specification of a new record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecordCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RecordCreate {
    /// Start a new record.
    pub fn new<S1, S2>(record_type: RecordType, name: S1, data: S2) -> RecordCreate
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        RecordCreate {
            name: name.into(),
            record_type,
            data: data.into(),
            ttl: None,
            priority: None,
            comment: None,
        }
    }

    /// Set the TTL.
    pub fn with_ttl(mut self, ttl: u32) -> RecordCreate {
        self.ttl = Some(ttl);
        self
    }

    /// Set the priority (MX and SRV records).
    pub fn with_priority(mut self, priority: u16) -> RecordCreate {
        self.priority = Some(priority);
        self
    }

    /// Set the comment.
    pub fn with_comment<S: Into<String>>(mut self, comment: S) -> RecordCreate {
        self.comment = Some(comment.into());
        self
    }
}

/// Changes to a record.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RecordUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordsRef<'a> {
    pub records: &'a [RecordCreate],
}

/// Specification of a new domain.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DomainCreate {
    pub name: String,
    pub email_address: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip)]
    pub records: Vec<RecordCreate>,
}

impl DomainCreate {
    /// Start a new domain with the default TTL.
    pub fn new<S1, S2>(name: S1, email_address: S2) -> DomainCreate
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        DomainCreate {
            name: name.into(),
            email_address: email_address.into(),
            ttl: DEFAULT_TTL,
            comment: None,
            records: Vec::new(),
        }
    }

    /// Set the TTL.
    pub fn with_ttl(mut self, ttl: u32) -> DomainCreate {
        self.ttl = ttl;
        self
    }

    /// Set the comment.
    pub fn with_comment<S: Into<String>>(mut self, comment: S) -> DomainCreate {
        self.comment = Some(comment.into());
        self
    }

    /// Add a record to create together with the domain.
    pub fn with_record(mut self, record: RecordCreate) -> DomainCreate {
        self.records.push(record);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainCreateItem<'a> {
    #[serde(flatten)]
    pub domain: &'a DomainCreate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_list: Option<RecordsRef<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainsCreateRoot<'a> {
    pub domains: Vec<DomainCreateItem<'a>>,
}

impl<'a> From<&'a DomainCreate> for DomainsCreateRoot<'a> {
    fn from(value: &'a DomainCreate) -> DomainsCreateRoot<'a> {
        let records_list = if value.records.is_empty() {
            None
        } else {
            Some(RecordsRef {
                records: &value.records,
            })
        };
        DomainsCreateRoot {
            domains: vec![DomainCreateItem {
                domain: value,
                records_list,
            }],
        }
    }
}

/// Changes to a domain.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DomainUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainImport<'a> {
    pub content_type: ZoneFormat,
    pub contents: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainsImportRoot<'a> {
    pub domains: [DomainImport<'a>; 1],
}

/// Query for listing domains.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DomainQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl DomainQuery {
    /// Filter by the domain name.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> DomainQuery {
        self.name = Some(name.into());
        self
    }

    /// Limit the number of items on a page.
    pub fn with_limit(mut self, limit: usize) -> DomainQuery {
        self.limit = Some(limit);
        self
    }

    /// Skip the given number of items.
    pub fn with_offset(mut self, offset: usize) -> DomainQuery {
        self.offset = Some(offset);
        self
    }
}

/// Query for listing records.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RecordQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl RecordQuery {
    /// Filter by the record type.
    pub fn with_type(mut self, record_type: RecordType) -> RecordQuery {
        self.record_type = Some(record_type);
        self
    }

    /// Filter by the record name.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> RecordQuery {
        self.name = Some(name.into());
        self
    }

    /// Filter by the record data.
    pub fn with_data<S: Into<String>>(mut self, data: S) -> RecordQuery {
        self.data = Some(data.into());
        self
    }

    /// Limit the number of items on a page.
    pub fn with_limit(mut self, limit: usize) -> RecordQuery {
        self.limit = Some(limit);
        self
    }

    /// Skip the given number of items.
    pub fn with_offset(mut self, offset: usize) -> RecordQuery {
        self.offset = Some(offset);
        self
    }
}
