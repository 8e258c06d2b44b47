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

//! Reusable JSON structures and protocol bits.

use chrono::{DateTime, FixedOffset};
use reqwest::Url;
use serde::de::Error as DeserError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A link to a resource.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct Link {
    /// Resource URL.
    pub href: Url,
    /// Relationship between the referencing and the referenced object.
    pub rel: String,
}

/// Find the link to the next page in a list of links.
#[cfg_attr(not(feature = "stream"), allow(dead_code))]
pub fn next_link(links: &[Link]) -> Option<&Url> {
    links.iter().find(|link| link.rel == "next").map(|link| &link.href)
}

/// Deserialize an optional integer that may be sent either as a number or as a string.
///
/// Empty strings are treated as missing values.
pub fn number_or_string<'de, D>(des: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(des)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(num)) => num
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("{} is not an integer", num))),
        Some(Value::String(ref s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("{} is not an integer", s))),
        Some(other) => Err(D::Error::custom(format!(
            "expected an integer, got {}",
            other
        ))),
    }
}

/// Deserialize an identifier that may be sent either as a number or as a string.
pub fn string_or_number<'de, D>(des: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(des)? {
        Value::String(s) => Ok(s),
        Value::Number(num) => Ok(num.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or a number, got {}",
            other
        ))),
    }
}

/// Deserialize an optional timestamp.
///
/// Accepts RFC 3339 as well as the `2012-09-21T21:32:27.000+0000` form used by the DNS API.
pub fn timestamp<'de, D>(des: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(des)? {
        None => Ok(None),
        Some(ref s) if s.is_empty() => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .or_else(|_| DateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f%z"))
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid timestamp {}: {}", s, e))),
    }
}
