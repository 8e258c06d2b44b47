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

//! Asynchronous Rackspace Cloud DNS client.
//!
//! Cloud DNS runs every mutating call as an asynchronous job: the service answers with a job
//! record and a callback URL which is polled until the job finishes. This crate wraps this
//! protocol in [AsyncRequest](dns/struct.AsyncRequest.html) and builds typed domain and record
//! managers on top of it.
//!
//! # Sessions
//!
//! A [Session](struct.Session.html) combines an authenticated HTTP client, the endpoint cache
//! and the polling settings. It is usually created from the environment or from a
//! configuration file:
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), raxdns::Error> {
//! let session = raxdns::Session::from_env().await?;
//! let dns = raxdns::dns::CloudDns::new(session);
//! let domain = dns.domains().find_by_name("example.com").await?;
//! println!("{} has {} records", domain.name, domain.records().len());
//! # Ok(()) }
//! ```
//!
//! # Polling
//!
//! Jobs are polled until they leave the `RUNNING` state or until the timeout expires, see
//! [PollSettings](struct.PollSettings.html). A job that is still running when the time is
//! up is reported as [JobOutcome::DeadlineExceeded](dns/enum.JobOutcome.html), not as a
//! failure of the job itself.

#![crate_name = "raxdns"]
#![crate_type = "lib"]
#![deny(
    dead_code,
    improper_ctypes,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused,
    unused_allocation,
    unused_comparisons,
    unused_doc_comments,
    unused_import_braces,
    unused_parens,
    unused_qualifications,
    unused_results,
    while_true
)]
#![allow(
    clippy::new_ret_no_self,
    clippy::should_implement_trait,
    clippy::wrong_self_convention
)]

mod auth;
mod cache;
mod catalog;
pub mod client;
mod common;
pub mod dns;
mod endpointfilters;
mod error;
pub mod identity;
pub mod loading;
#[macro_use]
mod macros;
pub mod resource;
pub mod services;
mod session;
#[cfg(feature = "stream")]
mod stream;
mod url;

pub use crate::auth::{AuthType, NoAuth};
pub use crate::endpointfilters::{EndpointFilters, InterfaceType};
pub use crate::error::{Error, ErrorKind};
pub use crate::session::{PollSettings, Session, DEFAULT_POLL_TIMEOUT};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("raxdns/", env!("CARGO_PKG_VERSION"));
