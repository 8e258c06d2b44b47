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

//! Asynchronous jobs of the DNS service.
//!
//! Mutating DNS calls do not return the result directly. Instead the service responds with a
//! job that has a callback URL, and the job status has to be polled until it is no longer
//! `RUNNING`:
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), raxdns::Error> {
//! use raxdns::dns::{AsyncRequest, JobOutcome};
//!
//! let session = raxdns::Session::from_env().await?;
//! let outcome = AsyncRequest::new(&session, reqwest::Method::DELETE, &["domains", "42"])
//!     .submit()
//!     .await?;
//! match outcome {
//!     JobOutcome::Completed(_) => println!("Deleted"),
//!     JobOutcome::Failed(job) => println!("Failed: {:?}", job.error),
//!     JobOutcome::DeadlineExceeded(job) => println!("Still running: {:?}", job.job_id),
//! }
//! # Ok(()) }
//! ```

use std::fmt;
use std::str::FromStr;

use log::{debug, trace, warn};
use reqwest::{Method, Url};
use serde::de::{Deserialize, Deserializer};
use serde::Serialize;
use serde_json::Value;
use tokio::time::{sleep, Instant};

use crate::common;
use crate::services::CLOUD_DNS;
use crate::{Error, ErrorKind, PollSettings, Session};

const STATUS_MARKER: &str = "/status/";

/// Status of an asynchronous job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    /// The job is accepted, but not started yet.
    Initialized,
    /// The job is in progress.
    Running,
    /// The job finished successfully.
    Completed,
    /// The job finished with an error.
    Error,
    /// Status not known to this library.
    Unknown,
}

impl JobStatus {
    /// Whether the job is still running.
    #[inline]
    pub fn is_running(&self) -> bool {
        *self == JobStatus::Running
    }
}

impl FromStr for JobStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<JobStatus, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "INITIALIZED" => JobStatus::Initialized,
            "RUNNING" => JobStatus::Running,
            "COMPLETE" | "COMPLETED" => JobStatus::Completed,
            "ERROR" => JobStatus::Error,
            _ => JobStatus::Unknown,
        })
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            JobStatus::Initialized => "INITIALIZED",
            JobStatus::Running => "RUNNING",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Error => "ERROR",
            JobStatus::Unknown => "UNKNOWN",
        })
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D>(deserializer: D) -> Result<JobStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        match JobStatus::from_str(&value) {
            Ok(status) => Ok(status),
            Err(never) => match never {},
        }
    }
}

/// A single failure reported by a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Fault {
    /// Short message.
    #[serde(default)]
    pub message: Option<String>,
    /// Detailed explanation, may span several lines.
    #[serde(default)]
    pub details: Option<String>,
    /// Error code, usually matching an HTTP status.
    #[serde(default, deserialize_with = "common::number_or_string")]
    pub code: Option<i64>,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self.details.as_deref() {
            Some(details) if !details.is_empty() => details.replace('\n', " "),
            _ => self.message.clone().unwrap_or_default(),
        };
        match self.code {
            Some(code) => write!(f, "{} ({})", text, code),
            None => write!(f, "{} ()", text),
        }
    }
}

impl Fault {
    #[inline]
    fn is_empty(&self) -> bool {
        self.message.is_none() && self.details.is_none() && self.code.is_none()
    }
}

/// A list of failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct FailedItems {
    /// Individual failures.
    #[serde(default)]
    pub faults: Vec<Fault>,
}

/// Error reported by a failed job.
///
/// The service reports errors either as a single fault or as a list of faults. Payloads that
/// match neither shape are kept as raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// Several failures.
    Multiple {
        /// Wrapper around the faults.
        failed_items: FailedItems,
    },
    /// One failure.
    Single(Fault),
    /// A payload in an unknown format.
    Raw(Value),
}

impl ErrorPayload {
    /// All faults in this payload.
    ///
    /// Empty for payloads in an unknown format.
    pub fn faults(&self) -> &[Fault] {
        match self {
            ErrorPayload::Multiple { failed_items } => &failed_items.faults,
            ErrorPayload::Single(fault) => std::slice::from_ref(fault),
            ErrorPayload::Raw(_) => &[],
        }
    }
}

impl<'de> Deserialize<'de> for ErrorPayload {
    fn deserialize<D>(deserializer: D) -> Result<ErrorPayload, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let parsed = match value.get("failedItems") {
            Some(items) => FailedItems::deserialize(items)
                .ok()
                .filter(|items| !items.faults.is_empty())
                .map(|failed_items| ErrorPayload::Multiple { failed_items }),
            None => Fault::deserialize(&value)
                .ok()
                .filter(|fault| !fault.is_empty())
                .map(ErrorPayload::Single),
        };
        Ok(parsed.unwrap_or_else(|| {
            debug!("Job error payload in an unknown format: {}", value);
            ErrorPayload::Raw(value)
        }))
    }
}

impl fmt::Display for ErrorPayload {
    /// Formats faults as `details (code)`, one per line.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let ErrorPayload::Raw(value) = self {
            return write!(f, "{}", value);
        }
        let lines = self
            .faults()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        f.write_str(&lines.join("\n"))
    }
}

/// An asynchronous job.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncJob {
    /// Job ID.
    #[serde(default)]
    pub job_id: Option<String>,
    /// Current status.
    pub status: JobStatus,
    /// URL to query the job status.
    #[serde(default)]
    pub callback_url: Option<String>,
    /// URL of the request that started the job.
    #[serde(default)]
    pub request_url: Option<String>,
    /// HTTP method of the request that started the job.
    #[serde(default)]
    pub verb: Option<String>,
    /// Body of the request that started the job.
    #[serde(default)]
    pub request: Option<Value>,
    /// Result of a completed job.
    #[serde(default)]
    pub response: Option<Value>,
    /// Error of a failed job.
    #[serde(default)]
    pub error: Option<ErrorPayload>,
}

impl AsyncJob {
    /// Token identifying the job in the status URL.
    pub fn status_token(&self) -> Result<&str, Error> {
        let callback = self.callback_url.as_deref().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidResponse,
                format!("Job with status {} has no callbackUrl", self.status),
            )
        })?;
        let token = callback
            .rfind(STATUS_MARKER)
            .map(|idx| &callback[idx + STATUS_MARKER.len()..])
            .map(|rest| rest.split(&['?', '#'][..]).next().unwrap_or(""))
            .unwrap_or("");
        if token.is_empty() {
            Err(Error::new(
                ErrorKind::InvalidResponse,
                format!("Cannot find the job token in callbackUrl {}", callback),
            ))
        } else {
            Ok(token)
        }
    }

    /// Human-readable description of the job error.
    pub fn error_message(&self) -> String {
        match self.error {
            Some(ref payload) => payload.to_string(),
            None => format!("Job finished with status {}", self.status),
        }
    }
}

/// Outcome of polling a job.
#[derive(Debug, Clone)]
pub enum JobOutcome {
    /// The job finished successfully.
    Completed(AsyncJob),
    /// The job finished with an error (or with a status that is not a success).
    Failed(AsyncJob),
    /// The job was still running when the poll timeout expired.
    DeadlineExceeded(AsyncJob),
}

impl JobOutcome {
    /// The last seen state of the job.
    pub fn job(&self) -> &AsyncJob {
        match self {
            JobOutcome::Completed(job)
            | JobOutcome::Failed(job)
            | JobOutcome::DeadlineExceeded(job) => job,
        }
    }

    /// Take the last seen state of the job.
    pub fn into_job(self) -> AsyncJob {
        match self {
            JobOutcome::Completed(job)
            | JobOutcome::Failed(job)
            | JobOutcome::DeadlineExceeded(job) => job,
        }
    }

    /// Whether the job will no longer change.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobOutcome::DeadlineExceeded(_))
    }

    /// Unwrap the response of a completed job.
    ///
    /// A failed job becomes an error of the given kind, a job that is still running becomes
    /// `OperationTimedOut`. Jobs without a response yield `Value::Null`.
    pub fn into_response(self, kind: ErrorKind) -> Result<Value, Error> {
        match self {
            JobOutcome::Completed(job) => Ok(job.response.unwrap_or(Value::Null)),
            JobOutcome::Failed(job) => Err(Error::new(kind, job.error_message())),
            JobOutcome::DeadlineExceeded(job) => Err(Error::new(
                ErrorKind::OperationTimedOut,
                format!(
                    "Job {} is still running",
                    job.job_id.as_deref().unwrap_or("<unknown>")
                ),
            )),
        }
    }
}

/// A request that starts an asynchronous DNS job.
#[derive(Debug)]
#[must_use = "the request is only sent on submit"]
pub struct AsyncRequest<'s> {
    session: &'s Session,
    method: Method,
    path: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Value>,
    error_kind: Option<ErrorKind>,
    poll: PollSettings,
}

impl<'s> AsyncRequest<'s> {
    /// Prepare a request to the given path under the DNS endpoint.
    pub fn new<I>(session: &'s Session, method: Method, path: I) -> AsyncRequest<'s>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        AsyncRequest {
            session,
            method,
            path: path.into_iter().map(|s| s.as_ref().to_string()).collect(),
            query: Vec::new(),
            body: None,
            error_kind: None,
            poll: session.poll_settings(),
        }
    }

    /// Add a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<AsyncRequest<'s>, Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Add a query parameter.
    pub fn query<K, V>(mut self, key: K, value: V) -> AsyncRequest<'s>
    where
        K: Into<String>,
        V: ToString,
    {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Fail with an error of this kind if the job finishes with `ERROR`.
    ///
    /// Without it, failed jobs are returned as `JobOutcome::Failed`.
    pub fn error_kind(mut self, kind: ErrorKind) -> AsyncRequest<'s> {
        self.error_kind = Some(kind);
        self
    }

    /// Override the poll settings of the session.
    pub fn poll_settings(mut self, poll: PollSettings) -> AsyncRequest<'s> {
        self.poll = poll;
        self
    }

    /// Send the request and poll the job until it is no longer running.
    ///
    /// Transport errors and HTTP errors of both the initial request and the status requests
    /// are returned as is, nothing is retried.
    pub async fn submit(self) -> Result<JobOutcome, Error> {
        let mut builder = self
            .session
            .request(CLOUD_DNS, self.method.clone(), &self.path)
            .await?;
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        if let Some(ref body) = self.body {
            builder = builder.json(body);
        }

        let job: AsyncJob = builder.fetch_json().await?;
        let started = Instant::now();
        debug!(
            "{} {:?} started job {:?} with status {}",
            self.method, self.path, job.job_id, job.status
        );

        let job = if job.status.is_running() {
            let url = status_url(self.session, &job).await?;
            poll(self.session, job, url, self.poll, started).await?
        } else {
            job
        };

        finish(job, self.error_kind)
    }
}

/// Build the URL to check the job status.
pub(crate) async fn status_url(session: &Session, job: &AsyncJob) -> Result<Url, Error> {
    let token = job.status_token()?;
    let mut url = session.get_endpoint(CLOUD_DNS, &["status", token]).await?;
    let _ = url.query_pairs_mut().append_pair("showDetails", "true");
    Ok(url)
}

async fn poll(
    session: &Session,
    mut job: AsyncJob,
    url: Url,
    settings: PollSettings,
    started: Instant,
) -> Result<AsyncJob, Error> {
    while job.status.is_running() {
        if started.elapsed() >= settings.timeout {
            warn!(
                "Job {:?} is still running after {:?}",
                job.job_id, settings.timeout
            );
            return Ok(job);
        }

        trace!("Polling job status at {}", url);
        job = session
            .request_url(Method::GET, url.clone())
            .fetch_json()
            .await?;

        if job.status.is_running() && !settings.delay.is_zero() {
            sleep(settings.delay).await;
        }
    }

    Ok(job)
}

fn finish(job: AsyncJob, error_kind: Option<ErrorKind>) -> Result<JobOutcome, Error> {
    match job.status {
        JobStatus::Completed => Ok(JobOutcome::Completed(job)),
        JobStatus::Running => Ok(JobOutcome::DeadlineExceeded(job)),
        JobStatus::Error => match error_kind {
            Some(kind) => Err(Error::new(kind, job.error_message())),
            None => Ok(JobOutcome::Failed(job)),
        },
        JobStatus::Initialized | JobStatus::Unknown => {
            debug!("Job {:?} stopped with status {}", job.job_id, job.status);
            Ok(JobOutcome::Failed(job))
        }
    }
}
