// Copyright 2024 FastLabs Developers
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

//! HTTP access events.
//!
//! The types here are independent of any HTTP framework: middleware captures the request, runs
//! the next handler and hands the outcome to [`Logger::access`].

use std::time::Duration;
use std::time::Instant;

use jiff::Timestamp;

use crate::Logger;
use crate::Value;
use crate::event;
use crate::event::format_timestamp;

/// The outcome of one HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessRecord {
    /// When the request was received.
    pub time: Timestamp,
    /// The response status code.
    pub status: u16,
    /// The time spent handling the request.
    pub elapsed: Duration,
    /// The `X-Forwarded-For` request header, empty if absent.
    pub forwarded_for: String,
    /// The request method.
    pub method: String,
    /// The request URL path.
    pub path: String,
}

impl AccessRecord {
    /// The event payload of this record.
    ///
    /// The elapsed time is given in milliseconds as a decimal number.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use flatlog::Value;
    /// use flatlog::access::AccessRecord;
    ///
    /// let record = AccessRecord {
    ///     time: "2024-08-11T14:44:57.172Z".parse().unwrap(),
    ///     status: 200,
    ///     elapsed: Duration::from_micros(1500),
    ///     forwarded_for: String::new(),
    ///     method: "GET".to_string(),
    ///     path: "/".to_string(),
    /// };
    ///
    /// let Value::Map(payload) = record.payload() else { unreachable!() };
    /// assert_eq!(payload["req_elapsed"].to_string(), "1.5");
    /// assert_eq!(payload["req_time"].to_string(), "2024-08-11T14:44:57.172Z");
    /// ```
    pub fn payload(&self) -> Value {
        [
            ("req_time", Value::from(format_timestamp(self.time))),
            ("req_status", Value::from(self.status)),
            ("req_elapsed", Value::from(self.elapsed.as_nanos() as f64 / 1e6)),
            ("req_x_fwd_for", Value::from(self.forwarded_for.as_str())),
            ("req_method", Value::from(self.method.as_str())),
            ("req_url_path", Value::from(self.path.as_str())),
        ]
        .into_iter()
        .collect()
    }
}

/// Measures a request from arrival to response.
#[derive(Debug, Clone)]
pub struct AccessTimer {
    time: Timestamp,
    start: Instant,
    forwarded_for: String,
    method: String,
    path: String,
}

impl AccessTimer {
    /// Start measuring a request.
    pub fn start(
        method: impl Into<String>,
        path: impl Into<String>,
        forwarded_for: impl Into<String>,
    ) -> Self {
        Self {
            time: Timestamp::now(),
            start: Instant::now(),
            forwarded_for: forwarded_for.into(),
            method: method.into(),
            path: path.into(),
        }
    }

    /// Stop measuring and produce the record of the request.
    pub fn finish(self, status: u16) -> AccessRecord {
        AccessRecord {
            time: self.time,
            status,
            elapsed: self.start.elapsed(),
            forwarded_for: self.forwarded_for,
            method: self.method,
            path: self.path,
        }
    }
}

impl Logger {
    /// Log an access record at [`Level::Info`](crate::Level::Info), unless its path is exempt.
    pub fn access(&self, record: &AccessRecord) {
        if self.is_skipped(&record.path) {
            return;
        }
        self.info([event::payload(record.payload())]);
    }

    /// Run `next`, which returns the response status and the response, and log its access
    /// record.
    ///
    /// # Examples
    ///
    /// ```
    /// let logger = flatlog::builder().skip_path("/health").build();
    /// let body = logger.instrument("GET", "/orders", "", || (200, "[]"));
    /// assert_eq!(body, "[]");
    /// ```
    pub fn instrument<R>(
        &self,
        method: impl Into<String>,
        path: impl Into<String>,
        forwarded_for: impl Into<String>,
        next: impl FnOnce() -> (u16, R),
    ) -> R {
        let timer = AccessTimer::start(method, path, forwarded_for);
        let (status, response) = next();
        self.access(&timer.finish(status));
        response
    }
}
