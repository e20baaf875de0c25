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

//! Flatlog is a structured event logger that writes one line per event, either as JSON or as
//! flattened `"key"="value"` pairs.
//!
//! # Overview
//!
//! Every event carries a timestamp, a random id, the host and application names, a severity
//! level, an optional message and an optional payload. In key-value mode, nested payloads are
//! flattened into underscore-joined keys; in JSON mode they are kept as nested objects.
//!
//! Events at or above the logger's threshold go to stdout and the others go to stderr. No event
//! is dropped. Writing a [`Level::Critical`] event terminates the process with exit status
//! [`CRITICAL_EXIT_CODE`].
//!
//! # Examples
//!
//! Log with an explicit logger:
//!
//! ```
//! use flatlog::Value;
//! use flatlog::event;
//! use flatlog::layout::Format;
//!
//! let logger = flatlog::builder()
//!     .host("web-1")
//!     .app("shop")
//!     .format(Format::Json)
//!     .build();
//!
//! let order: Value = [("id", Value::from(42)), ("total", Value::from(9.5))]
//!     .into_iter()
//!     .collect();
//! logger.info([event::msg("order placed"), event::payload(order)]);
//! flatlog::warn!(logger, "{} retries left", 2);
//! ```
//!
//! Log with the process-wide logger, configured by the `FLATLOG_*` environment variables:
//!
//! ```
//! use flatlog::event;
//!
//! flatlog::info([event::msg("started")]);
//! flatlog::debug!("cache warmed in {}ms", 12);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod access;
pub mod append;
pub mod config;
pub mod event;
pub mod flatten;
pub mod id;
pub mod layout;
pub mod trap;

mod error;
pub use self::error::Error;
pub use self::error::ErrorKind;

mod level;
pub use self::level::Level;

mod value;
pub use self::value::Map;
pub use self::value::Value;

mod logger;
pub use self::logger::*;

mod macros;
