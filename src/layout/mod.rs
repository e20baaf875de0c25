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

//! Layouts for formatting log events.

use std::fmt;
use std::str::FromStr;

use crate::Error;
use crate::ErrorKind;
use crate::event::Event;

mod json;
mod kvp;

pub use self::json::JsonLayout;
pub use self::kvp::KvpLayout;
pub use self::kvp::render;

/// A layout for formatting log events.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Formats a log event.
    fn format(&self, event: &Event) -> Result<Vec<u8>, Error>;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// The wire format of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// One JSON object per line, payload kept nested.
    Json,
    /// One line of `"key"="value"` pairs, payload flattened.
    #[default]
    Kvp,
}

impl Format {
    /// Return the configuration name of the `Format`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Kvp => "kvp",
        }
    }

    /// Format a log event with the layout of this format.
    pub fn format(&self, event: &Event) -> Result<Vec<u8>, Error> {
        match self {
            Format::Json => JsonLayout::default().format(event),
            Format::Kvp => KvpLayout::default().format(event),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Format, Self::Err> {
        if s.eq_ignore_ascii_case("json") {
            Ok(Format::Json)
        } else if s.eq_ignore_ascii_case("kvp") {
            Ok(Format::Kvp)
        } else {
            Err(
                Error::new(ErrorKind::UnsupportedConfigValue, "malformed format mode")
                    .with_context("format", format!("{s:?}")),
            )
        }
    }
}
