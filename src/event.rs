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

//! Log events and the options that populate them.

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::Serialize;

use crate::Level;
use crate::Value;
use crate::layout::Format;

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ` in UTC.
///
/// ```
/// use flatlog::event::format_timestamp;
///
/// let ts = "2024-08-11T14:44:57.1729Z".parse().unwrap();
/// assert_eq!(format_timestamp(ts), "2024-08-11T14:44:57.172Z");
/// ```
pub fn format_timestamp(ts: Timestamp) -> String {
    let dt = ts.to_zoned(TimeZone::UTC);
    format!(
        "{}.{:03}Z",
        dt.strftime("%Y-%m-%dT%H:%M:%S"),
        dt.millisecond()
    )
}

/// A single log event.
///
/// Events are created per logging call, populated by [`EventOption`]s and then rendered by a
/// [`Format`].
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    time: String,
    uuid: String,
    host: String,
    app: String,
    level: Level,
    #[serde(skip_serializing_if = "String::is_empty")]
    msg: String,
    #[serde(rename = "event", skip_serializing_if = "Value::is_empty")]
    payload: Value,
    #[serde(skip)]
    format: Option<Format>,
}

impl Event {
    /// Create an event observed at `time` with the given id and level.
    pub fn new(level: Level, uuid: impl Into<String>, time: Timestamp) -> Self {
        Self {
            time: format_timestamp(time),
            uuid: uuid.into(),
            host: String::new(),
            app: String::new(),
            level,
            msg: String::new(),
            payload: Value::Absent,
            format: None,
        }
    }

    /// Apply options in order; a later option overrides an earlier one for the same field.
    pub fn with_options(mut self, options: impl IntoIterator<Item = EventOption>) -> Self {
        for option in options {
            option.apply(&mut self);
        }
        self
    }

    /// The formatted UTC time.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// The unique id.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// The host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The application name.
    pub fn app(&self) -> &str {
        &self.app
    }

    /// The severity level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The message, empty if none was set.
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// The nested payload, [`Value::Absent`] if none was set.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// The format mode; key-value pairs unless set otherwise.
    pub fn format(&self) -> Format {
        self.format.unwrap_or_default()
    }
}

/// Sets one field of an [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventOption {
    /// Set the message.
    Msg(String),
    /// Set the nested payload.
    Payload(Value),
    /// Override the host.
    Host(String),
    /// Override the application name.
    App(String),
    /// Override the format mode.
    Format(Format),
}

impl EventOption {
    /// Set the field this option targets.
    pub fn apply(self, event: &mut Event) {
        match self {
            EventOption::Msg(msg) => event.msg = msg,
            EventOption::Payload(payload) => event.payload = payload,
            EventOption::Host(host) => event.host = host,
            EventOption::App(app) => event.app = app,
            EventOption::Format(format) => event.format = Some(format),
        }
    }
}

/// Set the message of an event.
pub fn msg(msg: impl Into<String>) -> EventOption {
    EventOption::Msg(msg.into())
}

/// Set the nested payload of an event.
///
/// # Examples
///
/// ```
/// use flatlog::Value;
/// use flatlog::event;
///
/// let option = event::payload([("status", Value::from(200)), ("path", "/".into())]
///     .into_iter()
///     .collect::<Value>());
/// ```
pub fn payload(payload: impl Into<Value>) -> EventOption {
    EventOption::Payload(payload.into())
}

/// Override the host of an event.
pub fn host(host: impl Into<String>) -> EventOption {
    EventOption::Host(host.into())
}

/// Override the application name of an event.
pub fn app(app: impl Into<String>) -> EventOption {
    EventOption::App(app.into())
}

/// Override the format mode of an event.
pub fn format(format: Format) -> EventOption {
    EventOption::Format(format)
}

/// Build a message option from format arguments.
///
/// # Examples
///
/// ```
/// use flatlog::event::EventOption;
///
/// let option = flatlog::msgf!("served {} in {}ms", "/health", 3);
/// assert_eq!(option, EventOption::Msg("served /health in 3ms".to_string()));
/// ```
#[macro_export]
macro_rules! msgf {
    ($($arg:tt)+) => {
        $crate::event::EventOption::Msg(::std::format!($($arg)+))
    };
}
