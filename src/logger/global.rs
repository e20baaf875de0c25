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

use std::fmt;
use std::sync::OnceLock;

use crate::Level;
use crate::Logger;
use crate::LoggerBuilder;
use crate::event::EventOption;

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();
static DEFAULT_THRESHOLD: OnceLock<Level> = OnceLock::new();

/// The threshold free functions route with unless [`set_default_threshold`] is called first.
pub const INITIAL_DEFAULT_THRESHOLD: Level = Level::Debug;

/// Return the process-wide logger used by the free logging functions.
///
/// If none was set, a logger configured from the `FLATLOG_*` environment variables is created
/// on first use.
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(|| LoggerBuilder::from_default_env().build())
}

/// Set the process-wide logger used by the free logging functions.
///
/// # Errors
///
/// Return the logger back if the default logger was already set or used.
pub fn set_default_logger(logger: Logger) -> Result<(), Logger> {
    DEFAULT_LOGGER.set(logger)
}

/// Return the threshold the free logging functions route with.
///
/// This is independent of the threshold of [`default_logger`]. It is
/// [`INITIAL_DEFAULT_THRESHOLD`] unless set before first use.
pub fn default_threshold() -> Level {
    *DEFAULT_THRESHOLD.get_or_init(|| INITIAL_DEFAULT_THRESHOLD)
}

/// Set the threshold the free logging functions route with.
///
/// # Errors
///
/// Return the level back if the threshold was already set or used.
pub fn set_default_threshold(level: Level) -> Result<(), Level> {
    DEFAULT_THRESHOLD.set(level)
}

/// Log an event at `level` with the default logger.
///
/// # Examples
///
/// ```
/// use flatlog::Level;
/// use flatlog::event;
///
/// flatlog::log_event(Level::Info, [event::msg("hello")]);
/// ```
pub fn log_event(level: Level, options: impl IntoIterator<Item = EventOption>) {
    default_logger().log_with_threshold(default_threshold(), level, options);
}

/// Log a message built from format arguments at `level` with the default logger.
pub fn log_args(level: Level, args: fmt::Arguments) {
    log_event(level, [EventOption::Msg(args.to_string())]);
}

/// Log an event at [`Level::Trace`] with the default logger.
pub fn trace(options: impl IntoIterator<Item = EventOption>) {
    log_event(Level::Trace, options);
}

/// Log an event at [`Level::Debug`] with the default logger.
pub fn debug(options: impl IntoIterator<Item = EventOption>) {
    log_event(Level::Debug, options);
}

/// Log an event at [`Level::Info`] with the default logger.
pub fn info(options: impl IntoIterator<Item = EventOption>) {
    log_event(Level::Info, options);
}

/// Log an event at [`Level::Warn`] with the default logger.
pub fn warn(options: impl IntoIterator<Item = EventOption>) {
    log_event(Level::Warn, options);
}

/// Log an event at [`Level::Error`] with the default logger.
pub fn error(options: impl IntoIterator<Item = EventOption>) {
    log_event(Level::Error, options);
}

/// Log an event at [`Level::Critical`] with the default logger and exit the process once it
/// is written.
pub fn critical(options: impl IntoIterator<Item = EventOption>) {
    log_event(Level::Critical, options);
}
