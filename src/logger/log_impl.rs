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

use jiff::Timestamp;

use crate::Error;
use crate::Level;
use crate::append::Append;
use crate::event;
use crate::event::Event;
use crate::event::EventOption;
use crate::id::IdGenerator;
use crate::layout::Format;
use crate::trap::Trap;

/// The exit status of the process after a [`Level::Critical`] event is written.
pub const CRITICAL_EXIT_CODE: i32 = 2;

/// A logger that renders events and routes them by severity.
///
/// Events at or above the threshold are written to the stdout appender; events below it are
/// written to the stderr appender. No event is dropped. Writing a [`Level::Critical`] event
/// terminates the process with [`CRITICAL_EXIT_CODE`].
///
/// Build one with [`LoggerBuilder`](crate::LoggerBuilder).
#[derive(Debug)]
pub struct Logger {
    pub(super) host: String,
    pub(super) app: String,
    pub(super) format: Format,
    pub(super) threshold: Level,
    pub(super) skip_paths: Vec<String>,
    pub(super) stdout: Box<dyn Append>,
    pub(super) stderr: Box<dyn Append>,
    pub(super) ids: Box<dyn IdGenerator>,
    pub(super) trap: Box<dyn Trap>,
}

impl Logger {
    /// The host name stamped on events.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The application name stamped on events.
    pub fn app(&self) -> &str {
        &self.app
    }

    /// The format mode events are rendered with unless an option overrides it.
    pub fn format_mode(&self) -> Format {
        self.format
    }

    /// The severity threshold.
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Whether access logging is disabled for `path`.
    pub fn is_skipped(&self, path: &str) -> bool {
        self.skip_paths.iter().any(|p| p == path)
    }

    /// Render an event at `level` populated by `options`.
    ///
    /// The logger's host, application and format mode are applied before `options`, so options
    /// can override them.
    ///
    /// # Errors
    ///
    /// Return an error if no event id can be generated, if a key-value payload is not a map or
    /// a sequence, or if JSON encoding fails.
    pub fn format(
        &self,
        level: Level,
        options: impl IntoIterator<Item = EventOption>,
    ) -> Result<Vec<u8>, Error> {
        let uuid = self.ids.generate()?;
        let event = Event::new(level, uuid, Timestamp::now())
            .with_options([
                event::host(self.host.as_str()),
                event::app(self.app.as_str()),
                event::format(self.format),
            ])
            .with_options(options);

        event.format().format(&event)
    }

    /// Write a rendered event to the stream selected by `level` and the logger's threshold.
    pub fn emit(&self, level: Level, bytes: &[u8]) -> Result<(), Error> {
        self.route(self.threshold, level, bytes)
    }

    pub(crate) fn route(&self, threshold: Level, level: Level, bytes: &[u8]) -> Result<(), Error> {
        if level >= threshold {
            self.stdout.append(bytes)
        } else {
            self.stderr.append(bytes)
        }
    }

    /// Render and write an event at `level`.
    ///
    /// Failures are passed to the logger's trap and produce no output. If the event is
    /// [`Level::Critical`] and was written, the process exits with [`CRITICAL_EXIT_CODE`].
    pub fn log(&self, level: Level, options: impl IntoIterator<Item = EventOption>) {
        self.log_with_threshold(self.threshold, level, options);
    }

    pub(crate) fn log_with_threshold(
        &self,
        threshold: Level,
        level: Level,
        options: impl IntoIterator<Item = EventOption>,
    ) {
        let written = self
            .format(level, options)
            .and_then(|bytes| self.route(threshold, level, &bytes));

        match written {
            Ok(()) if level == Level::Critical => {
                self.flush();
                std::process::exit(CRITICAL_EXIT_CODE);
            }
            Ok(()) => {}
            Err(err) => self.trap.trap(&err),
        }
    }

    /// Log a message built from format arguments at `level`.
    pub fn log_args(&self, level: Level, args: fmt::Arguments) {
        self.log(level, [EventOption::Msg(args.to_string())]);
    }

    /// Log an event at [`Level::Trace`].
    pub fn trace(&self, options: impl IntoIterator<Item = EventOption>) {
        self.log(Level::Trace, options);
    }

    /// Log an event at [`Level::Debug`].
    pub fn debug(&self, options: impl IntoIterator<Item = EventOption>) {
        self.log(Level::Debug, options);
    }

    /// Log an event at [`Level::Info`].
    pub fn info(&self, options: impl IntoIterator<Item = EventOption>) {
        self.log(Level::Info, options);
    }

    /// Log an event at [`Level::Warn`].
    pub fn warn(&self, options: impl IntoIterator<Item = EventOption>) {
        self.log(Level::Warn, options);
    }

    /// Log an event at [`Level::Error`].
    pub fn error(&self, options: impl IntoIterator<Item = EventOption>) {
        self.log(Level::Error, options);
    }

    /// Log an event at [`Level::Critical`] and exit the process once it is written.
    pub fn critical(&self, options: impl IntoIterator<Item = EventOption>) {
        self.log(Level::Critical, options);
    }

    /// Flush both appenders.
    pub fn flush(&self) {
        for append in [&self.stdout, &self.stderr] {
            if let Err(err) = append.flush() {
                self.trap.trap(&err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::ErrorKind;
    use crate::Value;
    use crate::append::Testing;

    #[derive(Debug)]
    struct FixedId;

    impl IdGenerator for FixedId {
        fn generate(&self) -> Result<String, Error> {
            Ok("00000000-0000-4000-8000-000000000000".to_string())
        }
    }

    #[derive(Debug)]
    struct NoEntropy;

    impl IdGenerator for NoEntropy {
        fn generate(&self) -> Result<String, Error> {
            Err(Error::new(ErrorKind::IdGenerationFailure, "failed to create uuid"))
        }
    }

    #[derive(Debug, Clone, Default)]
    struct CollectTrap(Arc<Mutex<Vec<ErrorKind>>>);

    impl Trap for CollectTrap {
        fn trap(&self, err: &Error) {
            self.0.lock().unwrap().push(err.kind());
        }
    }

    fn sinks() -> (Testing, Testing, CollectTrap) {
        Default::default()
    }

    fn logger(out: &Testing, err: &Testing, trap: &CollectTrap) -> Logger {
        crate::builder()
            .host("web-1")
            .app("shop")
            .stdout(out.clone())
            .stderr(err.clone())
            .id_generator(FixedId)
            .trap(trap.clone())
            .build()
    }

    #[test]
    fn test_format_applies_logger_fields_before_options() {
        let (out, err, trap) = sinks();
        let logger = logger(&out, &err, &trap);

        let text = String::from_utf8(logger.format(Level::Info, []).unwrap()).unwrap();
        assert!(text.contains(concat!(
            r#""uuid"="00000000-0000-4000-8000-000000000000" "#,
            r#""host"="web-1" "app"="shop" "level"="INFO""#,
        )));

        let options = [event::host("web-2"), event::format(Format::Json)];
        let text = String::from_utf8(logger.format(Level::Info, options).unwrap()).unwrap();
        assert!(text.starts_with('{'));
        assert!(text.contains(r#""host":"web-2","app":"shop""#));
    }

    #[test]
    fn test_route_by_threshold() {
        let (out, err, trap) = sinks();
        let logger = logger(&out, &err, &trap);

        logger.debug([event::msg("below")]);
        logger.info([event::msg("at")]);
        logger.error([event::msg("above")]);

        let out = out.lines();
        let err = err.lines();
        assert_eq!(out.len(), 2);
        assert_eq!(err.len(), 1);
        assert!(out[0].contains(r#""msg"="at""#));
        assert!(out[1].contains(r#""msg"="above""#));
        assert!(err[0].contains(r#""level"="DEBUG" "msg"="below""#));
        assert!(trap.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failed_call_is_trapped_without_output() {
        let (out, err, trap) = sinks();
        let no_entropy = crate::builder()
            .stdout(out.clone())
            .stderr(err.clone())
            .id_generator(NoEntropy)
            .trap(trap.clone())
            .build();
        no_entropy.info([event::msg("lost")]);

        let scalar_payload = logger(&out, &err, &trap);
        scalar_payload.warn([event::payload(Value::from("not a map"))]);

        assert!(out.lines().is_empty());
        assert!(err.lines().is_empty());
        assert_eq!(
            *trap.0.lock().unwrap(),
            vec![ErrorKind::IdGenerationFailure, ErrorKind::InvalidInput]
        );
    }

    #[test]
    fn test_log_args() {
        let (out, err, trap) = sinks();
        let logger = logger(&out, &err, &trap);

        logger.log_args(Level::Warn, format_args!("{} requests", 3));
        assert!(out.lines()[0].contains(r#""level"="WARN" "msg"="3 requests""#));
    }
}
