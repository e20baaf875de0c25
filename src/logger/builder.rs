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

use crate::Level;
use crate::Logger;
use crate::append;
use crate::append::Append;
use crate::config::LoggerConfig;
use crate::id::IdGenerator;
use crate::id::RandomIdGenerator;
use crate::layout::Format;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// Create a new [`LoggerBuilder`] with default settings.
///
/// # Examples
///
/// ```
/// let logger = flatlog::builder().app("shop").build();
/// logger.info([flatlog::event::msg("started")]);
/// ```
pub fn builder() -> LoggerBuilder {
    LoggerBuilder::new()
}

/// A builder for configuring a [`Logger`].
///
/// By default a logger renders key-value lines, routes events at or above [`Level::Info`] to
/// stdout and the rest to stderr, and uses the machine hostname as host.
///
/// # Examples
///
/// ```
/// use flatlog::Level;
/// use flatlog::layout::Format;
///
/// let logger = flatlog::builder()
///     .host("web-1")
///     .app("shop")
///     .format(Format::Json)
///     .threshold(Level::Warn)
///     .skip_path("/health")
///     .build();
/// ```
#[must_use = "call `build` to construct a logger instance"]
#[derive(Debug)]
pub struct LoggerBuilder {
    host: Option<String>,
    app: String,
    format: Format,
    threshold: Level,
    skip_paths: Vec<String>,
    stdout: Box<dyn Append>,
    stderr: Box<dyn Append>,
    ids: Box<dyn IdGenerator>,
    trap: Box<dyn Trap>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        LoggerBuilder {
            host: None,
            app: String::new(),
            format: Format::default(),
            threshold: Level::default(),
            skip_paths: vec![],
            stdout: Box::new(append::Stdout::default()),
            stderr: Box::new(append::Stderr::default()),
            ids: Box::new(RandomIdGenerator::default()),
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Create a builder from a plain configuration object.
    ///
    /// Unrecognized format or level names fall back to the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatlog::Level;
    /// use flatlog::LoggerBuilder;
    /// use flatlog::config::LoggerConfig;
    ///
    /// let config = LoggerConfig {
    ///     app: "shop".to_string(),
    ///     level: Some("debug".to_string()),
    ///     ..Default::default()
    /// };
    /// let logger = LoggerBuilder::from_config(config).build();
    /// assert_eq!(logger.threshold(), Level::Debug);
    /// ```
    pub fn from_config(config: LoggerConfig) -> Self {
        let mut builder = LoggerBuilder::new()
            .app(config.app)
            .skip_paths(config.skip_paths);
        if let Some(host) = config.host {
            builder = builder.host(host);
        }
        if let Some(format) = config.format {
            builder = builder.format_name(&format);
        }
        if let Some(level) = config.level {
            builder = builder.level_name(&level);
        }
        builder
    }

    /// Create a builder configured by the `FLATLOG_*` environment variables.
    ///
    /// See [`LoggerConfig::from_default_env`].
    pub fn from_default_env() -> Self {
        Self::from_config(LoggerConfig::from_default_env())
    }

    /// Set the host name. Default to the machine hostname.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the application name.
    pub fn app(mut self, app: impl Into<String>) -> Self {
        self.app = app.into();
        self
    }

    /// Set the format mode. Default to [`Format::Kvp`].
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Set the format mode by name (`json` or `kvp`, case-insensitive).
    ///
    /// An unrecognized name falls back to [`Format::Kvp`].
    pub fn format_name(self, name: &str) -> Self {
        let format = name.parse::<Format>().unwrap_or_else(|err| {
            log::warn!("{err}; fall back to {}", Format::Kvp);
            Format::Kvp
        });
        self.format(format)
    }

    /// Set the severity threshold. Default to [`Level::Info`].
    ///
    /// Events at or above the threshold go to the stdout appender, the others to the stderr
    /// appender.
    pub fn threshold(mut self, threshold: Level) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the severity threshold by name (case-insensitive).
    ///
    /// An unrecognized name falls back to [`Level::Info`].
    pub fn level_name(self, name: &str) -> Self {
        let level = name.parse::<Level>().unwrap_or_else(|err| {
            log::warn!("{err}; fall back to {}", Level::Info);
            Level::Info
        });
        self.threshold(level)
    }

    /// Exempt a request path from access logging.
    pub fn skip_path(mut self, path: impl Into<String>) -> Self {
        self.skip_paths.push(path.into());
        self
    }

    /// Exempt several request paths from access logging.
    pub fn skip_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Set the appender for events at or above the threshold. Default to [`append::Stdout`].
    pub fn stdout(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.stdout = append.into();
        self
    }

    /// Set the appender for events below the threshold. Default to [`append::Stderr`].
    pub fn stderr(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.stderr = append.into();
        self
    }

    /// Set the event id generator. Default to [`RandomIdGenerator`].
    pub fn id_generator(mut self, ids: impl Into<Box<dyn IdGenerator>>) -> Self {
        self.ids = ids.into();
        self
    }

    /// Set the trap receiving errors of failed logging calls. Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Build the [`Logger`].
    pub fn build(self) -> Logger {
        Logger {
            host: self.host.unwrap_or_else(detect_host),
            app: self.app,
            format: self.format,
            threshold: self.threshold,
            skip_paths: self.skip_paths,
            stdout: self.stdout,
            stderr: self.stderr,
            ids: self.ids,
            trap: self.trap,
        }
    }
}

#[cfg(feature = "hostname")]
fn detect_host() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(err) => {
            log::warn!("could not determine hostname: {err}");
            String::new()
        }
    }
}

#[cfg(not(feature = "hostname"))]
fn detect_host() -> String {
    String::new()
}
