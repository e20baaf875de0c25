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

//! Plain logger configuration.
//!
//! A [`LoggerConfig`] can be deserialized from a configuration file or read from the environment,
//! then turned into a logger with [`LoggerBuilder::from_config`](crate::LoggerBuilder::from_config).

use serde::Deserialize;

/// The environment variable holding the host name.
pub const HOST_ENV: &str = "FLATLOG_HOST";
/// The environment variable holding the application name.
pub const APP_ENV: &str = "FLATLOG_APP";
/// The environment variable holding the format mode name.
pub const FORMAT_ENV: &str = "FLATLOG_FORMAT";
/// The environment variable holding the threshold level name.
pub const LEVEL_ENV: &str = "FLATLOG_LEVEL";
/// The environment variable holding comma-separated paths exempt from access logging.
pub const SKIP_PATHS_ENV: &str = "FLATLOG_SKIP_PATHS";

/// Logger settings as plain data.
///
/// Names of the format mode and the threshold are kept as strings; they are resolved when the
/// logger is built.
///
/// # Examples
///
/// ```
/// use flatlog::config::LoggerConfig;
///
/// let config: LoggerConfig = serde_json::from_str(r#"{"app":"shop","format":"json"}"#).unwrap();
/// assert_eq!(config.app, "shop");
/// assert_eq!(config.format.as_deref(), Some("json"));
/// assert!(config.skip_paths.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// The host name. The machine hostname is used if absent.
    pub host: Option<String>,
    /// The application name.
    pub app: String,
    /// The format mode name, `json` or `kvp`.
    pub format: Option<String>,
    /// The threshold level name.
    pub level: Option<String>,
    /// Request paths exempt from access logging.
    pub skip_paths: Vec<String>,
}

impl LoggerConfig {
    /// Read the configuration from the `FLATLOG_*` environment variables.
    ///
    /// Unset or non-unicode variables leave the corresponding setting at its default.
    pub fn from_default_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read the configuration with `lookup` resolving environment variable names.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatlog::config::LoggerConfig;
    ///
    /// let config = LoggerConfig::from_env_with(|key| match key {
    ///     "FLATLOG_LEVEL" => Some("warn".to_string()),
    ///     "FLATLOG_SKIP_PATHS" => Some("/health, /ready".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.level.as_deref(), Some("warn"));
    /// assert_eq!(config.skip_paths, ["/health", "/ready"]);
    /// ```
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let skip_paths = lookup(SKIP_PATHS_ENV)
            .map(|paths| {
                paths
                    .split(',')
                    .map(str::trim)
                    .filter(|path| !path.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        LoggerConfig {
            host: lookup(HOST_ENV),
            app: lookup(APP_ENV).unwrap_or_default(),
            format: lookup(FORMAT_ENV),
            level: lookup(LEVEL_ENV),
            skip_paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_with() {
        let config = LoggerConfig::from_env_with(|_| None);
        assert_eq!(config, LoggerConfig::default());

        let config = LoggerConfig::from_env_with(|key| match key {
            HOST_ENV => Some("web-1".to_string()),
            APP_ENV => Some("shop".to_string()),
            FORMAT_ENV => Some("JSON".to_string()),
            SKIP_PATHS_ENV => Some(",/health,, /metrics ,".to_string()),
            _ => None,
        });
        assert_eq!(config.host.as_deref(), Some("web-1"));
        assert_eq!(config.app, "shop");
        assert_eq!(config.format.as_deref(), Some("JSON"));
        assert_eq!(config.level, None);
        assert_eq!(config.skip_paths, ["/health", "/metrics"]);
    }

    #[test]
    fn test_deserialize() {
        let config: LoggerConfig = serde_json::from_str(
            r#"{"host":"web-1","level":"error","skip_paths":["/health"]}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            LoggerConfig {
                host: Some("web-1".to_string()),
                app: String::new(),
                format: None,
                level: Some("error".to_string()),
                skip_paths: vec!["/health".to_string()],
            }
        );
    }

    #[test]
    fn test_builder_falls_back_on_unrecognized_names() {
        let config = LoggerConfig {
            host: Some("web-1".to_string()),
            format: Some("yaml".to_string()),
            level: Some("loud".to_string()),
            ..Default::default()
        };
        let logger = crate::LoggerBuilder::from_config(config).build();
        assert_eq!(logger.host(), "web-1");
        assert_eq!(logger.format_mode(), crate::layout::Format::Kvp);
        assert_eq!(logger.threshold(), crate::Level::Info);
    }
}
