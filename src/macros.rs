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

// A leading string literal selects the default logger; otherwise the first argument is the
// logger.
#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:expr; $fmt:literal $($arg:tt)*) => {
        $crate::log_args($level, ::std::format_args!($fmt $($arg)*))
    };
    ($level:expr; $logger:expr, $($arg:tt)+) => {
        $logger.log_args($level, ::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at [`Level::Trace`](crate::Level::Trace).
///
/// # Examples
///
/// ```
/// let logger = flatlog::builder().build();
/// flatlog::trace!(logger, "polling {}", "queue");
/// flatlog::trace!("polling {}", "queue");
/// ```
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        $crate::__log!($crate::Level::Trace; $($arg)+)
    };
}

/// Log a formatted message at [`Level::Debug`](crate::Level::Debug).
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::__log!($crate::Level::Debug; $($arg)+)
    };
}

/// Log a formatted message at [`Level::Info`](crate::Level::Info).
///
/// # Examples
///
/// ```
/// let logger = flatlog::builder().app("shop").build();
/// flatlog::info!(logger, "listening on {}", 8080);
/// ```
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::__log!($crate::Level::Info; $($arg)+)
    };
}

/// Log a formatted message at [`Level::Warn`](crate::Level::Warn).
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::__log!($crate::Level::Warn; $($arg)+)
    };
}

/// Log a formatted message at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::__log!($crate::Level::Error; $($arg)+)
    };
}

/// Log a formatted message at [`Level::Critical`](crate::Level::Critical) and exit the process
/// once it is written.
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::__log!($crate::Level::Critical; $($arg)+)
    };
}
