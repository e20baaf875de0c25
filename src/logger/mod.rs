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

mod builder;
pub use self::builder::LoggerBuilder;
pub use self::builder::builder;

mod log_impl;
pub use self::log_impl::CRITICAL_EXIT_CODE;
pub use self::log_impl::Logger;

mod global;
pub use self::global::INITIAL_DEFAULT_THRESHOLD;
pub use self::global::critical;
pub use self::global::debug;
pub use self::global::default_logger;
pub use self::global::default_threshold;
pub use self::global::error;
pub use self::global::info;
pub use self::global::log_args;
pub use self::global::log_event;
pub use self::global::set_default_logger;
pub use self::global::set_default_threshold;
pub use self::global::trace;
pub use self::global::warn;
