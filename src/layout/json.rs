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

use crate::Error;
use crate::event::Event;
use crate::layout::Layout;

/// A JSON layout for formatting log events.
///
/// The payload is kept nested under `event`. An empty message or payload is omitted, while
/// `host` and `app` are always present.
///
/// Output format:
///
/// ```json
/// {"time":"2024-08-11T14:44:57.172Z","uuid":"0b5c3b8e-8f0a-4f4e-9d6c-2f0a1e6b7c11","host":"web-1","app":"shop","level":"INFO","msg":"served","event":{"path":"/","status":200}}
/// {"time":"2024-08-11T14:44:57.173Z","uuid":"4d7e2a9c-1b3f-4c8e-a6d5-7e9f0b1c2d3e","host":"web-1","app":"shop","level":"DEBUG"}
/// ```
///
/// # Examples
///
/// ```
/// use flatlog::layout::JsonLayout;
///
/// let json_layout = JsonLayout::default();
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct JsonLayout {}

impl Layout for JsonLayout {
    fn format(&self, event: &Event) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(event).map_err(Error::from_json_error)
    }
}
