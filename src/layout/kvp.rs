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

use std::fmt::Write;

use crate::Error;
use crate::event::Event;
use crate::flatten::FlatMap;
use crate::flatten::flatten;
use crate::layout::Layout;

/// The prefix of flattened payload keys.
pub(crate) const PAYLOAD_PREFIX: &str = "event_";

/// Render a flat map as `"key"="value" ` tokens.
///
/// Every token, including the last, is followed by a space. Values that are not scalars are
/// omitted and reported through the `log` facade. Neither keys nor values are escaped.
///
/// # Examples
///
/// ```
/// use flatlog::Value;
/// use flatlog::flatten::FlatMap;
/// use flatlog::layout::render;
///
/// let flat = FlatMap::from([("k".to_string(), Value::from("v"))]);
/// assert_eq!(render(&flat), r#""k"="v" "#);
/// ```
pub fn render(flat: &FlatMap) -> String {
    let mut text = String::new();

    for (key, value) in flat {
        if !value.is_scalar() {
            log::warn!(
                "omit unsupported value from key-value output: key={key} type={}",
                value.type_name()
            );
            continue;
        }

        // SAFETY: write to a string always succeeds
        write!(&mut text, "\"{key}\"=\"{value}\" ").unwrap();
    }

    text
}

/// A layout that formats an event as a single line of quoted key-value pairs.
///
/// The payload is flattened with the `event_` prefix and appended after the fixed fields.
///
/// Output format:
///
/// ```text
/// "date"="2024-08-11T14:44:57.172Z" "uuid"="0b5c3b8e-8f0a-4f4e-9d6c-2f0a1e6b7c11" "host"="web-1" "app"="shop" "level"="INFO" "msg"="served" "event_path"="/" "event_status"="200"
/// ```
///
/// # Examples
///
/// ```
/// use flatlog::layout::KvpLayout;
///
/// let layout = KvpLayout::default();
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct KvpLayout {}

impl Layout for KvpLayout {
    fn format(&self, event: &Event) -> Result<Vec<u8>, Error> {
        let flat = flatten(event.payload(), PAYLOAD_PREFIX)?;
        let payload = render(&flat);

        let text = format!(
            r#""date"="{}" "uuid"="{}" "host"="{}" "app"="{}" "level"="{}" "msg"="{}" {}"#,
            event.time(),
            event.uuid(),
            event.host(),
            event.app(),
            event.level(),
            event.msg(),
            payload,
        );

        Ok(text.into_bytes())
    }
}
