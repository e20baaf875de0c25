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

use std::sync::Arc;
use std::sync::Mutex;

use crate::Error;
use crate::append::Append;

/// An appender that keeps events in memory so a test harness can inspect them.
///
/// Clones share the same buffer.
///
/// # Examples
///
/// ```
/// use flatlog::append::Append;
/// use flatlog::append::Testing;
///
/// let testing = Testing::default();
/// testing.clone().append(b"hello").unwrap();
/// assert_eq!(testing.lines(), vec!["hello".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Testing {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Testing {
    /// Return a copy of the events appended so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Remove and return the events appended so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Append for Testing {
    fn append(&self, event: &[u8]) -> Result<(), Error> {
        let line = String::from_utf8_lossy(event).into_owned();
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line);
        Ok(())
    }
}
