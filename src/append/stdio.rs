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

use std::io::Write;

use crate::Error;
use crate::append::Append;

fn line(event: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(event.len() + 1);
    bytes.extend_from_slice(event);
    bytes.push(b'\n');
    bytes
}

/// An appender that prints events to stdout.
///
/// # Examples
///
/// ```
/// use flatlog::append::Stdout;
///
/// let stdout_appender = Stdout::default();
/// ```
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Stdout {}

impl Append for Stdout {
    fn append(&self, event: &[u8]) -> Result<(), Error> {
        // one write per event keeps concurrent lines whole
        std::io::stdout()
            .lock()
            .write_all(&line(event))
            .map_err(Error::from_io_error)
    }

    fn flush(&self) -> Result<(), Error> {
        std::io::stdout().flush().map_err(Error::from_io_error)
    }
}

/// An appender that prints events to stderr.
///
/// # Examples
///
/// ```
/// use flatlog::append::Stderr;
///
/// let stderr_appender = Stderr::default();
/// ```
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Stderr {}

impl Append for Stderr {
    fn append(&self, event: &[u8]) -> Result<(), Error> {
        std::io::stderr()
            .lock()
            .write_all(&line(event))
            .map_err(Error::from_io_error)
    }

    fn flush(&self) -> Result<(), Error> {
        std::io::stderr().flush().map_err(Error::from_io_error)
    }
}
