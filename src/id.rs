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

//! Unique identifiers for events.

use std::fmt;
use std::time::Duration;

use crate::Error;
use crate::ErrorKind;

/// A source of unique event identifiers.
pub trait IdGenerator: fmt::Debug + Send + Sync + 'static {
    /// Generate a new identifier.
    fn generate(&self) -> Result<String, Error>;
}

impl<T: IdGenerator> From<T> for Box<dyn IdGenerator> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// Generates random (version 4) UUIDs from the operating system's randomness source.
///
/// A failed read is retried after a short backoff until the attempts are exhausted.
///
/// # Examples
///
/// ```
/// use flatlog::id::IdGenerator;
/// use flatlog::id::RandomIdGenerator;
///
/// let id = RandomIdGenerator::default().generate().unwrap();
/// assert_eq!(id.len(), 36);
/// ```
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    attempts: usize,
    backoff: Duration,
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self {
            attempts: 10,
            backoff: Duration::from_millis(100),
        }
    }
}

impl RandomIdGenerator {
    /// Set the number of reads attempted before giving up. At least one read is always made.
    pub fn attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Set the pause between two failed reads.
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn generate_with<F, E>(&self, mut fill: F) -> Result<String, Error>
    where
        F: FnMut(&mut [u8]) -> Result<(), E>,
        E: Into<anyhow::Error>,
    {
        let mut bytes = [0u8; 16];
        let mut last_err = None;

        for attempt in 0..self.attempts {
            if attempt > 0 {
                std::thread::sleep(self.backoff);
            }
            match fill(&mut bytes) {
                Ok(()) => {
                    let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
                    return Ok(uuid.hyphenated().to_string());
                }
                Err(err) => last_err = Some(err.into()),
            }
        }

        let mut err = Error::new(ErrorKind::IdGenerationFailure, "failed to create uuid")
            .with_context("attempts", self.attempts);
        if let Some(source) = last_err {
            err = err.with_source(source);
        }
        Err(err)
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Result<String, Error> {
        self.generate_with(getrandom::getrandom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_formats_v4_uuid() {
        let id = RandomIdGenerator::default().generate().unwrap();
        let groups: Vec<_> = id.split('-').map(str::len).collect();
        assert_eq!(groups, vec![8, 4, 4, 4, 12]);
        // version nibble
        assert_eq!(id.as_bytes()[14], b'4');
        // variant bits 10xx
        assert!(matches!(id.as_bytes()[19], b'8' | b'9' | b'a' | b'b'));
    }

    #[test]
    fn test_generate_is_unique() {
        let generator = RandomIdGenerator::default();
        let a = generator.generate().unwrap();
        let b = generator.generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_retries_then_fails() {
        let generator = RandomIdGenerator::default()
            .attempts(3)
            .backoff(Duration::ZERO);

        let mut calls = 0;
        let err = generator
            .generate_with(|_| {
                calls += 1;
                Err(anyhow::anyhow!("entropy exhausted"))
            })
            .unwrap_err();
        assert_eq!(calls, 3);
        assert_eq!(err.kind(), ErrorKind::IdGenerationFailure);

        let mut calls = 0;
        let id = generator
            .generate_with(|bytes| {
                calls += 1;
                if calls < 2 {
                    return Err(anyhow::anyhow!("interrupted"));
                }
                bytes.fill(0xff);
                Ok(())
            })
            .unwrap();
        assert_eq!(id, "ffffffff-ffff-4fff-bfff-ffffffffffff");
    }
}
