// Copyright (C) 2025-present The RouteWeaver Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded text rendering support.

use std::fmt;

/// A `fmt::Write` sink over a fixed byte buffer with snprintf semantics:
/// output beyond the buffer is dropped while the total required length keeps
/// counting, so callers can detect truncation by comparing
/// [`required`](Self::required) against the buffer size.
///
/// Only suitable for ASCII output: truncation happens at a byte boundary,
/// not a character boundary.
pub(crate) struct TruncatingWriter<'a> {
    buf: &'a mut [u8],
    written: usize,
    required: usize,
}

impl<'a> TruncatingWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            written: 0,
            required: 0,
        }
    }

    /// Total length the output requires, including anything truncated.
    pub(crate) fn required(&self) -> usize {
        self.required
    }
}

impl fmt::Write for TruncatingWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.required += s.len();
        let room = self.buf.len() - self.written;
        let n = room.min(s.len());
        self.buf[self.written..self.written + n].copy_from_slice(&s.as_bytes()[..n]);
        self.written += n;
        Ok(())
    }
}
