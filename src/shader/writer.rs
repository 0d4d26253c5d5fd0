// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::{self, Write};

/// Text sink with a fixed byte limit. Writes past the limit are cut at the last
/// character boundary that fits and later writes are dropped; writing never fails.
#[derive(Clone, Debug, Default)]
pub struct TextWriter {
    text: String,
    limit: Option<usize>,
}

impl TextWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(limit: usize) -> Self {
        Self {
            text: String::new(),
            limit: Some(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.text.len() >= limit)
    }

    /// Append formatted text, truncating at the limit
    pub fn append(&mut self, args: fmt::Arguments<'_>) {
        // write_str never fails, so neither can this
        let _ = self.write_fmt(args);
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl Write for TextWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = match self.limit {
            Some(limit) => limit.saturating_sub(self.text.len()),
            None => s.len(),
        };
        let mut end = usize::min(room, s.len());
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.text.push_str(&s[..end]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded() {
        let mut out = TextWriter::new();
        out.append(format_args!("{}_{}", "ps", 2));
        assert_eq!(out.into_string(), "ps_2");
    }

    #[test]
    fn truncates_at_limit() {
        let mut out = TextWriter::bounded(6);
        out.append(format_args!("ps_2_0\n"));
        assert!(out.is_full());
        out.append(format_args!("MOV"));
        assert_eq!(out.into_string(), "ps_2_0");
    }

    #[test]
    fn respects_char_boundaries() {
        let mut out = TextWriter::bounded(2);
        out.append(format_args!("aé"));
        assert_eq!(out.len(), 1);
    }
}
