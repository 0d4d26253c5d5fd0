// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Forward-only cursor over a token stream. Reads past the end yield [`None`].
#[derive(Clone, Debug)]
pub struct TokenReader<'a> {
    tokens: &'a [u32],
    pos: usize,
}

impl<'a> TokenReader<'a> {
    pub fn new(tokens: &'a [u32]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }

    pub fn peek(&self) -> Option<u32> {
        self.tokens.get(self.pos).copied()
    }

    pub fn read(&mut self) -> Option<u32> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    /// Read `N` tokens, or none at all if fewer remain
    pub fn read_array<const N: usize>(&mut self) -> Option<[u32; N]> {
        let tokens: [u32; N] = self.tokens.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(tokens)
    }

    pub fn skip(&mut self, count: usize) {
        self.pos = usize::min(self.pos + count, self.tokens.len());
    }
}

/// Split a byte blob into little-endian 32-bit tokens, dropping any trailing partial word
pub fn tokens_from_bytes(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
