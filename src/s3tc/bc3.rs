// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::s3tc::bc1::BC1Block;
use crate::s3tc::bc4::BC4Block;
use crate::s3tc::Block;

/// A BC3 ("DXT5") block: a BC4 alpha block followed by an opaque BC1 color block
#[derive(Clone, Debug)]
pub struct BC3Block(BC4Block, BC1Block);

impl Block for BC3Block {
    const SIZE: usize = 16;
    const CHANNELS: usize = 4;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self(
            BC4Block::from_bytes(&bytes[0..8]), // BC4 Alpha
            BC1Block::opaque_from_bytes(&bytes[8..16]), // BC1 RGB
        )
    }

    fn write_texel(&self, index: usize, out: &mut [u8]) {
        let color = self.1.color(index);
        out[0..3].copy_from_slice(&color[0..3]);
        out[3] = self.0.value(index);
    }
}
