// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use arrayvec::ArrayVec;
use bitvec::prelude::*;

use crate::pack::Unpack;
use crate::s3tc::bc1::BC1Block;
use crate::s3tc::Block;

/// A BC2 ("DXT3") block: 4-bit explicit alpha followed by an opaque BC1 color block
#[derive(Clone, Debug)]
pub struct BC2Block {
    alpha: ArrayVec<u8, 16>,
    color: BC1Block,
}

impl Block for BC2Block {
    const SIZE: usize = 16;
    const CHANNELS: usize = 4;

    fn from_bytes(bytes: &[u8]) -> Self {
        // one nibble per texel, low nibble first, replicated into a full byte
        let alpha = bytes.view_bits::<Lsb0>()[0..64]
            .chunks_exact(4)
            .unpack_le::<u8>()
            .map(|v| v | (v << 4))
            .collect();

        Self {
            alpha,
            color: BC1Block::opaque_from_bytes(&bytes[8..16]),
        }
    }

    fn write_texel(&self, index: usize, out: &mut [u8]) {
        let color = self.color.color(index);
        out[0..3].copy_from_slice(&color[0..3]);
        out[3] = self.alpha[index];
    }
}
