// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::s3tc::bc4::BC4Block;
use crate::s3tc::Block;

/// A BC5 block decoded as two independent BC4 channels: red from bytes 0..8,
/// green from bytes 8..16
#[derive(Clone, Debug)]
pub struct BC5Block(BC4Block, BC4Block);

impl Block for BC5Block {
    const SIZE: usize = 16;
    const CHANNELS: usize = 2;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self(
            BC4Block::from_bytes(&bytes[0..8]),  // BC4 channel 0
            BC4Block::from_bytes(&bytes[8..16]), // BC4 channel 1
        )
    }

    fn write_texel(&self, index: usize, out: &mut [u8]) {
        out[0] = self.0.value(index);
        out[1] = self.1.value(index);
    }
}

/// A BC5 block decoded the way the legacy asset explorer does it: the green channel
/// is built from the same eight bytes as the red channel, so both channels are equal
/// and bytes 8..16 are never read.
///
/// Kept for bit-exact comparison against that tool. Use [`BC5Block`] for a
/// conforming decode.
#[derive(Clone, Debug)]
pub struct MirroredBC5Block(BC4Block);

impl Block for MirroredBC5Block {
    const SIZE: usize = 16;
    const CHANNELS: usize = 2;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self(BC4Block::from_bytes(&bytes[0..8]))
    }

    fn write_texel(&self, index: usize, out: &mut [u8]) {
        let value = self.0.value(index);
        out[0] = value;
        out[1] = value;
    }
}
