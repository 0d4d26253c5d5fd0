// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use arrayvec::ArrayVec;
use bitvec::prelude::*;

use crate::color::build_ramp;
use crate::pack::Unpack;
use crate::s3tc::Block;

/// A single interpolated channel: two 8-bit endpoints and sixteen 3-bit ramp codes.
/// Also used as the alpha half of BC3 and for both halves of BC5.
#[derive(Clone, Debug)]
pub struct BC4Block {
    ramp: [u8; 8],
    codes: ArrayVec<u8, 16>,
}

impl BC4Block {
    pub fn value(&self, index: usize) -> u8 {
        self.ramp[self.codes[index] as usize]
    }
}

impl Block for BC4Block {
    const SIZE: usize = 8;
    const CHANNELS: usize = 1;

    fn from_bytes(bytes: &[u8]) -> Self {
        let bits = bytes.view_bits::<Lsb0>();

        // load endpoints
        let endpoint0: u8 = bits[0..8].load_le();
        let endpoint1: u8 = bits[8..16].load_le();

        // codes are two little-endian 24-bit fields (rows 0-1, rows 2-3), which read
        // together as one 48-bit little-endian run of 3-bit values
        let codes = bits[16..64].chunks_exact(3).unpack_le::<u8>().collect();

        Self {
            ramp: build_ramp(endpoint0, endpoint1),
            codes,
        }
    }

    fn write_texel(&self, index: usize, out: &mut [u8]) {
        out[0] = self.value(index);
    }
}
