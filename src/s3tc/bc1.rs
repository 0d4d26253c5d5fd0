// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use arrayvec::ArrayVec;
use bitvec::prelude::*;

use crate::color::{ColorImpl, Rgba, TRANSPARENT};
use crate::pack::Unpack;
use crate::s3tc::Block;

/// A BC1 ("DXT1") color block: two RGB565 endpoints and sixteen 2-bit palette codes.
///
/// The same layout is the color half of BC2 and BC3 blocks, which always use the
/// four-color palette. See [`BC1Block::opaque_from_bytes`].
#[derive(Clone, Debug)]
pub struct BC1Block {
    palette: [Rgba; 4],
    codes: ArrayVec<u8, 16>,
}

impl BC1Block {
    fn endpoints(bytes: &[u8]) -> (u16, u16) {
        let bits = bytes.view_bits::<Lsb0>();
        (bits[0..16].load_le(), bits[16..32].load_le())
    }

    fn codes(bytes: &[u8]) -> ArrayVec<u8, 16> {
        // 2 bits per texel, row-major, least significant bits first
        bytes.view_bits::<Lsb0>()[32..64]
            .chunks_exact(2)
            .unpack_le::<u8>()
            .collect()
    }

    /// Decode a color block without the punch-through mode: codes 2 and 3 are always
    /// the 2:1 and 1:2 blends regardless of endpoint order.
    pub fn opaque_from_bytes(bytes: &[u8]) -> Self {
        let (color0, color1) = Self::endpoints(bytes);
        let c0 = Rgba::from_565(color0);
        let c1 = Rgba::from_565(color1);

        Self {
            palette: [c0, c1, c0.third(&c1), c1.third(&c0)],
            codes: Self::codes(bytes),
        }
    }

    pub fn color(&self, index: usize) -> Rgba {
        self.palette[self.codes[index] as usize]
    }
}

impl Block for BC1Block {
    const SIZE: usize = 8;
    const CHANNELS: usize = 4;

    fn from_bytes(bytes: &[u8]) -> Self {
        let (color0, color1) = Self::endpoints(bytes);
        let c0 = Rgba::from_565(color0);
        let c1 = Rgba::from_565(color1);

        let palette = if color0 > color1 {
            [c0, c1, c0.third(&c1), c1.third(&c0)]
        } else {
            [c0, c1, c0.half(&c1), TRANSPARENT]
        };

        Self {
            palette,
            codes: Self::codes(bytes),
        }
    }

    fn write_texel(&self, index: usize, out: &mut [u8]) {
        out.copy_from_slice(&self.color(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(color0: u16, color1: u16, codes: u32) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0..2].copy_from_slice(&color0.to_le_bytes());
        bytes[2..4].copy_from_slice(&color1.to_le_bytes());
        bytes[4..8].copy_from_slice(&codes.to_le_bytes());
        bytes
    }

    #[test]
    fn four_color_mode() {
        // white over black, codes 0,1,2,3 across the first row
        let b = BC1Block::from_bytes(&block(0xFFFF, 0x0000, 0b11_10_01_00));
        assert_eq!(b.color(0), [255, 255, 255, 255]);
        assert_eq!(b.color(1), [0, 0, 0, 255]);
        assert_eq!(b.color(2), [170, 170, 170, 255]);
        assert_eq!(b.color(3), [85, 85, 85, 255]);
    }

    #[test]
    fn punch_through_mode() {
        let b = BC1Block::from_bytes(&block(0x0000, 0xFFFF, 0b11_10_01_00));
        assert_eq!(b.color(2), [127, 127, 127, 255]);
        assert_eq!(b.color(3), [0, 0, 0, 0]);

        let equal = BC1Block::from_bytes(&block(0x1234, 0x1234, 0xFFFF_FFFF));
        for i in 0..16 {
            assert_eq!(equal.color(i), [0, 0, 0, 0], "texel {i}");
        }
    }

    #[test]
    fn opaque_ignores_endpoint_order() {
        let b = BC1Block::opaque_from_bytes(&block(0x0000, 0xFFFF, 0b11_10));
        assert_eq!(b.color(0), [85, 85, 85, 255]);
        assert_eq!(b.color(1), [170, 170, 170, 255]);
        assert_eq!(b.color(2), [0, 0, 0, 255]);
    }

    #[test]
    fn codes_are_row_major() {
        // last texel (row 3, column 3) uses the top two bits
        let b = BC1Block::from_bytes(&block(0xFFFF, 0x0000, 0x4000_0000));
        assert_eq!(b.color(15), [0, 0, 0, 255]);
        assert_eq!(b.color(14), [255, 255, 255, 255]);
    }
}
