// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use bitvec::prelude::*;

pub type Channel = u8;
pub type Rgba = [Channel; 4];

/// Fully transparent black, used by BC1 punch-through texels
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Expand a 5-bit channel to 8 bits, bit-exact with the reference hardware
pub fn expand5(v: u8) -> Channel {
    ((v as u16 * 527 + 23) >> 6) as Channel
}

/// Expand a 6-bit channel to 8 bits, bit-exact with the reference hardware
pub fn expand6(v: u8) -> Channel {
    ((v as u16 * 259 + 33) >> 6) as Channel
}

pub trait ColorImpl: Sized {
    fn r(&self) -> Channel;
    fn g(&self) -> Channel;
    fn b(&self) -> Channel;
    fn a(&self) -> Channel;

    fn from_565(packed: u16) -> Self;

    /// `(2 * self + other) / 3` per color channel, opaque
    fn third(&self, other: &Self) -> Self;

    /// `(self + other) / 2` per color channel, opaque
    fn half(&self, other: &Self) -> Self;
}

impl ColorImpl for Rgba {
    fn r(&self) -> Channel {
        self[0]
    }

    fn g(&self) -> Channel {
        self[1]
    }

    fn b(&self) -> Channel {
        self[2]
    }

    fn a(&self) -> Channel {
        self[3]
    }

    fn from_565(packed: u16) -> Self {
        let bits = packed.view_bits::<Lsb0>();
        let b: u8 = bits[0..5].load_le();
        let g: u8 = bits[5..11].load_le();
        let r: u8 = bits[11..16].load_le();

        [expand5(r), expand6(g), expand5(b), Channel::MAX]
    }

    fn third(&self, other: &Self) -> Self {
        let mix = |a: Channel, b: Channel| ((2 * a as u16 + b as u16) / 3) as Channel;
        [
            mix(self.r(), other.r()),
            mix(self.g(), other.g()),
            mix(self.b(), other.b()),
            Channel::MAX,
        ]
    }

    fn half(&self, other: &Self) -> Self {
        let mix = |a: Channel, b: Channel| ((a as u16 + b as u16) / 2) as Channel;
        [
            mix(self.r(), other.r()),
            mix(self.g(), other.g()),
            mix(self.b(), other.b()),
            Channel::MAX,
        ]
    }
}

/// Build the 8-entry interpolation ramp shared by BC3 alpha, BC4 and BC5 blocks.
///
/// When `a > b` the six intermediate values step evenly from `a` to `b` in sevenths.
/// Otherwise four values step in fifths, and entries 6 and 7 are the literals 0 and 255.
pub fn build_ramp(a: u8, b: u8) -> [u8; 8] {
    let (a16, b16) = (a as u16, b as u16);
    let mut ramp = [a, b, 0, 0, 0, 0, 0, 0];
    if a > b {
        for i in 1..7u16 {
            ramp[i as usize + 1] = (((7 - i) * a16 + i * b16) / 7) as u8;
        }
    } else {
        for i in 1..5u16 {
            ramp[i as usize + 1] = (((5 - i) * a16 + i * b16) / 5) as u8;
        }
        ramp[6] = 0;
        ramp[7] = u8::MAX;
    }
    ramp
}
