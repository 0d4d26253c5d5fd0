// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::{Debug, Formatter};

use crate::dimensions::Dimensions;

/// A decoded surface: `width * height` texels, row-major top to bottom, with
/// `channels` bytes per texel and no row padding.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    dimensions: Dimensions,
    channels: usize,
    buffer: Vec<u8>,
}

impl PixelBuffer {
    pub(crate) fn new(dimensions: Dimensions, channels: usize, buffer: Vec<u8>) -> Self {
        debug_assert_eq!(
            Ok(buffer.len()),
            dimensions.buffer_len(channels),
            "buffer does not match its dimensions"
        );
        Self {
            dimensions,
            channels,
            buffer,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width()
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height()
    }

    /// Bytes per texel: 4 for RGBA, 2 for RG, 1 for a single channel
    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buffer
    }

    /// The channels of the texel at `(x, y)`, or [`None`] outside the surface
    pub fn texel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let start = (y as usize * self.width() as usize + x as usize) * self.channels;
        self.buffer.get(start..start + self.channels)
    }

    /// Expand to RGBA8 for display. Single channel surfaces become grey, two channel
    /// surfaces fill red and green with blue at zero. Alpha is opaque for both.
    pub fn to_rgba8(&self) -> Vec<u8> {
        match self.channels {
            4 => self.buffer.clone(),
            1 => self
                .buffer
                .iter()
                .flat_map(|&v| [v, v, v, u8::MAX])
                .collect(),
            2 => self
                .buffer
                .chunks_exact(2)
                .flat_map(|rg| [rg[0], rg[1], 0, u8::MAX])
                .collect(),
            n => self
                .buffer
                .chunks_exact(n)
                .flat_map(|t| {
                    let mut rgba = [0, 0, 0, u8::MAX];
                    rgba.iter_mut().zip(t).for_each(|(dst, src)| *dst = *src);
                    rgba
                })
                .collect(),
        }
    }
}

impl Debug for PixelBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("dimensions", &self.dimensions)
            .field("channels", &self.channels)
            .field("len", &self.buffer.len())
            .finish()
    }
}
