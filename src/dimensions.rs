// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use miette::Diagnostic;
use thiserror::Error;

use crate::util::div_ceil;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error("Width and height must be non-zero, got {width}x{height}")]
    #[diagnostic(code(wowdecode::zero_dimension))]
    Zero { width: u32, height: u32 },

    #[error("Image of {width}x{height} with {unit_size}-byte units does not fit in memory")]
    #[diagnostic(code(wowdecode::dimension_too_large))]
    TooLarge {
        width: u32,
        height: u32,
        unit_size: usize,
    },
}

/// The size of a single 2D surface in texels. Both axes are always non-zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Result<Self, DimensionError> {
        if width == 0 || height == 0 {
            return Err(DimensionError::Zero { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }

    /// Number of 4x4 blocks covering each axis, as `(wide, high)`
    pub fn blocks(self) -> (usize, usize) {
        (
            div_ceil(self.width as usize, 4),
            div_ceil(self.height as usize, 4),
        )
    }

    /// Size in bytes of a tightly packed buffer with `channels` bytes per texel
    pub fn buffer_len(self, channels: usize) -> Result<usize, DimensionError> {
        self.packed_len((self.width as usize, self.height as usize), channels)
    }

    /// Size in bytes of the 4x4 blocks covering this surface, at `block_size` bytes each
    pub fn block_bytes(self, block_size: usize) -> Result<usize, DimensionError> {
        self.packed_len(self.blocks(), block_size)
    }

    fn packed_len(
        self,
        (wide, high): (usize, usize),
        unit_size: usize,
    ) -> Result<usize, DimensionError> {
        wide.checked_mul(high)
            .and_then(|units| units.checked_mul(unit_size))
            .ok_or(DimensionError::TooLarge {
                width: self.width,
                height: self.height,
                unit_size,
            })
    }

    /// Iterate over this surface and every smaller mip level down to 1x1
    pub fn mips(self) -> MipDimensionIterator {
        MipDimensionIterator {
            current: Some(self),
        }
    }
}

impl TryFrom<[u32; 2]> for Dimensions {
    type Error = DimensionError;

    fn try_from(value: [u32; 2]) -> Result<Self, Self::Error> {
        Dimensions::new(value[0], value[1])
    }
}

impl From<Dimensions> for [u32; 2] {
    fn from(value: Dimensions) -> Self {
        [value.width, value.height]
    }
}

pub struct MipDimensionIterator {
    current: Option<Dimensions>,
}

impl Iterator for MipDimensionIterator {
    type Item = Dimensions;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        if current.width <= 1 && current.height <= 1 {
            self.current = None; // after mips are all 1, the chain terminates
        } else {
            self.current = Some(Dimensions {
                width: u32::max(current.width / 2, 1),
                height: u32::max(current.height / 2, 1),
            });
        }

        Some(current)
    }
}
