// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Block-compressed texture decoding for the BC1 through BC5 family.
//!
//! Every format tiles the surface into 4x4 texel blocks stored row-major with no
//! padding or offset table. Surfaces whose size is not a multiple of four still
//! consume whole blocks, but texels outside the surface are dropped, so the output
//! is always exactly `width * height * channels` bytes.

use rayon::prelude::*;
use strum::{Display, EnumString};
use tracing::debug;

use crate::dimensions::{DimensionError, Dimensions};
use crate::error::{DecodeError, DecodeResult};
use crate::texture::PixelBuffer;

pub mod bc1;
pub mod bc2;
pub mod bc3;
pub mod bc4;
pub mod bc5;

use bc1::BC1Block;
use bc2::BC2Block;
use bc3::BC3Block;
use bc4::BC4Block;
use bc5::{BC5Block, MirroredBC5Block};

/// A single compressed block of texels
pub trait Block: Sized {
    /// Size of one block in bytes
    const SIZE: usize;
    /// Bytes per decoded texel
    const CHANNELS: usize;
    const WIDTH: usize = 4;
    const HEIGHT: usize = 4;

    /// Decode a block from exactly [`Self::SIZE`] bytes
    fn from_bytes(bytes: &[u8]) -> Self;

    /// Write texel `index` (row-major within the block) into `out`, which is exactly
    /// [`Self::CHANNELS`] bytes long
    fn write_texel(&self, index: usize, out: &mut [u8]);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum S3TCFormat {
    #[strum(to_string = "bc1", serialize = "dxt1")]
    BC1,
    #[strum(to_string = "bc2", serialize = "dxt3")]
    BC2,
    #[strum(to_string = "bc3", serialize = "dxt5")]
    BC3,
    #[strum(to_string = "bc4", serialize = "ati1")]
    BC4,
    /// Two channel red/green. With `corrected` unset (the default) the green channel
    /// mirrors red, matching the legacy asset explorer; see [`MirroredBC5Block`].
    #[strum(to_string = "bc5", serialize = "ati2")]
    BC5 { corrected: bool },
}

impl S3TCFormat {
    /// Size of one 4x4 block in bytes
    pub fn block_size(&self) -> usize {
        use S3TCFormat::*;
        match self {
            BC1 | BC4 => BC1Block::SIZE,
            BC2 | BC3 | BC5 { .. } => BC3Block::SIZE,
        }
    }

    /// Bytes per texel of the decoded output
    pub fn channels(&self) -> usize {
        use S3TCFormat::*;
        match self {
            BC1 | BC2 | BC3 => 4,
            BC4 => 1,
            BC5 { .. } => 2,
        }
    }

    /// Number of compressed bytes needed for a surface of the given dimensions
    pub fn size_for(&self, dimensions: Dimensions) -> DecodeResult<usize> {
        Ok(dimensions.block_bytes(self.block_size())?)
    }

    /// Byte offset of mip `level` in a chain of mips stored back to back, starting
    /// with `dimensions`. [`None`] if the chain has fewer levels.
    pub fn mip_offset(
        &self,
        dimensions: Dimensions,
        level: usize,
    ) -> DecodeResult<Option<usize>> {
        let mut mips = dimensions.mips();
        let mut offset: usize = 0;
        for mip in mips.by_ref().take(level) {
            offset = offset
                .checked_add(self.size_for(mip)?)
                .ok_or(DimensionError::TooLarge {
                    width: dimensions.width(),
                    height: dimensions.height(),
                    unit_size: self.block_size(),
                })?;
        }
        Ok(mips.next().map(|_| offset))
    }

    /// Look up a format by its DDS-style FourCC code
    pub fn from_fourcc(fourcc: [u8; 4]) -> DecodeResult<Self> {
        use S3TCFormat::*;
        match &fourcc {
            b"DXT1" => Ok(BC1),
            b"DXT2" | b"DXT3" => Ok(BC2),
            b"DXT4" | b"DXT5" => Ok(BC3),
            b"ATI1" | b"BC4U" => Ok(BC4),
            b"ATI2" | b"BC5U" => Ok(BC5 { corrected: false }),
            _ => Err(DecodeError::UnsupportedFormat(format!(
                "FourCC {:?}",
                String::from_utf8_lossy(&fourcc)
            ))),
        }
    }

    /// Look up the format of a DXT-compressed BLP texture by its alpha type field
    pub fn from_blp_alpha_type(alpha_type: u8) -> DecodeResult<Self> {
        match alpha_type {
            0 => Ok(S3TCFormat::BC1),
            1 => Ok(S3TCFormat::BC2),
            7 => Ok(S3TCFormat::BC3),
            other => Err(DecodeError::UnsupportedFormat(format!(
                "BLP alpha type {other}"
            ))),
        }
    }
}

/// Decompress a `width` by `height` surface of `format` blocks.
///
/// `input` must hold at least [`S3TCFormat::size_for`] bytes; anything past that is
/// ignored. The result has [`S3TCFormat::channels`] bytes per texel.
pub fn decode(format: S3TCFormat, width: u32, height: u32, input: &[u8]) -> DecodeResult {
    let dimensions = Dimensions::new(width, height)?;
    let buffer = match format {
        S3TCFormat::BC1 => decode_blocks::<BC1Block>(dimensions, input),
        S3TCFormat::BC2 => decode_blocks::<BC2Block>(dimensions, input),
        S3TCFormat::BC3 => decode_blocks::<BC3Block>(dimensions, input),
        S3TCFormat::BC4 => decode_blocks::<BC4Block>(dimensions, input),
        S3TCFormat::BC5 { corrected: true } => decode_blocks::<BC5Block>(dimensions, input),
        S3TCFormat::BC5 { corrected: false } => {
            decode_blocks::<MirroredBC5Block>(dimensions, input)
        }
    }?;

    debug!("decoded {format} surface {width}x{height}");
    Ok(buffer)
}

fn decode_blocks<B: Block>(dimensions: Dimensions, input: &[u8]) -> DecodeResult {
    let (blocks_wide, _) = dimensions.blocks();
    let expected = dimensions.block_bytes(B::SIZE)?;
    DecodeError::require(expected, input.len())?;

    let width = dimensions.width() as usize;
    let mut buffer = vec![0u8; dimensions.buffer_len(B::CHANNELS)?];
    // cannot overflow, the buffer holds at least one full row
    let row_stride = width * B::CHANNELS;

    // each row of blocks owns a disjoint band of up to four output rows
    buffer
        .par_chunks_mut(row_stride.saturating_mul(B::HEIGHT))
        .zip(input[..expected].par_chunks_exact(blocks_wide * B::SIZE))
        .for_each(|(rows, blocks)| decode_block_row::<B>(rows, blocks, width));

    Ok(PixelBuffer::new(dimensions, B::CHANNELS, buffer))
}

fn decode_block_row<B: Block>(rows: &mut [u8], blocks: &[u8], width: usize) {
    let row_stride = width * B::CHANNELS;
    let height = rows.len() / row_stride;

    for (bx, bytes) in blocks.chunks_exact(B::SIZE).enumerate() {
        let block = B::from_bytes(bytes);
        for y in 0..B::HEIGHT.min(height) {
            for x in 0..B::WIDTH {
                let px = bx * B::WIDTH + x;
                if px >= width {
                    break;
                }
                let offset = y * row_stride + px * B::CHANNELS;
                block.write_texel(y * B::WIDTH + x, &mut rows[offset..offset + B::CHANNELS]);
            }
        }
    }
}
