// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pixel decoding for BLP texture mipmaps.
//!
//! Locating a mipmap inside a BLP file is the container parser's job. This module
//! takes the already sliced payload of one mipmap plus the header fields that
//! describe its encoding, and expands it to RGBA8.

use bitvec::prelude::*;
use tracing::warn;

use crate::dimensions::Dimensions;
use crate::error::{DecodeError, DecodeResult};
use crate::pack::Unpack;
use crate::s3tc::{self, S3TCFormat};
use crate::texture::PixelBuffer;
use crate::util::div_ceil;

const RGBA: usize = 4;

/// How the texels of a BLP mipmap are stored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlpEncoding<'a> {
    /// One palette index per texel followed by an alpha plane of `alpha_depth` bits
    /// per texel. Palette entries are `0x??RRGGBB`.
    Palette {
        palette: &'a [u32; 256],
        alpha_depth: u8,
    },
    /// Block compressed, BC1/BC2/BC3 chosen by the header's alpha type
    Dxt { format: S3TCFormat },
    /// Uncompressed, four bytes per texel in B, G, R, A order
    Bgra,
}

impl<'a> BlpEncoding<'a> {
    /// Interpret the encoding fields of a BLP2 header
    pub fn from_header(
        blp_type: u32,
        compression: u8,
        alpha_depth: u8,
        alpha_type: u8,
        palette: &'a [u32; 256],
    ) -> DecodeResult<Self> {
        if blp_type != 1 {
            return Err(DecodeError::UnsupportedFormat(format!(
                "BLP type {blp_type}"
            )));
        }
        match compression {
            1 => Ok(BlpEncoding::Palette {
                palette,
                alpha_depth,
            }),
            2 => Ok(BlpEncoding::Dxt {
                format: S3TCFormat::from_blp_alpha_type(alpha_type)?,
            }),
            3 => Ok(BlpEncoding::Bgra),
            other => Err(DecodeError::UnsupportedFormat(format!(
                "BLP compression {other}"
            ))),
        }
    }
}

/// Decode one mipmap of `width` by `height` texels to RGBA8
pub fn decode_mipmap(
    encoding: BlpEncoding,
    width: u32,
    height: u32,
    data: &[u8],
) -> DecodeResult {
    match encoding {
        BlpEncoding::Dxt { format } => s3tc::decode(format, width, height, data),
        BlpEncoding::Palette {
            palette,
            alpha_depth,
        } => decode_palette(Dimensions::new(width, height)?, palette, alpha_depth, data),
        BlpEncoding::Bgra => decode_bgra(Dimensions::new(width, height)?, data),
    }
}

fn decode_palette(
    dimensions: Dimensions,
    palette: &[u32; 256],
    alpha_depth: u8,
    data: &[u8],
) -> DecodeResult {
    // bounds the alpha plane arithmetic below as well
    let len = dimensions.buffer_len(RGBA)?;
    let texels = len / RGBA;
    let alpha_len = match alpha_depth {
        0 => 0,
        1 => div_ceil(texels, 8),
        4 => div_ceil(texels, 2),
        8 => texels,
        other => {
            warn!("unsupported BLP alpha depth {other}, decoding as opaque");
            0
        }
    };
    DecodeError::require(texels + alpha_len, data.len())?;
    let (indices, alpha_plane) = data.split_at(texels);
    let alpha_plane = &alpha_plane[..alpha_len];

    let mut buffer = vec![u8::MAX; len];
    for (texel, &index) in buffer.chunks_exact_mut(RGBA).zip(indices) {
        let [_, r, g, b] = palette[index as usize].to_be_bytes();
        texel[0..3].copy_from_slice(&[r, g, b]);
    }

    let bits = alpha_plane.view_bits::<Lsb0>();
    let alphas = buffer.chunks_exact_mut(RGBA).map(|texel| &mut texel[3]);
    match alpha_depth {
        1 => alphas
            .zip(bits.iter().by_vals())
            .for_each(|(a, bit)| *a = if bit { u8::MAX } else { 0 }),
        4 => alphas
            .zip(bits.chunks_exact(4).unpack_le::<u8>())
            .for_each(|(a, v)| *a = v | (v << 4)),
        8 => alphas.zip(alpha_plane).for_each(|(a, &v)| *a = v),
        _ => {}
    }

    Ok(PixelBuffer::new(dimensions, RGBA, buffer))
}

fn decode_bgra(dimensions: Dimensions, data: &[u8]) -> DecodeResult {
    let len = dimensions.buffer_len(RGBA)?;
    DecodeError::require(len, data.len())?;

    let buffer = data[..len]
        .chunks_exact(RGBA)
        .flat_map(|bgra| [bgra[2], bgra[1], bgra[0], bgra[3]])
        .collect();
    Ok(PixelBuffer::new(dimensions, RGBA, buffer))
}
