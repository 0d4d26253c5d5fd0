// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use anyhow::Result;

use wowdecode::dimensions::{DimensionError, Dimensions};
use wowdecode::*;

const RED: u16 = 0xF800;
const GREEN: u16 = 0x07E0;
const BLUE: u16 = 0x001F;
const WHITE: u16 = 0xFFFF;

/// A BC1 block with every texel using `code`
fn bc1_block(color0: u16, color1: u16, code: u8) -> [u8; 8] {
    let codes = [code * 0x55; 4];
    let [a, b] = color0.to_le_bytes();
    let [c, d] = color1.to_le_bytes();
    [a, b, c, d, codes[0], codes[1], codes[2], codes[3]]
}

/// A BC4 block with endpoints `a` and `b` and every texel using code 0
fn bc4_block(a: u8, b: u8) -> [u8; 8] {
    [a, b, 0, 0, 0, 0, 0, 0]
}

const ALL_FORMATS: [S3TCFormat; 6] = [
    S3TCFormat::BC1,
    S3TCFormat::BC2,
    S3TCFormat::BC3,
    S3TCFormat::BC4,
    S3TCFormat::BC5 { corrected: false },
    S3TCFormat::BC5 { corrected: true },
];

/// A single red block decodes to sixteen opaque red texels
#[test]
fn solid_bc1_block() -> Result<()> {
    let block = [0x00, 0xF8, 0xE0, 0x07, 0x00, 0x00, 0x00, 0x00];
    let pixels = decode(S3TCFormat::BC1, 4, 4, &block)?;

    assert_eq!(pixels.channels(), 4);
    assert_eq!(pixels.as_bytes().len(), 64, "Incorrect output size");
    for texel in pixels.as_bytes().chunks_exact(4) {
        assert_eq!(texel, [255, 0, 0, 255], "Incorrect texel color");
    }
    Ok(())
}

/// Equal endpoints select the three color palette, where code 3 is transparent black
#[test]
fn bc1_equal_endpoints_are_transparent() -> Result<()> {
    let block = bc1_block(RED, RED, 3);
    let pixels = decode(S3TCFormat::BC1, 4, 4, &block)?;
    assert!(
        pixels.as_bytes().iter().all(|&b| b == 0),
        "Code 3 with equal endpoints should be transparent black"
    );

    let block = bc1_block(RED, RED, 2);
    let pixels = decode(S3TCFormat::BC1, 4, 4, &block)?;
    assert_eq!(pixels.texel(0, 0), Some(&[255, 0, 0, 255][..]));
    Ok(())
}

/// Surfaces that are not a multiple of four take texels from the right blocks
#[test]
fn partial_blocks() -> Result<()> {
    let input: Vec<u8> = [RED, GREEN, BLUE, WHITE]
        .into_iter()
        .flat_map(|color| bc1_block(color, 0, 0))
        .collect();
    let pixels = decode(S3TCFormat::BC1, 5, 5, &input)?;

    assert_eq!(pixels.as_bytes().len(), 5 * 5 * 4);
    assert_eq!(pixels.texel(3, 3), Some(&[255, 0, 0, 255][..]));
    assert_eq!(pixels.texel(4, 0), Some(&[0, 255, 0, 255][..]));
    assert_eq!(pixels.texel(0, 4), Some(&[0, 0, 255, 255][..]));
    assert_eq!(pixels.texel(4, 4), Some(&[255, 255, 255, 255][..]));
    assert_eq!(pixels.texel(5, 0), None);
    Ok(())
}

/// Every format writes exactly width * height * channels bytes, for any surface size
#[test]
fn output_size_matches_surface() -> Result<()> {
    for format in ALL_FORMATS {
        for (width, height) in [(1, 1), (3, 7), (4, 4), (5, 9), (17, 2)] {
            let dims = Dimensions::new(width, height)?;
            let input = vec![0xA5u8; format.size_for(dims)?];
            let pixels = decode(format, width, height, &input)?;
            assert_eq!(
                pixels.as_bytes().len(),
                width as usize * height as usize * format.channels(),
                "Incorrect output size for {format} at {width}x{height}"
            );
            assert_eq!(pixels.dimensions(), dims);
        }
    }
    Ok(())
}

/// Bytes past the last block do not change the output
#[test]
fn trailing_input_ignored() -> Result<()> {
    for format in ALL_FORMATS {
        let dims = Dimensions::new(6, 6)?;
        let exact: Vec<u8> = (0..format.size_for(dims)?).map(|i| i as u8).collect();
        let mut padded = exact.clone();
        padded.extend([0xFF; 64]);

        let a = decode(format, 6, 6, &exact)?;
        let b = decode(format, 6, 6, &padded)?;
        assert_eq!(a, b, "Trailing bytes changed {format} output");
    }
    Ok(())
}

#[test]
fn decoding_is_repeatable() -> Result<()> {
    let input: Vec<u8> = (0..16 * 12).map(|i| (i * 91 % 256) as u8).collect();
    let first = decode(S3TCFormat::BC3, 16, 12, &input)?;
    let second = decode(S3TCFormat::BC3, 16, 12, &input)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn short_input_rejected() -> Result<()> {
    for format in ALL_FORMATS {
        let dims = Dimensions::new(8, 8)?;
        let expected = format.size_for(dims)?;
        let input = vec![0u8; expected - 1];
        assert_eq!(
            decode(format, 8, 8, &input),
            Err(DecodeError::InsufficientData {
                expected,
                actual: expected - 1
            }),
            "{format} accepted a short payload"
        );
    }
    Ok(())
}

/// Surfaces whose block payload size overflows are rejected instead of panicking
#[test]
fn oversized_surface_rejected() -> Result<()> {
    let result = decode(S3TCFormat::BC3, u32::MAX, u32::MAX, &[0u8; 16]);
    assert!(
        matches!(
            result,
            Err(DecodeError::Dimensions(DimensionError::TooLarge { .. }))
        ),
        "got {result:?}"
    );
    assert!(S3TCFormat::BC5 { corrected: true }
        .size_for(Dimensions::new(u32::MAX, u32::MAX)?)
        .is_err());
    Ok(())
}

#[test]
fn zero_dimensions_rejected() -> Result<()> {
    assert_eq!(
        decode(S3TCFormat::BC1, 0, 4, &[0; 8]),
        Err(DecodeError::Dimensions(DimensionError::Zero {
            width: 0,
            height: 4
        }))
    );
    assert!(decode(S3TCFormat::BC4, 4, 0, &[0; 8]).is_err());
    Ok(())
}

/// BC2 alpha is one nibble per texel, low nibble first, with color always four-color
#[test]
fn bc2_explicit_alpha() -> Result<()> {
    let mut block = [0x21u8; 16];
    // color1 > color0 would select punch-through in BC1; BC2 ignores that
    block[8..16].copy_from_slice(&bc1_block(0, WHITE, 3));
    let pixels = decode(S3TCFormat::BC2, 4, 4, &block)?;

    assert_eq!(pixels.texel(0, 0), Some(&[170, 170, 170, 0x11][..]));
    assert_eq!(pixels.texel(1, 0), Some(&[170, 170, 170, 0x22][..]));
    Ok(())
}

#[test]
fn bc3_interpolated_alpha() -> Result<()> {
    let mut block = [0u8; 16];
    block[0..8].copy_from_slice(&bc4_block(255, 0));
    block[8..16].copy_from_slice(&bc1_block(GREEN, RED, 0));
    let pixels = decode(S3TCFormat::BC3, 4, 4, &block)?;

    for texel in pixels.as_bytes().chunks_exact(4) {
        assert_eq!(texel, [0, 255, 0, 255]);
    }
    Ok(())
}

#[test]
fn bc4_single_channel() -> Result<()> {
    let input = [bc4_block(200, 100), bc4_block(7, 9)].concat();
    let pixels = decode(S3TCFormat::BC4, 5, 3, &input)?;

    assert_eq!(pixels.channels(), 1);
    assert_eq!(pixels.as_bytes().len(), 15);
    assert_eq!(pixels.texel(3, 2), Some(&[200u8][..]));
    assert_eq!(pixels.texel(4, 2), Some(&[7u8][..]));
    Ok(())
}

/// The default BC5 decoder repeats red in green; the corrected one reads the second half
#[test]
fn bc5_modes() -> Result<()> {
    let input = [bc4_block(10, 20), bc4_block(200, 100)].concat();

    let mirrored = decode(S3TCFormat::BC5 { corrected: false }, 4, 4, &input)?;
    let corrected = decode(S3TCFormat::BC5 { corrected: true }, 4, 4, &input)?;

    assert_eq!(mirrored.channels(), 2);
    assert!(mirrored.as_bytes().chunks_exact(2).all(|rg| rg == [10, 10]));
    assert!(corrected.as_bytes().chunks_exact(2).all(|rg| rg == [10, 200]));
    Ok(())
}

#[test]
fn format_lookup() -> Result<()> {
    assert_eq!("DXT5".parse::<S3TCFormat>()?, S3TCFormat::BC3);
    assert_eq!(S3TCFormat::from_fourcc(*b"ATI1")?, S3TCFormat::BC4);
    assert_eq!(
        S3TCFormat::from_fourcc(*b"ATI2")?,
        S3TCFormat::BC5 { corrected: false }
    );
    assert!(matches!(
        "bc6h".parse::<S3TCFormat>(),
        Err(strum::ParseError::VariantNotFound)
    ));
    Ok(())
}
