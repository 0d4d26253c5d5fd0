// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use miette::Diagnostic;
use thiserror::Error;

use crate::dimensions::DimensionError;
use crate::texture::PixelBuffer;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unsupported format: {0}")]
    #[diagnostic(code(wowdecode::unsupported_format))]
    UnsupportedFormat(String),

    #[error("Insufficient data: need at least {expected} bytes, got {actual}")]
    #[diagnostic(
        code(wowdecode::insufficient_data),
        help("check the width, height and format against the payload size")
    )]
    InsufficientData { expected: usize, actual: usize },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Dimensions(#[from] DimensionError),
}

pub type DecodeResult<T = PixelBuffer> = Result<T, DecodeError>;

impl DecodeError {
    /// Fail with [`DecodeError::InsufficientData`] unless `actual` covers `expected` bytes
    pub(crate) fn require(expected: usize, actual: usize) -> DecodeResult<()> {
        if actual < expected {
            Err(DecodeError::InsufficientData { expected, actual })
        } else {
            Ok(())
        }
    }
}
