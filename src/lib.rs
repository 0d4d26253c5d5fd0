// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Decoders for game asset payloads: BC1-BC5 block-compressed textures, BLP
//! mipmaps, and Direct3D 9 shader bytecode disassembly.

pub mod blp;
pub mod color;
pub mod dimensions;
pub mod error;
pub mod pack;
pub mod s3tc;
pub mod shader;
pub mod texture;
mod util;

pub use dimensions::Dimensions;
pub use error::{DecodeError, DecodeResult};
pub use s3tc::{decode, S3TCFormat};
pub use shader::{disassemble, disassemble_bounded, try_disassemble};
pub use texture::PixelBuffer;
