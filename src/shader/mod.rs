// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Disassembly of Direct3D 9 shader bytecode into a text listing.
//!
//! The listing starts with the version line (`ps_2_0`, `vs_3_0`, ...) followed by one
//! line per decoded instruction. Each instruction line is padded to a fixed column and
//! tagged with the raw opcode, the instruction length field and the raw opcode token:
//!
//! ```text
//! MOV r0, c0                                                  ; opcode: 0x0001, len:  2, val: 0x02000001
//! ```
//!
//! Operand counts come from the opcode table rather than the length field. Unknown
//! opcodes are skipped one token at a time. A stream that ends in the middle of an
//! instruction ends the listing with that partial instruction and no tag.

use std::fmt::{Display, Formatter};

use arrayvec::ArrayVec;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::error::{DecodeError, DecodeResult};

pub mod opcode;
pub mod operand;
pub mod token;
pub mod writer;

use opcode::{OpcodeInfo, INSTLENGTH_MASK, INSTLENGTH_SHIFT, OPCODE_MASK};
use opcode::{OPCODE_DCL, OPCODE_DEF, OPCODE_END, OPCODE_TEX};
use operand::{DstOperand, Register, RegisterType, SrcOperand};
use token::{tokens_from_bytes, TokenReader};
use writer::TextWriter;

/// Column at which the opcode tag starts
const TAG_COLUMN: usize = 60;

const TEXTURETYPE_SHIFT: u32 = 27;
const TEXTURETYPE_MASK: u32 = 0x7800_0000;
const USAGE_MASK: u32 = 0x0000_000F;
const USAGEINDEX_SHIFT: u32 = 16;
const USAGEINDEX_MASK: u32 = 0x000F_0000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderKind {
    Pixel,
    Vertex,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShaderVersion {
    pub kind: ShaderKind,
    pub major: u8,
    pub minor: u8,
}

impl ShaderVersion {
    /// Parse the version token that opens every shader. The top 16 bits select the
    /// shader kind; anything other than `0xFFFF` or `0xFFFE` is not a shader.
    pub fn from_token(token: u32) -> Option<Self> {
        let kind = match token >> 16 {
            0xFFFF => ShaderKind::Pixel,
            0xFFFE => ShaderKind::Vertex,
            _ => return None,
        };
        Some(ShaderVersion {
            kind,
            major: ((token >> 8) & 0xFF) as u8,
            minor: (token & 0xFF) as u8,
        })
    }
}

impl Display for ShaderVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.kind {
            ShaderKind::Pixel => "ps",
            ShaderKind::Vertex => "vs",
        };
        write!(f, "{prefix}_{}_{}", self.major, self.minor)
    }
}

/// An instruction with a destination and/or source operands
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: &'static str,
    pub dst: Option<DstOperand>,
    pub sources: ArrayVec<SrcOperand, 3>,
    /// The stream ended before all operands were read
    pub truncated: bool,
}

impl Instruction {
    /// Read the operands of `info` following its opcode token, which must already be
    /// consumed
    pub fn decode(info: &OpcodeInfo, reader: &mut TokenReader) -> Self {
        let mut instruction = Instruction {
            mnemonic: info.mnemonic,
            dst: None,
            sources: ArrayVec::new(),
            truncated: false,
        };

        if info.has_dst {
            match reader.read() {
                Some(token) => instruction.dst = Some(DstOperand::from_token(token)),
                None => {
                    instruction.truncated = true;
                    return instruction;
                }
            }
        }
        for _ in 0..info.sources {
            match reader.read() {
                Some(token) => instruction.sources.push(SrcOperand::from_token(token)),
                None => {
                    instruction.truncated = true;
                    break;
                }
            }
        }
        instruction
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic)?;
        if let Some(dst) = &self.dst {
            write!(f, "{} {dst}", dst.modifier)?;
        }
        for (i, src) in self.sources.iter().enumerate() {
            if self.dst.is_some() || i != 0 {
                f.write_str(",")?;
            }
            write!(f, " {src}")?;
        }
        Ok(())
    }
}

/// A `DCL` instruction: a usage token describing the binding, then the declared register
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub usage_token: u32,
    pub dst: DstOperand,
}

impl Declaration {
    fn texture_type(&self) -> &'static str {
        match (self.usage_token & TEXTURETYPE_MASK) >> TEXTURETYPE_SHIFT {
            0 => "unknown",
            1 => "2d",
            2 => "cube",
            3 => "volume",
            _ => "",
        }
    }

    fn usage(&self) -> &'static str {
        match self.usage_token & USAGE_MASK {
            0 => "position",
            1 => "blendweight",
            2 => "blendindices",
            3 => "normal",
            4 => "psize",
            5 => "texcoord",
            6 => "tangent",
            7 => "binormal",
            8 => "tessfactor",
            9 => "positiont",
            10 => "color",
            11 => "fog",
            12 => "depth",
            13 => "sample",
            _ => "",
        }
    }

    fn usage_index(&self) -> u32 {
        (self.usage_token & USAGEINDEX_MASK) >> USAGEINDEX_SHIFT
    }

    /// The listing lines for this declaration: a texture type line for samplers,
    /// then the usage line
    pub fn lines(&self) -> ArrayVec<String, 2> {
        let mut lines = ArrayVec::new();
        if self.dst.reg.ty == RegisterType::Sampler {
            lines.push(format!("DCL_{} {}", self.texture_type(), self.dst));
        }
        lines.push(format!(
            "DCL_{}{} {}",
            self.usage(),
            self.usage_index(),
            self.dst
        ));
        lines
    }
}

/// A `DEF` instruction: a constant register and four float literals
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Definition {
    pub reg: Register,
    pub values: [f32; 4],
}

impl Display for Definition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DEF {}, {}",
            self.reg,
            self.values.iter().copied().map(float_literal).join(", ")
        )
    }
}

/// Six decimal places, with NaN spelled the way C's `%f` prints it
fn float_literal(v: f32) -> String {
    match (v.is_nan(), v.is_sign_negative()) {
        (true, false) => "nan".to_string(),
        (true, true) => "-nan".to_string(),
        (false, _) => format!("{v:.6}"),
    }
}

/// The raw fields printed after each instruction line
#[derive(Copy, Clone, Debug)]
struct Tag {
    opcode: u32,
    length: u32,
    token: u32,
}

impl Tag {
    fn new(token: u32) -> Self {
        Tag {
            opcode: token & OPCODE_MASK,
            length: (token & INSTLENGTH_MASK) >> INSTLENGTH_SHIFT,
            token,
        }
    }
}

fn tagged_line(out: &mut TextWriter, text: &str, tag: Tag) {
    out.append(format_args!(
        "{text:<width$}; opcode: {:#06x}, len: {:2}, val: {:#010x}\n",
        tag.opcode,
        tag.length,
        tag.token,
        width = TAG_COLUMN
    ));
}

/// Disassemble `input` into a listing. Inputs that are not shaders produce an empty
/// string; see [`try_disassemble`] to find out why.
pub fn disassemble(input: &[u8]) -> String {
    try_disassemble(input).unwrap_or_else(|e| {
        debug!("not disassembling shader: {e}");
        String::new()
    })
}

/// Disassemble `input` into a listing of at most `limit` bytes
pub fn disassemble_bounded(input: &[u8], limit: usize) -> String {
    let mut out = TextWriter::bounded(limit);
    match write_listing(input, &mut out) {
        Ok(()) => out.into_string(),
        Err(e) => {
            debug!("not disassembling shader: {e}");
            String::new()
        }
    }
}

/// Disassemble `input`, failing with [`DecodeError::InsufficientData`] if it is too
/// short for a version token, or [`DecodeError::UnsupportedFormat`] if the version
/// token does not name a pixel or vertex shader
pub fn try_disassemble(input: &[u8]) -> DecodeResult<String> {
    let mut out = TextWriter::new();
    write_listing(input, &mut out)?;
    Ok(out.into_string())
}

fn write_listing(input: &[u8], out: &mut TextWriter) -> DecodeResult<()> {
    DecodeError::require(4, input.len())?;
    let tokens = tokens_from_bytes(input);
    let mut reader = TokenReader::new(&tokens);

    let header = reader.read().unwrap_or_default();
    let version = ShaderVersion::from_token(header).ok_or_else(|| {
        DecodeError::UnsupportedFormat(format!("shader version token {header:#010x}"))
    })?;
    out.append(format_args!("{version}\n"));

    while let Some(token) = reader.peek() {
        if out.is_full() {
            break;
        }
        let tag = Tag::new(token);
        let opcode = tag.opcode as u16;
        let at = reader.pos();

        match opcode {
            OPCODE_END => {
                tagged_line(out, "END", tag);
                break;
            }
            OPCODE_DCL => {
                let Some([_, usage_token, dst]) = reader.read_array::<3>() else {
                    debug!("shader stream ends inside DCL at token {at}");
                    break;
                };
                let declaration = Declaration {
                    usage_token,
                    dst: DstOperand::from_token(dst),
                };
                for line in declaration.lines() {
                    tagged_line(out, &line, tag);
                }
            }
            OPCODE_DEF => {
                let Some([_, reg, values @ ..]) = reader.read_array::<6>() else {
                    debug!("shader stream ends inside DEF at token {at}");
                    break;
                };
                let definition = Definition {
                    reg: Register::from_token(reg),
                    values: values.map(f32::from_bits),
                };
                tagged_line(out, &definition.to_string(), tag);
            }
            _ => {
                let info = match opcode {
                    OPCODE_TEX => opcode::tex_info(version),
                    _ => match opcode::lookup(opcode) {
                        Some(info) => *info,
                        None => {
                            trace!("skipping unknown opcode {opcode:#06x} at token {at}");
                            reader.skip(1);
                            continue;
                        }
                    },
                };
                reader.skip(1);
                let instruction = Instruction::decode(&info, &mut reader);
                if instruction.truncated {
                    debug!("shader stream ends inside {} at token {at}", info.mnemonic);
                    out.append(format_args!("{instruction}\n"));
                    break;
                }
                tagged_line(out, &instruction.to_string(), tag);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_tokens() {
        let ps = ShaderVersion::from_token(0xFFFF0200).unwrap();
        assert_eq!(ps.to_string(), "ps_2_0");
        let vs = ShaderVersion::from_token(0xFFFE0300).unwrap();
        assert_eq!(vs.to_string(), "vs_3_0");
        let ps14 = ShaderVersion::from_token(0xFFFF0104).unwrap();
        assert_eq!((ps14.major, ps14.minor), (1, 4));
        assert_eq!(ShaderVersion::from_token(0xFFFD0200), None);
        assert_eq!(ShaderVersion::from_token(0x00000200), None);
    }

    #[test]
    fn instruction_without_destination() {
        let info = opcode::lookup(27).unwrap();
        // aL, i0
        let tokens = [
            0x8000_0000 | (7 << 28) | (1 << 11),
            0x8000_0000 | (7 << 28) | 0x00E4_0000,
        ];
        let mut reader = TokenReader::new(&tokens);
        let instruction = Instruction::decode(info, &mut reader);
        assert!(!instruction.truncated);
        assert_eq!(instruction.to_string(), "LOOP aL, i0");
    }

    #[test]
    fn truncated_instruction_keeps_read_operands() {
        let info = opcode::lookup(4).unwrap();
        let tokens = [0x800F_0000, 0xA0E4_0001];
        let mut reader = TokenReader::new(&tokens);
        let instruction = Instruction::decode(info, &mut reader);
        assert!(instruction.truncated);
        assert_eq!(instruction.to_string(), "MAD r0, c1");
    }

    #[test]
    fn definition_floats() {
        let definition = Definition {
            reg: Register::from_token(0xA00F_0003),
            values: [1.0, -0.5, 0.0, 3.25],
        };
        assert_eq!(
            definition.to_string(),
            "DEF c3, 1.000000, -0.500000, 0.000000, 3.250000"
        );
    }

    #[test]
    fn definition_special_floats() {
        let definition = Definition {
            reg: Register::from_token(0xA00F_0000),
            values: [f32::NAN, -f32::NAN, f32::INFINITY, f32::NEG_INFINITY],
        };
        assert_eq!(definition.to_string(), "DEF c0, nan, -nan, inf, -inf");
    }

    #[test]
    fn sampler_declaration_emits_two_lines() {
        let declaration = Declaration {
            usage_token: 0x8000_0000 | (1 << 27),
            dst: DstOperand::from_token(0x8000_0000 | (2 << 28) | (1 << 11) | 0x000F_0000),
        };
        let lines = declaration.lines();
        assert_eq!(lines.as_slice(), ["DCL_2d s0", "DCL_position0 s0"]);
    }

    #[test]
    fn attribute_declaration() {
        let declaration = Declaration {
            usage_token: 0x8000_0000 | (2 << 16) | 5,
            dst: DstOperand::from_token(0x9003_0001),
        };
        assert_eq!(declaration.lines().as_slice(), ["DCL_texcoord2 v1.xy"]);
    }
}
