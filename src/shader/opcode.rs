// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::shader::ShaderVersion;

pub const OPCODE_MASK: u32 = 0x0000_FFFF;
pub const INSTLENGTH_MASK: u32 = 0x0F00_0000;
pub const INSTLENGTH_SHIFT: u32 = 24;

pub const OPCODE_DCL: u16 = 31;
pub const OPCODE_TEX: u16 = 66;
pub const OPCODE_DEF: u16 = 81;
pub const OPCODE_PHASE: u16 = 0xFFFD;
pub const OPCODE_END: u16 = 0xFFFF;

/// Shape of a plain instruction: whether a destination operand follows the opcode
/// token, and how many source operands follow that
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub opcode: u16,
    pub mnemonic: &'static str,
    pub has_dst: bool,
    pub sources: u8,
}

const fn op(opcode: u16, mnemonic: &'static str, has_dst: bool, sources: u8) -> OpcodeInfo {
    OpcodeInfo {
        opcode,
        mnemonic,
        has_dst,
        sources,
    }
}

/// Every instruction with a fixed operand layout, sorted by opcode.
/// `DCL`, `DEF`, `TEX` and `END` are decoded separately.
///
/// Opcode 14 is listed as `EXP`. The legacy asset explorer printed it as a second
/// `SLT`, so listings differ from that tool on this opcode only.
pub static OPCODES: &[OpcodeInfo] = &[
    op(0, "NOP", false, 0),
    op(1, "MOV", true, 1),
    op(2, "ADD", true, 2),
    op(3, "SUB", true, 2),
    op(4, "MAD", true, 3),
    op(5, "MUL", true, 2),
    op(6, "RCP", true, 1),
    op(7, "RSQ", true, 1),
    op(8, "DP3", true, 2),
    op(9, "DP4", true, 2),
    op(10, "MIN", true, 2),
    op(11, "MAX", true, 2),
    op(12, "SLT", true, 2),
    op(13, "SGE", true, 2),
    op(14, "EXP", true, 1),
    op(15, "LOG", true, 1),
    op(16, "LIT", true, 1),
    op(17, "DST", true, 2),
    op(18, "LRP", true, 3),
    op(19, "FRC", true, 1),
    op(20, "M4X4", true, 2),
    op(21, "M4X3", true, 2),
    op(22, "M3X4", true, 2),
    op(23, "M3X3", true, 2),
    op(24, "M3X2", true, 2),
    op(25, "CALL", false, 1),
    op(26, "CALLNZ", false, 2),
    op(27, "LOOP", false, 2),
    op(28, "RET", false, 0),
    op(29, "ENDLOOP", false, 0),
    op(30, "LABEL", false, 1),
    op(32, "POW", true, 2),
    op(33, "CRS", true, 2),
    op(34, "SGN", true, 3),
    op(35, "ABS", true, 1),
    op(36, "NRM", true, 1),
    op(37, "SINCOS", true, 3),
    op(38, "REP", false, 1),
    op(39, "ENDREP", false, 0),
    op(46, "MOVA", true, 1),
    op(OPCODE_PHASE, "PHASE", false, 0),
];

pub fn lookup(opcode: u16) -> Option<&'static OpcodeInfo> {
    OPCODES
        .binary_search_by_key(&opcode, |info| info.opcode)
        .ok()
        .map(|i| &OPCODES[i])
}

/// `TEX` changed shape between shader models: from 2.0 it is `TEXLD dst, coord, sampler`,
/// in 1.4 `TEXLD dst, coord`, and before that `TEX` naming only the texture register.
pub fn tex_info(version: ShaderVersion) -> OpcodeInfo {
    if version.major >= 2 {
        op(OPCODE_TEX, "TEXLD", true, 2)
    } else if version.minor == 4 {
        op(OPCODE_TEX, "TEXLD", true, 1)
    } else {
        op(OPCODE_TEX, "TEX", false, 1)
    }
}
