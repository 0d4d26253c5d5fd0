// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::{Display, Formatter, Result, Write};

use enumflags2::{bitflags, BitFlags};

const REGNUM_MASK: u32 = 0x0000_07FF;
const REGTYPE_MASK: u32 = 0x7000_0000;
const REGTYPE_MASK2: u32 = 0x0000_1800;
const REGTYPE_SHIFT: u32 = 28;
const REGTYPE_SHIFT2: u32 = 8;

const WRITEMASK_SHIFT: u32 = 16;
const WRITEMASK_MASK: u32 = 0x000F_0000;

const DSTMOD_SHIFT: u32 = 20;
const DSTMOD_MASK: u32 = 0x00F0_0000;

const SWIZZLE_SHIFT: u32 = 16;
const SWIZZLE_MASK: u32 = 0x00FF_0000;

const SRCMOD_SHIFT: u32 = 24;
const SRCMOD_MASK: u32 = 0x0F00_0000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegisterType {
    Temp,
    Input,
    Const,
    Texture,
    RastOut,
    AttrOut,
    TexCrdOut,
    ConstInt,
    ColorOut,
    DepthOut,
    Sampler,
    ConstBool,
    Loop,
    Label,
    Predicate,
    Unknown(u8),
}

impl RegisterType {
    pub fn from_raw(raw: u8) -> Self {
        use RegisterType::*;
        match raw {
            0 => Temp,
            1 => Input,
            2 => Const,
            3 => Texture,
            4 => RastOut,
            5 => AttrOut,
            6 => TexCrdOut,
            7 => ConstInt,
            8 => ColorOut,
            9 => DepthOut,
            10 => Sampler,
            14 => ConstBool,
            15 => Loop,
            18 => Label,
            19 => Predicate,
            other => Unknown(other),
        }
    }

    fn prefix(self) -> &'static str {
        use RegisterType::*;
        match self {
            Temp => "r",
            Input => "v",
            Const => "c",
            Texture => "t",
            RastOut => "oFog",
            AttrOut => "oPos",
            TexCrdOut => "oT",
            ConstInt => "i",
            ColorOut => "oC",
            DepthOut => "oDepth",
            Sampler => "s",
            ConstBool => "b",
            Loop => "aL",
            Label => "l",
            Predicate => "p",
            Unknown(_) => "unk",
        }
    }

    fn has_number(self) -> bool {
        !matches!(self, RegisterType::DepthOut | RegisterType::Loop)
    }

    /// Whether a swizzle or write mask is printed after the register
    pub fn has_components(self) -> bool {
        use RegisterType::*;
        matches!(
            self,
            Temp | Input | Const | RastOut | AttrOut | TexCrdOut | ConstInt | ColorOut
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Register {
    pub ty: RegisterType,
    pub num: u16,
}

impl Register {
    /// Decode the register type and number of an operand token. The type is split
    /// across bits 28..31 and bits 11..13.
    pub fn from_token(token: u32) -> Self {
        let ty = ((token & REGTYPE_MASK) >> REGTYPE_SHIFT)
            | ((token & REGTYPE_MASK2) >> REGTYPE_SHIFT2);
        Register {
            ty: RegisterType::from_raw(ty as u8),
            num: (token & REGNUM_MASK) as u16,
        }
    }

    /// Write the register followed by `.components`, if its type shows components
    /// and `components` is not empty
    fn fmt_with(&self, f: &mut Formatter<'_>, components: &str) -> Result {
        write!(f, "{self}")?;
        if self.ty.has_components() && !components.is_empty() {
            write!(f, ".{components}")?;
        }
        Ok(())
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if let RegisterType::Unknown(raw) = self.ty {
            return write!(f, "unk({raw}){}", self.num);
        }
        f.write_str(self.ty.prefix())?;
        if self.ty.has_number() {
            write!(f, "{}", self.num)?;
        }
        Ok(())
    }
}

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Component {
    X = 0b0001,
    Y = 0b0010,
    Z = 0b0100,
    W = 0b1000,
}

impl Component {
    const ALL: [Component; 4] = [Component::X, Component::Y, Component::Z, Component::W];

    fn from_selector(selector: u8) -> Self {
        Self::ALL[(selector & 0x3) as usize]
    }

    fn letter(self) -> char {
        match self {
            Component::X => 'x',
            Component::Y => 'y',
            Component::Z => 'z',
            Component::W => 'w',
        }
    }
}

/// Source component selection, two bits per destination component
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Swizzle(pub u8);

impl Swizzle {
    /// `.xyzw`, never printed
    pub const IDENTITY: Swizzle = Swizzle(0xE4);

    pub fn from_token(token: u32) -> Self {
        Swizzle(((token & SWIZZLE_MASK) >> SWIZZLE_SHIFT) as u8)
    }

    pub fn components(self) -> [Component; 4] {
        [0, 2, 4, 6].map(|shift| Component::from_selector(self.0 >> shift))
    }
}

impl Display for Swizzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if *self == Swizzle::IDENTITY {
            return Ok(());
        }
        let components = self.components();
        if components.iter().all(|c| *c == components[0]) {
            return f.write_char(components[0].letter());
        }
        components.iter().try_for_each(|c| f.write_char(c.letter()))
    }
}

/// Destination components written, printed only when not all four are set
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WriteMask(pub BitFlags<Component>);

impl WriteMask {
    pub fn from_token(token: u32) -> Self {
        WriteMask(BitFlags::from_bits_truncate(
            ((token & WRITEMASK_MASK) >> WRITEMASK_SHIFT) as u8,
        ))
    }
}

impl Display for WriteMask {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.0.is_all() {
            return Ok(());
        }
        self.0.iter().try_for_each(|c| f.write_char(c.letter()))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SrcModifier {
    None,
    Negate,
    Bias,
    BiasNegate,
    Sign,
    SignNegate,
    Complement,
    X2,
    X2Negate,
    Dz,
    Dw,
    Abs,
    AbsNegate,
    Not,
    Unknown(u8),
}

impl SrcModifier {
    pub fn from_token(token: u32) -> Self {
        use SrcModifier::*;
        match ((token & SRCMOD_MASK) >> SRCMOD_SHIFT) as u8 {
            0 => None,
            1 => Negate,
            2 => Bias,
            3 => BiasNegate,
            4 => Sign,
            5 => SignNegate,
            6 => Complement,
            7 => X2,
            8 => X2Negate,
            9 => Dz,
            10 => Dw,
            11 => Abs,
            12 => AbsNegate,
            13 => Not,
            other => Unknown(other),
        }
    }

    fn prefix(self) -> &'static str {
        use SrcModifier::*;
        match self {
            Negate | BiasNegate | SignNegate | X2Negate => "-",
            AbsNegate => "-abs(",
            Abs => "abs(",
            Complement => "~",
            Not => "!",
            _ => "",
        }
    }

    fn suffix(self) -> &'static str {
        use SrcModifier::*;
        match self {
            Bias | BiasNegate => "_bias",
            Sign | SignNegate => "_bx2",
            X2 | X2Negate => "_x2",
            Dz => "_dz",
            Dw => "_dw",
            Abs | AbsNegate => ")",
            _ => "",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SrcOperand {
    pub reg: Register,
    pub swizzle: Swizzle,
    pub modifier: SrcModifier,
}

impl SrcOperand {
    pub fn from_token(token: u32) -> Self {
        SrcOperand {
            reg: Register::from_token(token),
            swizzle: Swizzle::from_token(token),
            modifier: SrcModifier::from_token(token),
        }
    }
}

impl Display for SrcOperand {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.modifier.prefix())?;
        self.reg.fmt_with(f, &self.swizzle.to_string())?;
        f.write_str(self.modifier.suffix())
    }
}

/// Result modifier, printed as a suffix of the instruction mnemonic
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DstModifier {
    None,
    Saturate,
    Partial,
    Centroid,
}

impl DstModifier {
    pub fn from_token(token: u32) -> Self {
        match (token & DSTMOD_MASK) >> DSTMOD_SHIFT {
            1 => DstModifier::Saturate,
            2 => DstModifier::Partial,
            3 => DstModifier::Centroid,
            _ => DstModifier::None,
        }
    }
}

impl Display for DstModifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(match self {
            DstModifier::None => "",
            DstModifier::Saturate => "_SAT",
            DstModifier::Partial => "_PARTIAL",
            DstModifier::Centroid => "_CENTROID",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DstOperand {
    pub reg: Register,
    pub mask: WriteMask,
    pub modifier: DstModifier,
}

impl DstOperand {
    pub fn from_token(token: u32) -> Self {
        DstOperand {
            reg: Register::from_token(token),
            mask: WriteMask::from_token(token),
            modifier: DstModifier::from_token(token),
        }
    }
}

/// Register and write mask only; the modifier belongs to the mnemonic
impl Display for DstOperand {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.reg.fmt_with(f, &self.mask.to_string())
    }
}
