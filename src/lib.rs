//! # `yaxpeax-x86-handlers`, a table-driven x86 decoder
//!
//! instructions are decoded by walking trees of small opcode handlers: a top-level table indexed
//! by opcode byte leads to selectors (keyed by mandatory prefix, vector length, `W`, ModRM
//! fields, decoder options, ...) and finally to a leaf handler that picks the instruction's
//! [`Code`] and operands. 16-, 32- and 64-bit modes share the same tables.
//!
//! `yaxpeax-x86-handlers` implements traits defined by `yaxpeax_arch`, making it suitable for
//! interchangeable use with other `yaxpeax`-family instruction decoders.
//!
//! undefined encodings are not decode errors: they decode to an instruction whose code is
//! [`Code::INVALID`], with a length, so a caller can keep scanning. the only error is running
//! out of input.

use core::fmt;

use bitflags::bitflags;
use yaxpeax_arch::{AddressDiff, Arch, LengthedInstruction, StandardDecodeError};

mod code;
mod decoder;
mod handlers;
mod register;
mod state;
mod tables;

pub use code::Code;
pub use decoder::InstDecoder;
pub use register::Register;
pub use state::{DecoderOptions, EncodingKind, MandatoryPrefix, OpSize, TupleType, VectorLength};

#[derive(Debug)]
pub struct X86;

impl Arch for X86 {
    type Address = u64;
    type Word = u8;
    type Instruction = Instruction;
    type DecodeError = StandardDecodeError;
    type Decoder = InstDecoder;
    type Operand = Operand;
}

bitflags! {
    /// prefixes and prefix-like decorations that are reported on an instruction.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
    pub struct Prefixes: u16 {
        const LOCK = 1 << 0;
        const REPE = 1 << 1;
        const REPNE = 1 << 2;
        const XACQUIRE = 1 << 3;
        const XRELEASE = 1 << 4;
        /// the memory operand is an EVEX embedded broadcast (`{1to16}` and friends).
        const BROADCAST = 1 << 5;
        /// EVEX zeroing-masking (`{z}`).
        const ZEROING = 1 << 6;
        /// EVEX suppress-all-exceptions (`{sae}`).
        const SAE = 1 << 7;
    }
}

/// EVEX embedded rounding mode of a register-form instruction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum RoundingControl {
    #[default]
    None = 0,
    RoundToNearest = 1,
    RoundDown = 2,
    RoundUp = 3,
    RoundTowardZero = 4,
}

impl RoundingControl {
    pub(crate) fn from_vector_length(vl: VectorLength) -> Self {
        match vl {
            VectorLength::L128 => RoundingControl::RoundToNearest,
            VectorLength::L256 => RoundingControl::RoundDown,
            VectorLength::L512 => RoundingControl::RoundUp,
            VectorLength::Unknown => RoundingControl::RoundTowardZero,
        }
    }
}

/// a memory operand: `segment:[base + index * scale + displacement]`.
///
/// `displacement` is already sign- or zero-extended to the address size. `displ_size` is the
/// number of displacement bytes in the encoding (0, 1, 2, 4, or 8 for 64-bit `moffs`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MemoryOperand {
    pub base: Register,
    pub index: Register,
    /// `log2` of the index scale.
    pub scale: u8,
    pub displacement: u64,
    pub displ_size: u8,
    pub segment: Register,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Immediate {
    Imm8(u8),
    /// the second immediate byte of `enter` and `extrq`-style instructions.
    Imm8_2nd(u8),
    Imm16(u16),
    Imm32(u32),
    Imm64(u64),
    /// an 8-bit immediate sign-extended to the operand size.
    Imm8to16(i8),
    Imm8to32(i8),
    Imm8to64(i8),
    Imm32to64(i32),
}

impl Immediate {
    /// the immediate's value, extended to 64 bits as the instruction would use it.
    pub fn value(&self) -> u64 {
        match *self {
            Immediate::Imm8(v) | Immediate::Imm8_2nd(v) => v as u64,
            Immediate::Imm16(v) => v as u64,
            Immediate::Imm32(v) => v as u64,
            Immediate::Imm64(v) => v,
            Immediate::Imm8to16(v) => v as i16 as u16 as u64,
            Immediate::Imm8to32(v) => v as i32 as u32 as u64,
            Immediate::Imm8to64(v) => v as i64 as u64,
            Immediate::Imm32to64(v) => v as i64 as u64,
        }
    }
}

/// an absolute near branch target, in the width the instruction computes it in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NearBranch {
    Near16(u16),
    Near32(u32),
    Near64(u64),
}

impl NearBranch {
    pub fn target(&self) -> u64 {
        match *self {
            NearBranch::Near16(t) => t as u64,
            NearBranch::Near32(t) => t as u64,
            NearBranch::Near64(t) => t,
        }
    }
}

/// an operand of an x86 instruction.
///
/// `Operand::Nothing` is only seen past an instruction's operand count.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operand {
    Nothing,
    Register(Register),
    Memory(MemoryOperand),
    Immediate(Immediate),
    NearBranch(NearBranch),
    /// a direct far pointer, `selector:offset`.
    FarBranch { selector: u16, offset: u32 },
    /// `seg:[si]`, the string source of `lods`/`movs`/`outs` with 16-bit addressing.
    MemorySegSI,
    MemorySegESI,
    MemorySegRSI,
    /// `es:[di]`, the string destination of `stos`/`movs`/`ins` with 16-bit addressing.
    MemoryESDI,
    MemoryESEDI,
    MemoryESRDI,
}

impl Default for Operand {
    fn default() -> Self {
        Operand::Nothing
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Nothing => Ok(()),
            Operand::Register(reg) => fmt::Display::fmt(reg, f),
            Operand::Memory(mem) => fmt::Display::fmt(mem, f),
            Operand::Immediate(imm) => write!(f, "{:#x}", imm.value()),
            Operand::NearBranch(target) => write!(f, "{:#x}", target.target()),
            Operand::FarBranch { selector, offset } => write!(f, "{:#x}:{:#x}", selector, offset),
            Operand::MemorySegSI => f.write_str("[si]"),
            Operand::MemorySegESI => f.write_str("[esi]"),
            Operand::MemorySegRSI => f.write_str("[rsi]"),
            Operand::MemoryESDI => f.write_str("es:[di]"),
            Operand::MemoryESEDI => f.write_str("es:[edi]"),
            Operand::MemoryESRDI => f.write_str("es:[rdi]"),
        }
    }
}

impl MemoryOperand {
    /// the address size implied by the base or index register. the displacement is stored
    /// zero-extended to that width.
    fn address_bits(&self) -> u32 {
        [self.base, self.index]
            .iter()
            .find_map(|reg| match *reg {
                r if r >= Register::AX && r <= Register::R15W => Some(16),
                r if (r >= Register::EAX && r <= Register::R15D) || r == Register::EIP => Some(32),
                r if (r >= Register::RAX && r <= Register::R15) || r == Register::RIP => Some(64),
                _ => None,
            })
            .unwrap_or(64)
    }
}

impl fmt::Display for MemoryOperand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.segment != Register::DS && self.segment != Register::SS {
            write!(f, "{}:", self.segment)?;
        }
        f.write_str("[")?;
        let mut empty = true;
        if self.base != Register::None {
            write!(f, "{}", self.base)?;
            empty = false;
        }
        if self.index != Register::None {
            if !empty {
                f.write_str("+")?;
            }
            write!(f, "{}*{}", self.index, 1u8 << self.scale)?;
            empty = false;
        }
        if empty {
            write!(f, "{:#x}", self.displacement)?;
        } else if self.displ_size != 0 && self.displacement != 0 {
            let signed = match self.address_bits() {
                16 => self.displacement as u16 as i16 as i64,
                32 => self.displacement as u32 as i32 as i64,
                _ => self.displacement as i64,
            };
            if signed < 0 {
                write!(f, "-{:#x}", signed.unsigned_abs())?;
            } else {
                write!(f, "+{:#x}", signed)?;
            }
        }
        f.write_str("]")
    }
}

/// a decoded instruction.
///
/// instructions the decoder could not make sense of have the code [`Code::INVALID`]. their
/// operands are whatever the decoder had filled in before it found the problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub(crate) code: Code,
    pub(crate) operands: [Operand; 4],
    pub(crate) operand_count: u8,
    pub(crate) length: u8,
    pub(crate) prefixes: Prefixes,
    pub(crate) segment_prefix: Register,
    pub(crate) op_mask: Register,
    pub(crate) rounding_control: RoundingControl,
    pub(crate) encoding: EncodingKind,
}

impl Instruction {
    pub fn code(&self) -> Code {
        self.code
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands[..self.operand_count as usize]
    }

    pub fn operand_count(&self) -> usize {
        self.operand_count as usize
    }

    /// the `i`th operand, or `Operand::Nothing` past the operand count.
    pub fn operand(&self, i: usize) -> Operand {
        self.operands().get(i).copied().unwrap_or(Operand::Nothing)
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn prefixes(&self) -> Prefixes {
        self.prefixes
    }

    pub fn has_lock_prefix(&self) -> bool {
        self.prefixes.contains(Prefixes::LOCK)
    }

    /// the explicit segment override prefix, or `Register::None`.
    pub fn segment_prefix(&self) -> Register {
        self.segment_prefix
    }

    /// the EVEX opmask register (`k1`..`k7`), or `Register::None` if the instruction is unmasked.
    pub fn op_mask(&self) -> Register {
        self.op_mask
    }

    pub fn rounding_control(&self) -> RoundingControl {
        self.rounding_control
    }

    /// which prefix family (if any) selected the opcode map this instruction came from.
    pub fn encoding(&self) -> EncodingKind {
        self.encoding
    }

    /// operands are written left to right. writing operand `i` when fewer than `i` operands
    /// are present is a handler bug.
    #[inline]
    pub(crate) fn set_operand(&mut self, i: usize, operand: Operand) {
        debug_assert!(i <= self.operand_count as usize, "operand {} written before operand {}", i, self.operand_count);
        self.operands[i] = operand;
        if i >= self.operand_count as usize {
            self.operand_count = i as u8 + 1;
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Instruction::default();
    }
}

impl Default for Instruction {
    fn default() -> Instruction {
        Instruction {
            code: Code::INVALID,
            operands: [Operand::Nothing; 4],
            operand_count: 0,
            length: 1,
            prefixes: Prefixes::empty(),
            segment_prefix: Register::None,
            op_mask: Register::None,
            rounding_control: RoundingControl::None,
            encoding: EncodingKind::Legacy,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.prefixes.contains(Prefixes::LOCK) {
            f.write_str("lock ")?;
        }
        if self.prefixes.contains(Prefixes::XACQUIRE) {
            f.write_str("xacquire ")?;
        }
        if self.prefixes.contains(Prefixes::XRELEASE) {
            f.write_str("xrelease ")?;
        }
        if self.prefixes.contains(Prefixes::REPE) {
            f.write_str(if self.code.is_string_compare() { "repe " } else { "rep " })?;
        }
        if self.prefixes.contains(Prefixes::REPNE) {
            f.write_str("repne ")?;
        }
        write!(f, "{}", self.code)?;
        for (i, op) in self.operands().iter().enumerate() {
            if i == 0 {
                write!(f, " {}", op)?;
            } else {
                write!(f, ", {}", op)?;
            }
            if i == 0 {
                if self.op_mask != Register::None {
                    write!(f, "{{{}}}", self.op_mask)?;
                }
                if self.prefixes.contains(Prefixes::ZEROING) {
                    f.write_str("{z}")?;
                }
            }
            if let Operand::Memory(_) = op {
                if self.prefixes.contains(Prefixes::BROADCAST) {
                    f.write_str("{1toN}")?;
                }
            }
        }
        match self.rounding_control {
            RoundingControl::None => {}
            RoundingControl::RoundToNearest => f.write_str(", {rn-sae}")?,
            RoundingControl::RoundDown => f.write_str(", {rd-sae}")?,
            RoundingControl::RoundUp => f.write_str(", {ru-sae}")?,
            RoundingControl::RoundTowardZero => f.write_str(", {rz-sae}")?,
        }
        if self.prefixes.contains(Prefixes::SAE) {
            f.write_str(", {sae}")?;
        }
        Ok(())
    }
}

impl LengthedInstruction for Instruction {
    type Unit = AddressDiff<<X86 as Arch>::Address>;
    fn min_size() -> Self::Unit {
        AddressDiff::from_const(1)
    }
    fn len(&self) -> Self::Unit {
        AddressDiff::from_const(self.length as u64)
    }
}

impl yaxpeax_arch::Instruction for Instruction {
    fn well_defined(&self) -> bool {
        self.code != Code::INVALID
    }
}

#[cfg(test)]
mod test {
    use super::{Immediate, Instruction, MemoryOperand, Operand, Register};

    #[test]
    fn immediates_extend_by_kind() {
        assert_eq!(Immediate::Imm8(0xff).value(), 0xff);
        assert_eq!(Immediate::Imm8to16(-1).value(), 0xffff);
        assert_eq!(Immediate::Imm8to32(-1).value(), 0xffff_ffff);
        assert_eq!(Immediate::Imm8to64(-1).value(), u64::MAX);
        assert_eq!(Immediate::Imm32to64(-2).value(), u64::MAX - 1);
    }

    #[test]
    fn operands_have_no_gaps() {
        let mut inst = Instruction::default();
        inst.set_operand(0, Operand::Register(Register::EAX));
        inst.set_operand(1, Operand::Immediate(Immediate::Imm8(1)));
        assert_eq!(inst.operand_count(), 2);
        inst.set_operand(0, Operand::Register(Register::ECX));
        assert_eq!(inst.operand_count(), 2);
        assert_eq!(inst.operand(0), Operand::Register(Register::ECX));
        assert_eq!(inst.operand(2), Operand::Nothing);
    }

    #[test]
    fn memory_display() {
        let mem = MemoryOperand {
            base: Register::RAX,
            index: Register::RCX,
            scale: 2,
            displacement: (-8i64) as u64,
            displ_size: 1,
            segment: Register::DS,
        };
        assert_eq!(format!("{}", Operand::Memory(mem)), "[rax+rcx*4-0x8]");
        let mem = MemoryOperand {
            base: Register::None,
            index: Register::None,
            scale: 0,
            displacement: 0x1234,
            displ_size: 4,
            segment: Register::FS,
        };
        assert_eq!(format!("{}", Operand::Memory(mem)), "fs:[0x1234]");
    }

    #[test]
    fn displacements_are_signed_at_address_size() {
        let mem = MemoryOperand {
            base: Register::EAX,
            index: Register::None,
            scale: 0,
            displacement: 0xffff_ffff,
            displ_size: 1,
            segment: Register::DS,
        };
        assert_eq!(format!("{}", Operand::Memory(mem)), "[eax-0x1]");
        let mem = MemoryOperand {
            base: Register::BP,
            index: Register::SI,
            scale: 0,
            displacement: 0xfffe,
            displ_size: 1,
            segment: Register::SS,
        };
        assert_eq!(format!("{}", Operand::Memory(mem)), "[bp+si*1-0x2]");
        let mem = MemoryOperand {
            base: Register::EBX,
            index: Register::None,
            scale: 0,
            displacement: 0x7fff_ffff,
            displ_size: 4,
            segment: Register::DS,
        };
        assert_eq!(format!("{}", Operand::Memory(mem)), "[ebx+0x7fffffff]");
    }
}
