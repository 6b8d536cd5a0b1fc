use bitflags::bitflags;

use crate::Register;

/// the legacy prefix (if any) that may select an instruction rather than modify it.
///
/// selectors index four-element arrays by this value, so the discriminants are fixed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum MandatoryPrefix {
    None = 0,
    P66 = 1,
    PF3 = 2,
    PF2 = 3,
}

impl MandatoryPrefix {
    pub(crate) fn from_pp(pp: u8) -> Self {
        match pp & 3 {
            0 => MandatoryPrefix::None,
            1 => MandatoryPrefix::P66,
            2 => MandatoryPrefix::PF3,
            _ => MandatoryPrefix::PF2,
        }
    }
}

/// vector length from VEX.L or EVEX.L'L. indexes selector arrays like `MandatoryPrefix`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum VectorLength {
    L128 = 0,
    L256 = 1,
    L512 = 2,
    Unknown = 3,
}

impl VectorLength {
    pub(crate) fn from_bits(ll: u8) -> Self {
        match ll & 3 {
            0 => VectorLength::L128,
            1 => VectorLength::L256,
            2 => VectorLength::L512,
            _ => VectorLength::Unknown,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EncodingKind {
    Legacy,
    Vex,
    Evex,
    Xop,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OpSize {
    Size16 = 0,
    Size32 = 1,
    Size64 = 2,
}

bitflags! {
    /// per-instruction decode flags. set by the prefix scan and by handlers.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub(crate) struct StateFlags: u32 {
        const HAS_REX = 1 << 0;
        /// EVEX.b: broadcast, or rounding control/sae for register forms.
        const B = 1 << 1;
        /// EVEX.z: zeroing-masking.
        const Z = 1 << 2;
        const IS_INVALID = 1 << 3;
        /// REX.W, VEX.W, XOP.W or EVEX.W.
        const W = 1 << 4;
        const LOCK = 1 << 5;
        /// the leaf that decoded this instruction accepts a lock prefix.
        const ALLOW_LOCK = 1 << 6;
        /// input ran out before the instruction did.
        const NO_MORE_BYTES = 1 << 7;
    }
}

bitflags! {
    /// options that change how some encodings decode.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct DecoderOptions: u32 {
        /// decode branches the way AMD processors do: 16-bit operand size is honored in 64-bit
        /// mode instead of being ignored.
        const AMD = 1 << 0;
        /// decode `0F 18..1F` as reserved nops even where another instruction is defined.
        const FORCE_RESERVED_NOP = 1 << 1;
        /// don't mark instructions invalid for reserved bits, misplaced prefixes, or an
        /// unsupported lock prefix.
        const NO_INVALID_CHECK = 1 << 2;
        const LOADALL386 = 1 << 3;
        const UMOV = 1 << 4;
        /// `mov r32, tr` and `mov tr, r32` (`0F 24`/`0F 26`).
        const MOV_TR = 1 << 5;
        /// don't decode `F3 90` as `pause`.
        const NO_PAUSE = 1 << 6;
        /// don't decode `lock mov reg, cr0` as `mov reg, cr8`.
        const NO_LOCK_MOV_CR0 = 1 << 7;
    }
}

/// how an EVEX memory operand's 8-bit displacement is scaled (disp8*N).
#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TupleType {
    None,
    Full_128,
    Full_256,
    Full_512,
    Half_128,
    Half_256,
    Half_512,
    Full_Mem_128,
    Full_Mem_256,
    Full_Mem_512,
    Tuple1_Scalar,
    Tuple1_Scalar_1,
    Tuple1_Scalar_2,
    Tuple1_Scalar_4,
    Tuple1_Scalar_8,
    Tuple1_Fixed,
    Tuple1_Fixed_4,
    Tuple1_Fixed_8,
    Tuple2,
    Tuple4,
    Tuple8,
}

/// scratch for one decode: prefix state, the ModRM fields, and extra register bits from
/// REX/VEX/XOP/EVEX.
///
/// everything here is reset at the start of each instruction. handlers read the addressing
/// fields and only write the mandatory prefix (to mark it consumed) and flags.
#[derive(Debug, Clone)]
pub(crate) struct DecoderState {
    pub modrm: u32,
    pub mod_: u32,
    pub reg: u32,
    pub rm: u32,
    pub extra_register_base: u32,
    pub extra_index_register_base: u32,
    pub extra_base_register_base: u32,
    pub extra_register_base_evex: u32,
    pub extra_base_register_base_evex: u32,
    pub vvvv: u32,
    pub aaa: u32,
    pub flags: StateFlags,
    pub mandatory_prefix: MandatoryPrefix,
    pub vector_length: VectorLength,
    pub encoding: EncodingKind,
    pub operand_size: OpSize,
    pub address_size: OpSize,
    pub default_ds_segment: Register,
}

impl DecoderState {
    pub fn new(operand_size: OpSize, address_size: OpSize) -> Self {
        DecoderState {
            modrm: 0,
            mod_: 0,
            reg: 0,
            rm: 0,
            extra_register_base: 0,
            extra_index_register_base: 0,
            extra_base_register_base: 0,
            extra_register_base_evex: 0,
            extra_base_register_base_evex: 0,
            vvvv: 0,
            aaa: 0,
            flags: StateFlags::empty(),
            mandatory_prefix: MandatoryPrefix::None,
            vector_length: VectorLength::L128,
            encoding: EncodingKind::Legacy,
            operand_size,
            address_size,
            default_ds_segment: Register::DS,
        }
    }

    #[inline]
    pub fn set_modrm(&mut self, m: u8) {
        let m = m as u32;
        self.modrm = m;
        self.mod_ = m >> 6;
        self.reg = (m >> 3) & 7;
        self.rm = m & 7;
    }

    #[inline]
    pub fn w(&self) -> bool {
        self.flags.contains(StateFlags::W)
    }

    #[inline]
    pub fn b(&self) -> bool {
        self.flags.contains(StateFlags::B)
    }

    #[inline]
    pub fn z(&self) -> bool {
        self.flags.contains(StateFlags::Z)
    }
}

#[cfg(test)]
mod test {
    use super::{MandatoryPrefix, OpSize, DecoderState, VectorLength};

    #[test]
    fn ordinals_are_fixed() {
        assert_eq!(MandatoryPrefix::None as usize, 0);
        assert_eq!(MandatoryPrefix::P66 as usize, 1);
        assert_eq!(MandatoryPrefix::PF3 as usize, 2);
        assert_eq!(MandatoryPrefix::PF2 as usize, 3);
        assert_eq!(VectorLength::L128 as usize, 0);
        assert_eq!(VectorLength::L256 as usize, 1);
        assert_eq!(VectorLength::L512 as usize, 2);
        assert_eq!(VectorLength::Unknown as usize, 3);
        for pp in 0..4u8 {
            assert_eq!(MandatoryPrefix::from_pp(pp) as u8, pp);
            assert_eq!(VectorLength::from_bits(pp) as u8, pp);
        }
    }

    #[test]
    fn modrm_fields() {
        let mut state = DecoderState::new(OpSize::Size32, OpSize::Size64);
        state.set_modrm(0b11_010_101);
        assert_eq!(state.mod_, 3);
        assert_eq!(state.reg, 2);
        assert_eq!(state.rm, 5);
        assert_eq!(state.modrm, 0xd5);
    }
}
