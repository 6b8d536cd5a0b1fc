use num_traits::WrappingAdd;
use tracing::trace;
use yaxpeax_arch::{Arch, Decoder, Reader, StandardDecodeError};

use crate::handlers::{HandlerFlags, HandlerId};
use crate::state::{DecoderOptions, DecoderState, EncodingKind, MandatoryPrefix, OpSize, StateFlags, TupleType, VectorLength};
use crate::tables::{OpcodeMap, Tables, TABLES};
use crate::{Code, Instruction, MemoryOperand, Operand, Prefixes, Register, X86};

/// no x86 instruction is longer than this, no matter how many prefixes it has.
pub(crate) const MAX_INSTRUCTION_LENGTH: u8 = 15;

/// an x86 decoder for one processor mode.
///
/// `bitness` picks 16-, 32- or 64-bit mode, which sets the default operand and address sizes
/// and whether REX/VEX/EVEX fields reach registers 8 and up. `ip` is the address of the first
/// byte the decoder's reader will produce; near branch targets are computed from it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InstDecoder {
    bitness: u32,
    options: DecoderOptions,
    ip: u64,
}

impl Default for InstDecoder {
    fn default() -> Self {
        InstDecoder::x86_64()
    }
}

impl InstDecoder {
    /// construct a decoder for `bitness`-bit code.
    ///
    /// panics if `bitness` is not one of 16, 32, or 64.
    pub fn new(bitness: u32, options: DecoderOptions) -> Self {
        assert!(matches!(bitness, 16 | 32 | 64), "invalid bitness: {}", bitness);
        InstDecoder { bitness, options, ip: 0 }
    }

    pub fn x86_16() -> Self {
        InstDecoder::new(16, DecoderOptions::empty())
    }

    pub fn x86_32() -> Self {
        InstDecoder::new(32, DecoderOptions::empty())
    }

    pub fn x86_64() -> Self {
        InstDecoder::new(64, DecoderOptions::empty())
    }

    pub fn with_options(mut self, options: DecoderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_ip(mut self, ip: u64) -> Self {
        self.ip = ip;
        self
    }

    pub fn bitness(&self) -> u32 {
        self.bitness
    }

    pub fn options(&self) -> DecoderOptions {
        self.options
    }

    pub fn ip(&self) -> u64 {
        self.ip
    }

    fn default_operand_size(&self) -> OpSize {
        if self.bitness == 16 { OpSize::Size16 } else { OpSize::Size32 }
    }

    fn inverted_operand_size(&self) -> OpSize {
        if self.bitness == 16 { OpSize::Size32 } else { OpSize::Size16 }
    }

    fn default_address_size(&self) -> OpSize {
        match self.bitness {
            16 => OpSize::Size16,
            32 => OpSize::Size32,
            _ => OpSize::Size64,
        }
    }

    fn inverted_address_size(&self) -> OpSize {
        if self.bitness == 32 { OpSize::Size16 } else { OpSize::Size32 }
    }

    pub(crate) fn decode_with_tables<T: Reader<<X86 as Arch>::Address, <X86 as Arch>::Word>>(
        &self,
        tables: &Tables,
        inst: &mut Instruction,
        words: &mut T,
    ) -> Result<(), <X86 as Arch>::DecodeError> {
        inst.reset();
        let ip = self.ip.wrapping_add(words.total_offset());
        let mut cx = DecodeCx {
            tables,
            decoder: self,
            words,
            inst,
            state: DecoderState::new(self.default_operand_size(), self.default_address_size()),
            length: 0,
            ip,
        };
        cx.decode_instruction();
        cx.finish()
    }
}

impl Decoder<X86> for InstDecoder {
    fn decode_into<T: Reader<<X86 as Arch>::Address, <X86 as Arch>::Word>>(&self, inst: &mut Instruction, words: &mut T) -> Result<(), <X86 as Arch>::DecodeError> {
        self.decode_with_tables(&TABLES, inst, words)
    }
}

const MEM_REGS_16: [(Register, Register); 8] = [
    (Register::BX, Register::SI),
    (Register::BX, Register::DI),
    (Register::BP, Register::SI),
    (Register::BP, Register::DI),
    (Register::SI, Register::None),
    (Register::DI, Register::None),
    (Register::BP, Register::None),
    (Register::BX, Register::None),
];

/// everything a handler can see or touch while decoding one instruction: the byte cursor, the
/// decoder state, the instruction being built, and the tables (for selectors that re-enter
/// another opcode map).
pub(crate) struct DecodeCx<'a, T> {
    pub(crate) tables: &'a Tables,
    decoder: &'a InstDecoder,
    words: &'a mut T,
    pub(crate) inst: &'a mut Instruction,
    pub(crate) state: DecoderState,
    length: u8,
    ip: u64,
}

impl<'a, T: Reader<u64, u8>> DecodeCx<'a, T> {
    #[inline]
    pub(crate) fn is64(&self) -> bool {
        self.decoder.bitness == 64
    }

    #[inline]
    pub(crate) fn options(&self) -> DecoderOptions {
        self.decoder.options
    }

    /// are reserved-bit and misplaced-prefix checks enabled?
    #[inline]
    pub(crate) fn invalid_check(&self) -> bool {
        !self.decoder.options.contains(DecoderOptions::NO_INVALID_CHECK)
    }

    pub(crate) fn default_operand_size(&self) -> OpSize {
        self.decoder.default_operand_size()
    }

    /// read one byte of the instruction.
    ///
    /// past the maximum instruction length, or at the end of input, this marks the instruction
    /// invalid and reads as zero. handlers never see a read fail.
    #[inline]
    pub(crate) fn read_u8(&mut self) -> u32 {
        if self.length < MAX_INSTRUCTION_LENGTH {
            match self.words.next() {
                Ok(b) => {
                    self.length += 1;
                    return b as u32;
                }
                Err(_) => {
                    self.state.flags |= StateFlags::NO_MORE_BYTES;
                }
            }
        }
        self.state.flags |= StateFlags::IS_INVALID;
        0
    }

    #[inline]
    pub(crate) fn read_ib(&mut self) -> u32 {
        self.read_u8()
    }

    #[inline]
    pub(crate) fn read_u16(&mut self) -> u32 {
        self.read_u8() | (self.read_u8() << 8)
    }

    #[inline]
    pub(crate) fn read_u32(&mut self) -> u32 {
        self.read_u8() | (self.read_u8() << 8) | (self.read_u8() << 16) | (self.read_u8() << 24)
    }

    #[inline]
    pub(crate) fn read_u64(&mut self) -> u64 {
        let low = self.read_u32() as u64;
        let high = self.read_u32() as u64;
        low | (high << 32)
    }

    #[inline]
    pub(crate) fn read_modrm(&mut self) {
        let m = self.read_u8();
        self.state.set_modrm(m as u8);
    }

    /// address of the byte after everything read so far. by the time a handler computes a
    /// branch target it has read the whole instruction, so this is the next instruction's ip.
    #[inline]
    pub(crate) fn current_ip64(&self) -> u64 {
        WrappingAdd::wrapping_add(&self.ip, &(self.length as u64))
    }

    #[inline]
    pub(crate) fn current_ip32(&self) -> u32 {
        self.current_ip64() as u32
    }

    #[inline]
    pub(crate) fn set_invalid_instruction(&mut self) {
        self.state.flags |= StateFlags::IS_INVALID;
    }

    /// `base + index`, or an invalid instruction with `Register::None` if that runs off the
    /// register list.
    #[inline]
    pub(crate) fn reg(&mut self, base: Register, index: u32) -> Register {
        match base.add(index) {
            Some(reg) => reg,
            None => {
                self.set_invalid_instruction();
                Register::None
            }
        }
    }

    #[inline]
    pub(crate) fn set_code(&mut self, code: Code) {
        self.inst.code = code;
    }

    #[inline]
    pub(crate) fn set_op(&mut self, i: usize, operand: Operand) {
        self.inst.set_operand(i, operand);
    }

    #[inline]
    pub(crate) fn set_reg(&mut self, i: usize, reg: Register) {
        self.inst.set_operand(i, Operand::Register(reg));
    }

    /// mark the mandatory prefix as consumed by the opcode: `66` no longer changes the
    /// operand size, and `F3`/`F2` are no longer reported as rep prefixes.
    pub(crate) fn clear_mandatory_prefix(&mut self) {
        match self.state.mandatory_prefix {
            MandatoryPrefix::P66 => {
                self.state.operand_size = self.default_operand_size();
            }
            MandatoryPrefix::PF3 => self.clear_mandatory_prefix_f3(),
            MandatoryPrefix::PF2 => self.clear_mandatory_prefix_f2(),
            MandatoryPrefix::None => {}
        }
    }

    pub(crate) fn clear_mandatory_prefix_f3(&mut self) {
        self.inst.prefixes.remove(Prefixes::REPE);
    }

    pub(crate) fn clear_mandatory_prefix_f2(&mut self) {
        self.inst.prefixes.remove(Prefixes::REPNE);
    }

    /// reinterpret `F2`/`F3` as `xacquire`/`xrelease` where the leaf allows it.
    pub(crate) fn set_xacquire_release(&mut self, flags: HandlerFlags) {
        if !flags.contains(HandlerFlags::XACQUIRE_RELEASE_NO_LOCK) && !self.inst.has_lock_prefix() {
            return;
        }
        match self.state.mandatory_prefix {
            MandatoryPrefix::PF2 if flags.contains(HandlerFlags::XACQUIRE) => {
                self.clear_mandatory_prefix_f2();
                self.inst.prefixes |= Prefixes::XACQUIRE;
            }
            MandatoryPrefix::PF3 if flags.contains(HandlerFlags::XRELEASE) => {
                self.clear_mandatory_prefix_f3();
                self.inst.prefixes |= Prefixes::XRELEASE;
            }
            _ => {}
        }
    }

    /// the segment register in ModRM.reg. `reg` 6 and 7 don't name a segment register.
    pub(crate) fn read_op_sw(&mut self) -> Register {
        let reg = self.state.reg;
        if reg >= 6 {
            self.set_invalid_instruction();
            Register::None
        } else {
            self.reg(Register::ES, reg)
        }
    }

    /// run the handler for the next opcode byte in `map`.
    pub(crate) fn decode_table(&mut self, map: OpcodeMap) {
        let b = self.read_u8() as u8;
        let id = self.tables.entry(map, b);
        self.decode_handler(id);
    }

    /// run handler `id`, reading a ModRM byte first if it wants one.
    pub(crate) fn decode_handler(&mut self, id: HandlerId) {
        let tables = self.tables;
        let handler = tables.handler(id);
        if handler.has_modrm() {
            self.read_modrm();
        }
        handler.decode(self);
    }

    /// run handler `id` with the ModRM state as it is.
    #[inline]
    pub(crate) fn decode_child(&mut self, id: HandlerId) {
        let tables = self.tables;
        tables.handler(id).decode(self);
    }

    fn decode_instruction(&mut self) {
        let is64 = self.is64();
        let mut rex_prefix = 0u32;
        let b = loop {
            let b = self.read_u8();
            if self.state.flags.contains(StateFlags::NO_MORE_BYTES) {
                return;
            }
            match b {
                0x26 | 0x2e | 0x36 | 0x3e => {
                    let fs_or_gs = self.state.default_ds_segment == Register::FS
                        || self.state.default_ds_segment == Register::GS;
                    // in 64-bit mode es/cs/ss/ds overrides don't displace fs/gs.
                    if !is64 || !fs_or_gs {
                        let segment = match b {
                            0x26 => Register::ES,
                            0x2e => Register::CS,
                            0x36 => Register::SS,
                            _ => Register::DS,
                        };
                        self.inst.segment_prefix = segment;
                        self.state.default_ds_segment = segment;
                    }
                    rex_prefix = 0;
                }
                0x64 | 0x65 => {
                    let segment = if b == 0x64 { Register::FS } else { Register::GS };
                    self.inst.segment_prefix = segment;
                    self.state.default_ds_segment = segment;
                    rex_prefix = 0;
                }
                0x66 => {
                    self.state.operand_size = self.decoder.inverted_operand_size();
                    rex_prefix = 0;
                    if self.state.mandatory_prefix == MandatoryPrefix::None {
                        self.state.mandatory_prefix = MandatoryPrefix::P66;
                    }
                }
                0x67 => {
                    self.state.address_size = self.decoder.inverted_address_size();
                    rex_prefix = 0;
                }
                0xf0 => {
                    self.inst.prefixes |= Prefixes::LOCK;
                    self.state.flags |= StateFlags::LOCK;
                    rex_prefix = 0;
                }
                0xf2 => {
                    self.inst.prefixes |= Prefixes::REPNE;
                    self.state.mandatory_prefix = MandatoryPrefix::PF2;
                    rex_prefix = 0;
                }
                0xf3 => {
                    self.inst.prefixes |= Prefixes::REPE;
                    self.state.mandatory_prefix = MandatoryPrefix::PF3;
                    rex_prefix = 0;
                }
                0x40..=0x4f if is64 => {
                    rex_prefix = b;
                }
                _ => break b,
            }
        };

        // a rex prefix only counts if it is the last prefix.
        if rex_prefix != 0 {
            self.state.flags |= StateFlags::HAS_REX;
            if rex_prefix & 8 != 0 {
                self.state.operand_size = OpSize::Size64;
                self.state.flags |= StateFlags::W;
            }
            self.state.extra_register_base = (rex_prefix & 4) << 1;
            self.state.extra_index_register_base = (rex_prefix & 2) << 2;
            self.state.extra_base_register_base = (rex_prefix & 1) << 3;
        }

        let id = self.tables.entry(OpcodeMap::Legacy, b as u8);
        self.decode_handler(id);
    }

    fn finish(self) -> Result<(), StandardDecodeError> {
        self.inst.length = self.length;
        self.inst.encoding = self.state.encoding;
        let flags = self.state.flags;
        if flags.contains(StateFlags::NO_MORE_BYTES) {
            return Err(StandardDecodeError::ExhaustedInput);
        }
        let unsupported_lock = flags.contains(StateFlags::LOCK)
            && !flags.contains(StateFlags::ALLOW_LOCK)
            && self.invalid_check();
        if flags.contains(StateFlags::IS_INVALID) || unsupported_lock {
            trace!(
                length = self.length,
                code = ?self.inst.code,
                flags = ?flags,
                "instruction marked invalid"
            );
            self.inst.code = Code::INVALID;
        }
        Ok(())
    }

    /// VEX/XOP/EVEX prefixes can't follow REX or a `66`/`F2`/`F3` prefix.
    fn check_vex_prefix_placement(&mut self) {
        let misplaced = self.state.flags.contains(StateFlags::HAS_REX)
            || self.state.mandatory_prefix != MandatoryPrefix::None;
        if misplaced && self.invalid_check() {
            self.set_invalid_instruction();
        }
    }

    /// two-byte VEX (`C5`). the second prefix byte has been read as ModRM.
    pub(crate) fn vex2(&mut self) {
        self.check_vex_prefix_placement();
        self.state.encoding = EncodingKind::Vex;
        let b = self.state.modrm;
        if self.is64() && (b & 0x80) == 0 {
            self.state.extra_register_base = 8;
        }
        self.state.vvvv = (!b >> 3) & 0x0f;
        if !self.is64() {
            self.state.vvvv &= 0x07;
        }
        self.state.vector_length = VectorLength::from_bits(((b >> 2) & 1) as u8);
        self.state.mandatory_prefix = MandatoryPrefix::from_pp(b as u8);
        self.decode_table(OpcodeMap::Vex0F);
    }

    /// three-byte VEX (`C4`) or XOP (`8F`). they only differ in which maps they can select.
    fn vex3_or_xop(&mut self, encoding: EncodingKind) {
        self.check_vex_prefix_placement();
        self.state.encoding = encoding;
        let b1 = self.state.modrm;
        let b2 = self.read_u8();
        if b2 & 0x80 != 0 {
            self.state.flags |= StateFlags::W;
        }
        self.state.vector_length = VectorLength::from_bits(((b2 >> 2) & 1) as u8);
        self.state.mandatory_prefix = MandatoryPrefix::from_pp(b2 as u8);
        if self.is64() {
            if b2 & 0x80 != 0 {
                self.state.operand_size = OpSize::Size64;
            }
            self.state.vvvv = (!b2 >> 3) & 0x0f;
            let b1x = !b1;
            self.state.extra_register_base = (b1x >> 4) & 8;
            self.state.extra_index_register_base = (b1x >> 3) & 8;
            self.state.extra_base_register_base = (b1x >> 2) & 8;
        } else {
            self.state.vvvv = (!b2 >> 3) & 0x07;
        }
        let map = match (encoding, b1 & 0x1f) {
            (EncodingKind::Vex, 1) => OpcodeMap::Vex0F,
            (EncodingKind::Vex, 2) => OpcodeMap::Vex0F38,
            (EncodingKind::Vex, 3) => OpcodeMap::Vex0F3A,
            (EncodingKind::Xop, 8) => OpcodeMap::Xop8,
            (EncodingKind::Xop, 9) => OpcodeMap::Xop9,
            (EncodingKind::Xop, 10) => OpcodeMap::XopA,
            _ => {
                self.set_invalid_instruction();
                return;
            }
        };
        self.decode_table(map);
    }

    pub(crate) fn vex3(&mut self) {
        self.vex3_or_xop(EncodingKind::Vex);
    }

    pub(crate) fn xop(&mut self) {
        self.vex3_or_xop(EncodingKind::Xop);
    }

    /// four-byte EVEX (`62`). `P0` has been read as ModRM.
    pub(crate) fn evex(&mut self) {
        self.check_vex_prefix_placement();
        let p0 = self.state.modrm;
        let p1 = self.read_u8();
        let p2 = self.read_u8();

        if p1 & 4 == 0 {
            self.set_invalid_instruction();
            return;
        }
        if p0 & 0x0c != 0 {
            self.set_invalid_instruction();
            return;
        }

        self.state.encoding = EncodingKind::Evex;
        self.state.mandatory_prefix = MandatoryPrefix::from_pp(p1 as u8);
        if p1 & 0x80 != 0 {
            self.state.flags |= StateFlags::W;
        }
        let aaa = p2 & 7;
        self.state.aaa = aaa;
        if p2 & 0x80 != 0 {
            self.state.flags |= StateFlags::Z;
        }
        if aaa == 0 && self.state.z() && self.invalid_check() {
            self.set_invalid_instruction();
        }
        if p2 & 0x10 != 0 {
            self.state.flags |= StateFlags::B;
        }
        self.state.vector_length = VectorLength::from_bits(((p2 >> 5) & 3) as u8);

        if self.is64() {
            self.state.vvvv = (!p1 >> 3) & 0x0f;
            let v_prime = (!p2 & 8) << 1;
            self.state.vvvv += v_prime;
            if p1 & 0x80 != 0 {
                self.state.operand_size = OpSize::Size64;
            }
            let p0x = !p0;
            self.state.extra_register_base = (p0x >> 4) & 8;
            self.state.extra_index_register_base = (p0x & 0x40) >> 3;
            self.state.extra_base_register_base_evex = (p0x & 0x40) >> 2;
            self.state.extra_base_register_base = (p0x >> 2) & 8;
            self.state.extra_register_base_evex = p0x & 0x10;
        } else {
            self.state.vvvv = (!p1 >> 3) & 0x07;
        }

        if aaa != 0 {
            self.inst.op_mask = self.reg(Register::K0, aaa);
        }
        if self.state.z() {
            self.inst.prefixes |= Prefixes::ZEROING;
        }

        let map = match p0 & 3 {
            1 => OpcodeMap::Evex0F,
            2 => OpcodeMap::Evex0F38,
            3 => OpcodeMap::Evex0F3A,
            _ => {
                self.set_invalid_instruction();
                return;
            }
        };
        self.decode_table(map);
    }

    /// the memory operand described by ModRM (and SIB and displacement, if present).
    #[inline]
    pub(crate) fn read_op_mem(&mut self) -> Operand {
        self.read_op_mem_tuple(TupleType::None)
    }

    /// like `read_op_mem`, with an EVEX disp8*N scale for 8-bit displacements.
    pub(crate) fn read_op_mem_tuple(&mut self, tuple: TupleType) -> Operand {
        let mem = match self.state.address_size {
            OpSize::Size64 => self.read_op_mem_32_or_64(Register::RAX, tuple),
            OpSize::Size32 => self.read_op_mem_32_or_64(Register::EAX, tuple),
            OpSize::Size16 => self.read_op_mem_16(tuple),
        };
        Operand::Memory(mem)
    }

    /// memory operand for MPX instructions: always 64-bit addressing in 64-bit mode, and 16-bit
    /// addressing is not allowed.
    pub(crate) fn read_op_mem_mpx(&mut self) -> Operand {
        let mem = if self.is64() {
            self.state.address_size = OpSize::Size64;
            self.read_op_mem_32_or_64(Register::RAX, TupleType::None)
        } else if self.state.address_size == OpSize::Size32 {
            self.read_op_mem_32_or_64(Register::EAX, TupleType::None)
        } else {
            let mem = self.read_op_mem_16(TupleType::None);
            if self.invalid_check() {
                self.set_invalid_instruction();
            }
            mem
        };
        Operand::Memory(mem)
    }

    /// an absolute-address memory operand (`moffs`). 64-bit moffs are 8 bytes of address.
    pub(crate) fn read_moffs(&mut self) -> Operand {
        let (displacement, displ_size) = match self.state.address_size {
            OpSize::Size64 => (self.read_u64(), 8),
            OpSize::Size32 => (self.read_u32() as u64, 4),
            OpSize::Size16 => (self.read_u16() as u64, 2),
        };
        Operand::Memory(self.memory(Register::None, Register::None, 0, displacement, displ_size))
    }

    fn memory(&self, base: Register, index: Register, scale: u8, displacement: u64, displ_size: u8) -> MemoryOperand {
        let segment = if self.inst.segment_prefix != Register::None {
            self.inst.segment_prefix
        } else {
            match base {
                Register::BP | Register::EBP | Register::RBP | Register::SP | Register::ESP | Register::RSP => Register::SS,
                _ => Register::DS,
            }
        };
        MemoryOperand { base, index, scale, displacement, displ_size, segment }
    }

    fn disp8(&mut self, tuple: TupleType) -> u32 {
        let d = self.read_u8() as u8 as i8 as i32 as u32;
        d.wrapping_mul(self.disp8n(tuple))
    }

    fn read_op_mem_16(&mut self, tuple: TupleType) -> MemoryOperand {
        let (mut base, index) = MEM_REGS_16[self.state.rm as usize];
        let (displacement, displ_size) = match self.state.mod_ {
            0 => {
                if self.state.rm == 6 {
                    base = Register::None;
                    (self.read_u16() as u64, 2)
                } else {
                    (0, 0)
                }
            }
            1 => (self.disp8(tuple) as u16 as u64, 1),
            _ => (self.read_u16() as u64, 2),
        };
        self.memory(base, index, 0, displacement, displ_size)
    }

    fn widen_displacement(&self, displ: u32) -> u64 {
        if self.state.address_size == OpSize::Size64 {
            displ as i32 as i64 as u64
        } else {
            displ as u64
        }
    }

    fn read_op_mem_32_or_64(&mut self, base_reg: Register, tuple: TupleType) -> MemoryOperand {
        let extra_base = self.state.extra_base_register_base;
        let (sib, displ_size, displ) = match self.state.mod_ {
            0 => {
                if self.state.rm == 4 {
                    (self.read_u8(), 0, 0)
                } else if self.state.rm == 5 {
                    let displ = self.read_u32();
                    let base = if !self.is64() {
                        Register::None
                    } else if self.state.address_size == OpSize::Size64 {
                        Register::RIP
                    } else {
                        Register::EIP
                    };
                    let displacement = self.widen_displacement(displ);
                    return self.memory(base, Register::None, 0, displacement, 4);
                } else {
                    let base = self.reg(base_reg, extra_base + self.state.rm);
                    return self.memory(base, Register::None, 0, 0, 0);
                }
            }
            1 => {
                if self.state.rm == 4 {
                    let sib = self.read_u8();
                    (sib, 1, self.disp8(tuple))
                } else {
                    let displ = self.disp8(tuple);
                    let base = self.reg(base_reg, extra_base + self.state.rm);
                    let displacement = self.widen_displacement(displ);
                    return self.memory(base, Register::None, 0, displacement, 1);
                }
            }
            _ => {
                if self.state.rm == 4 {
                    let sib = self.read_u8();
                    (sib, 4, self.read_u32())
                } else {
                    let displ = self.read_u32();
                    let base = self.reg(base_reg, extra_base + self.state.rm);
                    let displacement = self.widen_displacement(displ);
                    return self.memory(base, Register::None, 0, displacement, 4);
                }
            }
        };

        let index_num = ((sib >> 3) & 7) + self.state.extra_index_register_base;
        let index = if index_num != 4 {
            self.reg(base_reg, index_num)
        } else {
            Register::None
        };
        let scale = (sib >> 6) as u8;
        let base_num = sib & 7;
        if base_num == 5 && self.state.mod_ == 0 {
            let displ = self.read_u32();
            let displacement = self.widen_displacement(displ);
            self.memory(Register::None, index, scale, displacement, 4)
        } else {
            let base = self.reg(base_reg, base_num + extra_base);
            let displacement = self.widen_displacement(displ);
            self.memory(base, index, scale, displacement, displ_size)
        }
    }

    /// the disp8*N multiplier for an EVEX memory operand.
    fn disp8n(&self, tuple: TupleType) -> u32 {
        let b = self.state.b();
        let w = self.state.w();
        match tuple {
            TupleType::None => 1,
            TupleType::Full_128 | TupleType::Full_256 | TupleType::Full_512 if b => {
                if w { 8 } else { 4 }
            }
            TupleType::Full_128 => 16,
            TupleType::Full_256 => 32,
            TupleType::Full_512 => 64,
            TupleType::Half_128 | TupleType::Half_256 | TupleType::Half_512 if b => 4,
            TupleType::Half_128 => 8,
            TupleType::Half_256 => 16,
            TupleType::Half_512 => 32,
            TupleType::Full_Mem_128 => 16,
            TupleType::Full_Mem_256 => 32,
            TupleType::Full_Mem_512 => 64,
            TupleType::Tuple1_Scalar | TupleType::Tuple1_Fixed => {
                if w { 8 } else { 4 }
            }
            TupleType::Tuple1_Scalar_1 => 1,
            TupleType::Tuple1_Scalar_2 => 2,
            TupleType::Tuple1_Scalar_4 | TupleType::Tuple1_Fixed_4 => 4,
            TupleType::Tuple1_Scalar_8 | TupleType::Tuple1_Fixed_8 => 8,
            TupleType::Tuple2 => {
                if w { 16 } else { 8 }
            }
            TupleType::Tuple4 => {
                if w { 32 } else { 16 }
            }
            TupleType::Tuple8 => 32,
        }
    }
}

#[cfg(test)]
mod test {
    use yaxpeax_arch::{Decoder, U8Reader};

    use crate::{Code, InstDecoder, Instruction, MemoryOperand, Operand, Register};

    fn decode(decoder: &InstDecoder, bytes: &[u8]) -> Instruction {
        decoder.decode(&mut U8Reader::new(bytes)).expect("decode succeeds")
    }

    fn mem(inst: &Instruction, i: usize) -> MemoryOperand {
        match inst.operand(i) {
            Operand::Memory(mem) => mem,
            other => panic!("operand {} of {:?} is not memory: {:?}", i, inst, other),
        }
    }

    #[test]
    fn sib_and_displacement() {
        let decoder = InstDecoder::x86_64();
        // mov eax, [rbx+rcx*4+0x10]
        let inst = decode(&decoder, &[0x8b, 0x44, 0x8b, 0x10]);
        let m = mem(&inst, 1);
        assert_eq!((m.base, m.index, m.scale, m.displacement, m.displ_size), (Register::RBX, Register::RCX, 2, 0x10, 1));
        assert_eq!(m.segment, Register::DS);

        // mov eax, [rsp]: index 4 means no index; rsp base defaults to ss
        let inst = decode(&decoder, &[0x8b, 0x04, 0x24]);
        let m = mem(&inst, 1);
        assert_eq!((m.base, m.index), (Register::RSP, Register::None));
        assert_eq!(m.segment, Register::SS);

        // mov eax, [r12*2+disp32] via rex.x
        let inst = decode(&decoder, &[0x42, 0x8b, 0x04, 0x65, 0x78, 0x56, 0x34, 0x12]);
        let m = mem(&inst, 1);
        assert_eq!((m.base, m.index, m.scale, m.displacement), (Register::None, Register::R12, 1, 0x12345678));
    }

    #[test]
    fn rip_relative_and_negative_displacements() {
        let decoder = InstDecoder::x86_64();
        let inst = decode(&decoder, &[0x8b, 0x05, 0xf0, 0xff, 0xff, 0xff]);
        let m = mem(&inst, 1);
        assert_eq!(m.base, Register::RIP);
        assert_eq!(m.displacement, (-16i64) as u64);

        let decoder = InstDecoder::x86_32();
        let inst = decode(&decoder, &[0x8b, 0x05, 0x00, 0x10, 0x00, 0x00]);
        let m = mem(&inst, 1);
        assert_eq!((m.base, m.displacement, m.displ_size), (Register::None, 0x1000, 4));
        let inst = decode(&decoder, &[0x8b, 0x40, 0xff]);
        assert_eq!(mem(&inst, 1).displacement, 0xffff_ffff);
    }

    #[test]
    fn sixteen_bit_addressing() {
        let decoder = InstDecoder::x86_16();
        // mov ax, [bp+di+0x7f]
        let inst = decode(&decoder, &[0x8b, 0x43, 0x7f]);
        let m = mem(&inst, 1);
        assert_eq!((m.base, m.index, m.displacement), (Register::BP, Register::DI, 0x7f));
        assert_eq!(m.segment, Register::SS);
        assert_eq!(inst.operand(0), Operand::Register(Register::AX));
        // mov ax, [0x1234]
        let inst = decode(&decoder, &[0x8b, 0x06, 0x34, 0x12]);
        let m = mem(&inst, 1);
        assert_eq!((m.base, m.index, m.displacement), (Register::None, Register::None, 0x1234));
        // address size prefix in 16-bit mode gets 32-bit addressing
        let inst = decode(&decoder, &[0x67, 0x8b, 0x00]);
        assert_eq!(mem(&inst, 1).base, Register::EAX);
    }

    #[test]
    fn segment_overrides() {
        let decoder = InstDecoder::x86_64();
        let inst = decode(&decoder, &[0x64, 0x8b, 0x00]);
        assert_eq!(inst.segment_prefix(), Register::FS);
        assert_eq!(mem(&inst, 1).segment, Register::FS);
        // es after fs is ignored in 64-bit mode
        let inst = decode(&decoder, &[0x64, 0x26, 0x8b, 0x00]);
        assert_eq!(mem(&inst, 1).segment, Register::FS);
        let decoder = InstDecoder::x86_32();
        let inst = decode(&decoder, &[0x64, 0x26, 0x8b, 0x00]);
        assert_eq!(mem(&inst, 1).segment, Register::ES);
    }

    #[test]
    fn rex_must_be_last() {
        let decoder = InstDecoder::x86_64();
        // rex.w, then 66: the rex is dropped
        let inst = decode(&decoder, &[0x48, 0x66, 0x01, 0xc0]);
        assert_eq!(inst.code(), Code::Add_rm16_r16);
        let inst = decode(&decoder, &[0x66, 0x48, 0x01, 0xc0]);
        assert_eq!(inst.code(), Code::Add_rm64_r64);
    }

    #[test]
    fn length_limit_and_truncation() {
        let decoder = InstDecoder::x86_64();
        let mut bytes = [0x66u8; 16];
        bytes[15] = 0x90;
        let inst = decode(&decoder, &bytes);
        assert_eq!(inst.code(), Code::INVALID);
        assert_eq!(inst.length(), 15);

        let mut inst = Instruction::default();
        let res = decoder.decode_into(&mut inst, &mut U8Reader::new(&[0xb8, 0x01, 0x02]));
        assert_eq!(res, Err(yaxpeax_arch::StandardDecodeError::ExhaustedInput));
        let res = decoder.decode_into(&mut inst, &mut U8Reader::new(&[]));
        assert_eq!(res, Err(yaxpeax_arch::StandardDecodeError::ExhaustedInput));
    }

    #[test]
    fn unsupported_lock_is_invalid() {
        let decoder = InstDecoder::x86_64();
        // lock add [rax], eax is fine, lock add eax, eax is not
        assert_eq!(decode(&decoder, &[0xf0, 0x01, 0x00]).code(), Code::Add_rm32_r32);
        assert_eq!(decode(&decoder, &[0xf0, 0x01, 0xc0]).code(), Code::INVALID);
        let lenient = decoder.with_options(crate::DecoderOptions::NO_INVALID_CHECK);
        assert_eq!(decode(&lenient, &[0xf0, 0x01, 0xc0]).code(), Code::Add_rm32_r32);
    }

    #[test]
    fn ip_tracks_reader_offset() {
        let decoder = InstDecoder::x86_64().with_ip(0x1000);
        let bytes = [0x90, 0xeb, 0x10];
        let mut reader = U8Reader::new(&bytes);
        let first = decoder.decode(&mut reader).expect("nop");
        assert_eq!(first.code(), Code::Nopd);
        let second = decoder.decode(&mut reader).expect("jmp");
        assert_eq!(second.operand(0), Operand::NearBranch(crate::NearBranch::Near64(0x1013)));
    }
}
