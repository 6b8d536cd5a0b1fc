//! leaf handlers for legacy (non-VEX/EVEX) encodings.
//!
//! sized handlers carry one `Code` per operand size, in `[16, 32, 64]` order, and are indexed by
//! `OpSize`. "Ev"-style names follow the SDM's operand notation: `E` is a ModRM.rm operand
//! (register or memory), `G` a ModRM.reg register, `v` the operand size, `b` a byte, `z` a word
//! or dword immediate, `M` memory only, `R` register only.

use yaxpeax_arch::Reader;

use crate::decoder::DecodeCx;
use crate::handlers::HandlerFlags;
use crate::state::{DecoderOptions, MandatoryPrefix, OpSize, StateFlags};
use crate::{Code, Immediate, NearBranch, Operand, Prefixes, Register};

/// the first general purpose register of `size`.
#[inline]
pub(crate) fn gpr_base(size: OpSize) -> Register {
    match size {
        OpSize::Size16 => Register::AX,
        OpSize::Size32 => Register::EAX,
        OpSize::Size64 => Register::RAX,
    }
}

/// an `Iz` immediate: a word for 16-bit operands, otherwise a dword (sign-extended for 64-bit
/// operands).
fn iz<T: Reader<u64, u8>>(cx: &mut DecodeCx<T>, size: OpSize) -> Operand {
    Operand::Immediate(match size {
        OpSize::Size16 => Immediate::Imm16(cx.read_u16() as u16),
        OpSize::Size32 => Immediate::Imm32(cx.read_u32()),
        OpSize::Size64 => Immediate::Imm32to64(cx.read_u32() as i32),
    })
}

/// an `Ib` immediate sign-extended to the operand size.
fn ib_sext<T: Reader<u64, u8>>(cx: &mut DecodeCx<T>, size: OpSize) -> Operand {
    let b = cx.read_ib() as u8 as i8;
    Operand::Immediate(match size {
        OpSize::Size16 => Immediate::Imm8to16(b),
        OpSize::Size32 => Immediate::Imm8to32(b),
        OpSize::Size64 => Immediate::Imm8to64(b),
    })
}

fn imm8<T: Reader<u64, u8>>(cx: &mut DecodeCx<T>) -> Operand {
    Operand::Immediate(Immediate::Imm8(cx.read_ib() as u8))
}

impl<'a, T: Reader<u64, u8>> DecodeCx<'a, T> {
    /// the ModRM.reg register, counted from `base`.
    #[inline]
    pub(crate) fn modrm_reg(&mut self, base: Register) -> Register {
        let index = self.state.reg + self.state.extra_register_base;
        self.reg(base, index)
    }

    /// the ModRM.rm register, counted from `base`. only meaningful when `mod == 3`.
    #[inline]
    pub(crate) fn modrm_rm(&mut self, base: Register) -> Register {
        let index = self.state.rm + self.state.extra_base_register_base;
        self.reg(base, index)
    }

    /// the ModRM.rm operand: a register counted from `base` if `mod == 3`, memory otherwise.
    #[inline]
    pub(crate) fn modrm_rm_or_mem(&mut self, base: Register) -> Operand {
        if self.state.mod_ == 3 {
            Operand::Register(self.modrm_rm(base))
        } else {
            self.read_op_mem()
        }
    }

    /// like `modrm_rm_or_mem`, but the memory form may take lock/xacquire/xrelease prefixes
    /// according to `flags`.
    pub(crate) fn modrm_rm_or_mem_lockable(&mut self, base: Register, flags: HandlerFlags) -> Operand {
        if self.state.mod_ == 3 {
            Operand::Register(self.modrm_rm(base))
        } else {
            if flags.intersects(HandlerFlags::XACQUIRE | HandlerFlags::XRELEASE) {
                self.set_xacquire_release(flags);
            }
            if flags.contains(HandlerFlags::LOCK) {
                self.state.flags |= StateFlags::ALLOW_LOCK;
            }
            self.read_op_mem()
        }
    }

    /// a byte register by encoding index. with a REX prefix, 4..7 are `spl`..`dil`, not
    /// `ah`..`bh`.
    pub(crate) fn byte_reg(&mut self, index: u32) -> Register {
        let index = if self.state.flags.contains(StateFlags::HAS_REX) && index >= 4 {
            index + 4
        } else {
            index
        };
        self.reg(Register::AL, index)
    }

    pub(crate) fn modrm_reg8(&mut self) -> Register {
        let index = self.state.reg + self.state.extra_register_base;
        self.byte_reg(index)
    }

    pub(crate) fn modrm_rm8_or_mem(&mut self, flags: HandlerFlags) -> Operand {
        if self.state.mod_ == 3 {
            let index = self.state.rm + self.state.extra_base_register_base;
            Operand::Register(self.byte_reg(index))
        } else {
            self.modrm_rm_or_mem_lockable(Register::AL, flags)
        }
    }

    /// memory-only operand: `mod == 3` is invalid.
    pub(crate) fn modrm_mem_only(&mut self) -> Option<Operand> {
        if self.state.mod_ == 3 {
            self.set_invalid_instruction();
            None
        } else {
            Some(self.read_op_mem())
        }
    }

    /// marks the instruction invalid if `cond` holds, unless `NO_INVALID_CHECK` is set.
    pub(crate) fn invalid_if(&mut self, cond: bool) {
        if cond && self.invalid_check() {
            self.set_invalid_instruction();
        }
    }

    /// stack operations and near branches are 64-bit in 64-bit mode unless a 16-bit operand
    /// size is explicitly asked for.
    fn stack_size(&self) -> OpSize {
        if self.is64() {
            if self.state.operand_size != OpSize::Size16 { OpSize::Size64 } else { OpSize::Size16 }
        } else if self.state.operand_size == OpSize::Size32 {
            OpSize::Size32
        } else {
            OpSize::Size16
        }
    }

    /// branch operand size. in 64-bit mode Intel processors ignore `66` on near branches; AMD
    /// processors honor it.
    fn branch_size(&self) -> OpSize {
        if self.is64() {
            if !self.options().contains(DecoderOptions::AMD) || self.state.operand_size == OpSize::Size32 {
                OpSize::Size64
            } else {
                OpSize::Size16
            }
        } else if self.state.operand_size == OpSize::Size32 {
            OpSize::Size32
        } else {
            OpSize::Size16
        }
    }

    fn string_src(&self) -> Operand {
        match self.state.address_size {
            OpSize::Size64 => Operand::MemorySegRSI,
            OpSize::Size32 => Operand::MemorySegESI,
            OpSize::Size16 => Operand::MemorySegSI,
        }
    }

    fn string_dst(&self) -> Operand {
        match self.state.address_size {
            OpSize::Size64 => Operand::MemoryESRDI,
            OpSize::Size32 => Operand::MemoryESEDI,
            OpSize::Size16 => Operand::MemoryESDI,
        }
    }

    /// the 8-bit relative branch target, in the width `size` computes it in.
    fn rel8_target(&mut self, size: OpSize) -> Operand {
        let rel = sext8(self.read_ib());
        Operand::NearBranch(match size {
            OpSize::Size64 => NearBranch::Near64(rel.wrapping_add(self.current_ip64())),
            OpSize::Size32 => NearBranch::Near32((rel as u32).wrapping_add(self.current_ip32())),
            OpSize::Size16 => NearBranch::Near16((rel as u32).wrapping_add(self.current_ip32()) as u16),
        })
    }
}

#[inline]
fn sext8(b: u32) -> u64 {
    b as u8 as i8 as i64 as u64
}

/// `W`-selected general purpose register class: 64-bit with W, 32-bit without.
fn w_gpr<T: Reader<u64, u8>>(cx: &DecodeCx<T>, code32: Code, code64: Code) -> (Code, Register) {
    if cx.state.w() {
        (code64, Register::RAX)
    } else {
        (code32, Register::EAX)
    }
}

/// mode-selected general purpose register class: 64-bit in 64-bit mode, 32-bit otherwise.
fn mode_gpr<T: Reader<u64, u8>>(cx: &DecodeCx<T>, code32: Code, code64: Code) -> (Code, Register) {
    if cx.is64() {
        (code64, Register::RAX)
    } else {
        (code32, Register::EAX)
    }
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone)]
pub(crate) enum Legacy {
    /// no operands.
    Simple(Code),
    /// no operands, but a ModRM byte (which only selected this handler).
    SimpleModRM(Code),
    /// no operands, code by operand size.
    Simple2([Code; 3]),
    /// `Iw` operand, code by operand size.
    Simple2Iw([Code; 3]),
    /// no operands, code by `W`.
    Simple4 { code32: Code, code64: Code },
    /// ModRM.rm register at the address size.
    Simple5ModRM_as([Code; 3]),
    RegIb { code: Code, reg: Register },
    IbReg { code: Code, reg: Register },
    /// `eAX, Ib`: `ax` for 16-bit operands, `eax` otherwise.
    RegIb2([Code; 2]),
    /// `Ib, eAX`.
    IbReg2([Code; 2]),
    AL_DX(Code),
    DX_AL(Code),
    eAX_DX([Code; 2]),
    DX_eAX([Code; 2]),
    Ib(Code),
    /// `Ib` with ModRM (`xabort`).
    Ib3(Code),
    Iw_Ib([Code; 3]),
    Reg_Iz([Code; 3]),
    /// byte register from the opcode's low bits, then `Ib`.
    RegIb3 { code: Code, index: u32 },
    /// full-width register from the opcode's low bits, then an immediate of that width.
    RegIz2 { codes: [Code; 3], index: u32 },
    /// register from the opcode's low bits.
    SimpleReg { codes: [Code; 3], index: u32 },
    PushSimpleReg { codes: [Code; 3], index: u32 },
    PushOpSizeReg { codes: [Code; 3], reg: Register },
    PushSimple2([Code; 3]),
    PushEv([Code; 3]),
    PushIb2([Code; 3]),
    PushIz([Code; 3]),
    /// `90+r`: `nop`, `pause`, or `xchg r, eAX`.
    Xchg_Reg_rAX { index: u32 },
    Ev { codes: [Code; 3], flags: HandlerFlags },
    Ev_Iz { codes: [Code; 3], flags: HandlerFlags },
    Ev_Ib { codes: [Code; 3], flags: HandlerFlags },
    /// `Ev, Ib` where the immediate is not sign-extended (bit tests).
    Ev_Ib2 { codes: [Code; 3], flags: HandlerFlags },
    Ev_1([Code; 3]),
    Ev_CL([Code; 3]),
    Ev_Gv { codes: [Code; 3], flags: HandlerFlags },
    Ev_Gv_Ib([Code; 3]),
    Ev_Gv_CL([Code; 3]),
    Ev_Gv_32_64 { code32: Code, code64: Code, allow_reg: bool, allow_mem: bool },
    Ev_REXW { code32: Code, code64: Code, allow_reg: bool, allow_mem: bool },
    Ev_Sw([Code; 3]),
    Sw_Ev([Code; 3]),
    /// indirect near branch target.
    Evj([Code; 3]),
    /// far pointer in memory.
    Ep([Code; 3]),
    /// descriptor table register store/load.
    Ms([Code; 3]),
    Rv([Code; 3]),
    /// a 16-bit register or memory operand, whatever the operand size.
    Ew(Code),
    /// memory only, one code.
    Mf(Code),
    /// direct far pointer: offset (16 or 32 bits by operand size), then selector.
    Ap([Code; 2]),
    Gv_Ev([Code; 3]),
    /// `Gv, Ev` where a register source is at least 32 bits (`movsxd`).
    Gv_Ev2([Code; 3]),
    Gv_Ev_Ib([Code; 3]),
    Gv_Ev_Iz([Code; 3]),
    Gv_Ev_32_64 { code32: Code, code64: Code, allow_reg: bool, allow_mem: bool },
    Gv_Ev_REX { code32: Code, code64: Code },
    Gv_Eb([Code; 3]),
    Gv_Ew([Code; 3]),
    Gv_Eb_REX { code32: Code, code64: Code },
    Gv_M([Code; 3]),
    Gv_Mp([Code; 3]),
    Gv_Ma { code16: Code, code32: Code },
    M_Gv([Code; 3]),
    Gv_N { code32: Code, code64: Code },
    /// `Gv, xmm` register-only source.
    Gv_RX { code32: Code, code64: Code },
    Eb { code: Code, flags: HandlerFlags },
    Eb_Ib { code: Code, flags: HandlerFlags },
    Eb_1(Code),
    Eb_CL(Code),
    Eb_Gb { code: Code, flags: HandlerFlags },
    Gb_Eb(Code),
    Reg_Ob { code: Code, reg: Register },
    Ob_Reg { code: Code, reg: Register },
    Reg_Ov([Code; 3]),
    Ov_Reg([Code; 3]),
    Yb_Reg { code: Code, reg: Register },
    Yv_Reg([Code; 3]),
    /// `Yv, DX` (`ins`).
    Yv_Reg2([Code; 2]),
    Reg_Xb { code: Code, reg: Register },
    Reg_Xv([Code; 3]),
    /// `DX, Xv` (`outs`).
    Reg_Xv2([Code; 2]),
    Reg_Yb { code: Code, reg: Register },
    Reg_Yv([Code; 3]),
    Yb_Xb(Code),
    Yv_Xv([Code; 3]),
    Xb_Yb(Code),
    Xv_Yv([Code; 3]),
    BranchIw([Code; 3]),
    BranchSimple([Code; 3]),
    Jb([Code; 3]),
    /// `xbegin` rel16/rel32.
    Jx([Code; 3]),
    Jz([Code; 3]),
    /// `loop`/`jrcxz`-style branches, code by operand size and address size:
    /// `[16_16, 16_32, 16_64, 32_16, 32_32, 64_32, 64_64]`.
    Jb2([Code; 7]),
    /// `mov r, cr/dr/tr`.
    R_C { code32: Code, code64: Code, base: Register },
    /// `mov cr/dr/tr, r`.
    C_R { code32: Code, code64: Code, base: Register },
    /// memory only, code by `W`.
    M { code_w0: Code, code_w1: Code },
    /// memory only, code and lock behavior by `W`.
    M_REXW { code32: Code, code64: Code, flags32: HandlerFlags, flags64: HandlerFlags },
    /// x87 `st(0), st(i)`.
    ST_STi(Code),
    /// x87 `st(i), st(0)`.
    STi_ST(Code),
    /// x87 `st(i)`.
    STi(Code),
    /// `V` is ModRM.reg and `W` is ModRM.rm or memory, both vector registers from `base`.
    VW { base: Register, code_r: Code, code_m: Code },
    WV { base: Register, code: Code },
    VM { base: Register, code: Code },
    MV { base: Register, code: Code },
    VQ { base: Register, code: Code },
    VN { base: Register, code: Code },
    VWIb { base: Register, code_w0: Code, code_w1: Code },
    RIb { base: Register, code: Code },
    VX_Ev { code32: Code, code64: Code },
    Ev_VX { code32: Code, code64: Code },
    P_Q(Code),
    Q_P(Code),
    MP(Code),
    P_Q_Ib(Code),
    P_W { base: Register, code: Code },
    P_Ev { code32: Code, code64: Code },
    NIb(Code),
    /// MPX `bnd, mib`.
    B_MIB(Code),
    MIB_B(Code),
    B_BM { code32: Code, code64: Code },
    BM_B { code32: Code, code64: Code },
    B_Ev { code32: Code, code64: Code },
}

impl Legacy {
    pub(crate) fn has_modrm(&self) -> bool {
        use Legacy::*;
        !matches!(
            self,
            Simple(_) | Simple2(_) | Simple2Iw(_) | Simple4 { .. }
                | RegIb { .. } | IbReg { .. } | RegIb2(_) | IbReg2(_)
                | AL_DX(_) | DX_AL(_) | eAX_DX(_) | DX_eAX(_) | Ib(_) | Iw_Ib(_) | Reg_Iz(_)
                | RegIb3 { .. } | RegIz2 { .. } | SimpleReg { .. } | PushSimpleReg { .. }
                | PushOpSizeReg { .. } | PushSimple2(_) | PushIb2(_) | PushIz(_)
                | Xchg_Reg_rAX { .. } | Reg_Ob { .. } | Ob_Reg { .. } | Reg_Ov(_) | Ov_Reg(_)
                | Yb_Reg { .. } | Yv_Reg(_) | Yv_Reg2(_) | Reg_Xb { .. } | Reg_Xv(_) | Reg_Xv2(_)
                | Reg_Yb { .. } | Reg_Yv(_) | Yb_Xb(_) | Yv_Xv(_) | Xb_Yb(_) | Xv_Yv(_)
                | BranchIw(_) | BranchSimple(_) | Jb(_) | Jz(_) | Jb2(_) | Ap(_)
        )
    }

    pub(crate) fn decode<T: Reader<u64, u8>>(&self, cx: &mut DecodeCx<T>) {
        use Legacy::*;

        let size = cx.state.operand_size;
        match *self {
            Simple(code) | SimpleModRM(code) => {
                cx.set_code(code);
            }
            Simple2(codes) => {
                cx.set_code(codes[size as usize]);
            }
            Simple2Iw(codes) => {
                cx.set_code(codes[size as usize]);
                let imm = cx.read_u16() as u16;
                cx.set_op(0, Operand::Immediate(Immediate::Imm16(imm)));
            }
            Simple4 { code32, code64 } => {
                cx.set_code(if cx.state.w() { code64 } else { code32 });
            }
            Simple5ModRM_as(codes) => {
                let address_size = cx.state.address_size;
                cx.set_code(codes[address_size as usize]);
                let reg = cx.modrm_rm(gpr_base(address_size));
                cx.set_reg(0, reg);
            }
            RegIb { code, reg } => {
                cx.set_code(code);
                cx.set_reg(0, reg);
                let imm = imm8(cx);
                cx.set_op(1, imm);
            }
            IbReg { code, reg } => {
                cx.set_code(code);
                let imm = imm8(cx);
                cx.set_op(0, imm);
                cx.set_reg(1, reg);
            }
            RegIb2(codes) => {
                let (code, reg) = if size != OpSize::Size16 { (codes[1], Register::EAX) } else { (codes[0], Register::AX) };
                cx.set_code(code);
                cx.set_reg(0, reg);
                let imm = imm8(cx);
                cx.set_op(1, imm);
            }
            IbReg2(codes) => {
                let (code, reg) = if size != OpSize::Size16 { (codes[1], Register::EAX) } else { (codes[0], Register::AX) };
                cx.set_code(code);
                let imm = imm8(cx);
                cx.set_op(0, imm);
                cx.set_reg(1, reg);
            }
            AL_DX(code) => {
                cx.set_code(code);
                cx.set_reg(0, Register::AL);
                cx.set_reg(1, Register::DX);
            }
            DX_AL(code) => {
                cx.set_code(code);
                cx.set_reg(0, Register::DX);
                cx.set_reg(1, Register::AL);
            }
            eAX_DX(codes) => {
                let (code, reg) = if size != OpSize::Size16 { (codes[1], Register::EAX) } else { (codes[0], Register::AX) };
                cx.set_code(code);
                cx.set_reg(0, reg);
                cx.set_reg(1, Register::DX);
            }
            DX_eAX(codes) => {
                let (code, reg) = if size != OpSize::Size16 { (codes[1], Register::EAX) } else { (codes[0], Register::AX) };
                cx.set_code(code);
                cx.set_reg(0, Register::DX);
                cx.set_reg(1, reg);
            }
            Ib(code) | Ib3(code) => {
                cx.set_code(code);
                let imm = imm8(cx);
                cx.set_op(0, imm);
            }
            Iw_Ib(codes) => {
                cx.set_code(codes[cx.stack_size() as usize]);
                let iw = cx.read_u16() as u16;
                cx.set_op(0, Operand::Immediate(Immediate::Imm16(iw)));
                let ib = cx.read_ib() as u8;
                cx.set_op(1, Operand::Immediate(Immediate::Imm8_2nd(ib)));
            }
            Reg_Iz(codes) => {
                cx.set_code(codes[size as usize]);
                cx.set_reg(0, gpr_base(size));
                let imm = iz(cx, size);
                cx.set_op(1, imm);
            }
            RegIb3 { code, index } => {
                cx.set_code(code);
                let reg = cx.byte_reg(index + cx.state.extra_base_register_base);
                cx.set_reg(0, reg);
                let imm = imm8(cx);
                cx.set_op(1, imm);
            }
            RegIz2 { codes, index } => {
                cx.set_code(codes[size as usize]);
                let reg = cx.reg(gpr_base(size), index + cx.state.extra_base_register_base);
                cx.set_reg(0, reg);
                let imm = match size {
                    OpSize::Size16 => Immediate::Imm16(cx.read_u16() as u16),
                    OpSize::Size32 => Immediate::Imm32(cx.read_u32()),
                    OpSize::Size64 => Immediate::Imm64(cx.read_u64()),
                };
                cx.set_op(1, Operand::Immediate(imm));
            }
            SimpleReg { codes, index } => {
                cx.set_code(codes[size as usize]);
                let reg = cx.reg(gpr_base(size), index + cx.state.extra_base_register_base);
                cx.set_reg(0, reg);
            }
            PushSimpleReg { codes, index } => {
                let size = cx.stack_size();
                cx.set_code(codes[size as usize]);
                let reg = cx.reg(gpr_base(size), index + cx.state.extra_base_register_base);
                cx.set_reg(0, reg);
            }
            PushOpSizeReg { codes, reg } => {
                cx.set_code(codes[cx.stack_size() as usize]);
                cx.set_reg(0, reg);
            }
            PushSimple2(codes) => {
                cx.set_code(codes[cx.stack_size() as usize]);
            }
            PushEv(codes) => {
                let size = cx.stack_size();
                cx.set_code(codes[size as usize]);
                let op = cx.modrm_rm_or_mem(gpr_base(size));
                cx.set_op(0, op);
            }
            PushIb2(codes) => {
                let size = cx.stack_size();
                cx.set_code(codes[size as usize]);
                let op = ib_sext(cx, size);
                cx.set_op(0, op);
            }
            PushIz(codes) => {
                let size = cx.stack_size();
                cx.set_code(codes[size as usize]);
                let op = iz(cx, size);
                cx.set_op(0, op);
            }
            Xchg_Reg_rAX { index } => {
                if index == 0
                    && cx.state.mandatory_prefix == MandatoryPrefix::PF3
                    && !cx.options().contains(DecoderOptions::NO_PAUSE)
                {
                    cx.clear_mandatory_prefix_f3();
                    cx.set_code(Code::Pause);
                    return;
                }
                const NOPS: [Code; 3] = [Code::Nopw, Code::Nopd, Code::Nopq];
                const XCHGS: [Code; 3] = [Code::Xchg_r16_AX, Code::Xchg_r32_EAX, Code::Xchg_r64_RAX];
                let code_index = index + cx.state.extra_base_register_base;
                if code_index == 0 {
                    cx.set_code(NOPS[size as usize]);
                } else {
                    cx.set_code(XCHGS[size as usize]);
                    let gpr = gpr_base(size);
                    let reg = cx.reg(gpr, code_index);
                    cx.set_reg(0, reg);
                    cx.set_reg(1, gpr);
                }
            }
            Ev { codes, flags } => {
                cx.set_code(codes[size as usize]);
                let op = cx.modrm_rm_or_mem_lockable(gpr_base(size), flags);
                cx.set_op(0, op);
            }
            Ev_Iz { codes, flags } => {
                cx.set_code(codes[size as usize]);
                let op = cx.modrm_rm_or_mem_lockable(gpr_base(size), flags);
                cx.set_op(0, op);
                let imm = iz(cx, size);
                cx.set_op(1, imm);
            }
            Ev_Ib { codes, flags } => {
                cx.set_code(codes[size as usize]);
                let op = cx.modrm_rm_or_mem_lockable(gpr_base(size), flags);
                cx.set_op(0, op);
                let imm = ib_sext(cx, size);
                cx.set_op(1, imm);
            }
            Ev_Ib2 { codes, flags } => {
                cx.set_code(codes[size as usize]);
                let op = cx.modrm_rm_or_mem_lockable(gpr_base(size), flags);
                cx.set_op(0, op);
                let imm = imm8(cx);
                cx.set_op(1, imm);
            }
            Ev_1(codes) => {
                cx.set_code(codes[size as usize]);
                let op = cx.modrm_rm_or_mem(gpr_base(size));
                cx.set_op(0, op);
                cx.set_op(1, Operand::Immediate(Immediate::Imm8(1)));
            }
            Ev_CL(codes) => {
                cx.set_code(codes[size as usize]);
                let op = cx.modrm_rm_or_mem(gpr_base(size));
                cx.set_op(0, op);
                cx.set_reg(1, Register::CL);
            }
            Ev_Gv { codes, flags } => {
                cx.set_code(codes[size as usize]);
                let gpr = gpr_base(size);
                let op = cx.modrm_rm_or_mem_lockable(gpr, flags);
                cx.set_op(0, op);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(1, reg);
            }
            Ev_Gv_Ib(codes) => {
                cx.set_code(codes[size as usize]);
                let gpr = gpr_base(size);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(0, op);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(1, reg);
                let imm = imm8(cx);
                cx.set_op(2, imm);
            }
            Ev_Gv_CL(codes) => {
                cx.set_code(codes[size as usize]);
                let gpr = gpr_base(size);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(0, op);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(1, reg);
                cx.set_reg(2, Register::CL);
            }
            Ev_Gv_32_64 { code32, code64, allow_reg, allow_mem } => {
                let (code, gpr) = mode_gpr(cx, code32, code64);
                cx.set_code(code);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(0, op);
                // a disallowed form is invalid even without the invalid check.
                let disallowed = if cx.state.mod_ == 3 { !allow_reg } else { !allow_mem };
                if disallowed {
                    cx.set_invalid_instruction();
                }
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(1, reg);
            }
            Ev_REXW { code32, code64, allow_reg, allow_mem } => {
                let (code, gpr) = w_gpr(cx, code32, code64);
                cx.set_code(code);
                // the operand is filled in even when this form is disallowed.
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(0, op);
                let disallowed = if cx.state.mod_ == 3 { !allow_reg } else { !allow_mem };
                if disallowed {
                    cx.set_invalid_instruction();
                }
            }
            Ev_Sw(codes) => {
                cx.set_code(codes[size as usize]);
                let op = cx.modrm_rm_or_mem(gpr_base(size));
                cx.set_op(0, op);
                let sreg = cx.read_op_sw();
                cx.set_reg(1, sreg);
            }
            Sw_Ev(codes) => {
                cx.set_code(codes[size as usize]);
                let sreg = cx.read_op_sw();
                cx.invalid_if(sreg == Register::CS);
                cx.set_reg(0, sreg);
                let op = cx.modrm_rm_or_mem(gpr_base(size));
                cx.set_op(1, op);
            }
            Evj(codes) => {
                let size = cx.branch_size();
                cx.set_code(codes[size as usize]);
                let op = if cx.state.mod_ == 3 {
                    // outside 64-bit mode there are no extra register bits to add.
                    if cx.is64() {
                        Operand::Register(cx.modrm_rm(gpr_base(size)))
                    } else {
                        Operand::Register(cx.reg(gpr_base(size), cx.state.rm))
                    }
                } else {
                    cx.read_op_mem()
                };
                cx.set_op(0, op);
            }
            Ep(codes) => {
                let code = if size == OpSize::Size64 && !cx.options().contains(DecoderOptions::AMD) {
                    codes[2]
                } else if size == OpSize::Size16 {
                    codes[0]
                } else {
                    codes[1]
                };
                cx.set_code(code);
                if let Some(op) = cx.modrm_mem_only() {
                    cx.set_op(0, op);
                }
            }
            Ms(codes) => {
                let code = if cx.is64() {
                    codes[2]
                } else if size == OpSize::Size32 {
                    codes[1]
                } else {
                    codes[0]
                };
                cx.set_code(code);
                if let Some(op) = cx.modrm_mem_only() {
                    cx.set_op(0, op);
                }
            }
            Rv(codes) => {
                cx.set_code(codes[size as usize]);
                cx.invalid_if(cx.state.mod_ != 3);
                let reg = cx.modrm_rm(gpr_base(size));
                cx.set_reg(0, reg);
            }
            Ew(code) => {
                cx.set_code(code);
                let op = cx.modrm_rm_or_mem(Register::AX);
                cx.set_op(0, op);
            }
            Mf(code) => {
                cx.set_code(code);
                if let Some(op) = cx.modrm_mem_only() {
                    cx.set_op(0, op);
                }
            }
            Ap(codes) => {
                let (code, offset) = if size != OpSize::Size16 {
                    (codes[1], cx.read_u32())
                } else {
                    (codes[0], cx.read_u16())
                };
                cx.set_code(code);
                let selector = cx.read_u16() as u16;
                cx.set_op(0, Operand::FarBranch { selector, offset });
            }
            Gv_Ev(codes) => {
                cx.set_code(codes[size as usize]);
                let gpr = gpr_base(size);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(0, reg);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(1, op);
            }
            Gv_Ev2(codes) => {
                cx.set_code(codes[size as usize]);
                let reg = cx.modrm_reg(gpr_base(size));
                cx.set_reg(0, reg);
                let src = if size != OpSize::Size16 { Register::EAX } else { Register::AX };
                let op = cx.modrm_rm_or_mem(src);
                cx.set_op(1, op);
            }
            Gv_Ev_Ib(codes) => {
                cx.set_code(codes[size as usize]);
                let gpr = gpr_base(size);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(0, reg);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(1, op);
                let imm = ib_sext(cx, size);
                cx.set_op(2, imm);
            }
            Gv_Ev_Iz(codes) => {
                cx.set_code(codes[size as usize]);
                let gpr = gpr_base(size);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(0, reg);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(1, op);
                let imm = iz(cx, size);
                cx.set_op(2, imm);
            }
            Gv_Ev_32_64 { code32, code64, allow_reg, allow_mem } => {
                let (code, gpr) = mode_gpr(cx, code32, code64);
                cx.set_code(code);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(0, reg);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(1, op);
                let disallowed = if cx.state.mod_ == 3 { !allow_reg } else { !allow_mem };
                if disallowed {
                    cx.set_invalid_instruction();
                }
            }
            Gv_Ev_REX { code32, code64 } => {
                let (code, gpr) = w_gpr(cx, code32, code64);
                cx.set_code(code);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(0, reg);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(1, op);
            }
            Gv_Eb(codes) => {
                cx.set_code(codes[size as usize]);
                let reg = cx.modrm_reg(gpr_base(size));
                cx.set_reg(0, reg);
                let op = cx.modrm_rm8_or_mem(HandlerFlags::empty());
                cx.set_op(1, op);
            }
            Gv_Ew(codes) => {
                cx.set_code(codes[size as usize]);
                let reg = cx.modrm_reg(gpr_base(size));
                cx.set_reg(0, reg);
                let op = cx.modrm_rm_or_mem(Register::AX);
                cx.set_op(1, op);
            }
            Gv_Eb_REX { code32, code64 } => {
                let (code, gpr) = w_gpr(cx, code32, code64);
                cx.set_code(code);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(0, reg);
                let op = cx.modrm_rm8_or_mem(HandlerFlags::empty());
                cx.set_op(1, op);
            }
            Gv_M(codes) => {
                cx.set_code(codes[size as usize]);
                let reg = cx.modrm_reg(gpr_base(size));
                cx.set_reg(0, reg);
                if let Some(op) = cx.modrm_mem_only() {
                    cx.set_op(1, op);
                }
            }
            Gv_Mp(codes) => {
                let (code, gpr) = if size == OpSize::Size64 && !cx.options().contains(DecoderOptions::AMD) {
                    (codes[2], Register::RAX)
                } else if size == OpSize::Size16 {
                    (codes[0], Register::AX)
                } else {
                    (codes[1], Register::EAX)
                };
                cx.set_code(code);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(0, reg);
                if let Some(op) = cx.modrm_mem_only() {
                    cx.set_op(1, op);
                }
            }
            Gv_Ma { code16, code32 } => {
                let (code, gpr) = if size != OpSize::Size16 { (code32, Register::EAX) } else { (code16, Register::AX) };
                cx.set_code(code);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(0, reg);
                if let Some(op) = cx.modrm_mem_only() {
                    cx.set_op(1, op);
                }
            }
            M_Gv(codes) => {
                cx.set_code(codes[size as usize]);
                match cx.modrm_mem_only() {
                    Some(op) => cx.set_op(0, op),
                    None => cx.set_reg(0, Register::None),
                }
                let reg = cx.modrm_reg(gpr_base(size));
                cx.set_reg(1, reg);
            }
            Gv_N { code32, code64 } => {
                let (code, gpr) = w_gpr(cx, code32, code64);
                cx.set_code(code);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(0, reg);
                if cx.state.mod_ == 3 {
                    let mm = cx.reg(Register::MM0, cx.state.rm);
                    cx.set_reg(1, mm);
                } else {
                    cx.set_invalid_instruction();
                }
            }
            Gv_RX { code32, code64 } => {
                let (code, gpr) = w_gpr(cx, code32, code64);
                cx.set_code(code);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(0, reg);
                if cx.state.mod_ == 3 {
                    let xmm = cx.modrm_rm(Register::XMM0);
                    cx.set_reg(1, xmm);
                } else {
                    cx.set_invalid_instruction();
                }
            }
            Eb { code, flags } => {
                cx.set_code(code);
                let op = cx.modrm_rm8_or_mem(flags);
                cx.set_op(0, op);
            }
            Eb_Ib { code, flags } => {
                cx.set_code(code);
                let op = cx.modrm_rm8_or_mem(flags);
                cx.set_op(0, op);
                let imm = imm8(cx);
                cx.set_op(1, imm);
            }
            Eb_1(code) => {
                cx.set_code(code);
                let op = cx.modrm_rm8_or_mem(HandlerFlags::empty());
                cx.set_op(0, op);
                cx.set_op(1, Operand::Immediate(Immediate::Imm8(1)));
            }
            Eb_CL(code) => {
                cx.set_code(code);
                let op = cx.modrm_rm8_or_mem(HandlerFlags::empty());
                cx.set_op(0, op);
                cx.set_reg(1, Register::CL);
            }
            Eb_Gb { code, flags } => {
                cx.set_code(code);
                let op = cx.modrm_rm8_or_mem(flags);
                cx.set_op(0, op);
                let reg = cx.modrm_reg8();
                cx.set_reg(1, reg);
            }
            Gb_Eb(code) => {
                cx.set_code(code);
                let reg = cx.modrm_reg8();
                cx.set_reg(0, reg);
                let op = cx.modrm_rm8_or_mem(HandlerFlags::empty());
                cx.set_op(1, op);
            }
            Reg_Ob { code, reg } => {
                cx.set_code(code);
                cx.set_reg(0, reg);
                let op = cx.read_moffs();
                cx.set_op(1, op);
            }
            Ob_Reg { code, reg } => {
                cx.set_code(code);
                let op = cx.read_moffs();
                cx.set_op(0, op);
                cx.set_reg(1, reg);
            }
            Reg_Ov(codes) => {
                cx.set_code(codes[size as usize]);
                cx.set_reg(0, gpr_base(size));
                let op = cx.read_moffs();
                cx.set_op(1, op);
            }
            Ov_Reg(codes) => {
                cx.set_code(codes[size as usize]);
                let op = cx.read_moffs();
                cx.set_op(0, op);
                cx.set_reg(1, gpr_base(size));
            }
            Yb_Reg { code, reg } => {
                cx.set_code(code);
                let dst = cx.string_dst();
                cx.set_op(0, dst);
                cx.set_reg(1, reg);
            }
            Yv_Reg(codes) => {
                cx.set_code(codes[size as usize]);
                let dst = cx.string_dst();
                cx.set_op(0, dst);
                cx.set_reg(1, gpr_base(size));
            }
            Yv_Reg2(codes) => {
                cx.set_code(if size != OpSize::Size16 { codes[1] } else { codes[0] });
                let dst = cx.string_dst();
                cx.set_op(0, dst);
                cx.set_reg(1, Register::DX);
            }
            Reg_Xb { code, reg } => {
                cx.set_code(code);
                cx.set_reg(0, reg);
                let src = cx.string_src();
                cx.set_op(1, src);
            }
            Reg_Xv(codes) => {
                cx.set_code(codes[size as usize]);
                cx.set_reg(0, gpr_base(size));
                let src = cx.string_src();
                cx.set_op(1, src);
            }
            Reg_Xv2(codes) => {
                cx.set_code(if size != OpSize::Size16 { codes[1] } else { codes[0] });
                cx.set_reg(0, Register::DX);
                let src = cx.string_src();
                cx.set_op(1, src);
            }
            Reg_Yb { code, reg } => {
                cx.set_code(code);
                cx.set_reg(0, reg);
                let dst = cx.string_dst();
                cx.set_op(1, dst);
            }
            Reg_Yv(codes) => {
                cx.set_code(codes[size as usize]);
                cx.set_reg(0, gpr_base(size));
                let dst = cx.string_dst();
                cx.set_op(1, dst);
            }
            Yb_Xb(code) => {
                cx.set_code(code);
                let dst = cx.string_dst();
                cx.set_op(0, dst);
                let src = cx.string_src();
                cx.set_op(1, src);
            }
            Yv_Xv(codes) => {
                cx.set_code(codes[size as usize]);
                let dst = cx.string_dst();
                cx.set_op(0, dst);
                let src = cx.string_src();
                cx.set_op(1, src);
            }
            Xb_Yb(code) => {
                cx.set_code(code);
                let src = cx.string_src();
                cx.set_op(0, src);
                let dst = cx.string_dst();
                cx.set_op(1, dst);
            }
            Xv_Yv(codes) => {
                cx.set_code(codes[size as usize]);
                let src = cx.string_src();
                cx.set_op(0, src);
                let dst = cx.string_dst();
                cx.set_op(1, dst);
            }
            BranchIw(codes) => {
                cx.set_code(codes[cx.branch_size() as usize]);
                let imm = cx.read_u16() as u16;
                cx.set_op(0, Operand::Immediate(Immediate::Imm16(imm)));
            }
            BranchSimple(codes) => {
                cx.set_code(codes[cx.branch_size() as usize]);
            }
            Jb(codes) => {
                let size = cx.branch_size();
                cx.set_code(codes[size as usize]);
                let target = cx.rel8_target(size);
                cx.set_op(0, target);
            }
            Jx(codes) => {
                cx.set_code(codes[size as usize]);
                let target = if cx.is64() {
                    let rel = if size == OpSize::Size16 {
                        cx.read_u16() as u16 as i16 as i64 as u64
                    } else {
                        cx.read_u32() as i32 as i64 as u64
                    };
                    NearBranch::Near64(rel.wrapping_add(cx.current_ip64()))
                } else {
                    let rel = if size == OpSize::Size32 {
                        cx.read_u32()
                    } else {
                        cx.read_u16() as u16 as i16 as i32 as u32
                    };
                    NearBranch::Near32(rel.wrapping_add(cx.current_ip32()))
                };
                cx.set_op(0, Operand::NearBranch(target));
            }
            Jz(codes) => {
                let size = if cx.is64() {
                    cx.branch_size()
                } else if size != OpSize::Size16 {
                    OpSize::Size32
                } else {
                    OpSize::Size16
                };
                cx.set_code(codes[size as usize]);
                let target = match size {
                    OpSize::Size64 => {
                        let rel = cx.read_u32() as i32 as i64 as u64;
                        NearBranch::Near64(rel.wrapping_add(cx.current_ip64()))
                    }
                    OpSize::Size32 => {
                        let rel = cx.read_u32();
                        NearBranch::Near32(rel.wrapping_add(cx.current_ip32()))
                    }
                    OpSize::Size16 => {
                        let rel = cx.read_u16();
                        NearBranch::Near16(rel.wrapping_add(cx.current_ip32()) as u16)
                    }
                };
                cx.set_op(0, Operand::NearBranch(target));
            }
            Jb2(codes) => {
                let address_size = cx.state.address_size;
                let (code, target_size) = if cx.is64() {
                    if cx.branch_size() == OpSize::Size64 {
                        (if address_size == OpSize::Size64 { codes[6] } else { codes[5] }, OpSize::Size64)
                    } else {
                        (if address_size == OpSize::Size64 { codes[2] } else { codes[1] }, OpSize::Size16)
                    }
                } else if size == OpSize::Size32 {
                    (if address_size == OpSize::Size32 { codes[4] } else { codes[3] }, OpSize::Size32)
                } else {
                    (if address_size == OpSize::Size32 { codes[1] } else { codes[0] }, OpSize::Size16)
                };
                cx.set_code(code);
                let target = cx.rel8_target(target_size);
                cx.set_op(0, target);
            }
            R_C { code32, code64, base } => {
                let (code, gpr) = mode_gpr(cx, code32, code64);
                cx.set_code(code);
                let reg = cx.modrm_rm(gpr);
                cx.set_reg(0, reg);
                let creg = control_reg(cx, base);
                cx.set_reg(1, creg);
            }
            C_R { code32, code64, base } => {
                let (code, gpr) = mode_gpr(cx, code32, code64);
                cx.set_code(code);
                let creg = control_reg(cx, base);
                cx.set_reg(0, creg);
                let reg = cx.modrm_rm(gpr);
                cx.set_reg(1, reg);
            }
            M { code_w0, code_w1 } => {
                cx.set_code(if cx.state.w() { code_w1 } else { code_w0 });
                if let Some(op) = cx.modrm_mem_only() {
                    cx.set_op(0, op);
                }
            }
            M_REXW { code32, code64, flags32, flags64 } => {
                let (code, flags) = if cx.state.w() { (code64, flags64) } else { (code32, flags32) };
                cx.set_code(code);
                if cx.state.mod_ == 3 {
                    cx.set_invalid_instruction();
                } else {
                    let op = cx.modrm_rm_or_mem_lockable(Register::EAX, flags);
                    cx.set_op(0, op);
                }
            }
            ST_STi(code) => {
                cx.set_code(code);
                cx.set_reg(0, Register::ST0);
                let sti = cx.reg(Register::ST0, cx.state.rm);
                cx.set_reg(1, sti);
            }
            STi_ST(code) => {
                cx.set_code(code);
                let sti = cx.reg(Register::ST0, cx.state.rm);
                cx.set_reg(0, sti);
                cx.set_reg(1, Register::ST0);
            }
            STi(code) => {
                cx.set_code(code);
                let sti = cx.reg(Register::ST0, cx.state.rm);
                cx.set_reg(0, sti);
            }
            VW { base, code_r, code_m } => {
                let reg = cx.modrm_reg(base);
                cx.set_reg(0, reg);
                if cx.state.mod_ == 3 {
                    cx.set_code(code_r);
                    let rm = cx.modrm_rm(base);
                    cx.set_reg(1, rm);
                } else {
                    cx.set_code(code_m);
                    if code_m == Code::INVALID {
                        cx.set_invalid_instruction();
                    }
                    let op = cx.read_op_mem();
                    cx.set_op(1, op);
                }
            }
            WV { base, code } => {
                cx.set_code(code);
                let op = cx.modrm_rm_or_mem(base);
                cx.set_op(0, op);
                let reg = cx.modrm_reg(base);
                cx.set_reg(1, reg);
            }
            VM { base, code } => {
                cx.set_code(code);
                let reg = cx.modrm_reg(base);
                cx.set_reg(0, reg);
                if let Some(op) = cx.modrm_mem_only() {
                    cx.set_op(1, op);
                }
            }
            MV { base, code } => {
                cx.set_code(code);
                match cx.modrm_mem_only() {
                    Some(op) => cx.set_op(0, op),
                    None => cx.set_reg(0, Register::None),
                }
                let reg = cx.modrm_reg(base);
                cx.set_reg(1, reg);
            }
            VQ { base, code } => {
                cx.set_code(code);
                let reg = cx.modrm_reg(base);
                cx.set_reg(0, reg);
                let op = if cx.state.mod_ == 3 {
                    Operand::Register(cx.reg(Register::MM0, cx.state.rm))
                } else {
                    cx.read_op_mem()
                };
                cx.set_op(1, op);
            }
            VN { base, code } => {
                cx.set_code(code);
                let reg = cx.modrm_reg(base);
                cx.set_reg(0, reg);
                if cx.state.mod_ == 3 {
                    let mm = cx.reg(Register::MM0, cx.state.rm);
                    cx.set_reg(1, mm);
                } else {
                    cx.set_invalid_instruction();
                }
            }
            VWIb { base, code_w0, code_w1 } => {
                cx.set_code(if cx.state.w() { code_w1 } else { code_w0 });
                let reg = cx.modrm_reg(base);
                cx.set_reg(0, reg);
                let op = cx.modrm_rm_or_mem(base);
                cx.set_op(1, op);
                let imm = imm8(cx);
                cx.set_op(2, imm);
            }
            RIb { base, code } => {
                cx.set_code(code);
                if cx.state.mod_ == 3 {
                    let reg = cx.modrm_rm(base);
                    cx.set_reg(0, reg);
                } else {
                    cx.set_invalid_instruction();
                    cx.set_reg(0, Register::None);
                }
                let imm = imm8(cx);
                cx.set_op(1, imm);
            }
            VX_Ev { code32, code64 } => {
                let (code, gpr) = w_gpr(cx, code32, code64);
                cx.set_code(code);
                let reg = cx.modrm_reg(Register::XMM0);
                cx.set_reg(0, reg);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(1, op);
            }
            Ev_VX { code32, code64 } => {
                let (code, gpr) = w_gpr(cx, code32, code64);
                cx.set_code(code);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(0, op);
                let reg = cx.modrm_reg(Register::XMM0);
                cx.set_reg(1, reg);
            }
            P_Q(code) => {
                cx.set_code(code);
                let mm = cx.reg(Register::MM0, cx.state.reg);
                cx.set_reg(0, mm);
                let op = mmx_rm_or_mem(cx);
                cx.set_op(1, op);
            }
            Q_P(code) => {
                cx.set_code(code);
                let op = mmx_rm_or_mem(cx);
                cx.set_op(0, op);
                let mm = cx.reg(Register::MM0, cx.state.reg);
                cx.set_reg(1, mm);
            }
            MP(code) => {
                cx.set_code(code);
                match cx.modrm_mem_only() {
                    Some(op) => cx.set_op(0, op),
                    None => cx.set_reg(0, Register::None),
                }
                let mm = cx.reg(Register::MM0, cx.state.reg);
                cx.set_reg(1, mm);
            }
            P_Q_Ib(code) => {
                cx.set_code(code);
                let mm = cx.reg(Register::MM0, cx.state.reg);
                cx.set_reg(0, mm);
                let op = mmx_rm_or_mem(cx);
                cx.set_op(1, op);
                let imm = imm8(cx);
                cx.set_op(2, imm);
            }
            P_W { base, code } => {
                cx.set_code(code);
                let mm = cx.reg(Register::MM0, cx.state.reg);
                cx.set_reg(0, mm);
                let op = cx.modrm_rm_or_mem(base);
                cx.set_op(1, op);
            }
            P_Ev { code32, code64 } => {
                let (code, gpr) = w_gpr(cx, code32, code64);
                cx.set_code(code);
                let mm = cx.reg(Register::MM0, cx.state.reg);
                cx.set_reg(0, mm);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(1, op);
            }
            NIb(code) => {
                cx.set_code(code);
                if cx.state.mod_ == 3 {
                    let mm = cx.reg(Register::MM0, cx.state.rm);
                    cx.set_reg(0, mm);
                } else {
                    cx.set_invalid_instruction();
                    cx.set_reg(0, Register::None);
                }
                let imm = imm8(cx);
                cx.set_op(1, imm);
            }
            B_MIB(code) => {
                cx.set_code(code);
                let bnd = bound_reg(cx);
                cx.set_reg(0, bnd);
                if let Some(op) = mpx_mem_only(cx) {
                    cx.set_op(1, op);
                }
            }
            MIB_B(code) => {
                cx.set_code(code);
                match mpx_mem_only(cx) {
                    Some(op) => cx.set_op(0, op),
                    None => cx.set_reg(0, Register::None),
                }
                let bnd = bound_reg(cx);
                cx.set_reg(1, bnd);
            }
            B_BM { code32, code64 } => {
                cx.set_code(if cx.is64() { code64 } else { code32 });
                let bnd = bound_reg(cx);
                cx.set_reg(0, bnd);
                let op = if cx.state.mod_ == 3 {
                    Operand::Register(bound_rm(cx))
                } else {
                    cx.read_op_mem_mpx()
                };
                cx.set_op(1, op);
            }
            BM_B { code32, code64 } => {
                cx.set_code(if cx.is64() { code64 } else { code32 });
                let op = if cx.state.mod_ == 3 {
                    Operand::Register(bound_rm(cx))
                } else {
                    cx.read_op_mem_mpx()
                };
                cx.set_op(0, op);
                let bnd = bound_reg(cx);
                cx.set_reg(1, bnd);
            }
            B_Ev { code32, code64 } => {
                let (code, gpr) = mode_gpr(cx, code32, code64);
                cx.set_code(code);
                let bnd = bound_reg(cx);
                cx.set_reg(0, bnd);
                let op = if cx.state.mod_ == 3 {
                    Operand::Register(cx.modrm_rm(gpr))
                } else {
                    cx.read_op_mem_mpx()
                };
                cx.set_op(1, op);
            }
        }
    }
}

/// MMX operands ignore REX extension bits.
fn mmx_rm_or_mem<T: Reader<u64, u8>>(cx: &mut DecodeCx<T>) -> Operand {
    if cx.state.mod_ == 3 {
        Operand::Register(cx.reg(Register::MM0, cx.state.rm))
    } else {
        cx.read_op_mem()
    }
}

/// `bnd0`..`bnd3` from ModRM.reg. REX.R or reg > 3 don't name a bound register.
fn bound_reg<T: Reader<u64, u8>>(cx: &mut DecodeCx<T>) -> Register {
    let index = cx.state.reg + cx.state.extra_register_base;
    cx.invalid_if(index > 3);
    cx.reg(Register::BND0, index & 3)
}

fn bound_rm<T: Reader<u64, u8>>(cx: &mut DecodeCx<T>) -> Register {
    let index = cx.state.rm + cx.state.extra_base_register_base;
    cx.invalid_if(index > 3);
    cx.reg(Register::BND0, index & 3)
}

fn mpx_mem_only<T: Reader<u64, u8>>(cx: &mut DecodeCx<T>) -> Option<Operand> {
    if cx.state.mod_ == 3 {
        cx.set_invalid_instruction();
        None
    } else {
        Some(cx.read_op_mem_mpx())
    }
}

/// the ModRM.reg control/debug/test register for `mov` to or from it.
///
/// `lock mov cr0` is AMD's encoding of `mov cr8` outside 64-bit mode (and works in it too):
/// with a lock prefix, no REX.R, and `reg == 0`, the operand is `cr8` and the lock prefix is
/// consumed.
fn control_reg<T: Reader<u64, u8>>(cx: &mut DecodeCx<T>, base: Register) -> Register {
    let mut extra = cx.state.extra_register_base;
    if base == Register::CR0
        && extra == 0
        && cx.state.reg == 0
        && cx.inst.prefixes.contains(Prefixes::LOCK)
        && !cx.options().contains(DecoderOptions::NO_LOCK_MOV_CR0)
    {
        extra = 8;
        cx.inst.prefixes.remove(Prefixes::LOCK);
        cx.state.flags.remove(StateFlags::LOCK);
    }
    let index = cx.state.reg + extra;
    if base == Register::CR0 {
        cx.invalid_if(index == 1 || (index != 8 && index >= 5));
    } else if base == Register::DR0 {
        cx.invalid_if(index > 7);
    }
    cx.reg(base, index)
}

#[cfg(test)]
mod test {
    use yaxpeax_arch::{Decoder, U8Reader};

    use crate::{Code, DecoderOptions, InstDecoder, Instruction, NearBranch, Operand, Register};

    fn decode(decoder: &InstDecoder, bytes: &[u8]) -> Instruction {
        decoder.decode(&mut U8Reader::new(bytes)).expect("decode succeeds")
    }

    #[test]
    fn lock_mov_cr0_is_cr8() {
        let decoder = InstDecoder::x86_32();
        let inst = decode(&decoder, &[0xf0, 0x0f, 0x20, 0xc0]);
        assert_eq!(inst.code(), Code::Mov_r32_cr);
        assert_eq!(inst.operand(0), Operand::Register(Register::EAX));
        assert_eq!(inst.operand(1), Operand::Register(Register::CR8));
        assert!(!inst.has_lock_prefix());

        let strict = decoder.with_options(DecoderOptions::NO_LOCK_MOV_CR0);
        assert_eq!(decode(&strict, &[0xf0, 0x0f, 0x20, 0xc0]).code(), Code::INVALID);
        // cr1 does not exist
        assert_eq!(decode(&decoder, &[0x0f, 0x22, 0xc8]).code(), Code::INVALID);
    }

    #[test]
    fn lock_mov_to_cr0_is_cr8() {
        let decoder = InstDecoder::x86_32();
        let inst = decode(&decoder, &[0xf0, 0x0f, 0x22, 0xc0]);
        assert_eq!(inst.code(), Code::Mov_cr_r32);
        assert_eq!(inst.operand(0), Operand::Register(Register::CR8));
        assert_eq!(inst.operand(1), Operand::Register(Register::EAX));
        assert!(!inst.has_lock_prefix());

        let strict = decoder.with_options(DecoderOptions::NO_LOCK_MOV_CR0);
        let inst = decode(&strict, &[0xf0, 0x0f, 0x22, 0xc0]);
        assert_eq!(inst.code(), Code::INVALID);
        assert_eq!(inst.operand(0), Operand::Register(Register::CR0));
        assert!(inst.has_lock_prefix());
    }

    #[test]
    fn lock_only_escapes_cr0() {
        // lock mov cr2, eax: the lock stays and makes the instruction invalid
        let decoder = InstDecoder::x86_32();
        let inst = decode(&decoder, &[0xf0, 0x0f, 0x22, 0xd0]);
        assert_eq!(inst.code(), Code::INVALID);
        assert_eq!(inst.operand(0), Operand::Register(Register::CR2));
        assert_eq!(inst.operand(1), Operand::Register(Register::EAX));
        assert!(inst.has_lock_prefix());

        let lax = decoder.with_options(DecoderOptions::NO_INVALID_CHECK);
        let inst = decode(&lax, &[0xf0, 0x0f, 0x22, 0xd0]);
        assert_eq!(inst.code(), Code::Mov_cr_r32);
        assert_eq!(inst.operand(0), Operand::Register(Register::CR2));
        assert!(inst.has_lock_prefix());
    }

    #[test]
    fn disallowed_forms_ignore_the_invalid_check() {
        let decoder = InstDecoder::x86_64().with_options(DecoderOptions::NO_INVALID_CHECK);
        // rdfsbase [rax]
        let inst = decode(&decoder, &[0xf3, 0x0f, 0xae, 0x00]);
        assert_eq!(inst.code(), Code::INVALID);
        assert!(matches!(inst.operand(0), Operand::Memory(_)));
        // invpcid rax, rax
        let inst = decode(&decoder, &[0x66, 0x0f, 0x38, 0x82, 0xc0]);
        assert_eq!(inst.code(), Code::INVALID);
        assert_eq!(inst.length(), 5);

        let inst = decode(&decoder, &[0x66, 0x0f, 0x38, 0x82, 0x00]);
        assert_eq!(inst.code(), Code::Invpcid_r64_m128);
        let inst = decode(&decoder, &[0xf3, 0x0f, 0xae, 0xc0]);
        assert_eq!(inst.code(), Code::Rdfsbase_r32);
    }

    #[test]
    fn fsgsbase_has_no_memory_form() {
        let decoder = InstDecoder::x86_64();
        let inst = decode(&decoder, &[0xf3, 0x48, 0x0f, 0xae, 0xc0]);
        assert_eq!(inst.code(), Code::Rdfsbase_r64);
        assert_eq!(inst.operand(0), Operand::Register(Register::RAX));

        let inst = decode(&decoder, &[0xf3, 0x0f, 0xae, 0x00]);
        assert_eq!(inst.code(), Code::INVALID);
        assert!(matches!(inst.operand(0), Operand::Memory(_)));

        let inst = decode(&decoder, &[0xf3, 0x48, 0x0f, 0xae, 0xe0]);
        assert_eq!(inst.code(), Code::Ptwrite_rm64);
        assert_eq!(inst.operand(0), Operand::Register(Register::RAX));
    }

    #[test]
    fn far_pointers_outside_64_bit_mode() {
        let inst = decode(&InstDecoder::x86_32(), &[0x9a, 0x78, 0x56, 0x34, 0x12, 0x08, 0x00]);
        assert_eq!(inst.code(), Code::Call_ptr1632);
        assert_eq!(inst.operand(0), Operand::FarBranch { selector: 8, offset: 0x12345678 });
        assert_eq!(inst.length(), 7);

        let inst = decode(&InstDecoder::x86_16(), &[0xea, 0x34, 0x12, 0x00, 0xf0]);
        assert_eq!(inst.code(), Code::Jmp_ptr1616);
        assert_eq!(inst.operand(0), Operand::FarBranch { selector: 0xf000, offset: 0x1234 });

        let inst = decode(&InstDecoder::x86_64(), &[0x9a, 0x78, 0x56, 0x34, 0x12, 0x08, 0x00]);
        assert_eq!(inst.code(), Code::INVALID);
        assert_eq!(inst.length(), 1);
    }

    #[test]
    fn xbegin_target_is_relative_to_the_next_instruction() {
        let decoder = InstDecoder::x86_64().with_ip(0x1000);
        let inst = decode(&decoder, &[0xc7, 0xf8, 0x10, 0x00, 0x00, 0x00]);
        assert_eq!(inst.code(), Code::Xbegin_rel32);
        assert_eq!(inst.operand(0), Operand::NearBranch(NearBranch::Near64(0x1016)));
        // other register forms of `c7` fall back to the `/reg` table
        let inst = decode(&decoder, &[0xc7, 0xc0, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(inst.code(), Code::Mov_rm32_imm32);
    }

    #[test]
    fn pmovmskb_needs_a_register() {
        let decoder = InstDecoder::x86_64();
        let inst = decode(&decoder, &[0x66, 0x0f, 0xd7, 0xc1]);
        assert_eq!(inst.code(), Code::Pmovmskb_r32_xmm);
        assert_eq!(inst.operand(1), Operand::Register(Register::XMM1));
        assert_eq!(decode(&decoder, &[0x66, 0x0f, 0xd7, 0x01]).code(), Code::INVALID);
    }

    #[test]
    fn emms_takes_no_prefix() {
        let decoder = InstDecoder::x86_64();
        assert_eq!(decode(&decoder, &[0x0f, 0x77]).code(), Code::Emms);
        let inst = decode(&decoder, &[0x66, 0x0f, 0x77]);
        assert_eq!(inst.code(), Code::INVALID);
        assert_eq!(inst.length(), 3);
    }

    #[test]
    fn undefined_two_byte_opcode_keeps_its_length() {
        let inst = decode(&InstDecoder::x86_64(), &[0x0f, 0xb8, 0xc0]);
        assert_eq!(inst.code(), Code::INVALID);
        assert_eq!(inst.length(), 3);
    }
}
