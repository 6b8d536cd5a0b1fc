//! leaf handlers for VEX and XOP encodings.
//!
//! `V` is ModRM.reg, `H` is the register in `vvvv`, `W` is ModRM.rm or memory. forms without
//! an `H` operand require `vvvv` to be `1111b`.

use yaxpeax_arch::Reader;

use crate::decoder::DecodeCx;
use crate::{Code, Immediate, Operand, Register};

#[allow(non_camel_case_types)]
#[derive(Debug, Clone)]
pub(crate) enum Vex {
    /// no operands and no ModRM (`vzeroupper`, `vzeroall`).
    Simple(Code),
    VW { base: Register, code: Code },
    WV { base: Register, code: Code },
    VM { base: Register, code: Code },
    MV { base: Register, code: Code },
    VHW { base: Register, code: Code },
    VHWIb { base: Register, code: Code },
    /// the fourth register operand is in bits 7:4 of an immediate byte.
    VHWIs4 { base: Register, code: Code },
    VX_Ev { code32: Code, code64: Code },
    Ev_VX { code32: Code, code64: Code },
    /// BMI forms: `Gv, Hv, Ev` (`andn`), 64-bit with `W` in 64-bit mode.
    Gv_Hv_Ev { code32: Code, code64: Code },
    /// BMI forms: `Gv, Ev, Hv` (`bextr`, `shlx`).
    Gv_Ev_Hv { code32: Code, code64: Code },
}

impl<'a, T: Reader<u64, u8>> DecodeCx<'a, T> {
    /// `W` only widens general purpose operands in 64-bit mode.
    fn vex_gpr(&self, code32: Code, code64: Code) -> (Code, Register) {
        if self.is64() && self.state.w() {
            (code64, Register::RAX)
        } else {
            (code32, Register::EAX)
        }
    }

    fn vex_no_vvvv(&mut self) {
        let vvvv = self.state.vvvv;
        self.invalid_if(vvvv != 0);
    }

    fn vex_h(&mut self, base: Register) -> Register {
        let vvvv = self.state.vvvv;
        self.reg(base, vvvv)
    }
}

impl Vex {
    pub(crate) fn has_modrm(&self) -> bool {
        !matches!(self, Vex::Simple(_))
    }

    pub(crate) fn decode<T: Reader<u64, u8>>(&self, cx: &mut DecodeCx<T>) {
        use Vex::*;

        match *self {
            Simple(code) => {
                cx.vex_no_vvvv();
                cx.set_code(code);
            }
            VW { base, code } => {
                cx.vex_no_vvvv();
                cx.set_code(code);
                let reg = cx.modrm_reg(base);
                cx.set_reg(0, reg);
                let op = cx.modrm_rm_or_mem(base);
                cx.set_op(1, op);
            }
            WV { base, code } => {
                cx.vex_no_vvvv();
                cx.set_code(code);
                let op = cx.modrm_rm_or_mem(base);
                cx.set_op(0, op);
                let reg = cx.modrm_reg(base);
                cx.set_reg(1, reg);
            }
            VM { base, code } => {
                cx.vex_no_vvvv();
                cx.set_code(code);
                let reg = cx.modrm_reg(base);
                cx.set_reg(0, reg);
                if let Some(op) = cx.modrm_mem_only() {
                    cx.set_op(1, op);
                }
            }
            MV { base, code } => {
                cx.vex_no_vvvv();
                cx.set_code(code);
                match cx.modrm_mem_only() {
                    Some(op) => cx.set_op(0, op),
                    None => cx.set_reg(0, Register::None),
                }
                let reg = cx.modrm_reg(base);
                cx.set_reg(1, reg);
            }
            VHW { base, code } => {
                cx.set_code(code);
                let reg = cx.modrm_reg(base);
                cx.set_reg(0, reg);
                let h = cx.vex_h(base);
                cx.set_reg(1, h);
                let op = cx.modrm_rm_or_mem(base);
                cx.set_op(2, op);
            }
            VHWIb { base, code } => {
                cx.set_code(code);
                let reg = cx.modrm_reg(base);
                cx.set_reg(0, reg);
                let h = cx.vex_h(base);
                cx.set_reg(1, h);
                let op = cx.modrm_rm_or_mem(base);
                cx.set_op(2, op);
                let imm = cx.read_ib() as u8;
                cx.set_op(3, Operand::Immediate(Immediate::Imm8(imm)));
            }
            VHWIs4 { base, code } => {
                cx.set_code(code);
                let reg = cx.modrm_reg(base);
                cx.set_reg(0, reg);
                let h = cx.vex_h(base);
                cx.set_reg(1, h);
                let op = cx.modrm_rm_or_mem(base);
                cx.set_op(2, op);
                let mask = if cx.is64() { 0x0f } else { 0x07 };
                let is4 = (cx.read_ib() >> 4) & mask;
                let r = cx.reg(base, is4);
                cx.set_reg(3, r);
            }
            VX_Ev { code32, code64 } => {
                cx.vex_no_vvvv();
                let (code, gpr) = cx.vex_gpr(code32, code64);
                cx.set_code(code);
                let reg = cx.modrm_reg(Register::XMM0);
                cx.set_reg(0, reg);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(1, op);
            }
            Ev_VX { code32, code64 } => {
                cx.vex_no_vvvv();
                let (code, gpr) = cx.vex_gpr(code32, code64);
                cx.set_code(code);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(0, op);
                let reg = cx.modrm_reg(Register::XMM0);
                cx.set_reg(1, reg);
            }
            Gv_Hv_Ev { code32, code64 } => {
                let (code, gpr) = cx.vex_gpr(code32, code64);
                cx.set_code(code);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(0, reg);
                let h = cx.vex_h(gpr);
                cx.set_reg(1, h);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(2, op);
            }
            Gv_Ev_Hv { code32, code64 } => {
                let (code, gpr) = cx.vex_gpr(code32, code64);
                cx.set_code(code);
                let reg = cx.modrm_reg(gpr);
                cx.set_reg(0, reg);
                let op = cx.modrm_rm_or_mem(gpr);
                cx.set_op(1, op);
                let h = cx.vex_h(gpr);
                cx.set_reg(2, h);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use yaxpeax_arch::{Decoder, U8Reader};

    use crate::{Code, InstDecoder, Operand, Register};

    fn regs(bytes: &[u8], decoder: &InstDecoder) -> (Code, Vec<Operand>) {
        let inst = decoder.decode(&mut U8Reader::new(bytes)).expect("decode succeeds");
        (inst.code(), inst.operands().to_vec())
    }

    #[test]
    fn vhw_takes_vvvv_as_second_source() {
        // vaddps xmm1, xmm2, xmm3
        let (code, ops) = regs(&[0xc5, 0xe8, 0x58, 0xcb], &InstDecoder::x86_64());
        assert_eq!(code, Code::VEX_Vaddps_xmm_xmm_xmmm128);
        assert_eq!(ops, vec![
            Operand::Register(Register::XMM1),
            Operand::Register(Register::XMM2),
            Operand::Register(Register::XMM3),
        ]);
        // vaddps ymm9, ymm2, ymm3
        let (code, ops) = regs(&[0xc5, 0x6c, 0x58, 0xcb], &InstDecoder::x86_64());
        assert_eq!(code, Code::VEX_Vaddps_ymm_ymm_ymmm256);
        assert_eq!(ops[0], Operand::Register(Register::YMM9));
    }

    #[test]
    fn forms_without_h_require_unused_vvvv() {
        // vmovups xmm1, xmm3 with vvvv = 1111b, then with vvvv = 1101b
        assert_eq!(regs(&[0xc5, 0xf8, 0x10, 0xcb], &InstDecoder::x86_64()).0, Code::VEX_Vmovups_xmm_xmmm128);
        assert_eq!(regs(&[0xc5, 0xe8, 0x10, 0xcb], &InstDecoder::x86_64()).0, Code::INVALID);
    }

    #[test]
    fn w_widens_gpr_only_in_long_mode() {
        // vmovd/vmovq xmm0, eax/rax
        let (code, ops) = regs(&[0xc4, 0xe1, 0xf9, 0x6e, 0xc0], &InstDecoder::x86_64());
        assert_eq!(code, Code::VEX_Vmovq_xmm_rm64);
        assert_eq!(ops[1], Operand::Register(Register::RAX));
        let (code, ops) = regs(&[0xc4, 0xe1, 0xf9, 0x6e, 0xc0], &InstDecoder::x86_32());
        assert_eq!(code, Code::VEX_Vmovd_xmm_rm32);
        assert_eq!(ops[1], Operand::Register(Register::EAX));
    }

    #[test]
    fn is4_register_in_immediate() {
        // vblendvps xmm1, xmm2, xmm3, xmm4
        let (code, ops) = regs(&[0xc4, 0xe3, 0x69, 0x4a, 0xcb, 0x40], &InstDecoder::x86_64());
        assert_eq!(code, Code::VEX_Vblendvps_xmm_xmm_xmmm128_xmm);
        assert_eq!(ops[3], Operand::Register(Register::XMM4));
    }
}
