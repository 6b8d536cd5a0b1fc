//! leaf handlers for EVEX encodings.
//!
//! EVEX registers reach 32 vector registers: ModRM.reg adds EVEX.R', ModRM.rm (register forms)
//! adds EVEX.X, and `vvvv` includes EVEX.V'. `k` in a name marks an operand that takes the
//! opmask and zeroing bits, which the prefix parser has already put on the instruction.

use yaxpeax_arch::Reader;

use crate::decoder::DecodeCx;
use crate::state::TupleType;
use crate::{Code, Immediate, Operand, Prefixes, Register, RoundingControl};

#[allow(non_camel_case_types)]
#[derive(Debug, Clone)]
pub(crate) enum Evex {
    /// `V{k}, H, W`, where a register form with EVEX.b takes rounding control from L'L (or
    /// only suppresses exceptions, if `only_sae`).
    VkHW_er { base: Register, code: Code, tuple: TupleType, only_sae: bool, can_broadcast: bool },
    VkHW { base: Register, code: Code, tuple: TupleType, can_broadcast: bool },
    VkHWIb { base: Register, code: Code, tuple: TupleType, can_broadcast: bool },
    VkW { base_v: Register, base_w: Register, code: Code, tuple: TupleType, can_broadcast: bool },
    /// stores: no broadcast, and no zeroing-masking into memory.
    WkV { base: Register, code: Code, tuple: TupleType },
}

impl<'a, T: Reader<u64, u8>> DecodeCx<'a, T> {
    fn evex_v(&mut self, base: Register) -> Register {
        let index = self.state.reg + self.state.extra_register_base + self.state.extra_register_base_evex;
        self.reg(base, index)
    }

    fn evex_h(&mut self, base: Register) -> Register {
        let vvvv = self.state.vvvv;
        self.reg(base, vvvv)
    }

    fn evex_rm(&mut self, base: Register) -> Register {
        let index = self.state.rm + self.state.extra_base_register_base + self.state.extra_base_register_base_evex;
        self.reg(base, index)
    }

    /// a memory source, which EVEX.b turns into a broadcast if the instruction has one.
    fn evex_mem_source(&mut self, tuple: TupleType, can_broadcast: bool) -> Operand {
        if self.state.b() {
            if can_broadcast {
                self.inst.prefixes |= Prefixes::BROADCAST;
            } else {
                self.invalid_if(true);
            }
        }
        self.read_op_mem_tuple(tuple)
    }

    /// a register source, where EVEX.b has no meaning.
    fn evex_rm_source(&mut self, base: Register) -> Operand {
        let b = self.state.b();
        self.invalid_if(b);
        Operand::Register(self.evex_rm(base))
    }
}

impl Evex {
    pub(crate) fn decode<T: Reader<u64, u8>>(&self, cx: &mut DecodeCx<T>) {
        use Evex::*;

        match *self {
            VkHW_er { base, code, tuple, only_sae, can_broadcast } => {
                cx.set_code(code);
                let v = cx.evex_v(base);
                cx.set_reg(0, v);
                let h = cx.evex_h(base);
                cx.set_reg(1, h);
                if cx.state.mod_ == 3 {
                    let rm = cx.evex_rm(base);
                    cx.set_reg(2, rm);
                    if cx.state.b() {
                        if only_sae {
                            cx.inst.prefixes |= Prefixes::SAE;
                        } else {
                            cx.inst.rounding_control = RoundingControl::from_vector_length(cx.state.vector_length);
                        }
                    }
                } else {
                    let op = cx.evex_mem_source(tuple, can_broadcast);
                    cx.set_op(2, op);
                }
            }
            VkHW { base, code, tuple, can_broadcast } => {
                cx.set_code(code);
                let v = cx.evex_v(base);
                cx.set_reg(0, v);
                let h = cx.evex_h(base);
                cx.set_reg(1, h);
                let op = if cx.state.mod_ == 3 {
                    cx.evex_rm_source(base)
                } else {
                    cx.evex_mem_source(tuple, can_broadcast)
                };
                cx.set_op(2, op);
            }
            VkHWIb { base, code, tuple, can_broadcast } => {
                cx.set_code(code);
                let v = cx.evex_v(base);
                cx.set_reg(0, v);
                let h = cx.evex_h(base);
                cx.set_reg(1, h);
                let op = if cx.state.mod_ == 3 {
                    cx.evex_rm_source(base)
                } else {
                    cx.evex_mem_source(tuple, can_broadcast)
                };
                cx.set_op(2, op);
                let imm = cx.read_ib() as u8;
                cx.set_op(3, Operand::Immediate(Immediate::Imm8(imm)));
            }
            VkW { base_v, base_w, code, tuple, can_broadcast } => {
                let vvvv = cx.state.vvvv;
                cx.invalid_if(vvvv != 0);
                cx.set_code(code);
                let v = cx.evex_v(base_v);
                cx.set_reg(0, v);
                let op = if cx.state.mod_ == 3 {
                    cx.evex_rm_source(base_w)
                } else {
                    cx.evex_mem_source(tuple, can_broadcast)
                };
                cx.set_op(1, op);
            }
            WkV { base, code, tuple } => {
                let reserved = cx.state.vvvv != 0 || cx.state.b();
                cx.invalid_if(reserved);
                cx.set_code(code);
                let op = if cx.state.mod_ == 3 {
                    Operand::Register(cx.evex_rm(base))
                } else {
                    let z = cx.state.z();
                    cx.invalid_if(z);
                    cx.read_op_mem_tuple(tuple)
                };
                cx.set_op(0, op);
                let v = cx.evex_v(base);
                cx.set_reg(1, v);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use yaxpeax_arch::{Decoder, U8Reader};

    use crate::{Code, EncodingKind, InstDecoder, Instruction, Operand, Prefixes, Register, RoundingControl};

    fn decode(bytes: &[u8]) -> Instruction {
        InstDecoder::x86_64().decode(&mut U8Reader::new(bytes)).expect("decode succeeds")
    }

    #[test]
    fn rounding_control_replaces_vector_length() {
        // vaddps zmm1, zmm2, zmm3, {rz-sae}: L'L = 11 with b set, register form
        let inst = decode(&[0x62, 0xf1, 0x6c, 0x78, 0x58, 0xcb]);
        assert_eq!(inst.code(), Code::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er);
        assert_eq!(inst.rounding_control(), RoundingControl::RoundTowardZero);
        assert_eq!(inst.operand(0), Operand::Register(Register::ZMM1));
        assert_eq!(inst.operand(1), Operand::Register(Register::ZMM2));
        assert_eq!(inst.operand(2), Operand::Register(Register::ZMM3));
    }

    #[test]
    fn rounding_control_from_256_bit_length_bits() {
        // vaddps zmm1, zmm2, zmm3, {rd-sae}: L'L = 01 is still a 512-bit register form
        let inst = decode(&[0x62, 0xf1, 0x6c, 0x38, 0x58, 0xcb]);
        assert_eq!(inst.code(), Code::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er);
        assert_eq!(inst.rounding_control(), RoundingControl::RoundDown);
        assert_eq!(inst.operand(2), Operand::Register(Register::ZMM3));
        assert_eq!(inst.encoding(), EncodingKind::Evex);
    }

    #[test]
    fn opmask_zeroing_and_broadcast() {
        // vaddps xmm1{k1}{z}, xmm2, dword bcst [rax]
        let inst = decode(&[0x62, 0xf1, 0x6c, 0x99, 0x58, 0x08]);
        assert_eq!(inst.code(), Code::EVEX_Vaddps_xmm_k1z_xmm_xmmm128b32);
        assert_eq!(inst.op_mask(), Register::K1);
        assert!(inst.prefixes().contains(Prefixes::ZEROING));
        assert!(inst.prefixes().contains(Prefixes::BROADCAST));
        assert_eq!(inst.rounding_control(), RoundingControl::None);
    }

    #[test]
    fn disp8_is_scaled_by_tuple() {
        // vmovups zmm1, [rax+0x40]: disp8 of 1 scaled by the full 64-byte vector
        let inst = decode(&[0x62, 0xf1, 0x7c, 0x48, 0x10, 0x48, 0x01]);
        assert_eq!(inst.code(), Code::EVEX_Vmovups_zmm_k1z_zmmm512);
        match inst.operand(1) {
            Operand::Memory(mem) => {
                assert_eq!(mem.base, Register::RAX);
                assert_eq!(mem.displacement, 0x40);
            }
            other => panic!("expected memory, got {:?}", other),
        }
    }

    #[test]
    fn store_rejects_zeroing_and_uses_upper_registers() {
        // vmovups [rax], xmm17 (EVEX.R' clear)
        let inst = decode(&[0x62, 0xe1, 0x7c, 0x08, 0x11, 0x08]);
        assert_eq!(inst.code(), Code::EVEX_Vmovups_xmmm128_k1z_xmm);
        assert_eq!(inst.operand(1), Operand::Register(Register::XMM17));
        // same store with {k1}{z}
        let inst = decode(&[0x62, 0xe1, 0x7c, 0x89, 0x11, 0x08]);
        assert_eq!(inst.code(), Code::INVALID);
    }
}
