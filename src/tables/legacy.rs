//! the legacy opcode maps: one-byte opcodes, `0F`, `0F 38` and `0F 3A`.

use crate::handlers::legacy::Legacy::{self, *};
use crate::handlers::selectors::Selector;
use crate::handlers::{HandlerFlags, HandlerId};
use crate::state::DecoderOptions;
use crate::tables::{OpcodeMap, TableBuilder};
use crate::Code::{self, *};
use crate::Register;

const NONE: HandlerFlags = HandlerFlags::empty();
/// read-modify-write: lockable, and `F2`/`F3` are xacquire/xrelease under a lock.
const LOCK: HandlerFlags = HandlerFlags::LOCK.union(HandlerFlags::XACQUIRE).union(HandlerFlags::XRELEASE);
/// `xchg` is implicitly locked.
const XCHG: HandlerFlags = LOCK.union(HandlerFlags::XACQUIRE_RELEASE_NO_LOCK);
/// `mov` to memory may carry xrelease without a lock.
const MOV: HandlerFlags = HandlerFlags::XRELEASE.union(HandlerFlags::XACQUIRE_RELEASE_NO_LOCK);

const INVALID_ID: HandlerId = HandlerId::INVALID;
const INVALID_NO_MODRM: HandlerId = HandlerId::INVALID_NO_MODRM;

/// the six `op Eb,Gb` .. `op eAX,Iz` forms at the start of each row of arithmetic opcodes.
struct Alu {
    eb_gb: Code,
    ev_gv: [Code; 3],
    gb_eb: Code,
    gv_ev: [Code; 3],
    al_ib: Code,
    eax_iz: [Code; 3],
}

const ALU: [Alu; 8] = [
    Alu {
        eb_gb: Add_rm8_r8,
        ev_gv: [Add_rm16_r16, Add_rm32_r32, Add_rm64_r64],
        gb_eb: Add_r8_rm8,
        gv_ev: [Add_r16_rm16, Add_r32_rm32, Add_r64_rm64],
        al_ib: Add_AL_imm8,
        eax_iz: [Add_AX_imm16, Add_EAX_imm32, Add_RAX_imm32],
    },
    Alu {
        eb_gb: Or_rm8_r8,
        ev_gv: [Or_rm16_r16, Or_rm32_r32, Or_rm64_r64],
        gb_eb: Or_r8_rm8,
        gv_ev: [Or_r16_rm16, Or_r32_rm32, Or_r64_rm64],
        al_ib: Or_AL_imm8,
        eax_iz: [Or_AX_imm16, Or_EAX_imm32, Or_RAX_imm32],
    },
    Alu {
        eb_gb: Adc_rm8_r8,
        ev_gv: [Adc_rm16_r16, Adc_rm32_r32, Adc_rm64_r64],
        gb_eb: Adc_r8_rm8,
        gv_ev: [Adc_r16_rm16, Adc_r32_rm32, Adc_r64_rm64],
        al_ib: Adc_AL_imm8,
        eax_iz: [Adc_AX_imm16, Adc_EAX_imm32, Adc_RAX_imm32],
    },
    Alu {
        eb_gb: Sbb_rm8_r8,
        ev_gv: [Sbb_rm16_r16, Sbb_rm32_r32, Sbb_rm64_r64],
        gb_eb: Sbb_r8_rm8,
        gv_ev: [Sbb_r16_rm16, Sbb_r32_rm32, Sbb_r64_rm64],
        al_ib: Sbb_AL_imm8,
        eax_iz: [Sbb_AX_imm16, Sbb_EAX_imm32, Sbb_RAX_imm32],
    },
    Alu {
        eb_gb: And_rm8_r8,
        ev_gv: [And_rm16_r16, And_rm32_r32, And_rm64_r64],
        gb_eb: And_r8_rm8,
        gv_ev: [And_r16_rm16, And_r32_rm32, And_r64_rm64],
        al_ib: And_AL_imm8,
        eax_iz: [And_AX_imm16, And_EAX_imm32, And_RAX_imm32],
    },
    Alu {
        eb_gb: Sub_rm8_r8,
        ev_gv: [Sub_rm16_r16, Sub_rm32_r32, Sub_rm64_r64],
        gb_eb: Sub_r8_rm8,
        gv_ev: [Sub_r16_rm16, Sub_r32_rm32, Sub_r64_rm64],
        al_ib: Sub_AL_imm8,
        eax_iz: [Sub_AX_imm16, Sub_EAX_imm32, Sub_RAX_imm32],
    },
    Alu {
        eb_gb: Xor_rm8_r8,
        ev_gv: [Xor_rm16_r16, Xor_rm32_r32, Xor_rm64_r64],
        gb_eb: Xor_r8_rm8,
        gv_ev: [Xor_r16_rm16, Xor_r32_rm32, Xor_r64_rm64],
        al_ib: Xor_AL_imm8,
        eax_iz: [Xor_AX_imm16, Xor_EAX_imm32, Xor_RAX_imm32],
    },
    Alu {
        eb_gb: Cmp_rm8_r8,
        ev_gv: [Cmp_rm16_r16, Cmp_rm32_r32, Cmp_rm64_r64],
        gb_eb: Cmp_r8_rm8,
        gv_ev: [Cmp_r16_rm16, Cmp_r32_rm32, Cmp_r64_rm64],
        al_ib: Cmp_AL_imm8,
        eax_iz: [Cmp_AX_imm16, Cmp_EAX_imm32, Cmp_RAX_imm32],
    },
];

const GROUP1_EB_IB: [Code; 8] = [Add_rm8_imm8, Or_rm8_imm8, Adc_rm8_imm8, Sbb_rm8_imm8, And_rm8_imm8, Sub_rm8_imm8, Xor_rm8_imm8, Cmp_rm8_imm8];
const GROUP1_EB_IB_82: [Code; 8] = [Add_rm8_imm8_82, Or_rm8_imm8_82, Adc_rm8_imm8_82, Sbb_rm8_imm8_82, And_rm8_imm8_82, Sub_rm8_imm8_82, Xor_rm8_imm8_82, Cmp_rm8_imm8_82];
const GROUP1_EV_IZ: [[Code; 3]; 8] = [
    [Add_rm16_imm16, Add_rm32_imm32, Add_rm64_imm32],
    [Or_rm16_imm16, Or_rm32_imm32, Or_rm64_imm32],
    [Adc_rm16_imm16, Adc_rm32_imm32, Adc_rm64_imm32],
    [Sbb_rm16_imm16, Sbb_rm32_imm32, Sbb_rm64_imm32],
    [And_rm16_imm16, And_rm32_imm32, And_rm64_imm32],
    [Sub_rm16_imm16, Sub_rm32_imm32, Sub_rm64_imm32],
    [Xor_rm16_imm16, Xor_rm32_imm32, Xor_rm64_imm32],
    [Cmp_rm16_imm16, Cmp_rm32_imm32, Cmp_rm64_imm32],
];
const GROUP1_EV_IB: [[Code; 3]; 8] = [
    [Add_rm16_imm8, Add_rm32_imm8, Add_rm64_imm8],
    [Or_rm16_imm8, Or_rm32_imm8, Or_rm64_imm8],
    [Adc_rm16_imm8, Adc_rm32_imm8, Adc_rm64_imm8],
    [Sbb_rm16_imm8, Sbb_rm32_imm8, Sbb_rm64_imm8],
    [And_rm16_imm8, And_rm32_imm8, And_rm64_imm8],
    [Sub_rm16_imm8, Sub_rm32_imm8, Sub_rm64_imm8],
    [Xor_rm16_imm8, Xor_rm32_imm8, Xor_rm64_imm8],
    [Cmp_rm16_imm8, Cmp_rm32_imm8, Cmp_rm64_imm8],
];

const GROUP2_EB_IB: [Code; 8] = [Rol_rm8_imm8, Ror_rm8_imm8, Rcl_rm8_imm8, Rcr_rm8_imm8, Shl_rm8_imm8, Shr_rm8_imm8, Sal_rm8_imm8, Sar_rm8_imm8];
const GROUP2_EV_IB: [[Code; 3]; 8] = [
    [Rol_rm16_imm8, Rol_rm32_imm8, Rol_rm64_imm8],
    [Ror_rm16_imm8, Ror_rm32_imm8, Ror_rm64_imm8],
    [Rcl_rm16_imm8, Rcl_rm32_imm8, Rcl_rm64_imm8],
    [Rcr_rm16_imm8, Rcr_rm32_imm8, Rcr_rm64_imm8],
    [Shl_rm16_imm8, Shl_rm32_imm8, Shl_rm64_imm8],
    [Shr_rm16_imm8, Shr_rm32_imm8, Shr_rm64_imm8],
    [Sal_rm16_imm8, Sal_rm32_imm8, Sal_rm64_imm8],
    [Sar_rm16_imm8, Sar_rm32_imm8, Sar_rm64_imm8],
];
const GROUP2_EB_1: [Code; 8] = [Rol_rm8_1, Ror_rm8_1, Rcl_rm8_1, Rcr_rm8_1, Shl_rm8_1, Shr_rm8_1, Sal_rm8_1, Sar_rm8_1];
const GROUP2_EV_1: [[Code; 3]; 8] = [
    [Rol_rm16_1, Rol_rm32_1, Rol_rm64_1],
    [Ror_rm16_1, Ror_rm32_1, Ror_rm64_1],
    [Rcl_rm16_1, Rcl_rm32_1, Rcl_rm64_1],
    [Rcr_rm16_1, Rcr_rm32_1, Rcr_rm64_1],
    [Shl_rm16_1, Shl_rm32_1, Shl_rm64_1],
    [Shr_rm16_1, Shr_rm32_1, Shr_rm64_1],
    [Sal_rm16_1, Sal_rm32_1, Sal_rm64_1],
    [Sar_rm16_1, Sar_rm32_1, Sar_rm64_1],
];
const GROUP2_EB_CL: [Code; 8] = [Rol_rm8_CL, Ror_rm8_CL, Rcl_rm8_CL, Rcr_rm8_CL, Shl_rm8_CL, Shr_rm8_CL, Sal_rm8_CL, Sar_rm8_CL];
const GROUP2_EV_CL: [[Code; 3]; 8] = [
    [Rol_rm16_CL, Rol_rm32_CL, Rol_rm64_CL],
    [Ror_rm16_CL, Ror_rm32_CL, Ror_rm64_CL],
    [Rcl_rm16_CL, Rcl_rm32_CL, Rcl_rm64_CL],
    [Rcr_rm16_CL, Rcr_rm32_CL, Rcr_rm64_CL],
    [Shl_rm16_CL, Shl_rm32_CL, Shl_rm64_CL],
    [Shr_rm16_CL, Shr_rm32_CL, Shr_rm64_CL],
    [Sal_rm16_CL, Sal_rm32_CL, Sal_rm64_CL],
    [Sar_rm16_CL, Sar_rm32_CL, Sar_rm64_CL],
];

const JCC_REL8: [[Code; 3]; 16] = [
    [Jo_rel8_16, Jo_rel8_32, Jo_rel8_64],
    [Jno_rel8_16, Jno_rel8_32, Jno_rel8_64],
    [Jb_rel8_16, Jb_rel8_32, Jb_rel8_64],
    [Jae_rel8_16, Jae_rel8_32, Jae_rel8_64],
    [Je_rel8_16, Je_rel8_32, Je_rel8_64],
    [Jne_rel8_16, Jne_rel8_32, Jne_rel8_64],
    [Jbe_rel8_16, Jbe_rel8_32, Jbe_rel8_64],
    [Ja_rel8_16, Ja_rel8_32, Ja_rel8_64],
    [Js_rel8_16, Js_rel8_32, Js_rel8_64],
    [Jns_rel8_16, Jns_rel8_32, Jns_rel8_64],
    [Jp_rel8_16, Jp_rel8_32, Jp_rel8_64],
    [Jnp_rel8_16, Jnp_rel8_32, Jnp_rel8_64],
    [Jl_rel8_16, Jl_rel8_32, Jl_rel8_64],
    [Jge_rel8_16, Jge_rel8_32, Jge_rel8_64],
    [Jle_rel8_16, Jle_rel8_32, Jle_rel8_64],
    [Jg_rel8_16, Jg_rel8_32, Jg_rel8_64],
];
const JCC_REL: [[Code; 3]; 16] = [
    [Jo_rel16, Jo_rel32_32, Jo_rel32_64],
    [Jno_rel16, Jno_rel32_32, Jno_rel32_64],
    [Jb_rel16, Jb_rel32_32, Jb_rel32_64],
    [Jae_rel16, Jae_rel32_32, Jae_rel32_64],
    [Je_rel16, Je_rel32_32, Je_rel32_64],
    [Jne_rel16, Jne_rel32_32, Jne_rel32_64],
    [Jbe_rel16, Jbe_rel32_32, Jbe_rel32_64],
    [Ja_rel16, Ja_rel32_32, Ja_rel32_64],
    [Js_rel16, Js_rel32_32, Js_rel32_64],
    [Jns_rel16, Jns_rel32_32, Jns_rel32_64],
    [Jp_rel16, Jp_rel32_32, Jp_rel32_64],
    [Jnp_rel16, Jnp_rel32_32, Jnp_rel32_64],
    [Jl_rel16, Jl_rel32_32, Jl_rel32_64],
    [Jge_rel16, Jge_rel32_32, Jge_rel32_64],
    [Jle_rel16, Jle_rel32_32, Jle_rel32_64],
    [Jg_rel16, Jg_rel32_32, Jg_rel32_64],
];
const CMOVCC: [[Code; 3]; 16] = [
    [Cmovo_r16_rm16, Cmovo_r32_rm32, Cmovo_r64_rm64],
    [Cmovno_r16_rm16, Cmovno_r32_rm32, Cmovno_r64_rm64],
    [Cmovb_r16_rm16, Cmovb_r32_rm32, Cmovb_r64_rm64],
    [Cmovae_r16_rm16, Cmovae_r32_rm32, Cmovae_r64_rm64],
    [Cmove_r16_rm16, Cmove_r32_rm32, Cmove_r64_rm64],
    [Cmovne_r16_rm16, Cmovne_r32_rm32, Cmovne_r64_rm64],
    [Cmovbe_r16_rm16, Cmovbe_r32_rm32, Cmovbe_r64_rm64],
    [Cmova_r16_rm16, Cmova_r32_rm32, Cmova_r64_rm64],
    [Cmovs_r16_rm16, Cmovs_r32_rm32, Cmovs_r64_rm64],
    [Cmovns_r16_rm16, Cmovns_r32_rm32, Cmovns_r64_rm64],
    [Cmovp_r16_rm16, Cmovp_r32_rm32, Cmovp_r64_rm64],
    [Cmovnp_r16_rm16, Cmovnp_r32_rm32, Cmovnp_r64_rm64],
    [Cmovl_r16_rm16, Cmovl_r32_rm32, Cmovl_r64_rm64],
    [Cmovge_r16_rm16, Cmovge_r32_rm32, Cmovge_r64_rm64],
    [Cmovle_r16_rm16, Cmovle_r32_rm32, Cmovle_r64_rm64],
    [Cmovg_r16_rm16, Cmovg_r32_rm32, Cmovg_r64_rm64],
];
const SETCC: [Code; 16] = [Seto_rm8, Setno_rm8, Setb_rm8, Setae_rm8, Sete_rm8, Setne_rm8, Setbe_rm8, Seta_rm8, Sets_rm8, Setns_rm8, Setp_rm8, Setnp_rm8, Setl_rm8, Setge_rm8, Setle_rm8, Setg_rm8];

/// x87 escapes `D8`..`DF`: memory forms by ModRM.reg, then register forms by ModRM.reg.
/// `STi` forms name the register operand only; `ST_STi` is `st(0), st(i)` and `STi_ST` the
/// reverse.
#[derive(Copy, Clone)]
enum X87 {
    Invalid,
    Mem(Code),
    St0Sti(Code),
    StiSt0(Code),
    Sti(Code),
}

/// `DA`..`DF`; `D9` has its own constant-load and transcendental forms and is built by hand.
const X87_ESCAPES: [(u8, [X87; 8], [X87; 8]); 7] = [
    (
        0xd8,
        [X87::Mem(Fadd_m32fp), X87::Mem(Fmul_m32fp), X87::Mem(Fcom_m32fp), X87::Mem(Fcomp_m32fp), X87::Mem(Fsub_m32fp), X87::Mem(Fsubr_m32fp), X87::Mem(Fdiv_m32fp), X87::Mem(Fdivr_m32fp)],
        [X87::St0Sti(Fadd_st0_sti), X87::St0Sti(Fmul_st0_sti), X87::St0Sti(Fcom_st0_sti), X87::St0Sti(Fcomp_st0_sti), X87::St0Sti(Fsub_st0_sti), X87::St0Sti(Fsubr_st0_sti), X87::St0Sti(Fdiv_st0_sti), X87::St0Sti(Fdivr_st0_sti)],
    ),
    (
        0xda,
        [X87::Mem(Fiadd_m32int), X87::Mem(Fimul_m32int), X87::Mem(Ficom_m32int), X87::Mem(Ficomp_m32int), X87::Mem(Fisub_m32int), X87::Mem(Fisubr_m32int), X87::Mem(Fidiv_m32int), X87::Mem(Fidivr_m32int)],
        [X87::St0Sti(Fcmovb_st0_sti), X87::St0Sti(Fcmove_st0_sti), X87::St0Sti(Fcmovbe_st0_sti), X87::St0Sti(Fcmovu_st0_sti), X87::Invalid, X87::Invalid, X87::Invalid, X87::Invalid],
    ),
    (
        0xdb,
        [X87::Mem(Fild_m32int), X87::Mem(Fisttp_m32int), X87::Mem(Fist_m32int), X87::Mem(Fistp_m32int), X87::Invalid, X87::Mem(Fld_m80fp), X87::Invalid, X87::Mem(Fstp_m80fp)],
        [X87::St0Sti(Fcmovnb_st0_sti), X87::St0Sti(Fcmovne_st0_sti), X87::St0Sti(Fcmovnbe_st0_sti), X87::St0Sti(Fcmovnu_st0_sti), X87::Invalid, X87::St0Sti(Fucomi_st0_sti), X87::St0Sti(Fcomi_st0_sti), X87::Invalid],
    ),
    (
        0xdc,
        [X87::Mem(Fadd_m64fp), X87::Mem(Fmul_m64fp), X87::Mem(Fcom_m64fp), X87::Mem(Fcomp_m64fp), X87::Mem(Fsub_m64fp), X87::Mem(Fsubr_m64fp), X87::Mem(Fdiv_m64fp), X87::Mem(Fdivr_m64fp)],
        [X87::StiSt0(Fadd_sti_st0), X87::StiSt0(Fmul_sti_st0), X87::St0Sti(Fcom_st0_sti_DCD0), X87::St0Sti(Fcomp_st0_sti_DCD8), X87::StiSt0(Fsubr_sti_st0), X87::StiSt0(Fsub_sti_st0), X87::StiSt0(Fdivr_sti_st0), X87::StiSt0(Fdiv_sti_st0)],
    ),
    (
        0xdd,
        [X87::Mem(Fld_m64fp), X87::Mem(Fisttp_m64int), X87::Mem(Fst_m64fp), X87::Mem(Fstp_m64fp), X87::Invalid, X87::Invalid, X87::Invalid, X87::Mem(Fnstsw_m2byte)],
        [X87::Sti(Ffree_sti), X87::St0Sti(Fxch_st0_sti_DDC8), X87::Sti(Fst_sti), X87::Sti(Fstp_sti), X87::St0Sti(Fucom_st0_sti), X87::St0Sti(Fucomp_st0_sti), X87::Invalid, X87::Invalid],
    ),
    (
        0xde,
        [X87::Mem(Fiadd_m16int), X87::Mem(Fimul_m16int), X87::Mem(Ficom_m16int), X87::Mem(Ficomp_m16int), X87::Mem(Fisub_m16int), X87::Mem(Fisubr_m16int), X87::Mem(Fidiv_m16int), X87::Mem(Fidivr_m16int)],
        [X87::StiSt0(Faddp_sti_st0), X87::StiSt0(Fmulp_sti_st0), X87::St0Sti(Fcomp_st0_sti_DED0), X87::Invalid, X87::StiSt0(Fsubrp_sti_st0), X87::StiSt0(Fsubp_sti_st0), X87::StiSt0(Fdivrp_sti_st0), X87::StiSt0(Fdivp_sti_st0)],
    ),
    (
        0xdf,
        [X87::Mem(Fild_m16int), X87::Mem(Fisttp_m16int), X87::Mem(Fist_m16int), X87::Mem(Fistp_m16int), X87::Mem(Fbld_m80bcd), X87::Mem(Fild_m64int), X87::Mem(Fbstp_m80bcd), X87::Mem(Fistp_m64int)],
        [X87::Sti(Ffreep_sti), X87::Invalid, X87::Invalid, X87::Invalid, X87::Invalid, X87::St0Sti(Fucomip_st0_sti), X87::St0Sti(Fcomip_st0_sti), X87::Invalid],
    ),
];

/// `D9 E0`..`D9 FF`, by the low six bits of ModRM.
const D9_REGISTER_FORMS: [(usize, Code); 28] = [
    (0x10, Fnop),
    (0x20, Fchs),
    (0x21, Fabs),
    (0x24, Ftst),
    (0x25, Fxam),
    (0x28, Fld1),
    (0x29, Fldl2t),
    (0x2a, Fldl2e),
    (0x2b, Fldpi),
    (0x2c, Fldlg2),
    (0x2d, Fldln2),
    (0x2e, Fldz),
    (0x30, F2xm1),
    (0x31, Fyl2x),
    (0x32, Fptan),
    (0x33, Fpatan),
    (0x34, Fxtract),
    (0x35, Fprem1),
    (0x36, Fdecstp),
    (0x37, Fincstp),
    (0x38, Fprem),
    (0x39, Fyl2xp1),
    (0x3a, Fsqrt),
    (0x3b, Fsincos),
    (0x3c, Frndint),
    (0x3d, Fscale),
    (0x3e, Fsin),
    (0x3f, Fcos),
];

pub(super) fn build(b: &mut TableBuilder) {
    one_byte(b);
    map_0f(b);
    map_0f38(b);
    map_0f3a(b);
}

/// adds each leaf in order. `None` slots are `Invalid`.
fn leaves<const N: usize>(b: &mut TableBuilder, slots: [Option<Legacy>; N]) -> [HandlerId; N] {
    slots.map(|slot| match slot {
        Some(leaf) => b.legacy(leaf),
        None => INVALID_ID,
    })
}

fn group(b: &mut TableBuilder, slots: [Option<Legacy>; 8]) -> HandlerId {
    let ids = leaves(b, slots);
    b.select(Selector::Group(ids))
}

/// by mandatory prefix, in `[none, 66, F3, F2]` order.
fn by_prefix(b: &mut TableBuilder, slots: [Option<Legacy>; 4]) -> HandlerId {
    let ids = leaves(b, slots);
    b.select(Selector::MandatoryPrefix(ids))
}

/// an instruction without ModRM that does not exist in 64-bit mode.
fn not_64(b: &mut TableBuilder, leaf: Legacy) -> HandlerId {
    let h16_32 = b.legacy(leaf);
    b.select(Selector::Bitness { h16_32, h64: INVALID_NO_MODRM })
}

/// an instruction with ModRM that does not exist in 64-bit mode.
fn not_64_modrm(b: &mut TableBuilder, h16_32: HandlerId) -> HandlerId {
    b.select(Selector::Bitness_DontReadModRM { h16_32, h64: INVALID_ID })
}

fn x87(b: &mut TableBuilder, form: X87) -> HandlerId {
    match form {
        X87::Invalid => INVALID_ID,
        X87::Mem(code) => b.legacy(Mf(code)),
        X87::St0Sti(code) => b.legacy(ST_STi(code)),
        X87::StiSt0(code) => b.legacy(STi_ST(code)),
        X87::Sti(code) => b.legacy(STi(code)),
    }
}

/// an SSE form whose register and memory encodings share a code.
fn vw(code: Code) -> Option<Legacy> {
    Some(VW { base: Register::XMM0, code_r: code, code_m: code })
}

fn one_byte(b: &mut TableBuilder) {
    const MAP: OpcodeMap = OpcodeMap::Legacy;

    for (row, alu) in ALU.iter().enumerate() {
        let flags = if alu.eb_gb == Cmp_rm8_r8 { NONE } else { LOCK };
        let ids = [
            b.legacy(Eb_Gb { code: alu.eb_gb, flags }),
            b.legacy(Ev_Gv { codes: alu.ev_gv, flags }),
            b.legacy(Gb_Eb(alu.gb_eb)),
            b.legacy(Gv_Ev(alu.gv_ev)),
            b.legacy(RegIb { code: alu.al_ib, reg: Register::AL }),
            b.legacy(Reg_Iz(alu.eax_iz)),
        ];
        b.set_run(MAP, (row as u8) << 3, &ids);
    }

    let pushes = [
        (0x06, Register::ES, [Pushw_ES, Pushd_ES, INVALID]),
        (0x0e, Register::CS, [Pushw_CS, Pushd_CS, INVALID]),
        (0x16, Register::SS, [Pushw_SS, Pushd_SS, INVALID]),
        (0x1e, Register::DS, [Pushw_DS, Pushd_DS, INVALID]),
        (0x07, Register::ES, [Popw_ES, Popd_ES, INVALID]),
        (0x17, Register::SS, [Popw_SS, Popd_SS, INVALID]),
        (0x1f, Register::DS, [Popw_DS, Popd_DS, INVALID]),
    ];
    for (op, reg, codes) in pushes {
        let id = not_64(b, PushOpSizeReg { codes, reg });
        b.set(MAP, op, id);
    }
    let map0f = b.select(Selector::AnotherTable(OpcodeMap::Map0F));
    b.set(MAP, 0x0f, map0f);

    // prefixes are consumed before the table is consulted.
    for op in [0x26, 0x2e, 0x36, 0x3e, 0x64, 0x65, 0x66, 0x67, 0xf0, 0xf2, 0xf3] {
        b.set(MAP, op, INVALID_NO_MODRM);
    }

    for (op, code) in [(0x27, Daa), (0x2f, Das), (0x37, Aaa), (0x3f, Aas), (0xce, Into), (0xd6, Salc)] {
        let id = not_64(b, Simple(code));
        b.set(MAP, op, id);
    }

    // 40..4F are REX prefixes in 64-bit mode.
    for index in 0..8u32 {
        let inc = not_64(b, SimpleReg { codes: [Inc_r16, Inc_r32, INVALID], index });
        let dec = not_64(b, SimpleReg { codes: [Dec_r16, Dec_r32, INVALID], index });
        let push = b.legacy(PushSimpleReg { codes: [Push_r16, Push_r32, Push_r64], index });
        let pop = b.legacy(PushSimpleReg { codes: [Pop_r16, Pop_r32, Pop_r64], index });
        let xchg = b.legacy(Xchg_Reg_rAX { index });
        let mov8 = b.legacy(RegIb3 { code: Mov_r8_imm8, index });
        let mov = b.legacy(RegIz2 { codes: [Mov_r16_imm16, Mov_r32_imm32, Mov_r64_imm64], index });
        let i = index as u8;
        b.set(MAP, 0x40 + i, inc);
        b.set(MAP, 0x48 + i, dec);
        b.set(MAP, 0x50 + i, push);
        b.set(MAP, 0x58 + i, pop);
        b.set(MAP, 0x90 + i, xchg);
        b.set(MAP, 0xb0 + i, mov8);
        b.set(MAP, 0xb8 + i, mov);
    }

    let pusha = not_64(b, Simple2([Pushaw, Pushad, INVALID]));
    b.set(MAP, 0x60, pusha);
    let popa = not_64(b, Simple2([Popaw, Popad, INVALID]));
    b.set(MAP, 0x61, popa);
    let bound = b.legacy(Gv_Ma { code16: Bound_r16_m1616, code32: Bound_r32_m3232 });
    let evex = b.select(Selector::Evex { fallback: bound });
    b.set(MAP, 0x62, evex);
    let arpl = b.legacy(Ev_Gv { codes: [Arpl_rm16_r16, Arpl_r32m16_r32, INVALID], flags: NONE });
    let movsxd = b.legacy(Gv_Ev2([Movsxd_r16_rm16, Movsxd_r32_rm32, Movsxd_r64_rm32]));
    let arpl_movsxd = b.select(Selector::Bitness_DontReadModRM { h16_32: arpl, h64: movsxd });
    b.set(MAP, 0x63, arpl_movsxd);

    let ids = [
        b.legacy(PushIz([Push_imm16, Pushd_imm32, Pushq_imm32])),
        b.legacy(Gv_Ev_Iz([Imul_r16_rm16_imm16, Imul_r32_rm32_imm32, Imul_r64_rm64_imm32])),
        b.legacy(PushIb2([Pushw_imm8, Pushd_imm8, Pushq_imm8])),
        b.legacy(Gv_Ev_Ib([Imul_r16_rm16_imm8, Imul_r32_rm32_imm8, Imul_r64_rm64_imm8])),
        b.legacy(Yb_Reg { code: Insb_m8_DX, reg: Register::DX }),
        b.legacy(Yv_Reg2([Insw_m16_DX, Insd_m32_DX])),
        b.legacy(Reg_Xb { code: Outsb_DX_m8, reg: Register::DX }),
        b.legacy(Reg_Xv2([Outsw_DX_m16, Outsd_DX_m32])),
    ];
    b.set_run(MAP, 0x68, &ids);

    for (cc, codes) in JCC_REL8.iter().enumerate() {
        let id = b.legacy(Jb(*codes));
        b.set(MAP, 0x70 + cc as u8, id);
    }

    let mut g80 = [INVALID_ID; 8];
    let mut g81 = [INVALID_ID; 8];
    let mut g82 = [INVALID_ID; 8];
    let mut g83 = [INVALID_ID; 8];
    for i in 0..8 {
        let flags = if i == 7 { NONE } else { LOCK };
        g80[i] = b.legacy(Eb_Ib { code: GROUP1_EB_IB[i], flags });
        g81[i] = b.legacy(Ev_Iz { codes: GROUP1_EV_IZ[i], flags });
        g82[i] = b.legacy(Eb_Ib { code: GROUP1_EB_IB_82[i], flags });
        g83[i] = b.legacy(Ev_Ib { codes: GROUP1_EV_IB[i], flags });
    }
    let g80 = b.select(Selector::Group(g80));
    let g81 = b.select(Selector::Group(g81));
    let g82 = b.select(Selector::Group(g82));
    let g82 = not_64_modrm(b, g82);
    let g83 = b.select(Selector::Group(g83));
    b.set_run(MAP, 0x80, &[g80, g81, g82, g83]);

    let ids = [
        b.legacy(Eb_Gb { code: Test_rm8_r8, flags: NONE }),
        b.legacy(Ev_Gv { codes: [Test_rm16_r16, Test_rm32_r32, Test_rm64_r64], flags: NONE }),
        b.legacy(Eb_Gb { code: Xchg_rm8_r8, flags: XCHG }),
        b.legacy(Ev_Gv { codes: [Xchg_rm16_r16, Xchg_rm32_r32, Xchg_rm64_r64], flags: XCHG }),
        b.legacy(Eb_Gb { code: Mov_rm8_r8, flags: MOV }),
        b.legacy(Ev_Gv { codes: [Mov_rm16_r16, Mov_rm32_r32, Mov_rm64_r64], flags: MOV }),
        b.legacy(Gb_Eb(Mov_r8_rm8)),
        b.legacy(Gv_Ev([Mov_r16_rm16, Mov_r32_rm32, Mov_r64_rm64])),
        b.legacy(Ev_Sw([Mov_rm16_Sreg, Mov_r32m16_Sreg, Mov_r64m16_Sreg])),
        b.legacy(Gv_M([Lea_r16_m, Lea_r32_m, Lea_r64_m])),
        b.legacy(Sw_Ev([Mov_Sreg_rm16, Mov_Sreg_r32m16, Mov_Sreg_r64m16])),
    ];
    b.set_run(MAP, 0x84, &ids);
    let pop_ev = group(b, [Some(PushEv([Pop_rm16, Pop_rm32, Pop_rm64])), None, None, None, None, None, None, None]);
    let xop = b.select(Selector::Xop { fallback: pop_ev });
    b.set(MAP, 0x8f, xop);

    let ids = [
        b.legacy(Simple2([Cbw, Cwde, Cdqe])),
        b.legacy(Simple2([Cwd, Cdq, Cqo])),
        not_64(b, Ap([Call_ptr1616, Call_ptr1632])),
        b.legacy(Simple(Wait)),
        b.legacy(PushSimple2([Pushfw, Pushfd, Pushfq])),
        b.legacy(PushSimple2([Popfw, Popfd, Popfq])),
        b.legacy(Simple(Sahf)),
        b.legacy(Simple(Lahf)),
        b.legacy(Reg_Ob { code: Mov_AL_moffs8, reg: Register::AL }),
        b.legacy(Reg_Ov([Mov_AX_moffs16, Mov_EAX_moffs32, Mov_RAX_moffs64])),
        b.legacy(Ob_Reg { code: Mov_moffs8_AL, reg: Register::AL }),
        b.legacy(Ov_Reg([Mov_moffs16_AX, Mov_moffs32_EAX, Mov_moffs64_RAX])),
        b.legacy(Yb_Xb(Movsb_m8_m8)),
        b.legacy(Yv_Xv([Movsw_m16_m16, Movsd_m32_m32, Movsq_m64_m64])),
        b.legacy(Xb_Yb(Cmpsb_m8_m8)),
        b.legacy(Xv_Yv([Cmpsw_m16_m16, Cmpsd_m32_m32, Cmpsq_m64_m64])),
        b.legacy(RegIb { code: Test_AL_imm8, reg: Register::AL }),
        b.legacy(Reg_Iz([Test_AX_imm16, Test_EAX_imm32, Test_RAX_imm32])),
        b.legacy(Yb_Reg { code: Stosb_m8_AL, reg: Register::AL }),
        b.legacy(Yv_Reg([Stosw_m16_AX, Stosd_m32_EAX, Stosq_m64_RAX])),
        b.legacy(Reg_Xb { code: Lodsb_AL_m8, reg: Register::AL }),
        b.legacy(Reg_Xv([Lodsw_AX_m16, Lodsd_EAX_m32, Lodsq_RAX_m64])),
        b.legacy(Reg_Yb { code: Scasb_AL_m8, reg: Register::AL }),
        b.legacy(Reg_Yv([Scasw_AX_m16, Scasd_EAX_m32, Scasq_RAX_m64])),
    ];
    b.set_run(MAP, 0x98, &ids);

    let mut c0 = [INVALID_ID; 8];
    let mut c1 = [INVALID_ID; 8];
    let mut d0 = [INVALID_ID; 8];
    let mut d1 = [INVALID_ID; 8];
    let mut d2 = [INVALID_ID; 8];
    let mut d3 = [INVALID_ID; 8];
    for i in 0..8 {
        c0[i] = b.legacy(Eb_Ib { code: GROUP2_EB_IB[i], flags: NONE });
        c1[i] = b.legacy(Ev_Ib2 { codes: GROUP2_EV_IB[i], flags: NONE });
        d0[i] = b.legacy(Eb_1(GROUP2_EB_1[i]));
        d1[i] = b.legacy(Ev_1(GROUP2_EV_1[i]));
        d2[i] = b.legacy(Eb_CL(GROUP2_EB_CL[i]));
        d3[i] = b.legacy(Ev_CL(GROUP2_EV_CL[i]));
    }
    for (op, ids) in [(0xc0, c0), (0xc1, c1), (0xd0, d0), (0xd1, d1), (0xd2, d2), (0xd3, d3)] {
        let id = b.select(Selector::Group(ids));
        b.set(MAP, op, id);
    }

    let ids = [
        b.legacy(BranchIw([Retnw_imm16, Retnd_imm16, Retnq_imm16])),
        b.legacy(BranchSimple([Retnw, Retnd, Retnq])),
    ];
    b.set_run(MAP, 0xc2, &ids);
    let les = b.legacy(Gv_Mp([Les_r16_m1616, Les_r32_m1632, INVALID]));
    let vex3 = b.select(Selector::Vex3 { fallback: les });
    b.set(MAP, 0xc4, vex3);
    let lds = b.legacy(Gv_Mp([Lds_r16_m1616, Lds_r32_m1632, INVALID]));
    let vex2 = b.select(Selector::Vex2 { fallback: lds });
    b.set(MAP, 0xc5, vex2);

    let low = leaves(b, [Some(Eb_Ib { code: Mov_rm8_imm8, flags: MOV }), None, None, None, None, None, None, None]);
    let mut high = Box::new([None; 64]);
    high[0x38] = Some(b.legacy(Ib3(Xabort_imm8)));
    let c6 = b.select(Selector::Group8x64 { low, high });
    b.set(MAP, 0xc6, c6);
    let low = leaves(
        b,
        [Some(Ev_Iz { codes: [Mov_rm16_imm16, Mov_rm32_imm32, Mov_rm64_imm32], flags: MOV }), None, None, None, None, None, None, None],
    );
    let mut high = Box::new([None; 64]);
    high[0x38] = Some(b.legacy(Jx([Xbegin_rel16, Xbegin_rel32, Xbegin_rel32])));
    let c7 = b.select(Selector::Group8x64 { low, high });
    b.set(MAP, 0xc7, c7);

    let ids = [
        b.legacy(Iw_Ib([Enterw_imm16_imm8, Enterd_imm16_imm8, Enterq_imm16_imm8])),
        b.legacy(PushSimple2([Leavew, Leaved, Leaveq])),
        b.legacy(Simple2Iw([Retfw_imm16, Retfd_imm16, Retfq_imm16])),
        b.legacy(Simple2([Retfw, Retfd, Retfq])),
        b.legacy(Simple(Int3)),
        b.legacy(Ib(Int_imm8)),
    ];
    b.set_run(MAP, 0xc8, &ids);
    let iret = b.legacy(Simple2([Iretw, Iretd, Iretq]));
    b.set(MAP, 0xcf, iret);
    let aam = not_64(b, Ib(Aam_imm8));
    b.set(MAP, 0xd4, aam);
    let aad = not_64(b, Ib(Aad_imm8));
    b.set(MAP, 0xd5, aad);
    let xlat = b.legacy(Simple(Xlat_m8));
    b.set(MAP, 0xd7, xlat);

    for (op, mem, reg) in X87_ESCAPES {
        let low = mem.map(|form| x87(b, form));
        let high = reg.map(|form| x87(b, form));
        let id = b.select(Selector::Group8x8 { low, high });
        b.set(MAP, op, id);
    }
    let low = leaves(
        b,
        [
            Some(Mf(Fld_m32fp)),
            None,
            Some(Mf(Fst_m32fp)),
            Some(Mf(Fstp_m32fp)),
            None,
            Some(Mf(Fldcw_m2byte)),
            None,
            Some(Mf(Fnstcw_m2byte)),
        ],
    );
    let mut high = Box::new([None; 64]);
    for i in 0..8 {
        high[i] = Some(b.legacy(STi(Fld_sti)));
        high[8 + i] = Some(b.legacy(ST_STi(Fxch_st0_sti)));
    }
    for (index, code) in D9_REGISTER_FORMS {
        high[index] = Some(b.legacy(SimpleModRM(code)));
    }
    let d9 = b.select(Selector::Group8x64 { low, high });
    b.set(MAP, 0xd9, d9);

    let ids = [
        b.legacy(Jb2([
            Loopne_rel8_16_CX,
            Loopne_rel8_16_ECX,
            Loopne_rel8_16_RCX,
            Loopne_rel8_32_CX,
            Loopne_rel8_32_ECX,
            Loopne_rel8_64_ECX,
            Loopne_rel8_64_RCX,
        ])),
        b.legacy(Jb2([
            Loope_rel8_16_CX,
            Loope_rel8_16_ECX,
            Loope_rel8_16_RCX,
            Loope_rel8_32_CX,
            Loope_rel8_32_ECX,
            Loope_rel8_64_ECX,
            Loope_rel8_64_RCX,
        ])),
        b.legacy(Jb2([
            Loop_rel8_16_CX,
            Loop_rel8_16_ECX,
            Loop_rel8_16_RCX,
            Loop_rel8_32_CX,
            Loop_rel8_32_ECX,
            Loop_rel8_64_ECX,
            Loop_rel8_64_RCX,
        ])),
        b.legacy(Jb2([
            Jcxz_rel8_16,
            Jecxz_rel8_16,
            Jrcxz_rel8_16,
            Jcxz_rel8_32,
            Jecxz_rel8_32,
            Jecxz_rel8_64,
            Jrcxz_rel8_64,
        ])),
        b.legacy(RegIb { code: In_AL_imm8, reg: Register::AL }),
        b.legacy(RegIb2([In_AX_imm8, In_EAX_imm8])),
        b.legacy(IbReg { code: Out_imm8_AL, reg: Register::AL }),
        b.legacy(IbReg2([Out_imm8_AX, Out_imm8_EAX])),
        b.legacy(Jz([Call_rel16, Call_rel32_32, Call_rel32_64])),
        b.legacy(Jz([Jmp_rel16, Jmp_rel32_32, Jmp_rel32_64])),
        not_64(b, Ap([Jmp_ptr1616, Jmp_ptr1632])),
        b.legacy(Jb([Jmp_rel8_16, Jmp_rel8_32, Jmp_rel8_64])),
        b.legacy(AL_DX(In_AL_DX)),
        b.legacy(eAX_DX([In_AX_DX, In_EAX_DX])),
        b.legacy(DX_AL(Out_DX_AL)),
        b.legacy(DX_eAX([Out_DX_AX, Out_DX_EAX])),
    ];
    b.set_run(MAP, 0xe0, &ids);

    for (op, code) in [
        (0xf1, Int1),
        (0xf4, Hlt),
        (0xf5, Cmc),
        (0xf8, Clc),
        (0xf9, Stc),
        (0xfa, Cli),
        (0xfb, Sti),
        (0xfc, Cld),
        (0xfd, Std),
    ] {
        let id = b.legacy(Simple(code));
        b.set(MAP, op, id);
    }

    let f6 = group(
        b,
        [
            Some(Eb_Ib { code: Test_rm8_imm8, flags: NONE }),
            Some(Eb_Ib { code: Test_rm8_imm8_F6r1, flags: NONE }),
            Some(Eb { code: Not_rm8, flags: LOCK }),
            Some(Eb { code: Neg_rm8, flags: LOCK }),
            Some(Eb { code: Mul_rm8, flags: NONE }),
            Some(Eb { code: Imul_rm8, flags: NONE }),
            Some(Eb { code: Div_rm8, flags: NONE }),
            Some(Eb { code: Idiv_rm8, flags: NONE }),
        ],
    );
    b.set(MAP, 0xf6, f6);
    let f7 = group(
        b,
        [
            Some(Ev_Iz { codes: [Test_rm16_imm16, Test_rm32_imm32, Test_rm64_imm32], flags: NONE }),
            Some(Ev_Iz { codes: [Test_rm16_imm16_F7r1, Test_rm32_imm32_F7r1, Test_rm64_imm32_F7r1], flags: NONE }),
            Some(Ev { codes: [Not_rm16, Not_rm32, Not_rm64], flags: LOCK }),
            Some(Ev { codes: [Neg_rm16, Neg_rm32, Neg_rm64], flags: LOCK }),
            Some(Ev { codes: [Mul_rm16, Mul_rm32, Mul_rm64], flags: NONE }),
            Some(Ev { codes: [Imul_rm16, Imul_rm32, Imul_rm64], flags: NONE }),
            Some(Ev { codes: [Div_rm16, Div_rm32, Div_rm64], flags: NONE }),
            Some(Ev { codes: [Idiv_rm16, Idiv_rm32, Idiv_rm64], flags: NONE }),
        ],
    );
    b.set(MAP, 0xf7, f7);
    let fe = group(
        b,
        [Some(Eb { code: Inc_rm8, flags: LOCK }), Some(Eb { code: Dec_rm8, flags: LOCK }), None, None, None, None, None, None],
    );
    b.set(MAP, 0xfe, fe);
    let ff = group(
        b,
        [
            Some(Ev { codes: [Inc_rm16, Inc_rm32, Inc_rm64], flags: LOCK }),
            Some(Ev { codes: [Dec_rm16, Dec_rm32, Dec_rm64], flags: LOCK }),
            Some(Evj([Call_rm16, Call_rm32, Call_rm64])),
            Some(Ep([Call_m1616, Call_m1632, Call_m1664])),
            Some(Evj([Jmp_rm16, Jmp_rm32, Jmp_rm64])),
            Some(Ep([Jmp_m1616, Jmp_m1632, Jmp_m1664])),
            Some(PushEv([Push_rm16, Push_rm32, Push_rm64])),
            None,
        ],
    );
    b.set(MAP, 0xff, ff);
}

fn map_0f(b: &mut TableBuilder) {
    const MAP: OpcodeMap = OpcodeMap::Map0F;

    let g6 = group(
        b,
        [
            Some(Ev { codes: [Sldt_rm16, Sldt_r32m16, Sldt_r64m16], flags: NONE }),
            Some(Ev { codes: [Str_rm16, Str_r32m16, Str_r64m16], flags: NONE }),
            Some(Ew(Lldt_rm16)),
            Some(Ew(Ltr_rm16)),
            Some(Ew(Verr_rm16)),
            Some(Ew(Verw_rm16)),
            None,
            None,
        ],
    );
    b.set(MAP, 0x00, g6);

    let low = leaves(
        b,
        [
            Some(Ms([Sgdt_m1632_16, Sgdt_m1632, Sgdt_m1664])),
            Some(Ms([Sidt_m1632_16, Sidt_m1632, Sidt_m1664])),
            Some(Ms([Lgdt_m1632_16, Lgdt_m1632, Lgdt_m1664])),
            Some(Ms([Lidt_m1632_16, Lidt_m1632, Lidt_m1664])),
            Some(Ev { codes: [Smsw_rm16, Smsw_r32m16, Smsw_r64m16], flags: NONE }),
            None,
            Some(Ew(Lmsw_rm16)),
            Some(Mf(Invlpg_m)),
        ],
    );
    let mut high = Box::new([None; 64]);
    for (index, code) in [
        (0x01, Vmcall),
        (0x0a, Clac),
        (0x0b, Stac),
        (0x10, Xgetbv),
        (0x11, Xsetbv),
        (0x15, Xend),
        (0x16, Xtest),
        (0x2e, Rdpkru),
        (0x2f, Wrpkru),
        (0x39, Rdtscp),
    ] {
        high[index] = Some(b.legacy(SimpleModRM(code)));
    }
    let swapgs = b.legacy(SimpleModRM(Swapgs));
    high[0x38] = Some(b.select(Selector::Bitness_DontReadModRM { h16_32: INVALID_ID, h64: swapgs }));
    let g7 = b.select(Selector::Group8x64 { low, high });
    b.set(MAP, 0x01, g7);

    let ids = [
        b.legacy(Gv_Ev([Lar_r16_rm16, Lar_r32_r32m16, Lar_r64_r64m16])),
        b.legacy(Gv_Ev([Lsl_r16_rm16, Lsl_r32_r32m16, Lsl_r64_r64m16])),
    ];
    b.set_run(MAP, 0x02, &ids);
    let syscall = b.legacy(Simple(Syscall));
    b.set(MAP, 0x05, syscall);
    let clts = b.legacy(Simple(Clts));
    b.set(MAP, 0x06, clts);
    let sysret = b.legacy(Simple4 { code32: Sysretd, code64: Sysretq });
    let loadall = b.legacy(Simple(Loadall386));
    let options = b.select(Selector::Options { default: sysret, options: Box::new([(loadall, DecoderOptions::LOADALL386)]) });
    let sysret = b.select(Selector::Bitness { h16_32: options, h64: sysret });
    b.set(MAP, 0x07, sysret);
    let invd = b.legacy(Simple(Invd));
    b.set(MAP, 0x08, invd);
    let wbinvd = b.legacy(Simple(Wbinvd));
    let wbnoinvd = b.legacy(Simple(Wbnoinvd));
    let wb = b.select(Selector::MandatoryPrefix_MaybeModRM([wbinvd, wbinvd, wbnoinvd, wbinvd]));
    b.set(MAP, 0x09, wb);
    let ud2 = b.legacy(Simple(Ud2));
    b.set(MAP, 0x0b, ud2);
    let prefetch = group(
        b,
        [Some(Mf(Prefetch_m8)), Some(Mf(Prefetchw_m8)), Some(Mf(Prefetchwt1_m8)), None, None, None, None, None],
    );
    b.set(MAP, 0x0d, prefetch);

    // 0F 10..17: SSE moves. 0F 10/11 were `umov` on some 386/486 parts.
    let movu = by_prefix(b, [vw(Movups_xmm_xmmm128), vw(Movupd_xmm_xmmm128), vw(Movss_xmm_xmmm32), vw(Movsd_xmm_xmmm64)]);
    let umov = b.legacy(Eb_Gb { code: Umov_rm8_r8, flags: NONE });
    let id = b.select(Selector::Options_DontReadModRM { default: movu, options: Box::new([(umov, DecoderOptions::UMOV)]) });
    b.set(MAP, 0x10, id);
    let movu = by_prefix(
        b,
        [
            Some(WV { base: Register::XMM0, code: Movups_xmmm128_xmm }),
            Some(WV { base: Register::XMM0, code: Movupd_xmmm128_xmm }),
            Some(WV { base: Register::XMM0, code: Movss_xmmm32_xmm }),
            Some(WV { base: Register::XMM0, code: Movsd_xmmm64_xmm }),
        ],
    );
    let umov = b.legacy(Ev_Gv { codes: [Umov_rm16_r16, Umov_rm32_r32, INVALID], flags: NONE });
    let id = b.select(Selector::Options_DontReadModRM { default: movu, options: Box::new([(umov, DecoderOptions::UMOV)]) });
    b.set(MAP, 0x11, id);

    let movhlps = b.legacy(VW { base: Register::XMM0, code_r: Movhlps_xmm_xmm, code_m: INVALID });
    let movlps = b.legacy(VM { base: Register::XMM0, code: Movlps_xmm_m64 });
    let movlpd = b.legacy(VM { base: Register::XMM0, code: Movlpd_xmm_m64 });
    let [movsldup, movddup] = leaves(b, [vw(Movsldup_xmm_xmmm128), vw(Movddup_xmm_xmmm64)]);
    let id = b.select(Selector::MandatoryPrefix3 {
        reg: [movhlps, INVALID_ID, movsldup, movddup],
        mem: [movlps, movlpd, movsldup, movddup],
        flags: Default::default(),
    });
    b.set(MAP, 0x12, id);
    let movlhps = b.legacy(VW { base: Register::XMM0, code_r: Movlhps_xmm_xmm, code_m: INVALID });
    let movhps = b.legacy(VM { base: Register::XMM0, code: Movhps_xmm_m64 });
    let movhpd = b.legacy(VM { base: Register::XMM0, code: Movhpd_xmm_m64 });
    let [movshdup] = leaves(b, [vw(Movshdup_xmm_xmmm128)]);
    let id = b.select(Selector::MandatoryPrefix3 {
        reg: [movlhps, INVALID_ID, movshdup, INVALID_ID],
        mem: [movhps, movhpd, movshdup, INVALID_ID],
        flags: Default::default(),
    });
    b.set(MAP, 0x16, id);
    let ids = [
        by_prefix(
            b,
            [Some(MV { base: Register::XMM0, code: Movlps_m64_xmm }), Some(MV { base: Register::XMM0, code: Movlpd_m64_xmm }), None, None],
        ),
        by_prefix(b, [vw(Unpcklps_xmm_xmmm128), vw(Unpcklpd_xmm_xmmm128), None, None]),
        by_prefix(b, [vw(Unpckhps_xmm_xmmm128), vw(Unpckhpd_xmm_xmmm128), None, None]),
    ];
    b.set_run(MAP, 0x13, &ids);
    let id = by_prefix(
        b,
        [Some(MV { base: Register::XMM0, code: Movhps_m64_xmm }), Some(MV { base: Register::XMM0, code: Movhpd_m64_xmm }), None, None],
    );
    b.set(MAP, 0x17, id);

    // 0F 18..1F: hint space. with FORCE_RESERVED_NOP, all of it decodes as reserved nops.
    let reserved = [
        [Reservednop_rm16_r16_0F18, Reservednop_rm32_r32_0F18, Reservednop_rm64_r64_0F18],
        [Reservednop_rm16_r16_0F19, Reservednop_rm32_r32_0F19, Reservednop_rm64_r64_0F19],
        [Reservednop_rm16_r16_0F1A, Reservednop_rm32_r32_0F1A, Reservednop_rm64_r64_0F1A],
        [Reservednop_rm16_r16_0F1B, Reservednop_rm32_r32_0F1B, Reservednop_rm64_r64_0F1B],
        [Reservednop_rm16_r16_0F1C, Reservednop_rm32_r32_0F1C, Reservednop_rm64_r64_0F1C],
        [Reservednop_rm16_r16_0F1D, Reservednop_rm32_r32_0F1D, Reservednop_rm64_r64_0F1D],
        [Reservednop_rm16_r16_0F1E, Reservednop_rm32_r32_0F1E, Reservednop_rm64_r64_0F1E],
        [Reservednop_rm16_r16_0F1F, Reservednop_rm32_r32_0F1F, Reservednop_rm64_r64_0F1F],
    ]
    .map(|codes| b.legacy(Ev_Gv { codes, flags: NONE }));
    let prefetch = leaves(
        b,
        [
            Some(Mf(Prefetchnta_m8)),
            Some(Mf(Prefetcht0_m8)),
            Some(Mf(Prefetcht1_m8)),
            Some(Mf(Prefetcht2_m8)),
        ],
    );
    let r = reserved[0];
    let hints = b.select(Selector::Group([prefetch[0], prefetch[1], prefetch[2], prefetch[3], r, r, r, r]));
    let hints = b.select(Selector::RM { reg: r, mem: hints });
    let id = b.select(Selector::ReservedNop { reserved_nop: r, other: hints });
    b.set(MAP, 0x18, id);
    let bndldx = by_prefix(
        b,
        [
            Some(B_MIB(Bndldx_bnd_mib)),
            Some(B_BM { code32: Bndmov_bnd_bndm64, code64: Bndmov_bnd_bndm128 }),
            Some(B_Ev { code32: Bndcl_bnd_rm32, code64: Bndcl_bnd_rm64 }),
            Some(B_Ev { code32: Bndcu_bnd_rm32, code64: Bndcu_bnd_rm64 }),
        ],
    );
    let id = b.select(Selector::ReservedNop { reserved_nop: reserved[2], other: bndldx });
    b.set(MAP, 0x1a, id);
    let bndstx = by_prefix(
        b,
        [
            Some(MIB_B(Bndstx_mib_bnd)),
            Some(BM_B { code32: Bndmov_bndm64_bnd, code64: Bndmov_bndm128_bnd }),
            None,
            Some(B_Ev { code32: Bndcn_bnd_rm32, code64: Bndcn_bnd_rm64 }),
        ],
    );
    let id = b.select(Selector::ReservedNop { reserved_nop: reserved[3], other: bndstx });
    b.set(MAP, 0x1b, id);
    for op in [0x19, 0x1c, 0x1d, 0x1e] {
        b.set(MAP, op, reserved[(op - 0x18) as usize]);
    }
    let nop = b.legacy(Ev { codes: [Nop_rm16, Nop_rm32, Nop_rm64], flags: NONE });
    let r = reserved[7];
    let nops = b.select(Selector::Group([nop, r, r, r, r, r, r, r]));
    let id = b.select(Selector::ReservedNop { reserved_nop: r, other: nops });
    b.set(MAP, 0x1f, id);

    let ids = [
        b.legacy(R_C { code32: Mov_r32_cr, code64: Mov_r64_cr, base: Register::CR0 }),
        b.legacy(R_C { code32: Mov_r32_dr, code64: Mov_r64_dr, base: Register::DR0 }),
        b.legacy(C_R { code32: Mov_cr_r32, code64: Mov_cr_r64, base: Register::CR0 }),
        b.legacy(C_R { code32: Mov_dr_r32, code64: Mov_dr_r64, base: Register::DR0 }),
    ];
    b.set_run(MAP, 0x20, &ids);
    let mov_tr = b.legacy(R_C { code32: Mov_r32_tr, code64: INVALID, base: Register::TR0 });
    let id = b.select(Selector::Options_DontReadModRM { default: INVALID_ID, options: Box::new([(mov_tr, DecoderOptions::MOV_TR)]) });
    b.set(MAP, 0x24, id);
    let mov_tr = b.legacy(C_R { code32: Mov_tr_r32, code64: INVALID, base: Register::TR0 });
    let id = b.select(Selector::Options_DontReadModRM { default: INVALID_ID, options: Box::new([(mov_tr, DecoderOptions::MOV_TR)]) });
    b.set(MAP, 0x26, id);

    let ids = [
        by_prefix(b, [vw(Movaps_xmm_xmmm128), vw(Movapd_xmm_xmmm128), None, None]),
        by_prefix(
            b,
            [Some(WV { base: Register::XMM0, code: Movaps_xmmm128_xmm }), Some(WV { base: Register::XMM0, code: Movapd_xmmm128_xmm }), None, None],
        ),
        by_prefix(
            b,
            [Some(VQ { base: Register::XMM0, code: Cvtpi2ps_xmm_mmm64 }), Some(VQ { base: Register::XMM0, code: Cvtpi2pd_xmm_mmm64 }), None, None],
        ),
    ];
    b.set_run(MAP, 0x28, &ids);
    let id = by_prefix(
        b,
        [Some(P_W { base: Register::XMM0, code: Cvtps2pi_mm_xmmm64 }), Some(P_W { base: Register::XMM0, code: Cvtpd2pi_mm_xmmm128 }), None, None],
    );
    b.set(MAP, 0x2d, id);
    let ids = [
        by_prefix(b, [vw(Ucomiss_xmm_xmmm32), vw(Ucomisd_xmm_xmmm64), None, None]),
        by_prefix(b, [vw(Comiss_xmm_xmmm32), vw(Comisd_xmm_xmmm64), None, None]),
    ];
    b.set_run(MAP, 0x2e, &ids);

    let ids = [
        b.legacy(Simple(Wrmsr)),
        b.legacy(Simple(Rdtsc)),
        b.legacy(Simple(Rdmsr)),
        b.legacy(Simple(Rdpmc)),
        b.legacy(Simple(Sysenter)),
        b.legacy(Simple4 { code32: Sysexitd, code64: Sysexitq }),
    ];
    b.set_run(MAP, 0x30, &ids);
    let getsec = b.legacy(Simple(Getsec));
    b.set(MAP, 0x37, getsec);
    let map0f38 = b.select(Selector::AnotherTable(OpcodeMap::Map0F38));
    b.set(MAP, 0x38, map0f38);
    let map0f3a = b.select(Selector::AnotherTable(OpcodeMap::Map0F3A));
    b.set(MAP, 0x3a, map0f3a);

    for (cc, codes) in CMOVCC.iter().enumerate() {
        let id = b.legacy(Gv_Ev(*codes));
        b.set(MAP, 0x40 + cc as u8, id);
    }

    for (op, ps, pd, ss, sd) in [
        (0x51, Sqrtps_xmm_xmmm128, Sqrtpd_xmm_xmmm128, Sqrtss_xmm_xmmm32, Sqrtsd_xmm_xmmm64),
        (0x58, Addps_xmm_xmmm128, Addpd_xmm_xmmm128, Addss_xmm_xmmm32, Addsd_xmm_xmmm64),
        (0x59, Mulps_xmm_xmmm128, Mulpd_xmm_xmmm128, Mulss_xmm_xmmm32, Mulsd_xmm_xmmm64),
        (0x5c, Subps_xmm_xmmm128, Subpd_xmm_xmmm128, Subss_xmm_xmmm32, Subsd_xmm_xmmm64),
        (0x5d, Minps_xmm_xmmm128, Minpd_xmm_xmmm128, Minss_xmm_xmmm32, Minsd_xmm_xmmm64),
        (0x5e, Divps_xmm_xmmm128, Divpd_xmm_xmmm128, Divss_xmm_xmmm32, Divsd_xmm_xmmm64),
        (0x5f, Maxps_xmm_xmmm128, Maxpd_xmm_xmmm128, Maxss_xmm_xmmm32, Maxsd_xmm_xmmm64),
    ] {
        let id = by_prefix(b, [vw(ps), vw(pd), vw(ss), vw(sd)]);
        b.set(MAP, op, id);
    }
    for (op, ps, pd) in [
        (0x54, Andps_xmm_xmmm128, Andpd_xmm_xmmm128),
        (0x55, Andnps_xmm_xmmm128, Andnpd_xmm_xmmm128),
        (0x56, Orps_xmm_xmmm128, Orpd_xmm_xmmm128),
        (0x57, Xorps_xmm_xmmm128, Xorpd_xmm_xmmm128),
    ] {
        let id = by_prefix(b, [vw(ps), vw(pd), None, None]);
        b.set(MAP, op, id);
    }

    // MMX without a prefix, SSE2 with 66.
    for (op, mmx, sse) in [
        (0x60, Punpcklbw_mm_mmm32, Punpcklbw_xmm_xmmm128),
        (0x61, Punpcklwd_mm_mmm32, Punpcklwd_xmm_xmmm128),
        (0x62, Punpckldq_mm_mmm32, Punpckldq_xmm_xmmm128),
        (0x74, Pcmpeqb_mm_mmm64, Pcmpeqb_xmm_xmmm128),
        (0x75, Pcmpeqw_mm_mmm64, Pcmpeqw_xmm_xmmm128),
        (0x76, Pcmpeqd_mm_mmm64, Pcmpeqd_xmm_xmmm128),
        (0xd4, Paddq_mm_mmm64, Paddq_xmm_xmmm128),
        (0xdb, Pand_mm_mmm64, Pand_xmm_xmmm128),
        (0xeb, Por_mm_mmm64, Por_xmm_xmmm128),
        (0xef, Pxor_mm_mmm64, Pxor_xmm_xmmm128),
        (0xfc, Paddb_mm_mmm64, Paddb_xmm_xmmm128),
        (0xfd, Paddw_mm_mmm64, Paddw_xmm_xmmm128),
        (0xfe, Paddd_mm_mmm64, Paddd_xmm_xmmm128),
    ] {
        let id = by_prefix(b, [Some(P_Q(mmx)), vw(sse), None, None]);
        b.set(MAP, op, id);
    }
    let id = by_prefix(
        b,
        [Some(P_Ev { code32: Movd_mm_rm32, code64: Movq_mm_rm64 }), Some(VX_Ev { code32: Movd_xmm_rm32, code64: Movq_xmm_rm64 }), None, None],
    );
    b.set(MAP, 0x6e, id);
    let id = by_prefix(b, [Some(P_Q(Movq_mm_mmm64)), vw(Movdqa_xmm_xmmm128), vw(Movdqu_xmm_xmmm128), None]);
    b.set(MAP, 0x6f, id);
    let id = by_prefix(
        b,
        [
            Some(P_Q_Ib(Pshufw_mm_mmm64_imm8)),
            Some(VWIb { base: Register::XMM0, code_w0: Pshufd_xmm_xmmm128_imm8, code_w1: Pshufd_xmm_xmmm128_imm8 }),
            Some(VWIb { base: Register::XMM0, code_w0: Pshufhw_xmm_xmmm128_imm8, code_w1: Pshufhw_xmm_xmmm128_imm8 }),
            Some(VWIb { base: Register::XMM0, code_w0: Pshuflw_xmm_xmmm128_imm8, code_w1: Pshuflw_xmm_xmmm128_imm8 }),
        ],
    );
    b.set(MAP, 0x70, id);
    let shift_imm = |b: &mut TableBuilder, mmx: Option<Code>, sse: Code| {
        by_prefix(b, [mmx.map(NIb), Some(RIb { base: Register::XMM0, code: sse }), None, None])
    };
    let psrlw = shift_imm(b, Some(Psrlw_mm_imm8), Psrlw_xmm_imm8);
    let psraw = shift_imm(b, Some(Psraw_mm_imm8), Psraw_xmm_imm8);
    let psllw = shift_imm(b, Some(Psllw_mm_imm8), Psllw_xmm_imm8);
    let g12 = b.select(Selector::Group([INVALID_ID, INVALID_ID, psrlw, INVALID_ID, psraw, INVALID_ID, psllw, INVALID_ID]));
    let psrld = shift_imm(b, Some(Psrld_mm_imm8), Psrld_xmm_imm8);
    let psrad = shift_imm(b, Some(Psrad_mm_imm8), Psrad_xmm_imm8);
    let pslld = shift_imm(b, Some(Pslld_mm_imm8), Pslld_xmm_imm8);
    let g13 = b.select(Selector::Group([INVALID_ID, INVALID_ID, psrld, INVALID_ID, psrad, INVALID_ID, pslld, INVALID_ID]));
    let psrlq = shift_imm(b, Some(Psrlq_mm_imm8), Psrlq_xmm_imm8);
    let psrldq = shift_imm(b, None, Psrldq_xmm_imm8);
    let psllq = shift_imm(b, Some(Psllq_mm_imm8), Psllq_xmm_imm8);
    let pslldq = shift_imm(b, None, Pslldq_xmm_imm8);
    let g14 = b.select(Selector::Group([INVALID_ID, INVALID_ID, psrlq, psrldq, INVALID_ID, INVALID_ID, psllq, pslldq]));
    b.set_run(MAP, 0x71, &[g12, g13, g14]);
    // `emms` takes no prefix.
    let emms = b.legacy(Simple(Emms));
    let emms = b.select(Selector::MandatoryPrefix_NoModRM([emms, INVALID_NO_MODRM, INVALID_NO_MODRM, INVALID_NO_MODRM]));
    b.set(MAP, 0x77, emms);
    let vmread = by_prefix(
        b,
        [Some(Ev_Gv_32_64 { code32: Vmread_rm32_r32, code64: Vmread_rm64_r64, allow_reg: true, allow_mem: true }), None, None, None],
    );
    b.set(MAP, 0x78, vmread);
    let vmwrite = by_prefix(
        b,
        [Some(Gv_Ev_32_64 { code32: Vmwrite_r32_rm32, code64: Vmwrite_r64_rm64, allow_reg: true, allow_mem: true }), None, None, None],
    );
    b.set(MAP, 0x79, vmwrite);
    let id = by_prefix(
        b,
        [None, Some(Ev_VX { code32: Movd_rm32_xmm, code64: Movq_rm64_xmm }), vw(Movq_xmm_xmmm64), None],
    );
    b.set(MAP, 0x7e, id);
    let id = by_prefix(
        b,
        [
            Some(Q_P(Movq_mmm64_mm)),
            Some(WV { base: Register::XMM0, code: Movdqa_xmmm128_xmm }),
            Some(WV { base: Register::XMM0, code: Movdqu_xmmm128_xmm }),
            None,
        ],
    );
    b.set(MAP, 0x7f, id);

    for (cc, codes) in JCC_REL.iter().enumerate() {
        let id = b.legacy(Jz(*codes));
        b.set(MAP, 0x80 + cc as u8, id);
    }
    for (cc, code) in SETCC.iter().enumerate() {
        let id = b.legacy(Eb { code: *code, flags: NONE });
        b.set(MAP, 0x90 + cc as u8, id);
    }

    let ids = [
        b.legacy(PushOpSizeReg { codes: [Pushw_FS, Pushd_FS, Pushq_FS], reg: Register::FS }),
        b.legacy(PushOpSizeReg { codes: [Popw_FS, Popd_FS, Popq_FS], reg: Register::FS }),
        b.legacy(Simple(Cpuid)),
        b.legacy(Ev_Gv { codes: [Bt_rm16_r16, Bt_rm32_r32, Bt_rm64_r64], flags: NONE }),
        b.legacy(Ev_Gv_Ib([Shld_rm16_r16_imm8, Shld_rm32_r32_imm8, Shld_rm64_r64_imm8])),
        b.legacy(Ev_Gv_CL([Shld_rm16_r16_CL, Shld_rm32_r32_CL, Shld_rm64_r64_CL])),
    ];
    b.set_run(MAP, 0xa0, &ids);
    let ids = [
        b.legacy(PushOpSizeReg { codes: [Pushw_GS, Pushd_GS, Pushq_GS], reg: Register::GS }),
        b.legacy(PushOpSizeReg { codes: [Popw_GS, Popd_GS, Popq_GS], reg: Register::GS }),
        b.legacy(Simple(Rsm)),
        b.legacy(Ev_Gv { codes: [Bts_rm16_r16, Bts_rm32_r32, Bts_rm64_r64], flags: LOCK }),
        b.legacy(Ev_Gv_Ib([Shrd_rm16_r16_imm8, Shrd_rm32_r32_imm8, Shrd_rm64_r64_imm8])),
        b.legacy(Ev_Gv_CL([Shrd_rm16_r16_CL, Shrd_rm32_r32_CL, Shrd_rm64_r64_CL])),
    ];
    b.set_run(MAP, 0xa8, &ids);

    // 0F AE: fxsave and friends, fences, and (with F3) fs/gs base access.
    let low = leaves(
        b,
        [
            Some(M { code_w0: Fxsave_m512byte, code_w1: Fxsave64_m512byte }),
            Some(M { code_w0: Fxrstor_m512byte, code_w1: Fxrstor64_m512byte }),
            Some(Mf(Ldmxcsr_m32)),
            Some(Mf(Stmxcsr_m32)),
            Some(M { code_w0: Xsave_mem, code_w1: Xsave64_mem }),
            Some(M { code_w0: Xrstor_mem, code_w1: Xrstor64_mem }),
            Some(M { code_w0: Xsaveopt_mem, code_w1: Xsaveopt64_mem }),
            Some(Mf(Clflush_m8)),
        ],
    );
    let mut high = Box::new([None; 64]);
    for (reg, code) in [(5, Lfence), (6, Mfence), (7, Sfence)] {
        let fence = b.legacy(SimpleModRM(code));
        for rm in 0..8 {
            high[reg << 3 | rm] = Some(fence);
        }
    }
    let g15 = b.select(Selector::Group8x64 { low, high });
    let fsgsbase = |code32, code64| Some(Ev_REXW { code32, code64, allow_reg: true, allow_mem: false });
    let g15_f3 = group(
        b,
        [
            fsgsbase(Rdfsbase_r32, Rdfsbase_r64),
            fsgsbase(Rdgsbase_r32, Rdgsbase_r64),
            fsgsbase(Wrfsbase_r32, Wrfsbase_r64),
            fsgsbase(Wrgsbase_r32, Wrgsbase_r64),
            Some(Ev_REXW { code32: Ptwrite_rm32, code64: Ptwrite_rm64, allow_reg: true, allow_mem: true }),
            None,
            Some(Simple5ModRM_as([Umonitor_r16, Umonitor_r32, Umonitor_r64])),
            None,
        ],
    );
    let id = b.select(Selector::MandatoryPrefix([g15, INVALID_ID, g15_f3, INVALID_ID]));
    b.set(MAP, 0xae, id);

    let ids = [
        b.legacy(Gv_Ev([Imul_r16_rm16, Imul_r32_rm32, Imul_r64_rm64])),
        b.legacy(Eb_Gb { code: Cmpxchg_rm8_r8, flags: LOCK }),
        b.legacy(Ev_Gv { codes: [Cmpxchg_rm16_r16, Cmpxchg_rm32_r32, Cmpxchg_rm64_r64], flags: LOCK }),
        b.legacy(Gv_Mp([Lss_r16_m1616, Lss_r32_m1632, Lss_r64_m1664])),
        b.legacy(Ev_Gv { codes: [Btr_rm16_r16, Btr_rm32_r32, Btr_rm64_r64], flags: LOCK }),
        b.legacy(Gv_Mp([Lfs_r16_m1616, Lfs_r32_m1632, Lfs_r64_m1664])),
        b.legacy(Gv_Mp([Lgs_r16_m1616, Lgs_r32_m1632, Lgs_r64_m1664])),
        b.legacy(Gv_Eb([Movzx_r16_rm8, Movzx_r32_rm8, Movzx_r64_rm8])),
        b.legacy(Gv_Ew([Movzx_r16_rm16, Movzx_r32_rm16, Movzx_r64_rm16])),
    ];
    b.set_run(MAP, 0xaf, &ids);

    // F3 turns bsf/bsr into tzcnt/lzcnt, and 0F B8 into popcnt. 66 keeps its operand size
    // meaning.
    let popcnt = b.legacy(Gv_Ev([Popcnt_r16_rm16, Popcnt_r32_rm32, Popcnt_r64_rm64]));
    let id = b.select(Selector::MandatoryPrefix_F3_F2 {
        normal: INVALID_ID,
        f3: popcnt,
        clear_f3: true,
        f2: INVALID_ID,
        clear_f2: false,
    });
    b.set(MAP, 0xb8, id);
    let ud1 = b.legacy(Gv_Ev([Ud1_r16_rm16, Ud1_r32_rm32, Ud1_r64_rm64]));
    b.set(MAP, 0xb9, ud1);
    let g8 = group(
        b,
        [
            None,
            None,
            None,
            None,
            Some(Ev_Ib2 { codes: [Bt_rm16_imm8, Bt_rm32_imm8, Bt_rm64_imm8], flags: NONE }),
            Some(Ev_Ib2 { codes: [Bts_rm16_imm8, Bts_rm32_imm8, Bts_rm64_imm8], flags: LOCK }),
            Some(Ev_Ib2 { codes: [Btr_rm16_imm8, Btr_rm32_imm8, Btr_rm64_imm8], flags: LOCK }),
            Some(Ev_Ib2 { codes: [Btc_rm16_imm8, Btc_rm32_imm8, Btc_rm64_imm8], flags: LOCK }),
        ],
    );
    b.set(MAP, 0xba, g8);
    let btc = b.legacy(Ev_Gv { codes: [Btc_rm16_r16, Btc_rm32_r32, Btc_rm64_r64], flags: LOCK });
    b.set(MAP, 0xbb, btc);
    for (op, normal, f3) in [
        (0xbc, [Bsf_r16_rm16, Bsf_r32_rm32, Bsf_r64_rm64], [Tzcnt_r16_rm16, Tzcnt_r32_rm32, Tzcnt_r64_rm64]),
        (0xbd, [Bsr_r16_rm16, Bsr_r32_rm32, Bsr_r64_rm64], [Lzcnt_r16_rm16, Lzcnt_r32_rm32, Lzcnt_r64_rm64]),
    ] {
        let normal = b.legacy(Gv_Ev(normal));
        let f3 = b.legacy(Gv_Ev(f3));
        let id = b.select(Selector::MandatoryPrefix_F3_F2 { normal, f3, clear_f3: true, f2: normal, clear_f2: false });
        b.set(MAP, op, id);
    }
    let ids = [
        b.legacy(Gv_Eb([Movsx_r16_rm8, Movsx_r32_rm8, Movsx_r64_rm8])),
        b.legacy(Gv_Ew([Movsx_r16_rm16, Movsx_r32_rm16, Movsx_r64_rm16])),
        b.legacy(Eb_Gb { code: Xadd_rm8_r8, flags: LOCK }),
        b.legacy(Ev_Gv { codes: [Xadd_rm16_r16, Xadd_rm32_r32, Xadd_rm64_r64], flags: LOCK }),
    ];
    b.set_run(MAP, 0xbe, &ids);

    let rdrand = b.legacy(Rv([Rdrand_r16, Rdrand_r32, Rdrand_r64]));
    let rdrand = b.select(Selector::RM { reg: rdrand, mem: INVALID_ID });
    let rdseed = b.legacy(Rv([Rdseed_r16, Rdseed_r32, Rdseed_r64]));
    let rdseed = b.select(Selector::RM { reg: rdseed, mem: INVALID_ID });
    let cmpxchg8b = b.legacy(M_REXW { code32: Cmpxchg8b_m64, code64: Cmpxchg16b_m128, flags32: LOCK, flags64: LOCK });
    let g9 = b.select(Selector::Group([INVALID_ID, cmpxchg8b, INVALID_ID, INVALID_ID, INVALID_ID, INVALID_ID, rdrand, rdseed]));
    b.set(MAP, 0xc7, g9);
    for index in 0..8u32 {
        let id = b.legacy(SimpleReg { codes: [Bswap_r16, Bswap_r32, Bswap_r64], index });
        b.set(MAP, 0xc8 + index as u8, id);
    }

    let id = by_prefix(
        b,
        [
            None,
            Some(WV { base: Register::XMM0, code: Movq_xmmm64_xmm }),
            Some(VN { base: Register::XMM0, code: Movq2dq_xmm_mm }),
            None,
        ],
    );
    b.set(MAP, 0xd6, id);
    let id = by_prefix(
        b,
        [
            Some(Gv_N { code32: Pmovmskb_r32_mm, code64: Pmovmskb_r64_mm }),
            Some(Gv_RX { code32: Pmovmskb_r32_xmm, code64: Pmovmskb_r64_xmm }),
            None,
            None,
        ],
    );
    b.set(MAP, 0xd7, id);
    let id = by_prefix(b, [Some(MP(Movntq_m64_mm)), Some(MV { base: Register::XMM0, code: Movntdq_m128_xmm }), None, None]);
    b.set(MAP, 0xe7, id);
    let ud0 = b.legacy(Gv_Ev([Ud0_r16_rm16, Ud0_r32_rm32, Ud0_r64_rm64]));
    b.set(MAP, 0xff, ud0);
}

fn map_0f38(b: &mut TableBuilder) {
    const MAP: OpcodeMap = OpcodeMap::Map0F38;

    for (op, mmx, sse) in [
        (0x00, Pshufb_mm_mmm64, Pshufb_xmm_xmmm128),
        (0x01, Phaddw_mm_mmm64, Phaddw_xmm_xmmm128),
        (0x02, Phaddd_mm_mmm64, Phaddd_xmm_xmmm128),
        (0x1c, Pabsb_mm_mmm64, Pabsb_xmm_xmmm128),
        (0x1d, Pabsw_mm_mmm64, Pabsw_xmm_xmmm128),
        (0x1e, Pabsd_mm_mmm64, Pabsd_xmm_xmmm128),
    ] {
        let id = by_prefix(b, [Some(P_Q(mmx)), vw(sse), None, None]);
        b.set(MAP, op, id);
    }
    let id = by_prefix(
        b,
        [
            None,
            Some(Gv_Ev_32_64 { code32: Invpcid_r32_m128, code64: Invpcid_r64_m128, allow_reg: false, allow_mem: true }),
            None,
            None,
        ],
    );
    b.set(MAP, 0x82, id);

    let movbe = b.legacy(Gv_M([Movbe_r16_m16, Movbe_r32_m32, Movbe_r64_m64]));
    let crc32 = b.legacy(Gv_Eb_REX { code32: Crc32_r32_rm8, code64: Crc32_r64_rm8 });
    let id = b.select(Selector::MandatoryPrefix_F3_F2 { normal: movbe, f3: INVALID_ID, clear_f3: true, f2: crc32, clear_f2: true });
    b.set(MAP, 0xf0, id);
    let movbe = b.legacy(M_Gv([Movbe_m16_r16, Movbe_m32_r32, Movbe_m64_r64]));
    let id = b.select(Selector::MandatoryPrefix_F3_F2 {
        normal: movbe,
        f3: INVALID_ID,
        clear_f3: true,
        f2: INVALID_ID,
        clear_f2: true,
    });
    b.set(MAP, 0xf1, id);
    let id = by_prefix(
        b,
        [
            None,
            Some(Gv_Ev_REX { code32: Adcx_r32_rm32, code64: Adcx_r64_rm64 }),
            Some(Gv_Ev_REX { code32: Adox_r32_rm32, code64: Adox_r64_rm64 }),
            None,
        ],
    );
    b.set(MAP, 0xf6, id);
}

fn map_0f3a(b: &mut TableBuilder) {
    const MAP: OpcodeMap = OpcodeMap::Map0F3A;

    let id = by_prefix(
        b,
        [
            Some(P_Q_Ib(Palignr_mm_mmm64_imm8)),
            Some(VWIb { base: Register::XMM0, code_w0: Palignr_xmm_xmmm128_imm8, code_w1: Palignr_xmm_xmmm128_imm8 }),
            None,
            None,
        ],
    );
    b.set(MAP, 0x0f, id);
    let id = by_prefix(
        b,
        [
            None,
            Some(VWIb { base: Register::XMM0, code_w0: Roundps_xmm_xmmm128_imm8, code_w1: Roundps_xmm_xmmm128_imm8 }),
            None,
            None,
        ],
    );
    b.set(MAP, 0x08, id);
}
