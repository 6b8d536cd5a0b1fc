//! the VEX maps (`0F`, `0F 38`, `0F 3A`) and XOP maps 8 and 9.

use crate::handlers::selectors::Selector;
use crate::handlers::vex::Vex::{self, *};
use crate::handlers::HandlerId;
use crate::tables::{OpcodeMap, TableBuilder};
use crate::Code::{self, *};
use crate::Register;

const INVALID_ID: HandlerId = HandlerId::INVALID;

pub(super) fn build(b: &mut TableBuilder) {
    vex_0f(b);
    vex_0f38(b);
    vex_0f3a(b);
    xop(b);
}

/// the xmm and ymm forms of an instruction, by VEX.L.
fn by_length(b: &mut TableBuilder, l128: Vex, l256: Vex) -> HandlerId {
    let l128 = b.vex(l128);
    let l256 = b.vex(l256);
    b.select(Selector::vector_length_vex(l128, l256))
}

/// a form that only exists with VEX.L = 0.
fn l128_only(b: &mut TableBuilder, leaf: Vex) -> HandlerId {
    let l128 = b.vex(leaf);
    b.select(Selector::vector_length_vex(l128, INVALID_ID))
}

/// VEX.W = 0 only.
fn w0_only(b: &mut TableBuilder, w0: HandlerId) -> HandlerId {
    b.select(Selector::W { w0, w1: INVALID_ID })
}

/// by VEX.pp, in `[none, 66, F3, F2]` order.
fn by_pp(b: &mut TableBuilder, slots: [HandlerId; 4]) -> HandlerId {
    b.select(Selector::MandatoryPrefix2(slots))
}

fn vhw(b: &mut TableBuilder, xmm: Code, ymm: Code) -> HandlerId {
    by_length(b, VHW { base: Register::XMM0, code: xmm }, VHW { base: Register::YMM0, code: ymm })
}

fn vw(b: &mut TableBuilder, xmm: Code, ymm: Code) -> HandlerId {
    by_length(b, VW { base: Register::XMM0, code: xmm }, VW { base: Register::YMM0, code: ymm })
}

fn wv(b: &mut TableBuilder, xmm: Code, ymm: Code) -> HandlerId {
    by_length(b, WV { base: Register::XMM0, code: xmm }, WV { base: Register::YMM0, code: ymm })
}

/// scalar forms ignore VEX.L.
fn scalar(b: &mut TableBuilder, code: Code) -> HandlerId {
    b.vex(VHW { base: Register::XMM0, code })
}

fn vex_0f(b: &mut TableBuilder) {
    const MAP: OpcodeMap = OpcodeMap::Vex0F;

    let movups = vw(b, VEX_Vmovups_xmm_xmmm128, VEX_Vmovups_ymm_ymmm256);
    let movupd = vw(b, VEX_Vmovupd_xmm_xmmm128, VEX_Vmovupd_ymm_ymmm256);
    let reg = b.vex(VHW { base: Register::XMM0, code: VEX_Vmovss_xmm_xmm_xmm });
    let mem = b.vex(VM { base: Register::XMM0, code: VEX_Vmovss_xmm_m32 });
    let movss = b.select(Selector::RM { reg, mem });
    let reg = b.vex(VHW { base: Register::XMM0, code: VEX_Vmovsd_xmm_xmm_xmm });
    let mem = b.vex(VM { base: Register::XMM0, code: VEX_Vmovsd_xmm_m64 });
    let movsd = b.select(Selector::RM { reg, mem });
    let id = by_pp(b, [movups, movupd, movss, movsd]);
    b.set(MAP, 0x10, id);

    let movups = wv(b, VEX_Vmovups_xmmm128_xmm, VEX_Vmovups_ymmm256_ymm);
    let movupd = wv(b, VEX_Vmovupd_xmmm128_xmm, VEX_Vmovupd_ymmm256_ymm);
    let mem = b.vex(MV { base: Register::XMM0, code: VEX_Vmovss_m32_xmm });
    let movss = b.select(Selector::RM { reg: INVALID_ID, mem });
    let mem = b.vex(MV { base: Register::XMM0, code: VEX_Vmovsd_m64_xmm });
    let movsd = b.select(Selector::RM { reg: INVALID_ID, mem });
    let id = by_pp(b, [movups, movupd, movss, movsd]);
    b.set(MAP, 0x11, id);

    let movaps = vw(b, VEX_Vmovaps_xmm_xmmm128, VEX_Vmovaps_ymm_ymmm256);
    let movapd = vw(b, VEX_Vmovapd_xmm_xmmm128, VEX_Vmovapd_ymm_ymmm256);
    let id = by_pp(b, [movaps, movapd, INVALID_ID, INVALID_ID]);
    b.set(MAP, 0x28, id);
    let movaps = wv(b, VEX_Vmovaps_xmmm128_xmm, VEX_Vmovaps_ymmm256_ymm);
    let movapd = wv(b, VEX_Vmovapd_xmmm128_xmm, VEX_Vmovapd_ymmm256_ymm);
    let id = by_pp(b, [movaps, movapd, INVALID_ID, INVALID_ID]);
    b.set(MAP, 0x29, id);

    let ps = vw(b, VEX_Vsqrtps_xmm_xmmm128, VEX_Vsqrtps_ymm_ymmm256);
    let pd = vw(b, VEX_Vsqrtpd_xmm_xmmm128, VEX_Vsqrtpd_ymm_ymmm256);
    let ss = scalar(b, VEX_Vsqrtss_xmm_xmm_xmmm32);
    let sd = scalar(b, VEX_Vsqrtsd_xmm_xmm_xmmm64);
    let id = by_pp(b, [ps, pd, ss, sd]);
    b.set(MAP, 0x51, id);

    for (op, ps, pd) in [
        (0x54, [VEX_Vandps_xmm_xmm_xmmm128, VEX_Vandps_ymm_ymm_ymmm256], [VEX_Vandpd_xmm_xmm_xmmm128, VEX_Vandpd_ymm_ymm_ymmm256]),
        (0x57, [VEX_Vxorps_xmm_xmm_xmmm128, VEX_Vxorps_ymm_ymm_ymmm256], [VEX_Vxorpd_xmm_xmm_xmmm128, VEX_Vxorpd_ymm_ymm_ymmm256]),
    ] {
        let ps = vhw(b, ps[0], ps[1]);
        let pd = vhw(b, pd[0], pd[1]);
        let id = by_pp(b, [ps, pd, INVALID_ID, INVALID_ID]);
        b.set(MAP, op, id);
    }

    for (op, ps, pd, ss, sd) in [
        (
            0x58,
            [VEX_Vaddps_xmm_xmm_xmmm128, VEX_Vaddps_ymm_ymm_ymmm256],
            [VEX_Vaddpd_xmm_xmm_xmmm128, VEX_Vaddpd_ymm_ymm_ymmm256],
            VEX_Vaddss_xmm_xmm_xmmm32,
            VEX_Vaddsd_xmm_xmm_xmmm64,
        ),
        (
            0x59,
            [VEX_Vmulps_xmm_xmm_xmmm128, VEX_Vmulps_ymm_ymm_ymmm256],
            [VEX_Vmulpd_xmm_xmm_xmmm128, VEX_Vmulpd_ymm_ymm_ymmm256],
            VEX_Vmulss_xmm_xmm_xmmm32,
            VEX_Vmulsd_xmm_xmm_xmmm64,
        ),
        (
            0x5c,
            [VEX_Vsubps_xmm_xmm_xmmm128, VEX_Vsubps_ymm_ymm_ymmm256],
            [VEX_Vsubpd_xmm_xmm_xmmm128, VEX_Vsubpd_ymm_ymm_ymmm256],
            VEX_Vsubss_xmm_xmm_xmmm32,
            VEX_Vsubsd_xmm_xmm_xmmm64,
        ),
        (
            0x5d,
            [VEX_Vminps_xmm_xmm_xmmm128, VEX_Vminps_ymm_ymm_ymmm256],
            [VEX_Vminpd_xmm_xmm_xmmm128, VEX_Vminpd_ymm_ymm_ymmm256],
            VEX_Vminss_xmm_xmm_xmmm32,
            VEX_Vminsd_xmm_xmm_xmmm64,
        ),
        (
            0x5e,
            [VEX_Vdivps_xmm_xmm_xmmm128, VEX_Vdivps_ymm_ymm_ymmm256],
            [VEX_Vdivpd_xmm_xmm_xmmm128, VEX_Vdivpd_ymm_ymm_ymmm256],
            VEX_Vdivss_xmm_xmm_xmmm32,
            VEX_Vdivsd_xmm_xmm_xmmm64,
        ),
        (
            0x5f,
            [VEX_Vmaxps_xmm_xmm_xmmm128, VEX_Vmaxps_ymm_ymm_ymmm256],
            [VEX_Vmaxpd_xmm_xmm_xmmm128, VEX_Vmaxpd_ymm_ymm_ymmm256],
            VEX_Vmaxss_xmm_xmm_xmmm32,
            VEX_Vmaxsd_xmm_xmm_xmmm64,
        ),
    ] {
        let ps = vhw(b, ps[0], ps[1]);
        let pd = vhw(b, pd[0], pd[1]);
        let ss = scalar(b, ss);
        let sd = scalar(b, sd);
        let id = by_pp(b, [ps, pd, ss, sd]);
        b.set(MAP, op, id);
    }

    let movd = l128_only(b, VX_Ev { code32: VEX_Vmovd_xmm_rm32, code64: VEX_Vmovq_xmm_rm64 });
    let id = by_pp(b, [INVALID_ID, movd, INVALID_ID, INVALID_ID]);
    b.set(MAP, 0x6e, id);
    let movdqa = vw(b, VEX_Vmovdqa_xmm_xmmm128, VEX_Vmovdqa_ymm_ymmm256);
    let movdqu = vw(b, VEX_Vmovdqu_xmm_xmmm128, VEX_Vmovdqu_ymm_ymmm256);
    let id = by_pp(b, [INVALID_ID, movdqa, movdqu, INVALID_ID]);
    b.set(MAP, 0x6f, id);
    let zero = b.vex(Simple(VEX_Vzeroupper));
    let zero_all = b.vex(Simple(VEX_Vzeroall));
    let zero = b.select(Selector::vector_length_no_modrm_vex(zero, zero_all));
    let id = b.select(Selector::MandatoryPrefix2_NoModRM([
        zero,
        HandlerId::INVALID_NO_MODRM,
        HandlerId::INVALID_NO_MODRM,
        HandlerId::INVALID_NO_MODRM,
    ]));
    b.set(MAP, 0x77, id);
    let movd = l128_only(b, Ev_VX { code32: VEX_Vmovd_rm32_xmm, code64: VEX_Vmovq_rm64_xmm });
    let movq = l128_only(b, VW { base: Register::XMM0, code: VEX_Vmovq_xmm_xmmm64 });
    let id = by_pp(b, [INVALID_ID, movd, movq, INVALID_ID]);
    b.set(MAP, 0x7e, id);
    let movdqa = wv(b, VEX_Vmovdqa_xmmm128_xmm, VEX_Vmovdqa_ymmm256_ymm);
    let movdqu = wv(b, VEX_Vmovdqu_xmmm128_xmm, VEX_Vmovdqu_ymmm256_ymm);
    let id = by_pp(b, [INVALID_ID, movdqa, movdqu, INVALID_ID]);
    b.set(MAP, 0x7f, id);

    for (op, xmm, ymm) in [
        (0xd4, VEX_Vpaddq_xmm_xmm_xmmm128, VEX_Vpaddq_ymm_ymm_ymmm256),
        (0xdb, VEX_Vpand_xmm_xmm_xmmm128, VEX_Vpand_ymm_ymm_ymmm256),
        (0xeb, VEX_Vpor_xmm_xmm_xmmm128, VEX_Vpor_ymm_ymm_ymmm256),
        (0xef, VEX_Vpxor_xmm_xmm_xmmm128, VEX_Vpxor_ymm_ymm_ymmm256),
        (0xfc, VEX_Vpaddb_xmm_xmm_xmmm128, VEX_Vpaddb_ymm_ymm_ymmm256),
        (0xfd, VEX_Vpaddw_xmm_xmm_xmmm128, VEX_Vpaddw_ymm_ymm_ymmm256),
        (0xfe, VEX_Vpaddd_xmm_xmm_xmmm128, VEX_Vpaddd_ymm_ymm_ymmm256),
    ] {
        let p66 = vhw(b, xmm, ymm);
        let id = by_pp(b, [INVALID_ID, p66, INVALID_ID, INVALID_ID]);
        b.set(MAP, op, id);
    }
    let movntdq = by_length(
        b,
        MV { base: Register::XMM0, code: VEX_Vmovntdq_m128_xmm },
        MV { base: Register::YMM0, code: VEX_Vmovntdq_m256_ymm },
    );
    let id = by_pp(b, [INVALID_ID, movntdq, INVALID_ID, INVALID_ID]);
    b.set(MAP, 0xe7, id);
}

fn vex_0f38(b: &mut TableBuilder) {
    const MAP: OpcodeMap = OpcodeMap::Vex0F38;

    let pshufb = vhw(b, VEX_Vpshufb_xmm_xmm_xmmm128, VEX_Vpshufb_ymm_ymm_ymmm256);
    let id = by_pp(b, [INVALID_ID, pshufb, INVALID_ID, INVALID_ID]);
    b.set(MAP, 0x00, id);
    let broadcast = by_length(
        b,
        VM { base: Register::XMM0, code: VEX_Vbroadcastss_xmm_m32 },
        VM { base: Register::YMM0, code: VEX_Vbroadcastss_ymm_m32 },
    );
    let broadcast = w0_only(b, broadcast);
    let id = by_pp(b, [INVALID_ID, broadcast, INVALID_ID, INVALID_ID]);
    b.set(MAP, 0x18, id);

    let andn = l128_only(b, Gv_Hv_Ev { code32: VEX_Andn_r32_r32_rm32, code64: VEX_Andn_r64_r64_rm64 });
    let id = b.select(Selector::mandatory_prefix2(andn));
    b.set(MAP, 0xf2, id);
    let ids = [
        l128_only(b, Gv_Ev_Hv { code32: VEX_Bextr_r32_rm32_r32, code64: VEX_Bextr_r64_rm64_r64 }),
        l128_only(b, Gv_Ev_Hv { code32: VEX_Shlx_r32_rm32_r32, code64: VEX_Shlx_r64_rm64_r64 }),
        l128_only(b, Gv_Ev_Hv { code32: VEX_Sarx_r32_rm32_r32, code64: VEX_Sarx_r64_rm64_r64 }),
        l128_only(b, Gv_Ev_Hv { code32: VEX_Shrx_r32_rm32_r32, code64: VEX_Shrx_r64_rm64_r64 }),
    ];
    let id = by_pp(b, ids);
    b.set(MAP, 0xf7, id);
}

fn vex_0f3a(b: &mut TableBuilder) {
    const MAP: OpcodeMap = OpcodeMap::Vex0F3A;

    let palignr = by_length(
        b,
        VHWIb { base: Register::XMM0, code: VEX_Vpalignr_xmm_xmm_xmmm128_imm8 },
        VHWIb { base: Register::YMM0, code: VEX_Vpalignr_ymm_ymm_ymmm256_imm8 },
    );
    let id = by_pp(b, [INVALID_ID, palignr, INVALID_ID, INVALID_ID]);
    b.set(MAP, 0x0f, id);

    for (op, xmm, ymm) in [
        (0x4a, VEX_Vblendvps_xmm_xmm_xmmm128_xmm, VEX_Vblendvps_ymm_ymm_ymmm256_ymm),
        (0x4b, VEX_Vblendvpd_xmm_xmm_xmmm128_xmm, VEX_Vblendvpd_ymm_ymm_ymmm256_ymm),
    ] {
        let blend = by_length(b, VHWIs4 { base: Register::XMM0, code: xmm }, VHWIs4 { base: Register::YMM0, code: ymm });
        let blend = w0_only(b, blend);
        let id = by_pp(b, [INVALID_ID, blend, INVALID_ID, INVALID_ID]);
        b.set(MAP, op, id);
    }
}

/// XOP encodings have no `pp` field in use; every other value is invalid.
fn xop(b: &mut TableBuilder) {
    let cmov = by_length(
        b,
        VHWIs4 { base: Register::XMM0, code: XOP_Vpcmov_xmm_xmm_xmmm128_xmm },
        VHWIs4 { base: Register::YMM0, code: XOP_Vpcmov_ymm_ymm_ymmm256_ymm },
    );
    let cmov = w0_only(b, cmov);
    let id = b.select(Selector::mandatory_prefix2(cmov));
    b.set(OpcodeMap::Xop8, 0xa2, id);

    for (op, xmm, ymm) in [
        (0x80, XOP_Vfrczps_xmm_xmmm128, XOP_Vfrczps_ymm_ymmm256),
        (0x81, XOP_Vfrczpd_xmm_xmmm128, XOP_Vfrczpd_ymm_ymmm256),
    ] {
        let frcz = vw(b, xmm, ymm);
        let frcz = w0_only(b, frcz);
        let id = b.select(Selector::mandatory_prefix2(frcz));
        b.set(OpcodeMap::Xop9, op, id);
    }
}
