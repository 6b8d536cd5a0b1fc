//! the EVEX maps. only a handful of AVX-512 foundation instructions are here: enough to carry
//! every EVEX operand shape through the decoder.

use crate::handlers::evex::Evex::{self, *};
use crate::handlers::selectors::Selector;
use crate::handlers::HandlerId;
use crate::state::TupleType;
use crate::tables::{OpcodeMap, TableBuilder};
use crate::Code::{self, *};
use crate::Register;

const INVALID_ID: HandlerId = HandlerId::INVALID;

pub(super) fn build(b: &mut TableBuilder) {
    evex_0f(b);
    evex_0f38(b);
    evex_0f3a(b);
}

const VECTORS: [Register; 3] = [Register::XMM0, Register::YMM0, Register::ZMM0];
const FULL: [TupleType; 3] = [TupleType::Full_128, TupleType::Full_256, TupleType::Full_512];
const FULL_MEM: [TupleType; 3] = [TupleType::Full_Mem_128, TupleType::Full_Mem_256, TupleType::Full_Mem_512];

/// the xmm, ymm and zmm forms of one instruction, by EVEX.L'L.
fn by_length(b: &mut TableBuilder, make: impl Fn(usize) -> Evex) -> [HandlerId; 3] {
    [0, 1, 2].map(|i| b.evex(make(i)))
}

/// by EVEX.pp, where only the `66` form is defined.
fn p66_only(b: &mut TableBuilder, p66: HandlerId) -> HandlerId {
    b.select(Selector::MandatoryPrefix2([INVALID_ID, p66, INVALID_ID, INVALID_ID]))
}

/// packed arithmetic with embedded rounding: `ps` forms are W0 without a prefix, `pd` forms
/// are W1 with `66`.
fn arith_er(b: &mut TableBuilder, ps: [Code; 3], pd: [Code; 3]) -> HandlerId {
    let [l128, l256, l512] = by_length(b, |i| VkHW_er {
        base: VECTORS[i],
        code: ps[i],
        tuple: FULL[i],
        only_sae: false,
        can_broadcast: true,
    });
    let ps = b.select(Selector::vector_length_evex_er(l128, l256, l512));
    let ps = b.select(Selector::W { w0: ps, w1: INVALID_ID });
    let [l128, l256, l512] = by_length(b, |i| VkHW_er {
        base: VECTORS[i],
        code: pd[i],
        tuple: FULL[i],
        only_sae: false,
        can_broadcast: true,
    });
    let pd = b.select(Selector::vector_length_evex_er(l128, l256, l512));
    let pd = b.select(Selector::W { w0: INVALID_ID, w1: pd });
    b.select(Selector::MandatoryPrefix2([ps, pd, INVALID_ID, INVALID_ID]))
}

fn evex_0f(b: &mut TableBuilder) {
    const MAP: OpcodeMap = OpcodeMap::Evex0F;

    let ps = [EVEX_Vmovups_xmm_k1z_xmmm128, EVEX_Vmovups_ymm_k1z_ymmm256, EVEX_Vmovups_zmm_k1z_zmmm512];
    let pd = [EVEX_Vmovupd_xmm_k1z_xmmm128, EVEX_Vmovupd_ymm_k1z_ymmm256, EVEX_Vmovupd_zmm_k1z_zmmm512];
    let [l128, l256, l512] = by_length(b, |i| VkW {
        base_v: VECTORS[i],
        base_w: VECTORS[i],
        code: ps[i],
        tuple: FULL_MEM[i],
        can_broadcast: false,
    });
    let movups = b.select(Selector::vector_length_evex(l128, l256, l512));
    let movups = b.select(Selector::W { w0: movups, w1: INVALID_ID });
    let [l128, l256, l512] = by_length(b, |i| VkW {
        base_v: VECTORS[i],
        base_w: VECTORS[i],
        code: pd[i],
        tuple: FULL_MEM[i],
        can_broadcast: false,
    });
    let movupd = b.select(Selector::vector_length_evex(l128, l256, l512));
    let movupd = b.select(Selector::W { w0: INVALID_ID, w1: movupd });
    let id = b.select(Selector::MandatoryPrefix2([movups, movupd, INVALID_ID, INVALID_ID]));
    b.set(MAP, 0x10, id);

    let ps = [EVEX_Vmovups_xmmm128_k1z_xmm, EVEX_Vmovups_ymmm256_k1z_ymm, EVEX_Vmovups_zmmm512_k1z_zmm];
    let pd = [EVEX_Vmovupd_xmmm128_k1z_xmm, EVEX_Vmovupd_ymmm256_k1z_ymm, EVEX_Vmovupd_zmmm512_k1z_zmm];
    let [l128, l256, l512] = by_length(b, |i| WkV { base: VECTORS[i], code: ps[i], tuple: FULL_MEM[i] });
    let movups = b.select(Selector::vector_length_evex(l128, l256, l512));
    let movups = b.select(Selector::W { w0: movups, w1: INVALID_ID });
    let [l128, l256, l512] = by_length(b, |i| WkV { base: VECTORS[i], code: pd[i], tuple: FULL_MEM[i] });
    let movupd = b.select(Selector::vector_length_evex(l128, l256, l512));
    let movupd = b.select(Selector::W { w0: INVALID_ID, w1: movupd });
    let id = b.select(Selector::MandatoryPrefix2([movups, movupd, INVALID_ID, INVALID_ID]));
    b.set(MAP, 0x11, id);

    let add = arith_er(
        b,
        [EVEX_Vaddps_xmm_k1z_xmm_xmmm128b32, EVEX_Vaddps_ymm_k1z_ymm_ymmm256b32, EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er],
        [EVEX_Vaddpd_xmm_k1z_xmm_xmmm128b64, EVEX_Vaddpd_ymm_k1z_ymm_ymmm256b64, EVEX_Vaddpd_zmm_k1z_zmm_zmmm512b64_er],
    );
    b.set(MAP, 0x58, add);
    let mul = arith_er(
        b,
        [EVEX_Vmulps_xmm_k1z_xmm_xmmm128b32, EVEX_Vmulps_ymm_k1z_ymm_ymmm256b32, EVEX_Vmulps_zmm_k1z_zmm_zmmm512b32_er],
        [EVEX_Vmulpd_xmm_k1z_xmm_xmmm128b64, EVEX_Vmulpd_ymm_k1z_ymm_ymmm256b64, EVEX_Vmulpd_zmm_k1z_zmm_zmmm512b64_er],
    );
    b.set(MAP, 0x59, mul);
    let sub = arith_er(
        b,
        [EVEX_Vsubps_xmm_k1z_xmm_xmmm128b32, EVEX_Vsubps_ymm_k1z_ymm_ymmm256b32, EVEX_Vsubps_zmm_k1z_zmm_zmmm512b32_er],
        [EVEX_Vsubpd_xmm_k1z_xmm_xmmm128b64, EVEX_Vsubpd_ymm_k1z_ymm_ymmm256b64, EVEX_Vsubpd_zmm_k1z_zmm_zmmm512b64_er],
    );
    b.set(MAP, 0x5c, sub);
    // min/max only suppress exceptions.
    let [l128, l256, l512] = by_length(b, |i| VkHW_er {
        base: VECTORS[i],
        code: [EVEX_Vmaxps_xmm_k1z_xmm_xmmm128b32, EVEX_Vmaxps_ymm_k1z_ymm_ymmm256b32, EVEX_Vmaxps_zmm_k1z_zmm_zmmm512b32_sae][i],
        tuple: FULL[i],
        only_sae: true,
        can_broadcast: true,
    });
    let maxps = b.select(Selector::vector_length_evex_er(l128, l256, l512));
    let maxps = b.select(Selector::W { w0: maxps, w1: INVALID_ID });
    let id = b.select(Selector::mandatory_prefix2(maxps));
    b.set(MAP, 0x5f, id);

    let d = [EVEX_Vpxord_xmm_k1z_xmm_xmmm128b32, EVEX_Vpxord_ymm_k1z_ymm_ymmm256b32, EVEX_Vpxord_zmm_k1z_zmm_zmmm512b32];
    let q = [EVEX_Vpxorq_xmm_k1z_xmm_xmmm128b64, EVEX_Vpxorq_ymm_k1z_ymm_ymmm256b64, EVEX_Vpxorq_zmm_k1z_zmm_zmmm512b64];
    let [l128, l256, l512] = by_length(b, |i| VkHW { base: VECTORS[i], code: d[i], tuple: FULL[i], can_broadcast: true });
    let w0 = b.select(Selector::vector_length_evex(l128, l256, l512));
    let [l128, l256, l512] = by_length(b, |i| VkHW { base: VECTORS[i], code: q[i], tuple: FULL[i], can_broadcast: true });
    let w1 = b.select(Selector::vector_length_evex(l128, l256, l512));
    let pxor = b.select(Selector::W { w0, w1 });
    let id = p66_only(b, pxor);
    b.set(MAP, 0xef, id);
}

fn evex_0f38(b: &mut TableBuilder) {
    const MAP: OpcodeMap = OpcodeMap::Evex0F38;

    // the source is always a dword, whatever the destination width.
    let codes = [EVEX_Vbroadcastss_xmm_k1z_xmmm32, EVEX_Vbroadcastss_ymm_k1z_xmmm32, EVEX_Vbroadcastss_zmm_k1z_xmmm32];
    let [l128, l256, l512] = by_length(b, |i| VkW {
        base_v: VECTORS[i],
        base_w: Register::XMM0,
        code: codes[i],
        tuple: TupleType::Tuple1_Scalar,
        can_broadcast: false,
    });
    let ss = b.select(Selector::vector_length_evex(l128, l256, l512));
    let ss = b.select(Selector::W { w0: ss, w1: INVALID_ID });
    let id = p66_only(b, ss);
    b.set(MAP, 0x18, id);
}

fn evex_0f3a(b: &mut TableBuilder) {
    const MAP: OpcodeMap = OpcodeMap::Evex0F3A;

    let codes = [
        EVEX_Vpalignr_xmm_k1z_xmm_xmmm128_imm8,
        EVEX_Vpalignr_ymm_k1z_ymm_ymmm256_imm8,
        EVEX_Vpalignr_zmm_k1z_zmm_zmmm512_imm8,
    ];
    let [l128, l256, l512] = by_length(b, |i| VkHWIb { base: VECTORS[i], code: codes[i], tuple: FULL_MEM[i], can_broadcast: false });
    let palignr = b.select(Selector::vector_length_evex(l128, l256, l512));
    let id = p66_only(b, palignr);
    b.set(MAP, 0x0f, id);
}
