//! selectors: handlers that pick another handler and delegate to it.
//!
//! a selector never sets a `Code` or operands itself. some have a side effect before they
//! delegate (consuming a mandatory prefix, reading a deferred ModRM byte, parsing a VEX/EVEX
//! prefix). arrays indexed by `MandatoryPrefix` or `VectorLength` use those enums' fixed
//! discriminants.

use yaxpeax_arch::Reader;

use crate::decoder::DecodeCx;
use crate::handlers::{ChildRead, HandlerId, LegacyHandlerFlags};
use crate::state::{DecoderOptions, MandatoryPrefix as Prefix, VectorLength};
use crate::tables::OpcodeMap;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone)]
pub(crate) enum Selector {
    /// by ModRM.reg.
    Group([HandlerId; 8]),
    /// by ModRM.reg, with a separate table for `mod == 3`.
    Group8x8 { low: [HandlerId; 8], high: [HandlerId; 8] },
    /// by ModRM.reg, except that `mod == 3` first looks at the low six bits of ModRM. empty
    /// slots in `high` fall back to `low`.
    Group8x64 { low: [HandlerId; 8], high: Box<[Option<HandlerId>; 64]> },
    /// reads the next opcode byte and continues in another map.
    AnotherTable(OpcodeMap),
    /// by mandatory prefix, consuming it.
    MandatoryPrefix([HandlerId; 4]),
    MandatoryPrefix_NoModRM([HandlerId; 4]),
    /// by mandatory prefix, consuming it. ModRM is read only if the selected handler wants it.
    MandatoryPrefix_MaybeModRM([HandlerId; 4]),
    /// by the VEX/XOP/EVEX `pp` field. nothing to consume.
    MandatoryPrefix2([HandlerId; 4]),
    MandatoryPrefix2_NoModRM([HandlerId; 4]),
    /// by `mod == 3` and then by mandatory prefix. the prefix is consumed unless `flags` says
    /// that slot keeps it.
    MandatoryPrefix3 { reg: [HandlerId; 4], mem: [HandlerId; 4], flags: LegacyHandlerFlags },
    /// `F3` and `F2` select, anything else (including `66`) takes `normal`. ModRM is read after
    /// selection, and only if the selected handler wants it.
    MandatoryPrefix_F3_F2 { normal: HandlerId, f3: HandlerId, clear_f3: bool, f2: HandlerId, clear_f2: bool },
    VectorLength_VEX([HandlerId; 4]),
    VectorLength_NoModRM_VEX([HandlerId; 4]),
    VectorLength_EVEX([HandlerId; 4]),
    /// like `VectorLength_EVEX`, but a register form with EVEX.b set always takes the 512-bit
    /// slot: L'L is the rounding mode there, not a vector length.
    VectorLength_EVEX_er([HandlerId; 4]),
    W { w0: HandlerId, w1: HandlerId },
    RM { reg: HandlerId, mem: HandlerId },
    /// the first entry whose options intersect the decoder's wins, else `default`. ModRM is
    /// read after selection, if the selected handler wants it.
    Options { default: HandlerId, options: Box<[(HandlerId, DecoderOptions)]> },
    /// as `Options`, but ModRM has already been read.
    Options_DontReadModRM { default: HandlerId, options: Box<[(HandlerId, DecoderOptions)]> },
    ReservedNop { reserved_nop: HandlerId, other: HandlerId },
    /// by 64-bit mode. ModRM is read after selection, if the selected handler wants it.
    Bitness { h16_32: HandlerId, h64: HandlerId },
    Bitness_DontReadModRM { h16_32: HandlerId, h64: HandlerId },
    /// `C5`: two-byte VEX. outside 64-bit mode, `mod != 3` is the legacy instruction instead.
    Vex2 { fallback: HandlerId },
    /// `C4`: three-byte VEX, with the same fallback rule as `Vex2`.
    Vex3 { fallback: HandlerId },
    /// `8F`: XOP, unless the map select field is below 8 (`pop Ev`).
    Xop { fallback: HandlerId },
    /// `62`: EVEX, with the same fallback rule as `Vex2`.
    Evex { fallback: HandlerId },
}

impl Selector {
    /// `VectorLength_VEX` with the 512-bit and unknown slots invalid.
    pub(crate) fn vector_length_vex(l128: HandlerId, l256: HandlerId) -> Selector {
        Selector::VectorLength_VEX([l128, l256, HandlerId::INVALID, HandlerId::INVALID])
    }

    pub(crate) fn vector_length_no_modrm_vex(l128: HandlerId, l256: HandlerId) -> Selector {
        Selector::VectorLength_NoModRM_VEX([l128, l256, HandlerId::INVALID_NO_MODRM, HandlerId::INVALID_NO_MODRM])
    }

    /// `VectorLength_EVEX` with the unknown slot invalid.
    pub(crate) fn vector_length_evex(l128: HandlerId, l256: HandlerId, l512: HandlerId) -> Selector {
        Selector::VectorLength_EVEX([l128, l256, l512, HandlerId::INVALID])
    }

    pub(crate) fn vector_length_evex_er(l128: HandlerId, l256: HandlerId, l512: HandlerId) -> Selector {
        Selector::VectorLength_EVEX_er([l128, l256, l512, HandlerId::INVALID])
    }

    /// `MandatoryPrefix2` where only the no-prefix form is defined.
    pub(crate) fn mandatory_prefix2(none: HandlerId) -> Selector {
        Selector::MandatoryPrefix2([none, HandlerId::INVALID, HandlerId::INVALID, HandlerId::INVALID])
    }

    pub(crate) fn has_modrm(&self) -> bool {
        use Selector::*;
        !matches!(
            self,
            AnotherTable(_)
                | MandatoryPrefix_NoModRM(_)
                | MandatoryPrefix_MaybeModRM(_)
                | MandatoryPrefix2_NoModRM(_)
                | MandatoryPrefix_F3_F2 { .. }
                | VectorLength_NoModRM_VEX(_)
                | Options { .. }
                | Bitness { .. }
        )
    }

    pub(crate) fn children(&self) -> Vec<(HandlerId, ChildRead)> {
        use Selector::*;

        fn same(ids: &[HandlerId]) -> Vec<(HandlerId, ChildRead)> {
            ids.iter().map(|id| (*id, ChildRead::Same)).collect()
        }
        fn deferred(ids: &[HandlerId]) -> Vec<(HandlerId, ChildRead)> {
            ids.iter().map(|id| (*id, ChildRead::Deferred)).collect()
        }

        match self {
            Group(ids) => same(ids),
            Group8x8 { low, high } => {
                let mut children = same(low);
                children.extend(same(high));
                children
            }
            Group8x64 { low, high } => {
                let mut children = same(low);
                children.extend(high.iter().flatten().map(|id| (*id, ChildRead::Same)));
                children
            }
            AnotherTable(_) => Vec::new(),
            MandatoryPrefix(ids)
            | MandatoryPrefix_NoModRM(ids)
            | MandatoryPrefix2(ids)
            | MandatoryPrefix2_NoModRM(ids)
            | VectorLength_VEX(ids)
            | VectorLength_NoModRM_VEX(ids)
            | VectorLength_EVEX(ids)
            | VectorLength_EVEX_er(ids) => same(ids),
            MandatoryPrefix_MaybeModRM(ids) => deferred(ids),
            MandatoryPrefix3 { reg, mem, .. } => {
                let mut children = same(reg);
                children.extend(same(mem));
                children
            }
            MandatoryPrefix_F3_F2 { normal, f3, f2, .. } => deferred(&[*normal, *f3, *f2]),
            W { w0, w1 } => same(&[*w0, *w1]),
            RM { reg, mem } => same(&[*reg, *mem]),
            Options { default, options } => {
                let mut children = deferred(&[*default]);
                children.extend(options.iter().map(|(id, _)| (*id, ChildRead::Deferred)));
                children
            }
            Options_DontReadModRM { default, options } => {
                let mut children = same(&[*default]);
                children.extend(options.iter().map(|(id, _)| (*id, ChildRead::Same)));
                children
            }
            ReservedNop { reserved_nop, other } => same(&[*reserved_nop, *other]),
            Bitness { h16_32, h64 } => deferred(&[*h16_32, *h64]),
            Bitness_DontReadModRM { h16_32, h64 } => same(&[*h16_32, *h64]),
            Vex2 { fallback } | Vex3 { fallback } | Xop { fallback } | Evex { fallback } => same(&[*fallback]),
        }
    }

    pub(crate) fn decode<T: Reader<u64, u8>>(&self, cx: &mut DecodeCx<T>) {
        use Selector::*;

        match self {
            Group(ids) => cx.decode_child(ids[cx.state.reg as usize]),
            Group8x8 { low, high } => {
                let ids = if cx.state.mod_ == 3 { high } else { low };
                cx.decode_child(ids[cx.state.reg as usize]);
            }
            Group8x64 { low, high } => {
                let id = if cx.state.mod_ == 3 {
                    high[(cx.state.modrm & 0x3f) as usize].unwrap_or(low[cx.state.reg as usize])
                } else {
                    low[cx.state.reg as usize]
                };
                cx.decode_child(id);
            }
            AnotherTable(map) => cx.decode_table(*map),
            MandatoryPrefix(ids) | MandatoryPrefix_NoModRM(ids) => {
                cx.clear_mandatory_prefix();
                cx.decode_child(ids[cx.state.mandatory_prefix as usize]);
            }
            MandatoryPrefix_MaybeModRM(ids) => {
                cx.clear_mandatory_prefix();
                cx.decode_handler(ids[cx.state.mandatory_prefix as usize]);
            }
            MandatoryPrefix2(ids) | MandatoryPrefix2_NoModRM(ids) => {
                cx.decode_child(ids[cx.state.mandatory_prefix as usize]);
            }
            MandatoryPrefix3 { reg, mem, flags } => {
                let prefix = cx.state.mandatory_prefix;
                let (ids, keep) = if cx.state.mod_ == 3 {
                    (reg, [
                        LegacyHandlerFlags::HANDLER_REG,
                        LegacyHandlerFlags::HANDLER_66_REG,
                        LegacyHandlerFlags::HANDLER_F3_REG,
                        LegacyHandlerFlags::HANDLER_F2_REG,
                    ])
                } else {
                    (mem, [
                        LegacyHandlerFlags::HANDLER_MEM,
                        LegacyHandlerFlags::HANDLER_66_MEM,
                        LegacyHandlerFlags::HANDLER_F3_MEM,
                        LegacyHandlerFlags::HANDLER_F2_MEM,
                    ])
                };
                if !flags.contains(keep[prefix as usize]) {
                    cx.clear_mandatory_prefix();
                }
                cx.decode_child(ids[prefix as usize]);
            }
            MandatoryPrefix_F3_F2 { normal, f3, clear_f3, f2, clear_f2 } => {
                let id = match cx.state.mandatory_prefix {
                    Prefix::PF3 => {
                        if *clear_f3 {
                            cx.clear_mandatory_prefix_f3();
                        }
                        *f3
                    }
                    Prefix::PF2 => {
                        if *clear_f2 {
                            cx.clear_mandatory_prefix_f2();
                        }
                        *f2
                    }
                    Prefix::None | Prefix::P66 => *normal,
                };
                cx.decode_handler(id);
            }
            VectorLength_VEX(ids) | VectorLength_NoModRM_VEX(ids) | VectorLength_EVEX(ids) => {
                cx.decode_child(ids[cx.state.vector_length as usize]);
            }
            VectorLength_EVEX_er(ids) => {
                let index = if cx.state.mod_ == 3 && cx.state.b() {
                    VectorLength::L512
                } else {
                    cx.state.vector_length
                };
                cx.decode_child(ids[index as usize]);
            }
            W { w0, w1 } => cx.decode_child(if cx.state.w() { *w1 } else { *w0 }),
            RM { reg, mem } => cx.decode_child(if cx.state.mod_ == 3 { *reg } else { *mem }),
            Options { default, options } => {
                let id = select_option(cx.options(), *default, options);
                cx.decode_handler(id);
            }
            Options_DontReadModRM { default, options } => {
                let id = select_option(cx.options(), *default, options);
                cx.decode_child(id);
            }
            ReservedNop { reserved_nop, other } => {
                let force = cx.options().contains(DecoderOptions::FORCE_RESERVED_NOP);
                cx.decode_child(if force { *reserved_nop } else { *other });
            }
            Bitness { h16_32, h64 } => cx.decode_handler(if cx.is64() { *h64 } else { *h16_32 }),
            Bitness_DontReadModRM { h16_32, h64 } => cx.decode_child(if cx.is64() { *h64 } else { *h16_32 }),
            Vex2 { fallback } => {
                if cx.is64() || cx.state.mod_ == 3 {
                    cx.vex2();
                } else {
                    cx.decode_child(*fallback);
                }
            }
            Vex3 { fallback } => {
                if cx.is64() || cx.state.mod_ == 3 {
                    cx.vex3();
                } else {
                    cx.decode_child(*fallback);
                }
            }
            Xop { fallback } => {
                if cx.state.modrm & 0x1f < 8 {
                    cx.decode_child(*fallback);
                } else {
                    cx.xop();
                }
            }
            Evex { fallback } => {
                if cx.is64() || cx.state.mod_ == 3 {
                    cx.evex();
                } else {
                    cx.decode_child(*fallback);
                }
            }
        }
    }
}

fn select_option(decoder_options: DecoderOptions, default: HandlerId, options: &[(HandlerId, DecoderOptions)]) -> HandlerId {
    options
        .iter()
        .find(|(_, mask)| decoder_options.intersects(*mask))
        .map(|(id, _)| *id)
        .unwrap_or(default)
}

#[cfg(test)]
mod test {
    use super::Selector;
    use crate::handlers::test::decode_with;
    use crate::handlers::{Handler, HandlerFlags, HandlerId, Legacy, LegacyHandlerFlags};
    use crate::tables::{OpcodeMap, TableBuilder};
    use crate::{Code, DecoderOptions, InstDecoder, Operand, Prefixes, Register};

    fn leaf_modrm(builder: &mut TableBuilder, code: Code) -> HandlerId {
        builder.add(Handler::Legacy(Legacy::SimpleModRM(code)))
    }

    fn leaf(builder: &mut TableBuilder, code: Code) -> HandlerId {
        builder.add(Handler::Legacy(Legacy::Simple(code)))
    }

    #[test]
    fn mandatory_prefix_selects_by_ordinal_and_consumes() {
        let mut builder = TableBuilder::new();
        let none = builder.add(Handler::Legacy(Legacy::Ev {
            codes: [Code::Not_rm16, Code::Not_rm32, Code::Not_rm64],
            flags: HandlerFlags::empty(),
        }));
        let p66 = builder.add(Handler::Legacy(Legacy::Ev {
            codes: [Code::Neg_rm16, Code::Neg_rm32, Code::Neg_rm64],
            flags: HandlerFlags::empty(),
        }));
        let pf3 = leaf_modrm(&mut builder, Code::Pause);
        let pf2 = leaf_modrm(&mut builder, Code::Nopd);
        let sel = builder.add(Handler::Select(Selector::MandatoryPrefix([none, p66, pf3, pf2])));
        builder.set(OpcodeMap::Legacy, 0xd6, sel);
        let tables = builder.build();
        let decoder = InstDecoder::x86_64();

        let inst = decode_with(&decoder, &tables, &[0xd6, 0xc0]);
        assert_eq!(inst.code(), Code::Not_rm32);

        // the 66 selected the handler, so it no longer shrinks the operand.
        let inst = decode_with(&decoder, &tables, &[0x66, 0xd6, 0xc0]);
        assert_eq!(inst.code(), Code::Neg_rm32);
        assert_eq!(inst.operand(0), Operand::Register(Register::EAX));

        let inst = decode_with(&decoder, &tables, &[0xf3, 0xd6, 0xc0]);
        assert_eq!(inst.code(), Code::Pause);
        assert!(!inst.prefixes().contains(Prefixes::REPE));

        let inst = decode_with(&decoder, &tables, &[0xf2, 0xd6, 0xc0]);
        assert_eq!(inst.code(), Code::Nopd);
        assert!(!inst.prefixes().contains(Prefixes::REPNE));

        // the last of f2/f3 is the mandatory prefix
        let inst = decode_with(&decoder, &tables, &[0xf2, 0xf3, 0xd6, 0xc0]);
        assert_eq!(inst.code(), Code::Pause);
    }

    #[test]
    fn mandatory_prefix3_keeps_flagged_slots() {
        let mut builder = TableBuilder::new();
        let ids: Vec<HandlerId> = [Code::Nopw, Code::Nopd, Code::Nopq, Code::Pause]
            .iter()
            .map(|code| leaf_modrm(&mut builder, *code))
            .collect();
        let sel = builder.add(Handler::Select(Selector::MandatoryPrefix3 {
            reg: [ids[0], ids[1], ids[2], ids[3]],
            mem: [ids[3], ids[2], ids[1], ids[0]],
            flags: LegacyHandlerFlags::HANDLER_F3_REG,
        }));
        builder.set(OpcodeMap::Legacy, 0xd6, sel);
        let tables = builder.build();
        let decoder = InstDecoder::x86_64();

        let inst = decode_with(&decoder, &tables, &[0xf3, 0xd6, 0xc0]);
        assert_eq!(inst.code(), Code::Nopq);
        assert!(inst.prefixes().contains(Prefixes::REPE));

        let inst = decode_with(&decoder, &tables, &[0xf3, 0xd6, 0x00]);
        assert_eq!(inst.code(), Code::Nopd);
        assert!(!inst.prefixes().contains(Prefixes::REPE));
    }

    #[test]
    fn f3_f2_reads_modrm_after_selection() {
        let mut builder = TableBuilder::new();
        let normal = leaf(&mut builder, Code::Nopd);
        let f3 = leaf_modrm(&mut builder, Code::Pause);
        let f2 = leaf_modrm(&mut builder, Code::Nopw);
        let sel = builder.add(Handler::Select(Selector::MandatoryPrefix_F3_F2 {
            normal,
            f3,
            clear_f3: true,
            f2,
            clear_f2: false,
        }));
        builder.set(OpcodeMap::Legacy, 0xd6, sel);
        let tables = builder.build();
        let decoder = InstDecoder::x86_64();

        let inst = decode_with(&decoder, &tables, &[0xd6, 0xc0]);
        assert_eq!((inst.code(), inst.length()), (Code::Nopd, 1));
        // 66 is not one of the selecting prefixes
        let inst = decode_with(&decoder, &tables, &[0x66, 0xd6, 0xc0]);
        assert_eq!((inst.code(), inst.length()), (Code::Nopd, 2));

        let inst = decode_with(&decoder, &tables, &[0xf3, 0xd6, 0xc0]);
        assert_eq!((inst.code(), inst.length()), (Code::Pause, 3));
        assert!(!inst.prefixes().contains(Prefixes::REPE));

        let inst = decode_with(&decoder, &tables, &[0xf2, 0xd6, 0xc0]);
        assert_eq!((inst.code(), inst.length()), (Code::Nopw, 3));
        assert!(inst.prefixes().contains(Prefixes::REPNE));
    }

    #[test]
    fn group8x64_falls_back_to_reg_table() {
        let mut builder = TableBuilder::new();
        let low_codes = [
            Code::Nopw, Code::Nopd, Code::Nopq, Code::Pause,
            Code::Nopw, Code::Nopd, Code::Nopq, Code::Pause,
        ];
        let mut low = [HandlerId::INVALID; 8];
        for (slot, code) in low.iter_mut().zip(low_codes.iter()) {
            *slot = leaf_modrm(&mut builder, *code);
        }
        let special = leaf_modrm(&mut builder, Code::Swapgs);
        let mut high = Box::new([None; 64]);
        high[0x10] = Some(special);
        let sel = builder.add(Handler::Select(Selector::Group8x64 { low, high }));
        builder.set(OpcodeMap::Legacy, 0xd6, sel);
        let tables = builder.build();
        let decoder = InstDecoder::x86_64();

        assert_eq!(decode_with(&decoder, &tables, &[0xd6, 0xd0]).code(), Code::Swapgs);
        // same reg, different rm: no high entry
        assert_eq!(decode_with(&decoder, &tables, &[0xd6, 0xd1]).code(), Code::Nopq);
        // same low six bits, but a memory form
        assert_eq!(decode_with(&decoder, &tables, &[0xd6, 0x10]).code(), Code::Nopq);
    }

    #[test]
    fn options_take_first_match_in_order() {
        let mut builder = TableBuilder::new();
        let default = leaf(&mut builder, Code::Nopw);
        let amd = leaf(&mut builder, Code::Nopd);
        let either = leaf(&mut builder, Code::Nopq);
        let sel = builder.add(Handler::Select(Selector::Options {
            default,
            options: vec![
                (amd, DecoderOptions::AMD),
                (either, DecoderOptions::AMD | DecoderOptions::NO_PAUSE),
            ]
            .into_boxed_slice(),
        }));
        builder.set(OpcodeMap::Legacy, 0xd6, sel);
        let tables = builder.build();

        let code = |options: DecoderOptions| {
            let decoder = InstDecoder::x86_64().with_options(options);
            decode_with(&decoder, &tables, &[0xd6]).code()
        };
        assert_eq!(code(DecoderOptions::empty()), Code::Nopw);
        assert_eq!(code(DecoderOptions::AMD | DecoderOptions::NO_PAUSE), Code::Nopd);
        assert_eq!(code(DecoderOptions::NO_PAUSE), Code::Nopq);
    }

    #[test]
    fn bitness_reads_modrm_only_for_selected_handler() {
        let mut builder = TableBuilder::new();
        let legacy = leaf(&mut builder, Code::Nopd);
        let long = leaf_modrm(&mut builder, Code::Swapgs);
        let sel = builder.add(Handler::Select(Selector::Bitness { h16_32: legacy, h64: long }));
        builder.set(OpcodeMap::Legacy, 0xd6, sel);
        let tables = builder.build();

        let inst = decode_with(&InstDecoder::x86_32(), &tables, &[0xd6, 0xf8]);
        assert_eq!((inst.code(), inst.length()), (Code::Nopd, 1));
        let inst = decode_with(&InstDecoder::x86_64(), &tables, &[0xd6, 0xf8]);
        assert_eq!((inst.code(), inst.length()), (Code::Swapgs, 2));
    }

    #[test]
    fn reserved_nop_and_rm() {
        let mut builder = TableBuilder::new();
        let nop = leaf_modrm(&mut builder, Code::Nopd);
        let reg = leaf_modrm(&mut builder, Code::Nopw);
        let mem = leaf_modrm(&mut builder, Code::Nopq);
        let rm = builder.add(Handler::Select(Selector::RM { reg, mem }));
        let sel = builder.add(Handler::Select(Selector::ReservedNop { reserved_nop: nop, other: rm }));
        builder.set(OpcodeMap::Legacy, 0xd6, sel);
        let tables = builder.build();

        let decoder = InstDecoder::x86_64();
        assert_eq!(decode_with(&decoder, &tables, &[0xd6, 0xc0]).code(), Code::Nopw);
        assert_eq!(decode_with(&decoder, &tables, &[0xd6, 0x00]).code(), Code::Nopq);
        let forced = decoder.with_options(DecoderOptions::FORCE_RESERVED_NOP);
        assert_eq!(decode_with(&forced, &tables, &[0xd6, 0xc0]).code(), Code::Nopd);
    }

    /// `62 f1 7c xx`: EVEX, map 0F, W0, no vvvv, pp=none, with P2 supplied by the caller.
    fn evex_bytes(p2: u8) -> [u8; 6] {
        [0x62, 0xf1, 0x7c, p2, 0x10, 0xc0]
    }

    #[test]
    fn vector_length_selects_by_ordinal() {
        let mut builder = TableBuilder::new();
        let ids: Vec<HandlerId> = [Code::Nopw, Code::Nopd, Code::Nopq, Code::Pause]
            .iter()
            .map(|code| leaf_modrm(&mut builder, *code))
            .collect();
        let sel = builder.add(Handler::Select(Selector::VectorLength_EVEX([ids[0], ids[1], ids[2], ids[3]])));
        builder.set(OpcodeMap::Evex0F, 0x10, sel);
        let evex = builder.add(Handler::Select(Selector::Evex { fallback: HandlerId::INVALID }));
        builder.set(OpcodeMap::Legacy, 0x62, evex);
        let tables = builder.build();
        let decoder = InstDecoder::x86_64();

        for (ll, code) in [(0u8, Code::Nopw), (1, Code::Nopd), (2, Code::Nopq), (3, Code::Pause)] {
            let inst = decode_with(&decoder, &tables, &evex_bytes(0x08 | (ll << 5)));
            assert_eq!(inst.code(), code, "L'L = {}", ll);
            assert_eq!(inst.length(), 6);
        }
    }

    #[test]
    fn vector_length_er_forces_512_for_rounding() {
        let mut builder = TableBuilder::new();
        let l128 = leaf_modrm(&mut builder, Code::Nopw);
        let l256 = leaf_modrm(&mut builder, Code::Nopd);
        let l512 = leaf_modrm(&mut builder, Code::Nopq);
        let plain = builder.add(Handler::Select(Selector::vector_length_evex(l128, l256, l512)));
        let er = builder.add(Handler::Select(Selector::vector_length_evex_er(l128, l256, l512)));
        builder.set(OpcodeMap::Evex0F, 0x10, plain);
        builder.set(OpcodeMap::Evex0F, 0x11, er);
        let evex = builder.add(Handler::Select(Selector::Evex { fallback: HandlerId::INVALID }));
        builder.set(OpcodeMap::Legacy, 0x62, evex);
        let tables = builder.build();
        let decoder = InstDecoder::x86_64();

        // L'L = 00 with b set, register form
        let mut bytes = evex_bytes(0x18);
        assert_eq!(decode_with(&decoder, &tables, &bytes).code(), Code::Nopw);
        bytes[4] = 0x11;
        assert_eq!(decode_with(&decoder, &tables, &bytes).code(), Code::Nopq);
        // a memory form keeps the encoded length
        bytes[5] = 0x00;
        assert_eq!(decode_with(&decoder, &tables, &bytes).code(), Code::Nopw);
        // L'L = 11 without b is the unknown slot
        let bytes = evex_bytes(0x68);
        assert_eq!(decode_with(&decoder, &tables, &bytes).code(), Code::INVALID);
    }

    #[test]
    fn vex_length_and_w_selectors() {
        let mut builder = TableBuilder::new();
        let w0 = leaf_modrm(&mut builder, Code::Nopw);
        let w1 = leaf_modrm(&mut builder, Code::Nopd);
        let l256 = leaf_modrm(&mut builder, Code::Nopq);
        let w = builder.add(Handler::Select(Selector::W { w0, w1 }));
        let sel = builder.add(Handler::Select(Selector::vector_length_vex(w, l256)));
        builder.set(OpcodeMap::Vex0F, 0x10, sel);
        let vex2 = builder.add(Handler::Select(Selector::Vex2 { fallback: HandlerId::INVALID }));
        let vex3 = builder.add(Handler::Select(Selector::Vex3 { fallback: HandlerId::INVALID }));
        builder.set(OpcodeMap::Legacy, 0xc5, vex2);
        builder.set(OpcodeMap::Legacy, 0xc4, vex3);
        let tables = builder.build();
        let decoder = InstDecoder::x86_64();

        assert_eq!(decode_with(&decoder, &tables, &[0xc5, 0xf8, 0x10, 0xc0]).code(), Code::Nopw);
        assert_eq!(decode_with(&decoder, &tables, &[0xc5, 0xfc, 0x10, 0xc0]).code(), Code::Nopq);
        assert_eq!(decode_with(&decoder, &tables, &[0xc4, 0xe1, 0xf8, 0x10, 0xc0]).code(), Code::Nopd);
        // a legacy prefix before vex is invalid
        assert_eq!(decode_with(&decoder, &tables, &[0x66, 0xc5, 0xf8, 0x10, 0xc0]).code(), Code::INVALID);
    }

    #[test]
    fn vex_falls_back_to_legacy_outside_long_mode() {
        let mut builder = TableBuilder::new();
        let lds = builder.add(Handler::Legacy(Legacy::Gv_Mp([Code::Lds_r16_m1616, Code::Lds_r32_m1632, Code::INVALID])));
        let vex_leaf = leaf_modrm(&mut builder, Code::Nopd);
        builder.set(OpcodeMap::Vex0F, 0x10, vex_leaf);
        let vex2 = builder.add(Handler::Select(Selector::Vex2 { fallback: lds }));
        builder.set(OpcodeMap::Legacy, 0xc5, vex2);
        let tables = builder.build();
        let decoder = InstDecoder::x86_32();

        let inst = decode_with(&decoder, &tables, &[0xc5, 0x00]);
        assert_eq!(inst.code(), Code::Lds_r32_m1632);
        assert_eq!(inst.length(), 2);
        let inst = decode_with(&decoder, &tables, &[0xc5, 0xf8, 0x10, 0xc0]);
        assert_eq!(inst.code(), Code::Nopd);
    }
}
