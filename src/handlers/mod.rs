//! opcode handlers.
//!
//! every table slot holds a [`Handler`]. a handler either finishes decoding an instruction (a
//! leaf: it picks the `Code`, fills operands, and reads any immediate bytes), or picks another
//! handler by some part of decoder state and hands off to it (a selector). leaves are split by
//! encoding into [`legacy::Legacy`], [`vex::Vex`] and [`evex::Evex`]; selectors are in
//! [`selectors::Selector`].
//!
//! handlers live in one arena owned by [`crate::tables::Tables`] and refer to each other by
//! [`HandlerId`]. a handler can only refer to handlers added before it, so the handler graph is
//! acyclic by construction.

use bitflags::bitflags;
use yaxpeax_arch::Reader;

use crate::decoder::DecodeCx;

pub(crate) mod evex;
pub(crate) mod legacy;
pub(crate) mod selectors;
pub(crate) mod vex;

pub(crate) use evex::Evex;
pub(crate) use legacy::Legacy;
pub(crate) use selectors::Selector;
pub(crate) use vex::Vex;

/// index of a handler in the table arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct HandlerId(pub(crate) u16);

impl HandlerId {
    /// the shared `Invalid` sentinel. always present, reads ModRM.
    pub(crate) const INVALID: HandlerId = HandlerId(0);
    /// the shared `InvalidNoModRM` sentinel.
    pub(crate) const INVALID_NO_MODRM: HandlerId = HandlerId(1);
}

bitflags! {
    /// per-leaf flags for lock and hle prefix handling.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
    pub(crate) struct HandlerFlags: u32 {
        const XACQUIRE = 1 << 0;
        const XRELEASE = 1 << 1;
        /// `F2`/`F3` mean xacquire/xrelease even without a lock prefix (`mov [mem], reg`)
        const XACQUIRE_RELEASE_NO_LOCK = 1 << 2;
        /// the memory form of this instruction may take a lock prefix.
        const LOCK = 1 << 3;
    }
}

bitflags! {
    /// which slots of a `MandatoryPrefix3` selector keep the mandatory prefix instead of
    /// clearing it.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
    pub(crate) struct LegacyHandlerFlags: u32 {
        const HANDLER_REG = 1 << 0;
        const HANDLER_MEM = 1 << 1;
        const HANDLER_66_REG = 1 << 2;
        const HANDLER_66_MEM = 1 << 3;
        const HANDLER_F3_REG = 1 << 4;
        const HANDLER_F3_MEM = 1 << 5;
        const HANDLER_F2_REG = 1 << 6;
        const HANDLER_F2_MEM = 1 << 7;
    }
}

/// one node in a decode tree.
#[derive(Debug, Clone)]
pub(crate) enum Handler {
    /// the encoding is undefined. ModRM has been read.
    Invalid,
    /// the encoding is undefined, and has no ModRM byte.
    InvalidNoModRM,
    Select(Selector),
    Legacy(Legacy),
    Vex(Vex),
    Evex(Evex),
}

/// how a selector hands control to a child.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ChildRead {
    /// the child runs with whatever ModRM state the parent had, so the two must agree on
    /// whether ModRM has been read.
    Same,
    /// the child's ModRM byte is read (or not) after it is selected.
    Deferred,
}

impl Handler {
    /// does the parent need to read a ModRM byte before calling `decode`?
    pub(crate) fn has_modrm(&self) -> bool {
        match self {
            Handler::Invalid => true,
            Handler::InvalidNoModRM => false,
            Handler::Select(s) => s.has_modrm(),
            Handler::Legacy(l) => l.has_modrm(),
            Handler::Vex(v) => v.has_modrm(),
            Handler::Evex(_) => true,
        }
    }

    /// every handler this one can delegate to. only used while building tables.
    pub(crate) fn children(&self) -> Vec<(HandlerId, ChildRead)> {
        match self {
            Handler::Select(s) => s.children(),
            _ => Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn decode<T: Reader<u64, u8>>(&self, cx: &mut DecodeCx<T>) {
        match self {
            Handler::Invalid | Handler::InvalidNoModRM => cx.set_invalid_instruction(),
            Handler::Select(s) => s.decode(cx),
            Handler::Legacy(l) => l.decode(cx),
            Handler::Vex(v) => v.decode(cx),
            Handler::Evex(e) => e.decode(cx),
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use yaxpeax_arch::U8Reader;

    use super::{Handler, HandlerFlags, HandlerId};
    use crate::tables::{OpcodeMap, TableBuilder, Tables};
    use crate::{Code, InstDecoder, Instruction, Operand, Register};
    use crate::handlers::Legacy;

    pub(crate) fn decode_with(decoder: &InstDecoder, tables: &Tables, bytes: &[u8]) -> Instruction {
        let mut inst = Instruction::default();
        decoder
            .decode_with_tables(tables, &mut inst, &mut U8Reader::new(bytes))
            .expect("input is long enough");
        inst
    }

    #[test]
    fn invalid_sentinel_sets_no_operands() {
        let mut builder = TableBuilder::new();
        builder.set(OpcodeMap::Legacy, 0x00, HandlerId::INVALID);
        builder.set(OpcodeMap::Legacy, 0x01, HandlerId::INVALID_NO_MODRM);
        let tables = builder.build();
        let decoder = InstDecoder::x86_64();

        let inst = decode_with(&decoder, &tables, &[0x00, 0xc0]);
        assert_eq!(inst.code(), Code::INVALID);
        assert_eq!(inst.operand_count(), 0);
        assert_eq!(inst.length(), 2);

        let inst = decode_with(&decoder, &tables, &[0x01, 0xc0]);
        assert_eq!(inst.code(), Code::INVALID);
        assert_eq!(inst.operand_count(), 0);
        assert_eq!(inst.length(), 1);
    }

    #[test]
    fn sentinels_are_preallocated() {
        let builder = TableBuilder::new();
        let tables = builder.build();
        assert!(matches!(tables.handler(HandlerId::INVALID), Handler::Invalid));
        assert!(matches!(tables.handler(HandlerId::INVALID_NO_MODRM), Handler::InvalidNoModRM));
        assert!(tables.handler(HandlerId::INVALID).has_modrm());
        assert!(!tables.handler(HandlerId::INVALID_NO_MODRM).has_modrm());
    }

    #[test]
    fn ev_register_width_follows_operand_size() {
        let mut builder = TableBuilder::new();
        let ev = builder.add(Handler::Legacy(Legacy::Ev {
            codes: [Code::Not_rm16, Code::Not_rm32, Code::Not_rm64],
            flags: HandlerFlags::empty(),
        }));
        builder.set(OpcodeMap::Legacy, 0xf7, ev);
        let tables = builder.build();
        let decoder = InstDecoder::x86_64();

        let cases: &[(&[u8], Code, Register)] = &[
            (&[0x66, 0xf7, 0xc0], Code::Not_rm16, Register::AX),
            (&[0xf7, 0xc0], Code::Not_rm32, Register::EAX),
            (&[0x48, 0xf7, 0xc0], Code::Not_rm64, Register::RAX),
            (&[0x66, 0x41, 0xf7, 0xc0], Code::Not_rm16, Register::R8W),
            (&[0x41, 0xf7, 0xc0], Code::Not_rm32, Register::R8D),
            (&[0x49, 0xf7, 0xc0], Code::Not_rm64, Register::R8),
        ];
        for (bytes, code, reg) in cases {
            let inst = decode_with(&decoder, &tables, bytes);
            assert_eq!(inst.code(), *code, "{:02x?}", bytes);
            assert_eq!(inst.operands(), &[Operand::Register(*reg)], "{:02x?}", bytes);
        }
    }

    #[test]
    fn ev_mod_partitions_register_and_memory() {
        let mut builder = TableBuilder::new();
        let ev = builder.add(Handler::Legacy(Legacy::Ev {
            codes: [Code::Not_rm16, Code::Not_rm32, Code::Not_rm64],
            flags: HandlerFlags::empty(),
        }));
        builder.set(OpcodeMap::Legacy, 0xf7, ev);
        let tables = builder.build();
        let decoder = InstDecoder::x86_64();

        // mod=3 reads nothing past ModRM; mod=0/1/2 always go through the memory reader.
        let inst = decode_with(&decoder, &tables, &[0xf7, 0xc1, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(inst.length(), 2);
        assert!(matches!(inst.operand(0), Operand::Register(Register::ECX)));

        for (bytes, len) in [(&[0xf7, 0x01][..], 2), (&[0xf7, 0x41, 0x10][..], 3), (&[0xf7, 0x81, 0x10, 0, 0, 0][..], 6)] {
            let inst = decode_with(&decoder, &tables, bytes);
            assert_eq!(inst.length(), len);
            match inst.operand(0) {
                Operand::Memory(mem) => assert_eq!(mem.base, Register::RCX),
                other => panic!("expected memory operand, got {:?}", other),
            }
        }
    }
}
