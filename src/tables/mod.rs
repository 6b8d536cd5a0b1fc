//! the opcode tables: one arena of handlers, and one 256-entry array of handler ids per opcode
//! map.
//!
//! tables are built once, by [`TableBuilder`], the first time anything decodes. the builder
//! checks that the handler graph is well formed as it goes; a malformed table is a bug in this
//! crate and panics at construction rather than misdecoding later.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::handlers::{ChildRead, Evex, Handler, HandlerId, Legacy, Selector, Vex};

mod evex;
mod legacy;
mod vex;

/// an opcode map: the table an opcode byte is looked up in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum OpcodeMap {
    Legacy,
    Map0F,
    Map0F38,
    Map0F3A,
    Vex0F,
    Vex0F38,
    Vex0F3A,
    Evex0F,
    Evex0F38,
    Evex0F3A,
    Xop8,
    Xop9,
    XopA,
}

const MAP_COUNT: usize = 13;

pub(crate) struct Tables {
    handlers: Vec<Handler>,
    maps: Vec<[HandlerId; 256]>,
}

impl Tables {
    #[inline]
    pub(crate) fn handler(&self, id: HandlerId) -> &Handler {
        &self.handlers[id.0 as usize]
    }

    #[inline]
    pub(crate) fn entry(&self, map: OpcodeMap, b: u8) -> HandlerId {
        self.maps[map as usize][b as usize]
    }

    #[cfg(test)]
    pub(crate) fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

/// the decoder's tables.
pub(crate) static TABLES: Lazy<Tables> = Lazy::new(|| {
    let mut builder = TableBuilder::new();
    legacy::build(&mut builder);
    vex::build(&mut builder);
    evex::build(&mut builder);
    builder.build()
});

pub(crate) struct TableBuilder {
    handlers: Vec<Handler>,
    maps: Vec<[HandlerId; 256]>,
}

impl TableBuilder {
    /// an empty set of tables: every slot of every map is `Invalid`.
    pub(crate) fn new() -> TableBuilder {
        TableBuilder {
            handlers: vec![Handler::Invalid, Handler::InvalidNoModRM],
            maps: vec![[HandlerId::INVALID; 256]; MAP_COUNT],
        }
    }

    /// add `handler` to the arena.
    ///
    /// panics if `handler` refers to a handler that has not been added yet, or if a child that
    /// shares its parent's ModRM state disagrees with the parent about reading ModRM.
    pub(crate) fn add(&mut self, handler: Handler) -> HandlerId {
        let has_modrm = handler.has_modrm();
        for (child, read) in handler.children() {
            let child = self
                .handlers
                .get(child.0 as usize)
                .unwrap_or_else(|| panic!("handler {:?} refers to unknown handler {:?}", handler, child));
            if read == ChildRead::Same {
                assert_eq!(
                    child.has_modrm(),
                    has_modrm,
                    "ModRM mismatch between {:?} and its child {:?}",
                    handler,
                    child
                );
            }
        }
        assert!(self.handlers.len() < u16::MAX as usize, "too many handlers");
        let id = HandlerId(self.handlers.len() as u16);
        self.handlers.push(handler);
        id
    }

    pub(crate) fn legacy(&mut self, leaf: Legacy) -> HandlerId {
        self.add(Handler::Legacy(leaf))
    }

    pub(crate) fn select(&mut self, selector: Selector) -> HandlerId {
        self.add(Handler::Select(selector))
    }

    pub(crate) fn vex(&mut self, leaf: Vex) -> HandlerId {
        self.add(Handler::Vex(leaf))
    }

    pub(crate) fn evex(&mut self, leaf: Evex) -> HandlerId {
        self.add(Handler::Evex(leaf))
    }

    pub(crate) fn set(&mut self, map: OpcodeMap, b: u8, id: HandlerId) {
        assert!((id.0 as usize) < self.handlers.len(), "unknown handler {:?}", id);
        self.maps[map as usize][b as usize] = id;
    }

    /// set consecutive slots of `map` starting at `first`.
    pub(crate) fn set_run(&mut self, map: OpcodeMap, first: u8, ids: &[HandlerId]) {
        for (i, id) in ids.iter().enumerate() {
            self.set(map, first + i as u8, *id);
        }
    }

    pub(crate) fn build(self) -> Tables {
        debug!(handlers = self.handlers.len(), "built opcode tables");
        Tables { handlers: self.handlers, maps: self.maps }
    }
}

#[cfg(test)]
mod test {
    use super::{OpcodeMap, TableBuilder, TABLES};
    use crate::handlers::{Handler, HandlerId, Legacy, Selector};
    use crate::Code;

    #[test]
    #[should_panic]
    fn same_read_children_must_agree_on_modrm() {
        let mut builder = TableBuilder::new();
        let simple = builder.legacy(Legacy::Simple(Code::Nopd));
        let ev = builder.legacy(Legacy::SimpleModRM(Code::Nopd));
        builder.select(Selector::RM { reg: simple, mem: ev });
    }

    #[test]
    #[should_panic]
    fn children_must_exist() {
        let mut builder = TableBuilder::new();
        builder.select(Selector::W { w0: HandlerId(5), w1: HandlerId::INVALID });
    }

    #[test]
    fn deferred_children_may_differ() {
        let mut builder = TableBuilder::new();
        let simple = builder.legacy(Legacy::Simple(Code::Nopd));
        let modrm = builder.legacy(Legacy::SimpleModRM(Code::Nopd));
        let bitness = builder.select(Selector::Bitness { h16_32: simple, h64: modrm });
        builder.set(OpcodeMap::Map0F, 0x00, bitness);
        let tables = builder.build();
        assert_eq!(tables.entry(OpcodeMap::Map0F, 0x00), bitness);
        assert_eq!(tables.entry(OpcodeMap::Map0F, 0x01), HandlerId::INVALID);
    }

    #[test]
    fn shared_tables_are_well_formed() {
        let tables = &*TABLES;
        assert!(tables.handler_count() > 2);
        assert!(matches!(tables.handler(HandlerId::INVALID), Handler::Invalid));
        assert!(matches!(
            tables.handler(tables.entry(OpcodeMap::Legacy, 0x0f)),
            Handler::Select(Selector::AnotherTable(OpcodeMap::Map0F))
        ));
        // every one-byte opcode that is not a prefix has a handler
        let prefixes = [0x26, 0x2e, 0x36, 0x3e, 0x64, 0x65, 0x66, 0x67, 0xf0, 0xf2, 0xf3];
        for b in 0..=255u8 {
            if prefixes.contains(&b) {
                continue;
            }
            assert_ne!(tables.entry(OpcodeMap::Legacy, b), HandlerId::INVALID, "one-byte opcode {:#04x}", b);
        }
    }
}
