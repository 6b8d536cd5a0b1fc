use core::fmt;

macro_rules! registers {
    ($($(#[$attr:meta])* $name:ident => $label:literal,)*) => {
        /// an x86 register, as an operand or as a memory operand's base/index/segment.
        ///
        /// registers of one class are contiguous, and handlers select a register by adding an
        /// index (from ModRM, an opcode's low bits, or a VEX/EVEX field) to the class's first
        /// register. that makes the variant order load-bearing: reordering this list changes how
        /// every table decodes.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum Register {
            $($(#[$attr])* $name,)*
        }

        const ALL: &[Register] = &[$(Register::$name,)*];

        impl Register {
            /// return a human-friendly name for this register, as it would be rendered in an
            /// instruction. `Register::None` has an empty name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Register::$name => $label,)*
                }
            }
        }
    }
}

registers! {
    None => "",

    /// byte registers. `AH`..`BH` are only reachable without a REX prefix, `SPL`..`DIL` only with one.
    AL => "al",
    CL => "cl",
    DL => "dl",
    BL => "bl",
    AH => "ah",
    CH => "ch",
    DH => "dh",
    BH => "bh",
    SPL => "spl",
    BPL => "bpl",
    SIL => "sil",
    DIL => "dil",
    R8L => "r8b",
    R9L => "r9b",
    R10L => "r10b",
    R11L => "r11b",
    R12L => "r12b",
    R13L => "r13b",
    R14L => "r14b",
    R15L => "r15b",

    AX => "ax",
    CX => "cx",
    DX => "dx",
    BX => "bx",
    SP => "sp",
    BP => "bp",
    SI => "si",
    DI => "di",
    R8W => "r8w",
    R9W => "r9w",
    R10W => "r10w",
    R11W => "r11w",
    R12W => "r12w",
    R13W => "r13w",
    R14W => "r14w",
    R15W => "r15w",

    EAX => "eax",
    ECX => "ecx",
    EDX => "edx",
    EBX => "ebx",
    ESP => "esp",
    EBP => "ebp",
    ESI => "esi",
    EDI => "edi",
    R8D => "r8d",
    R9D => "r9d",
    R10D => "r10d",
    R11D => "r11d",
    R12D => "r12d",
    R13D => "r13d",
    R14D => "r14d",
    R15D => "r15d",

    RAX => "rax",
    RCX => "rcx",
    RDX => "rdx",
    RBX => "rbx",
    RSP => "rsp",
    RBP => "rbp",
    RSI => "rsi",
    RDI => "rdi",
    R8 => "r8",
    R9 => "r9",
    R10 => "r10",
    R11 => "r11",
    R12 => "r12",
    R13 => "r13",
    R14 => "r14",
    R15 => "r15",

    EIP => "eip",
    RIP => "rip",

    /// segment registers, in `Sreg` encoding order.
    ES => "es",
    CS => "cs",
    SS => "ss",
    DS => "ds",
    FS => "fs",
    GS => "gs",

    XMM0 => "xmm0",
    XMM1 => "xmm1",
    XMM2 => "xmm2",
    XMM3 => "xmm3",
    XMM4 => "xmm4",
    XMM5 => "xmm5",
    XMM6 => "xmm6",
    XMM7 => "xmm7",
    XMM8 => "xmm8",
    XMM9 => "xmm9",
    XMM10 => "xmm10",
    XMM11 => "xmm11",
    XMM12 => "xmm12",
    XMM13 => "xmm13",
    XMM14 => "xmm14",
    XMM15 => "xmm15",
    XMM16 => "xmm16",
    XMM17 => "xmm17",
    XMM18 => "xmm18",
    XMM19 => "xmm19",
    XMM20 => "xmm20",
    XMM21 => "xmm21",
    XMM22 => "xmm22",
    XMM23 => "xmm23",
    XMM24 => "xmm24",
    XMM25 => "xmm25",
    XMM26 => "xmm26",
    XMM27 => "xmm27",
    XMM28 => "xmm28",
    XMM29 => "xmm29",
    XMM30 => "xmm30",
    XMM31 => "xmm31",

    YMM0 => "ymm0",
    YMM1 => "ymm1",
    YMM2 => "ymm2",
    YMM3 => "ymm3",
    YMM4 => "ymm4",
    YMM5 => "ymm5",
    YMM6 => "ymm6",
    YMM7 => "ymm7",
    YMM8 => "ymm8",
    YMM9 => "ymm9",
    YMM10 => "ymm10",
    YMM11 => "ymm11",
    YMM12 => "ymm12",
    YMM13 => "ymm13",
    YMM14 => "ymm14",
    YMM15 => "ymm15",
    YMM16 => "ymm16",
    YMM17 => "ymm17",
    YMM18 => "ymm18",
    YMM19 => "ymm19",
    YMM20 => "ymm20",
    YMM21 => "ymm21",
    YMM22 => "ymm22",
    YMM23 => "ymm23",
    YMM24 => "ymm24",
    YMM25 => "ymm25",
    YMM26 => "ymm26",
    YMM27 => "ymm27",
    YMM28 => "ymm28",
    YMM29 => "ymm29",
    YMM30 => "ymm30",
    YMM31 => "ymm31",

    ZMM0 => "zmm0",
    ZMM1 => "zmm1",
    ZMM2 => "zmm2",
    ZMM3 => "zmm3",
    ZMM4 => "zmm4",
    ZMM5 => "zmm5",
    ZMM6 => "zmm6",
    ZMM7 => "zmm7",
    ZMM8 => "zmm8",
    ZMM9 => "zmm9",
    ZMM10 => "zmm10",
    ZMM11 => "zmm11",
    ZMM12 => "zmm12",
    ZMM13 => "zmm13",
    ZMM14 => "zmm14",
    ZMM15 => "zmm15",
    ZMM16 => "zmm16",
    ZMM17 => "zmm17",
    ZMM18 => "zmm18",
    ZMM19 => "zmm19",
    ZMM20 => "zmm20",
    ZMM21 => "zmm21",
    ZMM22 => "zmm22",
    ZMM23 => "zmm23",
    ZMM24 => "zmm24",
    ZMM25 => "zmm25",
    ZMM26 => "zmm26",
    ZMM27 => "zmm27",
    ZMM28 => "zmm28",
    ZMM29 => "zmm29",
    ZMM30 => "zmm30",
    ZMM31 => "zmm31",

    /// avx-512 opmask registers.
    K0 => "k0",
    K1 => "k1",
    K2 => "k2",
    K3 => "k3",
    K4 => "k4",
    K5 => "k5",
    K6 => "k6",
    K7 => "k7",

    /// mpx bound registers.
    BND0 => "bnd0",
    BND1 => "bnd1",
    BND2 => "bnd2",
    BND3 => "bnd3",

    CR0 => "cr0",
    CR1 => "cr1",
    CR2 => "cr2",
    CR3 => "cr3",
    CR4 => "cr4",
    CR5 => "cr5",
    CR6 => "cr6",
    CR7 => "cr7",
    CR8 => "cr8",
    CR9 => "cr9",
    CR10 => "cr10",
    CR11 => "cr11",
    CR12 => "cr12",
    CR13 => "cr13",
    CR14 => "cr14",
    CR15 => "cr15",

    DR0 => "dr0",
    DR1 => "dr1",
    DR2 => "dr2",
    DR3 => "dr3",
    DR4 => "dr4",
    DR5 => "dr5",
    DR6 => "dr6",
    DR7 => "dr7",
    DR8 => "dr8",
    DR9 => "dr9",
    DR10 => "dr10",
    DR11 => "dr11",
    DR12 => "dr12",
    DR13 => "dr13",
    DR14 => "dr14",
    DR15 => "dr15",

    ST0 => "st(0)",
    ST1 => "st(1)",
    ST2 => "st(2)",
    ST3 => "st(3)",
    ST4 => "st(4)",
    ST5 => "st(5)",
    ST6 => "st(6)",
    ST7 => "st(7)",

    MM0 => "mm0",
    MM1 => "mm1",
    MM2 => "mm2",
    MM3 => "mm3",
    MM4 => "mm4",
    MM5 => "mm5",
    MM6 => "mm6",
    MM7 => "mm7",

    /// test registers, only decoded with `DecoderOptions::MOV_TR`.
    TR0 => "tr0",
    TR1 => "tr1",
    TR2 => "tr2",
    TR3 => "tr3",
    TR4 => "tr4",
    TR5 => "tr5",
    TR6 => "tr6",
    TR7 => "tr7",}

impl Register {
    /// the register `n` places after this one, or `None` if that runs off the end of the
    /// register list.
    ///
    /// this does not check that the result is in the same class as `self`; callers pick `n` from
    /// a bounded encoding field.
    #[inline]
    pub fn add(self, n: u32) -> Option<Register> {
        ALL.get(self as usize + n as usize).copied()
    }

    /// the position of this register in the register list.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn is_segment(self) -> bool {
        self >= Register::ES && self <= Register::GS
    }

    pub fn is_gpr(self) -> bool {
        self >= Register::AL && self <= Register::R15
    }
}

impl Default for Register {
    fn default() -> Self {
        Register::None
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::Register;

    #[test]
    fn register_classes_are_contiguous() {
        assert_eq!(Register::AL.add(4), Some(Register::AH));
        assert_eq!(Register::AL.add(8), Some(Register::SPL));
        assert_eq!(Register::AL.add(12), Some(Register::R8L));
        assert_eq!(Register::AX.add(8), Some(Register::R8W));
        assert_eq!(Register::EAX.add(15), Some(Register::R15D));
        assert_eq!(Register::RAX.add(8), Some(Register::R8));
        assert_eq!(Register::ES.add(5), Some(Register::GS));
        assert_eq!(Register::XMM0.add(31), Some(Register::XMM31));
        assert_eq!(Register::ZMM0.add(16), Some(Register::ZMM16));
        assert_eq!(Register::CR0.add(8), Some(Register::CR8));
        assert_eq!(Register::TR0.add(7), Some(Register::TR7));
        assert_eq!(Register::TR7.add(1), None);
    }

    #[test]
    fn names() {
        assert_eq!(Register::R8L.name(), "r8b");
        assert_eq!(Register::ST3.name(), "st(3)");
        assert_eq!(format!("{}", Register::RIP), "rip");
        assert_eq!(Register::None.name(), "");
    }
}
