use core::fmt;

macro_rules! codes {
    ($($(#[$attr:meta])* $name:ident => $mnemonic:literal,)*) => {
        /// an instruction code: one mnemonic with one operand shape and encoding.
        ///
        /// `Code::INVALID` is the code of anything the decoder does not recognize.
        #[allow(non_camel_case_types)]
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum Code {
            $($(#[$attr])* $name,)*
        }

        impl Code {
            /// the assembler mnemonic for this code, shared by all of its operand forms.
            pub fn mnemonic(&self) -> &'static str {
                match self {
                    $(Code::$name => $mnemonic,)*
                }
            }
        }
    }
}

codes! {
    INVALID => "invalid",

    Aaa => "aaa",
    Aad_imm8 => "aad",
    Aam_imm8 => "aam",
    Aas => "aas",
    Adc_AL_imm8 => "adc",
    Adc_AX_imm16 => "adc",
    Adc_EAX_imm32 => "adc",
    Adc_RAX_imm32 => "adc",
    Adc_r16_rm16 => "adc",
    Adc_r32_rm32 => "adc",
    Adc_r64_rm64 => "adc",
    Adc_r8_rm8 => "adc",
    Adc_rm16_imm16 => "adc",
    Adc_rm16_imm8 => "adc",
    Adc_rm16_r16 => "adc",
    Adc_rm32_imm32 => "adc",
    Adc_rm32_imm8 => "adc",
    Adc_rm32_r32 => "adc",
    Adc_rm64_imm32 => "adc",
    Adc_rm64_imm8 => "adc",
    Adc_rm64_r64 => "adc",
    Adc_rm8_imm8 => "adc",
    Adc_rm8_imm8_82 => "adc",
    Adc_rm8_r8 => "adc",
    Adcx_r32_rm32 => "adcx",
    Adcx_r64_rm64 => "adcx",
    Add_AL_imm8 => "add",
    Add_AX_imm16 => "add",
    Add_EAX_imm32 => "add",
    Add_RAX_imm32 => "add",
    Add_r16_rm16 => "add",
    Add_r32_rm32 => "add",
    Add_r64_rm64 => "add",
    Add_r8_rm8 => "add",
    Add_rm16_imm16 => "add",
    Add_rm16_imm8 => "add",
    Add_rm16_r16 => "add",
    Add_rm32_imm32 => "add",
    Add_rm32_imm8 => "add",
    Add_rm32_r32 => "add",
    Add_rm64_imm32 => "add",
    Add_rm64_imm8 => "add",
    Add_rm64_r64 => "add",
    Add_rm8_imm8 => "add",
    Add_rm8_imm8_82 => "add",
    Add_rm8_r8 => "add",
    Addpd_xmm_xmmm128 => "addpd",
    Addps_xmm_xmmm128 => "addps",
    Addsd_xmm_xmmm64 => "addsd",
    Addss_xmm_xmmm32 => "addss",
    Adox_r32_rm32 => "adox",
    Adox_r64_rm64 => "adox",
    And_AL_imm8 => "and",
    And_AX_imm16 => "and",
    And_EAX_imm32 => "and",
    And_RAX_imm32 => "and",
    And_r16_rm16 => "and",
    And_r32_rm32 => "and",
    And_r64_rm64 => "and",
    And_r8_rm8 => "and",
    And_rm16_imm16 => "and",
    And_rm16_imm8 => "and",
    And_rm16_r16 => "and",
    And_rm32_imm32 => "and",
    And_rm32_imm8 => "and",
    And_rm32_r32 => "and",
    And_rm64_imm32 => "and",
    And_rm64_imm8 => "and",
    And_rm64_r64 => "and",
    And_rm8_imm8 => "and",
    And_rm8_imm8_82 => "and",
    And_rm8_r8 => "and",
    Andnpd_xmm_xmmm128 => "andnpd",
    Andnps_xmm_xmmm128 => "andnps",
    Andpd_xmm_xmmm128 => "andpd",
    Andps_xmm_xmmm128 => "andps",
    Arpl_r32m16_r32 => "arpl",
    Arpl_rm16_r16 => "arpl",
    Bndcl_bnd_rm32 => "bndcl",
    Bndcl_bnd_rm64 => "bndcl",
    Bndcn_bnd_rm32 => "bndcn",
    Bndcn_bnd_rm64 => "bndcn",
    Bndcu_bnd_rm32 => "bndcu",
    Bndcu_bnd_rm64 => "bndcu",
    Bndldx_bnd_mib => "bndldx",
    Bndmov_bnd_bndm128 => "bndmov",
    Bndmov_bnd_bndm64 => "bndmov",
    Bndmov_bndm128_bnd => "bndmov",
    Bndmov_bndm64_bnd => "bndmov",
    Bndstx_mib_bnd => "bndstx",
    Bound_r16_m1616 => "bound",
    Bound_r32_m3232 => "bound",
    Bsf_r16_rm16 => "bsf",
    Bsf_r32_rm32 => "bsf",
    Bsf_r64_rm64 => "bsf",
    Bsr_r16_rm16 => "bsr",
    Bsr_r32_rm32 => "bsr",
    Bsr_r64_rm64 => "bsr",
    Bswap_r16 => "bswap",
    Bswap_r32 => "bswap",
    Bswap_r64 => "bswap",
    Bt_rm16_imm8 => "bt",
    Bt_rm16_r16 => "bt",
    Bt_rm32_imm8 => "bt",
    Bt_rm32_r32 => "bt",
    Bt_rm64_imm8 => "bt",
    Bt_rm64_r64 => "bt",
    Btc_rm16_imm8 => "btc",
    Btc_rm16_r16 => "btc",
    Btc_rm32_imm8 => "btc",
    Btc_rm32_r32 => "btc",
    Btc_rm64_imm8 => "btc",
    Btc_rm64_r64 => "btc",
    Btr_rm16_imm8 => "btr",
    Btr_rm16_r16 => "btr",
    Btr_rm32_imm8 => "btr",
    Btr_rm32_r32 => "btr",
    Btr_rm64_imm8 => "btr",
    Btr_rm64_r64 => "btr",
    Bts_rm16_imm8 => "bts",
    Bts_rm16_r16 => "bts",
    Bts_rm32_imm8 => "bts",
    Bts_rm32_r32 => "bts",
    Bts_rm64_imm8 => "bts",
    Bts_rm64_r64 => "bts",
    Call_m1616 => "call",
    Call_m1632 => "call",
    Call_m1664 => "call",
    Call_ptr1616 => "call",
    Call_ptr1632 => "call",
    Call_rel16 => "call",
    Call_rel32_32 => "call",
    Call_rel32_64 => "call",
    Call_rm16 => "call",
    Call_rm32 => "call",
    Call_rm64 => "call",
    Cbw => "cbw",
    Cdq => "cdq",
    Cdqe => "cdqe",
    Clac => "clac",
    Clc => "clc",
    Cld => "cld",
    Clflush_m8 => "clflush",
    Cli => "cli",
    Clts => "clts",
    Cmc => "cmc",
    Cmova_r16_rm16 => "cmova",
    Cmova_r32_rm32 => "cmova",
    Cmova_r64_rm64 => "cmova",
    Cmovae_r16_rm16 => "cmovae",
    Cmovae_r32_rm32 => "cmovae",
    Cmovae_r64_rm64 => "cmovae",
    Cmovb_r16_rm16 => "cmovb",
    Cmovb_r32_rm32 => "cmovb",
    Cmovb_r64_rm64 => "cmovb",
    Cmovbe_r16_rm16 => "cmovbe",
    Cmovbe_r32_rm32 => "cmovbe",
    Cmovbe_r64_rm64 => "cmovbe",
    Cmove_r16_rm16 => "cmove",
    Cmove_r32_rm32 => "cmove",
    Cmove_r64_rm64 => "cmove",
    Cmovg_r16_rm16 => "cmovg",
    Cmovg_r32_rm32 => "cmovg",
    Cmovg_r64_rm64 => "cmovg",
    Cmovge_r16_rm16 => "cmovge",
    Cmovge_r32_rm32 => "cmovge",
    Cmovge_r64_rm64 => "cmovge",
    Cmovl_r16_rm16 => "cmovl",
    Cmovl_r32_rm32 => "cmovl",
    Cmovl_r64_rm64 => "cmovl",
    Cmovle_r16_rm16 => "cmovle",
    Cmovle_r32_rm32 => "cmovle",
    Cmovle_r64_rm64 => "cmovle",
    Cmovne_r16_rm16 => "cmovne",
    Cmovne_r32_rm32 => "cmovne",
    Cmovne_r64_rm64 => "cmovne",
    Cmovno_r16_rm16 => "cmovno",
    Cmovno_r32_rm32 => "cmovno",
    Cmovno_r64_rm64 => "cmovno",
    Cmovnp_r16_rm16 => "cmovnp",
    Cmovnp_r32_rm32 => "cmovnp",
    Cmovnp_r64_rm64 => "cmovnp",
    Cmovns_r16_rm16 => "cmovns",
    Cmovns_r32_rm32 => "cmovns",
    Cmovns_r64_rm64 => "cmovns",
    Cmovo_r16_rm16 => "cmovo",
    Cmovo_r32_rm32 => "cmovo",
    Cmovo_r64_rm64 => "cmovo",
    Cmovp_r16_rm16 => "cmovp",
    Cmovp_r32_rm32 => "cmovp",
    Cmovp_r64_rm64 => "cmovp",
    Cmovs_r16_rm16 => "cmovs",
    Cmovs_r32_rm32 => "cmovs",
    Cmovs_r64_rm64 => "cmovs",
    Cmp_AL_imm8 => "cmp",
    Cmp_AX_imm16 => "cmp",
    Cmp_EAX_imm32 => "cmp",
    Cmp_RAX_imm32 => "cmp",
    Cmp_r16_rm16 => "cmp",
    Cmp_r32_rm32 => "cmp",
    Cmp_r64_rm64 => "cmp",
    Cmp_r8_rm8 => "cmp",
    Cmp_rm16_imm16 => "cmp",
    Cmp_rm16_imm8 => "cmp",
    Cmp_rm16_r16 => "cmp",
    Cmp_rm32_imm32 => "cmp",
    Cmp_rm32_imm8 => "cmp",
    Cmp_rm32_r32 => "cmp",
    Cmp_rm64_imm32 => "cmp",
    Cmp_rm64_imm8 => "cmp",
    Cmp_rm64_r64 => "cmp",
    Cmp_rm8_imm8 => "cmp",
    Cmp_rm8_imm8_82 => "cmp",
    Cmp_rm8_r8 => "cmp",
    Cmpsb_m8_m8 => "cmpsb",
    Cmpsd_m32_m32 => "cmpsd",
    Cmpsq_m64_m64 => "cmpsq",
    Cmpsw_m16_m16 => "cmpsw",
    Cmpxchg16b_m128 => "cmpxchg16b",
    Cmpxchg8b_m64 => "cmpxchg8b",
    Cmpxchg_rm16_r16 => "cmpxchg",
    Cmpxchg_rm32_r32 => "cmpxchg",
    Cmpxchg_rm64_r64 => "cmpxchg",
    Cmpxchg_rm8_r8 => "cmpxchg",
    Comisd_xmm_xmmm64 => "comisd",
    Comiss_xmm_xmmm32 => "comiss",
    Cpuid => "cpuid",
    Cqo => "cqo",
    Crc32_r32_rm8 => "crc32",
    Crc32_r64_rm8 => "crc32",
    Cvtpd2pi_mm_xmmm128 => "cvtpd2pi",
    Cvtpi2pd_xmm_mmm64 => "cvtpi2pd",
    Cvtpi2ps_xmm_mmm64 => "cvtpi2ps",
    Cvtps2pi_mm_xmmm64 => "cvtps2pi",
    Cwd => "cwd",
    Cwde => "cwde",
    Daa => "daa",
    Das => "das",
    Dec_r16 => "dec",
    Dec_r32 => "dec",
    Dec_rm16 => "dec",
    Dec_rm32 => "dec",
    Dec_rm64 => "dec",
    Dec_rm8 => "dec",
    Div_rm16 => "div",
    Div_rm32 => "div",
    Div_rm64 => "div",
    Div_rm8 => "div",
    Divpd_xmm_xmmm128 => "divpd",
    Divps_xmm_xmmm128 => "divps",
    Divsd_xmm_xmmm64 => "divsd",
    Divss_xmm_xmmm32 => "divss",
    Emms => "emms",
    Enterd_imm16_imm8 => "enter",
    Enterq_imm16_imm8 => "enter",
    Enterw_imm16_imm8 => "enter",
    F2xm1 => "f2xm1",
    Fabs => "fabs",
    Fadd_m32fp => "fadd",
    Fadd_m64fp => "fadd",
    Fadd_st0_sti => "fadd",
    Fadd_sti_st0 => "fadd",
    Faddp_sti_st0 => "faddp",
    Fbld_m80bcd => "fbld",
    Fbstp_m80bcd => "fbstp",
    Fchs => "fchs",
    Fcmovb_st0_sti => "fcmovb",
    Fcmovbe_st0_sti => "fcmovbe",
    Fcmove_st0_sti => "fcmove",
    Fcmovnb_st0_sti => "fcmovnb",
    Fcmovnbe_st0_sti => "fcmovnbe",
    Fcmovne_st0_sti => "fcmovne",
    Fcmovnu_st0_sti => "fcmovnu",
    Fcmovu_st0_sti => "fcmovu",
    Fcom_m32fp => "fcom",
    Fcom_m64fp => "fcom",
    Fcom_st0_sti => "fcom",
    Fcom_st0_sti_DCD0 => "fcom",
    Fcomi_st0_sti => "fcomi",
    Fcomip_st0_sti => "fcomip",
    Fcomp_m32fp => "fcomp",
    Fcomp_m64fp => "fcomp",
    Fcomp_st0_sti => "fcomp",
    Fcomp_st0_sti_DCD8 => "fcomp",
    Fcomp_st0_sti_DED0 => "fcomp",
    Fcos => "fcos",
    Fdecstp => "fdecstp",
    Fdiv_m32fp => "fdiv",
    Fdiv_m64fp => "fdiv",
    Fdiv_st0_sti => "fdiv",
    Fdiv_sti_st0 => "fdiv",
    Fdivp_sti_st0 => "fdivp",
    Fdivr_m32fp => "fdivr",
    Fdivr_m64fp => "fdivr",
    Fdivr_st0_sti => "fdivr",
    Fdivr_sti_st0 => "fdivr",
    Fdivrp_sti_st0 => "fdivrp",
    Ffree_sti => "ffree",
    Ffreep_sti => "ffreep",
    Fiadd_m16int => "fiadd",
    Fiadd_m32int => "fiadd",
    Ficom_m16int => "ficom",
    Ficom_m32int => "ficom",
    Ficomp_m16int => "ficomp",
    Ficomp_m32int => "ficomp",
    Fidiv_m16int => "fidiv",
    Fidiv_m32int => "fidiv",
    Fidivr_m16int => "fidivr",
    Fidivr_m32int => "fidivr",
    Fild_m16int => "fild",
    Fild_m32int => "fild",
    Fild_m64int => "fild",
    Fimul_m16int => "fimul",
    Fimul_m32int => "fimul",
    Fincstp => "fincstp",
    Fist_m16int => "fist",
    Fist_m32int => "fist",
    Fistp_m16int => "fistp",
    Fistp_m32int => "fistp",
    Fistp_m64int => "fistp",
    Fisttp_m16int => "fisttp",
    Fisttp_m32int => "fisttp",
    Fisttp_m64int => "fisttp",
    Fisub_m16int => "fisub",
    Fisub_m32int => "fisub",
    Fisubr_m16int => "fisubr",
    Fisubr_m32int => "fisubr",
    Fld1 => "fld1",
    Fld_m32fp => "fld",
    Fld_m64fp => "fld",
    Fld_m80fp => "fld",
    Fld_sti => "fld",
    Fldcw_m2byte => "fldcw",
    Fldl2e => "fldl2e",
    Fldl2t => "fldl2t",
    Fldlg2 => "fldlg2",
    Fldln2 => "fldln2",
    Fldpi => "fldpi",
    Fldz => "fldz",
    Fmul_m32fp => "fmul",
    Fmul_m64fp => "fmul",
    Fmul_st0_sti => "fmul",
    Fmul_sti_st0 => "fmul",
    Fmulp_sti_st0 => "fmulp",
    Fnop => "fnop",
    Fnstcw_m2byte => "fnstcw",
    Fnstsw_m2byte => "fnstsw",
    Fpatan => "fpatan",
    Fprem => "fprem",
    Fprem1 => "fprem1",
    Fptan => "fptan",
    Frndint => "frndint",
    Fscale => "fscale",
    Fsin => "fsin",
    Fsincos => "fsincos",
    Fsqrt => "fsqrt",
    Fst_m32fp => "fst",
    Fst_m64fp => "fst",
    Fst_sti => "fst",
    Fstp_m32fp => "fstp",
    Fstp_m64fp => "fstp",
    Fstp_m80fp => "fstp",
    Fstp_sti => "fstp",
    Fsub_m32fp => "fsub",
    Fsub_m64fp => "fsub",
    Fsub_st0_sti => "fsub",
    Fsub_sti_st0 => "fsub",
    Fsubp_sti_st0 => "fsubp",
    Fsubr_m32fp => "fsubr",
    Fsubr_m64fp => "fsubr",
    Fsubr_st0_sti => "fsubr",
    Fsubr_sti_st0 => "fsubr",
    Fsubrp_sti_st0 => "fsubrp",
    Ftst => "ftst",
    Fucom_st0_sti => "fucom",
    Fucomi_st0_sti => "fucomi",
    Fucomip_st0_sti => "fucomip",
    Fucomp_st0_sti => "fucomp",
    Fxam => "fxam",
    Fxch_st0_sti => "fxch",
    Fxch_st0_sti_DDC8 => "fxch",
    Fxrstor64_m512byte => "fxrstor64",
    Fxrstor_m512byte => "fxrstor",
    Fxsave64_m512byte => "fxsave64",
    Fxsave_m512byte => "fxsave",
    Fxtract => "fxtract",
    Fyl2x => "fyl2x",
    Fyl2xp1 => "fyl2xp1",
    Getsec => "getsec",
    Hlt => "hlt",
    Idiv_rm16 => "idiv",
    Idiv_rm32 => "idiv",
    Idiv_rm64 => "idiv",
    Idiv_rm8 => "idiv",
    Imul_r16_rm16 => "imul",
    Imul_r16_rm16_imm16 => "imul",
    Imul_r16_rm16_imm8 => "imul",
    Imul_r32_rm32 => "imul",
    Imul_r32_rm32_imm32 => "imul",
    Imul_r32_rm32_imm8 => "imul",
    Imul_r64_rm64 => "imul",
    Imul_r64_rm64_imm32 => "imul",
    Imul_r64_rm64_imm8 => "imul",
    Imul_rm16 => "imul",
    Imul_rm32 => "imul",
    Imul_rm64 => "imul",
    Imul_rm8 => "imul",
    In_AL_DX => "in",
    In_AL_imm8 => "in",
    In_AX_DX => "in",
    In_AX_imm8 => "in",
    In_EAX_DX => "in",
    In_EAX_imm8 => "in",
    Inc_r16 => "inc",
    Inc_r32 => "inc",
    Inc_rm16 => "inc",
    Inc_rm32 => "inc",
    Inc_rm64 => "inc",
    Inc_rm8 => "inc",
    Insb_m8_DX => "insb",
    Insd_m32_DX => "insd",
    Insw_m16_DX => "insw",
    Int1 => "int1",
    Int3 => "int3",
    Int_imm8 => "int",
    Into => "into",
    Invd => "invd",
    Invlpg_m => "invlpg",
    Invpcid_r32_m128 => "invpcid",
    Invpcid_r64_m128 => "invpcid",
    Iretd => "iretd",
    Iretq => "iretq",
    Iretw => "iret",
    Ja_rel16 => "ja",
    Ja_rel32_32 => "ja",
    Ja_rel32_64 => "ja",
    Ja_rel8_16 => "ja",
    Ja_rel8_32 => "ja",
    Ja_rel8_64 => "ja",
    Jae_rel16 => "jae",
    Jae_rel32_32 => "jae",
    Jae_rel32_64 => "jae",
    Jae_rel8_16 => "jae",
    Jae_rel8_32 => "jae",
    Jae_rel8_64 => "jae",
    Jb_rel16 => "jb",
    Jb_rel32_32 => "jb",
    Jb_rel32_64 => "jb",
    Jb_rel8_16 => "jb",
    Jb_rel8_32 => "jb",
    Jb_rel8_64 => "jb",
    Jbe_rel16 => "jbe",
    Jbe_rel32_32 => "jbe",
    Jbe_rel32_64 => "jbe",
    Jbe_rel8_16 => "jbe",
    Jbe_rel8_32 => "jbe",
    Jbe_rel8_64 => "jbe",
    Jcxz_rel8_16 => "jcxz",
    Jcxz_rel8_32 => "jcxz",
    Je_rel16 => "je",
    Je_rel32_32 => "je",
    Je_rel32_64 => "je",
    Je_rel8_16 => "je",
    Je_rel8_32 => "je",
    Je_rel8_64 => "je",
    Jecxz_rel8_16 => "jecxz",
    Jecxz_rel8_32 => "jecxz",
    Jecxz_rel8_64 => "jecxz",
    Jg_rel16 => "jg",
    Jg_rel32_32 => "jg",
    Jg_rel32_64 => "jg",
    Jg_rel8_16 => "jg",
    Jg_rel8_32 => "jg",
    Jg_rel8_64 => "jg",
    Jge_rel16 => "jge",
    Jge_rel32_32 => "jge",
    Jge_rel32_64 => "jge",
    Jge_rel8_16 => "jge",
    Jge_rel8_32 => "jge",
    Jge_rel8_64 => "jge",
    Jl_rel16 => "jl",
    Jl_rel32_32 => "jl",
    Jl_rel32_64 => "jl",
    Jl_rel8_16 => "jl",
    Jl_rel8_32 => "jl",
    Jl_rel8_64 => "jl",
    Jle_rel16 => "jle",
    Jle_rel32_32 => "jle",
    Jle_rel32_64 => "jle",
    Jle_rel8_16 => "jle",
    Jle_rel8_32 => "jle",
    Jle_rel8_64 => "jle",
    Jmp_m1616 => "jmp",
    Jmp_m1632 => "jmp",
    Jmp_m1664 => "jmp",
    Jmp_ptr1616 => "jmp",
    Jmp_ptr1632 => "jmp",
    Jmp_rel16 => "jmp",
    Jmp_rel32_32 => "jmp",
    Jmp_rel32_64 => "jmp",
    Jmp_rel8_16 => "jmp",
    Jmp_rel8_32 => "jmp",
    Jmp_rel8_64 => "jmp",
    Jmp_rm16 => "jmp",
    Jmp_rm32 => "jmp",
    Jmp_rm64 => "jmp",
    Jne_rel16 => "jne",
    Jne_rel32_32 => "jne",
    Jne_rel32_64 => "jne",
    Jne_rel8_16 => "jne",
    Jne_rel8_32 => "jne",
    Jne_rel8_64 => "jne",
    Jno_rel16 => "jno",
    Jno_rel32_32 => "jno",
    Jno_rel32_64 => "jno",
    Jno_rel8_16 => "jno",
    Jno_rel8_32 => "jno",
    Jno_rel8_64 => "jno",
    Jnp_rel16 => "jnp",
    Jnp_rel32_32 => "jnp",
    Jnp_rel32_64 => "jnp",
    Jnp_rel8_16 => "jnp",
    Jnp_rel8_32 => "jnp",
    Jnp_rel8_64 => "jnp",
    Jns_rel16 => "jns",
    Jns_rel32_32 => "jns",
    Jns_rel32_64 => "jns",
    Jns_rel8_16 => "jns",
    Jns_rel8_32 => "jns",
    Jns_rel8_64 => "jns",
    Jo_rel16 => "jo",
    Jo_rel32_32 => "jo",
    Jo_rel32_64 => "jo",
    Jo_rel8_16 => "jo",
    Jo_rel8_32 => "jo",
    Jo_rel8_64 => "jo",
    Jp_rel16 => "jp",
    Jp_rel32_32 => "jp",
    Jp_rel32_64 => "jp",
    Jp_rel8_16 => "jp",
    Jp_rel8_32 => "jp",
    Jp_rel8_64 => "jp",
    Jrcxz_rel8_16 => "jrcxz",
    Jrcxz_rel8_64 => "jrcxz",
    Js_rel16 => "js",
    Js_rel32_32 => "js",
    Js_rel32_64 => "js",
    Js_rel8_16 => "js",
    Js_rel8_32 => "js",
    Js_rel8_64 => "js",
    Lahf => "lahf",
    Lar_r16_rm16 => "lar",
    Lar_r32_r32m16 => "lar",
    Lar_r64_r64m16 => "lar",
    Ldmxcsr_m32 => "ldmxcsr",
    Lds_r16_m1616 => "lds",
    Lds_r32_m1632 => "lds",
    Lea_r16_m => "lea",
    Lea_r32_m => "lea",
    Lea_r64_m => "lea",
    Leaved => "leave",
    Leaveq => "leave",
    Leavew => "leave",
    Les_r16_m1616 => "les",
    Les_r32_m1632 => "les",
    Lfence => "lfence",
    Lfs_r16_m1616 => "lfs",
    Lfs_r32_m1632 => "lfs",
    Lfs_r64_m1664 => "lfs",
    Lgdt_m1632 => "lgdt",
    Lgdt_m1632_16 => "lgdt",
    Lgdt_m1664 => "lgdt",
    Lgs_r16_m1616 => "lgs",
    Lgs_r32_m1632 => "lgs",
    Lgs_r64_m1664 => "lgs",
    Lidt_m1632 => "lidt",
    Lidt_m1632_16 => "lidt",
    Lidt_m1664 => "lidt",
    Lldt_rm16 => "lldt",
    Lmsw_rm16 => "lmsw",
    Loadall386 => "loadall386",
    Lodsb_AL_m8 => "lodsb",
    Lodsd_EAX_m32 => "lodsd",
    Lodsq_RAX_m64 => "lodsq",
    Lodsw_AX_m16 => "lodsw",
    Loop_rel8_16_CX => "loop",
    Loop_rel8_16_ECX => "loop",
    Loop_rel8_16_RCX => "loop",
    Loop_rel8_32_CX => "loop",
    Loop_rel8_32_ECX => "loop",
    Loop_rel8_64_ECX => "loop",
    Loop_rel8_64_RCX => "loop",
    Loope_rel8_16_CX => "loope",
    Loope_rel8_16_ECX => "loope",
    Loope_rel8_16_RCX => "loope",
    Loope_rel8_32_CX => "loope",
    Loope_rel8_32_ECX => "loope",
    Loope_rel8_64_ECX => "loope",
    Loope_rel8_64_RCX => "loope",
    Loopne_rel8_16_CX => "loopne",
    Loopne_rel8_16_ECX => "loopne",
    Loopne_rel8_16_RCX => "loopne",
    Loopne_rel8_32_CX => "loopne",
    Loopne_rel8_32_ECX => "loopne",
    Loopne_rel8_64_ECX => "loopne",
    Loopne_rel8_64_RCX => "loopne",
    Lsl_r16_rm16 => "lsl",
    Lsl_r32_r32m16 => "lsl",
    Lsl_r64_r64m16 => "lsl",
    Lss_r16_m1616 => "lss",
    Lss_r32_m1632 => "lss",
    Lss_r64_m1664 => "lss",
    Ltr_rm16 => "ltr",
    Lzcnt_r16_rm16 => "lzcnt",
    Lzcnt_r32_rm32 => "lzcnt",
    Lzcnt_r64_rm64 => "lzcnt",
    Maxpd_xmm_xmmm128 => "maxpd",
    Maxps_xmm_xmmm128 => "maxps",
    Maxsd_xmm_xmmm64 => "maxsd",
    Maxss_xmm_xmmm32 => "maxss",
    Mfence => "mfence",
    Minpd_xmm_xmmm128 => "minpd",
    Minps_xmm_xmmm128 => "minps",
    Minsd_xmm_xmmm64 => "minsd",
    Minss_xmm_xmmm32 => "minss",
    Mov_AL_moffs8 => "mov",
    Mov_AX_moffs16 => "mov",
    Mov_EAX_moffs32 => "mov",
    Mov_RAX_moffs64 => "mov",
    Mov_Sreg_r32m16 => "mov",
    Mov_Sreg_r64m16 => "mov",
    Mov_Sreg_rm16 => "mov",
    Mov_cr_r32 => "mov",
    Mov_cr_r64 => "mov",
    Mov_dr_r32 => "mov",
    Mov_dr_r64 => "mov",
    Mov_moffs16_AX => "mov",
    Mov_moffs32_EAX => "mov",
    Mov_moffs64_RAX => "mov",
    Mov_moffs8_AL => "mov",
    Mov_r16_imm16 => "mov",
    Mov_r16_rm16 => "mov",
    Mov_r32_cr => "mov",
    Mov_r32_dr => "mov",
    Mov_r32_imm32 => "mov",
    Mov_r32_rm32 => "mov",
    Mov_r32_tr => "mov",
    Mov_r32m16_Sreg => "mov",
    Mov_r64_cr => "mov",
    Mov_r64_dr => "mov",
    Mov_r64_imm64 => "mov",
    Mov_r64_rm64 => "mov",
    Mov_r64m16_Sreg => "mov",
    Mov_r8_imm8 => "mov",
    Mov_r8_rm8 => "mov",
    Mov_rm16_Sreg => "mov",
    Mov_rm16_imm16 => "mov",
    Mov_rm16_r16 => "mov",
    Mov_rm32_imm32 => "mov",
    Mov_rm32_r32 => "mov",
    Mov_rm64_imm32 => "mov",
    Mov_rm64_r64 => "mov",
    Mov_rm8_imm8 => "mov",
    Mov_rm8_r8 => "mov",
    Mov_tr_r32 => "mov",
    Movapd_xmm_xmmm128 => "movapd",
    Movapd_xmmm128_xmm => "movapd",
    Movaps_xmm_xmmm128 => "movaps",
    Movaps_xmmm128_xmm => "movaps",
    Movbe_m16_r16 => "movbe",
    Movbe_m32_r32 => "movbe",
    Movbe_m64_r64 => "movbe",
    Movbe_r16_m16 => "movbe",
    Movbe_r32_m32 => "movbe",
    Movbe_r64_m64 => "movbe",
    Movd_mm_rm32 => "movd",
    Movd_rm32_xmm => "movd",
    Movd_xmm_rm32 => "movd",
    Movddup_xmm_xmmm64 => "movddup",
    Movdqa_xmm_xmmm128 => "movdqa",
    Movdqa_xmmm128_xmm => "movdqa",
    Movdqu_xmm_xmmm128 => "movdqu",
    Movdqu_xmmm128_xmm => "movdqu",
    Movhlps_xmm_xmm => "movhlps",
    Movhpd_m64_xmm => "movhpd",
    Movhpd_xmm_m64 => "movhpd",
    Movhps_m64_xmm => "movhps",
    Movhps_xmm_m64 => "movhps",
    Movlhps_xmm_xmm => "movlhps",
    Movlpd_m64_xmm => "movlpd",
    Movlpd_xmm_m64 => "movlpd",
    Movlps_m64_xmm => "movlps",
    Movlps_xmm_m64 => "movlps",
    Movntdq_m128_xmm => "movntdq",
    Movntq_m64_mm => "movntq",
    Movq2dq_xmm_mm => "movq2dq",
    Movq_mm_mmm64 => "movq",
    Movq_mm_rm64 => "movq",
    Movq_mmm64_mm => "movq",
    Movq_rm64_xmm => "movq",
    Movq_xmm_rm64 => "movq",
    Movq_xmm_xmmm64 => "movq",
    Movq_xmmm64_xmm => "movq",
    Movsb_m8_m8 => "movsb",
    Movsd_m32_m32 => "movsd",
    Movsd_xmm_xmmm64 => "movsd",
    Movsd_xmmm64_xmm => "movsd",
    Movshdup_xmm_xmmm128 => "movshdup",
    Movsldup_xmm_xmmm128 => "movsldup",
    Movsq_m64_m64 => "movsq",
    Movss_xmm_xmmm32 => "movss",
    Movss_xmmm32_xmm => "movss",
    Movsw_m16_m16 => "movsw",
    Movsx_r16_rm16 => "movsx",
    Movsx_r16_rm8 => "movsx",
    Movsx_r32_rm16 => "movsx",
    Movsx_r32_rm8 => "movsx",
    Movsx_r64_rm16 => "movsx",
    Movsx_r64_rm8 => "movsx",
    Movsxd_r16_rm16 => "movsxd",
    Movsxd_r32_rm32 => "movsxd",
    Movsxd_r64_rm32 => "movsxd",
    Movupd_xmm_xmmm128 => "movupd",
    Movupd_xmmm128_xmm => "movupd",
    Movups_xmm_xmmm128 => "movups",
    Movups_xmmm128_xmm => "movups",
    Movzx_r16_rm16 => "movzx",
    Movzx_r16_rm8 => "movzx",
    Movzx_r32_rm16 => "movzx",
    Movzx_r32_rm8 => "movzx",
    Movzx_r64_rm16 => "movzx",
    Movzx_r64_rm8 => "movzx",
    Mul_rm16 => "mul",
    Mul_rm32 => "mul",
    Mul_rm64 => "mul",
    Mul_rm8 => "mul",
    Mulpd_xmm_xmmm128 => "mulpd",
    Mulps_xmm_xmmm128 => "mulps",
    Mulsd_xmm_xmmm64 => "mulsd",
    Mulss_xmm_xmmm32 => "mulss",
    Neg_rm16 => "neg",
    Neg_rm32 => "neg",
    Neg_rm64 => "neg",
    Neg_rm8 => "neg",
    Nop_rm16 => "nop",
    Nop_rm32 => "nop",
    Nop_rm64 => "nop",
    Nopd => "nop",
    Nopq => "nop",
    Nopw => "nop",
    Not_rm16 => "not",
    Not_rm32 => "not",
    Not_rm64 => "not",
    Not_rm8 => "not",
    Or_AL_imm8 => "or",
    Or_AX_imm16 => "or",
    Or_EAX_imm32 => "or",
    Or_RAX_imm32 => "or",
    Or_r16_rm16 => "or",
    Or_r32_rm32 => "or",
    Or_r64_rm64 => "or",
    Or_r8_rm8 => "or",
    Or_rm16_imm16 => "or",
    Or_rm16_imm8 => "or",
    Or_rm16_r16 => "or",
    Or_rm32_imm32 => "or",
    Or_rm32_imm8 => "or",
    Or_rm32_r32 => "or",
    Or_rm64_imm32 => "or",
    Or_rm64_imm8 => "or",
    Or_rm64_r64 => "or",
    Or_rm8_imm8 => "or",
    Or_rm8_imm8_82 => "or",
    Or_rm8_r8 => "or",
    Orpd_xmm_xmmm128 => "orpd",
    Orps_xmm_xmmm128 => "orps",
    Out_DX_AL => "out",
    Out_DX_AX => "out",
    Out_DX_EAX => "out",
    Out_imm8_AL => "out",
    Out_imm8_AX => "out",
    Out_imm8_EAX => "out",
    Outsb_DX_m8 => "outsb",
    Outsd_DX_m32 => "outsd",
    Outsw_DX_m16 => "outsw",
    Pabsb_mm_mmm64 => "pabsb",
    Pabsb_xmm_xmmm128 => "pabsb",
    Pabsd_mm_mmm64 => "pabsd",
    Pabsd_xmm_xmmm128 => "pabsd",
    Pabsw_mm_mmm64 => "pabsw",
    Pabsw_xmm_xmmm128 => "pabsw",
    Paddb_mm_mmm64 => "paddb",
    Paddb_xmm_xmmm128 => "paddb",
    Paddd_mm_mmm64 => "paddd",
    Paddd_xmm_xmmm128 => "paddd",
    Paddq_mm_mmm64 => "paddq",
    Paddq_xmm_xmmm128 => "paddq",
    Paddw_mm_mmm64 => "paddw",
    Paddw_xmm_xmmm128 => "paddw",
    Palignr_mm_mmm64_imm8 => "palignr",
    Palignr_xmm_xmmm128_imm8 => "palignr",
    Pand_mm_mmm64 => "pand",
    Pand_xmm_xmmm128 => "pand",
    Pause => "pause",
    Pcmpeqb_mm_mmm64 => "pcmpeqb",
    Pcmpeqb_xmm_xmmm128 => "pcmpeqb",
    Pcmpeqd_mm_mmm64 => "pcmpeqd",
    Pcmpeqd_xmm_xmmm128 => "pcmpeqd",
    Pcmpeqw_mm_mmm64 => "pcmpeqw",
    Pcmpeqw_xmm_xmmm128 => "pcmpeqw",
    Phaddd_mm_mmm64 => "phaddd",
    Phaddd_xmm_xmmm128 => "phaddd",
    Phaddw_mm_mmm64 => "phaddw",
    Phaddw_xmm_xmmm128 => "phaddw",
    Pmovmskb_r32_mm => "pmovmskb",
    Pmovmskb_r32_xmm => "pmovmskb",
    Pmovmskb_r64_mm => "pmovmskb",
    Pmovmskb_r64_xmm => "pmovmskb",
    Pop_r16 => "pop",
    Pop_r32 => "pop",
    Pop_r64 => "pop",
    Pop_rm16 => "pop",
    Pop_rm32 => "pop",
    Pop_rm64 => "pop",
    Popad => "popad",
    Popaw => "popa",
    Popcnt_r16_rm16 => "popcnt",
    Popcnt_r32_rm32 => "popcnt",
    Popcnt_r64_rm64 => "popcnt",
    Popd_DS => "pop",
    Popd_ES => "pop",
    Popd_FS => "pop",
    Popd_GS => "pop",
    Popd_SS => "pop",
    Popfd => "popfd",
    Popfq => "popfq",
    Popfw => "popf",
    Popq_FS => "pop",
    Popq_GS => "pop",
    Popw_DS => "pop",
    Popw_ES => "pop",
    Popw_FS => "pop",
    Popw_GS => "pop",
    Popw_SS => "pop",
    Por_mm_mmm64 => "por",
    Por_xmm_xmmm128 => "por",
    Prefetch_m8 => "prefetch",
    Prefetchnta_m8 => "prefetchnta",
    Prefetcht0_m8 => "prefetcht0",
    Prefetcht1_m8 => "prefetcht1",
    Prefetcht2_m8 => "prefetcht2",
    Prefetchw_m8 => "prefetchw",
    Prefetchwt1_m8 => "prefetchwt1",
    Pshufb_mm_mmm64 => "pshufb",
    Pshufb_xmm_xmmm128 => "pshufb",
    Pshufd_xmm_xmmm128_imm8 => "pshufd",
    Pshufhw_xmm_xmmm128_imm8 => "pshufhw",
    Pshuflw_xmm_xmmm128_imm8 => "pshuflw",
    Pshufw_mm_mmm64_imm8 => "pshufw",
    Pslld_mm_imm8 => "pslld",
    Pslld_xmm_imm8 => "pslld",
    Pslldq_xmm_imm8 => "pslldq",
    Psllq_mm_imm8 => "psllq",
    Psllq_xmm_imm8 => "psllq",
    Psllw_mm_imm8 => "psllw",
    Psllw_xmm_imm8 => "psllw",
    Psrad_mm_imm8 => "psrad",
    Psrad_xmm_imm8 => "psrad",
    Psraw_mm_imm8 => "psraw",
    Psraw_xmm_imm8 => "psraw",
    Psrld_mm_imm8 => "psrld",
    Psrld_xmm_imm8 => "psrld",
    Psrldq_xmm_imm8 => "psrldq",
    Psrlq_mm_imm8 => "psrlq",
    Psrlq_xmm_imm8 => "psrlq",
    Psrlw_mm_imm8 => "psrlw",
    Psrlw_xmm_imm8 => "psrlw",
    Ptwrite_rm32 => "ptwrite",
    Ptwrite_rm64 => "ptwrite",
    Punpcklbw_mm_mmm32 => "punpcklbw",
    Punpcklbw_xmm_xmmm128 => "punpcklbw",
    Punpckldq_mm_mmm32 => "punpckldq",
    Punpckldq_xmm_xmmm128 => "punpckldq",
    Punpcklwd_mm_mmm32 => "punpcklwd",
    Punpcklwd_xmm_xmmm128 => "punpcklwd",
    Push_imm16 => "push",
    Push_r16 => "push",
    Push_r32 => "push",
    Push_r64 => "push",
    Push_rm16 => "push",
    Push_rm32 => "push",
    Push_rm64 => "push",
    Pushad => "pushad",
    Pushaw => "pusha",
    Pushd_CS => "push",
    Pushd_DS => "push",
    Pushd_ES => "push",
    Pushd_FS => "push",
    Pushd_GS => "push",
    Pushd_SS => "push",
    Pushd_imm32 => "push",
    Pushd_imm8 => "push",
    Pushfd => "pushfd",
    Pushfq => "pushfq",
    Pushfw => "pushf",
    Pushq_FS => "push",
    Pushq_GS => "push",
    Pushq_imm32 => "push",
    Pushq_imm8 => "push",
    Pushw_CS => "push",
    Pushw_DS => "push",
    Pushw_ES => "push",
    Pushw_FS => "push",
    Pushw_GS => "push",
    Pushw_SS => "push",
    Pushw_imm8 => "push",
    Pxor_mm_mmm64 => "pxor",
    Pxor_xmm_xmmm128 => "pxor",
    Rcl_rm16_1 => "rcl",
    Rcl_rm16_CL => "rcl",
    Rcl_rm16_imm8 => "rcl",
    Rcl_rm32_1 => "rcl",
    Rcl_rm32_CL => "rcl",
    Rcl_rm32_imm8 => "rcl",
    Rcl_rm64_1 => "rcl",
    Rcl_rm64_CL => "rcl",
    Rcl_rm64_imm8 => "rcl",
    Rcl_rm8_1 => "rcl",
    Rcl_rm8_CL => "rcl",
    Rcl_rm8_imm8 => "rcl",
    Rcr_rm16_1 => "rcr",
    Rcr_rm16_CL => "rcr",
    Rcr_rm16_imm8 => "rcr",
    Rcr_rm32_1 => "rcr",
    Rcr_rm32_CL => "rcr",
    Rcr_rm32_imm8 => "rcr",
    Rcr_rm64_1 => "rcr",
    Rcr_rm64_CL => "rcr",
    Rcr_rm64_imm8 => "rcr",
    Rcr_rm8_1 => "rcr",
    Rcr_rm8_CL => "rcr",
    Rcr_rm8_imm8 => "rcr",
    Rdfsbase_r32 => "rdfsbase",
    Rdfsbase_r64 => "rdfsbase",
    Rdgsbase_r32 => "rdgsbase",
    Rdgsbase_r64 => "rdgsbase",
    Rdmsr => "rdmsr",
    Rdpkru => "rdpkru",
    Rdpmc => "rdpmc",
    Rdrand_r16 => "rdrand",
    Rdrand_r32 => "rdrand",
    Rdrand_r64 => "rdrand",
    Rdseed_r16 => "rdseed",
    Rdseed_r32 => "rdseed",
    Rdseed_r64 => "rdseed",
    Rdtsc => "rdtsc",
    Rdtscp => "rdtscp",
    Reservednop_rm16_r16_0F18 => "reservednop",
    Reservednop_rm16_r16_0F19 => "reservednop",
    Reservednop_rm16_r16_0F1A => "reservednop",
    Reservednop_rm16_r16_0F1B => "reservednop",
    Reservednop_rm16_r16_0F1C => "reservednop",
    Reservednop_rm16_r16_0F1D => "reservednop",
    Reservednop_rm16_r16_0F1E => "reservednop",
    Reservednop_rm16_r16_0F1F => "reservednop",
    Reservednop_rm32_r32_0F18 => "reservednop",
    Reservednop_rm32_r32_0F19 => "reservednop",
    Reservednop_rm32_r32_0F1A => "reservednop",
    Reservednop_rm32_r32_0F1B => "reservednop",
    Reservednop_rm32_r32_0F1C => "reservednop",
    Reservednop_rm32_r32_0F1D => "reservednop",
    Reservednop_rm32_r32_0F1E => "reservednop",
    Reservednop_rm32_r32_0F1F => "reservednop",
    Reservednop_rm64_r64_0F18 => "reservednop",
    Reservednop_rm64_r64_0F19 => "reservednop",
    Reservednop_rm64_r64_0F1A => "reservednop",
    Reservednop_rm64_r64_0F1B => "reservednop",
    Reservednop_rm64_r64_0F1C => "reservednop",
    Reservednop_rm64_r64_0F1D => "reservednop",
    Reservednop_rm64_r64_0F1E => "reservednop",
    Reservednop_rm64_r64_0F1F => "reservednop",
    Retfd => "retf",
    Retfd_imm16 => "retf",
    Retfq => "retf",
    Retfq_imm16 => "retf",
    Retfw => "retf",
    Retfw_imm16 => "retf",
    Retnd => "ret",
    Retnd_imm16 => "ret",
    Retnq => "ret",
    Retnq_imm16 => "ret",
    Retnw => "ret",
    Retnw_imm16 => "ret",
    Rol_rm16_1 => "rol",
    Rol_rm16_CL => "rol",
    Rol_rm16_imm8 => "rol",
    Rol_rm32_1 => "rol",
    Rol_rm32_CL => "rol",
    Rol_rm32_imm8 => "rol",
    Rol_rm64_1 => "rol",
    Rol_rm64_CL => "rol",
    Rol_rm64_imm8 => "rol",
    Rol_rm8_1 => "rol",
    Rol_rm8_CL => "rol",
    Rol_rm8_imm8 => "rol",
    Ror_rm16_1 => "ror",
    Ror_rm16_CL => "ror",
    Ror_rm16_imm8 => "ror",
    Ror_rm32_1 => "ror",
    Ror_rm32_CL => "ror",
    Ror_rm32_imm8 => "ror",
    Ror_rm64_1 => "ror",
    Ror_rm64_CL => "ror",
    Ror_rm64_imm8 => "ror",
    Ror_rm8_1 => "ror",
    Ror_rm8_CL => "ror",
    Ror_rm8_imm8 => "ror",
    Roundps_xmm_xmmm128_imm8 => "roundps",
    Rsm => "rsm",
    Sahf => "sahf",
    Sal_rm16_1 => "sal",
    Sal_rm16_CL => "sal",
    Sal_rm16_imm8 => "sal",
    Sal_rm32_1 => "sal",
    Sal_rm32_CL => "sal",
    Sal_rm32_imm8 => "sal",
    Sal_rm64_1 => "sal",
    Sal_rm64_CL => "sal",
    Sal_rm64_imm8 => "sal",
    Sal_rm8_1 => "sal",
    Sal_rm8_CL => "sal",
    Sal_rm8_imm8 => "sal",
    Salc => "salc",
    Sar_rm16_1 => "sar",
    Sar_rm16_CL => "sar",
    Sar_rm16_imm8 => "sar",
    Sar_rm32_1 => "sar",
    Sar_rm32_CL => "sar",
    Sar_rm32_imm8 => "sar",
    Sar_rm64_1 => "sar",
    Sar_rm64_CL => "sar",
    Sar_rm64_imm8 => "sar",
    Sar_rm8_1 => "sar",
    Sar_rm8_CL => "sar",
    Sar_rm8_imm8 => "sar",
    Sbb_AL_imm8 => "sbb",
    Sbb_AX_imm16 => "sbb",
    Sbb_EAX_imm32 => "sbb",
    Sbb_RAX_imm32 => "sbb",
    Sbb_r16_rm16 => "sbb",
    Sbb_r32_rm32 => "sbb",
    Sbb_r64_rm64 => "sbb",
    Sbb_r8_rm8 => "sbb",
    Sbb_rm16_imm16 => "sbb",
    Sbb_rm16_imm8 => "sbb",
    Sbb_rm16_r16 => "sbb",
    Sbb_rm32_imm32 => "sbb",
    Sbb_rm32_imm8 => "sbb",
    Sbb_rm32_r32 => "sbb",
    Sbb_rm64_imm32 => "sbb",
    Sbb_rm64_imm8 => "sbb",
    Sbb_rm64_r64 => "sbb",
    Sbb_rm8_imm8 => "sbb",
    Sbb_rm8_imm8_82 => "sbb",
    Sbb_rm8_r8 => "sbb",
    Scasb_AL_m8 => "scasb",
    Scasd_EAX_m32 => "scasd",
    Scasq_RAX_m64 => "scasq",
    Scasw_AX_m16 => "scasw",
    Seta_rm8 => "seta",
    Setae_rm8 => "setae",
    Setb_rm8 => "setb",
    Setbe_rm8 => "setbe",
    Sete_rm8 => "sete",
    Setg_rm8 => "setg",
    Setge_rm8 => "setge",
    Setl_rm8 => "setl",
    Setle_rm8 => "setle",
    Setne_rm8 => "setne",
    Setno_rm8 => "setno",
    Setnp_rm8 => "setnp",
    Setns_rm8 => "setns",
    Seto_rm8 => "seto",
    Setp_rm8 => "setp",
    Sets_rm8 => "sets",
    Sfence => "sfence",
    Sgdt_m1632 => "sgdt",
    Sgdt_m1632_16 => "sgdt",
    Sgdt_m1664 => "sgdt",
    Shl_rm16_1 => "shl",
    Shl_rm16_CL => "shl",
    Shl_rm16_imm8 => "shl",
    Shl_rm32_1 => "shl",
    Shl_rm32_CL => "shl",
    Shl_rm32_imm8 => "shl",
    Shl_rm64_1 => "shl",
    Shl_rm64_CL => "shl",
    Shl_rm64_imm8 => "shl",
    Shl_rm8_1 => "shl",
    Shl_rm8_CL => "shl",
    Shl_rm8_imm8 => "shl",
    Shld_rm16_r16_CL => "shld",
    Shld_rm16_r16_imm8 => "shld",
    Shld_rm32_r32_CL => "shld",
    Shld_rm32_r32_imm8 => "shld",
    Shld_rm64_r64_CL => "shld",
    Shld_rm64_r64_imm8 => "shld",
    Shr_rm16_1 => "shr",
    Shr_rm16_CL => "shr",
    Shr_rm16_imm8 => "shr",
    Shr_rm32_1 => "shr",
    Shr_rm32_CL => "shr",
    Shr_rm32_imm8 => "shr",
    Shr_rm64_1 => "shr",
    Shr_rm64_CL => "shr",
    Shr_rm64_imm8 => "shr",
    Shr_rm8_1 => "shr",
    Shr_rm8_CL => "shr",
    Shr_rm8_imm8 => "shr",
    Shrd_rm16_r16_CL => "shrd",
    Shrd_rm16_r16_imm8 => "shrd",
    Shrd_rm32_r32_CL => "shrd",
    Shrd_rm32_r32_imm8 => "shrd",
    Shrd_rm64_r64_CL => "shrd",
    Shrd_rm64_r64_imm8 => "shrd",
    Sidt_m1632 => "sidt",
    Sidt_m1632_16 => "sidt",
    Sidt_m1664 => "sidt",
    Sldt_r32m16 => "sldt",
    Sldt_r64m16 => "sldt",
    Sldt_rm16 => "sldt",
    Smsw_r32m16 => "smsw",
    Smsw_r64m16 => "smsw",
    Smsw_rm16 => "smsw",
    Sqrtpd_xmm_xmmm128 => "sqrtpd",
    Sqrtps_xmm_xmmm128 => "sqrtps",
    Sqrtsd_xmm_xmmm64 => "sqrtsd",
    Sqrtss_xmm_xmmm32 => "sqrtss",
    Stac => "stac",
    Stc => "stc",
    Std => "std",
    Sti => "sti",
    Stmxcsr_m32 => "stmxcsr",
    Stosb_m8_AL => "stosb",
    Stosd_m32_EAX => "stosd",
    Stosq_m64_RAX => "stosq",
    Stosw_m16_AX => "stosw",
    Str_r32m16 => "str",
    Str_r64m16 => "str",
    Str_rm16 => "str",
    Sub_AL_imm8 => "sub",
    Sub_AX_imm16 => "sub",
    Sub_EAX_imm32 => "sub",
    Sub_RAX_imm32 => "sub",
    Sub_r16_rm16 => "sub",
    Sub_r32_rm32 => "sub",
    Sub_r64_rm64 => "sub",
    Sub_r8_rm8 => "sub",
    Sub_rm16_imm16 => "sub",
    Sub_rm16_imm8 => "sub",
    Sub_rm16_r16 => "sub",
    Sub_rm32_imm32 => "sub",
    Sub_rm32_imm8 => "sub",
    Sub_rm32_r32 => "sub",
    Sub_rm64_imm32 => "sub",
    Sub_rm64_imm8 => "sub",
    Sub_rm64_r64 => "sub",
    Sub_rm8_imm8 => "sub",
    Sub_rm8_imm8_82 => "sub",
    Sub_rm8_r8 => "sub",
    Subpd_xmm_xmmm128 => "subpd",
    Subps_xmm_xmmm128 => "subps",
    Subsd_xmm_xmmm64 => "subsd",
    Subss_xmm_xmmm32 => "subss",
    Swapgs => "swapgs",
    Syscall => "syscall",
    Sysenter => "sysenter",
    Sysexitd => "sysexit",
    Sysexitq => "sysexitq",
    Sysretd => "sysret",
    Sysretq => "sysretq",
    Test_AL_imm8 => "test",
    Test_AX_imm16 => "test",
    Test_EAX_imm32 => "test",
    Test_RAX_imm32 => "test",
    Test_rm16_imm16 => "test",
    Test_rm16_imm16_F7r1 => "test",
    Test_rm16_r16 => "test",
    Test_rm32_imm32 => "test",
    Test_rm32_imm32_F7r1 => "test",
    Test_rm32_r32 => "test",
    Test_rm64_imm32 => "test",
    Test_rm64_imm32_F7r1 => "test",
    Test_rm64_r64 => "test",
    Test_rm8_imm8 => "test",
    Test_rm8_imm8_F6r1 => "test",
    Test_rm8_r8 => "test",
    Tzcnt_r16_rm16 => "tzcnt",
    Tzcnt_r32_rm32 => "tzcnt",
    Tzcnt_r64_rm64 => "tzcnt",
    Ucomisd_xmm_xmmm64 => "ucomisd",
    Ucomiss_xmm_xmmm32 => "ucomiss",
    Ud0_r16_rm16 => "ud0",
    Ud0_r32_rm32 => "ud0",
    Ud0_r64_rm64 => "ud0",
    Ud1_r16_rm16 => "ud1",
    Ud1_r32_rm32 => "ud1",
    Ud1_r64_rm64 => "ud1",
    Ud2 => "ud2",
    Umonitor_r16 => "umonitor",
    Umonitor_r32 => "umonitor",
    Umonitor_r64 => "umonitor",
    Umov_rm16_r16 => "umov",
    Umov_rm32_r32 => "umov",
    Umov_rm8_r8 => "umov",
    Unpckhpd_xmm_xmmm128 => "unpckhpd",
    Unpckhps_xmm_xmmm128 => "unpckhps",
    Unpcklpd_xmm_xmmm128 => "unpcklpd",
    Unpcklps_xmm_xmmm128 => "unpcklps",
    Verr_rm16 => "verr",
    Verw_rm16 => "verw",
    Vmcall => "vmcall",
    Vmread_rm32_r32 => "vmread",
    Vmread_rm64_r64 => "vmread",
    Vmwrite_r32_rm32 => "vmwrite",
    Vmwrite_r64_rm64 => "vmwrite",
    Wait => "wait",
    Wbinvd => "wbinvd",
    Wbnoinvd => "wbnoinvd",
    Wrfsbase_r32 => "wrfsbase",
    Wrfsbase_r64 => "wrfsbase",
    Wrgsbase_r32 => "wrgsbase",
    Wrgsbase_r64 => "wrgsbase",
    Wrmsr => "wrmsr",
    Wrpkru => "wrpkru",
    Xabort_imm8 => "xabort",
    Xadd_rm16_r16 => "xadd",
    Xadd_rm32_r32 => "xadd",
    Xadd_rm64_r64 => "xadd",
    Xadd_rm8_r8 => "xadd",
    Xbegin_rel16 => "xbegin",
    Xbegin_rel32 => "xbegin",
    Xchg_r16_AX => "xchg",
    Xchg_r32_EAX => "xchg",
    Xchg_r64_RAX => "xchg",
    Xchg_rm16_r16 => "xchg",
    Xchg_rm32_r32 => "xchg",
    Xchg_rm64_r64 => "xchg",
    Xchg_rm8_r8 => "xchg",
    Xend => "xend",
    Xgetbv => "xgetbv",
    Xlat_m8 => "xlat",
    Xor_AL_imm8 => "xor",
    Xor_AX_imm16 => "xor",
    Xor_EAX_imm32 => "xor",
    Xor_RAX_imm32 => "xor",
    Xor_r16_rm16 => "xor",
    Xor_r32_rm32 => "xor",
    Xor_r64_rm64 => "xor",
    Xor_r8_rm8 => "xor",
    Xor_rm16_imm16 => "xor",
    Xor_rm16_imm8 => "xor",
    Xor_rm16_r16 => "xor",
    Xor_rm32_imm32 => "xor",
    Xor_rm32_imm8 => "xor",
    Xor_rm32_r32 => "xor",
    Xor_rm64_imm32 => "xor",
    Xor_rm64_imm8 => "xor",
    Xor_rm64_r64 => "xor",
    Xor_rm8_imm8 => "xor",
    Xor_rm8_imm8_82 => "xor",
    Xor_rm8_r8 => "xor",
    Xorpd_xmm_xmmm128 => "xorpd",
    Xorps_xmm_xmmm128 => "xorps",
    Xrstor64_mem => "xrstor64",
    Xrstor_mem => "xrstor",
    Xsave64_mem => "xsave64",
    Xsave_mem => "xsave",
    Xsaveopt64_mem => "xsaveopt64",
    Xsaveopt_mem => "xsaveopt",
    Xsetbv => "xsetbv",
    Xtest => "xtest",

    /// VEX-encoded (`C4`/`C5`) forms.
    VEX_Andn_r32_r32_rm32 => "andn",
    VEX_Andn_r64_r64_rm64 => "andn",
    VEX_Bextr_r32_rm32_r32 => "bextr",
    VEX_Bextr_r64_rm64_r64 => "bextr",
    VEX_Sarx_r32_rm32_r32 => "sarx",
    VEX_Sarx_r64_rm64_r64 => "sarx",
    VEX_Shlx_r32_rm32_r32 => "shlx",
    VEX_Shlx_r64_rm64_r64 => "shlx",
    VEX_Shrx_r32_rm32_r32 => "shrx",
    VEX_Shrx_r64_rm64_r64 => "shrx",
    VEX_Vaddpd_xmm_xmm_xmmm128 => "vaddpd",
    VEX_Vaddpd_ymm_ymm_ymmm256 => "vaddpd",
    VEX_Vaddps_xmm_xmm_xmmm128 => "vaddps",
    VEX_Vaddps_ymm_ymm_ymmm256 => "vaddps",
    VEX_Vaddsd_xmm_xmm_xmmm64 => "vaddsd",
    VEX_Vaddss_xmm_xmm_xmmm32 => "vaddss",
    VEX_Vandpd_xmm_xmm_xmmm128 => "vandpd",
    VEX_Vandpd_ymm_ymm_ymmm256 => "vandpd",
    VEX_Vandps_xmm_xmm_xmmm128 => "vandps",
    VEX_Vandps_ymm_ymm_ymmm256 => "vandps",
    VEX_Vblendvpd_xmm_xmm_xmmm128_xmm => "vblendvpd",
    VEX_Vblendvpd_ymm_ymm_ymmm256_ymm => "vblendvpd",
    VEX_Vblendvps_xmm_xmm_xmmm128_xmm => "vblendvps",
    VEX_Vblendvps_ymm_ymm_ymmm256_ymm => "vblendvps",
    VEX_Vbroadcastss_xmm_m32 => "vbroadcastss",
    VEX_Vbroadcastss_ymm_m32 => "vbroadcastss",
    VEX_Vdivpd_xmm_xmm_xmmm128 => "vdivpd",
    VEX_Vdivpd_ymm_ymm_ymmm256 => "vdivpd",
    VEX_Vdivps_xmm_xmm_xmmm128 => "vdivps",
    VEX_Vdivps_ymm_ymm_ymmm256 => "vdivps",
    VEX_Vdivsd_xmm_xmm_xmmm64 => "vdivsd",
    VEX_Vdivss_xmm_xmm_xmmm32 => "vdivss",
    VEX_Vmaxpd_xmm_xmm_xmmm128 => "vmaxpd",
    VEX_Vmaxpd_ymm_ymm_ymmm256 => "vmaxpd",
    VEX_Vmaxps_xmm_xmm_xmmm128 => "vmaxps",
    VEX_Vmaxps_ymm_ymm_ymmm256 => "vmaxps",
    VEX_Vmaxsd_xmm_xmm_xmmm64 => "vmaxsd",
    VEX_Vmaxss_xmm_xmm_xmmm32 => "vmaxss",
    VEX_Vminpd_xmm_xmm_xmmm128 => "vminpd",
    VEX_Vminpd_ymm_ymm_ymmm256 => "vminpd",
    VEX_Vminps_xmm_xmm_xmmm128 => "vminps",
    VEX_Vminps_ymm_ymm_ymmm256 => "vminps",
    VEX_Vminsd_xmm_xmm_xmmm64 => "vminsd",
    VEX_Vminss_xmm_xmm_xmmm32 => "vminss",
    VEX_Vmovapd_xmm_xmmm128 => "vmovapd",
    VEX_Vmovapd_xmmm128_xmm => "vmovapd",
    VEX_Vmovapd_ymm_ymmm256 => "vmovapd",
    VEX_Vmovapd_ymmm256_ymm => "vmovapd",
    VEX_Vmovaps_xmm_xmmm128 => "vmovaps",
    VEX_Vmovaps_xmmm128_xmm => "vmovaps",
    VEX_Vmovaps_ymm_ymmm256 => "vmovaps",
    VEX_Vmovaps_ymmm256_ymm => "vmovaps",
    VEX_Vmovd_rm32_xmm => "vmovd",
    VEX_Vmovd_xmm_rm32 => "vmovd",
    VEX_Vmovdqa_xmm_xmmm128 => "vmovdqa",
    VEX_Vmovdqa_xmmm128_xmm => "vmovdqa",
    VEX_Vmovdqa_ymm_ymmm256 => "vmovdqa",
    VEX_Vmovdqa_ymmm256_ymm => "vmovdqa",
    VEX_Vmovdqu_xmm_xmmm128 => "vmovdqu",
    VEX_Vmovdqu_xmmm128_xmm => "vmovdqu",
    VEX_Vmovdqu_ymm_ymmm256 => "vmovdqu",
    VEX_Vmovdqu_ymmm256_ymm => "vmovdqu",
    VEX_Vmovntdq_m128_xmm => "vmovntdq",
    VEX_Vmovntdq_m256_ymm => "vmovntdq",
    VEX_Vmovq_rm64_xmm => "vmovq",
    VEX_Vmovq_xmm_rm64 => "vmovq",
    VEX_Vmovq_xmm_xmmm64 => "vmovq",
    VEX_Vmovsd_m64_xmm => "vmovsd",
    VEX_Vmovsd_xmm_m64 => "vmovsd",
    VEX_Vmovsd_xmm_xmm_xmm => "vmovsd",
    VEX_Vmovss_m32_xmm => "vmovss",
    VEX_Vmovss_xmm_m32 => "vmovss",
    VEX_Vmovss_xmm_xmm_xmm => "vmovss",
    VEX_Vmovupd_xmm_xmmm128 => "vmovupd",
    VEX_Vmovupd_xmmm128_xmm => "vmovupd",
    VEX_Vmovupd_ymm_ymmm256 => "vmovupd",
    VEX_Vmovupd_ymmm256_ymm => "vmovupd",
    VEX_Vmovups_xmm_xmmm128 => "vmovups",
    VEX_Vmovups_xmmm128_xmm => "vmovups",
    VEX_Vmovups_ymm_ymmm256 => "vmovups",
    VEX_Vmovups_ymmm256_ymm => "vmovups",
    VEX_Vmulpd_xmm_xmm_xmmm128 => "vmulpd",
    VEX_Vmulpd_ymm_ymm_ymmm256 => "vmulpd",
    VEX_Vmulps_xmm_xmm_xmmm128 => "vmulps",
    VEX_Vmulps_ymm_ymm_ymmm256 => "vmulps",
    VEX_Vmulsd_xmm_xmm_xmmm64 => "vmulsd",
    VEX_Vmulss_xmm_xmm_xmmm32 => "vmulss",
    VEX_Vpaddb_xmm_xmm_xmmm128 => "vpaddb",
    VEX_Vpaddb_ymm_ymm_ymmm256 => "vpaddb",
    VEX_Vpaddd_xmm_xmm_xmmm128 => "vpaddd",
    VEX_Vpaddd_ymm_ymm_ymmm256 => "vpaddd",
    VEX_Vpaddq_xmm_xmm_xmmm128 => "vpaddq",
    VEX_Vpaddq_ymm_ymm_ymmm256 => "vpaddq",
    VEX_Vpaddw_xmm_xmm_xmmm128 => "vpaddw",
    VEX_Vpaddw_ymm_ymm_ymmm256 => "vpaddw",
    VEX_Vpalignr_xmm_xmm_xmmm128_imm8 => "vpalignr",
    VEX_Vpalignr_ymm_ymm_ymmm256_imm8 => "vpalignr",
    VEX_Vpand_xmm_xmm_xmmm128 => "vpand",
    VEX_Vpand_ymm_ymm_ymmm256 => "vpand",
    VEX_Vpor_xmm_xmm_xmmm128 => "vpor",
    VEX_Vpor_ymm_ymm_ymmm256 => "vpor",
    VEX_Vpshufb_xmm_xmm_xmmm128 => "vpshufb",
    VEX_Vpshufb_ymm_ymm_ymmm256 => "vpshufb",
    VEX_Vpxor_xmm_xmm_xmmm128 => "vpxor",
    VEX_Vpxor_ymm_ymm_ymmm256 => "vpxor",
    VEX_Vsqrtpd_xmm_xmmm128 => "vsqrtpd",
    VEX_Vsqrtpd_ymm_ymmm256 => "vsqrtpd",
    VEX_Vsqrtps_xmm_xmmm128 => "vsqrtps",
    VEX_Vsqrtps_ymm_ymmm256 => "vsqrtps",
    VEX_Vsqrtsd_xmm_xmm_xmmm64 => "vsqrtsd",
    VEX_Vsqrtss_xmm_xmm_xmmm32 => "vsqrtss",
    VEX_Vsubpd_xmm_xmm_xmmm128 => "vsubpd",
    VEX_Vsubpd_ymm_ymm_ymmm256 => "vsubpd",
    VEX_Vsubps_xmm_xmm_xmmm128 => "vsubps",
    VEX_Vsubps_ymm_ymm_ymmm256 => "vsubps",
    VEX_Vsubsd_xmm_xmm_xmmm64 => "vsubsd",
    VEX_Vsubss_xmm_xmm_xmmm32 => "vsubss",
    VEX_Vxorpd_xmm_xmm_xmmm128 => "vxorpd",
    VEX_Vxorpd_ymm_ymm_ymmm256 => "vxorpd",
    VEX_Vxorps_xmm_xmm_xmmm128 => "vxorps",
    VEX_Vxorps_ymm_ymm_ymmm256 => "vxorps",
    VEX_Vzeroall => "vzeroall",
    VEX_Vzeroupper => "vzeroupper",

    /// AMD XOP-encoded (`8F`) forms.
    XOP_Vfrczpd_xmm_xmmm128 => "vfrczpd",
    XOP_Vfrczpd_ymm_ymmm256 => "vfrczpd",
    XOP_Vfrczps_xmm_xmmm128 => "vfrczps",
    XOP_Vfrczps_ymm_ymmm256 => "vfrczps",
    XOP_Vpcmov_xmm_xmm_xmmm128_xmm => "vpcmov",
    XOP_Vpcmov_ymm_ymm_ymmm256_ymm => "vpcmov",

    /// EVEX-encoded (`62`) forms.
    EVEX_Vaddpd_xmm_k1z_xmm_xmmm128b64 => "vaddpd",
    EVEX_Vaddpd_ymm_k1z_ymm_ymmm256b64 => "vaddpd",
    EVEX_Vaddpd_zmm_k1z_zmm_zmmm512b64_er => "vaddpd",
    EVEX_Vaddps_xmm_k1z_xmm_xmmm128b32 => "vaddps",
    EVEX_Vaddps_ymm_k1z_ymm_ymmm256b32 => "vaddps",
    EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er => "vaddps",
    EVEX_Vbroadcastss_xmm_k1z_xmmm32 => "vbroadcastss",
    EVEX_Vbroadcastss_ymm_k1z_xmmm32 => "vbroadcastss",
    EVEX_Vbroadcastss_zmm_k1z_xmmm32 => "vbroadcastss",
    EVEX_Vmaxps_xmm_k1z_xmm_xmmm128b32 => "vmaxps",
    EVEX_Vmaxps_ymm_k1z_ymm_ymmm256b32 => "vmaxps",
    EVEX_Vmaxps_zmm_k1z_zmm_zmmm512b32_sae => "vmaxps",
    EVEX_Vmovupd_xmm_k1z_xmmm128 => "vmovupd",
    EVEX_Vmovupd_xmmm128_k1z_xmm => "vmovupd",
    EVEX_Vmovupd_ymm_k1z_ymmm256 => "vmovupd",
    EVEX_Vmovupd_ymmm256_k1z_ymm => "vmovupd",
    EVEX_Vmovupd_zmm_k1z_zmmm512 => "vmovupd",
    EVEX_Vmovupd_zmmm512_k1z_zmm => "vmovupd",
    EVEX_Vmovups_xmm_k1z_xmmm128 => "vmovups",
    EVEX_Vmovups_xmmm128_k1z_xmm => "vmovups",
    EVEX_Vmovups_ymm_k1z_ymmm256 => "vmovups",
    EVEX_Vmovups_ymmm256_k1z_ymm => "vmovups",
    EVEX_Vmovups_zmm_k1z_zmmm512 => "vmovups",
    EVEX_Vmovups_zmmm512_k1z_zmm => "vmovups",
    EVEX_Vmulpd_xmm_k1z_xmm_xmmm128b64 => "vmulpd",
    EVEX_Vmulpd_ymm_k1z_ymm_ymmm256b64 => "vmulpd",
    EVEX_Vmulpd_zmm_k1z_zmm_zmmm512b64_er => "vmulpd",
    EVEX_Vmulps_xmm_k1z_xmm_xmmm128b32 => "vmulps",
    EVEX_Vmulps_ymm_k1z_ymm_ymmm256b32 => "vmulps",
    EVEX_Vmulps_zmm_k1z_zmm_zmmm512b32_er => "vmulps",
    EVEX_Vpalignr_xmm_k1z_xmm_xmmm128_imm8 => "vpalignr",
    EVEX_Vpalignr_ymm_k1z_ymm_ymmm256_imm8 => "vpalignr",
    EVEX_Vpalignr_zmm_k1z_zmm_zmmm512_imm8 => "vpalignr",
    EVEX_Vpxord_xmm_k1z_xmm_xmmm128b32 => "vpxord",
    EVEX_Vpxord_ymm_k1z_ymm_ymmm256b32 => "vpxord",
    EVEX_Vpxord_zmm_k1z_zmm_zmmm512b32 => "vpxord",
    EVEX_Vpxorq_xmm_k1z_xmm_xmmm128b64 => "vpxorq",
    EVEX_Vpxorq_ymm_k1z_ymm_ymmm256b64 => "vpxorq",
    EVEX_Vpxorq_zmm_k1z_zmm_zmmm512b64 => "vpxorq",
    EVEX_Vsubpd_xmm_k1z_xmm_xmmm128b64 => "vsubpd",
    EVEX_Vsubpd_ymm_k1z_ymm_ymmm256b64 => "vsubpd",
    EVEX_Vsubpd_zmm_k1z_zmm_zmmm512b64_er => "vsubpd",
    EVEX_Vsubps_xmm_k1z_xmm_xmmm128b32 => "vsubps",
    EVEX_Vsubps_ymm_k1z_ymm_ymmm256b32 => "vsubps",
    EVEX_Vsubps_zmm_k1z_zmm_zmmm512b32_er => "vsubps",
}

impl Code {
    pub fn is_invalid(&self) -> bool {
        *self == Code::INVALID
    }

    /// `cmps` and `scas`: the string instructions where `F3` means `repe`.
    pub fn is_string_compare(&self) -> bool {
        matches!(
            self,
            Code::Cmpsb_m8_m8
                | Code::Cmpsw_m16_m16
                | Code::Cmpsd_m32_m32
                | Code::Cmpsq_m64_m64
                | Code::Scasb_AL_m8
                | Code::Scasw_AX_m16
                | Code::Scasd_EAX_m32
                | Code::Scasq_RAX_m64
        )
    }
}

impl Default for Code {
    fn default() -> Self {
        Code::INVALID
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod test {
    use super::Code;

    #[test]
    fn mnemonics_drop_operand_forms() {
        assert_eq!(Code::Add_rm32_r32.mnemonic(), "add");
        assert_eq!(Code::Retnq_imm16.mnemonic(), "ret");
        assert_eq!(Code::Pushq_imm32.mnemonic(), "push");
        assert_eq!(Code::Nopw.mnemonic(), "nop");
        assert_eq!(Code::VEX_Vaddps_ymm_ymm_ymmm256.mnemonic(), "vaddps");
        assert_eq!(Code::EVEX_Vpxorq_zmm_k1z_zmm_zmmm512b64.mnemonic(), "vpxorq");
        assert_eq!(format!("{}", Code::INVALID), "invalid");
    }

    #[test]
    fn invalid_is_zero() {
        assert_eq!(Code::INVALID as u16, 0);
        assert_eq!(Code::default(), Code::INVALID);
        assert!(Code::INVALID.is_invalid());
        assert!(!Code::Ud2.is_invalid());
    }
}
