use yaxpeax_arch::{Decoder, U8Reader};
use yaxpeax_x86_handlers::{Code, EncodingKind, InstDecoder, Instruction};

// encodings here are checked against the SDM's opcode tables and objdump's rendering, modulo
// this crate's operand syntax.

fn decode(decoder: &InstDecoder, bytes: &[u8]) -> Instruction {
    decoder.decode(&mut U8Reader::new(bytes)).expect("decode succeeds")
}

fn test_display(decoder: &InstDecoder, bytes: &[u8], text: &str) {
    let inst = decode(decoder, bytes);
    assert_eq!(inst.length() as usize, bytes.len(), "length of {:02x?}", bytes);
    let rendered = format!("{}", inst);
    assert_eq!(rendered, text);
}

#[test]
fn legacy_64() {
    let decoder = InstDecoder::x86_64();
    test_display(&decoder, &[0xb8, 0x12, 0x34, 0x56, 0x78], "mov eax, 0x78563412");
    test_display(&decoder, &[0x48, 0x8b, 0x44, 0x8b, 0x10], "mov rax, [rbx+rcx*4+0x10]");
    test_display(&decoder, &[0xf0, 0x01, 0x00], "lock add [rax], eax");
    test_display(&decoder, &[0x41, 0x50], "push r8");
    test_display(&decoder, &[0x90], "nop");
    test_display(&decoder, &[0xf3, 0x90], "pause");
    test_display(&decoder, &[0x87, 0xc8], "xchg eax, ecx");
    test_display(&decoder, &[0xeb, 0x10], "jmp 0x12");
    test_display(&decoder, &[0xf7, 0xd8], "neg eax");
    test_display(&decoder, &[0x0f, 0x05], "syscall");
    test_display(&decoder, &[0x0f, 0xa2], "cpuid");
    test_display(&decoder, &[0x64, 0x8b, 0x04, 0x25, 0x28, 0x00, 0x00, 0x00], "mov eax, fs:[0x28]");
    test_display(&decoder, &[0x8b, 0x05, 0xf0, 0xff, 0xff, 0xff], "mov eax, [rip-0x10]");
}

#[test]
fn string_prefixes() {
    let decoder = InstDecoder::x86_64();
    test_display(&decoder, &[0xf3, 0xa6], "repe cmpsb [rsi], es:[rdi]");
    test_display(&decoder, &[0xf3, 0xaa], "rep stosb es:[rdi], al");
    test_display(&decoder, &[0xf2, 0xae], "repne scasb al, es:[rdi]");
}

#[test]
fn legacy_32_and_16() {
    let decoder = InstDecoder::x86_32();
    test_display(&decoder, &[0x40], "inc eax");
    test_display(&decoder, &[0x8b, 0x40, 0xff], "mov eax, [eax-0x1]");
    test_display(&decoder, &[0x4f], "dec edi");
    test_display(&decoder, &[0x60], "pushad");
    test_display(&decoder, &[0x9a, 0x78, 0x56, 0x34, 0x12, 0x08, 0x00], "call 0x8:0x12345678");

    let decoder = InstDecoder::x86_16();
    test_display(&decoder, &[0xb8, 0x34, 0x12], "mov ax, 0x1234");
    test_display(&decoder, &[0x8b, 0x43, 0x7f], "mov ax, [bp+di*1+0x7f]");
}

#[test]
fn vex_and_evex() {
    let decoder = InstDecoder::x86_64();
    test_display(&decoder, &[0xc5, 0xf8, 0x58, 0xc1], "vaddps xmm0, xmm0, xmm1");
    test_display(&decoder, &[0xc5, 0xfc, 0x58, 0xc1], "vaddps ymm0, ymm0, ymm1");
    test_display(&decoder, &[0xc5, 0xf8, 0x77], "vzeroupper");
    test_display(&decoder, &[0x62, 0xf1, 0x6c, 0x78, 0x58, 0xcb], "vaddps zmm1, zmm2, zmm3, {rz-sae}");
    test_display(&decoder, &[0x62, 0xf1, 0x6c, 0x38, 0x58, 0xcb], "vaddps zmm1, zmm2, zmm3, {rd-sae}");
    assert_eq!(decode(&decoder, &[0xc5, 0xf8, 0x77]).encoding(), EncodingKind::Vex);
    assert_eq!(decode(&decoder, &[0x90]).encoding(), EncodingKind::Legacy);

    // c5 is `lds` outside 64-bit mode when ModRM.mod is not 3
    let decoder = InstDecoder::x86_32();
    assert_eq!(decode(&decoder, &[0xc5, 0x00]).code(), Code::Lds_r32_m1632);
}

#[test]
fn undefined_encodings_have_a_length() {
    let decoder = InstDecoder::x86_64();
    // push es, salc, and popcnt without its F3
    for bytes in [&[0x06][..], &[0xd6][..], &[0x0f, 0xb8, 0xc0][..]] {
        let inst = decode(&decoder, bytes);
        assert_eq!(inst.code(), Code::INVALID, "{:02x?}", bytes);
        assert_eq!(inst.length() as usize, bytes.len());
        assert_eq!(format!("{}", inst), "invalid");
    }
    assert_eq!(decode(&decoder, &[0x0f, 0x0b]).code(), Code::Ud2);
}
