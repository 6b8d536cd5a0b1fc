#![no_main]
use libfuzzer_sys::fuzz_target;

use yaxpeax_arch::Decoder;
use yaxpeax_x86_handlers::{DecoderOptions, InstDecoder};

use std::fmt::Write;

fuzz_target!(|data: &[u8]| {
    let decoders = [
        InstDecoder::x86_16(),
        InstDecoder::x86_32(),
        InstDecoder::x86_64(),
        InstDecoder::x86_64().with_options(DecoderOptions::NO_INVALID_CHECK | DecoderOptions::AMD),
    ];

    let mut inst = yaxpeax_x86_handlers::Instruction::default();

    for decoder in decoders {
        let mut words = yaxpeax_arch::U8Reader::new(data);
        // every input either decodes or runs out of bytes; neither panics
        if let Ok(()) = decoder.decode_into(&mut inst, &mut words) {
            assert!(inst.length() as usize <= data.len().min(15));
            write!(&mut String::new(), "{}", inst).expect("formatting does not panic either");
        }
    }
});
