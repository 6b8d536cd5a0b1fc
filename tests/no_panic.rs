use proptest::prelude::*;
use yaxpeax_arch::{Decoder, U8Reader};
use yaxpeax_x86_handlers::{InstDecoder, Instruction};

fn decoders() -> [InstDecoder; 3] {
    [InstDecoder::x86_16(), InstDecoder::x86_32(), InstDecoder::x86_64()]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 4096,
        .. ProptestConfig::default()
    })]

    #[test]
    fn decoding_never_panics_and_stays_in_bounds(bytes in proptest::collection::vec(any::<u8>(), 0..=20)) {
        for decoder in decoders() {
            let mut reader = U8Reader::new(&bytes);
            if let Ok(inst) = decoder.decode(&mut reader) {
                prop_assert!(inst.length() >= 1);
                prop_assert!(inst.length() <= 15);
                prop_assert!(inst.length() as usize <= bytes.len());
                prop_assert!(inst.operand_count() <= 4);
                let _ = format!("{}", inst);
            }
        }
    }

    #[test]
    fn reused_instructions_decode_like_fresh_ones(
        first in proptest::collection::vec(any::<u8>(), 1..=15),
        second in proptest::collection::vec(any::<u8>(), 1..=15),
    ) {
        for decoder in decoders() {
            let mut reused = Instruction::default();
            let _ = decoder.decode_into(&mut reused, &mut U8Reader::new(&first));
            let res = decoder.decode_into(&mut reused, &mut U8Reader::new(&second));
            let fresh = decoder.decode(&mut U8Reader::new(&second));
            match (res, fresh) {
                (Ok(()), Ok(fresh)) => prop_assert_eq!(reused, fresh),
                (Err(a), Err(b)) => prop_assert_eq!(a, b),
                (a, b) => prop_assert!(false, "reused {:?} vs fresh {:?}", a, b),
            }
        }
    }
}
