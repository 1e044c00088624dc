#![no_main]
use huffcode::{BitString, Decoder, Error, FrequencyTable};
use libfuzzer_sys::fuzz_target;

// Arbitrary bit streams against a fixed code must decode or fail cleanly.
fuzz_target!(|data: (Vec<u8>, Vec<bool>)| {
    let (sample, raw_bits) = data;
    let freqs = FrequencyTable::from_symbols(sample);
    let decoder = match huffcode::CodeTree::from_frequencies(&freqs) {
        Ok(tree) => Decoder::new(tree),
        Err(Error::EmptyAlphabet) => return,
        Err(e) => panic!("construction failed: {e}"),
    };

    let bits = BitString::from(raw_bits);
    match decoder.decode(&bits) {
        Ok(_) | Err(Error::TruncatedStream { .. }) | Err(Error::MalformedTree { .. }) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }
});
