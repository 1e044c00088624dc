#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let (bits, table) = huffcode::encode(data).unwrap();
    assert!(table.is_prefix_free());

    let decoded = huffcode::decode(&bits, &table).unwrap();
    assert_eq!(data, decoded.as_slice());
});
