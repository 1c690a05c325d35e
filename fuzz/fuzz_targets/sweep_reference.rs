#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = disksweeper::arbitrary::sweep_matches_reference(&mut Unstructured::new(data));
});
