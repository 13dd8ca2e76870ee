#![no_main]

use libfuzzer_sys::fuzz_target;
use pendulum_layout::xlsx::parse_shared_strings;

fuzz_target!(|data: &[u8]| {
    let _ = parse_shared_strings(data);
});
