#![no_main]

use libfuzzer_sys::fuzz_target;
use pendulum_layout::xlsx::parse_worksheet;

fuzz_target!(|data: &[u8]| {
    let shared = ["N".to_string(), "e".to_string(), "D1".to_string()];
    let _ = parse_worksheet(data, &shared);
});
