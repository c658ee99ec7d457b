#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(schema) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = verdict::validator_for(&schema);
        let _ = verdict::options()
            .should_validate_schema(false)
            .build(&schema);
    }
});
