#![no_main]
use libfuzzer_sys::fuzz_target;

// Input layout: a schema document and an instance document separated by a NUL byte.
fuzz_target!(|data: &[u8]| {
    let Some(split) = data.iter().position(|byte| *byte == 0) else {
        return;
    };
    let (schema, instance) = (&data[..split], &data[split + 1..]);
    let (Ok(schema), Ok(instance)) = (
        serde_json::from_slice::<serde_json::Value>(schema),
        serde_json::from_slice::<serde_json::Value>(instance),
    ) else {
        return;
    };
    if let Ok(validator) = verdict::options()
        .should_validate_schema(false)
        .build(&schema)
    {
        let verdict = validator.is_valid(&instance);
        assert_eq!(verdict, validator.is_valid(&instance));
    }
});
