#![no_main]
use libfuzzer_sys::fuzz_target;
use optset::{Parser, Registry, Value};

// A fixed registry covering every value kind, fed random argument
// vectors. We check some basic invariants but mainly make sure parsing
// doesn't panic or hang.
fuzz_target!(|data: &[u8]| {
    let args: Vec<String> = data
        // Arguments can't contain null bytes (on Unix) so it's a
        // reasonable separator
        .split(|&x| x == b'\0')
        .map(|arg| String::from_utf8_lossy(arg).into_owned())
        .collect();

    let mut registry = Registry::new();
    let verbose = registry.add_flag('v', "verbose").unwrap();
    let all = registry.add_flag('a', "all").unwrap();
    let debug = registry.add_int('d', "debug").unwrap();
    let count = registry.add_long('c', "count").unwrap();
    let ratio = registry.add_double('r', "ratio").unwrap();
    let name = registry.add_str('n', "name").unwrap();
    let parser = Parser::new(registry);

    match parser.parse(args.clone()) {
        Ok(mut parsed) => {
            // Remaining arguments must be a subsequence of the input.
            let mut input = args.iter();
            for leftover in parsed.remaining().to_vec() {
                assert!(input.any(|arg| *arg == leftover));
            }
            // Every accumulated value carries its option's kind.
            for value in parsed.values(&verbose) {
                assert_eq!(value, Value::Flag(true));
            }
            for value in parsed.values(&all) {
                assert_eq!(value, Value::Flag(true));
            }
            for value in parsed.values(&debug) {
                assert!(matches!(value, Value::Int(_)));
            }
            for value in parsed.values(&count) {
                assert!(matches!(value, Value::Long(_)));
            }
            for value in parsed.values(&ratio) {
                assert!(matches!(value, Value::Double(_)));
            }
            for value in parsed.values(&name) {
                assert!(matches!(value, Value::Str(_)));
            }
            // Drained results stay drained.
            assert_eq!(parsed.value(&name), None);
        }
        Err(err) => {
            // Errors must always format.
            let _ = err.to_string();
        }
    }
});
