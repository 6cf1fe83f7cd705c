//! A toy version of tail's argument handling.

use optset::{Parser, Registry, Value};

fn main() -> Result<(), optset::Error> {
    let mut registry = Registry::new();
    let follow = registry.add_flag('f', "follow")?;
    let lines = registry.add_long('n', "lines")?;
    let quiet = registry.add_flag('q', "quiet")?;

    let parser = Parser::new(registry);
    let mut parsed = parser.parse(std::env::args().skip(1))?;

    let follow = parsed.seen(&follow);
    let quiet = parsed.seen(&quiet);
    let lines = parsed.value_or(&lines, Value::Long(10)).as_long().unwrap();

    for file in parsed.remaining() {
        if !quiet {
            println!("==> {} <==", file);
        }
        println!(
            "(would print the last {} lines of {}{})",
            lines,
            file,
            if follow { ", then follow" } else { "" },
        );
    }
    Ok(())
}
