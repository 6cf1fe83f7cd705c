use optset::{Parser, Registry, Value};

fn main() -> Result<(), optset::Error> {
    let mut registry = Registry::new();
    let number = registry.add_int('n', "number")?;
    let shout = registry.add_flag(None, "shout")?;
    let help = registry.add_flag('h', "help")?;

    let parser = Parser::new(registry);
    let mut parsed = parser.parse(std::env::args().skip(1))?;

    if parsed.seen(&help) {
        println!("Usage: hello [-n|--number=NUM] [--shout] THING");
        return Ok(());
    }

    let times = parsed.value_or(&number, Value::Int(1)).as_int().unwrap();
    let shout = parsed.seen(&shout);
    let thing = match parsed.remaining().first() {
        Some(thing) => thing.clone(),
        None => {
            eprintln!("hello: missing argument THING");
            std::process::exit(1);
        }
    };

    let mut message = format!("Hello {}", thing);
    if shout {
        message = message.to_uppercase();
    }
    for _ in 0..times {
        println!("{}", message);
    }
    Ok(())
}
