//! A declarative, largely GNU-compatible command line option parser.
//!
//! You register the options you accept — short (`-v`) and long
//! (`--verbose`) spellings, with or without an associated value — then
//! hand over the argument vector and query the typed values afterwards.
//!
//! Supported syntax: `--debug 2`, `--debug=2`, `-d 2`, bundled boolean
//! flags (`-abc` for `-a -b -c`), and the `--` terminator after which
//! every remaining token is positional regardless of leading dashes.
//!
//! Values are read back destructively: each read removes the occurrence
//! it returns, earliest first. See [`ParseResult`] for the details of
//! that contract.
//!
//! ## Example
//! ```no_run
//! fn main() -> Result<(), optset::Error> {
//!     let mut registry = optset::Registry::new();
//!     let shout = registry.add_flag(None, "shout")?;
//!     let number = registry.add_int('n', "number")?;
//!
//!     let parser = optset::Parser::new(registry);
//!     let mut parsed = parser.parse(std::env::args().skip(1))?;
//!
//!     let times = parsed.value_or(&number, optset::Value::Int(1));
//!     for arg in parsed.remaining() {
//!         let mut message = format!("Hello {}", arg);
//!         if parsed.seen(&shout) {
//!             message = message.to_uppercase();
//!         }
//!         for _ in 0..times.as_int().unwrap() {
//!             println!("{}", message);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::{HashMap, VecDeque};
use std::fmt::Display;
use std::sync::Arc;

mod num;

pub use num::{DelimitedNumber, NumberFormat, PlainNumber};

/// The value syntax a registered option accepts.
///
/// [`Flag`][ValueKind::Flag] options take no value; every other kind
/// consumes one, supplied either inline (`--debug=2`) or as the next
/// argument (`--debug 2`, `-d 2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A no-value boolean flag. Recorded as `true` per occurrence.
    Flag,
    /// A base-10 signed 32-bit integer.
    Int,
    /// A base-10 signed 64-bit integer.
    Long,
    /// A floating-point number, parsed by the active [`NumberFormat`].
    Double,
    /// An uninterpreted string.
    Str,
}

impl ValueKind {
    /// Whether options of this kind consume a value.
    pub fn requires_value(self) -> bool {
        !matches!(self, ValueKind::Flag)
    }
}

/// A parsed option value, tagged with the kind that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A flag occurrence. Always `true`.
    Flag(bool),
    /// An [`Int`][ValueKind::Int] value.
    Int(i32),
    /// A [`Long`][ValueKind::Long] value.
    Long(i64),
    /// A [`Double`][ValueKind::Double] value.
    Double(f64),
    /// A [`Str`][ValueKind::Str] value.
    Str(String),
}

impl Value {
    /// The boolean inside a `Flag` value.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Flag(flag) => Some(flag),
            _ => None,
        }
    }

    /// The integer inside an `Int` value.
    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Value::Int(int) => Some(int),
            _ => None,
        }
    }

    /// The integer inside a `Long` value.
    pub fn as_long(&self) -> Option<i64> {
        match *self {
            Value::Long(long) => Some(long),
            _ => None,
        }
    }

    /// The number inside a `Double` value.
    pub fn as_double(&self) -> Option<f64> {
        match *self {
            Value::Double(double) => Some(double),
            _ => None,
        }
    }

    /// The text inside a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Consume a `Str` value, keeping its text.
    pub fn into_string(self) -> Option<String> {
        match self {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }
}

/// A single declared option.
///
/// Definitions are created through [`Registry`] registration, which hands
/// back a shared [`Arc<OptionDef>`] handle. Definitions are immutable
/// once built, and the same handle is used afterwards to query the
/// [`ParseResult`].
#[derive(Debug, PartialEq, Eq)]
pub struct OptionDef {
    short: Option<char>,
    long: String,
    kind: ValueKind,
}

impl OptionDef {
    /// Create a definition with the given value kind and spellings.
    ///
    /// # Panics
    ///
    /// Panics if `long` is empty.
    pub fn new(kind: ValueKind, short: impl Into<Option<char>>, long: &str) -> OptionDef {
        assert!(!long.is_empty(), "option long form must not be empty");
        OptionDef {
            short: short.into(),
            long: long.to_owned(),
            kind,
        }
    }

    /// The single-character spelling, if one was declared.
    pub fn short_form(&self) -> Option<char> {
        self.short
    }

    /// The long spelling, without the leading dashes.
    pub fn long_form(&self) -> &str {
        &self.long
    }

    /// The value syntax this option accepts.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether this option consumes a value.
    pub fn requires_value(&self) -> bool {
        self.kind.requires_value()
    }
}

/// Shows the option the way error messages spell it, e.g. `-d/--debug`.
impl Display for OptionDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(short) = self.short {
            write!(f, "-{}/", short)?;
        }
        write!(f, "--{}", self.long)
    }
}

/// The set of declared options, indexed by their exact spellings.
///
/// A registry is built up front by repeated registration calls and is
/// read-only once parsing starts. Registration is not meant to interleave
/// with parsing; finish setup, then hand the registry to a [`Parser`].
#[derive(Debug, Default)]
pub struct Registry {
    options: HashMap<String, Arc<OptionDef>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Add a definition, returning the shared handle used to query results.
    ///
    /// Fails with [`Error::DuplicateOption`] if the long spelling, or the
    /// short spelling when one is declared, is already taken. On failure
    /// the registry is left untouched.
    pub fn register(&mut self, def: OptionDef) -> Result<Arc<OptionDef>, Error> {
        let long_key = format!("--{}", def.long);
        if self.options.contains_key(&long_key) {
            return Err(Error::DuplicateOption(long_key));
        }
        let short_key = def.short.map(|short| format!("-{}", short));
        if let Some(key) = &short_key {
            if self.options.contains_key(key) {
                return Err(Error::DuplicateOption(key.clone()));
            }
        }
        let def = Arc::new(def);
        if let Some(key) = short_key {
            self.options.insert(key, Arc::clone(&def));
        }
        self.options.insert(long_key, Arc::clone(&def));
        Ok(def)
    }

    /// Look up an exact spelling (`"-x"` or `"--xxx"`).
    ///
    /// Unknown spellings are simply `None`; whether that is an error is
    /// the caller's decision.
    pub fn lookup(&self, spelling: &str) -> Option<&Arc<OptionDef>> {
        self.options.get(spelling)
    }

    /// Register a no-value boolean flag.
    pub fn add_flag(
        &mut self,
        short: impl Into<Option<char>>,
        long: &str,
    ) -> Result<Arc<OptionDef>, Error> {
        self.register(OptionDef::new(ValueKind::Flag, short, long))
    }

    /// Register an option taking a base-10 signed 32-bit integer.
    pub fn add_int(
        &mut self,
        short: impl Into<Option<char>>,
        long: &str,
    ) -> Result<Arc<OptionDef>, Error> {
        self.register(OptionDef::new(ValueKind::Int, short, long))
    }

    /// Register an option taking a base-10 signed 64-bit integer.
    pub fn add_long(
        &mut self,
        short: impl Into<Option<char>>,
        long: &str,
    ) -> Result<Arc<OptionDef>, Error> {
        self.register(OptionDef::new(ValueKind::Long, short, long))
    }

    /// Register an option taking a floating-point number.
    pub fn add_double(
        &mut self,
        short: impl Into<Option<char>>,
        long: &str,
    ) -> Result<Arc<OptionDef>, Error> {
        self.register(OptionDef::new(ValueKind::Double, short, long))
    }

    /// Register an option taking an uninterpreted string.
    pub fn add_str(
        &mut self,
        short: impl Into<Option<char>>,
        long: &str,
    ) -> Result<Arc<OptionDef>, Error> {
        self.register(OptionDef::new(ValueKind::Str, short, long))
    }
}

/// The parsing engine: a [`Registry`] plus the tokenization pass.
///
/// One parser may run any number of [`parse`][Parser::parse] calls; each
/// call gets fresh accumulator state and produces an independent
/// [`ParseResult`].
#[derive(Debug)]
pub struct Parser {
    registry: Registry,
}

impl Parser {
    /// Take ownership of a fully-built registry for this session.
    pub fn new(registry: Registry) -> Parser {
        Parser { registry }
    }

    /// The registry this parser resolves spellings against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parse an argument vector, using [`PlainNumber`] syntax for
    /// [`Double`][ValueKind::Double] options.
    ///
    /// The program name must not be included.
    pub fn parse<I>(&self, args: I) -> Result<ParseResult, Error>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.parse_with(args, &PlainNumber)
    }

    /// Parse an argument vector with an explicit numeric syntax for
    /// [`Double`][ValueKind::Double] options.
    ///
    /// Any error aborts the whole call; there is no partial result.
    pub fn parse_with<I>(&self, args: I, numbers: &dyn NumberFormat) -> Result<ParseResult, Error>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let session = Session {
            registry: &self.registry,
            numbers,
            values: HashMap::new(),
            remaining: Vec::new(),
        };
        session.run(args)
    }
}

/// Per-call parsing state.
///
/// Owning the accumulators here, not on the `Parser`, keeps repeated and
/// concurrent `parse` calls fully independent.
struct Session<'a> {
    registry: &'a Registry,
    numbers: &'a dyn NumberFormat,
    values: HashMap<String, VecDeque<Value>>,
    remaining: Vec<String>,
}

impl Session<'_> {
    /// One left-to-right pass over the tokens, no backtracking.
    fn run(mut self, args: Vec<String>) -> Result<ParseResult, Error> {
        let mut position = 0;
        while position < args.len() {
            let arg = &args[position];
            if !arg.starts_with('-') {
                self.remaining.push(arg.clone());
                position += 1;
                continue;
            }
            if arg == "--" {
                position += 1;
                break;
            }
            // A single dash followed by more than one character is a
            // cluster of short flags, e.g. -abc for -a -b -c.
            if !arg.starts_with("--") && arg.chars().count() > 2 {
                self.bundle(arg)?;
                position += 1;
                continue;
            }

            // Long options may carry their value inline after the first
            // '=': --debug=2 is --debug with value "2".
            let (spelling, inline) = match arg.find('=') {
                Some(ind) if arg.starts_with("--") => (&arg[..ind], Some(&arg[ind + 1..])),
                _ => (arg.as_str(), None),
            };
            let option = match self.registry.lookup(spelling) {
                Some(option) => Arc::clone(option),
                None => return Err(Error::UnknownOption(spelling.to_owned())),
            };
            position += 1;
            if option.requires_value() && inline.is_none() {
                // The next token is the value, even if it starts with '-'.
                let supplied = args.get(position).map(String::as_str);
                if supplied.is_some() {
                    position += 1;
                }
                self.record(&option, supplied)?;
            } else if option.requires_value() {
                self.record(&option, inline)?;
            } else {
                // A flag; any inline value is silently ignored.
                self.record(&option, None)?;
            }
        }

        // Everything after the terminator is positional, dashes and all.
        self.remaining.extend(args[position..].iter().cloned());

        Ok(ParseResult {
            values: self.values,
            remaining: self.remaining,
        })
    }

    /// Expand a `-abc` cluster: every character must resolve to a
    /// registered no-value flag.
    fn bundle(&mut self, cluster: &str) -> Result<(), Error> {
        for ch in cluster.chars().skip(1) {
            let spelling = format!("-{}", ch);
            let option = match self.registry.lookup(&spelling) {
                Some(option) => Arc::clone(option),
                None => {
                    return Err(Error::UnknownSuboption {
                        cluster: cluster.to_owned(),
                        suboption: ch,
                    })
                }
            };
            if option.requires_value() {
                return Err(Error::NotFlag {
                    cluster: cluster.to_owned(),
                    suboption: ch,
                });
            }
            self.record(&option, None)?;
        }
        Ok(())
    }

    /// Coerce a raw value per the option's kind and append it to that
    /// option's occurrence queue, preserving encounter order.
    fn record(&mut self, option: &Arc<OptionDef>, raw: Option<&str>) -> Result<(), Error> {
        let value = coerce(option, raw, self.numbers)?;
        self.values
            .entry(option.long_form().to_owned())
            .or_insert_with(VecDeque::new)
            .push_back(value);
        Ok(())
    }
}

/// Coerce raw command line text per the option's value kind.
///
/// `raw` is `None` for flag occurrences and when a required value was
/// never supplied; the latter is reported as an illegal empty value.
fn coerce(
    option: &Arc<OptionDef>,
    raw: Option<&str>,
    numbers: &dyn NumberFormat,
) -> Result<Value, Error> {
    if option.kind() == ValueKind::Flag {
        return Ok(Value::Flag(true));
    }
    let raw = match raw {
        Some(raw) => raw,
        None => {
            return Err(Error::IllegalValue {
                option: Arc::clone(option),
                value: String::new(),
            })
        }
    };
    let value = match option.kind() {
        ValueKind::Flag => Some(Value::Flag(true)),
        ValueKind::Int => raw.parse().ok().map(Value::Int),
        ValueKind::Long => raw.parse().ok().map(Value::Long),
        ValueKind::Double => numbers.parse_number(raw).map(Value::Double),
        ValueKind::Str => Some(Value::Str(raw.to_owned())),
    };
    value.ok_or_else(|| Error::IllegalValue {
        option: Arc::clone(option),
        value: raw.to_owned(),
    })
}

/// The outcome of one [`parse`][Parser::parse] call.
///
/// Values are read destructively: each read removes what it returns, in
/// encounter order (FIFO). Once an option's occurrences are drained,
/// further reads for it see nothing, until the next `parse` call produces
/// a fresh result. The drain is part of the contract, not an accident;
/// "was this option given at all" stays answerable through
/// [`seen`][ParseResult::seen].
#[derive(Debug)]
pub struct ParseResult {
    values: HashMap<String, VecDeque<Value>>,
    remaining: Vec<String>,
}

impl ParseResult {
    /// Remove and return the earliest unread value for `option`.
    ///
    /// Returns `None` once every occurrence has been drained, and for
    /// options that never appeared in the input.
    pub fn value(&mut self, option: &OptionDef) -> Option<Value> {
        self.values.get_mut(option.long_form())?.pop_front()
    }

    /// Like [`value`][ParseResult::value], but falls back to `default`.
    pub fn value_or(&mut self, option: &OptionDef, default: Value) -> Value {
        self.value(option).unwrap_or(default)
    }

    /// Drain every unread value for `option`, in encounter order.
    pub fn values(&mut self, option: &OptionDef) -> Vec<Value> {
        match self.values.get_mut(option.long_form()) {
            Some(queue) => queue.drain(..).collect(),
            None => Vec::new(),
        }
    }

    /// Whether `option` occurred in the input at all, drained or not.
    pub fn seen(&self, option: &OptionDef) -> bool {
        self.values.contains_key(option.long_form())
    }

    /// The arguments that were not consumed as options or their values,
    /// in input order.
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    /// Consume the result, keeping only the remaining arguments.
    pub fn into_remaining(self) -> Vec<String> {
        self.remaining
    }
}

/// An error from registration or parsing.
///
/// Parse errors abort the whole call immediately: there is no partial
/// [`ParseResult`] to recover, and the remedy is to fix the input or the
/// declarations and parse again.
#[non_exhaustive]
pub enum Error {
    /// A `-x` or `--xxx` token matched no registered spelling.
    UnknownOption(String),

    /// A character inside a bundled cluster such as `-abc` matched no
    /// registered short option.
    UnknownSuboption {
        /// The whole cluster token.
        cluster: String,
        /// The offending character.
        suboption: char,
    },

    /// A character inside a bundled cluster resolved to an option that
    /// requires a value. Bundling is only valid for flags.
    NotFlag {
        /// The whole cluster token.
        cluster: String,
        /// The value-requiring character.
        suboption: char,
    },

    /// A supplied value failed coercion for its option, or a required
    /// value was missing.
    IllegalValue {
        /// The option the value was meant for.
        option: Arc<OptionDef>,
        /// The raw text; empty when a required value was absent.
        value: String,
    },

    /// A long or short spelling was registered twice.
    DuplicateOption(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Error::*;
        match self {
            UnknownOption(option) => write!(f, "unknown option '{}'", option),
            UnknownSuboption { cluster, suboption } => {
                write!(f, "unknown option '{}' in '{}'", suboption, cluster)
            }
            NotFlag { cluster, suboption } => {
                write!(f, "option '{}' in '{}' requires a value", suboption, cluster)
            }
            IllegalValue { option, value } if value.is_empty() => {
                write!(f, "missing value for option {}", option)
            }
            IllegalValue { option, value } => {
                write!(f, "illegal value '{}' for option {}", value, option)
            }
            DuplicateOption(spelling) => write!(f, "option '{}' registered twice", spelling),
        }
    }
}

// This is printed when returning an error from main(), so defer to Display
impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for Error {}
