//! Parses `name=value` command-line arguments with the strict parsers and
//! prints a summary built in an `SboString`.
//!
//! ```text
//! cargo run --example parse_args -- port=0x1f90 ratio=0.75 sep='\t' retries=-1
//! ```
//!
//! `port` and `retries` are `u16`, `ratio` is `f64` and `sep` is a single,
//! possibly escaped, character. Every rejected value is reported with the
//! error the parser returned.

use std::{env, process::ExitCode};

use strkit::{Error, SboString, parse_escaped, parse_float, parse_int, streamf};

fn describe(name: &str, value: &str, out: &mut SboString) -> Result<(), Error> {
    match name {
        "port" | "retries" => {
            let n: u16 = parse_int(value, 0)?;
            streamf!(out, "{name}: {n}\n")?;
        }
        "ratio" => {
            let f: f64 = parse_float(value)?;
            streamf!(out, "{name}: {f}\n")?;
        }
        "sep" => {
            let c: u8 = parse_escaped(value)?;
            streamf!(out, "{name}: {:?}\n", char::from(c))?;
        }
        _ => {
            streamf!(out, "{name}: ignored\n")?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let mut out = SboString::new();
    let mut failed = false;

    for arg in env::args().skip(1) {
        let Some((name, value)) = arg.split_once('=') else {
            eprintln!("expected name=value, got {arg:?}");
            failed = true;
            continue;
        };
        if let Err(e) = describe(name, value, &mut out) {
            eprintln!("{name}: {value:?} rejected: {e}");
            failed = true;
        }
    }

    print!("{out}");
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
