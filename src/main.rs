use std::env;
use std::io;
use std::process;

use anyhow::{bail, Context, Result};
use mygrep::{input, Regex};

// Parses `-E <pattern>`, reads stdin as one line and matches it.
fn run() -> Result<bool> {
    let mut args = env::args().skip(1);
    let (Some(flag), Some(pattern)) = (args.next(), args.next()) else {
        bail!("usage: mygrep -E <pattern>");
    };
    if flag != "-E" {
        bail!("usage: mygrep -E <pattern>");
    }

    let regex = Regex::new(&pattern).with_context(|| format!("invalid pattern {pattern:?}"))?;
    let line = input::read_line(io::stdin().lock()).context("read input text")?;

    Ok(regex.is_match(&line))
}

// Usage: echo <input_text> | mygrep -E <pattern>
// Exit status: 0 found, 1 not found, 2 usage, pattern or I/O error.
fn main() {
    match run() {
        Ok(true) => {
            println!("found");
            process::exit(0)
        }
        Ok(false) => {
            println!("not found");
            process::exit(1)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(2)
        }
    }
}
