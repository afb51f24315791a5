use std::env;
use std::process;

use anyhow::{bail, Context, Result};
use regex_ast::{parse_with, ParseOptions};

// Parses the pattern and returns its rendered tree.
fn dump_pattern(pattern: &str, options: ParseOptions) -> Result<String> {
    let root = parse_with(pattern, options)
        .with_context(|| format!("failed to parse pattern {pattern:?}"))?;
    Ok(root.to_string())
}

// Picks the pattern and the `--lenient` flag out of the arguments.
fn parse_args(args: &[String]) -> Result<(String, ParseOptions)> {
    let mut options = ParseOptions::default();
    let mut pattern = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-E" => pattern = iter.next().cloned(),
            "--lenient" => options = ParseOptions::lenient(),
            other => bail!("unexpected argument {other:?}"),
        }
    }
    let pattern = pattern.context("expected '-E <pattern>'")?;
    Ok((pattern, options))
}

// Usage: your_program -E <pattern> [--lenient]
fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let (pattern, options) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: regex-ast -E <pattern> [--lenient]");
            process::exit(2);
        }
    };

    match dump_pattern(&pattern, options) {
        Ok(tree) => {
            print!("{tree}");
            process::exit(0)
        }
        Err(err) => {
            eprintln!("{err:#}");
            process::exit(1)
        }
    }
}
