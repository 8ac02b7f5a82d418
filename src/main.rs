use std::{
    io::{self, Write},
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use route_pattern::{compile, method_matches, ANY_METHOD};
use tracing::info;

/// Match a request path and method against a route pattern.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Route pattern, e.g. `/user/@id:[0-9]+` or `/files/*`
    pattern: String,

    /// Request path, optionally with a query string
    path: String,

    /// Request method
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// Methods the route answers, comma separated
    #[arg(long, value_delimiter = ',', default_value = ANY_METHOD)]
    methods: Vec<String>,

    /// Compare literal text case-sensitively
    #[arg(long)]
    case_sensitive: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(?args);

    let matched = run(&args, &mut io::stdout().lock())?;
    Ok(if matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Writes the outcome to `out`; returns whether the route answered.
fn run(args: &Args, out: &mut impl Write) -> anyhow::Result<bool> {
    let compiled = compile(args.pattern.as_str())
        .with_context(|| format!("cannot compile pattern {:?}", args.pattern))?;

    if !method_matches(&args.methods, &args.method) {
        writeln!(out, "method {} not allowed", args.method)?;
        return Ok(false);
    }

    let m = compiled.match_path(&args.path, args.case_sensitive);
    if !m.is_match() {
        writeln!(out, "no match")?;
        return Ok(false);
    }

    writeln!(out, "match")?;
    for (name, value) in m.params().iter() {
        match value {
            Some(value) => writeln!(out, "  @{} = {:?}", name, value)?,
            None => writeln!(out, "  @{} = (absent)", name)?,
        }
    }
    if compiled.splat_slashes().is_some() {
        writeln!(out, "  * = {:?}", m.splat())?;
    }
    Ok(true)
}
