use std::fs::File;
use std::io::{BufWriter, Write};

use as_lib::assemble;
use common::json;

use anyhow::Context;
use clap::Parser;
use clap_stdin::FileOrStdin;

/// Assembler for the 96-bit load/store machine
#[derive(Parser)]
#[command(about)]
struct Args {
    /// Input assembly file
    input: FileOrStdin,

    /// File name to output to
    #[arg(long, short, default_value = "a.bin")]
    output: String,

    /// Write the assembly log (json) to this file
    #[arg(long)]
    log: Option<String>,
}

fn run(args: Args) -> anyhow::Result<()> {
    let input = args.input.contents()?;
    let prog = assemble(input.as_str())?;

    let file = File::create(&args.output).with_context(|| format!("Unable to create {}", args.output))?;
    let mut out = BufWriter::new(file);
    prog.write_to(&mut out)?;
    out.flush()?;

    if let Some(log) = &args.log {
        let file = File::create(log).with_context(|| format!("Unable to create {log}"))?;
        let mut out = BufWriter::new(file);
        json::write_pretty(&mut out, &prog.trace)?;
        out.flush()?;
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
