use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::Range;

use common::constants::MEM_SIZE;
use common::json;
use common::mem::read_words;
use emu_lib::{parse_range, Emulator};

use anyhow::Context;
use clap::Parser;


/// Runs a binary produced by as_cli and prints a memory dump (json)
#[derive(Parser)]
struct Args {
    /// Binary to execute
    bin: String,

    /// Addresses to dump, as start-end (end exclusive)
    #[arg(long, default_value = "0-4096", value_parser = parse_range)]
    range: Range<usize>,

    /// Number of memory cells
    #[arg(long, default_value_t = MEM_SIZE)]
    mem_size: usize,

    /// Write the execution trace (json) to this file
    #[arg(long)]
    trace: Option<String>,
}


fn run(args: Args) -> anyhow::Result<()> {
    let buf = std::fs::read(&args.bin).with_context(|| format!("Unable to read {}", args.bin))?;
    let words = read_words(&buf).with_context(|| format!("Unable to load {}", args.bin))?;

    let mut emu = Emulator::with_mem_size(args.mem_size);
    let mut trace = Vec::new();
    let res = emu.run_traced(&words, &mut trace);

    if let Some(path) = &args.trace {
        let file = File::create(path).with_context(|| format!("Unable to create {path}"))?;
        let mut out = BufWriter::new(file);
        json::write_pretty(&mut out, &trace)?;
        out.flush()?;
    }
    res.context("Runtime error")?;

    println!("{}", json::to_string_pretty(&emu.dump(args.range))?);
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
