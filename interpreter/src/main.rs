use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::Range;

use as_lib::assemble;
use common::constants::MEM_SIZE;
use common::json;
use emu_lib::{parse_range, Emulator};

use anyhow::Context;
use clap::Parser;
use clap_stdin::FileOrStdin;
use log::info;
use serde::Serialize;

/// Assembles a program, writes the binary and assembly log, runs it, and
/// writes a memory dump
#[derive(Parser)]
#[command(about)]
struct Args {
    /// Input assembly file
    input: FileOrStdin,

    /// Binary to write
    output_bin: String,

    /// Assembly log (json) to write
    log_file: String,

    /// Memory dump (json) to write
    result_json: String,

    /// Addresses to dump, as start-end (end exclusive)
    #[arg(value_parser = parse_range)]
    memory_range: Range<usize>,

    /// Number of memory cells
    #[arg(long, default_value_t = MEM_SIZE)]
    mem_size: usize,

    /// Also write the execution trace (json) to this file
    #[arg(long)]
    trace: Option<String>,
}

fn create(path: &str) -> anyhow::Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Unable to create {path}"))?;
    Ok(BufWriter::new(file))
}

fn write_json(path: &str, val: &impl Serialize) -> anyhow::Result<()> {
    let mut out = create(path)?;
    json::write_pretty(&mut out, val)?;
    out.flush()?;
    Ok(())
}

fn run(args: Args) -> anyhow::Result<()> {
    let input = args.input.contents()?;
    let prog = assemble(input.as_str())?;
    info!("Assembled {} instructions", prog.words.len());

    let mut out = create(&args.output_bin)?;
    prog.write_to(&mut out)?;
    out.flush()?;
    println!("Binary file saved to {}", args.output_bin);

    write_json(&args.log_file, &prog.trace)?;
    println!("Log file saved to {}", args.log_file);

    let mut emu = Emulator::with_mem_size(args.mem_size);
    let mut trace = Vec::new();
    let res = emu.run_traced(&prog.words, &mut trace);
    if let Some(path) = &args.trace {
        write_json(path, &trace)?;
    }
    res.context("Runtime error")?;

    write_json(&args.result_json, &emu.dump(args.memory_range))?;
    println!("Memory dump saved to {}", args.result_json);
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
