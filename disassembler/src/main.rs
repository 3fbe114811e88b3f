use disassembler::disassemble;

use anyhow::Context;
use clap::Parser;
use log::warn;

/// Disassembler for binaries produced by as_cli
#[derive(Parser)]
struct Args {
    /// Binary to disassemble
    bin: String,
}

fn run(args: Args) -> anyhow::Result<()> {
    let bin = std::fs::read(&args.bin).with_context(|| format!("Unable to read {}", args.bin))?;
    let disassembly = disassemble(&bin).with_context(|| format!("Unable to load {}", args.bin))?;

    for dis in disassembly {
        if dis.interp.is_none() {
            warn!("Word {} doesn't decode", dis.index);
        }
        println!("{}", dis);
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
