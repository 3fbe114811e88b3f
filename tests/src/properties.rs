use as_lib::assemble;
use common::asm::*;
use common::decoder::decode;
use common::constants::{Word, MEM_SIZE};
use emu_lib::{Emulator, ExecError};

use proptest::prelude::*;

const SRC: &str = r#"
    LOAD_CONSTANT 0 5
    LOAD_CONSTANT 1 3
    ; comment
    SUBTRACT 2 0 0 1
    STORE_TO_MEMORY 0 2
    LOAD_MEMORY 3 5
"#;

#[test]
fn deterministic() {
    let a = assemble(SRC).unwrap();
    let b = assemble(SRC).unwrap();
    assert_eq!(a.words, b.words);
    assert_eq!(a.trace, b.trace);

    let mut emu_a = Emulator::new();
    let mut emu_b = Emulator::new();
    assert_eq!(emu_a.run(&a.words).unwrap(), emu_b.run(&b.words).unwrap());
    assert_eq!(emu_a.dump(0..MEM_SIZE), emu_b.dump(0..MEM_SIZE));
}

#[test]
fn later_reads_see_earlier_writes() {
    let prog = assemble("LOAD_CONSTANT 7 1234\nLOAD_MEMORY 8 7").unwrap();
    let mut emu = Emulator::new();
    let trace = emu.run(&prog.words).unwrap();
    assert_eq!(emu.mem_read(8), Ok(1234));
    assert_eq!(trace[1].reads[0].val, 1234);
}

#[test]
fn dump_is_sparse() {
    let prog = assemble(r#"
        LOAD_CONSTANT 0 5
        LOAD_CONSTANT 1 5
        SUBTRACT 2 0 0 1
        LOAD_CONSTANT 3 1
        LOAD_CONSTANT 10 4
    "#).unwrap();
    let mut emu = Emulator::new();
    emu.run(&prog.words).unwrap();

    let dump = emu.dump(0..4);
    assert_eq!(dump.iter().collect::<Vec<_>>(), [(0, 5), (1, 5), (3, 1)]);
    assert!(dump.iter().all(|(_, val)| val != 0));
    assert_eq!(dump.get(2), None);
    assert_eq!(dump.get(10), None);
    assert_eq!(emu.dump(4..11).iter().collect::<Vec<_>>(), [(10, 4)]);
}

#[test]
fn encoded_trace_matches_words() {
    let prog = assemble(SRC).unwrap();
    assert_eq!(prog.trace.len(), prog.words.len());
    for (trace, word) in prog.trace.iter().zip(&prog.words) {
        assert_eq!(Word::from_str_radix(&trace.binary, 2).unwrap(), *word);
        assert_eq!(decode(*word).unwrap().to_string(), trace.instruction);
    }
}

proptest! {
    // Anything the assembler accepts decodes back to the same text.
    #[test]
    fn assemble_decode_round_trip(
        op in prop::sample::select(Opcode::ALL.to_vec()),
        raw in prop::collection::vec(any::<u64>(), 4),
    ) {
        let operands: Vec<u64> = op
            .operand_fields()
            .iter()
            .zip(&raw)
            .map(|(field, val)| val & field.mask())
            .collect();
        let text = std::iter::once(op.mnemonic().to_string())
            .chain(operands.iter().map(|val| val.to_string()))
            .collect::<Vec<_>>()
            .join(" ");

        let prog = assemble(&text).unwrap();
        prop_assert_eq!(prog.words.len(), 1);
        let ins = decode(prog.words[0]).unwrap();
        prop_assert_eq!(ins.opcode(), op);
        prop_assert_eq!(ins.to_string(), text);
    }

    #[test]
    fn unknown_opcodes_halt(raw in 0u8..64, operands in any::<u64>()) {
        prop_assume!(!matches!(raw, 7 | 12 | 38 | 53));
        let word = ((raw as Word) << Layout::OPCODE.shift) | Word::from(operands);
        let mut prog = assemble("LOAD_CONSTANT 0 1").unwrap().words;
        prog.push(word);
        prog.extend(assemble("LOAD_CONSTANT 1 1").unwrap().words);

        let mut emu = Emulator::new();
        let err = emu.run(&prog).unwrap_err();
        prop_assert_eq!(err, ExecError::UnknownOpcode { index: 1, opcode: raw });
        prop_assert_eq!(emu.dump(0..MEM_SIZE).len(), 1);
    }
}
