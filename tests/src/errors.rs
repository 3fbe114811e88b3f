use as_lib::{assemble, AsmError};
use common::asm::*;
use common::constants::{Word, MEM_SIZE};
use emu_lib::{Emulator, ExecError};

#[test]
fn unknown_instruction() {
    let Err(err) = assemble("FOO 1 2") else {
        panic!("FOO assembled");
    };
    assert_eq!(err.line(), 1);
    assert!(err.to_string().contains("FOO"));
}

#[test]
fn error_aborts_pass() {
    let Err(err) = assemble("LOAD_CONSTANT 0 1\nLOAD_CONSTANT 1 2\nBAR\nLOAD_CONSTANT 2 3") else {
        panic!("BAR assembled");
    };
    assert_eq!(err, AsmError::UnknownInstruction { line: 3, mnemonic: "BAR".into() });
}

#[test]
fn unknown_opcode_keeps_memory() {
    let mut words = assemble("LOAD_CONSTANT 0 1\nLOAD_CONSTANT 1 2").unwrap().words;
    words.insert(1, (63 as Word) << Layout::OPCODE.shift);

    let mut emu = Emulator::new();
    let err = emu.run(&words).unwrap_err();
    assert_eq!(err, ExecError::UnknownOpcode { index: 1, opcode: 63 });
    assert_eq!(emu.mem_read(0), Ok(1));
    assert_eq!(emu.mem_read(1), Ok(0));
}

#[test]
fn address_out_of_range() {
    let words = assemble("LOAD_CONSTANT 0 9\nLOAD_MEMORY 1 8192").unwrap().words;
    let mut emu = Emulator::new();
    let err = emu.run(&words).unwrap_err();
    assert_eq!(err, ExecError::AddressOutOfRange { index: 1, addr: 8192, size: MEM_SIZE });
    assert_eq!(emu.dump(0..MEM_SIZE).len(), 1);
}

#[test]
fn indirect_target_out_of_range() {
    let words = assemble(r#"
        LOAD_CONSTANT 0 200000
        LOAD_CONSTANT 1 1
        STORE_TO_MEMORY 0 1
    "#).unwrap().words;
    let mut emu = Emulator::new();
    let err = emu.run(&words).unwrap_err();
    assert_eq!(err.index(), 2);
    assert!(matches!(err, ExecError::AddressOutOfRange { addr: 200000, .. }));
}

#[test]
fn smaller_memory() {
    let words = assemble("LOAD_CONSTANT 16 1").unwrap().words;
    assert!(Emulator::new().run(&words).is_ok());
    assert!(Emulator::with_mem_size(16).run(&words).is_err());
}
