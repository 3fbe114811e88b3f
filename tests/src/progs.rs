use crate::run;

use std::collections::BTreeMap;

fn dump(src: &str, start: usize, end: usize) -> BTreeMap<usize, i64> {
    run(src).dump(start..end).iter().collect()
}

#[test]
fn subtract() {
    let src = r#"
        LOAD_CONSTANT 0 5
        LOAD_CONSTANT 1 3
        SUBTRACT 2 0 0 1
    "#;
    assert_eq!(run(src).mem_read(2), Ok(2));
    assert_eq!(dump(src, 0, 4), BTreeMap::from([(0, 5), (1, 3), (2, 2)]));
}

#[test]
fn load_memory() {
    let emu = run(r#"
        LOAD_CONSTANT 0 10
        LOAD_MEMORY 1 0
    "#);
    assert_eq!(emu.mem_read(1), Ok(10));
}

#[test]
fn store_to_memory_is_indirect() {
    let emu = run(r#"
        LOAD_CONSTANT 0 5
        LOAD_CONSTANT 5 99
        LOAD_CONSTANT 1 1
        STORE_TO_MEMORY 0 1
    "#);
    assert_eq!(emu.mem_read(5), Ok(1));
    // Not a direct store to 0.
    assert_eq!(emu.mem_read(0), Ok(5));
}

#[test]
fn subtract_with_offset() {
    let emu = run(r#"
        LOAD_CONSTANT 20 50
        LOAD_CONSTANT 21 8
        SUBTRACT 0 15 5 21
    "#);
    assert_eq!(emu.mem_read(0), Ok(42));
}

#[test]
fn commented_program() {
    let emu = run(r#"
        ; a = 7, b = 2
        LOAD_CONSTANT 0 7

        LOAD_CONSTANT 1 2
        ; c = a - b
        SUBTRACT 2 0 0 1
    "#);
    assert_eq!(emu.mem_read(2), Ok(5));
}

#[test]
fn max_constant() {
    let emu = run("LOAD_CONSTANT 8191 262143");
    assert_eq!(emu.mem_read(8191), Ok(262143));
}
