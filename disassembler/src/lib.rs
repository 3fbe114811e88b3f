use std::fmt;

use common::asm::Ins;
use common::constants::{Word, WORD_BYTES};
use common::decoder::decode;
use common::mem::{as_word_chunks, word_from_bytes, WordError};

pub struct Disassembled {
    pub index: usize,
    pub word: Word,
    pub interp: Option<Ins>,
}

impl fmt::Display for Disassembled {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hex_width = WORD_BYTES * 2;
        write!(f, "{:>5}:  {:0hex_width$x}  ", self.index, self.word)?;
        match &self.interp {
            Some(ins) => write!(f, "{ins}"),
            None => write!(f, "???"),
        }
    }
}

pub fn disassemble(bin: &[u8]) -> Result<Vec<Disassembled>, WordError> {
    let out = as_word_chunks(bin)?
        .iter()
        .enumerate()
        .map(|(index, bytes)| {
            let word = word_from_bytes(bytes);
            Disassembled { index, word, interp: decode(word).ok() }
        })
        .collect();
    Ok(out)
}
