use crate::constants::{Word, WORD_BYTES};

use std::io::{self, Write};

use bytemuck::try_cast_slice;
use thiserror::Error;

const PAD_BYTES: usize = std::mem::size_of::<Word>() - WORD_BYTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("Binary length {len} is not a multiple of the 12-byte word size")]
    Truncated { len: usize },
}

// Bits above the 96th are dropped.
pub fn word_to_bytes(word: Word) -> [u8; WORD_BYTES] {
    let mut out = [0u8; WORD_BYTES];
    out.copy_from_slice(&word.to_be_bytes()[PAD_BYTES..]);
    out
}

pub fn word_from_bytes(bytes: &[u8; WORD_BYTES]) -> Word {
    let mut buf = [0u8; std::mem::size_of::<Word>()];
    buf[PAD_BYTES..].copy_from_slice(bytes);
    Word::from_be_bytes(buf)
}

pub fn as_word_chunks(input: &[u8]) -> Result<&[[u8; WORD_BYTES]], WordError> {
    try_cast_slice(input).map_err(|_| WordError::Truncated { len: input.len() })
}

pub fn read_words(input: &[u8]) -> Result<Vec<Word>, WordError> {
    Ok(as_word_chunks(input)?.iter().map(word_from_bytes).collect())
}

////////////////////////////////////////////////////////////////////////////////

pub trait WriteWord {
    fn write_word(&mut self, word: Word) -> io::Result<()>;
}

impl<T: Write> WriteWord for T {
    fn write_word(&mut self, word: Word) -> io::Result<()> {
        self.write_all(&word_to_bytes(word))
    }
}
