
// Instruction words are 96 bits wide, carried in a u128.
pub type Word = u128;

pub const WORD_BITS: u32 = 96;
pub const WORD_BYTES: usize = 12; // Bytes, big endian on disk

pub const MEM_SIZE: usize = 8192; // Cells
