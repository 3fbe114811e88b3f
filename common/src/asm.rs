use crate::constants::{Word, WORD_BITS};

use std::fmt;

use delegate::delegate;
use derive_more::{IsVariant, Unwrap};
use num_derive::FromPrimitive;
use serde::Serialize;
use thiserror::Error;


/// A bit field of an instruction word, placed by left shift and recovered by
/// right shift + mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub shift: u32,
    pub bits: u32,
}

impl Field {
    pub const fn new(name: &'static str, shift: u32, bits: u32) -> Field {
        assert!(bits > 0 && bits < u64::BITS);
        assert!(shift + bits <= WORD_BITS);
        Field { name, shift, bits }
    }

    pub const fn mask(self) -> u64 {
        (1u64 << self.bits) - 1
    }

    pub fn fits(self, val: u64) -> bool {
        val & !self.mask() == 0
    }

    pub fn check(self, val: u64) -> Result<u64, FieldError> {
        if self.fits(val) {
            Ok(val)
        } else {
            Err(FieldError { field: self.name, val, bits: self.bits })
        }
    }

    pub fn pack(self, val: u64) -> Result<Word, FieldError> {
        let val = self.check(val)?;
        Ok((val as Word) << self.shift)
    }

    pub fn extract(self, word: Word) -> u64 {
        ((word >> self.shift) as u64) & self.mask()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Value {val} doesn't fit in the {bits}-bit {field} field")]
pub struct FieldError {
    pub field: &'static str,
    pub val: u64,
    pub bits: u32,
}


// Field positions, counted from the LSB. Operand C is a constant for
// LOAD_CONSTANT and an address for everything else.
pub struct Layout;

impl Layout {
    pub const OPCODE: Field = Field::new("opcode", 90, 6);
    pub const ADDR_B: Field = Field::new("addr_b", 63, 27);
    pub const CONST_C: Field = Field::new("const_c", 45, 18);
    pub const ADDR_C: Field = Field::new("addr_c", 36, 27);
    pub const OFFSET_D: Field = Field::new("offset_d", 28, 8);
    pub const ADDR_E: Field = Field::new("addr_e", 1, 27);
}


////////////////////////////////////////////////////////////////////////////////


#[derive(Debug, Clone, Copy, FromPrimitive, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Opcode {
    LoadConstant = 7,
    LoadMemory = 12,
    Subtract = 38,
    StoreToMemory = 53,
}

impl Opcode {
    pub const ALL: [Opcode; 4] = [
        Opcode::LoadConstant,
        Opcode::LoadMemory,
        Opcode::StoreToMemory,
        Opcode::Subtract,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::LoadConstant => "LOAD_CONSTANT",
            Opcode::LoadMemory => "LOAD_MEMORY",
            Opcode::StoreToMemory => "STORE_TO_MEMORY",
            Opcode::Subtract => "SUBTRACT",
        }
    }

    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        Self::ALL.into_iter().find(|op| op.mnemonic() == mnemonic)
    }

    // Operand fields, in source order.
    pub fn operand_fields(self) -> &'static [Field] {
        match self {
            Opcode::LoadConstant => &[Layout::ADDR_B, Layout::CONST_C],
            Opcode::LoadMemory | Opcode::StoreToMemory => &[Layout::ADDR_B, Layout::ADDR_C],
            Opcode::Subtract => &[Layout::ADDR_B, Layout::ADDR_C, Layout::OFFSET_D, Layout::ADDR_E],
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}


pub trait InstrVariant {
    const OPCODE: Opcode;

    fn encode_operands(&self) -> Result<Word, FieldError>;

    fn decode_operands(word: Word) -> Self;

    fn opcode(&self) -> Opcode {
        Self::OPCODE
    }

    fn encode(&self) -> Result<Word, FieldError> {
        Ok(Layout::OPCODE.pack(Self::OPCODE as u64)? | self.encode_operands()?)
    }
}

// Fields are at most 27 bits, so narrowing an extracted value is lossless.
fn extract_u32(field: Field, word: Word) -> u32 {
    field.extract(word) as u32
}

// LOAD_MEMORY and STORE_TO_MEMORY pack identically, only the opcode differs.
fn encode_b_c(b: u32, c: u32) -> Result<Word, FieldError> {
    Ok(Layout::ADDR_B.pack(b.into())? | Layout::ADDR_C.pack(c.into())?)
}

fn decode_b_c(word: Word) -> (u32, u32) {
    (extract_u32(Layout::ADDR_B, word), extract_u32(Layout::ADDR_C, word))
}


////////////////////////////////////////////////////////////////////////////////

// mem[dst] = val
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadConstantIns {
    pub dst: u32,
    pub val: u32,
}

impl InstrVariant for LoadConstantIns {
    const OPCODE: Opcode = Opcode::LoadConstant;

    fn encode_operands(&self) -> Result<Word, FieldError> {
        Ok(Layout::ADDR_B.pack(self.dst.into())? | Layout::CONST_C.pack(self.val.into())?)
    }

    fn decode_operands(word: Word) -> Self {
        LoadConstantIns {
            dst: extract_u32(Layout::ADDR_B, word),
            val: extract_u32(Layout::CONST_C, word),
        }
    }
}

impl fmt::Display for LoadConstantIns {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", Self::OPCODE, self.dst, self.val)
    }
}

////////////////////////////////////////////////////////////////////////////////

// mem[dst] = mem[src]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMemoryIns {
    pub dst: u32,
    pub src: u32,
}

impl InstrVariant for LoadMemoryIns {
    const OPCODE: Opcode = Opcode::LoadMemory;

    fn encode_operands(&self) -> Result<Word, FieldError> {
        encode_b_c(self.dst, self.src)
    }

    fn decode_operands(word: Word) -> Self {
        let (dst, src) = decode_b_c(word);
        LoadMemoryIns { dst, src }
    }
}

impl fmt::Display for LoadMemoryIns {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", Self::OPCODE, self.dst, self.src)
    }
}

////////////////////////////////////////////////////////////////////////////////

// mem[mem[ptr]] = mem[src]. The destination is read out of memory, ptr is not
// itself the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreToMemoryIns {
    pub ptr: u32,
    pub src: u32,
}

impl InstrVariant for StoreToMemoryIns {
    const OPCODE: Opcode = Opcode::StoreToMemory;

    fn encode_operands(&self) -> Result<Word, FieldError> {
        encode_b_c(self.ptr, self.src)
    }

    fn decode_operands(word: Word) -> Self {
        let (ptr, src) = decode_b_c(word);
        StoreToMemoryIns { ptr, src }
    }
}

impl fmt::Display for StoreToMemoryIns {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", Self::OPCODE, self.ptr, self.src)
    }
}

////////////////////////////////////////////////////////////////////////////////

// mem[dst] = mem[base + offset] - mem[rhs]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtractIns {
    pub dst: u32,
    pub base: u32,
    pub offset: u8,
    pub rhs: u32,
}

impl InstrVariant for SubtractIns {
    const OPCODE: Opcode = Opcode::Subtract;

    fn encode_operands(&self) -> Result<Word, FieldError> {
        Ok(Layout::ADDR_B.pack(self.dst.into())?
            | Layout::ADDR_C.pack(self.base.into())?
            | Layout::OFFSET_D.pack(self.offset.into())?
            | Layout::ADDR_E.pack(self.rhs.into())?)
    }

    fn decode_operands(word: Word) -> Self {
        SubtractIns {
            dst: extract_u32(Layout::ADDR_B, word),
            base: extract_u32(Layout::ADDR_C, word),
            offset: Layout::OFFSET_D.extract(word) as u8,
            rhs: extract_u32(Layout::ADDR_E, word),
        }
    }
}

impl fmt::Display for SubtractIns {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} {} {}", Self::OPCODE, self.dst, self.base, self.offset, self.rhs)
    }
}

////////////////////////////////////////////////////////////////////////////////


#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant, Unwrap)]
pub enum Ins {
    LoadConstant(LoadConstantIns),
    LoadMemory(LoadMemoryIns),
    StoreToMemory(StoreToMemoryIns),
    Subtract(SubtractIns),
}

impl Ins {
    delegate! {
        to match self {
            Ins::LoadConstant(x) => x,
            Ins::LoadMemory(x) => x,
            Ins::StoreToMemory(x) => x,
            Ins::Subtract(x) => x,
        } {
            pub fn opcode(&self) -> Opcode;
            pub fn encode(&self) -> Result<Word, FieldError>;
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        self.opcode().mnemonic()
    }
}

impl fmt::Display for Ins {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Ins::LoadConstant(ins) => write!(f, "{ins}"),
            Ins::LoadMemory(ins) => write!(f, "{ins}"),
            Ins::StoreToMemory(ins) => write!(f, "{ins}"),
            Ins::Subtract(ins) => write!(f, "{ins}"),
        }
    }
}
