use crate::asm::*;
use crate::constants::Word;

use num_traits::FromPrimitive;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Unknown opcode {0}")]
    UnknownOpcode(u8),
}

pub fn decode_opcode(word: Word) -> Result<Opcode, DecodeError> {
    let raw = Layout::OPCODE.extract(word);
    Opcode::from_u64(raw).ok_or(DecodeError::UnknownOpcode(raw as u8))
}

pub fn decode(word: Word) -> Result<Ins, DecodeError> {
    let ins = match decode_opcode(word)? {
        Opcode::LoadConstant => Ins::LoadConstant(LoadConstantIns::decode_operands(word)),
        Opcode::LoadMemory => Ins::LoadMemory(LoadMemoryIns::decode_operands(word)),
        Opcode::StoreToMemory => Ins::StoreToMemory(StoreToMemoryIns::decode_operands(word)),
        Opcode::Subtract => Ins::Subtract(SubtractIns::decode_operands(word)),
    };
    Ok(ins)
}
