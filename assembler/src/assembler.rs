use std::io::{self, Write};

use crate::grammar::LineParser;
use crate::helpers::{is_int, parse_int};
use crate::ir::Stmt;
use common::asm::*;
use common::constants::Word;
use common::mem::WriteWord;

use log::trace;
use serde::Serialize;
use thiserror::Error;

pub struct Program {
    pub words: Vec<Word>,
    pub trace: Vec<AsmTrace>,
}

impl Program {
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        for word in &self.words {
            out.write_word(*word)?;
        }
        Ok(())
    }
}

// One entry per emitted word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AsmTrace {
    pub line: usize,
    pub instruction: String,
    pub binary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsmError {
    #[error("Syntax error on line {line}: {msg}")]
    Syntax { line: usize, msg: String },

    #[error("Unknown instruction '{mnemonic}' on line {line}")]
    UnknownInstruction { line: usize, mnemonic: String },

    #[error("{op} takes {expected} operands, found {found} on line {line}")]
    OperandCount {
        line: usize,
        op: Opcode,
        expected: usize,
        found: usize,
    },

    #[error("Operand '{operand}' doesn't fit in the {bits}-bit {field} field on line {line}")]
    OperandRange {
        line: usize,
        operand: String,
        field: &'static str,
        bits: u32,
    },
}

impl AsmError {
    pub fn line(&self) -> usize {
        match self {
            AsmError::Syntax { line, .. }
            | AsmError::UnknownInstruction { line, .. }
            | AsmError::OperandCount { line, .. }
            | AsmError::OperandRange { line, .. } => *line,
        }
    }
}

pub fn assemble(prog: &str) -> Result<Program, AsmError> {
    Assembler::new().assemble(prog)
}

struct Assembler {
    parser: LineParser,
    words: Vec<Word>,
    trace: Vec<AsmTrace>,
}

impl Assembler {
    fn new() -> Assembler {
        Assembler {
            parser: LineParser::new(),
            words: Vec::new(),
            trace: Vec::new(),
        }
    }

    fn operand(tok: &str, field: Field, line: usize) -> Result<u64, AsmError> {
        if !is_int(tok) {
            return Err(AsmError::Syntax {
                line,
                msg: format!("Operand '{tok}' is not an integer"),
            });
        }
        parse_int(tok)
            .filter(|val| field.fits(*val))
            .ok_or_else(|| AsmError::OperandRange {
                line,
                operand: tok.to_string(),
                field: field.name,
                bits: field.bits,
            })
    }

    fn resolve(&self, stmt: &Stmt, line: usize) -> Result<Ins, AsmError> {
        let Some(op) = Opcode::from_mnemonic(&stmt.mnemonic) else {
            return Err(AsmError::UnknownInstruction {
                line,
                mnemonic: stmt.mnemonic.clone(),
            });
        };

        let fields = op.operand_fields();
        if stmt.operands.len() != fields.len() {
            return Err(AsmError::OperandCount {
                line,
                op,
                expected: fields.len(),
                found: stmt.operands.len(),
            });
        }

        let vals = stmt
            .operands
            .iter()
            .zip(fields)
            .map(|(tok, field)| Self::operand(tok, *field, line))
            .collect::<Result<Vec<u64>, AsmError>>()?;

        // Every value was checked against its field, none is wider than 27 bits.
        let ins = match op {
            Opcode::LoadConstant => Ins::LoadConstant(LoadConstantIns {
                dst: vals[0] as u32,
                val: vals[1] as u32,
            }),
            Opcode::LoadMemory => Ins::LoadMemory(LoadMemoryIns {
                dst: vals[0] as u32,
                src: vals[1] as u32,
            }),
            Opcode::StoreToMemory => Ins::StoreToMemory(StoreToMemoryIns {
                ptr: vals[0] as u32,
                src: vals[1] as u32,
            }),
            Opcode::Subtract => Ins::Subtract(SubtractIns {
                dst: vals[0] as u32,
                base: vals[1] as u32,
                offset: vals[2] as u8,
                rhs: vals[3] as u32,
            }),
        };
        Ok(ins)
    }

    fn assemble_line(&mut self, text: &str, line: usize) -> Result<(), AsmError> {
        let stmt = self
            .parser
            .parse(text)
            .map_err(|e| AsmError::Syntax { line, msg: e.to_string() })?;

        let ins = self.resolve(&stmt, line)?;
        // resolve() already range checked every operand, so this can't fail.
        let word = ins.encode().map_err(|e| AsmError::OperandRange {
            line,
            operand: e.val.to_string(),
            field: e.field,
            bits: e.bits,
        })?;
        trace!("Line {line}: {ins} => {word:#026x}");

        self.words.push(word);
        self.trace.push(AsmTrace {
            line,
            instruction: text.to_string(),
            binary: format!("{word:096b}"),
        });
        Ok(())
    }

    fn assemble(mut self, prog: &str) -> Result<Program, AsmError> {
        for (text, line) in prog.lines().zip(1..) {
            let text = text.trim();
            if text.is_empty() || text.starts_with(';') {
                continue;
            }
            self.assemble_line(text, line)?;
        }

        Ok(Program {
            words: self.words,
            trace: self.trace,
        })
    }
}
