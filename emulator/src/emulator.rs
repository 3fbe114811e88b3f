use common::asm::*;
use common::constants::Word;
use common::decoder::{decode, DecodeError};
use crate::EmulatorState;
use crate::emulator_state::{MemError, MemoryDump};

use std::ops::Range;

use delegate::delegate;
use log::debug;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub addr: usize,
    pub val: i64,
}

// What a single executed instruction did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecTrace {
    pub index: usize,
    pub mnemonic: Opcode,
    pub reads: Vec<Cell>,
    pub write: Cell,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("Unknown opcode {opcode} at index {index}.")]
    UnknownOpcode { index: usize, opcode: u8 },

    #[error("Address {addr} out of range at index {index} (memory size {size}).")]
    AddressOutOfRange { index: usize, addr: i64, size: usize },
}

impl ExecError {
    pub fn index(&self) -> usize {
        match self {
            ExecError::UnknownOpcode { index, .. } | ExecError::AddressOutOfRange { index, .. } => *index,
        }
    }

    fn from_mem(index: usize, err: MemError) -> ExecError {
        match err {
            MemError::OutOfRange { addr, size } => ExecError::AddressOutOfRange { index, addr, size },
        }
    }
}

struct Step {
    reads: Vec<Cell>,
    write: Cell,
    message: String,
}


pub struct Emulator {
    state: EmulatorState,
}

impl Emulator {
    pub fn new() -> Emulator {
        Emulator { state: EmulatorState::new() }
    }

    pub fn with_mem_size(size: usize) -> Emulator {
        Emulator { state: EmulatorState::with_mem_size(size) }
    }

    delegate! {
        to self.state {
            pub fn mem_read(&self, addr: usize) -> Result<i64, MemError>;
            pub fn mem_write(&mut self, addr: usize, val: i64) -> Result<(), MemError>;
            pub fn mem_size(&self) -> usize;
            pub fn num_ins(&self) -> usize;
            pub fn dump(&self, range: Range<usize>) -> MemoryDump;
        }
    }

    pub fn get_state(&self) -> &EmulatorState {
        &self.state
    }

    pub fn get_state_mut(&mut self) -> &mut EmulatorState {
        &mut self.state
    }

    // Run the whole program in order, stopping at the first fault. Memory keeps
    // whatever the instructions before the fault wrote.
    pub fn run(&mut self, prog: &[Word]) -> Result<Vec<ExecTrace>, ExecError> {
        let mut trace = Vec::new();
        self.run_traced(prog, &mut trace)?;
        Ok(trace)
    }

    // Like run(), but the trace of everything before a fault survives it.
    pub fn run_traced(&mut self, prog: &[Word], trace: &mut Vec<ExecTrace>) -> Result<(), ExecError> {
        for (index, word) in prog.iter().enumerate() {
            trace.push(self.run_ins(index, *word)?);
        }
        Ok(())
    }

    pub fn run_ins(&mut self, index: usize, word: Word) -> Result<ExecTrace, ExecError> {
        self.state.inc_ins();

        let ins = decode(word).map_err(|e| match e {
            DecodeError::UnknownOpcode(opcode) => ExecError::UnknownOpcode { index, opcode },
        })?;
        debug!("[{index}] {ins}");

        let step = self.exec(&ins).map_err(|e| ExecError::from_mem(index, e))?;
        Ok(ExecTrace {
            index,
            mnemonic: ins.opcode(),
            reads: step.reads,
            write: step.write,
            message: format!("[{index}] {}: {}", ins.mnemonic(), step.message),
        })
    }

    ///////////////////////////////////////////////////////////////////////////
    // Execute
    ///////////////////////////////////////////////////////////////////////////
    // Every read and address check happens before the single write, so a
    // faulting instruction leaves memory untouched.

    fn read(&self, addr: usize) -> Result<Cell, MemError> {
        Ok(Cell { addr, val: self.state.mem_read(addr)? })
    }

    fn write(&mut self, addr: usize, val: i64) -> Result<Cell, MemError> {
        self.state.mem_write(addr, val)?;
        Ok(Cell { addr, val })
    }

    fn exec_load_constant(&mut self, ins: &LoadConstantIns) -> Result<Step, MemError> {
        let write = self.write(ins.dst as usize, ins.val.into())?;
        Ok(Step {
            reads: vec![],
            write,
            message: format!("Stored {} in memory[{}].", write.val, write.addr),
        })
    }

    fn exec_load_memory(&mut self, ins: &LoadMemoryIns) -> Result<Step, MemError> {
        let src = self.read(ins.src as usize)?;
        let write = self.write(ins.dst as usize, src.val)?;
        Ok(Step {
            reads: vec![src],
            write,
            message: format!("Loaded value from memory[{}] to memory[{}].", src.addr, write.addr),
        })
    }

    fn exec_store_to_memory(&mut self, ins: &StoreToMemoryIns) -> Result<Step, MemError> {
        let ptr = self.read(ins.ptr as usize)?;
        let target = self.state.resolve_addr(ptr.val)?;
        let src = self.read(ins.src as usize)?;
        let write = self.write(target, src.val)?;
        Ok(Step {
            reads: vec![ptr, src],
            write,
            message: format!("Stored value {} at address {}.", write.val, write.addr),
        })
    }

    fn exec_subtract(&mut self, ins: &SubtractIns) -> Result<Step, MemError> {
        let lhs = self.read(ins.base as usize + ins.offset as usize)?;
        let rhs = self.read(ins.rhs as usize)?;
        let res = lhs.val.wrapping_sub(rhs.val);
        let write = self.write(ins.dst as usize, res)?;
        Ok(Step {
            reads: vec![lhs, rhs],
            write,
            message: format!(
                "Calculated {} - {} = {}, stored in memory[{}].",
                lhs.val, rhs.val, res, write.addr
            ),
        })
    }

    fn exec(&mut self, ins: &Ins) -> Result<Step, MemError> {
        match ins {
            Ins::LoadConstant(ins) => self.exec_load_constant(ins),
            Ins::LoadMemory(ins) => self.exec_load_memory(ins),
            Ins::StoreToMemory(ins) => self.exec_store_to_memory(ins),
            Ins::Subtract(ins) => self.exec_subtract(ins),
        }
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
