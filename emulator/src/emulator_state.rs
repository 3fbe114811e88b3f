use common::constants::MEM_SIZE;

use std::collections::BTreeMap;
use std::ops::Range;

use log::trace;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemError {
    #[error("Address {addr} out of range (memory size {size})")]
    OutOfRange { addr: i64, size: usize },
}

// Non-zero cells only, keyed by address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDump(BTreeMap<usize, i64>);

impl MemoryDump {
    pub fn get(&self, addr: usize) -> Option<i64> {
        self.0.get(&addr).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.0.iter().map(|(addr, val)| (*addr, *val))
    }
}

impl FromIterator<(usize, i64)> for MemoryDump {
    fn from_iter<I: IntoIterator<Item = (usize, i64)>>(iter: I) -> Self {
        MemoryDump(iter.into_iter().collect())
    }
}

// Keys are labeled "address_N", in address order.
impl Serialize for MemoryDump {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(addr, val)| (format!("address_{addr}"), val)))
    }
}


// Kept apart from Emulator so tests and tools can poke at memory directly.
pub struct EmulatorState {
    num_ins: usize,
    mem: Vec<i64>,
}

impl EmulatorState {
    pub fn new() -> Self {
        Self::with_mem_size(MEM_SIZE)
    }

    pub fn with_mem_size(size: usize) -> Self {
        EmulatorState {
            num_ins: 0usize,
            mem: vec![0; size],
        }
    }

    pub fn inc_ins(&mut self) {
        self.num_ins += 1;
    }

    pub fn num_ins(&self) -> usize {
        self.num_ins
    }

    pub fn mem_size(&self) -> usize {
        self.mem.len()
    }

    // Turn a value read out of memory into an address.
    pub fn resolve_addr(&self, addr: i64) -> Result<usize, MemError> {
        usize::try_from(addr)
            .ok()
            .filter(|addr| *addr < self.mem.len())
            .ok_or(MemError::OutOfRange { addr, size: self.mem.len() })
    }

    fn check_addr(&self, addr: usize) -> Result<usize, MemError> {
        if addr < self.mem.len() {
            Ok(addr)
        } else {
            Err(MemError::OutOfRange { addr: addr as i64, size: self.mem.len() })
        }
    }

    pub fn mem_read(&self, addr: usize) -> Result<i64, MemError> {
        Ok(self.mem[self.check_addr(addr)?])
    }

    pub fn mem_write(&mut self, addr: usize, val: i64) -> Result<(), MemError> {
        let addr = self.check_addr(addr)?;
        trace!("Mem: writing {val} to {addr}");
        self.mem[addr] = val;
        Ok(())
    }

    // Half-open, clamped to the size of memory.
    pub fn dump(&self, range: Range<usize>) -> MemoryDump {
        let end = range.end.min(self.mem.len());
        let start = range.start.min(end);
        (start..end)
            .map(|addr| (addr, self.mem[addr]))
            .filter(|(_, val)| *val != 0)
            .collect()
    }
}

impl Default for EmulatorState {
    fn default() -> Self {
        Self::new()
    }
}
