pub mod emulator;
pub mod emulator_state;
pub mod range;

pub use emulator::{Cell, Emulator, ExecError, ExecTrace};
pub use emulator_state::{EmulatorState, MemError, MemoryDump};
pub use range::parse_range;
