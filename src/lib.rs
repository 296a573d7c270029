//! A small resumable virtual machine for programs of signed 64-bit words.
//!
//! Programs are loaded into a `Machine`, which executes them until they produce an output,
//! ask for input that has not been queued yet, or halt. Hosts decide what to feed in and
//! what the outputs mean. The layers, leaves first:
//!
//!  * `memory`: a zero-extended, append-only word store.
//!  * `bytecode`: decoding of opcode words into operations and parameter modes, plus the
//!    program text format and a disassembler.
//!  * `machine`: the execution engine and its suspension states.
//!  * `interactive`: run-to-completion and the ASCII line protocol.
//!  * `scheduler`: many machines at once, wired into amplifier chains or networks.

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod address;
pub mod bytecode;
pub mod error;
pub mod interactive;
pub mod machine;
pub mod memory;
pub mod scheduler;

pub use address::Address;
pub use bytecode::Word;
pub use error::{MachineError, Result};
pub use interactive::{AsciiEvent, NoSignals, NonAscii, SignalPolicy};
pub use machine::{Event, Machine, MachineConfig, State};
pub use memory::Memory;
