//! Every fatal condition the machine, its program loader, and its schedulers can report.
//!
//! The one recoverable condition, a program asking for input nobody has supplied yet, is not
//! an error at all. It is `Event::NeedsInput`, and hosts are expected to handle it.

use thiserror::Error;

use crate::bytecode::Word;

pub type Result<T> = std::result::Result<T, MachineError>;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum MachineError {
  /// The low two digits of the word at `pc` do not name an operation.
  #[error("invalid opcode {code} at address {pc}")]
  InvalidOpcode { pc: usize, code: Word },

  /// A parameter mode digit other than 0, 1 or 2.
  #[error("invalid mode {mode} for parameter {parameter} of {code} at address {pc}")]
  InvalidMode { pc: usize, code: Word, parameter: usize, mode: Word },

  /// The instruction at `pc` writes through an immediate-mode parameter.
  #[error("immediate-mode write target in {code} at address {pc}")]
  ImmediateWrite { pc: usize, code: Word },

  /// A computed address (or jump target) is negative.
  #[error("instruction at address {pc} resolved to invalid address {address}")]
  InvalidAddress { pc: usize, address: Word },

  /// A sum, product or relative base adjustment left the 64-bit range.
  #[error("arithmetic overflow in instruction at address {pc}")]
  ArithmeticOverflow { pc: usize },

  /// Zero-extension past the configured memory limit.
  #[error("address {address} exceeds the memory limit of {limit} words")]
  MemoryLimitExceeded { address: usize, limit: usize },

  /// A non-interactive run hit an input request it cannot satisfy.
  #[error("program requested input at address {pc} but none can be supplied")]
  ProtocolMisuse { pc: usize },

  /// Program text that is not a comma-separated list of decimal integers.
  #[error("malformed program text at byte {offset}: {found:?}")]
  MalformedProgram { offset: usize, found: String },

  /// Every node of a network is idle and nothing is left to wake them.
  #[error("network is idle with no packet to resend")]
  NetworkDeadlock,
}

impl MachineError {
  /// Decode errors signal a corrupt program or a machine bug rather than misuse.
  pub fn is_decode_error(&self) -> bool {
    match self {
      | MachineError::InvalidOpcode { .. }
      | MachineError::InvalidMode { .. }
      | MachineError::ImmediateWrite { .. } => true,
      _                                    => false
    }
  }
}
