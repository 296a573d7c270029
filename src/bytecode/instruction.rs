use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// No instruction takes more than three parameters.
pub const MAX_PARAMETERS: usize = 3;

/**
  Opcodes of the virtual machine. The discriminant is the opcode's number in the low two
  decimal digits of an instruction word, so `TryFromPrimitive` does the decoding for us.
  The `strum` names are the mnemonics used by the disassembler.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq,         PartialEq, Debug,            Hash
)]
#[repr(u8)]
pub enum Opcode {
  #[strum(to_string = "ADD")] Add                = 1,  // add( a, b, dest )
  #[strum(to_string = "MUL")] Multiply           = 2,  // mul( a, b, dest )
  #[strum(to_string = "IN")]  Input              = 3,  // in( dest )
  #[strum(to_string = "OUT")] Output             = 4,  // out( a )
  #[strum(to_string = "JNZ")] JumpIfTrue         = 5,  // jnz( test, target )
  #[strum(to_string = "JZ")]  JumpIfFalse        = 6,  // jz( test, target )
  #[strum(to_string = "LT")]  LessThan           = 7,  // lt( a, b, dest )
  #[strum(to_string = "EQ")]  Equals             = 8,  // eq( a, b, dest )
  #[strum(to_string = "ARB")] AdjustRelativeBase = 9,  // arb( offset )
  #[strum(to_string = "HLT")] Terminate          = 99, // hlt
}

/// How a parameter word turns into a value or a write target.
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq, PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum Mode {
  /// The parameter is the address of the value.
  #[strum(to_string = "position")]  Position  = 0,
  /// The parameter is the value.
  #[strum(to_string = "immediate")] Immediate = 1,
  /// The parameter plus the relative base is the address of the value.
  #[strum(to_string = "relative")]  Relative  = 2,
}

impl Default for Mode {
  fn default() -> Mode {
    Mode::Position
  }
}

impl Opcode {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// The number of parameter words following the opcode word.
  pub fn arity(&self) -> usize {
    match self {
      | Opcode::Add
      | Opcode::Multiply
      | Opcode::LessThan
      | Opcode::Equals      => 3,

      | Opcode::JumpIfTrue
      | Opcode::JumpIfFalse => 2,

      | Opcode::Input
      | Opcode::Output
      | Opcode::AdjustRelativeBase => 1,

      Opcode::Terminate     => 0,
    }
  }

  /// The 1-based parameter the operation writes to, if it writes at all.
  pub fn write_parameter(&self) -> Option<usize> {
    match self {
      | Opcode::Add
      | Opcode::Multiply
      | Opcode::LessThan
      | Opcode::Equals => Some(3),
      Opcode::Input    => Some(1),
      _                => None
    }
  }

  /// Size in words of the whole instruction, opcode word included.
  pub fn len(&self) -> usize {
    1 + self.arity()
  }
}

/// A decoded opcode word: the operation and the modes of its parameters. Modes past the
/// operation's arity are always `Mode::Position`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Instruction {
  pub opcode : Opcode,
  pub modes  : [Mode; MAX_PARAMETERS],
}

impl Instruction {
  pub fn new(opcode: Opcode, modes: [Mode; MAX_PARAMETERS]) -> Instruction {
    Instruction { opcode, modes }
  }

  /// An instruction whose parameters are all in position mode.
  pub fn positional(opcode: Opcode) -> Instruction {
    Instruction { opcode, modes: [Mode::Position; MAX_PARAMETERS] }
  }

  /// The mode of the 1-based parameter `k`.
  pub fn mode(&self, k: usize) -> Mode {
    self.modes[k - 1]
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let arity = self.opcode.arity();
    match arity {
      0 => write!(f, "{}", self.opcode),
      _ => write!(
        f,
        "{}({})",
        self.opcode,
        self.modes[..arity]
            .iter()
            .map(Mode::to_string)
            .collect::<Vec<String>>()
            .join(", ")
      )
    }
  }
}
