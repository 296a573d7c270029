/*!
  This module is responsible for the encoding and decoding of opcode words.

*/
use std::convert::TryFrom;

use super::{Instruction, Mode, Opcode, Word, MAX_PARAMETERS};
use crate::address::Address;
use crate::error::{MachineError, Result};

// Decimal place of the first parameter's mode digit.
const FIRST_MODE_PLACE: Word = 100;

/**
  Decodes the opcode word `code`, found at `pc`, into an operation and parameter modes.

  Only the mode digits of parameters the operation actually has are inspected. An operation
  that writes through an immediate-mode parameter is rejected here, before anything is
  executed, since no execution of it could be valid.
*/
pub fn try_decode_instruction(code: Word, pc: Address) -> Result<Instruction> {
  if code < 0 {
    return Err(MachineError::InvalidOpcode { pc: pc.idx(), code });
  }

  let opcode = match Opcode::try_from((code % 100) as u8) {
    Ok(opcode) => opcode,
    Err(_e)    => return Err(MachineError::InvalidOpcode { pc: pc.idx(), code })
  };

  let mut modes = [Mode::Position; MAX_PARAMETERS];
  let mut place = FIRST_MODE_PLACE;
  for (k, mode) in modes.iter_mut().enumerate().take(opcode.arity()) {
    let digit = (code / place) % 10;
    *mode = match Mode::try_from(digit as u8) {
      Ok(mode) => mode,
      Err(_e)  => {
        return Err(MachineError::InvalidMode { pc: pc.idx(), code, parameter: k + 1, mode: digit });
      }
    };
    place *= 10;
  }

  if let Some(k) = opcode.write_parameter() {
    if modes[k - 1] == Mode::Immediate {
      return Err(MachineError::ImmediateWrite { pc: pc.idx(), code });
    }
  }

  Ok(Instruction { opcode, modes })
}

/**
  Encodes the instruction into its opcode word. Modes past the operation's arity are not
  encoded, so decoding the result gives back an equal instruction whenever the modes past
  the arity are `Mode::Position`.
*/
pub fn encode_instruction(instruction: &Instruction) -> Word {
  let mut place = FIRST_MODE_PLACE;
  let mut code  = instruction.opcode.code() as Word;
  for mode in instruction.modes.iter().take(instruction.opcode.arity()) {
    code  += Into::<u8>::into(*mode) as Word * place;
    place *= 10;
  }
  code
}
