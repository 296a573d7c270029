/*!
  Programs are exchanged as text: decimal words separated by commas, usually on one long
  line. This module parses that text into words with `nom`, and goes the other way for
  people, rendering a program as an assembly listing built from the `strum` mnemonics of
  the opcodes.
*/

use std::fmt::{Display, Formatter};

use nom::{
  IResult,
  branch::alt,
  character::complete::{char as one_char, digit1, multispace0},
  combinator::{all_consuming, map_res, opt, recognize},
  multi::separated_list,
  sequence::{delimited, pair},
};
use prettytable::Table;

use super::{try_decode_instruction, Instruction, Mode, Word};
use crate::address::Address;
use crate::error::{MachineError, Result};
use crate::machine::TABLE_DISPLAY_FORMAT;

// How much of the offending text to quote in a parse error.
const ERROR_CONTEXT_CHARS: usize = 16;

fn word_p(input: &str) -> IResult<&str, Word> {
  map_res(
    recognize(pair(opt(alt((one_char('-'), one_char('+')))), digit1)),
    |text: &str| text.parse::<Word>()
  )(input)
}

fn program_p(input: &str) -> IResult<&str, Vec<Word>> {
  delimited(
    multispace0,
    separated_list(delimited(multispace0, one_char(','), multispace0), word_p),
    multispace0
  )(input)
}

// Parsing stops before the separator preceding a bad item. Step over it so errors point at
// the item itself.
fn skip_separator(rest: &str) -> &str {
  match rest.trim_start().strip_prefix(',') {
    Some(after) => after.trim_start(),
    None        => rest,
  }
}

/**
  Parses program text into words. Whitespace, including line breaks, is allowed around every
  word and separator. Anything else, including a word that does not fit in 64 bits, is a
  `MachineError::MalformedProgram` naming the byte offset of the offending item.
*/
pub fn parse_program(text: &str) -> Result<Vec<Word>> {
  match all_consuming(program_p)(text) {
    Ok((_rest, words)) => Ok(words),

    | Err(nom::Err::Error((rest, _kind)))
    | Err(nom::Err::Failure((rest, _kind))) => {
      let rest = skip_separator(rest);
      Err(MachineError::MalformedProgram {
        offset: text.len() - rest.len(),
        found: rest.chars().take(ERROR_CONTEXT_CHARS).collect()
      })
    }

    Err(nom::Err::Incomplete(_needed)) => {
      Err(MachineError::MalformedProgram { offset: text.len(), found: String::new() })
    }
  }
}

/// Renders one parameter the way the listing shows it: `[a]` for position mode, a bare
/// number for immediate mode, and `[rb+a]` for relative mode.
fn format_parameter(mode: Mode, word: Word) -> String {
  match mode {
    Mode::Position  => format!("[{}]", word),
    Mode::Immediate => format!("{}", word),
    Mode::Relative if word < 0 => format!("[rb{}]", word),
    Mode::Relative  => format!("[rb+{}]", word),
  }
}

/// Renders an instruction and its parameter words, e.g. `ADD [4], 3, [rb-1]`. Missing
/// parameter words, as at the end of a truncated program, are shown as `?`.
pub fn format_operation(instruction: &Instruction, parameters: &[Word]) -> String {
  let arity = instruction.opcode.arity();
  if arity == 0 {
    return instruction.opcode.to_string();
  }
  let rendered: Vec<String> =
    (0..arity).map(|i| {
      match parameters.get(i) {
        Some(word) => format_parameter(instruction.modes[i], *word),
        None       => "?".to_string()
      }
    }).collect();
  format!("{} {}", instruction.opcode, rendered.join(", "))
}

/// One line of a listing: either a decoded instruction or a word that does not decode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Listing {
  pub address : Address,
  pub words   : Vec<Word>,
  pub text    : String,
}

impl Display for Listing {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:>6}: {}", self.address.idx(), self.text)
  }
}

/**
  Decodes `program` linearly from address 0. Since code and data share memory, a word that
  is not a valid opcode word, or an instruction running off the end of the program, is
  listed as `DATA` and decoding resumes at the next word. The listing is only a static view:
  self-modifying programs execute differently.
*/
pub fn disassemble(program: &[Word]) -> Vec<Listing> {
  let mut listing = Vec::new();
  let mut idx = 0;

  while idx < program.len() {
    let address = Address(idx);
    match try_decode_instruction(program[idx], address) {

      Ok(instruction) if idx + instruction.opcode.len() <= program.len() => {
        let end = idx + instruction.opcode.len();
        listing.push(Listing {
          address,
          words : program[idx..end].to_vec(),
          text  : format_operation(&instruction, &program[idx + 1..end]),
        });
        idx = end;
      }

      _ => {
        listing.push(Listing {
          address,
          words : vec![program[idx]],
          text  : format!("DATA {}", program[idx]),
        });
        idx += 1;
      }

    }
  }

  listing
}

/// Lays out a listing as a three column table: address, raw words, and assembly. An empty
/// listing gets a single placeholder row.
pub fn make_listing_table(listing: &[Listing]) -> Table {
  let mut table = Table::new();

  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"Address", ubl->"Words", ubl->"Assembly"]);

  // A table with titles but no rows cannot be rendered.
  if listing.is_empty() {
    table.add_row(row![r->"", "", "(empty program)"]);
  }

  for line in listing {
    let words =
      line.words
          .iter()
          .map(Word::to_string)
          .collect::<Vec<String>>()
          .join(",");
    table.add_row(row![r->line.address.idx(), words, line.text]);
  }
  table
}
