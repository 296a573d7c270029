/*!
  Conveniences for driving a machine, built only on `Machine::resume` and the input queue.

  Two styles of host are served. Batch hosts run a program to completion, or pull one output
  at a time, and never expect to be asked for input they did not queue up front. Text hosts
  talk to programs that read and write ASCII: they send newline-terminated commands and read
  the program's replies a line at a time.
*/

use std::convert::TryFrom;

use crate::bytecode::Word;
use crate::error::{MachineError, Result};
use crate::machine::{Event, Machine};

/// The line terminator of the text protocol.
pub const NEWLINE: Word = 10;

/// The largest value the conventional policy still treats as a character.
pub const MAX_ASCII: Word = 255;

/// What a call to `Machine::run_until_line_or_event` stopped for.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum AsciiEvent {
  /// A complete line of output, without its terminator.
  Line(String),
  /// An output the signal policy says is a number rather than a character.
  Signal(Word),
  NeedsInput,
  Halted,
}

/**
  Decides which outputs of a text program are raw numbers instead of characters. Text
  programs often report a final answer as one large number in the middle of their prose;
  what counts as such a number is a convention of the host's protocol, not of the machine.
*/
pub trait SignalPolicy {
  fn is_signal(&self, value: Word) -> bool;
}

/// The usual convention: anything past the ASCII range is a signal.
#[derive(Clone, Copy, Debug, Default)]
pub struct NonAscii;

impl SignalPolicy for NonAscii {
  fn is_signal(&self, value: Word) -> bool {
    value > MAX_ASCII
  }
}

/// Every output is text.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSignals;

impl SignalPolicy for NoSignals {
  fn is_signal(&self, _value: Word) -> bool {
    false
  }
}

impl<F> SignalPolicy for F
  where F: Fn(Word) -> bool
{
  fn is_signal(&self, value: Word) -> bool {
    self(value)
  }
}

/// Outputs that are not Unicode scalar values still occupy one character of the line.
fn to_char(value: Word) -> char {
  u32::try_from(value)
    .ok()
    .and_then(std::char::from_u32)
    .unwrap_or(std::char::REPLACEMENT_CHARACTER)
}

impl Machine {

  /**
    Runs until the program halts and returns every output in order. The program must not
    ask for more input than was queued: an unsatisfiable input request is a
    `MachineError::ProtocolMisuse`.
  */
  pub fn run_to_completion(&mut self) -> Result<Vec<Word>> {
    let mut outputs = Vec::new();
    while let Some(value) = self.next_output()? {
      outputs.push(value);
    }
    Ok(outputs)
  }

  /// Runs to the next output, or returns `None` if the program halts first. Like
  /// `run_to_completion`, an unsatisfiable input request is a `ProtocolMisuse`.
  pub fn next_output(&mut self) -> Result<Option<Word>> {
    match self.resume()? {
      Event::Output(value) => Ok(Some(value)),
      Event::Halted        => Ok(None),
      Event::NeedsInput    => Err(MachineError::ProtocolMisuse { pc: self.pc().idx() }),
    }
  }

  /// Queues `text` as one command: the code point of every character, then a newline.
  pub fn append_text_command(&mut self, text: &str) {
    self.extend_input(text.chars().map(|c| c as Word));
    self.push_input(NEWLINE);
  }

  /**
    Runs until a line of text is complete, the policy flags an output as a signal, or the
    machine pauses or halts. Text of an unfinished line is kept across calls, so a line
    interrupted by an input request continues where it left off; `take_partial_line` hands
    it over early.
  */
  pub fn run_until_line_or_event<P>(&mut self, policy: &P) -> Result<AsciiEvent>
    where P: SignalPolicy + ?Sized
  {
    loop {
      match self.resume()? {

        Event::Output(value) if policy.is_signal(value) => {
          return Ok(AsciiEvent::Signal(value));
        }

        Event::Output(NEWLINE) => {
          return Ok(AsciiEvent::Line(self.take_partial_line()));
        }

        Event::Output(value) => {
          self.line_buffer.push(to_char(value));
        }

        Event::NeedsInput => return Ok(AsciiEvent::NeedsInput),
        Event::Halted     => return Ok(AsciiEvent::Halted),

      }
    }
  }

  /// Removes and returns the text of the current, unterminated line.
  pub fn take_partial_line(&mut self) -> String {
    std::mem::replace(&mut self.line_buffer, String::new())
  }

}
