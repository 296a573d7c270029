//! The execution engine: a resumable fetch-decode-execute loop over a private memory.
//!
//! A `Machine` runs until something happens that its host has to know about, an output, an
//! input request it cannot satisfy, or the end of the program, and reports it as an `Event`.
//! Nothing blocks. A host that wants input to arrive later simply appends it to the input
//! queue and calls `resume` again.

use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

use log::{debug, log_enabled, trace, warn, Level};
use prettytable::{format as TableFormat, Table};

use crate::address::{Address, AddressNumberType};
use crate::bytecode::assembly::format_operation;
use crate::bytecode::{try_decode_instruction, Instruction, Mode, Opcode, Word};
use crate::error::{MachineError, Result};
use crate::memory::{Memory, DEFAULT_MEMORY_LIMIT};

/// What a call to `Machine::resume` stopped for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Event {
  /// The program emitted a value. The instruction pointer is already past the output
  /// instruction, so the host may resume immediately.
  Output(Word),
  /// The program wants input and the queue is empty. Nothing changed; append input and
  /// resume to retry the same instruction.
  NeedsInput,
  /// The program terminated. Resuming again reports `Halted` again.
  Halted,
}

/// Where a machine is in its life between calls to `resume`. Execution itself is never
/// observable from outside.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum State {
  /// Loaded, or stopped after an output. The next resume continues at `pc`.
  Ready,
  AwaitingInput,
  Terminated,
  /// A fatal error stopped the machine. It is reported again on every resume.
  Faulted(MachineError),
}

impl Display for State {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      State::Ready           => write!(f, "Ready"),
      State::AwaitingInput   => write!(f, "Awaiting input"),
      State::Terminated      => write!(f, "Terminated"),
      State::Faulted(error)  => write!(f, "Faulted: {}", error),
    }
  }
}

/// Run-time settings for a machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MachineConfig {
  /// Memory refuses to zero-extend past this many words.
  pub memory_limit: AddressNumberType,
}

impl Default for MachineConfig {
  fn default() -> MachineConfig {
    MachineConfig {
      memory_limit: DEFAULT_MEMORY_LIMIT,
    }
  }
}

#[derive(Clone, Debug)]
pub struct Machine {

  // Memory Store
  memory : Memory, // Code and data

  // Registers //
  pc            : Address, // Instruction pointer, the address of the next opcode word
  relative_base : Word,    // Offset added to relative mode parameters

  // Host interface
  inputs : VecDeque<Word>, // Pending input, consumed from the front
  state  : State,

  executed : u64, // Number of instructions completed

  // The unterminated tail of the current text line, see `interactive`.
  pub(crate) line_buffer : String,
}

impl Machine {

  // region Construction and host interface

  /// Loads a copy of `program`, with `inputs` already queued.
  pub fn new(program: &[Word], inputs: &[Word]) -> Machine {
    Machine::with_config(program, inputs, MachineConfig::default())
  }

  pub fn with_config(program: &[Word], inputs: &[Word], config: MachineConfig) -> Machine {
    Machine {
      memory        :  Memory::with_limit(program, config.memory_limit),
      pc            :  Address(0),
      relative_base :  0,
      inputs        :  inputs.iter().copied().collect(),
      state         :  State::Ready,
      executed      :  0,
      line_buffer   :  String::new(),
    }
  }

  /// Appends one word to the back of the input queue.
  pub fn push_input(&mut self, value: Word) {
    self.inputs.push_back(value);
  }

  /// Appends every word of `values`, in order, to the back of the input queue.
  pub fn extend_input<I>(&mut self, values: I)
    where I: IntoIterator<Item = Word>
  {
    self.inputs.extend(values);
  }

  pub fn pending_input(&self) -> &VecDeque<Word> {
    &self.inputs
  }

  pub fn pc(&self) -> Address {
    self.pc
  }

  pub fn relative_base(&self) -> Word {
    self.relative_base
  }

  pub fn state(&self) -> &State {
    &self.state
  }

  pub fn is_halted(&self) -> bool {
    self.state == State::Terminated
  }

  pub fn memory(&self) -> &Memory {
    &self.memory
  }

  pub fn instructions_executed(&self) -> u64 {
    self.executed
  }

  // endregion

  // region Execution

  /**
    Executes instructions until the next event. This is the machine's only execution
    primitive; everything in `interactive` and `scheduler` is built on it.

    A terminated machine reports `Event::Halted` without executing anything. A faulted one
    reports its fault again.
  */
  pub fn resume(&mut self) -> Result<Event> {
    match &self.state {
      State::Terminated      => return Ok(Event::Halted),
      State::Faulted(error)  => return Err(error.clone()),
      _                      => {}
    }
    self.state = State::Ready;

    loop {
      match self.execute_instruction() {

        Ok(None) => {
          #[cfg(feature = "trace_computation")] trace!("\n{}", self);
        }

        Ok(Some(event)) => {
          match event {
            Event::Output(_)  => {}
            Event::NeedsInput => {
              debug!("awaiting input at {}", self.pc);
              self.state = State::AwaitingInput;
            }
            Event::Halted     => {
              debug!("halted at {} after {} instructions", self.pc, self.executed);
              self.state = State::Terminated;
            }
          }
          return Ok(event);
        }

        Err(error) => {
          warn!("machine fault: {}", error);
          self.state = State::Faulted(error.clone());
          return Err(error);
        }

      }
    }
  }

  /// Executes the instruction at `pc`. Returns the event it produced, if any.
  fn execute_instruction(&mut self) -> Result<Option<Event>> {
    let pc          = self.pc;
    let code        = self.memory.read(pc)?;
    let instruction = try_decode_instruction(code, pc)?;

    if log_enabled!(Level::Trace) {
      let parameters: Vec<Word> =
        (1..=instruction.opcode.arity()).map(|k| self.memory.peek(pc + k)).collect();
      trace!("{:>6}: {}", pc.idx(), format_operation(&instruction, &parameters));
    }

    let event = match instruction.opcode {

      Opcode::Add => {
        let a = self.read_parameter(&instruction, 1)?;
        let b = self.read_parameter(&instruction, 2)?;
        let sum = a.checked_add(b).ok_or(MachineError::ArithmeticOverflow { pc: pc.idx() })?;
        self.write_parameter(&instruction, 3, sum)?;
        None
      }

      Opcode::Multiply => {
        let a = self.read_parameter(&instruction, 1)?;
        let b = self.read_parameter(&instruction, 2)?;
        let product = a.checked_mul(b).ok_or(MachineError::ArithmeticOverflow { pc: pc.idx() })?;
        self.write_parameter(&instruction, 3, product)?;
        None
      }

      Opcode::Input => {
        if self.inputs.is_empty() {
          // The instruction is retried on the next resume, so nothing may change here.
          return Ok(Some(Event::NeedsInput));
        }
        let target = self.parameter_address(&instruction, 1)?;
        if let Some(value) = self.inputs.pop_front() {
          self.memory.write(target, value)?;
        }
        None
      }

      Opcode::Output => {
        let value = self.read_parameter(&instruction, 1)?;
        Some(Event::Output(value))
      }

      | Opcode::JumpIfTrue
      | Opcode::JumpIfFalse => {
        let test   = self.read_parameter(&instruction, 1)?;
        let target = self.read_parameter(&instruction, 2)?;
        if (test != 0) == (instruction.opcode == Opcode::JumpIfTrue) {
          self.pc        = Address::from_word(target, pc)?;
          self.executed += 1;
          return Ok(None);
        }
        None
      }

      Opcode::LessThan => {
        let a = self.read_parameter(&instruction, 1)?;
        let b = self.read_parameter(&instruction, 2)?;
        self.write_parameter(&instruction, 3, (a < b) as Word)?;
        None
      }

      Opcode::Equals => {
        let a = self.read_parameter(&instruction, 1)?;
        let b = self.read_parameter(&instruction, 2)?;
        self.write_parameter(&instruction, 3, (a == b) as Word)?;
        None
      }

      Opcode::AdjustRelativeBase => {
        let offset = self.read_parameter(&instruction, 1)?;
        self.relative_base =
          self.relative_base
              .checked_add(offset)
              .ok_or(MachineError::ArithmeticOverflow { pc: pc.idx() })?;
        None
      }

      Opcode::Terminate => {
        self.executed += 1;
        return Ok(Some(Event::Halted));
      }

    };

    self.pc        = pc + instruction.opcode.len();
    self.executed += 1;
    Ok(event)
  }

  /// The raw parameter word `k` of the current instruction.
  fn parameter_word(&mut self, k: usize) -> Result<Word> {
    self.memory.read(self.pc + k)
  }

  /// The address parameter `k` of the current instruction refers to.
  fn parameter_address(&mut self, instruction: &Instruction, k: usize) -> Result<Address> {
    let word = self.parameter_word(k)?;
    match instruction.mode(k) {

      Mode::Position  => Address::from_word(word, self.pc),

      Mode::Relative  => {
        let address =
          self.relative_base
              .checked_add(word)
              .ok_or(MachineError::ArithmeticOverflow { pc: self.pc.idx() })?;
        Address::from_word(address, self.pc)
      }

      // Decoding rejects immediate-mode writes, so only a caller bug gets here.
      Mode::Immediate => {
        Err(MachineError::ImmediateWrite { pc: self.pc.idx(), code: self.memory.peek(self.pc) })
      }

    }
  }

  /// The value of parameter `k` of the current instruction.
  fn read_parameter(&mut self, instruction: &Instruction, k: usize) -> Result<Word> {
    match instruction.mode(k) {
      Mode::Immediate => self.parameter_word(k),
      _               => {
        let address = self.parameter_address(instruction, k)?;
        self.memory.read(address)
      }
    }
  }

  /// Stores `value` through parameter `k` of the current instruction.
  fn write_parameter(&mut self, instruction: &Instruction, k: usize, value: Word) -> Result<()> {
    let address = self.parameter_address(instruction, k)?;
    self.memory.write(address, value)
  }

  // endregion

  // region Display methods

  fn make_memory_table(cells: &[Word], highlight: usize, start: usize) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    for (i, cell) in cells.iter().enumerate() {
      match i + start == highlight {

        true  => {
          table.add_row(
            row![r->format!("* --> MEM[{}] =", i + start), format!("{}", cell)]
          );
        }

        false => {
          table.add_row(
            row![r->format!("MEM[{}] =", i + start), format!("{}", cell)]
          );
        }

      } // end match on highlight
    } // end for
    table
  }

  fn make_register_table(&self) -> Table {
    let mut table = Table::new();

    let pending =
      self.inputs
          .iter()
          .map(Word::to_string)
          .collect::<Vec<String>>()
          .join(", ");

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Register", ubl->"Contents"]);
    table.add_row(row![r->"PC =",       self.pc.idx()]);
    table.add_row(row![r->"RB =",       self.relative_base]);
    table.add_row(row![r->"Input =",    format!("[{}]", pending)]);
    table.add_row(row![r->"Executed =", self.executed]);
    table
  }

  // endregion

}

// Number of memory cells shown on either side of the instruction pointer.
const MEMORY_WINDOW: usize = 6;

lazy_static! {
  pub(crate) static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for Machine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    // Read through `peek` so the window, and the PC's row, exist past the end of memory.
    let pc    = self.pc.idx();
    let start = pc.saturating_sub(MEMORY_WINDOW);
    let cells: Vec<Word> =
      (start..=pc + MEMORY_WINDOW).map(|idx| self.memory.peek(Address(idx))).collect();

    let m_table = Machine::make_memory_table(&cells, pc, start);
    let r_table = self.make_register_table();

    let mut combined_table = table!([m_table, r_table]);

    combined_table.set_titles(row![ub->"Memory", ub->"Registers"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(f, "State: {}\n{}", self.state, combined_table)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  fn run(program: &[Word], inputs: &[Word]) -> (Machine, Vec<Word>) {
    let mut machine = Machine::new(program, inputs);
    let mut outputs = vec![];
    loop {
      match machine.resume().unwrap() {
        Event::Output(value) => outputs.push(value),
        Event::NeedsInput    => panic!("unexpected input request at {}", machine.pc()),
        Event::Halted        => break,
      }
    }
    (machine, outputs)
  }

  #[test]
  fn add_in_position_mode() {
    let (machine, outputs) = run(&[1, 0, 0, 0, 99], &[]);
    assert_eq!(machine.memory().as_slice(), &[2, 0, 0, 0, 99]);
    assert!(outputs.is_empty());
  }

  #[test]
  fn small_position_mode_programs() {
    assert_eq!(run(&[2, 3, 0, 3, 99], &[]).0.memory().as_slice(), &[2, 3, 0, 6, 99]);
    assert_eq!(run(&[2, 4, 4, 5, 99, 0], &[]).0.memory().as_slice(), &[2, 4, 4, 5, 99, 9801]);
    assert_eq!(
      run(&[1, 1, 1, 4, 99, 5, 6, 0, 99], &[]).0.memory().as_slice(),
      &[30, 1, 1, 4, 2, 5, 6, 0, 99]
    );
    assert_eq!(
      run(&[1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50], &[]).0.memory().peek(Address(0)),
      3500
    );
  }

  #[test]
  fn immediate_mode_add_writes_terminator() {
    let (machine, outputs) = run(&[1101, 100, -1, 4, 0], &[]);
    assert_eq!(machine.memory().peek(Address(4)), 99);
    assert!(outputs.is_empty());
    assert!(machine.is_halted());
  }

  #[test]
  fn outputs_large_immediate() {
    assert_eq!(run(&[104, 1125899906842624, 99], &[]).1, vec![1125899906842624]);
  }

  #[test]
  fn relative_mode_round_trip() {
    let (machine, outputs) = run(&[109, 1, 9, 2, 204, -6, 99], &[]);
    assert_eq!(outputs, vec![204]);
    assert_eq!(machine.relative_base(), 10);
  }

  #[test]
  fn input_echo() {
    assert_eq!(run(&[3, 0, 4, 0, 99], &[-42]).1, vec![-42]);
  }

  #[test]
  fn output_leaves_pc_past_instruction() {
    let mut machine = Machine::new(&[104, 7, 104, 8, 99], &[]);
    assert_eq!(machine.resume(), Ok(Event::Output(7)));
    assert_eq!(machine.pc(), Address(2));
    assert_eq!(machine.resume(), Ok(Event::Output(8)));
    assert_eq!(machine.resume(), Ok(Event::Halted));
  }

  #[test]
  fn input_request_changes_nothing() {
    let mut machine = Machine::new(&[104, 1, 3, 9, 4, 9, 99], &[]);
    assert_eq!(machine.resume(), Ok(Event::Output(1)));
    let memory_before = machine.memory().clone();

    assert_eq!(machine.resume(), Ok(Event::NeedsInput));
    assert_eq!(machine.pc(), Address(2));
    assert_eq!(machine.state(), &State::AwaitingInput);
    assert_eq!(machine.memory(), &memory_before);
    assert_eq!(machine.instructions_executed(), 1);

    // Asking again without input is harmless.
    assert_eq!(machine.resume(), Ok(Event::NeedsInput));
    assert_eq!(machine.pc(), Address(2));

    machine.push_input(5);
    assert_eq!(machine.resume(), Ok(Event::Output(5)));
    assert_eq!(machine.resume(), Ok(Event::Halted));
  }

  #[test]
  fn halted_machine_stays_halted() {
    let mut machine = Machine::new(&[99, 104, 1, 99], &[]);
    assert_eq!(machine.resume(), Ok(Event::Halted));
    let executed = machine.instructions_executed();
    assert_eq!(machine.resume(), Ok(Event::Halted));
    assert_eq!(machine.resume(), Ok(Event::Halted));
    assert_eq!(machine.instructions_executed(), executed);
    assert_eq!(machine.pc(), Address(0));
  }

  #[test]
  fn jumps() {
    // Outputs 0 if the input was zero and 1 otherwise, in position and immediate mode.
    let position  = [3, 12, 6, 12, 15, 1, 13, 14, 13, 4, 13, 99, -1, 0, 1, 9];
    let immediate = [3, 3, 1105, -1, 9, 1101, 0, 0, 12, 4, 12, 99, 1];
    for program in &[&position[..], &immediate[..]] {
      assert_eq!(run(program, &[0]).1, vec![0]);
      assert_eq!(run(program, &[7]).1, vec![1]);
    }
  }

  #[test]
  fn comparisons() {
    let equal_position      = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
    let less_than_position  = [3, 9, 7, 9, 10, 9, 4, 9, 99, -1, 8];
    let equal_immediate     = [3, 3, 1108, -1, 8, 3, 4, 3, 99];
    let less_than_immediate = [3, 3, 1107, -1, 8, 3, 4, 3, 99];

    assert_eq!(run(&equal_position, &[8]).1, vec![1]);
    assert_eq!(run(&equal_position, &[9]).1, vec![0]);
    assert_eq!(run(&less_than_position, &[7]).1, vec![1]);
    assert_eq!(run(&less_than_position, &[8]).1, vec![0]);
    assert_eq!(run(&equal_immediate, &[8]).1, vec![1]);
    assert_eq!(run(&equal_immediate, &[-8]).1, vec![0]);
    assert_eq!(run(&less_than_immediate, &[-100]).1, vec![1]);
    assert_eq!(run(&less_than_immediate, &[100]).1, vec![0]);
  }

  #[test]
  fn compare_with_eight() {
    let program = [
      3, 21, 1008, 21, 8, 20, 1005, 20, 22, 107, 8, 21, 20, 1006, 20, 31, 1106, 0, 36, 98, 0,
      0, 1002, 21, 125, 20, 4, 20, 1105, 1, 46, 104, 999, 1105, 1, 46, 1101, 1000, 1, 20, 4,
      20, 1105, 1, 46, 98, 99
    ];
    assert_eq!(run(&program, &[7]).1, vec![999]);
    assert_eq!(run(&program, &[8]).1, vec![1000]);
    assert_eq!(run(&program, &[9]).1, vec![1001]);
  }

  #[test]
  fn sixteen_digit_product() {
    let (_, outputs) = run(&[1102, 34915192, 34915192, 7, 4, 7, 99, 0], &[]);
    assert_eq!(outputs, vec![34915192 * 34915192]);
    assert_eq!(outputs[0].to_string().len(), 16);
  }

  #[test]
  fn quine() {
    let program = [109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99];
    let (machine, outputs) = run(&program, &[]);
    assert_eq!(outputs, program.to_vec());
    // Reading and writing addresses 100 and 101 grew memory past the program.
    assert_eq!(machine.memory().len(), 102);
  }

  #[test]
  fn relative_mode_writes() {
    // rb = 50; input -> [rb+3]; out [53]
    let (machine, outputs) = run(&[109, 50, 203, 3, 4, 53, 99], &[11]);
    assert_eq!(outputs, vec![11]);
    assert_eq!(machine.memory().peek(Address(53)), 11);
  }

  #[test]
  fn unknown_opcode_faults_permanently() {
    let mut machine = Machine::new(&[104, 3, 42, 99], &[]);
    assert_eq!(machine.resume(), Ok(Event::Output(3)));
    let fault = MachineError::InvalidOpcode { pc: 2, code: 42 };
    assert_eq!(machine.resume(), Err(fault.clone()));
    assert_eq!(machine.state(), &State::Faulted(fault.clone()));
    assert_eq!(machine.resume(), Err(fault));
  }

  #[test]
  fn running_off_the_end_reads_a_zero_opcode() {
    let mut machine = Machine::new(&[104, 5], &[]);
    assert_eq!(machine.resume(), Ok(Event::Output(5)));
    assert_eq!(machine.resume(), Err(MachineError::InvalidOpcode { pc: 2, code: 0 }));
  }

  #[test]
  fn negative_addresses_fault() {
    let mut machine = Machine::new(&[4, -1, 99], &[]);
    assert_eq!(machine.resume(), Err(MachineError::InvalidAddress { pc: 0, address: -1 }));

    let mut machine = Machine::new(&[109, 2, 204, -3, 99], &[]);
    assert_eq!(machine.resume(), Err(MachineError::InvalidAddress { pc: 2, address: -1 }));

    let mut machine = Machine::new(&[1105, 1, -5], &[]);
    assert_eq!(machine.resume(), Err(MachineError::InvalidAddress { pc: 0, address: -5 }));
  }

  #[test]
  fn overflow_faults() {
    let mut machine = Machine::new(&[1102, Word::max_value(), 2, 0, 99], &[]);
    assert_eq!(machine.resume(), Err(MachineError::ArithmeticOverflow { pc: 0 }));

    let mut machine = Machine::new(&[1101, Word::min_value(), -1, 0, 99], &[]);
    assert_eq!(machine.resume(), Err(MachineError::ArithmeticOverflow { pc: 0 }));

    let mut machine = Machine::new(&[109, Word::max_value(), 109, 1, 99], &[]);
    assert_eq!(machine.resume(), Err(MachineError::ArithmeticOverflow { pc: 2 }));
  }

  #[test]
  fn memory_limit_is_enforced() {
    let config = MachineConfig { memory_limit: 16 };
    let mut machine = Machine::with_config(&[1101, 1, 1, 100, 99], &[], config);
    assert_eq!(
      machine.resume(),
      Err(MachineError::MemoryLimitExceeded { address: 100, limit: 16 })
    );
  }

  #[test]
  fn program_buffer_is_not_aliased() {
    let program = vec![1, 0, 0, 0, 99];
    let (machine, _) = run(&program, &[]);
    assert_eq!(program, vec![1, 0, 0, 0, 99]);
    assert_eq!(machine.memory().peek(Address(0)), 2);
  }

  #[test]
  fn clones_run_independently() {
    let mut original = Machine::new(&[3, 9, 4, 9, 1105, 1, 0, 99, 0, 0], &[]);
    assert_eq!(original.resume(), Ok(Event::NeedsInput));
    let mut fork = original.clone();

    original.push_input(1);
    fork.push_input(2);
    assert_eq!(original.resume(), Ok(Event::Output(1)));
    assert_eq!(fork.resume(), Ok(Event::Output(2)));
    assert_eq!(original.memory().peek(Address(9)), 1);
    assert_eq!(fork.memory().peek(Address(9)), 2);
  }

  #[test]
  fn display_shows_registers_and_memory() {
    let mut machine = Machine::new(&[109, 4, 3, 0, 99], &[]);
    machine.resume().unwrap();
    let text = machine.to_string();
    assert!(text.starts_with("State: Awaiting input"));
    assert!(text.contains("* --> MEM[2] ="));
    assert!(text.contains("PC ="));
  }

  #[test]
  fn display_of_an_empty_program() {
    let text = Machine::new(&[], &[]).to_string();
    assert!(text.starts_with("State: Ready"));
    assert!(text.contains("* --> MEM[0] ="));
    assert!(text.contains("MEM[6] ="));
  }

  #[test]
  fn display_after_jumping_past_the_end() {
    let mut machine = Machine::new(&[1105, 1, 50], &[]);
    assert_eq!(machine.resume(), Err(MachineError::InvalidOpcode { pc: 50, code: 0 }));
    let text = machine.to_string();
    assert!(text.starts_with("State: Faulted"));
    assert!(text.contains("* --> MEM[50] ="));
    assert!(text.contains("MEM[56] ="));

    // Fetching beyond the limit fails before memory grows; the window is still drawn.
    let target = 1 << 40;
    let mut machine = Machine::new(&[1105, 1, target], &[]);
    let fault = MachineError::MemoryLimitExceeded {
      address : target as usize,
      limit   : machine.memory().limit(),
    };
    assert_eq!(machine.resume(), Err(fault));
    let text = machine.to_string();
    assert!(text.contains(&format!("* --> MEM[{}] =", target)));
    assert!(text.contains(&format!("MEM[{}] =", target - 6)));
    // Rendering never grows memory.
    assert_eq!(machine.memory().len(), 3);
  }
}
