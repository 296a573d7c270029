use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{info, warn, LevelFilter};
use simple_logger::SimpleLogger;

use intcode::bytecode::assembly::{disassemble, make_listing_table, parse_program};
use intcode::memory::DEFAULT_MEMORY_LIMIT;
use intcode::{AsciiEvent, Machine, MachineConfig, NonAscii, Word};

#[derive(Parser, Debug)]
#[command(
  name = "intcode",
  about = "Run or disassemble a program of comma-separated integer words."
)]
struct Args {
  /// Program text: decimal words separated by commas.
  #[arg(value_name = "PATH")]
  program: PathBuf,

  /// Words to queue as input before the program starts.
  #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
  input: Vec<Word>,

  /// Talk to the program in ASCII: its lines go to stdout, stdin lines become its commands.
  #[arg(long)]
  ascii: bool,

  /// Print an assembly listing of the program instead of running it.
  #[arg(long)]
  disassemble: bool,

  /// Largest memory, in words, the program may grow to.
  #[arg(long, default_value_t = DEFAULT_MEMORY_LIMIT)]
  memory_limit: usize,

  /// Log more (-v for suspensions, -vv for every instruction).
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

fn main() -> Result<()> {
  let args = Args::parse();

  let level = match args.verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  SimpleLogger::new().with_level(level).init()?;

  #[cfg(feature = "trace_computation")]
  info!("Computation Tracing ENABLED");

  let text = fs::read_to_string(&args.program)
    .with_context(|| format!("cannot read {}", args.program.display()))?;
  let program = parse_program(&text)
    .with_context(|| format!("cannot parse {}", args.program.display()))?;
  info!("loaded {} words from {}", program.len(), args.program.display());

  if args.disassemble {
    make_listing_table(&disassemble(&program)).printstd();
    return Ok(());
  }

  let config      = MachineConfig { memory_limit: args.memory_limit };
  let mut machine = Machine::with_config(&program, &args.input, config);

  match args.ascii {
    true  => run_ascii(&mut machine)?,
    false => {
      for value in machine.run_to_completion()? {
        println!("{}", value);
      }
    }
  }

  info!("{} instructions executed", machine.instructions_executed());
  Ok(())
}

/// Relays the program's text to stdout and stdin lines to the program until it halts or
/// stdin runs out.
fn run_ascii(machine: &mut Machine) -> Result<()> {
  let stdin  = io::stdin();
  let mut lines = stdin.lock().lines();

  loop {
    match machine.run_until_line_or_event(&NonAscii)? {

      AsciiEvent::Line(line)    => println!("{}", line),

      AsciiEvent::Signal(value) => println!("{}", value),

      AsciiEvent::NeedsInput    => {
        // Whatever is buffered is a prompt without a newline.
        print!("{}", machine.take_partial_line());
        io::stdout().flush()?;
        match lines.next() {
          Some(line) => machine.append_text_command(line?.trim_end()),
          None       => {
            warn!("end of input while the program is waiting for a command");
            return Ok(());
          }
        }
      }

      AsciiEvent::Halted        => {
        let rest = machine.take_partial_line();
        if !rest.is_empty() {
          println!("{}", rest);
        }
        return Ok(());
      }

    }
  }
}
