use log::debug;

use crate::bytecode::Word;
use crate::error::Result;
use crate::machine::Machine;

/**
  A series of machines running the same program, each configured by a phase setting that
  is queued as its first input. A signal enters the first machine and every machine's
  output is the next one's input.
*/
pub struct AmplifierChain {
  amplifiers: Vec<Machine>,
}

impl AmplifierChain {

  pub fn new(program: &[Word], phases: &[Word]) -> AmplifierChain {
    AmplifierChain {
      amplifiers: phases.iter().map(|phase| Machine::new(program, &[*phase])).collect()
    }
  }

  pub fn len(&self) -> usize {
    self.amplifiers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.amplifiers.is_empty()
  }

  /**
    Passes `signal` down the chain and returns the last signal produced.

    Without feedback the signal makes one pass. With feedback the last amplifier's output
    goes back into the first until some amplifier halts instead of answering.
  */
  pub fn run(&mut self, signal: Word, feedback: bool) -> Result<Word> {
    let mut signal = signal;
    let mut passes = 0;

    loop {
      for amplifier in self.amplifiers.iter_mut() {
        amplifier.push_input(signal);
        match amplifier.next_output()? {
          Some(value) => signal = value,
          None        => {
            debug!("amplifier halted after {} passes, final signal {}", passes, signal);
            return Ok(signal);
          }
        }
      }
      passes += 1;

      if !feedback || self.amplifiers.is_empty() {
        return Ok(signal);
      }
    }
  }
}

/// Every ordering of `items`, generated by Heap's algorithm.
pub fn permutations(items: &[Word]) -> Vec<Vec<Word>> {
  let mut items   = items.to_vec();
  let mut result  = vec![items.clone()];
  let mut counter = vec![0; items.len()];
  let mut i = 0;

  while i < items.len() {
    if counter[i] < i {
      match i % 2 == 0 {
        true  => items.swap(0, i),
        false => items.swap(counter[i], i),
      }
      result.push(items.clone());
      counter[i] += 1;
      i = 0;
    } else {
      counter[i] = 0;
      i += 1;
    }
  }
  result
}

/**
  Tries every ordering of `phases` on a fresh chain, starting from signal 0, and returns
  the ordering with the highest final signal together with that signal. The first ordering
  found wins ties.
*/
pub fn best_phase_sequence(program: &[Word], phases: &[Word], feedback: bool)
  -> Result<(Vec<Word>, Word)>
{
  let mut best: Option<(Vec<Word>, Word)> = None;

  for ordering in permutations(phases) {
    let signal = AmplifierChain::new(program, &ordering).run(0, feedback)?;
    match &best {
      Some((_, best_signal)) if *best_signal >= signal => {}
      _ => best = Some((ordering, signal)),
    }
  }

  // There is always at least one ordering, even of no phases.
  Ok(best.unwrap_or((vec![], 0)))
}
