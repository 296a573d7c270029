/*!
  The machine's memory store: a flat vector of words that only ever grows. Any access past
  the end first zero-extends the vector up to and including the accessed address, so a cell
  nobody has written reads as zero whether or not it has been allocated yet.
*/

use crate::address::{Address, AddressNumberType};
use crate::bytecode::Word;
use crate::error::{MachineError, Result};

/// Default cap on memory growth, in words (128 MiB of cells).
pub const DEFAULT_MEMORY_LIMIT: AddressNumberType = 1 << 24;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Memory {
  cells : Vec<Word>,
  limit : AddressNumberType,
}

impl Memory {

  /// Copies `program` into a new memory store. The caller's slice is never aliased.
  pub fn new(program: &[Word]) -> Memory {
    Memory::with_limit(program, DEFAULT_MEMORY_LIMIT)
  }

  /**
    Copies `program` into a new memory store that refuses to grow past `limit` words. A
    program longer than `limit` is still loaded whole; the limit only applies to growth.
  */
  pub fn with_limit(program: &[Word], limit: AddressNumberType) -> Memory {
    Memory {
      cells : program.to_vec(),
      limit,
    }
  }

  /// Reads the word at `address`, zero-extending memory first if necessary.
  pub fn read(&mut self, address: Address) -> Result<Word> {
    self.extend_to(address)?;
    Ok(self.cells[address.idx()])
  }

  /// Writes `value` at `address`, zero-extending memory first if necessary.
  pub fn write(&mut self, address: Address, value: Word) -> Result<()> {
    self.extend_to(address)?;
    self.cells[address.idx()] = value;
    Ok(())
  }

  /// Reads without growing. Unallocated cells read as zero, exactly as `read` would see them.
  pub fn peek(&self, address: Address) -> Word {
    self.cells.get(address.idx()).copied().unwrap_or(0)
  }

  pub fn len(&self) -> usize {
    self.cells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  pub fn limit(&self) -> AddressNumberType {
    self.limit
  }

  pub fn as_slice(&self) -> &[Word] {
    &self.cells
  }

  fn extend_to(&mut self, address: Address) -> Result<()> {
    let idx = address.idx();
    if idx < self.cells.len() {
      return Ok(());
    }
    if idx >= self.limit {
      return Err(MachineError::MemoryLimitExceeded { address: idx, limit: self.limit });
    }
    self.cells.resize(idx + 1, 0);
    Ok(())
  }
}
