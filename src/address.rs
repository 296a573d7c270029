//! A memory address, with some convenience functions for getting one out of a signed word.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::ops::Add;

use crate::bytecode::Word;
use crate::error::{MachineError, Result};

// `AddressNumberType` is `usize`, as it is naturally an index into a memory store.
pub type AddressNumberType = usize;

/// An index into a machine's memory. Addresses are never negative; words are, so every
/// conversion from a `Word` goes through `Address::from_word`.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default)]
pub struct Address(pub AddressNumberType);

impl Address {
  /// Converts the address to an index into the memory vector.
  pub fn idx(&self) -> AddressNumberType {
    self.0
  }

  /**
    Converts a computed word into an address. `pc` is the address of the instruction doing
    the computation and is only used to report a negative result.
  */
  pub fn from_word(word: Word, pc: Address) -> Result<Address> {
    match AddressNumberType::try_from(word) {
      Ok(idx) => Ok(Address(idx)),
      Err(_)  => Err(MachineError::InvalidAddress { pc: pc.idx(), address: word })
    }
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "MEM[{}]", self.0)
  }
}

// Increment an address
impl Add<AddressNumberType> for Address {
  type Output = Address;
  fn add(self, rhs: AddressNumberType) -> Address {
    Address(self.0 + rhs)
  }
}
