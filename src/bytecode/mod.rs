/*!

  The machine uses a signed 64 bit word size for everything: code, data, addresses, and I/O.
  An instruction is an opcode word followed by up to three parameter words. The opcode word
  is read as a decimal number:

  ```text
      ABCDE
       ^^^^^- DE: operation, `code % 100`
       ||^--- C:  mode of the first parameter
       |^---- B:  mode of the second parameter
       ^----- A:  mode of the third parameter
  ```

  Missing leading digits are zero, so the default mode for every parameter is position
  mode. Modes are position (0, the parameter is an address), immediate (1, the parameter is
  the value), and relative (2, the parameter plus the relative base is an address).
  Parameters that are written to are never in immediate mode.

  Programs travel as text, a comma-separated list of decimal words. The `assembly` module
  reads that format and renders decoded programs back out as a listing.

*/

mod binary;
mod instruction;
pub mod assembly;

pub use binary::{encode_instruction, try_decode_instruction};
pub use instruction::{Instruction, Mode, Opcode, MAX_PARAMETERS};

/// A single memory cell, and the type of every value the machine handles.
pub type Word = i64;
