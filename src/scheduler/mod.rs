/*!
  Host-side orchestration of several machines at once.

  Machines never share anything. A scheduler owns a vector of them, calls each one's
  `resume` in turn on a single thread, and moves values between them by copying outputs
  into input queues. That is the only channel between instances.

  Two topologies are provided: a chain of amplifiers, optionally looped back on itself, and
  a packet-switched network with a NAT that wakes it when it goes quiet.
*/

mod amplifiers;
mod network;

pub use amplifiers::{best_phase_sequence, permutations, AmplifierChain};
pub use network::{NatReport, Network, Packet, IDLE_INPUT};
