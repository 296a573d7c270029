use std::collections::VecDeque;
use std::convert::TryFrom;

use log::{debug, trace};

use crate::bytecode::Word;
use crate::error::{MachineError, Result};
use crate::machine::{Event, Machine};

/// What a node reads when it asks for a packet and none is waiting.
pub const IDLE_INPUT: Word = -1;

/// A message between nodes. On the wire it is three consecutive outputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Packet {
  pub destination : Word,
  pub x           : Word,
  pub y           : Word,
}

/// What the NAT saw before the network settled.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NatReport {
  /// The `y` of the first packet sent to the NAT.
  pub first_y    : Word,
  /// The first `y` the NAT sent to node 0 twice in a row.
  pub repeated_y : Word,
}

struct Node {
  machine  : Machine,
  inbox    : VecDeque<(Word, Word)>, // Packets waiting for the node to ask for input
  outgoing : Vec<Word>,              // Words of a packet still being written
}

/**
  Machines on a packet network, addressed `0..len()`. Each node is told its address as its
  first input. When a node asks for input it gets the `x` and `y` of its oldest waiting
  packet, or `IDLE_INPUT` if it has none, in which case it yields to the next node.
*/
pub struct Network {
  nodes : Vec<Node>,
  idle  : bool,
}

impl Network {

  pub fn new(program: &[Word], size: usize) -> Network {
    Network {
      nodes: (0..size).map(|address| {
        Node {
          machine  : Machine::new(program, &[address as Word]),
          inbox    : VecDeque::new(),
          outgoing : Vec::with_capacity(3),
        }
      }).collect(),
      idle: false,
    }
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// The machine at `address`, if there is one.
  pub fn node(&self, address: usize) -> Option<&Machine> {
    self.nodes.get(address).map(|node| &node.machine)
  }

  /// True when, in the last round, no node received a packet or sent anything.
  pub fn is_idle(&self) -> bool {
    self.idle
  }

  /// Queues `packet` for its destination node. A packet for an address outside the network
  /// is handed back.
  pub fn deliver(&mut self, packet: Packet) -> Option<Packet> {
    let node =
      usize::try_from(packet.destination)
        .ok()
        .and_then(|address| self.nodes.get_mut(address));
    match node {
      Some(node) => {
        node.inbox.push_back((packet.x, packet.y));
        None
      }
      None       => Some(packet)
    }
  }

  /**
    Gives every node, in address order, one turn: it runs until it asks for input with
    nothing waiting, or halts. Packets between nodes are delivered as they are sent, so a
    node later in the round may already receive them. Returns the packets addressed outside
    the network.
  */
  pub fn round(&mut self) -> Result<Vec<Packet>> {
    let mut outbound = Vec::new();
    let mut active   = false;

    for address in 0..self.nodes.len() {
      loop {
        let node = &mut self.nodes[address];
        match node.machine.resume()? {

          Event::Output(value) => {
            active = true;
            node.outgoing.push(value);
            if node.outgoing.len() == 3 {
              let packet = Packet {
                destination : node.outgoing[0],
                x           : node.outgoing[1],
                y           : node.outgoing[2],
              };
              node.outgoing.clear();
              trace!("node {} sent {:?}", address, packet);
              if let Some(packet) = self.deliver(packet) {
                outbound.push(packet);
              }
            }
          }

          Event::NeedsInput => {
            match node.inbox.pop_front() {
              Some((x, y)) => {
                active = true;
                node.machine.push_input(x);
                node.machine.push_input(y);
              }
              None         => {
                node.machine.push_input(IDLE_INPUT);
                break;
              }
            }
          }

          Event::Halted => break,

        }
      }
    }

    self.idle = !active;
    Ok(outbound)
  }

  /**
    Runs the network with a NAT listening at `nat_address`. The NAT keeps the last packet
    sent to it; whenever a round ends idle it sends that packet to node 0. Runs until the NAT
    sends the same `y` twice in a row.

    An idle network before anything reached the NAT can never wake up again, and is a
    `MachineError::NetworkDeadlock`. Packets to addresses that are neither a node nor the
    NAT are dropped.
  */
  pub fn run_with_nat(&mut self, nat_address: Word) -> Result<NatReport> {
    let mut first_y     : Option<Word>   = None;
    let mut nat_packet  : Option<Packet> = None;
    let mut last_sent_y : Option<Word>   = None;

    loop {
      for packet in self.round()? {
        match packet.destination == nat_address {
          true  => {
            first_y.get_or_insert(packet.y);
            nat_packet = Some(packet);
          }
          false => debug!("dropping packet for unknown address {}", packet.destination),
        }
      }

      if !self.idle {
        continue;
      }

      let packet = nat_packet.ok_or(MachineError::NetworkDeadlock)?;
      if last_sent_y == Some(packet.y) {
        return Ok(NatReport {
          first_y    : first_y.unwrap_or(packet.y),
          repeated_y : packet.y,
        });
      }
      debug!("network idle, NAT resending {:?}", packet);
      last_sent_y = Some(packet.y);
      self.deliver(Packet { destination: 0, ..packet });
    }
  }
}
