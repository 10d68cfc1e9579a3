//! Simulated WiFly module for testing
//!
//! A byte transport that behaves like the radio module on the other end of
//! the link: it recognizes complete command strings written to it and queues
//! the scripted reply. Anything that is not a command is recorded as
//! upper-layer data.

use crate::devices::wifly::StateTable;
use crate::platform::{traits::ByteTransport, TransportError};
use std::collections::VecDeque;
use std::vec::Vec;

/// One command/reply pair known to the simulator
#[derive(Debug, Clone)]
struct Exchange {
    command: Vec<u8>,
    reply: Option<Vec<u8>>,
}

/// Simulated WiFly radio module
#[derive(Debug, Default)]
pub struct MockWiflyModule {
    exchanges: Vec<Exchange>,
    pending: Vec<u8>,
    rx_queue: VecDeque<u8>,
    commands: Vec<Vec<u8>>,
    data: Vec<u8>,
    discard_count: usize,
}

impl MockWiflyModule {
    /// Create a module that answers every command of `table` with exactly
    /// the response the table expects
    pub fn from_table(table: &StateTable) -> Self {
        let exchanges = table
            .iter()
            .filter(|descriptor| !descriptor.tx_command().is_empty())
            .map(|descriptor| Exchange {
                command: descriptor.tx_command().to_vec(),
                reply: Some(descriptor.rx_expect().to_vec()),
            })
            .collect();

        Self {
            exchanges,
            ..Self::default()
        }
    }

    /// Answer `command` with `reply` instead of the expected response
    pub fn set_reply(&mut self, command: &[u8], reply: &[u8]) {
        if let Some(exchange) = self.exchange_mut(command) {
            exchange.reply = Some(reply.to_vec());
        }
    }

    /// Never answer `command`
    pub fn set_silent(&mut self, command: &[u8]) {
        if let Some(exchange) = self.exchange_mut(command) {
            exchange.reply = None;
        }
    }

    /// Complete commands received so far, in order
    pub fn commands(&self) -> &[Vec<u8>] {
        &self.commands
    }

    /// Bytes received that were not part of any command
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Queue bytes as if the remote peer had sent them over the network
    pub fn inject_rx_data(&mut self, data: &[u8]) {
        self.rx_queue.extend(data.iter().copied());
    }

    /// Number of bytes waiting to be read
    pub fn pending_rx(&self) -> usize {
        self.rx_queue.len()
    }

    /// Number of `discard_input` calls so far
    pub fn discard_count(&self) -> usize {
        self.discard_count
    }

    fn exchange_mut(&mut self, command: &[u8]) -> Option<&mut Exchange> {
        self.exchanges
            .iter_mut()
            .find(|exchange| exchange.command == command)
    }

    fn accept(&mut self, byte: u8) {
        self.pending.push(byte);

        if let Some(exchange) = self
            .exchanges
            .iter()
            .find(|exchange| exchange.command == self.pending)
        {
            if let Some(reply) = &exchange.reply {
                self.rx_queue.extend(reply.iter().copied());
            }
            self.commands.push(core::mem::take(&mut self.pending));
            return;
        }

        let is_prefix = self
            .exchanges
            .iter()
            .any(|exchange| exchange.command.starts_with(&self.pending));
        if !is_prefix {
            self.data.append(&mut self.pending);
        }
    }
}

impl ByteTransport for MockWiflyModule {
    fn read_byte(&mut self) -> nb::Result<u8, TransportError> {
        self.rx_queue.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), TransportError> {
        self.accept(byte);
        Ok(())
    }

    fn discard_input(&mut self) {
        self.rx_queue.clear();
        self.discard_count += 1;
    }
}
