//! Test double for [`EveBus`]
//!
//! Decodes transaction headers the way the chip does and backs memory
//! with a sparse byte map, so tests can assert on wire traffic and on
//! the memory image the driver produced.

use core::convert::Infallible;

use evehost_hal::EveBus;
use heapless::{FnvIndexMap, Vec};

/// One decoded transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Txn {
    /// Host command
    Host { opcode: u8, parameter: u8 },
    /// Memory write, `len` counts payload bytes
    Write { addr: u32, len: u32 },
    /// Memory read
    Read { addr: u32 },
}

enum State {
    Idle,
    Header,
    Host,
    Write { addr: u32 },
    ReadDummy { addr: u32 },
    Read { addr: u32 },
}

pub struct MockBus {
    selected: bool,
    state: State,
    header: Vec<u8, 3>,
    mem: FnvIndexMap<u32, u8, 4096>,
    txns: Vec<Txn, 128>,
    raw: Vec<u8, 1024>,
    delay_ms: u32,
    powered: bool,
    pending: Option<Pending>,
}

/// A register value that appears after a number of read transactions
struct Pending {
    addr: u32,
    value: u16,
    reads_left: usize,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            selected: false,
            state: State::Idle,
            header: Vec::new(),
            mem: FnvIndexMap::new(),
            txns: Vec::new(),
            raw: Vec::new(),
            delay_ms: 0,
            powered: false,
            pending: None,
        }
    }

    /// A mock with the registers a successful bring-up needs
    pub fn ready(chip_id: u32) -> Self {
        let mut bus = Self::new();
        bus.set8(crate::regs::ID, 0x7C);
        bus.set8(crate::regs::CPURESET, 0);
        bus.set32(crate::regs::CHIP_ID, chip_id);
        bus.set16(crate::regs::CMD_WRITE, 0);
        bus
    }

    pub fn set8(&mut self, addr: u32, value: u8) {
        let _ = self.mem.insert(addr, value);
    }

    pub fn set16(&mut self, addr: u32, value: u16) {
        for (i, byte) in value.to_le_bytes().iter().enumerate() {
            self.set8(addr + i as u32, *byte);
        }
    }

    pub fn set32(&mut self, addr: u32, value: u32) {
        for (i, byte) in value.to_le_bytes().iter().enumerate() {
            self.set8(addr + i as u32, *byte);
        }
    }

    pub fn get8(&self, addr: u32) -> u8 {
        self.mem.get(&addr).copied().unwrap_or(0)
    }

    pub fn get16(&self, addr: u32) -> u16 {
        u16::from_le_bytes([self.get8(addr), self.get8(addr + 1)])
    }

    pub fn get32(&self, addr: u32) -> u32 {
        u32::from_le_bytes([
            self.get8(addr),
            self.get8(addr + 1),
            self.get8(addr + 2),
            self.get8(addr + 3),
        ])
    }

    /// Copy the memory image starting at `addr` into `buf`
    pub fn get_bytes(&self, addr: u32, buf: &mut [u8]) {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.get8(addr + i as u32);
        }
    }

    pub fn transactions(&self) -> &[Txn] {
        &self.txns
    }

    /// All bytes the host sent while selected, headers included
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Number of read transactions that started at `addr`
    pub fn read_count(&self, addr: u32) -> usize {
        self.txns
            .iter()
            .filter(|txn| matches!(txn, Txn::Read { addr: a } if *a == addr))
            .count()
    }

    /// Write transactions in decode order
    pub fn writes(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.txns.iter().filter_map(|txn| match txn {
            Txn::Write { addr, len } => Some((*addr, *len)),
            _ => None,
        })
    }

    /// Make `addr` read as `value` once `reads` read transactions at
    /// `addr` have gone by with the old value
    ///
    /// Models a register the chip updates while the host polls, like
    /// the command read cursor chasing the write cursor.
    pub fn set16_after_reads(&mut self, addr: u32, value: u16, reads: usize) {
        self.pending = Some(Pending {
            addr,
            value,
            reads_left: reads,
        });
    }

    pub fn total_delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn powered(&self) -> bool {
        self.powered
    }

    fn decode_header(&mut self) {
        let b0 = self.header[0];
        let addr = ((b0 as u32 & 0x3F) << 16) | (self.header[1] as u32) << 8 | self.header[2] as u32;

        match b0 >> 6 {
            0b10 => {
                let _ = self.txns.push(Txn::Write { addr, len: 0 });
                self.state = State::Write { addr };
            }
            0b01 | 0b11 => {
                let _ = self.txns.push(Txn::Host {
                    opcode: b0,
                    parameter: self.header[1],
                });
                self.state = State::Host;
            }
            _ => {
                // Active is opcode 0x00, indistinguishable from a read
                // at address 0; treat it as a read like the chip does.
                let due = match &mut self.pending {
                    Some(pending) if pending.addr == addr => {
                        if pending.reads_left == 0 {
                            Some(pending.value)
                        } else {
                            pending.reads_left -= 1;
                            None
                        }
                    }
                    _ => None,
                };
                if let Some(value) = due {
                    self.set16(addr, value);
                    self.pending = None;
                }
                let _ = self.txns.push(Txn::Read { addr });
                self.state = State::ReadDummy { addr };
            }
        }
    }
}

impl EveBus for MockBus {
    type Error = Infallible;

    fn reclock(&mut self, _slow: bool) -> Result<(), Infallible> {
        Ok(())
    }

    fn power(&mut self, on: bool) -> Result<(), Infallible> {
        self.powered = on;
        Ok(())
    }

    fn select(&mut self, selected: bool) -> Result<bool, Infallible> {
        if selected == self.selected {
            return Ok(false);
        }
        self.selected = selected;
        if selected {
            self.state = State::Header;
            self.header.clear();
        } else {
            self.state = State::Idle;
        }
        Ok(true)
    }

    fn transfer(&mut self, byte: u8) -> Result<u8, Infallible> {
        let _ = self.raw.push(byte);

        match self.state {
            State::Idle | State::Host => Ok(0),
            State::Header => {
                let _ = self.header.push(byte);
                if self.header.len() == 3 {
                    self.decode_header();
                }
                Ok(0)
            }
            State::Write { addr } => {
                let _ = self.mem.insert(addr, byte);
                if let Some(Txn::Write { len, .. }) = self.txns.last_mut() {
                    *len += 1;
                }
                self.state = State::Write { addr: addr + 1 };
                Ok(0)
            }
            State::ReadDummy { addr } => {
                self.state = State::Read { addr };
                Ok(0)
            }
            State::Read { addr } => {
                let value = self.get8(addr);
                self.state = State::Read { addr: addr + 1 };
                Ok(value)
            }
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay_ms += ms;
    }
}
