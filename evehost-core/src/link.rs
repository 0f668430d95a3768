//! Transaction framing and register access
//!
//! Every exchange with the chip is a transaction: chip select asserted,
//! a 3-byte big-endian header, then payload bytes in little-endian
//! order, chip select released. The header's top two bits select the
//! transaction kind:
//!
//! ```text
//! 00aaaaaa aaaaaaaa aaaaaaaa   memory read at address a (22 bits),
//!                              one dummy byte before data comes back
//! 10aaaaaa aaaaaaaa aaaaaaaa   memory write at address a
//! 01cccccc pppppppp 00000000   host command c with parameter p
//! ```
//!
//! Errors at this layer are raw transport errors; interpretation (what a
//! timeout or a bad register value means) belongs to the driver above.

use evehost_hal::EveBus;

use crate::hostcmd::HostCommand;
use crate::memmap::ADDR_MASK;

/// Header flag for a memory write transaction
const MEM_WRITE: u32 = 0x80_0000;

/// Wire-level connection to one EVE chip
///
/// Owns the bus. One transaction is open at a time; beginning a new one
/// implicitly ends the previous one, matching the chip's select-line
/// framing.
pub struct EveLink<B> {
    bus: B,
}

impl<B: EveBus> EveLink<B> {
    /// Wrap a bus
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Release the bus
    pub fn into_inner(self) -> B {
        self.bus
    }

    /// Direct access to the bus, for delays and power control
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Start a transaction with the given 24-bit header
    ///
    /// Ends any open transaction first so the chip's framing sequencer
    /// is reset.
    pub(crate) fn begin_transaction(&mut self, header: u32) -> Result<(), B::Error> {
        self.end_transaction()?;
        self.bus.select(true)?;

        // Header goes out big-endian, unlike all payload data.
        self.bus.send(&[
            (header >> 16) as u8,
            (header >> 8) as u8,
            header as u8,
        ])
    }

    /// End the open transaction, if any, by releasing chip select
    pub fn end_transaction(&mut self) -> Result<(), B::Error> {
        self.bus.select(false)?;
        Ok(())
    }

    /// Start a memory transaction at the given address
    ///
    /// After this call, consecutive transfers access consecutive memory
    /// locations. A read transaction consumes the mandatory dummy byte,
    /// so the next transfer returns data from `address`.
    pub(crate) fn begin_memory(&mut self, address: u32, write: bool) -> Result<(), B::Error> {
        let header = if write {
            MEM_WRITE | (address & ADDR_MASK)
        } else {
            address & ADDR_MASK
        };
        self.begin_transaction(header)?;

        if !write {
            self.bus.transfer(0)?;
        }
        Ok(())
    }

    /// Send a host command with a parameter byte
    ///
    /// The transaction is left open; the chip acts on the command when
    /// select is released by the next transaction.
    pub fn host_command(&mut self, command: HostCommand, parameter: u8) -> Result<(), B::Error> {
        let header = (command.opcode() as u32) << 16 | (parameter as u32) << 8;
        self.begin_transaction(header)
    }

    /// Read an 8-bit register ("rd8")
    pub fn reg_read8(&mut self, address: u32) -> Result<u8, B::Error> {
        self.begin_memory(address, false)?;
        self.bus.transfer(0)
    }

    /// Read a 16-bit register ("rd16")
    pub fn reg_read16(&mut self, address: u32) -> Result<u16, B::Error> {
        self.begin_memory(address, false)?;
        let mut buf = [0u8; 2];
        self.bus.receive(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a 32-bit register ("rd32")
    pub fn reg_read32(&mut self, address: u32) -> Result<u32, B::Error> {
        self.begin_memory(address, false)?;
        let mut buf = [0u8; 4];
        self.bus.receive(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Write an 8-bit register ("wr8")
    pub fn reg_write8(&mut self, address: u32, value: u8) -> Result<(), B::Error> {
        self.begin_memory(address, true)?;
        self.bus.send(&[value])
    }

    /// Write a 16-bit register ("wr16")
    pub fn reg_write16(&mut self, address: u32, value: u16) -> Result<(), B::Error> {
        self.begin_memory(address, true)?;
        self.bus.send(&value.to_le_bytes())
    }

    /// Write a 32-bit register ("wr32")
    pub fn reg_write32(&mut self, address: u32, value: u32) -> Result<(), B::Error> {
        self.begin_memory(address, true)?;
        self.bus.send(&value.to_le_bytes())
    }

    /// Read a block of memory into `buf`
    pub fn read_buffer(&mut self, address: u32, buf: &mut [u8]) -> Result<(), B::Error> {
        self.begin_memory(address, false)?;
        self.bus.receive(buf)
    }

    /// Write a block of memory from `data`
    ///
    /// The chip expects 4-byte alignment in most memory areas; callers
    /// append padding themselves where it matters.
    pub fn write_buffer(&mut self, address: u32, data: &[u8]) -> Result<(), B::Error> {
        self.begin_memory(address, true)?;
        self.bus.send(data)
    }

    /// Poll an 8-bit register until it holds `expected`
    ///
    /// Reads up to `max_tries` times with `delay_ms` between reads.
    /// Returns the number of retries remaining, so `0` means the value
    /// never appeared; a transport failure is the only `Err`.
    pub fn reg_wait8(
        &mut self,
        address: u32,
        expected: u8,
        max_tries: u8,
        delay_ms: u32,
    ) -> Result<u8, B::Error> {
        let mut remaining = max_tries;

        while remaining > 0 {
            let value = self.reg_read8(address)?;
            remaining -= 1;

            if value == expected {
                return Ok(remaining);
            }

            self.bus.delay_ms(delay_ms);
        }

        Ok(0)
    }
}
