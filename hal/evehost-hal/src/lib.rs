//! Evehost Hardware Abstraction Layer
//!
//! This crate defines the transport trait that connects the EVE protocol
//! engine to a physical SPI bus. Platform crates implement [`EveBus`] for
//! their hardware; the engine never touches pins or clocks directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  evehost-core (protocol engine)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  evehost-hal (this crate - EveBus)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  evehost-hal-embedded (embedded-hal)    │
//! └─────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

/// SPI transport to an EVE chip
///
/// One implementation drives one chip: the trait covers the data lines
/// plus the two sideband controls the bring-up sequence needs, the
/// power-down pin and the bus clock speed.
///
/// The chip-select line is more than an enable on EVE parts. Asserting
/// it resets a sequencer inside the chip that frames the next host
/// command or memory transaction, so a multi-byte transfer must keep the
/// line asserted from the first header byte to the last data byte.
pub trait EveBus {
    /// Error type for bus operations
    type Error: core::fmt::Debug;

    /// Configure the bus clock
    ///
    /// Until the EVE core clock is running the SPI clock must stay at or
    /// below 11 MHz; after bring-up the bus may run at up to 30 MHz.
    /// Implementations that only ever clock below 11 MHz may treat this
    /// as a no-op.
    fn reclock(&mut self, slow: bool) -> Result<(), Self::Error>;

    /// Drive the power-down line
    ///
    /// The pin is active low on the chip; `on = false` holds the chip in
    /// reset.
    fn power(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Assert or release the chip-select line
    ///
    /// Returns `true` if the line actually changed state, `false` if it
    /// already was in the requested state.
    fn select(&mut self, selected: bool) -> Result<bool, Self::Error>;

    /// Transfer one byte and return the byte clocked in
    fn transfer(&mut self, byte: u8) -> Result<u8, Self::Error>;

    /// Block for at least the given number of milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Send a buffer, ignoring the incoming bytes
    ///
    /// Implementations with DMA or hardware FIFOs should override this.
    fn send(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.transfer(byte)?;
        }
        Ok(())
    }

    /// Fill a buffer by clocking out zeros
    ///
    /// Implementations with DMA or hardware FIFOs should override this.
    fn receive(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        for byte in buf.iter_mut() {
            *byte = self.transfer(0)?;
        }
        Ok(())
    }
}
