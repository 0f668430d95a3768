//! [`EveBus`] implementation on top of embedded-hal 1.0
//!
//! Wraps any blocking [`SpiBus`] plus two output pins (chip select and
//! power down) and a [`DelayNs`] source into the transport the protocol
//! engine expects. Chip select is managed here rather than through an
//! `SpiDevice` because EVE transactions must hold the line asserted
//! across many separate bus calls.

#![no_std]
#![deny(unsafe_code)]

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use evehost_hal::EveBus;

/// Error from the SPI bus or one of the control pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<S, P> {
    /// SPI transfer failed
    Spi(S),
    /// Chip-select or power-down pin failed
    Pin(P),
}

/// EVE transport over embedded-hal SPI and GPIO
///
/// The SPI peripheral is configured by the caller (mode 0, MSB first).
/// `reclock` is a no-op here: embedded-hal 1.0 has no portable way to
/// change the bus frequency after construction, so the peripheral should
/// be configured at 11 MHz or less, which is valid both before and after
/// chip bring-up.
pub struct SpiEveBus<SPI, CS, PD, D> {
    spi: SPI,
    cs: CS,
    pd: PD,
    delay: D,
    selected: bool,
}

impl<SPI, CS, PD, D> SpiEveBus<SPI, CS, PD, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    PD: OutputPin<Error = CS::Error>,
    D: DelayNs,
{
    /// Create a transport from its parts
    ///
    /// Deselects the chip so the first transaction starts from a known
    /// line state.
    pub fn new(spi: SPI, mut cs: CS, pd: PD, delay: D) -> Result<Self, BusError<SPI::Error, CS::Error>> {
        cs.set_high().map_err(BusError::Pin)?;
        Ok(Self {
            spi,
            cs,
            pd,
            delay,
            selected: false,
        })
    }

    /// Release the wrapped peripherals
    pub fn release(self) -> (SPI, CS, PD, D) {
        (self.spi, self.cs, self.pd, self.delay)
    }
}

impl<SPI, CS, PD, D> EveBus for SpiEveBus<SPI, CS, PD, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    PD: OutputPin<Error = CS::Error>,
    D: DelayNs,
{
    type Error = BusError<SPI::Error, CS::Error>;

    fn reclock(&mut self, _slow: bool) -> Result<(), Self::Error> {
        // Bus frequency is fixed at construction, see the type docs.
        Ok(())
    }

    fn power(&mut self, on: bool) -> Result<(), Self::Error> {
        // The chip pin is !PD: high is powered, low is reset.
        if on {
            self.pd.set_high().map_err(BusError::Pin)
        } else {
            self.pd.set_low().map_err(BusError::Pin)
        }
    }

    fn select(&mut self, selected: bool) -> Result<bool, Self::Error> {
        if selected == self.selected {
            return Ok(false);
        }

        if selected {
            self.cs.set_low().map_err(BusError::Pin)?;
        } else {
            self.cs.set_high().map_err(BusError::Pin)?;
        }
        self.selected = selected;

        Ok(true)
    }

    fn transfer(&mut self, byte: u8) -> Result<u8, Self::Error> {
        let mut buf = [byte];
        self.spi.transfer_in_place(&mut buf).map_err(BusError::Spi)?;
        Ok(buf[0])
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn send(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(data).map_err(BusError::Spi)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.spi.read(buf).map_err(BusError::Spi)
    }
}
