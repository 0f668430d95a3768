//! The EVE driver
//!
//! [`Eve`] owns the link and the two ring cursors. This module covers
//! construction, the bring-up and shutdown sequences, and the direct
//! display list writer; the coprocessor command queue lives in
//! [`crate::cmd`].

use evehost_hal::EveBus;

use crate::dl;
use crate::error::Error;
use crate::hostcmd::HostCommand;
use crate::index::{CmdIndex, DlIndex};
use crate::link::EveLink;
use crate::memmap::RAM_DL;
use crate::profile::DisplayProfile;
use crate::regs;

/// Driver for one EVE chip
///
/// Exclusively owns its bus connection. All operations are blocking;
/// the only waits are the bounded polls during [`begin`](Eve::begin)
/// and the completion polls in the command queue.
pub struct Eve<B: EveBus> {
    pub(crate) link: EveLink<B>,
    pub(crate) profile: DisplayProfile,
    pub(crate) cmd_index: CmdIndex,
    pub(crate) dl_index: DlIndex,
}

impl<B: EveBus> Eve<B> {
    /// Create a driver; the chip is untouched until [`begin`](Eve::begin)
    pub fn new(bus: B, profile: DisplayProfile) -> Self {
        Self {
            link: EveLink::new(bus),
            profile,
            cmd_index: CmdIndex::new(0),
            dl_index: DlIndex::new(0),
        }
    }

    /// The display profile this driver was built with
    pub fn profile(&self) -> &DisplayProfile {
        &self.profile
    }

    /// Active display width in pixels
    pub fn width(&self) -> u16 {
        self.profile.hsize
    }

    /// Active display height in pixels
    pub fn height(&self) -> u16 {
        self.profile.vsize
    }

    /// Current host-side command ring cursor
    pub fn cmd_index(&self) -> CmdIndex {
        self.cmd_index
    }

    /// Current display list cursor
    pub fn dl_index(&self) -> DlIndex {
        self.dl_index
    }

    /// The link, for raw register access
    pub fn link_mut(&mut self) -> &mut EveLink<B> {
        &mut self.link
    }

    /// Tear down and release the bus
    pub fn into_inner(self) -> B {
        self.link.into_inner()
    }

    /// Power up and initialize the chip and the panel
    ///
    /// Runs the full bring-up sequence: power cycle, clock source
    /// selection, core activation, liveness and identity checks, LCD
    /// timing, touch-off, a blank bootstrap display list, and finally
    /// the pixel clock and backlight. On success the coprocessor queue
    /// is synchronized and ready for commands.
    ///
    /// Fails with [`Error::Timeout`] when the chip does not come alive
    /// and [`Error::IdMismatch`] when the profile expects a different
    /// part.
    pub fn begin(&mut self) -> Result<(), Error<B::Error>> {
        let profile = self.profile;

        // Power cycle into a known state.
        self.end()?;
        self.link.bus_mut().power(true)?;
        self.link.bus_mut().delay_ms(21);

        // The bus must stay slow until the core clock runs.
        self.link.bus_mut().select(true)?;
        self.link.bus_mut().reclock(true)?;

        let clock_source = if profile.clock_external {
            HostCommand::ClockExternal
        } else {
            HostCommand::ClockInternal
        };
        self.link.host_command(clock_source, 0)?;
        self.link
            .host_command(HostCommand::ClockSelect, profile.clock_select.value())?;

        self.link.host_command(HostCommand::Active, 0)?;
        self.link.bus_mut().delay_ms(40);

        self.link.bus_mut().reclock(false)?;

        // The identification register reads 0x7C once the core runs.
        if self.link.reg_wait8(regs::ID, 0x7C, 250, 1)? == 0 {
            return Err(Error::Timeout);
        }
        if self.link.reg_wait8(regs::CPURESET, 0, 250, 1)? == 0 {
            return Err(Error::Timeout);
        }

        if let Some(expected) = profile.chip_id.value() {
            let found = self.link.reg_read32(regs::CHIP_ID)?;
            if found != expected {
                return Err(Error::IdMismatch { expected, found });
            }
        }

        if profile.frequency != 0 {
            self.link.reg_write32(regs::FREQUENCY, profile.frequency)?;
        }

        // Adopt the chip's idea of the ring write cursor.
        self.cmd_init_write_index()?;

        // Panel stays dark until the first display list is in place.
        self.link.reg_write8(regs::PCLK, 0)?;
        self.link.reg_write8(regs::PWM_DUTY, 0)?;

        self.link.reg_write16(regs::HSIZE, profile.hsize)?;
        self.link.reg_write16(regs::HCYCLE, profile.hcycle)?;
        self.link.reg_write16(regs::HOFFSET, profile.hoffset)?;
        self.link.reg_write16(regs::HSYNC0, profile.hsync0)?;
        self.link.reg_write16(regs::HSYNC1, profile.hsync1)?;
        self.link.reg_write16(regs::VSIZE, profile.vsize)?;
        self.link.reg_write16(regs::VCYCLE, profile.vcycle)?;
        self.link.reg_write16(regs::VOFFSET, profile.voffset)?;
        self.link.reg_write16(regs::VSYNC0, profile.vsync0)?;
        self.link.reg_write16(regs::VSYNC1, profile.vsync1)?;
        self.link.reg_write8(regs::SWIZZLE, profile.swizzle)?;
        self.link.reg_write8(regs::PCLK_POL, profile.pclk_pol)?;

        let gpiox = self.link.reg_read16(regs::GPIOX)?;
        let gpiox = if profile.lcd_10ma {
            gpiox | regs::GPIOX_DRIVE_10MA
        } else {
            gpiox & !regs::GPIOX_DRIVE_10MA
        };
        self.link.reg_write16(regs::GPIOX, gpiox)?;

        self.link.reg_write8(regs::CSPREAD, profile.cspread as u8)?;
        self.link.reg_write8(regs::DITHER, profile.dither as u8)?;
        if profile.out_bits != 0 {
            self.link.reg_write16(regs::OUTBITS, profile.out_bits)?;
        }

        // Touch engine off; a disconnected panel would report phantom
        // touches otherwise.
        self.link.reg_write8(regs::TOUCH_MODE, 0)?;
        self.link.reg_write16(regs::TOUCH_RZTHRESH, 0)?;

        // First display list goes straight into RAM_DL, the coprocessor
        // may not be running this early. It shows a black screen.
        self.dl_reset(DlIndex::new(0));
        self.dl_add(dl::clear_color(0))?;
        self.dl_add(dl::clear(true, true, true))?;
        self.dl_add(dl::display())?;
        self.link.reg_write32(regs::DLSWAP, regs::dlswap::FRAME)?;

        // DISP on, then the pixel clock, then backlight.
        let gpiox = self.link.reg_read16(regs::GPIOX)?;
        self.link.reg_write16(regs::GPIOX, gpiox | regs::GPIOX_DISP)?;
        self.link.reg_write8(regs::PCLK, profile.pclk)?;
        self.link.reg_write16(regs::PWM_HZ, 300)?;
        self.link.reg_write8(regs::PWM_DUTY, 32)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("eve up, {}x{}", profile.hsize, profile.vsize);

        Ok(())
    }

    /// Power the chip down
    ///
    /// Safe to call at any time; [`begin`](Eve::begin) calls it first so
    /// bring-up always starts from a reset chip.
    pub fn end(&mut self) -> Result<(), Error<B::Error>> {
        self.link.end_transaction()?;
        self.link.bus_mut().delay_ms(20);
        self.link.bus_mut().power(false)?;
        self.link.bus_mut().delay_ms(6);
        Ok(())
    }

    /// Set the backlight duty cycle, 0 (off) to 128 (full)
    pub fn backlight(&mut self, duty: u8) -> Result<(), Error<B::Error>> {
        self.link.reg_write8(regs::PWM_DUTY, duty)?;
        Ok(())
    }

    /// Move the display list cursor
    pub fn dl_reset(&mut self, index: DlIndex) {
        self.dl_index = index;
    }

    /// Append one word to the display list and advance the cursor
    ///
    /// Writes directly into display list RAM, bypassing the coprocessor.
    /// Returns the updated cursor.
    pub fn dl_add(&mut self, word: u32) -> Result<DlIndex, Error<B::Error>> {
        self.link
            .reg_write32(RAM_DL + self.dl_index.value() as u32, word)?;
        self.dl_index.advance(4);
        Ok(self.dl_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBus;
    use crate::profile::ChipId;

    fn driver(bus: MockBus) -> Eve<MockBus> {
        Eve::new(bus, DisplayProfile::wqvga_480x272())
    }

    #[test]
    fn begin_programs_timing_and_starts_panel() {
        let mut eve = driver(MockBus::ready(0x0001_1308));
        eve.begin().unwrap();

        let bus = eve.into_inner();
        assert!(bus.powered());
        assert_eq!(bus.get16(regs::HSIZE), 480);
        assert_eq!(bus.get16(regs::HCYCLE), 548);
        assert_eq!(bus.get16(regs::VOFFSET), 12);
        // Panel running: DISP set, pixel clock divider, backlight on.
        assert_eq!(bus.get16(regs::GPIOX) & regs::GPIOX_DISP, regs::GPIOX_DISP);
        assert_eq!(bus.get8(regs::PCLK), 5);
        assert_eq!(bus.get8(regs::PWM_DUTY), 32);
        // Touch off.
        assert_eq!(bus.get8(regs::TOUCH_MODE), 0);
        // Swap requested for the bootstrap list.
        assert_eq!(bus.get32(regs::DLSWAP), regs::dlswap::FRAME);
    }

    #[test]
    fn begin_writes_bootstrap_display_list() {
        let mut eve = driver(MockBus::ready(0));
        eve.begin().unwrap();

        let bus = eve.into_inner();
        assert_eq!(bus.get32(RAM_DL), dl::clear_color(0));
        assert_eq!(bus.get32(RAM_DL + 4), dl::clear(true, true, true));
        assert_eq!(bus.get32(RAM_DL + 8), dl::display());
    }

    #[test]
    fn begin_rejects_wrong_chip() {
        let mut profile = DisplayProfile::wqvga_480x272();
        profile.chip_id = ChipId::Ft810;

        let mut eve = Eve::new(MockBus::ready(0x0001_1308), profile);
        assert_eq!(
            eve.begin(),
            Err(Error::IdMismatch {
                expected: 0x0001_1008,
                found: 0x0001_1308,
            })
        );
    }

    #[test]
    fn begin_times_out_on_dead_chip() {
        // Memory reads as zero everywhere, so REG_ID never becomes 0x7C.
        let mut eve = driver(MockBus::new());
        assert_eq!(eve.begin(), Err(Error::Timeout));
    }

    #[test]
    fn dl_add_advances_by_four() {
        let mut eve = driver(MockBus::new());
        eve.dl_reset(DlIndex::new(0));
        let next = eve.dl_add(dl::nop()).unwrap();
        assert_eq!(next.value(), 4);
        assert_eq!(eve.dl_add(dl::end()).unwrap().value(), 8);

        let bus = eve.into_inner();
        assert_eq!(bus.get32(RAM_DL), dl::nop());
        assert_eq!(bus.get32(RAM_DL + 4), dl::end());
    }
}
