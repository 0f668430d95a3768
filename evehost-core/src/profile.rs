//! Display panel profiles
//!
//! A [`DisplayProfile`] holds the LCD timing and the chip bring-up
//! parameters for one panel. The constructor takes porch and sync widths
//! and derives the cycle and offset register values from them, so a
//! profile reads like a panel datasheet instead of a register dump.

use crate::hostcmd::ClockSelect;

/// Expected chip identity for bring-up verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipId {
    /// Skip the identity check
    #[default]
    Any,
    Ft810,
    Ft811,
    Ft812,
    Ft813,
    Bt815,
    Bt816,
    Bt817,
    Bt818,
}

impl ChipId {
    /// Value of the chip identifier word, `None` for [`ChipId::Any`]
    pub const fn value(self) -> Option<u32> {
        match self {
            ChipId::Any => None,
            ChipId::Ft810 => Some(0x0001_1008),
            ChipId::Ft811 => Some(0x0001_1108),
            ChipId::Ft812 => Some(0x0001_1208),
            ChipId::Ft813 => Some(0x0001_1308),
            ChipId::Bt815 => Some(0x0001_1508),
            ChipId::Bt816 => Some(0x0001_1608),
            ChipId::Bt817 => Some(0x0001_1708),
            ChipId::Bt818 => Some(0x0001_1808),
        }
    }
}

/// Timing and bring-up parameters for one LCD panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayProfile {
    /// Feed the PLL from the external crystal instead of the internal
    /// oscillator
    pub clock_external: bool,
    /// System clock multiplier
    pub clock_select: ClockSelect,
    /// Expected chip identity
    pub chip_id: ChipId,
    /// Core frequency to store in the chip's frequency register, in Hz;
    /// 0 leaves the register alone
    pub frequency: u32,
    /// Drive the LCD lines with 10 mA instead of 5 mA
    pub lcd_10ma: bool,
    /// Spread the RGB clock edges to reduce noise
    pub cspread: bool,
    /// Dither the output
    pub dither: bool,
    /// Output bits per channel, 3x3 bits packed as 0b0000_0RRR_GGGB_BB;
    /// 0 keeps the chip default
    pub out_bits: u16,

    /// Active width in pixels
    pub hsize: u16,
    /// Total clocks per line
    pub hcycle: u16,
    /// Clocks from line start to active pixels
    pub hoffset: u16,
    /// Start of the horizontal sync pulse
    pub hsync0: u16,
    /// End of the horizontal sync pulse
    pub hsync1: u16,

    /// Active height in lines
    pub vsize: u16,
    /// Total lines per frame
    pub vcycle: u16,
    /// Lines from frame start to active lines
    pub voffset: u16,
    /// Start of the vertical sync pulse
    pub vsync0: u16,
    /// End of the vertical sync pulse
    pub vsync1: u16,

    /// RGB pin order
    pub swizzle: u8,
    /// Pixel clock edge polarity
    pub pclk_pol: u8,
    /// Pixel clock divider; the chip runs the panel at core clock / pclk
    pub pclk: u8,
}

impl DisplayProfile {
    /// Build a profile from panel-datasheet timing figures
    ///
    /// Cycle totals and offsets are derived:
    /// `hcycle = hfront + hsync + hback + width + hpad`, and the active
    /// region starts after front porch, sync and back porch. The same
    /// applies vertically with lines instead of clocks.
    ///
    /// Bring-up parameters default to the conservative choices: internal
    /// clock, default multiplier, no identity check, 5 mA drive, no
    /// spreading or dithering. Override fields as needed.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        width: u16,
        hfront: u16,
        hsync: u16,
        hback: u16,
        hpad: u16,
        height: u16,
        vfront: u16,
        vsync: u16,
        vback: u16,
        vpad: u16,
        pclk: u8,
    ) -> Self {
        Self {
            clock_external: false,
            clock_select: ClockSelect::Default,
            chip_id: ChipId::Any,
            frequency: 0,
            lcd_10ma: false,
            cspread: false,
            dither: false,
            out_bits: 0,
            hsize: width,
            hcycle: hfront + hsync + hback + width + hpad,
            hoffset: hfront + hsync + hback,
            hsync0: hfront,
            hsync1: hfront + hsync,
            vsize: height,
            vcycle: vfront + vsync + vback + height + vpad,
            voffset: vfront + vsync + vback,
            vsync0: vfront,
            vsync1: vfront + vsync,
            swizzle: 0,
            pclk_pol: 1,
            pclk,
        }
    }

    /// 4.3" 480x272 WQVGA panel, the common FT810/FT813 module timing
    pub const fn wqvga_480x272() -> Self {
        Self::new(480, 8, 33, 2, 25, 272, 0, 10, 2, 8, 5)
    }

    /// 7" 800x480 WVGA panel, the common BT817 module timing
    pub const fn wvga_800x480() -> Self {
        Self::new(800, 0, 48, 40, 40, 480, 0, 3, 29, 13, 2)
    }

    /// Horizontal center in pixels
    pub const fn hcenter(&self) -> u16 {
        self.hsize / 2
    }

    /// Vertical center in pixels
    pub const fn vcenter(&self) -> u16 {
        self.vsize / 2
    }
}
