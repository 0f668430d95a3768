//! Register addresses and register values
//!
//! Addresses are absolute (the `RAM_REG` base is already applied) so
//! they can be passed straight to the register access functions.
//! Only the registers this driver touches or that callers commonly need
//! are listed; the chip has many more.

/// Identification register, always reads 0x7C when the core runs
pub const ID: u32 = 0x302000;
/// Frame counter
pub const FRAMES: u32 = 0x302004;
/// Clock cycle counter
pub const CLOCK: u32 = 0x302008;
/// Core clock frequency as known by the chip, in Hz
pub const FREQUENCY: u32 = 0x30200C;
/// Audio/touch/graphics reset control, 0 when reset is complete
pub const CPURESET: u32 = 0x302020;

// LCD timing
/// Horizontal total cycle count
pub const HCYCLE: u32 = 0x30202C;
/// Horizontal display start offset
pub const HOFFSET: u32 = 0x302030;
/// Horizontal display size
pub const HSIZE: u32 = 0x302034;
/// Horizontal sync fall offset
pub const HSYNC0: u32 = 0x302038;
/// Horizontal sync rise offset
pub const HSYNC1: u32 = 0x30203C;
/// Vertical total cycle count
pub const VCYCLE: u32 = 0x302040;
/// Vertical display start offset
pub const VOFFSET: u32 = 0x302044;
/// Vertical display line count
pub const VSIZE: u32 = 0x302048;
/// Vertical sync fall offset
pub const VSYNC0: u32 = 0x30204C;
/// Vertical sync rise offset
pub const VSYNC1: u32 = 0x302050;

/// Display list swap control
pub const DLSWAP: u32 = 0x302054;
/// Screen rotation
pub const ROTATE: u32 = 0x302058;
/// Output bits per color channel
pub const OUTBITS: u32 = 0x30205C;
/// Output dither enable
pub const DITHER: u32 = 0x302060;
/// Output RGB pin order
pub const SWIZZLE: u32 = 0x302064;
/// Output clock spreading enable
pub const CSPREAD: u32 = 0x302068;
/// Pixel clock polarity
pub const PCLK_POL: u32 = 0x30206C;
/// Pixel clock divider, 0 disables the pixel clock
pub const PCLK: u32 = 0x302070;

// Tag queries
/// Tag query X coordinate
pub const TAG_X: u32 = 0x302074;
/// Tag query Y coordinate
pub const TAG_Y: u32 = 0x302078;
/// Tag query result
pub const TAG: u32 = 0x30207C;

// GPIO
/// Extended GPIO direction
pub const GPIOX_DIR: u32 = 0x302098;
/// Extended GPIO read/write
pub const GPIOX: u32 = 0x30209C;

// Interrupts
/// Interrupt flags, cleared by reading
pub const INT_FLAGS: u32 = 0x3020A8;
/// Global interrupt enable
pub const INT_EN: u32 = 0x3020AC;
/// Interrupt mask
pub const INT_MASK: u32 = 0x3020B0;

// Backlight
/// Backlight PWM frequency
pub const PWM_HZ: u32 = 0x3020D0;
/// Backlight PWM duty cycle, 0..=128
pub const PWM_DUTY: u32 = 0x3020D4;

// Display list macros
/// Display list macro slot 0
pub const MACRO_0: u32 = 0x3020D8;
/// Display list macro slot 1
pub const MACRO_1: u32 = 0x3020DC;

// Coprocessor command ring
/// Command ring read cursor, owned by the chip
pub const CMD_READ: u32 = 0x3020F8;
/// Command ring write cursor, published by the host
pub const CMD_WRITE: u32 = 0x3020FC;
/// Offset of the display list entry the coprocessor writes next
pub const CMD_DL: u32 = 0x302100;

// Touch (only touched to switch the engine off)
/// Touch screen sample mode
pub const TOUCH_MODE: u32 = 0x302104;
/// Touch resistance threshold
pub const TOUCH_RZTHRESH: u32 = 0x302118;

// Tracker results for CMD_TRACK
/// Tracker register 0
pub const TRACKER: u32 = 0x309000;
/// Tracker register 1
pub const TRACKER_1: u32 = 0x309004;
/// Tracker register 2
pub const TRACKER_2: u32 = 0x309008;
/// Tracker register 3
pub const TRACKER_3: u32 = 0x30900C;
/// Tracker register 4
pub const TRACKER_4: u32 = 0x309010;

// Media FIFO
/// Media FIFO read offset
pub const MEDIAFIFO_READ: u32 = 0x309014;
/// Media FIFO write offset
pub const MEDIAFIFO_WRITE: u32 = 0x309018;

/// Chip identifier word in RAM_G, valid just after reset
pub const CHIP_ID: u32 = 0x0C0000;

/// Values for the `DLSWAP` register
pub mod dlswap {
    /// Swap has completed; safe to write a new display list
    pub const DONE: u32 = 0x0;
    /// Swap after the current scan line
    pub const LINE: u32 = 0x1;
    /// Swap after the current frame
    pub const FRAME: u32 = 0x2;
}

/// Interrupt flag bits for `INT_EN`, `INT_MASK` and `INT_FLAGS`
pub mod int {
    /// Display list swap occurred
    pub const SWAP: u8 = 0x01;
    /// Touch detected
    pub const TOUCH: u8 = 0x02;
    /// Touch tag changed
    pub const TAG: u8 = 0x04;
    /// Sound effect ended
    pub const SOUND: u8 = 0x08;
    /// Audio playback ended
    pub const PLAYBACK: u8 = 0x10;
    /// Command ring drained
    pub const CMDEMPTY: u8 = 0x20;
    /// CMD_INTERRUPT executed
    pub const CMDFLAG: u8 = 0x40;
    /// Touch conversion complete
    pub const CONVCOMPLETE: u8 = 0x80;
}

// GPIOX bits used during bring-up
/// Drive strength bit: set for 10 mA on the LCD lines, clear for 5 mA
pub const GPIOX_DRIVE_10MA: u16 = 0x1000;
/// DISP output line
pub const GPIOX_DISP: u16 = 0x8000;
