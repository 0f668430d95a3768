//! Coprocessor command opcodes and option flags
//!
//! Coprocessor commands are byte streams in the command ring: a 32-bit
//! opcode followed by byte-packed parameters. The opcodes live in the
//! 0xFFFFFFxx range so the coprocessor can tell them apart from display
//! list words it passes through.

/// Start a new display list
pub const CMD_DLSTART: u32 = 0xFFFF_FF00;
/// Swap the current display list
pub const CMD_SWAP: u32 = 0xFFFF_FF01;
/// Raise the CMDFLAG interrupt after a delay
pub const CMD_INTERRUPT: u32 = 0xFFFF_FF02;
/// Set the widget background color
pub const CMD_BGCOLOR: u32 = 0xFFFF_FF09;
/// Set the widget foreground color
pub const CMD_FGCOLOR: u32 = 0xFFFF_FF0A;
/// Draw a smooth color gradient
pub const CMD_GRADIENT: u32 = 0xFFFF_FF0B;
/// Draw a text string
pub const CMD_TEXT: u32 = 0xFFFF_FF0C;
/// Draw a button
pub const CMD_BUTTON: u32 = 0xFFFF_FF0D;
/// Draw a row of keys
pub const CMD_KEYS: u32 = 0xFFFF_FF0E;
/// Draw a progress bar
pub const CMD_PROGRESS: u32 = 0xFFFF_FF0F;
/// Draw a slider
pub const CMD_SLIDER: u32 = 0xFFFF_FF10;
/// Draw a scrollbar
pub const CMD_SCROLLBAR: u32 = 0xFFFF_FF11;
/// Draw a toggle switch
pub const CMD_TOGGLE: u32 = 0xFFFF_FF12;
/// Draw a gauge
pub const CMD_GAUGE: u32 = 0xFFFF_FF13;
/// Draw an analog clock
pub const CMD_CLOCK: u32 = 0xFFFF_FF14;
/// Run interactive touch calibration
pub const CMD_CALIBRATE: u32 = 0xFFFF_FF15;
/// Show an animated spinner
pub const CMD_SPINNER: u32 = 0xFFFF_FF16;
/// Stop SKETCH, SPINNER or SCREENSAVER
pub const CMD_STOP: u32 = 0xFFFF_FF17;
/// CRC-32 over a memory block
pub const CMD_MEMCRC: u32 = 0xFFFF_FF18;
/// Read a register through the coprocessor
pub const CMD_REGREAD: u32 = 0xFFFF_FF19;
/// Write a memory block through the coprocessor
pub const CMD_MEMWRITE: u32 = 0xFFFF_FF1A;
/// Fill a memory block with a byte value
pub const CMD_MEMSET: u32 = 0xFFFF_FF1B;
/// Fill a memory block with zeros
pub const CMD_MEMZERO: u32 = 0xFFFF_FF1C;
/// Copy a memory block
pub const CMD_MEMCPY: u32 = 0xFFFF_FF1D;
/// Append display list words from RAM_G
pub const CMD_APPEND: u32 = 0xFFFF_FF1E;
/// Take a snapshot of the screen into RAM_G
pub const CMD_SNAPSHOT: u32 = 0xFFFF_FF1F;
/// Decompress deflate data into RAM_G
pub const CMD_INFLATE: u32 = 0xFFFF_FF22;
/// First unallocated RAM_G address after an inflate or load
pub const CMD_GETPTR: u32 = 0xFFFF_FF23;
/// Decode a JPEG or PNG into RAM_G
pub const CMD_LOADIMAGE: u32 = 0xFFFF_FF24;
/// Address and size of the bitmap from the last LOADIMAGE
pub const CMD_GETPROPS: u32 = 0xFFFF_FF25;
/// Reset the transform matrix to identity
pub const CMD_LOADIDENTITY: u32 = 0xFFFF_FF26;
/// Translate the transform matrix
pub const CMD_TRANSLATE: u32 = 0xFFFF_FF27;
/// Scale the transform matrix
pub const CMD_SCALE: u32 = 0xFFFF_FF28;
/// Rotate the transform matrix
pub const CMD_ROTATE: u32 = 0xFFFF_FF29;
/// Emit the transform matrix as display list commands
pub const CMD_SETMATRIX: u32 = 0xFFFF_FF2A;
/// Track touches over a screen region
pub const CMD_TRACK: u32 = 0xFFFF_FF2C;
/// Draw a rotary dial
pub const CMD_DIAL: u32 = 0xFFFF_FF2D;
/// Draw a number
pub const CMD_NUMBER: u32 = 0xFFFF_FF2E;
/// Start the animated screen saver
pub const CMD_SCREENSAVER: u32 = 0xFFFF_FF2F;
/// Sketch with the touch panel into a bitmap
pub const CMD_SKETCH: u32 = 0xFFFF_FF30;
/// Play the vendor logo animation
pub const CMD_LOGO: u32 = 0xFFFF_FF31;
/// Reset the coprocessor state to defaults
pub const CMD_COLDSTART: u32 = 0xFFFF_FF32;
/// Read back the current transform matrix
pub const CMD_GETMATRIX: u32 = 0xFFFF_FF33;
/// Set the 3D widget highlight color
pub const CMD_GRADCOLOR: u32 = 0xFFFF_FF34;
/// Rotate the screen
pub const CMD_SETROTATE: u32 = 0xFFFF_FF36;
/// Set the number base for CMD_NUMBER
pub const CMD_SETBASE: u32 = 0xFFFF_FF38;
/// Set up a streaming media FIFO in RAM_G
pub const CMD_MEDIAFIFO: u32 = 0xFFFF_FF39;
/// Register a custom font with extended parameters
pub const CMD_SETFONT2: u32 = 0xFFFF_FF3B;
/// Set the scratch bitmap handle used by widgets
pub const CMD_SETSCRATCH: u32 = 0xFFFF_FF3C;
/// Load a ROM font into a bitmap handle
pub const CMD_ROMFONT: u32 = 0xFFFF_FF3F;
/// Emit display list setup for a bitmap
pub const CMD_SETBITMAP: u32 = 0xFFFF_FF43;

/// Option flags for widget and load commands
///
/// These combine with bitwise or; the remarks name the commands each
/// flag applies to.
pub mod opt {
    /// Default 3D widget rendering
    pub const NONE: u16 = 0x0000;
    /// Monochrome decode (LOADIMAGE)
    pub const MONO: u16 = 0x0001;
    /// Decode without emitting display list setup (LOADIMAGE)
    pub const NODL: u16 = 0x0002;
    /// Flat widget rendering
    pub const FLAT: u16 = 0x0100;
    /// Treat the value as signed (NUMBER)
    pub const SIGNED: u16 = 0x0100;
    /// Center horizontally (KEYS, TEXT, NUMBER)
    pub const CENTERX: u16 = 0x0200;
    /// Center vertically (KEYS, TEXT, NUMBER)
    pub const CENTERY: u16 = 0x0400;
    /// Center both ways (KEYS, TEXT, NUMBER)
    pub const CENTER: u16 = 0x0600;
    /// Right-align on x (KEYS, TEXT, NUMBER)
    pub const RIGHTX: u16 = 0x0800;
    /// Skip the background (CLOCK, GAUGE)
    pub const NOBACK: u16 = 0x1000;
    /// Skip the tick marks (CLOCK, GAUGE)
    pub const NOTICKS: u16 = 0x2000;
    /// Skip hour and minute hands (CLOCK)
    pub const NOHM: u16 = 0x4000;
    /// Skip the pointer (GAUGE)
    pub const NOPOINTER: u16 = 0x4000;
    /// Skip the second hand (CLOCK)
    pub const NOSECS: u16 = 0x8000;
    /// Skip all hands (CLOCK)
    pub const NOHANDS: u16 = 0xC000;
}
