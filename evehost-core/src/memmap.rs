//! Memory map of the FT81x/BT81x address space
//!
//! All addresses are 22-bit offsets into chip memory, suitable for
//! memory read/write transaction headers.

/// General purpose graphics RAM
pub const RAM_G: u32 = 0x000000;
/// Display list RAM
pub const RAM_DL: u32 = 0x300000;
/// Register file
pub const RAM_REG: u32 = 0x302000;
/// Coprocessor command ring
pub const RAM_CMD: u32 = 0x308000;
/// Coprocessor fault report text (BT817/818)
pub const RAM_ERR_REPORT: u32 = 0x309800;

/// General purpose RAM size in bytes
pub const RAM_G_SIZE: u32 = 1024 * 1024;
/// Display list RAM size in bytes
pub const RAM_DL_SIZE: u32 = 8 * 1024;
/// Register file size in bytes
pub const RAM_REG_SIZE: u32 = 4 * 1024;
/// Command ring size in bytes
pub const RAM_CMD_SIZE: u32 = 4 * 1024;
/// Fault report size in bytes
pub const RAM_ERR_REPORT_SIZE: u32 = 128;

/// Value of `REG_CMD_READ` when the coprocessor has faulted
///
/// 0x0FFF is not a valid ring offset (offsets are 4-byte aligned), so
/// the read cursor can never legitimately hold it.
pub const READ_INDEX_FAULT: u16 = 0x0FFF;

/// Ring bytes kept unused so a full ring is distinguishable from empty
pub const CMD_HEADROOM: u16 = 4;

/// Mask for the 22-bit address field of a transaction header
pub const ADDR_MASK: u32 = 0x3F_FFFF;
