//! Coprocessor command queue
//!
//! Commands are encoded into the 4 KiB ring at `RAM_CMD` and executed by
//! publishing the host write cursor to `REG_CMD_WRITE`. The chip chases
//! the cursor, updating `REG_CMD_READ` as it consumes commands; the two
//! cursors being equal means the queue is drained. A faulting command
//! parks the read cursor at the fault sentinel instead.
//!
//! Encoding is table driven: a command is its 32-bit opcode plus a slice
//! of [`CmdField`]s, and one encoder lays out any command byte-exactly.
//! The typed `cmd_*` wrappers below are thin field-list declarations
//! over that encoder.
//!
//! Every encode checks free space first and fails with
//! [`Error::BufferFull`] rather than overwriting unconsumed commands.

use evehost_hal::EveBus;
use heapless::Vec;

use crate::dl;
use crate::driver::Eve;
use crate::error::Error;
use crate::index::CmdIndex;
use crate::link::EveLink;
use crate::memmap::{CMD_HEADROOM, RAM_CMD, RAM_CMD_SIZE, READ_INDEX_FAULT};
use crate::opcodes::*;
use crate::regs;

/// Observed state of the coprocessor queue
///
/// A fault is data here, not an error: polling code often wants to
/// branch on it without unwinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CmdStatus {
    /// Read cursor has caught up with the write cursor
    Idle,
    /// Commands are still executing
    Busy,
    /// The read cursor holds the fault sentinel
    Fault,
}

/// One parameter of a coprocessor command
///
/// Scalars go out little-endian and unvalidated; the chip masks excess
/// bits itself. Strings and blobs are zero-padded to the 4-byte command
/// granularity. An output slot reserves a zeroed 32-bit cell that the
/// coprocessor fills in; its ring address is reported back so the value
/// can be read after the command completes.
#[derive(Debug, Clone, Copy)]
pub enum CmdField<'a> {
    /// 16-bit scalar
    U16(u16),
    /// 32-bit scalar
    U32(u32),
    /// Nul-terminated string
    ///
    /// `max_len` bounds the encoded length including the terminator;
    /// 0 means unbounded (65536). Longer text is truncated, and the
    /// terminator is always written.
    Str { text: &'a str, max_len: u16 },
    /// Raw bytes
    Blob(&'a [u8]),
    /// 32-bit output cell
    OutSlot,
}

impl CmdField<'_> {
    /// Encoded size in ring bytes, padding included
    pub fn encoded_len(&self) -> usize {
        match *self {
            CmdField::U16(_) => 2,
            CmdField::U32(_) => 4,
            CmdField::Str { text, max_len } => {
                let limit = if max_len == 0 {
                    u16::MAX as usize
                } else {
                    max_len as usize - 1
                };
                let taken = text.len().min(limit);
                (taken + 1 + 3) & !3
            }
            CmdField::Blob(data) => (data.len() + 3) & !3,
            CmdField::OutSlot => 4,
        }
    }
}

/// Ring addresses of the output slots a command reserved
///
/// The capacity must cover the command with the most `OutSlot` fields;
/// today that is CMD_GETMATRIX with six. Raise it when adding a command
/// that reserves more, the encoder debug-asserts on overflow.
pub type OutputSlots = Vec<CmdIndex, 6>;

/// Streams bytes into the command ring
///
/// The ring is circular in the protocol but the chip's address decoder
/// is not: a transfer that runs past the end of `RAM_CMD` does not wrap.
/// The writer closes the write transaction at the boundary and reopens
/// at offset zero.
struct RingWriter<'a, B: EveBus> {
    link: &'a mut EveLink<B>,
    index: CmdIndex,
    open: bool,
}

impl<'a, B: EveBus> RingWriter<'a, B> {
    fn new(link: &'a mut EveLink<B>, index: CmdIndex) -> Self {
        Self {
            link,
            index,
            open: false,
        }
    }

    /// Ring address the next byte will land on
    fn position(&self) -> CmdIndex {
        self.index
    }

    fn put(&mut self, byte: u8) -> Result<(), B::Error> {
        if !self.open {
            self.link
                .begin_memory(RAM_CMD + self.index.value() as u32, true)?;
            self.open = true;
        }

        self.link.bus_mut().transfer(byte)?;
        self.index.advance(1);

        if self.index.value() == 0 {
            self.open = false;
        }
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), B::Error> {
        for &byte in bytes {
            self.put(byte)?;
        }
        Ok(())
    }

    fn finish(self) -> Result<CmdIndex, B::Error> {
        self.link.end_transaction()?;
        Ok(self.index)
    }
}

impl<B: EveBus> Eve<B> {
    /// Adopt the chip's write cursor as the host cursor
    ///
    /// Discards anything encoded but not yet executed. Called once
    /// during bring-up; also the recovery step after a fault reset.
    pub fn cmd_init_write_index(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd_index = CmdIndex::new(self.link.reg_read16(regs::CMD_WRITE)?);
        Ok(self.cmd_index)
    }

    /// Bytes free in the command ring
    ///
    /// Computed against the chip's read cursor, so repeated calls see
    /// space open up while the coprocessor works. Four bytes of the ring
    /// are reserved to keep a full ring distinguishable from an empty
    /// one.
    pub fn cmd_free_space(&mut self) -> Result<u16, Error<B::Error>> {
        let read = self.link.reg_read16(regs::CMD_READ)?;
        if read == READ_INDEX_FAULT {
            return Err(Error::CoprocessorFault);
        }

        let used = self.cmd_index.distance_from(CmdIndex::new(read));
        Ok((RAM_CMD_SIZE as u16 - CMD_HEADROOM) - used)
    }

    /// Poll the queue state once
    pub fn cmd_status(&mut self) -> Result<CmdStatus, Error<B::Error>> {
        let read = self.link.reg_read16(regs::CMD_READ)?;

        Ok(if read == READ_INDEX_FAULT {
            CmdStatus::Fault
        } else if read == self.cmd_index.value() {
            CmdStatus::Idle
        } else {
            CmdStatus::Busy
        })
    }

    /// Publish the write cursor so the coprocessor starts executing
    ///
    /// Encoding commands does not start anything by itself; the chip
    /// only chases the published cursor.
    pub fn cmd_execute(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        self.link.reg_write16(regs::CMD_WRITE, self.cmd_index.value())?;
        Ok(self.cmd_index)
    }

    /// Wait until the queue drains
    ///
    /// Returns immediately after a single poll when the queue is
    /// already idle. Unbounded: a command such as CMD_CALIBRATE that
    /// waits on the user legitimately takes arbitrarily long. Use
    /// [`cmd_wait_idle_bounded`](Eve::cmd_wait_idle_bounded) when an
    /// upper bound is known.
    pub fn cmd_wait_idle(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        loop {
            match self.cmd_status()? {
                CmdStatus::Idle => return Ok(self.cmd_index),
                CmdStatus::Fault => return Err(Error::CoprocessorFault),
                CmdStatus::Busy => {}
            }
        }
    }

    /// Wait until the queue drains, giving up after `max_polls`
    pub fn cmd_wait_idle_bounded(
        &mut self,
        max_polls: u32,
        delay_ms: u32,
    ) -> Result<CmdIndex, Error<B::Error>> {
        for _ in 0..max_polls {
            match self.cmd_status()? {
                CmdStatus::Idle => return Ok(self.cmd_index),
                CmdStatus::Fault => return Err(Error::CoprocessorFault),
                CmdStatus::Busy => self.link.bus_mut().delay_ms(delay_ms),
            }
        }
        Err(Error::Timeout)
    }

    /// Read an output slot filled in by a completed command
    pub fn cmd_read_slot(&mut self, slot: CmdIndex) -> Result<u32, Error<B::Error>> {
        Ok(self.link.reg_read32(RAM_CMD + slot.value() as u32)?)
    }

    /// Encode one command into the ring
    ///
    /// Writes the opcode and fields byte-exactly, advances the host
    /// cursor, and returns the addresses of any output slots. Nothing
    /// executes until [`cmd_execute`](Eve::cmd_execute).
    pub fn cmd(&mut self, opcode: u32, fields: &[CmdField<'_>]) -> Result<OutputSlots, Error<B::Error>> {
        let mut needed = 4usize;
        for field in fields {
            needed += field.encoded_len();
        }

        let free = self.cmd_free_space()?;
        if needed > free as usize {
            return Err(Error::BufferFull {
                needed: needed.min(u16::MAX as usize) as u16,
                free,
            });
        }

        let mut slots = OutputSlots::new();
        let mut writer = RingWriter::new(&mut self.link, self.cmd_index);

        writer.write(&opcode.to_le_bytes())?;

        for field in fields {
            match *field {
                CmdField::U16(value) => writer.write(&value.to_le_bytes())?,
                CmdField::U32(value) => writer.write(&value.to_le_bytes())?,
                CmdField::Str { text, max_len } => {
                    let limit = if max_len == 0 {
                        u16::MAX as usize
                    } else {
                        max_len as usize - 1
                    };
                    let bytes = text.as_bytes();
                    let taken = bytes.len().min(limit);

                    writer.write(&bytes[..taken])?;

                    // Terminator, then pad the field to 4 bytes.
                    let mut sent = taken + 1;
                    writer.put(0)?;
                    while sent % 4 != 0 {
                        writer.put(0)?;
                        sent += 1;
                    }
                }
                CmdField::Blob(data) => {
                    writer.write(data)?;
                    let mut sent = data.len();
                    while sent % 4 != 0 {
                        writer.put(0)?;
                        sent += 1;
                    }
                }
                CmdField::OutSlot => {
                    // Capture the address before the cursor moves past it.
                    let pushed = slots.push(writer.position());
                    debug_assert!(pushed.is_ok(), "OutputSlots capacity exceeded");
                    writer.write(&0u32.to_le_bytes())?;
                }
            }
        }

        self.cmd_index = writer.finish()?;
        Ok(slots)
    }

    /// Queue a raw display list word for the coprocessor to pass through
    pub fn cmd_dl(&mut self, word: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(word, &[])?;
        Ok(self.cmd_index)
    }

    /// Start a new display list
    pub fn cmd_dlstart(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_DLSTART, &[])?;
        Ok(self.cmd_index)
    }

    /// Swap in the display list built since CMD_DLSTART
    pub fn cmd_swap(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_SWAP, &[])?;
        Ok(self.cmd_index)
    }

    /// Reset the coprocessor state to defaults
    pub fn cmd_coldstart(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_COLDSTART, &[])?;
        Ok(self.cmd_index)
    }

    /// Raise the CMDFLAG interrupt after `ms` milliseconds
    pub fn cmd_interrupt(&mut self, ms: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_INTERRUPT, &[CmdField::U32(ms)])?;
        Ok(self.cmd_index)
    }

    /// Append `num` bytes of display list words from RAM_G
    pub fn cmd_append(&mut self, addr: u32, num: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_APPEND, &[CmdField::U32(addr), CmdField::U32(num)])?;
        Ok(self.cmd_index)
    }

    /// Read a register through the coprocessor; the slot receives its value
    pub fn cmd_regread(&mut self, addr: u32) -> Result<CmdIndex, Error<B::Error>> {
        let slots = self.cmd(CMD_REGREAD, &[CmdField::U32(addr), CmdField::OutSlot])?;
        Ok(slots[0])
    }

    /// Write a block of chip memory through the coprocessor
    pub fn cmd_memwrite(&mut self, addr: u32, data: &[u8]) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_MEMWRITE,
            &[
                CmdField::U32(addr),
                CmdField::U32(data.len() as u32),
                CmdField::Blob(data),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Decompress deflate data to `addr` in RAM_G
    pub fn cmd_inflate(&mut self, addr: u32, data: &[u8]) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_INFLATE, &[CmdField::U32(addr), CmdField::Blob(data)])?;
        Ok(self.cmd_index)
    }

    /// Decode a JPEG or PNG to `addr` in RAM_G
    pub fn cmd_loadimage(
        &mut self,
        addr: u32,
        options: u16,
        data: &[u8],
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_LOADIMAGE,
            &[
                CmdField::U32(addr),
                CmdField::U32(options as u32),
                CmdField::Blob(data),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Set up a streaming media FIFO in RAM_G
    pub fn cmd_mediafifo(&mut self, addr: u32, size: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_MEDIAFIFO, &[CmdField::U32(addr), CmdField::U32(size)])?;
        Ok(self.cmd_index)
    }

    /// CRC-32 over a memory block; the slot receives the checksum
    pub fn cmd_memcrc(&mut self, addr: u32, num: u32) -> Result<CmdIndex, Error<B::Error>> {
        let slots = self.cmd(
            CMD_MEMCRC,
            &[CmdField::U32(addr), CmdField::U32(num), CmdField::OutSlot],
        )?;
        Ok(slots[0])
    }

    /// Zero a memory block
    pub fn cmd_memzero(&mut self, addr: u32, num: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_MEMZERO, &[CmdField::U32(addr), CmdField::U32(num)])?;
        Ok(self.cmd_index)
    }

    /// Fill a memory block with a byte value
    pub fn cmd_memset(&mut self, addr: u32, value: u8, num: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_MEMSET,
            &[
                CmdField::U32(addr),
                CmdField::U32(value as u32),
                CmdField::U32(num),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Copy a memory block
    pub fn cmd_memcpy(&mut self, dest: u32, src: u32, num: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_MEMCPY,
            &[CmdField::U32(dest), CmdField::U32(src), CmdField::U32(num)],
        )?;
        Ok(self.cmd_index)
    }

    /// Draw a button
    #[allow(clippy::too_many_arguments)]
    pub fn cmd_button(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        font: i16,
        options: u16,
        text: &str,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_BUTTON,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(w as u16),
                CmdField::U16(h as u16),
                CmdField::U16(font as u16),
                CmdField::U16(options),
                CmdField::Str { text, max_len: 0 },
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Draw an analog clock
    #[allow(clippy::too_many_arguments)]
    pub fn cmd_clock(
        &mut self,
        x: i16,
        y: i16,
        r: i16,
        options: u16,
        h: u16,
        m: u16,
        s: u16,
        ms: u16,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_CLOCK,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(r as u16),
                CmdField::U16(options),
                CmdField::U16(h),
                CmdField::U16(m),
                CmdField::U16(s),
                CmdField::U16(ms),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Set the widget foreground color
    pub fn cmd_fgcolor(&mut self, rgb: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_FGCOLOR, &[CmdField::U32(rgb)])?;
        Ok(self.cmd_index)
    }

    /// Set the widget background color
    pub fn cmd_bgcolor(&mut self, rgb: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_BGCOLOR, &[CmdField::U32(rgb)])?;
        Ok(self.cmd_index)
    }

    /// Set the 3D widget highlight color
    pub fn cmd_gradcolor(&mut self, rgb: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_GRADCOLOR, &[CmdField::U32(rgb)])?;
        Ok(self.cmd_index)
    }

    /// Draw a gauge
    #[allow(clippy::too_many_arguments)]
    pub fn cmd_gauge(
        &mut self,
        x: i16,
        y: i16,
        r: i16,
        options: u16,
        major: u16,
        minor: u16,
        value: u16,
        range: u16,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_GAUGE,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(r as u16),
                CmdField::U16(options),
                CmdField::U16(major),
                CmdField::U16(minor),
                CmdField::U16(value),
                CmdField::U16(range),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Draw a smooth color gradient across a rectangle
    pub fn cmd_gradient(
        &mut self,
        x0: i16,
        y0: i16,
        rgb0: u32,
        x1: i16,
        y1: i16,
        rgb1: u32,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_GRADIENT,
            &[
                CmdField::U16(x0 as u16),
                CmdField::U16(y0 as u16),
                CmdField::U32(rgb0),
                CmdField::U16(x1 as u16),
                CmdField::U16(y1 as u16),
                CmdField::U32(rgb1),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Draw a row of keys; the pressed key is the tag in `options`
    #[allow(clippy::too_many_arguments)]
    pub fn cmd_keys(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        font: i16,
        options: u16,
        text: &str,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_KEYS,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(w as u16),
                CmdField::U16(h as u16),
                CmdField::U16(font as u16),
                CmdField::U16(options),
                CmdField::Str { text, max_len: 0 },
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Draw a progress bar
    #[allow(clippy::too_many_arguments)]
    pub fn cmd_progress(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        options: u16,
        value: u16,
        range: u16,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_PROGRESS,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(w as u16),
                CmdField::U16(h as u16),
                CmdField::U16(options),
                CmdField::U16(value),
                CmdField::U16(range),
                CmdField::U16(0),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Draw a scrollbar
    #[allow(clippy::too_many_arguments)]
    pub fn cmd_scrollbar(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        options: u16,
        value: u16,
        size: u16,
        range: u16,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_SCROLLBAR,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(w as u16),
                CmdField::U16(h as u16),
                CmdField::U16(options),
                CmdField::U16(value),
                CmdField::U16(size),
                CmdField::U16(range),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Draw a slider
    #[allow(clippy::too_many_arguments)]
    pub fn cmd_slider(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        options: u16,
        value: u16,
        range: u16,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_SLIDER,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(w as u16),
                CmdField::U16(h as u16),
                CmdField::U16(options),
                CmdField::U16(value),
                CmdField::U16(range),
                CmdField::U16(0),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Draw a rotary dial
    pub fn cmd_dial(
        &mut self,
        x: i16,
        y: i16,
        r: i16,
        options: u16,
        value: u16,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_DIAL,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(r as u16),
                CmdField::U16(options),
                CmdField::U16(value),
                CmdField::U16(0),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Draw a toggle switch; `text` is "off\u{FF}on"
    #[allow(clippy::too_many_arguments)]
    pub fn cmd_toggle(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        font: u16,
        options: u16,
        state: u16,
        text: &str,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_TOGGLE,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(w as u16),
                CmdField::U16(font),
                CmdField::U16(options),
                CmdField::U16(state),
                CmdField::Str { text, max_len: 0 },
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Draw a text string
    pub fn cmd_text(
        &mut self,
        x: i16,
        y: i16,
        font: i16,
        options: u16,
        text: &str,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_TEXT,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(font as u16),
                CmdField::U16(options),
                CmdField::Str { text, max_len: 0 },
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Set the number base for [`cmd_number`](Eve::cmd_number), 2..=36
    pub fn cmd_setbase(&mut self, base: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_SETBASE, &[CmdField::U32(base)])?;
        Ok(self.cmd_index)
    }

    /// Draw a number
    pub fn cmd_number(
        &mut self,
        x: i16,
        y: i16,
        font: i16,
        options: u16,
        value: i32,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_NUMBER,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(font as u16),
                CmdField::U16(options),
                CmdField::U32(value as u32),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Reset the transform matrix to identity
    pub fn cmd_loadidentity(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_LOADIDENTITY, &[])?;
        Ok(self.cmd_index)
    }

    /// Emit the transform matrix into the display list
    pub fn cmd_setmatrix(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_SETMATRIX, &[])?;
        Ok(self.cmd_index)
    }

    /// Read back the transform matrix; six slots receive a..f
    pub fn cmd_getmatrix(&mut self) -> Result<OutputSlots, Error<B::Error>> {
        self.cmd(
            CMD_GETMATRIX,
            &[
                CmdField::OutSlot,
                CmdField::OutSlot,
                CmdField::OutSlot,
                CmdField::OutSlot,
                CmdField::OutSlot,
                CmdField::OutSlot,
            ],
        )
    }

    /// First unallocated RAM_G address; the slot receives the pointer
    pub fn cmd_getptr(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        let slots = self.cmd(CMD_GETPTR, &[CmdField::OutSlot])?;
        Ok(slots[0])
    }

    /// Address and dimensions of the last loaded image
    pub fn cmd_getprops(&mut self) -> Result<(CmdIndex, CmdIndex, CmdIndex), Error<B::Error>> {
        let slots = self.cmd(
            CMD_GETPROPS,
            &[CmdField::OutSlot, CmdField::OutSlot, CmdField::OutSlot],
        )?;
        Ok((slots[0], slots[1], slots[2]))
    }

    /// Scale the transform matrix, 16.16 fixed point
    pub fn cmd_scale(&mut self, sx: i32, sy: i32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_SCALE, &[CmdField::U32(sx as u32), CmdField::U32(sy as u32)])?;
        Ok(self.cmd_index)
    }

    /// Rotate the transform matrix; a full circle is 65536 units
    pub fn cmd_rotate(&mut self, angle: i32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_ROTATE, &[CmdField::U32(angle as u32)])?;
        Ok(self.cmd_index)
    }

    /// Translate the transform matrix, 16.16 fixed point
    pub fn cmd_translate(&mut self, tx: i32, ty: i32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_TRANSLATE,
            &[CmdField::U32(tx as u32), CmdField::U32(ty as u32)],
        )?;
        Ok(self.cmd_index)
    }

    /// Run interactive touch calibration; the slot receives 0 on failure
    pub fn cmd_calibrate(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        let slots = self.cmd(CMD_CALIBRATE, &[CmdField::OutSlot])?;
        Ok(slots[0])
    }

    /// Rotate the screen, 0..=3 quarter turns
    pub fn cmd_setrotate(&mut self, rotation: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_SETROTATE, &[CmdField::U32(rotation)])?;
        Ok(self.cmd_index)
    }

    /// Show an animated spinner
    pub fn cmd_spinner(
        &mut self,
        x: i16,
        y: i16,
        style: u16,
        scale: u16,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_SPINNER,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(style),
                CmdField::U16(scale),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Start the animated screen saver
    pub fn cmd_screensaver(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_SCREENSAVER, &[])?;
        Ok(self.cmd_index)
    }

    /// Sketch touch input into a bitmap at `addr`
    #[allow(clippy::too_many_arguments)]
    pub fn cmd_sketch(
        &mut self,
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        addr: u32,
        format: dl::BitmapFormat,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_SKETCH,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(w),
                CmdField::U16(h),
                CmdField::U32(addr),
                CmdField::U16(format as u16),
                CmdField::U16(0),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Stop SKETCH, SPINNER or SCREENSAVER
    pub fn cmd_stop(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_STOP, &[])?;
        Ok(self.cmd_index)
    }

    /// Register a custom font with an explicit first character
    pub fn cmd_setfont2(
        &mut self,
        font: u32,
        addr: u32,
        first_char: u32,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_SETFONT2,
            &[
                CmdField::U32(font),
                CmdField::U32(addr),
                CmdField::U32(first_char),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Set the scratch bitmap handle used internally by widgets
    pub fn cmd_setscratch(&mut self, handle: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_SETSCRATCH, &[CmdField::U32(handle)])?;
        Ok(self.cmd_index)
    }

    /// Load a ROM font into a bitmap handle
    pub fn cmd_romfont(&mut self, font: u32, slot: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_ROMFONT, &[CmdField::U32(font), CmdField::U32(slot)])?;
        Ok(self.cmd_index)
    }

    /// Track touches over a screen region for the given tag
    pub fn cmd_track(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        tag: u8,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_TRACK,
            &[
                CmdField::U16(x as u16),
                CmdField::U16(y as u16),
                CmdField::U16(w as u16),
                CmdField::U16(h as u16),
                CmdField::U16(tag as u16),
                CmdField::U16(0),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Snapshot the screen into RAM_G at `addr`
    pub fn cmd_snapshot(&mut self, addr: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_SNAPSHOT, &[CmdField::U32(addr)])?;
        Ok(self.cmd_index)
    }

    /// Emit display list setup for a bitmap in one command
    pub fn cmd_setbitmap(
        &mut self,
        addr: u32,
        format: dl::BitmapFormat,
        width: u16,
        height: u16,
    ) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(
            CMD_SETBITMAP,
            &[
                CmdField::U32(addr),
                CmdField::U16(format as u16),
                CmdField::U16(width),
                CmdField::U16(height),
                CmdField::U16(0),
            ],
        )?;
        Ok(self.cmd_index)
    }

    /// Play the vendor logo animation
    pub fn cmd_logo(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd(CMD_LOGO, &[])?;
        Ok(self.cmd_index)
    }

    /// Queue a clear to the given color
    pub fn cmd_clear(&mut self, rgb: u32) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd_dl(dl::clear_color(rgb))?;
        self.cmd_dl(dl::clear(true, true, true))
    }

    /// Terminate the display list and request the swap
    pub fn cmd_dl_finish(&mut self) -> Result<CmdIndex, Error<B::Error>> {
        self.cmd_dl(dl::display())?;
        self.cmd_swap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBus;
    use crate::profile::DisplayProfile;

    fn idle_eve() -> Eve<MockBus> {
        // Both cursors at zero: queue idle, whole ring free.
        let mut bus = MockBus::new();
        bus.set16(regs::CMD_READ, 0);
        bus.set16(regs::CMD_WRITE, 0);
        Eve::new(bus, DisplayProfile::wqvga_480x272())
    }

    #[test]
    fn command_round_trip_is_byte_exact() {
        let mut eve = idle_eve();
        eve.cmd_interrupt(0x1234_5678).unwrap();
        assert_eq!(eve.cmd_index().value(), 8);

        let bus = eve.into_inner();
        let mut bytes = [0u8; 8];
        bus.get_bytes(RAM_CMD, &mut bytes);
        assert_eq!(&bytes, &[0x02, 0xFF, 0xFF, 0xFF, 0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn free_space_formula() {
        let mut eve = idle_eve();
        eve.cmd_index = CmdIndex::new(100);
        eve.link_mut().bus_mut().set16(regs::CMD_READ, 50);
        assert_eq!(eve.cmd_free_space().unwrap(), 4042);
    }

    #[test]
    fn free_space_with_wrapped_cursors() {
        let mut eve = idle_eve();
        eve.cmd_index = CmdIndex::new(10);
        eve.link_mut().bus_mut().set16(regs::CMD_READ, 4090);
        // 16 bytes in flight across the wrap point.
        assert_eq!(eve.cmd_free_space().unwrap(), 4076);
    }

    #[test]
    fn empty_ring_has_headroom_reserved() {
        let mut eve = idle_eve();
        assert_eq!(eve.cmd_free_space().unwrap(), 4092);
    }

    #[test]
    fn fault_sentinel_reported_everywhere() {
        let mut eve = idle_eve();
        eve.link_mut().bus_mut().set16(regs::CMD_READ, READ_INDEX_FAULT);

        assert_eq!(eve.cmd_status().unwrap(), CmdStatus::Fault);
        assert_eq!(eve.cmd_free_space(), Err(Error::CoprocessorFault));
        assert_eq!(eve.cmd_wait_idle(), Err(Error::CoprocessorFault));
        assert_eq!(eve.cmd_dlstart(), Err(Error::CoprocessorFault));
    }

    #[test]
    fn wait_idle_polls_once_when_already_idle() {
        let mut eve = idle_eve();
        assert_eq!(eve.cmd_wait_idle().unwrap().value(), 0);

        let bus = eve.into_inner();
        assert_eq!(bus.read_count(regs::CMD_READ), 1);
    }

    #[test]
    fn bounded_wait_times_out() {
        let mut eve = idle_eve();
        // Read cursor stuck behind the write cursor.
        eve.cmd_index = CmdIndex::new(16);
        assert_eq!(eve.cmd_wait_idle_bounded(10, 2), Err(Error::Timeout));
        assert_eq!(eve.into_inner().total_delay_ms(), 20);
    }

    #[test]
    fn bounded_wait_returns_once_queue_drains() {
        let mut eve = idle_eve();
        eve.cmd_index = CmdIndex::new(16);
        // Read cursor catches up on the fourth poll, well inside the
        // budget.
        eve.link_mut()
            .bus_mut()
            .set16_after_reads(regs::CMD_READ, 16, 3);

        assert_eq!(eve.cmd_wait_idle_bounded(10, 2).unwrap().value(), 16);
        // Three busy polls slept; the idle poll did not.
        assert_eq!(eve.into_inner().total_delay_ms(), 6);
    }

    #[test]
    fn execute_publishes_write_cursor() {
        let mut eve = idle_eve();
        eve.cmd_dlstart().unwrap();
        eve.cmd_execute().unwrap();

        let bus = eve.into_inner();
        assert_eq!(bus.get16(regs::CMD_WRITE), 4);
    }

    #[test]
    fn string_truncated_terminated_and_padded() {
        let field = CmdField::Str {
            text: "HELLO WORLD",
            max_len: 5,
        };
        assert_eq!(field.encoded_len(), 8);

        let mut eve = idle_eve();
        eve.cmd(CMD_TEXT, &[field]).unwrap();

        let bus = eve.into_inner();
        let mut bytes = [0u8; 8];
        bus.get_bytes(RAM_CMD + 4, &mut bytes);
        assert_eq!(&bytes, b"HELL\0\0\0\0");
    }

    #[test]
    fn exact_fit_string_still_gets_terminator() {
        // Four characters fill the word, so the terminator forces
        // another padded word.
        let field = CmdField::Str {
            text: "ABCD",
            max_len: 0,
        };
        assert_eq!(field.encoded_len(), 8);
    }

    #[test]
    fn empty_string_encodes_one_word() {
        let field = CmdField::Str {
            text: "",
            max_len: 0,
        };
        assert_eq!(field.encoded_len(), 4);
    }

    #[test]
    fn blob_padded_to_word_boundary() {
        let mut eve = idle_eve();
        eve.cmd_memwrite(0x1000, &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE]).unwrap();
        // opcode + addr + len + 5 data bytes padded to 8.
        assert_eq!(eve.cmd_index().value(), 20);

        let bus = eve.into_inner();
        let mut bytes = [0u8; 8];
        bus.get_bytes(RAM_CMD + 12, &mut bytes);
        assert_eq!(&bytes, &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0, 0, 0]);
    }

    #[test]
    fn output_slot_recorded_and_read_back() {
        let mut eve = idle_eve();
        let slot = eve.cmd_getptr().unwrap();
        assert_eq!(slot.value(), 4);
        assert_eq!(eve.cmd_index().value(), 8);

        // Placeholder is zeroed at encode time.
        assert_eq!(eve.link_mut().bus_mut().get32(RAM_CMD + 4), 0);

        // Chip fills the slot while executing; read it back afterwards.
        eve.link_mut().bus_mut().set32(RAM_CMD + 4, 0x000A_BCDE);
        assert_eq!(eve.cmd_read_slot(slot).unwrap(), 0x000A_BCDE);
    }

    #[test]
    fn getmatrix_reserves_six_slots() {
        let mut eve = idle_eve();
        let slots = eve.cmd_getmatrix().unwrap();
        let values: heapless::Vec<u16, 6> = slots.iter().map(|s| s.value()).collect();
        assert_eq!(&values[..], &[4, 8, 12, 16, 20, 24]);
        assert_eq!(eve.cmd_index().value(), 28);
        // The widest reader fills the slot vector exactly; none of its
        // addresses were dropped for lack of capacity.
        assert_eq!(slots.len(), slots.capacity());
    }

    #[test]
    fn oversized_command_is_rejected() {
        let mut eve = idle_eve();
        eve.cmd_index = CmdIndex::new(0);
        // Read cursor just ahead: only 4 bytes free.
        eve.link_mut().bus_mut().set16(regs::CMD_READ, 8);

        let result = eve.cmd_interrupt(0);
        assert_eq!(
            result,
            Err(Error::BufferFull { needed: 8, free: 4 })
        );
        // Nothing was written and the cursor did not move.
        assert_eq!(eve.cmd_index().value(), 0);
        assert_eq!(eve.into_inner().get32(RAM_CMD), 0);
    }

    #[test]
    fn command_crossing_ring_end_splits_the_write() {
        let mut eve = idle_eve();
        eve.cmd_index = CmdIndex::new(4092);
        eve.link_mut().bus_mut().set16(regs::CMD_READ, 4092);

        eve.cmd_interrupt(0x0000_0005).unwrap();
        assert_eq!(eve.cmd_index().value(), 4);

        let bus = eve.into_inner();
        // Opcode at the last word, parameter wrapped to offset zero.
        assert_eq!(bus.get32(RAM_CMD + 4092), CMD_INTERRUPT);
        assert_eq!(bus.get32(RAM_CMD), 5);

        let writes: heapless::Vec<(u32, u32), 8> = bus.writes().collect();
        assert_eq!(&writes[..], &[(RAM_CMD + 4092, 4), (RAM_CMD, 4)]);
    }

    #[test]
    fn init_write_index_adopts_chip_cursor() {
        let mut eve = idle_eve();
        eve.link_mut().bus_mut().set16(regs::CMD_WRITE, 2048);
        assert_eq!(eve.cmd_init_write_index().unwrap().value(), 2048);
        assert_eq!(eve.cmd_index().value(), 2048);
    }

    #[test]
    fn dl_finish_queues_display_and_swap() {
        let mut eve = idle_eve();
        eve.cmd_dl_finish().unwrap();

        let bus = eve.into_inner();
        assert_eq!(bus.get32(RAM_CMD), dl::display());
        assert_eq!(bus.get32(RAM_CMD + 4), CMD_SWAP);
    }

    #[test]
    fn text_layout_matches_wire_format() {
        let mut eve = idle_eve();
        eve.cmd_text(240, 136, 29, opt::CENTER, "OK").unwrap();

        let bus = eve.into_inner();
        let mut bytes = [0u8; 16];
        bus.get_bytes(RAM_CMD, &mut bytes);
        assert_eq!(
            &bytes,
            &[
                0x0C, 0xFF, 0xFF, 0xFF, // CMD_TEXT
                240, 0, 136, 0, // x, y
                29, 0, 0x00, 0x06, // font, OPT_CENTER
                b'O', b'K', 0, 0, // text, nul, pad
            ]
        );
    }
}
