//! EVE display controller protocol engine
//!
//! Drives the FT810..FT813 and BT815..BT818 family of display
//! controllers over SPI: wire framing, register access, the direct
//! display list, and the coprocessor command ring.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Eve<B>        (driver, cmd queue)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  EveLink<B>    (framing, registers)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  B: EveBus     (SPI transport)          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The chip consumes drawing commands from a 4 KiB ring in its own
//! memory. [`Eve`] keeps the host-side write cursor, encodes commands
//! into the ring, publishes the cursor to start execution, and polls the
//! chip's read cursor for completion and faults. Everything is blocking
//! and owns its bus; no interior state lives outside the driver value.
//!
//! # Example
//!
//! ```ignore
//! let profile = DisplayProfile::wqvga_480x272();
//! let mut eve = Eve::new(bus, profile);
//! eve.begin()?;
//!
//! eve.cmd_dlstart()?;
//! eve.cmd_clear(0x000000)?;
//! eve.cmd_text(240, 136, 29, opt::CENTER, "hello")?;
//! eve.cmd_dl_finish()?;
//! eve.cmd_execute()?;
//! eve.cmd_wait_idle()?;
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod cmd;
pub mod dl;
pub mod driver;
pub mod error;
pub mod hostcmd;
pub mod index;
pub mod link;
pub mod memmap;
pub mod opcodes;
pub mod profile;
pub mod regs;

#[cfg(test)]
pub(crate) mod mock;

// Re-export key types at crate root for convenience
pub use cmd::{CmdField, CmdStatus, OutputSlots};
pub use driver::Eve;
pub use error::Error;
pub use hostcmd::{ClockSelect, HostCommand};
pub use index::{CmdIndex, DlIndex, RingIndex};
pub use link::EveLink;
pub use opcodes::opt;
pub use profile::{ChipId, DisplayProfile};

pub use evehost_hal::EveBus;
