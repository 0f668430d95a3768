//! Host commands
//!
//! Host commands are 3-byte transactions sent while the core may not be
//! running yet: an opcode byte, a parameter byte and a zero byte. They
//! control power states and clocking and are distinct from memory
//! transactions and coprocessor commands.

/// Host command opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Wake from standby/sleep/power-down
    Active,
    /// Enter standby, core clock keeps running
    Standby,
    /// Enter sleep, core clock stops
    Sleep,
    /// Enter power-down
    PowerDown,
    /// Feed the PLL from the external crystal or clock input
    ClockExternal,
    /// Feed the PLL from the internal oscillator
    ClockInternal,
    /// Select the system clock multiplier, parameter is a [`ClockSelect`]
    ClockSelect,
    /// Pulse the core reset line
    ResetPulse,
    /// Set drive strength for a pin group
    PinDrive,
    /// Set pin state during power-down
    PinPdState,
}

impl HostCommand {
    /// Opcode byte, the first byte on the wire
    pub const fn opcode(self) -> u8 {
        match self {
            HostCommand::Active => 0x00,
            HostCommand::Standby => 0x41,
            HostCommand::Sleep => 0x42,
            HostCommand::PowerDown => 0x43,
            HostCommand::ClockExternal => 0x44,
            HostCommand::ClockInternal => 0x48,
            HostCommand::ClockSelect => 0x61,
            HostCommand::ResetPulse => 0x68,
            HostCommand::PinDrive => 0x70,
            HostCommand::PinPdState => 0x71,
        }
    }
}

/// System clock multiplier, the parameter byte of [`HostCommand::ClockSelect`]
///
/// The multiplier applies to the 12 MHz reference. X4 and up also select
/// the high PLL range, which is folded into the encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSelect {
    /// Chip default, 60 MHz
    #[default]
    Default,
    /// 24 MHz
    X2,
    /// 36 MHz
    X3,
    /// 48 MHz
    X4,
    /// 60 MHz
    X5,
    /// 72 MHz (BT815 and later)
    X6,
}

impl ClockSelect {
    /// Parameter byte for the host command
    pub const fn value(self) -> u8 {
        match self {
            ClockSelect::Default => 0x00,
            ClockSelect::X2 => 0x02,
            ClockSelect::X3 => 0x03,
            ClockSelect::X4 => 0x44,
            ClockSelect::X5 => 0x45,
            ClockSelect::X6 => 0x46,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcodes_match_datasheet() {
        assert_eq!(HostCommand::Active.opcode(), 0x00);
        assert_eq!(HostCommand::ClockExternal.opcode(), 0x44);
        assert_eq!(HostCommand::ClockInternal.opcode(), 0x48);
        assert_eq!(HostCommand::ClockSelect.opcode(), 0x61);
        assert_eq!(HostCommand::ResetPulse.opcode(), 0x68);
    }

    #[test]
    fn high_multipliers_set_pll_range_bit() {
        assert_eq!(ClockSelect::X3.value(), 0x03);
        assert_eq!(ClockSelect::X4.value(), 0x44);
        assert_eq!(ClockSelect::X6.value(), 0x46);
    }
}
