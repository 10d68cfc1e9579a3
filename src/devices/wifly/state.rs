//! Provisioning states and their descriptors

use super::TX_CAPACITY;
use bitflags::bitflags;
use heapless::Vec;

/// Number of provisioning states
pub const STATE_COUNT: usize = 13;

/// Provisioning state
///
/// Discriminants are the stable state ids used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum WiflyState {
    /// Enter command mode (`$$$`)
    CommandMode = 1,
    /// Disable UART echo
    DisableEcho = 2,
    /// Quiet mode
    QuietMode = 3,
    /// Enable DHCP client
    EnableDhcp = 4,
    /// Extend join wait to 5000 ms
    JoinWait = 5,
    /// WPA1/WPA2-PSK authentication
    AuthMode = 6,
    SetPassphrase = 7,
    SetSsid = 8,
    HidePassphrase = 9,
    AutoJoin = 10,
    /// Leave command mode, module enters data mode
    ExitCommandMode = 11,
    /// Timed discard of stray input
    Flush = 12,
    /// Terminal steady state
    Idle = 127,
}

impl WiflyState {
    /// Every state, in provisioning order
    pub const ALL: [WiflyState; STATE_COUNT] = [
        WiflyState::CommandMode,
        WiflyState::DisableEcho,
        WiflyState::QuietMode,
        WiflyState::EnableDhcp,
        WiflyState::JoinWait,
        WiflyState::AuthMode,
        WiflyState::SetPassphrase,
        WiflyState::SetSsid,
        WiflyState::HidePassphrase,
        WiflyState::AutoJoin,
        WiflyState::ExitCommandMode,
        WiflyState::Flush,
        WiflyState::Idle,
    ];

    /// State entered after construction
    pub const INITIAL: WiflyState = WiflyState::CommandMode;

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|state| state.id() == id)
    }

    /// Human-readable description for the debug log
    pub const fn description(self) -> &'static str {
        match self {
            WiflyState::CommandMode => "Command mode",
            WiflyState::DisableEcho => "Disabling uart rx echo",
            WiflyState::QuietMode => "Quiet mode enabled",
            WiflyState::EnableDhcp => "Enable DHCP",
            WiflyState::JoinWait => "Setting join wait to 5000ms",
            WiflyState::AuthMode => "Setting auth to WPA1-WPA2psk",
            WiflyState::SetPassphrase => "Setting password",
            WiflyState::SetSsid => "Setting SSID",
            WiflyState::HidePassphrase => "Hiding passphrase",
            WiflyState::AutoJoin => "Auto joining",
            WiflyState::ExitCommandMode => "Data mode entered",
            WiflyState::Flush => "Flushing received bytes",
            WiflyState::Idle => "Idling with rx/tx enabled",
        }
    }
}

impl core::fmt::Display for WiflyState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.description())
    }
}

bitflags! {
    /// Side effects applied at the start of a driver step
    ///
    /// Applied in the order disable, enable, idle, reset, flush.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SpecialFunctions: u8 {
        /// Pulse the module reset line and wait for boot
        const RESET = 0b0000_0001;
        /// Wait, then zero both cursors and discard transport input
        const FLUSH_RX = 0b0000_0010;
        /// Open the link to client traffic
        const ENABLE_LINK = 0b0000_0100;
        /// Close the link to client traffic
        const DISABLE_LINK = 0b0000_1000;
        /// Sleep and end the step
        const IDLE = 0b0001_0000;

        /// Full restart from command mode
        const STARTUP = Self::DISABLE_LINK.bits() | Self::RESET.bits() | Self::FLUSH_RX.bits();
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SpecialFunctions {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "SpecialFunctions({=u8:#x})", self.bits())
    }
}

/// Outgoing command bytes of one state
pub type Command = Vec<u8, TX_CAPACITY>;

/// One entry of the state table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDescriptor {
    pub(super) state: WiflyState,
    pub(super) next: WiflyState,
    pub(super) recovery: WiflyState,
    pub(super) special: SpecialFunctions,
    pub(super) tx_command: Command,
    pub(super) tx_delay_ms: u32,
    pub(super) rx_expect: &'static [u8],
    pub(super) rx_delay_ms: u32,
}

impl StateDescriptor {
    pub fn state(&self) -> WiflyState {
        self.state
    }

    pub fn id(&self) -> u8 {
        self.state.id()
    }

    /// State entered when the response matches
    pub fn next(&self) -> WiflyState {
        self.next
    }

    /// State entered on mismatch or short response
    pub fn recovery(&self) -> WiflyState {
        self.recovery
    }

    pub fn special(&self) -> SpecialFunctions {
        self.special
    }

    pub fn tx_command(&self) -> &[u8] {
        &self.tx_command
    }

    pub fn tx_delay_ms(&self) -> u32 {
        self.tx_delay_ms
    }

    /// Expected response; empty always matches
    pub fn rx_expect(&self) -> &[u8] {
        self.rx_expect
    }

    pub fn rx_delay_ms(&self) -> u32 {
        self.rx_delay_ms
    }
}
