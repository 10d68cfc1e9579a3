//! WiFly provisioning state table
//!
//! One descriptor per [`WiflyState`], built from the network credentials.
//!
//! # Sequence
//!
//! ```text
//! CommandMode ─▶ DisableEcho ─▶ QuietMode ─▶ EnableDhcp ─▶ JoinWait
//!   ─▶ AuthMode ─▶ SetPassphrase ─▶ SetSsid ─▶ HidePassphrase ─▶ AutoJoin
//!   ─▶ ExitCommandMode ─▶ Flush ─▶ Idle ⟲
//! ```
//!
//! Flush and Idle recover to themselves; every other state recovers to
//! CommandMode, which resets the module.

use super::state::{Command, SpecialFunctions, StateDescriptor, WiflyState, STATE_COUNT};
use crate::parameters::{ConfigError, WifiCredentials};
use heapless::Vec;

const RX_DELAY_COMMAND_MODE_MS: u32 = 500;
const RX_DELAY_CREDENTIAL_MS: u32 = 750;
const RX_DELAY_COMMAND_MS: u32 = 50;

const REPLY_CMD: &[u8] = b"CMD\r\n";
const REPLY_ECHO_OFF: &[u8] = b"set u m 1\r\r\nAOK\r\n";
const REPLY_AOK: &[u8] = b"AOK\r\n";
const REPLY_EXIT: &[u8] = b"EXIT\r\n";

/// Immutable provisioning table
#[derive(Debug, Clone)]
pub struct StateTable {
    descriptors: Vec<StateDescriptor, STATE_COUNT>,
}

impl StateTable {
    /// Build the table for `credentials`
    ///
    /// Fails with [`ConfigError::CommandTooLong`] if a credential command does
    /// not fit the transmit buffer.
    pub fn new(credentials: &WifiCredentials) -> Result<Self, ConfigError> {
        let mut descriptors = Vec::new();
        for state in WiflyState::ALL {
            let descriptor = describe(state, credentials)?;
            // Capacity equals the number of states
            let _ = descriptors.push(descriptor);
        }
        Ok(Self { descriptors })
    }

    /// Descriptor for `state`
    pub fn lookup(&self, state: WiflyState) -> Option<&StateDescriptor> {
        self.lookup_id(state.id())
    }

    /// Descriptor for a raw state id
    pub fn lookup_id(&self, id: u8) -> Option<&StateDescriptor> {
        self.descriptors.iter().find(|descriptor| descriptor.id() == id)
    }

    /// Descriptors in provisioning order
    pub fn iter(&self) -> impl Iterator<Item = &StateDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Copy of this table missing the descriptor for `state`
    #[cfg(test)]
    pub(super) fn without(&self, state: WiflyState) -> Self {
        let mut table = self.clone();
        table.descriptors.retain(|descriptor| descriptor.state() != state);
        table
    }
}

fn describe(
    state: WiflyState,
    credentials: &WifiCredentials,
) -> Result<StateDescriptor, ConfigError> {
    use WiflyState::*;

    let (next, recovery, special, tx_command, rx_expect, rx_delay_ms) = match state {
        CommandMode => (
            DisableEcho,
            CommandMode,
            SpecialFunctions::STARTUP,
            command(&[&b"$$$"[..]])?,
            REPLY_CMD,
            RX_DELAY_COMMAND_MODE_MS,
        ),
        DisableEcho => setting(QuietMode, b"set u m 1\r", REPLY_ECHO_OFF)?,
        QuietMode => setting(EnableDhcp, b"set s p 0\r", REPLY_AOK)?,
        EnableDhcp => setting(JoinWait, b"set i d 1\r", REPLY_AOK)?,
        JoinWait => setting(AuthMode, b"set o j 5000\r", REPLY_AOK)?,
        AuthMode => setting(SetPassphrase, b"set w a 4\r", REPLY_AOK)?,
        SetPassphrase => (
            SetSsid,
            CommandMode,
            SpecialFunctions::empty(),
            command(&[&b"set w p "[..], credentials.passphrase().as_bytes(), &b"\r"[..]])?,
            REPLY_AOK,
            RX_DELAY_CREDENTIAL_MS,
        ),
        SetSsid => (
            HidePassphrase,
            CommandMode,
            SpecialFunctions::empty(),
            command(&[&b"set w s "[..], credentials.ssid().as_bytes(), &b"\r"[..]])?,
            REPLY_AOK,
            RX_DELAY_CREDENTIAL_MS,
        ),
        HidePassphrase => setting(AutoJoin, b"set w h 1\r", REPLY_AOK)?,
        AutoJoin => setting(ExitCommandMode, b"set w j 1\r", REPLY_AOK)?,
        ExitCommandMode => setting(Flush, b"exit\r", REPLY_EXIT)?,
        Flush => (
            Idle,
            Flush,
            SpecialFunctions::FLUSH_RX,
            Command::new(),
            &[][..],
            0,
        ),
        Idle => (
            Idle,
            Idle,
            SpecialFunctions::ENABLE_LINK | SpecialFunctions::IDLE,
            Command::new(),
            &[][..],
            0,
        ),
    };

    Ok(StateDescriptor {
        state,
        next,
        recovery,
        special,
        tx_command,
        tx_delay_ms: 0,
        rx_expect,
        rx_delay_ms,
    })
}

type Row = (
    WiflyState,
    WiflyState,
    SpecialFunctions,
    Command,
    &'static [u8],
    u32,
);

/// Plain command-mode setting: recovers to CommandMode, short reply wait
fn setting(next: WiflyState, tx: &[u8], rx_expect: &'static [u8]) -> Result<Row, ConfigError> {
    Ok((
        next,
        WiflyState::CommandMode,
        SpecialFunctions::empty(),
        command(&[tx])?,
        rx_expect,
        RX_DELAY_COMMAND_MS,
    ))
}

fn command(parts: &[&[u8]]) -> Result<Command, ConfigError> {
    let mut out = Command::new();
    for part in parts {
        out.extend_from_slice(part)
            .map_err(|_| ConfigError::CommandTooLong)?;
    }
    Ok(out)
}
