//! WiFi Credential Definitions
//!
//! The network name and passphrase sent to the module during provisioning
//! (`set w s <ssid>` and `set w p <passphrase>`).
//!
//! # Character Restrictions
//!
//! The module's command parser splits arguments on spaces and terminates a
//! command on `\r`, so neither value may contain a space, `\r` or `\n`. The
//! module expects `$` where the real SSID contains a space; that
//! substitution is up to the caller.
//!
//! # Example
//!
//! ```
//! use wifly_link::parameters::WifiCredentials;
//!
//! let credentials = WifiCredentials::new("paradise", "kiwibird").unwrap();
//! assert_eq!(credentials.ssid(), "paradise");
//! ```

use heapless::String;

/// Maximum SSID length (IEEE 802.11 standard)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WiFi passphrase length (WPA2 standard)
pub const MAX_PASSWORD_LEN: usize = 63;

/// SSID used when none is provided at build time
pub const DEFAULT_SSID: &str = "paradise";

/// Passphrase used when none is provided at build time
pub const DEFAULT_PASSWORD: &str = "kiwibird";

/// Configuration errors, reported at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// SSID longer than [`MAX_SSID_LEN`] bytes
    SsidTooLong,
    /// SSID is empty
    SsidEmpty,
    /// Passphrase longer than [`MAX_PASSWORD_LEN`] bytes
    PassphraseTooLong,
    /// Value contains a space, `\r` or `\n`
    InvalidCharacter,
    /// A generated command does not fit the transmit buffer
    CommandTooLong,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::SsidTooLong => write!(f, "SSID longer than {} bytes", MAX_SSID_LEN),
            ConfigError::SsidEmpty => write!(f, "SSID is empty"),
            ConfigError::PassphraseTooLong => {
                write!(f, "passphrase longer than {} bytes", MAX_PASSWORD_LEN)
            }
            ConfigError::InvalidCharacter => write!(f, "space or line break in credential"),
            ConfigError::CommandTooLong => write!(f, "command exceeds transmit buffer"),
        }
    }
}

/// Network credentials for the provisioning sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    ssid: String<MAX_SSID_LEN>,
    passphrase: String<MAX_PASSWORD_LEN>,
}

impl WifiCredentials {
    /// Validate and store credentials
    pub fn new(ssid: &str, passphrase: &str) -> Result<Self, ConfigError> {
        if ssid.is_empty() {
            return Err(ConfigError::SsidEmpty);
        }
        if has_separator(ssid) || has_separator(passphrase) {
            return Err(ConfigError::InvalidCharacter);
        }

        let ssid = String::try_from(ssid).map_err(|_| ConfigError::SsidTooLong)?;
        let passphrase =
            String::try_from(passphrase).map_err(|_| ConfigError::PassphraseTooLong)?;

        Ok(Self { ssid, passphrase })
    }

    /// Credentials baked in at build time
    ///
    /// Uses `WIFI_SSID` / `WIFI_PASSWORD` from the build environment. Each
    /// value falls back to its reference default when unset or invalid.
    pub fn from_build_env() -> Self {
        Self::from_env_values(env!("WIFI_SSID"), env!("WIFI_PASSWORD"))
    }

    fn from_env_values(ssid: &str, passphrase: &str) -> Self {
        let ssid = if ssid.is_empty() { DEFAULT_SSID } else { ssid };
        let passphrase = if passphrase.is_empty() {
            DEFAULT_PASSWORD
        } else {
            passphrase
        };

        Self::new(ssid, passphrase).unwrap_or_else(|_| Self::reference())
    }

    fn reference() -> Self {
        let mut ssid = String::new();
        let _ = ssid.push_str(DEFAULT_SSID);
        let mut passphrase = String::new();
        let _ = passphrase.push_str(DEFAULT_PASSWORD);
        Self { ssid, passphrase }
    }

    pub fn ssid(&self) -> &str {
        self.ssid.as_str()
    }

    pub fn passphrase(&self) -> &str {
        self.passphrase.as_str()
    }
}

impl Default for WifiCredentials {
    fn default() -> Self {
        Self::reference()
    }
}

fn has_separator(value: &str) -> bool {
    value.bytes().any(|b| matches!(b, b' ' | b'\r' | b'\n'))
}
